//! Serialize a [`LogicalConfig`] struct to the chosen output format.

use crate::cli::StateFormat;
use crate::config::model::LogicalConfig;
use crate::error::LbrenderError;

/// Serialize a `LogicalConfig` to a formatted string in the given format.
pub fn serialize_config(
    config: &LogicalConfig,
    format: &StateFormat,
) -> Result<String, LbrenderError> {
    match format {
        #[cfg(feature = "yaml")]
        StateFormat::Yaml => serde_yml::to_string(config)
            .map_err(|e| LbrenderError::Io(std::io::Error::other(e.to_string()))),

        #[cfg(not(feature = "yaml"))]
        StateFormat::Yaml => Err(LbrenderError::UnsupportedFormat("yaml".into())),

        StateFormat::Json => serde_json::to_string_pretty(config)
            .map_err(|e| LbrenderError::Io(std::io::Error::other(e.to_string()))),

        #[cfg(feature = "toml")]
        StateFormat::Toml => toml::to_string_pretty(config)
            .map_err(|e| LbrenderError::Io(std::io::Error::other(e.to_string()))),

        #[cfg(not(feature = "toml"))]
        StateFormat::Toml => Err(LbrenderError::UnsupportedFormat("toml".into())),
    }
}
