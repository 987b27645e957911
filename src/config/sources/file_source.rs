//! Generic async file-based state source with SHA256 change detection.
//!
//! [`FileSource`] implements [`ConfigSource`]
//! for any file format by accepting a deserialization function at
//! construction time. It reads the file asynchronously via Tokio,
//! validates the result, and computes a SHA256 hash for version tracking.

use std::path::PathBuf;

use async_trait::async_trait;

use super::sha256_hex;
use crate::config::model::LogicalConfig;
use crate::config::validation::validate;
use crate::config::{ConfigSource, ConfigVersion};
use crate::error::LbrenderError;

pub struct FileSource {
    path: PathBuf,
    name: &'static str,
    deserialize: fn(&str) -> Result<LogicalConfig, Box<dyn std::error::Error + Send + Sync>>,
}

impl FileSource {
    #[must_use]
    pub fn new(
        path: PathBuf,
        name: &'static str,
        deserialize: fn(&str) -> Result<LogicalConfig, Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            path,
            name,
            deserialize,
        }
    }

    async fn read_content(&self) -> Result<String, LbrenderError> {
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LbrenderError::StateFileNotFound {
                    path: self.path.clone(),
                }
            } else {
                LbrenderError::Io(e)
            }
        })
    }
}

#[async_trait]
impl ConfigSource for FileSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn load(&self) -> Result<(LogicalConfig, ConfigVersion), LbrenderError> {
        let content = self.read_content().await?;

        let config = (self.deserialize)(&content).map_err(|e| LbrenderError::StateParse {
            path: self.path.display().to_string(),
            source: e,
        })?;

        if let Err(errors) = validate(&config) {
            return Err(LbrenderError::StateValidation { errors });
        }

        tracing::debug!(
            path = %self.path.display(),
            members = config.members.len(),
            monitors = config.healthmonitors.len(),
            "logical state loaded"
        );

        let hash = sha256_hex(content.as_bytes());
        Ok((config, ConfigVersion::Hash(hash)))
    }

    async fn has_changed(&self, current: &ConfigVersion) -> Result<bool, LbrenderError> {
        let content = self.read_content().await?;
        let hash = sha256_hex(content.as_bytes());
        Ok(*current != ConfigVersion::Hash(hash))
    }
}
