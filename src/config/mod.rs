//! Logical-state loading, validation, and change detection.
//!
//! Defines the [`ConfigSource`] trait for pluggable state backends and
//! the [`ConfigVersion`] enum for change detection (content hash, used
//! by `lbrender watch` to decide when a re-render is due). Submodules
//! provide the data model, validation logic, and concrete source
//! implementations.

pub mod model;
pub mod sources;
pub mod validation;

use async_trait::async_trait;

use crate::error::LbrenderError;
use model::LogicalConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigVersion {
    Hash(String),
}

impl ConfigVersion {
    /// Abbreviated form for log lines.
    #[must_use]
    pub fn short(&self) -> &str {
        match self {
            Self::Hash(hash) => &hash[..hash.len().min(12)],
        }
    }
}

// async_trait is required here because ConfigSource is used as Box<dyn ConfigSource>
// and native async fn in traits (Rust 1.75+) does not support dyn dispatch.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn load(&self) -> Result<(LogicalConfig, ConfigVersion), LbrenderError>;
    async fn has_changed(&self, current: &ConfigVersion) -> Result<bool, LbrenderError>;
}
