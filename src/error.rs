//! Unified error types for lbrender.
//!
//! Defines [`LbrenderError`] (the main crate error enum) and
//! [`ValidationError`] for logical-state validation failures. Both use
//! `thiserror` for `Display` and `Error` derives. Error messages
//! include contextual hints to guide the user toward a fix.

use std::path::PathBuf;

use crate::config::model::Protocol;

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub resource: String,
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "  {}: {} — {}",
            self.resource, self.field, self.message
        )?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " ({suggestion})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

fn format_errors(errors: &[ValidationError]) -> String {
    use std::fmt::Write;
    let mut buf = String::new();
    for (i, e) in errors.iter().enumerate() {
        if i > 0 {
            buf.push('\n');
        }
        // write! to String is infallible (only fails on OOM which is unrecoverable)
        let _ = write!(buf, "{e}");
    }
    buf
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LbrenderError {
    #[error("State file not found: {}", path.display())]
    StateFileNotFound { path: PathBuf },

    #[error("State parse error in {path}:\n  {source}")]
    StateParse {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("State validation failed:\n{}", format_errors(.errors))]
    StateValidation { errors: Vec<ValidationError> },

    #[error("Unsupported state format: '{0}'")]
    UnsupportedFormat(String),

    #[error("vip '{vip}' has no fixed IP to bind to (add an entry to vip.port.fixed_ips)")]
    MissingBindAddress { vip: String },

    #[error("no proxy mode mapping for protocol {protocol}")]
    UnmappedProtocol { protocol: Protocol },

    #[error("invalid status code token '{token}' in expected_codes (expected a code like 200 or a range like 200-204)")]
    ExpectedCodes { token: String },

    #[error("File already exists: {}", path.display())]
    FileExists { path: PathBuf },

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
