//! Core rendering pipeline: logical state in, HAProxy config text out.
//!
//! [`render_config`] is the pure half — it assembles the `global`,
//! `defaults`, `frontend`, and `backend` sections in that fixed order and
//! joins them into the final text. [`save`] adds the side effect: an
//! atomic replace of the target file, skipped when the rendered text is
//! byte-identical to what is already on disk.
//!
//! Rendering holds no state between invocations; identical input produces
//! byte-identical output.

pub mod health;
pub mod sections;
pub mod writer;

use std::path::Path;

use crate::config::model::LogicalConfig;
use crate::error::LbrenderError;
use sections::{build_backend, build_defaults, build_frontend, build_global, RenderDefaults};
pub use writer::WriteOutcome;

/// One configuration-file block: an un-indented header line followed by
/// tab-indented option lines.
#[derive(Debug, Clone)]
pub struct Section {
    pub header: String,
    pub options: Vec<String>,
}

impl Section {
    fn write_lines(&self, out: &mut Vec<String>) {
        out.push(self.header.clone());
        out.extend(self.options.iter().map(|o| format!("\t{o}")));
    }
}

/// Render the logical configuration to HAProxy config text.
///
/// The optional `socket_path` adds a `stats socket` directive to the
/// `global` section and changes nothing else.
pub fn render_config(
    config: &LogicalConfig,
    socket_path: Option<&Path>,
) -> Result<String, LbrenderError> {
    let sections = [
        build_global(socket_path),
        build_defaults(&RenderDefaults::default()),
        build_frontend(config)?,
        build_backend(config)?,
    ];

    let mut lines = Vec::new();
    for section in &sections {
        section.write_lines(&mut lines);
    }
    Ok(lines.join("\n"))
}

/// Render and atomically replace `path` with the result.
///
/// On success the file contains either the complete new text or, when the
/// rendered text matches the current contents, is left untouched
/// ([`WriteOutcome::Unchanged`]). On failure the prior contents remain
/// intact; readers never observe a partial write.
pub fn save(
    path: &Path,
    config: &LogicalConfig,
    socket_path: Option<&Path>,
) -> Result<WriteOutcome, LbrenderError> {
    let rendered = render_config(config, socket_path)?;
    writer::replace_file(path, &rendered)
}
