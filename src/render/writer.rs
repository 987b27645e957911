//! Atomic replacement of the rendered config file.
//!
//! The daemon reloads from the published path, so a reader must never
//! observe a half-written file. [`replace_file`] writes the new text to
//! a temporary file in the target's directory and renames it over the
//! path — on the same filesystem, rename is atomic. When the rendered
//! text is byte-identical to the current contents the write is skipped
//! entirely, so callers can avoid signalling pointless daemon reloads.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::config::sources::sha256_hex;
use crate::error::LbrenderError;

/// Whether [`replace_file`] actually touched the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
}

/// Atomically replace the full contents of `path` with `contents`.
///
/// On failure the prior file contents remain intact.
pub fn replace_file(path: &Path, contents: &str) -> Result<WriteOutcome, LbrenderError> {
    if let Ok(existing) = fs::read(path) {
        if sha256_hex(&existing) == sha256_hex(contents.as_bytes()) {
            return Ok(WriteOutcome::Unchanged);
        }
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    // Flush to disk before the rename so a crash cannot publish an empty file
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| LbrenderError::Io(e.error))?;

    Ok(WriteOutcome::Written)
}
