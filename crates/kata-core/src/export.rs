//! Plain-text export of the current conversion.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

pub const DEFAULT_EXTENSION: &str = "txt";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

/// The three values written to an export file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportRecord<'a> {
    pub japanese: &'a str,
    pub romaji: &'a str,
    pub english: &'a str,
}

impl ExportRecord<'_> {
    /// Render the labeled sections in their fixed order.
    pub fn render(&self) -> String {
        format!(
            "Japanese:\n{}\n\nRomaji:\n{}\n\nEnglish:\n{}\n",
            self.japanese, self.romaji, self.english
        )
    }
}

/// Append `.txt` when the chosen path has no extension.
pub fn with_default_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(DEFAULT_EXTENSION)
    }
}

/// Write `record` as UTF-8 to `path` (extension defaulted), returning the
/// path actually written.
pub fn write_export(path: &Path, record: &ExportRecord<'_>) -> Result<PathBuf, ExportError> {
    let path = with_default_extension(path);
    fs::write(&path, record.render()).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), "export written");
    Ok(path)
}
