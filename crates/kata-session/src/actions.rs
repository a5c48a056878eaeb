use std::path::{Path, PathBuf};

use kata_core::export::{write_export, ExportError, ExportRecord};

use super::debounce::Clock;
use super::types::SessionResponse;
use super::LiveSession;

impl<K: Clock> LiveSession<K> {
    /// Ask the frontend to put the current romaji on the clipboard.
    pub fn copy_romaji(&self) -> SessionResponse {
        SessionResponse {
            clipboard: Some(self.romaji.clone()),
            ..SessionResponse::default()
        }
    }

    pub fn toggle_theme(&mut self) -> SessionResponse {
        self.theme = self.theme.toggled();
        SessionResponse {
            theme: Some(self.theme),
            ..SessionResponse::default()
        }
    }

    pub fn export_record(&self) -> ExportRecord<'_> {
        ExportRecord {
            japanese: &self.input,
            romaji: &self.romaji,
            english: &self.english,
        }
    }

    /// Write the current values to `path` (`.txt` added when missing).
    pub fn export_to(&self, path: &Path) -> Result<PathBuf, ExportError> {
        write_export(path, &self.export_record())
    }
}
