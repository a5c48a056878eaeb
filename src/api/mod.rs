//! UniFFI export layer: type-safe foreign bindings for the kataroma engine.
//!
//! Each public type here maps to a generated class, struct, or enum on the
//! frontend side.

mod session;
mod types;

pub use session::KataSession;
pub use types::{KataError, KataEvent, KataPalette, KataResponse, KataState, KataTheme};

use std::path::Path;

use kata_core::romaji::HepburnTable;

// ---------------------------------------------------------------------------
// Top-level functions
// ---------------------------------------------------------------------------

#[uniffi::export]
fn engine_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[uniffi::export]
fn contains_japanese(text: String) -> bool {
    kata_core::unicode::contains_japanese(&text)
}

/// Hepburn romaji, or an empty string for malformed input.
#[uniffi::export]
fn romanize(text: String) -> String {
    kata_core::romaji::romanize(&text)
}

#[uniffi::export]
fn katakana_to_hiragana(text: String) -> String {
    kata_core::unicode::katakana_to_hiragana(&text)
}

#[uniffi::export]
fn romaji_load_config(path: String) -> Result<(), KataError> {
    let content = std::fs::read_to_string(&path).map_err(|e| KataError::Io {
        msg: format!("{path}: {e}"),
    })?;
    HepburnTable::init_custom(content).map_err(|e| KataError::InvalidData { msg: e.to_string() })?;
    Ok(())
}

#[uniffi::export]
fn settings_load_config(path: String) -> Result<(), KataError> {
    let content = std::fs::read_to_string(&path).map_err(|e| KataError::Io {
        msg: format!("{path}: {e}"),
    })?;
    kata_core::settings::init_custom(content)
        .map_err(|e| KataError::InvalidData { msg: e.to_string() })?;
    Ok(())
}

#[uniffi::export]
fn romaji_default_config() -> String {
    kata_core::romaji::default_toml().to_string()
}

#[uniffi::export]
fn settings_default_config() -> String {
    kata_core::settings::DEFAULT_SETTINGS_TOML.to_string()
}

#[uniffi::export]
fn trace_init(log_dir: String) {
    crate::trace_init::init_tracing(Path::new(&log_dir));
}
