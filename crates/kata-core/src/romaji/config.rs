use std::collections::BTreeMap;

use serde::Deserialize;

use crate::unicode::is_hiragana;

#[derive(Deserialize)]
struct HepburnConfig {
    mappings: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RomajiConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[mappings] table is empty")]
    Empty,
    #[error("key is not a hiragana sequence: {0}")]
    NonKanaKey(String),
    #[error("non-ASCII value for key {0}")]
    NonAsciiValue(String),
    #[error("empty value for key: {0}")]
    EmptyValue(String),
    #[error("reserved key: {0}")]
    ReservedKey(String),
    #[error("hepburn table already initialized")]
    AlreadyInitialized,
}

/// Kana the converter handles itself; a table entry for them would be dead.
const RESERVED: &[char] = &['っ', 'ゝ', 'ゞ'];

/// Parse TOML text into a sorted `BTreeMap<kana, romaji>`.
pub fn parse_hepburn_toml(toml_str: &str) -> Result<BTreeMap<String, String>, RomajiConfigError> {
    let config: HepburnConfig =
        toml::from_str(toml_str).map_err(|e| RomajiConfigError::Parse(e.to_string()))?;

    if config.mappings.is_empty() {
        return Err(RomajiConfigError::Empty);
    }

    for (key, value) in &config.mappings {
        if key.is_empty() || !key.chars().all(is_hiragana) {
            return Err(RomajiConfigError::NonKanaKey(key.clone()));
        }
        if key.chars().any(|c| RESERVED.contains(&c)) {
            return Err(RomajiConfigError::ReservedKey(key.clone()));
        }
        if value.is_empty() {
            return Err(RomajiConfigError::EmptyValue(key.clone()));
        }
        if !value.is_ascii() {
            return Err(RomajiConfigError::NonAsciiValue(key.clone()));
        }
    }

    Ok(config.mappings)
}
