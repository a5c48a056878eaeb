//! Core conversions for the live katakana converter: script detection,
//! Hepburn romanization, translation and export.

pub mod export;
pub mod romaji;
pub mod settings;
pub mod translate;
pub mod unicode;
