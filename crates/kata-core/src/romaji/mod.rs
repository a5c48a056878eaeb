//! Kana-to-Hepburn romanization.
//!
//! Katakana is folded to hiragana, then converted with a trie-based
//! longest-match lookup, handling sokuon (っ), hatsuon (ん), the prolonged
//! sound mark (ー) and the iteration marks (ゝゞ).

mod config;
mod hepburn;
mod table;
mod trie;

pub use config::{parse_hepburn_toml, RomajiConfigError};
pub use hepburn::{romanize, to_hepburn, to_hepburn_with, RomanizeError};
pub use trie::HepburnTable;

/// Returns the embedded default Hepburn table.
pub fn default_toml() -> &'static str {
    table::DEFAULT_TOML
}
