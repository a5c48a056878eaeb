use std::collections::HashMap;
use std::sync::OnceLock;

use super::config::{parse_hepburn_toml, RomajiConfigError};
use super::table::DEFAULT_TOML;

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

struct Node {
    children: HashMap<char, Node>,
    romaji: Option<String>,
}

impl Node {
    fn new() -> Self {
        Self {
            children: HashMap::new(),
            romaji: None,
        }
    }
}

/// Character trie over hiragana sequences, used for longest-match lookup.
pub struct HepburnTable {
    root: Node,
}

impl HepburnTable {
    /// Set custom TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), RomajiConfigError> {
        // Validate eagerly
        parse_hepburn_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| RomajiConfigError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static HepburnTable {
        static INSTANCE: OnceLock<HepburnTable> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_TOML);
            let map = parse_hepburn_toml(toml_str).expect("hepburn TOML must be valid");
            Self::from_pairs(map.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        })
    }

    /// Build a standalone table, e.g. from a parsed custom file.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut table = HepburnTable { root: Node::new() };
        for (kana, romaji) in pairs {
            table.insert(kana, romaji);
        }
        table
    }

    fn insert(&mut self, kana: &str, romaji: &str) {
        let mut node = &mut self.root;
        for c in kana.chars() {
            node = node.children.entry(c).or_insert_with(Node::new);
        }
        node.romaji = Some(romaji.to_string());
    }

    /// Exact lookup of a full kana sequence.
    pub fn get(&self, kana: &str) -> Option<&str> {
        let mut node = &self.root;
        for c in kana.chars() {
            node = node.children.get(&c)?;
        }
        node.romaji.as_deref()
    }

    /// Longest table entry that prefixes `chars`.
    /// Returns the number of characters consumed and the romaji.
    pub fn longest_match(&self, chars: &[char]) -> Option<(usize, &str)> {
        let mut node = &self.root;
        let mut best = None;
        for (i, c) in chars.iter().enumerate() {
            match node.children.get(c) {
                Some(child) => node = child,
                None => break,
            }
            if let Some(ref romaji) = node.romaji {
                best = Some((i + 1, romaji.as_str()));
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_vowel_exact() {
        let table = HepburnTable::global();
        assert_eq!(table.get("あ"), Some("a"));
    }

    #[test]
    fn test_youon_longest_match() {
        let table = HepburnTable::global();
        assert_eq!(table.longest_match(&chars("しゃしん")), Some((2, "sha")));
        assert_eq!(table.longest_match(&chars("しん")), Some((1, "shi")));
    }

    #[test]
    fn test_prefix_without_value_falls_back() {
        let table = HepburnTable::from_pairs([("き", "ki"), ("きゃあ", "kyaa")]);
        // "きゃ" is only a path in the trie, not an entry
        assert_eq!(table.longest_match(&chars("きゃ")), Some((1, "ki")));
        assert_eq!(table.longest_match(&chars("きゃあ")), Some((3, "kyaa")));
    }

    #[test]
    fn test_no_match() {
        let table = HepburnTable::global();
        assert_eq!(table.longest_match(&chars("漢字")), None);
        assert_eq!(table.longest_match(&[]), None);
        assert_eq!(table.get("っ"), None);
    }

    #[test]
    fn test_all_mappings_roundtrip() {
        let table = HepburnTable::global();
        let map = parse_hepburn_toml(DEFAULT_TOML).unwrap();
        for (kana, romaji) in &map {
            assert_eq!(
                table.get(kana),
                Some(romaji.as_str()),
                "mapping mismatch for kana={kana}"
            );
        }
    }
}
