//! Character-level Unicode classification and script conversion for Japanese text.

/// Check the full Hiragana block (U+3040..U+309F).
pub fn is_hiragana(c: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&c)
}

/// Code point test used by [`contains_japanese`]: kana (U+3040..U+30FF) or
/// CJK unified ideographs (U+4E00..U+9FAF).
pub fn is_japanese_script(c: char) -> bool {
    ('\u{3040}'..='\u{30FF}').contains(&c) || ('\u{4E00}'..='\u{9FAF}').contains(&c)
}

/// True if `text` contains at least one kana or kanji code point.
///
/// A translation result that still passes this check means the backend echoed
/// the source instead of translating it.
pub fn contains_japanese(text: &str) -> bool {
    text.chars().any(is_japanese_script)
}

/// Katakana letters that have a hiragana counterpart at a fixed offset:
/// ァ..ヶ (U+30A1..U+30F6) and the iteration marks ヽヾ.
fn has_hiragana_form(c: char) -> bool {
    ('\u{30A1}'..='\u{30F6}').contains(&c) || c == 'ヽ' || c == 'ヾ'
}

/// Convert a katakana string to hiragana.
/// ー, ・, ヷ..ヺ and non-katakana characters are passed through unchanged.
pub fn katakana_to_hiragana(s: &str) -> String {
    s.chars()
        .map(|c| {
            if has_hiragana_form(c) {
                char::from_u32(c as u32 - 0x60).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Convert a hiragana string to katakana.
/// Non-hiragana characters (ー, ASCII, etc.) are passed through unchanged.
pub fn hiragana_to_katakana(s: &str) -> String {
    s.chars()
        .map(|c| {
            if ('\u{3041}'..='\u{3096}').contains(&c) || c == 'ゝ' || c == 'ゞ' {
                char::from_u32(c as u32 + 0x60).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}
