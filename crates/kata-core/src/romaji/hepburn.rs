use tracing::{debug, debug_span};

use super::trie::HepburnTable;
use crate::unicode::katakana_to_hiragana;

/// Malformed kana. `position` is a character index into the input text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RomanizeError {
    #[error("voicing mark with no base kana at character {position}")]
    OrphanVoicingMark { position: usize },
    #[error("iteration mark with nothing to repeat at character {position}")]
    OrphanIterationMark { position: usize },
}

/// Romanize `text`, containing failures: malformed input yields `""`.
///
/// This is what the live view calls on every input change; it never fails so
/// the romaji field simply goes blank on bad input.
pub fn romanize(text: &str) -> String {
    match to_hepburn(text) {
        Ok(romaji) => romaji,
        Err(e) => {
            debug!("romanization failed: {e}");
            String::new()
        }
    }
}

/// Convert kana in `text` to Hepburn romaji using the global table.
///
/// Characters outside the table (kanji, Latin, digits) pass through unchanged;
/// full-width punctuation is folded to its ASCII form.
pub fn to_hepburn(text: &str) -> Result<String, RomanizeError> {
    to_hepburn_with(HepburnTable::global(), text)
}

pub fn to_hepburn_with(table: &HepburnTable, text: &str) -> Result<String, RomanizeError> {
    let _span = debug_span!("to_hepburn", chars = text.chars().count()).entered();

    let (chars, origins) = compose_voicing_marks(&katakana_to_hiragana(text))?;
    let mut out = String::with_capacity(text.len());
    let mut run = KanaRun::default();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            'っ' => {
                run.sokuon = true;
                i += 1;
            }
            'ー' => {
                // Nothing to lengthen (after ん or outside a kana run): a plain dash.
                match run.last_sound() {
                    Some(sound) if !run.after_hatsuon => out.push(sound),
                    _ => {
                        out.push('-');
                        run.after_hatsuon = false;
                        run.last_syllable = None;
                    }
                }
                run.sokuon = false;
                i += 1;
            }
            'ゝ' | 'ゞ' => {
                let Some(prev) = run.last_syllable.clone() else {
                    return Err(RomanizeError::OrphanIterationMark {
                        position: origins[i],
                    });
                };
                let syllable = if c == 'ゞ' { voiced(&prev) } else { prev };
                run.emit(&mut out, &syllable, false);
                i += 1;
            }
            _ => {
                if let Some((len, romaji)) = table.longest_match(&chars[i..]) {
                    run.emit(&mut out, romaji, c == 'ん');
                    i += len;
                } else {
                    // Anything else ends the kana run; a dangling っ is dropped.
                    run = KanaRun::default();
                    match fold_punctuation(c) {
                        Some(ascii) => out.push(ascii),
                        None => out.push(c),
                    }
                    i += 1;
                }
            }
        }
    }

    Ok(out)
}

/// Conversion state carried across one contiguous run of kana.
#[derive(Default)]
struct KanaRun {
    last_syllable: Option<String>,
    sokuon: bool,
    after_hatsuon: bool,
}

impl KanaRun {
    fn emit(&mut self, out: &mut String, romaji: &str, hatsuon: bool) {
        if self.after_hatsuon && starts_with_vowel_or_y(romaji) {
            out.push('\'');
        }
        if self.sokuon {
            if let Some(c) = geminate(romaji) {
                out.push(c);
            }
        }
        out.push_str(romaji);
        self.sokuon = false;
        self.after_hatsuon = hatsuon;
        self.last_syllable = Some(romaji.to_string());
    }

    fn last_sound(&self) -> Option<char> {
        self.last_syllable.as_deref().and_then(|s| s.chars().last())
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'i' | 'u' | 'e' | 'o')
}

fn starts_with_vowel_or_y(romaji: &str) -> bool {
    romaji.chars().next().is_some_and(|c| is_vowel(c) || c == 'y')
}

/// Consonant to double for a preceding っ. Hepburn writes っち as "tchi".
fn geminate(romaji: &str) -> Option<char> {
    if romaji.starts_with("ch") {
        return Some('t');
    }
    romaji
        .chars()
        .next()
        .filter(|c| c.is_ascii_lowercase() && !is_vowel(*c))
}

/// Voiced form of a syllable, for ゞ.
fn voiced(syllable: &str) -> String {
    const PAIRS: &[(&str, &str)] = &[
        ("sh", "j"),
        ("ch", "j"),
        ("ts", "z"),
        ("k", "g"),
        ("s", "z"),
        ("t", "d"),
        ("h", "b"),
        ("f", "b"),
    ];
    for (from, to) in PAIRS {
        if let Some(rest) = syllable.strip_prefix(from) {
            return format!("{to}{rest}");
        }
    }
    syllable.to_string()
}

/// Fold combining (U+3099/U+309A) and spacing (U+309B/U+309C) voicing marks
/// into the preceding hiragana, e.g. か + ゛ → が.
///
/// Also returns, for each output character, its index in `s`.
fn compose_voicing_marks(s: &str) -> Result<(Vec<char>, Vec<usize>), RomanizeError> {
    let mut out: Vec<char> = Vec::with_capacity(s.len());
    let mut origins: Vec<usize> = Vec::with_capacity(s.len());
    for (position, c) in s.chars().enumerate() {
        let offset = match c {
            '\u{3099}' | '\u{309B}' => 1,
            '\u{309A}' | '\u{309C}' => 2,
            _ => {
                out.push(c);
                origins.push(position);
                continue;
            }
        };
        match out.last().copied().and_then(|base| compose(base, offset)) {
            Some(composed) => {
                out.pop();
                out.push(composed);
            }
            None => return Err(RomanizeError::OrphanVoicingMark { position }),
        }
    }
    Ok((out, origins))
}

fn compose(base: char, offset: u32) -> Option<char> {
    const VOICEABLE: &str = "かきくけこさしすせそたちつてとはひふへほ";
    const SEMI_VOICEABLE: &str = "はひふへほ";
    match (base, offset) {
        ('う', 1) => Some('ゔ'),
        ('ゝ', 1) => Some('ゞ'),
        (b, 1) if VOICEABLE.contains(b) => char::from_u32(b as u32 + 1),
        (b, 2) if SEMI_VOICEABLE.contains(b) => char::from_u32(b as u32 + 2),
        _ => None,
    }
}

fn fold_punctuation(c: char) -> Option<char> {
    match c {
        '。' => Some('.'),
        '、' => Some(','),
        '「' | '」' | '『' | '』' => Some('"'),
        '\u{3000}' | '・' => Some(' '),
        '！' => Some('!'),
        '？' => Some('?'),
        '〜' | '～' => Some('~'),
        _ => None,
    }
}
