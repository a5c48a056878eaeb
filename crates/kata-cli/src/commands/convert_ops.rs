use std::path::Path;
use std::process;

use serde::Serialize;

use kata_core::export::{write_export, ExportRecord};
use kata_core::romaji::{romanize, to_hepburn};
use kata_core::settings::settings;
use kata_core::translate::{TranslationOutcome, TranslationPipeline};
use kata_core::unicode::{contains_japanese, hiragana_to_katakana, katakana_to_hiragana};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// `--json` output of the translate command.
#[derive(Debug, Serialize)]
pub struct TranslateReport<'a> {
    pub input: &'a str,
    pub hiragana: String,
    pub romaji: String,
    pub outcome: TranslationOutcome,
}

impl<'a> TranslateReport<'a> {
    pub fn new(input: &'a str, outcome: TranslationOutcome) -> Self {
        Self {
            input,
            hiragana: katakana_to_hiragana(input),
            romaji: romanize(input),
            outcome,
        }
    }
}

pub fn detect_cmd(text: &str) {
    println!("{}", contains_japanese(text));
}

/// Strict romanization: malformed input is reported instead of blanked.
pub fn romanize_cmd(text: &str) {
    let romaji = die!(to_hepburn(text), "Error: {}");
    println!("{romaji}");
}

pub fn hiragana_cmd(text: &str) {
    println!("{}", katakana_to_hiragana(text));
}

pub fn katakana_cmd(text: &str) {
    println!("{}", hiragana_to_katakana(text));
}

pub fn translate_cmd(text: &str, json: bool) {
    let pipeline = TranslationPipeline::google(&settings().translation);
    let outcome = pipeline.translate(text);

    if json {
        let report = TranslateReport::new(text, outcome);
        let out = die!(serde_json::to_string_pretty(&report), "Error: {}");
        println!("{out}");
        return;
    }

    match &outcome {
        TranslationOutcome::Translated { text, .. } => println!("{text}"),
        TranslationOutcome::Empty { reason } => {
            eprintln!("no translation: {reason:?}");
            process::exit(1);
        }
    }
}

pub fn export_cmd(text: &str, output: &str, no_translate: bool) {
    let text = text.trim();
    let romaji = romanize(text);
    let english = if no_translate {
        String::new()
    } else {
        let pipeline = TranslationPipeline::google(&settings().translation);
        pipeline.translate(text).text().to_string()
    };

    let record = ExportRecord {
        japanese: text,
        romaji: &romaji,
        english: &english,
    };
    let path = die!(
        write_export(Path::new(output), &record),
        "Error exporting: {}"
    );
    println!("Saved to {}", path.display());
}

#[cfg(test)]
mod tests {
    use kata_core::translate::Stage;

    use super::*;

    #[test]
    fn test_translate_report_json() {
        let outcome = TranslationOutcome::Translated {
            text: "computer".to_string(),
            stage: Stage::Hiragana,
        };
        let report = TranslateReport::new("コンピューター", outcome);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["hiragana"], "こんぴゅーたー");
        assert_eq!(value["romaji"], "konpyuutaa");
        assert_eq!(value["outcome"]["status"], "translated");
        assert_eq!(value["outcome"]["stage"], "hiragana");
    }

    #[test]
    fn test_translate_report_empty_romaji_for_malformed() {
        let outcome = TranslationOutcome::Empty {
            reason: kata_core::translate::EmptyReason::Unresolved,
        };
        let report = TranslateReport::new("ゝ", outcome);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["romaji"], "");
        assert_eq!(value["outcome"]["status"], "empty");
    }
}
