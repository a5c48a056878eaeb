use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, debug_span, warn};

use super::{GoogleTranslator, TranslateError, Translator};
use crate::romaji::romanize;
use crate::settings::TranslationSettings;
use crate::unicode::{contains_japanese, katakana_to_hiragana};

/// Which pass of the pipeline produced the published translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// The text was translated as given.
    Direct,
    /// The katakana → hiragana normalized text was translated.
    Hiragana,
    /// The backend echoed Japanese; the romanized text was translated.
    RomajiFallback,
}

/// Why no translation is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum EmptyReason {
    /// Nothing to translate.
    BlankInput,
    /// Every pass came back empty or still in Japanese script.
    Unresolved,
    /// The backend failed; the message is kept for diagnostics only.
    Backend(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TranslationOutcome {
    Translated { text: String, stage: Stage },
    Empty { reason: EmptyReason },
}

impl TranslationOutcome {
    fn empty(reason: EmptyReason) -> Self {
        Self::Empty { reason }
    }

    /// The string to display: the translation, or `""`.
    pub fn text(&self) -> &str {
        match self {
            Self::Translated { text, .. } => text,
            Self::Empty { .. } => "",
        }
    }
}

/// Best-effort Japanese → English translation with recovery passes for
/// katakana loanwords the backend tends to echo back untranslated.
///
/// Issues at most three backend calls per request and never fails: errors
/// become [`EmptyReason::Backend`].
pub struct TranslationPipeline {
    backend: Arc<dyn Translator>,
    source: String,
    target: String,
    fallback_source: String,
}

impl TranslationPipeline {
    pub fn new(backend: Arc<dyn Translator>, settings: &TranslationSettings) -> Self {
        Self {
            backend,
            source: settings.source.clone(),
            target: settings.target.clone(),
            fallback_source: settings.fallback_source.clone(),
        }
    }

    /// Pipeline over the Google backend configured by `settings`.
    pub fn google(settings: &TranslationSettings) -> Self {
        Self::new(Arc::new(GoogleTranslator::from_settings(settings)), settings)
    }

    pub fn translate(&self, text: &str) -> TranslationOutcome {
        let _span = debug_span!("translate_pipeline", chars = text.chars().count()).entered();
        match self.run(text) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("translation error: {e}");
                TranslationOutcome::empty(EmptyReason::Backend(e.to_string()))
            }
        }
    }

    fn run(&self, text: &str) -> Result<TranslationOutcome, TranslateError> {
        if text.trim().is_empty() {
            return Ok(TranslationOutcome::empty(EmptyReason::BlankInput));
        }

        let direct = self.backend.translate(text, &self.source, &self.target)?;

        // The hiragana pass supersedes the direct one. When normalization
        // changes nothing, the request would be identical, so reuse it.
        let hiragana = katakana_to_hiragana(text);
        let (mut result, mut stage) = if hiragana == text {
            (direct, Stage::Direct)
        } else {
            let normalized = self.backend.translate(&hiragana, &self.source, &self.target)?;
            (normalized, Stage::Hiragana)
        };

        if contains_japanese(&result) {
            let romaji = romanize(text);
            if romaji.is_empty() {
                return Ok(TranslationOutcome::empty(EmptyReason::Unresolved));
            }
            debug!(%romaji, "backend echoed Japanese, retrying with romaji");
            result = self
                .backend
                .translate(&romaji, &self.fallback_source, &self.target)?;
            stage = Stage::RomajiFallback;
        }

        let result = result.trim();
        if result.is_empty() || contains_japanese(result) {
            return Ok(TranslationOutcome::empty(EmptyReason::Unresolved));
        }
        Ok(TranslationOutcome::Translated {
            text: result.to_string(),
            stage,
        })
    }
}
