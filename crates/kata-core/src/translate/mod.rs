//! Translation: a pluggable backend plus the kana-normalizing fallback pipeline.

mod google;
mod pipeline;

pub use google::GoogleTranslator;
pub use pipeline::{EmptyReason, Stage, TranslationOutcome, TranslationPipeline};

/// A translation service. Implementations block the calling thread.
pub trait Translator: Send + Sync {
    /// Translate `text` from `source` to `target` (language codes such as
    /// `"ja"`, `"en"`, or `"auto"` for detection).
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslateError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("unexpected response: {0}")]
    Parse(String),
    #[error("text too long: {len} characters (max {max})")]
    TooLong { len: usize, max: usize },
}
