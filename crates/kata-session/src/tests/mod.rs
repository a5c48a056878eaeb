mod proptest_fsm;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use kata_core::settings::{parse_settings_toml, DEFAULT_SETTINGS_TOML};
use kata_core::translate::{TranslateError, TranslationPipeline, Translator};

use super::debounce::ManualClock;
use super::LiveSession;

pub(super) const DELAY: Duration = Duration::from_millis(500);

/// Deterministic backend. Known phrases get fixed answers, `fail` entries
/// error out, everything else echoes the input.
pub(super) struct FakeTranslator {
    answers: HashMap<String, String>,
    failures: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeTranslator {
    pub fn new() -> Self {
        Self {
            answers: HashMap::new(),
            failures: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answers for the words used across the session tests.
    pub fn standard() -> Self {
        Self::new()
            .answer("こんぴゅーたー", "computer")
            .answer("かめら", "camera")
            .answer("ねこ", "cat")
            .answer("terebi", "television")
    }

    pub fn answer(mut self, text: &str, english: &str) -> Self {
        self.answers.insert(text.to_string(), english.to_string());
        self
    }

    pub fn fail(mut self, text: &str) -> Self {
        self.failures.push(text.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Translator for FakeTranslator {
    fn translate(&self, text: &str, _source: &str, _target: &str) -> Result<String, TranslateError> {
        self.calls.lock().unwrap().push(text.to_string());
        if self.failures.iter().any(|f| f == text) {
            return Err(TranslateError::Http("service unavailable".to_string()));
        }
        Ok(self
            .answers
            .get(text)
            .cloned()
            .unwrap_or_else(|| text.to_string()))
    }
}

pub(super) fn make_pipeline(backend: Arc<FakeTranslator>) -> Arc<TranslationPipeline> {
    let settings = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
    Arc::new(TranslationPipeline::new(backend, &settings.translation))
}

pub(super) fn make_session(
    backend: FakeTranslator,
) -> (LiveSession<ManualClock>, ManualClock, Arc<FakeTranslator>) {
    let backend = Arc::new(backend);
    let clock = ManualClock::new();
    let mut session = LiveSession::with_clock(make_pipeline(backend.clone()), clock.clone());
    session.set_delay(DELAY);
    (session, clock, backend)
}
