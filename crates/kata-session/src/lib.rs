//! Live conversion session: romaji on every input change, English after the
//! input goes quiet.
//!
//! `LiveSession` owns the current buffer, the output pair and the single
//! debounce timer. The frontend forwards input changes and timer ticks, and
//! applies the returned `SessionResponse`.

pub mod debounce;
pub mod theme;
pub(crate) mod types;

mod actions;
mod input;
mod translation;

#[cfg(test)]
mod tests;

use std::sync::Arc;
use std::time::Duration;

use kata_core::settings::settings;
use kata_core::translate::{TranslationOutcome, TranslationPipeline};

pub use debounce::{Clock, Debouncer, ManualClock, SystemClock, TimerHandle};
pub use theme::{Palette, Theme};
pub use types::{SessionResponse, SessionState, TranslationRequest};

use types::PendingTranslation;

/// Stateful live-conversion session. Single-threaded: every method runs on
/// the frontend's event thread.
pub struct LiveSession<K: Clock = SystemClock> {
    pipeline: Arc<TranslationPipeline>,
    debouncer: Debouncer<PendingTranslation, K>,

    state: SessionState,
    input: String,
    romaji: String,
    english: String,
    /// Bumped on every input change and clear; stale results compare unequal.
    generation: u64,
    last_outcome: Option<TranslationOutcome>,

    // Settings
    delay: Duration,
    /// When true, a fired timer returns a `TranslationRequest` instead of
    /// calling the pipeline inline.
    defer_translation: bool,
    theme: Theme,
}

impl LiveSession<SystemClock> {
    pub fn new(pipeline: Arc<TranslationPipeline>) -> Self {
        Self::with_clock(pipeline, SystemClock)
    }
}

impl<K: Clock> LiveSession<K> {
    pub fn with_clock(pipeline: Arc<TranslationPipeline>, clock: K) -> Self {
        let s = settings();
        Self {
            pipeline,
            debouncer: Debouncer::with_clock(clock),
            state: SessionState::Idle,
            input: String::new(),
            romaji: String::new(),
            english: String::new(),
            generation: 0,
            last_outcome: None,
            delay: s.debounce.delay(),
            defer_translation: false,
            theme: s.theme.initial.into(),
        }
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn set_defer_translation(&mut self, enabled: bool) {
        self.defer_translation = enabled;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The trimmed input the session last saw.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn romaji(&self) -> &str {
        &self.romaji
    }

    pub fn english(&self) -> &str {
        &self.english
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn palette(&self) -> &'static Palette {
        self.theme.palette()
    }

    /// Typed result behind the current English field, if one was published.
    pub fn last_outcome(&self) -> Option<&TranslationOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn has_pending_timer(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn pipeline(&self) -> &Arc<TranslationPipeline> {
        &self.pipeline
    }
}
