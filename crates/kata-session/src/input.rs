use kata_core::romaji::romanize;
use tracing::debug_span;

use super::debounce::Clock;
use super::types::{PendingTranslation, SessionResponse, SessionState};
use super::LiveSession;

impl<K: Clock> LiveSession<K> {
    /// Handle a change of the input buffer.
    ///
    /// Romaji is recomputed immediately; the translation timer is re-armed.
    /// Whitespace-only text behaves like an empty buffer.
    pub fn set_input(&mut self, text: &str) -> SessionResponse {
        let text = text.trim();
        if text.is_empty() {
            return self.reset_to_idle();
        }
        if text == self.input && self.state != SessionState::Idle {
            return SessionResponse::default();
        }

        let _span = debug_span!("set_input", chars = text.chars().count()).entered();
        self.input = text.to_string();
        self.generation += 1;
        self.romaji = romanize(text);
        self.debouncer.schedule(
            self.delay,
            PendingTranslation {
                text: self.input.clone(),
            },
        );
        self.state = SessionState::Computing;

        SessionResponse {
            romaji: Some(self.romaji.clone()),
            poll_after: Some(self.delay),
            ..SessionResponse::default()
        }
    }

    /// Explicit reset: blank the input box and both outputs, drop the timer.
    pub fn clear(&mut self) -> SessionResponse {
        let mut resp = self.reset_to_idle();
        resp.clear_input = true;
        resp
    }

    fn reset_to_idle(&mut self) -> SessionResponse {
        self.debouncer.cancel();
        self.generation += 1;
        self.input.clear();
        self.romaji.clear();
        self.english.clear();
        self.last_outcome = None;
        self.state = SessionState::Idle;

        SessionResponse {
            romaji: Some(String::new()),
            english: Some(String::new()),
            ..SessionResponse::default()
        }
    }
}
