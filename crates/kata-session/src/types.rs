use std::time::Duration;

use crate::theme::Theme;

/// Lifecycle of the live view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No input.
    Idle,
    /// Romaji shown; translation scheduled or in flight.
    Computing,
    /// Translation published for the current input.
    Settled,
}

/// Translation work for the caller to run off the event thread, when
/// `defer_translation` is enabled. Feed the result back through
/// `receive_translation` with the same generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub generation: u64,
}

/// Payload of the debounce timer: the text captured when it was armed.
#[derive(Debug, Clone)]
pub(crate) struct PendingTranslation {
    pub(crate) text: String,
}

/// What the frontend should change after a session call.
/// `Some` replaces the field in full; `None` leaves it alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionResponse {
    pub romaji: Option<String>,
    pub english: Option<String>,
    /// Blank the input box (explicit clear).
    pub clear_input: bool,
    /// Replace the clipboard contents.
    pub clipboard: Option<String>,
    /// Re-style all widgets with this theme.
    pub theme: Option<Theme>,
    pub translation_request: Option<TranslationRequest>,
    /// Call `poll` again after this long.
    pub poll_after: Option<Duration>,
}

impl SessionResponse {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
