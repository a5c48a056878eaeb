use std::time::Duration;

use kata_session::{Palette, SessionResponse, SessionState, Theme};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum KataError {
    #[error("IO error: {msg}")]
    Io { msg: String },
    #[error("invalid data: {msg}")]
    InvalidData { msg: String },
}

// ---------------------------------------------------------------------------
// Records (value types, copied across FFI boundary)
// ---------------------------------------------------------------------------

/// Colors for every widget, as `#rrggbb` strings.
#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct KataPalette {
    pub background: String,
    pub card: String,
    pub text: String,
    pub muted: String,
    pub accent: String,
    pub on_accent: String,
    pub entry: String,
    pub border: String,
}

impl From<&Palette> for KataPalette {
    fn from(p: &Palette) -> Self {
        Self {
            background: p.background.to_string(),
            card: p.card.to_string(),
            text: p.text.to_string(),
            muted: p.muted.to_string(),
            accent: p.accent.to_string(),
            on_accent: p.on_accent.to_string(),
            entry: p.entry.to_string(),
            border: p.border.to_string(),
        }
    }
}

/// Event-driven response from set_input / clear / poll and the buttons.
#[derive(Debug, uniffi::Record)]
pub struct KataResponse {
    pub events: Vec<KataEvent>,
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, uniffi::Enum)]
pub enum KataEvent {
    ClearInput,
    SetRomaji { text: String },
    SetEnglish { text: String },
    CopyToClipboard { text: String },
    ApplyTheme { palette: KataPalette },
    /// Call `poll` again after this many milliseconds.
    SchedulePoll { delay_ms: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum KataTheme {
    Dark,
    Light,
}

impl From<Theme> for KataTheme {
    fn from(t: Theme) -> Self {
        match t {
            Theme::Dark => Self::Dark,
            Theme::Light => Self::Light,
        }
    }
}

impl From<KataTheme> for Theme {
    fn from(t: KataTheme) -> Self {
        match t {
            KataTheme::Dark => Self::Dark,
            KataTheme::Light => Self::Light,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum KataState {
    Idle,
    Computing,
    Settled,
}

impl From<SessionState> for KataState {
    fn from(s: SessionState) -> Self {
        match s {
            SessionState::Idle => Self::Idle,
            SessionState::Computing => Self::Computing,
            SessionState::Settled => Self::Settled,
        }
    }
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Flatten a session response into frontend events. `translation_request`
/// is consumed by the caller before this point.
pub(super) fn convert_to_events(resp: SessionResponse, poll_after: Option<Duration>) -> Vec<KataEvent> {
    let mut events = Vec::new();

    // 1. Input box
    if resp.clear_input {
        events.push(KataEvent::ClearInput);
    }

    // 2. Output labels
    if let Some(text) = resp.romaji {
        events.push(KataEvent::SetRomaji { text });
    }
    if let Some(text) = resp.english {
        events.push(KataEvent::SetEnglish { text });
    }

    // 3. Side effects
    if let Some(text) = resp.clipboard {
        events.push(KataEvent::CopyToClipboard { text });
    }
    if let Some(theme) = resp.theme {
        events.push(KataEvent::ApplyTheme {
            palette: theme.palette().into(),
        });
    }

    // 4. Schedule poll
    if let Some(delay) = poll_after {
        events.push(KataEvent::SchedulePoll {
            delay_ms: u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
        });
    }

    events
}
