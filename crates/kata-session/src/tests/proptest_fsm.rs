//! Property-based tests for the LiveSession state machine.
//!
//! Generates random edit/clock sequences via proptest and verifies that
//! structural invariants hold after every action.

use proptest::prelude::*;

use super::*;
use crate::{SessionResponse, SessionState};

// ---------------------------------------------------------------------------
// Action enum: every user-facing operation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Action {
    /// Append a katakana character to the buffer.
    Type(char),
    Backspace,
    /// Select-all + delete.
    DeleteAll,
    Clear,
    /// Advance the clock by this many ms, then poll.
    Wait(u64),
    Copy,
    ToggleTheme,
    /// Deliver the oldest outstanding deferred request.
    Deliver,
}

// ---------------------------------------------------------------------------
// Strategy: weighted random Action generation
// ---------------------------------------------------------------------------

fn arb_kana() -> impl Strategy<Value = char> {
    prop::sample::select(vec![
        'カ', 'メ', 'ラ', 'ネ', 'コ', 'ン', 'ピ', 'ュ', 'ー', 'タ', 'テ', 'レ', 'ビ', 'ッ', 'ア', ' ',
    ])
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        40 => arb_kana().prop_map(Action::Type),
        8 => Just(Action::Backspace),
        3 => Just(Action::DeleteAll),
        3 => Just(Action::Clear),
        20 => (0u64..800).prop_map(Action::Wait),
        2 => Just(Action::Copy),
        2 => Just(Action::ToggleTheme),
        8 => Just(Action::Deliver),
    ]
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

struct Harness {
    session: LiveSession<ManualClock>,
    clock: ManualClock,
    buffer: String,
    requests: Vec<crate::TranslationRequest>,
    /// Set by Clear/DeleteAll, reset by the next edit that leaves text.
    cleared: bool,
}

impl Harness {
    fn new(defer: bool) -> Self {
        let (mut session, clock, _) = make_session(FakeTranslator::standard());
        session.set_defer_translation(defer);
        Self {
            session,
            clock,
            buffer: String::new(),
            requests: Vec::new(),
            cleared: false,
        }
    }

    fn execute(&mut self, action: &Action) -> SessionResponse {
        let resp = match action {
            Action::Type(ch) => {
                self.buffer.push(*ch);
                self.session.set_input(&self.buffer.clone())
            }
            Action::Backspace => {
                self.buffer.pop();
                self.session.set_input(&self.buffer.clone())
            }
            Action::DeleteAll => {
                self.buffer.clear();
                self.session.set_input("")
            }
            Action::Clear => {
                self.buffer.clear();
                self.session.clear()
            }
            Action::Wait(ms) => {
                self.clock.advance(Duration::from_millis(*ms));
                self.session.poll()
            }
            Action::Copy => self.session.copy_romaji(),
            Action::ToggleTheme => self.session.toggle_theme(),
            Action::Deliver => {
                if self.requests.is_empty() {
                    return SessionResponse::default();
                }
                let req = self.requests.remove(0);
                let outcome = self.session.pipeline().translate(&req.text);
                self.session
                    .receive_translation(req.generation, outcome)
                    .unwrap_or_default()
            }
        };
        if self.buffer.trim().is_empty() {
            self.cleared = true;
        } else if resp.romaji.is_some() {
            self.cleared = false;
        }
        if let Some(req) = &resp.translation_request {
            self.requests.push(req.clone());
        }
        resp
    }
}

// ---------------------------------------------------------------------------
// Invariant checks, run after every action
// ---------------------------------------------------------------------------

fn assert_invariants(h: &Harness, resp: &SessionResponse, action: &Action) {
    let s = &h.session;

    // 1. Idle ⇔ empty input, and Idle has blank outputs and no timer
    assert_eq!(
        s.state() == SessionState::Idle,
        s.input().is_empty(),
        "Idle must coincide with empty input after {:?}",
        action,
    );
    if s.state() == SessionState::Idle {
        assert!(s.romaji().is_empty(), "Idle romaji must be blank after {:?}", action);
        assert!(s.english().is_empty(), "Idle english must be blank after {:?}", action);
        assert!(!s.has_pending_timer(), "Idle must have no timer after {:?}", action);
    }

    // 2. Session input mirrors the trimmed buffer
    assert_eq!(s.input(), h.buffer.trim(), "input out of sync after {:?}", action);

    // 3. Pending timer → Computing
    if s.has_pending_timer() {
        assert_eq!(
            s.state(),
            SessionState::Computing,
            "pending timer requires Computing after {:?}",
            action,
        );
    }

    // 4. No English after an explicit clear until new text was typed
    if h.cleared {
        assert!(
            s.english().is_empty(),
            "english must stay blank after clear, got {:?} after {:?}",
            s.english(),
            action,
        );
    }

    // 5. Settled English equals what the pipeline yields for the input
    if s.state() == SessionState::Settled {
        let expected = s.pipeline().translate(s.input());
        assert_eq!(
            s.english(),
            expected.text(),
            "settled english does not match input {:?} after {:?}",
            s.input(),
            action,
        );
    }

    // 6. Response fields mirror the session
    if let Some(english) = &resp.english {
        assert_eq!(english, s.english(), "response english diverged after {:?}", action);
    }
    if let Some(romaji) = &resp.romaji {
        assert_eq!(romaji, s.romaji(), "response romaji diverged after {:?}", action);
    }
    if let Some(text) = &resp.clipboard {
        assert_eq!(text, s.romaji(), "clipboard must carry romaji after {:?}", action);
    }

    // 7. A translation request always targets the live generation
    if let Some(req) = &resp.translation_request {
        assert_eq!(req.generation, s.generation());
        assert_eq!(req.text, s.input());
    }
}

// ---------------------------------------------------------------------------
// proptest entry point
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn session_invariants_hold(actions in prop::collection::vec(arb_action(), 1..100)) {
        let mut h = Harness::new(false);
        for action in &actions {
            let resp = h.execute(action);
            assert_invariants(&h, &resp, action);
        }
    }

    #[test]
    fn session_invariants_with_deferred_translation(
        actions in prop::collection::vec(arb_action(), 1..100)
    ) {
        let mut h = Harness::new(true);
        for action in &actions {
            let resp = h.execute(action);
            assert_invariants(&h, &resp, action);
        }
    }
}
