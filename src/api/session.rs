use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use kata_core::settings::settings;
use kata_core::translate::TranslationPipeline;
use kata_session::{LiveSession, SessionState};

use crate::async_worker::TranslationWorker;

use super::types::convert_to_events;
use super::{KataError, KataPalette, KataResponse, KataState, KataTheme};

/// How often to poll while a translation is on the worker.
const WORKER_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(uniffi::Object)]
pub struct KataSession {
    session: Mutex<LiveSession>,
    worker: TranslationWorker,
}

#[uniffi::export]
impl KataSession {
    /// Session backed by the configured Google endpoint.
    #[uniffi::constructor]
    pub fn new() -> Arc<Self> {
        let pipeline = TranslationPipeline::google(&settings().translation);
        Self::with_pipeline(Arc::new(pipeline))
    }

    fn set_input(&self, text: String) -> KataResponse {
        let mut session = self.session.lock().unwrap();
        let before = session.generation();
        let resp = session.set_input(&text);
        if session.generation() != before {
            self.worker.invalidate();
        }
        let poll_after = resp.poll_after;
        KataResponse {
            events: convert_to_events(resp, poll_after),
        }
    }

    fn clear(&self) -> KataResponse {
        self.worker.invalidate();
        let resp = self.session.lock().unwrap().clear();
        KataResponse {
            events: convert_to_events(resp, None),
        }
    }

    /// Drive the debounce timer and collect finished translations.
    fn poll(&self) -> KataResponse {
        let mut events = Vec::new();
        let mut session = self.session.lock().unwrap();

        // 1. Drain finished translations; only the last accepted one is shown
        let mut received = None;
        while let Some(result) = self.worker.try_recv() {
            if let Some(resp) = session.receive_translation(result.generation, result.outcome) {
                received = Some(resp);
            }
        }
        if let Some(resp) = received {
            events.extend(convert_to_events(resp, None));
        }

        // 2. Fire the timer; hand any translation to the worker
        let mut resp = session.poll();
        if let Some(req) = resp.translation_request.take() {
            self.worker.submit(req.text, req.generation);
        }

        let poll_after = resp.poll_after.or_else(|| {
            awaiting_worker(&session).then_some(WORKER_POLL_INTERVAL)
        });
        events.extend(convert_to_events(resp, poll_after));
        KataResponse { events }
    }

    fn copy_romaji(&self) -> KataResponse {
        let resp = self.session.lock().unwrap().copy_romaji();
        KataResponse {
            events: convert_to_events(resp, None),
        }
    }

    fn toggle_theme(&self) -> KataResponse {
        let resp = self.session.lock().unwrap().toggle_theme();
        KataResponse {
            events: convert_to_events(resp, None),
        }
    }

    /// Write the current values; returns the path actually written.
    fn export(&self, path: String) -> Result<String, KataError> {
        let session = self.session.lock().unwrap();
        let written = session
            .export_to(Path::new(&path))
            .map_err(|e| KataError::Io { msg: e.to_string() })?;
        Ok(written.display().to_string())
    }

    fn set_delay_ms(&self, delay_ms: u64) {
        self.session
            .lock()
            .unwrap()
            .set_delay(Duration::from_millis(delay_ms));
    }

    fn set_theme(&self, theme: KataTheme) {
        self.session.lock().unwrap().set_theme(theme.into());
    }

    fn theme(&self) -> KataTheme {
        self.session.lock().unwrap().theme().into()
    }

    fn palette(&self) -> KataPalette {
        self.session.lock().unwrap().palette().into()
    }

    fn state(&self) -> KataState {
        self.session.lock().unwrap().state().into()
    }

    fn input(&self) -> String {
        self.session.lock().unwrap().input().to_string()
    }

    fn romaji(&self) -> String {
        self.session.lock().unwrap().romaji().to_string()
    }

    fn english(&self) -> String {
        self.session.lock().unwrap().english().to_string()
    }
}

impl KataSession {
    pub(crate) fn with_pipeline(pipeline: Arc<TranslationPipeline>) -> Arc<Self> {
        let mut session = LiveSession::new(Arc::clone(&pipeline));
        session.set_defer_translation(true);
        Arc::new(Self {
            session: Mutex::new(session),
            worker: TranslationWorker::new(pipeline),
        })
    }
}

/// Timer already fired but the translation has not come back yet.
fn awaiting_worker(session: &LiveSession) -> bool {
    session.state() == SessionState::Computing && !session.has_pending_timer()
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Instant;

    use kata_core::settings::{parse_settings_toml, DEFAULT_SETTINGS_TOML};
    use kata_core::translate::{TranslateError, Translator};

    use super::*;
    use crate::KataEvent;

    struct WordList;

    impl Translator for WordList {
        fn translate(&self, text: &str, _: &str, _: &str) -> Result<String, TranslateError> {
            Ok(match text {
                "こんぴゅーたー" => "computer".to_string(),
                "ねこ" => "cat".to_string(),
                other => other.to_string(),
            })
        }
    }

    fn make_session() -> Arc<KataSession> {
        let settings = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        let pipeline = TranslationPipeline::new(Arc::new(WordList), &settings.translation);
        let session = KataSession::with_pipeline(Arc::new(pipeline));
        session.set_delay_ms(0);
        session
    }

    /// Poll until a SetEnglish event arrives.
    fn poll_english(session: &KataSession) -> Option<String> {
        let start = Instant::now();
        while start.elapsed() < Duration::from_secs(2) {
            for event in session.poll().events {
                if let KataEvent::SetEnglish { text } = event {
                    return Some(text);
                }
            }
            thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn test_set_input_emits_romaji_and_poll() {
        let session = make_session();
        session.set_delay_ms(500);
        let events = session.set_input("コンピューター".to_string()).events;
        assert_eq!(
            events,
            vec![
                KataEvent::SetRomaji {
                    text: "konpyuutaa".to_string()
                },
                KataEvent::SchedulePoll { delay_ms: 500 },
            ]
        );
        assert_eq!(session.state(), KataState::Computing);
    }

    #[test]
    fn test_translation_through_worker() {
        let session = make_session();
        session.set_input("コンピューター".to_string());
        assert_eq!(poll_english(&session).as_deref(), Some("computer"));
        assert_eq!(session.state(), KataState::Settled);
        assert_eq!(session.english(), "computer");
    }

    #[test]
    fn test_poll_keeps_scheduling_while_worker_busy() {
        let session = make_session();
        session.set_input("ネコ".to_string());
        // Fires the timer and hands the text to the worker
        let events = session.poll().events;
        assert_eq!(
            events,
            vec![KataEvent::SchedulePoll {
                delay_ms: WORKER_POLL_INTERVAL.as_millis() as u64
            }]
        );
        assert_eq!(session.state(), KataState::Computing);
    }

    #[test]
    fn test_clear_discards_in_flight_translation() {
        let session = make_session();
        session.set_input("ネコ".to_string());
        session.poll();
        let events = session.clear().events;
        assert_eq!(events.first(), Some(&KataEvent::ClearInput));

        thread::sleep(Duration::from_millis(50));
        assert!(poll_english(&session).is_none());
        assert_eq!(session.english(), "");
        assert_eq!(session.state(), KataState::Idle);
    }

    #[test]
    fn test_same_text_keeps_in_flight_translation() {
        let session = make_session();
        session.set_input("ネコ".to_string());
        session.poll();
        assert!(session.set_input("ネコ".to_string()).events.is_empty());
        assert_eq!(poll_english(&session).as_deref(), Some("cat"));
    }

    #[test]
    fn test_poll_skips_stale_result_queued_ahead_of_current() {
        let session = make_session();
        session.set_delay_ms(10_000);
        session.set_input("ネコ".to_string());
        let current = session.session.lock().unwrap().generation();

        // A stale result lands first, then the current one behind it
        session.worker.submit("いぬ".to_string(), current + 1);
        thread::sleep(Duration::from_millis(200));
        session.worker.submit("ネコ".to_string(), current);
        thread::sleep(Duration::from_millis(200));

        let events = session.poll().events;
        assert!(events.contains(&KataEvent::SetEnglish {
            text: "cat".to_string()
        }));
        assert_eq!(session.state(), KataState::Settled);
        assert!(session.worker.try_recv().is_none());
    }

    #[test]
    fn test_copy_and_theme_events() {
        let session = make_session();
        session.set_input("ネコ".to_string());
        assert_eq!(
            session.copy_romaji().events,
            vec![KataEvent::CopyToClipboard {
                text: "neko".to_string()
            }]
        );

        session.set_theme(KataTheme::Dark);
        let events = session.toggle_theme().events;
        assert!(matches!(&events[..], [KataEvent::ApplyTheme { .. }]));
        assert_eq!(session.theme(), KataTheme::Light);
        assert_eq!(session.palette().background, "#f3f4f6");
    }

    #[test]
    fn test_export_appends_extension() {
        let session = make_session();
        session.set_input("ネコ".to_string());
        poll_english(&session);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cat");
        let written = session.export(path.display().to_string()).unwrap();
        assert!(written.ends_with("cat.txt"));
        let content = std::fs::read_to_string(written).unwrap();
        assert_eq!(content, "Japanese:\nネコ\n\nRomaji:\nneko\n\nEnglish:\ncat\n");
    }

    #[test]
    fn test_export_to_missing_dir_is_io_error() {
        let session = make_session();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        let err = session.export(path.display().to_string()).unwrap_err();
        assert!(matches!(err, KataError::Io { .. }));
    }
}
