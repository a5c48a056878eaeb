use kata_core::translate::TranslationOutcome;
use tracing::{debug, debug_span};

use super::debounce::Clock;
use super::types::{PendingTranslation, SessionResponse, SessionState, TranslationRequest};
use super::LiveSession;

impl<K: Clock> LiveSession<K> {
    /// Fire the debounce timer if it is due.
    ///
    /// Inline mode translates here, blocking the caller. Deferred mode hands
    /// back a `TranslationRequest`. When nothing is due the response only
    /// says when to poll next.
    pub fn poll(&mut self) -> SessionResponse {
        match self.debouncer.take_due() {
            Some(job) => self.on_timer_fired(job),
            None => SessionResponse {
                poll_after: self.debouncer.time_until_due(),
                ..SessionResponse::default()
            },
        }
    }

    fn on_timer_fired(&mut self, job: PendingTranslation) -> SessionResponse {
        let _span = debug_span!("timer_fired", generation = self.generation).entered();

        // Re-read the buffer: a request for now-cleared input is never shown.
        if self.input.is_empty() || self.state != SessionState::Computing {
            debug!("input cleared since scheduling, dropping");
            return SessionResponse::default();
        }

        if self.defer_translation {
            return SessionResponse {
                translation_request: Some(TranslationRequest {
                    text: job.text,
                    generation: self.generation,
                }),
                ..SessionResponse::default()
            };
        }

        let outcome = self.pipeline.translate(&job.text);
        self.publish(outcome)
    }

    /// Accept a translation computed off-thread. Returns `None` when the
    /// result is stale: the input changed or was cleared after the request.
    pub fn receive_translation(
        &mut self,
        generation: u64,
        outcome: TranslationOutcome,
    ) -> Option<SessionResponse> {
        if generation != self.generation
            || self.state != SessionState::Computing
            || self.input.is_empty()
        {
            debug!(
                generation,
                current = self.generation,
                "discarding stale translation"
            );
            return None;
        }
        Some(self.publish(outcome))
    }

    fn publish(&mut self, outcome: TranslationOutcome) -> SessionResponse {
        self.english = outcome.text().to_string();
        self.last_outcome = Some(outcome);
        self.state = SessionState::Settled;
        SessionResponse {
            english: Some(self.english.clone()),
            ..SessionResponse::default()
        }
    }
}
