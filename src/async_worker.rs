use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use kata_core::translate::{TranslationOutcome, TranslationPipeline};
use tracing::debug;

// ---------------------------------------------------------------------------
// Work / Result types
// ---------------------------------------------------------------------------

pub(crate) struct TranslationWork {
    pub text: String,
    pub generation: u64,
}

pub(crate) struct TranslationResult {
    pub generation: u64,
    pub outcome: TranslationOutcome,
}

// ---------------------------------------------------------------------------
// TranslationWorker
// ---------------------------------------------------------------------------

/// Runs the blocking translation pipeline on a dedicated thread.
///
/// Only the newest submission matters: queued work is drained to the latest
/// item and anything whose generation is no longer current is dropped, both
/// before and after the network call.
pub(crate) struct TranslationWorker {
    work_tx: mpsc::Sender<TranslationWork>,
    result_rx: Mutex<mpsc::Receiver<TranslationResult>>,
    current: Arc<AtomicU64>,
}

impl TranslationWorker {
    pub fn new(pipeline: Arc<TranslationPipeline>) -> Self {
        let current = Arc::new(AtomicU64::new(0));

        let (work_tx, work_rx) = mpsc::channel::<TranslationWork>();
        let (result_tx, result_rx) = mpsc::channel::<TranslationResult>();
        {
            let current = Arc::clone(&current);
            thread::Builder::new()
                .name("kataroma-translate".into())
                .spawn(move || {
                    translation_worker(work_rx, result_tx, current, pipeline);
                })
                .expect("failed to spawn translation worker");
        }

        Self {
            work_tx,
            result_rx: Mutex::new(result_rx),
            current,
        }
    }

    pub fn submit(&self, text: String, generation: u64) {
        self.current.store(generation, Ordering::SeqCst);
        let _ = self.work_tx.send(TranslationWork { text, generation });
    }

    /// Mark all queued and in-flight work stale.
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }

    pub fn try_recv(&self) -> Option<TranslationResult> {
        let rx = self.result_rx.lock().ok()?;
        rx.try_recv().ok()
    }
}

// ---------------------------------------------------------------------------
// Worker thread
// ---------------------------------------------------------------------------

fn translation_worker(
    rx: mpsc::Receiver<TranslationWork>,
    tx: mpsc::Sender<TranslationResult>,
    current: Arc<AtomicU64>,
    pipeline: Arc<TranslationPipeline>,
) {
    while let Ok(work) = rx.recv() {
        // Drain: if multiple work items queued, skip to latest
        let mut latest = work;
        while let Ok(newer) = rx.try_recv() {
            latest = newer;
        }

        if latest.generation != current.load(Ordering::SeqCst) {
            debug!(generation = latest.generation, "skipping stale translation");
            continue;
        }

        let outcome = pipeline.translate(&latest.text);

        // The input may have changed while the request was in flight
        if latest.generation != current.load(Ordering::SeqCst) {
            debug!(generation = latest.generation, "dropping stale translation");
            continue;
        }

        let _ = tx.send(TranslationResult {
            generation: latest.generation,
            outcome,
        });
    }
}
