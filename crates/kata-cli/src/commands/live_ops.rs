//! Line-oriented live mode: every stdin line replaces the input buffer.
//!
//! Lines starting with `:` are buttons (`:clear`, `:copy`, `:theme`,
//! `:export <path>`). Output is one `field: value` line per change.

use std::io::{self, BufRead};
use std::path::Path;
use std::process;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use kata_core::settings::settings;
use kata_core::translate::{TranslationOutcome, TranslationPipeline};
use kata_session::{LiveSession, SessionResponse, SessionState, Theme, TranslationRequest};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub struct LiveOptions {
    /// Translate on the event loop instead of the worker thread.
    pub inline: bool,
    pub delay_ms: Option<u64>,
}

enum Event {
    Line(String),
    Eof,
    Translated {
        generation: u64,
        outcome: TranslationOutcome,
    },
}

pub fn live_cmd(opts: &LiveOptions) {
    let pipeline = Arc::new(TranslationPipeline::google(&settings().translation));
    let mut session = LiveSession::new(Arc::clone(&pipeline));
    session.set_defer_translation(!opts.inline);
    if let Some(ms) = opts.delay_ms {
        session.set_delay(Duration::from_millis(ms));
    }

    let (event_tx, event_rx) = mpsc::channel::<Event>();
    spawn_stdin_reader(event_tx.clone());
    let request_tx = spawn_translator(pipeline, event_tx);

    let mut eof = false;
    loop {
        // Fire the timer if due and learn how long to wait for the next one
        let resp = session.poll();
        let wait = resp.poll_after;
        print_response(&resp, &request_tx);

        if eof && session.state() != SessionState::Computing {
            break;
        }

        let event = match wait {
            Some(d) => match event_rx.recv_timeout(d) {
                Ok(event) => event,
                Err(mpsc::RecvTimeoutError::Timeout) => continue,
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            },
            None => match event_rx.recv() {
                Ok(event) => event,
                Err(_) => break,
            },
        };

        let resp = match event {
            Event::Line(line) => handle_line(&mut session, &line),
            Event::Eof => {
                eof = true;
                SessionResponse::default()
            }
            Event::Translated {
                generation,
                outcome,
            } => session
                .receive_translation(generation, outcome)
                .unwrap_or_default(),
        };
        print_response(&resp, &request_tx);
    }
}

/// Apply one stdin line to the session.
pub fn handle_line(session: &mut LiveSession, line: &str) -> SessionResponse {
    match line.trim() {
        ":clear" => session.clear(),
        ":copy" => session.copy_romaji(),
        ":theme" => session.toggle_theme(),
        cmd => match cmd.strip_prefix(":export ") {
            Some(path) => {
                match session.export_to(Path::new(path.trim())) {
                    Ok(written) => println!("saved: {}", written.display()),
                    Err(e) => eprintln!("Error exporting: {e}"),
                }
                SessionResponse::default()
            }
            None => session.set_input(line),
        },
    }
}

/// Render the visible part of a response, one line per field.
pub fn format_response(resp: &SessionResponse) -> Vec<String> {
    let mut lines = Vec::new();
    if resp.clear_input {
        lines.push("input: ".to_string());
    }
    if let Some(r) = &resp.romaji {
        lines.push(format!("romaji: {r}"));
    }
    if let Some(e) = &resp.english {
        lines.push(format!("english: {e}"));
    }
    if let Some(c) = &resp.clipboard {
        lines.push(format!("clipboard: {c}"));
    }
    if let Some(theme) = resp.theme {
        let name = match theme {
            Theme::Dark => "dark",
            Theme::Light => "light",
        };
        lines.push(format!("theme: {name}"));
    }
    lines
}

fn print_response(resp: &SessionResponse, requests: &mpsc::Sender<TranslationRequest>) {
    for line in format_response(resp) {
        println!("{line}");
    }
    if let Some(req) = &resp.translation_request {
        let _ = requests.send(req.clone());
    }
}

fn spawn_stdin_reader(events: mpsc::Sender<Event>) {
    let spawned = thread::Builder::new()
        .name("katatool-stdin".into())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if events.send(Event::Line(line)).is_err() {
                    return;
                }
            }
            let _ = events.send(Event::Eof);
        });
    die!(spawned, "Error starting stdin reader: {}");
}

fn spawn_translator(
    pipeline: Arc<TranslationPipeline>,
    events: mpsc::Sender<Event>,
) -> mpsc::Sender<TranslationRequest> {
    let (tx, rx) = mpsc::channel::<TranslationRequest>();
    let spawned = thread::Builder::new()
        .name("katatool-translate".into())
        .spawn(move || {
            while let Ok(req) = rx.recv() {
                // Drain to latest
                let mut latest = req;
                while let Ok(newer) = rx.try_recv() {
                    latest = newer;
                }
                let outcome = pipeline.translate(&latest.text);
                let event = Event::Translated {
                    generation: latest.generation,
                    outcome,
                };
                if events.send(event).is_err() {
                    return;
                }
            }
        });
    die!(spawned, "Error starting translation worker: {}");
    tx
}
