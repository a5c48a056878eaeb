//! kataroma: live katakana → Hepburn romaji + English engine.
//!
//! This crate is the foreign binding layer. The romanizer, translator and
//! settings live in `kata-core`; the live session state machine lives in
//! `kata-session`. Both are re-exported for Rust callers.

uniffi::setup_scaffolding!();

mod api;
mod async_worker;
mod trace_init;

pub use api::{KataError, KataEvent, KataPalette, KataResponse, KataSession, KataState, KataTheme};
pub use kata_core::{export, romaji, settings, translate, unicode};
