// crates/lottieview-core/src/lib.rs
//
// Pure playback data — no egui, no file IO, no threads.
//
// Everything the UI and the media worker agree on lives here:
//   state        — the playback aggregate and its transitions
//   surface      — the animation surface state machine and engine directives
//   commands     — every user action as a PlayerCommand, plus dispatch
//   composition  — parsed Lottie document metadata (plain data)
//   media_types  — results crossing the worker channel
//   error        — the closed native-gateway error taxonomy

pub mod commands;
pub mod composition;
pub mod error;
pub mod helpers;
pub mod media_types;
pub mod state;
pub mod surface;
