// crates/lottieview-media/src/lib.rs
//
// No egui dependency — communicates with lottieview-ui via channels only.
//
//   composition — Lottie JSON / dotLottie parsing into core::Composition
//   engine      — the playback engine and its frame clock
//   probe       — file-size lookup
//   worker      — background thread serving load and size requests

pub mod composition;
pub mod engine;
pub mod probe;
pub mod worker;

// Re-export the main public API so lottieview-ui imports are simple.
pub use engine::{AnimationEngine, EngineEvent, LottieEngine};
pub use worker::FileWorker;
pub use lottieview_core::media_types::MediaResult;
