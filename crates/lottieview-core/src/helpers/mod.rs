// crates/lottieview-core/src/helpers/mod.rs
//
// Small pure helpers shared by the UI and the media worker.

pub mod geometry;
pub mod size;
pub mod slider;
pub mod time;
pub mod uri;
