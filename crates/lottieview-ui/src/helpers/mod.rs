// crates/lottieview-ui/src/helpers/mod.rs
//
// UI-crate helpers that need egui, rfd or the process (panic hook, logging).
// Pure logic lives in lottieview_core::helpers.

pub mod containment;
pub mod format;
pub mod log;
pub mod picker;
