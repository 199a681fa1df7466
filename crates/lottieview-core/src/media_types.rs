// crates/lottieview-core/src/media_types.rs
//
// Types that flow across the channel between lottieview-media and lottieview-ui.
// No egui, no serde — just plain data.

use uuid::Uuid;
use crate::composition::Composition;
use crate::error::GatewayError;

/// Results sent from the FileWorker thread to the UI.
/// `session` is the id minted by `PlaybackState::open_file` for the request.
#[derive(Debug)]
pub enum MediaResult {
    Loaded     { session: Uuid, composition: Composition },
    /// Always `GatewayError::LoadFailure` carrying the parse/IO reason.
    LoadFailed { session: Uuid, error: GatewayError },
    /// None when the size lookup failed; shown as "Unknown".
    FileSize   { session: Uuid, bytes: Option<u64> },
}
