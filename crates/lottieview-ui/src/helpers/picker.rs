// crates/lottieview-ui/src/helpers/picker.rs
//
// Native file picker gateway. The dialog is modal and runs on the UI thread,
// the same way the rest of the app uses rfd. Outcomes are classified into
// GatewayError; none of them is ever shown to the user.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

use lottieview_core::error::GatewayError;
use lottieview_core::helpers::uri::{is_lottie_path, normalize_source};

/// Show the picker. `Ok(None)` means the user dismissed it; `Ok(Some(uri))`
/// is a normalized source URI ready for `OpenFile`.
pub fn pick_lottie_file() -> Result<Option<String>, GatewayError> {
    // A dialog backend that is missing (no portal, no GTK) can panic inside rfd.
    let picked = catch_unwind(AssertUnwindSafe(|| {
        rfd::FileDialog::new()
            .set_title("Open Lottie File")
            .add_filter("Lottie", &["json", "lottie"])
            .pick_file()
    }))
    .map_err(|_| GatewayError::ModuleUnavailable)?;

    match picked {
        Some(path) => classify(&path).map(Some),
        None => Ok(None),
    }
}

/// Accept only Lottie documents; anything else is the native INVALID_FILE.
fn classify(path: &Path) -> Result<String, GatewayError> {
    if !is_lottie_path(path) {
        return Err(GatewayError::from_code(
            Some("INVALID_FILE"),
            &format!("{} is not a .json or .lottie file", path.display()),
        ));
    }
    normalize_source(&path.to_string_lossy())
        .ok_or_else(|| GatewayError::from_code(Some("NO_FILE"), "empty path"))
}

/// Collapse a picker outcome into "open this" or "do nothing", logging the
/// reason. Benign outcomes log at warn; everything else at error.
pub fn resolve(result: Result<Option<String>, GatewayError>) -> Option<String> {
    match result {
        Ok(Some(uri)) => {
            tracing::info!("[picker] selected {uri}");
            Some(uri)
        }
        Ok(None) => {
            tracing::debug!("[picker] dismissed");
            None
        }
        Err(e) if e.is_benign() => {
            tracing::warn!("[picker] {e}");
            None
        }
        Err(e) => {
            tracing::error!("[picker] {e}");
            None
        }
    }
}
