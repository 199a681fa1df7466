// crates/lottieview-core/src/error.rs
//
// Closed error taxonomy for the native boundaries (file dialog, file size,
// engine load). Native layers report loosely shaped errors with an optional
// code; `GatewayError::from_code` is the single place those get classified.

use thiserror::Error;

/// Codes the native picker uses for a benign "nothing chosen" outcome.
pub const BENIGN_PICKER_CODES: [&str; 2] = ["INVALID_FILE", "NO_FILE"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The user dismissed the dialog or picked something unusable.
    #[error("file selection cancelled")]
    Cancelled,
    /// The native dialog backend is missing or crashed.
    #[error("native file dialog is unavailable")]
    ModuleUnavailable,
    #[error("failed to load animation: {0}")]
    LoadFailure(String),
    #[error("{0}")]
    Unknown(String),
}

impl GatewayError {
    pub fn from_code(code: Option<&str>, message: &str) -> Self {
        match code {
            Some(c) if BENIGN_PICKER_CODES.contains(&c) => Self::Cancelled,
            _                                           => Self::Unknown(message.to_string()),
        }
    }

    /// Benign outcomes are logged at warn and never shown to the user.
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benign_codes_are_cancellations() {
        assert_eq!(GatewayError::from_code(Some("INVALID_FILE"), "bad ext"), GatewayError::Cancelled);
        assert_eq!(GatewayError::from_code(Some("NO_FILE"), ""), GatewayError::Cancelled);
        assert!(GatewayError::Cancelled.is_benign());
    }

    #[test]
    fn unknown_code_keeps_message() {
        let e = GatewayError::from_code(Some("EACCES"), "permission denied");
        assert_eq!(e, GatewayError::Unknown("permission denied".into()));
        assert!(!e.is_benign());
        assert_eq!(e.to_string(), "permission denied");
        assert_eq!(GatewayError::from_code(None, "boom"), GatewayError::Unknown("boom".into()));
    }

    #[test]
    fn load_failure_names_reason() {
        let e = GatewayError::LoadFailure("missing field `fr`".into());
        assert_eq!(e.to_string(), "failed to load animation: missing field `fr`");
        assert!(!e.is_benign());
    }
}
