//! Error types for Kino Embed

use thiserror::Error;

/// Result type alias for embed operations
pub type Result<T> = std::result::Result<T, Error>;

/// Embed error types
///
/// Normalization and configuration building never fail; these variants only
/// surface from the lifecycle and from the external collaborators it drives.
#[derive(Error, Debug)]
pub enum Error {
    // Widget errors
    #[error("Widget factory failed to create player: {0}")]
    WidgetCreation(String),

    #[error("Ready signal dropped before the widget script finished loading")]
    ReadySignalDropped,

    // Lifecycle errors
    #[error("Invalid lifecycle transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    // Props errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a widget creation error
    pub fn widget(msg: impl Into<String>) -> Self {
        Error::WidgetCreation(msg.into())
    }

    /// Returns true if a fresh mount may succeed where this one failed
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::ReadySignalDropped)
    }

    /// Returns the error code for diagnostics
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::WidgetCreation(_) => "WIDGET_CREATE",
            Error::ReadySignalDropped => "READY_DROPPED",
            Error::InvalidStateTransition { .. } => "INVALID_STATE",
            Error::Json(_) => "JSON",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::widget("boom").error_code(), "WIDGET_CREATE");
        assert_eq!(Error::ReadySignalDropped.error_code(), "READY_DROPPED");
    }

    #[test]
    fn test_recoverable() {
        assert!(Error::ReadySignalDropped.is_recoverable());
        assert!(!Error::widget("boom").is_recoverable());

        let json = crate::PlayerProps::from_json("{").unwrap_err();
        assert_eq!(json.error_code(), "JSON");
        assert!(!json.is_recoverable());
    }
}
