//! Application error types with rich context

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    // ─────────────────────────────────────────────────────────────
    // Wizard Precondition Errors
    // ─────────────────────────────────────────────────────────────
    #[error("{action} is not allowed: {reason}")]
    NotAllowed { action: String, reason: String },

    #[error("No count with id {id}")]
    CountNotFound { id: u32 },

    #[error("No blueprint with id {id}")]
    BlueprintNotFound { id: u32 },

    #[error("No section with id '{id}'")]
    SectionNotFound { id: String },

    #[error("At least one count must be selected before generating")]
    NoCountsSelected,

    #[error("Section '{id}' is not editable")]
    NotEditable { id: String },

    #[error("No edit in progress")]
    NoEditInProgress,

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ─────────────────────────────────────────────────────────────
    // Collaborator Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to save draft: {message}")]
    Persist { message: String },

    #[error("Failed to export draft: {message}")]
    Export { message: String },

    #[error("Channel closed unexpectedly")]
    ChannelClosed,

    // ─────────────────────────────────────────────────────────────
    // Input Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Unknown export format: {0}")]
    UnknownExportFormat(String),

    #[error("Invalid command: {message}")]
    Command { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn not_allowed(action: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NotAllowed {
            action: action.into(),
            reason: reason.into(),
        }
    }

    pub fn section_not_found(id: impl Into<String>) -> Self {
        Self::SectionNotFound { id: id.into() }
    }

    pub fn not_editable(id: impl Into<String>) -> Self {
        Self::NotEditable { id: id.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn persist(message: impl Into<String>) -> Self {
        Self::Persist {
            message: message.into(),
        }
    }

    pub fn export(message: impl Into<String>) -> Self {
        Self::Export {
            message: message.into(),
        }
    }

    pub fn command(message: impl Into<String>) -> Self {
        Self::Command {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    ///
    /// Recoverable errors are surfaced to the user as a notice and leave the
    /// in-memory draft untouched.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::NotAllowed { .. }
                | Error::CountNotFound { .. }
                | Error::BlueprintNotFound { .. }
                | Error::SectionNotFound { .. }
                | Error::NoCountsSelected
                | Error::NotEditable { .. }
                | Error::NoEditInProgress
                | Error::Persist { .. }
                | Error::Export { .. }
                | Error::UnknownExportFormat(_)
                | Error::Command { .. }
        )
    }

    /// Check if this error should trigger application exit
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Config { .. } | Error::ChannelClosed)
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::not_allowed("Delete count", "only custom counts can be deleted");
        assert_eq!(
            err.to_string(),
            "Delete count is not allowed: only custom counts can be deleted"
        );

        let err = Error::CountNotFound { id: 7 };
        assert_eq!(err.to_string(), "No count with id 7");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_precondition_errors_are_recoverable() {
        assert!(Error::NoCountsSelected.is_recoverable());
        assert!(Error::not_editable("caption").is_recoverable());
        assert!(Error::section_not_found("count-9").is_recoverable());
        assert!(!Error::NoCountsSelected.is_fatal());
    }

    #[test]
    fn test_collaborator_failures_are_recoverable() {
        assert!(Error::persist("disk full").is_recoverable());
        assert!(Error::export("permission denied").is_recoverable());
        assert!(!Error::export("permission denied").is_fatal());
    }

    #[test]
    fn test_error_is_fatal() {
        assert!(Error::config("bad value").is_fatal());
        assert!(Error::ChannelClosed.is_fatal());
        assert!(!Error::ChannelClosed.is_recoverable());
    }

    #[test]
    fn test_context_passes_error_through() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = result.context("writing draft").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
