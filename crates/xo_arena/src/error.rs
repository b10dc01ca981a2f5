//! Application error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Arena error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Arena error: {} at {}:{}", message, file, line)]
pub struct ArenaError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ArenaError {
    /// Creates a new error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for ArenaError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

impl From<toml::de::Error> for ArenaError {
    #[track_caller]
    fn from(err: toml::de::Error) -> Self {
        Self::new(format!("Config parse error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_records_caller_file() {
        let err = ArenaError::new("boom");
        assert_eq!(err.message, "boom");
        assert!(err.file.ends_with("error.rs"));
        assert!(err.to_string().starts_with("Arena error: boom at "));
    }
}
