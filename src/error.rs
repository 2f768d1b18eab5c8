//! Error types.
//!
//! - `ValidationError`: a participant submission broke one of the input rules
//! - `DrawError`: everything the library can fail with
//! - `AppError`: what the binary reports (message + process exit code)

use thiserror::Error;

/// Which submission rule was violated.
///
/// Positions are 1-based over the seven submitted numbers, with the special
/// number in position 7.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("expected {expected} primary numbers, got {got}")]
    WrongCount { expected: usize, got: usize },

    #[error("number #{position} is not a valid integer")]
    NonNumeric { position: usize },

    #[error("number #{position} ({value}) is outside the range {min}..={max}")]
    OutOfRange {
        position: usize,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("number {value} appears more than once (positions #{first} and #{second})")]
    Duplicate {
        value: i64,
        first: usize,
        second: usize,
    },
}

impl ValidationError {
    /// Short rule name, stable across messages.
    pub fn rule(&self) -> &'static str {
        match self {
            ValidationError::WrongCount { .. } => "count",
            ValidationError::NonNumeric { .. } => "non-numeric",
            ValidationError::OutOfRange { .. } => "out-of-range",
            ValidationError::Duplicate { .. } => "duplicate",
        }
    }
}

/// Library-level error.
#[derive(Debug, Error)]
pub enum DrawError {
    #[error("Invalid submission ({rule}): {0}", rule = .0.rule())]
    Validation(#[from] ValidationError),

    #[error("Invalid number range {min}..={max}: it must hold at least {needed} distinct values")]
    InvalidRange { min: i64, max: i64, needed: usize },

    #[error("Reference sequence is empty: no roster entry carries a usable lucky number")]
    EmptyReference,

    #[error("Participant pool is empty")]
    EmptyPool,

    #[error("Invalid draw weights: {0}")]
    InvalidWeights(String),

    #[error("Input error in '{source_name}': {message}")]
    Input { source_name: String, message: String },
}

impl DrawError {
    pub fn input(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        DrawError::Input {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Exit code used by the `gala` binary.
    ///
    /// - 2: the caller can fix it (bad numbers, bad flags, unreadable files)
    /// - 3: the data has nothing to work with (retrying will not help)
    pub fn exit_code(&self) -> u8 {
        match self {
            DrawError::Validation(_)
            | DrawError::InvalidRange { .. }
            | DrawError::InvalidWeights(_)
            | DrawError::Input { .. } => 2,
            DrawError::EmptyReference | DrawError::EmptyPool => 3,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<DrawError> for AppError {
    fn from(err: DrawError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_user_exit_code() {
        let err = DrawError::from(ValidationError::NonNumeric { position: 3 });
        assert_eq!(err.exit_code(), 2);
        let app: AppError = err.into();
        assert_eq!(app.exit_code(), 2);
        assert!(app.to_string().contains("non-numeric"));
    }

    #[test]
    fn empty_data_is_distinct_from_bad_input() {
        assert_eq!(DrawError::EmptyReference.exit_code(), 3);
        assert_eq!(DrawError::EmptyPool.exit_code(), 3);
    }
}
