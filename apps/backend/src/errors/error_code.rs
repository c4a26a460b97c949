//! Error codes handed to the capability layer.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE.

use core::fmt;

/// Centralized error codes for controller results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// General validation error
    ValidationError,

    // Game State
    /// Session is finished (or invalid); start a new game
    GameFinished,
    /// A round is still in progress
    GameInProgress,
    /// Bets exceed the ledger balance
    InsufficientFunds,
    /// Action is not offered for this hand
    ActionNotAvailable,
    /// Rule engine rejected the action
    ActionRejected,
    /// Engine produced a state that may not be stored
    InvalidState,

    // Resource Not Found
    /// No session for the given id
    SessionNotFound,
    /// Requested hand does not exist
    HandNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Optimistic lock conflict
    OptimisticLock,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout
    DbTimeout,
    /// Data corruption detected
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",

            Self::GameFinished => "GAME_FINISHED",
            Self::GameInProgress => "GAME_IN_PROGRESS",
            Self::InsufficientFunds => "INSUFFICIENT_FUNDS",
            Self::ActionNotAvailable => "ACTION_NOT_AVAILABLE",
            Self::ActionRejected => "ACTION_REJECTED",
            Self::InvalidState => "INVALID_STATE",

            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::HandNotFound => "HAND_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_strings() {
        assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::GameFinished.as_str(), "GAME_FINISHED");
        assert_eq!(ErrorCode::InsufficientFunds.as_str(), "INSUFFICIENT_FUNDS");
        assert_eq!(
            ErrorCode::ActionNotAvailable.as_str(),
            "ACTION_NOT_AVAILABLE"
        );
        assert_eq!(ErrorCode::SessionNotFound.as_str(), "SESSION_NOT_FOUND");
        assert_eq!(ErrorCode::OptimisticLock.as_str(), "OPTIMISTIC_LOCK");
        assert_eq!(ErrorCode::DataCorruption.as_str(), "DATA_CORRUPTION");
    }

    #[test]
    fn test_display_trait() {
        assert_eq!(format!("{}", ErrorCode::ActionRejected), "ACTION_REJECTED");
        assert_eq!(format!("{}", ErrorCode::DbTimeout), "DB_TIMEOUT");
    }
}
