//! Domain-level error type used across the controller, stores and adapters.
//!
//! This error type is transport- and DB-agnostic. The capability layer in
//! front of the controller decides how to present it; `ErrorCode` gives every
//! variant a stable machine-readable code for that purpose.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use super::error_code::ErrorCode;

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    DataCorruption,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Session,
    Hand,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    OptimisticLock,
    Other(String),
}

/// Why an action is illegal in the session's current state.
///
/// Every state error is recoverable by the caller: start a new session or
/// pick a legal action.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StateKind {
    /// Session is `done` or `invalid`; a new game must be started.
    Terminal,
    /// `start` while a round is still being played.
    InProgress,
    /// Committed stakes exceed the ledger balance.
    InsufficientFunds,
    /// The hand's `available_actions` does not allow the action.
    ActionNotAvailable,
    /// The rule engine refused the transition.
    Rejected,
    /// Refusal to persist a transient engine state.
    NotPersistable,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Malformed input parameters
    Validation(String),
    /// Action illegal in the current stage, insufficient funds, or engine rejection
    State(StateKind, String),
    /// Semantic conflict (stale version token)
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures (persistence errors)
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(d) => write!(f, "validation error: {d}"),
            DomainError::State(kind, d) => write!(f, "state error {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }
    pub fn state(kind: StateKind, detail: impl Into<String>) -> Self {
        Self::State(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// True for errors that leave persisted state untouched and can be fixed
    /// by the caller choosing a different action.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DomainError::Validation(_) | DomainError::State(..) | DomainError::Conflict(..)
        )
    }

    /// Stable code for the capability layer.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Validation(_) => ErrorCode::ValidationError,
            DomainError::State(kind, _) => match kind {
                StateKind::Terminal => ErrorCode::GameFinished,
                StateKind::InProgress => ErrorCode::GameInProgress,
                StateKind::InsufficientFunds => ErrorCode::InsufficientFunds,
                StateKind::ActionNotAvailable => ErrorCode::ActionNotAvailable,
                StateKind::Rejected => ErrorCode::ActionRejected,
                StateKind::NotPersistable => ErrorCode::InvalidState,
            },
            DomainError::Conflict(kind, _) => match kind {
                ConflictKind::OptimisticLock => ErrorCode::OptimisticLock,
                ConflictKind::Other(_) => ErrorCode::Conflict,
            },
            DomainError::NotFound(kind, _) => match kind {
                NotFoundKind::Session => ErrorCode::SessionNotFound,
                NotFoundKind::Hand => ErrorCode::HandNotFound,
                NotFoundKind::Other(_) => ErrorCode::NotFound,
            },
            DomainError::Infra(kind, _) => match kind {
                InfraErrorKind::Timeout => ErrorCode::DbTimeout,
                InfraErrorKind::DbUnavailable => ErrorCode::DbUnavailable,
                InfraErrorKind::DataCorruption => ErrorCode::DataCorruption,
                InfraErrorKind::Other(_) => ErrorCode::DbError,
            },
        }
    }
}
