//! Rule engine seam.
//!
//! Card dealing, dealer play and payouts live behind [`RuleEngine`]; the
//! session controller only relies on the call contract below.

use std::fmt;

use crate::domain::actions::Action;
use crate::domain::rules::Rules;
use crate::domain::state::EngineState;

/// Outcome of applying one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The action was legal; this is the resulting state.
    Applied(EngineState),
    /// The engine refused the action.
    Rejected { reason: String },
}

impl Transition {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Transition::Rejected {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Applied(state) => write!(f, "applied stage={}", state.stage),
            Transition::Rejected { reason } => write!(f, "rejected: {reason}"),
        }
    }
}

/// Deterministic blackjack rules.
///
/// Implementations must not mutate their input; a returned state whose stage
/// is `invalid` is treated as a rejection by callers.
pub trait RuleEngine: Send + Sync {
    /// Fresh table state for `rules`, before any cards are dealt.
    fn new_game(&self, rules: Rules) -> EngineState;

    /// Apply `action` to `state`.
    fn apply(&self, state: &EngineState, action: &Action) -> Transition;
}
