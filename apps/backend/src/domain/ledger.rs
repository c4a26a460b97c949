//! Money bookkeeping around a round.
//!
//! Stakes are deducted for display while a round is live and only settled
//! into the balance once the round reaches `done`.

use super::stage::Stage;
use super::state::EngineState;
use crate::errors::domain::{DomainError, StateKind};

fn out_of_range(what: &str) -> DomainError {
    DomainError::state(
        StateKind::InsufficientFunds,
        format!("{what} exceed any balance"),
    )
}

/// Stakes the balance has to cover. A settled round counts what it actually
/// wagered.
fn at_risk(state: &EngineState) -> Option<i64> {
    if state.stage == Stage::Done {
        state.wagered()
    } else {
        state.committed()
    }
}

/// Fail when the stakes riding on `state` exceed `money`, or do not add up
/// to a representable amount at all.
pub fn ensure_covered(state: &EngineState, money: i64) -> Result<(), DomainError> {
    let at_risk = at_risk(state).ok_or_else(|| out_of_range("stakes"))?;
    if at_risk > money {
        return Err(DomainError::state(
            StateKind::InsufficientFunds,
            format!("insufficient funds: {at_risk} at stake, {money} available"),
        ));
    }
    Ok(())
}

/// Balance as shown to the player: live stakes are already taken out.
/// Saturates instead of wrapping.
pub fn displayed_money(state: &EngineState, money: i64) -> i64 {
    if state.stage == Stage::Done {
        money
    } else {
        money.saturating_sub(state.committed().unwrap_or(i64::MAX))
    }
}

/// Result of closing a round.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Settlement {
    pub wagered: i64,
    pub returned: i64,
}

impl Settlement {
    pub fn of(state: &EngineState) -> Result<Self, DomainError> {
        Ok(Self {
            wagered: state.wagered().ok_or_else(|| out_of_range("stakes"))?,
            returned: state.returned().ok_or_else(|| out_of_range("winnings"))?,
        })
    }

    /// Net effect on the balance.
    pub fn net(&self) -> i64 {
        self.returned.saturating_sub(self.wagered)
    }

    pub fn apply(&self, money: i64) -> Result<i64, DomainError> {
        money
            .checked_sub(self.wagered)
            .and_then(|m| m.checked_add(self.returned))
            .ok_or_else(|| out_of_range("settled amounts"))
    }
}

/// Settle when `after` closes the round that `before` was still playing.
pub fn settle(
    before: &EngineState,
    after: &EngineState,
) -> Result<Option<Settlement>, DomainError> {
    if after.stage == Stage::Done && before.stage != Stage::Done {
        Settlement::of(after).map(Some)
    } else {
        Ok(None)
    }
}
