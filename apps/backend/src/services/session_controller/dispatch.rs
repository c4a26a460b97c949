//! The pure half of a dispatch: rule-engine call, ledger checks and
//! settlement. Nothing here touches storage.

use tracing::debug;

use crate::domain::actions::Action;
use crate::domain::game_transition::{derive_session_transitions, RoundView, SessionTransition};
use crate::domain::ledger::{self, Settlement};
use crate::domain::snapshot::{SessionMetadata, Snapshot};
use crate::domain::stage::Stage;
use crate::domain::state::EngineState;
use crate::engine::{RuleEngine, Transition};
use crate::errors::domain::{DomainError, StateKind};

/// A successful dispatch, ready to be persisted.
#[derive(Debug, Clone)]
pub struct Planned {
    pub snapshot: Snapshot,
    pub settlement: Option<Settlement>,
    pub transitions: Vec<SessionTransition>,
}

fn round_view(state: &EngineState) -> RoundView {
    RoundView {
        stage: state.stage,
        has_left_hand: state.hand_info.left.is_some(),
    }
}

fn rejected(action: &Action, reason: &str) -> DomainError {
    DomainError::state(
        StateKind::Rejected,
        format!("action rejected ({action}): {reason}"),
    )
}

/// Run `action` against `before` and compute the next snapshot.
///
/// Errors leave every input untouched; on success nothing has been written
/// yet, the caller persists `Planned::snapshot`.
pub fn plan(
    engine: &dyn RuleEngine,
    before: &EngineState,
    money: i64,
    metadata: &SessionMetadata,
    action: &Action,
) -> Result<Planned, DomainError> {
    if before.stage.is_terminal() {
        return Err(DomainError::state(
            StateKind::Terminal,
            format!("round is {}; start a new game", before.stage),
        ));
    }

    ledger::ensure_covered(before, money)?;

    let after = match engine.apply(before, action) {
        Transition::Applied(after) => after,
        Transition::Rejected { reason } => return Err(rejected(action, &reason)),
    };

    if after.stage == Stage::Invalid {
        // Name the action the engine recorded, falling back to what we sent
        let recorded = after.last_action().unwrap_or(action);
        return Err(rejected(recorded, "engine produced an invalid state"));
    }

    ledger::ensure_covered(&after, money)?;

    let settlement = ledger::settle(before, &after)?;
    let mut metadata = metadata.clone();
    metadata.actions_dispatched += 1;
    let money = match settlement {
        Some(settlement) => {
            metadata.rounds_played += 1;
            settlement.apply(money)?
        }
        None => money,
    };

    let transitions = derive_session_transitions(&round_view(before), &round_view(&after));
    debug!(
        action = %action,
        from = %before.stage,
        to = %after.stage,
        "dispatch planned"
    );

    Ok(Planned {
        snapshot: Snapshot {
            engine_state: after,
            money,
            metadata,
        },
        settlement,
        transitions,
    })
}
