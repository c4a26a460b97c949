// apps/backend/src/domain/game_transition.rs

use crate::domain::stage::Stage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundView {
    pub stage: Stage,
    pub has_left_hand: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionTransition {
    /// Edge-triggered: cards were dealt for a new round.
    RoundStarted,

    /// Edge-triggered: a second (left) hand appeared.
    HandSplit,

    /// Edge-triggered: play moved from the player to the dealer.
    DealerTurnStarted,

    /// Edge-triggered: the round reached `done` and the ledger settled.
    RoundSettled,
}

/// Derive session transitions from before/after round state.
pub fn derive_session_transitions(before: &RoundView, after: &RoundView) -> Vec<SessionTransition> {
    let mut transitions = Vec::new();

    // 1. Round start: leaving ready (or a finished round) for live play.
    if before.stage != after.stage
        && matches!(before.stage, Stage::Ready | Stage::Done)
        && !matches!(after.stage, Stage::Ready | Stage::Invalid)
    {
        transitions.push(SessionTransition::RoundStarted);
    }

    // 2. Split
    if !before.has_left_hand && after.has_left_hand {
        transitions.push(SessionTransition::HandSplit);
    }

    // 3. Dealer turn
    if before.stage != Stage::DealerTurn && after.stage == Stage::DealerTurn {
        transitions.push(SessionTransition::DealerTurnStarted);
    }

    // 4. Settlement (!Done -> Done)
    if before.stage != Stage::Done && after.stage == Stage::Done {
        transitions.push(SessionTransition::RoundSettled);
    }

    transitions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(stage: Stage, has_left_hand: bool) -> RoundView {
        RoundView {
            stage,
            has_left_hand,
        }
    }

    #[test]
    fn test_derive_round_started() {
        let transitions = derive_session_transitions(
            &view(Stage::Ready, false),
            &view(Stage::PlayerTurnRight, false),
        );
        assert_eq!(transitions, vec![SessionTransition::RoundStarted]);
    }

    #[test]
    fn test_natural_blackjack_starts_and_settles() {
        let transitions =
            derive_session_transitions(&view(Stage::Ready, false), &view(Stage::Done, false));
        assert!(transitions.contains(&SessionTransition::RoundStarted));
        assert!(transitions.contains(&SessionTransition::RoundSettled));
    }

    #[test]
    fn test_derive_split() {
        let transitions = derive_session_transitions(
            &view(Stage::PlayerTurnRight, false),
            &view(Stage::PlayerTurnRight, true),
        );
        assert_eq!(transitions, vec![SessionTransition::HandSplit]);
    }

    #[test]
    fn test_done_to_done_is_quiet() {
        let transitions =
            derive_session_transitions(&view(Stage::Done, true), &view(Stage::Done, true));
        assert!(transitions.is_empty());
    }
}
