//! Engine-owned round state.
//!
//! The rule engine produces and consumes `EngineState`; the controller only
//! reads the stage, the stakes and the settled winnings out of it.

use serde::{Deserialize, Serialize};

use super::actions::{Action, SideBets};
use super::cards::Card;
use super::hand::{Hand, HandInfo, Position};
use super::rules::Rules;
use super::stage::Stage;

/// Stake and gross payout of one side bet.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SideBetOutcome {
    pub stake: i64,
    pub win: i64,
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsuranceInfo {
    pub risk: i64,
    pub win: i64,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SideBetsInfo {
    pub lucky_lucky: SideBetOutcome,
    pub perfect_pairs: SideBetOutcome,
    pub insurance: Option<InsuranceInfo>,
}

impl SideBetsInfo {
    pub fn placed(bets: SideBets) -> Self {
        Self {
            lucky_lucky: SideBetOutcome {
                stake: bets.lucky_lucky,
                win: 0,
            },
            perfect_pairs: SideBetOutcome {
                stake: bets.perfect_pairs,
                win: 0,
            },
            insurance: None,
        }
    }

    pub fn stakes(&self) -> Option<i64> {
        self.lucky_lucky
            .stake
            .checked_add(self.perfect_pairs.stake)?
            .checked_add(self.insurance.map(|i| i.risk).unwrap_or(0))
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct EngineState {
    pub stage: Stage,
    #[serde(default)]
    pub hand_info: HandInfo,
    #[serde(default)]
    pub dealer_cards: Vec<Card>,
    #[serde(default)]
    pub dealer_has_blackjack: bool,
    #[serde(default)]
    pub dealer_has_busted: bool,
    #[serde(default)]
    pub initial_bet: i64,
    /// Total wagered, reported by the engine once the round is settled.
    #[serde(default)]
    pub final_bet: Option<i64>,
    #[serde(default)]
    pub won_on_right: i64,
    #[serde(default)]
    pub won_on_left: i64,
    #[serde(default)]
    pub side_bets: SideBetsInfo,
    pub rules: Rules,
    /// Actions applied so far, oldest first. Engine-owned; read-only here.
    #[serde(default)]
    pub history: Vec<Action>,
}

impl EngineState {
    /// State of a table before any cards are dealt.
    pub fn ready(rules: Rules) -> Self {
        Self {
            stage: Stage::Ready,
            hand_info: HandInfo::default(),
            dealer_cards: Vec::new(),
            dealer_has_blackjack: false,
            dealer_has_busted: false,
            initial_bet: 0,
            final_bet: None,
            won_on_right: 0,
            won_on_left: 0,
            side_bets: SideBetsInfo::default(),
            rules,
            history: Vec::new(),
        }
    }

    pub fn hand(&self, position: Position) -> Option<&Hand> {
        self.hand_info.get(position)
    }

    /// Stakes currently riding on the table: hand bets, side bets and insurance.
    ///
    /// `None` when the sum overflows.
    pub fn committed(&self) -> Option<i64> {
        self.hand_info
            .total_bet()?
            .checked_add(self.side_bets.stakes()?)
    }

    /// Amount taken off the ledger when the round settles.
    pub fn wagered(&self) -> Option<i64> {
        self.final_bet.or_else(|| self.committed())
    }

    /// Gross amount paid back to the player: hand winnings, side-bet payouts,
    /// and the insurance payout when the dealer had blackjack.
    pub fn returned(&self) -> Option<i64> {
        let insurance = if self.dealer_has_blackjack {
            self.side_bets.insurance.map(|i| i.win).unwrap_or(0)
        } else {
            0
        };
        [
            self.won_on_left,
            self.side_bets.lucky_lucky.win,
            self.side_bets.perfect_pairs.win,
            insurance,
        ]
        .into_iter()
        .try_fold(self.won_on_right, i64::checked_add)
    }

    pub fn last_action(&self) -> Option<&Action> {
        self.history.last()
    }

    pub fn player_has_blackjack(&self) -> bool {
        self.hand_info.iter().any(|h| h.has_blackjack)
    }

    pub fn player_has_busted(&self) -> bool {
        let mut hands = self.hand_info.iter().peekable();
        hands.peek().is_some() && hands.all(|h| h.has_busted)
    }

    pub fn player_has_surrendered(&self) -> bool {
        let mut hands = self.hand_info.iter().peekable();
        hands.peek().is_some() && hands.all(|h| h.has_surrendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cards::Suit;

    fn two_hands() -> EngineState {
        let mut state = EngineState::ready(Rules::default());
        state.stage = Stage::PlayerTurnLeft;
        state.hand_info.right = Some(Hand::new(vec![Card::new("8", Suit::Clubs, 8)], 10));
        state.hand_info.left = Some(Hand::new(vec![Card::new("8", Suit::Hearts, 8)], 10));
        state
    }

    #[test]
    fn committed_sums_hands_and_side_bets() {
        let mut state = two_hands();
        state.side_bets = SideBetsInfo::placed(SideBets {
            lucky_lucky: 2,
            perfect_pairs: 3,
        });
        state.side_bets.insurance = Some(InsuranceInfo { risk: 5, win: 0 });
        assert_eq!(state.committed(), Some(30));
        assert_eq!(state.wagered(), Some(30));

        state.final_bet = Some(25);
        assert_eq!(state.wagered(), Some(25));
    }

    #[test]
    fn overflowing_stakes_have_no_total() {
        let mut state = two_hands();
        state.side_bets = SideBetsInfo::placed(SideBets {
            lucky_lucky: i64::MAX,
            perfect_pairs: 0,
        });
        assert_eq!(state.side_bets.stakes(), Some(i64::MAX));
        assert_eq!(state.committed(), None);
        assert_eq!(state.wagered(), None);

        state.won_on_right = i64::MAX;
        state.won_on_left = 1;
        assert_eq!(state.returned(), None);
    }

    #[test]
    fn insurance_pays_only_on_dealer_blackjack() {
        let mut state = two_hands();
        state.side_bets.insurance = Some(InsuranceInfo { risk: 5, win: 15 });
        state.won_on_right = 20;
        assert_eq!(state.returned(), Some(20));

        state.dealer_has_blackjack = true;
        assert_eq!(state.returned(), Some(35));
    }

    #[test]
    fn bust_flag_requires_every_hand() {
        let mut state = two_hands();
        if let Some(right) = state.hand_info.right.as_mut() {
            right.has_busted = true;
        }
        assert!(!state.player_has_busted());
        if let Some(left) = state.hand_info.left.as_mut() {
            left.has_busted = true;
        }
        assert!(state.player_has_busted());
        assert!(!EngineState::ready(Rules::default()).player_has_busted());
    }
}
