//! Caller-safe projection of a session.
//!
//! Engine internals (history, the unplayed dealer logic, raw side-bet
//! bookkeeping) stay behind; the view carries what a player may see.

use serde::{Deserialize, Serialize};

use super::cards::Card;
use super::hand::{AvailableActions, Hand};
use super::ledger::{displayed_money, Settlement};
use super::rules::Rules;
use super::stage::Stage;
use super::state::EngineState;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandView {
    pub cards: Vec<Card>,
    pub bet: i64,
    pub available_actions: AvailableActions,
}

impl From<&Hand> for HandView {
    fn from(hand: &Hand) -> Self {
        Self {
            cards: hand.cards.clone(),
            bet: hand.bet,
            available_actions: hand.available_actions,
        }
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandsView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<HandView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<HandView>,
}

/// Outcome of a settled round. `won` is net of the wager.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub final_bet: i64,
    pub won: i64,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PublicState {
    pub money: i64,
    pub stage: Stage,
    pub hands: HandsView,
    pub dealer_cards: Vec<Card>,
    pub rules: Rules,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance: Option<i64>,
    pub dealer_has_busted: bool,
    pub dealer_has_blackjack: bool,
    pub player_has_blackjack: bool,
    pub player_has_busted: bool,
    pub player_has_surrendered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<RoundResult>,
}

/// Build the public view of `state` for a ledger balance of `money`.
pub fn project(state: &EngineState, money: i64) -> PublicState {
    let result = (state.stage == Stage::Done)
        .then(|| Settlement::of(state).ok())
        .flatten()
        .map(|settlement| RoundResult {
            final_bet: settlement.wagered,
            won: settlement.net(),
        });

    PublicState {
        money: displayed_money(state, money),
        stage: state.stage,
        hands: HandsView {
            left: state.hand_info.left.as_ref().map(HandView::from),
            right: state.hand_info.right.as_ref().map(HandView::from),
        },
        dealer_cards: state.dealer_cards.clone(),
        rules: state.rules.clone(),
        insurance: state.side_bets.insurance.map(|i| i.risk),
        dealer_has_busted: state.dealer_has_busted,
        dealer_has_blackjack: state.dealer_has_blackjack,
        player_has_blackjack: state.player_has_blackjack(),
        player_has_busted: state.player_has_busted(),
        player_has_surrendered: state.player_has_surrendered(),
        result,
    }
}
