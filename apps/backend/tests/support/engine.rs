//! Deterministic rule engines for controller tests.
//!
//! `ShoeEngine` plays simplified blackjack from a fixed shoe: card `n` on the
//! table is always `shoe[n % len]`, so every round is reproducible.
//! `ScriptedEngine` wraps it to inject rejections and count engine calls.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use blackjack_backend::domain::cards::{Card, HandValue, Suit};
use blackjack_backend::domain::hand::{AvailableActions, Hand, Position};
use blackjack_backend::domain::rules::{DoubleRule, Rules};
use blackjack_backend::domain::state::{InsuranceInfo, SideBetsInfo};
use blackjack_backend::domain::{Action, EngineState, SideBets, Stage};
use blackjack_backend::{RuleEngine, Transition};
use parking_lot::Mutex;

pub fn card(text: &str) -> Card {
    let value = match text {
        "A" => 1,
        "J" | "Q" | "K" => 10,
        n => n.parse().unwrap_or(0),
    };
    Card::new(text, Suit::Spades, value)
}

pub fn shoe(texts: &[&str]) -> Vec<Card> {
    texts.iter().map(|t| card(t)).collect()
}

pub struct ShoeEngine {
    shoe: Vec<Card>,
}

struct Draw<'a> {
    shoe: &'a [Card],
    next: usize,
}

impl Draw<'_> {
    fn take(&mut self) -> Card {
        let card = self.shoe[self.next % self.shoe.len()].clone();
        self.next += 1;
        card
    }
}

fn cards_on_table(state: &EngineState) -> usize {
    state.hand_info.iter().map(|h| h.cards.len()).sum::<usize>() + state.dealer_cards.len()
}

fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && HandValue::of(cards).best() == 21
}

fn doubling_allowed(rule: DoubleRule, total: u8) -> bool {
    match rule {
        DoubleRule::Any => true,
        DoubleRule::NineOrTen => matches!(total, 9 | 10),
        DoubleRule::NineTenOrEleven => matches!(total, 9..=11),
        DoubleRule::NineThroughFifteen => matches!(total, 9..=15),
        DoubleRule::None => false,
    }
}

impl ShoeEngine {
    pub fn new(shoe: Vec<Card>) -> Self {
        assert!(!shoe.is_empty(), "shoe must hold at least one card");
        Self { shoe }
    }

    fn draw(&self, state: &EngineState) -> Draw<'_> {
        Draw {
            shoe: &self.shoe,
            next: cards_on_table(state),
        }
    }

    fn refresh_actions(state: &mut EngineState) {
        let split_round = state.hand_info.left.is_some();
        let rules = state.rules.clone();
        let dealer_ace = state.dealer_cards.first().is_some_and(Card::is_ace);
        let insured = state.side_bets.insurance.is_some();
        let active = match state.stage {
            Stage::PlayerTurnRight => Some(Position::Right),
            Stage::PlayerTurnLeft => Some(Position::Left),
            _ => None,
        };

        for position in [Position::Right, Position::Left] {
            let Some(hand) = state.hand_info.get_mut(position) else {
                continue;
            };
            if active != Some(position) || hand.closed {
                hand.available_actions = AvailableActions::NONE;
                continue;
            }
            let fresh = hand.cards.len() == 2;
            let first_move = fresh && !split_round;
            hand.available_actions = AvailableActions {
                hit: true,
                stand: true,
                double: fresh
                    && (!split_round || rules.double_after_split)
                    && doubling_allowed(rules.double, hand.value.best()),
                split: first_move
                    && rules.split
                    && position == Position::Right
                    && hand.cards[0].value == hand.cards[1].value,
                surrender: first_move && rules.surrender && position == Position::Right,
                insurance: first_move
                    && rules.insurance
                    && dealer_ace
                    && !insured
                    && position == Position::Right,
            };
        }
    }

    fn payout(hand: &Hand, dealer: &[Card], dealer_bust: bool) -> i64 {
        if hand.has_busted {
            return 0;
        }
        if hand.has_surrendered {
            return hand.bet / 2;
        }
        let player = hand.value.best();
        let dealer_total = HandValue::of(dealer).best();
        if hand.has_blackjack && !is_blackjack(dealer) {
            hand.bet * 5 / 2
        } else if dealer_bust || player > dealer_total {
            hand.bet * 2
        } else if player == dealer_total {
            hand.bet
        } else {
            0
        }
    }

    fn finish(&self, mut state: EngineState) -> EngineState {
        let needs_dealer = state
            .hand_info
            .iter()
            .any(|h| !h.has_busted && !h.has_surrendered && !h.has_blackjack);
        if needs_dealer {
            let mut draw = self.draw(&state);
            loop {
                let value = HandValue::of(&state.dealer_cards);
                let soft_17 = value.best() == 17 && value.hi != value.lo;
                let total = value.best();
                if total > 17 || (total == 17 && (!soft_17 || state.rules.stand_on_soft_17)) {
                    break;
                }
                state.dealer_cards.push(draw.take());
            }
        }

        state.dealer_has_busted = HandValue::of(&state.dealer_cards).best() > 21;
        state.dealer_has_blackjack = is_blackjack(&state.dealer_cards);

        let dealer = state.dealer_cards.clone();
        let bust = state.dealer_has_busted;
        state.won_on_right = state
            .hand_info
            .right
            .as_ref()
            .map_or(0, |h| Self::payout(h, &dealer, bust));
        state.won_on_left = state
            .hand_info
            .left
            .as_ref()
            .map_or(0, |h| Self::payout(h, &dealer, bust));
        if let Some(insurance) = state.side_bets.insurance.as_mut() {
            insurance.win = if state.dealer_has_blackjack {
                insurance.risk * 3
            } else {
                0
            };
        }

        state.final_bet = state.committed();
        state.stage = Stage::Done;
        Self::refresh_actions(&mut state);
        state
    }

    fn advance(&self, mut state: EngineState) -> EngineState {
        let right_open = state.hand_info.right.as_ref().is_some_and(|h| !h.closed);
        let left_open = state.hand_info.left.as_ref().is_some_and(|h| !h.closed);
        if right_open {
            state.stage = Stage::PlayerTurnRight;
        } else if left_open {
            state.stage = Stage::PlayerTurnLeft;
        } else {
            return self.finish(state);
        }
        Self::refresh_actions(&mut state);
        state
    }

    fn deal(&self, state: &EngineState, bet: i64, side_bets: SideBets) -> Transition {
        if bet <= 0 {
            return Transition::rejected("bet must be positive");
        }
        let mut next = EngineState::ready(state.rules.clone());
        next.history = state.history.clone();
        let mut draw = self.draw(&next);
        let (p1, d1, p2, d2) = (draw.take(), draw.take(), draw.take(), draw.take());

        let mut hand = Hand::new(vec![p1.clone(), p2.clone()], bet);
        hand.has_blackjack = is_blackjack(&hand.cards);
        next.hand_info.right = Some(hand);
        next.dealer_cards = vec![d1, d2];
        next.initial_bet = bet;
        next.side_bets = SideBetsInfo::placed(side_bets);
        if p1.text == p2.text {
            next.side_bets.perfect_pairs.win = side_bets.perfect_pairs * 26;
        }

        let dealer_blackjack = is_blackjack(&next.dealer_cards);
        let player_blackjack = next.player_has_blackjack();
        let insurance_offered = next.dealer_cards[0].is_ace() && next.rules.insurance;
        if player_blackjack || (dealer_blackjack && !insurance_offered) {
            if let Some(hand) = next.hand_info.right.as_mut() {
                hand.closed = true;
            }
            return Transition::Applied(self.finish(next));
        }

        next.stage = Stage::PlayerTurnRight;
        Self::refresh_actions(&mut next);
        Transition::Applied(next)
    }

    fn play(&self, state: &EngineState, action: &Action) -> Transition {
        let position = action.position();
        let expected = match position {
            Position::Right => Stage::PlayerTurnRight,
            Position::Left => Stage::PlayerTurnLeft,
        };
        if state.stage != expected {
            return Transition::rejected(format!("not the {position} hand's turn"));
        }

        let mut next = state.clone();
        let mut draw = self.draw(state);
        let Some(hand) = next.hand_info.get_mut(position) else {
            return Transition::rejected(format!("no {position} hand"));
        };

        match action {
            Action::Hit { .. } => {
                hand.cards.push(draw.take());
            }
            Action::Stand { .. } => hand.closed = true,
            Action::Double { .. } => {
                hand.bet *= 2;
                hand.cards.push(draw.take());
                hand.closed = true;
            }
            Action::Surrender => {
                hand.has_surrendered = true;
                hand.closed = true;
            }
            Action::Split => {
                let second = hand.cards.pop();
                let bet = hand.bet;
                hand.cards.push(draw.take());
                hand.value = HandValue::of(&hand.cards);
                let mut left_cards: Vec<Card> = second.into_iter().collect();
                left_cards.push(draw.take());
                next.hand_info.left = Some(Hand::new(left_cards, bet));
                Self::refresh_actions(&mut next);
                return Transition::Applied(next);
            }
            Action::Insurance { bet } => {
                if *bet > 0 {
                    next.side_bets.insurance = Some(InsuranceInfo { risk: *bet, win: 0 });
                }
                if is_blackjack(&next.dealer_cards) {
                    if let Some(hand) = next.hand_info.right.as_mut() {
                        hand.closed = true;
                    }
                    return Transition::Applied(self.finish(next));
                }
                // Declining still uses up the offer
                if next.side_bets.insurance.is_none() {
                    next.side_bets.insurance = Some(InsuranceInfo::default());
                }
                Self::refresh_actions(&mut next);
                return Transition::Applied(next);
            }
            Action::Deal { .. } => return Transition::rejected("round already dealt"),
        }

        hand.value = HandValue::of(&hand.cards);
        if hand.value.best() > 21 {
            hand.has_busted = true;
            hand.closed = true;
        }
        Transition::Applied(self.advance(next))
    }
}

impl RuleEngine for ShoeEngine {
    fn new_game(&self, rules: Rules) -> EngineState {
        EngineState::ready(rules)
    }

    fn apply(&self, state: &EngineState, action: &Action) -> Transition {
        let transition = match action {
            Action::Deal { bet, side_bets } => self.deal(state, *bet, *side_bets),
            _ => self.play(state, action),
        };
        match transition {
            Transition::Applied(mut next) => {
                next.history.push(action.clone());
                Transition::Applied(next)
            }
            rejected => rejected,
        }
    }
}

/// One-shot override for the next `apply`.
#[derive(Debug, Clone)]
pub enum Script {
    Reject(String),
    Invalid,
}

pub struct ScriptedEngine {
    inner: ShoeEngine,
    script: Mutex<VecDeque<Script>>,
    applies: AtomicUsize,
}

impl ScriptedEngine {
    pub fn new(shoe: Vec<Card>) -> Self {
        Self {
            inner: ShoeEngine::new(shoe),
            script: Mutex::new(VecDeque::new()),
            applies: AtomicUsize::new(0),
        }
    }

    pub fn then(&self, step: Script) -> &Self {
        self.script.lock().push_back(step);
        self
    }

    /// Number of `apply` calls so far.
    pub fn applies(&self) -> usize {
        self.applies.load(Ordering::SeqCst)
    }
}

impl RuleEngine for ScriptedEngine {
    fn new_game(&self, rules: Rules) -> EngineState {
        self.inner.new_game(rules)
    }

    fn apply(&self, state: &EngineState, action: &Action) -> Transition {
        self.applies.fetch_add(1, Ordering::SeqCst);
        match self.script.lock().pop_front() {
            Some(Script::Reject(reason)) => Transition::Rejected { reason },
            Some(Script::Invalid) => {
                let mut next = state.clone();
                next.stage = Stage::Invalid;
                next.history.push(action.clone());
                Transition::Applied(next)
            }
            None => self.inner.apply(state, action),
        }
    }
}
