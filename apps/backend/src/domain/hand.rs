//! Player hands.

use serde::{Deserialize, Serialize};

use super::cards::{Card, HandValue};

/// Which hand an action targets. `Right` is the main hand; `Left` only
/// exists after a split.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Left,
    #[default]
    Right,
}

impl Position {
    pub const fn as_str(self) -> &'static str {
        match self {
            Position::Left => "left",
            Position::Right => "right",
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actions the engine currently offers for a hand.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailableActions {
    pub hit: bool,
    pub stand: bool,
    pub double: bool,
    pub split: bool,
    pub surrender: bool,
    pub insurance: bool,
}

impl AvailableActions {
    pub const NONE: Self = Self {
        hit: false,
        stand: false,
        double: false,
        split: false,
        surrender: false,
        insurance: false,
    };
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hand {
    pub cards: Vec<Card>,
    pub bet: i64,
    pub value: HandValue,
    pub available_actions: AvailableActions,
    pub has_blackjack: bool,
    pub has_busted: bool,
    pub has_surrendered: bool,
    pub closed: bool,
}

impl Hand {
    pub fn new(cards: Vec<Card>, bet: i64) -> Self {
        let value = HandValue::of(&cards);
        Self {
            cards,
            bet,
            value,
            ..Self::default()
        }
    }
}

/// The pair of hands a round can hold.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandInfo {
    pub left: Option<Hand>,
    pub right: Option<Hand>,
}

impl HandInfo {
    pub fn get(&self, position: Position) -> Option<&Hand> {
        match position {
            Position::Left => self.left.as_ref(),
            Position::Right => self.right.as_ref(),
        }
    }

    pub fn get_mut(&mut self, position: Position) -> Option<&mut Hand> {
        match position {
            Position::Left => self.left.as_mut(),
            Position::Right => self.right.as_mut(),
        }
    }

    /// Existing hands, right first.
    pub fn iter(&self) -> impl Iterator<Item = &Hand> {
        self.right.iter().chain(self.left.iter())
    }

    /// Sum of hand bets, or `None` when it does not fit in an `i64`.
    pub fn total_bet(&self) -> Option<i64> {
        self.iter().try_fold(0i64, |acc, h| acc.checked_add(h.bet))
    }
}
