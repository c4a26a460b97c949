//! Card and hand value types as reported by the rule engine.

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

/// A dealt card. `text` is the face label ("A", "2".."10", "J", "Q", "K");
/// `value` is its blackjack value with aces counted as 1.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub text: String,
    pub suit: Suit,
    pub value: u8,
}

impl Card {
    pub fn new(text: impl Into<String>, suit: Suit, value: u8) -> Self {
        Self {
            text: text.into(),
            suit,
            value,
        }
    }

    pub fn is_ace(&self) -> bool {
        self.text == "A"
    }
}

/// Hard (`lo`, aces as 1) and soft (`hi`, one ace as 11 when it fits) totals.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandValue {
    pub hi: u8,
    pub lo: u8,
}

impl HandValue {
    pub fn of(cards: &[Card]) -> Self {
        let lo: u8 = cards.iter().map(|c| c.value).fold(0u8, u8::saturating_add);
        let has_ace = cards.iter().any(Card::is_ace);
        let hi = if has_ace && lo <= 11 { lo + 10 } else { lo };
        Self { hi, lo }
    }

    /// Best total not exceeding 21, or the hard total when both bust.
    pub fn best(&self) -> u8 {
        if self.hi <= 21 {
            self.hi
        } else {
            self.lo
        }
    }
}
