//! Actions dispatched to the rule engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::hand::Position;

/// Side-bet stakes placed with the deal.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SideBets {
    pub lucky_lucky: i64,
    pub perfect_pairs: i64,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Action {
    Deal { bet: i64, side_bets: SideBets },
    Hit { position: Position },
    Stand { position: Position },
    Double { position: Position },
    Split,
    Surrender,
    Insurance { bet: i64 },
}

impl Action {
    pub const fn kind(&self) -> &'static str {
        match self {
            Action::Deal { .. } => "deal",
            Action::Hit { .. } => "hit",
            Action::Stand { .. } => "stand",
            Action::Double { .. } => "double",
            Action::Split => "split",
            Action::Surrender => "surrender",
            Action::Insurance { .. } => "insurance",
        }
    }

    /// Hand the action is aimed at; whole-round actions target the right hand.
    pub const fn position(&self) -> Position {
        match self {
            Action::Hit { position } | Action::Stand { position } | Action::Double { position } => {
                *position
            }
            _ => Position::Right,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Deal { bet, side_bets } => write!(
                f,
                "type=deal bet={bet} lucky_lucky={} perfect_pairs={}",
                side_bets.lucky_lucky, side_bets.perfect_pairs
            ),
            Action::Hit { position } | Action::Stand { position } | Action::Double { position } => {
                write!(f, "type={} position={position}", self.kind())
            }
            Action::Insurance { bet } => write!(f, "type=insurance bet={bet}"),
            Action::Split | Action::Surrender => write!(f, "type={}", self.kind()),
        }
    }
}
