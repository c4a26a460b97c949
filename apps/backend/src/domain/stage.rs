//! Phases of a blackjack round.

use serde::{Deserialize, Serialize};

/// Overall round progression.
///
/// `ready → player-turn-right → [player-turn-left] → dealer-turn → showdown → done`.
/// `Invalid` is the engine's rejection sentinel and is never stored.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Ready,
    PlayerTurnRight,
    PlayerTurnLeft,
    DealerTurn,
    Showdown,
    Done,
    Invalid,
}

impl Stage {
    /// No further actions may be dispatched; a new game has to be started.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::Invalid)
    }

    pub const fn is_persistable(self) -> bool {
        !matches!(self, Stage::Invalid)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Stage::Ready => "ready",
            Stage::PlayerTurnRight => "player-turn-right",
            Stage::PlayerTurnLeft => "player-turn-left",
            Stage::DealerTurn => "dealer-turn",
            Stage::Showdown => "showdown",
            Stage::Done => "done",
            Stage::Invalid => "invalid",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
