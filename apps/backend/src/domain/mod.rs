//! Domain layer: session, ledger and engine-state types.

pub mod actions;
pub mod cards;
pub mod game_transition;
pub mod hand;
pub mod ledger;
pub mod player_view;
pub mod rules;
pub mod session_id;
pub mod snapshot;
pub mod stage;
pub mod state;

// Re-exports for ergonomics
pub use actions::{Action, SideBets};
pub use cards::{Card, HandValue, Suit};
pub use hand::{AvailableActions, Hand, HandInfo, Position};
pub use player_view::PublicState;
pub use rules::{DoubleRule, RuleOverrides, Rules};
pub use session_id::SessionId;
pub use snapshot::{SessionMetadata, Snapshot};
pub use stage::Stage;
pub use state::EngineState;
