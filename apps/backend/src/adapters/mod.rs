//! Adapters for external dependencies.

pub mod game_state_sea;
