pub mod game_state;

pub use game_state::Entity as GameStates;
pub use game_state::Model as GameStateRecord;
