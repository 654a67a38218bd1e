// Core deck engine exports
pub mod deck;
pub mod gesture;
pub mod locality;

pub use deck::{first_duplicate_id, Deck, DeckError, DeckState};
pub use gesture::{GestureParams, GestureResolver};
pub use locality::{count_local, partition_by_locality};
