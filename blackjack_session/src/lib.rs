//! Session layer for the blackjack engine: the turn state machine, dealer policy and
//! win resolution, plus the snapshot store boundary the engine persists through.

pub mod game;
pub mod store;

pub mod prelude {
    pub use crate::game::{
        Action, BlackjackGame, DECK_LOW_WATER, NUM_DECKS, STARTING_MONEY,
    };
    pub use crate::store::{FileStore, MemoryStore, SnapshotRecord, SnapshotStore};
    pub use blackjack_core::prelude::*;
}

pub use prelude::*;
