//! Core data model for a single player blackjack game: cards, the shoe, hands with
//! hard/soft ace scoring, players, and the text codec used to persist them.

pub mod card;
pub mod codec;
pub mod deck;
pub mod error;
pub mod hand;
pub mod player;

pub mod prelude {
    pub use crate::card::{Card, Rank, Suit};
    pub use crate::codec::{self, DecodePolicy, CARD_DELIM, HAND_DELIM};
    pub use crate::deck::Deck;
    pub use crate::error::GameError;
    pub use crate::hand::Hand;
    pub use crate::player::{Player, DEFAULT_BET};
}

pub use prelude::*;
