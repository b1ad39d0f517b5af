use crate::card::{Card, Rank, Suit};
use crate::codec::{self, DecodePolicy};
use crate::error::GameError;
use rand::seq::SliceRandom;
use rand::thread_rng;

/// Struct for the shoe the engine deals from: an ordered stack of cards, drawn from
/// the top. Freshly built it holds exactly `52 * num_decks` cards and only ever
/// shrinks until the engine rebuilds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
    num_decks: usize,
}

impl Deck {
    /// Associated function to build a new shuffled deck of `52 * num_decks` cards.
    pub fn new(num_decks: usize) -> Self {
        let mut deck = Deck {
            cards: Vec::new(),
            num_decks,
        };
        deck.reset();
        deck
    }

    /// Associated function to rebuild a deck from its persisted token string.
    /// Malformed card tokens are handled per `policy`.
    pub fn from_tokens(
        tokens: &str,
        num_decks: usize,
        policy: DecodePolicy,
    ) -> Result<Self, GameError> {
        let cards = codec::decode_cards(tokens, policy)?;
        Ok(Deck { cards, num_decks })
    }

    /// Method to rebuild the deck to its full `52 * num_decks` size and shuffle it.
    pub fn reset(&mut self) {
        self.cards.clear();
        for _ in 0..self.num_decks {
            for rank in Rank::ALL {
                for suit in Suit::ALL {
                    self.cards.push(Card::new(rank, suit));
                }
            }
        }
        self.shuffle();
    }

    /// Method to shuffle the remaining cards uniformly in place.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut thread_rng());
    }

    /// Method to draw the top card. Fails with `EmptyDeck` on an exhausted deck; the
    /// engine refreshes the deck before each round so this never occurs operationally.
    pub fn draw(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::EmptyDeck)
    }

    /// Encodes the remaining cards in order as the persisted token string.
    pub fn to_tokens(&self) -> String {
        codec::encode_cards(&self.cards)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
