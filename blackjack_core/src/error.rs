use std::error::Error;
use std::fmt::Display;

/// Enum for every error the engine can surface to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A card token whose suit or rank mark is not in the closed set. Under the
    /// lenient decode policy these are logged and skipped rather than surfaced.
    InvalidCardToken(String),
    /// A draw was attempted on an exhausted deck. The engine refreshes the deck
    /// before each round, so hitting this is an invariant violation and fatal for
    /// the current round.
    EmptyDeck,
    /// The snapshot store failed to read or write. In-memory state is intact, only
    /// the durability step failed.
    Persistence(String),
    /// A stored snapshot record could not be parsed at all.
    CorruptSnapshot(String),
}

impl Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::InvalidCardToken(token) => write!(f, "invalid card token: {}", token),
            GameError::EmptyDeck => write!(f, "draw from an empty deck"),
            GameError::Persistence(msg) => write!(f, "snapshot store failure: {}", msg),
            GameError::CorruptSnapshot(msg) => write!(f, "corrupt snapshot record: {}", msg),
        }
    }
}

impl Error for GameError {}
