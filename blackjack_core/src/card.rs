use std::fmt::Display;

/// Enum for the four suits of a standard deck of playing cards. Each suit is identified
/// by a single character mark in the persisted token format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Hearts,
    Clubs,
    Diamonds,
    Spades,
}

impl Suit {
    /// All suits, in the order used when building a fresh deck.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Clubs, Suit::Diamonds, Suit::Spades];

    /// Returns the single character mark of the suit used in the token format.
    pub fn mark(&self) -> char {
        match self {
            Suit::Hearts => 'H',
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Spades => 'S',
        }
    }

    /// Associated function that parses a suit from its character mark, `None` if the
    /// character is not one of the four suit marks.
    pub fn from_mark(mark: char) -> Option<Suit> {
        match mark {
            'H' => Some(Suit::Hearts),
            'C' => Some(Suit::Clubs),
            'D' => Some(Suit::Diamonds),
            'S' => Some(Suit::Spades),
            _ => None,
        }
    }
}

impl Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mark())
    }
}

/// Enum for the thirteen ranks of a standard deck of playing cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// All ranks, in the order used when building a fresh deck.
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Returns the token mark for the rank. Every rank is a single character except
    /// `10`, which is the only two character mark.
    pub fn mark(&self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }

    /// Associated function that parses a rank from its token mark, `None` if the mark
    /// is not one of the thirteen rank marks.
    pub fn from_mark(mark: &str) -> Option<Rank> {
        match mark {
            "2" => Some(Rank::Two),
            "3" => Some(Rank::Three),
            "4" => Some(Rank::Four),
            "5" => Some(Rank::Five),
            "6" => Some(Rank::Six),
            "7" => Some(Rank::Seven),
            "8" => Some(Rank::Eight),
            "9" => Some(Rank::Nine),
            "10" => Some(Rank::Ten),
            "J" => Some(Rank::Jack),
            "Q" => Some(Rank::Queen),
            "K" => Some(Rank::King),
            "A" => Some(Rank::Ace),
            _ => None,
        }
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mark())
    }
}

/// Struct for a single immutable playing card. Equality is by rank and suit, cards have
/// no identity beyond that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    /// Associated function to create a new `Card` from a rank and suit.
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Card { rank, suit }
    }

    /// Returns the blackjack value of the card: pip cards count their pips, face cards
    /// count 10 and an ace counts 11. The scoring in `Hand` handles counting aces as 1
    /// when the 11 valued total would bust.
    pub fn value(&self) -> u32 {
        match self.rank {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
            Rank::Ace => 11,
        }
    }

    /// Returns true if the card is an ace.
    pub fn is_ace(&self) -> bool {
        self.rank == Rank::Ace
    }
}

impl Display for Card {
    /// Formats the card as its persisted token, suit mark first: `H10`, `SA`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.suit, self.rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_values() {
        assert_eq!(Card::new(Rank::Two, Suit::Hearts).value(), 2);
        assert_eq!(Card::new(Rank::Ten, Suit::Clubs).value(), 10);
        assert_eq!(Card::new(Rank::Queen, Suit::Diamonds).value(), 10);
        assert_eq!(Card::new(Rank::Ace, Suit::Spades).value(), 11);
    }

    #[test]
    fn card_tokens() {
        assert_eq!(Card::new(Rank::Ten, Suit::Hearts).to_string(), "H10");
        assert_eq!(Card::new(Rank::Ace, Suit::Spades).to_string(), "SA");
        assert_eq!(Card::new(Rank::Seven, Suit::Clubs).to_string(), "C7");
    }

    #[test]
    fn rank_marks_round_trip() {
        for rank in Rank::ALL {
            assert_eq!(Rank::from_mark(rank.mark()), Some(rank));
        }
        assert_eq!(Rank::from_mark("1"), None);
        assert_eq!(Rank::from_mark("11"), None);
    }

    #[test]
    fn suit_marks_round_trip() {
        for suit in Suit::ALL {
            assert_eq!(Suit::from_mark(suit.mark()), Some(suit));
        }
        assert_eq!(Suit::from_mark('X'), None);
    }
}
