use crate::card::Card;

/// Struct for one hand of cards a party is playing, together with its bet and the
/// score fields derived from the cards. The derived fields are always a pure function
/// of `cards` and are recomputed after every card mutation; they are never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    pub cards: Vec<Card>,
    pub bet: u32,
    /// Total with every ace counted as 1.
    pub hard_score: u32,
    /// Total with every ace counted as 11.
    pub soft_score: u32,
    pub has_ace: bool,
    pub is_bust: bool,
    pub is_blackjack: bool,
    /// Turn state, not derived from the cards. Set by stand and double, cleared only
    /// when the hand is discarded at round reset.
    pub is_standing: bool,
}

impl Hand {
    /// Associated function to create a new empty `Hand` with the given bet.
    pub fn new(bet: u32) -> Self {
        Hand {
            cards: Vec::new(),
            bet,
            hard_score: 0,
            soft_score: 0,
            has_ace: false,
            is_bust: false,
            is_blackjack: false,
            is_standing: false,
        }
    }

    /// Method to deal a card into the hand, recomputes the derived score fields.
    pub fn deal(&mut self, card: Card) {
        self.cards.push(card);
        self.update_score();
    }

    /// Method to remove the most recently dealt card, recomputing the derived score
    /// fields. Only used by split, to move a card from the original hand into the new
    /// one. Returns `None` on an empty hand.
    pub fn remove_top(&mut self) -> Option<Card> {
        let popped = self.cards.pop();
        self.update_score();
        popped
    }

    /// Returns the effective score of the hand: the soft total unless it exceeds 21
    /// and the hand holds an ace, in which case the hard total.
    pub fn score(&self) -> u32 {
        if self.soft_score > 21 && self.has_ace {
            self.hard_score
        } else {
            self.soft_score
        }
    }

    /// Recomputes every derived field from the cards.
    fn update_score(&mut self) {
        self.hard_score = 0;
        self.soft_score = 0;
        self.has_ace = false;
        for card in &self.cards {
            if card.is_ace() {
                self.has_ace = true;
                self.hard_score += 1;
                self.soft_score += 11;
            } else {
                self.hard_score += card.value();
                self.soft_score += card.value();
            }
        }
        let score = self.score();
        self.is_bust = score > 21;
        // Any 21 counts, not only a two card natural.
        self.is_blackjack = score == 21;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};
    use rand::seq::SliceRandom;
    use rand::{thread_rng, Rng};

    fn hand_of(ranks: &[Rank]) -> Hand {
        let mut hand = Hand::new(10);
        for &rank in ranks {
            hand.deal(Card::new(rank, Suit::Hearts));
        }
        hand
    }

    #[test]
    fn score_without_aces_is_plain_sum() {
        let mut rng = thread_rng();
        let no_ace_ranks: Vec<Rank> = Rank::ALL
            .into_iter()
            .filter(|r| *r != Rank::Ace)
            .collect();
        for _ in 0..200 {
            let n = rng.gen_range(1..=5);
            let ranks: Vec<Rank> = (0..n)
                .map(|_| *no_ace_ranks.choose(&mut rng).unwrap())
                .collect();
            let hand = hand_of(&ranks);
            let expected: u32 = hand.cards.iter().map(|c| c.value()).sum();
            assert_eq!(hand.score(), expected);
            assert_eq!(hand.hard_score, hand.soft_score);
        }
    }

    #[test]
    fn score_with_aces_prefers_soft_total() {
        let mut rng = thread_rng();
        for _ in 0..200 {
            let n = rng.gen_range(0..=4);
            let mut ranks: Vec<Rank> = (0..n)
                .map(|_| *Rank::ALL.choose(&mut rng).unwrap())
                .collect();
            ranks.push(Rank::Ace);
            let hand = hand_of(&ranks);
            let soft: u32 = hand.cards.iter().map(|c| c.value()).sum();
            let hard: u32 = hand
                .cards
                .iter()
                .map(|c| if c.is_ace() { 1 } else { c.value() })
                .sum();
            if soft <= 21 {
                assert_eq!(hand.score(), soft);
            } else {
                assert_eq!(hand.score(), hard);
            }
        }
    }

    #[test]
    fn bust_and_blackjack_flags_follow_score() {
        let mut rng = thread_rng();
        for _ in 0..200 {
            let n = rng.gen_range(1..=6);
            let ranks: Vec<Rank> = (0..n)
                .map(|_| *Rank::ALL.choose(&mut rng).unwrap())
                .collect();
            let hand = hand_of(&ranks);
            assert_eq!(hand.is_bust, hand.score() > 21);
            assert_eq!(hand.is_blackjack, hand.score() == 21);
        }
    }

    #[test]
    fn ace_king_is_blackjack() {
        let hand = hand_of(&[Rank::Ace, Rank::King]);
        assert_eq!(hand.score(), 21);
        assert!(hand.is_blackjack);
        assert!(!hand.is_bust);
    }

    #[test]
    fn ten_nine_five_busts() {
        let hand = hand_of(&[Rank::Ten, Rank::Nine, Rank::Five]);
        assert_eq!(hand.score(), 24);
        assert!(hand.is_bust);
    }

    #[test]
    fn aces_fall_back_to_hard_total() {
        let hand = hand_of(&[Rank::Ace, Rank::Ace]);
        // 22 soft busts, so the hand falls back to the all ones total.
        assert_eq!(hand.score(), 2);
        let hand = hand_of(&[Rank::Ace, Rank::Nine, Rank::Ace]);
        assert_eq!(hand.score(), 11);
    }

    #[test]
    fn remove_top_rescores() {
        let mut hand = hand_of(&[Rank::Ten, Rank::Nine, Rank::Five]);
        assert!(hand.is_bust);
        let popped = hand.remove_top().unwrap();
        assert_eq!(popped.rank, Rank::Five);
        assert_eq!(hand.score(), 19);
        assert!(!hand.is_bust);
        assert_eq!(hand.cards.len(), 2);
    }
}
