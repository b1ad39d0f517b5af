use crate::card::Card;
use crate::hand::Hand;

/// The bet every fresh hand starts with before the player has placed one.
pub const DEFAULT_BET: u32 = 10;

/// Struct for a party at the table, either the user or the dealer. Holds between one
/// and two hands (a second hand exists only after a successful split) and a money
/// balance. The dealer variant always has exactly one hand with a bet of 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub hands: Vec<Hand>,
    pub money: i64,
    pub is_dealer: bool,
}

impl Player {
    /// Associated function to create a new `Player` with a single fresh hand at the
    /// default bet (bet 0 for the dealer).
    pub fn new(money: i64, is_dealer: bool) -> Self {
        let mut player = Player {
            hands: Vec::new(),
            money,
            is_dealer,
        };
        player.add_hand(DEFAULT_BET);
        player
    }

    /// Associated function to rebuild a `Player` from hands decoded out of a
    /// snapshot.
    pub fn from_hands(hands: Vec<Hand>, money: i64, is_dealer: bool) -> Self {
        Player {
            hands,
            money,
            is_dealer,
        }
    }

    /// Method to deal a card into the indexed hand.
    pub fn deal(&mut self, card: Card, hand_index: usize) {
        self.hands[hand_index].deal(card);
    }

    /// Method to append a new empty hand. The dealer never bets, so the bet is forced
    /// to 0 for the dealer variant.
    pub fn add_hand(&mut self, bet: u32) {
        let bet = if self.is_dealer { 0 } else { bet };
        self.hands.push(Hand::new(bet));
    }

    /// Returns true if the player may double down: a single two card hand with enough
    /// money to cover the doubled bet.
    pub fn can_double(&self) -> bool {
        self.hands.len() == 1
            && self.hands[0].cards.len() == 2
            && self.money >= i64::from(self.hands[0].bet) * 2
    }

    /// Returns true if the player may split. Deliberately the same precondition as
    /// doubling: a single two card hand with funds for a second bet of the same size.
    /// Matching ranks are not required.
    pub fn can_split(&self) -> bool {
        self.hands.len() == 1
            && self.hands[0].cards.len() == 2
            && self.money >= i64::from(self.hands[0].bet) * 2
    }

    /// Method to credit winnings to the balance.
    pub fn credit(&mut self, amount: i64) {
        self.money += amount;
    }

    /// Method to debit a lost bet from the balance.
    pub fn debit(&mut self, amount: i64) {
        self.money -= amount;
    }

    /// Method to discard all hands and start over with a single fresh hand at the
    /// default bet.
    pub fn reset(&mut self) {
        self.hands.clear();
        self.add_hand(DEFAULT_BET);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};

    fn two_card_player(money: i64, bet: u32) -> Player {
        let mut player = Player::new(money, false);
        player.hands[0].bet = bet;
        player.deal(Card::new(Rank::Eight, Suit::Hearts), 0);
        player.deal(Card::new(Rank::Eight, Suit::Spades), 0);
        player
    }

    #[test]
    fn new_player_has_one_default_hand() {
        let player = Player::new(1000, false);
        assert_eq!(player.hands.len(), 1);
        assert_eq!(player.hands[0].bet, DEFAULT_BET);
        assert!(player.hands[0].cards.is_empty());
    }

    #[test]
    fn dealer_hands_never_carry_a_bet() {
        let mut dealer = Player::new(0, true);
        assert_eq!(dealer.hands[0].bet, 0);
        dealer.add_hand(50);
        assert_eq!(dealer.hands[1].bet, 0);
    }

    #[test]
    fn split_and_double_share_the_same_precondition() {
        let player = two_card_player(20, 10);
        assert!(player.can_split());
        assert!(player.can_double());

        // Not enough money to cover the doubled bet.
        let poor = two_card_player(19, 10);
        assert!(!poor.can_split());
        assert!(!poor.can_double());
    }

    #[test]
    fn three_cards_or_two_hands_block_split_and_double() {
        let mut player = two_card_player(100, 10);
        player.deal(Card::new(Rank::Two, Suit::Clubs), 0);
        assert!(!player.can_split());
        assert!(!player.can_double());

        let mut split_player = two_card_player(100, 10);
        split_player.add_hand(10);
        assert!(!split_player.can_split());
        assert!(!split_player.can_double());
    }

    #[test]
    fn credit_and_debit_adjust_balance() {
        let mut player = Player::new(100, false);
        player.credit(25);
        assert_eq!(player.money, 125);
        player.debit(200);
        assert_eq!(player.money, -75);
    }

    #[test]
    fn reset_restores_a_single_default_hand() {
        let mut player = two_card_player(100, 40);
        player.add_hand(40);
        player.reset();
        assert_eq!(player.hands.len(), 1);
        assert_eq!(player.hands[0].bet, DEFAULT_BET);
        assert!(player.hands[0].cards.is_empty());
    }
}
