use crate::store::{SnapshotRecord, SnapshotStore};
use blackjack_core::{codec, Deck, DecodePolicy, GameError, Player};
use std::fmt::Display;
use std::str::FromStr;

/// Number of 52 card decks in the shoe.
pub const NUM_DECKS: usize = 1;
/// The shoe is rebuilt at round reset once it falls below this many cards.
pub const DECK_LOW_WATER: usize = 10;
/// Balance a brand new player starts with.
pub const STARTING_MONEY: i64 = 1000;

/// Enum for every action a caller can submit. A closed set: unknown action names are
/// rejected when parsing at the boundary and are unrepresentable inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Bet,
    Hit,
    Stand,
    Double,
    Split,
    PlayAgain,
}

impl Action {
    /// The legacy wire name of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Bet => "Bet",
            Action::Hit => "Hit",
            Action::Stand => "Stand",
            Action::Double => "Double",
            Action::Split => "Split",
            Action::PlayAgain => "Play Again",
        }
    }
}

impl FromStr for Action {
    type Err = String;

    /// Parses the legacy wire names exactly as stored sessions submitted them.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Bet" => Ok(Action::Bet),
            "Hit" => Ok(Action::Hit),
            "Stand" => Ok(Action::Stand),
            "Double" => Ok(Action::Double),
            "Split" => Ok(Action::Split),
            "Play Again" => Ok(Action::PlayAgain),
            _ => Err(format!("unknown action: {:?}", s)),
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Struct for the engine of a single player blackjack session. Orchestrates the shoe,
/// the dealer and the user through a turn state machine, and appends a snapshot to the
/// injected store after every state mutation so the session survives a restart.
#[derive(Debug)]
pub struct BlackjackGame<S: SnapshotStore> {
    store: S,
    deck: Deck,
    dealer: Player,
    player: Player,
    active_hand: usize,
    round_over: bool,
    bets_locked: bool,
    message: String,
    policy: DecodePolicy,
}

impl<S: SnapshotStore> BlackjackGame<S> {
    /// Associated function to resume the session persisted in `store`, or start a
    /// fresh game when the store is empty. Uses the lenient decode policy for stored
    /// history, matching the legacy behavior.
    pub fn resume(store: S) -> Result<Self, GameError> {
        Self::resume_with_policy(store, DecodePolicy::default())
    }

    /// Associated function to resume with an explicit decode policy for stored
    /// tokens. `Strict` rejects a snapshot holding any malformed card token instead
    /// of dropping the card.
    pub fn resume_with_policy(store: S, policy: DecodePolicy) -> Result<Self, GameError> {
        match store.load_latest()? {
            Some(record) => Self::restore(store, record, policy),
            None => Self::fresh(store, policy),
        }
    }

    /// Rebuilds the engine from the latest snapshot record. No snapshot is appended,
    /// the restored state is already the newest entry.
    fn restore(store: S, record: SnapshotRecord, policy: DecodePolicy) -> Result<Self, GameError> {
        let player = codec::decode_player(&record.player, record.money, false, policy)?;
        let dealer = codec::decode_player(&record.dealer, 0, true, policy)?;
        let deck = Deck::from_tokens(&record.deck, NUM_DECKS, policy)?;
        log::debug!("resumed session, deck has {} cards", deck.len());
        Ok(BlackjackGame {
            store,
            deck,
            dealer,
            player,
            active_hand: record.active_hand,
            round_over: record.over,
            bets_locked: record.bets_locked,
            message: record.message,
            policy,
        })
    }

    /// Builds a brand new game: fresh shoe, one default bet hand each, two cards to
    /// the player and one to the dealer, then an initial snapshot.
    fn fresh(store: S, policy: DecodePolicy) -> Result<Self, GameError> {
        let mut game = BlackjackGame {
            store,
            deck: Deck::new(NUM_DECKS),
            dealer: Player::new(0, true),
            player: Player::new(STARTING_MONEY, false),
            active_hand: 0,
            round_over: false,
            bets_locked: false,
            message: String::new(),
            policy,
        };
        game.initial_deal()?;
        Ok(game)
    }

    /// Deals the opening cards of a round and appends a snapshot.
    fn initial_deal(&mut self) -> Result<(), GameError> {
        for _ in 0..2 {
            let card = self.deck.draw()?;
            self.player.deal(card, self.active_hand);
        }
        let card = self.deck.draw()?;
        self.dealer.deal(card, 0);
        self.log_state()
    }

    /// Pure predicate over the current state: is `action` allowed right now? Never
    /// mutates anything; invalid actions are silently ignored by `apply_action`.
    pub fn validate_action(&self, action: Action) -> bool {
        match action {
            Action::Bet => !self.bets_locked,
            Action::PlayAgain => self.round_over,
            Action::Double => self.player.can_double() && self.bets_locked && !self.round_over,
            Action::Split => self.player.can_split() && self.bets_locked && !self.round_over,
            Action::Hit | Action::Stand => self.bets_locked && !self.round_over,
        }
    }

    /// The single entry point for the caller: validates `action`, applies it,
    /// advances the turn state and appends a snapshot. Invalid actions are no-ops by
    /// design, not errors. For `Bet`, `bet` carries the requested amount and is
    /// written into the active hand before the action is handled.
    pub fn apply_action(&mut self, action: Action, bet: Option<u32>) -> Result<(), GameError> {
        if !self.validate_action(action) {
            log::debug!("ignoring invalid action {}", action);
            return Ok(());
        }
        if action == Action::Bet {
            if let Some(amount) = bet {
                self.player.hands[self.active_hand].bet = amount;
            }
        }
        self.handle_player_action(action)?;
        if action == Action::PlayAgain {
            // The reset performed its own deal and snapshot; there is no turn to advance.
            return Ok(());
        }
        self.advance_game_state()?;
        self.log_state()
    }

    /// Applies a validated action to the active hand.
    fn handle_player_action(&mut self, action: Action) -> Result<(), GameError> {
        log::debug!("handling action {}", action);
        match action {
            Action::Bet => self.bets_locked = true,
            Action::PlayAgain => self.reset()?,
            Action::Hit => {
                let card = self.deck.draw()?;
                self.player.deal(card, self.active_hand);
            }
            Action::Stand => self.player.hands[self.active_hand].is_standing = true,
            Action::Double => {
                let card = self.deck.draw()?;
                let hand = &mut self.player.hands[self.active_hand];
                hand.bet *= 2;
                hand.deal(card);
                hand.is_standing = true;
            }
            Action::Split => {
                // Validation guarantees a single two card hand with funds for the
                // second bet.
                let bet = self.player.hands[0].bet;
                self.player.add_hand(bet);
                if let Some(card) = self.player.hands[0].remove_top() {
                    self.player.deal(card, 1);
                }
                let card = self.deck.draw()?;
                self.player.deal(card, 0);
                let card = self.deck.draw()?;
                self.player.deal(card, 1);
            }
        }
        Ok(())
    }

    /// Advances the turn after a handled action. A finished active hand (bust,
    /// blackjack or standing) either ends the round, if it was the last hand, or
    /// passes play to the next hand. A live hand keeps acting.
    fn advance_game_state(&mut self) -> Result<(), GameError> {
        let hand = &self.player.hands[self.active_hand];
        if !(hand.is_bust || hand.is_blackjack || hand.is_standing) {
            return Ok(());
        }
        if self.active_hand == self.player.hands.len() - 1 {
            self.round_over = true;
            self.log_state()?;
            self.dealers_turn()?;
            self.check_win();
            log::info!("round over: {}", self.message);
            self.log_state()?;
        } else {
            self.active_hand += 1;
        }
        Ok(())
    }

    /// The dealer's automatic play: one unconditional draw, then, unless every player
    /// hand already busted, draw until the dealer's score reaches the larger of 17
    /// and the best live player hand, standing at or above that threshold.
    fn dealers_turn(&mut self) -> Result<(), GameError> {
        let card = self.deck.draw()?;
        self.dealer.deal(card, 0);
        if self.all_hands_bust() {
            // Payouts are already determined, no reason to keep drawing.
            return Ok(());
        }
        while !self.dealer.hands[0].is_bust {
            let target = self
                .player
                .hands
                .iter()
                .filter(|hand| !hand.is_bust)
                .map(|hand| hand.score())
                .fold(17, u32::max);
            if self.dealer.hands[0].score() >= target {
                self.dealer.hands[0].is_standing = true;
                break;
            }
            let card = self.deck.draw()?;
            self.dealer.deal(card, 0);
        }
        Ok(())
    }

    /// Settles every player hand against the dealer once the dealer's turn is done.
    /// `message` is a single field overwritten per hand, so with two hands only the
    /// last outcome text survives (a legacy limitation kept for compatibility, as is
    /// the "Push!" text for a bust hand against a bust dealer, which is never
    /// credited).
    fn check_win(&mut self) {
        if self.dealer.hands[0].is_bust {
            for i in 0..self.player.hands.len() {
                let bet = i64::from(self.player.hands[i].bet);
                if !self.player.hands[i].is_bust {
                    self.message = "Player wins!".to_string();
                    self.player.credit(bet);
                } else {
                    self.message = "Push!".to_string();
                }
            }
        } else {
            let dealer_score = self.dealer.hands[0].score();
            for i in 0..self.player.hands.len() {
                let bet = i64::from(self.player.hands[i].bet);
                let score = self.player.hands[i].score();
                if !self.player.hands[i].is_bust {
                    if score > dealer_score {
                        self.message = "Player wins!".to_string();
                        self.player.credit(bet);
                    } else if score < dealer_score {
                        self.message = "Dealer wins!".to_string();
                        self.player.debit(bet);
                    } else {
                        self.message = "Push!".to_string();
                    }
                } else {
                    self.message = "Dealer wins!".to_string();
                    self.player.debit(bet);
                }
            }
        }
    }

    /// Returns true if every one of the player's hands busted.
    fn all_hands_bust(&self) -> bool {
        self.player.hands.iter().all(|hand| hand.is_bust)
    }

    /// Resets the table for a new round: clears the flags, refreshes the shoe when it
    /// ran low, discards both parties' hands and deals the opening cards.
    fn reset(&mut self) -> Result<(), GameError> {
        self.round_over = false;
        self.bets_locked = false;
        self.message.clear();
        self.active_hand = 0;
        if self.deck.len() < DECK_LOW_WATER {
            self.deck.reset();
        }
        self.deck.shuffle();
        self.dealer.reset();
        self.player.reset();
        self.initial_deal()
    }

    /// Serializes the current state into a snapshot record.
    pub fn snapshot(&self) -> SnapshotRecord {
        SnapshotRecord {
            player: codec::encode_player(&self.player),
            dealer: codec::encode_player(&self.dealer),
            deck: self.deck.to_tokens(),
            active_hand: self.active_hand,
            over: self.round_over,
            message: self.message.clone(),
            money: self.player.money,
            bets_locked: self.bets_locked,
        }
    }

    /// Appends the current state to the snapshot store.
    fn log_state(&mut self) -> Result<(), GameError> {
        let record = self.snapshot();
        self.store.append(&record)
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn dealer(&self) -> &Player {
        &self.dealer
    }

    pub fn active_hand(&self) -> usize {
        self.active_hand
    }

    pub fn round_over(&self) -> bool {
        self.round_over
    }

    pub fn bets_locked(&self) -> bool {
        self.bets_locked
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn decode_policy(&self) -> DecodePolicy {
        self.policy
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: SnapshotStore> Display for BlackjackGame<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DEALER: {}\nPLAYER: {}\nHAND: {}\nOVER: {}\nMSG: {}",
            codec::encode_player(&self.dealer),
            codec::encode_player(&self.player),
            self.active_hand,
            self.round_over,
            self.message
        )
    }
}
