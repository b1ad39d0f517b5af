//! Text encoding of cards, hands and players for persistence.
//!
//! The token grammar is the legacy wire format and must stay byte compatible with
//! existing stored history: a card is `<suit-mark><rank-marks>` (`H10`, `SA`), a hand
//! is its bet and card tokens joined by `,`, a player is its hand encodings joined
//! by `#`, and a deck is its card tokens joined by `,`.

use crate::card::{Card, Rank, Suit};
use crate::error::GameError;
use crate::hand::Hand;
use crate::player::Player;

/// Separator between the bet and the cards of a hand, and between deck cards.
pub const CARD_DELIM: char = ',';
/// Separator between the hands of a player.
pub const HAND_DELIM: char = '#';

/// Enum controlling how a malformed card token is treated during decode.
///
/// The legacy behavior is `Lenient`: log a warning, drop the offending token and keep
/// decoding the rest of the hand. `Strict` fails the whole decode with the first
/// `InvalidCardToken` instead, for callers that would rather reject corrupt history
/// than silently lose cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    #[default]
    Lenient,
    Strict,
}

/// Encodes a card as its token.
pub fn encode_card(card: &Card) -> String {
    card.to_string()
}

/// Decodes a card token, suit mark first. Fails with `InvalidCardToken` when the suit
/// or rank mark is not in the closed set.
pub fn decode_card(token: &str) -> Result<Card, GameError> {
    let mut chars = token.chars();
    let suit = chars
        .next()
        .and_then(Suit::from_mark)
        .ok_or_else(|| GameError::InvalidCardToken(token.to_string()))?;
    let rank = Rank::from_mark(chars.as_str())
        .ok_or_else(|| GameError::InvalidCardToken(token.to_string()))?;
    Ok(Card::new(rank, suit))
}

/// Encodes a hand as its bet followed by its card tokens. A hand with no cards
/// encodes as just the bet.
pub fn encode_hand(hand: &Hand) -> String {
    let mut out = hand.bet.to_string();
    for card in &hand.cards {
        out.push(CARD_DELIM);
        out.push_str(&encode_card(card));
    }
    out
}

/// Decodes a hand from its token sequence, recomputing the derived score fields.
/// Malformed card tokens are handled per `policy`.
pub fn decode_hand(tokens: &str, policy: DecodePolicy) -> Result<Hand, GameError> {
    let mut parts = tokens.split(CARD_DELIM);
    let bet_token = parts.next().unwrap_or("");
    let bet = bet_token
        .parse::<u32>()
        .map_err(|_| GameError::CorruptSnapshot(format!("bad bet token: {:?}", bet_token)))?;
    let mut hand = Hand::new(bet);
    for token in parts {
        match decode_card(token) {
            Ok(card) => hand.deal(card),
            Err(e) if policy == DecodePolicy::Strict => return Err(e),
            Err(_) => log::warn!("skipping invalid card token {:?} in hand {:?}", token, tokens),
        }
    }
    Ok(hand)
}

/// Encodes a player's hands, in order, joined by the hand separator.
pub fn encode_player(player: &Player) -> String {
    player
        .hands
        .iter()
        .map(encode_hand)
        .collect::<Vec<String>>()
        .join(&HAND_DELIM.to_string())
}

/// Decodes a player from its hand token sequence. The money balance and dealer flag
/// are stored outside the token string and are supplied by the caller.
pub fn decode_player(
    tokens: &str,
    money: i64,
    is_dealer: bool,
    policy: DecodePolicy,
) -> Result<Player, GameError> {
    let mut hands = Vec::new();
    for hand_tokens in tokens.split(HAND_DELIM) {
        hands.push(decode_hand(hand_tokens, policy)?);
    }
    Ok(Player::from_hands(hands, money, is_dealer))
}

/// Encodes a sequence of deck cards joined by the card separator.
pub fn encode_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(encode_card)
        .collect::<Vec<String>>()
        .join(&CARD_DELIM.to_string())
}

/// Decodes a sequence of deck cards. An empty string decodes to no cards. Malformed
/// tokens are handled per `policy`.
pub fn decode_cards(tokens: &str, policy: DecodePolicy) -> Result<Vec<Card>, GameError> {
    let mut cards = Vec::new();
    if tokens.is_empty() {
        return Ok(cards);
    }
    for token in tokens.split(CARD_DELIM) {
        match decode_card(token) {
            Ok(card) => cards.push(card),
            Err(e) if policy == DecodePolicy::Strict => return Err(e),
            Err(_) => log::warn!("skipping invalid card token {:?} in deck", token),
        }
    }
    Ok(cards)
}
