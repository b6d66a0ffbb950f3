use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::constants::DECK_SIZE;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Self; 4] = [Self::Hearts, Self::Diamonds, Self::Clubs, Self::Spades];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Hearts => "♥",
            Self::Diamonds => "♦",
            Self::Clubs => "♣",
            Self::Spades => "♠",
        };
        write!(f, "{repr}")
    }
}

/// Numeric rank value. Aces are always high (14) except inside the
/// wheel straight, which the evaluator special-cases.
pub type Value = u8;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Rank {
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
    #[serde(rename = "A")]
    Ace,
}

impl Rank {
    pub const ALL: [Self; 13] = [
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
        Self::Ace,
    ];

    #[must_use]
    pub const fn value(self) -> Value {
        self as Value + 2
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
            Self::Ace => "A",
            other => return write!(f, "{}", other.value()),
        };
        write!(f, "{repr}")
    }
}

/// An immutable playing card.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = format!("{}{}", self.rank, self.suit);
        write!(f, "{repr:>3}")
    }
}

/// The 52-card deck a session deals and draws from. Recreated freshly
/// shuffled at every deal; cards leave from the end and never return.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Canonical order: suit-major, rank-minor.
    #[must_use]
    pub fn new() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    #[must_use]
    pub fn shuffled() -> Self {
        let mut deck = Self::new();
        deck.shuffle();
        deck
    }

    /// Fisher–Yates via `rand`. Not seedable on purpose.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut rand::rng());
    }

    /// Removes and returns the deck's last card.
    ///
    /// # Panics
    ///
    /// Panics if the deck is empty. A single hand consumes at most 40
    /// cards (two 5-card deals plus up to three 5-card draws each), so
    /// an empty deck here is a bug, not a game condition.
    pub fn draw(&mut self) -> Card {
        self.cards.pop().expect("52 cards outlast a single hand")
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

/// Type alias for whole chips. If a two-player session ever holds more
/// than ~4.2 billion chips, something has gone very wrong.
pub type Chips = u32;

/// Type alias for seat positions within a session (always 0 or 1).
pub type SeatIndex = usize;

pub type ParticipantId = Uuid;
pub type SessionId = Uuid;

/// Per-participant record inside a session. `chips` persists across
/// hands for the session's lifetime; everything else resets each hand.
#[derive(Clone, Debug)]
pub struct PlayerSeat {
    pub id: ParticipantId,
    pub chips: Chips,
    pub bet: Chips,
    pub ready: bool,
    pub draw_count: u8,
}

impl PlayerSeat {
    #[must_use]
    pub fn new(id: ParticipantId, starting_chips: Chips) -> Self {
        Self {
            id,
            chips: starting_chips,
            bet: 0,
            ready: false,
            draw_count: 0,
        }
    }

    pub fn reset_for_next_hand(&mut self) {
        self.bet = 0;
        self.ready = false;
        self.draw_count = 0;
    }
}

/// The session's current stage, gating which intents are valid.
/// `Showdown` is transient: it is entered and resolved within one
/// evaluation step and is never observable from outside.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Betting,
    Drawing,
    Showdown,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Betting => "betting",
            Self::Drawing => "drawing",
            Self::Showdown => "showdown",
        };
        write!(f, "{repr}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::constants::STARTING_CHIPS;
    use std::collections::BTreeSet;

    #[test]
    fn test_rank_values() {
        assert_eq!(Rank::Two.value(), 2);
        assert_eq!(Rank::Ten.value(), 10);
        assert_eq!(Rank::Jack.value(), 11);
        assert_eq!(Rank::Queen.value(), 12);
        assert_eq!(Rank::King.value(), 13);
        assert_eq!(Rank::Ace.value(), 14);
    }

    #[test]
    fn test_rank_display() {
        assert_eq!(Rank::Two.to_string(), "2");
        assert_eq!(Rank::Ten.to_string(), "10");
        assert_eq!(Rank::Jack.to_string(), "J");
        assert_eq!(Rank::Ace.to_string(), "A");
    }

    #[test]
    fn test_suit_display() {
        assert_eq!(Suit::Hearts.to_string(), "♥");
        assert_eq!(Suit::Diamonds.to_string(), "♦");
        assert_eq!(Suit::Clubs.to_string(), "♣");
        assert_eq!(Suit::Spades.to_string(), "♠");
    }

    #[test]
    fn test_card_wire_format() {
        let card = Card::new(Rank::Queen, Suit::Hearts);
        let json = serde_json::to_value(card).unwrap();
        assert_eq!(json, serde_json::json!({"rank": "Q", "suit": "hearts"}));
        let back: Card = serde_json::from_value(json).unwrap();
        assert_eq!(back, card);
    }

    #[test]
    fn test_deck_has_52_distinct_cards() {
        let mut deck = Deck::new();
        let mut seen = BTreeSet::new();
        for _ in 0..DECK_SIZE {
            seen.insert(deck.draw());
        }
        assert_eq!(seen.len(), DECK_SIZE);
        assert!(deck.is_empty());
    }

    #[test]
    fn test_deck_canonical_order_draws_from_end() {
        let mut deck = Deck::new();
        // Last card in suit-major, rank-minor order.
        assert_eq!(deck.draw(), Card::new(Rank::Ace, Suit::Spades));
        assert_eq!(deck.draw(), Card::new(Rank::King, Suit::Spades));
        assert_eq!(deck.len(), DECK_SIZE - 2);
    }

    #[test]
    fn test_shuffled_deck_still_complete() {
        let mut deck = Deck::shuffled();
        let mut seen = BTreeSet::new();
        while !deck.is_empty() {
            seen.insert(deck.draw());
        }
        assert_eq!(seen.len(), DECK_SIZE);
    }

    #[test]
    fn test_seat_starts_clean() {
        let seat = PlayerSeat::new(Uuid::new_v4(), STARTING_CHIPS);
        assert_eq!(seat.chips, STARTING_CHIPS);
        assert_eq!(seat.bet, 0);
        assert!(!seat.ready);
        assert_eq!(seat.draw_count, 0);
    }

    #[test]
    fn test_seat_reset_keeps_chips() {
        let mut seat = PlayerSeat::new(Uuid::new_v4(), 480);
        seat.bet = 30;
        seat.ready = true;
        seat.draw_count = 2;
        seat.reset_for_next_hand();
        assert_eq!(seat.chips, 480);
        assert_eq!(seat.bet, 0);
        assert!(!seat.ready);
        assert_eq!(seat.draw_count, 0);
    }

    #[test]
    fn test_phase_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&Phase::Betting).unwrap(),
            "\"betting\""
        );
        assert_eq!(
            serde_json::to_string(&Phase::Drawing).unwrap(),
            "\"drawing\""
        );
    }
}
