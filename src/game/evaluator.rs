//! 5-card hand classification and ranking.
//!
//! `evaluate` is a pure function of exactly five cards. Two results
//! compare by category first, then lexicographically over their kicker
//! sequences; kicker sequences always have the same length within a
//! category, so the derived ordering is exactly the tie-break rule.

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

use super::{
    constants::HAND_SIZE,
    entities::{Card, Value},
};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum HandCategory {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalFlush,
}

impl HandCategory {
    /// Category rank in `[1, 10]`, High Card lowest.
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8 + 1
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::HighCard => "High Card",
            Self::OnePair => "One Pair",
            Self::TwoPair => "Two Pair",
            Self::ThreeOfAKind => "Three of a Kind",
            Self::Straight => "Straight",
            Self::Flush => "Flush",
            Self::FullHouse => "Full House",
            Self::FourOfAKind => "Four of a Kind",
            Self::StraightFlush => "Straight Flush",
            Self::RoyalFlush => "Royal Flush",
        };
        write!(f, "{repr}")
    }
}

/// Derived classification of a 5-card hand. Never stored; recomputed
/// at showdown.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct HandEvaluation {
    pub category: HandCategory,
    pub kickers: Vec<Value>,
}

/// Classifies exactly five cards.
///
/// Kicker conventions:
/// - grouped categories (pairs, trips, quads, full house, high card)
///   carry the group values sorted by (count desc, value desc);
/// - straights and flushes carry their single high card, except the
///   wheel (A-2-3-4-5) which carries `[5]` and ranks as the lowest
///   straight;
/// - a royal flush carries the fixed `[14, 13, 12, 11, 10]`.
///
/// # Panics
///
/// Panics if `cards` does not hold exactly five cards.
#[must_use]
pub fn evaluate(cards: &[Card]) -> HandEvaluation {
    assert_eq!(cards.len(), HAND_SIZE, "hands hold exactly five cards");

    let mut counts: BTreeMap<Value, u8> = BTreeMap::new();
    for card in cards {
        *counts.entry(card.rank.value()).or_default() += 1;
    }

    // (count desc, value desc); the kicker sequence for grouped hands.
    let mut groups: Vec<(u8, Value)> = counts.iter().map(|(&v, &c)| (c, v)).collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));
    let group_kickers: Vec<Value> = groups.iter().map(|&(_, value)| value).collect();

    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);

    let mut sorted: Vec<Value> = cards.iter().map(|c| c.rank.value()).collect();
    sorted.sort_unstable();
    let is_wheel = sorted == [2, 3, 4, 5, 14];
    let is_straight = is_wheel || sorted.windows(2).all(|w| w[1] == w[0] + 1);
    let is_royal = is_flush && sorted == [10, 11, 12, 13, 14];

    // The wheel's ace plays low: its straight ranks under 2-3-4-5-6.
    let straight_high = if is_wheel { 5 } else { sorted[HAND_SIZE - 1] };

    let (category, kickers) = if is_royal {
        (HandCategory::RoyalFlush, vec![14, 13, 12, 11, 10])
    } else if is_flush && is_straight {
        (HandCategory::StraightFlush, vec![straight_high])
    } else if groups[0].0 == 4 {
        (HandCategory::FourOfAKind, group_kickers)
    } else if groups[0].0 == 3 && groups[1].0 == 2 {
        (HandCategory::FullHouse, group_kickers)
    } else if is_flush {
        (HandCategory::Flush, vec![sorted[HAND_SIZE - 1]])
    } else if is_straight {
        (HandCategory::Straight, vec![straight_high])
    } else if groups[0].0 == 3 {
        (HandCategory::ThreeOfAKind, group_kickers)
    } else if groups[0].0 == 2 && groups[1].0 == 2 {
        (HandCategory::TwoPair, group_kickers)
    } else if groups[0].0 == 2 {
        (HandCategory::OnePair, group_kickers)
    } else {
        (HandCategory::HighCard, group_kickers)
    };

    HandEvaluation { category, kickers }
}
