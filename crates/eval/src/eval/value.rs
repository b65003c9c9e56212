// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand categories and values.
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

use crate::{Card, EvalError, PlayConfig, RankTables};

/// The category of a poker hand, from the weakest to the strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// High card.
    HighCard = 0,
    /// One pair.
    OnePair,
    /// Two pairs.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Straight.
    Straight,
    /// Flush.
    Flush,
    /// Full house.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Straight flush.
    StraightFlush,
    /// Five of a kind, only possible with wild cards.
    FiveOfAKind,
}

impl HandRank {
    /// The number of hand categories.
    pub const COUNT: usize = 10;

    /// Returns all categories from the weakest to the strongest.
    pub fn ranks() -> impl DoubleEndedIterator<Item = HandRank> {
        use HandRank::*;
        [
            HighCard,
            OnePair,
            TwoPair,
            ThreeOfAKind,
            Straight,
            Flush,
            FullHouse,
            FourOfAKind,
            StraightFlush,
            FiveOfAKind,
        ]
        .into_iter()
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandRank::HighCard => "High Card",
            HandRank::OnePair => "One Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
            HandRank::FiveOfAKind => "Five of a Kind",
        };

        write!(f, "{name}")
    }
}

/// The value of a hand.
///
/// The value is the dense rank assigned by the rank tables where 1 is the best
/// hand, values are only comparable between hands evaluated with the same table,
/// that is hands of the same size and play configuration.
///
/// The ordering is reversed with respect to the numeric value so that a better
/// hand compares greater:
///
/// ```
/// # use kicker_eval::*;
/// let flush = HandValue::eval(&parse_cards("2H 5H 9H JH KH").unwrap()).unwrap();
/// let pair = HandValue::eval(&parse_cards("AC AD 7S 4H 2C").unwrap()).unwrap();
/// assert!(flush > pair);
/// assert!(flush.value() < pair.value());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandValue {
    value: u16,
    rank: HandRank,
}

impl HandValue {
    /// Creates a hand value.
    pub(crate) fn new(value: u16, rank: HandRank) -> Self {
        debug_assert!(value > 0);
        Self { value, rank }
    }

    /// Evaluates a hand using the shared rank tables and the default play
    /// configuration.
    pub fn eval(cards: &[Card]) -> Result<HandValue, EvalError> {
        super::evaluate(RankTables::shared(), &PlayConfig::default(), cards).map(|e| e.value())
    }

    /// The dense rank of this hand, 1 is the best hand.
    pub fn value(&self) -> u16 {
        self.value
    }

    /// The hand category.
    pub fn rank(&self) -> HandRank {
        self.rank
    }
}

impl PartialOrd for HandValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandValue {
    fn cmp(&self, other: &Self) -> Ordering {
        other.value.cmp(&self.value)
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.rank, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_order() {
        let ranks = HandRank::ranks().collect::<Vec<_>>();
        assert_eq!(ranks.len(), HandRank::COUNT);
        assert!(ranks.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(ranks[HandRank::Flush as usize], HandRank::Flush);
        assert!(HandRank::FiveOfAKind > HandRank::StraightFlush);
        assert_eq!(HandRank::ThreeOfAKind.to_string(), "Three of a Kind");
    }

    #[test]
    fn value_ordering() {
        let best = HandValue::new(1, HandRank::StraightFlush);
        let worst = HandValue::new(7462, HandRank::HighCard);
        assert!(best > worst);
        assert_eq!(best.cmp(&best), Ordering::Equal);
        assert_eq!(worst.to_string(), "High Card (7462)");
    }
}
