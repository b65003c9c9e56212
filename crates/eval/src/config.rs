// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Play configuration.
use serde::{Deserialize, Serialize};

use crate::{Card, Rank, Suit};

/// The rules used to evaluate hands.
///
/// The default configuration has no wild cards and ignores straights and
/// flushes in hands with less than five cards:
///
/// ```
/// # use kicker_eval::*;
/// let config = PlayConfig::default()
///     .with_small_straights_flushes(true)
///     .with_wild_rank(Rank::Deuce);
/// assert!(config.is_wild(Card::new(Rank::Deuce, Suit::Hearts)));
/// assert!(config.counts_straights_flushes(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayConfig {
    small_straights_flushes: bool,
    /// Sorted wild cards.
    wilds: Vec<Card>,
}

impl PlayConfig {
    /// The smallest hand where straights and flushes always count.
    pub const FULL_HAND: usize = 5;

    /// Sets whether straights and flushes count in hands with less than five cards.
    pub fn with_small_straights_flushes(mut self, counted: bool) -> Self {
        self.small_straights_flushes = counted;
        self
    }

    /// Adds a wild card.
    pub fn with_wild(mut self, card: Card) -> Self {
        assert!(!card.is_unknown(), "an unknown card cannot be wild");
        if let Err(pos) = self.wilds.binary_search(&card) {
            self.wilds.insert(pos, card);
        }

        self
    }

    /// Makes all the cards with the given rank wild.
    pub fn with_wild_rank(self, rank: Rank) -> Self {
        self.with_wilds(Suit::suits().map(|suit| Card::new(rank, suit)))
    }

    /// Adds wild cards.
    pub fn with_wilds<I>(self, cards: I) -> Self
    where
        I: IntoIterator<Item = Card>,
    {
        cards.into_iter().fold(self, Self::with_wild)
    }

    /// Checks if straights and flushes count in a hand with `len` cards.
    pub fn counts_straights_flushes(&self, len: usize) -> bool {
        len >= Self::FULL_HAND || self.small_straights_flushes
    }

    /// Checks if straights and flushes count in hands with less than five cards.
    pub fn small_straights_flushes(&self) -> bool {
        self.small_straights_flushes
    }

    /// Checks if a card is wild.
    pub fn is_wild(&self, card: Card) -> bool {
        self.wilds.binary_search(&card).is_ok()
    }

    /// Checks if this configuration has wild cards.
    pub fn has_wilds(&self) -> bool {
        !self.wilds.is_empty()
    }

    /// The wild cards.
    pub fn wilds(&self) -> &[Card] {
        &self.wilds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlayConfig::default();
        assert!(!config.has_wilds());
        assert!(!config.counts_straights_flushes(2));
        assert!(!config.counts_straights_flushes(4));
        assert!(config.counts_straights_flushes(5));
        assert!(config.counts_straights_flushes(7));
    }

    #[test]
    fn wild_cards() {
        let kh = Card::new(Rank::King, Suit::Hearts);
        let config = PlayConfig::default()
            .with_wild_rank(Rank::Deuce)
            .with_wild(kh)
            .with_wild(kh);

        assert_eq!(config.wilds().len(), 5);
        assert!(config.is_wild(kh));
        assert!(!config.is_wild(Card::new(Rank::King, Suit::Spades)));
        for suit in Suit::suits() {
            assert!(config.is_wild(Card::new(Rank::Deuce, suit)));
        }

        // Same wilds in any order give the same configuration.
        let other = PlayConfig::default()
            .with_wild(kh)
            .with_wilds(Suit::suits().rev().map(|s| Card::new(Rank::Deuce, s)));
        assert_eq!(config, other);
    }
}
