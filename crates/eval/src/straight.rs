// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Straights detection.
//!
//! A straight is a hand whose ranks are all distinct and consecutive, with the
//! ace playing either above the king or below the deuce. Hands with fewer than
//! five cards form straights with fewer ranks, so `2-3` is a two cards straight
//! and `A-2-3` a three cards wheel.
//!
//! Detection shifts the 13 bits rank mask onto a 14 bits ladder where bit 0 is
//! the low ace and bits 1..=13 are deuce to ace, a straight of `len` cards is a
//! run of `len` bits in the ladder.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Rank;

/// The rank bits of a straight window.
const fn window(len: usize) -> u16 {
    (1 << len) - 1
}

/// The type of a straight.
///
/// The derived ordering ranks the wheel below any other straight, and other
/// straights by their top card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StraightType {
    /// The ace plays low, A-2-3-4-5 for a five cards straight.
    Wheel,
    /// A straight with the given top card.
    High(Rank),
}

impl StraightType {
    /// The shortest straight.
    pub const MIN_LEN: usize = 2;
    /// The longest straight.
    pub const MAX_LEN: usize = 5;

    /// Detects a straight of `len` cards given the hand rank mask.
    ///
    /// Returns the highest straight in the mask, the mask may have more than
    /// `len` ranks set.
    pub fn detect(mask: u16, len: usize) -> Option<StraightType> {
        if !(Self::MIN_LEN..=Self::MAX_LEN).contains(&len) {
            return None;
        }

        let ladder = (mask << 1) | ((mask >> Rank::Ace.index()) & 1);
        let run = window(len);

        // Ladder position of the top card, from the ace down to the wheel.
        (len - 1..=Rank::COUNT).rev().find_map(|top| {
            let shift = top + 1 - len;
            if (ladder >> shift) & run != run {
                None
            } else if shift == 0 {
                // The run includes the low ace.
                Some(StraightType::Wheel)
            } else {
                Rank::from_index((top - 1) as u8).map(StraightType::High)
            }
        })
    }

    /// Returns all straights with `len` cards from the lowest to the highest.
    pub fn windows(len: usize) -> impl Iterator<Item = StraightType> {
        let valid = (Self::MIN_LEN..=Self::MAX_LEN).contains(&len);
        let highs = Rank::ranks()
            .filter(move |r| valid && r.index() + 1 >= len)
            .map(StraightType::High);
        valid.then_some(StraightType::Wheel).into_iter().chain(highs)
    }

    /// Checks if this straight can be made with `len` cards.
    pub fn is_valid(self, len: usize) -> bool {
        match self {
            StraightType::Wheel => (Self::MIN_LEN..=Self::MAX_LEN).contains(&len),
            StraightType::High(top) => {
                (Self::MIN_LEN..=Self::MAX_LEN).contains(&len) && top.index() + 1 >= len
            }
        }
    }

    /// The 13 bits rank mask of this straight with `len` cards.
    ///
    /// Panics if the straight is not valid for `len` cards.
    pub fn mask(self, len: usize) -> u16 {
        assert!(self.is_valid(len), "invalid {len} cards straight {self}");

        match self {
            StraightType::Wheel => Rank::Ace.bit() | window(len - 1),
            StraightType::High(top) => window(len) << (top.index() + 1 - len),
        }
    }

    /// The straight ranks from the top card down, the wheel ace is the last rank.
    pub fn ranks(self, len: usize) -> Vec<Rank> {
        let mask = self.mask(len);
        let mut ranks = crate::codec::mask_ranks(mask).collect::<Vec<_>>();
        if self == StraightType::Wheel {
            ranks.rotate_left(1);
        }

        ranks
    }

    /// The straight top card, for a five cards wheel this is the five.
    pub fn top(self, len: usize) -> Rank {
        self.ranks(len)[0]
    }
}

impl fmt::Display for StraightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StraightType::Wheel => write!(f, "Wheel"),
            StraightType::High(rank) => write!(f, "{rank} high"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::ranks_mask;

    #[test]
    fn five_cards_windows() {
        let windows = StraightType::windows(5).collect::<Vec<_>>();
        assert_eq!(windows.len(), 10);
        assert_eq!(windows[0], StraightType::Wheel);
        assert_eq!(windows[1], StraightType::High(Rank::Six));
        assert_eq!(windows[9], StraightType::High(Rank::Ace));
        assert!(windows.windows(2).all(|w| w[0] < w[1]));

        for w in windows {
            assert_eq!(StraightType::detect(w.mask(5), 5), Some(w));
            assert_eq!(w.mask(5).count_ones(), 5);
        }
    }

    #[test]
    fn small_windows() {
        assert_eq!(StraightType::windows(2).count(), 13);
        assert_eq!(StraightType::windows(3).count(), 12);
        assert_eq!(StraightType::windows(4).count(), 11);
        assert_eq!(StraightType::windows(1).count(), 0);
        assert_eq!(StraightType::windows(6).count(), 0);

        for len in 2..=4 {
            for w in StraightType::windows(len) {
                assert_eq!(StraightType::detect(w.mask(len), len), Some(w));
            }
        }
    }

    #[test]
    fn detect_wheel() {
        use Rank::*;
        let mask = ranks_mask(&[Ace, Deuce, Trey, Four, Five]);
        assert_eq!(StraightType::detect(mask, 5), Some(StraightType::Wheel));
        assert_eq!(StraightType::Wheel.ranks(5), [Five, Four, Trey, Deuce, Ace]);
        assert_eq!(StraightType::Wheel.top(5), Five);

        let mask = ranks_mask(&[Ace, Deuce]);
        assert_eq!(StraightType::detect(mask, 2), Some(StraightType::Wheel));

        let mask = ranks_mask(&[Deuce, Trey]);
        assert_eq!(StraightType::detect(mask, 2), Some(StraightType::High(Trey)));
        assert!(StraightType::Wheel < StraightType::High(Trey));
    }

    #[test]
    fn detect_highest() {
        use Rank::*;
        let mask = ranks_mask(&[Ace, King, Queen, Jack, Ten]);
        assert_eq!(StraightType::detect(mask, 5), Some(StraightType::High(Ace)));

        let mask = ranks_mask(&[Ace, Deuce, Trey, Four, Five, Six]);
        assert_eq!(StraightType::detect(mask, 5), Some(StraightType::High(Six)));

        // No wrap around the ace.
        let mask = ranks_mask(&[Queen, King, Ace, Deuce, Trey]);
        assert_eq!(StraightType::detect(mask, 5), None);

        let mask = ranks_mask(&[Ace, King]);
        assert_eq!(StraightType::detect(mask, 2), Some(StraightType::High(Ace)));

        let mask = ranks_mask(&[Seven, Nine]);
        assert_eq!(StraightType::detect(mask, 2), None);
    }

    #[test]
    #[should_panic]
    fn invalid_window() {
        StraightType::High(Rank::Four).mask(5);
    }
}
