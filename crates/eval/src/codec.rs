// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Bit and prime encodings of a set of cards.
//!
//! All the hand detection and table lookups are built on these functions:
//!
//! - the *rank mask* has one bit per rank present in the hand, duplicated ranks
//!   set the same bit, so a hand without repeated ranks has as many bits as cards.
//! - the *prime product* multiplies the rank prime of each card, by unique
//!   factorization two hands have the same product iff they have the same ranks
//!   with the same multiplicities.
//! - the *suit masks* hold a rank mask for each suit.
use crate::{Card, Rank, Suit};

/// Number of entries of a table indexed by a rank mask.
pub const MASK_TABLE_SIZE: usize = 1 << Rank::COUNT;

/// Returns the OR of the cards rank bits.
#[inline]
pub fn rank_mask(cards: &[Card]) -> u16 {
    cards.iter().fold(0, |mask, c| mask | c.rank_bit())
}

/// Returns the rank mask for a list of ranks.
#[inline]
pub fn ranks_mask(ranks: &[Rank]) -> u16 {
    ranks.iter().fold(0, |mask, r| mask | r.bit())
}

/// Returns the product of the cards rank primes.
#[inline]
pub fn prime_product(cards: &[Card]) -> u64 {
    cards.iter().fold(1, |p, c| p * c.prime() as u64)
}

/// Returns the product of the ranks primes.
#[inline]
pub fn ranks_product(ranks: &[Rank]) -> u64 {
    ranks.iter().fold(1, |p, r| p * r.prime() as u64)
}

/// Returns the rank mask of each suit indexed by [Suit::index].
pub fn suit_masks(cards: &[Card]) -> [u16; Suit::COUNT] {
    let mut masks = [0; Suit::COUNT];
    for c in cards {
        masks[c.suit().index()] |= c.rank_bit();
    }

    masks
}

/// Returns the number of cards for each rank indexed by [Rank::index].
pub fn rank_counts(cards: &[Card]) -> [u8; Rank::COUNT] {
    let mut counts = [0; Rank::COUNT];
    for c in cards {
        counts[c.rank_bits() as usize] += 1;
    }

    counts
}

/// Checks if all the cards have the same suit.
///
/// This is the Cactus Kev's test, the AND of the one-hot suit bits is not zero
/// only if all cards share the same suit bit.
#[inline]
pub fn is_suited(cards: &[Card]) -> bool {
    !cards.is_empty() && cards.iter().fold(0xf, |s, c| s & c.suit_bits()) != 0
}

/// Returns the ranks in a rank mask from the highest to the lowest.
pub fn mask_ranks(mask: u16) -> impl Iterator<Item = Rank> {
    Rank::ranks().rev().filter(move |r| mask & r.bit() != 0)
}

/// Calls `f` for each multiset of `len` ranks where no rank is repeated more
/// than `max_count` times.
///
/// Each multiset is passed as a non increasing list of ranks, and multisets are
/// visited in lexicographic order starting from the one with all aces.
pub fn for_each_rank_multiset<F>(len: usize, max_count: usize, mut f: F)
where
    F: FnMut(&[Rank]),
{
    fn visit<F: FnMut(&[Rank])>(len: usize, max_count: usize, ranks: &mut Vec<Rank>, f: &mut F) {
        if ranks.len() == len {
            f(ranks.as_slice());
            return;
        }

        // Ranks are pushed in non increasing order.
        let top = ranks.last().copied().unwrap_or(Rank::Ace);
        for rank in Rank::ranks().rev().skip_while(|&r| r > top) {
            let count = ranks.iter().rev().take_while(|&&r| r == rank).count();
            if count < max_count {
                ranks.push(rank);
                visit(len, max_count, ranks, f);
                ranks.pop();
            }
        }
    }

    let mut ranks = Vec::with_capacity(len);
    visit(len, max_count, &mut ranks, &mut f);
}

#[cfg(test)]
mod tests {
    use super::*;
    use kicker_cards::parse_cards;

    #[test]
    fn masks_and_products() {
        let cards = parse_cards("7D AS 4D QH JC").unwrap();
        let mask = rank_mask(&cards);
        assert_eq!(mask.count_ones(), 5);
        assert_eq!(
            mask,
            Rank::Seven.bit()
                | Rank::Ace.bit()
                | Rank::Four.bit()
                | Rank::Queen.bit()
                | Rank::Jack.bit()
        );
        assert_eq!(prime_product(&cards), 13 * 41 * 5 * 31 * 29);

        let masks = suit_masks(&cards);
        assert_eq!(masks[Suit::Diamonds.index()], Rank::Seven.bit() | Rank::Four.bit());
        assert_eq!(masks[Suit::Spades.index()], Rank::Ace.bit());
        assert_eq!(masks[Suit::Hearts.index()], Rank::Queen.bit());
        assert_eq!(masks[Suit::Clubs.index()], Rank::Jack.bit());
    }

    #[test]
    fn repeated_ranks() {
        let cards = parse_cards("KC KD KH KS 2C").unwrap();
        assert_eq!(rank_mask(&cards), Rank::King.bit() | Rank::Deuce.bit());
        assert_eq!(prime_product(&cards), 37u64.pow(4) * 2);

        let counts = rank_counts(&cards);
        assert_eq!(counts[Rank::King.index()], 4);
        assert_eq!(counts[Rank::Deuce.index()], 1);
        assert_eq!(counts.iter().map(|&c| c as usize).sum::<usize>(), 5);

        let ranks = [Rank::King, Rank::King, Rank::King, Rank::King, Rank::Deuce];
        assert_eq!(ranks_product(&ranks), prime_product(&cards));
        assert_eq!(ranks_mask(&ranks), rank_mask(&cards));
    }

    #[test]
    fn prime_product_identifies_multisets() {
        let mut products = ahash::AHashMap::default();
        for_each_rank_multiset(5, 4, |ranks| {
            let prev = products.insert(ranks_product(ranks), ranks.to_vec());
            assert!(prev.is_none(), "collision for {ranks:?}");
        });

        // C(17, 5) multisets minus the 13 five of a kind.
        assert_eq!(products.len(), 6175);
    }

    #[test]
    fn suited() {
        assert!(is_suited(&parse_cards("2H 9H KH").unwrap()));
        assert!(!is_suited(&parse_cards("2H 9H KD").unwrap()));
        assert!(!is_suited(&[]));
    }

    #[test]
    fn multisets_order() {
        let mut all = Vec::new();
        for_each_rank_multiset(2, 2, |ranks| all.push(ranks.to_vec()));

        // 13 pairs plus 78 two distinct ranks.
        assert_eq!(all.len(), 91);
        assert_eq!(all[0], [Rank::Ace, Rank::Ace]);
        assert_eq!(all[1], [Rank::Ace, Rank::King]);
        assert_eq!(all[90], [Rank::Deuce, Rank::Deuce]);
        assert!(all.iter().all(|r| r[0] >= r[1]));

        let mut count = 0;
        for_each_rank_multiset(3, 1, |_| count += 1);
        assert_eq!(count, 286);
    }

    #[test]
    fn ranks_from_mask() {
        let mask = Rank::Ace.bit() | Rank::Deuce.bit() | Rank::Ten.bit();
        let ranks = mask_ranks(mask).collect::<Vec<_>>();
        assert_eq!(ranks, [Rank::Ace, Rank::Ten, Rank::Deuce]);
    }
}
