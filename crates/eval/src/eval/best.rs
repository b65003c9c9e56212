// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Best five cards out of seven.
use crate::{Card, HandValue};

const SUBSETS_COUNT: usize = 21;

/// Cards indices for each five cards subset of seven cards.
const SUBSETS: [[usize; 5]; SUBSETS_COUNT] = make_subsets();

const fn make_subsets() -> [[usize; 5]; SUBSETS_COUNT] {
    let mut subsets = [[0; 5]; SUBSETS_COUNT];
    let mut n = 0;

    // Each subset leaves out the cards at i and j.
    let mut i = 0;
    while i < 7 {
        let mut j = i + 1;
        while j < 7 {
            let mut k = 0;
            let mut m = 0;
            while k < 7 {
                if k != i && k != j {
                    subsets[n][m] = k;
                    m += 1;
                }
                k += 1;
            }

            n += 1;
            j += 1;
        }

        i += 1;
    }

    subsets
}

/// Returns the best value and the best five cards of a seven cards hand.
///
/// Subsets that tie with the incumbent don't replace it so the result is
/// deterministic.
pub(crate) fn best_of_seven<F>(cards: &[Card], mut value: F) -> (HandValue, [Card; 5])
where
    F: FnMut(&[Card]) -> HandValue,
{
    debug_assert_eq!(cards.len(), 7);

    let mut best_hand = SUBSETS[0].map(|idx| cards[idx]);
    let mut best_value = value(&best_hand);

    for subset in &SUBSETS[1..] {
        let hand = subset.map(|idx| cards[idx]);
        let hand_value = value(&hand);
        if hand_value > best_value {
            best_value = hand_value;
            best_hand = hand;
        }
    }

    (best_value, best_hand)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HandRank, RankTables};
    use kicker_cards::parse_cards;

    #[test]
    fn seven_cards_subsets() {
        let mut seen = ahash::AHashSet::default();
        for subset in SUBSETS {
            assert!(subset.windows(2).all(|w| w[0] < w[1]));
            assert!(subset.iter().all(|&idx| idx < 7));
            assert!(seen.insert(subset));
        }

        assert_eq!(seen.len(), 21);
        assert_eq!(SUBSETS[0], [2, 3, 4, 5, 6]);
        assert_eq!(SUBSETS[20], [0, 1, 2, 3, 4]);
    }

    #[test]
    fn best_five_cards() {
        let table = RankTables::shared().table(5, true).unwrap();
        let cards = parse_cards("3D AS KS 3C 2S 7S 9S").unwrap();

        let (value, hand) = best_of_seven(&cards, |h| table.value(h));
        assert_eq!(value.rank(), HandRank::Flush);

        let mut hand = hand.to_vec();
        hand.sort_by_key(|c| std::cmp::Reverse(c.rank()));
        assert_eq!(hand, parse_cards("AS KS 9S 7S 2S").unwrap());
    }
}
