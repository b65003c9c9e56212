// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Wild cards resolution.
//!
//! A wild card stands for any card, the resolver tries every multiset of ranks
//! for the wild cards in the hand, with the wild cards keeping their suits or
//! all taking the same suit to make a flush, and keeps the best hand.
use crate::{Card, Evaluation, PlayConfig, RankTable, Suit, codec};

/// Resolves the wild cards in a hand and returns the best hand they can make.
///
/// The hand must have the table size. The hand without substitutions is the
/// first candidate, then rank multisets are tried from the one with all aces
/// and for each multiset the natural suits before the suits from clubs to
/// spades. A candidate replaces the best hand only if it is strictly better so
/// the result is always the same for the same cards.
///
/// ```
/// # use kicker_eval::*;
/// let config = PlayConfig::default().with_wild(parse_cards("JD").unwrap()[0]);
/// let table = RankTables::shared().table(5, true).unwrap();
/// let eval = wild::resolve(table, &parse_cards("JD TS QS KS AS").unwrap(), &config);
/// assert_eq!(eval.rank(), HandRank::StraightFlush);
/// assert_eq!(eval.value().value(), 14);
/// ```
pub fn resolve(table: &RankTable, cards: &[Card], config: &PlayConfig) -> Evaluation {
    let natural = table.value(cards);
    let wilds = cards
        .iter()
        .enumerate()
        .filter(|(_, card)| config.is_wild(**card))
        .map(|(pos, _)| pos)
        .collect::<Vec<_>>();

    if wilds.is_empty() {
        return Evaluation::new(natural, cards.to_vec(), Vec::new());
    }

    // Wild cards may all take a suit only if that makes a flush possible.
    let mut suits = vec![None];
    if table.counts_straights_flushes() {
        let naturals = cards.iter().filter(|card| !config.is_wild(**card));
        suits.extend(
            Suit::suits()
                .filter(|&suit| naturals.clone().all(|card| card.suit() == suit))
                .map(Some),
        );
    }

    let mut hand = cards.to_vec();
    let mut best_value = natural;
    let mut best_hand = cards.to_vec();

    codec::for_each_rank_multiset(wilds.len(), wilds.len(), |ranks| {
        for suit in &suits {
            for (&pos, &rank) in wilds.iter().zip(ranks) {
                let suit = suit.unwrap_or_else(|| cards[pos].suit());
                hand[pos] = Card::new(rank, suit);
            }

            let value = table.value(&hand);
            if value > best_value {
                best_value = value;
                best_hand.copy_from_slice(&hand);
            }
        }
    });

    let substitutions = wilds
        .iter()
        .map(|&pos| (cards[pos], best_hand[pos]))
        .filter(|(wild, card)| wild != card)
        .collect();

    Evaluation::new(best_value, best_hand, substitutions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Evaluator, HandRank, Rank, RankTables};
    use kicker_cards::{Deck, parse_cards};
    use rand::{
        Rng, SeedableRng,
        rngs::StdRng,
        seq::{IndexedRandom, SliceRandom},
    };

    fn cards(s: &str) -> Vec<Card> {
        parse_cards(s).unwrap()
    }

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    fn deuces_wild() -> Evaluator<'static> {
        Evaluator::shared(PlayConfig::default().with_wild_rank(Rank::Deuce))
    }

    #[test]
    fn one_wild_deuce() {
        let evaluator = Evaluator::shared(PlayConfig::default().with_wild(card("2D")));
        let hand = cards("7H KH 4H 2C 2D");

        let eval = evaluator.evaluate(&hand).unwrap();
        assert_eq!(eval.rank(), HandRank::OnePair);
        assert_eq!(eval.substitutions(), [(card("2D"), card("KD"))]);

        let info = evaluator.determine_hand(&hand).unwrap();
        assert_eq!(info.defining_ranks(), [Rank::King]);
        assert_eq!(info.kicker_ranks(), [Rank::Seven, Rank::Four, Rank::Deuce]);
    }

    #[test]
    fn all_deuces_wild() {
        let evaluator = deuces_wild();
        let hand = cards("7H KH 4H 2C 2D");

        // Both deuces take hearts and make an ace high flush.
        let eval = evaluator.evaluate(&hand).unwrap();
        assert_eq!(eval.rank(), HandRank::Flush);
        assert_eq!(
            eval.substitutions(),
            [(card("2C"), card("AH")), (card("2D"), card("QH"))]
        );

        let info = evaluator.determine_hand(&hand).unwrap();
        assert_eq!(info.defining_ranks(), [Rank::Ace]);
        assert_eq!(
            info.kicker_ranks(),
            [Rank::King, Rank::Queen, Rank::Seven, Rank::Four]
        );
    }

    #[test]
    fn five_of_a_kind() {
        let evaluator = deuces_wild();

        let aces = evaluator.evaluate(&cards("AS AH AD AC 2C")).unwrap();
        assert_eq!(aces.rank(), HandRank::FiveOfAKind);
        assert_eq!(aces.value().value(), 1);

        // Four wild deuces and a trey.
        let treys = evaluator.evaluate(&cards("2C 2D 2H 2S 3C")).unwrap();
        assert_eq!(treys.rank(), HandRank::FiveOfAKind);
        assert_eq!(treys.value().value(), 12);
        assert!(aces.value() > treys.value());

        // Five of a kind beats a royal flush.
        let royal = evaluator.evaluate(&cards("AS KS QS JS TS")).unwrap();
        assert!(treys.value() > royal.value());
    }

    #[test]
    fn wild_straight_flush() {
        let evaluator = deuces_wild();
        let eval = evaluator.evaluate(&cards("9S TS 2H JS KS")).unwrap();
        assert_eq!(eval.rank(), HandRank::StraightFlush);
        assert_eq!(eval.substitutions(), [(card("2H"), card("QS"))]);

        // Without a common suit the wild card makes a straight.
        let eval = evaluator.evaluate(&cards("9S TD 2H JS KS")).unwrap();
        assert_eq!(eval.rank(), HandRank::Straight);
    }

    #[test]
    fn small_hands() {
        let table = |counted| RankTables::shared().table(2, counted).unwrap();
        let config = PlayConfig::default().with_wild_rank(Rank::Deuce);

        let eval = resolve(table(false), &cards("AS 2C"), &config);
        assert_eq!(eval.rank(), HandRank::OnePair);
        assert_eq!(eval.best(), cards("AS AC"));

        let eval = resolve(table(true), &cards("AS 2C"), &config);
        assert_eq!(eval.rank(), HandRank::StraightFlush);
        assert_eq!(eval.best(), cards("AS KS"));
    }

    #[test]
    fn seven_cards_with_wilds() {
        let evaluator = deuces_wild();
        let eval = evaluator.evaluate(&cards("AS AH 2C 7D 9C JH 3S")).unwrap();
        assert_eq!(eval.rank(), HandRank::ThreeOfAKind);
        assert_eq!(eval.best().len(), 5);
        assert_eq!(eval.substitutions().len(), 1);

        let eval = evaluator.evaluate(&cards("AS AH 2C 2D 2S KD KC")).unwrap();
        assert_eq!(eval.rank(), HandRank::FiveOfAKind);
    }

    #[test]
    fn deterministic_resolution() {
        let evaluator = deuces_wild();
        let hand = cards("2C 2D 2H 5S 9H");
        let first = evaluator.evaluate(&hand).unwrap();
        for _ in 0..3 {
            assert_eq!(evaluator.evaluate(&hand).unwrap(), first);
        }

        // The same wild cards in a different order give the same configuration.
        let other = Evaluator::shared(PlayConfig::default().with_wilds(cards("2S 2H 2D 2C")));
        assert_eq!(other.evaluate(&hand).unwrap(), first);
    }

    #[test]
    fn never_worse_than_natural() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut deck = Deck::default().into_iter().collect::<Vec<_>>();

        for _ in 0..500 {
            let rank = Rank::from_index(rng.random_range(0..13)).unwrap();
            let counted = rng.random_bool(0.5);
            let config = PlayConfig::default()
                .with_wild_rank(rank)
                .with_small_straights_flushes(counted);
            let wild = Evaluator::shared(config);
            let plain =
                Evaluator::shared(PlayConfig::default().with_small_straights_flushes(counted));

            deck.shuffle(&mut rng);
            let len = *Evaluator::HAND_SIZES.choose(&mut rng).unwrap();
            let hand = &deck[..len];

            let natural = plain.evaluate(hand).unwrap();
            let resolved = wild.evaluate(hand).unwrap();
            assert!(resolved.value() >= natural.value(), "{hand:?}");
            assert_eq!(wild.evaluate(hand).unwrap(), resolved);

            if !hand.iter().any(|c| c.rank() == rank) {
                assert_eq!(resolved, natural);
            }
        }
    }
}
