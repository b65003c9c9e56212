// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Evaluation facade.
use std::{cmp::Ordering, ptr};

use super::best::best_of_seven;
use crate::{
    Card, EvalError, HandInfo, HandRank, HandValue, PlayConfig, RankTable, RankTables, wild,
};

/// The result of a hand evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    value: HandValue,
    best: Vec<Card>,
    substitutions: Vec<(Card, Card)>,
}

impl Evaluation {
    pub(crate) fn new(value: HandValue, best: Vec<Card>, substitutions: Vec<(Card, Card)>) -> Self {
        Self {
            value,
            best,
            substitutions,
        }
    }

    /// The hand value.
    pub fn value(&self) -> HandValue {
        self.value
    }

    /// The hand category.
    pub fn rank(&self) -> HandRank {
        self.value.rank()
    }

    /// The cards that make the hand value, wild cards are replaced by the cards
    /// they stand for.
    pub fn best(&self) -> &[Card] {
        &self.best
    }

    /// The wild cards in the best hand paired with the cards they stand for, a
    /// wild card that plays as itself is not listed.
    pub fn substitutions(&self) -> &[(Card, Card)] {
        &self.substitutions
    }
}

/// Evaluates hands with a play configuration.
///
/// ```
/// # use kicker_eval::*;
/// let evaluator = Evaluator::shared(PlayConfig::default().with_wild_rank(Rank::Deuce));
/// let cards = parse_cards("AS AH AD AC 2C").unwrap();
/// assert_eq!(evaluator.evaluate(&cards).unwrap().rank(), HandRank::FiveOfAKind);
///
/// let info = evaluator.determine_hand(&parse_cards("KS QS JS TS 9S 2C 3D").unwrap()).unwrap();
/// assert!(info.is_straight_flush());
/// ```
#[derive(Debug, Clone)]
pub struct Evaluator<'a> {
    tables: &'a RankTables,
    config: PlayConfig,
}

impl Evaluator<'static> {
    /// Creates an evaluator that uses the process wide rank tables.
    pub fn shared(config: PlayConfig) -> Self {
        Self::new(RankTables::shared(), config)
    }
}

impl<'a> Evaluator<'a> {
    /// The hand sizes that can be evaluated.
    pub const HAND_SIZES: [usize; 5] = [2, 3, 4, 5, 7];

    /// Creates an evaluator.
    pub fn new(tables: &'a RankTables, config: PlayConfig) -> Self {
        Self { tables, config }
    }

    /// The rank tables.
    pub fn tables(&self) -> &'a RankTables {
        self.tables
    }

    /// The play configuration.
    pub fn config(&self) -> &PlayConfig {
        &self.config
    }

    /// Evaluates a hand.
    pub fn evaluate(&self, cards: &[Card]) -> Result<Evaluation, EvalError> {
        evaluate(self.tables, &self.config, cards)
    }

    /// Compares two hands, the stronger hand compares greater.
    ///
    /// Both hands must be ranked by the same table, a seven cards hand can be
    /// compared with a five cards hand.
    pub fn compare_hands(&self, a: &[Card], b: &[Card]) -> Result<Ordering, EvalError> {
        self.check_comparable(a.len(), b.len())?;
        let (va, vb) = (self.evaluate(a)?.value(), self.evaluate(b)?.value());
        Ok(va.cmp(&vb))
    }

    /// Checks that hands with `a` and `b` cards are ranked by the same table.
    pub fn check_comparable(&self, a: usize, b: usize) -> Result<(), EvalError> {
        if ptr::eq(self.table(a)?, self.table(b)?) {
            Ok(())
        } else {
            Err(EvalError::SizeMismatch(a, b))
        }
    }

    /// Classifies the best hand, for displaying the defining cards and kickers.
    pub fn determine_hand(&self, cards: &[Card]) -> Result<HandInfo, EvalError> {
        let evaluation = self.evaluate(cards)?;
        let counted = self.config.counts_straights_flushes(cards.len());
        Ok(HandInfo::classify(evaluation.best(), counted))
    }

    /// Checks if the best hand is a flush or a straight flush.
    pub fn is_flush(&self, cards: &[Card]) -> Result<bool, EvalError> {
        self.determine_hand(cards).map(|info| info.is_flush())
    }

    /// Checks if the best hand is a straight or a straight flush.
    pub fn is_straight(&self, cards: &[Card]) -> Result<bool, EvalError> {
        self.determine_hand(cards).map(|info| info.is_straight())
    }

    /// The table that ranks hands with `len` cards.
    pub fn table(&self, len: usize) -> Result<&'a RankTable, EvalError> {
        table(self.tables, &self.config, len)
    }
}

/// Evaluates a hand after checking it.
pub(crate) fn evaluate(
    tables: &RankTables,
    config: &PlayConfig,
    cards: &[Card],
) -> Result<Evaluation, EvalError> {
    validate(cards)?;

    let table = table(tables, config, cards.len())?;
    if cards.len() == 7 {
        let (_, hand) = if config.has_wilds() {
            best_of_seven(cards, |hand| wild::resolve(table, hand, config).value())
        } else {
            best_of_seven(cards, |hand| table.value(hand))
        };

        Ok(wild::resolve(table, &hand, config))
    } else {
        Ok(wild::resolve(table, cards, config))
    }
}

fn table<'a>(
    tables: &'a RankTables,
    config: &PlayConfig,
    len: usize,
) -> Result<&'a RankTable, EvalError> {
    if !Evaluator::HAND_SIZES.contains(&len) {
        return Err(EvalError::InvalidHandSize(len));
    }

    let counted = config.counts_straights_flushes(len);
    tables
        .table(len.min(PlayConfig::FULL_HAND), counted)
        .ok_or(EvalError::InvalidHandSize(len))
}

fn validate(cards: &[Card]) -> Result<(), EvalError> {
    if !Evaluator::HAND_SIZES.contains(&cards.len()) {
        return Err(EvalError::InvalidHandSize(cards.len()));
    }

    if cards.iter().any(|c| c.is_unknown()) {
        return Err(EvalError::UnknownCard);
    }

    for (idx, card) in cards.iter().enumerate() {
        if cards[..idx].contains(card) {
            return Err(EvalError::DuplicateCard(*card));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rank;
    use kicker_cards::{Deck, parse_cards};
    use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

    fn cards(s: &str) -> Vec<Card> {
        parse_cards(s).unwrap()
    }

    fn plain() -> Evaluator<'static> {
        Evaluator::shared(PlayConfig::default())
    }

    #[test]
    fn invalid_hands() {
        let evaluator = plain();
        assert_eq!(evaluator.evaluate(&[]), Err(EvalError::InvalidHandSize(0)));
        assert_eq!(
            evaluator.evaluate(&cards("AS")),
            Err(EvalError::InvalidHandSize(1))
        );
        assert_eq!(
            evaluator.evaluate(&cards("AS KS QS JS TS 9S")),
            Err(EvalError::InvalidHandSize(6))
        );
        assert_eq!(
            evaluator.evaluate(&cards("AS KS QS JS TS 9S 8S 7S")),
            Err(EvalError::InvalidHandSize(8))
        );

        let mut hand = cards("AS KS QS JS");
        hand.push(Card::UNKNOWN);
        assert_eq!(evaluator.evaluate(&hand), Err(EvalError::UnknownCard));

        let ks = Card::new(Rank::King, kicker_cards::Suit::Spades);
        assert_eq!(
            evaluator.evaluate(&cards("AS KS QS KS TS")),
            Err(EvalError::DuplicateCard(ks))
        );
    }

    #[test]
    fn five_cards_hands() {
        let evaluator = plain();
        let eval = evaluator.evaluate(&cards("7D AS 4D QH JC")).unwrap();
        assert_eq!(eval.rank(), HandRank::HighCard);
        assert_eq!(eval.best(), cards("7D AS 4D QH JC"));
        assert!(eval.substitutions().is_empty());

        let royal = evaluator.evaluate(&cards("TS JS QS KS AS")).unwrap();
        assert_eq!(royal.rank(), HandRank::StraightFlush);
        assert_eq!(royal.value().value(), 14);
    }

    #[test]
    fn seven_cards_hands() {
        let evaluator = plain();

        let eval = evaluator.evaluate(&cards("KC KD 2S 9H KH 4C KS")).unwrap();
        assert_eq!(eval.rank(), HandRank::FourOfAKind);
        assert_eq!(eval.best().len(), 5);

        let info = evaluator.determine_hand(&cards("KC KD 2S 9H KH 4C KS")).unwrap();
        assert_eq!(info.defining_ranks(), [Rank::King]);
        assert_eq!(info.kicker_ranks(), [Rank::Nine]);

        // The board plays.
        let a = cards("2C 3D AS KS QS JS TS");
        let b = cards("4C 5D AS KS QS JS TS");
        assert_eq!(evaluator.compare_hands(&a, &b), Ok(Ordering::Equal));
    }

    #[test]
    fn seven_cards_match_best_five() {
        let evaluator = plain();
        let mut rng = StdRng::seed_from_u64(7);
        let mut deck = Deck::default().into_iter().collect::<Vec<_>>();

        for _ in 0..200 {
            deck.shuffle(&mut rng);
            let seven = &deck[..7];
            let eval = evaluator.evaluate(seven).unwrap();

            let mut best = None::<HandValue>;
            Deck::from_cards(seven).for_each(5, |hand| {
                let value = evaluator.evaluate(hand).unwrap().value();
                best = best.max(Some(value));
            });

            assert_eq!(Some(eval.value()), best);
            assert_eq!(evaluator.evaluate(eval.best()).unwrap().value(), eval.value());
        }
    }

    #[test]
    fn compare_hands() {
        let evaluator = plain();
        let flush = cards("2H 5H 9H JH KH");
        let straight = cards("9C TD JH QS KC");
        assert_eq!(
            evaluator.compare_hands(&flush, &straight),
            Ok(Ordering::Greater)
        );
        assert_eq!(
            evaluator.compare_hands(&straight, &flush),
            Ok(Ordering::Less)
        );

        let seven = cards("2C 3D AS KS QS JS TS");
        assert_eq!(
            evaluator.compare_hands(&seven, &flush),
            Ok(Ordering::Greater)
        );

        assert_eq!(
            evaluator.compare_hands(&cards("AS AH"), &flush),
            Err(EvalError::SizeMismatch(2, 5))
        );
    }

    #[test]
    fn comparable_sizes() {
        let evaluator = plain();
        assert_eq!(evaluator.check_comparable(5, 7), Ok(()));
        assert_eq!(evaluator.check_comparable(3, 3), Ok(()));
        assert_eq!(
            evaluator.check_comparable(2, 5),
            Err(EvalError::SizeMismatch(2, 5))
        );
        assert_eq!(
            evaluator.check_comparable(5, 6),
            Err(EvalError::InvalidHandSize(6))
        );

        let five = evaluator.table(5).unwrap();
        assert!(ptr::eq(five, evaluator.table(7).unwrap()));
        assert_eq!(five.len(), 5);
        assert_eq!(evaluator.table(3).unwrap().len(), 3);
    }

    #[test]
    fn small_hands() {
        let plain = plain();
        let eval = plain.evaluate(&cards("2S 3S")).unwrap();
        assert_eq!(eval.rank(), HandRank::HighCard);
        assert!(!plain.is_straight(&cards("2S 3S")).unwrap());
        assert!(!plain.is_flush(&cards("2S 3S")).unwrap());

        let counted = Evaluator::shared(PlayConfig::default().with_small_straights_flushes(true));
        let eval = counted.evaluate(&cards("2S 3S")).unwrap();
        assert_eq!(eval.rank(), HandRank::StraightFlush);
        assert!(counted.is_straight(&cards("2S 3S")).unwrap());
        assert!(counted.is_flush(&cards("2S 3S")).unwrap());

        let flush = counted.evaluate(&cards("2S 7S 9S")).unwrap();
        let pair = counted.evaluate(&cards("AS AH KD")).unwrap();
        assert_eq!(flush.rank(), HandRank::Flush);
        assert!(flush.value() > pair.value());
        assert_eq!(plain.evaluate(&cards("2S 7S 9S")).unwrap().rank(), HandRank::HighCard);
    }

    #[test]
    fn four_of_a_kind_scenario() {
        let evaluator = plain();
        let info = evaluator.determine_hand(&cards("KC KS KH KD 5H")).unwrap();
        assert_eq!(info.category(), HandRank::FourOfAKind);
        assert_eq!(info.defining_ranks(), [Rank::King]);
        assert_eq!(info.kicker_ranks(), [Rank::Five]);
    }

    #[test]
    fn explicit_tables() {
        let tables = RankTables::build();
        let evaluator = Evaluator::new(&tables, PlayConfig::default());
        let a = evaluator.evaluate(&cards("AS AH AD KC KD")).unwrap();
        let b = plain().evaluate(&cards("AS AH AD KC KD")).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.rank(), HandRank::FullHouse);
    }
}
