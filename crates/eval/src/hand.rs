// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! A hand that caches its evaluation.
use std::{cell::OnceCell, cmp::Ordering};

use crate::{Card, EvalError, Evaluation, HandValue, PlayConfig, RankTables, eval};

/// A player hand.
///
/// The hand evaluation is computed on first use and cached until the cards or
/// the play configuration change.
///
/// ```
/// # use kicker_eval::*;
/// let mut hand = Hand::new(parse_cards("AS KS").unwrap(), PlayConfig::default());
/// assert_eq!(hand.value(), Ok(HandValue::eval(hand.cards()).unwrap()));
///
/// hand.push(parse_cards("QS").unwrap()[0]);
/// assert!(!hand.is_evaluated());
/// assert_eq!(hand.evaluation().unwrap().rank(), HandRank::HighCard);
/// ```
#[derive(Debug, Clone)]
pub struct Hand<'a> {
    tables: &'a RankTables,
    cards: Vec<Card>,
    config: PlayConfig,
    evaluation: OnceCell<Result<Evaluation, EvalError>>,
}

impl Hand<'static> {
    /// Creates a hand ranked by the process wide tables.
    pub fn new(cards: Vec<Card>, config: PlayConfig) -> Self {
        Self::with_tables(RankTables::shared(), cards, config)
    }
}

impl Default for Hand<'static> {
    fn default() -> Self {
        Self::new(Vec::new(), PlayConfig::default())
    }
}

impl<'a> Hand<'a> {
    /// Creates a hand ranked by the given tables.
    pub fn with_tables(tables: &'a RankTables, cards: Vec<Card>, config: PlayConfig) -> Self {
        Self {
            tables,
            cards,
            config,
            evaluation: OnceCell::new(),
        }
    }

    /// The tables that rank this hand.
    pub fn tables(&self) -> &'a RankTables {
        self.tables
    }

    /// The hand cards.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The hand play configuration.
    pub fn config(&self) -> &PlayConfig {
        &self.config
    }

    /// Adds a card to the hand.
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
        self.evaluation.take();
    }

    /// Replaces the hand cards.
    pub fn set_cards(&mut self, cards: Vec<Card>) {
        self.cards = cards;
        self.evaluation.take();
    }

    /// Replaces the play configuration.
    pub fn set_config(&mut self, config: PlayConfig) {
        self.config = config;
        self.evaluation.take();
    }

    /// Removes all the cards.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.evaluation.take();
    }

    /// Checks if the evaluation is cached.
    pub fn is_evaluated(&self) -> bool {
        self.evaluation.get().is_some()
    }

    /// The hand evaluation.
    pub fn evaluation(&self) -> Result<&Evaluation, EvalError> {
        self.evaluation
            .get_or_init(|| eval::evaluate(self.tables, &self.config, &self.cards))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// The hand value.
    pub fn value(&self) -> Result<HandValue, EvalError> {
        self.evaluation().map(Evaluation::value)
    }

    /// Compares this hand with another hand, the stronger hand compares greater.
    pub fn compare(&self, other: &Hand<'_>) -> Result<Ordering, EvalError> {
        let counted = |hand: &Hand<'_>| hand.config.counts_straights_flushes(hand.cards.len());
        let (a, b) = (self.cards.len(), other.cards.len());
        if a.min(PlayConfig::FULL_HAND) != b.min(PlayConfig::FULL_HAND)
            || counted(self) != counted(other)
        {
            return Err(EvalError::SizeMismatch(a, b));
        }

        Ok(self.value()?.cmp(&other.value()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HandRank, Rank, RankTable};
    use kicker_cards::parse_cards;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn cached_evaluation() {
        let mut hand = Hand::new(parse_cards("AS AH KD").unwrap(), PlayConfig::default());
        assert!(!hand.is_evaluated());

        let value = hand.value().unwrap();
        assert!(hand.is_evaluated());
        assert_eq!(value.rank(), HandRank::OnePair);
        assert_eq!(hand.value().unwrap(), value);

        hand.push(card("KC"));
        assert!(!hand.is_evaluated());
        assert_eq!(hand.value().unwrap().rank(), HandRank::TwoPair);

        hand.set_config(PlayConfig::default().with_wild_rank(Rank::King));
        assert!(!hand.is_evaluated());
        assert_eq!(hand.value().unwrap().rank(), HandRank::FourOfAKind);

        hand.clear();
        assert!(hand.cards().is_empty());
        assert_eq!(hand.value(), Err(EvalError::InvalidHandSize(0)));
        assert!(hand.is_evaluated());

        hand.set_cards(parse_cards("2C 3C").unwrap());
        assert_eq!(hand.value().unwrap().rank(), HandRank::HighCard);
    }

    #[test]
    fn compare_hands() {
        let config = PlayConfig::default();
        let flush = Hand::new(parse_cards("2H 5H 9H JH KH").unwrap(), config.clone());
        let quads = Hand::new(parse_cards("2C 2D 2H 2S 7C 8D 9S").unwrap(), config.clone());
        assert_eq!(flush.compare(&quads), Ok(Ordering::Less));
        assert_eq!(quads.compare(&flush), Ok(Ordering::Greater));
        assert_eq!(flush.compare(&flush), Ok(Ordering::Equal));

        let small = Hand::new(parse_cards("AS AH").unwrap(), config);
        assert_eq!(
            small.compare(&flush),
            Err(EvalError::SizeMismatch(2, 5))
        );
    }

    #[test]
    fn evaluation_uses_hand_tables() {
        let small = [RankTable::build(3, false)]
            .into_iter()
            .collect::<RankTables>();
        let cards = parse_cards("AS AH KD").unwrap();
        let five = parse_cards("AS AH KD KC 2S").unwrap();
        let config = PlayConfig::default();

        let hand = Hand::with_tables(&small, cards.clone(), config.clone());
        assert!(std::ptr::eq(hand.tables(), &small));
        assert_eq!(hand.value().unwrap().rank(), HandRank::OnePair);

        // A five cards hand has no table in the small set.
        let mut hand = Hand::with_tables(&small, five.clone(), config);
        assert_eq!(hand.value(), Err(EvalError::InvalidHandSize(5)));
        hand.set_cards(cards.clone());
        assert_eq!(hand.value().unwrap().rank(), HandRank::OnePair);

        // The shared tables rank the five cards hand.
        let shared = Hand::new(five, PlayConfig::default());
        assert!(std::ptr::eq(shared.tables(), RankTables::shared()));
        assert_eq!(shared.value().unwrap().rank(), HandRank::TwoPair);

        let other = Hand::with_tables(RankTables::shared(), cards, PlayConfig::default());
        assert_eq!(hand.compare(&other), Ok(Ordering::Equal));
        assert!(Hand::default().value().is_err());
    }
}
