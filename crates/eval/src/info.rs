// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand classification.
//!
//! [HandInfo] classifies up to five cards, splitting them into the cards that
//! define the hand category (the paired ranks, the straight) and the kickers
//! used to break ties. It is the reference ordering the rank tables are built
//! from, the tables then rank hands with a couple of lookups.
use std::{cmp::Ordering, fmt};

use crate::{Card, HandRank, Rank, StraightType, codec};

/// A classified hand.
///
/// ```
/// # use kicker_eval::*;
/// let cards = parse_cards("7D AS 4D QH JC").unwrap();
/// let info = HandInfo::classify(&cards, true);
/// assert_eq!(info.category(), HandRank::HighCard);
/// assert_eq!(info.defining_ranks(), [Rank::Ace]);
/// assert_eq!(info.kicker_ranks(), [Rank::Queen, Rank::Jack, Rank::Seven, Rank::Four]);
/// ```
#[derive(Debug, Clone)]
pub struct HandInfo {
    cards: Vec<Card>,
    /// Ranks from the highest to the lowest.
    ranks: Vec<Rank>,
    /// Ranks sorted by multiplicity and then by rank.
    grouped: Vec<Rank>,
    counted: bool,
    flush: bool,
    straight: Option<StraightType>,
    five_of_a_kind: bool,
    four_of_a_kind: bool,
    full_house: bool,
    three_of_a_kind: bool,
    two_pair: bool,
    pair: bool,
    defining: Vec<Card>,
    kickers: Vec<Card>,
}

impl HandInfo {
    /// Classifies a hand with up to five cards.
    ///
    /// The cards are the cards that make the hand after any wild card has been
    /// replaced, so a (rank, suit) may appear more than once. When `counted` is
    /// false straights and flushes are ignored, this is used for hands with less
    /// than five cards in games that don't count them.
    pub fn classify(cards: &[Card], counted: bool) -> HandInfo {
        debug_assert!(cards.len() <= StraightType::MAX_LEN, "{} cards", cards.len());
        assert!(
            cards.iter().all(|c| !c.is_unknown()),
            "cannot classify an unknown card"
        );

        let counts = codec::rank_counts(cards);
        let mut multiplicities = counts.iter().filter(|&&c| c > 0).copied().collect::<Vec<_>>();
        multiplicities.sort_unstable_by(|a, b| b.cmp(a));

        let five_of_a_kind = multiplicities.first() == Some(&5);
        let four_of_a_kind = multiplicities.first() == Some(&4);
        let full_house = multiplicities.starts_with(&[3, 2]);
        let three_of_a_kind = multiplicities.first() == Some(&3) && !full_house;
        let pairs = multiplicities.iter().filter(|&&c| c == 2).count();
        let two_pair = pairs == 2;
        let pair = pairs == 1 && !full_house;

        // Flushes and straights need distinct ranks, wild cards can repeat a card.
        let mask = codec::rank_mask(cards);
        let distinct = mask.count_ones() as usize == cards.len();
        let flush = distinct && cards.len() > 1 && codec::is_suited(cards);
        let straight = if distinct {
            StraightType::detect(mask, cards.len())
        } else {
            None
        };

        let mut sorted = cards.to_vec();
        sorted.sort_by(|a, b| {
            let (ra, rb) = (a.rank(), b.rank());
            counts[rb.index()]
                .cmp(&counts[ra.index()])
                .then(rb.cmp(&ra))
                .then(a.suit().index().cmp(&b.suit().index()))
        });

        let grouped = sorted.iter().map(Card::rank).collect::<Vec<_>>();
        let mut ranks = grouped.clone();
        ranks.sort_unstable_by(|a, b| b.cmp(a));

        let mut info = HandInfo {
            cards: cards.to_vec(),
            ranks,
            grouped,
            counted,
            flush,
            straight,
            five_of_a_kind,
            four_of_a_kind,
            full_house,
            three_of_a_kind,
            two_pair,
            pair,
            defining: Vec::new(),
            kickers: Vec::new(),
        };

        (info.defining, info.kickers) = info.partition(sorted);
        info
    }

    /// Splits the cards sorted by multiplicity into defining cards and kickers.
    fn partition(&self, mut sorted: Vec<Card>) -> (Vec<Card>, Vec<Card>) {
        if let Some(straight) = self.straight() {
            // Order the cards as the straight ranks, the wheel ace goes last.
            let order = straight.ranks(sorted.len());
            sorted.sort_by_key(|c| order.iter().position(|&r| r == c.rank()));
            return (sorted, Vec::new());
        }

        let counts = codec::rank_counts(&sorted);
        let repeated = sorted
            .iter()
            .take_while(|c| counts[c.rank().index()] > 1)
            .count();

        // With no repeated rank the highest card defines the hand.
        let split = repeated.max(sorted.len().min(1));
        let kickers = sorted.split_off(split);
        (sorted, kickers)
    }

    /// The classified cards.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The cards ranks from the highest to the lowest.
    pub fn ranks(&self) -> &[Rank] {
        &self.ranks
    }

    /// Checks if straights and flushes count for this hand.
    pub fn counts_straights_flushes(&self) -> bool {
        self.counted
    }

    /// The hand category.
    pub fn category(&self) -> HandRank {
        self.category_with(self.counted)
    }

    /// The hand category when straights and flushes are `counted` or not.
    pub fn category_with(&self, counted: bool) -> HandRank {
        let straight = counted && self.straight.is_some();
        let flush = counted && self.flush;

        if self.five_of_a_kind {
            HandRank::FiveOfAKind
        } else if straight && flush {
            HandRank::StraightFlush
        } else if self.four_of_a_kind {
            HandRank::FourOfAKind
        } else if self.full_house {
            HandRank::FullHouse
        } else if flush {
            HandRank::Flush
        } else if straight {
            HandRank::Straight
        } else if self.three_of_a_kind {
            HandRank::ThreeOfAKind
        } else if self.two_pair {
            HandRank::TwoPair
        } else if self.pair {
            HandRank::OnePair
        } else {
            HandRank::HighCard
        }
    }

    /// The straight type if the hand is a counted straight.
    pub fn straight(&self) -> Option<StraightType> {
        self.straight.filter(|_| self.counted)
    }

    /// Checks if the hand is a counted flush, including straight flushes.
    pub fn is_flush(&self) -> bool {
        self.counted && self.flush
    }

    /// Checks if the hand is a counted straight, including straight flushes.
    pub fn is_straight(&self) -> bool {
        self.straight().is_some()
    }

    /// Checks if the hand is a counted straight flush.
    pub fn is_straight_flush(&self) -> bool {
        self.is_straight() && self.is_flush()
    }

    /// Checks if the hand has exactly one pair and no other repeated rank.
    pub fn is_pair(&self) -> bool {
        self.pair
    }

    /// Checks if the hand has two pairs.
    pub fn is_two_pair(&self) -> bool {
        self.two_pair
    }

    /// Checks if the hand has three cards of a rank and no pair.
    pub fn is_three_of_a_kind(&self) -> bool {
        self.three_of_a_kind
    }

    /// Checks if the hand is a full house.
    pub fn is_full_house(&self) -> bool {
        self.full_house
    }

    /// Checks if the hand has four cards of a rank.
    pub fn is_four_of_a_kind(&self) -> bool {
        self.four_of_a_kind
    }

    /// Checks if the hand has five cards of a rank.
    pub fn is_five_of_a_kind(&self) -> bool {
        self.five_of_a_kind
    }

    /// The cards that define the hand category, from the most significant.
    pub fn defining(&self) -> &[Card] {
        &self.defining
    }

    /// The cards not part of the hand category, from the highest.
    pub fn kickers(&self) -> &[Card] {
        &self.kickers
    }

    /// The distinct ranks of the defining cards, from the most significant.
    ///
    /// For a full house this is the rank of the three cards and then the rank of
    /// the pair, for a straight all its ranks.
    pub fn defining_ranks(&self) -> Vec<Rank> {
        let mut ranks = self.defining.iter().map(Card::rank).collect::<Vec<_>>();
        ranks.dedup();
        ranks
    }

    /// The kickers ranks from the highest to the lowest.
    pub fn kicker_ranks(&self) -> Vec<Rank> {
        self.kickers.iter().map(Card::rank).collect()
    }

    /// Compares two hands with the same number of cards.
    ///
    /// The hand with the better category wins, straights and straight flushes are
    /// compared by their [StraightType], any other hand compares the defining
    /// ranks and then the kickers ranks.
    pub fn compare(&self, other: &HandInfo, counted: bool) -> Ordering {
        let category = self.category_with(counted);
        category
            .cmp(&other.category_with(counted))
            .then_with(|| match category {
                HandRank::Straight | HandRank::StraightFlush => {
                    self.straight.cmp(&other.straight)
                }
                _ => self.grouped.cmp(&other.grouped),
            })
    }

    /// Checks if this hand is weaker than the other hand.
    pub fn less_than(&self, other: &HandInfo, counted: bool) -> bool {
        self.compare(other, counted) == Ordering::Less
    }

    /// Checks if this hand is stronger than the other hand.
    pub fn greater_than(&self, other: &HandInfo, counted: bool) -> bool {
        self.compare(other, counted) == Ordering::Greater
    }

    /// Checks if the two hands tie.
    pub fn equal_to(&self, other: &HandInfo, counted: bool) -> bool {
        self.compare(other, counted) == Ordering::Equal
    }
}

impl fmt::Display for HandInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |cards: &[Card]| {
            cards
                .iter()
                .map(Card::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        };

        write!(f, "{}: {}", self.category(), join(&self.defining))?;
        if !self.kickers.is_empty() {
            write!(f, " + {}", join(&self.kickers))?;
        }

        Ok(())
    }
}

/// Compares two classified hands.
pub fn compare(a: &HandInfo, b: &HandInfo, counted: bool) -> Ordering {
    a.compare(b, counted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kicker_cards::parse_cards;
    use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

    fn classify(s: &str) -> HandInfo {
        HandInfo::classify(&parse_cards(s).unwrap(), true)
    }

    #[test]
    fn high_card() {
        let info = classify("7D AS 4D QH JC");
        assert_eq!(info.category(), HandRank::HighCard);
        assert_eq!(info.defining_ranks(), [Rank::Ace]);
        assert_eq!(
            info.kicker_ranks(),
            [Rank::Queen, Rank::Jack, Rank::Seven, Rank::Four]
        );
        assert_eq!(
            info.ranks(),
            [Rank::Ace, Rank::Queen, Rank::Jack, Rank::Seven, Rank::Four]
        );
        assert!(!info.is_flush());
        assert!(!info.is_straight());
    }

    #[test]
    fn four_of_a_kind() {
        for fifth in ["2C", "AH", "QS"] {
            let info = classify(&format!("KC KS KH KD {fifth}"));
            let kicker = fifth.parse::<Card>().unwrap().rank();
            assert_eq!(info.category(), HandRank::FourOfAKind);
            assert!(info.is_four_of_a_kind());
            assert_eq!(info.defining_ranks(), [Rank::King]);
            assert_eq!(info.defining().len(), 4);
            assert_eq!(info.kicker_ranks(), [kicker]);
        }
    }

    #[test]
    fn two_cards_straight_flush() {
        let cards = parse_cards("2S 3S").unwrap();

        let info = HandInfo::classify(&cards, true);
        assert_eq!(info.category(), HandRank::StraightFlush);
        assert_eq!(info.straight(), Some(StraightType::High(Rank::Trey)));
        assert!(info.kicker_ranks().is_empty());

        let info = HandInfo::classify(&cards, false);
        assert_eq!(info.category(), HandRank::HighCard);
        assert_eq!(info.straight(), None);
        assert!(!info.is_flush());
        assert_eq!(info.defining_ranks(), [Rank::Trey]);
        assert_eq!(info.kicker_ranks(), [Rank::Deuce]);
    }

    #[test]
    fn full_house() {
        let info = classify("3C 3D KS 3H KC");
        assert_eq!(info.category(), HandRank::FullHouse);
        assert!(info.is_full_house());
        assert!(!info.is_three_of_a_kind());
        assert!(!info.is_pair());
        assert_eq!(info.defining_ranks(), [Rank::Trey, Rank::King]);
        assert!(info.kickers().is_empty());

        // Trips decide over the pair.
        let other = classify("4C 4D 2S 4H 2C");
        assert!(info.less_than(&other, true));
        assert!(other.greater_than(&info, true));
    }

    #[test]
    fn full_house_uses_full_house_flags() {
        // Trips against a full house with lower trips, the full house wins.
        let trips = classify("AC AD AH KS QC");
        let full = classify("2C 2D 2H 3S 3C");
        assert!(trips.less_than(&full, true));
        assert!(trips.less_than(&full, false));
    }

    #[test]
    fn pairs() {
        let info = classify("9C 9D 5S 5H AC");
        assert_eq!(info.category(), HandRank::TwoPair);
        assert_eq!(info.defining_ranks(), [Rank::Nine, Rank::Five]);
        assert_eq!(info.kicker_ranks(), [Rank::Ace]);

        let info = classify("9C 9D 5S 4H AC");
        assert_eq!(info.category(), HandRank::OnePair);
        assert!(info.is_pair());
        assert_eq!(info.defining_ranks(), [Rank::Nine]);
        assert_eq!(info.kicker_ranks(), [Rank::Ace, Rank::Five, Rank::Four]);

        let info = classify("9C 9D 9S 4H AC");
        assert_eq!(info.category(), HandRank::ThreeOfAKind);
        assert_eq!(info.kicker_ranks(), [Rank::Ace, Rank::Four]);
    }

    #[test]
    fn wheel_is_lowest_straight() {
        let wheel = classify("AC 2D 3S 4H 5C");
        let six = classify("2C 3D 4S 5H 6C");
        let broadway = classify("TC JD QS KH AC");

        assert_eq!(wheel.category(), HandRank::Straight);
        assert_eq!(wheel.straight(), Some(StraightType::Wheel));
        assert_eq!(
            wheel.defining_ranks(),
            [Rank::Five, Rank::Four, Rank::Trey, Rank::Deuce, Rank::Ace]
        );
        assert!(wheel.less_than(&six, true));
        assert!(six.less_than(&broadway, true));

        // Without straights the wheel is an ace high.
        assert!(six.less_than(&wheel, false));
        assert_eq!(wheel.category_with(false), HandRank::HighCard);
    }

    #[test]
    fn flush_beats_straight() {
        let flush = classify("2H 4H 6H 8H TH");
        let straight = classify("TC JD QS KH AC");
        assert_eq!(flush.category(), HandRank::Flush);
        assert!(flush.greater_than(&straight, true));
        assert!(flush.less_than(&straight, false));
    }

    #[test]
    fn small_hands() {
        let info = HandInfo::classify(&parse_cards("QH QS").unwrap(), false);
        assert_eq!(info.category(), HandRank::OnePair);
        assert!(info.kicker_ranks().is_empty());

        let info = HandInfo::classify(&parse_cards("5H 5S 5D").unwrap(), true);
        assert_eq!(info.category(), HandRank::ThreeOfAKind);

        let info = HandInfo::classify(&parse_cards("5H 5S 8D 8C").unwrap(), true);
        assert_eq!(info.category(), HandRank::TwoPair);

        let info = HandInfo::classify(&parse_cards("AH 2H 3H").unwrap(), true);
        assert_eq!(info.category(), HandRank::StraightFlush);
        assert_eq!(info.straight(), Some(StraightType::Wheel));

        let info = HandInfo::classify(&parse_cards("AH 9H 3H 4H").unwrap(), true);
        assert_eq!(info.category(), HandRank::Flush);
        assert_eq!(info.defining_ranks(), [Rank::Ace]);
    }

    #[test]
    fn five_of_a_kind() {
        // A wild card can repeat a card.
        let info = classify("AC AD AH AS AS");
        assert_eq!(info.category(), HandRank::FiveOfAKind);
        assert_eq!(info.defining_ranks(), [Rank::Ace]);

        let royal = classify("TC JC QC KC AC");
        assert_eq!(royal.category(), HandRank::StraightFlush);
        assert!(info.greater_than(&royal, true));
    }

    #[test]
    fn repeated_card_flush_is_not_a_flush() {
        let info = classify("AH AH KH QH JH");
        assert_eq!(info.category(), HandRank::OnePair);
        assert!(!info.is_flush());
    }

    #[test]
    fn defining_and_kickers_preserve_cards() {
        let mut rng = StdRng::seed_from_u64(101);
        let mut deck = kicker_cards::Deck::default().into_iter().collect::<Vec<_>>();

        for _ in 0..1000 {
            deck.shuffle(&mut rng);
            let info = HandInfo::classify(&deck[..5], true);

            let mut all = info.defining().to_vec();
            all.extend_from_slice(info.kickers());
            all.sort();

            let mut cards = deck[..5].to_vec();
            cards.sort();
            assert_eq!(all, cards);

            let kickers = info.kicker_ranks();
            assert!(kickers.windows(2).all(|w| w[0] >= w[1]));
        }
    }

    #[test]
    fn ordering_is_consistent() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut deck = kicker_cards::Deck::default().into_iter().collect::<Vec<_>>();

        let hands = (0..60)
            .map(|_| {
                deck.shuffle(&mut rng);
                HandInfo::classify(&deck[..5], true)
            })
            .collect::<Vec<_>>();

        for a in &hands {
            assert!(a.equal_to(a, true));
            for b in &hands {
                let ab = a.compare(b, true);
                assert_eq!(ab, b.compare(a, true).reverse());
                assert!(!(a.less_than(b, true) && a.equal_to(b, true)));

                for c in &hands {
                    if a.less_than(b, true) && b.less_than(c, true) {
                        assert!(a.less_than(c, true));
                    }
                }
            }
        }
    }

    #[test]
    fn display() {
        let info = classify("9C 9D 5S 4H AC");
        assert_eq!(info.to_string(), "One Pair: 9C 9D + AC 5S 4H");
    }
}
