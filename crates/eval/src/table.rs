// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Rank tables.
//!
//! A [RankTable] assigns a dense rank to every distinct hand of a given size,
//! where rank 1 is the best hand. This is the [Cactus Kev's][kevlink] scheme
//! generalized to 2, 3, 4, and 5 cards hands:
//!
//! - hands without repeated ranks are looked up by their rank mask in two 8192
//!   entries arrays, one for suited hands (flushes and straight flushes) and one
//!   for the other hands (straights and high cards).
//! - hands with repeated ranks are looked up by the product of their rank primes
//!   in a hash map.
//!
//! Tables are generated by enumerating every rank multiset of the hand size, plus
//! every set of distinct ranks as a suited hand, ranking them with [HandInfo] and
//! assigning ranks in order, hands that tie get the same rank.
//!
//! [kevlink]: http://suffe.cool/poker/evaluator.html
use ahash::AHashMap;
use log::{debug, info};
use std::{fmt, sync::LazyLock, time::Instant};
use xxhash_rust::xxh3::Xxh3;

use crate::{
    Card, HandInfo, HandRank, HandValue, Rank, Suit,
    codec::{self, MASK_TABLE_SIZE},
};

/// Suits used to build representative cards for a multiset of ranks, a
/// rotation that never gives the same suit to two consecutive cards.
const ROTATION: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

/// Where a hand is stored in a table.
#[derive(Debug, Clone, Copy)]
enum Signature {
    Flush(u16),
    Unique(u16),
    Product(u64),
}

/// A class of hands that tie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandClass {
    rank: HandRank,
    ranks: Vec<Rank>,
}

impl HandClass {
    /// The category of the hands in this class.
    pub fn rank(&self) -> HandRank {
        self.rank
    }

    /// The ranks of a hand in this class from the most significant.
    pub fn ranks(&self) -> &[Rank] {
        &self.ranks
    }
}

impl fmt::Display for HandClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rank)?;
        for rank in &self.ranks {
            write!(f, " {rank}")?;
        }

        Ok(())
    }
}

/// The rank table for hands of a given size.
#[derive(Clone)]
pub struct RankTable {
    len: usize,
    counted: bool,
    flushes: Box<[u16]>,
    unique: Box<[u16]>,
    products: AHashMap<u64, u16>,
    classes: Vec<HandClass>,
}

impl RankTable {
    /// The hand sizes that have a table, larger hands use the five cards table.
    pub const SIZES: [usize; 4] = [2, 3, 4, 5];

    /// Builds the table for hands with `len` cards.
    ///
    /// When `counted` is false straights and flushes are ranked as high cards.
    /// The five cards table includes the five of a kind hands made with wild
    /// cards, they take the 13 best ranks.
    ///
    /// Panics if `len` is not one of [RankTable::SIZES].
    pub fn build(len: usize, counted: bool) -> RankTable {
        assert!(Self::SIZES.contains(&len), "no rank table for {len} cards");

        let now = Instant::now();
        let mut entries = Vec::new();

        codec::for_each_rank_multiset(len, len.min(5), |ranks| {
            let cards = ranks
                .iter()
                .zip(ROTATION.iter().cycle())
                .map(|(&rank, &suit)| Card::new(rank, suit))
                .collect::<Vec<_>>();

            let mask = codec::ranks_mask(ranks);
            if mask.count_ones() as usize == len {
                entries.push((Signature::Unique(mask), HandInfo::classify(&cards, counted)));

                if counted {
                    let suited = ranks
                        .iter()
                        .map(|&rank| Card::new(rank, Suit::Hearts))
                        .collect::<Vec<_>>();
                    entries.push((Signature::Flush(mask), HandInfo::classify(&suited, counted)));
                }
            } else {
                let product = codec::ranks_product(ranks);
                entries.push((Signature::Product(product), HandInfo::classify(&cards, counted)));
            }
        });

        // Best hands first, the sort is stable so the table is reproducible.
        entries.sort_by(|(_, a), (_, b)| b.compare(a, counted));

        let mut table = RankTable {
            len,
            counted,
            flushes: vec![0; MASK_TABLE_SIZE].into_boxed_slice(),
            unique: vec![0; MASK_TABLE_SIZE].into_boxed_slice(),
            products: AHashMap::default(),
            classes: Vec::new(),
        };

        let mut prev: Option<&HandInfo> = None;
        for (signature, info) in &entries {
            if prev.is_none_or(|p| !p.equal_to(info, counted)) {
                table.classes.push(HandClass {
                    rank: info.category(),
                    ranks: info
                        .defining()
                        .iter()
                        .chain(info.kickers())
                        .map(Card::rank)
                        .collect(),
                });
            }

            let value = table.classes.len() as u16;
            match *signature {
                Signature::Flush(mask) => table.flushes[mask as usize] = value,
                Signature::Unique(mask) => table.unique[mask as usize] = value,
                Signature::Product(product) => {
                    table.products.insert(product, value);
                }
            }

            prev = Some(info);
        }

        debug!(
            "Built {len} cards rank table (counted: {counted}) with {} classes in {:?}",
            table.classes.len(),
            now.elapsed()
        );

        table
    }

    /// The size of the hands ranked by this table.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Checks if this table counts straights and flushes.
    pub fn counts_straights_flushes(&self) -> bool {
        self.counted
    }

    /// The number of distinct hand ranks.
    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    /// The class for a rank, 1 is the best hand.
    pub fn class(&self, value: u16) -> Option<&HandClass> {
        (value as usize).checked_sub(1).and_then(|idx| self.classes.get(idx))
    }

    /// Iterates the classes from the best to the worst hand.
    pub fn classes(&self) -> impl Iterator<Item = (u16, &HandClass)> {
        (1..).zip(self.classes.iter())
    }

    /// Looks up a hand rank, returns `None` if the hand is not in the table.
    #[inline]
    pub fn lookup(&self, cards: &[Card]) -> Option<u16> {
        if cards.len() != self.len {
            return None;
        }

        let mask = codec::rank_mask(cards);
        let value = if mask.count_ones() as usize == self.len {
            if self.counted && codec::is_suited(cards) {
                self.flushes[mask as usize]
            } else {
                self.unique[mask as usize]
            }
        } else {
            let product = codec::prime_product(cards);
            self.products.get(&product).copied().unwrap_or(0)
        };

        (value != 0).then_some(value)
    }

    /// Returns the value of a hand.
    ///
    /// Panics if the hand has not the table size or the hand is missing from the
    /// table, as the tables cover all hands this is an internal error.
    #[inline]
    pub fn value(&self, cards: &[Card]) -> HandValue {
        match self.lookup(cards) {
            Some(value) => HandValue::new(value, self.classes[value as usize - 1].rank),
            None => panic!(
                "Missing rank for {cards:?} in {} cards table, mask 0x{:04x} product {}",
                self.len,
                codec::rank_mask(cards),
                codec::prime_product(cards)
            ),
        }
    }

    /// The suited hands ranks indexed by rank mask, 0 for no entry.
    pub fn flushes(&self) -> &[u16] {
        &self.flushes
    }

    /// The unsuited hands without repeated ranks indexed by rank mask, 0 for no
    /// entry.
    pub fn unique(&self) -> &[u16] {
        &self.unique
    }

    /// The hands with repeated ranks as (prime product, rank) sorted by product.
    pub fn products(&self) -> Vec<(u64, u16)> {
        let mut products = self
            .products
            .iter()
            .map(|(&p, &v)| (p, v))
            .collect::<Vec<_>>();
        products.sort_unstable();
        products
    }

    /// A hash of the table content, equal tables have the same fingerprint.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.update(&[self.len as u8, self.counted as u8]);

        for value in self.flushes.iter().chain(self.unique.iter()) {
            hasher.update(&value.to_le_bytes());
        }

        for (product, value) in self.products() {
            hasher.update(&product.to_le_bytes());
            hasher.update(&value.to_le_bytes());
        }

        hasher.digest()
    }
}

impl fmt::Debug for RankTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RankTable")
            .field("len", &self.len)
            .field("counted", &self.counted)
            .field("classes", &self.classes.len())
            .field("products", &self.products.len())
            .finish()
    }
}

/// The rank tables for all hand sizes, with and without straights and flushes.
///
/// Tables are immutable once built and can be shared between threads, use
/// [RankTables::shared] for a process wide instance built on first use.
#[derive(Debug, Clone)]
pub struct RankTables {
    tables: Vec<RankTable>,
}

static SHARED_TABLES: LazyLock<RankTables> = LazyLock::new(|| {
    let now = Instant::now();
    let tables = RankTables::build();
    info!("Rank tables ready in {:?}", now.elapsed());
    tables
});

impl RankTables {
    /// Builds all the tables.
    pub fn build() -> Self {
        let tables = RankTable::SIZES
            .iter()
            .flat_map(|&len| [false, true].map(|counted| RankTable::build(len, counted)))
            .collect();
        Self { tables }
    }

    /// The process wide tables.
    pub fn shared() -> &'static RankTables {
        &SHARED_TABLES
    }

    /// The table for `len` cards hands.
    pub fn table(&self, len: usize, counted: bool) -> Option<&RankTable> {
        self.tables
            .iter()
            .find(|t| t.len == len && t.counted == counted)
    }

    /// Iterates all the tables.
    pub fn iter(&self) -> impl Iterator<Item = &RankTable> {
        self.tables.iter()
    }
}

impl FromIterator<RankTable> for RankTables {
    /// Collects a subset of the tables, a later table replaces an earlier one
    /// with the same size and configuration.
    fn from_iter<I: IntoIterator<Item = RankTable>>(iter: I) -> Self {
        let mut tables = Vec::<RankTable>::new();
        for table in iter {
            tables.retain(|t| t.len != table.len || t.counted != table.counted);
            tables.push(table);
        }

        Self { tables }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kicker_cards::{Deck, parse_cards};
    use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

    fn five() -> &'static RankTable {
        RankTables::shared().table(5, true).unwrap()
    }

    fn value(table: &RankTable, s: &str) -> HandValue {
        table.value(&parse_cards(s).unwrap())
    }

    fn classes_by_rank(table: &RankTable) -> [usize; HandRank::COUNT] {
        let mut counts = [0; HandRank::COUNT];
        for (_, class) in table.classes() {
            counts[class.rank() as usize] += 1;
        }

        counts
    }

    #[test]
    fn five_cards_classes() {
        let table = five();
        assert_eq!(table.num_classes(), 7462 + 13);

        let counts = classes_by_rank(table);
        assert_eq!(counts[HandRank::FiveOfAKind as usize], 13);
        assert_eq!(counts[HandRank::StraightFlush as usize], 10);
        assert_eq!(counts[HandRank::FourOfAKind as usize], 156);
        assert_eq!(counts[HandRank::FullHouse as usize], 156);
        assert_eq!(counts[HandRank::Flush as usize], 1277);
        assert_eq!(counts[HandRank::Straight as usize], 10);
        assert_eq!(counts[HandRank::ThreeOfAKind as usize], 858);
        assert_eq!(counts[HandRank::TwoPair as usize], 858);
        assert_eq!(counts[HandRank::OnePair as usize], 2860);
        assert_eq!(counts[HandRank::HighCard as usize], 1277);

        // Categories are contiguous, from the best.
        let ranks = table.classes().map(|(_, c)| c.rank()).collect::<Vec<_>>();
        assert!(ranks.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn five_cards_known_values() {
        let table = five();
        assert_eq!(value(table, "AS KS QS JS TS").value(), 14);
        assert_eq!(value(table, "5H 4H 3H 2H AH").value(), 23);
        assert_eq!(value(table, "AC AD AH AS KC").value(), 24);
        assert_eq!(value(table, "7C 5D 4H 3S 2C").value(), 7475);

        let class = table.class(14).unwrap();
        assert_eq!(class.rank(), HandRank::StraightFlush);
        assert_eq!(class.to_string(), "Straight Flush A K Q J T");
        assert_eq!(table.class(0), None);
        assert_eq!(table.class(7476), None);

        // Wild cards can make five aces.
        let aces = value(table, "AC AD AH AS AS");
        assert_eq!(aces.value(), 1);
        assert_eq!(aces.rank(), HandRank::FiveOfAKind);
    }

    #[test]
    fn five_cards_frequencies() {
        let table = five();
        let mut counts = [0usize; HandRank::COUNT];
        let mut values = ahash::AHashSet::default();

        Deck::default().for_each(5, |cards| {
            let value = table.value(cards);
            counts[value.rank() as usize] += 1;
            values.insert(value.value());
        });

        assert_eq!(counts.iter().sum::<usize>(), 2_598_960);
        assert_eq!(values.len(), 7462);
        assert_eq!(counts[HandRank::FiveOfAKind as usize], 0);
        assert_eq!(counts[HandRank::StraightFlush as usize], 40);
        assert_eq!(counts[HandRank::FourOfAKind as usize], 624);
        assert_eq!(counts[HandRank::FullHouse as usize], 3744);
        assert_eq!(counts[HandRank::Flush as usize], 5108);
        assert_eq!(counts[HandRank::Straight as usize], 10200);
        assert_eq!(counts[HandRank::ThreeOfAKind as usize], 54912);
        assert_eq!(counts[HandRank::TwoPair as usize], 123552);
        assert_eq!(counts[HandRank::OnePair as usize], 1098240);
        assert_eq!(counts[HandRank::HighCard as usize], 1302540);
    }

    #[test]
    fn lookup_agrees_with_classifier() {
        let table = five();
        let mut rng = StdRng::seed_from_u64(5);
        let mut deck = Deck::default().into_iter().collect::<Vec<_>>();

        let hands = (0..300)
            .map(|_| {
                deck.shuffle(&mut rng);
                let cards = deck[..5].to_vec();
                (table.value(&cards), HandInfo::classify(&cards, true))
            })
            .collect::<Vec<_>>();

        for (va, ia) in &hands {
            assert_eq!(va.rank(), ia.category());
            for (vb, ib) in &hands {
                assert_eq!(va.cmp(vb), ia.compare(ib, true));
            }
        }
    }

    #[test]
    fn small_tables_classes() {
        let tables = RankTables::shared();
        let expected = [(2, 169, 91), (3, 741, 455), (4, 2535, 1820)];
        for (len, counted, plain) in expected {
            assert_eq!(tables.table(len, true).unwrap().num_classes(), counted);
            assert_eq!(tables.table(len, false).unwrap().num_classes(), plain);
        }

        // Without straights and flushes the five cards table has only rank multisets.
        assert_eq!(tables.table(5, false).unwrap().num_classes(), 6175 + 13);
        assert!(tables.table(6, true).is_none());
        assert!(tables.table(7, true).is_none());
    }

    #[test]
    fn two_cards_frequencies() {
        let table = RankTables::shared().table(2, true).unwrap();
        let mut counts = [0usize; HandRank::COUNT];
        Deck::default().for_each(2, |cards| {
            counts[table.value(cards).rank() as usize] += 1;
        });

        assert_eq!(counts[HandRank::OnePair as usize], 78);
        assert_eq!(counts[HandRank::StraightFlush as usize], 52);
        assert_eq!(counts[HandRank::Flush as usize], 260);
        assert_eq!(counts[HandRank::Straight as usize], 156);
        assert_eq!(counts[HandRank::HighCard as usize], 780);
    }

    #[test]
    fn two_cards_straight_flush() {
        let tables = RankTables::shared();

        let counted = tables.table(2, true).unwrap();
        let v = value(counted, "2S 3S");
        assert_eq!(v.rank(), HandRank::StraightFlush);

        // A-2 is the lowest straight flush.
        let wheel = value(counted, "AS 2S");
        assert_eq!(wheel.rank(), HandRank::StraightFlush);
        assert!(wheel < v);

        let plain = tables.table(2, false).unwrap();
        assert_eq!(value(plain, "2S 3S").rank(), HandRank::HighCard);
        assert_eq!(value(plain, "2S 3S").value(), 91);
    }

    #[test]
    fn missing_entries() {
        let table = five();
        assert_eq!(table.lookup(&parse_cards("AS KS").unwrap()), None);

        // A table only ranks hands of its size.
        let tables = RankTables::shared();
        let four = tables.table(4, true).unwrap();
        assert!(four.lookup(&parse_cards("AS AH AD AC").unwrap()).is_some());
        assert_eq!(four.lookup(&parse_cards("AS AH AD AC AC").unwrap()), None);
    }

    #[test]
    #[should_panic(expected = "Missing rank")]
    fn missing_value_panics() {
        let table = RankTables::shared().table(3, true).unwrap();
        // A two cards hand is not in the three cards table.
        table.value(&parse_cards("AS AH").unwrap());
    }

    #[test]
    fn reproducible_tables() {
        let a = RankTable::build(5, true);
        let b = RankTable::build(5, true);
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.products(), b.products());
        assert_eq!(a.fingerprint(), five().fingerprint());

        let c = RankTable::build(5, false);
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn collect_tables() {
        let tables = [
            RankTable::build(2, false),
            RankTable::build(3, true),
            RankTable::build(2, false),
        ]
        .into_iter()
        .collect::<RankTables>();

        assert_eq!(tables.iter().count(), 2);
        assert_eq!(tables.table(2, false).unwrap().num_classes(), 91);
        assert_eq!(tables.table(3, true).unwrap().num_classes(), 741);
        assert!(tables.table(5, true).is_none());
    }
}
