// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker cards definitions.
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt, str::FromStr};

/// Primes used to encode a card rank.
const PRIMES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

/// A Poker card.
///
/// A card is represented using the encoding in the [Cactus Kev's][kevlink] Poker
/// hand evaluator with each card having the following format:
///
/// ```text
///   +--------+--------+--------+--------+
///   |xxxbbbbb|bbbbbbbb|cdhsrrrr|xxpppppp|
///   +--------+--------+--------+--------+
///   p = prime number of rank (deuce=2,trey=3,four=5,five=7,...,ace=41)
///   r = rank of card (deuce=0,trey=1,four=2,five=3,...,ace=12)
///   cdhs = suit of card
///   b = bit turned on depending on rank of card
/// ```
///
/// The all zero code is reserved for [Card::UNKNOWN], a placeholder for a card
/// that has not been dealt yet.
///
/// Cards are ordered by suit and then by rank, this order is only used to keep
/// collections of cards sorted, hands are compared by rank.
///
/// [kevlink]: http://suffe.cool/poker/evaluator.html
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card(u32);

impl Card {
    /// A card that has not been dealt, this is not a valid evaluation input.
    pub const UNKNOWN: Card = Card(0);

    /// Create a card given a suit and rank.
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        let (rank, suit) = (rank as u32, suit as u32);
        Self(PRIMES[rank as usize] | (rank << 8) | (suit << 12) | (1 << (rank + 16)))
    }

    /// This card unique 29 bits code.
    pub fn id(&self) -> u32 {
        self.0
    }

    /// Checks if this is the [Card::UNKNOWN] placeholder.
    pub fn is_unknown(&self) -> bool {
        self.0 == 0
    }

    /// Returns the card suit.
    ///
    /// Panics if the card is [Card::UNKNOWN].
    pub fn suit(&self) -> Suit {
        match self.suit_bits() {
            0x8 => Suit::Clubs,
            0x4 => Suit::Diamonds,
            0x2 => Suit::Hearts,
            0x1 => Suit::Spades,
            _ => panic!("Invalid suit value 0x{:x}", self.0),
        }
    }

    /// Returns the card rank.
    ///
    /// Panics if the card is [Card::UNKNOWN].
    pub fn rank(&self) -> Rank {
        match Rank::from_index(self.rank_bits()) {
            Some(rank) if !self.is_unknown() => rank,
            _ => panic!("Invalid rank 0x{:x}", self.0),
        }
    }

    /// The rank presence bit, bit 0 for a deuce up to bit 12 for an ace.
    #[inline]
    pub fn rank_bit(&self) -> u16 {
        (self.0 >> 16) as u16
    }

    /// The rank prime number.
    #[inline]
    pub fn prime(&self) -> u32 {
        self.0 & 0x3f
    }

    /// Returns the rank bits.
    #[inline]
    pub fn rank_bits(&self) -> u8 {
        ((self.0 >> 8) & 0xf) as u8
    }

    /// Returns the suit bits.
    #[inline]
    pub fn suit_bits(&self) -> u8 {
        ((self.0 >> 12) & 0xf) as u8
    }
}

impl Default for Card {
    fn default() -> Self {
        Card::UNKNOWN
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compares suit bits first then the rank bits.
        let key = |c: &Card| (c.suit_bits(), c.rank_bits());
        key(self).cmp(&key(other))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            write!(f, "??")
        } else {
            write!(f, "{}{}", self.rank(), self.suit())
        }
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({self})")
    }
}

/// Error returned when parsing cards from strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCardError {
    /// The string is not a rank followed by a suit.
    #[error("invalid card '{0}', expected a rank and a suit like 'AS' or '7d'")]
    InvalidFormat(String),
    /// Unknown rank character.
    #[error("invalid rank '{0}'")]
    InvalidRank(String),
    /// Unknown suit character.
    #[error("invalid suit '{0}'")]
    InvalidSuit(char),
}

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let suit = chars
            .next_back()
            .ok_or_else(|| ParseCardError::InvalidFormat(s.to_string()))?;
        let rank = chars.as_str();
        if rank.is_empty() {
            return Err(ParseCardError::InvalidFormat(s.to_string()));
        }

        Ok(Card::new(rank.parse()?, Suit::try_from(suit)?))
    }
}

/// Parses a list of cards separated by spaces or commas, like "7D AS 4D QH JC".
pub fn parse_cards(s: &str) -> Result<Vec<Card>, ParseCardError> {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::parse)
        .collect()
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Deuce
    Deuce = 0,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    /// The number of ranks.
    pub const COUNT: usize = 13;

    /// Returns all ranks from deuce to ace.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> + ExactSizeIterator {
        use Rank::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
        .into_iter()
    }

    /// Returns the rank for an index in 0..13.
    pub const fn from_index(index: u8) -> Option<Rank> {
        use Rank::*;
        Some(match index {
            0 => Deuce,
            1 => Trey,
            2 => Four,
            3 => Five,
            4 => Six,
            5 => Seven,
            6 => Eight,
            7 => Nine,
            8 => Ten,
            9 => Jack,
            10 => Queen,
            11 => King,
            12 => Ace,
            _ => return None,
        })
    }

    /// The rank index, 0 for a deuce and 12 for an ace.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The rank presence bit.
    #[inline]
    pub const fn bit(self) -> u16 {
        1 << self as u16
    }

    /// The prime number associated to this rank.
    #[inline]
    pub const fn prime(self) -> u32 {
        PRIMES[self as usize]
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self {
            Rank::Deuce => '2',
            Rank::Trey => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        };

        write!(f, "{rank}")
    }
}

impl FromStr for Rank {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rank = match s.to_ascii_uppercase().as_str() {
            "2" => Rank::Deuce,
            "3" => Rank::Trey,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "T" | "10" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return Err(ParseCardError::InvalidRank(s.to_string())),
        };

        Ok(rank)
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit.
    Clubs = 8,
    /// Diamonds suit.
    Diamonds = 4,
    /// Hearts suit.
    Hearts = 2,
    /// Spades suit.
    Spades = 1,
}

impl Suit {
    /// The number of suits.
    pub const COUNT: usize = 4;

    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> + ExactSizeIterator {
        [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades].into_iter()
    }

    /// A dense index in 0..4 following the [Suit::suits] order.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Suit::Clubs => 0,
            Suit::Diamonds => 1,
            Suit::Hearts => 2,
            Suit::Spades => 3,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        };

        write!(f, "{suit}")
    }
}

impl TryFrom<char> for Suit {
    type Error = ParseCardError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'C' => Ok(Suit::Clubs),
            'D' => Ok(Suit::Diamonds),
            'H' => Ok(Suit::Hearts),
            'S' => Ok(Suit::Spades),
            _ => Err(ParseCardError::InvalidSuit(c)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::HashSet;

    fn all_cards() -> impl Iterator<Item = Card> {
        Suit::suits().flat_map(|s| Rank::ranks().map(move |r| Card::new(r, s)))
    }

    #[test]
    fn card_encoding() {
        let mut ids = HashSet::default();

        for card in all_cards() {
            assert_eq!(card.prime(), PRIMES[card.rank() as usize]);
            assert_eq!(card.prime(), card.rank().prime());
            assert_eq!(card.rank_bits() as u32, card.rank() as u32);
            assert_eq!(card.suit_bits() as u32, card.suit() as u32);
            assert_eq!(card.rank_bit(), card.rank().bit());
            assert!(card.id() < (1 << 29));
            ids.insert(card.id());
        }

        // Check uniqueness.
        assert_eq!(ids.len(), 52);
        assert!(!ids.contains(&Card::UNKNOWN.id()));

        // From the Cactus Kev's website.
        assert_eq!(Card::new(Rank::King, Suit::Diamonds).id(), 0x08004b25);
        assert_eq!(Card::new(Rank::Five, Suit::Spades).id(), 0x00081307);
        assert_eq!(Card::new(Rank::Jack, Suit::Clubs).id(), 0x0200891d);
    }

    #[test]
    fn unknown_card() {
        let card = Card::default();
        assert!(card.is_unknown());
        assert_eq!(card.to_string(), "??");
        assert!(!Card::new(Rank::Deuce, Suit::Spades).is_unknown());
    }

    #[test]
    #[should_panic]
    fn unknown_card_has_no_rank() {
        Card::UNKNOWN.rank();
    }

    #[test]
    fn card_to_string() {
        assert_eq!(Card::new(Rank::King, Suit::Diamonds).to_string(), "KD");
        assert_eq!(Card::new(Rank::Five, Suit::Spades).to_string(), "5S");
        assert_eq!(Card::new(Rank::Jack, Suit::Clubs).to_string(), "JC");
        assert_eq!(Card::new(Rank::Ten, Suit::Hearts).to_string(), "TH");
        assert_eq!(format!("{:?}", Card::new(Rank::Ace, Suit::Hearts)), "Card(AH)");
    }

    #[test]
    fn card_from_string() {
        for card in all_cards() {
            assert_eq!(card.to_string().parse::<Card>(), Ok(card));
            assert_eq!(card.to_string().to_lowercase().parse::<Card>(), Ok(card));
        }

        assert_eq!("10h".parse(), Ok(Card::new(Rank::Ten, Suit::Hearts)));
        assert!(matches!(
            "1h".parse::<Card>(),
            Err(ParseCardError::InvalidRank(_))
        ));
        assert!(matches!(
            "AX".parse::<Card>(),
            Err(ParseCardError::InvalidSuit('X'))
        ));
        assert!(matches!(
            "S".parse::<Card>(),
            Err(ParseCardError::InvalidFormat(_))
        ));
    }

    #[test]
    fn cards_list() {
        let cards = parse_cards("7D AS, 4d  QH JC").unwrap();
        let expected = [
            Card::new(Rank::Seven, Suit::Diamonds),
            Card::new(Rank::Ace, Suit::Spades),
            Card::new(Rank::Four, Suit::Diamonds),
            Card::new(Rank::Queen, Suit::Hearts),
            Card::new(Rank::Jack, Suit::Clubs),
        ];
        assert_eq!(cards, expected);
        assert!(parse_cards("").unwrap().is_empty());
        assert!(parse_cards("7D ZZ").is_err());
    }

    #[test]
    fn card_ordering() {
        let mut cards = parse_cards("AS 2C KS 2S").unwrap();
        cards.sort();

        // Spades sort before clubs, ranks ascending within a suit.
        assert_eq!(cards, parse_cards("2S KS AS 2C").unwrap());
    }
}
