// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Kicker Poker hand evaluator.
//!
//! Poker hand evaluator for 2, 3, 4, 5, and 7 cards hands with wild cards. The
//! evaluator is based on the [Cactus Kev's][kevlink] poker evaluator, with rank
//! tables for each hand size generated at startup, and an optional rule that
//! counts straights and flushes in hands with less than five cards.
//!
//! To use the evaluator create a [PlayConfig] and an [Evaluator], and evaluate a
//! hand to get its value and the best cards:
//!
//! ```
//! # use kicker_eval::*;
//! let evaluator = Evaluator::shared(PlayConfig::default().with_wild_rank(Rank::Deuce));
//! let pair = evaluator.evaluate(&parse_cards("AS AH 7D 5C 3S").unwrap()).unwrap();
//! let trips = evaluator.evaluate(&parse_cards("KS KH 2D 5C 3S").unwrap()).unwrap();
//! assert_eq!(trips.rank(), HandRank::ThreeOfAKind);
//! assert!(trips.value() > pair.value());
//! ```
//!
//! or [HandValue::eval] for hands without wild cards:
//!
//! ```
//! # use kicker_eval::*;
//! // 2C, 3C, .., JC
//! let cards = Deck::default().into_iter().take(10).collect::<Vec<_>>();
//! let v1 = HandValue::eval(&cards[0..5]).unwrap();
//! let v2 = HandValue::eval(&cards[5..]).unwrap();
//! assert!(v2 > v1);
//! ```
//!
//! The [HandInfo] classifier splits a hand into the cards that define its
//! category and the kickers:
//!
//! ```
//! # use kicker_eval::*;
//! let info = HandInfo::classify(&parse_cards("9C 5S 9D AC 4H").unwrap(), true);
//! assert_eq!(info.to_string(), "One Pair: 9C 9D + AC 5S 4H");
//! ```
//!
//! [kevlink]: http://suffe.cool/poker/evaluator.html
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod codec;
pub mod codegen;

mod config;
pub use config::PlayConfig;

mod error;
pub use error::EvalError;

pub mod eval;
pub use eval::{Evaluation, Evaluator, HandRank, HandValue};

mod hand;
pub use hand::Hand;

mod info;
pub use info::{HandInfo, compare};

mod straight;
pub use straight::StraightType;

mod table;
pub use table::{HandClass, RankTable, RankTables};

pub mod wild;

// Reexport cards types.
pub use kicker_cards::{Card, Deck, ParseCardError, Rank, Suit, parse_cards};
