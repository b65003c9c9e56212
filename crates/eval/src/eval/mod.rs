// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! The [Evaluator] ranks 2, 3, 4, 5, and 7 cards hands with the [RankTables],
//! resolving wild cards as set by a [PlayConfig]. Hands with up to five cards
//! are ranked with one table lookup, seven cards hands are ranked by the best of
//! their 21 five cards subsets.
//!
//! [RankTables]: crate::RankTables
//! [PlayConfig]: crate::PlayConfig

mod best;

mod evaluator;
pub use evaluator::{Evaluation, Evaluator};
pub(crate) use evaluator::evaluate;

mod value;
pub use value::{HandRank, HandValue};
