// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Evaluation errors.
use crate::Card;

/// Errors for hands that cannot be ranked.
///
/// These are input errors that callers are expected to handle, for example when
/// probing a hand that is still being dealt. A hand signature missing from the
/// rank tables is an internal fault and panics instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// The hand doesn't have 2, 3, 4, 5, or 7 cards.
    #[error("cannot rank a hand with {0} cards, expected 2, 3, 4, 5, or 7 cards")]
    InvalidHandSize(usize),
    /// The same card appears more than once in the hand.
    #[error("card {0} appears more than once in the hand")]
    DuplicateCard(Card),
    /// The hand contains a card that has not been dealt.
    #[error("the hand contains an unknown card")]
    UnknownCard,
    /// Two hands ranked by different tables cannot be compared.
    #[error("cannot compare a {0} cards hand with a {1} cards hand")]
    SizeMismatch(usize, usize),
}
