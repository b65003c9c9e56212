// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// Run with:
//
// ```bash
// $ cargo r --release --example eval_all7
// ...
// Total hands      133784560
//
// High Card:       23294460
// One  Pair:       58627800
// Two Pairs:       31433400
// Three of a Kind: 6461620
// Straight:        6180020
// Flush:           4047644
// Full House:      3473184
// Four of a Kind:  224848
// Straight Flush:  41584
// ```

use std::time::Instant;

use kicker_eval::*;

#[rustfmt::skip]
fn main() -> Result<(), EvalError> {
    // Build the tables before timing.
    let evaluator = Evaluator::shared(PlayConfig::default());
    let tables = evaluator.tables();
    assert!(tables.table(5, true).is_some());

    // Evaluate all 133M hands.
    let now = Instant::now();
    let mut counts = [0usize; HandRank::COUNT];
    let mut error = None;

    Deck::default().for_each(7, |hand| match evaluator.evaluate(hand) {
        Ok(eval) => counts[eval.rank() as usize] += 1,
        Err(e) => {
            error.get_or_insert(e);
        }
    });

    if let Some(e) = error {
        return Err(e);
    }

    let elapsed = now.elapsed().as_secs_f64();
    let total = counts.iter().sum::<usize>();
    println!("Total hands      {total}");
    println!("Elapsed:         {:.3}s", elapsed);
    println!("Hands/sec:       {:.0}\n", total as f64 / elapsed);

    println!("High Card:       {}", counts[HandRank::HighCard as usize]);
    println!("One  Pair:       {}", counts[HandRank::OnePair as usize]);
    println!("Two Pairs:       {}", counts[HandRank::TwoPair as usize]);
    println!("Three of a Kind: {}", counts[HandRank::ThreeOfAKind as usize]);
    println!("Straight:        {}", counts[HandRank::Straight as usize]);
    println!("Flush:           {}", counts[HandRank::Flush as usize]);
    println!("Full House:      {}", counts[HandRank::FullHouse as usize]);
    println!("Four of a Kind:  {}", counts[HandRank::FourOfAKind as usize]);
    println!("Straight Flush:  {}", counts[HandRank::StraightFlush as usize]);

    Ok(())
}
