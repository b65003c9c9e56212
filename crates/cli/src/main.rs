// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Kicker hand evaluator CLI.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, value_parser};
use log::info;
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
    time::Instant,
};

use kicker_eval::{
    Card, Deck, Evaluation, Evaluator, HandRank, PlayConfig, Rank, RankTables, codegen,
    parse_cards,
};

#[derive(Debug, Parser)]
#[clap(version, about)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluates a hand and prints its best cards.
    Eval {
        /// The hand cards, for example "7H KH 4H 2C 2D".
        cards: String,
        #[clap(flatten)]
        rules: Rules,
    },
    /// Compares hands and prints the winners.
    Compare {
        /// The hands to compare.
        #[clap(required = true, num_args = 2..)]
        hands: Vec<String>,
        #[clap(flatten)]
        rules: Rules,
    },
    /// Evaluates all the hands with the given size and prints the categories.
    Stats {
        /// The hand size.
        #[clap(long, short, default_value_t = 5, value_parser = value_parser!(u8).range(2..=7))]
        size: u8,
        #[clap(flatten)]
        rules: Rules,
    },
    /// Writes the Rust source for a rank table.
    Gen {
        /// The hand size.
        #[clap(long, short, default_value_t = 5, value_parser = value_parser!(u8).range(2..=5))]
        size: u8,
        /// Rank straights and flushes as high cards.
        #[clap(long)]
        no_straights_flushes: bool,
        /// The output file, defaults to stdout.
        #[clap(long, short)]
        out: Option<PathBuf>,
    },
}

/// The play configuration options.
#[derive(Debug, Args)]
struct Rules {
    /// A wild card, can be repeated.
    #[clap(long = "wild", value_name = "CARD")]
    wilds: Vec<Card>,
    /// Makes all the cards of a rank wild, can be repeated.
    #[clap(long = "wild-rank", value_name = "RANK")]
    wild_ranks: Vec<Rank>,
    /// Counts straights and flushes in hands with less than five cards.
    #[clap(long)]
    small_straights: bool,
}

impl Rules {
    fn config(&self) -> PlayConfig {
        self.wild_ranks
            .iter()
            .fold(PlayConfig::default(), |config, &rank| config.with_wild_rank(rank))
            .with_wilds(self.wilds.iter().copied())
            .with_small_straights_flushes(self.small_straights)
    }
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Eval { cards, rules } => eval(&cards, &rules),
        Command::Compare { hands, rules } => compare(&hands, &rules),
        Command::Stats { size, rules } => stats(size as usize, &rules),
        Command::Gen {
            size,
            no_straights_flushes,
            out,
        } => generate(size as usize, !no_straights_flushes, out),
    }
}

fn join(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn eval(cards: &str, rules: &Rules) -> Result<()> {
    let cards = parse_cards(cards)?;
    let evaluator = Evaluator::shared(rules.config());
    let evaluation = evaluator
        .evaluate(&cards)
        .with_context(|| format!("Cannot evaluate {}", join(&cards)))?;
    let info = evaluator.determine_hand(&cards)?;

    println!("Hand:      {}", join(&cards));
    println!("Category:  {}", evaluation.rank());
    println!("Rank:      {}", evaluation.value().value());
    println!("Best:      {}", join(evaluation.best()));
    println!("Defining:  {}", join(info.defining()));
    println!("Kickers:   {}", join(info.kickers()));

    if !evaluation.substitutions().is_empty() {
        let wilds = evaluation
            .substitutions()
            .iter()
            .map(|(wild, card)| format!("{wild}={card}"))
            .collect::<Vec<_>>()
            .join(" ");
        println!("Wilds:     {wilds}");
    }

    Ok(())
}

/// Evaluates each hand once, all the hands must be ranked by the same table.
fn evaluate_hands(
    evaluator: &Evaluator<'_>,
    hands: &[String],
) -> Result<Vec<(Vec<Card>, Evaluation)>> {
    let mut evaluated = Vec::<(Vec<Card>, Evaluation)>::with_capacity(hands.len());
    for hand in hands {
        let cards = parse_cards(hand)?;
        if let Some((first, _)) = evaluated.first() {
            evaluator.check_comparable(first.len(), cards.len())?;
        }

        let evaluation = evaluator
            .evaluate(&cards)
            .with_context(|| format!("Cannot evaluate {}", join(&cards)))?;
        evaluated.push((cards, evaluation));
    }

    Ok(evaluated)
}

fn compare(hands: &[String], rules: &Rules) -> Result<()> {
    let evaluator = Evaluator::shared(rules.config());
    let evaluated = evaluate_hands(&evaluator, hands)?;

    let Some(best) = evaluated.iter().map(|(_, e)| e.value()).max() else {
        bail!("No hands to compare");
    };

    for (cards, evaluation) in &evaluated {
        let mark = if evaluation.value() == best { "*" } else { " " };
        println!(
            "{mark} {:<20} {} ({})",
            join(cards),
            evaluation.rank(),
            evaluation.value().value()
        );
    }

    let winners = evaluated
        .iter()
        .filter(|(_, e)| e.value() == best)
        .count();
    if winners > 1 {
        println!("{winners} hands tie");
    }

    Ok(())
}

fn stats(size: usize, rules: &Rules) -> Result<()> {
    let evaluator = Evaluator::shared(rules.config());
    if !Evaluator::HAND_SIZES.contains(&size) {
        bail!("Cannot rank {size} cards hands, sizes are {:?}", Evaluator::HAND_SIZES);
    }

    // Build the tables before timing.
    let _ = RankTables::shared();

    let now = Instant::now();
    let mut counts = [0usize; HandRank::COUNT];
    let mut values = ahash::AHashSet::default();
    let mut error = None;

    Deck::default().for_each(size, |hand| match evaluator.evaluate(hand) {
        Ok(evaluation) => {
            counts[evaluation.rank() as usize] += 1;
            values.insert(evaluation.value());
        }
        Err(e) => {
            error.get_or_insert(e);
        }
    });

    if let Some(e) = error {
        return Err(e.into());
    }

    let total = counts.iter().sum::<usize>();
    info!("Evaluated {total} hands in {:?}", now.elapsed());

    for rank in HandRank::ranks().rev() {
        let count = counts[rank as usize];
        if count > 0 {
            let pct = 100.0 * count as f64 / total as f64;
            println!("{:<16} {count:>10} {pct:>7.3}%", rank.to_string());
        }
    }

    println!("{:<16} {total:>10}", "Total");
    println!("{:<16} {:>10}", "Distinct", values.len());

    Ok(())
}

fn generate(size: usize, counted: bool, out: Option<PathBuf>) -> Result<()> {
    let table = RankTables::shared()
        .table(size, counted)
        .with_context(|| format!("No rank table for {size} cards"))?;

    match out {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Cannot create {}", path.display()))?;
            codegen::write_rust_source(table, BufWriter::new(file))?;
            info!(
                "Wrote {size} cards table with {} classes to {}",
                table.num_classes(),
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut w = BufWriter::new(stdout.lock());
            codegen::write_rust_source(table, &mut w)?;
            w.flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use kicker_eval::EvalError;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_rules() {
        let cli = Cli::try_parse_from([
            "kicker",
            "eval",
            "7H KH 4H 2C 2D",
            "--wild-rank",
            "2",
            "--wild",
            "JD",
            "--small-straights",
        ])
        .unwrap();

        let Command::Eval { cards, rules } = cli.command else {
            panic!("Unexpected command");
        };

        assert_eq!(cards, "7H KH 4H 2C 2D");
        let config = rules.config();
        assert_eq!(config.wilds().len(), 5);
        assert!(config.is_wild("JD".parse().unwrap()));
        assert!(config.counts_straights_flushes(2));
    }

    #[test]
    fn parse_errors() {
        assert!(Cli::try_parse_from(["kicker", "eval", "AS KS", "--wild", "ZZ"]).is_err());
        assert!(Cli::try_parse_from(["kicker", "compare", "AS KS"]).is_err());
        assert!(Cli::try_parse_from(["kicker", "gen", "--size", "7"]).is_err());
    }

    #[test]
    fn evaluate_compared_hands() {
        let evaluator = Evaluator::shared(PlayConfig::default());
        let hands = ["AS AH AD KC KD", "2C 3D 9S KS QS JS TS"];
        let evaluated = evaluate_hands(&evaluator, &hands.map(String::from)).unwrap();
        assert_eq!(evaluated.len(), 2);
        assert_eq!(evaluated[0].1.rank(), HandRank::FullHouse);
        assert_eq!(evaluated[1].1.rank(), HandRank::StraightFlush);
        assert_eq!(evaluated[1].1.best().len(), 5);

        let hands = ["AS AH AD KC KD", "AC KS"];
        let err = evaluate_hands(&evaluator, &hands.map(String::from)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<EvalError>(),
            Some(&EvalError::SizeMismatch(5, 2))
        );
    }
}
