// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Rank tables source generation.
//!
//! Writes a rank table as a Rust module that can be embedded in a build, the
//! generated `eval` function takes the cards 32 bits codes and does the same
//! lookups as [RankTable::lookup].
use std::io::{self, Write};

use crate::RankTable;

const VALUES_PER_LINE: usize = 16;

/// Writes the Rust source for a rank table.
///
/// The output depends only on the table content so tables with the same
/// fingerprint generate the same source.
pub fn write_rust_source<W: Write>(table: &RankTable, mut w: W) -> io::Result<()> {
    let counted = table.counts_straights_flushes();

    writeln!(w, "// Generated {} cards rank table.", table.len())?;
    writeln!(w, "// Straights and flushes counted: {counted}.")?;
    writeln!(w, "// Hand classes: {}.", table.num_classes())?;
    writeln!(w, "// Fingerprint: 0x{:016x}.", table.fingerprint())?;
    writeln!(w)?;

    write_items(table, &mut w)?;
    w.flush()
}

/// Writes the table constants and arrays followed by the `eval` function.
fn write_items<W: Write>(table: &RankTable, w: &mut W) -> io::Result<()> {
    let counted = table.counts_straights_flushes();

    writeln!(w, "/// The number of cards in a hand.")?;
    writeln!(w, "pub const HAND_LEN: usize = {};", table.len())?;
    writeln!(w)?;
    writeln!(w, "/// Checks suited hands in the flushes table.")?;
    writeln!(w, "pub const COUNTED: bool = {counted};")?;
    writeln!(w)?;

    write_array(w, "FLUSHES", "Suited hands ranks by rank mask.", table.flushes())?;
    write_array(
        w,
        "UNIQUE",
        "Hands without repeated ranks ranks by rank mask.",
        table.unique(),
    )?;

    let products = table.products();
    writeln!(w, "/// Hands with repeated ranks as (prime product, rank).")?;
    writeln!(w, "pub static PRODUCTS: [(u64, u16); {}] = [", products.len())?;
    for (product, value) in &products {
        writeln!(w, "    ({product}, {value}),")?;
    }
    writeln!(w, "];")?;
    writeln!(w)?;

    w.write_all(EVAL_FN.as_bytes())
}

fn write_array<W: Write>(w: &mut W, name: &str, doc: &str, values: &[u16]) -> io::Result<()> {
    writeln!(w, "/// {doc}")?;
    writeln!(w, "pub static {name}: [u16; {}] = [", values.len())?;
    for line in values.chunks(VALUES_PER_LINE) {
        let line = line
            .iter()
            .map(u16::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(w, "    {line},")?;
    }
    writeln!(w, "];")?;
    writeln!(w)
}

const EVAL_FN: &str = r#"/// Returns a hand rank given the cards codes, 0 if there is no entry.
pub fn eval(cards: &[u32]) -> u16 {
    if cards.len() != HAND_LEN {
        return 0;
    }

    let mask = cards.iter().fold(0, |m, c| m | (c >> 16)) as usize;
    if mask.count_ones() as usize == HAND_LEN {
        let suited = cards.iter().fold(0xf000, |s, c| s & c) != 0;
        return if COUNTED && suited {
            FLUSHES[mask]
        } else {
            UNIQUE[mask]
        };
    }

    let product = cards.iter().map(|c| (c & 0x3f) as u64).product::<u64>();
    PRODUCTS
        .binary_search_by_key(&product, |&(p, _)| p)
        .map_or(0, |idx| PRODUCTS[idx].1)
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Card, Deck, RankTables, parse_cards};

    fn generate(len: usize, counted: bool) -> (String, &'static RankTable) {
        let table = RankTables::shared().table(len, counted).unwrap();
        let mut out = Vec::new();
        write_rust_source(table, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), table)
    }

    /// Parses back the values of a generated array or slice.
    fn parse_values(source: &str, name: &str) -> Vec<u64> {
        let start = source.find(&format!("pub static {name}")).unwrap();
        let body = &source[start..];
        let body = &body[body.find("= [").unwrap() + 3..body.find("];").unwrap()];
        body.split(|c: char| !c.is_ascii_digit())
            .filter(|s| !s.is_empty())
            .map(|s| s.parse().unwrap())
            .collect()
    }

    #[test]
    fn generated_source() {
        let (source, table) = generate(5, true);
        assert!(source.starts_with("// Generated 5 cards rank table.\n"));
        assert!(source.contains(&format!("0x{:016x}", table.fingerprint())));
        assert!(source.contains("pub const COUNTED: bool = true;"));
        assert!(source.contains("    (115856201, 1),\n"));
        assert!(source.contains("pub fn eval(cards: &[u32]) -> u16"));

        let flushes = parse_values(&source, "FLUSHES");
        assert_eq!(flushes.len(), 8192);
        assert!(flushes.iter().zip(table.flushes()).all(|(&a, &b)| a == b as u64));

        let unique = parse_values(&source, "UNIQUE");
        assert!(unique.iter().zip(table.unique()).all(|(&a, &b)| a == b as u64));
        assert_eq!(unique.len(), 8192);

        let products = parse_values(&source, "PRODUCTS");
        let expected = table
            .products()
            .into_iter()
            .flat_map(|(p, v)| [p, v as u64])
            .collect::<Vec<_>>();
        assert_eq!(products, expected);
    }

    mod two_cards {
        include!("codegen/two_cards.rs");
    }

    #[test]
    fn generated_eval() {
        let table = RankTables::shared().table(2, true).unwrap();
        let mut out = Vec::new();
        write_items(table, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            include_str!("codegen/two_cards.rs")
        );

        let mut hands = 0;
        Deck::default().for_each(2, |cards| {
            let codes = cards.iter().map(Card::id).collect::<Vec<_>>();
            assert_eq!(
                two_cards::eval(&codes),
                table.value(cards).value(),
                "{cards:?}"
            );
            hands += 1;
        });
        assert_eq!(hands, 1326);

        let codes = parse_cards("AS KS QS")
            .unwrap()
            .iter()
            .map(Card::id)
            .collect::<Vec<_>>();
        assert_eq!(two_cards::eval(&codes), 0);
        assert_eq!(two_cards::eval(&codes[..2]), 1);
    }

    #[test]
    fn reproducible_source() {
        let (a, _) = generate(3, false);
        let (b, _) = generate(3, false);
        assert_eq!(a, b);
        assert!(a.contains("pub const COUNTED: bool = false;"));

        let (c, _) = generate(3, true);
        assert_ne!(a, c);
    }
}
