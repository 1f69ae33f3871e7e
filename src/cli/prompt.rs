//! Interactive console collection of item/bin descriptions.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the prompt provides the "run `pack run` and just type answers" UX
//!
//! The answers are folded into one free-text description that the LLM parses
//! into a structured request; the user never has to write JSON.

use std::io::{self, BufRead, Write};

use crate::error::AppError;

/// One item type as typed at the console (free-form, LLM does the parsing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSketch {
    pub dims: String,
    pub price: String,
    pub quantity: String,
}

/// One bin type as typed at the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinSketch {
    pub dims: String,
}

/// Prompt for item/bin counts and dimensions, returning the composed
/// description text.
pub fn collect_description() -> Result<String, AppError> {
    let stdin = io::stdin();
    let mut lines = stdin.lock();

    let num_items = read_count(&mut lines, "How many item types do you have? ")?;
    let mut items = Vec::with_capacity(num_items);
    for i in 0..num_items {
        items.push(ItemSketch {
            dims: read_answer(&mut lines, &format!("  Enter dimensions for item #{} (e.g., '5x3'): ", i + 1))?,
            price: read_answer(&mut lines, &format!("  Enter price for item #{}: ", i + 1))?,
            quantity: read_answer(&mut lines, &format!("  Enter quantity for item #{}: ", i + 1))?,
        });
    }

    let num_bins = read_count(&mut lines, "How many bins do you have? ")?;
    let mut bins = Vec::with_capacity(num_bins);
    for i in 0..num_bins {
        bins.push(BinSketch {
            dims: read_answer(&mut lines, &format!("  Enter dimensions for bin #{} (e.g., '20x30'): ", i + 1))?,
        });
    }

    Ok(compose_description(&items, &bins))
}

/// Fold the collected answers into one description sentence.
///
/// Kept pure so the prompt wording is testable without a console attached.
pub fn compose_description(items: &[ItemSketch], bins: &[BinSketch]) -> String {
    let item_parts: Vec<String> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            format!(
                "item {} is {} with a price of {} and quantity of {}",
                i + 1,
                item.dims,
                item.price,
                item.quantity
            )
        })
        .collect();
    let bin_parts: Vec<String> = bins
        .iter()
        .enumerate()
        .map(|(i, bin)| format!("bin {} is {}", i + 1, bin.dims))
        .collect();

    format!(
        "I have {} item types and {} bins. The items are: {}. The bins are: {}.",
        items.len(),
        bins.len(),
        item_parts.join(", "),
        bin_parts.join(", ")
    )
}

/// Read a non-negative count, re-prompting on invalid input.
fn read_count(input: &mut impl BufRead, question: &str) -> Result<usize, AppError> {
    loop {
        let answer = read_answer(input, question)?;
        match answer.parse::<usize>() {
            Ok(n) => return Ok(n),
            Err(_) => println!("Invalid number: {answer:?}. Please enter a whole number."),
        }
    }
}

/// Print a prompt and read one trimmed line.
fn read_answer(input: &mut impl BufRead, question: &str) -> Result<String, AppError> {
    print!("{question}");
    io::stdout()
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to write prompt: {e}")))?;

    let mut line = String::new();
    let bytes = input
        .read_line(&mut line)
        .map_err(|e| AppError::new(2, format!("Failed to read input: {e}")))?;
    if bytes == 0 {
        return Err(AppError::new(2, "No input received (stdin closed)."));
    }
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_reads_naturally() {
        let items = vec![
            ItemSketch {
                dims: "5x3".to_string(),
                price: "25".to_string(),
                quantity: "2".to_string(),
            },
            ItemSketch {
                dims: "10x15".to_string(),
                price: "55".to_string(),
                quantity: "10".to_string(),
            },
        ];
        let bins = vec![BinSketch {
            dims: "20x30".to_string(),
        }];

        let text = compose_description(&items, &bins);
        assert_eq!(
            text,
            "I have 2 item types and 1 bins. The items are: \
             item 1 is 5x3 with a price of 25 and quantity of 2, \
             item 2 is 10x15 with a price of 55 and quantity of 10. \
             The bins are: bin 1 is 20x30."
        );
    }

    #[test]
    fn read_count_retries_until_numeric() {
        let mut input = io::Cursor::new(b"abc\n3\n".to_vec());
        let n = read_count(&mut input, "count? ").unwrap();
        assert_eq!(n, 3);
    }

    #[test]
    fn read_answer_fails_on_closed_stdin() {
        let mut input = io::Cursor::new(Vec::new());
        assert!(read_answer(&mut input, "q? ").is_err());
    }
}
