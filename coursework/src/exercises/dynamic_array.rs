use std::io::Write;

use anyhow::{Result, bail};

use crate::exercise::Exercise;
use crate::input::Tokens;

/// Fixed capacity of the sequence; the requested size must fit in it.
pub const CAPACITY: usize = 100;

const STEP: i64 = 10;

const METADATA: &str = r#"/**
 * @exercise Basics - Exercise 3
 * @title Dynamic array
 * @description Allocate a sequence of integers with capacity for 100 elements. A fill function receives the sequence and the requested size, read from input, and stores multiples of 10. Print the filled sequence.
 * @input stdin
 * @output stdout
 * @timeout 1000
 * @test name="size 5" input="5" expected="0 10 20 30 40"
 * @test name="size 3" input="3" expected="0 10 20"
 * @test name="size 1" input="1" expected="0"
 */"#;

/// Fills a fixed-capacity sequence with multiples of ten.
pub struct DynamicArray;

impl Exercise for DynamicArray {
    fn id(&self) -> &'static str {
        "dynamic-array"
    }

    fn metadata_source(&self) -> &'static str {
        METADATA
    }

    fn run(&self, input: &str, out: &mut dyn Write) -> Result<()> {
        let mut values = Vec::with_capacity(CAPACITY);
        let mut tokens = Tokens::new(input);
        let size: usize = tokens.next("size")?;
        tokens.finish()?;

        fill_multiples(&mut values, size)?;

        let line = values
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(out, "{line}")?;
        Ok(())
    }
}

/// Replace the contents of `values` with `0, 10, ..., (size - 1) * 10`.
///
/// `size` must be within `1..=CAPACITY`.
pub fn fill_multiples(values: &mut Vec<i64>, size: usize) -> Result<()> {
    if !(1..=CAPACITY).contains(&size) {
        bail!("size must be between 1 and {CAPACITY}, got {size}");
    }
    values.clear();
    values.extend((0..size as i64).map(|index| index * STEP));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::run_to_string;

    #[test]
    fn prints_multiples_of_ten() {
        assert_eq!(run_to_string(&DynamicArray, "5").expect("run"), "0 10 20 30 40\n");
        assert_eq!(run_to_string(&DynamicArray, "1").expect("run"), "0\n");
    }

    #[test]
    fn every_size_yields_exactly_size_tokens() {
        for size in 1..=CAPACITY {
            let output = run_to_string(&DynamicArray, &size.to_string()).expect("run");
            let tokens: Vec<i64> = output
                .split_whitespace()
                .map(|token| token.parse().expect("integer token"))
                .collect();
            assert_eq!(tokens.len(), size);
            for (index, value) in tokens.iter().enumerate() {
                assert_eq!(*value, index as i64 * 10);
            }
        }
    }

    #[test]
    fn fill_stays_within_capacity() {
        let mut values = Vec::with_capacity(CAPACITY);
        fill_multiples(&mut values, CAPACITY).expect("fill");
        assert_eq!(values.len(), CAPACITY);
        assert_eq!(values.last(), Some(&990));
        assert!(values.capacity() >= CAPACITY);
    }

    #[test]
    fn refill_replaces_previous_contents() {
        let mut values = Vec::with_capacity(CAPACITY);
        fill_multiples(&mut values, 4).expect("fill");
        fill_multiples(&mut values, 2).expect("refill");
        assert_eq!(values, vec![0, 10]);
    }

    #[test]
    fn rejects_sizes_outside_capacity() {
        let mut values = Vec::new();
        assert!(fill_multiples(&mut values, 0).is_err());
        assert!(fill_multiples(&mut values, CAPACITY + 1).is_err());
        assert!(run_to_string(&DynamicArray, "101").is_err());
        assert!(run_to_string(&DynamicArray, "-1").is_err());
    }
}
