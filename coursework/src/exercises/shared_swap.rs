use std::io::Write;

use anyhow::{Result, bail};

use crate::exercise::Exercise;
use crate::input::Tokens;
use crate::render::Render;
use crate::shared::{Shared, swap_shared};

const METADATA: &str = r#"/**
 * @exercise Basics - Exercise 4
 * @title Generic swap and shared ownership
 * @description Write a generic swap taking two values by mutable reference. Wrap two values of the same kind in shared ownership handles, swap the owned values, print them before and after the swap, and print each handle's owner count.
 * @input stdin
 * @output stdout
 * @timeout 1000
 * @test name="swap int" input="5 10" expected="Antes: 5 10\nDepois: 10 5\nRefs: 1 1"
 * @test name="swap double" input="3.14 2.71" expected="Antes: 3.14 2.71\nDepois: 2.71 3.14\nRefs: 1 1"
 */"#;

/// Swaps two shared values and reports their owner counts.
pub struct SharedSwap;

impl Exercise for SharedSwap {
    fn id(&self) -> &'static str {
        "shared-swap"
    }

    fn metadata_source(&self) -> &'static str {
        METADATA
    }

    fn run(&self, input: &str, out: &mut dyn Write) -> Result<()> {
        let mut tokens = Tokens::new(input);
        let first = tokens.next_raw("first value")?;
        let second = tokens.next_raw("second value")?;
        tokens.finish()?;

        // Integers when both tokens are integers, floating-point otherwise.
        if let (Ok(a), Ok(b)) = (first.parse::<i64>(), second.parse::<i64>()) {
            return swap_and_report(Shared::new(a), Shared::new(b), out);
        }
        match (first.parse::<f64>(), second.parse::<f64>()) {
            (Ok(a), Ok(b)) => swap_and_report(Shared::new(a), Shared::new(b), out),
            _ => bail!("expected two numbers, got {first:?} and {second:?}"),
        }
    }
}

/// Print both values, swap them, print them again, then print owner counts.
pub fn swap_and_report<T: Render>(a: Shared<T>, b: Shared<T>, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Antes: {} {}", a.borrow().render(), b.borrow().render())?;
    swap_shared(&a, &b);
    writeln!(out, "Depois: {} {}", a.borrow().render(), b.borrow().render())?;
    writeln!(out, "Refs: {} {}", a.owners(), b.owners())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::run_to_string;

    #[test]
    fn swaps_integers() {
        assert_eq!(
            run_to_string(&SharedSwap, "5 10").expect("run"),
            "Antes: 5 10\nDepois: 10 5\nRefs: 1 1\n"
        );
    }

    #[test]
    fn swaps_doubles() {
        assert_eq!(
            run_to_string(&SharedSwap, "3.14 2.71").expect("run"),
            "Antes: 3.14 2.71\nDepois: 2.71 3.14\nRefs: 1 1\n"
        );
    }

    #[test]
    fn mixed_kinds_promote_to_floating_point() {
        assert_eq!(
            run_to_string(&SharedSwap, "2 0.5").expect("run"),
            "Antes: 2 0.5\nDepois: 0.5 2\nRefs: 1 1\n"
        );
    }

    #[test]
    fn reports_extra_owners() {
        let a = Shared::new(1_i64);
        let b = Shared::new(2_i64);
        let _alias = b.clone();
        let mut out = Vec::new();
        swap_and_report(a, b, &mut out).expect("report");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.ends_with("Refs: 1 2\n"));
    }

    #[test]
    fn rejects_non_numeric_input() {
        assert!(run_to_string(&SharedSwap, "five ten").is_err());
        assert!(run_to_string(&SharedSwap, "5").is_err());
    }
}
