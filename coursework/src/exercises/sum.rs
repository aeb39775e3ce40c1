use std::io::Write;

use anyhow::{Result, anyhow};

use crate::exercise::Exercise;
use crate::input::Tokens;

const METADATA: &str = r#"/**
 * @exercise Example - Exercise 1
 * @title Sum of two numbers
 * @description Read two integers and print their sum.
 * @input stdin
 * @output stdout
 * @timeout 1000
 * @test name="basic" input="5 3" expected="8"
 * @test name="with zero" input="0 5" expected="5"
 * @test name="negative" input="-3 7" expected="4"
 * @test name="large" input="1000 2000" expected="3000"
 */"#;

/// Reads two integers and prints their sum.
pub struct Sum;

impl Exercise for Sum {
    fn id(&self) -> &'static str {
        "sum"
    }

    fn metadata_source(&self) -> &'static str {
        METADATA
    }

    fn run(&self, input: &str, out: &mut dyn Write) -> Result<()> {
        let mut tokens = Tokens::new(input);
        let a: i64 = tokens.next("first integer")?;
        let b: i64 = tokens.next("second integer")?;
        tokens.finish()?;

        let sum = a
            .checked_add(b)
            .ok_or_else(|| anyhow!("{a} + {b} overflows a 64-bit integer"))?;
        writeln!(out, "{sum}")?;
        Ok(())
    }
}
