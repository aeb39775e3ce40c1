//! Whitespace-separated token reading for exercise input.

use std::fmt::Display;
use std::str::{FromStr, SplitWhitespace};

use anyhow::{Result, anyhow, bail};

/// Cursor over the whitespace-separated tokens of an exercise's input.
pub struct Tokens<'a> {
    iter: SplitWhitespace<'a>,
    consumed: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            iter: input.split_whitespace(),
            consumed: 0,
        }
    }

    /// Next raw token. `what` names the value for error messages.
    pub fn next_raw(&mut self, what: &str) -> Result<&'a str> {
        let token = self
            .iter
            .next()
            .ok_or_else(|| anyhow!("missing {what} (token {})", self.consumed + 1))?;
        self.consumed += 1;
        Ok(token)
    }

    /// Next token parsed as `T`.
    pub fn next<T>(&mut self, what: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let token = self.next_raw(what)?;
        token
            .parse()
            .map_err(|err| anyhow!("invalid {what} {token:?}: {err}"))
    }

    /// Fail if any token is left unread.
    pub fn finish(mut self) -> Result<()> {
        if let Some(extra) = self.iter.next() {
            bail!(
                "unexpected trailing input {extra:?} after {} token(s)",
                self.consumed
            );
        }
        Ok(())
    }
}
