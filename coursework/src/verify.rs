//! In-process verification of an exercise against its declared test cases.
//!
//! Each test case's literal input is fed to the exercise program and the
//! output is compared with the literal expected output. Nothing is compiled
//! or spawned; this checks the exercise contract, not submissions.

use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, instrument, warn};

use crate::config::{Comparison, CourseworkConfig};
use crate::exercise::{Exercise, run_to_string};
use crate::metadata::TestCase;

/// Settings for a verification pass.
#[derive(Debug, Clone, Copy)]
pub struct VerifySettings {
    pub comparison: Comparison,
    /// Timeout for blocks without `@timeout`.
    pub default_timeout_ms: u64,
    /// Maximum bytes of actual output to record.
    pub output_limit_bytes: usize,
}

impl From<&CourseworkConfig> for VerifySettings {
    fn from(cfg: &CourseworkConfig) -> Self {
        Self {
            comparison: cfg.comparison,
            default_timeout_ms: cfg.default_timeout_ms,
            output_limit_bytes: cfg.output_limit_bytes,
        }
    }
}

impl Default for VerifySettings {
    fn default() -> Self {
        Self::from(&CourseworkConfig::default())
    }
}

/// Collected test case outcomes for one exercise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Judgment {
    pub exercise_id: String,
    pub title: String,
    /// SHA-256 of the metadata block the cases came from.
    pub metadata_sha256: String,
    pub checked_at: String,
    pub cases: Vec<CaseOutcome>,
}

/// Result of running a single test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseOutcome {
    pub name: String,
    pub input: String,
    pub expected: String,
    pub actual: String,
    pub actual_truncated: bool,
    pub passed: bool,
    pub elapsed_ms: f64,
    /// The run took longer than the declared `@timeout`.
    pub over_timeout: bool,
    /// Set when the program rejected the input.
    pub error: Option<String>,
}

impl Judgment {
    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|case| case.passed).count()
    }

    pub fn total(&self) -> usize {
        self.cases.len()
    }
}

/// Run every declared test case of `exercise` and collect outcomes.
#[instrument(skip_all, fields(exercise = exercise.id()))]
pub fn verify_exercise(exercise: &dyn Exercise, settings: &VerifySettings) -> Result<Judgment> {
    let meta = exercise.metadata(settings.default_timeout_ms)?;
    let timeout = Duration::from_millis(meta.timeout_ms);

    let mut cases = Vec::with_capacity(meta.tests.len());
    for test in &meta.tests {
        let outcome = run_case(exercise, test, timeout, settings);
        if outcome.over_timeout {
            warn!(case = %test.name, elapsed_ms = outcome.elapsed_ms, "case exceeded timeout");
        } else {
            debug!(case = %test.name, passed = outcome.passed, "case result");
        }
        cases.push(outcome);
    }

    Ok(Judgment {
        exercise_id: exercise.id().to_string(),
        title: meta.title,
        metadata_sha256: sha256_hex(exercise.metadata_source()),
        checked_at: Utc::now().to_rfc3339(),
        cases,
    })
}

fn run_case(
    exercise: &dyn Exercise,
    test: &TestCase,
    timeout: Duration,
    settings: &VerifySettings,
) -> CaseOutcome {
    let started = Instant::now();
    let result = run_to_string(exercise, &test.input);
    let elapsed = started.elapsed();

    let (mut actual, error) = match result {
        Ok(output) => (output, None),
        Err(err) => (String::new(), Some(format!("{err:#}"))),
    };
    let passed = error.is_none() && outputs_match(&actual, &test.expected, settings.comparison);
    let actual_truncated = truncate_output(&mut actual, settings.output_limit_bytes);
    let over_timeout = elapsed > timeout;

    CaseOutcome {
        name: test.name.clone(),
        input: test.input.clone(),
        expected: test.expected.clone(),
        actual,
        actual_truncated,
        passed: passed && !over_timeout,
        elapsed_ms: elapsed.as_secs_f64() * 1000.0,
        over_timeout,
        error,
    }
}

/// Compare program output with a test case's expected output.
pub fn outputs_match(actual: &str, expected: &str, comparison: Comparison) -> bool {
    match comparison {
        Comparison::Exact => actual == expected,
        Comparison::TrimEnd => normalize(actual) == normalize(expected),
    }
}

fn normalize(text: &str) -> String {
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    lines.join("\n").trim_end().to_string()
}

fn truncate_output(text: &mut String, limit: usize) -> bool {
    if text.len() <= limit {
        return false;
    }
    let mut cut = limit;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
    true
}

fn sha256_hex(contents: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(contents.as_bytes());
    hex::encode(hasher.finalize())
}

/// Write a judgment as pretty JSON with a trailing newline.
pub fn write_judgment(path: &Path, judgment: &Judgment) -> Result<()> {
    let contents = serde_json::to_string_pretty(judgment).context("serialize judgment")?;
    fs::write(path, format!("{contents}\n"))
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
