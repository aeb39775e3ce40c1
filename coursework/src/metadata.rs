//! Exercise metadata block parsing and validation.
//!
//! Every exercise declares its contract in a doc-comment block:
//!
//! ```text
//! /**
//!  * @exercise Basics - Exercise 1
//!  * @title Sum of two numbers
//!  * @description Read two integers and print their sum.
//!  * @input stdin
//!  * @output stdout
//!  * @timeout 1000
//!  * @test name="basic" input="5 3" expected="8"
//!  */
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result, anyhow, bail};
use regex::Regex;
use tracing::{debug, instrument};

/// Timeout used when a block omits `@timeout` and no config overrides it.
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

static TAG_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@([A-Za-z_]+)(?:\s+(.*))?$").expect("tag regex compiles")
});

static TEST_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([a-z]+)="((?:[^"\\]|\\.)*)""#).expect("test field regex compiles")
});

/// Parsed metadata for one exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseMeta {
    /// Display name, e.g. `Basics - Exercise 1`.
    pub exercise: String,
    pub title: String,
    pub description: String,
    /// Input stream kind. Only `stdin` is supported.
    pub input: String,
    /// Output stream kind. Only `stdout` is supported.
    pub output: String,
    pub timeout_ms: u64,
    pub tests: Vec<TestCase>,
}

/// A literal input/expected-output pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub name: String,
    pub input: String,
    pub expected: String,
}

/// A metadata block found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMetadata {
    pub path: PathBuf,
    pub meta: ExerciseMeta,
}

impl ExerciseMeta {
    /// Parse and validate a metadata block, defaulting `@timeout` to `default_timeout_ms`.
    ///
    /// `source` is either a bare block body or text holding a `/** ... */`
    /// block with an `@exercise` tag (see [`find_metadata_block`]).
    pub fn parse(source: &str, default_timeout_ms: u64) -> Result<Self> {
        let body = if source.contains("/**") {
            find_metadata_block(source)?
                .ok_or_else(|| anyhow!("no /** ... */ block carries an @exercise tag"))?
        } else {
            source
        };

        let mut exercise = None;
        let mut title = None;
        let mut description = None;
        let mut input = None;
        let mut output = None;
        let mut timeout_ms = None;
        let mut tests = Vec::new();

        for (line_no, line) in block_lines(body).enumerate() {
            let Some(caps) = TAG_LINE.captures(line) else {
                continue;
            };
            let tag = &caps[1];
            let value = caps.get(2).map_or("", |m| m.as_str()).trim();
            match tag {
                "exercise" => set_once(&mut exercise, tag, value.to_string())?,
                "title" => set_once(&mut title, tag, value.to_string())?,
                "description" => set_once(&mut description, tag, value.to_string())?,
                "input" => set_once(&mut input, tag, value.to_string())?,
                "output" => set_once(&mut output, tag, value.to_string())?,
                "timeout" => {
                    let ms = value
                        .parse::<u64>()
                        .with_context(|| format!("@timeout must be milliseconds, got {value:?}"))?;
                    set_once(&mut timeout_ms, tag, ms)?;
                }
                "test" => tests.push(
                    parse_test(value).with_context(|| format!("@test on block line {}", line_no + 1))?,
                ),
                other => debug!(tag = other, "ignoring unknown metadata tag"),
            }
        }

        let meta = ExerciseMeta {
            exercise: exercise.ok_or_else(|| anyhow!("@exercise is required"))?,
            title: title.ok_or_else(|| anyhow!("@title is required"))?,
            description: description.unwrap_or_default(),
            input: input.unwrap_or_else(|| "stdin".to_string()),
            output: output.unwrap_or_else(|| "stdout".to_string()),
            timeout_ms: timeout_ms.unwrap_or(default_timeout_ms),
            tests,
        };
        meta.validate()?;
        Ok(meta)
    }

    fn validate(&self) -> Result<()> {
        if self.exercise.trim().is_empty() {
            bail!("@exercise must be non-empty");
        }
        if self.title.trim().is_empty() {
            bail!("@title must be non-empty");
        }
        if self.input != "stdin" {
            bail!("@input must be stdin, got {:?}", self.input);
        }
        if self.output != "stdout" {
            bail!("@output must be stdout, got {:?}", self.output);
        }
        if self.timeout_ms == 0 {
            bail!("@timeout must be > 0");
        }
        if self.tests.is_empty() {
            bail!("at least one @test is required");
        }
        let mut seen = BTreeSet::new();
        for (index, test) in self.tests.iter().enumerate() {
            if test.name.trim().is_empty() {
                bail!("tests[{}] name must be non-empty", index);
            }
            if !seen.insert(test.name.as_str()) {
                bail!("duplicate test name {:?}", test.name);
            }
        }
        Ok(())
    }
}

fn set_once<T>(slot: &mut Option<T>, tag: &str, value: T) -> Result<()> {
    if slot.is_some() {
        bail!("@{tag} may appear only once");
    }
    *slot = Some(value);
    Ok(())
}

/// Body of the `/** ... */` block that carries an `@exercise` tag line.
///
/// Other blocks (licence headers, API docs) are skipped. Returns `None` when
/// no block qualifies and errors when more than one does.
pub fn find_metadata_block(source: &str) -> Result<Option<&str>> {
    let mut found = None;
    let mut rest = source;
    while let Some(start) = rest.find("/**") {
        let after = &rest[start + 3..];
        let (body, next) = match after.find("*/") {
            Some(end) => (&after[..end], &after[end + 2..]),
            None => (after, ""),
        };
        if has_exercise_tag(body) {
            if found.is_some() {
                bail!("more than one /** ... */ block carries an @exercise tag");
            }
            found = Some(body);
        }
        rest = next;
    }
    Ok(found)
}

fn has_exercise_tag(body: &str) -> bool {
    block_lines(body).any(|line| {
        TAG_LINE
            .captures(line)
            .is_some_and(|caps| &caps[1] == "exercise")
    })
}

/// Block body lines with the leading `*` stripped.
fn block_lines(body: &str) -> impl Iterator<Item = &str> {
    body.lines().map(|line| {
        let line = line.trim();
        line.strip_prefix('*').unwrap_or(line).trim()
    })
}

fn parse_test(value: &str) -> Result<TestCase> {
    let mut name = None;
    let mut input = None;
    let mut expected = None;
    for caps in TEST_FIELD.captures_iter(value) {
        let field = unescape(&caps[2])?;
        match &caps[1] {
            "name" => name = Some(field),
            "input" => input = Some(field),
            "expected" => expected = Some(field),
            other => bail!("unknown @test field {other:?}"),
        }
    }
    Ok(TestCase {
        name: name.ok_or_else(|| anyhow!("@test is missing name=\"...\""))?,
        input: input.ok_or_else(|| anyhow!("@test is missing input=\"...\""))?,
        expected: expected.ok_or_else(|| anyhow!("@test is missing expected=\"...\""))?,
    })
}

fn unescape(raw: &str) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => bail!("unsupported escape \\{other}"),
            None => bail!("dangling backslash"),
        }
    }
    Ok(out)
}

/// Discover and parse every metadata block under `dir`.
///
/// Returns entries sorted by path. Errors if two blocks share an `@exercise` name.
#[instrument(skip_all, fields(dir = %dir.display()))]
pub fn discover_metadata(dir: &Path, default_timeout_ms: u64) -> Result<Vec<SourceMetadata>> {
    if !dir.exists() {
        bail!("directory {} does not exist", dir.display());
    }
    let mut files = Vec::new();
    collect_files(dir, &mut files)?;
    files.sort();

    let mut found = Vec::new();
    for path in files {
        let Ok(contents) = fs::read_to_string(&path) else {
            debug!(path = %path.display(), "skipping non-utf8 file");
            continue;
        };
        let Some(block) = find_metadata_block(&contents)
            .with_context(|| format!("scan metadata in {}", path.display()))?
        else {
            debug!(path = %path.display(), "no metadata block");
            continue;
        };
        let meta = ExerciseMeta::parse(block, default_timeout_ms)
            .with_context(|| format!("parse metadata in {}", path.display()))?;
        debug!(path = %path.display(), exercise = %meta.exercise, "metadata found");
        found.push(SourceMetadata { path, meta });
    }

    let mut names = BTreeSet::new();
    for entry in &found {
        if !names.insert(entry.meta.exercise.as_str()) {
            bail!(
                "duplicate @exercise {:?} in {}",
                entry.meta.exercise,
                entry.path.display()
            );
        }
    }
    Ok(found)
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry.context("read dir entry")?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}
