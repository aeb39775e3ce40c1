//! CLI command implementations.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use crate::config::CourseworkConfig;
use crate::exercise::{Exercise, ExerciseRegistry, run_stdio};
use crate::exit_codes;
use crate::metadata::{ExerciseMeta, discover_metadata};
use crate::outcome::classify_outcome;
use crate::report::{ReportSummary, aggregate, summarize};
use crate::verify::{Judgment, VerifySettings, verify_exercise, write_judgment};

/// List every built-in exercise with its title.
pub fn list_exercises(registry: &ExerciseRegistry, cfg: &CourseworkConfig) -> Result<()> {
    let mut rows = Vec::new();
    for exercise in registry.iter() {
        let meta = exercise.metadata(cfg.default_timeout_ms)?;
        rows.push((exercise.id(), meta.title));
    }
    let width = rows.iter().map(|(id, _)| id.len()).max().unwrap_or(0);
    for (id, title) in rows {
        println!("{id:<width$}  {title}");
    }
    Ok(())
}

/// Print an exercise's metadata and test table.
pub fn show_exercise(registry: &ExerciseRegistry, id: &str, cfg: &CourseworkConfig) -> Result<()> {
    let exercise = registry.get(id)?;
    let meta = exercise.metadata(cfg.default_timeout_ms)?;
    print!("{}", render_meta(exercise.id(), &meta));
    Ok(())
}

/// Run an exercise on stdin, exactly like its standalone binary.
pub fn run_exercise(registry: &ExerciseRegistry, id: &str) -> Result<()> {
    let exercise = registry.get(id)?;
    debug!(exercise = id, "running on stdin");
    run_stdio(exercise)
}

/// Verify one exercise (or all) against declared test cases.
///
/// Returns `exit_codes::FAILED` when any case fails.
pub fn verify(
    registry: &ExerciseRegistry,
    id: Option<&str>,
    cfg: &CourseworkConfig,
    json: bool,
    out_dir: Option<&Path>,
) -> Result<i32> {
    let selected: Vec<&dyn Exercise> = match id {
        Some(id) => vec![registry.get(id)?],
        None => registry.iter().collect(),
    };
    let settings = VerifySettings::from(cfg);

    let mut judgments = Vec::with_capacity(selected.len());
    for exercise in selected {
        judgments.push(verify_exercise(exercise, &settings)?);
    }

    if let Some(dir) = out_dir {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        for judgment in &judgments {
            write_judgment(&dir.join(format!("{}.json", judgment.exercise_id)), judgment)?;
        }
        info!(dir = %dir.display(), count = judgments.len(), "judgments written");
    }

    let summary = summarize(&judgments);
    if json {
        let payload = serde_json::to_string_pretty(&judgments).context("serialize judgments")?;
        println!("{payload}");
    } else {
        for judgment in &judgments {
            print!("{}", render_judgment(judgment));
        }
        print!("{}", render_summary(&summary));
    }

    Ok(if summary.all_passed() {
        exit_codes::OK
    } else {
        exit_codes::FAILED
    })
}

/// Show aggregated results for a directory of judgment files.
pub fn report(dir: &Path) -> Result<i32> {
    let (summary, warnings) = aggregate(dir)?;
    for warning in &warnings {
        eprintln!("warning: {}", warning);
    }
    if summary.exercises == 0 {
        bail!("no valid judgment files in {}", dir.display());
    }
    print!("{}", render_summary(&summary));
    for (label, (passed, total)) in &summary.case_pass_rates {
        println!("report: case {} {}/{}", label, passed, total);
    }
    Ok(if summary.all_passed() {
        exit_codes::OK
    } else {
        exit_codes::FAILED
    })
}

/// Discover and validate metadata blocks in source files under `dir`.
pub fn lint(dir: &Path, cfg: &CourseworkConfig) -> Result<()> {
    let found = discover_metadata(dir, cfg.default_timeout_ms)?;
    for entry in &found {
        println!(
            "lint: path={} exercise={:?} tests={} timeout_ms={}",
            entry.path.display(),
            entry.meta.exercise,
            entry.meta.tests.len(),
            entry.meta.timeout_ms
        );
    }
    println!("lint: ok blocks={}", found.len());
    Ok(())
}

fn render_meta(id: &str, meta: &ExerciseMeta) -> String {
    let mut out = String::new();
    out.push_str(&format!("id: {id}\n"));
    out.push_str(&format!("exercise: {}\n", meta.exercise));
    out.push_str(&format!("title: {}\n", meta.title));
    if !meta.description.is_empty() {
        out.push_str(&format!("description: {}\n", meta.description));
    }
    out.push_str(&format!(
        "streams: {} -> {}\ntimeout_ms: {}\n",
        meta.input, meta.output, meta.timeout_ms
    ));
    for test in &meta.tests {
        out.push_str(&format!(
            "test: {:?} input={:?} expected={:?}\n",
            test.name, test.input, test.expected
        ));
    }
    out
}

fn render_judgment(judgment: &Judgment) -> String {
    let mut out = format!(
        "verify: exercise={} passed={}/{} outcome={}\n",
        judgment.exercise_id,
        judgment.passed(),
        judgment.total(),
        classify_outcome(judgment).label()
    );
    for case in judgment.cases.iter().filter(|case| !case.passed) {
        out.push_str(&format!(
            "  fail: {:?} input={:?} expected={:?} actual={:?}",
            case.name, case.input, case.expected, case.actual
        ));
        if let Some(err) = &case.error {
            out.push_str(&format!(" error={err:?}"));
        }
        if case.over_timeout {
            out.push_str(&format!(" over_timeout elapsed_ms={:.1}", case.elapsed_ms));
        }
        out.push('\n');
    }
    out
}

fn render_summary(summary: &ReportSummary) -> String {
    format!(
        "report: exercises={} complete={} partial={} failed={} cases={}/{}\n",
        summary.exercises,
        summary.complete,
        summary.partial,
        summary.failed,
        summary.cases_passed,
        summary.cases_total
    )
}
