use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::outcome::{Outcome, classify_outcome};
use crate::verify::Judgment;

#[derive(Debug, Default)]
pub struct ReportSummary {
    pub exercises: usize,
    pub complete: usize,
    pub partial: usize,
    pub failed: usize,
    pub cases_passed: usize,
    pub cases_total: usize,
    /// `exercise_id/case name` -> (passed, total) across judgments.
    pub case_pass_rates: BTreeMap<String, (usize, usize)>,
}

impl ReportSummary {
    pub fn add(&mut self, judgment: &Judgment) {
        self.exercises += 1;
        match classify_outcome(judgment) {
            Outcome::Complete => self.complete += 1,
            Outcome::Partial => self.partial += 1,
            Outcome::Failed => self.failed += 1,
        }
        self.cases_passed += judgment.passed();
        self.cases_total += judgment.total();

        for case in &judgment.cases {
            let label = format!("{}/{}", judgment.exercise_id, case.name);
            let entry = self.case_pass_rates.entry(label).or_insert((0, 0));
            if case.passed {
                entry.0 += 1;
            }
            entry.1 += 1;
        }
    }

    pub fn all_passed(&self) -> bool {
        self.cases_passed == self.cases_total
    }
}

pub fn summarize(judgments: &[Judgment]) -> ReportSummary {
    let mut summary = ReportSummary::default();
    for judgment in judgments {
        summary.add(judgment);
    }
    summary
}

pub fn load_judgment_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read {}", dir.display()))? {
        let entry = entry.context("read entry")?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Aggregate every judgment file in `dir`, skipping unreadable ones with a warning.
///
/// Fails when `dir` holds no `.json` files at all.
pub fn aggregate(dir: &Path) -> Result<(ReportSummary, Vec<String>)> {
    let files = load_judgment_files(dir)?;
    if files.is_empty() {
        bail!("no judgment files in {}", dir.display());
    }

    let mut summary = ReportSummary::default();
    let mut warnings = Vec::new();

    for path in files {
        let judgment: Judgment = match fs::read_to_string(&path)
            .with_context(|| format!("read {}", path.display()))
            .and_then(|contents| serde_json::from_str(&contents).context("parse judgment"))
        {
            Ok(judgment) => judgment,
            Err(err) => {
                warnings.push(format!("skip {}: invalid judgment ({err})", path.display()));
                continue;
            }
        };
        summary.add(&judgment);
    }

    Ok((summary, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::ExerciseRegistry;
    use crate::verify::{VerifySettings, verify_exercise, write_judgment};
    use tempfile::tempdir;

    fn builtin_judgments() -> Vec<Judgment> {
        ExerciseRegistry::builtin()
            .iter()
            .map(|exercise| verify_exercise(exercise, &VerifySettings::default()).expect("verify"))
            .collect()
    }

    #[test]
    fn summarizes_builtin_judgments() {
        let summary = summarize(&builtin_judgments());
        assert_eq!(summary.exercises, 3);
        assert_eq!(summary.complete, 3);
        assert_eq!(summary.cases_total, 9);
        assert!(summary.all_passed());
        assert_eq!(summary.case_pass_rates.get("sum/negative"), Some(&(1, 1)));
    }

    #[test]
    fn aggregates_files_and_warns_on_invalid() {
        let temp = tempdir().expect("tempdir");
        let mut judgments = builtin_judgments();
        judgments[0].cases[0].passed = false;
        for judgment in &judgments {
            let path = temp.path().join(format!("{}.json", judgment.exercise_id));
            write_judgment(&path, judgment).expect("write");
        }
        fs::write(temp.path().join("broken.json"), "{not json").expect("broken");
        fs::write(temp.path().join("notes.txt"), "ignored").expect("notes");

        let (summary, warnings) = aggregate(temp.path()).expect("aggregate");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("broken.json"));
        assert_eq!(summary.exercises, 3);
        assert_eq!(summary.complete, 2);
        assert_eq!(summary.partial, 1);
        assert_eq!(summary.cases_passed, 8);
        assert!(!summary.all_passed());
    }

    #[test]
    fn missing_or_empty_dir_is_an_error() {
        let temp = tempdir().expect("tempdir");
        let err = aggregate(&temp.path().join("nope")).expect_err("missing dir");
        assert!(err.to_string().contains("no judgment files"));

        fs::write(temp.path().join("notes.txt"), "ignored").expect("notes");
        let err = aggregate(temp.path()).expect_err("no json files");
        assert!(err.to_string().contains("no judgment files"));
        assert!(load_judgment_files(temp.path()).expect("load").is_empty());
    }
}
