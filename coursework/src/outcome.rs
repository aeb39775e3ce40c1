use serde::{Deserialize, Serialize};

use crate::verify::Judgment;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Every test case passed.
    Complete,
    /// Some, but not all, test cases passed.
    Partial,
    /// No test case passed.
    Failed,
}

pub fn classify_outcome(judgment: &Judgment) -> Outcome {
    let passed = judgment.passed();
    if passed == 0 {
        Outcome::Failed
    } else if passed == judgment.total() {
        Outcome::Complete
    } else {
        Outcome::Partial
    }
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Complete => "complete",
            Outcome::Partial => "partial",
            Outcome::Failed => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::CaseOutcome;

    fn case(passed: bool) -> CaseOutcome {
        CaseOutcome {
            name: "case".to_string(),
            input: "1".to_string(),
            expected: "1".to_string(),
            actual: "1".to_string(),
            actual_truncated: false,
            passed,
            elapsed_ms: 0.1,
            over_timeout: false,
            error: None,
        }
    }

    fn judgment(results: &[bool]) -> Judgment {
        Judgment {
            exercise_id: "sum".to_string(),
            title: "Sum".to_string(),
            metadata_sha256: "hash".to_string(),
            checked_at: "now".to_string(),
            cases: results.iter().copied().map(case).collect(),
        }
    }

    #[test]
    fn complete_when_all_cases_pass() {
        assert_eq!(classify_outcome(&judgment(&[true, true])), Outcome::Complete);
    }

    #[test]
    fn partial_when_some_cases_pass() {
        assert_eq!(classify_outcome(&judgment(&[true, false])), Outcome::Partial);
    }

    #[test]
    fn failed_when_no_case_passes() {
        assert_eq!(classify_outcome(&judgment(&[false, false])), Outcome::Failed);
        assert_eq!(classify_outcome(&judgment(&[])), Outcome::Failed);
    }
}
