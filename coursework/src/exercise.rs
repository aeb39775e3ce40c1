//! The exercise program contract and the built-in registry.

use std::io::{self, Read, Write};

use anyhow::{Context, Result, anyhow};

use crate::exercises::{DynamicArray, SharedSwap, Sum};
use crate::metadata::ExerciseMeta;

/// A self-contained stdin → stdout program with declared test cases.
pub trait Exercise {
    /// Stable slug used on the command line, e.g. `"dynamic-array"`.
    fn id(&self) -> &'static str;

    /// The exercise's metadata block, in `@tag` form.
    fn metadata_source(&self) -> &'static str;

    /// Run the program on `input`, writing its output to `out`.
    fn run(&self, input: &str, out: &mut dyn Write) -> Result<()>;

    fn metadata(&self, default_timeout_ms: u64) -> Result<ExerciseMeta> {
        ExerciseMeta::parse(self.metadata_source(), default_timeout_ms)
            .with_context(|| format!("metadata for {}", self.id()))
    }
}

/// Holds the available exercises in display order.
pub struct ExerciseRegistry {
    exercises: Vec<Box<dyn Exercise>>,
}

impl ExerciseRegistry {
    /// Registry with every built-in exercise.
    pub fn builtin() -> Self {
        Self {
            exercises: vec![Box::new(Sum), Box::new(DynamicArray), Box::new(SharedSwap)],
        }
    }

    pub fn get(&self, id: &str) -> Result<&dyn Exercise> {
        self.exercises
            .iter()
            .find(|exercise| exercise.id() == id)
            .map(|exercise| exercise.as_ref())
            .ok_or_else(|| {
                anyhow!(
                    "unknown exercise {id:?} (known: {})",
                    self.ids().join(", ")
                )
            })
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.exercises.iter().map(|exercise| exercise.id()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Exercise> {
        self.exercises.iter().map(|exercise| exercise.as_ref())
    }
}

impl Default for ExerciseRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Run `exercise` as a standalone program: all of stdin in, stdout out.
pub fn run_stdio(exercise: &dyn Exercise) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("read stdin")?;
    let mut output = Vec::new();
    exercise.run(&input, &mut output)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(&output).context("write stdout")?;
    stdout.flush().context("flush stdout")?;
    Ok(())
}

/// Run `exercise` on `input` and collect its output as text.
pub fn run_to_string(exercise: &dyn Exercise, input: &str) -> Result<String> {
    let mut output = Vec::new();
    exercise.run(input, &mut output)?;
    String::from_utf8(output).context("exercise output is not utf-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::DEFAULT_TIMEOUT_MS;

    #[test]
    fn all_builtins_registered_in_order() {
        let registry = ExerciseRegistry::builtin();
        assert_eq!(registry.ids(), vec!["sum", "dynamic-array", "shared-swap"]);
    }

    #[test]
    fn no_duplicate_ids() {
        let registry = ExerciseRegistry::builtin();
        let ids = registry.ids();
        let mut seen = Vec::new();
        for id in &ids {
            assert!(!seen.contains(id), "duplicate id: {id}");
            seen.push(id);
        }
    }

    #[test]
    fn every_builtin_has_valid_metadata() {
        for exercise in ExerciseRegistry::builtin().iter() {
            let meta = exercise
                .metadata(DEFAULT_TIMEOUT_MS)
                .unwrap_or_else(|err| panic!("{}: {err:#}", exercise.id()));
            assert!(!meta.tests.is_empty(), "{} has no tests", exercise.id());
        }
    }

    #[test]
    fn unknown_id_lists_known_ids() {
        let registry = ExerciseRegistry::builtin();
        let err = registry.get("fizzbuzz").err().expect("unknown id");
        assert!(err.to_string().contains("sum, dynamic-array, shared-swap"));
    }
}
