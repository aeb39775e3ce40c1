//! Introductory exercise programs: list, show, run, verify and lint.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use coursework::config::{CONFIG_FILE, load_config};
use coursework::exercise::ExerciseRegistry;
use coursework::{cli, exit_codes, logging};

#[derive(Parser)]
#[command(
    name = "coursework",
    version,
    about = "Introductory exercise programs and their test tables"
)]
struct Cli {
    /// Path to the TOML config (defaults apply when missing).
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List built-in exercises.
    List,
    /// Print an exercise's metadata and test cases.
    Show { id: String },
    /// Run an exercise on stdin.
    Run { id: String },
    /// Check exercises against their declared test cases.
    Verify {
        /// Exercise id (all exercises when omitted).
        id: Option<String>,
        /// Print judgments as JSON.
        #[arg(long)]
        json: bool,
        /// Also write one `<id>.json` judgment per exercise into this directory.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Aggregate judgment files written by `verify --out`.
    Report { dir: PathBuf },
    /// Validate metadata blocks in source files under a directory.
    Lint { dir: PathBuf },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let cfg = load_config(&cli.config)?;
    let registry = ExerciseRegistry::builtin();
    match cli.command {
        Command::List => cli::list_exercises(&registry, &cfg).map(|()| exit_codes::OK),
        Command::Show { id } => cli::show_exercise(&registry, &id, &cfg).map(|()| exit_codes::OK),
        Command::Run { id } => cli::run_exercise(&registry, &id).map(|()| exit_codes::OK),
        Command::Verify { id, json, out } => {
            cli::verify(&registry, id.as_deref(), &cfg, json, out.as_deref())
        }
        Command::Report { dir } => cli::report(&dir),
        Command::Lint { dir } => cli::lint(&dir, &cfg).map(|()| exit_codes::OK),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_verify_all() {
        let cli = Cli::parse_from(["coursework", "verify"]);
        assert!(matches!(
            cli.command,
            Command::Verify {
                id: None,
                json: false,
                out: None
            }
        ));
        assert_eq!(cli.config, PathBuf::from(CONFIG_FILE));
    }

    #[test]
    fn parse_verify_one_with_json() {
        let cli = Cli::parse_from(["coursework", "verify", "sum", "--json"]);
        match cli.command {
            Command::Verify { id, json, .. } => {
                assert_eq!(id.as_deref(), Some("sum"));
                assert!(json);
            }
            _ => panic!("expected verify"),
        }
    }

    #[test]
    fn parse_global_config_after_subcommand() {
        let cli = Cli::parse_from(["coursework", "run", "sum", "--config", "alt.toml"]);
        assert!(matches!(cli.command, Command::Run { ref id } if id == "sum"));
        assert_eq!(cli.config, PathBuf::from("alt.toml"));
    }
}
