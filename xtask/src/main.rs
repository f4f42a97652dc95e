//! Project automation tasks.
//!
//! Run via `cargo xtask <command>`. Each task is a fixed sequence of cargo
//! invocations run from the workspace root.

use std::{path::PathBuf, process};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use xshell::{Shell, cmd};

/// Command line interface for the `xtask` helper.
#[derive(Debug, Parser)]
#[command(name = "xtask")]
struct Cli {
    /// Task to run.
    #[command(subcommand)]
    task: Task,
}

/// Supported automation tasks.
#[derive(Debug, Subcommand)]
enum Task {
    /// Format the workspace, apply clippy fixes, then format again.
    Tidy,
    /// Run the test suite with cargo nextest, then the doctests.
    Test,
    /// Run the geohash codec benchmarks.
    Bench {
        /// Only run benchmarks whose name matches this filter.
        filter: Option<String>,
    },
}

/// Arguments to `cargo` for one step of a task.
type Step = Vec<String>;

/// Split a whitespace-separated argument list into a step.
fn step(args: &str) -> Step {
    args.split_whitespace().map(str::to_owned).collect()
}

impl Task {
    /// The cargo invocations this task runs, in order.
    fn steps(&self) -> Vec<Step> {
        match self {
            Self::Tidy => {
                let fmt = step("+nightly fmt --all");
                vec![
                    fmt.clone(),
                    step("clippy -q --fix --all --all-targets --all-features --allow-dirty"),
                    fmt,
                ]
            }
            Self::Test => vec![
                step("nextest run --all"),
                // Nextest does not run doctests.
                step("test --doc -p geohashkit"),
            ],
            Self::Bench { filter } => {
                let mut bench = step("bench -p geohashkit --bench codec --");
                bench.extend(filter.iter().cloned());
                vec![bench]
            }
        }
    }
}

/// The workspace root, one level above this crate.
fn workspace_root() -> Result<PathBuf> {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(PathBuf::from)
        .context("xtask crate must live at <repo>/xtask")
}

/// Run every step of `task` from the workspace root, stopping at the first
/// failure.
fn run_task(task: &Task) -> Result<()> {
    let sh = Shell::new()?;
    sh.change_dir(workspace_root()?);
    for args in task.steps() {
        let cargo_args = &args;
        cmd!(sh, "cargo {cargo_args...}")
            .run()
            .with_context(|| format!("cargo {} failed", args.join(" ")))?;
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run_task(&cli.task) {
        eprintln!("{err:#}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tidy_formats_around_clippy() {
        let steps = Task::Tidy.steps();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0], steps[2]);
        assert_eq!(steps[1][0], "clippy");
    }

    #[test]
    fn test_runs_doctests_after_nextest() {
        let steps = Task::Test.steps();
        assert_eq!(steps[0], step("nextest run --all"));
        assert_eq!(steps[1], step("test --doc -p geohashkit"));
    }

    #[test]
    fn bench_filter_follows_separator() {
        let unfiltered = Task::Bench { filter: None }.steps();
        assert_eq!(unfiltered[0].last().map(String::as_str), Some("--"));

        let filtered = Task::Bench {
            filter: Some("neighbors".to_owned()),
        }
        .steps();
        assert_eq!(filtered[0].last().map(String::as_str), Some("neighbors"));
    }

    #[test]
    fn root_holds_the_workspace_manifest() -> Result<()> {
        assert!(workspace_root()?.join("Cargo.toml").is_file());
        Ok(())
    }
}
