mod cmd_compare;
mod cmd_inspect;
mod cmd_reproduce;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "attriscope",
    version,
    about = "Diagnostics for git-ai attribution continuity"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

/// External tool names, overridable for wrapped or renamed installs.
#[derive(Args)]
struct ToolchainArgs {
    /// git binary to drive
    #[arg(long, default_value = "git")]
    git_bin: String,
    /// Attribution tracker binary to measure with
    #[arg(long, default_value = "git-ai")]
    git_ai_bin: String,
    /// Stacked-branch CLI binary
    #[arg(long, default_value = "gt")]
    gt_bin: String,
}

impl ToolchainArgs {
    fn toolchain(&self) -> attriscope_core::Toolchain {
        attriscope_core::Toolchain {
            git: self.git_bin.clone(),
            git_ai: self.git_ai_bin.clone(),
            gt: self.gt_bin.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Drive the attribution-continuity scenario against a scratch repository
    Reproduce {
        #[command(flatten)]
        tools: ToolchainArgs,
    },
    /// Snapshot attribution state and working logs for one repository
    Inspect {
        /// Repository path (defaults to the current directory)
        path: Option<PathBuf>,
        #[command(flatten)]
        tools: ToolchainArgs,
    },
    /// Diff two test-harness reports and isolate tracker-caused regressions
    Compare {
        /// Baseline report (standard git run)
        baseline: PathBuf,
        /// Candidate report (git-ai run)
        candidate: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Usage problems exit 1, matching the documented CLI contract.
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match cli.cmd {
        Command::Reproduce { tools } => cmd_reproduce::execute(&tools.toolchain()),
        Command::Inspect { path, tools } => cmd_inspect::execute(path.as_deref(), &tools.toolchain()),
        Command::Compare {
            baseline,
            candidate,
        } => cmd_compare::execute(&baseline, &candidate),
    }
}
