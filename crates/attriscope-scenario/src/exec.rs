//! Echoing command runner for the scenario trace.

use crate::error::ScenarioError;
use anyhow::Context;
use std::path::Path;
use std::process::Command;

/// Stderr lines containing any of these substrings are informational
/// chatter from git/gt/git-ai, not genuine errors.
const STDERR_INFO_ALLOWLIST: &[&str] = &[
    "switched to",
    "rebasing",
    "successfully rebased",
    "checkpoint completed",
    "changed",
];

/// Captured result of one external command.
#[derive(Debug)]
pub struct CmdResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CmdResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Probe `program --version`; the first output line serves as the version
/// banner. Called before any repository state exists.
pub fn require_tool(program: &str) -> Result<String, ScenarioError> {
    let output = Command::new(program)
        .arg("--version")
        .output()
        .map_err(|_| ScenarioError::ToolMissing(program.to_string()))?;
    if !output.status.success() {
        return Err(ScenarioError::ToolMissing(program.to_string()));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.lines().next().unwrap_or_default().trim().to_string())
}

/// Run `argv` in `cwd`, echoing the command and its captured output into
/// the trace.
///
/// A non-zero exit is recorded and displayed but tolerated; set `required`
/// for commands whose failure invalidates the whole scenario.
pub fn run(
    argv: &[&str],
    cwd: &Path,
    required: bool,
    label: Option<&str>,
) -> anyhow::Result<CmdResult> {
    if let Some(label) = label {
        println!("  # {label}");
    }
    let display = render_argv(argv);
    println!("  $ {display}");

    let output = Command::new(argv[0])
        .args(&argv[1..])
        .current_dir(cwd)
        .output()
        .with_context(|| format!("failed to spawn '{}'", argv[0]))?;

    let result = CmdResult {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };

    for line in result.stdout.trim().lines() {
        println!("    {line}");
    }
    for line in result.stderr.trim().lines() {
        if is_informational(line) {
            println!("    {line}");
        } else {
            println!("    [stderr] {line}");
        }
    }

    if !result.success() && required {
        println!("    *** COMMAND FAILED (exit {}) ***", result.exit_code);
        return Err(ScenarioError::RequiredCommandFailed {
            cmd: display,
            code: result.exit_code,
        }
        .into());
    }
    Ok(result)
}

fn is_informational(line: &str) -> bool {
    let lower = line.to_lowercase();
    STDERR_INFO_ALLOWLIST
        .iter()
        .any(|marker| lower.contains(marker))
}

/// Shell-ish rendering of an argv for the trace; arguments containing
/// whitespace are quoted.
fn render_argv(argv: &[&str]) -> String {
    argv.iter()
        .map(|arg| {
            if arg.chars().any(char::is_whitespace) {
                format!("\"{arg}\"")
            } else {
                (*arg).to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
