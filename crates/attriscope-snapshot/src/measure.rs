//! Snapshot of the attribution tool's reported state.

use attriscope_core::{AttributionSnapshot, CommittedStats, PendingStatus, Toolchain};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Capture committed and pending attribution for `repo`.
///
/// Either half degrades to `None` when the tool exits non-zero or emits
/// output that does not parse — partial information beats aborting a
/// scenario mid-run. Degraded paths are logged at debug level.
pub fn measure(tc: &Toolchain, repo: &Path) -> AttributionSnapshot {
    let committed: Option<CommittedStats> = query_json(&tc.git_ai, &["stats", "--json"], repo);
    let uncommitted: Option<PendingStatus> = query_json(&tc.git_ai, &["status", "--json"], repo);
    AttributionSnapshot::from_parts(committed, uncommitted)
}

fn query_json<T: DeserializeOwned>(program: &str, args: &[&str], repo: &Path) -> Option<T> {
    let output = match Command::new(program).args(args).current_dir(repo).output() {
        Ok(output) => output,
        Err(e) => {
            debug!(program, ?args, error = %e, "attribution query failed to spawn");
            return None;
        }
    };
    if !output.status.success() {
        debug!(
            program,
            ?args,
            code = output.status.code(),
            "attribution query exited non-zero"
        );
        return None;
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    if stdout.trim().is_empty() {
        debug!(program, ?args, "attribution query produced no output");
        return None;
    }
    match serde_json::from_str::<T>(&stdout) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(program, ?args, error = %e, "attribution query output failed to parse");
            None
        }
    }
}
