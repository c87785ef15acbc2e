use attriscope_compat::{diff, parse_summary, report};
use std::path::Path;
use std::process::ExitCode;

pub fn execute(baseline: &Path, candidate: &Path) -> ExitCode {
    let baseline_set = parse_summary(&load_report(baseline));
    let candidate_set = parse_summary(&load_report(candidate));
    let regressions = diff(&baseline_set, &candidate_set);

    print!(
        "{}",
        report::comparison_report(&baseline_set, &candidate_set, &regressions)
    );

    if regressions.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// A missing report degrades to an empty result set with a warning; only
/// the comparison verdict decides the exit status.
fn load_report(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(_) => {
            println!("Warning: file not found: {}", path.display());
            String::new()
        }
    }
}
