//! Rendering for the comparison verdict.

use crate::{condense, TestFailureSet};
use std::collections::BTreeSet;
use std::fmt::Write;

/// Fixed recipe for reproducing a regressed test locally, against the
/// upstream git test suite with the attribution tool wrapped in as `git`.
const REPRODUCTION_RECIPE: &str = "\
To reproduce locally:
  1. Clone the git repository: git clone https://github.com/git/git.git
  2. Build git-ai: cargo build --release
  3. Set up gitwrap: mkdir -p ~/.git-ai-test/gitwrap/bin && ln -sf $(pwd)/target/release/git-ai ~/.git-ai-test/gitwrap/bin/git
  4. Run the failing test: cd git/t && GIT_TEST_INSTALLED=~/.git-ai-test/gitwrap/bin ./<test>.sh -v";

fn total(set: &TestFailureSet) -> usize {
    set.values().map(BTreeSet::len).sum()
}

/// Render the full comparison report. The caller maps the emptiness of
/// `regressions` to the process exit status.
pub fn comparison_report(
    baseline: &TestFailureSet,
    candidate: &TestFailureSet,
    regressions: &TestFailureSet,
) -> String {
    let mut out = String::new();
    out.push_str("=== Git Compatibility Test Analysis ===\n\n");
    let _ = writeln!(
        out,
        "Baseline (standard git) failures: {} subtests in {} tests",
        total(baseline),
        baseline.len()
    );
    let _ = writeln!(
        out,
        "Candidate (git-ai) failures:      {} subtests in {} tests",
        total(candidate),
        candidate.len()
    );
    out.push('\n');

    if regressions.is_empty() {
        out.push_str("✓ No regressions detected.\n");
        out.push_str("All test failures (if any) also occur with standard git.\n");
        return out;
    }

    out.push_str("✗ Regressions detected: tests that fail with git-ai but not with standard git:\n\n");
    for (test, indices) in regressions {
        let _ = writeln!(out, "  {test}: subtests {}", condense(indices));
    }
    out.push('\n');
    out.push_str("These failures are caused by git-ai and must be investigated.\n\n");
    out.push_str(REPRODUCTION_RECIPE);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{diff, parse_summary};

    const CANDIDATE_REPORT: &str = "\
Test Summary Report
-------------------
t1234-example.sh   (Wstat: 256 Tests: 20 Failed: 4)
  Failed tests:  3-5, 9
";

    #[test]
    fn clean_baseline_flags_candidate_failures() {
        let baseline = parse_summary("all green\n");
        let candidate = parse_summary(CANDIDATE_REPORT);
        let regressions = diff(&baseline, &candidate);

        assert_eq!(regressions.len(), 1);
        assert_eq!(
            regressions["t1234-example.sh"],
            [3, 4, 5, 9].into_iter().collect::<BTreeSet<u32>>()
        );
        let report = comparison_report(&baseline, &candidate, &regressions);
        assert!(report.contains("Baseline (standard git) failures: 0 subtests in 0 tests"));
        assert!(report.contains("Candidate (git-ai) failures:      4 subtests in 1 tests"));
        assert!(report.contains("t1234-example.sh: subtests 3-5, 9"));
        assert!(report.contains("✗ Regressions detected"));
        assert!(report.contains("GIT_TEST_INSTALLED"));
    }

    #[test]
    fn identical_reports_are_clean() {
        let baseline = parse_summary(CANDIDATE_REPORT);
        let candidate = parse_summary(CANDIDATE_REPORT);
        let regressions = diff(&baseline, &candidate);

        assert!(regressions.is_empty());
        let report = comparison_report(&baseline, &candidate, &regressions);
        assert!(report.contains("✓ No regressions detected."));
        assert!(!report.contains("To reproduce locally"));
    }

    #[test]
    fn regressed_files_are_listed_in_sorted_order() {
        let baseline = TestFailureSet::new();
        let mut candidate = TestFailureSet::new();
        candidate.insert("t2000-b.sh".into(), [1].into_iter().collect());
        candidate.insert("t1000-a.sh".into(), [2].into_iter().collect());
        let regressions = diff(&baseline, &candidate);

        let report = comparison_report(&baseline, &candidate, &regressions);
        let a = report.find("t1000-a.sh").unwrap();
        let b = report.find("t2000-b.sh").unwrap();
        assert!(a < b);
    }
}
