//! The `Test Summary Report` sub-protocol.
//!
//! prove ends a run with a fixed header, a dashes delimiter, then one
//! block per failing test script:
//!
//! ```text
//! Test Summary Report
//! -------------------
//! t1234-example.sh   (Wstat: 256 Tests: 20 Failed: 4)
//!   Failed tests:  3-5, 9
//! ```

use crate::TestFailureSet;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

fn section_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?ms)^Test Summary Report\n-+\n(.*)$").unwrap())
}

fn test_file_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(t\d{4}-.+?\.sh)\s+\(Wstat:").unwrap())
}

fn failed_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*Failed tests?:\s*(.+)$").unwrap())
}

/// Parse the failure-summary section of a prove report into failing
/// sub-test indices per test file.
///
/// A missing section yields an empty map, not an error — a clean run has
/// no summary. Malformed index tokens are skipped.
pub fn parse_summary(report: &str) -> TestFailureSet {
    let mut failures = TestFailureSet::new();
    let Some(section) = section_re().captures(report) else {
        return failures;
    };

    let mut current: Option<String> = None;
    for line in section[1].lines() {
        if let Some(header) = test_file_re().captures(line.trim()) {
            let name = header[1].to_string();
            failures.entry(name.clone()).or_default();
            current = Some(name);
            continue;
        }
        let Some(test) = current.clone() else {
            continue;
        };
        let Some(failed) = failed_re().captures(line) else {
            continue;
        };

        let indices = failures.entry(test).or_default();
        for raw in failed[1].split(|c: char| c == ',' || c.is_whitespace()) {
            // Tokens may carry trailing punctuation; keep digits and hyphens.
            let tok: String = raw
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '-')
                .collect();
            if tok.is_empty() {
                continue;
            }
            if tok.contains('-') {
                match parse_range(&tok) {
                    Some((lo, hi)) => indices.extend(lo..=hi),
                    None => debug!(token = %tok, "skipping malformed range token"),
                }
            } else if let Ok(n) = tok.parse::<u32>() {
                indices.insert(n);
            }
        }
    }
    failures
}

/// `lo-hi` inclusive range token; both endpoints must be bare integers.
fn parse_range(tok: &str) -> Option<(u32, u32)> {
    let (lo, hi) = tok.split_once('-')?;
    Some((lo.parse().ok()?, hi.parse().ok()?))
}
