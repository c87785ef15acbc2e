//! Regression differ for prove-style test-harness reports.
//!
//! Parsing human-oriented report text is a fragile sub-protocol; the
//! pattern matching lives behind [`parse_summary`] with fixture-based
//! tests so a report-format change touches exactly one place.

pub mod diff;
pub mod indices;
pub mod report;
pub mod summary;

use std::collections::{BTreeMap, BTreeSet};

/// Failing sub-test indices per test file, for one harness run.
pub type TestFailureSet = BTreeMap<String, BTreeSet<u32>>;

pub use diff::diff;
pub use indices::condense;
pub use summary::parse_summary;
