use crate::TestFailureSet;
use std::collections::BTreeSet;

/// Failures present in `candidate` but absent in `baseline`, per test
/// file. Test files whose difference is empty are omitted entirely, so a
/// rendered report never shows a zero-count entry.
pub fn diff(baseline: &TestFailureSet, candidate: &TestFailureSet) -> TestFailureSet {
    let mut out = TestFailureSet::new();
    for (test, indices) in candidate {
        let exclusive: BTreeSet<u32> = match baseline.get(test) {
            Some(base) => indices.difference(base).copied().collect(),
            None => indices.clone(),
        };
        if !exclusive.is_empty() {
            out.insert(test.clone(), exclusive);
        }
    }
    out
}
