use crate::author::AuthorKind;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Reachability of a tracked commit SHA.
///
/// Recomputed fresh at every listing — rewrites change reachability as a
/// scenario progresses, so caching a status across phases would lie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkingLogStatus {
    /// Object no longer resolvable in the object store.
    ShaGone,
    /// Resolvable but reachable from no named branch — the residue a
    /// history rewrite leaves when it fails to migrate the working log.
    Orphaned,
    /// Reachable from at least one named branch.
    Live(Vec<String>),
}

/// Uncommitted per-file, per-line-range authorship pinned to one SHA,
/// read from that working log's `INITIAL` file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InitialAttributions {
    #[serde(default)]
    pub files: BTreeMap<String, Vec<LineRange>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineRange {
    pub start_line: u64,
    /// Inclusive.
    pub end_line: u64,
    pub author_id: String,
}

impl LineRange {
    pub fn line_count(&self) -> u64 {
        self.end_line.saturating_sub(self.start_line) + 1
    }
}

impl InitialAttributions {
    /// Total attributed lines across all files.
    pub fn total_lines(&self) -> u64 {
        self.files
            .values()
            .flatten()
            .map(LineRange::line_count)
            .sum()
    }
}

/// On-disk working log for one tracked commit SHA.
#[derive(Debug, Clone)]
pub struct WorkingLogRecord {
    pub sha: String,
    pub status: WorkingLogStatus,
    /// Present only while the `INITIAL` file exists on disk.
    pub initial: Option<InitialAttributions>,
    /// One entry per classified checkpoint line, in file order.
    pub checkpoints: Vec<AuthorKind>,
}

impl WorkingLogRecord {
    pub fn ai_checkpoints(&self) -> usize {
        self.checkpoints.iter().filter(|k| k.is_ai()).count()
    }

    pub fn human_checkpoints(&self) -> usize {
        self.checkpoints
            .iter()
            .filter(|k| **k == AuthorKind::Human)
            .count()
    }
}

/// Shorten a SHA to 8 characters for display.
pub fn short_sha(sha: &str) -> &str {
    &sha[..sha.len().min(8)]
}
