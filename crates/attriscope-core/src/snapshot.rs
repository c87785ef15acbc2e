use serde::Deserialize;
use std::collections::BTreeMap;

/// Committed attribution for HEAD, from the tracker's `stats --json`.
///
/// Every field defaults so partial tool output still deserializes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommittedStats {
    #[serde(default)]
    pub ai_accepted: u64,
    #[serde(default)]
    pub human_additions: u64,
    #[serde(default)]
    pub git_diff_added_lines: u64,
    #[serde(default)]
    pub tool_model_breakdown: BTreeMap<String, ToolModelStats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolModelStats {
    #[serde(default)]
    pub ai_accepted: u64,
}

/// Pending (uncommitted) attribution, from the tracker's `status --json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PendingStatus {
    #[serde(default)]
    pub stats: PendingStats,
    #[serde(default)]
    pub checkpoints: Vec<Checkpoint>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PendingStats {
    #[serde(default)]
    pub ai_additions: u64,
    #[serde(default)]
    pub ai_accepted: u64,
    #[serde(default)]
    pub human_additions: u64,
    #[serde(default)]
    pub total_ai_additions: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Checkpoint {
    #[serde(default = "unknown_tool")]
    pub tool_model: String,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub time_ago: String,
    #[serde(default)]
    pub is_human: bool,
}

fn unknown_tool() -> String {
    "unknown".into()
}

/// Attribution state of one repository at one point in time.
///
/// A `None` half means that measurement was unavailable (the tool failed
/// or produced unparseable output) — distinct from a measured zero.
#[derive(Debug, Clone, Default)]
pub struct AttributionSnapshot {
    pub committed: Option<CommittedStats>,
    pub uncommitted: Option<PendingStatus>,
    /// True iff any committed attribution counts are non-zero for HEAD.
    pub notes_exist: bool,
}

impl AttributionSnapshot {
    pub fn from_parts(
        committed: Option<CommittedStats>,
        uncommitted: Option<PendingStatus>,
    ) -> Self {
        let notes_exist = committed
            .as_ref()
            .map(|c| c.ai_accepted > 0 || c.human_additions > 0)
            .unwrap_or(false);
        Self {
            committed,
            uncommitted,
            notes_exist,
        }
    }
}
