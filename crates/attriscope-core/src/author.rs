use serde::{Deserialize, Serialize};

/// Author classification of one checkpoint entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthorKind {
    Human,
    AiAgent,
    AiTab,
}

impl AuthorKind {
    pub fn is_ai(self) -> bool {
        matches!(self, AuthorKind::AiAgent | AuthorKind::AiTab)
    }
}

/// Classify one `checkpoints.jsonl` line by its author-kind marker.
///
/// The attribution tool tags every checkpoint entry with one of the known
/// author kinds; a line without a recognizable marker yields `None` and is
/// dropped by callers.
pub fn classify_checkpoint_line(line: &str) -> Option<AuthorKind> {
    if line.contains("\"AiAgent\"") {
        Some(AuthorKind::AiAgent)
    } else if line.contains("\"AiTab\"") {
        Some(AuthorKind::AiTab)
    } else if line.contains("\"Human\"") {
        Some(AuthorKind::Human)
    } else {
        None
    }
}
