//! Console rendering for snapshots and working-log inventories.
//!
//! Shared by the scenario driver and `attriscope inspect` so both show
//! the same shape of report.

use attriscope_core::{pct, short_sha, AttributionSnapshot, WorkingLogRecord, WorkingLogStatus};
use std::fmt::Write;

/// Render one labeled snapshot block.
///
/// `expected` documents intent — it is printed, never asserted.
pub fn snapshot_report(
    label: &str,
    expected: Option<&str>,
    snap: &AttributionSnapshot,
) -> String {
    let mut out = String::new();
    let rule = "─".repeat(60);
    let _ = writeln!(out, "\n  {rule}");
    let _ = writeln!(out, "  ATTRIBUTION: {label}");
    if let Some(expected) = expected {
        let _ = writeln!(out, "  Expected: {expected}");
    }
    let _ = writeln!(out, "  {rule}");

    match &snap.committed {
        Some(cs) => {
            let total = cs.git_diff_added_lines;
            let _ = writeln!(out, "  Committed (HEAD note):");
            let _ = writeln!(
                out,
                "    AI accepted:     {:3} lines ({} of {} additions)",
                cs.ai_accepted,
                pct(cs.ai_accepted, total),
                total
            );
            let _ = writeln!(
                out,
                "    Human additions: {:3} lines ({} of {} additions)",
                cs.human_additions,
                pct(cs.human_additions, total),
                total
            );
            for (tool, stats) in &cs.tool_model_breakdown {
                let _ = writeln!(out, "    Tool: {tool} -> {} accepted", stats.ai_accepted);
            }
        }
        None => {
            let _ = writeln!(out, "  Committed: (unavailable)");
        }
    }

    match &snap.uncommitted {
        Some(ps) => {
            let _ = writeln!(out, "  Uncommitted (working log + INITIAL):");
            let _ = writeln!(
                out,
                "    AI additions:    {:3} lines (tracked, attributed to AI on commit)",
                ps.stats.ai_additions
            );
            let _ = writeln!(
                out,
                "    Human additions: {:3} lines",
                ps.stats.human_additions
            );
            let _ = writeln!(out, "    Checkpoints:     {}", ps.checkpoints.len());
            for cp in &ps.checkpoints {
                let kind = if cp.is_human { "Human" } else { "AI" };
                let _ = writeln!(
                    out,
                    "      [{kind}] {}: +{} lines ({})",
                    cp.tool_model, cp.additions, cp.time_ago
                );
            }
        }
        None => {
            let _ = writeln!(out, "  Uncommitted: (unavailable)");
        }
    }

    out
}

/// Render the working-log inventory. `records` is `None` when the
/// working-log root does not exist; `head` marks the current HEAD SHA.
pub fn working_logs_report(records: Option<&[WorkingLogRecord]>, head: Option<&str>) -> String {
    let mut out = String::new();
    let Some(records) = records else {
        out.push_str("  Working logs: (directory does not exist)\n");
        return out;
    };

    let noun = if records.len() == 1 {
        "directory"
    } else {
        "directories"
    };
    let _ = writeln!(out, "  Working logs ({} {noun}):", records.len());
    if records.is_empty() {
        out.push_str("    (empty)\n");
        return out;
    }

    for record in records {
        let status = match &record.status {
            WorkingLogStatus::ShaGone => "SHA GONE".to_string(),
            WorkingLogStatus::Orphaned => "ORPHANED".to_string(),
            WorkingLogStatus::Live(branches) => format!("LIVE ({})", branches.join(", ")),
        };
        let marker = if head == Some(record.sha.as_str()) {
            " <-- HEAD"
        } else {
            ""
        };
        let _ = writeln!(out, "\n    [{}] {status}{marker}", short_sha(&record.sha));

        match &record.initial {
            Some(initial) => {
                for (file, ranges) in &initial.files {
                    let spans: Vec<String> = ranges
                        .iter()
                        .map(|r| format!("L{}-{}", r.start_line, r.end_line))
                        .collect();
                    let _ = writeln!(out, "      INITIAL: {file} -> {}", spans.join(", "));
                }
            }
            None => out.push_str("      INITIAL: (none)\n"),
        }

        if record.checkpoints.is_empty() {
            out.push_str("      Checkpoints: (none)\n");
        } else {
            let _ = writeln!(
                out,
                "      Checkpoints: {} ({} AI, {} Human)",
                record.checkpoints.len(),
                record.ai_checkpoints(),
                record.human_checkpoints()
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use attriscope_core::{
        AuthorKind, Checkpoint, CommittedStats, InitialAttributions, LineRange, PendingStatus,
        ToolModelStats,
    };

    fn committed(ai: u64, human: u64, total: u64) -> CommittedStats {
        CommittedStats {
            ai_accepted: ai,
            human_additions: human,
            git_diff_added_lines: total,
            tool_model_breakdown: [("mock_ai".to_string(), ToolModelStats { ai_accepted: ai })]
                .into_iter()
                .collect(),
        }
    }

    #[test]
    fn snapshot_report_full() {
        let mut pending = PendingStatus::default();
        pending.stats.ai_additions = 8;
        pending.checkpoints.push(Checkpoint {
            tool_model: "mock_ai".into(),
            additions: 8,
            time_ago: "1m ago".into(),
            is_human: false,
        });
        let snap = AttributionSnapshot::from_parts(Some(committed(10, 0, 10)), Some(pending));

        let report = snapshot_report("After create", Some("10/10 AI"), &snap);
        assert!(report.contains("ATTRIBUTION: After create"));
        assert!(report.contains("Expected: 10/10 AI"));
        assert!(report.contains("AI accepted:      10 lines (100% of 10 additions)"));
        assert!(report.contains("Tool: mock_ai -> 10 accepted"));
        assert!(report.contains("Checkpoints:     1"));
        assert!(report.contains("[AI] mock_ai: +8 lines (1m ago)"));
    }

    #[test]
    fn snapshot_report_unavailable_halves() {
        let snap = AttributionSnapshot::from_parts(None, None);
        let report = snapshot_report("Baseline", None, &snap);
        assert!(report.contains("Committed: (unavailable)"));
        assert!(report.contains("Uncommitted: (unavailable)"));
        assert!(!report.contains("Expected:"));
    }

    #[test]
    fn snapshot_report_zero_total_uses_na() {
        let snap = AttributionSnapshot::from_parts(Some(committed(0, 0, 0)), None);
        let report = snapshot_report("Empty", None, &snap);
        assert!(report.contains("(N/A of 0 additions)"));
    }

    #[test]
    fn working_logs_report_missing_root() {
        let report = working_logs_report(None, None);
        assert!(report.contains("(directory does not exist)"));
    }

    #[test]
    fn working_logs_report_empty() {
        let report = working_logs_report(Some(&[]), None);
        assert!(report.contains("Working logs (0 directories):"));
        assert!(report.contains("(empty)"));
    }

    #[test]
    fn working_logs_report_statuses_and_head_marker() {
        let live_sha = "b".repeat(40);
        let records = vec![
            WorkingLogRecord {
                sha: "a".repeat(40),
                status: WorkingLogStatus::Orphaned,
                initial: Some(InitialAttributions {
                    files: [(
                        "utils.py".to_string(),
                        vec![LineRange {
                            start_line: 1,
                            end_line: 8,
                            author_id: "mock_ai".into(),
                        }],
                    )]
                    .into_iter()
                    .collect(),
                }),
                checkpoints: vec![AuthorKind::AiAgent],
            },
            WorkingLogRecord {
                sha: live_sha.clone(),
                status: WorkingLogStatus::Live(vec!["feature/ai-work".into()]),
                initial: None,
                checkpoints: vec![],
            },
        ];

        let report = working_logs_report(Some(&records), Some(&live_sha));
        assert!(report.contains("Working logs (2 directories):"));
        assert!(report.contains("[aaaaaaaa] ORPHANED"));
        assert!(report.contains("INITIAL: utils.py -> L1-8"));
        assert!(report.contains("Checkpoints: 1 (1 AI, 0 Human)"));
        assert!(report.contains("[bbbbbbbb] LIVE (feature/ai-work) <-- HEAD"));
        assert!(report.contains("INITIAL: (none)"));
        assert!(report.contains("Checkpoints: (none)"));
    }
}
