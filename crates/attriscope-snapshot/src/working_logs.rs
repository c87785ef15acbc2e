//! On-disk working-log inventory.
//!
//! The attribution tool keeps one directory per tracked commit SHA under
//! `.git/ai/working_logs/`, each holding an `INITIAL` document and a
//! `checkpoints.jsonl` append-log. This module reads that layout without
//! ever writing to it.

use crate::git;
use attriscope_core::{
    classify_checkpoint_line, AuthorKind, InitialAttributions, Toolchain, WorkingLogRecord,
    WorkingLogStatus,
};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

/// Root of the attribution tool's working-log tree for `repo`.
pub fn working_log_root(repo: &Path) -> PathBuf {
    repo.join(".git").join("ai").join("working_logs")
}

/// Directory of the working log tracking `sha`.
pub fn working_log_dir(repo: &Path, sha: &str) -> PathBuf {
    working_log_root(repo).join(sha)
}

/// List every working log under `repo`, oldest first (modification-time
/// order, which mirrors creation order). `None` when the working-log root
/// does not exist at all — distinct from an empty root.
pub fn list_working_logs(tc: &Toolchain, repo: &Path) -> Option<Vec<WorkingLogRecord>> {
    let root = working_log_root(repo);
    let entries = std::fs::read_dir(&root).ok()?;

    let mut dirs: Vec<(SystemTime, PathBuf)> = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let mtime = entry
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        dirs.push((mtime, path));
    }
    dirs.sort_by_key(|(mtime, _)| *mtime);

    let mut records = Vec::with_capacity(dirs.len());
    for (_, dir) in dirs {
        let sha = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        records.push(WorkingLogRecord {
            status: classify_sha(&tc.git, repo, &sha),
            initial: read_initial(&dir),
            checkpoints: read_checkpoints(&dir),
            sha,
        });
    }
    Some(records)
}

/// Reachability of one SHA. Resolvability and branch reachability are
/// tested independently: an object can resolve yet be reachable from no
/// branch, which is exactly the orphaned state this toolkit hunts.
pub fn classify_sha(git: &str, repo: &Path, sha: &str) -> WorkingLogStatus {
    if !git::object_exists(git, repo, sha) {
        return WorkingLogStatus::ShaGone;
    }
    let branches = git::branches_containing(git, repo, sha);
    if branches.is_empty() {
        WorkingLogStatus::Orphaned
    } else {
        WorkingLogStatus::Live(branches)
    }
}

/// Parse a working log's `INITIAL` document, if the file exists.
pub fn read_initial(dir: &Path) -> Option<InitialAttributions> {
    let path = dir.join("INITIAL");
    let text = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&text) {
        Ok(doc) => Some(doc),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "INITIAL failed to parse");
            None
        }
    }
}

fn read_checkpoints(dir: &Path) -> Vec<AuthorKind> {
    let Ok(text) = std::fs::read_to_string(dir.join("checkpoints.jsonl")) else {
        return Vec::new();
    };
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(classify_checkpoint_line)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;

    fn init_repo(dir: &Path) {
        for args in [
            vec!["init", "-b", "main"],
            vec!["config", "user.email", "test@test.com"],
            vec!["config", "user.name", "Test"],
        ] {
            let _ = Command::new("git").args(&args).current_dir(dir).output();
        }
    }

    fn commit_file(dir: &Path, name: &str, content: &str, msg: &str) -> String {
        std::fs::write(dir.join(name), content).unwrap();
        let _ = Command::new("git")
            .args(["add", "."])
            .current_dir(dir)
            .output();
        let _ = Command::new("git")
            .args(["commit", "-m", msg])
            .current_dir(dir)
            .output();
        git::head_sha("git", dir).unwrap()
    }

    fn seed_working_log(repo: &Path, sha: &str, initial: Option<&str>, checkpoints: Option<&str>) {
        let dir = working_log_dir(repo, sha);
        std::fs::create_dir_all(&dir).unwrap();
        if let Some(initial) = initial {
            std::fs::write(dir.join("INITIAL"), initial).unwrap();
        }
        if let Some(checkpoints) = checkpoints {
            std::fs::write(dir.join("checkpoints.jsonl"), checkpoints).unwrap();
        }
    }

    #[test]
    fn missing_root_is_none() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path());
        assert!(list_working_logs(&Toolchain::default(), dir.path()).is_none());
    }

    #[test]
    fn empty_root_is_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path());
        std::fs::create_dir_all(working_log_root(dir.path())).unwrap();
        let records = list_working_logs(&Toolchain::default(), dir.path()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn live_sha_lists_branches() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path());
        let sha = commit_file(dir.path(), "README", "hi", "init");

        assert_eq!(
            classify_sha("git", dir.path(), &sha),
            WorkingLogStatus::Live(vec!["main".into()])
        );
    }

    #[test]
    fn unresolvable_sha_is_gone() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path());
        commit_file(dir.path(), "README", "hi", "init");

        assert_eq!(
            classify_sha("git", dir.path(), &"0".repeat(40)),
            WorkingLogStatus::ShaGone
        );
    }

    #[test]
    fn resolvable_unreachable_sha_is_orphaned() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path());
        let first = commit_file(dir.path(), "README", "v1", "first");
        let second = commit_file(dir.path(), "README", "v2", "second");

        // Rewind main past the second commit: it stays resolvable in the
        // object store but no branch contains it any more.
        let _ = Command::new("git")
            .args(["reset", "--hard", &first])
            .current_dir(dir.path())
            .output();

        assert_eq!(
            classify_sha("git", dir.path(), &second),
            WorkingLogStatus::Orphaned
        );
    }

    #[test]
    fn records_carry_initial_and_checkpoints() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path());
        let sha = commit_file(dir.path(), "README", "hi", "init");

        seed_working_log(
            dir.path(),
            &sha,
            Some(r#"{"files":{"utils.py":[{"start_line":1,"end_line":8,"author_id":"mock_ai"}]}}"#),
            Some("{\"kind\":\"AiAgent\"}\n{\"kind\":\"Human\"}\n"),
        );

        let records = list_working_logs(&Toolchain::default(), dir.path()).unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.sha, sha);
        assert_eq!(record.status, WorkingLogStatus::Live(vec!["main".into()]));
        assert_eq!(record.initial.as_ref().unwrap().total_lines(), 8);
        assert_eq!(record.checkpoints.len(), 2);
        assert_eq!(record.ai_checkpoints(), 1);
        assert_eq!(record.human_checkpoints(), 1);
    }

    #[test]
    fn malformed_initial_degrades_to_none() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path());
        let sha = commit_file(dir.path(), "README", "hi", "init");
        seed_working_log(dir.path(), &sha, Some("not json"), None);

        let records = list_working_logs(&Toolchain::default(), dir.path()).unwrap();
        assert!(records[0].initial.is_none());
        assert!(records[0].checkpoints.is_empty());
    }

    #[test]
    fn listing_orders_by_mtime_oldest_first() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path());
        let sha = commit_file(dir.path(), "README", "hi", "init");

        let older = "a".repeat(40);
        let newer = "b".repeat(40);
        seed_working_log(dir.path(), &older, None, None);
        std::thread::sleep(std::time::Duration::from_millis(20));
        seed_working_log(dir.path(), &newer, None, None);
        std::thread::sleep(std::time::Duration::from_millis(20));
        seed_working_log(dir.path(), &sha, None, None);

        let records = list_working_logs(&Toolchain::default(), dir.path()).unwrap();
        let shas: Vec<&str> = records.iter().map(|r| r.sha.as_str()).collect();
        assert_eq!(shas, vec![older.as_str(), newer.as_str(), sha.as_str()]);
    }
}
