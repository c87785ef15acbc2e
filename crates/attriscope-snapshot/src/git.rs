//! Thin queries over the git CLI.
//!
//! Every query takes the repository path explicitly; nothing consults the
//! process working directory.

use std::path::Path;
use std::process::Command;

/// Full SHA of HEAD, or `None` when the repository has no resolvable HEAD.
pub fn head_sha(git: &str, repo: &Path) -> Option<String> {
    let output = Command::new(git)
        .args(["rev-parse", "HEAD"])
        .current_dir(repo)
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let sha = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if sha.is_empty() {
        None
    } else {
        Some(sha)
    }
}

/// Name of the checked-out branch, or `None` on detached HEAD.
pub fn current_branch(git: &str, repo: &Path) -> Option<String> {
    let output = Command::new(git)
        .args(["branch", "--show-current"])
        .current_dir(repo)
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Whether `sha` resolves to an object in the repository's object store.
pub fn object_exists(git: &str, repo: &Path, sha: &str) -> bool {
    Command::new(git)
        .args(["cat-file", "-t", sha])
        .current_dir(repo)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Names of branches whose history contains `sha`. The `*` marker on the
/// checked-out branch is stripped.
pub fn branches_containing(git: &str, repo: &Path, sha: &str) -> Vec<String> {
    let Ok(output) = Command::new(git)
        .args(["branch", "--contains", sha])
        .current_dir(repo)
        .output()
    else {
        return Vec::new();
    };
    if !output.status.success() {
        return Vec::new();
    }
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| line.trim().trim_start_matches("* ").to_string())
        .filter(|name| !name.is_empty())
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

    fn commit_file(dir: &Path, name: &str, content: &str, msg: &str) {
        std::fs::write(dir.join(name), content).unwrap();
        let _ = Command::new("git")
            .args(["add", "."])
            .current_dir(dir)
            .output();
        let _ = Command::new("git")
            .args(["commit", "-m", msg])
            .current_dir(dir)
            .output();
    }

    #[test]
    fn head_sha_of_fresh_repo() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path());
        assert_eq!(head_sha("git", dir.path()), None);

        commit_file(dir.path(), "README", "hi", "init");
        let sha = head_sha("git", dir.path()).unwrap();
        assert_eq!(sha.len(), 40);
        assert!(sha.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn current_branch_name() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path());
        commit_file(dir.path(), "README", "hi", "init");
        assert_eq!(current_branch("git", dir.path()).as_deref(), Some("main"));
    }

    #[test]
    fn object_exists_for_head_only() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path());
        commit_file(dir.path(), "README", "hi", "init");

        let sha = head_sha("git", dir.path()).unwrap();
        assert!(object_exists("git", dir.path(), &sha));
        assert!(!object_exists("git", dir.path(), &"0".repeat(40)));
    }

    #[test]
    fn branches_containing_head() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path());
        commit_file(dir.path(), "README", "hi", "init");

        let sha = head_sha("git", dir.path()).unwrap();
        let branches = branches_containing("git", dir.path(), &sha);
        assert_eq!(branches, vec!["main".to_string()]);
    }
}
