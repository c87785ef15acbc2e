//! The attribution-continuity scenario.
//!
//! Seven strictly sequential phases that drive real git + git-ai + gt
//! commands against a scratch repository, snapshotting attribution state
//! after each step. The sequence surfaces the working-log orphaning left
//! behind when a rebase rewrites commit SHAs: commit notes follow the
//! rewritten commits, the uncommitted `INITIAL` attribution does not.

use crate::exec::{require_tool, run};
use anyhow::Context;
use attriscope_core::{pct, short_sha, Toolchain};
use attriscope_snapshot::{git, list_working_logs, measure, read_initial, render, working_log_dir};
use std::path::{Path, PathBuf};

const RULE_WIDTH: usize = 70;

// Synthetic sources written during the scenario. The diff arithmetic of
// these exact contents feeds the expected values printed with each
// measurement, so edits here must keep both in sync.

const SEED_APP: &str = "\
def main():
    print('hello')

if __name__ == '__main__':
    main()
";

const APP_V2: &str = "\
import logging

logger = logging.getLogger(__name__)

def main():
    logger.info('Starting')
    result = compute()
    logger.info(f'Result: {result}')

def compute():
    return 42

if __name__ == '__main__':
    main()
";

const UTILS: &str = "\
def helper_one():
    return 'one'

def helper_two():
    return 'two'

def helper_three():
    return 'three'
";

const APP_V3: &str = "\
import logging

logger = logging.getLogger(__name__)

def main():
    logger.info('Starting app v2')
    result = compute()
    logger.info(f'Result: {result}')
    return result

def compute():
    return 42 * 2

if __name__ == '__main__':
    main()
";

const README: &str = "# Test Project\nVersion 1\n";

/// Run the whole scenario. Fails fast on a missing tool, aborts on a
/// required-command failure, and always leaves the scratch repository on
/// disk for manual inspection.
pub fn run_scenario(tc: &Toolchain) -> anyhow::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    println!("{rule}");
    println!("  Attribution continuity -- INITIAL orphaning reproduction");
    println!("  Driving real {} + {} commands", tc.git_ai, tc.gt);
    println!("{rule}");

    let git_ver = require_tool(&tc.git)?;
    let git_ai_ver = require_tool(&tc.git_ai)?;
    let gt_ver = require_tool(&tc.gt)?;
    println!("  {:<8} {git_ver}", format!("{}:", tc.git));
    println!("  {:<8} {git_ai_ver}", format!("{}:", tc.git_ai));
    println!("  {:<8} {gt_ver}", format!("{}:", tc.gt));

    let scratch = tempfile::Builder::new()
        .prefix("attriscope-repro-")
        .tempdir()
        .context("create scratch directory")?
        .keep();
    let repo = scratch.join("test-repo");
    std::fs::create_dir_all(&repo)
        .with_context(|| format!("create repository directory {}", repo.display()))?;
    println!("  Repo:    {}\n", repo.display());

    let scenario = Scenario {
        tc: tc.clone(),
        repo: repo.clone(),
    };
    scenario.drive().map_err(|e| {
        println!("\n  Test repo preserved for inspection: {}", repo.display());
        e
    })
}

struct Scenario {
    tc: Toolchain,
    repo: PathBuf,
}

impl Scenario {
    fn drive(&self) -> anyhow::Result<()> {
        self.phase_init()?;
        let feature_branch = self.phase_feature_work()?;
        self.phase_amend()?;
        let pre_rebase_sha = self.phase_advance_trunk(&feature_branch)?;
        self.phase_rebase(&pre_rebase_sha)?;
        self.phase_commit_stranded()?;
        self.phase_diagnose(&pre_rebase_sha)
    }

    // ── Phases ──

    fn phase_init(&self) -> anyhow::Result<()> {
        self.phase("PHASE 1: Initialize repo with git + stacked-branch tooling");
        let repo = &self.repo;

        run(&[&self.tc.git, "init", "-b", "main"], repo, true, None)?;
        run(
            &[&self.tc.git, "config", "user.email", "repro@attriscope.dev"],
            repo,
            false,
            None,
        )?;
        run(
            &[&self.tc.git, "config", "user.name", "Repro Driver"],
            repo,
            false,
            None,
        )?;

        self.write_source("app.py", SEED_APP)?;
        run(&[&self.tc.git, "add", "."], repo, true, None)?;
        run(
            &[&self.tc.git, "commit", "-m", "Initial commit"],
            repo,
            true,
            None,
        )?;

        run(
            &[&self.tc.gt, "init", "--trunk", "main", "--no-interactive"],
            repo,
            true,
            Some("register 'main' as the trunk"),
        )?;

        self.observe(
            "Baseline (initial commit, no AI)",
            "0% AI -- nothing AI-authored yet",
        );
        Ok(())
    }

    fn phase_feature_work(&self) -> anyhow::Result<String> {
        self.phase("PHASE 2: AI edits two files, commit only one via `gt create`");
        println!("  Scenario: an AI agent edits app.py AND utils.py.");
        println!("  Only app.py is committed via `gt create`.");
        println!("  utils.py's AI attribution should land in INITIAL.\n");

        self.write_source("app.py", APP_V2)?;
        self.write_source("utils.py", UTILS)?;

        run(
            &[
                &self.tc.git_ai,
                "checkpoint",
                "mock_ai",
                "app.py",
                "utils.py",
            ],
            &self.repo,
            false,
            Some("record AI authorship for both files"),
        )?;

        self.observe(
            "After AI edits, before commit",
            "18 uncommitted AI additions (app.py + utils.py)",
        );

        run(
            &[&self.tc.git, "add", "app.py"],
            &self.repo,
            false,
            Some("stage only app.py (utils.py intentionally left unstaged)"),
        )?;
        run(
            &[
                &self.tc.gt,
                "create",
                "feature/ai-work",
                "-m",
                "Add logging and compute",
                "--no-interactive",
            ],
            &self.repo,
            true,
            Some("gt create -- branch + commit (fires the post-commit hook)"),
        )?;

        let feature_branch = self.current_branch()?;
        println!("  Feature branch: {feature_branch}");

        self.observe(
            "After gt create (app.py committed, utils.py uncommitted)",
            "Committed: 10/10 AI (app.py). Uncommitted: 8 AI (utils.py in INITIAL)",
        );
        self.observe_logs();
        Ok(feature_branch)
    }

    fn phase_amend(&self) -> anyhow::Result<()> {
        self.phase("PHASE 3: More AI edits + `gt modify` (amend)");
        println!("  Verifies that INITIAL survives an amend cycle.\n");

        self.write_source("app.py", APP_V3)?;
        run(
            &[&self.tc.git_ai, "checkpoint", "mock_ai", "app.py"],
            &self.repo,
            false,
            Some("record AI authorship for the v2 edits"),
        )?;
        run(&[&self.tc.git, "add", "app.py"], &self.repo, false, None)?;
        run(
            &[
                &self.tc.gt,
                "modify",
                "-m",
                "Add logging and compute v2",
                "--no-interactive",
            ],
            &self.repo,
            false,
            Some("gt modify -- amends the commit (fires the amend rewrite hook)"),
        )?;

        self.observe(
            "After gt modify (amend)",
            "Committed: 11/11 AI (app.py). Uncommitted: 8 AI (utils.py still in INITIAL)",
        );
        self.observe_logs();
        Ok(())
    }

    fn phase_advance_trunk(&self, feature_branch: &str) -> anyhow::Result<String> {
        self.phase("PHASE 4: Advance main (simulates upstream changes)");

        run(
            &[&self.tc.git, "checkout", "main"],
            &self.repo,
            false,
            None,
        )?;
        self.write_source("README.md", README)?;
        run(
            &[&self.tc.git, "add", "README.md"],
            &self.repo,
            false,
            None,
        )?;
        run(
            &[&self.tc.git, "commit", "-m", "Add README"],
            &self.repo,
            true,
            None,
        )?;
        run(
            &[&self.tc.git, "checkout", feature_branch],
            &self.repo,
            false,
            None,
        )?;

        let pre_rebase_sha = self.head()?;

        self.observe(
            "Feature branch before rebase",
            "Same as phase 3 -- 11/11 committed AI, 8 uncommitted AI",
        );
        self.observe_logs();
        Ok(pre_rebase_sha)
    }

    fn phase_rebase(&self, pre_rebase_sha: &str) -> anyhow::Result<()> {
        self.phase("PHASE 5: `git rebase main` -- the history rewrite under test");
        println!("  In a real workflow `gt sync` or `gt restack` performs this rebase.");
        println!("  Commit notes are migrated by the rewrite hook; whether INITIAL");
        println!("  follows is the question this scenario answers.\n");

        println!("  Pre-rebase HEAD: {}", short_sha(pre_rebase_sha));

        run(
            &[&self.tc.git, "rebase", "main"],
            &self.repo,
            false,
            Some("the same operation gt sync / gt restack invoke"),
        )?;

        let post_rebase_sha = self.head()?;
        println!("  Post-rebase HEAD: {}", short_sha(&post_rebase_sha));
        println!(
            "  SHA changed: {} ({} -> {})",
            pre_rebase_sha != post_rebase_sha,
            short_sha(pre_rebase_sha),
            short_sha(&post_rebase_sha)
        );

        self.observe(
            "After rebase -- uncommitted AI at risk",
            "Committed: 11/11 AI (notes migrated). Uncommitted: SHOULD be 8 AI \
             (utils.py) but shows 0 when INITIAL is orphaned",
        );
        self.observe_logs();
        Ok(())
    }

    fn phase_commit_stranded(&self) -> anyhow::Result<()> {
        self.phase("PHASE 6: Commit utils.py -- shows the attribution loss");
        println!("  utils.py was 100% AI-authored. If its INITIAL was orphaned by the");
        println!("  rebase, the tracker no longer knows those lines came from AI.\n");

        run(
            &[&self.tc.git, "add", "utils.py"],
            &self.repo,
            false,
            None,
        )?;
        run(
            &[
                &self.tc.gt,
                "modify",
                "-m",
                "Add logging, compute, and utils",
                "--no-interactive",
            ],
            &self.repo,
            false,
            Some("gt modify -- folds utils.py into the commit"),
        )?;

        self.observe(
            "After committing utils.py",
            "SHOULD be 19/19 AI (app.py 11 + utils.py 8); with the defect, \
             utils.py counts as human",
        );
        self.observe_logs();
        Ok(())
    }

    fn phase_diagnose(&self, pre_rebase_sha: &str) -> anyhow::Result<()> {
        self.phase("PHASE 7: Diagnosis");

        let old_log = working_log_dir(&self.repo, pre_rebase_sha);
        let old_initial = old_log.join("INITIAL");
        println!(
            "  Old working log ({}): {}",
            short_sha(pre_rebase_sha),
            exists_label(&old_log)
        );
        println!("  Old INITIAL:            {}", exists_label(&old_initial));

        match read_initial(&old_log) {
            Some(initial) => {
                let rule = "═".repeat(62);
                println!("\n  {rule}");
                println!("  DEFECT CONFIRMED: INITIAL attribution orphaned by the rebase");
                println!("  {rule}");
                println!(
                    "\n  {} file(s), {} AI-attributed line(s) stranded on the old SHA:",
                    initial.files.len(),
                    initial.total_lines()
                );
                for (file, ranges) in &initial.files {
                    for range in ranges {
                        println!(
                            "    {file}: lines {}-{} [author: {}]",
                            range.start_line, range.end_line, range.author_id
                        );
                    }
                }
            }
            None => {
                println!("\n  Old INITIAL is gone -- the rewrite migrated or cleaned it;");
                println!("  the orphaning defect was NOT observed on this run.");
            }
        }

        let snap = measure(&self.tc, &self.repo);
        if let Some(cs) = &snap.committed {
            let total = cs.git_diff_added_lines;
            println!("\n  Final attribution for HEAD commit:");
            println!("    Total additions: {total} lines");
            println!(
                "    AI accepted:     {} lines ({})",
                cs.ai_accepted,
                pct(cs.ai_accepted, total)
            );
            println!(
                "    Human:           {} lines ({})",
                cs.human_additions,
                pct(cs.human_additions, total)
            );
            println!("\n    Expected:        19/19 AI = 100% AI");
            println!(
                "    Actual:          {}/{total} AI = {} AI",
                cs.ai_accepted,
                pct(cs.ai_accepted, total)
            );
            if cs.human_additions > 0 {
                println!(
                    "\n    {} lines incorrectly attributed to a human author.",
                    cs.human_additions
                );
                println!("    These are the utils.py lines whose INITIAL was orphaned.");
            }
        }

        self.summary();
        Ok(())
    }

    fn summary(&self) {
        self.phase("SUMMARY");
        println!(
            "
  Root-cause hypothesis: the tracker's rebase rewrite path migrates
  commit notes (committed attribution) to the rewritten SHAs, but does
  not move the working-log directory or INITIAL file from the original
  HEAD SHA to the new one.

  Affected operations:
    - gt sync       (rebases feature branches onto updated trunk)
    - gt restack    (rebases branches to maintain stack ordering)
    - git rebase    (direct rebase)

  Not affected (these migrate INITIAL correctly):
    - gt create     (plain commit; the post-commit hook writes INITIAL)
    - gt modify     (commit --amend; the amend rewrite writes INITIAL)
    - git reset     (working-log reconstruction writes INITIAL)

  Impact: AI-attributed lines tracked in INITIAL (written by an agent
  but not yet committed) are silently dropped on every rebase; when
  finally committed they are counted as human-written.
"
        );
        println!("  Test repo: {}", self.repo.display());
        println!("  Inspect:");
        println!("    cd {}", self.repo.display());
        println!("    find .git/ai -type f | sort");
        println!("    {} log --oneline --all --graph", self.tc.git);
        println!("    {} stats --json", self.tc.git_ai);
    }

    // ── Helpers ──

    fn phase(&self, title: &str) {
        let rule = "─".repeat(RULE_WIDTH);
        println!("\n{rule}");
        println!("{title}");
        println!("{rule}");
    }

    fn write_source(&self, name: &str, content: &str) -> anyhow::Result<()> {
        let path = self.repo.join(name);
        std::fs::write(&path, content).with_context(|| format!("write {}", path.display()))
    }

    fn head(&self) -> anyhow::Result<String> {
        git::head_sha(&self.tc.git, &self.repo)
            .ok_or_else(|| anyhow::anyhow!("repository has no resolvable HEAD"))
    }

    fn current_branch(&self) -> anyhow::Result<String> {
        git::current_branch(&self.tc.git, &self.repo)
            .ok_or_else(|| anyhow::anyhow!("repository has no checked-out branch"))
    }

    fn observe(&self, label: &str, expected: &str) {
        let snap = measure(&self.tc, &self.repo);
        print!("{}", render::snapshot_report(label, Some(expected), &snap));
        println!();
    }

    fn observe_logs(&self) {
        let records = list_working_logs(&self.tc, &self.repo);
        let head = git::head_sha(&self.tc.git, &self.repo);
        print!(
            "{}",
            render::working_logs_report(records.as_deref(), head.as_deref())
        );
        println!();
    }
}

fn exists_label(path: &Path) -> &'static str {
    if path.exists() {
        "EXISTS"
    } else {
        "GONE"
    }
}
