/// External programs the toolkit drives, threaded explicitly through every
/// operation so nothing depends on ambient environment state.
#[derive(Debug, Clone)]
pub struct Toolchain {
    /// Version-control binary.
    pub git: String,
    /// Attribution tracker binary.
    pub git_ai: String,
    /// Stacked-branch CLI binary.
    pub gt: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            git: "git".into(),
            git_ai: "git-ai".into(),
            gt: "gt".into(),
        }
    }
}
