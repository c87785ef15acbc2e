use thiserror::Error;

/// Fatal scenario-driver failures.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// Probed before any repository state is created.
    #[error("required tool '{0}' not found in PATH")]
    ToolMissing(String),
    /// A command flagged required-to-succeed exited non-zero.
    #[error("required command failed with exit {code}: {cmd}")]
    RequiredCommandFailed { cmd: String, code: i32 },
}
