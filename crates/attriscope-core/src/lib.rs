pub mod author;
pub mod percent;
pub mod snapshot;
pub mod toolchain;
pub mod working_log;

pub use author::{classify_checkpoint_line, AuthorKind};
pub use percent::pct;
pub use snapshot::{
    AttributionSnapshot, Checkpoint, CommittedStats, PendingStats, PendingStatus, ToolModelStats,
};
pub use toolchain::Toolchain;
pub use working_log::{
    short_sha, InitialAttributions, LineRange, WorkingLogRecord, WorkingLogStatus,
};
