pub mod git;
pub mod measure;
pub mod render;
pub mod working_logs;

pub use measure::measure;
pub use working_logs::{list_working_logs, read_initial, working_log_dir};
