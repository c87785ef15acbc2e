use attriscope_core::Toolchain;
use attriscope_snapshot::{git, list_working_logs, measure, render};
use std::path::Path;
use std::process::ExitCode;

pub fn execute(path: Option<&Path>, tc: &Toolchain) -> ExitCode {
    let repo = match path {
        Some(path) => path.to_path_buf(),
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("error: cannot resolve current directory: {e}");
                return ExitCode::FAILURE;
            }
        },
    };

    let snap = measure(tc, &repo);
    print!(
        "{}",
        render::snapshot_report("Repository snapshot", None, &snap)
    );
    println!();

    let records = list_working_logs(tc, &repo);
    let head = git::head_sha(&tc.git, &repo);
    print!(
        "{}",
        render::working_logs_report(records.as_deref(), head.as_deref())
    );
    ExitCode::SUCCESS
}
