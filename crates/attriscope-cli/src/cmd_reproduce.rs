use attriscope_core::Toolchain;
use std::process::ExitCode;

pub fn execute(tc: &Toolchain) -> ExitCode {
    match attriscope_scenario::run_scenario(tc) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
