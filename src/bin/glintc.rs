//! Command-line driver for the Glint shading-language compiler front end.

use std::process::ExitCode;

use glintc::{resolve_options, CompileRequest, Session};

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let session = Session::new();
    let mut request = CompileRequest::new();

    match resolve_options(&args, &session, &mut request) {
        Ok(()) => {
            // Warnings may have rendered even on success.
            eprint!("{}", request.diagnostic_output());
            log::info!(
                "resolved {} translation unit(s), {} entry point(s), {} target(s)",
                request.translation_units().len(),
                request.entry_points().len(),
                request.target_count()
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprint!("{}", error.output);
            ExitCode::FAILURE
        }
    }
}
