//! Runs the architecture lint over `frontend/src` and reports violations on
//! stderr.
//!
//! Usage: `architecture-lint [FRONTEND_DIR]`. Without an argument the
//! `frontend` crate next to this tool in the workspace is linted.

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

fn frontend_dir() -> PathBuf {
    env::args_os().nth(1).map_or_else(
        || PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../frontend"),
        PathBuf::from,
    )
}

fn main() -> ExitCode {
    let crate_dir = frontend_dir();
    if !crate_dir.join("src").is_dir() {
        let _ = writeln!(
            io::stderr().lock(),
            "no crate sources found under {}",
            crate_dir.display()
        );
        return ExitCode::FAILURE;
    }

    match architecture_lint::lint_crate_sources(&crate_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = writeln!(io::stderr().lock(), "{err}");
            ExitCode::FAILURE
        }
    }
}
