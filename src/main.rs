//! inijson - INI <-> JSON conversion

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = inijson::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
