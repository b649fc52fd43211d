use std::process::ExitCode;

use clap::Parser;
use rsinit_admin::{init_logging, Settings};

fn main() -> ExitCode {
    let settings = Settings::parse();
    if let Err(e) = init_logging() {
        eprintln!("rsinit: {}", e);
        return ExitCode::FAILURE;
    }
    match rsinit::run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("rsinit: {}", e);
            ExitCode::FAILURE
        }
    }
}
