use std::process::ExitCode;

use clap::Parser;
use svm_stats_import::config::{Cli, Options};
use svm_stats_import::logger;

fn main() -> ExitCode {
    // --help, --version and usage errors exit inside clap (0 and 2)
    let cli = Cli::parse();
    let options = match Options::from_cli(cli) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = logger::init(options.log_file.as_deref(), options.verbose) {
        eprintln!("failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    log::info!("");
    for line in options.summary() {
        log::info!("{line}");
    }
    log::info!("");

    match svm_stats_import::run(&options) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
