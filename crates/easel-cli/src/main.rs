//! The `easel` binary.

use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, debug, info};
use miette::GraphicalReportHandler;

use easel::EaselError;
use easel_cli::{Args, error_adapter::render_report};

fn main() -> ExitCode {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logging(args.log_level);
    debug!(args:?; "Parsed arguments");

    match easel_cli::run(&args) {
        Ok(()) => {
            info!("Completed successfully");
            ExitCode::SUCCESS
        }
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr: stdout may carry the script.
fn init_logging(level: LevelFilter) {
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(level)
        .target(env_logger::Target::Stderr)
        .init();
    info!(log_level:? = level; "Starting Easel");
}

/// Failures are printed even with `--log-level off`.
fn report(err: &EaselError) {
    match render_report(err, &GraphicalReportHandler::new()) {
        Ok(rendered) => eprint!("{rendered}"),
        Err(_) => eprintln!("Error: {err}"),
    }
}
