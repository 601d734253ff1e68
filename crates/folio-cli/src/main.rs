//! Folio CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use folio_cli::{Args, error_adapter::to_reportable};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Folio");
    debug!(args:?; "Parsed arguments");

    match folio_cli::run(&args) {
        Ok(report) => print!("{report}"),
        Err(err) => {
            let reporter = miette::GraphicalReportHandler::new();
            let mut writer = String::new();
            reporter
                .render_report(&mut writer, &to_reportable(&err))
                .expect("Writing to String buffer is infallible");

            error!("{writer}");
            process::exit(1);
        }
    }

    info!("Completed successfully");
}
