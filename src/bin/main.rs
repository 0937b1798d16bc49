use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use color_eyre::{eyre::Context, Result};
use env_logger::Target;
use goproxy_install::{
    cli::input::CliArgs,
    install::SystemHost,
    utils::{constants::error_messages, logger::config_logger},
    worker::run_installer,
};

/// The entry point for the binary generated
/// for the program
fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli_args = CliArgs::parse();
    config_logger(cli_args.verbose, Target::Stdout)?;

    let base = std::env::current_dir()
        .with_context(|| error_messages::FAILURE_GATHERING_CURRENT_DIR)?;
    log::info!("Launching a new install into {:?}", cli_args.path);

    match run_installer(&cli_args, &SystemHost, &base) {
        Ok(_) => {
            log::info!("Install successfully finished");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            log::error!("{err}");
            eprintln!("{err}");
            let mut cause = err.source();
            while let Some(inner) = cause {
                eprintln!("    caused by: {inner}");
                cause = inner.source();
            }
            Ok(ExitCode::from(err.exit_code()))
        }
    }
}
