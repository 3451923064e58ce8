use anyhow::Result;
use clap::Parser;
use kpool_config::Config;
use tokio::runtime::Builder;
use tracing::{error, info};

pub mod cli;
pub mod commands;

fn main() -> Result<()> {
    let args = cli::Args::parse();

    let _logging_guard = kpool_common::logging::initialize(kpool_config::APP_NAME, args.verbose)?;
    info!("{} v{} started", kpool_config::APP_NAME, kpool_config::APP_VERSION);

    if let Err(error) = run_application(&args) {
        error!(
            "{} v{} terminated with an error: {}",
            kpool_config::APP_NAME,
            kpool_config::APP_VERSION,
            error
        );
        Err(error)
    } else {
        info!("{} v{} stopped", kpool_config::APP_NAME, kpool_config::APP_VERSION);
        Ok(())
    }
}

fn run_application(args: &cli::Args) -> Result<()> {
    let rt = Builder::new_multi_thread().enable_all().build()?;

    let config = rt.block_on(Config::load_or_create())?;
    rt.block_on(commands::run(args, &config))
}
