use anyhow::Result;
use log::error;
use std::process;

use stressgauge::{app, cli, logging};

fn main() {
    if let Err(e) = run() {
        error!("Application error: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = cli::parse_args();
    cli::validate_args(&args)?;

    let config_manager = app::load_configuration(&args)?;

    let log_config = app::configure_logging(&args, &config_manager)?;
    logging::init_logger(log_config)?;

    if let Some(export_path) = &args.export_config {
        return app::handle_export_config(&config_manager, export_path);
    }

    app::run_analysis(&args, &config_manager)
}
