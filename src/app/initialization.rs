//! Application initialization and configuration

use anyhow::{Context, Result};
use log::{debug, LevelFilter};
use std::path::Path;

use crate::{cli, config, display, ingest, logging};

pub fn load_configuration(args: &cli::Args) -> Result<config::ConfigManager> {
    let mut manager = match &args.config_file {
        Some(config_file) => {
            debug!("Loading configuration from explicit file: {}", config_file.display());
            config::ConfigManager::load_from_file(config_file.clone())?
        }
        None => config::ConfigManager::load()?,
    };

    if let Some(section_name) = &args.config_name {
        manager.select_section(section_name.clone());
    }

    Ok(manager)
}

/// Write the effective configuration and report where it went
pub fn handle_export_config(config_manager: &config::ConfigManager, export_path: &Path) -> Result<()> {
    config_manager
        .export_complete_config(export_path)
        .with_context(|| format!("Failed to export configuration to {}", export_path.display()))?;

    println!("Configuration exported to: {}", export_path.display());
    Ok(())
}

/// Combine CLI flags with the `base` configuration section.
///
/// Flags win over configuration; an invalid level in the file falls back
/// to the default rather than aborting.
pub fn configure_logging(args: &cli::Args, config: &config::ConfigManager) -> Result<logging::LogConfig> {
    let console_level = if args.debug {
        LevelFilter::Trace
    } else if args.verbose {
        LevelFilter::Debug
    } else if args.quiet {
        LevelFilter::Error
    } else {
        match config.get_log_level("base", "console-level") {
            Ok(Some(level)) => level,
            Ok(None) => LevelFilter::Info,
            Err(e) => {
                eprintln!("Ignoring invalid console-level in config: {}", e);
                LevelFilter::Info
            }
        }
    };

    let format = match args.log_format()? {
        Some(format) => format,
        None => config.get_log_format().unwrap_or_default().unwrap_or_default(),
    };

    let log_file_path = args.log_file.clone().or_else(|| config.get_path("base", "log-file"));

    let file_log_level = match &args.log_file_level {
        Some(level_str) => Some(logging::parse_log_level(level_str)?),
        None => config.get_log_level("base", "file-log-level").unwrap_or(None),
    };

    let (destination, file_level) = match log_file_path {
        Some(file_path) => {
            let level = file_log_level.unwrap_or(console_level);
            (logging::LogDestination::Both(file_path), Some(level))
        }
        None => (logging::LogDestination::Console, None),
    };

    Ok(logging::LogConfig {
        console_level,
        file_level,
        format,
        destination,
    })
}

/// Precedence: --no-color, then --color, then `[display]`, then defaults
pub fn create_colour_manager(args: &cli::Args, config: &config::ConfigManager) -> Result<display::ColourManager> {
    let colour_config = config.get_colour_config()?;
    Ok(display::ColourManager::from_args_and_config(
        args.color,
        args.no_color,
        Some(colour_config),
    ))
}

/// `[analysis]` limits with `--max-items` and `--lookback-days` applied on top
pub fn resolve_limits(args: &cli::Args, config: &config::ConfigManager) -> Result<ingest::AnalysisLimits> {
    let mut limits = config.get_analysis_limits()?;

    if let Some(max_items) = args.max_items {
        limits = limits.with_max_items(max_items);
    }
    if let Some(days) = args.lookback_days {
        limits = limits.with_lookback_days(days);
    }

    limits.validate()?;
    debug!("Analysis limits: {:?}", limits);
    Ok(limits)
}
