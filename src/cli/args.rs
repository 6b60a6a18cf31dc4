use anyhow::Result;
use clap::{ArgAction, Parser};
use log::debug;
use std::path::PathBuf;

use crate::logging::LogFormat;
use crate::output::ReportFormat;
use crate::record::{AnalysisType, Platform};

/// Heuristic stress scoring for exported social media content
#[derive(Parser, Debug)]
#[command(name = "stressgauge")]
#[command(about = "Scores stress signals in exported tweets, Reddit posts and comments, or ad-hoc text")]
#[command(version)]
pub struct Args {
    /// Content files to analyse (.json, .jsonl, .ndjson, .yaml, .yml; `-` reads JSON from stdin)
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Text to score; repeat to build a batch
    #[arg(short = 't', long = "text", value_name = "TEXT", action = ArgAction::Append)]
    pub text: Vec<String>,

    /// Platform the content came from: twitter or reddit
    #[arg(short = 'p', long, value_name = "PLATFORM", default_value = "twitter")]
    pub platform: String,

    /// Username being analysed (defaults to the input file name)
    #[arg(short = 'u', long, value_name = "NAME")]
    pub username: Option<String>,

    /// How the content was obtained: oauth or manual
    #[arg(long, value_name = "TYPE", default_value = "manual")]
    pub analysis_type: String,

    /// Output format: text, compact, json, yaml or csv
    #[arg(short = 'f', long, value_name = "FORMAT", default_value = "text")]
    pub format: String,

    /// Write the report to a file instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Maximum items kept per platform bucket (overrides configuration)
    #[arg(long, value_name = "N")]
    pub max_items: Option<usize>,

    /// Only analyse content from the last N days; 0 keeps everything
    #[arg(long, value_name = "DAYS")]
    pub lookback_days: Option<u32>,

    /// Force coloured output even when not writing to a terminal
    #[arg(long)]
    pub color: bool,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,

    /// Verbose output (debug level logging)
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet output (error level logging only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Debug output (trace level logging)
    #[arg(long)]
    pub debug: bool,

    /// Log format: text or json
    #[arg(long, value_name = "FORMAT")]
    pub log_format: Option<String>,

    /// Log file path for file output
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level for file output (independent of console level)
    #[arg(long, value_name = "LEVEL")]
    pub log_file_level: Option<String>,

    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Configuration section name
    #[arg(long, value_name = "SECTION")]
    pub config_name: Option<String>,

    /// Write the complete effective configuration to FILE and exit
    #[arg(long, value_name = "FILE")]
    pub export_config: Option<PathBuf>,
}

impl Args {
    pub fn platform(&self) -> Result<Platform> {
        self.platform.parse().map_err(anyhow::Error::msg)
    }

    pub fn analysis_type(&self) -> Result<AnalysisType> {
        self.analysis_type.parse().map_err(anyhow::Error::msg)
    }

    pub fn report_format(&self) -> Result<ReportFormat> {
        self.format.parse().map_err(anyhow::Error::msg)
    }

    pub fn log_format(&self) -> Result<Option<LogFormat>> {
        self.log_format
            .as_deref()
            .map(|format| format.parse().map_err(anyhow::Error::msg))
            .transpose()
    }

    /// True when there is something to score
    pub fn has_content(&self) -> bool {
        !self.inputs.is_empty() || !self.text.is_empty()
    }
}

pub fn parse_args() -> Args {
    let args = Args::parse();
    debug!("Parsed CLI arguments: {:?}", args);
    args
}

/// Validate CLI argument combinations
pub fn validate_args(args: &Args) -> Result<()> {
    let log_flags_count = [args.verbose, args.quiet, args.debug]
        .iter()
        .filter(|&&flag| flag)
        .count();

    if log_flags_count > 1 {
        return Err(anyhow::anyhow!(
            "Conflicting log level flags: only one of --verbose, --quiet, or --debug may be specified"
        ));
    }

    if args.color && args.no_color {
        return Err(anyhow::anyhow!("Conflicting colour flags: --color and --no-color"));
    }

    args.log_format()?;

    if let Some(ref level) = args.log_file_level {
        match level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => {
                return Err(anyhow::anyhow!(
                    "Invalid log file level '{}'. Valid levels: error, warn, info, debug, trace",
                    level
                ))
            }
        }
    }

    if args.log_file_level.is_some() && args.log_file.is_none() {
        return Err(anyhow::anyhow!("--log-file-level requires --log-file to be specified"));
    }

    args.platform()?;
    args.analysis_type()?;
    args.report_format()?;

    if args.max_items == Some(0) {
        return Err(anyhow::anyhow!("--max-items must be greater than zero"));
    }

    if let Some(username) = &args.username {
        if username.trim().is_empty() {
            return Err(anyhow::anyhow!("--username cannot be empty"));
        }
    }

    if args.export_config.is_none() && !args.has_content() {
        return Err(anyhow::anyhow!(
            "Nothing to analyse: pass one or more INPUT files or --text"
        ));
    }

    debug!("CLI arguments validated successfully");
    Ok(())
}
