//! Running analyses
//!
//! Each input file, and the `--text` batch if any, becomes one job. Jobs are
//! independent and run in parallel; results keep job order.

use anyhow::{Context, Result};
use log::{error, info};
use rayon::prelude::*;
use std::path::PathBuf;

use super::initialization::{create_colour_manager, resolve_limits};
use super::inputs::{default_username, resolve_input_path, ADHOC_USERNAME};
use crate::analyzer::{StressAnalyzer, TextItem};
use crate::ingest::{self, AnalysisLimits};
use crate::output;
use crate::record::{analyze_user, AnalysisRecord, AnalysisType, Platform};
use crate::{cli, config};

/// One unit of work producing one record
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisJob {
    File(PathBuf),
    Text(Vec<String>),
}

impl AnalysisJob {
    pub fn label(&self) -> String {
        match self {
            AnalysisJob::File(path) => path.display().to_string(),
            AnalysisJob::Text(_) => "--text".to_string(),
        }
    }
}

/// Settings shared by every job in a run
#[derive(Debug, Clone)]
pub struct JobSettings {
    pub platform: Platform,
    pub analysis_type: AnalysisType,
    pub username: Option<String>,
    pub limits: AnalysisLimits,
}

pub fn build_jobs(args: &cli::Args) -> Vec<AnalysisJob> {
    let mut jobs: Vec<AnalysisJob> = args.inputs.iter().cloned().map(AnalysisJob::File).collect();
    if !args.text.is_empty() {
        jobs.push(AnalysisJob::Text(args.text.clone()));
    }
    jobs
}

/// Load, normalise and score one job
pub fn run_job(analyzer: &StressAnalyzer, job: &AnalysisJob, settings: &JobSettings) -> Result<AnalysisRecord> {
    let (items, fallback_username) = match job {
        AnalysisJob::File(path) => {
            let resolved = resolve_input_path(path)?;
            let items = ingest::load_items(&resolved, settings.platform, &settings.limits)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            (items, default_username(path))
        }
        AnalysisJob::Text(texts) => {
            let items = texts
                .iter()
                .enumerate()
                .map(|(index, text)| TextItem::new(Some((index + 1).to_string()), text.as_str(), None))
                .collect();
            (items, ADHOC_USERNAME.to_string())
        }
    };

    let username = settings.username.clone().unwrap_or(fallback_username);
    let record = analyze_user(analyzer, &items, &username, settings.platform, settings.analysis_type)
        .with_context(|| format!("Analysis of {} failed", job.label()))?;

    Ok(record)
}

/// Run every job in parallel, keeping input order
pub fn run_jobs(jobs: &[AnalysisJob], settings: &JobSettings) -> Vec<Result<AnalysisRecord>> {
    let analyzer = StressAnalyzer::new();
    jobs.par_iter()
        .map(|job| run_job(&analyzer, job, settings))
        .collect()
}

/// Analyse everything the arguments name and emit the report.
///
/// Successful records are still rendered when some jobs fail; the run then
/// ends with an error naming how many failed.
pub fn run_analysis(args: &cli::Args, config: &config::ConfigManager) -> Result<()> {
    let settings = JobSettings {
        platform: args.platform()?,
        analysis_type: args.analysis_type()?,
        username: args.username.clone(),
        limits: resolve_limits(args, config)?,
    };
    let format = args.report_format()?;
    let colours = if format.supports_colour() && args.output.is_none() {
        create_colour_manager(args, config)?
    } else {
        crate::display::ColourManager::with_colours(false)
    };

    let jobs = build_jobs(args);
    info!("Running {} analysis job(s) on {}", jobs.len(), settings.platform);

    let mut records = Vec::new();
    let mut failures = Vec::new();
    for (job, result) in jobs.iter().zip(run_jobs(&jobs, &settings)) {
        match result {
            Ok(record) => records.push(record),
            Err(e) => {
                error!("{}: {:#}", job.label(), e);
                failures.push(e);
            }
        }
    }

    if records.is_empty() {
        return match failures.into_iter().next() {
            Some(first) => Err(first),
            None => Err(anyhow::anyhow!("Nothing to analyse")),
        };
    }

    let rendered = output::render(&records, format, &colours)?;
    output::write_report(&rendered, args.output.as_deref())?;

    if let Some(path) = &args.output {
        info!("Wrote {} report(s) to {}", records.len(), path.display());
    }

    if !failures.is_empty() {
        anyhow::bail!("{} of {} analyses failed", failures.len(), jobs.len());
    }

    Ok(())
}
