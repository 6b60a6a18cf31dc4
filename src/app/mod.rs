//! Application orchestration

pub mod execution;
pub mod initialization;
pub mod inputs;

pub use execution::{build_jobs, run_analysis, run_job, run_jobs, AnalysisJob, JobSettings};
pub use initialization::{
    configure_logging, create_colour_manager, handle_export_config, load_configuration, resolve_limits,
};
pub use inputs::{default_username, resolve_input_path};
