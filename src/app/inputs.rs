//! Input path resolution

use anyhow::Result;
use log::debug;
use std::path::{Path, PathBuf};

use crate::ingest::STDIN_PATH;

/// Username used for content read from stdin
pub const STDIN_USERNAME: &str = "stdin";
/// Username used for `--text` batches
pub const ADHOC_USERNAME: &str = "adhoc";

/// Expand a leading `~` and check that the file exists; `-` passes through
pub fn resolve_input_path(path: &Path) -> Result<PathBuf> {
    if path.as_os_str() == STDIN_PATH {
        return Ok(path.to_path_buf());
    }

    let expanded = match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home_dir) => home_dir.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    };

    if !expanded.is_file() {
        anyhow::bail!(
            "Input file does not exist: {}\n\nPlease check the path and try again.",
            expanded.display()
        );
    }

    debug!("Resolved input {} to {}", path.display(), expanded.display());
    Ok(expanded)
}

/// Username derived from an input: the file stem, or `stdin` for `-`
pub fn default_username(path: &Path) -> String {
    if path.as_os_str() == STDIN_PATH {
        return STDIN_USERNAME.to_string();
    }

    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.trim().is_empty())
        .unwrap_or_else(|| STDIN_USERNAME.to_string())
}
