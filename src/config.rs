use anyhow::{Context, Result};
use log::{debug, info};
use serde::Serialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use toml::Value;

use crate::display::{ColourConfig, ColourTheme};
use crate::ingest::AnalysisLimits;
use crate::logging::LogFormat;

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "STRESSGAUGE_CONFIG";

/// Configuration storage - section_name -> key -> value
pub type Configuration = HashMap<String, HashMap<String, String>>;

pub struct ConfigManager {
    config: Configuration,
    config_file_path: Option<PathBuf>,
    selected_section: Option<String>,
}

impl ConfigManager {
    pub fn from_config(config: Configuration) -> Self {
        Self {
            config,
            config_file_path: None,
            selected_section: None,
        }
    }

    /// Load configuration using the discovery hierarchy
    pub fn load() -> Result<Self> {
        debug!("Starting configuration discovery");

        for path in discover_config_files() {
            debug!("Attempting to load config from: {}", path.display());
            if path.exists() {
                return Self::load_from_file(path);
            }
        }

        info!("No configuration file found, using defaults");
        Ok(Self::from_config(Configuration::new()))
    }

    pub fn load_from_file(path: PathBuf) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = parse_toml_config(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        info!("Loaded configuration from: {}", path.display());
        Ok(Self {
            config,
            config_file_path: Some(path),
            selected_section: None,
        })
    }

    pub fn config_file_path(&self) -> Option<&Path> {
        self.config_file_path.as_deref()
    }

    /// Look up `key`: selected section, then `section`, then `base`
    pub fn get_value(&self, section: &str, key: &str) -> Option<&String> {
        if let Some(selected) = &self.selected_section {
            if let Some(value) = self.config.get(selected).and_then(|s| s.get(key)) {
                return Some(value);
            }
        }

        if let Some(value) = self.config.get(section).and_then(|s| s.get(key)) {
            return Some(value);
        }

        self.config.get("base").and_then(|s| s.get(key))
    }

    /// Root-level keys (e.g. `log-format = "json"`) flatten to `<key>.value`
    pub fn get_root_value(&self, key: &str) -> Option<&String> {
        self.config.get(key).and_then(|s| s.get("value"))
    }

    /// Select an overriding section (--config-name)
    pub fn select_section(&mut self, section: String) {
        debug!("Selecting configuration section: {}", section);
        self.selected_section = Some(section);
    }

    pub fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>> {
        match self.get_value(section, key) {
            Some(value) => match value.to_lowercase().as_str() {
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                _ => Err(anyhow::anyhow!("Invalid boolean value for {}.{}: {}", section, key, value)),
            },
            None => Ok(None),
        }
    }

    pub fn get_log_level(&self, section: &str, key: &str) -> Result<Option<log::LevelFilter>> {
        match self.get_value(section, key) {
            Some(value) => Ok(Some(crate::logging::parse_log_level(value)?)),
            None => Ok(None),
        }
    }

    pub fn get_path(&self, section: &str, key: &str) -> Option<PathBuf> {
        self.get_value(section, key).map(PathBuf::from)
    }

    fn get_number<T>(&self, section: &str, key: &str) -> Result<Option<T>>
    where
        T: std::str::FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match self.get_value(section, key) {
            Some(value) => value
                .trim()
                .parse::<T>()
                .map(Some)
                .with_context(|| format!("Invalid {} value in config: {}", key, value)),
            None => Ok(None),
        }
    }

    /// Log format from root `log-format` or `base.log-format`
    pub fn get_log_format(&self) -> Result<Option<LogFormat>> {
        match self
            .get_root_value("log-format")
            .or_else(|| self.get_value("base", "log-format"))
        {
            Some(value) => value.parse::<LogFormat>().map(Some).map_err(anyhow::Error::msg),
            None => Ok(None),
        }
    }

    /// Count and recency bounds from `[analysis]`
    pub fn get_analysis_limits(&self) -> Result<AnalysisLimits> {
        let mut limits = AnalysisLimits::default();

        if let Some(max_tweets) = self.get_number("analysis", "max-tweets")? {
            limits.max_tweets = max_tweets;
        }
        if let Some(lookback_days) = self.get_number("analysis", "lookback-days")? {
            limits.lookback_days = lookback_days;
        }
        if let Some(max_posts) = self.get_number("analysis", "max-reddit-posts")? {
            limits.max_reddit_posts = max_posts;
        }
        if let Some(max_comments) = self.get_number("analysis", "max-reddit-comments")? {
            limits.max_reddit_comments = max_comments;
        }

        limits
            .validate()
            .context("Analysis configuration validation failed")?;

        Ok(limits)
    }

    /// Colour settings from `[display]`
    pub fn get_colour_config(&self) -> Result<ColourConfig> {
        let mut config = ColourConfig::default();

        if let Some(enabled) = self.get_bool("display", "color")? {
            config.set_enabled(enabled);
        }

        if let Some(theme) = self.get_value("display", "theme") {
            config.theme = theme.parse::<ColourTheme>().map_err(anyhow::Error::msg)?;
        }

        Ok(config)
    }

    /// Write the effective configuration, defaults included, as TOML
    pub fn export_complete_config(&self, path: &Path) -> Result<()> {
        let limits = self.get_analysis_limits()?;
        let colours = self.get_colour_config()?;

        let exported = ExportedConfig {
            log_format: self.get_log_format()?.unwrap_or_default().to_string(),
            base: ExportedBase {
                console_level: self
                    .get_log_level("base", "console-level")?
                    .unwrap_or(log::LevelFilter::Info)
                    .to_string()
                    .to_lowercase(),
                log_file: self.get_path("base", "log-file").map(|p| p.display().to_string()),
                file_log_level: self
                    .get_log_level("base", "file-log-level")?
                    .map(|level| level.to_string().to_lowercase()),
            },
            analysis: ExportedAnalysis {
                max_tweets: limits.max_tweets,
                lookback_days: limits.lookback_days,
                max_reddit_posts: limits.max_reddit_posts,
                max_reddit_comments: limits.max_reddit_comments,
            },
            display: ExportedDisplay {
                color: colours.enabled,
                theme: colours.theme.to_string(),
            },
        };

        let content = toml::to_string_pretty(&exported).context("Failed to serialise configuration")?;
        fs::write(path, content).with_context(|| format!("Failed to write config file: {}", path.display()))?;

        info!("Exported configuration to: {}", path.display());
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct ExportedConfig {
    log_format: String,
    base: ExportedBase,
    analysis: ExportedAnalysis,
    display: ExportedDisplay,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct ExportedBase {
    console_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_log_level: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct ExportedAnalysis {
    max_tweets: usize,
    lookback_days: u32,
    max_reddit_posts: usize,
    max_reddit_comments: usize,
}

#[derive(Serialize)]
struct ExportedDisplay {
    color: bool,
    theme: String,
}

/// Candidate configuration files in order of precedence
fn discover_config_files() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        paths.push(PathBuf::from(env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("stressgauge").join("config.toml"));
    }

    if let Some(home_dir) = dirs::home_dir() {
        paths.push(home_dir.join(".stressgauge.toml"));
    }

    paths.push(PathBuf::from("./.stressgauge.toml"));

    debug!("Config discovery paths: {:?}", paths);
    paths
}

fn parse_toml_config(content: &str) -> Result<Configuration> {
    let table: toml::Table = toml::from_str(content).context("Failed to parse TOML content")?;

    let mut config = Configuration::new();
    flatten_toml_table(&table, String::new(), &mut config);

    debug!("Parsed configuration: {:?}", config);
    Ok(config)
}

/// Flatten nested tables into dotted section names
fn flatten_toml_table(table: &toml::Table, prefix: String, config: &mut Configuration) {
    for (key, value) in table {
        let section_name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            Value::Table(subtable) if subtable.values().all(|v| !v.is_table()) => {
                let section = subtable
                    .iter()
                    .map(|(subkey, subvalue)| (subkey.clone(), toml_value_to_string(subvalue)))
                    .collect();
                config.insert(section_name, section);
            }
            Value::Table(subtable) => flatten_toml_table(subtable, section_name, config),
            _ => {
                config
                    .entry(section_name)
                    .or_default()
                    .insert("value".to_string(), toml_value_to_string(value));
            }
        }
    }
}

fn toml_value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}
