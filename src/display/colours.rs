//! Colour management for report output
//!
//! Wraps a `ColourConfig` and its palette; every helper degrades to plain
//! text when colours are off.

use colored::{ColoredString, Colorize};

use super::config::{ColourConfig, ColourPalette};
use crate::analyzer::StressCategory;

#[derive(Debug, Clone)]
pub struct ColourManager {
    config: ColourConfig,
    palette: ColourPalette,
    enabled: bool,
}

impl ColourManager {
    pub fn new() -> Self {
        Self::with_config(ColourConfig::default())
    }

    /// Explicitly enabled or disabled, ignoring the terminal
    pub fn with_colours(enabled: bool) -> Self {
        let mut config = ColourConfig::default();
        config.set_enabled(enabled);
        config.set_color_forced(enabled);
        Self::with_config(config)
    }

    pub fn with_config(config: ColourConfig) -> Self {
        let palette = config.palette();
        let enabled = config.should_use_colours();
        Self {
            config,
            palette,
            enabled,
        }
    }

    /// Apply the `--color` / `--no-color` flags on top of configuration
    pub fn from_args_and_config(color_flag: bool, no_color_flag: bool, config: Option<ColourConfig>) -> Self {
        let mut final_config = config.unwrap_or_default();

        if no_color_flag {
            final_config.set_enabled(false);
        } else if color_flag {
            final_config.set_enabled(true);
            final_config.set_color_forced(true);
        }

        Self::with_config(final_config)
    }

    pub fn colours_enabled(&self) -> bool {
        self.enabled
    }

    pub fn config(&self) -> &ColourConfig {
        &self.config
    }

    pub fn palette(&self) -> &ColourPalette {
        &self.palette
    }

    /// Colour `text` by stress category
    pub fn category(&self, category: StressCategory, text: &str) -> ColoredString {
        let colour = match category {
            StressCategory::Low => &self.palette.low,
            StressCategory::Moderate => &self.palette.moderate,
            StressCategory::High => &self.palette.high,
            StressCategory::VeryHigh => &self.palette.very_high,
        };
        let coloured = self.paint(text, colour);
        if self.enabled && category >= StressCategory::High {
            coloured.bold()
        } else {
            coloured
        }
    }

    pub fn heading(&self, text: &str) -> ColoredString {
        let coloured = self.paint(text, &self.palette.heading);
        if self.enabled {
            coloured.bold()
        } else {
            coloured
        }
    }

    pub fn muted(&self, text: &str) -> ColoredString {
        self.paint(text, &self.palette.muted)
    }

    pub fn error(&self, text: &str) -> ColoredString {
        self.paint(text, &self.palette.error)
    }

    fn paint(&self, text: &str, colour_name: &str) -> ColoredString {
        if !self.enabled {
            return text.normal();
        }
        match ColourPalette::parse_color(colour_name) {
            Some(colour) => text.color(colour),
            None => text.normal(),
        }
    }
}

impl Default for ColourManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_manager_is_plain() {
        let manager = ColourManager::with_colours(false);
        assert!(!manager.colours_enabled());
        assert_eq!(manager.category(StressCategory::VeryHigh, "very_high").to_string(), "very_high");
        assert_eq!(manager.heading("Summary").to_string(), "Summary");
        assert_eq!(manager.muted("n/a").to_string(), "n/a");
        assert_eq!(manager.error("failed").to_string(), "failed");
    }

    #[test]
    fn test_no_color_flag_overrides_config() {
        let manager = ColourManager::from_args_and_config(false, true, Some(ColourConfig::default()));
        assert!(!manager.colours_enabled());
        assert!(!manager.config().enabled);
    }

    #[test]
    fn test_color_flag_forces_colours() {
        let manager = ColourManager::from_args_and_config(true, false, Some(ColourConfig::disabled()));
        assert!(manager.colours_enabled());
        assert!(manager.config().color_forced);
    }

    #[test]
    fn test_enabled_manager_uses_category_palette() {
        let manager = ColourManager::with_colours(true);
        colored::control::set_override(true);
        let painted = manager.category(StressCategory::Low, "low").to_string();
        colored::control::unset_override();
        assert!(painted.contains("\x1b["));
        assert!(painted.contains("low"));
    }
}
