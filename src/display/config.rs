//! Colour configuration and themes
//!
//! Palettes map the stress categories and the few structural roles used in
//! reports (headings, muted detail, errors) to terminal colours.

use colored::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ColourConfig {
    /// Whether colours are enabled at all
    pub enabled: bool,
    pub theme: ColourTheme,
    /// Honour the NO_COLOR environment variable
    pub respect_no_color: bool,
    /// Colour even when stdout is not a terminal (--color)
    #[serde(skip, default)]
    pub color_forced: bool,
}

impl Default for ColourConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            theme: ColourTheme::Auto,
            respect_no_color: true,
            color_forced: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColourTheme {
    #[default]
    Auto,
    Light,
    Dark,
}

impl ColourTheme {
    pub fn as_str(self) -> &'static str {
        match self {
            ColourTheme::Auto => "auto",
            ColourTheme::Light => "light",
            ColourTheme::Dark => "dark",
        }
    }

    pub fn palette(self) -> ColourPalette {
        match self {
            // No background detection; dark terminals are the common case
            ColourTheme::Auto | ColourTheme::Dark => ColourPalette::dark(),
            ColourTheme::Light => ColourPalette::light(),
        }
    }
}

impl fmt::Display for ColourTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColourTheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColourTheme::Auto),
            "light" => Ok(ColourTheme::Light),
            "dark" => Ok(ColourTheme::Dark),
            _ => Err(format!("Invalid theme: {}. Valid options: auto, light, dark", s)),
        }
    }
}

/// Colour names per display role
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ColourPalette {
    pub low: String,
    pub moderate: String,
    pub high: String,
    pub very_high: String,
    pub heading: String,
    pub muted: String,
    pub error: String,
}

impl ColourPalette {
    /// Palette for light backgrounds
    pub fn light() -> Self {
        Self {
            low: "green".to_string(),
            moderate: "yellow".to_string(),
            high: "red".to_string(),
            very_high: "magenta".to_string(),
            heading: "blue".to_string(),
            muted: "black".to_string(),
            error: "red".to_string(),
        }
    }

    /// Palette for dark backgrounds
    pub fn dark() -> Self {
        Self {
            low: "bright_green".to_string(),
            moderate: "bright_yellow".to_string(),
            high: "bright_red".to_string(),
            very_high: "bright_magenta".to_string(),
            heading: "bright_cyan".to_string(),
            muted: "bright_black".to_string(),
            error: "bright_red".to_string(),
        }
    }

    pub fn parse_color(color_str: &str) -> Option<Color> {
        match color_str.to_lowercase().as_str() {
            "black" => Some(Color::Black),
            "red" => Some(Color::Red),
            "green" => Some(Color::Green),
            "yellow" => Some(Color::Yellow),
            "blue" => Some(Color::Blue),
            "magenta" => Some(Color::Magenta),
            "cyan" => Some(Color::Cyan),
            "white" => Some(Color::White),
            "bright_black" => Some(Color::BrightBlack),
            "bright_red" => Some(Color::BrightRed),
            "bright_green" => Some(Color::BrightGreen),
            "bright_yellow" => Some(Color::BrightYellow),
            "bright_blue" => Some(Color::BrightBlue),
            "bright_magenta" => Some(Color::BrightMagenta),
            "bright_cyan" => Some(Color::BrightCyan),
            "bright_white" => Some(Color::BrightWhite),
            _ => None,
        }
    }
}

impl Default for ColourPalette {
    fn default() -> Self {
        Self::dark()
    }
}

impl ColourConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn with_theme(theme: ColourTheme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_color_forced(&mut self, forced: bool) {
        self.color_forced = forced;
    }

    pub fn set_respect_no_color(&mut self, respect: bool) {
        self.respect_no_color = respect;
    }

    /// Decide from configuration, NO_COLOR and whether stdout is a terminal
    pub fn should_use_colours(&self) -> bool {
        if !self.enabled {
            return false;
        }

        if self.color_forced {
            return true;
        }

        if self.respect_no_color && std::env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if !self.respect_no_color {
            return true;
        }

        use std::io::IsTerminal;
        std::io::stdout().is_terminal()
    }

    pub fn palette(&self) -> ColourPalette {
        self.theme.palette()
    }
}
