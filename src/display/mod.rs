//! Terminal presentation: colour management and compact formatting

pub mod colours;
pub mod config;
pub mod format;

pub use colours::ColourManager;
pub use config::{ColourConfig, ColourPalette, ColourTheme};
pub use format::{single_line, CompactFormat};
