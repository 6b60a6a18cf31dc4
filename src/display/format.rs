//! One-line summaries for scripting and quick scanning

/// Types that can summarise themselves on a single line
pub trait CompactFormat {
    /// A single line, no trailing newline, essential fields only
    fn to_compact_format(&self) -> String;
}

/// Collapse any run of whitespace, including newlines, to one space
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
