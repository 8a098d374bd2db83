//! Fault list rendering.

use std::fmt::{self, Write};

use super::log::FaultEntry;

/// Options for controlling fault list formatting.
///
/// # Example
///
/// ```ignore
/// // Default: colored output
/// let opts = FaultLogOptions::default();
///
/// // Plain text (no ANSI colors) for logging
/// let opts = FaultLogOptions::plain();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FaultLogOptions {
    /// Whether to use ANSI colors in output.
    pub colored: bool,
    /// Whether to prefix each entry with its arrival time.
    pub timestamps: bool,
}

impl Default for FaultLogOptions {
    fn default() -> Self {
        Self {
            colored: true,
            timestamps: false,
        }
    }
}

impl FaultLogOptions {
    /// Create options for plain text output.
    pub fn plain() -> Self {
        Self {
            colored: false,
            ..Self::default()
        }
    }

    /// Set whether to use colors.
    pub fn with_colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Set whether to include arrival timestamps.
    pub fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }
}

/// Number of faults, rendered as `"3 runtime errors"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaultSummary {
    /// Number of faults.
    pub count: usize,
}

impl fmt::Display for FaultSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.count {
            0 => write!(f, "no runtime errors"),
            1 => write!(f, "1 runtime error"),
            n => write!(f, "{n} runtime errors"),
        }
    }
}

#[cfg(feature = "colored-faults")]
fn paint_header(text: &str, colored: bool) -> String {
    use owo_colors::OwoColorize;
    if colored {
        text.red().bold().to_string()
    } else {
        text.to_string()
    }
}

#[cfg(not(feature = "colored-faults"))]
fn paint_header(text: &str, _colored: bool) -> String {
    text.to_string()
}

#[cfg(feature = "colored-faults")]
fn paint_entry(text: &str, colored: bool) -> String {
    use owo_colors::OwoColorize;
    if colored {
        text.red().to_string()
    } else {
        text.to_string()
    }
}

#[cfg(not(feature = "colored-faults"))]
fn paint_entry(text: &str, _colored: bool) -> String {
    text.to_string()
}

/// Render a fault list. Returns an empty string when there are no faults.
pub fn format_fault_log(entries: &[FaultEntry], options: &FaultLogOptions) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    let summary = FaultSummary { count: entries.len() };
    let _ = writeln!(out, "{}", paint_header(&format!("Runtime Errors ({summary}):"), options.colored));

    for entry in entries {
        let line = if options.timestamps {
            format!("[{}] {}", entry.received_at.format("%H:%M:%S%.3f"), entry.message)
        } else {
            entry.message.clone()
        };
        let _ = writeln!(out, "  - {}", paint_entry(&line, options.colored));
    }
    out
}
