//! JSON output formatter for machine processing
//!
//! Serializes the resolved tree in its literal renderer-consumable shape:
//! a mapping from identity string to `{dependencies, info}`. Failures are
//! deliberately not part of this shape; they travel on the report's side
//! channel and are surfaced on stderr by the CLI.

use crate::domain::ResolutionReport;
use crate::output::OutputFormatter;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &ResolutionReport, writer: &mut dyn Write) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, &report.tree).map_err(std::io::Error::from)?;
        writeln!(writer)
    }
}
