//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Per-package listing with dependency references
//! - Package info detail in verbose mode
//! - Failure listing in verbose mode
//! - Summary line with resolved/failed counts

use crate::domain::{ResolutionReport, ResolvedNode};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn identity_label(&self, identity: &str) -> String {
        if self.color {
            identity.cyan().bold().to_string()
        } else {
            identity.to_string()
        }
    }

    fn dim_label(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn write_node(
        &self,
        identity: &str,
        node: &ResolvedNode,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        writeln!(writer, "{}", self.identity_label(identity))?;

        if self.verbosity == Verbosity::Verbose {
            if !node.info.summary.is_empty() {
                writeln!(writer, "  {}", self.dim_label(&node.info.summary))?;
            }
            if !node.info.license.is_empty() {
                writeln!(writer, "  {}", self.dim_label(&format!("license: {}", node.info.license)))?;
            }
        }

        for (i, dependency) in node.dependencies.iter().enumerate() {
            let connector = if i + 1 == node.dependencies.len() {
                "└─"
            } else {
                "├─"
            };
            writeln!(writer, "  {} {}", connector, dependency)?;
        }

        Ok(())
    }

    fn write_summary(
        &self,
        report: &ResolutionReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let resolved = format!("{} packages resolved", report.package_count());
        if report.has_failures() {
            let failed = format!("{} queries failed", report.failures.len());
            let failed = if self.color {
                failed.yellow().to_string()
            } else {
                failed
            };
            writeln!(writer, "{}, {}", resolved, failed)
        } else {
            writeln!(writer, "{}", resolved)
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &ResolutionReport, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Quiet {
            return self.write_summary(report, writer);
        }

        for (identity, node) in &report.tree {
            self.write_node(identity, node, writer)?;
        }

        if !report.tree.is_empty() {
            writeln!(writer)?;
        }

        if self.verbosity == Verbosity::Verbose && report.has_failures() {
            writeln!(writer, "Failed queries:")?;
            for failure in &report.failures {
                writeln!(writer, "  {}: {}", failure.package, failure.error)?;
            }
            writeln!(writer)?;
        }

        self.write_summary(report, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DependencyTree, NodeInfo, ResolutionFailure};

    fn sample_report() -> ResolutionReport {
        let mut tree = DependencyTree::new();
        tree.insert(
            "requests==2.31.0".to_string(),
            ResolvedNode {
                dependencies: vec!["idna==3.6".to_string(), "certifi==2023.11.17".to_string()],
                info: NodeInfo {
                    summary: "Python HTTP for Humans.".to_string(),
                    license: "Apache 2.0".to_string(),
                    ..Default::default()
                },
            },
        );
        tree.insert("idna==3.6".to_string(), ResolvedNode::default());
        ResolutionReport {
            tree,
            failures: vec![ResolutionFailure {
                package: "ghost".to_string(),
                error: "package 'ghost' not found by pip".to_string(),
            }],
        }
    }

    fn render(verbosity: Verbosity) -> String {
        let formatter = TextFormatter::with_color(verbosity, false);
        let mut buffer = Vec::new();
        formatter.format(&sample_report(), &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_normal_lists_packages_and_dependencies() {
        let output = render(Verbosity::Normal);
        assert!(output.contains("requests==2.31.0"));
        assert!(output.contains("├─ idna==3.6"));
        assert!(output.contains("└─ certifi==2023.11.17"));
    }

    #[test]
    fn test_normal_has_summary_line() {
        let output = render(Verbosity::Normal);
        assert!(output.contains("2 packages resolved"));
        assert!(output.contains("1 queries failed"));
    }

    #[test]
    fn test_normal_omits_info() {
        let output = render(Verbosity::Normal);
        assert!(!output.contains("Python HTTP for Humans."));
    }

    #[test]
    fn test_verbose_includes_info_and_failures() {
        let output = render(Verbosity::Verbose);
        assert!(output.contains("Python HTTP for Humans."));
        assert!(output.contains("license: Apache 2.0"));
        assert!(output.contains("Failed queries:"));
        assert!(output.contains("ghost: package 'ghost' not found by pip"));
    }

    #[test]
    fn test_quiet_prints_only_summary() {
        let output = render(Verbosity::Quiet);
        assert!(!output.contains("requests==2.31.0"));
        assert!(output.contains("2 packages resolved"));
    }

    #[test]
    fn test_empty_report() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false);
        let mut buffer = Vec::new();
        formatter
            .format(&ResolutionReport::default(), &mut buffer)
            .unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("0 packages resolved"));
    }
}
