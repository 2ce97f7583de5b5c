//! CLI argument parsing module for depviz

use crate::provider::MetadataSource;
use crate::resolver::{DEFAULT_CONCURRENCY, DEFAULT_MAX_DEPTH};
use clap::Parser;
use std::path::PathBuf;

/// Python dependency graph resolver
#[derive(Parser, Debug, Clone)]
#[command(
    name = "depviz",
    version,
    about = "Resolve a requirements listing into a transitive dependency graph"
)]
pub struct CliArgs {
    /// Requirements file to resolve (default: requirements.txt)
    #[arg(default_value = "requirements.txt")]
    pub requirements: PathBuf,

    // Resolution options
    /// Maximum number of dependency edges to traverse from each requirement
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: u32,

    /// Number of concurrent resolution workers
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Metadata source to query
    #[arg(long, value_enum, default_value = "pip")]
    pub source: MetadataSource,

    /// pip executable to use with the pip source (e.g. pip3)
    #[arg(long)]
    pub pip_command: Option<String>,

    // Output options
    /// Output the resolved tree as JSON
    #[arg(long)]
    pub json: bool,

    /// Output the resolved graph in Graphviz DOT format
    #[arg(long, conflicts_with = "json")]
    pub dot: bool,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, conflicts_with = "quiet")]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::parse_from(args)
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["depviz"]);
        assert_eq!(args.requirements, PathBuf::from("requirements.txt"));
        assert_eq!(args.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(args.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(args.source, MetadataSource::Pip);
        assert!(!args.json);
        assert!(!args.dot);
        assert!(args.output.is_none());
        assert!(!args.quiet);
        assert!(!args.verbose);
    }

    #[test]
    fn test_requirements_path() {
        let args = parse(&["depviz", "deps/requirements-dev.txt"]);
        assert_eq!(args.requirements, PathBuf::from("deps/requirements-dev.txt"));
    }

    #[test]
    fn test_resolution_options() {
        let args = parse(&["depviz", "--max-depth", "3", "--concurrency", "8"]);
        assert_eq!(args.max_depth, 3);
        assert_eq!(args.concurrency, 8);
    }

    #[test]
    fn test_source_pypi() {
        let args = parse(&["depviz", "--source", "pypi"]);
        assert_eq!(args.source, MetadataSource::Pypi);
    }

    #[test]
    fn test_pip_command() {
        let args = parse(&["depviz", "--pip-command", "pip3"]);
        assert_eq!(args.pip_command.as_deref(), Some("pip3"));
    }

    #[test]
    fn test_json_flag() {
        let args = parse(&["depviz", "--json"]);
        assert!(args.json);
    }

    #[test]
    fn test_dot_conflicts_with_json() {
        let result = CliArgs::try_parse_from(["depviz", "--json", "--dot"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        let result = CliArgs::try_parse_from(["depviz", "--verbose", "--quiet"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_output_file() {
        let args = parse(&["depviz", "-o", "tree.json", "--json"]);
        assert_eq!(args.output, Some(PathBuf::from("tree.json")));
    }
}
