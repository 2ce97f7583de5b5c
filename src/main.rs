//! depviz - Python dependency graph resolver CLI
//!
//! Resolves a requirements listing into a full transitive dependency graph
//! by querying a package metadata source, and exports the graph as text,
//! JSON, or Graphviz DOT.

use clap::Parser;
use depviz::cli::CliArgs;
use depviz::domain::RequirementSpec;
use depviz::error::OutputError;
use depviz::output::{create_formatter, OutputConfig};
use depviz::parser::parse_requirements_file;
use depviz::progress::Progress;
use depviz::provider::{create_provider, MetadataProvider, MetadataSource, PipShowProvider};
use depviz::resolver::{Resolver, ResolverConfig};
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Install the tracing subscriber, honoring RUST_LOG when set
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "depviz=debug" } else { "depviz=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let requirements = parse_requirements_file(&args.requirements)?;

    let machine_output = args.json || args.dot;
    if !args.quiet && !machine_output {
        println!("Top-level requirements:");
        for (name, constraint) in &requirements {
            let spec = RequirementSpec {
                name: name.clone(),
                constraint: constraint.clone(),
            };
            println!("  {}", spec);
        }
        println!();
    }

    let provider = build_provider(&args)?;
    let resolver = Resolver::with_config(
        provider,
        ResolverConfig::new(args.max_depth, args.concurrency),
    );

    let mut progress = Progress::new(!args.quiet && !machine_output);
    progress.spinner("Resolving dependency tree...");
    let report = resolver.resolve(&requirements).await;
    progress.finish_and_clear();

    let config = OutputConfig::from_cli(args.json, args.dot, args.verbose, args.quiet);
    let formatter = create_formatter(config);

    match &args.output {
        Some(path) => {
            let mut file = std::fs::File::create(path).map_err(|e| OutputError::WriteError {
                path: path.clone(),
                source: e,
            })?;
            formatter.format(&report, &mut file)?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            formatter.format(&report, &mut stdout)?;
            stdout.flush()?;
        }
    }

    // The text formatter reports failures itself in verbose mode; for
    // machine formats they go to stderr so stdout stays parseable.
    if args.verbose && machine_output && report.has_failures() {
        eprintln!();
        eprintln!("Failed queries:");
        for failure in &report.failures {
            eprintln!("  {}: {}", failure.package, failure.error);
        }
    }

    if report.has_failures() {
        // Partial success - some packages could not be resolved
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Construct the metadata provider selected on the command line
fn build_provider(args: &CliArgs) -> anyhow::Result<Arc<dyn MetadataProvider>> {
    if let Some(pip_command) = &args.pip_command {
        if args.source != MetadataSource::Pip {
            anyhow::bail!("--pip-command only applies to the pip source");
        }
        return Ok(Arc::new(PipShowProvider::with_command(pip_command)));
    }
    Ok(create_provider(args.source)?)
}
