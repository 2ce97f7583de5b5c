//! Application error types using thiserror
//!
//! Error hierarchy:
//! - RequirementsError: Issues with the requirements source (fatal)
//! - ProviderError: Issues with a single package metadata query (non-fatal,
//!   collected per package by the resolver)
//! - OutputError: Issues writing the resolved graph

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Requirements source related errors
    #[error(transparent)]
    Requirements(#[from] RequirementsError),

    /// Package metadata query related errors
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Output related errors
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Errors related to the requirements source
///
/// These are fatal to the whole run: resolution never starts if the
/// requirements listing cannot be read.
#[derive(Error, Debug)]
pub enum RequirementsError {
    /// Requirements file not found
    #[error("requirements file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read the requirements file
    #[error("failed to read requirements file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from a single package metadata query
///
/// Cloneable so a single in-flight query's failure can be shared with every
/// caller coalesced onto it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Package not known to the metadata source
    #[error("package '{package}' not found by {provider}")]
    PackageNotFound { package: String, provider: String },

    /// Query reached the metadata source but failed
    #[error("failed to query '{package}' via {provider}: {message}")]
    QueryFailed {
        package: String,
        provider: String,
        message: String,
    },

    /// Metadata source command could not be executed
    #[error("failed to run metadata command for '{package}': {message}")]
    CommandFailed { package: String, message: String },

    /// Response arrived but could not be interpreted
    #[error("invalid metadata for '{package}': {message}")]
    InvalidMetadata { package: String, message: String },

    /// Timeout while querying the metadata source
    #[error("timeout while querying '{package}' via {provider}")]
    Timeout { package: String, provider: String },
}

/// Errors related to writing resolver output
#[derive(Error, Debug)]
pub enum OutputError {
    /// Failed to serialize the resolved tree
    #[error("failed to serialize output: {message}")]
    SerializeError { message: String },

    /// Failed to write to the output destination
    #[error("failed to write output to {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RequirementsError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        RequirementsError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RequirementsError::ReadError {
            path: path.into(),
            source,
        }
    }
}

impl ProviderError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>, provider: impl Into<String>) -> Self {
        ProviderError::PackageNotFound {
            package: package.into(),
            provider: provider.into(),
        }
    }

    /// Creates a new QueryFailed error
    pub fn query_failed(
        package: impl Into<String>,
        provider: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ProviderError::QueryFailed {
            package: package.into(),
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Creates a new CommandFailed error
    pub fn command_failed(package: impl Into<String>, message: impl Into<String>) -> Self {
        ProviderError::CommandFailed {
            package: package.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidMetadata error
    pub fn invalid_metadata(package: impl Into<String>, message: impl Into<String>) -> Self {
        ProviderError::InvalidMetadata {
            package: package.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, provider: impl Into<String>) -> Self {
        ProviderError::Timeout {
            package: package.into(),
            provider: provider.into(),
        }
    }
}
