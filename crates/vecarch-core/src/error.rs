//! Error types for vecarch-core.
//!
//! The feature probe and the kernels cannot fail; errors only arise from
//! configuration and from explicit snapshot initialization.

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Probe configuration could not be loaded or validated.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The process-wide feature snapshot was already published.
    #[error(
        "CPU feature snapshot already published; initialize() must run before the first capability query"
    )]
    AlreadyInitialized,
}

/// Probe configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Figment failed to merge or extract the configuration sources.
    #[error("invalid probe configuration: {0}")]
    Figment(#[from] Box<figment::Error>),

    /// A configured tag name is not in the catalogue.
    #[error(transparent)]
    UnknownArch(#[from] UnknownArch),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

/// A name that does not match any architecture tag.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown architecture tag `{0}`")]
pub struct UnknownArch(pub String);

/// Result type alias for vecarch operations.
pub type Result<T> = std::result::Result<T, Error>;
