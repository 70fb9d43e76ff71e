//! Analysis, allocation and configuration errors

use crate::span::Span;
use thiserror::Error;

/// Result of preparing one function unit
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors that abort preparation of a single function.
///
/// Any of these means an upstream phase handed over a tree this phase cannot
/// number safely; the function's compilation is abandoned as a whole.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// An array literal still holds a spread element
    #[error("array literal at {span} still contains a spread element at index {index}")]
    SpreadNotRewound {
        /// Location of the array literal
        span: Span,
        /// Position of the spread among the literal's values
        index: usize,
    },

    /// The boilerplate allocator refused a table
    #[error(transparent)]
    Alloc(#[from] AllocError),
}

/// Errors reported by a [`BoilerplateAllocator`](crate::literal::BoilerplateAllocator)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocError {
    /// Requested table is larger than the configured limit
    #[error("boilerplate table of {requested} entries exceeds limit of {limit}")]
    CapacityExceeded {
        /// Entries the table needed
        requested: usize,
        /// Configured maximum
        limit: usize,
    },
}

/// Errors while loading analysis configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Parsed but semantically invalid
    #[error("Invalid config: {0}")]
    Invalid(String),
}
