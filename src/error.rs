//! Error types for channel and channel-unit operations.
//!
//! Direction mismatches when adding channels to a unit are programmer
//! errors and panic instead of surfacing here; see
//! [`ChannelUnit::add_output_related`](crate::channel::ChannelUnit::add_output_related).

use thiserror::Error;

/// Errors raised while building, loading or specializing channel units.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// A channel index range with `start > end`.
    #[error("invalid channel index for '{name}': start {start} > end {end}")]
    InvalidIndex {
        /// Channel name
        name: String,
        /// Range start (inclusive)
        start: usize,
        /// Range end (exclusive)
        end: usize,
    },

    /// A required field is absent from a config.
    #[error("missing field '{field}' in {context}")]
    MissingField {
        /// Field name
        field: &'static str,
        /// Where the field was expected
        context: String,
    },

    /// A unit config has no `init_args` section.
    #[error("unit config has no 'init_args'")]
    MissingInitArgs,

    /// An `init_args` entry is missing or has the wrong type.
    #[error("invalid init arg '{key}': {reason}")]
    InvalidInitArg {
        /// Argument name
        key: String,
        /// What was wrong with it
        reason: String,
    },

    /// No analyzer builder is registered under this type name.
    #[error("unknown analyzer type '{type_name}'")]
    UnknownAnalyzer {
        /// Requested type name
        type_name: String,
    },

    /// An analyzer failed to produce unit configs.
    ///
    /// Raised by [`ChannelAnalyzer`](crate::analyzer::ChannelAnalyzer)
    /// implementations outside this crate, e.g. graph tracers.
    #[error("analyzer '{analyzer}' failed: {message}")]
    Analyzer {
        /// Analyzer name
        analyzer: String,
        /// Failure description
        message: String,
    },

    /// An active channel count outside `1..=num_channels`.
    #[error("invalid channel choice {choice} for unit with {num_channels} channels")]
    InvalidChoice {
        /// Requested channel count
        choice: usize,
        /// Unit channel count
        num_channels: usize,
    },

    /// JSON encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading or writing a config stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for channel operations.
pub type Result<T> = std::result::Result<T, ChannelError>;
