//! Custom error types for the library.
//!
//! Two error kinds cover everything the command adapters can hit:
//!
//! - [`TransportError`]: the instrument bus failed — the connection dropped,
//!   the port could not be written, or no response arrived before the
//!   timeout elapsed.
//! - [`ParseError`]: the instrument answered, but the response did not match
//!   the expected field count or type.
//!
//! Neither kind is retried or recovered inside the adapter; both propagate
//! unchanged to the caller through the [`BenchError`] umbrella. There is no
//! partial-success state: an operation either completes its full command
//! sequence or returns an error before producing a result.

use std::time::Duration;
use thiserror::Error;

/// Convenience alias for results using the library error type.
pub type BenchResult<T> = std::result::Result<T, BenchError>;

/// Failure at the instrument bus level.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("I/O error on instrument bus: {0}")]
    Io(#[from] std::io::Error),

    #[error("no response within {0:?}")]
    Timeout(Duration),

    #[error("transport disconnected")]
    Disconnected,

    #[error("not connected to instrument")]
    NotConnected,

    #[error("serial support not enabled. Rebuild with --features instrument_serial")]
    FeatureDisabled,
}

/// A response that did not match the expected field count or type.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("response token '{token}' is not a number")]
    InvalidNumber { token: String },

    #[error("expected {expected} values, response carried {actual}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("paired trace carried an odd number of values ({0})")]
    OddPairCount(usize),

    #[error("binary trace block shorter than its fixed framing ({0} bytes)")]
    TruncatedBlock(usize),

    #[error("empty response where a value was expected")]
    EmptyResponse,
}

/// Top-level error type consolidating every failure source in the crate.
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Storage profile '{0}' is not defined in the configuration")]
    UnknownProfile(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "storage_csv")]
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),
}
