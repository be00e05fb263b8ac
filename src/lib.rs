//! Typed SCPI command adapters for benchtop lab instruments.
//!
//! This library wraps four instrument profiles — a vector network analyzer,
//! a spectrum analyzer, a signal generator, and a voltmeter — behind typed
//! operations. Every operation formats one or more ASCII SCPI commands,
//! sends them through a [`transport::Transport`], and, where a response is
//! expected, decodes the delimited text or framed binary payload into
//! numeric arrays.
//!
//! The model is deliberately synchronous and blocking: each
//! [`ScpiSession`] owns exactly one exclusive transport connection to one
//! physical instrument, guarded by a mutex. There is no retry, no
//! cancellation, and no background task; a failed command propagates its
//! error unmodified to the caller.

pub mod config;
pub mod error;
pub mod instrument;
pub mod response;
pub mod session;
pub mod storage;
pub mod transport;

pub use error::{BenchError, BenchResult, ParseError, TransportError};
pub use session::ScpiSession;
