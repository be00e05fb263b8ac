//! Transport implementations for the instrument bus.
//!
//! A [`Transport`] is the byte-level channel to one physical instrument.
//! The library ships a serial implementation behind the `instrument_serial`
//! feature and a scripted [`MockTransport`] for tests and dry runs. Every
//! call blocks the calling thread until the bus completes or the configured
//! timeout elapses.

use std::time::Duration;

use crate::error::TransportError;

pub mod mock;
#[cfg(feature = "instrument_serial")]
pub mod serial;

pub use mock::MockTransport;
#[cfg(feature = "instrument_serial")]
pub use serial::SerialTransport;

/// Default round-trip timeout for a query.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Blocking byte-level channel to one instrument.
///
/// Implementations append their own line terminator on write and strip the
/// response delimiter on read. One transport belongs to exactly one
/// [`crate::ScpiSession`]; sharing a transport between sessions is not
/// supported.
pub trait Transport: Send {
    /// Send a command with no response expected.
    fn write(&mut self, command: &str) -> Result<(), TransportError>;

    /// Block until a single delimited text line is read, returning it with
    /// the delimiter and surrounding whitespace stripped.
    fn read_line(&mut self) -> Result<String, TransportError>;

    /// Bulk binary read for trace dumps. Returns whatever the instrument
    /// sent, framing bytes included.
    fn read_raw(&mut self) -> Result<Vec<u8>, TransportError>;

    /// Current round-trip timeout.
    fn timeout(&self) -> Duration;

    /// Replace the round-trip timeout.
    fn set_timeout(&mut self, timeout: Duration);
}
