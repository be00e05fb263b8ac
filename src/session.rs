//! Exclusive command session with one physical instrument.
//!
//! [`ScpiSession`] owns a single [`Transport`] behind a mutex and provides
//! the write/query/read-raw surface every instrument profile composes over,
//! plus the common IEEE 488.2 commands (`*IDN?`, `*RST`, `*CLS`, `*OPC?`).
//!
//! One session per instrument; sessions are never shared across
//! instruments. The mutex makes overlapping calls from multiple threads
//! serialize instead of interleaving bytes on the bus — it is the only
//! concurrency guarantee this library offers.

use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use log::debug;

use crate::error::{BenchResult, TransportError};
use crate::response;
use crate::transport::Transport;

/// Exclusive, blocking command session with one instrument.
pub struct ScpiSession {
    id: String,
    transport: Mutex<Box<dyn Transport>>,
}

impl ScpiSession {
    /// Wrap a transport in a session. The session takes sole ownership of
    /// the connection; it is closed when the session is dropped.
    pub fn new(id: impl Into<String>, transport: Box<dyn Transport>) -> Self {
        Self {
            id: id.into(),
            transport: Mutex::new(transport),
        }
    }

    /// Session identifier used in log messages.
    pub fn id(&self) -> &str {
        &self.id
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn Transport>> {
        // A poisoned lock means another thread panicked mid-command. The
        // instrument state is unknowable either way, so carry on with the
        // transport as-is rather than poisoning every later call.
        self.transport.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Send a command with no response expected.
    pub fn write(&self, command: &str) -> Result<(), TransportError> {
        debug!("[{}] -> {}", self.id, command);
        self.lock().write(command)
    }

    /// Send a command and block for its single-line textual response.
    pub fn query(&self, command: &str) -> Result<String, TransportError> {
        let mut transport = self.lock();
        debug!("[{}] -> {}", self.id, command);
        transport.write(command)?;
        let line = transport.read_line()?;
        debug!("[{}] <- {}", self.id, line);
        Ok(line)
    }

    /// Send a command and parse its response as a single numeric token.
    pub fn query_scalar<T: FromStr>(&self, command: &str) -> BenchResult<T> {
        let line = self.query(command)?;
        Ok(response::parse_scalar(&line)?)
    }

    /// Bulk binary read for trace dumps, framing bytes included.
    pub fn read_raw(&self) -> Result<Vec<u8>, TransportError> {
        let payload = self.lock().read_raw()?;
        debug!("[{}] <- {} raw bytes", self.id, payload.len());
        Ok(payload)
    }

    /// Query the instrument identity (`*IDN?`).
    pub fn identify(&self) -> Result<String, TransportError> {
        self.query("*IDN?")
    }

    /// Reset the instrument to factory defaults (`*RST`).
    pub fn reset(&self) -> Result<(), TransportError> {
        self.write("*RST")
    }

    /// Clear the error queue and event status register (`*CLS`).
    pub fn clear_errors(&self) -> Result<(), TransportError> {
        self.write("*CLS")
    }

    /// Block until all pending operations complete (`*OPC?`).
    ///
    /// The reply value is discarded; a compliant instrument answers `1`
    /// once the queued operations have finished.
    pub fn wait_complete(&self) -> Result<(), TransportError> {
        self.query("*OPC?").map(|_| ())
    }

    /// Current round-trip timeout.
    pub fn timeout(&self) -> Duration {
        self.lock().timeout()
    }

    /// Replace the round-trip timeout for all subsequent queries.
    pub fn set_timeout(&self, timeout: Duration) {
        self.lock().set_timeout(timeout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;

    #[test]
    fn test_query_round_trip() {
        let mock = MockTransport::new();
        mock.push_line(" 201 \n");

        let session = ScpiSession::new("vna_1", Box::new(mock.clone()));
        let points: usize = session.query_scalar("sense1:sweep:points?").unwrap();

        assert_eq!(points, 201);
        assert_eq!(mock.sent(), vec!["sense1:sweep:points?".to_string()]);
    }

    #[test]
    fn test_wait_complete_consumes_opc_reply() {
        let mock = MockTransport::new();
        mock.push_line("1");

        let session = ScpiSession::new("vna_1", Box::new(mock.clone()));
        session.wait_complete().unwrap();

        assert_eq!(mock.sent(), vec!["*OPC?".to_string()]);
    }

    #[test]
    fn test_query_timeout_propagates() {
        let session = ScpiSession::new("sa_1", Box::new(MockTransport::new()));
        let err = session.query("sweep:points?").unwrap_err();
        assert!(matches!(err, TransportError::Timeout(_)));
    }
}
