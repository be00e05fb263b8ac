//! A scripted transport that talks to no hardware.
//!
//! `MockTransport` records every command written to it and replays a queue
//! of prepared responses. It is cloneable — the clone shares the same
//! command log and response queue — so a test can hand one clone to a
//! session and keep the other to inspect what was sent.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::error::TransportError;
use crate::transport::{Transport, DEFAULT_QUERY_TIMEOUT};

enum Reply {
    Line(String),
    Raw(Vec<u8>),
    Timeout,
}

struct Inner {
    sent: Vec<String>,
    replies: VecDeque<Reply>,
    timeout: Duration,
}

/// Scripted transport for tests and dry runs.
#[derive(Clone)]
pub struct MockTransport {
    inner: Arc<Mutex<Inner>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    /// Create an empty mock with no scripted responses.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                sent: Vec::new(),
                replies: VecDeque::new(),
                timeout: DEFAULT_QUERY_TIMEOUT,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock only means a test thread panicked mid-exchange.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Queue a text line to be returned by the next `read_line`.
    pub fn push_line(&self, line: &str) {
        self.lock().replies.push_back(Reply::Line(line.to_string()));
    }

    /// Queue a raw byte blob to be returned by the next `read_raw`.
    pub fn push_raw(&self, bytes: Vec<u8>) {
        self.lock().replies.push_back(Reply::Raw(bytes));
    }

    /// Queue a simulated timeout for the next read.
    pub fn push_timeout(&self) {
        self.lock().replies.push_back(Reply::Timeout);
    }

    /// Every command written so far, in order.
    pub fn sent(&self) -> Vec<String> {
        self.lock().sent.clone()
    }

    /// Drain and return the command log.
    pub fn take_sent(&self) -> Vec<String> {
        std::mem::take(&mut self.lock().sent)
    }
}

impl Transport for MockTransport {
    fn write(&mut self, command: &str) -> Result<(), TransportError> {
        self.lock().sent.push(command.to_string());
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, TransportError> {
        let mut inner = self.lock();
        match inner.replies.pop_front() {
            Some(Reply::Line(line)) => Ok(line),
            Some(Reply::Raw(_)) => Err(TransportError::Disconnected),
            Some(Reply::Timeout) | None => Err(TransportError::Timeout(inner.timeout)),
        }
    }

    fn read_raw(&mut self) -> Result<Vec<u8>, TransportError> {
        let mut inner = self.lock();
        match inner.replies.pop_front() {
            Some(Reply::Raw(bytes)) => Ok(bytes),
            Some(Reply::Line(line)) => Ok(line.into_bytes()),
            Some(Reply::Timeout) | None => Err(TransportError::Timeout(inner.timeout)),
        }
    }

    fn timeout(&self) -> Duration {
        self.lock().timeout
    }

    fn set_timeout(&mut self, timeout: Duration) {
        self.lock().timeout = timeout;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_commands_and_replays_responses() {
        let mock = MockTransport::new();
        mock.push_line("Keysight Technologies,N9917A,MY123,A.01");

        let mut handle: Box<dyn Transport> = Box::new(mock.clone());
        handle.write("*IDN?").unwrap();
        let reply = handle.read_line().unwrap();

        assert_eq!(mock.sent(), vec!["*IDN?".to_string()]);
        assert!(reply.starts_with("Keysight"));
    }

    #[test]
    fn test_mock_empty_queue_times_out() {
        let mut mock = MockTransport::new();
        assert!(matches!(
            mock.read_line(),
            Err(TransportError::Timeout(_))
        ));
    }
}
