//! Serial transport for RS-232 instrument buses.
//!
//! Wraps the `serialport` crate. The port itself is opened with a short
//! internal read timeout; the overall deadline for a response is enforced
//! here, so a slow instrument fails with [`TransportError::Timeout`] rather
//! than an opaque I/O error.

use std::io::{Read, Write};
use std::time::{Duration, Instant};

use log::debug;
use serialport::SerialPort;

use crate::error::TransportError;
use crate::transport::{Transport, DEFAULT_QUERY_TIMEOUT};

/// Internal poll interval for the underlying port. Reads loop on this until
/// the overall deadline passes.
const PORT_POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Serial transport for RS-232 communication.
pub struct SerialTransport {
    /// Port name (e.g., "/dev/ttyUSB0", "COM3"), kept for log messages.
    port_name: String,

    /// The open serial port.
    port: Box<dyn SerialPort>,

    /// Line terminator appended to outgoing commands.
    line_terminator: String,

    /// Response line ending byte.
    response_delimiter: u8,

    /// Overall response deadline.
    timeout: Duration,
}

impl SerialTransport {
    /// Open a serial port with default framing (`\n` both ways) and the
    /// default 10 s query timeout.
    pub fn open(port_name: &str, baud_rate: u32) -> Result<Self, TransportError> {
        let port = serialport::new(port_name, baud_rate)
            .timeout(PORT_POLL_TIMEOUT)
            .open()
            .map_err(std::io::Error::from)?;

        debug!("Serial port '{}' opened at {} baud", port_name, baud_rate);

        Ok(Self {
            port_name: port_name.to_string(),
            port,
            line_terminator: "\n".to_string(),
            response_delimiter: b'\n',
            timeout: DEFAULT_QUERY_TIMEOUT,
        })
    }

    /// Replace the line terminator appended to outgoing commands.
    pub fn with_line_terminator(mut self, terminator: &str) -> Self {
        self.line_terminator = terminator.to_string();
        self
    }

    /// Replace the byte that ends an incoming response line.
    pub fn with_response_delimiter(mut self, delimiter: u8) -> Self {
        self.response_delimiter = delimiter;
        self
    }
}

impl Transport for SerialTransport {
    fn write(&mut self, command: &str) -> Result<(), TransportError> {
        let framed = format!("{}{}", command, self.line_terminator);
        self.port.write_all(framed.as_bytes())?;
        self.port.flush()?;
        debug!("[{}] sent: {}", self.port_name, command);
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, TransportError> {
        let deadline = Instant::now() + self.timeout;
        let mut response = Vec::new();
        let mut buffer = [0u8; 1];

        loop {
            if Instant::now() > deadline {
                return Err(TransportError::Timeout(self.timeout));
            }

            match self.port.read(&mut buffer) {
                Ok(1) => {
                    if buffer[0] == self.response_delimiter {
                        break;
                    }
                    response.push(buffer[0]);
                }
                // EOF - shouldn't happen with serial ports
                Ok(_) => return Err(TransportError::Disconnected),
                Err(e) if e.kind() == std::io::ErrorKind::TimedOut => continue,
                Err(e) => return Err(TransportError::Io(e)),
            }
        }

        let line = String::from_utf8_lossy(&response).trim().to_string();
        debug!("[{}] received: {}", self.port_name, line);
        Ok(line)
    }

    fn read_raw(&mut self) -> Result<Vec<u8>, TransportError> {
        let deadline = Instant::now() + self.timeout;
        let mut payload = Vec::new();
        let mut chunk = [0u8; 512];

        loop {
            match self.port.read(&mut chunk) {
                Ok(0) => return Err(TransportError::Disconnected),
                Ok(n) => payload.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == std::io::ErrorKind::TimedOut => {
                    // The instrument pauses once the dump is complete; a quiet
                    // poll after data has arrived marks the end of the block.
                    if !payload.is_empty() {
                        break;
                    }
                    if Instant::now() > deadline {
                        return Err(TransportError::Timeout(self.timeout));
                    }
                }
                Err(e) => return Err(TransportError::Io(e)),
            }
        }

        debug!("[{}] received {} raw bytes", self.port_name, payload.len());
        Ok(payload)
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }
}
