//! Spectrum analyzer profile.
//!
//! Setters are pure formatting; the one acquisition, [`SpectrumAnalyzer::capture`],
//! follows the bulk-transfer protocol: the sweep limits and point count are
//! queried fresh, the combined trigger/wait/trace-request command is sent,
//! and the reply arrives as a raw byte blob with a fixed 2-byte header and
//! 3-byte trailer around a comma-separated float payload.

use crate::error::{BenchError, BenchResult, ParseError};
use crate::response;
use crate::session::ScpiSession;

/// One captured sweep with its computed frequency axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    /// Linearly spaced axis between the sweep start and stop, inclusive.
    pub frequency_hz: Vec<f64>,
    /// Amplitude samples in dBm, one per axis point.
    pub amplitude_dbm: Vec<f64>,
}

/// Spectrum analyzer command adapter.
pub struct SpectrumAnalyzer {
    session: ScpiSession,
}

impl SpectrumAnalyzer {
    /// Build the adapter over an exclusive session.
    pub fn new(session: ScpiSession) -> Self {
        Self { session }
    }

    /// The underlying session.
    pub fn session(&self) -> &ScpiSession {
        &self.session
    }

    /// Set the center frequency in Hz.
    pub fn set_center_frequency(&self, hz: f64) -> BenchResult<()> {
        if hz <= 0.0 {
            return Err(BenchError::InvalidArgument(format!(
                "center frequency must be positive, got {} Hz",
                hz
            )));
        }
        self.session.write(&format!("frequency:center {}", hz))?;
        Ok(())
    }

    /// Set the frequency span in Hz.
    pub fn set_span(&self, hz: f64) -> BenchResult<()> {
        if hz <= 0.0 {
            return Err(BenchError::InvalidArgument(format!(
                "span must be positive, got {} Hz",
                hz
            )));
        }
        self.session.write(&format!("frequency:span {}", hz))?;
        Ok(())
    }

    /// Set the input attenuation in dB.
    pub fn set_attenuation(&self, db: f64) -> BenchResult<()> {
        if db < 0.0 {
            return Err(BenchError::InvalidArgument(format!(
                "attenuation must be non-negative, got {} dB",
                db
            )));
        }
        self.session.write(&format!("power:attenuation {}", db))?;
        Ok(())
    }

    /// Set the resolution bandwidth in Hz.
    pub fn set_resolution_bandwidth(&self, hz: f64) -> BenchResult<()> {
        if hz <= 0.0 {
            return Err(BenchError::InvalidArgument(format!(
                "resolution bandwidth must be positive, got {} Hz",
                hz
            )));
        }
        self.session.write(&format!("bandwidth:resolution {}", hz))?;
        Ok(())
    }

    /// Switch continuous sweeping on or off.
    pub fn set_continuous_sweep(&self, enabled: bool) -> BenchResult<()> {
        let state = if enabled { "on" } else { "off" };
        self.session.write(&format!("initiate:continuous {}", state))?;
        Ok(())
    }

    /// Switch the front-panel display on or off.
    pub fn set_display(&self, enabled: bool) -> BenchResult<()> {
        let state = if enabled { "on" } else { "off" };
        self.session.write(&format!("display:enable {}", state))?;
        Ok(())
    }

    /// Trigger a sweep and read the amplitude trace.
    ///
    /// Start, stop, and point count are queried immediately before the
    /// transfer; a payload whose value count differs from the fresh point
    /// count fails with [`ParseError::CountMismatch`] rather than being
    /// truncated or padded.
    pub fn capture(&self) -> BenchResult<Spectrum> {
        let start: f64 = self.session.query_scalar("frequency:start?")?;
        let stop: f64 = self.session.query_scalar("frequency:stop?")?;
        let points: usize = self.session.query_scalar("sweep:points?")?;

        self.session
            .write("initiate:immediate;*wai;:trace:data? trace1")?;
        let raw = self.session.read_raw()?;

        let payload = response::strip_block_framing(&raw)?;
        let text = String::from_utf8_lossy(payload);
        let amplitude_dbm = response::parse_float_list(&text)?;

        if amplitude_dbm.len() != points {
            return Err(ParseError::CountMismatch {
                expected: points,
                actual: amplitude_dbm.len(),
            }
            .into());
        }

        Ok(Spectrum {
            frequency_hz: response::linspace(start, stop, points),
            amplitude_dbm,
        })
    }
}
