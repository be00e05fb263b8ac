//! Vector network analyzer profile.
//!
//! Sweep configuration plus two acquisition shapes: formatted
//! magnitude/phase data and raw S-parameter (complex) data. The point
//! count used to validate a parse is queried from the instrument
//! immediately before the data query, never cached — the configured count
//! can change between sweeps and a stale value would silently misframe the
//! trace.

use num_complex::Complex64;

use crate::error::{BenchError, BenchResult, ParseError};
use crate::response;
use crate::session::ScpiSession;

/// One acquired sweep, split into magnitude and phase.
#[derive(Debug, Clone, PartialEq)]
pub struct MagPhaseTrace {
    /// Magnitude samples in dB, one per sweep point.
    pub magnitude_db: Vec<f64>,
    /// Phase samples in degrees, one per sweep point.
    pub phase_deg: Vec<f64>,
}

/// Vector network analyzer command adapter.
pub struct Vna {
    session: ScpiSession,
    channel: u8,
}

impl Vna {
    /// Adapter on measurement channel 1.
    pub fn new(session: ScpiSession) -> Self {
        Self::with_channel(session, 1)
    }

    /// Adapter on an explicit measurement channel.
    pub fn with_channel(session: ScpiSession, channel: u8) -> Self {
        Self { session, channel }
    }

    /// The underlying session, for common-command access (`*IDN?`, `*RST`).
    pub fn session(&self) -> &ScpiSession {
        &self.session
    }

    /// Enable sweep averaging with the given factor.
    ///
    /// Emits exactly two commands: enable, then count. The factor must lie
    /// in `[1, 15]`; out-of-range values are rejected before anything is
    /// sent.
    pub fn set_averaging(&self, factor: u32) -> BenchResult<()> {
        if !(1..=15).contains(&factor) {
            return Err(BenchError::InvalidArgument(format!(
                "averaging factor {} outside [1, 15]",
                factor
            )));
        }
        self.session
            .write(&format!("sense{}:average on", self.channel))?;
        self.session
            .write(&format!("sense{}:average:count {}", self.channel, factor))?;
        Ok(())
    }

    /// Set the IF bandwidth in Hz.
    pub fn set_if_bandwidth(&self, hz: f64) -> BenchResult<()> {
        if hz <= 0.0 {
            return Err(BenchError::InvalidArgument(format!(
                "IF bandwidth must be positive, got {} Hz",
                hz
            )));
        }
        self.session
            .write(&format!("sense{}:bandwidth {}", self.channel, hz))?;
        Ok(())
    }

    /// Configure the sweep range and point count.
    ///
    /// Emits exactly three commands in order: points, start, stop.
    pub fn set_sweep(&self, start_hz: f64, stop_hz: f64, points: usize) -> BenchResult<()> {
        if start_hz >= stop_hz {
            return Err(BenchError::InvalidArgument(format!(
                "sweep start {} Hz must be below stop {} Hz",
                start_hz, stop_hz
            )));
        }
        if points < 1 {
            return Err(BenchError::InvalidArgument(
                "sweep needs at least one point".to_string(),
            ));
        }
        self.session
            .write(&format!("sense{}:sweep:points {}", self.channel, points))?;
        self.session
            .write(&format!("sense{}:frequency:start {}", self.channel, start_hz))?;
        self.session
            .write(&format!("sense{}:frequency:stop {}", self.channel, stop_hz))?;
        Ok(())
    }

    fn trigger_and_wait(&self) -> BenchResult<()> {
        self.session
            .write(&format!("initiate{}:immediate", self.channel))?;
        self.session.wait_complete()?;
        Ok(())
    }

    fn point_count(&self) -> BenchResult<usize> {
        self.session
            .query_scalar(&format!("sense{}:sweep:points?", self.channel))
    }

    /// Trigger a sweep and collect formatted magnitude/phase data.
    ///
    /// The instrument returns one flat comma-separated array of `2k`
    /// floats: the first `k` are magnitude, the remaining `k` phase. The
    /// array length is validated against the freshly queried point count
    /// before the split.
    pub fn acquire_mag_phase(&self) -> BenchResult<MagPhaseTrace> {
        self.trigger_and_wait()?;
        let points = self.point_count()?;

        let line = self
            .session
            .query(&format!("calculate{}:data? fdata", self.channel))?;
        let values = response::parse_float_list(&line)?;
        if values.len() != points * 2 {
            return Err(ParseError::CountMismatch {
                expected: points * 2,
                actual: values.len(),
            }
            .into());
        }

        let (magnitude_db, phase_deg) = response::split_mag_phase(values)?;
        Ok(MagPhaseTrace {
            magnitude_db,
            phase_deg,
        })
    }

    /// Trigger a sweep and collect the complex S-parameter trace.
    ///
    /// The instrument returns `2n` floats as interleaved (real, imaginary)
    /// pairs; sample `i` is `input[2i] + j*input[2i+1]`.
    pub fn acquire_complex(&self) -> BenchResult<Vec<Complex64>> {
        self.trigger_and_wait()?;
        let points = self.point_count()?;

        let line = self
            .session
            .query(&format!("calculate{}:data? sdata", self.channel))?;
        let values = response::parse_float_list(&line)?;
        if values.len() != points * 2 {
            return Err(ParseError::CountMismatch {
                expected: points * 2,
                actual: values.len(),
            }
            .into());
        }

        Ok(response::pair_complex(&values)?)
    }

    /// Frequency axis for the currently configured sweep, queried fresh.
    pub fn sweep_axis(&self) -> BenchResult<Vec<f64>> {
        let start: f64 = self
            .session
            .query_scalar(&format!("sense{}:frequency:start?", self.channel))?;
        let stop: f64 = self
            .session
            .query_scalar(&format!("sense{}:frequency:stop?", self.channel))?;
        let points = self.point_count()?;
        Ok(response::linspace(start, stop, points))
    }
}
