//! Digital voltmeter profile.

use crate::error::{BenchError, BenchResult};
use crate::session::ScpiSession;

/// Voltmeter command adapter.
pub struct Voltmeter {
    session: ScpiSession,
}

impl Voltmeter {
    /// Build the adapter over an exclusive session.
    pub fn new(session: ScpiSession) -> Self {
        Self { session }
    }

    /// The underlying session.
    pub fn session(&self) -> &ScpiSession {
        &self.session
    }

    /// Measure DC voltage. Returns the reading in volts.
    pub fn measure_dc(&self) -> BenchResult<f64> {
        self.session.query_scalar("measure:voltage:dc?")
    }

    /// Measure AC voltage. Returns the reading in volts RMS.
    pub fn measure_ac(&self) -> BenchResult<f64> {
        self.session.query_scalar("measure:voltage:ac?")
    }

    /// Fix the DC measurement range in volts.
    pub fn set_range(&self, volts: f64) -> BenchResult<()> {
        if volts <= 0.0 {
            return Err(BenchError::InvalidArgument(format!(
                "measurement range must be positive, got {} V",
                volts
            )));
        }
        self.session
            .write(&format!("sense:voltage:dc:range {}", volts))?;
        Ok(())
    }

    /// Set the integration time in power-line cycles.
    pub fn set_integration_nplc(&self, cycles: f64) -> BenchResult<()> {
        if cycles <= 0.0 {
            return Err(BenchError::InvalidArgument(format!(
                "integration time must be positive, got {} NPLC",
                cycles
            )));
        }
        self.session
            .write(&format!("sense:voltage:dc:nplc {}", cycles))?;
        Ok(())
    }
}
