//! Signal generator profile.
//!
//! Every operation here is a pure formatting function: validate, format,
//! send, no decoding. Frequency can be driven in absolute CW mode or in
//! incremental-step mode where the output moves by a configured step per
//! `step_up`/`step_down` call.

use crate::error::{BenchError, BenchResult, TransportError};
use crate::session::ScpiSession;

/// Trigger source selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    /// Free-running internal trigger.
    Immediate,
    /// Rear-panel external trigger input.
    External,
    /// Bus trigger (`*TRG`).
    Bus,
}

impl TriggerSource {
    fn as_scpi(self) -> &'static str {
        match self {
            TriggerSource::Immediate => "immediate",
            TriggerSource::External => "external",
            TriggerSource::Bus => "bus",
        }
    }
}

/// Trigger edge selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSlope {
    /// Rising edge.
    Positive,
    /// Falling edge.
    Negative,
}

impl TriggerSlope {
    fn as_scpi(self) -> &'static str {
        match self {
            TriggerSlope::Positive => "positive",
            TriggerSlope::Negative => "negative",
        }
    }
}

/// Signal generator command adapter.
pub struct SignalGenerator {
    session: ScpiSession,
}

impl SignalGenerator {
    /// Build the adapter over an exclusive session.
    pub fn new(session: ScpiSession) -> Self {
        Self { session }
    }

    /// The underlying session.
    pub fn session(&self) -> &ScpiSession {
        &self.session
    }

    /// Set an absolute CW output frequency.
    ///
    /// Switches the source to CW mode before setting the frequency, so a
    /// prior step-mode configuration cannot leak into the new value.
    pub fn set_frequency(&self, hz: f64) -> BenchResult<()> {
        if hz <= 0.0 {
            return Err(BenchError::InvalidArgument(format!(
                "output frequency must be positive, got {} Hz",
                hz
            )));
        }
        self.session.write("source:frequency:mode cw")?;
        self.session.write(&format!("source:frequency:cw {}", hz))?;
        Ok(())
    }

    /// Configure the frequency increment for step mode.
    pub fn set_frequency_step(&self, hz: f64) -> BenchResult<()> {
        if hz <= 0.0 {
            return Err(BenchError::InvalidArgument(format!(
                "frequency step must be positive, got {} Hz",
                hz
            )));
        }
        self.session.write(&format!("source:frequency:step {}", hz))?;
        Ok(())
    }

    /// Move the output up by one configured step.
    pub fn step_up(&self) -> Result<(), TransportError> {
        self.session.write("source:frequency:cw up")
    }

    /// Move the output down by one configured step.
    pub fn step_down(&self) -> Result<(), TransportError> {
        self.session.write("source:frequency:cw down")
    }

    /// Set the output power level in dBm.
    pub fn set_power_dbm(&self, dbm: f64) -> Result<(), TransportError> {
        self.session.write(&format!("source:power:level {}", dbm))
    }

    /// Switch the RF output on or off.
    pub fn set_output(&self, enabled: bool) -> Result<(), TransportError> {
        let state = if enabled { "on" } else { "off" };
        self.session.write(&format!("output:state {}", state))
    }

    /// Select the trigger source.
    pub fn set_trigger_source(&self, source: TriggerSource) -> Result<(), TransportError> {
        self.session
            .write(&format!("trigger:source {}", source.as_scpi()))
    }

    /// Set the external trigger level in volts.
    pub fn set_trigger_level(&self, volts: f64) -> Result<(), TransportError> {
        self.session.write(&format!("trigger:level {}", volts))
    }

    /// Select the external trigger edge.
    pub fn set_trigger_slope(&self, slope: TriggerSlope) -> Result<(), TransportError> {
        self.session
            .write(&format!("trigger:slope {}", slope.as_scpi()))
    }
}
