//! Instrument profiles.
//!
//! Each profile composes a [`crate::ScpiSession`] and exposes typed
//! operations: validate the arguments, format the command text, send it,
//! and — for acquisitions — decode the response. Profiles hold no
//! acquisition state of their own; anything the parse depends on (most
//! importantly the sweep point count) is queried from the instrument at
//! acquisition time.

pub mod siggen;
pub mod spectrum;
pub mod vna;
pub mod voltmeter;

pub use siggen::{SignalGenerator, TriggerSlope, TriggerSource};
pub use spectrum::{Spectrum, SpectrumAnalyzer};
pub use vna::{MagPhaseTrace, Vna};
pub use voltmeter::Voltmeter;
