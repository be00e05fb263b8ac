//! Configuration loading and validation.
//!
//! Settings come from `config/default.toml` plus environment overrides
//! prefixed with `LABBENCH_` (e.g. `LABBENCH_APPLICATION__LOG_LEVEL=debug`).
//!
//! The `storage.profiles` table replaces what used to be per-user hardcoded
//! path branching in measurement scripts: each profile maps a name to the
//! base directory results are filed under. The command adapters themselves
//! never read this — only the storage collaborator does.
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [instruments.vna_1]
//! port = "/dev/ttyUSB0"
//! baud_rate = 115200
//! timeout_ms = 10000
//! channel = 1
//!
//! [storage.profiles.cryo_lab]
//! base_path = "/data/cryo"
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Top-level settings for the bench.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    /// Application-level settings.
    #[serde(default)]
    pub application: ApplicationSettings,
    /// Per-instrument connection settings, keyed by instrument id.
    #[serde(default)]
    pub instruments: HashMap<String, InstrumentSettings>,
    /// Result storage settings.
    #[serde(default)]
    pub storage: StorageSettings,
}

/// Application-level settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Connection settings for one instrument.
#[derive(Debug, Clone, Deserialize)]
pub struct InstrumentSettings {
    /// Serial port path (e.g., "/dev/ttyUSB0", "COM3").
    pub port: String,
    /// Baud rate.
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
    /// Query timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Measurement channel, for instruments that have one.
    #[serde(default = "default_channel")]
    pub channel: u8,
}

/// Result storage settings.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StorageSettings {
    /// Named storage profiles: profile name → base directory.
    #[serde(default)]
    pub profiles: HashMap<String, StorageProfile>,
}

/// One storage profile.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageProfile {
    /// Base directory all results for this profile are filed under.
    pub base_path: PathBuf,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_baud_rate() -> u32 {
    9600
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_channel() -> u8 {
    1
}

impl Settings {
    /// Load settings from `config/default.toml` (optional) with
    /// `LABBENCH_`-prefixed environment overrides applied on top.
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(Environment::with_prefix("LABBENCH").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply() {
        let settings = Settings::default();
        assert_eq!(settings.application.log_level, "info");
        assert!(settings.instruments.is_empty());
        assert!(settings.storage.profiles.is_empty());
    }

    #[test]
    fn test_instrument_settings_fill_defaults() {
        let toml = r#"
            [instruments.vna_1]
            port = "/dev/ttyUSB0"

            [storage.profiles.cryo_lab]
            base_path = "/data/cryo"
        "#;
        let settings: Settings = Config::builder()
            .add_source(File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        let vna = &settings.instruments["vna_1"];
        assert_eq!(vna.port, "/dev/ttyUSB0");
        assert_eq!(vna.baud_rate, 9600);
        assert_eq!(vna.timeout_ms, 10_000);
        assert_eq!(vna.channel, 1);
        assert_eq!(
            settings.storage.profiles["cryo_lab"].base_path,
            PathBuf::from("/data/cryo")
        );
    }
}
