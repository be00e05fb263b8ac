//! Result storage collaborator.
//!
//! The command adapters never touch the filesystem; acquired traces are
//! handed here with naming metadata and this module resolves the target
//! directory and serializes them. The layout matches the lab's filing
//! convention:
//!
//! ```text
//! <base>/<root_id><measurement_type>/<MM-DD-YYYY>/<subdir>/<file>
//! ```
//!
//! where `<base>` comes from the named storage profile in [`Settings`]
//! rather than from any hardcoded per-user branch.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDate;
#[cfg(feature = "storage_csv")]
use log::info;

use crate::config::{Settings, StorageSettings};
use crate::error::{BenchError, BenchResult};
#[cfg(feature = "storage_csv")]
use crate::instrument::{MagPhaseTrace, Spectrum};

/// Naming metadata for one saved result.
#[derive(Debug, Clone)]
pub struct SaveTarget<'a> {
    /// Storage profile name, resolved against the configuration.
    pub profile: &'a str,
    /// Root identifier prefixed to the measurement-type directory.
    pub root_id: &'a str,
    /// Measurement-type tag (e.g., "S21", "Spectrum").
    pub measurement_type: &'a str,
    /// Subdirectory below the date directory (e.g., a device name).
    pub subdir: &'a str,
}

/// Filing and serialization of measurement results.
pub struct DataStore {
    settings: StorageSettings,
}

impl DataStore {
    /// Build a store over the storage section of the loaded settings.
    pub fn new(settings: &Settings) -> Self {
        Self {
            settings: settings.storage.clone(),
        }
    }

    /// Resolve the directory a result files under, dated today.
    pub fn resolve_dir(&self, target: &SaveTarget<'_>) -> BenchResult<PathBuf> {
        self.resolve_dir_on(target, chrono::Local::now().date_naive())
    }

    /// Resolve the directory for an explicit date.
    pub fn resolve_dir_on(&self, target: &SaveTarget<'_>, date: NaiveDate) -> BenchResult<PathBuf> {
        let profile = self
            .settings
            .profiles
            .get(target.profile)
            .ok_or_else(|| BenchError::UnknownProfile(target.profile.to_string()))?;

        Ok(profile
            .base_path
            .join(format!("{}{}", target.root_id, target.measurement_type))
            .join(date.format("%m-%d-%Y").to_string())
            .join(target.subdir))
    }

    fn ensure_dir(&self, target: &SaveTarget<'_>) -> BenchResult<PathBuf> {
        let dir = self.resolve_dir(target)?;
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Save named columns of equal length as one CSV file.
    #[cfg(feature = "storage_csv")]
    pub fn save_columns(
        &self,
        target: &SaveTarget<'_>,
        filename: &str,
        headers: &[&str],
        columns: &[&[f64]],
    ) -> BenchResult<PathBuf> {
        if headers.len() != columns.len() {
            return Err(BenchError::InvalidArgument(format!(
                "{} headers for {} columns",
                headers.len(),
                columns.len()
            )));
        }
        let rows = columns.first().map_or(0, |c| c.len());
        if columns.iter().any(|c| c.len() != rows) {
            return Err(BenchError::InvalidArgument(
                "columns must share one length".to_string(),
            ));
        }

        let dir = self.ensure_dir(target)?;
        let path = dir.join(format!("{}.csv", filename));

        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(headers)?;
        for row in 0..rows {
            let record: Vec<String> = columns.iter().map(|c| c[row].to_string()).collect();
            writer.write_record(&record)?;
        }
        writer.flush()?;

        info!("Saved {} rows to {}", rows, path.display());
        Ok(path)
    }

    /// Save a captured spectrum as frequency/amplitude columns.
    #[cfg(feature = "storage_csv")]
    pub fn save_spectrum(
        &self,
        target: &SaveTarget<'_>,
        filename: &str,
        spectrum: &Spectrum,
    ) -> BenchResult<PathBuf> {
        self.save_columns(
            target,
            filename,
            &["frequency_hz", "amplitude_dbm"],
            &[&spectrum.frequency_hz, &spectrum.amplitude_dbm],
        )
    }

    /// Save a magnitude/phase trace against its frequency axis.
    #[cfg(feature = "storage_csv")]
    pub fn save_trace(
        &self,
        target: &SaveTarget<'_>,
        filename: &str,
        frequency_hz: &[f64],
        trace: &MagPhaseTrace,
    ) -> BenchResult<PathBuf> {
        self.save_columns(
            target,
            filename,
            &["frequency_hz", "magnitude_db", "phase_deg"],
            &[frequency_hz, &trace.magnitude_db, &trace.phase_deg],
        )
    }

    /// Append one comment line to the directory's `logfile.txt`.
    pub fn append_log(&self, target: &SaveTarget<'_>, comment: &str) -> BenchResult<()> {
        let dir = self.ensure_dir(target)?;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("logfile.txt"))?;
        writeln!(file, "{}", comment)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageProfile;
    use std::collections::HashMap;

    fn store_with_base(base: &std::path::Path) -> DataStore {
        let mut profiles = HashMap::new();
        profiles.insert(
            "bench".to_string(),
            StorageProfile {
                base_path: base.to_path_buf(),
            },
        );
        DataStore {
            settings: StorageSettings { profiles },
        }
    }

    fn target() -> SaveTarget<'static> {
        SaveTarget {
            profile: "bench",
            root_id: "SNSPD_",
            measurement_type: "Spectrum",
            subdir: "chip42",
        }
    }

    #[test]
    fn test_resolve_dir_layout() {
        let store = store_with_base(std::path::Path::new("/data"));
        let date = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
        let dir = store.resolve_dir_on(&target(), date).unwrap();
        assert_eq!(
            dir,
            PathBuf::from("/data/SNSPD_Spectrum/08-29-2026/chip42")
        );
    }

    #[test]
    fn test_unknown_profile_rejected() {
        let store = store_with_base(std::path::Path::new("/data"));
        let mut bad = target();
        bad.profile = "nobody";
        let err = store.resolve_dir(&bad).unwrap_err();
        assert!(matches!(err, BenchError::UnknownProfile(name) if name == "nobody"));
    }

    #[cfg(feature = "storage_csv")]
    #[test]
    fn test_save_spectrum_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_with_base(tmp.path());
        let spectrum = Spectrum {
            frequency_hz: vec![1e9, 1.5e9, 2e9],
            amplitude_dbm: vec![-30.0, -28.5, -31.0],
        };

        let path = store.save_spectrum(&target(), "sweep_001", &spectrum).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("frequency_hz,amplitude_dbm"));
        assert_eq!(lines.next(), Some("1000000000,-30"));
        assert_eq!(lines.next(), Some("1500000000,-28.5"));
        assert_eq!(lines.next(), Some("2000000000,-31"));
    }

    #[cfg(feature = "storage_csv")]
    #[test]
    fn test_save_columns_length_mismatch_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_with_base(tmp.path());
        let err = store
            .save_columns(&target(), "bad", &["a", "b"], &[&[1.0, 2.0], &[3.0]])
            .unwrap_err();
        assert!(matches!(err, BenchError::InvalidArgument(_)));
    }

    #[test]
    fn test_append_log_accumulates_lines() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_with_base(tmp.path());

        store.append_log(&target(), "cooldown start").unwrap();
        store.append_log(&target(), "bias at 12 uA").unwrap();

        let dir = store.resolve_dir(&target()).unwrap();
        let contents = fs::read_to_string(dir.join("logfile.txt")).unwrap();
        assert_eq!(contents, "cooldown start\nbias at 12 uA\n");
    }
}
