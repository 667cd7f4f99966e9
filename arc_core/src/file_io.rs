//! # File I/O Module
//!
//! Reads and writes `.afs` study files:
//! - **Atomic saves**: Write to .tmp, verify, rename to prevent corruption
//! - **Version validation**: Ensure schema compatibility
//! - **Input validation**: A loaded study is checked before it is returned
//!
//! ## Example
//!
//! ```rust,no_run
//! use arc_core::file_io::{load_study, save_study};
//! use arc_core::study::StudyFile;
//! use std::path::Path;
//!
//! let path = Path::new("reference.afs");
//! save_study(&StudyFile::default(), path)?;
//!
//! let file = load_study(path)?;
//! println!("{} x {}", file.study.currents_ka.count, file.study.durations_s.count);
//! # Ok::<(), arc_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use crate::errors::{CalcError, CalcResult};
use crate::study::{StudyFile, SCHEMA_VERSION, STUDY_EXTENSION};

/// Save a study file with atomic write semantics.
///
/// The save process:
/// 1. Serialize to JSON
/// 2. Verify the JSON parses back to the same study
/// 3. Write to a temporary file (.tmp) and sync to disk
/// 4. Rename .tmp over the target (atomic on most filesystems)
pub fn save_study(file: &StudyFile, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(file)?;

    let reparsed: StudyFile = serde_json::from_str(&json)?;
    if &reparsed != file {
        return Err(CalcError::serialization(
            "Study did not survive a JSON round trip",
        ));
    }

    let tmp_path = path.with_extension(format!("{STUDY_EXTENSION}.tmp"));

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    info!(path = %path.display(), "saved study file");
    Ok(())
}

/// Load and validate a study file.
///
/// # Returns
///
/// * `Ok(StudyFile)` - Parsed, version-compatible, valid study
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::InvalidInput)` - Study parameters out of domain
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_study(path: &Path) -> CalcResult<StudyFile> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let file: StudyFile = serde_json::from_str(&contents).map_err(|e| {
        CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e))
    })?;

    validate_version(&file.meta.version)?;
    file.study.validate()?;

    debug!(path = %path.display(), label = %file.study.label, "loaded study file");
    Ok(file)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // For 0.x versions a newer minor may carry breaking changes
    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StudyInput;
    use crate::sweep::LinearSweep;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roundtrip.afs");

        let mut study = StudyInput::default();
        study.label = "Bucket 3".to_string();
        study.electrode.gap_mm = 32.0;
        let file = StudyFile::new(study);
        save_study(&file, &path).unwrap();

        let loaded = load_study(&path).unwrap();
        assert_eq!(loaded, file);
    }

    #[test]
    fn test_save_irregular_floats() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("irregular.afs");

        for gap in [90.97941207808167, 44.430133835633676, 0.1 + 0.2] {
            let mut study = StudyInput::default();
            study.electrode.gap_mm = gap;
            study.durations_s = LinearSweep::new(0.013333333333333334, 1.9876543210987654, 17);
            let file = StudyFile::new(study);
            save_study(&file, &path).unwrap();

            let loaded = load_study(&path).unwrap();
            assert_eq!(loaded.study.electrode.gap_mm.to_bits(), gap.to_bits());
            assert_eq!(loaded, file);
        }
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("atomic.afs");

        save_study(&StudyFile::default(), &path).unwrap();

        assert!(!path.with_extension(format!("{STUDY_EXTENSION}.tmp")).exists());
        assert!(path.exists());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_study(&dir.path().join("nope.afs")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.afs");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_study(&path).unwrap_err().error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_load_rejects_invalid_study() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.afs");

        let mut study = StudyInput::default();
        study.durations_s = LinearSweep::new(-0.1, 1.0, 10);
        save_study(&StudyFile::new(study), &path).unwrap();

        assert_eq!(load_study(&path).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_load_rejects_future_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("future.afs");

        let mut file = StudyFile::default();
        file.meta.version = "1.0.0".to_string();
        save_study(&file, &path).unwrap();

        assert_eq!(load_study(&path).unwrap_err().error_code(), "VERSION_MISMATCH");
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}
