//! # Study Files
//!
//! A [`StudyFile`] wraps a [`StudyInput`] with metadata so a sweep can be
//! re-run later. Study files (`.afs`) hold inputs only; grids are always
//! recomputed.
//!
//! ```text
//! StudyFile
//! ├── meta: StudyMetadata (schema version, timestamps)
//! └── study: StudyInput (sweeps, electrode, coefficients, threshold)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use arc_core::study::StudyFile;
//! use arc_core::config::StudyInput;
//!
//! let file = StudyFile::new(StudyInput::default());
//! let json = serde_json::to_string_pretty(&file).unwrap();
//! assert!(json.contains("\"version\""));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::StudyInput;

/// Current schema version for .afs files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// File extension for study files
pub const STUDY_EXTENSION: &str = "afs";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyMetadata {
    /// Schema version (semver)
    pub version: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

/// Root container serialized to `.afs` files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyFile {
    pub meta: StudyMetadata,
    pub study: StudyInput,
}

impl StudyFile {
    pub fn new(study: StudyInput) -> Self {
        let now = Utc::now();
        StudyFile {
            meta: StudyMetadata {
                version: SCHEMA_VERSION.to_string(),
                created: now,
                modified: now,
            },
            study,
        }
    }
}

impl Default for StudyFile {
    fn default() -> Self {
        StudyFile::new(StudyInput::default())
    }
}
