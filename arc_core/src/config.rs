//! # Study Configuration
//!
//! Everything the grid evaluator reads is carried in one immutable
//! [`StudyInput`]: the two sweeps, the electrode arrangement, the regression
//! coefficients and the hazard threshold. Nothing is global, so several
//! configurations can be evaluated side by side.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "label": "Reference box",
//!   "currents_ka": { "start": 1.0, "stop": 50.0, "count": 80 },
//!   "durations_s": { "start": 0.01, "stop": 2.0, "count": 60 },
//!   "electrode": { "gap_mm": 25.0, "working_distance_mm": 300.0, "config_factor": 1.0 },
//!   "coefficients": {
//!     "arc_current": { "k1": -0.153, "k2": 0.983, "k3": 0.004 },
//!     "incident_energy": { "offset": -0.792, "n_current": 1.081, "n_time": 1.0, "n_distance": -1.473 }
//!   },
//!   "threshold_cal_cm2": 1.2
//! }
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::sweep::LinearSweep;

/// Onset of a second-degree burn on bare skin (cal/cm²)
pub const SECOND_DEGREE_BURN_CAL_CM2: f64 = 1.2;

/// Electrode arrangement for the fixed box configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElectrodeConfig {
    /// Gap between conductors (mm)
    pub gap_mm: f64,
    /// Distance from the arc to the worker's face/chest (mm)
    pub working_distance_mm: f64,
    /// Configuration factor Cf (dimensionless)
    pub config_factor: f64,
}

impl Default for ElectrodeConfig {
    fn default() -> Self {
        ElectrodeConfig {
            gap_mm: 25.0,
            working_distance_mm: 300.0,
            config_factor: 1.0,
        }
    }
}

impl ElectrodeConfig {
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("electrode.gap_mm", self.gap_mm, "Electrode gap must be positive")?;
        require_positive(
            "electrode.working_distance_mm",
            self.working_distance_mm,
            "Working distance must be positive",
        )?;
        require_positive(
            "electrode.config_factor",
            self.config_factor,
            "Configuration factor must be positive",
        )
    }
}

/// Arcing current regression: `log10(Iarc) = k1 + k2*log10(Ibf) + k3*log10(G)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcCurrentCoefficients {
    pub k1: f64,
    pub k2: f64,
    pub k3: f64,
}

impl Default for ArcCurrentCoefficients {
    fn default() -> Self {
        ArcCurrentCoefficients {
            k1: -0.153,
            k2: 0.983,
            k3: 0.004,
        }
    }
}

/// Incident energy regression:
/// `log10(E) = K + nI*log10(Iarc) + nT*log10(t) + nD*log10(D) + log10(Cf)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncidentEnergyCoefficients {
    /// Offset K
    pub offset: f64,
    /// Arcing current exponent nI
    pub n_current: f64,
    /// Duration exponent nT
    pub n_time: f64,
    /// Working distance exponent nD
    pub n_distance: f64,
}

impl Default for IncidentEnergyCoefficients {
    fn default() -> Self {
        IncidentEnergyCoefficients {
            offset: -0.792,
            n_current: 1.081,
            n_time: 1.0,
            n_distance: -1.473,
        }
    }
}

/// Both regression coefficient sets
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelCoefficients {
    pub arc_current: ArcCurrentCoefficients,
    pub incident_energy: IncidentEnergyCoefficients,
}

impl ModelCoefficients {
    pub fn validate(&self) -> CalcResult<()> {
        let values = [
            ("coefficients.arc_current.k1", self.arc_current.k1),
            ("coefficients.arc_current.k2", self.arc_current.k2),
            ("coefficients.arc_current.k3", self.arc_current.k3),
            ("coefficients.incident_energy.offset", self.incident_energy.offset),
            ("coefficients.incident_energy.n_current", self.incident_energy.n_current),
            ("coefficients.incident_energy.n_time", self.incident_energy.n_time),
            ("coefficients.incident_energy.n_distance", self.incident_energy.n_distance),
        ];
        for (field, value) in values {
            if !value.is_finite() {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Coefficient must be finite",
                ));
            }
        }
        Ok(())
    }
}

/// Complete input for a hazard grid run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyInput {
    /// User label (e.g., "MCC-2 bucket")
    #[serde(default)]
    pub label: String,

    /// Bolted fault current sweep (kA); becomes the grid rows
    pub currents_ka: LinearSweep,

    /// Arc duration sweep (s); becomes the grid columns
    pub durations_s: LinearSweep,

    #[serde(default)]
    pub electrode: ElectrodeConfig,

    #[serde(default)]
    pub coefficients: ModelCoefficients,

    /// Incident energy at the protection boundary (cal/cm²)
    #[serde(default = "default_threshold")]
    pub threshold_cal_cm2: f64,
}

fn default_threshold() -> f64 {
    SECOND_DEGREE_BURN_CAL_CM2
}

impl Default for StudyInput {
    /// Reference study: 1-50 kA x 80 points, 0.01-2.0 s x 60 points.
    fn default() -> Self {
        StudyInput {
            label: "Reference study".to_string(),
            currents_ka: LinearSweep::new(1.0, 50.0, 80),
            durations_s: LinearSweep::new(0.01, 2.0, 60),
            electrode: ElectrodeConfig::default(),
            coefficients: ModelCoefficients::default(),
            threshold_cal_cm2: SECOND_DEGREE_BURN_CAL_CM2,
        }
    }
}

impl StudyInput {
    /// Validate every parameter before evaluation begins.
    pub fn validate(&self) -> CalcResult<()> {
        debug!(label = %self.label, "validating study input");
        self.currents_ka.validate("currents_ka")?;
        self.durations_s.validate("durations_s")?;
        self.electrode.validate()?;
        self.coefficients.validate()?;
        require_positive(
            "threshold_cal_cm2",
            self.threshold_cal_cm2,
            "Hazard threshold must be positive",
        )
    }

    /// Grid shape as (rows = currents, columns = durations)
    pub fn shape(&self) -> (usize, usize) {
        (self.currents_ka.count, self.durations_s.count)
    }
}

pub(crate) fn require_positive(field: &str, value: f64, reason: &str) -> CalcResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), reason))
    }
}
