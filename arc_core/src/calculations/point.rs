//! # Single-Point Hazard Calculation
//!
//! Evaluates one (bolted current, duration) pair and classifies the result,
//! the way a single bus would be labeled in a field study. The grid evaluator
//! runs the same cell routine for every point of its sweep.
//!
//! ## Example
//!
//! ```rust
//! use arc_core::calculations::point::{calculate, PointInput};
//! use arc_core::config::StudyInput;
//!
//! let input = PointInput::from_study(&StudyInput::default(), 10.0, 0.1);
//! let result = calculate(&input).unwrap();
//!
//! assert!((result.arcing_current_ka - 6.85).abs() < 0.01);
//! assert!(result.incident_energy_cal_cm2 > 0.0);
//! println!("PPE: {}", result.ppe_category);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{
    require_positive, ElectrodeConfig, ModelCoefficients, StudyInput, SECOND_DEGREE_BURN_CAL_CM2,
};
use crate::equations::arc_flash::{
    arcing_current_ka, incident_energy_j_cm2, joules_to_calories, protection_boundary_mm,
};
use crate::errors::{CalcError, CalcResult};
use crate::ppe::PpeCategory;
use crate::units::{Inches, Millimeters};

/// Input for a single hazard point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointInput {
    /// User label (e.g., "SWGR-1 main bus")
    #[serde(default)]
    pub label: String,

    /// Bolted fault current (kA)
    pub current_ka: f64,

    /// Arc duration / clearing time (s)
    pub duration_s: f64,

    #[serde(default)]
    pub electrode: ElectrodeConfig,

    #[serde(default)]
    pub coefficients: ModelCoefficients,

    #[serde(default = "default_threshold")]
    pub threshold_cal_cm2: f64,
}

fn default_threshold() -> f64 {
    SECOND_DEGREE_BURN_CAL_CM2
}

impl PointInput {
    /// Point using a study's electrode, coefficients and threshold.
    pub fn from_study(study: &StudyInput, current_ka: f64, duration_s: f64) -> Self {
        PointInput {
            label: study.label.clone(),
            current_ka,
            duration_s,
            electrode: study.electrode,
            coefficients: study.coefficients,
            threshold_cal_cm2: study.threshold_cal_cm2,
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        require_positive("current_ka", self.current_ka, "Bolted fault current must be positive")?;
        require_positive("duration_s", self.duration_s, "Arc duration must be positive")?;
        self.electrode.validate()?;
        self.coefficients.validate()?;
        require_positive(
            "threshold_cal_cm2",
            self.threshold_cal_cm2,
            "Hazard threshold must be positive",
        )
    }
}

/// Results for a single hazard point.
///
/// ## JSON Example
///
/// ```json
/// {
///   "bolted_current_ka": 10.0,
///   "duration_s": 0.1,
///   "arcing_current_ka": 6.848,
///   "incident_energy_j_cm2": 2.9e-5,
///   "incident_energy_cal_cm2": 6.93e-6,
///   "boundary_mm": 0.72,
///   "boundary_in": 0.028,
///   "ppe_category": "BelowThreshold"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointResult {
    pub bolted_current_ka: f64,
    pub duration_s: f64,
    pub arcing_current_ka: f64,
    pub incident_energy_j_cm2: f64,
    pub incident_energy_cal_cm2: f64,
    /// Arc-flash protection boundary (mm)
    pub boundary_mm: f64,
    /// Same boundary in inches, for US labels
    pub boundary_in: f64,
    pub ppe_category: PpeCategory,
}

impl PointResult {
    /// True when the working distance lies outside the protection boundary.
    pub fn working_distance_is_safe(&self, working_distance_mm: f64) -> bool {
        self.boundary_mm <= working_distance_mm
    }
}

/// Calculate a single hazard point.
pub fn calculate(input: &PointInput) -> CalcResult<PointResult> {
    input.validate()?;

    let cell = evaluate_cell(
        input.current_ka,
        input.duration_s,
        &input.electrode,
        &input.coefficients,
        input.threshold_cal_cm2,
        (0, 0),
    )?;

    debug!(
        current_ka = input.current_ka,
        duration_s = input.duration_s,
        energy_cal_cm2 = cell.energy_cal_cm2,
        "evaluated hazard point"
    );

    Ok(PointResult {
        bolted_current_ka: input.current_ka,
        duration_s: input.duration_s,
        arcing_current_ka: cell.arcing_current_ka,
        incident_energy_j_cm2: cell.energy_j_cm2,
        incident_energy_cal_cm2: cell.energy_cal_cm2,
        boundary_mm: cell.boundary_mm,
        boundary_in: Inches::from(Millimeters(cell.boundary_mm)).0,
        ppe_category: PpeCategory::classify(cell.energy_cal_cm2),
    })
}

/// Every quantity computed for one grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CellValues {
    pub arcing_current_ka: f64,
    pub energy_j_cm2: f64,
    pub energy_cal_cm2: f64,
    pub boundary_mm: f64,
}

/// Run the three-step model for one cell, checking each intermediate.
///
/// `cell` is the (row, col) reported if a quantity leaves the log domain.
pub(crate) fn evaluate_cell(
    current_ka: f64,
    duration_s: f64,
    electrode: &ElectrodeConfig,
    coefficients: &ModelCoefficients,
    threshold_cal_cm2: f64,
    cell: (usize, usize),
) -> CalcResult<CellValues> {
    let iarc = check_positive(
        "arcing current",
        arcing_current_ka(current_ka, electrode.gap_mm, &coefficients.arc_current),
        cell,
    )?;

    let energy_j = check_positive(
        "incident energy",
        incident_energy_j_cm2(
            iarc,
            duration_s,
            electrode.working_distance_mm,
            electrode.config_factor,
            &coefficients.incident_energy,
        ),
        cell,
    )?;
    let energy_cal = joules_to_calories(energy_j);

    let boundary = check_positive(
        "protection boundary",
        protection_boundary_mm(energy_cal, electrode.working_distance_mm, threshold_cal_cm2),
        cell,
    )?;

    Ok(CellValues {
        arcing_current_ka: iarc,
        energy_j_cm2: energy_j,
        energy_cal_cm2: energy_cal,
        boundary_mm: boundary,
    })
}

fn check_positive(quantity: &str, value: f64, (row, col): (usize, usize)) -> CalcResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CalcError::domain_error(quantity, row, col, value))
    }
}
