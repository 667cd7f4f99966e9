//! # Arc-Flash Regression Formulas
//!
//! Closed-form log-linear equations for a single (bolted current, duration)
//! point in the fixed electrode/box arrangement.
//!
//! ## Notation
//!
//! - `Ibf` = Bolted fault current (kA)
//! - `Iarc` = Arcing current (kA)
//! - `G` = Electrode gap (mm)
//! - `t` = Arc duration (s)
//! - `D` = Working distance (mm)
//! - `Cf` = Configuration factor
//! - `E` = Incident energy
//! - `AFB` = Arc-flash protection boundary (mm)
//!
//! All logarithms are base 10. Arguments must be strictly positive; these
//! functions do not check, callers validate first (see
//! [`crate::config::StudyInput::validate`]).

use crate::config::{ArcCurrentCoefficients, IncidentEnergyCoefficients};
use crate::units::JOULES_PER_CALORIE;

/// Arcing current from bolted fault current.
///
/// # Formula
/// ```text
/// log10(Iarc) = k1 + k2·log10(Ibf) + k3·log10(G)
/// ```
#[inline]
pub fn arcing_current_ka(ibf_ka: f64, gap_mm: f64, coeffs: &ArcCurrentCoefficients) -> f64 {
    let log_iarc = coeffs.k1 + coeffs.k2 * ibf_ka.log10() + coeffs.k3 * gap_mm.log10();
    10f64.powf(log_iarc)
}

/// Incident energy at the working distance (J/cm²).
///
/// # Formula
/// ```text
/// log10(E) = K + nI·log10(Iarc) + nT·log10(t) + nD·log10(D) + log10(Cf)
/// ```
#[inline]
pub fn incident_energy_j_cm2(
    iarc_ka: f64,
    duration_s: f64,
    working_distance_mm: f64,
    config_factor: f64,
    coeffs: &IncidentEnergyCoefficients,
) -> f64 {
    let log_e = coeffs.offset
        + coeffs.n_current * iarc_ka.log10()
        + coeffs.n_time * duration_s.log10()
        + coeffs.n_distance * working_distance_mm.log10()
        + config_factor.log10();
    10f64.powf(log_e)
}

/// Convert J/cm² to cal/cm²
#[inline]
pub fn joules_to_calories(e_j_cm2: f64) -> f64 {
    e_j_cm2 / JOULES_PER_CALORIE
}

/// Distance at which incident energy falls to the threshold.
///
/// # Formula
/// ```text
/// AFB = D·sqrt(E / E_limit)
/// ```
///
/// Assumes inverse-square falloff from the working distance. When
/// `E == E_limit` the boundary is exactly `D`.
#[inline]
pub fn protection_boundary_mm(e_cal_cm2: f64, working_distance_mm: f64, threshold_cal_cm2: f64) -> f64 {
    working_distance_mm * (e_cal_cm2 / threshold_cal_cm2).sqrt()
}
