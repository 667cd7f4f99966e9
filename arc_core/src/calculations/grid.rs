//! # Hazard Grid Evaluation
//!
//! Sweeps bolted fault current (rows) against arc duration (columns) and
//! evaluates incident energy and protection boundary for every pair.
//!
//! Cells are independent, so evaluation is a map over the Cartesian product
//! of the two sweeps. With the `parallel` feature the map runs on rayon's
//! pool; the grids are bit-identical either way.
//!
//! ## Example
//!
//! ```rust
//! use arc_core::calculations::grid::calculate;
//! use arc_core::config::StudyInput;
//!
//! let grid = calculate(&StudyInput::default()).unwrap();
//! assert_eq!(grid.shape(), (80, 60));
//!
//! // Energy vs current at the duration closest to 0.5 s
//! let slice = grid.slice_at_duration(0.5).unwrap();
//! assert_eq!(slice.axis_values.len(), 80);
//! ```

use std::collections::BTreeMap;

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::calculations::point::{evaluate_cell, CellValues};
use crate::config::StudyInput;
use crate::errors::CalcResult;
use crate::ppe::PpeCategory;
use crate::sweep::nearest_index;

/// Fully populated energy and boundary grids with their axes.
///
/// Row `i` corresponds to `currents_ka[i]`, column `j` to `durations_s[j]`.
/// Built by [`calculate`] and read-only afterward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HazardGrid {
    label: String,
    currents_ka: Vec<f64>,
    durations_s: Vec<f64>,
    /// Arcing current per row (depends on current only)
    arcing_currents_ka: Vec<f64>,
    working_distance_mm: f64,
    threshold_cal_cm2: f64,
    energy_cal_cm2: Array2<f64>,
    boundary_mm: Array2<f64>,
}

/// Which axis a [`GridSlice`] runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SliceAxis {
    /// Varies over fault current at a fixed duration
    Current,
    /// Varies over duration at a fixed fault current
    Duration,
}

/// One line series cut from the grids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSlice {
    pub axis: SliceAxis,
    /// Sampled value actually used for the fixed axis (nearest to the request)
    pub fixed_value: f64,
    /// Index of `fixed_value` in its sweep
    pub fixed_index: usize,
    /// Values of the varying axis (kA or s)
    pub axis_values: Vec<f64>,
    pub energy_cal_cm2: Vec<f64>,
    pub boundary_mm: Vec<f64>,
}

/// Location and value of the most severe cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeakCell {
    pub row: usize,
    pub col: usize,
    pub current_ka: f64,
    pub duration_s: f64,
    pub energy_cal_cm2: f64,
    pub boundary_mm: f64,
}

impl HazardGrid {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn currents_ka(&self) -> &[f64] {
        &self.currents_ka
    }

    pub fn durations_s(&self) -> &[f64] {
        &self.durations_s
    }

    pub fn arcing_currents_ka(&self) -> &[f64] {
        &self.arcing_currents_ka
    }

    pub fn working_distance_mm(&self) -> f64 {
        self.working_distance_mm
    }

    pub fn threshold_cal_cm2(&self) -> f64 {
        self.threshold_cal_cm2
    }

    /// Incident energy (cal/cm²), indexed `[[current, duration]]`
    pub fn energy_cal_cm2(&self) -> &Array2<f64> {
        &self.energy_cal_cm2
    }

    /// Protection boundary (mm), indexed `[[current, duration]]`
    pub fn boundary_mm(&self) -> &Array2<f64> {
        &self.boundary_mm
    }

    /// (rows, columns) = (currents, durations)
    pub fn shape(&self) -> (usize, usize) {
        self.energy_cal_cm2.dim()
    }

    pub fn nearest_current_index(&self, current_ka: f64) -> Option<usize> {
        nearest_index(&self.currents_ka, current_ka)
    }

    pub fn nearest_duration_index(&self, duration_s: f64) -> Option<usize> {
        nearest_index(&self.durations_s, duration_s)
    }

    /// Energy and boundary as functions of current, at the sampled duration
    /// nearest `duration_s`.
    pub fn slice_at_duration(&self, duration_s: f64) -> Option<GridSlice> {
        let j = self.nearest_duration_index(duration_s)?;
        Some(GridSlice {
            axis: SliceAxis::Current,
            fixed_value: self.durations_s[j],
            fixed_index: j,
            axis_values: self.currents_ka.clone(),
            energy_cal_cm2: self.energy_cal_cm2.column(j).to_vec(),
            boundary_mm: self.boundary_mm.column(j).to_vec(),
        })
    }

    /// Energy and boundary as functions of duration, at the sampled current
    /// nearest `current_ka`.
    pub fn slice_at_current(&self, current_ka: f64) -> Option<GridSlice> {
        let i = self.nearest_current_index(current_ka)?;
        Some(GridSlice {
            axis: SliceAxis::Duration,
            fixed_value: self.currents_ka[i],
            fixed_index: i,
            axis_values: self.durations_s.clone(),
            energy_cal_cm2: self.energy_cal_cm2.row(i).to_vec(),
            boundary_mm: self.boundary_mm.row(i).to_vec(),
        })
    }

    /// The cell with the highest incident energy.
    pub fn peak(&self) -> Option<PeakCell> {
        let mut peak: Option<PeakCell> = None;
        for ((row, col), &energy) in self.energy_cal_cm2.indexed_iter() {
            if peak.map_or(true, |p| energy > p.energy_cal_cm2) {
                peak = Some(PeakCell {
                    row,
                    col,
                    current_ka: self.currents_ka[row],
                    duration_s: self.durations_s[col],
                    energy_cal_cm2: energy,
                    boundary_mm: self.boundary_mm[[row, col]],
                });
            }
        }
        peak
    }

    /// Number of cells falling in each PPE category (absent = zero).
    pub fn category_counts(&self) -> BTreeMap<PpeCategory, usize> {
        let mut counts = BTreeMap::new();
        for &energy in self.energy_cal_cm2.iter() {
            *counts.entry(PpeCategory::classify(energy)).or_insert(0) += 1;
        }
        counts
    }
}

/// Evaluate the full hazard grid for a study.
///
/// The study is validated first; an intermediate leaving the log domain
/// during evaluation fails the whole run.
#[instrument(skip(study), fields(label = %study.label))]
pub fn calculate(study: &StudyInput) -> CalcResult<HazardGrid> {
    study.validate()?;

    let currents = study.currents_ka.values();
    let durations = study.durations_s.values();
    let (rows, cols) = (currents.len(), durations.len());
    info!(rows, cols, "evaluating hazard grid");

    let cells = evaluate_cells(study, &currents, &durations)?;

    let energy = Array2::from_shape_fn((rows, cols), |(i, j)| cells[i * cols + j].energy_cal_cm2);
    let boundary = Array2::from_shape_fn((rows, cols), |(i, j)| cells[i * cols + j].boundary_mm);
    let arcing = (0..rows).map(|i| cells[i * cols].arcing_current_ka).collect();

    let grid = HazardGrid {
        label: study.label.clone(),
        currents_ka: currents,
        durations_s: durations,
        arcing_currents_ka: arcing,
        working_distance_mm: study.electrode.working_distance_mm,
        threshold_cal_cm2: study.threshold_cal_cm2,
        energy_cal_cm2: energy,
        boundary_mm: boundary,
    };

    if let Some(peak) = grid.peak() {
        info!(
            peak_energy_cal_cm2 = peak.energy_cal_cm2,
            peak_boundary_mm = peak.boundary_mm,
            "hazard grid complete"
        );
    }
    Ok(grid)
}

/// Row-major cell values over the Cartesian product of the sweeps.
#[cfg(not(feature = "parallel"))]
fn evaluate_cells(study: &StudyInput, currents: &[f64], durations: &[f64]) -> CalcResult<Vec<CellValues>> {
    let cols = durations.len();
    (0..currents.len() * cols)
        .map(|k| cell_at(study, currents, durations, k))
        .collect()
}

/// Row-major cell values over the Cartesian product of the sweeps.
#[cfg(feature = "parallel")]
fn evaluate_cells(study: &StudyInput, currents: &[f64], durations: &[f64]) -> CalcResult<Vec<CellValues>> {
    use rayon::prelude::*;

    let cols = durations.len();
    (0..currents.len() * cols)
        .into_par_iter()
        .map(|k| cell_at(study, currents, durations, k))
        .collect()
}

fn cell_at(study: &StudyInput, currents: &[f64], durations: &[f64], k: usize) -> CalcResult<CellValues> {
    let cols = durations.len();
    let (i, j) = (k / cols, k % cols);
    evaluate_cell(
        currents[i],
        durations[j],
        &study.electrode,
        &study.coefficients,
        study.threshold_cal_cm2,
        (i, j),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::point::{self, PointInput};
    use crate::errors::CalcError;
    use crate::sweep::LinearSweep;
    use approx::assert_relative_eq;

    fn small_study() -> StudyInput {
        StudyInput {
            label: "small".to_string(),
            currents_ka: LinearSweep::new(5.0, 40.0, 8),
            durations_s: LinearSweep::new(0.05, 1.0, 6),
            ..StudyInput::default()
        }
    }

    #[test]
    fn test_grid_shape() {
        let grid = calculate(&StudyInput::default()).unwrap();
        assert_eq!(grid.shape(), (80, 60));
        assert_eq!(grid.boundary_mm().dim(), (80, 60));
        assert_eq!(grid.currents_ka().len(), 80);
        assert_eq!(grid.durations_s().len(), 60);
        assert_eq!(grid.arcing_currents_ka().len(), 80);
    }

    #[test]
    fn test_all_cells_positive() {
        let grid = calculate(&StudyInput::default()).unwrap();
        assert!(grid.energy_cal_cm2().iter().all(|&e| e.is_finite() && e > 0.0));
        assert!(grid.boundary_mm().iter().all(|&b| b.is_finite() && b > 0.0));
    }

    #[test]
    fn test_energy_monotonic_in_current_and_duration() {
        let grid = calculate(&small_study()).unwrap();
        let energy = grid.energy_cal_cm2();
        for col in energy.columns() {
            assert!(col.to_vec().windows(2).all(|w| w[1] >= w[0]));
        }
        for row in energy.rows() {
            assert!(row.to_vec().windows(2).all(|w| w[1] >= w[0]));
        }
    }

    #[test]
    fn test_boundary_identity() {
        let grid = calculate(&small_study()).unwrap();
        for ((i, j), &b) in grid.boundary_mm().indexed_iter() {
            let e = grid.energy_cal_cm2()[[i, j]];
            assert_relative_eq!(b, 300.0 * (e / 1.2).sqrt(), max_relative = 1e-12);
        }
    }

    #[test]
    fn test_cell_matches_point_calculation() {
        let study = small_study();
        let grid = calculate(&study).unwrap();
        let (i, j) = (3, 4);
        let input = PointInput::from_study(&study, grid.currents_ka()[i], grid.durations_s()[j]);
        let result = point::calculate(&input).unwrap();
        assert_eq!(grid.energy_cal_cm2()[[i, j]], result.incident_energy_cal_cm2);
        assert_eq!(grid.boundary_mm()[[i, j]], result.boundary_mm);
        assert_eq!(grid.arcing_currents_ka()[i], result.arcing_current_ka);
    }

    #[test]
    fn test_reproducible() {
        let a = calculate(&small_study()).unwrap();
        let b = calculate(&small_study()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_slice_at_duration() {
        let grid = calculate(&small_study()).unwrap();
        // durations: 0.05, 0.24, 0.43, 0.62, 0.81, 1.0
        let slice = grid.slice_at_duration(0.45).unwrap();
        assert_eq!(slice.axis, SliceAxis::Current);
        assert_eq!(slice.fixed_index, 2);
        assert_relative_eq!(slice.fixed_value, 0.43, epsilon = 1e-12);
        assert_eq!(slice.axis_values, grid.currents_ka());
        assert_eq!(slice.energy_cal_cm2.len(), 8);
        assert_eq!(slice.energy_cal_cm2[5], grid.energy_cal_cm2()[[5, 2]]);
    }

    #[test]
    fn test_slice_at_current() {
        let grid = calculate(&small_study()).unwrap();
        // currents: 5, 10, 15, ..., 40
        let slice = grid.slice_at_current(26.0).unwrap();
        assert_eq!(slice.axis, SliceAxis::Duration);
        assert_eq!(slice.fixed_index, 4);
        assert_eq!(slice.fixed_value, 25.0);
        assert_eq!(slice.boundary_mm, grid.boundary_mm().row(4).to_vec());
        assert!(grid.slice_at_current(f64::NAN).is_none());
    }

    #[test]
    fn test_peak_is_last_cell() {
        let grid = calculate(&small_study()).unwrap();
        let peak = grid.peak().unwrap();
        assert_eq!((peak.row, peak.col), (7, 5));
        assert_eq!(peak.current_ka, 40.0);
        assert_eq!(peak.duration_s, 1.0);
    }

    #[test]
    fn test_category_counts_cover_grid() {
        let grid = calculate(&small_study()).unwrap();
        let counts = grid.category_counts();
        assert_eq!(counts.values().sum::<usize>(), 48);
        assert_eq!(counts.get(&PpeCategory::BelowThreshold), Some(&48));
    }

    // Runs against the rayon path under `--features parallel`
    #[test]
    fn test_cells_match_nested_loop() {
        let study = StudyInput {
            currents_ka: LinearSweep::new(1.0, 63.0, 37),
            durations_s: LinearSweep::new(0.01, 2.0, 29),
            ..StudyInput::default()
        };
        let currents = study.currents_ka.values();
        let durations = study.durations_s.values();

        let mut expected = Vec::with_capacity(currents.len() * durations.len());
        for (i, &current) in currents.iter().enumerate() {
            for (j, &duration) in durations.iter().enumerate() {
                expected.push(
                    evaluate_cell(
                        current,
                        duration,
                        &study.electrode,
                        &study.coefficients,
                        study.threshold_cal_cm2,
                        (i, j),
                    )
                    .unwrap(),
                );
            }
        }

        let cells = evaluate_cells(&study, &currents, &durations).unwrap();
        assert_eq!(cells.len(), expected.len());
        for (got, want) in cells.iter().zip(&expected) {
            assert_eq!(got.energy_cal_cm2.to_bits(), want.energy_cal_cm2.to_bits());
            assert_eq!(got.boundary_mm.to_bits(), want.boundary_mm.to_bits());
            assert_eq!(got.arcing_current_ka.to_bits(), want.arcing_current_ka.to_bits());
        }

        let grid = calculate(&study).unwrap();
        for ((i, j), &e) in grid.energy_cal_cm2().indexed_iter() {
            assert_eq!(e.to_bits(), expected[i * durations.len() + j].energy_cal_cm2.to_bits());
        }
    }

    #[test]
    fn test_invalid_study_rejected_before_evaluation() {
        let mut study = small_study();
        study.currents_ka.count = 1;
        let err = calculate(&study).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_overflow_fails_whole_run() {
        let mut study = small_study();
        study.coefficients.incident_energy.offset = 400.0;
        match calculate(&study).unwrap_err() {
            CalcError::DomainError { quantity, .. } => assert_eq!(quantity, "incident energy"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
