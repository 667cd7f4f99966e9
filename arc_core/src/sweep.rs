//! # Parameter Sweeps
//!
//! A [`LinearSweep`] describes one axis of the hazard grid: `count` uniformly
//! spaced samples over the closed interval `[start, stop]`, endpoints
//! included. Both axes of the grid (bolted fault current and arc duration)
//! feed logarithms, so every sample must be strictly positive.
//!
//! ```rust
//! use arc_core::sweep::LinearSweep;
//!
//! let sweep = LinearSweep::new(1.0, 3.0, 5);
//! assert_eq!(sweep.values(), vec![1.0, 1.5, 2.0, 2.5, 3.0]);
//! ```

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Uniformly spaced samples over `[start, stop]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearSweep {
    /// First sample (inclusive)
    pub start: f64,
    /// Last sample (inclusive)
    pub stop: f64,
    /// Number of samples, at least 2
    pub count: usize,
}

impl LinearSweep {
    pub fn new(start: f64, stop: f64, count: usize) -> Self {
        LinearSweep { start, stop, count }
    }

    /// Validate the sweep, using `field` to name it in errors.
    ///
    /// Requires finite bounds, `0 < start < stop`, `count >= 2`, and samples
    /// that strictly increase once rounded to f64.
    pub fn validate(&self, field: &str) -> CalcResult<()> {
        if !self.start.is_finite() || !self.stop.is_finite() {
            return Err(CalcError::invalid_input(
                field,
                format!("[{}, {}]", self.start, self.stop),
                "Sweep bounds must be finite",
            ));
        }
        if self.start <= 0.0 {
            return Err(CalcError::invalid_input(
                format!("{field}.start"),
                self.start.to_string(),
                "Sweep start must be positive (model takes its logarithm)",
            ));
        }
        if self.stop <= self.start {
            return Err(CalcError::invalid_input(
                format!("{field}.stop"),
                self.stop.to_string(),
                "Sweep stop must be greater than start",
            ));
        }
        if self.count < 2 {
            return Err(CalcError::invalid_input(
                format!("{field}.count"),
                self.count.to_string(),
                "Sweep needs at least 2 points",
            ));
        }
        if let Some(k) = self.values().windows(2).position(|w| w[1] <= w[0]) {
            return Err(CalcError::invalid_input(
                format!("{field}.count"),
                self.count.to_string(),
                format!("Samples {} and {} are not increasing; range is too narrow for this many points", k, k + 1),
            ));
        }
        Ok(())
    }

    /// Spacing between consecutive samples
    pub fn step(&self) -> f64 {
        if self.count > 1 {
            (self.stop - self.start) / (self.count - 1) as f64
        } else {
            0.0
        }
    }

    /// Generate the samples.
    ///
    /// The final sample is pinned to `stop` so the closed interval is honored
    /// exactly regardless of accumulated rounding.
    pub fn values(&self) -> Vec<f64> {
        let mut values = Array1::linspace(self.start, self.stop, self.count).to_vec();
        if let Some(last) = values.last_mut() {
            *last = self.stop;
        }
        values
    }
}

/// Index of the sample closest to `target`.
///
/// Ties resolve to the lower index. Returns `None` for an empty slice or a
/// NaN target.
pub fn nearest_index(values: &[f64], target: f64) -> Option<usize> {
    if target.is_nan() {
        return None;
    }
    let mut best: Option<(usize, f64)> = None;
    for (i, v) in values.iter().enumerate() {
        let dist = (v - target).abs();
        if best.map_or(true, |(_, d)| dist < d) {
            best = Some((i, dist));
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_include_endpoints() {
        let sweep = LinearSweep::new(1.0, 50.0, 80);
        let values = sweep.values();
        assert_eq!(values.len(), 80);
        assert_eq!(values[0], 1.0);
        assert_eq!(values[79], 50.0);
    }

    #[test]
    fn test_values_strictly_increasing() {
        let values = LinearSweep::new(0.01, 2.0, 60).values();
        assert!(values.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_step() {
        let sweep = LinearSweep::new(0.0, 10.0, 11);
        assert!((sweep.step() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_non_positive_start() {
        let err = LinearSweep::new(0.0, 1.0, 10).validate("currents_ka").unwrap_err();
        match err {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "currents_ka.start"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_reversed_range() {
        assert!(LinearSweep::new(2.0, 1.0, 10).validate("durations_s").is_err());
        assert!(LinearSweep::new(1.0, 1.0, 10).validate("durations_s").is_err());
    }

    #[test]
    fn test_rejects_single_point() {
        assert!(LinearSweep::new(1.0, 2.0, 1).validate("durations_s").is_err());
    }

    #[test]
    fn test_rejects_range_too_narrow_for_count() {
        let sweep = LinearSweep::new(1.0, 1.0 + 4.0 * f64::EPSILON, 50);
        let err = sweep.validate("currents_ka").unwrap_err();
        match err {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "currents_ka.count"),
            other => panic!("unexpected error: {other:?}"),
        }

        // Same range with two points still separates
        assert!(LinearSweep::new(1.0, 1.0 + 4.0 * f64::EPSILON, 2).validate("currents_ka").is_ok());
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(LinearSweep::new(1.0, f64::INFINITY, 10).validate("x").is_err());
        assert!(LinearSweep::new(f64::NAN, 2.0, 10).validate("x").is_err());
    }

    #[test]
    fn test_nearest_index() {
        let values = [0.1, 0.2, 0.3, 0.4];
        assert_eq!(nearest_index(&values, 0.26), Some(2));
        assert_eq!(nearest_index(&values, -5.0), Some(0));
        assert_eq!(nearest_index(&values, 9.0), Some(3));
        assert_eq!(nearest_index(&[], 1.0), None);
        assert_eq!(nearest_index(&values, f64::NAN), None);
    }

    #[test]
    fn test_nearest_index_tie_prefers_lower() {
        assert_eq!(nearest_index(&[1.0, 2.0, 3.0], 2.5), Some(1));
    }
}
