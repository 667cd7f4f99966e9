//! # Unit Types
//!
//! Type-safe wrappers for the quantities that appear in an arc-flash study.
//! They are plain f64 newtypes so JSON stays clean (just numbers).
//!
//! ## Units Used Internally
//!
//! The regression equations are calibrated in mixed SI units:
//! - Current: kiloamps (kA)
//! - Time: seconds (s)
//! - Distance: millimeters (mm)
//! - Incident energy: joules per square centimeter (J/cm²), reported in
//!   calories per square centimeter (cal/cm²)
//!
//! Inches are provided for display and for users working from US labels.
//!
//! ## Example
//!
//! ```rust
//! use arc_core::units::{CalPerCm2, Inches, JoulesPerCm2, Millimeters};
//!
//! let e: CalPerCm2 = JoulesPerCm2(4.184).into();
//! assert!((e.0 - 1.0).abs() < 1e-12);
//!
//! let d: Inches = Millimeters(457.2).into();
//! assert!((d.0 - 18.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Joules per thermochemical calorie
pub const JOULES_PER_CALORIE: f64 = 4.184;

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

// ============================================================================
// Current Units
// ============================================================================

/// Current in kiloamps
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloAmps(pub f64);

// ============================================================================
// Time Units
// ============================================================================

/// Arc duration (clearing time) in seconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seconds(pub f64);

// ============================================================================
// Distance Units
// ============================================================================

/// Distance in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Distance in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl From<Millimeters> for Inches {
    fn from(mm: Millimeters) -> Self {
        Inches(mm.0 / MM_PER_INCH)
    }
}

impl From<Inches> for Millimeters {
    fn from(inches: Inches) -> Self {
        Millimeters(inches.0 * MM_PER_INCH)
    }
}

// ============================================================================
// Energy Density Units
// ============================================================================

/// Incident energy in joules per square centimeter
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JoulesPerCm2(pub f64);

/// Incident energy in calories per square centimeter
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalPerCm2(pub f64);

impl From<JoulesPerCm2> for CalPerCm2 {
    fn from(j: JoulesPerCm2) -> Self {
        CalPerCm2(j.0 / JOULES_PER_CALORIE)
    }
}

impl From<CalPerCm2> for JoulesPerCm2 {
    fn from(cal: CalPerCm2) -> Self {
        JoulesPerCm2(cal.0 * JOULES_PER_CALORIE)
    }
}

// ============================================================================
// Display
// ============================================================================

macro_rules! impl_display {
    ($type:ty, $suffix:expr) => {
        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match f.precision() {
                    Some(p) => write!(f, "{:.*} {}", p, self.0, $suffix),
                    None => write!(f, "{} {}", self.0, $suffix),
                }
            }
        }
    };
}

impl_display!(KiloAmps, "kA");
impl_display!(Seconds, "s");
impl_display!(Millimeters, "mm");
impl_display!(Inches, "in");
impl_display!(JoulesPerCm2, "J/cm²");
impl_display!(CalPerCm2, "cal/cm²");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joules_to_calories() {
        let cal: CalPerCm2 = JoulesPerCm2(8.368).into();
        assert!((cal.0 - 2.0).abs() < 1e-12);

        let back: JoulesPerCm2 = cal.into();
        assert!((back.0 - 8.368).abs() < 1e-12);
    }

    #[test]
    fn test_mm_to_inches() {
        let inches: Inches = Millimeters(609.6).into();
        assert!((inches.0 - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{:.1}", KiloAmps(10.0)), "10.0 kA");
        assert_eq!(format!("{}", Millimeters(300.0)), "300 mm");
    }

    #[test]
    fn test_serialization() {
        let e = CalPerCm2(8.5);
        let json = serde_json::to_string(&e).unwrap();
        assert_eq!(json, "8.5");

        let roundtrip: CalPerCm2 = serde_json::from_str(&json).unwrap();
        assert_eq!(e, roundtrip);
    }
}
