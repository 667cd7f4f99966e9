//! # Hazard Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` / grid - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<_, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`grid`] - Incident energy and protection boundary over a current × duration sweep
//! - [`point`] - One (current, duration) pair with PPE classification

pub mod grid;
pub mod point;

// Re-export commonly used types
pub use grid::{GridSlice, HazardGrid, PeakCell, SliceAxis};
pub use point::{PointInput, PointResult};
