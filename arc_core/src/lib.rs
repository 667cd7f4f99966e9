//! # arc_core - Arc-Flash Hazard Calculation Engine
//!
//! `arc_core` evaluates arc-flash incident energy and protection boundary
//! over a sweep of bolted fault current and arc duration for a fixed
//! electrode arrangement. All inputs and outputs are JSON-serializable so the
//! grids can be handed to any plotting or reporting tool.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take a study and return grids
//! - **Explicit configuration**: Coefficients and thresholds travel in
//!   [`StudyInput`], never as globals
//! - **Fail loudly**: Out-of-domain inputs are rejected before evaluation;
//!   a bad intermediate fails the whole run instead of leaving a hole in the grid
//!
//! ## Quick Start
//!
//! ```rust
//! use arc_core::{calculations::grid, StudyInput};
//!
//! let grid = grid::calculate(&StudyInput::default()).unwrap();
//! let (rows, cols) = grid.shape();
//! assert_eq!((rows, cols), (80, 60));
//!
//! // Serialize for a plotting front end
//! let json = serde_json::to_string(&grid).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Study input, electrode arrangement, model coefficients
//! - [`sweep`] - Linear sweeps and nearest-sample lookup
//! - [`equations`] - Per-point arc-flash formulas
//! - [`calculations`] - Grid and single-point evaluation
//! - [`ppe`] - PPE category classification
//! - [`units`] - Type-safe unit wrappers
//! - [`study`] / [`file_io`] - Study files with atomic saves
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod config;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod ppe;
pub mod study;
pub mod sweep;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{GridSlice, HazardGrid, PointInput, PointResult};
pub use config::{ElectrodeConfig, ModelCoefficients, StudyInput};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_study, save_study};
pub use ppe::PpeCategory;
pub use study::StudyFile;
pub use sweep::LinearSweep;
