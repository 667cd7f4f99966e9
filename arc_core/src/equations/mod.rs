//! # Arc-Flash Equations
//!
//! The per-point physical model, kept separate from grid bookkeeping so each
//! formula can be checked against hand calculations.
//!
//! ## Modules
//!
//! - [`arc_flash`] - Arcing current, incident energy, and protection boundary
//!
//! ## Evaluation Order
//!
//! 1. Bolted fault current → arcing current
//! 2. Arcing current + duration + working distance → incident energy (J/cm²)
//! 3. J/cm² → cal/cm²
//! 4. cal/cm² + threshold → protection boundary (mm)

pub mod arc_flash;

pub use arc_flash::{
    arcing_current_ka,
    incident_energy_j_cm2,
    joules_to_calories,
    protection_boundary_mm,
};
