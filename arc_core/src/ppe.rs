//! # PPE Categories
//!
//! Maps an incident energy to the arc-rated clothing category that covers it.
//! Category limits are inclusive upper bounds in cal/cm². The table is
//! fixed: a study's `threshold_cal_cm2` moves the protection boundary but
//! never the category limits.
//!
//! | Category          | Incident energy (cal/cm²) |
//! |-------------------|---------------------------|
//! | Below threshold   | ≤ 1.2                     |
//! | Category 1        | ≤ 4                       |
//! | Category 2        | ≤ 8                       |
//! | Category 3        | ≤ 25                      |
//! | Category 4        | ≤ 40                      |
//! | Exceeds Category 4| > 40                      |
//!
//! ```rust
//! use arc_core::ppe::PpeCategory;
//!
//! assert_eq!(PpeCategory::classify(4.0), PpeCategory::Category1);
//! assert_eq!(PpeCategory::classify(4.01), PpeCategory::Category2);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::SECOND_DEGREE_BURN_CAL_CM2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PpeCategory {
    /// No arc-rated PPE required
    BelowThreshold,
    Category1,
    Category2,
    Category3,
    Category4,
    /// No category is rated for this energy
    ExceedsCategory4,
}

impl PpeCategory {
    /// Classify an incident energy in cal/cm².
    ///
    /// NaN is treated as the most severe category.
    pub fn classify(energy_cal_cm2: f64) -> Self {
        if energy_cal_cm2 <= SECOND_DEGREE_BURN_CAL_CM2 {
            PpeCategory::BelowThreshold
        } else if energy_cal_cm2 <= 4.0 {
            PpeCategory::Category1
        } else if energy_cal_cm2 <= 8.0 {
            PpeCategory::Category2
        } else if energy_cal_cm2 <= 25.0 {
            PpeCategory::Category3
        } else if energy_cal_cm2 <= 40.0 {
            PpeCategory::Category4
        } else {
            PpeCategory::ExceedsCategory4
        }
    }

    /// Minimum arc rating of the category's clothing (cal/cm²).
    ///
    /// `None` for the two open-ended cases.
    pub fn rating_cal_cm2(self) -> Option<f64> {
        match self {
            PpeCategory::Category1 => Some(4.0),
            PpeCategory::Category2 => Some(8.0),
            PpeCategory::Category3 => Some(25.0),
            PpeCategory::Category4 => Some(40.0),
            PpeCategory::BelowThreshold | PpeCategory::ExceedsCategory4 => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PpeCategory::BelowThreshold => "Below arc-flash threshold (No PPE)",
            PpeCategory::Category1 => "PPE Category 1",
            PpeCategory::Category2 => "PPE Category 2",
            PpeCategory::Category3 => "PPE Category 3",
            PpeCategory::Category4 => "PPE Category 4",
            PpeCategory::ExceedsCategory4 => "Above PPE Category 4 (Dangerous)",
        }
    }

}

impl fmt::Display for PpeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
