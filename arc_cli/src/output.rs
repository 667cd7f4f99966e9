//! Text and CSV rendering for grids, slices and points.
//!
//! JSON output goes straight through serde; everything here is for people
//! reading a terminal or for spreadsheet import.

use std::fmt::{self, Write};

use arc_core::calculations::{GridSlice, HazardGrid, PointResult, SliceAxis};
use arc_core::ppe::PpeCategory;
use arc_core::units::{CalPerCm2, KiloAmps, Millimeters, Seconds};

const RULE: &str = "═══════════════════════════════════════════════════";

// The icon judges the boundary at the study threshold. PPE lines use the
// fixed category table and can disagree with it under a custom threshold.
fn status_icon(safe: bool) -> &'static str {
    if safe { "[OK]" } else { "[HAZARD]" }
}

/// Header block describing the grid as a whole.
pub fn grid_summary(grid: &HazardGrid) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let (rows, cols) = grid.shape();
    let currents = grid.currents_ka();
    let durations = grid.durations_s();

    writeln!(out, "{RULE}")?;
    writeln!(out, "  ARC-FLASH HAZARD GRID: {}", grid.label())?;
    writeln!(out, "{RULE}")?;
    writeln!(out)?;
    writeln!(out, "Sweep:")?;
    if let (Some(first), Some(last)) = (currents.first(), currents.last()) {
        writeln!(out, "  Currents:  {:.2} .. {:.2} ({} points)", KiloAmps(*first), KiloAmps(*last), rows)?;
    }
    if let (Some(first), Some(last)) = (durations.first(), durations.last()) {
        writeln!(out, "  Durations: {:.3} .. {:.3} ({} points)", Seconds(*first), Seconds(*last), cols)?;
    }
    writeln!(out, "  Working distance: {:.0}", Millimeters(grid.working_distance_mm()))?;
    writeln!(out, "  Threshold:        {:.2}", CalPerCm2(grid.threshold_cal_cm2()))?;
    writeln!(out)?;

    if let Some(peak) = grid.peak() {
        writeln!(out, "Peak cell:")?;
        writeln!(
            out,
            "  {:.2} for {:.3}: E = {:.4e} cal/cm²",
            KiloAmps(peak.current_ka),
            Seconds(peak.duration_s),
            peak.energy_cal_cm2,
        )?;
        writeln!(
            out,
            "  AFB at {:.2}: {:.1} {}",
            CalPerCm2(grid.threshold_cal_cm2()),
            Millimeters(peak.boundary_mm),
            status_icon(peak.boundary_mm <= grid.working_distance_mm()),
        )?;
        writeln!(out, "  PPE (category table): {}", PpeCategory::classify(peak.energy_cal_cm2))?;
        writeln!(out)?;
    }

    writeln!(out, "Cells by PPE category (category table):")?;
    for (category, count) in grid.category_counts() {
        writeln!(out, "  {:<36} {:>6}", category.label(), count)?;
    }
    Ok(out)
}

/// One slice as an aligned table.
pub fn slice_table(slice: &GridSlice) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let (title, axis_header) = match slice.axis {
        SliceAxis::Current => (format!("t = {:.3}", Seconds(slice.fixed_value)), "Ibf (kA)"),
        SliceAxis::Duration => (format!("Ibf = {:.2}", KiloAmps(slice.fixed_value)), "t (s)"),
    };

    writeln!(out, "── {title} ──")?;
    writeln!(out, "{:>12} {:>16} {:>14}", axis_header, "E (cal/cm²)", "AFB (mm)")?;
    for ((x, e), b) in slice
        .axis_values
        .iter()
        .zip(&slice.energy_cal_cm2)
        .zip(&slice.boundary_mm)
    {
        writeln!(out, "{:>12.4} {:>16.6e} {:>14.3}", x, e, b)?;
    }
    Ok(out)
}

/// All slices in long CSV form, one row per sample.
pub fn slices_csv(slices: &[GridSlice]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "axis,fixed_value,axis_value,energy_cal_cm2,boundary_mm")?;
    for slice in slices {
        let axis = match slice.axis {
            SliceAxis::Current => "current_ka",
            SliceAxis::Duration => "duration_s",
        };
        for ((x, e), b) in slice
            .axis_values
            .iter()
            .zip(&slice.energy_cal_cm2)
            .zip(&slice.boundary_mm)
        {
            writeln!(out, "{axis},{},{x},{e},{b}", slice.fixed_value)?;
        }
    }
    Ok(out)
}

/// Single-point result block.
pub fn point_report(
    result: &PointResult,
    working_distance_mm: f64,
    threshold_cal_cm2: f64,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{RULE}")?;
    writeln!(out, "  ARC-FLASH POINT RESULT")?;
    writeln!(out, "{RULE}")?;
    writeln!(out)?;
    writeln!(out, "Input:")?;
    writeln!(out, "  Bolted fault current: {:.2}", KiloAmps(result.bolted_current_ka))?;
    writeln!(out, "  Arc duration:         {:.3}", Seconds(result.duration_s))?;
    writeln!(out, "  Working distance:     {:.0}", Millimeters(working_distance_mm))?;
    writeln!(out, "  Boundary threshold:   {:.2}", CalPerCm2(threshold_cal_cm2))?;
    writeln!(out)?;
    writeln!(out, "Results:")?;
    writeln!(out, "  Arcing current:  {:.3}", KiloAmps(result.arcing_current_ka))?;
    writeln!(out, "  Incident energy: {:.4e} J/cm² ({:.4e} cal/cm²)", result.incident_energy_j_cm2, result.incident_energy_cal_cm2)?;
    writeln!(
        out,
        "  AFB at threshold: {:.1} ({:.2} in) {}",
        Millimeters(result.boundary_mm),
        result.boundary_in,
        status_icon(result.working_distance_is_safe(working_distance_mm)),
    )?;
    writeln!(out)?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "  PPE (category table): {}", result.ppe_category)?;
    writeln!(out, "{RULE}")?;
    Ok(out)
}
