/// ============================================================
///  Site Sizing Estimator
///
///  Three pure operations, evaluated in sequence per request:
///   1. Tilt angle   – linear heuristic on |latitude|
///                     (regional fit calibrated for Brazil, not a
///                     solar-position model)
///   2. Panel count  – floor(available area / panel footprint)
///   3. Total power  – count × rated W / 1000 → kW
/// ============================================================

use thiserror::Error;

use crate::models::site::{CalculationResult, Location, PanelSpec, SiteConstraints};

// ─── Heuristic coefficients ─────────────────────────────────
const TILT_SLOPE: f64 = 0.9;
const TILT_OFFSET_DEG: f64 = 3.1;
const WATTS_PER_KILOWATT: f64 = 1000.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EstimateError {
    #[error("invalid argument: {name} out of range (got {value})")]
    InvalidArgument { name: &'static str, value: f64 },
}

fn ensure_positive(name: &'static str, value: f64) -> Result<f64, EstimateError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(EstimateError::InvalidArgument { name, value })
    }
}

/// Recommended mounting tilt in degrees from horizontal.
///
/// `tilt = |latitude| × 0.9 + 3.1`. Total over the reals; the intended
/// domain is [-90, 90]. Only the absolute value is used, so both
/// hemispheres get the same tilt.
pub fn estimate_tilt(latitude_deg: f64) -> f64 {
    latitude_deg.abs() * TILT_SLOPE + TILT_OFFSET_DEG
}

/// Maximum number of whole panels that fit in `available_area_m2`.
///
/// Fails with `InvalidArgument` on `available_area_m2` when the count does
/// not fit in a `u64`.
pub fn estimate_panel_count(
    available_area_m2: f64,
    panel_area_m2: f64,
) -> Result<u64, EstimateError> {
    let available = ensure_positive("available_area_m2", available_area_m2)?;
    let panel = ensure_positive("panel_area_m2", panel_area_m2)?;

    let count = (available / panel).floor();
    // u64::MAX as f64 rounds up to 2^64, which u64 cannot hold
    if !count.is_finite() || count >= u64::MAX as f64 {
        return Err(EstimateError::InvalidArgument {
            name: "available_area_m2",
            value: available_area_m2,
        });
    }
    Ok(count as u64)
}

/// Total rated power in kW for `count` panels of `panel_wattage_w` each.
pub fn estimate_total_power(count: u64, panel_wattage_w: f64) -> Result<f64, EstimateError> {
    let wattage = ensure_positive("panel_wattage_w", panel_wattage_w)?;
    Ok((count as f64 * wattage) / WATTS_PER_KILOWATT)
}

/// Run all three estimates for one site.
pub fn calculate(
    location: &Location,
    site: &SiteConstraints,
    panel: &PanelSpec,
) -> Result<CalculationResult, EstimateError> {
    let tilt_deg = estimate_tilt(location.latitude);
    let panel_count = estimate_panel_count(site.available_area_m2, panel.area_m2)?;
    let total_power_kw = estimate_total_power(panel_count, panel.wattage_w)?;

    tracing::debug!(
        latitude = location.latitude,
        tilt_deg,
        panel_count,
        total_power_kw,
        "site estimate computed"
    );

    Ok(CalculationResult {
        tilt_deg,
        panel_count,
        total_power_kw,
    })
}
