use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// ─── Core entities ───────────────────────────────────────────────────────────

/// Geographic position of the installation site (degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Footprint and nameplate rating of a single panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PanelSpec {
    /// Panel footprint (m²)
    pub area_m2: f64,
    /// Rated output under standard test conditions (W)
    pub wattage_w: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SiteConstraints {
    /// Mounting area available on site (m²)
    pub available_area_m2: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CalculationResult {
    /// Recommended tilt from horizontal (deg)
    pub tilt_deg: f64,
    /// Whole panels that fit in the available area
    pub panel_count: u64,
    /// Total rated power (kW)
    pub total_power_kw: f64,
}

// ─── Localization ────────────────────────────────────────────────────────────

/// Language for the human-readable summary lines. Numbers are unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "pt-BR")]
    PtBr,
}

// ─── Input bounds ────────────────────────────────────────────────────────────

/// Accepted range for one numeric form field.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct InputBound {
    #[schema(value_type = String)]
    pub field: &'static str,
    #[schema(value_type = String)]
    pub unit: &'static str,
    pub min: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

impl InputBound {
    pub fn check(&self, value: f64) -> Result<f64, BoundViolation> {
        let within_max = self.max.is_none_or(|max| value <= max);
        if value.is_finite() && value >= self.min && within_max {
            Ok(value)
        } else {
            Err(BoundViolation { bound: *self, value })
        }
    }
}

pub const LATITUDE_BOUND: InputBound = InputBound {
    field: "latitude",
    unit: "deg",
    min: -90.0,
    max: Some(90.0),
    step: None,
};
pub const LONGITUDE_BOUND: InputBound = InputBound {
    field: "longitude",
    unit: "deg",
    min: -180.0,
    max: Some(180.0),
    step: None,
};
pub const AVAILABLE_AREA_BOUND: InputBound = InputBound {
    field: "available_area_m2",
    unit: "m2",
    min: 1.0,
    max: None,
    step: Some(1.0),
};
pub const PANEL_AREA_BOUND: InputBound = InputBound {
    field: "panel_area_m2",
    unit: "m2",
    min: 0.1,
    max: None,
    step: None,
};
pub const PANEL_WATTAGE_BOUND: InputBound = InputBound {
    field: "panel_wattage_w",
    unit: "W",
    min: 10.0,
    max: None,
    step: None,
};

pub const INPUT_BOUNDS: [InputBound; 5] = [
    LATITUDE_BOUND,
    LONGITUDE_BOUND,
    AVAILABLE_AREA_BOUND,
    PANEL_AREA_BOUND,
    PANEL_WATTAGE_BOUND,
];

/// A field value that fell outside its [`InputBound`].
#[derive(Debug, Clone, Copy)]
pub struct BoundViolation {
    pub bound: InputBound,
    pub value: f64,
}

impl std::fmt::Display for BoundViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.bound.max {
            Some(max) => write!(
                f,
                "{} must be between {} and {} {} (got {})",
                self.bound.field, self.bound.min, max, self.bound.unit, self.value
            ),
            None => write!(
                f,
                "{} must be at least {} {} (got {})",
                self.bound.field, self.bound.min, self.bound.unit, self.value
            ),
        }
    }
}

impl std::error::Error for BoundViolation {}

// ─── REST API request / response types ───────────────────────────────────────

/// Inputs collected by the form. Accepted as a JSON body or as query params.
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CalculationRequest {
    /// Latitude in degrees (-90 … 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 … 180)
    pub longitude: f64,
    /// Available mounting area (m², ≥ 1)
    pub available_area_m2: f64,
    /// Footprint of one panel (m², ≥ 0.1)
    pub panel_area_m2: f64,
    /// Rated power of one panel (W, ≥ 10)
    pub panel_wattage_w: f64,
    /// Language of the summary lines; server default when omitted
    #[serde(default)]
    pub locale: Option<Locale>,
}

/// Request fields split into core entities after boundary validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedInput {
    pub location: Location,
    pub site: SiteConstraints,
    pub panel: PanelSpec,
}

impl CalculationRequest {
    /// Apply the form-field bounds. The first offending field is reported.
    pub fn validate(&self) -> Result<ValidatedInput, BoundViolation> {
        Ok(ValidatedInput {
            location: Location {
                latitude: LATITUDE_BOUND.check(self.latitude)?,
                longitude: LONGITUDE_BOUND.check(self.longitude)?,
            },
            site: SiteConstraints {
                available_area_m2: AVAILABLE_AREA_BOUND.check(self.available_area_m2)?,
            },
            panel: PanelSpec {
                area_m2: PANEL_AREA_BOUND.check(self.panel_area_m2)?,
                wattage_w: PANEL_WATTAGE_BOUND.check(self.panel_wattage_w)?,
            },
        })
    }
}

/// Where the front-end should drop its map pin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct MapMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
}

/// Display-ready lines (tilt to 1 decimal, power to 2 decimals).
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Summary {
    pub tilt: String,
    pub panel_count: String,
    pub total_power: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CalculationResponse {
    pub timestamp: DateTime<Utc>,
    pub locale: Locale,
    pub result: CalculationResult,
    pub marker: MapMarker,
    pub summary: Summary,
}

/// Pre-filled form values plus the bounds each field accepts.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FormDefaults {
    pub latitude: f64,
    pub longitude: f64,
    pub available_area_m2: f64,
    pub panel_area_m2: f64,
    pub panel_wattage_w: f64,
    pub locale: Locale,
    pub map_zoom: u8,
    pub bounds: Vec<InputBound>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}
