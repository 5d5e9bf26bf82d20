use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};

use crate::error::{ApiError, ErrorResponse};
use crate::models::site::{
    CalculationRequest, CalculationResponse, FormDefaults, HealthStatus, MapMarker,
};
use crate::services::{estimator, report};
use crate::shared_state::AppState;

fn run_calculation(
    state: &AppState,
    req: CalculationRequest,
) -> Result<CalculationResponse, ApiError> {
    let input = req.validate()?;
    let result = estimator::calculate(&input.location, &input.site, &input.panel)?;
    let locale = req.locale.unwrap_or(state.config.locale);

    tracing::info!(
        latitude = input.location.latitude,
        longitude = input.location.longitude,
        panel_count = result.panel_count,
        total_power_kw = result.total_power_kw,
        "calculation served"
    );

    Ok(CalculationResponse {
        timestamp: chrono::Utc::now(),
        locale,
        summary: report::summarize(&result, locale),
        marker: MapMarker {
            latitude: input.location.latitude,
            longitude: input.location.longitude,
            zoom: state.config.map.zoom,
        },
        result,
    })
}

/// POST /api/calculate
/// Estimate tilt, panel count and total power for a site
///
/// Inputs are checked against the form bounds (see `/api/defaults`) before the
/// estimate runs. The response carries raw numbers, display lines and the map pin.
#[utoipa::path(
    post,
    path = "/api/calculate",
    request_body = CalculationRequest,
    responses(
        (status = 200, description = "Site estimate", body = CalculationResponse),
        (status = 400, description = "Input outside accepted bounds", body = ErrorResponse),
        (status = 422, description = "Malformed or incomplete JSON body", body = ErrorResponse)
    )
)]
pub async fn calculate(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Result<Json<CalculationResponse>, ApiError> {
    let Json(req) = payload?;
    run_calculation(&state, req).map(Json)
}

/// GET /api/calculate
/// Same as the POST variant, with inputs as query parameters
#[utoipa::path(
    get,
    path = "/api/calculate",
    params(CalculationRequest),
    responses(
        (status = 200, description = "Site estimate", body = CalculationResponse),
        (
            status = 400,
            description = "Input outside accepted bounds or missing parameter",
            body = ErrorResponse
        )
    )
)]
pub async fn calculate_query(
    State(state): State<AppState>,
    query: Result<Query<CalculationRequest>, QueryRejection>,
) -> Result<Json<CalculationResponse>, ApiError> {
    let Query(req) = query?;
    run_calculation(&state, req).map(Json)
}

/// GET /api/defaults
/// Initial form values and per-field bounds
#[utoipa::path(
    get,
    path = "/api/defaults",
    responses(
        (status = 200, description = "Form defaults", body = FormDefaults)
    )
)]
pub async fn get_defaults(State(state): State<AppState>) -> Json<FormDefaults> {
    Json(state.config.form_defaults())
}

/// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up", body = HealthStatus)
    )
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}
