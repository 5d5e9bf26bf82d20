use utoipa::OpenApi;
use crate::controllers::calculation_controller;
use crate::error;
use crate::models::site;

#[derive(OpenApi)]
#[openapi(
    paths(
        calculation_controller::calculate,
        calculation_controller::calculate_query,
        calculation_controller::get_defaults,
        calculation_controller::health
    ),
    components(
        schemas(
            site::CalculationRequest,
            site::CalculationResponse,
            site::CalculationResult,
            site::MapMarker,
            site::Summary,
            site::Locale,
            site::FormDefaults,
            site::InputBound,
            site::HealthStatus,
            error::ErrorResponse,
            error::ErrorBody
        )
    ),
    tags(
        (name = "solarmap", description = "Solar panel sizing API")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/calculate"));
        assert!(doc.paths.paths.contains_key("/api/defaults"));
        assert!(doc.paths.paths.contains_key("/api/health"));
    }
}
