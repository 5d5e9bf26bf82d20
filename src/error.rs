//! API error type and JSON error bodies.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::models::site::BoundViolation;
use crate::services::estimator::EstimateError;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn invalid_argument(field: &str, value: f64, message: impl Into<String>) -> Self {
        // NaN/inf have no JSON representation and serialize as null
        Self::new(StatusCode::BAD_REQUEST, "INVALID_ARGUMENT", message)
            .with_details(serde_json::json!({ "field": field, "value": value }))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(
                status = %self.status.as_u16(),
                code = %self.code,
                message = %self.message,
                "server error response"
            );
        } else {
            debug!(
                status = %self.status.as_u16(),
                code = %self.code,
                message = %self.message,
                "client error response"
            );
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code.to_string(),
                message: self.message,
                details: self.details,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<BoundViolation> for ApiError {
    fn from(v: BoundViolation) -> Self {
        let message = v.to_string();
        let mut err = Self::invalid_argument(v.bound.field, v.value, message);
        if let Some(serde_json::Value::Object(details)) = err.details.as_mut() {
            details.insert("min".into(), serde_json::json!(v.bound.min));
            if let Some(max) = v.bound.max {
                details.insert("max".into(), serde_json::json!(max));
            }
        }
        err
    }
}

/// Missing or non-numeric query parameters.
impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "INVALID_ARGUMENT", rejection.body_text())
    }
}

/// Malformed JSON, missing fields or wrong content type; keeps axum's status.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), "INVALID_BODY", rejection.body_text())
    }
}

impl From<EstimateError> for ApiError {
    fn from(err: EstimateError) -> Self {
        match err {
            EstimateError::InvalidArgument { name, value } => {
                Self::invalid_argument(name, value, err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::site::LATITUDE_BOUND;

    #[test]
    fn test_bound_violation_details() {
        let err = ApiError::from(LATITUDE_BOUND.check(-95.0).unwrap_err());
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "INVALID_ARGUMENT");
        let details = err.details.unwrap();
        assert_eq!(details["field"], "latitude");
        assert_eq!(details["value"], -95.0);
        assert_eq!(details["min"], -90.0);
        assert_eq!(details["max"], 90.0);
    }

    #[test]
    fn test_estimate_error_maps_to_bad_request() {
        let err = ApiError::from(EstimateError::InvalidArgument {
            name: "panel_area_m2",
            value: 0.0,
        });
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message.contains("panel_area_m2"));
    }
}
