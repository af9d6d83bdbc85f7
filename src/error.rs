use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Structural problems with a route submission. Never partially applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("name required")]
    NameRequired,

    #[error("name longer than {max} characters")]
    NameTooLong { max: usize },

    #[error("at least one waypoint required")]
    NoWaypoints,

    #[error("waypoint {index}: latitude {value} outside [-90, 90]")]
    LatitudeOutOfRange { index: usize, value: f64 },

    #[error("waypoint {index}: longitude {value} outside [-180, 180]")]
    LongitudeOutOfRange { index: usize, value: f64 },
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::NameRequired => "name_required",
            ValidationError::NameTooLong { .. } => "name_too_long",
            ValidationError::NoWaypoints => "no_waypoints",
            ValidationError::LatitudeOutOfRange { .. } => "latitude_out_of_range",
            ValidationError::LongitudeOutOfRange { .. } => "longitude_out_of_range",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComputationError {
    #[error("waypoint {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    #[error("distance between waypoints {from} and {to} is not finite")]
    NonFiniteDistance { from: usize, to: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Computation(#[from] ComputationError),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("computation failed: {0}")]
    Computation(#[from] ComputationError),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Validation(err) => AppError::Validation(err),
            EngineError::Computation(err) => AppError::Computation(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, err.code(), err.to_string()),
            AppError::Computation(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "computation_failed",
                err.to_string(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "invalid_body", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg.clone())
            }
        };

        let body = Json(json!({
            "error": message,
            "code": code,
        }));

        (status, body).into_response()
    }
}
