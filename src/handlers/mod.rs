pub mod inventory;
pub mod jumpers;
pub mod trunks;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::cabling::CablingError;
use crate::models::cable_status;

/// Error response body: {"error": "message"}
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// API error type
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn not_found(resource: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: format!("{} not found", resource),
        }
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse::new(self.message)),
        )
            .into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        // Check for typed store errors first (no fragile string matching)
        if let Some(nf) = err.downcast_ref::<crate::db::NotFoundError>() {
            return Self::not_found(&nf.to_string());
        }
        if let Some(in_use) = err.downcast_ref::<crate::db::PortInUseError>() {
            return Self::conflict(in_use.to_string());
        }
        Self::internal(err.to_string())
    }
}

impl From<CablingError> for ApiError {
    fn from(err: CablingError) -> Self {
        match err {
            CablingError::Store(e) => Self::from(e),
            e if e.is_plant_conflict() => Self::conflict(e.to_string()),
            e => {
                tracing::error!("Cabling workflow failed: {}", e);
                Self::internal(e.to_string())
            }
        }
    }
}

/// Response helper: return 201 Created with JSON body
pub fn created<T: Serialize>(item: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(item))
}

/// Shared validation of operator-supplied cable fields
pub fn validate_cable_fields(status: &str, length: Option<i32>) -> Result<(), ApiError> {
    if !cable_status::is_valid(status) {
        return Err(ApiError::bad_request(format!(
            "Invalid cable status '{}' (expected one of: {})",
            status,
            cable_status::ALL.join(", ")
        )));
    }
    if let Some(len) = length {
        if !(1..=100).contains(&len) {
            return Err(ApiError::bad_request("Cable length must be between 1 and 100 meters"));
        }
    }
    Ok(())
}

/// Healthcheck endpoint, returns 200 OK with status
pub async fn healthcheck() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "panel-router",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
