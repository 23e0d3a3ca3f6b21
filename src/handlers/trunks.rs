use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::cabling::CableMaterializer;
use crate::models::*;
use crate::AppState;

use super::{created, validate_cable_fields, ApiError};

/// Cable a panel rear port to the same-named rear port on its remote panel
pub async fn create_trunk(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TrunkRequest>,
) -> Result<(StatusCode, Json<CreatedCable>), ApiError> {
    validate_cable_fields(&req.status, req.length)?;

    let panel = state
        .store
        .get_device(req.panel_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Panel"))?;
    if panel.role != state.scope.panel_role {
        return Err(ApiError::bad_request(format!("{} is not a modular panel", panel.name)));
    }
    let remote_id = panel
        .remote_panel_id
        .ok_or_else(|| ApiError::bad_request(format!("{} has no remote panel", panel.name)))?;
    let remote = state
        .store
        .get_device(remote_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Remote panel"))?;

    let rear = state
        .store
        .get_port(req.rear_port_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Rear port"))?;
    if rear.kind != PortKind::Rear || rear.device_id != panel.id {
        return Err(ApiError::bad_request(format!(
            "Port {} is not a rear port of {}",
            rear.name, panel.name
        )));
    }
    let remote_rear = state
        .store
        .get_port_by_name(remote.id, PortKind::Rear, &rear.name)
        .await?
        .ok_or_else(|| {
            ApiError::bad_request(format!("{} has no rear port {}", remote.name, rear.name))
        })?;

    let materializer = CableMaterializer::new(&state.store, &state.scope);
    let trunk = materializer
        .create_trunk(&panel.name, &rear, &remote.name, &remote_rear, &req.status, req.length)
        .await?;
    Ok(created(trunk))
}
