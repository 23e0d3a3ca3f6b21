use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::cabling::PortRepository;
use crate::models::*;
use crate::AppState;

use super::{created, ApiError};

pub async fn list_sites(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Site>>, ApiError> {
    Ok(Json(state.store.list_sites().await?))
}

pub async fn create_site(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateSiteRequest>,
) -> Result<(StatusCode, Json<Site>), ApiError> {
    if req.name.trim().is_empty() || req.slug.trim().is_empty() {
        return Err(ApiError::bad_request("Site name and slug are required"));
    }
    Ok(created(state.store.create_site(&req).await?))
}

pub async fn list_racks(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Rack>>, ApiError> {
    Ok(Json(state.store.list_racks().await?))
}

pub async fn create_rack(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateRackRequest>,
) -> Result<(StatusCode, Json<Rack>), ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::bad_request("Rack name is required"));
    }
    Ok(created(state.store.create_rack(&req).await?))
}

/// Free front ports on modular panels in a rack
pub async fn list_free_panel_ports(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Port>>, ApiError> {
    state
        .store
        .get_rack(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Rack"))?;
    let plant = state.store.load_plant(&state.scope, &[id]).await?;
    Ok(Json(plant.free_panel_ports(id)))
}

pub async fn list_devices(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Device>>, ApiError> {
    Ok(Json(state.store.list_devices().await?))
}

pub async fn create_device(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateDeviceRequest>,
) -> Result<(StatusCode, Json<Device>), ApiError> {
    if req.name.trim().is_empty() || req.role.trim().is_empty() {
        return Err(ApiError::bad_request("Device name and role are required"));
    }
    if let Some(rack_id) = req.rack_id {
        let rack = state
            .store
            .get_rack(rack_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Rack"))?;
        if rack.site_id != req.site_id {
            return Err(ApiError::bad_request("Rack belongs to a different site"));
        }
    }
    Ok(created(state.store.create_device(&req).await?))
}

/// Link two modular panels as each other's remote panel
pub async fn pair_panels(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PairPanelsRequest>,
) -> Result<StatusCode, ApiError> {
    if req.panel_a_id == req.panel_b_id {
        return Err(ApiError::bad_request("A panel cannot be paired with itself"));
    }
    for id in [req.panel_a_id, req.panel_b_id] {
        let device = state
            .store
            .get_device(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Device"))?;
        if device.role != state.scope.panel_role {
            return Err(ApiError::bad_request(format!(
                "{} is not a modular panel",
                device.name
            )));
        }
    }
    state.store.pair_panels(req.panel_a_id, req.panel_b_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_device_ports(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Port>>, ApiError> {
    Ok(Json(state.store.list_ports(id).await?))
}

pub async fn create_port(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreatePortRequest>,
) -> Result<(StatusCode, Json<Port>), ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::bad_request("Port name is required"));
    }
    if req.positions < 1 {
        return Err(ApiError::bad_request("Port positions must be at least 1"));
    }
    state
        .store
        .get_device(req.device_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Device"))?;

    match (req.kind, req.rear_port_id) {
        (PortKind::Front, Some(rear_id)) => {
            let rear = state
                .store
                .get_port(rear_id)
                .await?
                .ok_or_else(|| ApiError::bad_request(format!("Rear port {} does not exist", rear_id)))?;
            if rear.kind != PortKind::Rear || rear.device_id != req.device_id {
                return Err(ApiError::bad_request(
                    "Front ports must map to a rear port on the same device",
                ));
            }
            let position = req.rear_port_position.unwrap_or(1);
            if !(1..=rear.positions).contains(&position) {
                return Err(ApiError::bad_request(format!(
                    "Rear port position {} is outside 1..={}",
                    position, rear.positions
                )));
            }
        }
        (PortKind::Front, None) => {}
        (_, Some(_)) => {
            return Err(ApiError::bad_request("Only front ports map to a rear port"));
        }
        (_, None) => {}
    }

    Ok(created(state.store.create_port(&req).await?))
}

pub async fn list_cables(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Cable>>, ApiError> {
    Ok(Json(state.store.list_cables().await?))
}
