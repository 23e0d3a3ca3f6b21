use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::cabling::{CableMaterializer, PathResolver};
use crate::models::*;
use crate::AppState;

use super::{created, validate_cable_fields, ApiError};

/// Look up and sanity-check both endpoints of a jumper
async fn load_endpoints(state: &AppState, req: &JumperRequest) -> Result<(Port, Port), ApiError> {
    if req.clr.trim().is_empty() {
        return Err(ApiError::bad_request("CLR is required"));
    }
    validate_cable_fields(&req.status, req.length)?;
    if req.a_port_id == req.z_port_id {
        return Err(ApiError::bad_request("A and Z ports must differ"));
    }

    let mut ports = Vec::with_capacity(2);
    for (side, id) in [("A", req.a_port_id), ("Z", req.z_port_id)] {
        let port = state
            .store
            .get_port(id)
            .await?
            .ok_or_else(|| ApiError::not_found(&format!("{} port", side)))?;
        if !port.is_free() {
            return Err(ApiError::conflict(format!(
                "{} port {} {} is already cabled",
                side, port.device_name, port.name
            )));
        }
        ports.push(port);
    }
    let z = ports.pop().ok_or_else(|| ApiError::internal("missing Z port"))?;
    let a = ports.pop().ok_or_else(|| ApiError::internal("missing A port"))?;
    Ok((a, z))
}

/// Two unracked endpoints count as one rack and get a single cable
fn same_rack(a: &Port, z: &Port) -> bool {
    a.rack_id == z.rack_id
}

async fn resolve_plan(state: &AppState, a: &Port, z: &Port) -> Result<ConnectionPlan, ApiError> {
    let racks: Vec<i64> = [a.rack_id, z.rack_id].into_iter().flatten().collect();
    let plant = state.store.load_plant(&state.scope, &racks).await?;
    Ok(PathResolver::new(&plant).resolve(a, z)?)
}

/// Resolve the panel path for a jumper without creating anything
pub async fn plan_jumper(
    State(state): State<Arc<AppState>>,
    Json(req): Json<JumperRequest>,
) -> Result<Json<ConnectionPlan>, ApiError> {
    let (a, z) = load_endpoints(&state, &req).await?;
    if same_rack(&a, &z) {
        return Ok(Json(ConnectionPlan {
            topology: Topology::Local,
            segments: vec![Segment { a, b: z }],
        }));
    }
    Ok(Json(resolve_plan(&state, &a, &z).await?))
}

/// Run a jumper between two endpoints, through modular panels when they sit in different racks
pub async fn create_jumper(
    State(state): State<Arc<AppState>>,
    Json(req): Json<JumperRequest>,
) -> Result<(StatusCode, Json<JumperResponse>), ApiError> {
    let (a, z) = load_endpoints(&state, &req).await?;
    let attrs = req.attributes();
    let materializer = CableMaterializer::new(&state.store, &state.scope);

    if same_rack(&a, &z) {
        let cable = materializer.create_single(&a, &z, &attrs).await?;
        return Ok(created(JumperResponse {
            topology: Topology::Local,
            cables: vec![cable],
        }));
    }

    let plan = resolve_plan(&state, &a, &z).await?;
    tracing::info!(
        "Jumper {}: {} {} -> {} {} ({:?}, {} segments)",
        attrs.label,
        a.device_name,
        a.name,
        z.device_name,
        z.name,
        plan.topology,
        plan.segments.len()
    );
    let cables = materializer.materialize(&plan, &attrs).await?;
    Ok(created(JumperResponse {
        topology: plan.topology,
        cables,
    }))
}
