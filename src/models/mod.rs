mod cabling;

pub use cabling::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical cable status values
pub mod cable_status {
    pub const CONNECTED: &str = "connected";
    pub const PLANNED: &str = "planned";
    pub const DECOMMISSIONING: &str = "decommissioning";

    pub const ALL: &[&str] = &[CONNECTED, PLANNED, DECOMMISSIONING];

    pub fn is_valid(status: &str) -> bool {
        ALL.contains(&status)
    }
}

/// Canonical cable type values
pub mod cable_type {
    pub const SMF: &str = "smf";
    pub const SMF_OS2: &str = "smf-os2";
}

/// Site is a physical location holding racks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// CreateSiteRequest for creating a site
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSiteRequest {
    pub name: String,
    pub slug: String,
}

/// Rack is an equipment rack. Hub racks terminate trunks from many spoke racks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rack {
    pub id: i64,
    pub site_id: i64,
    pub name: String,
    pub is_hub: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// CreateRackRequest for creating a rack
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRackRequest {
    pub site_id: i64,
    pub name: String,
    #[serde(default)]
    pub is_hub: bool,
}

/// Device is anything mounted at a site; panels are devices carrying the panel role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: i64,
    pub site_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rack_id: Option<i64>,
    pub name: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_panel_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// CreateDeviceRequest for creating a device
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDeviceRequest {
    pub site_id: i64,
    #[serde(default)]
    pub rack_id: Option<i64>,
    pub name: String,
    pub role: String,
}

/// PairPanelsRequest links two panels as each other's remote panel
#[derive(Debug, Clone, Deserialize)]
pub struct PairPanelsRequest {
    pub panel_a_id: i64,
    pub panel_b_id: i64,
}

/// Termination kind of a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortKind {
    Front,
    Rear,
    Interface,
}

impl PortKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PortKind::Front => "front",
            PortKind::Rear => "rear",
            PortKind::Interface => "interface",
        }
    }

    /// Parse the stored column value. The schema CHECK constraint keeps this total.
    pub fn from_db(s: &str) -> Self {
        match s {
            "front" => PortKind::Front,
            "rear" => PortKind::Rear,
            _ => PortKind::Interface,
        }
    }
}

/// Port is a termination point on a device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    pub id: i64,
    pub device_id: i64,
    pub name: String,
    pub kind: PortKind,
    pub port_type: String,
    /// Number of front positions mapped onto a rear port
    pub positions: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rear_port_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rear_port_position: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cable_id: Option<i64>,
    // Enriched via JOIN (not stored)
    pub device_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rack_id: Option<i64>,
}

impl Port {
    pub fn is_free(&self) -> bool {
        self.cable_id.is_none()
    }
}

/// CreatePortRequest for creating a port on a device
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePortRequest {
    pub device_id: i64,
    pub name: String,
    pub kind: PortKind,
    #[serde(default)]
    pub port_type: String,
    #[serde(default = "default_positions")]
    pub positions: i32,
    #[serde(default)]
    pub rear_port_id: Option<i64>,
    #[serde(default)]
    pub rear_port_position: Option<i32>,
}

fn default_positions() -> i32 {
    1
}

/// Cable is one physical segment between two ports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cable {
    pub id: i64,
    pub a_port_id: i64,
    pub b_port_id: i64,
    pub label: String,
    pub status: String,
    pub cable_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<i32>,
    pub length_unit: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}
