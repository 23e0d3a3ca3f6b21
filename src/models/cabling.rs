use serde::{Deserialize, Serialize};

use super::{cable_status, cable_type, Cable, Port};

/// Shared attributes applied to every cable of one workflow run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CableAttributes {
    pub label: String,
    pub status: String,
    pub cable_type: String,
    pub length: Option<i32>,
}

/// NewCable is a single cable-creation request handed to the writer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCable {
    pub a_port_id: i64,
    pub b_port_id: i64,
    pub label: String,
    pub status: String,
    pub cable_type: String,
    pub length: Option<i32>,
    pub tags: Vec<String>,
}

impl NewCable {
    pub fn between(a: &Port, b: &Port, attrs: &CableAttributes) -> Self {
        Self {
            a_port_id: a.id,
            b_port_id: b.id,
            label: attrs.label.clone(),
            status: attrs.status.clone(),
            cable_type: attrs.cable_type.clone(),
            length: attrs.length,
            tags: Vec::new(),
        }
    }
}

/// Where a port physically lives, by display name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PortLocation {
    pub site: String,
    pub rack: String,
    pub device: String,
    pub port: String,
}

/// Panel topology between two racks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    /// Both endpoints in one rack: a single cable, no panels
    Local,
    /// Spoke-spoke or spoke-hub: one panel pair between the racks
    Direct,
    /// Spoke-hub-spoke: two panel pairs meeting at the hub
    Hub,
}

/// One cable segment of a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub a: Port,
    pub b: Port,
}

/// ConnectionPlan is the ordered list of segments from origin to destination.
/// Local plans have one segment, direct plans two, hub plans three.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionPlan {
    pub topology: Topology,
    pub segments: Vec<Segment>,
}

/// A created cable plus its operator-facing log block
#[derive(Debug, Clone, Serialize)]
pub struct CreatedCable {
    pub cable: Cable,
    pub log: String,
}

/// JumperRequest for running a jumper between two endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct JumperRequest {
    pub a_port_id: i64,
    pub z_port_id: i64,
    pub clr: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_jumper_type")]
    pub cable_type: String,
    #[serde(default)]
    pub length: Option<i32>,
}

impl JumperRequest {
    pub fn attributes(&self) -> CableAttributes {
        CableAttributes {
            label: self.clr.clone(),
            status: self.status.clone(),
            cable_type: self.cable_type.clone(),
            length: self.length,
        }
    }
}

/// JumperResponse lists the cables created by a jumper run
#[derive(Debug, Clone, Serialize)]
pub struct JumperResponse {
    pub topology: Topology,
    pub cables: Vec<CreatedCable>,
}

/// TrunkRequest for cabling a panel rear port to its remote panel
#[derive(Debug, Clone, Deserialize)]
pub struct TrunkRequest {
    pub panel_id: i64,
    pub rear_port_id: i64,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub length: Option<i32>,
}

fn default_status() -> String {
    cable_status::CONNECTED.to_string()
}

fn default_jumper_type() -> String {
    cable_type::SMF.to_string()
}
