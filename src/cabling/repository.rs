use std::collections::{HashMap, HashSet};

use crate::models::{Port, PortKind};

use super::CablingError;

/// PanelScope carries the inventory identifiers the cabling workflows look up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelScope {
    /// Device role slug of modular panels
    pub panel_role: String,
    /// Tag carried by every modular trunk cable
    pub trunk_tag: String,
    /// Only front ports whose type contains this value are routed over
    pub front_port_type: Option<String>,
}

/// Read-only port queries needed to resolve a path between two racks.
///
/// Every list is returned in natural order (ascending port id) so that
/// first-match selection is deterministic.
pub trait PortRepository {
    /// Free front ports on panels mounted in `rack_id`.
    fn free_panel_ports(&self, rack_id: i64) -> Vec<Port>;

    /// Rear port a front port is mapped onto, if any.
    fn rear_port(&self, front: &Port) -> Option<Port>;

    /// Rear port at the far end of a rear port's trunk. `None` when the trunk
    /// has not been cabled yet.
    fn remote_counterpart(&self, rear: &Port) -> Option<Port>;

    /// The single front port of `panel_id` mapped to `rear_port_id` at `position`.
    fn front_port_for_position(
        &self,
        panel_id: i64,
        rear_port_id: i64,
        position: i32,
    ) -> Result<Port, CablingError>;
}

/// PlantSnapshot is a point-in-time image of the panel plant of one or more sites
#[derive(Debug, Clone)]
pub struct PlantSnapshot {
    scope: PanelScope,
    ports: Vec<Port>,
    index: HashMap<i64, usize>,
    panels: HashSet<i64>,
    links: HashMap<i64, i64>,
}

impl PlantSnapshot {
    /// Build a snapshot from ports, the ids of panel devices, and rear-to-rear
    /// trunk links given as `(rear_a, rear_b)` pairs.
    pub fn new(
        scope: PanelScope,
        mut ports: Vec<Port>,
        panels: HashSet<i64>,
        trunks: impl IntoIterator<Item = (i64, i64)>,
    ) -> Self {
        ports.sort_by_key(|p| p.id);
        let index = ports.iter().enumerate().map(|(i, p)| (p.id, i)).collect();

        let mut links = HashMap::new();
        for (a, b) in trunks {
            links.insert(a, b);
            links.insert(b, a);
        }

        Self {
            scope,
            ports,
            index,
            panels,
            links,
        }
    }

    pub fn port(&self, id: i64) -> Option<&Port> {
        self.index.get(&id).map(|&i| &self.ports[i])
    }

    fn matches_port_type(&self, port: &Port) -> bool {
        match &self.scope.front_port_type {
            Some(wanted) => port
                .port_type
                .to_ascii_lowercase()
                .contains(&wanted.to_ascii_lowercase()),
            None => true,
        }
    }
}

impl PortRepository for PlantSnapshot {
    fn free_panel_ports(&self, rack_id: i64) -> Vec<Port> {
        self.ports
            .iter()
            .filter(|p| {
                p.kind == PortKind::Front
                    && p.rack_id == Some(rack_id)
                    && self.panels.contains(&p.device_id)
                    && p.is_free()
                    && self.matches_port_type(p)
            })
            .cloned()
            .collect()
    }

    fn rear_port(&self, front: &Port) -> Option<Port> {
        front
            .rear_port_id
            .and_then(|id| self.port(id))
            .filter(|p| p.kind == PortKind::Rear)
            .cloned()
    }

    fn remote_counterpart(&self, rear: &Port) -> Option<Port> {
        self.links
            .get(&rear.id)
            .and_then(|id| self.port(*id))
            .cloned()
    }

    fn front_port_for_position(
        &self,
        panel_id: i64,
        rear_port_id: i64,
        position: i32,
    ) -> Result<Port, CablingError> {
        let mut matches = self.ports.iter().filter(|p| {
            p.kind == PortKind::Front
                && p.device_id == panel_id
                && p.rear_port_id == Some(rear_port_id)
                && p.rear_port_position.unwrap_or(1) == position
        });

        match (matches.next(), matches.next()) {
            (Some(port), None) => Ok(port.clone()),
            (None, _) => Err(CablingError::DataIntegrity(format!(
                "no front port on panel {} maps to rear port {} position {}",
                panel_id, rear_port_id, position
            ))),
            (Some(_), Some(_)) => Err(CablingError::DataIntegrity(format!(
                "multiple front ports on panel {} map to rear port {} position {}",
                panel_id, rear_port_id, position
            ))),
        }
    }
}
