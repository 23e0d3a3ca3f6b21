//! In-memory plant fixtures for cabling tests.

use std::collections::{HashMap, HashSet};

use crate::models::{Port, PortKind};

use super::{PanelScope, PlantSnapshot};

pub fn scope() -> PanelScope {
    PanelScope {
        panel_role: "modular-panels".to_string(),
        trunk_tag: "modular-trunk".to_string(),
        front_port_type: None,
    }
}

#[derive(Default)]
pub struct PlantBuilder {
    next_id: i64,
    next_cable: i64,
    devices: HashMap<i64, (String, Option<i64>)>,
    panels: HashSet<i64>,
    ports: Vec<Port>,
    trunks: Vec<(i64, i64)>,
}

impl PlantBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn panel(&mut self, name: &str, rack_id: i64) -> i64 {
        let id = self.device(name, rack_id);
        self.panels.insert(id);
        id
    }

    pub fn device(&mut self, name: &str, rack_id: i64) -> i64 {
        let id = self.id();
        self.devices.insert(id, (name.to_string(), Some(rack_id)));
        id
    }

    pub fn unracked_device(&mut self, name: &str) -> i64 {
        let id = self.id();
        self.devices.insert(id, (name.to_string(), None));
        id
    }

    fn push(&mut self, device_id: i64, name: &str, kind: PortKind, port_type: &str) -> i64 {
        let id = self.id();
        let (device_name, rack_id) = self.devices[&device_id].clone();
        self.ports.push(Port {
            id,
            device_id,
            name: name.to_string(),
            kind,
            port_type: port_type.to_string(),
            positions: 1,
            rear_port_id: None,
            rear_port_position: None,
            cable_id: None,
            device_name,
            rack_id,
        });
        id
    }

    fn port_mut(&mut self, id: i64) -> &mut Port {
        self.ports
            .iter_mut()
            .find(|p| p.id == id)
            .expect("fixture port exists")
    }

    pub fn rear(&mut self, device_id: i64, name: &str, positions: i32) -> i64 {
        let id = self.push(device_id, name, PortKind::Rear, "mpo");
        self.port_mut(id).positions = positions;
        id
    }

    pub fn front(&mut self, device_id: i64, name: &str, rear: i64, position: i32) -> i64 {
        self.front_typed(device_id, name, rear, position, "lc")
    }

    pub fn front_typed(
        &mut self,
        device_id: i64,
        name: &str,
        rear: i64,
        position: i32,
        port_type: &str,
    ) -> i64 {
        let id = self.push(device_id, name, PortKind::Front, port_type);
        let port = self.port_mut(id);
        port.rear_port_id = Some(rear);
        port.rear_port_position = Some(position);
        id
    }

    pub fn interface(&mut self, device_id: i64, name: &str) -> i64 {
        self.push(device_id, name, PortKind::Interface, "25gbase-x-sfp28")
    }

    /// Mark a port as cabled to something outside the plant.
    pub fn occupy(&mut self, port_id: i64) {
        self.next_cable += 1;
        let cable = self.next_cable;
        self.port_mut(port_id).cable_id = Some(cable);
    }

    /// Cable two rear ports together as a trunk.
    pub fn trunk(&mut self, rear_a: i64, rear_b: i64) {
        self.next_cable += 1;
        let cable = self.next_cable;
        self.port_mut(rear_a).cable_id = Some(cable);
        self.port_mut(rear_b).cable_id = Some(cable);
        self.trunks.push((rear_a, rear_b));
    }

    /// Panel pair with `count` single-position trunks between two racks.
    /// Returns the front port ids on each side, in matching order.
    pub fn panel_pair(
        &mut self,
        name_a: &str,
        rack_a: i64,
        name_b: &str,
        rack_b: i64,
        count: usize,
    ) -> (Vec<i64>, Vec<i64>) {
        let a = self.panel(name_a, rack_a);
        let b = self.panel(name_b, rack_b);
        let mut fronts_a = Vec::new();
        let mut fronts_b = Vec::new();
        for i in 1..=count {
            let ra = self.rear(a, &format!("RP{}", i), 1);
            let rb = self.rear(b, &format!("RP{}", i), 1);
            self.trunk(ra, rb);
            fronts_a.push(self.front(a, &format!("FP{}", i), ra, 1));
            fronts_b.push(self.front(b, &format!("FP{}", i), rb, 1));
        }
        (fronts_a, fronts_b)
    }

    pub fn build(self) -> PlantSnapshot {
        PlantSnapshot::new(scope(), self.ports, self.panels, self.trunks)
    }

    pub fn build_with_port_type(self, port_type: &str) -> PlantSnapshot {
        let scope = PanelScope {
            front_port_type: Some(port_type.to_string()),
            ..scope()
        };
        PlantSnapshot::new(scope, self.ports, self.panels, self.trunks)
    }
}
