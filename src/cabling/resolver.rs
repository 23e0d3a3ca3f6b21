use crate::models::{ConnectionPlan, Port, Segment, Topology};

use super::{CablingError, PortRepository};

/// A free local front port and the free front port at the far end of its trunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelPair {
    pub local: Port,
    pub remote: Port,
}

/// PathResolver picks the panel ports a jumper between two racks runs through.
///
/// The plant is assumed to be provisioned as a two-tier patch topology: every
/// rack's panels are trunked either straight to another rack (spoke-spoke,
/// spoke-hub) or to a hub rack (spoke-hub-spoke). No search beyond one hop on
/// either side is attempted. Among equivalent candidates the first one in the
/// repository's natural order wins.
pub struct PathResolver<'a, R: PortRepository + ?Sized> {
    repo: &'a R,
}

impl<'a, R: PortRepository + ?Sized> PathResolver<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    /// Resolve the cable segments from `origin` to `dest`, which must sit in different racks.
    pub fn resolve(&self, origin: &Port, dest: &Port) -> Result<ConnectionPlan, CablingError> {
        let origin_rack = origin
            .rack_id
            .ok_or(CablingError::UnrackedPort { port_id: origin.id })?;
        let dest_rack = dest
            .rack_id
            .ok_or(CablingError::UnrackedPort { port_id: dest.id })?;

        let origin_free = self.repo.free_panel_ports(origin_rack);
        if origin_free.is_empty() {
            return Err(CablingError::NoFreePorts { rack_id: origin_rack });
        }
        let dest_free = self.repo.free_panel_ports(dest_rack);
        if dest_free.is_empty() {
            return Err(CablingError::NoFreePorts { rack_id: dest_rack });
        }

        let origin_pairs = self.valid_pairs(origin_rack, &origin_free)?;

        if let Some(pair) = origin_pairs
            .iter()
            .find(|p| p.remote.rack_id == Some(dest_rack))
        {
            tracing::debug!(
                "Direct panel path rack {} -> rack {} via {} {} / {} {}",
                origin_rack,
                dest_rack,
                pair.local.device_name,
                pair.local.name,
                pair.remote.device_name,
                pair.remote.name
            );
            return Ok(ConnectionPlan {
                topology: Topology::Direct,
                segments: vec![
                    Segment {
                        a: origin.clone(),
                        b: pair.local.clone(),
                    },
                    Segment {
                        a: dest.clone(),
                        b: pair.remote.clone(),
                    },
                ],
            });
        }

        // valid_pairs never returns an empty list
        let first = origin_pairs
            .into_iter()
            .next()
            .ok_or(CablingError::NoValidPorts { rack_id: origin_rack })?;
        let second = self
            .valid_pairs(dest_rack, &dest_free)?
            .into_iter()
            .next()
            .ok_or(CablingError::NoValidPorts { rack_id: dest_rack })?;

        tracing::debug!(
            "Hub panel path rack {} -> rack {} via {} and {}",
            origin_rack,
            dest_rack,
            first.remote.device_name,
            second.remote.device_name
        );

        Ok(ConnectionPlan {
            topology: Topology::Hub,
            segments: vec![
                Segment {
                    a: origin.clone(),
                    b: first.local,
                },
                Segment {
                    a: first.remote,
                    b: second.remote,
                },
                Segment {
                    a: dest.clone(),
                    b: second.local,
                },
            ],
        })
    }

    /// Keep the free front ports whose trunk is cabled and whose far-end front
    /// port at the same position is also free.
    pub fn valid_pairs(&self, rack_id: i64, free: &[Port]) -> Result<Vec<PanelPair>, CablingError> {
        let mut pairs = Vec::new();
        for port in free {
            let Some(rear) = self.repo.rear_port(port) else {
                continue;
            };
            // Trunk not cabled yet
            let Some(remote_rear) = self.repo.remote_counterpart(&rear) else {
                continue;
            };
            let position = port.rear_port_position.unwrap_or(1);
            let remote = self.repo.front_port_for_position(
                remote_rear.device_id,
                remote_rear.id,
                position,
            )?;
            if remote.is_free() {
                pairs.push(PanelPair {
                    local: port.clone(),
                    remote,
                });
            }
        }

        if pairs.is_empty() {
            return Err(CablingError::NoValidPorts { rack_id });
        }
        Ok(pairs)
    }
}
