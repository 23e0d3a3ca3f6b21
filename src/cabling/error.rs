use thiserror::Error;

/// Failures of the jumper and trunk workflows. None of them are retried.
#[derive(Error, Debug)]
pub enum CablingError {
    #[error("No free modular panel ports found in rack {rack_id}")]
    NoFreePorts { rack_id: i64 },

    #[error("No valid modular ports found in rack {rack_id}")]
    NoValidPorts { rack_id: i64 },

    #[error("Port {port_id} is on a device that is not in a rack")]
    UnrackedPort { port_id: i64 },

    #[error("Inventory data integrity error: {0}")]
    DataIntegrity(String),

    #[error("Malformed trunk label: {0}")]
    MalformedTrunkLabel(String),

    #[error("No trunk identifiers left after {0}")]
    TrunkIdsExhausted(String),

    #[error("Cable segment {failed_segment} failed after creating cables {created:?}: {reason}")]
    PartialCreation {
        created: Vec<i64>,
        failed_segment: usize,
        reason: String,
    },

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl CablingError {
    /// True for errors caused by the current state of the plant rather than bad data
    pub fn is_plant_conflict(&self) -> bool {
        matches!(
            self,
            CablingError::NoFreePorts { .. }
                | CablingError::NoValidPorts { .. }
                | CablingError::UnrackedPort { .. }
        )
    }
}
