use crate::models::{Cable, PortLocation};

use super::CablingError;

const FIRST_TRUNK_ID: &str = "C0001";
const TRUNK_ID_DIGITS: usize = 4;
const LAST_TRUNK_NUMBER: u32 = 9999;

/// Next trunk identifier after the highest one already in use.
///
/// Only the last `--` segment of each label is considered. The highest is
/// picked by string order, so identifiers are `C` plus exactly four digits
/// and the series ends at `C9999`.
pub fn next_trunk_label<S: AsRef<str>>(labels: &[S]) -> Result<String, CablingError> {
    let Some(last) = labels
        .iter()
        .map(|l| l.as_ref().rsplit("--").next().unwrap_or_default())
        .max()
    else {
        return Ok(FIRST_TRUNK_ID.to_string());
    };

    let number: u32 = last
        .strip_prefix('C')
        .filter(|n| n.len() == TRUNK_ID_DIGITS && n.chars().all(|c| c.is_ascii_digit()))
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| CablingError::MalformedTrunkLabel(last.to_string()))?;
    if number >= LAST_TRUNK_NUMBER {
        return Err(CablingError::TrunkIdsExhausted(last.to_string()));
    }

    Ok(format!("C{:04}", number + 1))
}

/// Full label of a modular trunk between two panels
pub fn trunk_label(panel_a: &str, panel_b: &str, trunk_id: &str) -> String {
    format!("COM--{}--{}--{}", panel_a, panel_b, trunk_id)
}

/// Operator-facing summary of a created cable
pub fn cable_log(cable: &Cable, a: &PortLocation, z: &PortLocation) -> String {
    format!(
        "Created Cable\n\
         **Site**: `{}`\n\
         **A Rack**: `{}`\n\
         **A Device**: `{}`\n\
         **A Port**: `{}`\n\
         **Label**: `{}`\n\
         **Z Rack**: `{}`\n\
         **Z Device**: `{}`\n\
         **Z Port**: `{}`\n",
        a.site, a.rack, a.device, a.port, cable.label, z.rack, z.device, z.port
    )
}
