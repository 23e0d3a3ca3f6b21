use std::collections::HashSet;

use anyhow::Result;
use sqlx::{Pool, Sqlite};

use crate::cabling::{PanelScope, PlantSnapshot};
use crate::models::Port;

use super::ports::SELECT_PORT;
use super::row_helpers::map_port_row;

pub struct PlantRepo;

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

impl PlantRepo {
    /// Load the panel plant seen from `rack_ids`: every port and panel of the
    /// sites holding those racks, the rear-to-rear trunks touching them, and
    /// every port of the devices at the far end of those trunks wherever they sit.
    pub async fn load(pool: &Pool<Sqlite>, scope: &PanelScope, rack_ids: &[i64]) -> Result<PlantSnapshot> {
        // SQLite rejects an empty IN ()
        let racks: Vec<i64> = if rack_ids.is_empty() { vec![0] } else { rack_ids.to_vec() };
        let sites = format!("SELECT site_id FROM racks WHERE id IN ({})", placeholders(racks.len()));

        let sql = format!("{} WHERE d.site_id IN ({}) ORDER BY p.id", SELECT_PORT, sites);
        let mut query = sqlx::query(&sql);
        for id in &racks {
            query = query.bind(*id);
        }
        let mut ports: Vec<Port> = query.fetch_all(pool).await?.iter().map(map_port_row).collect();

        let sql = format!(
            r#"
            SELECT c.a_port_id, c.b_port_id
            FROM cables c
            JOIN ports pa ON pa.id = c.a_port_id
            JOIN devices da ON da.id = pa.device_id
            JOIN ports pb ON pb.id = c.b_port_id
            JOIN devices db ON db.id = pb.device_id
            WHERE pa.kind = 'rear' AND pb.kind = 'rear'
              AND (da.site_id IN ({sites}) OR db.site_id IN ({sites}))
            ORDER BY c.id
            "#
        );
        let mut query = sqlx::query_as::<_, (i64, i64)>(&sql);
        for id in racks.iter().chain(&racks) {
            query = query.bind(*id);
        }
        let trunks = query.fetch_all(pool).await?;

        // Far ends of trunks that leave the local sites
        let local: HashSet<i64> = ports.iter().map(|p| p.id).collect();
        let far_ends: Vec<i64> = trunks
            .iter()
            .flat_map(|&(a, b)| [a, b])
            .filter(|id| !local.contains(id))
            .collect();
        if !far_ends.is_empty() {
            let sql = format!(
                "{} WHERE p.device_id IN (SELECT device_id FROM ports WHERE id IN ({})) AND d.site_id NOT IN ({}) ORDER BY p.id",
                SELECT_PORT,
                placeholders(far_ends.len()),
                sites
            );
            let mut query = sqlx::query(&sql);
            for id in far_ends.iter().chain(&racks) {
                query = query.bind(*id);
            }
            ports.extend(query.fetch_all(pool).await?.iter().map(map_port_row));
        }

        let sql = format!("SELECT id FROM devices WHERE role = ? AND site_id IN ({})", sites);
        let mut query = sqlx::query_as::<_, (i64,)>(&sql).bind(&scope.panel_role);
        for id in &racks {
            query = query.bind(*id);
        }
        let panels: HashSet<i64> = query.fetch_all(pool).await?.into_iter().map(|(id,)| id).collect();

        tracing::debug!(
            "Loaded plant for racks {:?}: {} ports ({} remote ends), {} panels, {} trunks",
            rack_ids,
            ports.len(),
            far_ends.len(),
            panels.len(),
            trunks.len()
        );

        Ok(PlantSnapshot::new(scope.clone(), ports, panels, trunks))
    }
}
