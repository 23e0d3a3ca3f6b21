use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{Pool, Sqlite};

use crate::models::*;

use super::row_helpers::map_device_row;

pub struct DeviceRepo;

impl DeviceRepo {
    pub async fn list(pool: &Pool<Sqlite>) -> Result<Vec<Device>> {
        let rows = sqlx::query("SELECT * FROM devices ORDER BY name")
            .fetch_all(pool)
            .await?;
        Ok(rows.iter().map(map_device_row).collect())
    }

    pub async fn get(pool: &Pool<Sqlite>, id: i64) -> Result<Option<Device>> {
        let row = sqlx::query("SELECT * FROM devices WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.as_ref().map(map_device_row))
    }

    pub async fn create(pool: &Pool<Sqlite>, req: &CreateDeviceRequest) -> Result<Device> {
        let now = Utc::now();
        let id = sqlx::query(
            "INSERT INTO devices (site_id, rack_id, name, role, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(req.site_id)
        .bind(req.rack_id)
        .bind(&req.name)
        .bind(&req.role)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?
        .last_insert_rowid();
        Self::get(pool, id).await?.context("Device not found after creation")
    }

    /// Point two panels at each other as remote panels
    pub async fn pair_panels(pool: &Pool<Sqlite>, panel_a: i64, panel_b: i64) -> Result<()> {
        let now = Utc::now();
        let mut tx = pool.begin().await?;
        for (id, remote) in [(panel_a, panel_b), (panel_b, panel_a)] {
            let result = sqlx::query("UPDATE devices SET remote_panel_id = ?, updated_at = ? WHERE id = ?")
                .bind(remote)
                .bind(now)
                .bind(id)
                .execute(&mut *tx)
                .await?;
            if result.rows_affected() == 0 {
                return Err(super::NotFoundError::new("Device", &id.to_string()).into());
            }
        }
        tx.commit().await?;
        Ok(())
    }
}
