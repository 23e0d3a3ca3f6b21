use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{Pool, Sqlite};

use crate::models::*;

use super::row_helpers::map_rack_row;

pub struct RackRepo;

impl RackRepo {
    pub async fn list(pool: &Pool<Sqlite>) -> Result<Vec<Rack>> {
        let rows = sqlx::query("SELECT * FROM racks ORDER BY site_id, name")
            .fetch_all(pool)
            .await?;
        Ok(rows.iter().map(map_rack_row).collect())
    }

    pub async fn get(pool: &Pool<Sqlite>, id: i64) -> Result<Option<Rack>> {
        let row = sqlx::query("SELECT * FROM racks WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.as_ref().map(map_rack_row))
    }

    pub async fn create(pool: &Pool<Sqlite>, req: &CreateRackRequest) -> Result<Rack> {
        let now = Utc::now();
        let id = sqlx::query(
            "INSERT INTO racks (site_id, name, is_hub, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(req.site_id)
        .bind(&req.name)
        .bind(req.is_hub as i32)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?
        .last_insert_rowid();
        Self::get(pool, id).await?.context("Rack not found after creation")
    }
}
