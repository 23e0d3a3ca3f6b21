use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{Pool, Sqlite};

use crate::models::*;

use super::row_helpers::map_port_row;

pub(super) const SELECT_PORT: &str = r#"
    SELECT p.id, p.device_id, p.name, p.kind, p.port_type, p.positions,
           p.rear_port_id, p.rear_port_position, p.cable_id,
           d.name AS device_name,
           d.rack_id AS rack_id
    FROM ports p
    JOIN devices d ON d.id = p.device_id
"#;

pub struct PortRepo;

impl PortRepo {
    pub async fn list_for_device(pool: &Pool<Sqlite>, device_id: i64) -> Result<Vec<Port>> {
        let rows = sqlx::query(&format!(
            "{} WHERE p.device_id = ? ORDER BY p.kind, p.id",
            SELECT_PORT
        ))
        .bind(device_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.iter().map(map_port_row).collect())
    }

    pub async fn get(pool: &Pool<Sqlite>, id: i64) -> Result<Option<Port>> {
        let row = sqlx::query(&format!("{} WHERE p.id = ?", SELECT_PORT))
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.as_ref().map(map_port_row))
    }

    pub async fn get_by_name(
        pool: &Pool<Sqlite>,
        device_id: i64,
        kind: PortKind,
        name: &str,
    ) -> Result<Option<Port>> {
        let row = sqlx::query(&format!(
            "{} WHERE p.device_id = ? AND p.kind = ? AND p.name = ?",
            SELECT_PORT
        ))
        .bind(device_id)
        .bind(kind.as_str())
        .bind(name)
        .fetch_optional(pool)
        .await?;
        Ok(row.as_ref().map(map_port_row))
    }

    pub async fn create(pool: &Pool<Sqlite>, req: &CreatePortRequest) -> Result<Port> {
        let now = Utc::now();
        let id = sqlx::query(
            r#"
            INSERT INTO ports (device_id, name, kind, port_type, positions, rear_port_id, rear_port_position,
                created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(req.device_id)
        .bind(&req.name)
        .bind(req.kind.as_str())
        .bind(&req.port_type)
        .bind(req.positions)
        .bind(req.rear_port_id)
        .bind(req.rear_port_position)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?
        .last_insert_rowid();
        Self::get(pool, id).await?.context("Port not found after creation")
    }
}
