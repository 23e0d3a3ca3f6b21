use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{Pool, Row, Sqlite};

use crate::models::*;

use super::row_helpers::map_cable_row;
use super::{NotFoundError, PortInUseError};

const SELECT_CABLE: &str = r#"
    SELECT c.id, c.a_port_id, c.b_port_id, c.label, c.status, c.cable_type,
           c.length, c.length_unit, c.created_at,
           COALESCE((SELECT GROUP_CONCAT(t.tag, ',') FROM cable_tags t WHERE t.cable_id = c.id), '') AS tags
    FROM cables c
"#;

pub struct CableRepo;

impl CableRepo {
    pub async fn list(pool: &Pool<Sqlite>) -> Result<Vec<Cable>> {
        let rows = sqlx::query(&format!("{} ORDER BY c.id", SELECT_CABLE))
            .fetch_all(pool)
            .await?;
        Ok(rows.iter().map(map_cable_row).collect())
    }

    pub async fn get(pool: &Pool<Sqlite>, id: i64) -> Result<Option<Cable>> {
        let row = sqlx::query(&format!("{} WHERE c.id = ?", SELECT_CABLE))
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.as_ref().map(map_cable_row))
    }

    /// Insert a cable and claim both ports in one transaction
    pub async fn create(pool: &Pool<Sqlite>, req: &NewCable) -> Result<Cable> {
        if req.a_port_id == req.b_port_id {
            anyhow::bail!("Cannot cable port {} to itself", req.a_port_id);
        }

        let now = Utc::now();
        let mut tx = pool.begin().await?;

        for port_id in [req.a_port_id, req.b_port_id] {
            let row: Option<(Option<i64>,)> = sqlx::query_as("SELECT cable_id FROM ports WHERE id = ?")
                .bind(port_id)
                .fetch_optional(&mut *tx)
                .await?;
            match row {
                None => return Err(NotFoundError::new("Port", &port_id.to_string()).into()),
                Some((Some(_),)) => return Err(PortInUseError { port_id }.into()),
                Some((None,)) => {}
            }
        }

        let id = sqlx::query(
            r#"
            INSERT INTO cables (a_port_id, b_port_id, label, status, cable_type, length, length_unit, created_at)
            VALUES (?, ?, ?, ?, ?, ?, 'm', ?)
            "#,
        )
        .bind(req.a_port_id)
        .bind(req.b_port_id)
        .bind(&req.label)
        .bind(&req.status)
        .bind(&req.cable_type)
        .bind(req.length)
        .bind(now)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        for port_id in [req.a_port_id, req.b_port_id] {
            let result = sqlx::query(
                "UPDATE ports SET cable_id = ?, updated_at = ? WHERE id = ? AND cable_id IS NULL",
            )
            .bind(id)
            .bind(now)
            .bind(port_id)
            .execute(&mut *tx)
            .await?;
            if result.rows_affected() == 0 {
                return Err(PortInUseError { port_id }.into());
            }
        }

        for tag in &req.tags {
            sqlx::query("INSERT OR IGNORE INTO cable_tags (cable_id, tag) VALUES (?, ?)")
                .bind(id)
                .bind(tag)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Self::get(pool, id).await?.context("Cable not found after creation")
    }

    pub async fn list_tagged_labels(pool: &Pool<Sqlite>, tag: &str) -> Result<Vec<String>> {
        let rows = sqlx::query(
            "SELECT c.label FROM cables c JOIN cable_tags t ON t.cable_id = c.id WHERE t.tag = ? ORDER BY c.id",
        )
        .bind(tag)
        .fetch_all(pool)
        .await?;
        Ok(rows.iter().map(|r| r.get("label")).collect())
    }

    pub async fn describe_port(pool: &Pool<Sqlite>, port_id: i64) -> Result<PortLocation> {
        let row = sqlx::query(
            r#"
            SELECT p.name AS port, d.name AS device, COALESCE(r.name, '') AS rack, s.name AS site
            FROM ports p
            JOIN devices d ON d.id = p.device_id
            JOIN sites s ON s.id = d.site_id
            LEFT JOIN racks r ON r.id = d.rack_id
            WHERE p.id = ?
            "#,
        )
        .bind(port_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| NotFoundError::new("Port", &port_id.to_string()))?;

        Ok(PortLocation {
            site: row.get("site"),
            rack: row.get("rack"),
            device: row.get("device"),
            port: row.get("port"),
        })
    }
}
