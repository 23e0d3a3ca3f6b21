use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{Pool, Sqlite};

use crate::models::*;

use super::row_helpers::map_site_row;

pub struct SiteRepo;

impl SiteRepo {
    pub async fn list(pool: &Pool<Sqlite>) -> Result<Vec<Site>> {
        let rows = sqlx::query("SELECT * FROM sites ORDER BY name")
            .fetch_all(pool)
            .await?;
        Ok(rows.iter().map(map_site_row).collect())
    }

    pub async fn get(pool: &Pool<Sqlite>, id: i64) -> Result<Option<Site>> {
        let row = sqlx::query("SELECT * FROM sites WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.as_ref().map(map_site_row))
    }

    pub async fn create(pool: &Pool<Sqlite>, req: &CreateSiteRequest) -> Result<Site> {
        let now = Utc::now();
        let id = sqlx::query("INSERT INTO sites (name, slug, created_at, updated_at) VALUES (?, ?, ?, ?)")
            .bind(&req.name)
            .bind(&req.slug)
            .bind(now)
            .bind(now)
            .execute(pool)
            .await?
            .last_insert_rowid();
        Self::get(pool, id).await?.context("Site not found after creation")
    }
}
