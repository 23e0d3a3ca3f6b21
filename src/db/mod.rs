mod cables;
mod devices;
#[cfg(test)]
pub(crate) mod fixtures;
mod plant;
mod ports;
mod racks;
pub(crate) mod row_helpers;
mod sites;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};

use crate::cabling::{CableWriter, PanelScope, PlantSnapshot};
use crate::models::*;

/// Typed error for "resource not found", downcast by the API error handler.
#[derive(Debug)]
pub struct NotFoundError {
    pub resource: String,
    pub id: String,
}

impl NotFoundError {
    pub fn new(resource: &str, id: &str) -> Self {
        Self {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }
}

impl std::fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} not found: {}", self.resource, self.id)
    }
}

impl std::error::Error for NotFoundError {}

/// Typed error for a cable landing on a port that already has one
#[derive(Debug)]
pub struct PortInUseError {
    pub port_id: i64,
}

impl std::fmt::Display for PortInUseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Port {} is already cabled", self.port_id)
    }
}

impl std::error::Error for PortInUseError {}

/// Store handles all database operations, delegating to per-entity repo modules.
#[derive(Clone)]
pub struct Store {
    pool: Pool<Sqlite>,
}

impl Store {
    /// Create a new database store with a specific pool size
    pub async fn with_pool_size(db_path: &str, max_connections: u32) -> Result<Self> {
        let db_url = format!("sqlite:{}?mode=rwc", db_path);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(&db_url)
            .await
            .context("Failed to connect to database")?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Private in-memory database for tests
    #[cfg(test)]
    pub async fn in_memory() -> Result<Self> {
        Self::with_pool_size(":memory:", 1).await
    }

    /// Run database migrations
    async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    // ========== Site Operations ==========

    pub async fn list_sites(&self) -> Result<Vec<Site>> {
        sites::SiteRepo::list(&self.pool).await
    }

    pub async fn create_site(&self, req: &CreateSiteRequest) -> Result<Site> {
        sites::SiteRepo::create(&self.pool, req).await
    }

    // ========== Rack Operations ==========

    pub async fn list_racks(&self) -> Result<Vec<Rack>> {
        racks::RackRepo::list(&self.pool).await
    }

    pub async fn get_rack(&self, id: i64) -> Result<Option<Rack>> {
        racks::RackRepo::get(&self.pool, id).await
    }

    pub async fn create_rack(&self, req: &CreateRackRequest) -> Result<Rack> {
        racks::RackRepo::create(&self.pool, req).await
    }

    // ========== Device Operations ==========

    pub async fn list_devices(&self) -> Result<Vec<Device>> {
        devices::DeviceRepo::list(&self.pool).await
    }

    pub async fn get_device(&self, id: i64) -> Result<Option<Device>> {
        devices::DeviceRepo::get(&self.pool, id).await
    }

    pub async fn create_device(&self, req: &CreateDeviceRequest) -> Result<Device> {
        devices::DeviceRepo::create(&self.pool, req).await
    }

    pub async fn pair_panels(&self, panel_a: i64, panel_b: i64) -> Result<()> {
        devices::DeviceRepo::pair_panels(&self.pool, panel_a, panel_b).await
    }

    // ========== Port Operations ==========

    pub async fn list_ports(&self, device_id: i64) -> Result<Vec<Port>> {
        ports::PortRepo::list_for_device(&self.pool, device_id).await
    }

    pub async fn get_port(&self, id: i64) -> Result<Option<Port>> {
        ports::PortRepo::get(&self.pool, id).await
    }

    pub async fn get_port_by_name(&self, device_id: i64, kind: PortKind, name: &str) -> Result<Option<Port>> {
        ports::PortRepo::get_by_name(&self.pool, device_id, kind, name).await
    }

    pub async fn create_port(&self, req: &CreatePortRequest) -> Result<Port> {
        ports::PortRepo::create(&self.pool, req).await
    }

    // ========== Cable Operations ==========

    pub async fn list_cables(&self) -> Result<Vec<Cable>> {
        cables::CableRepo::list(&self.pool).await
    }

    // ========== Plant Operations ==========

    /// Snapshot the panel plant of the sites holding the given racks
    pub async fn load_plant(&self, scope: &PanelScope, rack_ids: &[i64]) -> Result<PlantSnapshot> {
        plant::PlantRepo::load(&self.pool, scope, rack_ids).await
    }
}

#[async_trait]
impl CableWriter for Store {
    async fn create_cable(&self, req: &NewCable) -> Result<Cable> {
        cables::CableRepo::create(&self.pool, req).await
    }

    async fn list_tagged_labels(&self, tag: &str) -> Result<Vec<String>> {
        cables::CableRepo::list_tagged_labels(&self.pool, tag).await
    }

    async fn describe_port(&self, port_id: i64) -> Result<PortLocation> {
        cables::CableRepo::describe_port(&self.pool, port_id).await
    }
}
