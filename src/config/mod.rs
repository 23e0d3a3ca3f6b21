use std::env;

use crate::cabling::PanelScope;

/// Config holds all application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub db_max_connections: u32,
    pub listen_addr: String,
    pub panel_role: String,
    pub trunk_tag: String,
    pub front_port_type: String,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn load() -> Self {
        Self {
            db_path: get_env("DB_PATH", "/data/panel-router.db"),
            db_max_connections: get_env("DB_MAX_CONNECTIONS", "5")
                .parse()
                .unwrap_or(5),
            listen_addr: get_env("LISTEN_ADDR", "0.0.0.0:8080"),
            panel_role: get_env("PANEL_ROLE", "modular-panels"),
            trunk_tag: get_env("TRUNK_TAG", "modular-trunk"),
            front_port_type: get_env("FRONT_PORT_TYPE", ""),
        }
    }

    /// Panel lookups handed to the port repository and cable materializer
    pub fn panel_scope(&self) -> PanelScope {
        PanelScope {
            panel_role: self.panel_role.clone(),
            trunk_tag: self.trunk_tag.clone(),
            front_port_type: Some(self.front_port_type.clone()).filter(|t| !t.is_empty()),
        }
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
