//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Inventory behaviour configuration.
    #[serde(default)]
    pub inventory: InventoryConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Inventory configuration: thresholds and page sizes.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct InventoryConfig {
    /// Consumables with stock strictly below this count are "low stock".
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i32,
    /// Catalog page size.
    #[serde(default = "default_catalog_page_size")]
    pub catalog_page_size: u32,
    /// Audit log page size.
    #[serde(default = "default_audit_page_size")]
    pub audit_page_size: u32,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: default_low_stock_threshold(),
            catalog_page_size: default_catalog_page_size(),
            audit_page_size: default_audit_page_size(),
        }
    }
}

fn default_low_stock_threshold() -> i32 {
    10
}

fn default_catalog_page_size() -> u32 {
    12
}

fn default_audit_page_size() -> u32 {
    50
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, lowest precedence first: `config/default`, `config/{RUN_MODE}`,
    /// then `LABSTOCK__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("LABSTOCK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
