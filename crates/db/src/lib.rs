//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Database migrations
//! - The transactional executor for the stock ledger

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{
    AuditRepository, BorrowRepository, CatalogRepository, DashboardRepository, ExportRepository,
    LabRepository, LedgerRepository, RequisitionRepository,
};

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

use labstock_shared::config::DatabaseConfig;

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// Connects with the pool settings from configuration.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_with(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .sqlx_logging(false);
    Database::connect(options).await
}
