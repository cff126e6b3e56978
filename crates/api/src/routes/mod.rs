//! API route definitions.
//!
//! Every administrative route, read or write, takes an
//! [`Actor`](crate::middleware::Actor) and answers 401 without one. Only the
//! staff-facing routes are open: health, catalog reads and placing an order.

use axum::Router;

use crate::AppState;

pub mod audit_logs;
pub mod borrows;
pub mod consumables;
pub mod dashboard;
pub mod exports;
pub mod health;
pub mod labs;
pub mod orders;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(consumables::routes())
        .merge(orders::routes())
        .merge(borrows::routes())
        .merge(labs::routes())
        .merge(audit_logs::routes())
        .merge(dashboard::routes())
        .merge(exports::routes())
}
