//! CSV export downloads.

use axum::{
    Router,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use tracing::info;

use labstock_core::export::{self, CsvExport};
use labstock_db::{AuditRepository, ExportRepository};

use crate::{AppState, error::ApiError, middleware::Actor};

/// Creates the export routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/exports/orders", get(export_orders))
        .route("/exports/inventory", get(export_inventory))
}

async fn export_orders(
    State(state): State<AppState>,
    actor: Actor,
) -> Result<Response, ApiError> {
    let rows = ExportRepository::new((*state.db).clone())
        .order_rows()
        .await?;
    let csv = export::orders_csv(&rows, actor.name(), Utc::now())?;
    send(&state, csv).await
}

async fn export_inventory(
    State(state): State<AppState>,
    actor: Actor,
) -> Result<Response, ApiError> {
    let rows = ExportRepository::new((*state.db).clone())
        .inventory_rows()
        .await?;
    let csv = export::inventory_csv(&rows, actor.name(), Utc::now())?;
    send(&state, csv).await
}

/// Records the export in the audit log, then returns the file.
async fn send(state: &AppState, csv: CsvExport) -> Result<Response, ApiError> {
    AuditRepository::new((*state.db).clone())
        .record(&csv.audit)
        .await?;
    info!(file = %csv.filename, rows = csv.rows, "export generated");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", csv.filename),
            ),
        ],
        csv.body,
    )
        .into_response())
}
