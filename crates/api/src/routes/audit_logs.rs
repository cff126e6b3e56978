//! Audit log viewer.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;

use labstock_db::{AuditRepository, entities::audit_logs};
use labstock_shared::{PageRequest, PageResponse};

use crate::{AppState, error::ApiError, middleware::Actor};

/// Creates the audit log routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/audit-logs", get(list_audit_logs))
}

/// Query parameters for the audit log.
#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    pub page: Option<u32>,
}

async fn list_audit_logs(
    State(state): State<AppState>,
    _actor: Actor,
    Query(query): Query<AuditQuery>,
) -> Result<Json<PageResponse<audit_logs::Model>>, ApiError> {
    let page = PageRequest::from_query(query.page, state.inventory.audit_page_size);
    let repo = AuditRepository::new((*state.db).clone());
    Ok(Json(repo.list(page).await?))
}
