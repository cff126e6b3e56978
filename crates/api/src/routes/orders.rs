//! Requisition order routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use labstock_core::requisition::{NewOrder, OrderStatus};
use labstock_core::stock::StockChange;
use labstock_db::{
    LedgerRepository, RequisitionRepository,
    entities::{audit_logs, orders},
    repositories::{OrderDetail, OrderFilter, OrderSummary},
};
use labstock_shared::AppError;

use crate::{AppState, error::ApiError, middleware::Actor};

/// Creates the order routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders).post(place_order))
        .route("/orders/{id}", get(get_order))
        .route("/orders/{id}/approve", post(approve_order))
        .route("/orders/{id}/reject", post(reject_order))
}

/// Query parameters for the order listing.
#[derive(Debug, Deserialize)]
pub struct OrderQuery {
    pub status: Option<String>,
    pub search: Option<String>,
}

/// Response to an approval or rejection.
#[derive(Debug, Serialize)]
pub struct DecisionResponse {
    pub order: orders::Model,
    /// Stock changes applied; empty for a rejection.
    pub changes: Vec<StockChange>,
    pub audit: audit_logs::Model,
}

/// Parses an optional status filter; blank or `all` means no filter.
fn parse_status_filter(raw: Option<&str>) -> Result<Option<OrderStatus>, AppError> {
    match raw.map(str::trim) {
        None | Some("" | "all") => Ok(None),
        Some(s) => OrderStatus::parse(s)
            .map(Some)
            .ok_or_else(|| AppError::Validation(format!("Unknown order status: {s}"))),
    }
}

async fn list_orders(
    State(state): State<AppState>,
    _actor: Actor,
    Query(query): Query<OrderQuery>,
) -> Result<Json<Vec<OrderSummary>>, ApiError> {
    let status = parse_status_filter(query.status.as_deref())?;
    let filter = OrderFilter {
        status: status.map(Into::into),
        search: query.search,
    };

    let repo = RequisitionRepository::new((*state.db).clone());
    Ok(Json(repo.list_orders(&filter).await?))
}

async fn get_order(
    State(state): State<AppState>,
    _actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderDetail>, ApiError> {
    let repo = RequisitionRepository::new((*state.db).clone());
    Ok(Json(repo.get_order(id).await?))
}

async fn place_order(
    State(state): State<AppState>,
    Json(order): Json<NewOrder>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = RequisitionRepository::new((*state.db).clone());
    let placed = repo.place_order(order).await?;
    Ok((StatusCode::CREATED, Json(placed)))
}

async fn approve_order(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<Json<DecisionResponse>, ApiError> {
    let repo = LedgerRepository::new((*state.db).clone());
    let outcome = repo.approve_order(id, actor.name()).await?;

    Ok(Json(DecisionResponse {
        order: outcome.order,
        changes: outcome.changes,
        audit: outcome.audit,
    }))
}

async fn reject_order(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<Json<DecisionResponse>, ApiError> {
    let repo = LedgerRepository::new((*state.db).clone());
    let outcome = repo.reject_order(id, actor.name()).await?;

    Ok(Json(DecisionResponse {
        order: outcome.order,
        changes: Vec::new(),
        audit: outcome.audit,
    }))
}
