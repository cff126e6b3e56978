//! Borrow and return routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use labstock_core::stock::{BorrowRequest, ReturnRequest, StockChange};
use labstock_db::{
    BorrowRepository, LedgerRepository,
    entities::{audit_logs, borrows, returns},
    repositories::BorrowView,
};
use labstock_shared::AppError;

use crate::{AppState, error::ApiError, middleware::Actor};

/// Creates the borrow routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/borrows", get(list_borrows).post(record_borrow))
        .route("/borrows/{id}/return", post(record_return))
}

/// Query parameters for the borrow listing.
#[derive(Debug, Deserialize)]
pub struct BorrowQuery {
    pub consumable_id: Option<Uuid>,
    /// `open`, `returned` or `all`.
    pub status: Option<String>,
}

/// Body of a return.
#[derive(Debug, Deserialize)]
pub struct ReturnBody {
    pub returned_quantity: i32,
    pub damaged_quantity: i32,
}

/// Response to a borrow.
#[derive(Debug, Serialize)]
pub struct BorrowResponse {
    pub borrow: borrows::Model,
    pub change: StockChange,
    pub audit: audit_logs::Model,
}

/// Response to a return.
#[derive(Debug, Serialize)]
pub struct ReturnResponse {
    #[serde(rename = "return")]
    pub record: returns::Model,
    pub change: StockChange,
    pub audit: audit_logs::Model,
}

fn parse_open_filter(raw: Option<&str>) -> Result<Option<bool>, AppError> {
    match raw.map(|s| s.trim().to_lowercase()).as_deref() {
        None | Some("" | "all") => Ok(None),
        Some("open") => Ok(Some(true)),
        Some("returned") => Ok(Some(false)),
        Some(other) => Err(AppError::Validation(format!(
            "Unknown borrow status: {other}"
        ))),
    }
}

async fn list_borrows(
    State(state): State<AppState>,
    _actor: Actor,
    Query(query): Query<BorrowQuery>,
) -> Result<Json<Vec<BorrowView>>, ApiError> {
    let open = parse_open_filter(query.status.as_deref())?;
    let repo = BorrowRepository::new((*state.db).clone());
    Ok(Json(repo.list(query.consumable_id, open).await?))
}

async fn record_borrow(
    State(state): State<AppState>,
    actor: Actor,
    Json(request): Json<BorrowRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = LedgerRepository::new((*state.db).clone());
    let outcome = repo.record_borrow(&request, actor.name()).await?;

    Ok((
        StatusCode::CREATED,
        Json(BorrowResponse {
            borrow: outcome.borrow,
            change: outcome.change,
            audit: outcome.audit,
        }),
    ))
}

async fn record_return(
    State(state): State<AppState>,
    actor: Actor,
    Path(borrow_id): Path<Uuid>,
    Json(body): Json<ReturnBody>,
) -> Result<impl IntoResponse, ApiError> {
    let request = ReturnRequest {
        borrow_id,
        returned_quantity: body.returned_quantity,
        damaged_quantity: body.damaged_quantity,
    };
    let repo = LedgerRepository::new((*state.db).clone());
    let outcome = repo.record_return(&request, actor.name()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ReturnResponse {
            record: outcome.record,
            change: outcome.change,
            audit: outcome.audit,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_filter() {
        assert_eq!(parse_open_filter(None).unwrap(), None);
        assert_eq!(parse_open_filter(Some("Open")).unwrap(), Some(true));
        assert_eq!(parse_open_filter(Some("returned")).unwrap(), Some(false));
        assert!(parse_open_filter(Some("lost")).is_err());
    }
}
