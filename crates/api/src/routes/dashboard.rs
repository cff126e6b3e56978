//! Dashboard route.

use axum::{Json, Router, extract::State, routing::get};

use labstock_db::{DashboardRepository, repositories::DashboardStats};

use crate::{AppState, error::ApiError, middleware::Actor};

/// Creates the dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}

async fn get_dashboard(
    State(state): State<AppState>,
    _actor: Actor,
) -> Result<Json<DashboardStats>, ApiError> {
    let repo = DashboardRepository::new((*state.db).clone());
    Ok(Json(
        repo.stats(state.inventory.low_stock_threshold).await?,
    ))
}
