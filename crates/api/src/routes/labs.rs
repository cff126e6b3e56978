//! Laboratory and asset routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use uuid::Uuid;

use labstock_core::lab::{AssetDraft, AssetStatus, LabDraft, LabService};
use labstock_db::{
    LabRepository,
    entities::{lab_assets, laboratories},
    repositories::LabSummary,
};
use labstock_shared::AppError;

use crate::{AppState, error::ApiError, middleware::Actor};

/// Creates the laboratory routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/labs", get(list_labs).post(create_lab))
        .route("/labs/{id}", get(get_lab).put(update_lab).delete(delete_lab))
        .route("/labs/{id}/assets", get(list_assets).post(add_asset))
}

/// Query parameters for the asset listing.
#[derive(Debug, Deserialize)]
pub struct AssetQuery {
    pub status: Option<String>,
}

async fn list_labs(
    State(state): State<AppState>,
    _actor: Actor,
) -> Result<Json<Vec<LabSummary>>, ApiError> {
    let repo = LabRepository::new((*state.db).clone());
    Ok(Json(repo.list().await?))
}

async fn get_lab(
    State(state): State<AppState>,
    _actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<Json<laboratories::Model>, ApiError> {
    let repo = LabRepository::new((*state.db).clone());
    Ok(Json(repo.get(id).await?))
}

async fn create_lab(
    State(state): State<AppState>,
    actor: Actor,
    Json(draft): Json<LabDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let lab = LabService::validate_lab(draft)?;
    let repo = LabRepository::new((*state.db).clone());
    let created = repo.create(lab, actor.name()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_lab(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    Json(draft): Json<LabDraft>,
) -> Result<Json<laboratories::Model>, ApiError> {
    let lab = LabService::validate_lab(draft)?;
    let repo = LabRepository::new((*state.db).clone());
    Ok(Json(repo.update(id, lab, actor.name()).await?))
}

async fn delete_lab(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = LabRepository::new((*state.db).clone());
    repo.delete(id, actor.name()).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_assets(
    State(state): State<AppState>,
    _actor: Actor,
    Path(id): Path<Uuid>,
    Query(query): Query<AssetQuery>,
) -> Result<Json<Vec<lab_assets::Model>>, ApiError> {
    let status = match query.status.as_deref().map(str::trim) {
        None | Some("" | "all") => None,
        Some(raw) => Some(AssetStatus::parse(raw).ok_or_else(|| {
            AppError::Validation(format!("Unknown asset status: {raw}"))
        })?),
    };

    let repo = LabRepository::new((*state.db).clone());
    Ok(Json(repo.assets(id, status.map(Into::into)).await?))
}

async fn add_asset(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    Json(draft): Json<AssetDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let asset = LabService::validate_asset(draft)?;
    let repo = LabRepository::new((*state.db).clone());
    let created = repo.add_asset(id, asset, actor.name()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
