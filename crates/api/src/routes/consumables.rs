//! Consumable catalog routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use labstock_core::catalog::{CatalogService, ConsumableDraft, ConsumableUpdate};
use labstock_db::{CatalogRepository, entities::consumables, repositories::CatalogFilter};
use labstock_shared::{PageRequest, PageResponse};

use crate::{AppState, error::ApiError, middleware::Actor};

/// Creates the catalog routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/consumables", get(list_consumables).post(create_consumable))
        .route("/consumables/categories", get(list_categories))
        .route(
            "/consumables/{id}",
            get(get_consumable)
                .put(update_consumable)
                .delete(delete_consumable),
        )
}

/// Query parameters for the catalog listing.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// A consumable with its low-stock flag.
#[derive(Debug, Serialize)]
pub struct ConsumableResponse {
    #[serde(flatten)]
    pub consumable: consumables::Model,
    pub low_stock: bool,
}

impl ConsumableResponse {
    fn new(consumable: consumables::Model, threshold: i32) -> Self {
        Self {
            low_stock: CatalogService::is_low_stock(consumable.quantity, threshold),
            consumable,
        }
    }
}

async fn list_consumables(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<PageResponse<ConsumableResponse>>, ApiError> {
    let repo = CatalogRepository::new((*state.db).clone());
    let page = PageRequest::from_query(
        query.page,
        query.per_page.unwrap_or(state.inventory.catalog_page_size),
    );
    let filter = CatalogFilter {
        search: query.search,
        category: query.category,
    };

    let threshold = state.inventory.low_stock_threshold;
    let found = repo.list(&filter, page).await?;
    Ok(Json(found.map(|c| ConsumableResponse::new(c, threshold))))
}

async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let repo = CatalogRepository::new((*state.db).clone());
    Ok(Json(repo.categories().await?))
}

async fn get_consumable(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ConsumableResponse>, ApiError> {
    let repo = CatalogRepository::new((*state.db).clone());
    let consumable = repo.get(id).await?;
    Ok(Json(ConsumableResponse::new(
        consumable,
        state.inventory.low_stock_threshold,
    )))
}

async fn create_consumable(
    State(state): State<AppState>,
    actor: Actor,
    Json(draft): Json<ConsumableDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let item = CatalogService::validate_draft(draft)?;
    let repo = CatalogRepository::new((*state.db).clone());
    let created = repo.create(item, actor.name()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ConsumableResponse::new(
            created,
            state.inventory.low_stock_threshold,
        )),
    ))
}

async fn update_consumable(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    Json(update): Json<ConsumableUpdate>,
) -> Result<Json<ConsumableResponse>, ApiError> {
    let update = CatalogService::validate_update(update)?;
    let repo = CatalogRepository::new((*state.db).clone());
    let updated = repo.update(id, update, actor.name()).await?;

    Ok(Json(ConsumableResponse::new(
        updated,
        state.inventory.low_stock_threshold,
    )))
}

async fn delete_consumable(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = CatalogRepository::new((*state.db).clone());
    repo.delete(id, actor.name()).await?;
    Ok(StatusCode::NO_CONTENT)
}
