//! Consumable catalog repository.
//!
//! Edits here never write `quantity` or `damaged` after creation.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use sea_orm::sea_query::JoinType;
use uuid::Uuid;

use labstock_core::catalog::{CatalogError, CatalogService, ValidConsumable, ValidUpdate};
use labstock_shared::{PageRequest, PageResponse};

use crate::entities::{
    borrows, consumables, order_items, orders, returns, sea_orm_active_enums::OrderStatus,
};

use super::audit::insert_event;
use super::search::any_contains;

/// Filter for catalog listings.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    /// Substring of name or description.
    pub search: Option<String>,
    /// Exact category.
    pub category: Option<String>,
}

/// Consumable catalog repository.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    db: DatabaseConnection,
}

impl CatalogRepository {
    /// Creates a new catalog repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists consumables by name.
    pub async fn list(
        &self,
        filter: &CatalogFilter,
        page: PageRequest,
    ) -> Result<PageResponse<consumables::Model>, CatalogError> {
        let mut query = consumables::Entity::find();

        if let Some(cond) = any_contains(
            &[consumables::Column::Name, consumables::Column::Description],
            filter.search.as_deref(),
        ) {
            query = query.filter(cond);
        }
        if let Some(category) = filter.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            query = query.filter(consumables::Column::Category.eq(category));
        }

        let total = query
            .clone()
            .count(&self.db)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let data = query
            .order_by_asc(consumables::Column::Name)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    /// Distinct categories, sorted.
    pub async fn categories(&self) -> Result<Vec<String>, CatalogError> {
        consumables::Entity::find()
            .select_only()
            .column(consumables::Column::Category)
            .distinct()
            .order_by_asc(consumables::Column::Category)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))
    }

    /// Loads one consumable.
    pub async fn get(&self, id: Uuid) -> Result<consumables::Model, CatalogError> {
        consumables::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?
            .ok_or(CatalogError::NotFound(id))
    }

    /// Adds a consumable with its initial stock.
    pub async fn create(
        &self,
        item: ValidConsumable,
        actor: &str,
    ) -> Result<consumables::Model, CatalogError> {
        let event = CatalogService::added_event(actor, &item);
        let now = Utc::now();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let created = consumables::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(item.name),
            description: Set(item.description),
            category: Set(item.category),
            quantity: Set(item.quantity),
            damaged: Set(0),
            returnable: Set(item.returnable),
            image_url: Set(item.image_url),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&txn)
        .await
        .map_err(|e| CatalogError::Database(e.to_string()))?;

        insert_event(&txn, &event)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        tracing::info!(consumable_id = %created.id, quantity = created.quantity, "consumable added");
        Ok(created)
    }

    /// Updates descriptive fields and the returnable flag.
    pub async fn update(
        &self,
        id: Uuid,
        update: ValidUpdate,
        actor: &str,
    ) -> Result<consumables::Model, CatalogError> {
        let event = CatalogService::edited_event(actor, id, &update);

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let existing = consumables::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?
            .ok_or(CatalogError::NotFound(id))?;

        let mut active: consumables::ActiveModel = existing.into();
        active.name = Set(update.name);
        active.description = Set(update.description);
        active.category = Set(update.category);
        active.returnable = Set(update.returnable);
        active.image_url = Set(update.image_url);
        active.updated_at = Set(Utc::now().into());

        let updated = active
            .update(&txn)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        insert_event(&txn, &event)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        Ok(updated)
    }

    /// Deletes a consumable.
    ///
    /// # Errors
    ///
    /// Returns `HasOpenBorrows` while any borrow of it has no return, and
    /// `InPendingOrders` while a pending order still has a line for it.
    pub async fn delete(&self, id: Uuid, actor: &str) -> Result<(), CatalogError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let existing = consumables::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?
            .ok_or(CatalogError::NotFound(id))?;

        let open = borrows::Entity::find()
            .filter(borrows::Column::ConsumableId.eq(id))
            .join(JoinType::LeftJoin, borrows::Relation::Returns.def())
            .filter(returns::Column::Id.is_null())
            .count(&txn)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let pending = order_items::Entity::find()
            .filter(order_items::Column::ConsumableId.eq(id))
            .join(JoinType::InnerJoin, order_items::Relation::Orders.def())
            .filter(orders::Column::Status.eq(OrderStatus::Pending))
            .count(&txn)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        CatalogService::ensure_deletable(id, open, pending)?;

        let event = CatalogService::deleted_event(actor, id, &existing.name);
        existing
            .delete(&txn)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        insert_event(&txn, &event)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        tracing::info!(consumable_id = %id, "consumable deleted");
        Ok(())
    }
}
