//! Borrow listing.

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use uuid::Uuid;

use labstock_core::stock::LedgerError;

use crate::entities::{borrows, consumables, returns};

use super::ledger::storage;

/// A borrow with its consumable name and return, if any.
#[derive(Debug, Clone, Serialize)]
pub struct BorrowView {
    #[serde(flatten)]
    pub borrow: borrows::Model,
    pub consumable_name: Option<String>,
    #[serde(rename = "return")]
    pub return_record: Option<returns::Model>,
}

impl BorrowView {
    /// True until a return is recorded.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.return_record.is_none()
    }
}

/// Read access to borrows.
#[derive(Debug, Clone)]
pub struct BorrowRepository {
    db: DatabaseConnection,
}

impl BorrowRepository {
    /// Creates a new borrow repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists borrows newest first.
    ///
    /// `open` selects only unreturned (`Some(true)`) or returned
    /// (`Some(false)`) borrows.
    pub async fn list(
        &self,
        consumable_id: Option<Uuid>,
        open: Option<bool>,
    ) -> Result<Vec<BorrowView>, LedgerError> {
        let mut query = borrows::Entity::find().order_by_desc(borrows::Column::CreatedAt);
        if let Some(id) = consumable_id {
            query = query.filter(borrows::Column::ConsumableId.eq(id));
        }

        let rows = query
            .find_also_related(returns::Entity)
            .all(&self.db)
            .await
            .map_err(storage)?;

        let ids: Vec<Uuid> = rows.iter().map(|(b, _)| b.consumable_id).collect();
        let names: std::collections::HashMap<Uuid, String> = consumables::Entity::find()
            .filter(consumables::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(storage)?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        Ok(rows
            .into_iter()
            .map(|(borrow, return_record)| BorrowView {
                consumable_name: names.get(&borrow.consumable_id).cloned(),
                borrow,
                return_record,
            })
            .filter(|view| open.is_none_or(|want_open| view.is_open() == want_open))
            .collect())
    }
}
