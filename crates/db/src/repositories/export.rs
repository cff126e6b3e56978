//! Rows for the CSV exports.

use std::collections::HashMap;

use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryOrder};
use uuid::Uuid;

use labstock_core::export::{InventoryExportRow, OrderExportRow};

use crate::entities::{consumables, order_items, orders};

/// Loads export rows.
#[derive(Debug, Clone)]
pub struct ExportRepository {
    db: DatabaseConnection,
}

impl ExportRepository {
    /// Creates a new export repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All orders newest first, each with `(name, quantity)` items.
    pub async fn order_rows(&self) -> Result<Vec<OrderExportRow>, DbErr> {
        let all = orders::Entity::find()
            .order_by_desc(orders::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let items = order_items::Entity::find()
            .find_also_related(consumables::Entity)
            .all(&self.db)
            .await?;

        let mut per_order: HashMap<Uuid, Vec<(String, i32)>> = HashMap::new();
        for (item, consumable) in items {
            if let Some(consumable) = consumable {
                per_order
                    .entry(item.order_id)
                    .or_default()
                    .push((consumable.name, item.quantity));
            }
        }

        Ok(all
            .into_iter()
            .map(|order| OrderExportRow {
                items: per_order.remove(&order.id).unwrap_or_default(),
                order_id: order.id,
                requester: order.requester,
                department: order.department,
                purpose: order.purpose,
                date_needed: order.date_needed,
                status: order.status.into(),
                created_at: order.created_at.into(),
            })
            .collect())
    }

    /// All consumables by category then name.
    pub async fn inventory_rows(&self) -> Result<Vec<InventoryExportRow>, DbErr> {
        let all = consumables::Entity::find()
            .order_by_asc(consumables::Column::Category)
            .order_by_asc(consumables::Column::Name)
            .all(&self.db)
            .await?;

        Ok(all
            .into_iter()
            .map(|c| InventoryExportRow {
                consumable_id: c.id,
                name: c.name,
                description: c.description,
                category: c.category,
                quantity: c.quantity,
                damaged: c.damaged,
                returnable: c.returnable,
                created_at: c.created_at.into(),
            })
            .collect())
    }
}
