//! Requisition order repository: placement and queries.
//!
//! Approval and rejection live in [`super::ledger`].

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;
use uuid::Uuid;

use labstock_core::requisition::{NewOrder, RequisitionError, RequisitionService};

use crate::entities::{consumables, order_items, orders, sea_orm_active_enums::OrderStatus};

use super::search::any_contains;

/// Filter for order listings.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Only orders with this status.
    pub status: Option<OrderStatus>,
    /// Substring of requester or department.
    pub search: Option<String>,
}

/// An order with aggregated item figures.
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    #[serde(flatten)]
    pub order: orders::Model,
    /// Number of distinct lines.
    pub item_count: usize,
    /// Sum of line quantities.
    pub total_quantity: i64,
}

/// One line of an order joined to its consumable.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItemDetail {
    pub id: Uuid,
    pub consumable_id: Uuid,
    pub name: String,
    pub category: String,
    pub quantity: i32,
    /// Stock at read time.
    pub available: i32,
}

/// An order with its lines.
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: orders::Model,
    pub items: Vec<OrderItemDetail>,
}

/// Requisition order repository.
#[derive(Debug, Clone)]
pub struct RequisitionRepository {
    db: DatabaseConnection,
}

impl RequisitionRepository {
    /// Creates a new requisition repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Places a new pending order.
    ///
    /// Lines for the same consumable are merged. The order and its items
    /// are written in one transaction.
    ///
    /// # Errors
    ///
    /// - `MissingField` / `EmptyOrder` / `InvalidQuantity` on bad input
    /// - `ConsumableNotFound` if a line references an unknown consumable
    /// - `Database` on storage errors
    pub async fn place_order(&self, order: NewOrder) -> Result<OrderDetail, RequisitionError> {
        let order = RequisitionService::prepare_order(order)?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RequisitionError::Database(e.to_string()))?;

        let ids: Vec<Uuid> = order.lines.iter().map(|l| l.consumable_id).collect();
        let found: HashMap<Uuid, consumables::Model> = consumables::Entity::find()
            .filter(consumables::Column::Id.is_in(ids))
            .all(&txn)
            .await
            .map_err(|e| RequisitionError::Database(e.to_string()))?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        if let Some(missing) = order.lines.iter().find(|l| !found.contains_key(&l.consumable_id)) {
            return Err(RequisitionError::ConsumableNotFound(missing.consumable_id));
        }

        let created = orders::ActiveModel {
            id: Set(Uuid::new_v4()),
            requester: Set(order.requester),
            department: Set(order.department),
            purpose: Set(order.purpose),
            date_needed: Set(order.date_needed),
            status: Set(OrderStatus::Pending),
            decided_by: Set(None),
            decided_at: Set(None),
            created_at: Set(Utc::now().into()),
        }
        .insert(&txn)
        .await
        .map_err(|e| RequisitionError::Database(e.to_string()))?;

        let mut items = Vec::with_capacity(order.lines.len());
        for line in &order.lines {
            let item = order_items::ActiveModel {
                id: Set(Uuid::new_v4()),
                order_id: Set(created.id),
                consumable_id: Set(line.consumable_id),
                quantity: Set(line.quantity),
            }
            .insert(&txn)
            .await
            .map_err(|e| RequisitionError::Database(e.to_string()))?;

            let consumable = &found[&line.consumable_id];
            items.push(OrderItemDetail {
                id: item.id,
                consumable_id: item.consumable_id,
                name: consumable.name.clone(),
                category: consumable.category.clone(),
                quantity: item.quantity,
                available: consumable.quantity,
            });
        }

        txn.commit()
            .await
            .map_err(|e| RequisitionError::Database(e.to_string()))?;

        tracing::info!(order_id = %created.id, lines = items.len(), "order placed");

        Ok(OrderDetail {
            order: created,
            items,
        })
    }

    /// Lists orders newest first.
    pub async fn list_orders(
        &self,
        filter: &OrderFilter,
    ) -> Result<Vec<OrderSummary>, RequisitionError> {
        let mut query = orders::Entity::find().order_by_desc(orders::Column::CreatedAt);

        if let Some(status) = filter.status {
            query = query.filter(orders::Column::Status.eq(status));
        }
        if let Some(cond) = any_contains(
            &[orders::Column::Requester, orders::Column::Department],
            filter.search.as_deref(),
        ) {
            query = query.filter(cond);
        }

        let found = query
            .all(&self.db)
            .await
            .map_err(|e| RequisitionError::Database(e.to_string()))?;

        summarize(&self.db, found)
            .await
            .map_err(|e| RequisitionError::Database(e.to_string()))
    }

    /// Loads one order with its lines.
    ///
    /// # Errors
    ///
    /// Returns `OrderNotFound` if the order does not exist.
    pub async fn get_order(&self, order_id: Uuid) -> Result<OrderDetail, RequisitionError> {
        let order = orders::Entity::find_by_id(order_id)
            .one(&self.db)
            .await
            .map_err(|e| RequisitionError::Database(e.to_string()))?
            .ok_or(RequisitionError::OrderNotFound(order_id))?;

        let rows = order_items::Entity::find()
            .filter(order_items::Column::OrderId.eq(order_id))
            .find_also_related(consumables::Entity)
            .all(&self.db)
            .await
            .map_err(|e| RequisitionError::Database(e.to_string()))?;

        let items = rows
            .into_iter()
            .filter_map(|(item, consumable)| {
                consumable.map(|c| OrderItemDetail {
                    id: item.id,
                    consumable_id: item.consumable_id,
                    name: c.name,
                    category: c.category,
                    quantity: item.quantity,
                    available: c.quantity,
                })
            })
            .collect();

        Ok(OrderDetail { order, items })
    }
}

/// Attaches item counts and total quantities to orders, keeping their order.
pub(crate) async fn summarize<C: ConnectionTrait>(
    conn: &C,
    found: Vec<orders::Model>,
) -> Result<Vec<OrderSummary>, DbErr> {
    if found.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = found.iter().map(|o| o.id).collect();
    let lines: Vec<(Uuid, i32)> = order_items::Entity::find()
        .filter(order_items::Column::OrderId.is_in(ids))
        .select_only()
        .column(order_items::Column::OrderId)
        .column(order_items::Column::Quantity)
        .into_tuple()
        .all(conn)
        .await?;

    let mut per_order: HashMap<Uuid, (usize, i64)> = HashMap::new();
    for (order_id, quantity) in lines {
        let entry = per_order.entry(order_id).or_default();
        entry.0 += 1;
        entry.1 += i64::from(quantity);
    }

    Ok(found
        .into_iter()
        .map(|order| {
            let (item_count, total_quantity) =
                per_order.get(&order.id).copied().unwrap_or_default();
            OrderSummary {
                order,
                item_count,
                total_quantity,
            }
        })
        .collect())
}
