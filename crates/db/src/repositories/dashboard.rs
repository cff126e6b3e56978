//! Dashboard figures.

use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use serde::Serialize;

use crate::entities::{consumables, orders, sea_orm_active_enums::OrderStatus};

use super::requisition::{OrderSummary, summarize};

/// Number of recent orders shown.
pub const RECENT_ORDERS: u64 = 5;

/// Headline counts and the latest orders.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_consumables: u64,
    pub total_orders: u64,
    pub pending_orders: u64,
    /// Consumables with quantity strictly below the threshold.
    pub low_stock: u64,
    pub low_stock_threshold: i32,
    pub recent_orders: Vec<OrderSummary>,
}

/// Dashboard repository.
#[derive(Debug, Clone)]
pub struct DashboardRepository {
    db: DatabaseConnection,
}

impl DashboardRepository {
    /// Creates a new dashboard repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Collects all dashboard figures.
    pub async fn stats(&self, low_stock_threshold: i32) -> Result<DashboardStats, DbErr> {
        let total_consumables = consumables::Entity::find().count(&self.db).await?;
        let low_stock = consumables::Entity::find()
            .filter(consumables::Column::Quantity.lt(low_stock_threshold))
            .count(&self.db)
            .await?;

        let total_orders = orders::Entity::find().count(&self.db).await?;
        let pending_orders = orders::Entity::find()
            .filter(orders::Column::Status.eq(OrderStatus::Pending))
            .count(&self.db)
            .await?;

        let latest = orders::Entity::find()
            .order_by_desc(orders::Column::CreatedAt)
            .limit(RECENT_ORDERS)
            .all(&self.db)
            .await?;
        let recent_orders = summarize(&self.db, latest).await?;

        Ok(DashboardStats {
            total_consumables,
            total_orders,
            pending_orders,
            low_stock,
            low_stock_threshold,
            recent_orders,
        })
    }
}
