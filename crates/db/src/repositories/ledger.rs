//! Transactional executor for the stock ledger.
//!
//! Each operation opens one `SERIALIZABLE` transaction, locks the rows its
//! checks depend on with `SELECT ... FOR UPDATE`, asks [`StockLedger`] for a
//! plan, then writes the plan and its audit row before committing. Any error
//! drops the transaction, which rolls it back.
//!
//! Lock order is always: order row, then consumable rows in ascending id;
//! or borrow row, then its consumable.

use chrono::Utc;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, IsolationLevel, QueryFilter, QueryOrder, QuerySelect, RuntimeErr, Set,
    TransactionTrait,
};
use uuid::Uuid;

use labstock_core::requisition::types::OrderLine;
use labstock_core::stock::{
    BorrowRequest, BorrowSnapshot, LedgerError, ReturnRequest, StockChange, StockLedger,
    StockLevel,
};

use crate::entities::{
    audit_logs, borrows, consumables, order_items, orders, returns,
    sea_orm_active_enums::BorrowerType,
};

use super::audit::insert_event;

/// Result of an approval.
#[derive(Debug, Clone)]
pub struct ApprovalOutcome {
    /// The order, now approved.
    pub order: orders::Model,
    /// One stock change per consumable, ascending id.
    pub changes: Vec<StockChange>,
    /// The persisted audit row.
    pub audit: audit_logs::Model,
}

/// Result of a rejection.
#[derive(Debug, Clone)]
pub struct RejectionOutcome {
    /// The order, now rejected.
    pub order: orders::Model,
    /// The persisted audit row.
    pub audit: audit_logs::Model,
}

/// Result of a borrow.
#[derive(Debug, Clone)]
pub struct BorrowOutcome {
    /// The new borrow record.
    pub borrow: borrows::Model,
    /// Stock decrement applied.
    pub change: StockChange,
    /// The persisted audit row.
    pub audit: audit_logs::Model,
}

/// Result of a return.
#[derive(Debug, Clone)]
pub struct ReturnOutcome {
    /// The new return record.
    pub record: returns::Model,
    /// Stock and damaged increment applied.
    pub change: StockChange,
    /// The persisted audit row.
    pub audit: audit_logs::Model,
}

/// Stock ledger repository.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Approves a pending order and deducts its items from stock.
    ///
    /// Either every consumable is decremented and the order is approved, or
    /// nothing changes.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the order or one of its consumables is missing
    /// - `InvalidState` if the order is not pending
    /// - `InsufficientStock` naming the first short consumable by id
    /// - `StorageFailure` on any database error; serialization conflicts are
    ///   flagged retryable
    pub async fn approve_order(
        &self,
        order_id: Uuid,
        actor: &str,
    ) -> Result<ApprovalOutcome, LedgerError> {
        let txn = self.begin().await?;

        let order = lock_order(&txn, order_id).await?;

        let lines: Vec<OrderLine> = order_items::Entity::find()
            .filter(order_items::Column::OrderId.eq(order_id))
            .all(&txn)
            .await
            .map_err(storage)?
            .into_iter()
            .map(|item| OrderLine {
                consumable_id: item.consumable_id,
                quantity: item.quantity,
            })
            .collect();

        let requested = StockLedger::requested_per_consumable(&lines)?;
        let ids: Vec<Uuid> = requested.keys().copied().collect();

        // One ordered query so overlapping approvals take locks in the same order.
        let stock: Vec<StockLevel> = consumables::Entity::find()
            .filter(consumables::Column::Id.is_in(ids))
            .order_by_asc(consumables::Column::Id)
            .lock_exclusive()
            .all(&txn)
            .await
            .map_err(storage)?
            .into_iter()
            .map(stock_level)
            .collect();

        let plan = StockLedger::plan_approval(
            order_id,
            order.status.into(),
            &lines,
            &stock,
            actor,
        )?;

        let now = Utc::now();
        for change in &plan.changes {
            apply_change(&txn, change, now).await?;
        }

        let mut active: orders::ActiveModel = order.into();
        active.status = Set(plan.action.new_status().into());
        active.decided_by = Set(Some(plan.action.decided_by().to_string()));
        active.decided_at = Set(Some(plan.action.decided_at().into()));
        let order = active.update(&txn).await.map_err(storage)?;

        let audit = insert_event(&txn, &plan.audit).await.map_err(storage)?;

        txn.commit().await.map_err(storage)?;

        tracing::info!(
            order_id = %order_id,
            items = plan.changes.len(),
            actor,
            "order approved"
        );

        Ok(ApprovalOutcome {
            order,
            changes: plan.changes,
            audit,
        })
    }

    /// Rejects a pending order. Stock is untouched.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the order is missing
    /// - `InvalidState` if the order is not pending
    /// - `StorageFailure` on any database error
    pub async fn reject_order(
        &self,
        order_id: Uuid,
        actor: &str,
    ) -> Result<RejectionOutcome, LedgerError> {
        let txn = self.begin().await?;

        let order = lock_order(&txn, order_id).await?;
        let plan = StockLedger::plan_rejection(order_id, order.status.into(), actor)?;

        let mut active: orders::ActiveModel = order.into();
        active.status = Set(plan.action.new_status().into());
        active.decided_by = Set(Some(plan.action.decided_by().to_string()));
        active.decided_at = Set(Some(plan.action.decided_at().into()));
        let order = active.update(&txn).await.map_err(storage)?;

        let audit = insert_event(&txn, &plan.audit).await.map_err(storage)?;

        txn.commit().await.map_err(storage)?;

        tracing::info!(order_id = %order_id, actor, "order rejected");

        Ok(RejectionOutcome { order, audit })
    }

    /// Lends out stock.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the consumable is missing
    /// - `InvalidQuantity` / `InvalidInput` on bad input
    /// - `InsufficientStock` if the loan exceeds available stock
    /// - `StorageFailure` on any database error
    pub async fn record_borrow(
        &self,
        request: &BorrowRequest,
        actor: &str,
    ) -> Result<BorrowOutcome, LedgerError> {
        let txn = self.begin().await?;

        let level = lock_consumable(&txn, request.consumable_id).await?;
        let plan = StockLedger::plan_borrow(Uuid::new_v4(), &level, request, actor)?;

        let now = Utc::now();
        apply_change(&txn, &plan.change, now).await?;

        let borrow = borrows::ActiveModel {
            id: Set(plan.borrow_id),
            consumable_id: Set(plan.change.consumable_id),
            borrower_name: Set(plan.borrower_name.clone()),
            borrower_type: Set(BorrowerType::from(plan.borrower_type)),
            quantity: Set(plan.quantity),
            recorded_by: Set(actor.to_string()),
            created_at: Set(now.into()),
        }
        .insert(&txn)
        .await
        .map_err(storage)?;

        let audit = insert_event(&txn, &plan.audit).await.map_err(storage)?;

        txn.commit().await.map_err(storage)?;

        tracing::info!(
            borrow_id = %borrow.id,
            consumable_id = %borrow.consumable_id,
            quantity = borrow.quantity,
            stock_after = plan.change.quantity_after,
            "borrow recorded"
        );

        Ok(BorrowOutcome {
            borrow,
            change: plan.change,
            audit,
        })
    }

    /// Reconciles a borrow: returned units go back to stock, damaged units
    /// to the damaged pool.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the borrow or its consumable is missing
    /// - `AlreadyReturned` if a return exists for the borrow
    /// - `NotReturnable` if the consumable is not returnable
    /// - `InvalidQuantity` on negative quantities
    /// - `QuantityMismatch` if returned + damaged differs from the borrowed quantity
    /// - `StorageFailure` on any database error
    pub async fn record_return(
        &self,
        request: &ReturnRequest,
        actor: &str,
    ) -> Result<ReturnOutcome, LedgerError> {
        let txn = self.begin().await?;

        let borrow = borrows::Entity::find_by_id(request.borrow_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(storage)?
            .ok_or_else(|| LedgerError::borrow_not_found(request.borrow_id))?;

        let returned = returns::Entity::find()
            .filter(returns::Column::BorrowId.eq(borrow.id))
            .one(&txn)
            .await
            .map_err(storage)?
            .is_some();

        let snapshot = BorrowSnapshot {
            borrow_id: borrow.id,
            consumable_id: borrow.consumable_id,
            quantity: borrow.quantity,
            returned,
        };

        let level = lock_consumable(&txn, borrow.consumable_id).await?;
        let plan = StockLedger::plan_return(Uuid::new_v4(), &snapshot, &level, request, actor)?;

        let now = Utc::now();
        apply_change(&txn, &plan.change, now).await?;

        let record = returns::ActiveModel {
            id: Set(plan.return_id),
            borrow_id: Set(plan.borrow_id),
            returned_quantity: Set(plan.returned_quantity),
            damaged_quantity: Set(plan.damaged_quantity),
            recorded_by: Set(actor.to_string()),
            created_at: Set(now.into()),
        }
        .insert(&txn)
        .await
        .map_err(storage)?;

        let audit = insert_event(&txn, &plan.audit).await.map_err(storage)?;

        txn.commit().await.map_err(storage)?;

        tracing::info!(
            borrow_id = %plan.borrow_id,
            consumable_id = %plan.change.consumable_id,
            returned = plan.returned_quantity,
            damaged = plan.damaged_quantity,
            "return recorded"
        );

        Ok(ReturnOutcome {
            record,
            change: plan.change,
            audit,
        })
    }

    async fn begin(&self) -> Result<DatabaseTransaction, LedgerError> {
        self.db
            .begin_with_config(
                Some(IsolationLevel::Serializable),
                Some(AccessMode::ReadWrite),
            )
            .await
            .map_err(storage)
    }
}

async fn lock_order(txn: &DatabaseTransaction, order_id: Uuid) -> Result<orders::Model, LedgerError> {
    orders::Entity::find_by_id(order_id)
        .lock_exclusive()
        .one(txn)
        .await
        .map_err(storage)?
        .ok_or_else(|| LedgerError::order_not_found(order_id))
}

async fn lock_consumable(
    txn: &DatabaseTransaction,
    consumable_id: Uuid,
) -> Result<StockLevel, LedgerError> {
    consumables::Entity::find_by_id(consumable_id)
        .lock_exclusive()
        .one(txn)
        .await
        .map_err(storage)?
        .map(stock_level)
        .ok_or_else(|| LedgerError::consumable_not_found(consumable_id))
}

async fn apply_change(
    txn: &DatabaseTransaction,
    change: &StockChange,
    now: chrono::DateTime<Utc>,
) -> Result<(), LedgerError> {
    consumables::ActiveModel {
        id: Set(change.consumable_id),
        quantity: Set(change.quantity_after),
        damaged: Set(change.damaged_after),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .update(txn)
    .await
    .map_err(storage)?;
    Ok(())
}

fn stock_level(model: consumables::Model) -> StockLevel {
    StockLevel {
        consumable_id: model.id,
        name: model.name,
        quantity: model.quantity,
        damaged: model.damaged,
        returnable: model.returnable,
    }
}

/// SQLSTATE for `serialization_failure`.
const SERIALIZATION_FAILURE: &str = "40001";

pub(crate) fn storage(err: DbErr) -> LedgerError {
    if is_serialization_failure(&err) {
        LedgerError::conflict(err.to_string())
    } else {
        LedgerError::storage(err.to_string())
    }
}

fn is_serialization_failure(err: &DbErr) -> bool {
    match err {
        DbErr::Conn(RuntimeErr::SqlxError(e))
        | DbErr::Exec(RuntimeErr::SqlxError(e))
        | DbErr::Query(RuntimeErr::SqlxError(e)) => e
            .as_database_error()
            .and_then(|db| db.code())
            .is_some_and(|code| code == SERIALIZATION_FAILURE),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_driver_errors_are_not_retryable() {
        let err = storage(DbErr::RecordNotUpdated);
        assert!(!err.is_retryable());
        assert_eq!(err.error_code(), "STORAGE_FAILURE");

        let err = storage(DbErr::Custom("could not serialize access".to_string()));
        assert!(!err.is_retryable());
    }
}

