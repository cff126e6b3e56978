//! Stock ledger planner.
//!
//! `StockLedger` turns a request plus a snapshot of the current stock into a
//! plan, or an error. It never mutates anything; the database layer applies
//! the plan inside the transaction that produced the snapshot.

use std::collections::{BTreeMap, HashMap};

use uuid::Uuid;

use crate::audit::{AuditAction, AuditEvent};
use crate::requisition::service::RequisitionService;
use crate::requisition::types::{OrderLine, OrderStatus};
use crate::stock::error::LedgerError;
use crate::stock::types::{
    ApprovalPlan, BorrowPlan, BorrowRequest, BorrowSnapshot, RejectionPlan, ReturnPlan,
    ReturnRequest, StockChange, StockLevel,
};

/// Stateless planner for all stock mutations.
pub struct StockLedger;

impl StockLedger {
    /// Plans the approval of an order.
    ///
    /// Lines for the same consumable are summed, then every consumable is
    /// checked in ascending id order before any change is emitted. The first
    /// consumable that would go negative is reported and no plan is returned.
    ///
    /// # Arguments
    /// * `order_id` - The order being approved
    /// * `status` - The order's current status
    /// * `lines` - The order's items
    /// * `stock` - Current stock of every consumable referenced by `lines`
    /// * `actor` - The approving administrator
    pub fn plan_approval(
        order_id: Uuid,
        status: OrderStatus,
        lines: &[OrderLine],
        stock: &[StockLevel],
        actor: &str,
    ) -> Result<ApprovalPlan, LedgerError> {
        let action = RequisitionService::approve(status, actor)?;
        let requested = Self::requested_per_consumable(lines)?;

        let levels: HashMap<Uuid, &StockLevel> =
            stock.iter().map(|level| (level.consumable_id, level)).collect();

        let mut changes = Vec::with_capacity(requested.len());
        for (consumable_id, quantity) in requested {
            let level = levels
                .get(&consumable_id)
                .ok_or_else(|| LedgerError::consumable_not_found(consumable_id))?;
            changes.push(Self::decrement(level, quantity)?);
        }

        let units: i64 = changes.iter().map(|c| -c.quantity_delta()).sum();
        let audit = AuditEvent::new(
            actor,
            AuditAction::ApproveOrder,
            format!(
                "Approved order #{order_id} ({} items, {units} units)",
                changes.len()
            ),
        );

        Ok(ApprovalPlan {
            order_id,
            action,
            changes,
            audit,
        })
    }

    /// Plans the rejection of an order. Stock is never touched.
    pub fn plan_rejection(
        order_id: Uuid,
        status: OrderStatus,
        actor: &str,
    ) -> Result<RejectionPlan, LedgerError> {
        let action = RequisitionService::reject(status, actor)?;
        let audit = AuditEvent::new(
            actor,
            AuditAction::RejectOrder,
            format!("Rejected order #{order_id}"),
        );

        Ok(RejectionPlan {
            order_id,
            action,
            audit,
        })
    }

    /// Plans lending `request.quantity` units out of `level`.
    pub fn plan_borrow(
        borrow_id: Uuid,
        level: &StockLevel,
        request: &BorrowRequest,
        actor: &str,
    ) -> Result<BorrowPlan, LedgerError> {
        if level.consumable_id != request.consumable_id {
            return Err(LedgerError::consumable_not_found(request.consumable_id));
        }

        let borrower_name = request.borrower_name.trim();
        if borrower_name.is_empty() {
            return Err(LedgerError::InvalidInput(
                "borrower name is required".to_string(),
            ));
        }

        if request.quantity <= 0 {
            return Err(LedgerError::InvalidQuantity {
                quantity: request.quantity,
            });
        }

        let change = Self::decrement(level, request.quantity)?;
        let audit = AuditEvent::new(
            actor,
            AuditAction::RecordBorrow,
            format!(
                "{} {borrower_name} borrowed {} x {}",
                request.borrower_type, request.quantity, level.name
            ),
        );

        Ok(BorrowPlan {
            borrow_id,
            borrower_name: borrower_name.to_string(),
            borrower_type: request.borrower_type,
            quantity: request.quantity,
            change,
            audit,
        })
    }

    /// Plans the reconciliation of a borrow.
    ///
    /// `returned + damaged` must equal the borrowed quantity exactly.
    pub fn plan_return(
        return_id: Uuid,
        borrow: &BorrowSnapshot,
        level: &StockLevel,
        request: &ReturnRequest,
        actor: &str,
    ) -> Result<ReturnPlan, LedgerError> {
        if borrow.borrow_id != request.borrow_id {
            return Err(LedgerError::borrow_not_found(request.borrow_id));
        }
        if level.consumable_id != borrow.consumable_id {
            return Err(LedgerError::consumable_not_found(borrow.consumable_id));
        }
        if borrow.returned {
            return Err(LedgerError::AlreadyReturned {
                borrow_id: borrow.borrow_id,
            });
        }
        if !level.returnable {
            return Err(LedgerError::NotReturnable {
                consumable_id: level.consumable_id,
            });
        }

        let returned = request.returned_quantity;
        let damaged = request.damaged_quantity;
        for quantity in [returned, damaged] {
            if quantity < 0 {
                return Err(LedgerError::InvalidQuantity { quantity });
            }
        }

        let provided = returned
            .checked_add(damaged)
            .ok_or(LedgerError::InvalidQuantity { quantity: damaged })?;
        if provided != borrow.quantity {
            return Err(LedgerError::QuantityMismatch {
                expected: borrow.quantity,
                provided,
            });
        }

        let quantity_after = level
            .quantity
            .checked_add(returned)
            .ok_or(LedgerError::InvalidQuantity { quantity: returned })?;
        let damaged_after = level
            .damaged
            .checked_add(damaged)
            .ok_or(LedgerError::InvalidQuantity { quantity: damaged })?;

        let change = StockChange {
            consumable_id: level.consumable_id,
            quantity_before: level.quantity,
            quantity_after,
            damaged_before: level.damaged,
            damaged_after,
        };

        let audit = AuditEvent::new(
            actor,
            AuditAction::RecordReturn,
            format!(
                "Borrow #{}: {returned} returned, {damaged} damaged ({})",
                borrow.borrow_id, level.name
            ),
        );

        Ok(ReturnPlan {
            return_id,
            borrow_id: borrow.borrow_id,
            returned_quantity: returned,
            damaged_quantity: damaged,
            change,
            audit,
        })
    }

    /// Sums order lines per consumable, ascending by id.
    ///
    /// The ordering is the lock order used by the database layer.
    pub fn requested_per_consumable(
        lines: &[OrderLine],
    ) -> Result<BTreeMap<Uuid, i32>, LedgerError> {
        let mut requested: BTreeMap<Uuid, i32> = BTreeMap::new();
        for line in lines {
            if line.quantity <= 0 {
                return Err(LedgerError::InvalidQuantity {
                    quantity: line.quantity,
                });
            }
            let total = requested.entry(line.consumable_id).or_insert(0);
            *total = total
                .checked_add(line.quantity)
                .ok_or(LedgerError::InvalidQuantity {
                    quantity: line.quantity,
                })?;
        }
        Ok(requested)
    }

    fn decrement(level: &StockLevel, requested: i32) -> Result<StockChange, LedgerError> {
        if requested > level.quantity {
            return Err(LedgerError::InsufficientStock {
                consumable_id: level.consumable_id,
                name: level.name.clone(),
                available: level.quantity,
                requested,
            });
        }

        Ok(StockChange {
            consumable_id: level.consumable_id,
            quantity_before: level.quantity,
            quantity_after: level.quantity - requested,
            damaged_before: level.damaged,
            damaged_after: level.damaged,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stock::types::{BorrowerType, RecordKind};

    fn level(id: u128, quantity: i32) -> StockLevel {
        StockLevel {
            consumable_id: Uuid::from_u128(id),
            name: format!("item-{id}"),
            quantity,
            damaged: 0,
            returnable: true,
        }
    }

    fn borrow_request(level: &StockLevel, quantity: i32) -> BorrowRequest {
        BorrowRequest {
            consumable_id: level.consumable_id,
            borrower_name: "Sam Okafor".to_string(),
            borrower_type: BorrowerType::Student,
            quantity,
        }
    }

    fn snapshot_of(plan: &BorrowPlan) -> BorrowSnapshot {
        BorrowSnapshot {
            borrow_id: plan.borrow_id,
            consumable_id: plan.change.consumable_id,
            quantity: plan.quantity,
            returned: false,
        }
    }

    #[test]
    fn test_approval_decrements_every_line() {
        let order_id = Uuid::new_v4();
        let stock = [level(1, 10), level(2, 4)];
        let lines = [
            OrderLine { consumable_id: Uuid::from_u128(2), quantity: 4 },
            OrderLine { consumable_id: Uuid::from_u128(1), quantity: 3 },
        ];

        let plan =
            StockLedger::plan_approval(order_id, OrderStatus::Pending, &lines, &stock, "admin")
                .unwrap();

        assert_eq!(plan.action.new_status(), OrderStatus::Approved);
        assert_eq!(plan.changes.len(), 2);
        assert_eq!(plan.changes[0].consumable_id, Uuid::from_u128(1));
        assert_eq!(plan.changes[0].quantity_after, 7);
        assert_eq!(plan.changes[1].quantity_after, 0);
        assert_eq!(plan.audit.action, AuditAction::ApproveOrder);
        assert_eq!(plan.audit.actor, "admin");
    }

    #[test]
    fn test_approval_is_all_or_nothing() {
        // Item A (id 1) is short, item B (id 2) is fine.
        let stock = [level(1, 2), level(2, 50)];
        let lines = [
            OrderLine { consumable_id: Uuid::from_u128(2), quantity: 5 },
            OrderLine { consumable_id: Uuid::from_u128(1), quantity: 3 },
        ];

        let result =
            StockLedger::plan_approval(Uuid::new_v4(), OrderStatus::Pending, &lines, &stock, "admin");

        match result {
            Err(LedgerError::InsufficientStock {
                consumable_id,
                available,
                requested,
                ..
            }) => {
                assert_eq!(consumable_id, Uuid::from_u128(1));
                assert_eq!(available, 2);
                assert_eq!(requested, 3);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
    }

    #[test]
    fn test_approval_sums_duplicate_lines() {
        let stock = [level(1, 5)];
        let lines = [
            OrderLine { consumable_id: Uuid::from_u128(1), quantity: 3 },
            OrderLine { consumable_id: Uuid::from_u128(1), quantity: 3 },
        ];

        let result =
            StockLedger::plan_approval(Uuid::new_v4(), OrderStatus::Pending, &lines, &stock, "admin");

        assert!(matches!(
            result,
            Err(LedgerError::InsufficientStock { available: 5, requested: 6, .. })
        ));
    }

    #[test]
    fn test_approval_requires_pending() {
        let stock = [level(1, 5)];
        let lines = [OrderLine { consumable_id: Uuid::from_u128(1), quantity: 1 }];

        let result =
            StockLedger::plan_approval(Uuid::new_v4(), OrderStatus::Rejected, &lines, &stock, "admin");

        assert!(matches!(
            result,
            Err(LedgerError::InvalidState {
                current_status: OrderStatus::Rejected
            })
        ));
    }

    #[test]
    fn test_approval_missing_consumable() {
        let lines = [OrderLine { consumable_id: Uuid::from_u128(7), quantity: 1 }];

        let result =
            StockLedger::plan_approval(Uuid::new_v4(), OrderStatus::Pending, &lines, &[], "admin");

        assert!(matches!(
            result,
            Err(LedgerError::NotFound { kind: RecordKind::Consumable, id }) if id == Uuid::from_u128(7)
        ));
    }

    #[test]
    fn test_rejection_of_approved_order_fails() {
        let result = StockLedger::plan_rejection(Uuid::new_v4(), OrderStatus::Approved, "admin");
        assert!(matches!(
            result,
            Err(LedgerError::InvalidState {
                current_status: OrderStatus::Approved
            })
        ));
    }

    #[test]
    fn test_rejection_plan() {
        let order_id = Uuid::new_v4();
        let plan = StockLedger::plan_rejection(order_id, OrderStatus::Pending, "admin").unwrap();
        assert_eq!(plan.action.new_status(), OrderStatus::Rejected);
        assert_eq!(plan.audit.action, AuditAction::RejectOrder);
        assert!(plan.audit.details.contains(&order_id.to_string()));
    }

    #[test]
    fn test_borrow_then_return_scenario() {
        let stock = level(1, 10);

        let borrow =
            StockLedger::plan_borrow(Uuid::new_v4(), &stock, &borrow_request(&stock, 4), "admin")
                .unwrap();
        assert_eq!(borrow.change.quantity_after, 6);
        assert_eq!(borrow.quantity, 4);

        let after_borrow = StockLevel {
            quantity: borrow.change.quantity_after,
            ..stock
        };
        let request = ReturnRequest {
            borrow_id: borrow.borrow_id,
            returned_quantity: 3,
            damaged_quantity: 1,
        };
        let ret = StockLedger::plan_return(
            Uuid::new_v4(),
            &snapshot_of(&borrow),
            &after_borrow,
            &request,
            "admin",
        )
        .unwrap();

        assert_eq!(ret.change.quantity_after, 9);
        assert_eq!(ret.change.damaged_after, 1);
    }

    #[test]
    fn test_borrow_insufficient_stock() {
        let stock = level(1, 2);
        let result =
            StockLedger::plan_borrow(Uuid::new_v4(), &stock, &borrow_request(&stock, 5), "admin");

        assert!(matches!(
            result,
            Err(LedgerError::InsufficientStock { available: 2, requested: 5, .. })
        ));
    }

    #[test]
    fn test_borrow_rejects_non_positive_quantity() {
        let stock = level(1, 2);
        for quantity in [0, -3] {
            let result = StockLedger::plan_borrow(
                Uuid::new_v4(),
                &stock,
                &borrow_request(&stock, quantity),
                "admin",
            );
            assert!(matches!(result, Err(LedgerError::InvalidQuantity { .. })));
        }
    }

    #[test]
    fn test_borrow_requires_name() {
        let stock = level(1, 2);
        let mut request = borrow_request(&stock, 1);
        request.borrower_name = "  ".to_string();
        let result = StockLedger::plan_borrow(Uuid::new_v4(), &stock, &request, "admin");
        assert!(matches!(result, Err(LedgerError::InvalidInput(_))));
    }

    #[test]
    fn test_return_quantity_mismatch() {
        let stock = level(1, 0);
        let borrow = BorrowSnapshot {
            borrow_id: Uuid::new_v4(),
            consumable_id: stock.consumable_id,
            quantity: 5,
            returned: false,
        };
        let request = ReturnRequest {
            borrow_id: borrow.borrow_id,
            returned_quantity: 3,
            damaged_quantity: 1,
        };

        let result = StockLedger::plan_return(Uuid::new_v4(), &borrow, &stock, &request, "admin");

        assert!(matches!(
            result,
            Err(LedgerError::QuantityMismatch {
                expected: 5,
                provided: 4
            })
        ));
    }

    #[test]
    fn test_return_not_returnable() {
        let mut stock = level(1, 0);
        stock.returnable = false;
        let borrow = BorrowSnapshot {
            borrow_id: Uuid::new_v4(),
            consumable_id: stock.consumable_id,
            quantity: 2,
            returned: false,
        };
        let request = ReturnRequest {
            borrow_id: borrow.borrow_id,
            returned_quantity: 2,
            damaged_quantity: 0,
        };

        let result = StockLedger::plan_return(Uuid::new_v4(), &borrow, &stock, &request, "admin");
        assert!(matches!(result, Err(LedgerError::NotReturnable { .. })));
    }

    #[test]
    fn test_return_twice_fails() {
        let stock = level(1, 0);
        let borrow = BorrowSnapshot {
            borrow_id: Uuid::new_v4(),
            consumable_id: stock.consumable_id,
            quantity: 2,
            returned: true,
        };
        let request = ReturnRequest {
            borrow_id: borrow.borrow_id,
            returned_quantity: 2,
            damaged_quantity: 0,
        };

        let result = StockLedger::plan_return(Uuid::new_v4(), &borrow, &stock, &request, "admin");
        assert!(matches!(result, Err(LedgerError::AlreadyReturned { .. })));
    }

    #[test]
    fn test_return_negative_quantity_rejected() {
        let stock = level(1, 0);
        let borrow = BorrowSnapshot {
            borrow_id: Uuid::new_v4(),
            consumable_id: stock.consumable_id,
            quantity: 2,
            returned: false,
        };
        // -1 + 3 == 2 would pass a sum-only check
        let request = ReturnRequest {
            borrow_id: borrow.borrow_id,
            returned_quantity: -1,
            damaged_quantity: 3,
        };

        let result = StockLedger::plan_return(Uuid::new_v4(), &borrow, &stock, &request, "admin");
        assert!(matches!(
            result,
            Err(LedgerError::InvalidQuantity { quantity: -1 })
        ));
    }
}
