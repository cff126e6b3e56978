//! Requisition lifecycle transitions and placement rules.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::requisition::error::RequisitionError;
use crate::requisition::types::{NewOrder, OrderAction, OrderLine, OrderStatus, ValidatedOrder};
use crate::stock::error::LedgerError;

/// Stateless service for requisition orders.
pub struct RequisitionService;

impl RequisitionService {
    /// Approve a pending order.
    ///
    /// # Returns
    /// * `Ok(OrderAction::Approve)` if the order is pending
    /// * `Err(LedgerError::InvalidState)` otherwise
    pub fn approve(current_status: OrderStatus, approved_by: &str) -> Result<OrderAction, LedgerError> {
        match current_status {
            OrderStatus::Pending => Ok(OrderAction::Approve {
                new_status: OrderStatus::Approved,
                decided_by: approved_by.to_string(),
                decided_at: Utc::now(),
            }),
            _ => Err(LedgerError::InvalidState { current_status }),
        }
    }

    /// Reject a pending order.
    ///
    /// Rejecting an order that is already terminal is an error, including a
    /// second rejection.
    pub fn reject(current_status: OrderStatus, rejected_by: &str) -> Result<OrderAction, LedgerError> {
        match current_status {
            OrderStatus::Pending => Ok(OrderAction::Reject {
                new_status: OrderStatus::Rejected,
                decided_by: rejected_by.to_string(),
                decided_at: Utc::now(),
            }),
            _ => Err(LedgerError::InvalidState { current_status }),
        }
    }

    /// Check if a status transition is valid.
    #[must_use]
    pub fn is_valid_transition(from: OrderStatus, to: OrderStatus) -> bool {
        matches!(
            (from, to),
            (
                OrderStatus::Pending,
                OrderStatus::Approved | OrderStatus::Rejected
            )
        )
    }

    /// Validates an order submission.
    ///
    /// Text fields must be non-blank, at least one line is required and
    /// every line quantity must be positive. Lines for the same consumable
    /// are summed.
    pub fn prepare_order(order: NewOrder) -> Result<ValidatedOrder, RequisitionError> {
        let requester = required(order.requester, "requester")?;
        let department = required(order.department, "department")?;
        let purpose = required(order.purpose, "purpose")?;

        if order.lines.is_empty() {
            return Err(RequisitionError::EmptyOrder);
        }

        let lines = Self::merge_lines(&order.lines)?;

        Ok(ValidatedOrder {
            requester,
            department,
            purpose,
            date_needed: order.date_needed,
            lines,
        })
    }

    /// Sums lines per consumable, ordered by consumable id.
    pub fn merge_lines(lines: &[OrderLine]) -> Result<Vec<OrderLine>, RequisitionError> {
        let mut merged: BTreeMap<uuid::Uuid, i32> = BTreeMap::new();

        for line in lines {
            if line.quantity <= 0 {
                return Err(RequisitionError::InvalidQuantity {
                    consumable_id: line.consumable_id,
                    quantity: line.quantity,
                });
            }
            let total = merged.entry(line.consumable_id).or_insert(0);
            *total = total
                .checked_add(line.quantity)
                .ok_or(RequisitionError::InvalidQuantity {
                    consumable_id: line.consumable_id,
                    quantity: line.quantity,
                })?;
        }

        Ok(merged
            .into_iter()
            .map(|(consumable_id, quantity)| OrderLine {
                consumable_id,
                quantity,
            })
            .collect())
    }
}

fn required(value: String, field: &'static str) -> Result<String, RequisitionError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RequisitionError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn order_with(lines: Vec<OrderLine>) -> NewOrder {
        NewOrder {
            requester: "  Dana Reyes ".to_string(),
            department: "Chemistry".to_string(),
            purpose: "Titration lab".to_string(),
            date_needed: NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
            lines,
        }
    }

    #[test]
    fn test_approve_from_pending() {
        let action = RequisitionService::approve(OrderStatus::Pending, "admin").unwrap();
        assert_eq!(action.new_status(), OrderStatus::Approved);
        assert_eq!(action.decided_by(), "admin");
    }

    #[test]
    fn test_approve_from_terminal_fails() {
        for status in [OrderStatus::Approved, OrderStatus::Rejected] {
            let result = RequisitionService::approve(status, "admin");
            assert!(matches!(
                result,
                Err(LedgerError::InvalidState { current_status }) if current_status == status
            ));
        }
    }

    #[test]
    fn test_reject_from_pending() {
        let action = RequisitionService::reject(OrderStatus::Pending, "admin").unwrap();
        assert_eq!(action.new_status(), OrderStatus::Rejected);
    }

    #[test]
    fn test_second_reject_fails() {
        let result = RequisitionService::reject(OrderStatus::Rejected, "admin");
        assert!(matches!(
            result,
            Err(LedgerError::InvalidState {
                current_status: OrderStatus::Rejected
            })
        ));
    }

    #[test]
    fn test_is_valid_transition() {
        assert!(RequisitionService::is_valid_transition(
            OrderStatus::Pending,
            OrderStatus::Approved
        ));
        assert!(RequisitionService::is_valid_transition(
            OrderStatus::Pending,
            OrderStatus::Rejected
        ));
        assert!(!RequisitionService::is_valid_transition(
            OrderStatus::Approved,
            OrderStatus::Rejected
        ));
        assert!(!RequisitionService::is_valid_transition(
            OrderStatus::Rejected,
            OrderStatus::Pending
        ));
    }

    #[test]
    fn test_prepare_order_trims_and_merges() {
        let paper = Uuid::from_u128(2);
        let pens = Uuid::from_u128(1);
        let order = order_with(vec![
            OrderLine { consumable_id: paper, quantity: 3 },
            OrderLine { consumable_id: pens, quantity: 1 },
            OrderLine { consumable_id: paper, quantity: 2 },
        ]);

        let validated = RequisitionService::prepare_order(order).unwrap();
        assert_eq!(validated.requester, "Dana Reyes");
        assert_eq!(
            validated.lines,
            vec![
                OrderLine { consumable_id: pens, quantity: 1 },
                OrderLine { consumable_id: paper, quantity: 5 },
            ]
        );
    }

    #[test]
    fn test_prepare_order_requires_fields() {
        let mut order = order_with(vec![OrderLine {
            consumable_id: Uuid::from_u128(1),
            quantity: 1,
        }]);
        order.purpose = "   ".to_string();
        assert!(matches!(
            RequisitionService::prepare_order(order),
            Err(RequisitionError::MissingField("purpose"))
        ));
    }

    #[test]
    fn test_prepare_order_rejects_empty() {
        assert!(matches!(
            RequisitionService::prepare_order(order_with(vec![])),
            Err(RequisitionError::EmptyOrder)
        ));
    }

    #[test]
    fn test_prepare_order_rejects_zero_quantity() {
        let id = Uuid::from_u128(9);
        let order = order_with(vec![OrderLine { consumable_id: id, quantity: 0 }]);
        assert!(matches!(
            RequisitionService::prepare_order(order),
            Err(RequisitionError::InvalidQuantity { consumable_id, quantity: 0 }) if consumable_id == id
        ));
    }

    #[test]
    fn test_merge_lines_overflow_is_rejected() {
        let id = Uuid::from_u128(3);
        let lines = [
            OrderLine { consumable_id: id, quantity: i32::MAX },
            OrderLine { consumable_id: id, quantity: 1 },
        ];
        assert!(RequisitionService::merge_lines(&lines).is_err());
    }
}
