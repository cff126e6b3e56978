//! Stock ledger domain types.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::audit::AuditEvent;
use crate::requisition::types::OrderAction;

/// Kind of record an identifier refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// A requisition order.
    Order,
    /// A consumable.
    Consumable,
    /// A borrow record.
    Borrow,
}

impl RecordKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::Consumable => "consumable",
            Self::Borrow => "borrow",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who borrowed an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorrowerType {
    /// A student.
    Student,
    /// A staff member.
    Staff,
}

impl BorrowerType {
    /// Returns the string representation of the borrower type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Staff => "staff",
        }
    }

    /// Parses a borrower type from a string, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "student" => Some(Self::Student),
            "staff" => Some(Self::Staff),
            _ => None,
        }
    }
}

impl fmt::Display for BorrowerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Current stock of one consumable, as read inside the transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    /// The consumable.
    pub consumable_id: Uuid,
    /// Display name, used in error reports.
    pub name: String,
    /// Available stock.
    pub quantity: i32,
    /// Cumulative damaged count.
    pub damaged: i32,
    /// Whether loans of this consumable come back.
    pub returnable: bool,
}

impl StockLevel {
    /// Returns true if neither counter is negative.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.quantity >= 0 && self.damaged >= 0
    }
}

/// Before/after counters for one consumable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockChange {
    /// The consumable changed.
    pub consumable_id: Uuid,
    /// Quantity before the change.
    pub quantity_before: i32,
    /// Quantity after the change.
    pub quantity_after: i32,
    /// Damaged count before the change.
    pub damaged_before: i32,
    /// Damaged count after the change.
    pub damaged_after: i32,
}

impl StockChange {
    /// Signed change of the available quantity.
    #[must_use]
    pub fn quantity_delta(&self) -> i64 {
        i64::from(self.quantity_after) - i64::from(self.quantity_before)
    }

    /// Signed change of the damaged count.
    #[must_use]
    pub fn damaged_delta(&self) -> i64 {
        i64::from(self.damaged_after) - i64::from(self.damaged_before)
    }
}

/// A borrow as read inside the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowSnapshot {
    /// The borrow record.
    pub borrow_id: Uuid,
    /// The borrowed consumable.
    pub consumable_id: Uuid,
    /// Quantity lent out.
    pub quantity: i32,
    /// Whether a return was already recorded.
    pub returned: bool,
}

/// Request to lend out stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowRequest {
    /// The consumable to lend.
    pub consumable_id: Uuid,
    /// Borrower's name.
    pub borrower_name: String,
    /// Borrower's type.
    pub borrower_type: BorrowerType,
    /// Quantity to lend; must be positive.
    pub quantity: i32,
}

/// Request to reconcile a loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnRequest {
    /// The borrow being reconciled.
    pub borrow_id: Uuid,
    /// Units that came back usable.
    pub returned_quantity: i32,
    /// Units that came back damaged.
    pub damaged_quantity: i32,
}

/// Validated order approval.
#[derive(Debug, Clone)]
pub struct ApprovalPlan {
    /// The order being approved.
    pub order_id: Uuid,
    /// Status transition.
    pub action: OrderAction,
    /// One change per consumable, ascending consumable id.
    pub changes: Vec<StockChange>,
    /// Audit entry to persist with the changes.
    pub audit: AuditEvent,
}

/// Validated order rejection.
#[derive(Debug, Clone)]
pub struct RejectionPlan {
    /// The order being rejected.
    pub order_id: Uuid,
    /// Status transition.
    pub action: OrderAction,
    /// Audit entry to persist with the transition.
    pub audit: AuditEvent,
}

/// Validated borrow.
#[derive(Debug, Clone)]
pub struct BorrowPlan {
    /// Identifier for the new borrow record.
    pub borrow_id: Uuid,
    /// Trimmed borrower name.
    pub borrower_name: String,
    /// Borrower type.
    pub borrower_type: BorrowerType,
    /// Quantity lent.
    pub quantity: i32,
    /// Stock decrement.
    pub change: StockChange,
    /// Audit entry to persist with the borrow.
    pub audit: AuditEvent,
}

/// Validated return.
#[derive(Debug, Clone)]
pub struct ReturnPlan {
    /// Identifier for the new return record.
    pub return_id: Uuid,
    /// The borrow being reconciled.
    pub borrow_id: Uuid,
    /// Units returned to stock.
    pub returned_quantity: i32,
    /// Units added to the damaged pool.
    pub damaged_quantity: i32,
    /// Stock and damaged increment.
    pub change: StockChange,
    /// Audit entry to persist with the return.
    pub audit: AuditEvent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_borrower_type_parse() {
        assert_eq!(BorrowerType::parse("Student"), Some(BorrowerType::Student));
        assert_eq!(BorrowerType::parse("STAFF"), Some(BorrowerType::Staff));
        assert_eq!(BorrowerType::parse("visitor"), None);
    }

    #[test]
    fn test_stock_change_deltas() {
        let change = StockChange {
            consumable_id: Uuid::nil(),
            quantity_before: 6,
            quantity_after: 9,
            damaged_before: 0,
            damaged_after: 1,
        };
        assert_eq!(change.quantity_delta(), 3);
        assert_eq!(change.damaged_delta(), 1);
    }

    #[test]
    fn test_stock_level_consistency() {
        let mut level = StockLevel {
            consumable_id: Uuid::nil(),
            name: "Pipette tips".to_string(),
            quantity: 0,
            damaged: 0,
            returnable: false,
        };
        assert!(level.is_consistent());
        level.damaged = -1;
        assert!(!level.is_consistent());
    }
}
