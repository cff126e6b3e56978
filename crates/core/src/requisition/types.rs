//! Requisition domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Order status in the requisition lifecycle.
///
/// Orders are created `Pending` and move exactly once:
/// - Pending → Approved (approve, deducts stock)
/// - Pending → Rejected (reject)
///
/// Approved and Rejected are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Awaiting an administrator decision.
    Pending,
    /// Approved; stock has been deducted.
    Approved,
    /// Rejected; stock untouched.
    Rejected,
}

impl OrderStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true once no further transition is possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One requested consumable in an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// The consumable requested.
    pub consumable_id: Uuid,
    /// Requested quantity.
    pub quantity: i32,
}

/// Order submission as received from a requester.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    /// Name of the person requesting.
    pub requester: String,
    /// Requesting department.
    pub department: String,
    /// What the consumables are for.
    pub purpose: String,
    /// Date the consumables are needed by.
    pub date_needed: NaiveDate,
    /// Requested lines; duplicates are merged.
    pub lines: Vec<OrderLine>,
}

/// Order that passed placement validation.
///
/// Text fields are trimmed and lines are merged per consumable, sorted by
/// consumable id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOrder {
    /// Requester name.
    pub requester: String,
    /// Department.
    pub department: String,
    /// Purpose.
    pub purpose: String,
    /// Date needed.
    pub date_needed: NaiveDate,
    /// Merged lines.
    pub lines: Vec<OrderLine>,
}

/// Lifecycle action with its audit data.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Approve a pending order.
    Approve {
        /// The new status (Approved).
        new_status: OrderStatus,
        /// Administrator who approved.
        decided_by: String,
        /// When the approval happened.
        decided_at: DateTime<Utc>,
    },
    /// Reject a pending order.
    Reject {
        /// The new status (Rejected).
        new_status: OrderStatus,
        /// Administrator who rejected.
        decided_by: String,
        /// When the rejection happened.
        decided_at: DateTime<Utc>,
    },
}

impl OrderAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub fn new_status(&self) -> OrderStatus {
        match self {
            Self::Approve { new_status, .. } | Self::Reject { new_status, .. } => *new_status,
        }
    }

    /// Returns the deciding administrator.
    #[must_use]
    pub fn decided_by(&self) -> &str {
        match self {
            Self::Approve { decided_by, .. } | Self::Reject { decided_by, .. } => decided_by,
        }
    }

    /// Returns when the decision was taken.
    #[must_use]
    pub fn decided_at(&self) -> DateTime<Utc> {
        match self {
            Self::Approve { decided_at, .. } | Self::Reject { decided_at, .. } => *decided_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_as_str() {
        assert_eq!(OrderStatus::Pending.as_str(), "pending");
        assert_eq!(OrderStatus::Approved.as_str(), "approved");
        assert_eq!(OrderStatus::Rejected.as_str(), "rejected");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(OrderStatus::parse("Pending"), Some(OrderStatus::Pending));
        assert_eq!(OrderStatus::parse("APPROVED"), Some(OrderStatus::Approved));
        assert_eq!(OrderStatus::parse(" rejected "), Some(OrderStatus::Rejected));
        assert_eq!(OrderStatus::parse("draft"), None);
    }

    #[test]
    fn test_status_terminal() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(OrderStatus::Approved.is_terminal());
        assert!(OrderStatus::Rejected.is_terminal());
    }
}
