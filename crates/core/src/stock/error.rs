//! Stock ledger error types.
//!
//! All ledger operations are fail-closed: any of these errors means nothing
//! was written.

use thiserror::Error;
use uuid::Uuid;

use crate::requisition::types::OrderStatus;
use crate::stock::types::RecordKind;

/// Errors that can occur during stock ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// A referenced record does not exist.
    #[error("{kind} {id} not found")]
    NotFound {
        /// What was looked up.
        kind: RecordKind,
        /// The identifier that was not found.
        id: Uuid,
    },

    /// The order is not in a state that allows the operation.
    #[error("Order is already {current_status}")]
    InvalidState {
        /// The order's current status.
        current_status: OrderStatus,
    },

    /// The operation would drive stock below zero.
    #[error("Insufficient stock for {name}. Available: {available}, Requested: {requested}")]
    InsufficientStock {
        /// The consumable that is short.
        consumable_id: Uuid,
        /// Its display name.
        name: String,
        /// Stock at the time of the check.
        available: i32,
        /// Quantity asked for.
        requested: i32,
    },

    /// The consumable is not returnable.
    #[error("Consumable {consumable_id} is not returnable")]
    NotReturnable {
        /// The consumable of the borrow.
        consumable_id: Uuid,
    },

    /// Returned plus damaged does not equal the borrowed quantity.
    #[error("Return quantities must total {expected}, got {provided}")]
    QuantityMismatch {
        /// The borrowed quantity.
        expected: i32,
        /// returned + damaged as provided.
        provided: i32,
    },

    /// The borrow has already been reconciled.
    #[error("Borrow {borrow_id} has already been returned")]
    AlreadyReturned {
        /// The borrow record.
        borrow_id: Uuid,
    },

    /// A quantity was out of range.
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity {
        /// The offending value.
        quantity: i32,
    },

    /// A request field was malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The backing store failed; the transaction was rolled back.
    #[error("Storage failure: {message}")]
    StorageFailure {
        /// Driver message. Not meant for clients.
        message: String,
        /// True for serialization conflicts, which succeed when retried.
        retryable: bool,
    },
}

impl LedgerError {
    /// Shorthand for a missing order.
    #[must_use]
    pub fn order_not_found(id: Uuid) -> Self {
        Self::NotFound {
            kind: RecordKind::Order,
            id,
        }
    }

    /// Shorthand for a missing consumable.
    #[must_use]
    pub fn consumable_not_found(id: Uuid) -> Self {
        Self::NotFound {
            kind: RecordKind::Consumable,
            id,
        }
    }

    /// Shorthand for a missing borrow.
    #[must_use]
    pub fn borrow_not_found(id: Uuid) -> Self {
        Self::NotFound {
            kind: RecordKind::Borrow,
            id,
        }
    }

    /// Storage failure that a retry may clear.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::StorageFailure {
            message: message.into(),
            retryable: true,
        }
    }

    /// Storage failure that a retry will not clear.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageFailure {
            message: message.into(),
            retryable: false,
        }
    }

    /// Returns true if repeating the same call may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageFailure { retryable: true, .. })
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidQuantity { .. } | Self::InvalidInput(_) => 400,
            Self::NotFound { .. } => 404,
            Self::InvalidState { .. } | Self::AlreadyReturned { .. } => 409,
            Self::InsufficientStock { .. }
            | Self::NotReturnable { .. }
            | Self::QuantityMismatch { .. } => 422,
            Self::StorageFailure {
                retryable: true, ..
            } => 503,
            Self::StorageFailure { .. } => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InvalidState { .. } => "INVALID_STATE",
            Self::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            Self::NotReturnable { .. } => "NOT_RETURNABLE",
            Self::QuantityMismatch { .. } => "QUANTITY_MISMATCH",
            Self::AlreadyReturned { .. } => "ALREADY_RETURNED",
            Self::InvalidQuantity { .. } => "INVALID_QUANTITY",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::StorageFailure {
                retryable: true, ..
            } => "STORAGE_CONFLICT",
            Self::StorageFailure { .. } => "STORAGE_FAILURE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = LedgerError::order_not_found(Uuid::nil());
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(err.to_string().starts_with("order "));
    }

    #[test]
    fn test_invalid_state_error() {
        let err = LedgerError::InvalidState {
            current_status: OrderStatus::Approved,
        };
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "INVALID_STATE");
        assert!(err.to_string().contains("approved"));
    }

    #[test]
    fn test_insufficient_stock_error() {
        let err = LedgerError::InsufficientStock {
            consumable_id: Uuid::nil(),
            name: "USB Cables".to_string(),
            available: 2,
            requested: 5,
        };
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.error_code(), "INSUFFICIENT_STOCK");
        assert_eq!(
            err.to_string(),
            "Insufficient stock for USB Cables. Available: 2, Requested: 5"
        );
    }

    #[test]
    fn test_quantity_mismatch_error() {
        let err = LedgerError::QuantityMismatch {
            expected: 5,
            provided: 4,
        };
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.error_code(), "QUANTITY_MISMATCH");
        assert!(err.to_string().contains('5'));
        assert!(err.to_string().contains('4'));
    }

    #[test]
    fn test_not_returnable_error() {
        let err = LedgerError::NotReturnable {
            consumable_id: Uuid::nil(),
        };
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.error_code(), "NOT_RETURNABLE");
    }

    #[test]
    fn test_already_returned_error() {
        let err = LedgerError::AlreadyReturned {
            borrow_id: Uuid::nil(),
        };
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "ALREADY_RETURNED");
    }

    #[test]
    fn test_storage_failure_error() {
        let err = LedgerError::storage("connection reset by peer");
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.error_code(), "STORAGE_FAILURE");
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_serialization_conflict_is_retryable() {
        let err = LedgerError::conflict("could not serialize access");
        assert_eq!(err.status_code(), 503);
        assert_eq!(err.error_code(), "STORAGE_CONFLICT");
        assert!(err.is_retryable());
        assert!(!LedgerError::borrow_not_found(Uuid::nil()).is_retryable());
    }
}
