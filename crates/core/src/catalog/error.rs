//! Catalog error types.

use thiserror::Error;
use uuid::Uuid;

/// Errors from catalog management.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A required text field was blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Initial stock cannot be negative.
    #[error("Quantity cannot be negative: {0}")]
    NegativeQuantity(i32),

    /// The consumable does not exist.
    #[error("Consumable not found: {0}")]
    NotFound(Uuid),

    /// Borrows without a return still reference the consumable.
    #[error("Consumable {consumable_id} has {open} open borrow(s)")]
    HasOpenBorrows {
        /// The consumable.
        consumable_id: Uuid,
        /// Number of borrows not yet returned.
        open: u64,
    },

    /// Pending orders still have lines for the consumable.
    #[error("Consumable {consumable_id} is requested by {orders} pending order(s)")]
    InPendingOrders {
        /// The consumable.
        consumable_id: Uuid,
        /// Number of pending orders with a line for it.
        orders: u64,
    },

    /// Storage error.
    #[error("Database error: {0}")]
    Database(String),
}

impl CatalogError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingField(_) | Self::NegativeQuantity(_) => 400,
            Self::NotFound(_) => 404,
            Self::HasOpenBorrows { .. } | Self::InPendingOrders { .. } => 409,
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::NegativeQuantity(_) => "INVALID_QUANTITY",
            Self::NotFound(_) => "NOT_FOUND",
            Self::HasOpenBorrows { .. } => "HAS_OPEN_BORROWS",
            Self::InPendingOrders { .. } => "IN_PENDING_ORDERS",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}
