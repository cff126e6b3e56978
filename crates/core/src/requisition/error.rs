//! Requisition placement errors.

use thiserror::Error;
use uuid::Uuid;

/// Errors raised while placing a requisition order.
#[derive(Debug, Error)]
pub enum RequisitionError {
    /// A required text field was blank.
    #[error("Field '{0}' is required")]
    MissingField(&'static str),

    /// The order has no lines.
    #[error("Order must contain at least one item")]
    EmptyOrder,

    /// A line requested a non-positive quantity.
    #[error("Invalid quantity {quantity} for consumable {consumable_id}")]
    InvalidQuantity {
        /// The consumable of the offending line.
        consumable_id: Uuid,
        /// The requested quantity.
        quantity: i32,
    },

    /// A line referenced a consumable that does not exist.
    #[error("Consumable {0} not found")]
    ConsumableNotFound(Uuid),

    /// Order not found.
    #[error("Order {0} not found")]
    OrderNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl RequisitionError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingField(_) | Self::EmptyOrder | Self::InvalidQuantity { .. } => 400,
            Self::ConsumableNotFound(_) => 422,
            Self::OrderNotFound(_) => 404,
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::EmptyOrder => "EMPTY_ORDER",
            Self::InvalidQuantity { .. } => "INVALID_QUANTITY",
            Self::ConsumableNotFound(_) => "CONSUMABLE_NOT_FOUND",
            Self::OrderNotFound(_) => "ORDER_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}
