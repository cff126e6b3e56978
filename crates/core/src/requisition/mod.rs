//! Requisition orders for LabStock.
//!
//! Staff place orders for consumables; administrators approve or reject
//! them. Approval is where stock is deducted, see [`crate::stock`].
//!
//! # Modules
//!
//! - `types` - Order status, lines and lifecycle actions
//! - `error` - Placement validation errors
//! - `service` - Lifecycle transitions and placement rules

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::RequisitionError;
pub use service::RequisitionService;
pub use types::{NewOrder, OrderAction, OrderLine, OrderStatus, ValidatedOrder};
