//! Stock ledger for LabStock.
//!
//! Every change to a consumable's `quantity` or `damaged` count is planned
//! here from a snapshot of the current stock. A plan is only produced when
//! every precondition holds, so a caller that applies plans inside one
//! database transaction never writes a partial or negative state.
//!
//! # Modules
//!
//! - `types` - Stock snapshots, requests and plans
//! - `error` - Ledger error taxonomy
//! - `service` - The `StockLedger` planner

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::LedgerError;
pub use service::StockLedger;
pub use types::{
    ApprovalPlan, BorrowPlan, BorrowRequest, BorrowSnapshot, BorrowerType, RecordKind,
    RejectionPlan, ReturnPlan, ReturnRequest, StockChange, StockLevel,
};
