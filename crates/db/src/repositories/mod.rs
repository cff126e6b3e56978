//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod audit;
pub mod borrow;
pub mod catalog;
pub mod dashboard;
pub mod export;
pub mod lab;
pub mod ledger;
pub mod requisition;

mod search;

pub use audit::AuditRepository;
pub use borrow::{BorrowRepository, BorrowView};
pub use catalog::{CatalogFilter, CatalogRepository};
pub use dashboard::{DashboardRepository, DashboardStats};
pub use export::ExportRepository;
pub use lab::{LabRepository, LabSummary};
pub use ledger::{
    ApprovalOutcome, BorrowOutcome, LedgerRepository, RejectionOutcome, ReturnOutcome,
};
pub use requisition::{
    OrderDetail, OrderFilter, OrderItemDetail, OrderSummary, RequisitionRepository,
};
