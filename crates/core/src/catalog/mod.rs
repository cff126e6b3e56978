//! Consumable catalog.
//!
//! Validation for catalog edits. Stock counters are never changed here: the
//! initial quantity is set on creation and every later change goes through
//! the stock ledger.

pub mod error;
pub mod service;
pub mod types;

pub use error::CatalogError;
pub use service::CatalogService;
pub use types::{ConsumableDraft, ConsumableUpdate, ValidConsumable, ValidUpdate};
