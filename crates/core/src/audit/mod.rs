//! Audit events for administrative actions.
//!
//! Core operations never write audit rows themselves. Each mutating
//! operation returns an [`AuditEvent`] and the caller persists it in the
//! same database transaction as the mutation it describes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Administrative action recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// A pending order was approved and stock deducted.
    ApproveOrder,
    /// A pending order was rejected.
    RejectOrder,
    /// Stock was lent out.
    RecordBorrow,
    /// A loan was reconciled.
    RecordReturn,
    /// A consumable was added to the catalog.
    AddConsumable,
    /// A consumable's descriptive fields were edited.
    EditConsumable,
    /// A consumable was removed from the catalog.
    DeleteConsumable,
    /// Orders were exported.
    ExportOrders,
    /// Inventory was exported.
    ExportInventory,
    /// A laboratory was created.
    AddLab,
    /// A laboratory was edited.
    EditLab,
    /// A laboratory was deleted.
    DeleteLab,
    /// An asset was registered in a laboratory.
    AddAsset,
}

impl AuditAction {
    /// Returns the label stored in the audit log.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApproveOrder => "Approve Order",
            Self::RejectOrder => "Reject Order",
            Self::RecordBorrow => "Record Borrow",
            Self::RecordReturn => "Record Return",
            Self::AddConsumable => "Add Consumable",
            Self::EditConsumable => "Edit Consumable",
            Self::DeleteConsumable => "Delete Consumable",
            Self::ExportOrders => "Export Orders",
            Self::ExportInventory => "Export Inventory",
            Self::AddLab => "Add Lab",
            Self::EditLab => "Edit Lab",
            Self::DeleteLab => "Delete Lab",
            Self::AddAsset => "Add Asset",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One audit log entry: who did what.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Identity of the acting administrator.
    pub actor: String,
    /// The action performed.
    pub action: AuditAction,
    /// Free-text detail.
    pub details: String,
}

impl AuditEvent {
    /// Creates a new audit event.
    #[must_use]
    pub fn new(actor: impl Into<String>, action: AuditAction, details: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            action,
            details: details.into(),
        }
    }
}
