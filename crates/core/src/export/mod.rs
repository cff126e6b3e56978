//! CSV exports of orders and inventory.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::audit::{AuditAction, AuditEvent};
use crate::requisition::types::OrderStatus;

const ORDER_HEADERS: [&str; 8] = [
    "Order ID",
    "Requester",
    "Department",
    "Purpose",
    "Date Needed",
    "Status",
    "Items",
    "Created At",
];

const INVENTORY_HEADERS: [&str; 8] = [
    "ID",
    "Name",
    "Description",
    "Category",
    "Quantity",
    "Damaged",
    "Returnable",
    "Created At",
];

/// Errors while writing an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to flush CSV output: {0}")]
    Flush(String),
}

/// One order with its items, newest first.
#[derive(Debug, Clone)]
pub struct OrderExportRow {
    pub order_id: Uuid,
    pub requester: String,
    pub department: String,
    pub purpose: String,
    pub date_needed: NaiveDate,
    pub status: OrderStatus,
    /// `(consumable name, quantity)` pairs.
    pub items: Vec<(String, i32)>,
    pub created_at: DateTime<Utc>,
}

impl OrderExportRow {
    /// Items as `name (qty); name (qty)`, or `No items`.
    #[must_use]
    pub fn items_summary(&self) -> String {
        if self.items.is_empty() {
            return "No items".to_string();
        }
        self.items
            .iter()
            .map(|(name, quantity)| format!("{name} ({quantity})"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// One consumable, ordered by category then name.
#[derive(Debug, Clone)]
pub struct InventoryExportRow {
    pub consumable_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub quantity: i32,
    pub damaged: i32,
    pub returnable: bool,
    pub created_at: DateTime<Utc>,
}

/// A finished export ready to send.
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: String,
    pub body: Vec<u8>,
    pub rows: usize,
    pub audit: AuditEvent,
}

/// Writes the orders export.
pub fn orders_csv(
    rows: &[OrderExportRow],
    actor: &str,
    now: DateTime<Utc>,
) -> Result<CsvExport, ExportError> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(ORDER_HEADERS)?;

    for row in rows {
        writer.write_record([
            row.order_id.to_string(),
            row.requester.clone(),
            row.department.clone(),
            row.purpose.clone(),
            row.date_needed.to_string(),
            row.status.to_string(),
            row.items_summary(),
            timestamp(row.created_at),
        ])?;
    }

    let body = writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.to_string()))?;

    Ok(CsvExport {
        filename: filename("orders", now),
        body,
        rows: rows.len(),
        audit: AuditEvent::new(
            actor,
            AuditAction::ExportOrders,
            format!("Exported {} orders to CSV", rows.len()),
        ),
    })
}

/// Writes the inventory export.
pub fn inventory_csv(
    rows: &[InventoryExportRow],
    actor: &str,
    now: DateTime<Utc>,
) -> Result<CsvExport, ExportError> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(INVENTORY_HEADERS)?;

    for row in rows {
        writer.write_record([
            row.consumable_id.to_string(),
            row.name.clone(),
            row.description.clone().unwrap_or_default(),
            row.category.clone(),
            row.quantity.to_string(),
            row.damaged.to_string(),
            if row.returnable { "yes" } else { "no" }.to_string(),
            timestamp(row.created_at),
        ])?;
    }

    let body = writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.to_string()))?;

    Ok(CsvExport {
        filename: filename("inventory", now),
        body,
        rows: rows.len(),
        audit: AuditEvent::new(
            actor,
            AuditAction::ExportInventory,
            format!("Exported {} items to CSV", rows.len()),
        ),
    })
}

/// `{kind}_export_YYYYmmdd_HHMMSS.csv`
#[must_use]
pub fn filename(kind: &str, now: DateTime<Utc>) -> String {
    format!("{kind}_export_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}
