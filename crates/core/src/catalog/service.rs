//! Catalog validation and audit events.

use uuid::Uuid;

use crate::audit::{AuditAction, AuditEvent};
use crate::catalog::error::CatalogError;
use crate::catalog::types::{ConsumableDraft, ConsumableUpdate, ValidConsumable, ValidUpdate};

/// Stateless service for catalog edits.
pub struct CatalogService;

impl CatalogService {
    /// Validates a new consumable.
    pub fn validate_draft(draft: ConsumableDraft) -> Result<ValidConsumable, CatalogError> {
        let name = required(&draft.name, "name")?;
        let category = required(&draft.category, "category")?;
        if draft.quantity < 0 {
            return Err(CatalogError::NegativeQuantity(draft.quantity));
        }

        Ok(ValidConsumable {
            name,
            description: optional(draft.description),
            category,
            quantity: draft.quantity,
            returnable: draft.returnable,
            image_url: optional(draft.image_url),
        })
    }

    /// Validates an edit of descriptive fields.
    pub fn validate_update(update: ConsumableUpdate) -> Result<ValidUpdate, CatalogError> {
        Ok(ValidUpdate {
            name: required(&update.name, "name")?,
            description: optional(update.description),
            category: required(&update.category, "category")?,
            returnable: update.returnable,
            image_url: optional(update.image_url),
        })
    }

    /// Refuses deletion while borrows are outstanding or pending orders
    /// still request the consumable. Deleting would cascade into their lines.
    pub fn ensure_deletable(
        consumable_id: Uuid,
        open_borrows: u64,
        pending_orders: u64,
    ) -> Result<(), CatalogError> {
        if open_borrows > 0 {
            return Err(CatalogError::HasOpenBorrows {
                consumable_id,
                open: open_borrows,
            });
        }
        if pending_orders > 0 {
            return Err(CatalogError::InPendingOrders {
                consumable_id,
                orders: pending_orders,
            });
        }
        Ok(())
    }

    /// Low stock means strictly below the threshold.
    #[must_use]
    pub fn is_low_stock(quantity: i32, threshold: i32) -> bool {
        quantity < threshold
    }

    #[must_use]
    pub fn added_event(actor: &str, item: &ValidConsumable) -> AuditEvent {
        AuditEvent::new(
            actor,
            AuditAction::AddConsumable,
            format!(
                "Added {} ({}) with quantity {}",
                item.name, item.category, item.quantity
            ),
        )
    }

    #[must_use]
    pub fn edited_event(actor: &str, consumable_id: Uuid, update: &ValidUpdate) -> AuditEvent {
        AuditEvent::new(
            actor,
            AuditAction::EditConsumable,
            format!("Edited consumable #{consumable_id}: {}", update.name),
        )
    }

    #[must_use]
    pub fn deleted_event(actor: &str, consumable_id: Uuid, name: &str) -> AuditEvent {
        AuditEvent::new(
            actor,
            AuditAction::DeleteConsumable,
            format!("Deleted consumable #{consumable_id}: {name}"),
        )
    }
}

fn required(value: &str, field: &'static str) -> Result<String, CatalogError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
