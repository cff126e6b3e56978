//! Lab validation and audit events.

use uuid::Uuid;

use crate::audit::{AuditAction, AuditEvent};
use crate::lab::error::LabError;
use crate::lab::types::{AssetDraft, LabDraft, ValidAsset, ValidLab};

/// Stateless service for laboratories and assets.
pub struct LabService;

impl LabService {
    /// Validates a laboratory create or edit.
    pub fn validate_lab(draft: LabDraft) -> Result<ValidLab, LabError> {
        Ok(ValidLab {
            name: required(&draft.name, "name")?,
            status: draft.status,
        })
    }

    /// Validates a new asset.
    pub fn validate_asset(draft: AssetDraft) -> Result<ValidAsset, LabError> {
        Ok(ValidAsset {
            name: required(&draft.name, "name")?,
            category: required(&draft.category, "category")?,
            status: draft.status,
            purchase_date: draft.purchase_date,
            description: draft
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        })
    }

    /// A laboratory can only be deleted once it owns no assets.
    pub fn ensure_deletable(lab_id: Uuid, assets: u64) -> Result<(), LabError> {
        if assets > 0 {
            return Err(LabError::LabHasAssets { lab_id, assets });
        }
        Ok(())
    }

    #[must_use]
    pub fn added_event(actor: &str, lab: &ValidLab) -> AuditEvent {
        AuditEvent::new(
            actor,
            AuditAction::AddLab,
            format!("Added lab {} ({})", lab.name, lab.status),
        )
    }

    #[must_use]
    pub fn edited_event(actor: &str, lab_id: Uuid, lab: &ValidLab) -> AuditEvent {
        AuditEvent::new(
            actor,
            AuditAction::EditLab,
            format!("Edited lab #{lab_id}: {} ({})", lab.name, lab.status),
        )
    }

    #[must_use]
    pub fn deleted_event(actor: &str, lab_id: Uuid, name: &str) -> AuditEvent {
        AuditEvent::new(
            actor,
            AuditAction::DeleteLab,
            format!("Deleted lab #{lab_id}: {name}"),
        )
    }

    #[must_use]
    pub fn asset_added_event(actor: &str, lab_name: &str, asset: &ValidAsset) -> AuditEvent {
        AuditEvent::new(
            actor,
            AuditAction::AddAsset,
            format!("Added asset {} ({}) to {lab_name}", asset.name, asset.category),
        )
    }
}

fn required(value: &str, field: &'static str) -> Result<String, LabError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LabError::MissingField(field));
    }
    Ok(trimmed.to_string())
}
