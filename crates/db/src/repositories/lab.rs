//! Laboratory and asset repository.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;
use uuid::Uuid;

use labstock_core::lab::{LabError, LabService, ValidAsset, ValidLab};

use crate::entities::{
    lab_assets, laboratories,
    sea_orm_active_enums::{AssetStatus, LabStatus},
};

use super::audit::insert_event;

/// A laboratory with its asset count.
#[derive(Debug, Clone, Serialize)]
pub struct LabSummary {
    #[serde(flatten)]
    pub lab: laboratories::Model,
    pub asset_count: u64,
}

/// Laboratory repository.
#[derive(Debug, Clone)]
pub struct LabRepository {
    db: DatabaseConnection,
}

impl LabRepository {
    /// Creates a new lab repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists laboratories by name with asset counts.
    pub async fn list(&self) -> Result<Vec<LabSummary>, LabError> {
        let labs = laboratories::Entity::find()
            .order_by_asc(laboratories::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| LabError::Database(e.to_string()))?;

        let lab_ids: Vec<Uuid> = lab_assets::Entity::find()
            .select_only()
            .column(lab_assets::Column::LabId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| LabError::Database(e.to_string()))?;

        let mut counts: HashMap<Uuid, u64> = HashMap::new();
        for lab_id in lab_ids {
            *counts.entry(lab_id).or_default() += 1;
        }

        Ok(labs
            .into_iter()
            .map(|lab| LabSummary {
                asset_count: counts.get(&lab.id).copied().unwrap_or(0),
                lab,
            })
            .collect())
    }

    /// Loads one laboratory.
    pub async fn get(&self, lab_id: Uuid) -> Result<laboratories::Model, LabError> {
        laboratories::Entity::find_by_id(lab_id)
            .one(&self.db)
            .await
            .map_err(|e| LabError::Database(e.to_string()))?
            .ok_or(LabError::LabNotFound(lab_id))
    }

    /// Creates a laboratory.
    pub async fn create(&self, lab: ValidLab, actor: &str) -> Result<laboratories::Model, LabError> {
        let event = LabService::added_event(actor, &lab);
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LabError::Database(e.to_string()))?;

        let created = laboratories::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(lab.name),
            status: Set(LabStatus::from(lab.status)),
            created_at: Set(Utc::now().into()),
        }
        .insert(&txn)
        .await
        .map_err(|e| LabError::Database(e.to_string()))?;

        insert_event(&txn, &event)
            .await
            .map_err(|e| LabError::Database(e.to_string()))?;
        txn.commit()
            .await
            .map_err(|e| LabError::Database(e.to_string()))?;

        Ok(created)
    }

    /// Renames a laboratory or changes its status.
    pub async fn update(
        &self,
        lab_id: Uuid,
        lab: ValidLab,
        actor: &str,
    ) -> Result<laboratories::Model, LabError> {
        let event = LabService::edited_event(actor, lab_id, &lab);
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LabError::Database(e.to_string()))?;

        let existing = laboratories::Entity::find_by_id(lab_id)
            .one(&txn)
            .await
            .map_err(|e| LabError::Database(e.to_string()))?
            .ok_or(LabError::LabNotFound(lab_id))?;

        let mut active: laboratories::ActiveModel = existing.into();
        active.name = Set(lab.name);
        active.status = Set(LabStatus::from(lab.status));
        let updated = active
            .update(&txn)
            .await
            .map_err(|e| LabError::Database(e.to_string()))?;

        insert_event(&txn, &event)
            .await
            .map_err(|e| LabError::Database(e.to_string()))?;
        txn.commit()
            .await
            .map_err(|e| LabError::Database(e.to_string()))?;

        Ok(updated)
    }

    /// Deletes a laboratory that owns no assets.
    pub async fn delete(&self, lab_id: Uuid, actor: &str) -> Result<(), LabError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LabError::Database(e.to_string()))?;

        let existing = laboratories::Entity::find_by_id(lab_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| LabError::Database(e.to_string()))?
            .ok_or(LabError::LabNotFound(lab_id))?;

        let assets = lab_assets::Entity::find()
            .filter(lab_assets::Column::LabId.eq(lab_id))
            .count(&txn)
            .await
            .map_err(|e| LabError::Database(e.to_string()))?;
        LabService::ensure_deletable(lab_id, assets)?;

        let event = LabService::deleted_event(actor, lab_id, &existing.name);
        existing
            .delete(&txn)
            .await
            .map_err(|e| LabError::Database(e.to_string()))?;

        insert_event(&txn, &event)
            .await
            .map_err(|e| LabError::Database(e.to_string()))?;
        txn.commit()
            .await
            .map_err(|e| LabError::Database(e.to_string()))?;

        tracing::info!(lab_id = %lab_id, "laboratory deleted");
        Ok(())
    }

    /// Lists a laboratory's assets by name.
    pub async fn assets(
        &self,
        lab_id: Uuid,
        status: Option<AssetStatus>,
    ) -> Result<Vec<lab_assets::Model>, LabError> {
        self.get(lab_id).await?;

        let mut query = lab_assets::Entity::find().filter(lab_assets::Column::LabId.eq(lab_id));
        if let Some(status) = status {
            query = query.filter(lab_assets::Column::Status.eq(status));
        }

        query
            .order_by_asc(lab_assets::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| LabError::Database(e.to_string()))
    }

    /// Registers an asset in a laboratory.
    pub async fn add_asset(
        &self,
        lab_id: Uuid,
        asset: ValidAsset,
        actor: &str,
    ) -> Result<lab_assets::Model, LabError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LabError::Database(e.to_string()))?;

        // Blocks a concurrent delete of the lab until commit.
        let lab = laboratories::Entity::find_by_id(lab_id)
            .lock_shared()
            .one(&txn)
            .await
            .map_err(|e| LabError::Database(e.to_string()))?
            .ok_or(LabError::LabNotFound(lab_id))?;

        let event = LabService::asset_added_event(actor, &lab.name, &asset);

        let created = lab_assets::ActiveModel {
            id: Set(Uuid::new_v4()),
            lab_id: Set(lab_id),
            name: Set(asset.name),
            category: Set(asset.category),
            status: Set(AssetStatus::from(asset.status)),
            purchase_date: Set(asset.purchase_date),
            description: Set(asset.description),
            created_at: Set(Utc::now().into()),
        }
        .insert(&txn)
        .await
        .map_err(|e| LabError::Database(e.to_string()))?;

        insert_event(&txn, &event)
            .await
            .map_err(|e| LabError::Database(e.to_string()))?;
        txn.commit()
            .await
            .map_err(|e| LabError::Database(e.to_string()))?;

        Ok(created)
    }
}
