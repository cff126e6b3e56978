//! `SeaORM` Entity for laboratories table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::LabStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "laboratories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub status: LabStatus,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::lab_assets::Entity")]
    LabAssets,
}

impl Related<super::lab_assets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LabAssets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
