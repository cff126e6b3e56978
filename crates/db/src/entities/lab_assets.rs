//! `SeaORM` Entity for lab_assets table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::AssetStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "lab_assets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub lab_id: Uuid,
    pub name: String,
    pub category: String,
    pub status: AssetStatus,
    pub purchase_date: Option<Date>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::laboratories::Entity",
        from = "Column::LabId",
        to = "super::laboratories::Column::Id"
    )]
    Laboratories,
}

impl Related<super::laboratories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Laboratories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
