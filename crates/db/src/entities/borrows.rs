//! `SeaORM` Entity for borrows table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::BorrowerType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "borrows")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub consumable_id: Uuid,
    pub borrower_name: String,
    pub borrower_type: BorrowerType,
    pub quantity: i32,
    pub recorded_by: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::consumables::Entity",
        from = "Column::ConsumableId",
        to = "super::consumables::Column::Id"
    )]
    Consumables,
    #[sea_orm(has_one = "super::returns::Entity")]
    Returns,
}

impl Related<super::consumables::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Consumables.def()
    }
}

impl Related<super::returns::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Returns.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
