//! `SeaORM` Entity for returns table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "returns")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub borrow_id: Uuid,
    pub returned_quantity: i32,
    pub damaged_quantity: i32,
    pub recorded_by: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::borrows::Entity",
        from = "Column::BorrowId",
        to = "super::borrows::Column::Id"
    )]
    Borrows,
}

impl Related<super::borrows::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Borrows.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
