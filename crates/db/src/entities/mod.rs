//! `SeaORM` entity definitions.

pub mod audit_logs;
pub mod borrows;
pub mod consumables;
pub mod lab_assets;
pub mod laboratories;
pub mod order_items;
pub mod orders;
pub mod returns;
pub mod sea_orm_active_enums;
