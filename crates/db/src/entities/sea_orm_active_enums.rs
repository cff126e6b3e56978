//! Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use labstock_core::lab::types as lab;
use labstock_core::requisition::types as requisition;
use labstock_core::stock::types as stock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "order_status")]
pub enum OrderStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl From<OrderStatus> for requisition::OrderStatus {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Pending => Self::Pending,
            OrderStatus::Approved => Self::Approved,
            OrderStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<requisition::OrderStatus> for OrderStatus {
    fn from(status: requisition::OrderStatus) -> Self {
        match status {
            requisition::OrderStatus::Pending => Self::Pending,
            requisition::OrderStatus::Approved => Self::Approved,
            requisition::OrderStatus::Rejected => Self::Rejected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "borrower_type")]
pub enum BorrowerType {
    #[sea_orm(string_value = "student")]
    Student,
    #[sea_orm(string_value = "staff")]
    Staff,
}

impl From<BorrowerType> for stock::BorrowerType {
    fn from(kind: BorrowerType) -> Self {
        match kind {
            BorrowerType::Student => Self::Student,
            BorrowerType::Staff => Self::Staff,
        }
    }
}

impl From<stock::BorrowerType> for BorrowerType {
    fn from(kind: stock::BorrowerType) -> Self {
        match kind {
            stock::BorrowerType::Student => Self::Student,
            stock::BorrowerType::Staff => Self::Staff,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "lab_status")]
pub enum LabStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
    #[sea_orm(string_value = "maintenance")]
    Maintenance,
}

impl From<LabStatus> for lab::LabStatus {
    fn from(status: LabStatus) -> Self {
        match status {
            LabStatus::Active => Self::Active,
            LabStatus::Inactive => Self::Inactive,
            LabStatus::Maintenance => Self::Maintenance,
        }
    }
}

impl From<lab::LabStatus> for LabStatus {
    fn from(status: lab::LabStatus) -> Self {
        match status {
            lab::LabStatus::Active => Self::Active,
            lab::LabStatus::Inactive => Self::Inactive,
            lab::LabStatus::Maintenance => Self::Maintenance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "asset_status")]
pub enum AssetStatus {
    #[sea_orm(string_value = "available")]
    Available,
    #[sea_orm(string_value = "in_use")]
    InUse,
    #[sea_orm(string_value = "maintenance")]
    Maintenance,
    #[sea_orm(string_value = "retired")]
    Retired,
}

impl From<AssetStatus> for lab::AssetStatus {
    fn from(status: AssetStatus) -> Self {
        match status {
            AssetStatus::Available => Self::Available,
            AssetStatus::InUse => Self::InUse,
            AssetStatus::Maintenance => Self::Maintenance,
            AssetStatus::Retired => Self::Retired,
        }
    }
}

impl From<lab::AssetStatus> for AssetStatus {
    fn from(status: lab::AssetStatus) -> Self {
        match status {
            lab::AssetStatus::Available => Self::Available,
            lab::AssetStatus::InUse => Self::InUse,
            lab::AssetStatus::Maintenance => Self::Maintenance,
            lab::AssetStatus::Retired => Self::Retired,
        }
    }
}
