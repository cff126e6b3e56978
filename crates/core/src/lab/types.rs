//! Lab and asset types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operational status of a laboratory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LabStatus {
    /// In use.
    #[default]
    Active,
    /// Closed.
    Inactive,
    /// Temporarily unavailable.
    Maintenance,
}

impl LabStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Maintenance => "maintenance",
        }
    }

    /// Parses a status from a string, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "maintenance" => Some(Self::Maintenance),
            _ => None,
        }
    }
}

impl fmt::Display for LabStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a lab asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    #[default]
    Available,
    InUse,
    Maintenance,
    Retired,
}

impl AssetStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::InUse => "in_use",
            Self::Maintenance => "maintenance",
            Self::Retired => "retired",
        }
    }

    /// Parses a status, accepting `in use`, `in-use` and `in_use`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "available" => Some(Self::Available),
            "in_use" => Some(Self::InUse),
            "maintenance" => Some(Self::Maintenance),
            "retired" => Some(Self::Retired),
            _ => None,
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A laboratory as submitted for create or edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabDraft {
    pub name: String,
    #[serde(default)]
    pub status: LabStatus,
}

/// A validated laboratory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidLab {
    pub name: String,
    pub status: LabStatus,
}

/// An asset as submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetDraft {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub status: AssetStatus,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A validated asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidAsset {
    pub name: String,
    pub category: String,
    pub status: AssetStatus,
    pub purchase_date: Option<NaiveDate>,
    pub description: Option<String>,
}
