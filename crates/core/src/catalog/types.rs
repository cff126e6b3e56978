//! Catalog input types.

use serde::{Deserialize, Serialize};

/// A new consumable as submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumableDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    pub quantity: i32,
    #[serde(default)]
    pub returnable: bool,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Edit of a consumable's descriptive fields.
///
/// There is deliberately no quantity here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumableUpdate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    pub returnable: bool,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A draft that passed validation, with text fields trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidConsumable {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub quantity: i32,
    pub returnable: bool,
    pub image_url: Option<String>,
}

/// An update that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidUpdate {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub returnable: bool,
    pub image_url: Option<String>,
}
