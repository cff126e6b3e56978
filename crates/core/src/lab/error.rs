//! Lab error types.

use thiserror::Error;
use uuid::Uuid;

/// Errors from laboratory management.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabError {
    /// A required text field was blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Laboratory does not exist.
    #[error("Laboratory not found: {0}")]
    LabNotFound(Uuid),

    /// Laboratory still owns assets.
    #[error("Laboratory {lab_id} still has {assets} asset(s)")]
    LabHasAssets {
        /// The laboratory.
        lab_id: Uuid,
        /// Number of assets registered to it.
        assets: u64,
    },

    /// Storage error.
    #[error("Database error: {0}")]
    Database(String),
}

impl LabError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingField(_) => 400,
            Self::LabNotFound(_) => 404,
            Self::LabHasAssets { .. } => 409,
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::LabNotFound(_) => "NOT_FOUND",
            Self::LabHasAssets { .. } => "LAB_HAS_ASSETS",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}
