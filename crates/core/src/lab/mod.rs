//! Laboratories and their durable assets.

pub mod error;
pub mod service;
pub mod types;

pub use error::LabError;
pub use service::LabService;
pub use types::{AssetDraft, AssetStatus, LabDraft, LabStatus, ValidAsset, ValidLab};
