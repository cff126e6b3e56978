//! Core business logic for LabStock.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and stock calculations live here.
//!
//! # Modules
//!
//! - `stock` - Stock ledger planning for approvals, borrows and returns
//! - `requisition` - Requisition order lifecycle and placement rules
//! - `catalog` - Consumable catalog validation
//! - `lab` - Laboratories and their durable assets
//! - `audit` - Audit events emitted by every administrative mutation
//! - `export` - CSV exports of orders and inventory

pub mod audit;
pub mod catalog;
pub mod export;
pub mod lab;
pub mod requisition;
pub mod stock;
