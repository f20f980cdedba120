//! Core business logic for Tallybook.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and sign rules live here.
//!
//! # Modules
//!
//! - `operation` - Operation type catalog and sign normalization
//! - `ledger` - Account ledger and transaction recorder services

pub mod ledger;
pub mod operation;

pub use operation::{OperationType, Polarity, normalize_amount};
