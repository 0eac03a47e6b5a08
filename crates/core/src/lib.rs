//! Garment Costing Core - Shared types library.
//!
//! This crate provides common types used across all garment costing components:
//! - `garment-costing` - Derivation engine, form sessions and approval workflow
//! - `garment-costing-cli` - Command-line front-end for cost sheets and sample sales
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no logging, no
//! derivation logic. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, percentages, business keys,
//!   statuses and cost categories

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
