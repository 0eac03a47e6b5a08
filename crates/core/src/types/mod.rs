//! Core types for garment costing.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod business_key;
pub mod category;
pub mod document_type;
pub mod id;
pub mod percentage;
pub mod status;

pub use business_key::{BusinessKey, BusinessKeyError};
pub use category::CostCategory;
pub use document_type::DocumentType;
pub use id::*;
pub use percentage::Percentage;
pub use status::*;
