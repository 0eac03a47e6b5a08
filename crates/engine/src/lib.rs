//! Garment Costing - derivation engine for cost sheets and sample sales.
//!
//! Every derived monetary field on a document is a pure function of the
//! document's inputs. This crate owns those functions and the glue that
//! decides when to run them.
//!
//! # Modules
//!
//! - [`cost_sheet`] - Line items, category subtotals, profit and FOB price
//! - [`sample_sales`] - Sample-sales amount and gross profit
//! - [`field`] - Name-based field access used by form sessions
//! - [`form`] - Explicit handler registry and batched recompute
//! - [`workflow`] - Approval status gating and the approval collaborator
//! - [`config`] - Engine configuration from environment variables
//! - [`input`] - How zero-valued inputs are interpreted
//!
//! # Example
//!
//! ```rust
//! use garment_costing::{CostDocument, EngineConfig, LineItem};
//! use garment_costing_core::CostCategory;
//! use rust_decimal::Decimal;
//!
//! let config = EngineConfig::default();
//! let mut sheet = CostDocument::default();
//! sheet.push_item(
//!     CostCategory::Production,
//!     LineItem {
//!         unit_price: Some(Decimal::from(50)),
//!         quantity: Some(Decimal::from(3)),
//!         ..LineItem::default()
//!     },
//! );
//! sheet.recompute_all(&config);
//!
//! assert_eq!(sheet.totals.production_cost, Decimal::from(150));
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod checked;
pub mod config;
pub mod cost_sheet;
pub mod field;
pub mod form;
pub mod input;
pub mod sample_sales;
pub mod workflow;

pub use config::{ConfigError, EngineConfig};
pub use cost_sheet::{CostDocument, CostTotals, ItemUpdate, LineItem};
pub use field::{FieldError, FieldStore, FieldValue};
pub use form::{FormDocument, FormSession, HandlerRegistry};
pub use input::InputPolicy;
pub use sample_sales::{SampleCostField, SampleSalesRecord};
pub use workflow::{ApprovalWorkflow, InMemoryApprovalWorkflow, WorkflowAction, WorkflowError};
