//! Integration tests for Garment Costing.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p garment-costing-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cost_sheet_session` - Cost sheet editing through a form session
//! - `sample_sales_session` - Sample-sales editing through a form session
//! - `approval_workflow` - Status gating and version management
//! - `fixtures` - Documents loaded from the YAML files under `fixtures/`
//!
//! This crate holds the shared builders and fixture loading.

use std::path::PathBuf;

use garment_costing::{CostDocument, LineItem, SampleSalesRecord};
use garment_costing_core::CostCategory;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

/// Absolute path of a file under `fixtures/`.
#[must_use]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

/// Parse a YAML fixture.
///
/// # Panics
///
/// Panics if the file is missing or malformed; fixtures are part of the
/// test suite.
#[must_use]
pub fn load_fixture<T: DeserializeOwned>(name: &str) -> T {
    let path = fixture_path(name);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read fixture {}: {e}", path.display()));
    serde_yaml::from_str(&content)
        .unwrap_or_else(|e| panic!("malformed fixture {}: {e}", path.display()))
}

/// A consumption-based line item.
#[must_use]
pub const fn consumption_item(
    unit_price: Decimal,
    net_consumption: Decimal,
    loss_rate: Option<Decimal>,
) -> LineItem {
    LineItem {
        item_type: None,
        sequence: None,
        item_name: None,
        unit_price: Some(unit_price),
        quantity: None,
        net_consumption: Some(net_consumption),
        loss_rate,
        total_consumption: None,
        amount: None,
    }
}

/// A production line item priced per piece.
#[must_use]
pub const fn production_item(unit_price: Decimal, quantity: Decimal) -> LineItem {
    LineItem {
        item_type: Some(CostCategory::Production),
        sequence: None,
        item_name: None,
        unit_price: Some(unit_price),
        quantity: Some(quantity),
        net_consumption: None,
        loss_rate: None,
        total_consumption: None,
        amount: None,
    }
}

/// A draft cost sheet for `customer` / `style_number` with no items.
#[must_use]
pub fn empty_sheet(customer: &str, style_number: &str) -> CostDocument {
    CostDocument {
        customer: Some(customer.to_owned()),
        style_number: Some(style_number.to_owned()),
        ..CostDocument::default()
    }
}

/// A sample sale with quantity and unit price filled in.
#[must_use]
pub fn sample_sale(quantity: Decimal, unit_price: Decimal) -> SampleSalesRecord {
    SampleSalesRecord {
        quantity: Some(quantity),
        unit_price: Some(unit_price),
        ..SampleSalesRecord::default()
    }
}
