//! Category subtotals, profit and FOB price.

use garment_costing_core::{CostCategory, Percentage};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CostDocument;
use crate::checked;
use crate::config::EngineConfig;

/// Every derived total on a cost sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostTotals {
    pub fabric_cost: Decimal,
    pub accessory_cost: Decimal,
    pub process_cost: Decimal,
    pub production_cost: Decimal,
    /// Sum of the four category subtotals.
    pub total_production_cost: Decimal,
    /// `total_production_cost × profit_percentage / 100`.
    pub profit_amount: Decimal,
    /// `total_production_cost + profit_amount`.
    pub fob_price: Decimal,
}

impl CostTotals {
    /// Subtotal for one category.
    #[must_use]
    pub const fn category_cost(&self, category: CostCategory) -> Decimal {
        match category {
            CostCategory::Fabric => self.fabric_cost,
            CostCategory::Accessory => self.accessory_cost,
            CostCategory::Process => self.process_cost,
            CostCategory::Production => self.production_cost,
        }
    }
}

/// Recompute all totals from the document's item tables.
///
/// Items without an amount contribute zero. When the document has no profit
/// percentage the configured default (15 unless overridden) is used; under
/// the truthy input policy a zero percentage also falls back to the default.
///
/// This is a full recomputation: calling it twice without changing the
/// inputs returns identical totals. Returns `None` if any total overflows
/// `Decimal`.
#[must_use]
pub fn compute_totals(document: &CostDocument, config: &EngineConfig) -> Option<CostTotals> {
    let subtotal = |category: CostCategory| {
        checked::sum(
            document
                .items(category)
                .iter()
                .filter_map(|item| item.amount),
        )
    };

    let fabric_cost = subtotal(CostCategory::Fabric)?;
    let accessory_cost = subtotal(CostCategory::Accessory)?;
    let process_cost = subtotal(CostCategory::Process)?;
    let production_cost = subtotal(CostCategory::Production)?;
    let total_production_cost =
        checked::sum([fabric_cost, accessory_cost, process_cost, production_cost])?;

    let profit = effective_profit(document.profit_percentage, config);
    let profit_amount = profit.of(total_production_cost)?;

    Some(CostTotals {
        fabric_cost,
        accessory_cost,
        process_cost,
        production_cost,
        total_production_cost,
        profit_amount,
        fob_price: total_production_cost.checked_add(profit_amount)?,
    })
}

/// The profit margin actually applied to a document.
#[must_use]
pub fn effective_profit(profit_percentage: Option<Decimal>, config: &EngineConfig) -> Percentage {
    config
        .input_policy
        .accept(profit_percentage)
        .map_or(config.default_profit, Percentage::new)
}
