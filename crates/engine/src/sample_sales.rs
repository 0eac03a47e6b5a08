//! Sample-sales records: amount and gross profit.

use garment_costing_core::SampleSalesId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::checked;
use crate::config::EngineConfig;
use crate::input::InputPolicy;

/// The named cost fields deducted from a sample sale's amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleCostField {
    Freight,
    Fabric,
    Accessory,
    Pattern,
    Production,
    Logistics,
    Management,
    Other,
}

impl SampleCostField {
    /// Every cost field, in form order.
    pub const ALL: [Self; 8] = [
        Self::Freight,
        Self::Fabric,
        Self::Accessory,
        Self::Pattern,
        Self::Production,
        Self::Logistics,
        Self::Management,
        Self::Other,
    ];

    /// The field name on the record (e.g. `freight_cost`).
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Freight => "freight_cost",
            Self::Fabric => "fabric_cost",
            Self::Accessory => "accessory_cost",
            Self::Pattern => "pattern_cost",
            Self::Production => "production_cost",
            Self::Logistics => "logistics_cost",
            Self::Management => "management_cost",
            Self::Other => "other_cost",
        }
    }

    /// Look a cost field up by its field name.
    #[must_use]
    pub fn from_field_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.field_name() == name)
    }
}

/// A sample-sales record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleSalesRecord {
    pub id: Option<SampleSalesId>,
    pub quantity: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    /// Derived from quantity and unit price when both are present.
    pub amount: Option<Decimal>,
    pub freight_cost: Option<Decimal>,
    pub fabric_cost: Option<Decimal>,
    pub accessory_cost: Option<Decimal>,
    pub pattern_cost: Option<Decimal>,
    pub production_cost: Option<Decimal>,
    pub logistics_cost: Option<Decimal>,
    pub management_cost: Option<Decimal>,
    pub other_cost: Option<Decimal>,
    /// Derived: amount minus every cost field.
    pub gross_profit: Option<Decimal>,
}

impl SampleSalesRecord {
    /// The value of one cost field.
    #[must_use]
    pub const fn cost(&self, field: SampleCostField) -> Option<Decimal> {
        match field {
            SampleCostField::Freight => self.freight_cost,
            SampleCostField::Fabric => self.fabric_cost,
            SampleCostField::Accessory => self.accessory_cost,
            SampleCostField::Pattern => self.pattern_cost,
            SampleCostField::Production => self.production_cost,
            SampleCostField::Logistics => self.logistics_cost,
            SampleCostField::Management => self.management_cost,
            SampleCostField::Other => self.other_cost,
        }
    }

    /// Mutable access to one cost field.
    pub const fn cost_mut(&mut self, field: SampleCostField) -> &mut Option<Decimal> {
        match field {
            SampleCostField::Freight => &mut self.freight_cost,
            SampleCostField::Fabric => &mut self.fabric_cost,
            SampleCostField::Accessory => &mut self.accessory_cost,
            SampleCostField::Pattern => &mut self.pattern_cost,
            SampleCostField::Production => &mut self.production_cost,
            SampleCostField::Logistics => &mut self.logistics_cost,
            SampleCostField::Management => &mut self.management_cost,
            SampleCostField::Other => &mut self.other_cost,
        }
    }

    /// Sum of all cost fields; absent fields count as zero.
    ///
    /// Returns `None` if the sum overflows.
    #[must_use]
    pub fn total_costs(&self) -> Option<Decimal> {
        checked::sum(
            SampleCostField::ALL
                .into_iter()
                .filter_map(|field| self.cost(field)),
        )
    }

    /// `amount = quantity × unit_price` when both are present.
    ///
    /// Otherwise, or if the product overflows, the amount is left as it is.
    /// Returns the amount written.
    pub fn compute_amount(&mut self, policy: InputPolicy) -> Option<Decimal> {
        let (Some(quantity), Some(unit_price)) =
            (policy.accept(self.quantity), policy.accept(self.unit_price))
        else {
            debug!("Sample sale quantity or unit price missing, amount left unchanged");
            return None;
        };

        let amount = checked::or_skip(quantity.checked_mul(unit_price), "amount")?;
        self.amount = Some(amount);
        Some(amount)
    }

    /// `gross_profit = amount − Σ costs`, or zero when there is no amount.
    ///
    /// A zero amount is treated like a missing one under every input policy.
    /// On overflow the gross profit is left as it is and `None` is returned.
    pub fn compute_gross_profit(&mut self) -> Option<Decimal> {
        let gross_profit = match self.amount {
            Some(amount) if !amount.is_zero() => checked::or_skip(
                self.total_costs()
                    .and_then(|costs| amount.checked_sub(costs)),
                "gross_profit",
            )?,
            _ => Decimal::ZERO,
        };
        self.gross_profit = Some(gross_profit);
        Some(gross_profit)
    }

    /// Recompute the amount, then the gross profit.
    pub fn recompute_all(&mut self, config: &EngineConfig) {
        self.compute_amount(config.input_policy);
        self.compute_gross_profit();
    }
}
