//! Cost-sheet line items.

use garment_costing_core::{CostCategory, Percentage};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::checked;
use crate::input::InputPolicy;

/// A single row in one of a cost sheet's item tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    /// Category of the table owning this row, stamped on insertion.
    pub item_type: Option<CostCategory>,
    /// Zero-based position in its table at insertion time.
    pub sequence: Option<u32>,
    /// Material, accessory or operation name.
    pub item_name: Option<String>,
    /// Unit price, tax included.
    pub unit_price: Option<Decimal>,
    /// Unit count; used by production items only.
    pub quantity: Option<Decimal>,
    /// Consumption per garment before waste.
    pub net_consumption: Option<Decimal>,
    /// Waste allowance in percent; absent means 0.
    pub loss_rate: Option<Decimal>,
    /// Derived: `net_consumption × (1 + loss_rate / 100)`.
    pub total_consumption: Option<Decimal>,
    /// Derived: price times consumption, or price times quantity.
    pub amount: Option<Decimal>,
}

/// The derived values written by one [`LineItem::recompute`] call.
///
/// A `None` field means the value was left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemUpdate {
    pub total_consumption: Option<Decimal>,
    pub amount: Option<Decimal>,
}

impl ItemUpdate {
    /// Whether anything was written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_consumption.is_none() && self.amount.is_none()
    }
}

impl LineItem {
    /// Whether this row is priced per unit rather than by consumption.
    ///
    /// Rows that were never stamped with a category are priced by consumption.
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.item_type
            .is_some_and(|category| !category.is_consumption_based())
    }

    /// Recompute `total_consumption` and `amount` from the row's inputs.
    ///
    /// Production rows: `amount = unit_price × quantity` when both are present.
    ///
    /// Other rows: when `net_consumption` is present,
    /// `total_consumption = net_consumption × (1 + loss_rate / 100)`; when
    /// `unit_price` is present as well, `amount = unit_price × total_consumption`.
    ///
    /// Missing inputs skip the write and leave any previous value in place,
    /// and so does a result that overflows `Decimal`.
    /// Whether a zero input counts as missing is decided by `policy`.
    pub fn recompute(&mut self, policy: InputPolicy) -> ItemUpdate {
        let unit_price = policy.accept(self.unit_price);
        let mut update = ItemUpdate::default();

        if self.is_production() {
            let quantity = policy.accept(self.quantity);
            if let (Some(unit_price), Some(quantity)) = (unit_price, quantity) {
                update.amount = checked::or_skip(unit_price.checked_mul(quantity), "amount");
            }
        } else if let Some(net_consumption) = policy.accept(self.net_consumption) {
            let loss_rate = Percentage::new(self.loss_rate.unwrap_or_default());
            update.total_consumption =
                checked::or_skip(loss_rate.grow(net_consumption), "total_consumption");
            update.amount = update
                .total_consumption
                .zip(unit_price)
                .and_then(|(total, price)| checked::or_skip(price.checked_mul(total), "amount"));
        }

        if update.is_empty() {
            debug!(
                item_type = ?self.item_type,
                sequence = ?self.sequence,
                "Line item inputs incomplete, amount left unchanged"
            );
        }

        if let Some(total_consumption) = update.total_consumption {
            self.total_consumption = Some(total_consumption);
        }
        if let Some(amount) = update.amount {
            self.amount = Some(amount);
        }

        update
    }
}
