//! Default handler sets for the cost sheet and sample-sales forms.

use garment_costing_core::CostCategory;
use tracing::debug;

use super::registry::{Followup, HandlerContext, HandlerRegistry, Trigger};
use crate::cost_sheet::CostDocument;
use crate::sample_sales::{SampleCostField, SampleSalesRecord};

/// Item fields whose change re-derives the item's amount.
const ITEM_INPUT_FIELDS: [&str; 4] = ["unit_price", "net_consumption", "loss_rate", "quantity"];

/// Handlers for a cost sheet form.
///
/// - `customer`, `style_number`: regenerate the business key
/// - `profit_percentage`: recompute totals
/// - item `unit_price` / `net_consumption` / `loss_rate` / `quantity`:
///   recompute the item, totals at the next commit
/// - item added: stamp category and sequence, recompute the item and totals
/// - item removed: recompute totals
#[must_use]
pub fn cost_sheet_registry() -> HandlerRegistry<CostDocument> {
    let mut registry = HandlerRegistry::new()
        .on(Trigger::field("customer"), regenerate_business_key)
        .on(Trigger::field("style_number"), regenerate_business_key)
        .on(Trigger::field("profit_percentage"), recompute_totals);

    for field in ITEM_INPUT_FIELDS {
        registry.register(Trigger::item_field(field), recompute_item);
    }
    for category in CostCategory::ALL {
        registry.register(Trigger::ItemAdded(category), stamp_new_item);
        registry.register(Trigger::ItemRemoved(category), recompute_totals);
    }
    registry
}

/// Handlers for a sample-sales form.
///
/// - `quantity`, `unit_price`, refresh: amount, then gross profit
/// - `amount` and every cost field: gross profit
#[must_use]
pub fn sample_sales_registry() -> HandlerRegistry<SampleSalesRecord> {
    let mut registry = HandlerRegistry::new()
        .on(Trigger::Refresh, recompute_sale)
        .on(Trigger::field("quantity"), recompute_sale)
        .on(Trigger::field("unit_price"), recompute_sale)
        .on(Trigger::field("amount"), recompute_gross_profit);

    for field in SampleCostField::ALL {
        registry.register(Trigger::field(field.field_name()), recompute_gross_profit);
    }
    registry
}

fn regenerate_business_key(sheet: &mut CostDocument, _: &HandlerContext<'_>) -> Followup {
    sheet.refresh_business_key();
    Followup::Done
}

fn recompute_totals(sheet: &mut CostDocument, ctx: &HandlerContext<'_>) -> Followup {
    sheet.recompute_totals(ctx.config);
    Followup::Done
}

fn recompute_item(sheet: &mut CostDocument, ctx: &HandlerContext<'_>) -> Followup {
    let Some(item_ref) = ctx.item else {
        return Followup::Done;
    };
    match sheet.item_mut(item_ref.category, item_ref.index) {
        Some(item) => {
            item.recompute(ctx.config.input_policy);
            Followup::Batch
        }
        None => {
            debug!(?item_ref, "Item vanished before recompute");
            Followup::Done
        }
    }
}

fn stamp_new_item(sheet: &mut CostDocument, ctx: &HandlerContext<'_>) -> Followup {
    let Some(item_ref) = ctx.item else {
        return Followup::Done;
    };
    sheet.assign_sequence(item_ref.category, item_ref.index);
    // Rows may arrive prefilled (copied rows, imports).
    if let Some(item) = sheet.item_mut(item_ref.category, item_ref.index) {
        item.recompute(ctx.config.input_policy);
    }
    sheet.recompute_totals(ctx.config);
    Followup::Done
}

fn recompute_sale(record: &mut SampleSalesRecord, ctx: &HandlerContext<'_>) -> Followup {
    record.recompute_all(ctx.config);
    Followup::Done
}

fn recompute_gross_profit(record: &mut SampleSalesRecord, _: &HandlerContext<'_>) -> Followup {
    record.compute_gross_profit();
    Followup::Done
}
