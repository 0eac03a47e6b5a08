//! Integration tests for editing cost sheets through a form session.
//!
//! These tests drive the default handler registry the way a form would:
//! one field at a time, committing the batched totals explicitly.

use garment_costing::form::{Followup, HandlerContext, HandlerRegistry, Trigger};
use garment_costing::{
    CostDocument, EngineConfig, FieldError, FieldStore, FieldValue, FormSession, InputPolicy,
    LineItem,
};
use garment_costing_core::{CostCategory, Percentage};
use garment_costing_integration_tests::{consumption_item, empty_sheet, production_item};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// =============================================================================
// Line Item Tests
// =============================================================================

#[test]
fn test_fabric_row_entered_field_by_field() {
    let mut form = FormSession::cost_sheet(empty_sheet("ABC", "123"), EngineConfig::default());
    let index = form
        .add_item(CostCategory::Fabric, LineItem::default())
        .unwrap();

    form.set_item_field(CostCategory::Fabric, index, "unit_price", Some(dec!(2).into()))
        .unwrap();
    // No consumption yet: nothing to derive.
    assert_eq!(
        form.document().item(CostCategory::Fabric, index).unwrap().amount,
        None
    );

    form.set_item_field(
        CostCategory::Fabric,
        index,
        "net_consumption",
        Some(dec!(10).into()),
    )
    .unwrap();
    let item = form.document().item(CostCategory::Fabric, index).unwrap();
    assert_eq!(item.total_consumption, Some(dec!(10)));
    assert_eq!(item.amount, Some(dec!(20)));

    form.set_item_field(CostCategory::Fabric, index, "loss_rate", Some(dec!(5).into()))
        .unwrap();
    let item = form.document().item(CostCategory::Fabric, index).unwrap();
    assert_eq!(item.total_consumption, Some(dec!(10.5)));
    assert_eq!(item.amount, Some(dec!(21)));
}

#[test]
fn test_production_row_ignores_consumption() {
    let mut form = FormSession::cost_sheet(CostDocument::default(), EngineConfig::default());
    let index = form
        .add_item(CostCategory::Production, production_item(dec!(50), dec!(3)))
        .unwrap();
    form.set_item_field(
        CostCategory::Production,
        index,
        "net_consumption",
        Some(dec!(99).into()),
    )
    .unwrap();

    let item = form.document().item(CostCategory::Production, index).unwrap();
    assert_eq!(item.amount, Some(dec!(150)));
    assert_eq!(item.total_consumption, None);
}

#[test]
fn test_item_field_type_mismatch_rejected() {
    let mut form = FormSession::cost_sheet(CostDocument::default(), EngineConfig::default());
    let index = form
        .add_item(CostCategory::Fabric, LineItem::default())
        .unwrap();

    let result = form.set_item_field(
        CostCategory::Fabric,
        index,
        "unit_price",
        Some(FieldValue::Text("cheap".into())),
    );
    assert!(matches!(result, Err(FieldError::TypeMismatch { .. })));
    assert!(!form.is_batch_pending());
}

// =============================================================================
// Batched Totals Tests
// =============================================================================

#[test]
fn test_many_edits_single_commit() {
    let mut form = FormSession::cost_sheet(CostDocument::default(), EngineConfig::default());
    let fabric = form
        .add_item(CostCategory::Fabric, LineItem::default())
        .unwrap();
    let accessory = form
        .add_item(CostCategory::Accessory, LineItem::default())
        .unwrap();

    for (category, index, price, consumption) in [
        (CostCategory::Fabric, fabric, dec!(3), dec!(2)),
        (CostCategory::Accessory, accessory, dec!(1), dec!(4)),
    ] {
        form.set_item_field(category, index, "unit_price", Some(price.into()))
            .unwrap();
        form.set_item_field(category, index, "net_consumption", Some(consumption.into()))
            .unwrap();
    }

    assert!(form.is_batch_pending());
    assert_eq!(form.document().totals.total_production_cost, Decimal::ZERO);

    assert!(form.commit());
    let totals = form.document().totals;
    assert_eq!(totals.fabric_cost, dec!(6));
    assert_eq!(totals.accessory_cost, dec!(4));
    assert_eq!(totals.total_production_cost, dec!(10));
    assert_eq!(totals.profit_amount, dec!(1.5));
    assert_eq!(totals.fob_price, dec!(11.5));
}

#[test]
fn test_into_document_commits_pending_batch() {
    let mut form = FormSession::cost_sheet(CostDocument::default(), EngineConfig::default());
    let index = form
        .add_item(CostCategory::Process, LineItem::default())
        .unwrap();
    form.set_item_field(CostCategory::Process, index, "unit_price", Some(dec!(7).into()))
        .unwrap();
    form.set_item_field(
        CostCategory::Process,
        index,
        "net_consumption",
        Some(dec!(1).into()),
    )
    .unwrap();

    let sheet = form.into_document();
    assert_eq!(sheet.totals.process_cost, dec!(7));
}

#[test]
fn test_custom_registry_is_isolated() {
    fn mark(sheet: &mut CostDocument, _: &HandlerContext<'_>) -> Followup {
        sheet.version_remark = Some("touched".into());
        Followup::Done
    }

    let registry = HandlerRegistry::<CostDocument>::new().on(Trigger::field("customer"), mark);
    let mut form = FormSession::new(CostDocument::default(), registry, EngineConfig::default());

    form.set_field("customer", Some("ABC".into())).unwrap();
    assert_eq!(form.document().version_remark.as_deref(), Some("touched"));
    // The default business key handler is not registered here.
    assert!(form.document().business_key.is_none());
}

// =============================================================================
// Profit and Zero Input Tests
// =============================================================================

#[test]
fn test_default_profit_from_config() {
    let config = EngineConfig::default().with_default_profit(Percentage::new(dec!(10)));
    let mut form = FormSession::cost_sheet(CostDocument::default(), config);
    form.add_item(CostCategory::Production, production_item(dec!(100), dec!(1)))
        .unwrap();

    assert_eq!(form.document().totals.profit_amount, dec!(10));
    assert_eq!(form.document().totals.fob_price, dec!(110));
}

#[test]
fn test_zero_profit_by_policy() {
    for (policy, expected_fob) in [
        (InputPolicy::Presence, dec!(100)),
        (InputPolicy::Truthy, dec!(115)),
    ] {
        let config = EngineConfig::default().with_input_policy(policy);
        let mut form = FormSession::cost_sheet(CostDocument::default(), config);
        form.add_item(CostCategory::Production, production_item(dec!(100), dec!(1)))
            .unwrap();
        form.set_field("profit_percentage", Some(Decimal::ZERO.into()))
            .unwrap();

        assert_eq!(form.document().totals.fob_price, expected_fob, "{policy}");
    }
}

#[test]
fn test_zero_loss_rate_by_policy() {
    for policy in [InputPolicy::Presence, InputPolicy::Truthy] {
        let config = EngineConfig::default().with_input_policy(policy);
        let mut form = FormSession::cost_sheet(CostDocument::default(), config);
        let index = form
            .add_item(
                CostCategory::Fabric,
                consumption_item(dec!(2), dec!(10), Some(Decimal::ZERO)),
            )
            .unwrap();

        // A zero loss rate means no waste either way.
        let item = form.document().item(CostCategory::Fabric, index).unwrap();
        assert_eq!(item.amount, Some(dec!(20)), "{policy}");
    }
}

// =============================================================================
// Business Key Tests
// =============================================================================

#[test]
fn test_business_key_read_through_field_store() {
    let mut form = FormSession::cost_sheet(CostDocument::default(), EngineConfig::default());
    form.set_field("customer", Some("ABC".into())).unwrap();
    assert_eq!(
        form.document().get_field("business_key").unwrap(),
        None,
        "customer alone does not form a key"
    );

    form.set_field("style_number", Some("123".into())).unwrap();
    assert_eq!(
        form.document().get_field("business_key").unwrap(),
        Some(FieldValue::Text("ABC-123".into()))
    );
}

#[test]
fn test_blank_customer_counts_as_absent() {
    let mut form = FormSession::cost_sheet(CostDocument::default(), EngineConfig::default());
    form.set_field("style_number", Some("123".into())).unwrap();
    form.set_field("customer", Some("".into())).unwrap();
    assert_eq!(form.document().business_key.as_ref().unwrap().as_str(), "123");
}
