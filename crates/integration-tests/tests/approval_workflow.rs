//! Integration tests for the cost sheet approval workflow.
//!
//! These tests run form actions against the in-memory workflow and check
//! both the status gating and the version bookkeeping.

use garment_costing::workflow::{ActionOutcome, ActionRequest, perform};
use garment_costing::{
    ApprovalWorkflow, CostDocument, EngineConfig, FieldError, FormSession, InMemoryApprovalWorkflow,
    WorkflowAction, WorkflowError,
};
use garment_costing_core::{ApprovalStatus, CostCategory, CostSheetId, DocStatus};
use garment_costing_integration_tests::{consumption_item, empty_sheet, production_item};
use rust_decimal_macros::dec;

fn stored_sheet(workflow: &mut InMemoryApprovalWorkflow) -> CostSheetId {
    let mut sheet = empty_sheet("ABC", "123");
    sheet.push_item(CostCategory::Fabric, consumption_item(dec!(2), dec!(10), Some(dec!(5))));
    sheet.push_item(CostCategory::Production, production_item(dec!(4), dec!(2)));
    workflow.insert(sheet, "planner")
}

fn reload(workflow: &InMemoryApprovalWorkflow, id: CostSheetId) -> CostDocument {
    workflow.get(id).unwrap().clone()
}

// =============================================================================
// Status Transition Tests
// =============================================================================

#[test]
fn test_submit_approve_through_form_actions() {
    let mut workflow = InMemoryApprovalWorkflow::default();
    let id = stored_sheet(&mut workflow);

    let sheet = reload(&workflow, id);
    let outcome = perform(&mut workflow, &sheet, ActionRequest::SubmitForApproval).unwrap();
    assert_eq!(outcome, ActionOutcome::Reload(id));

    let sheet = reload(&workflow, id);
    assert_eq!(sheet.status, ApprovalStatus::Pending);
    let outcome = perform(
        &mut workflow,
        &sheet,
        ActionRequest::Approve {
            approver: "manager".into(),
        },
    )
    .unwrap();
    assert_eq!(outcome, ActionOutcome::Reload(id));

    let sheet = reload(&workflow, id);
    assert_eq!(sheet.status, ApprovalStatus::Approved);
    assert_eq!(sheet.approver.as_deref(), Some("manager"));
    assert_eq!(sheet.totals.total_production_cost, dec!(29));
}

#[test]
fn test_reject_keeps_reason_as_remark() {
    let mut workflow = InMemoryApprovalWorkflow::default();
    let id = stored_sheet(&mut workflow);
    workflow.submit_for_approval(id).unwrap();

    let sheet = reload(&workflow, id);
    perform(
        &mut workflow,
        &sheet,
        ActionRequest::Reject {
            reason: "trim cost too high".into(),
        },
    )
    .unwrap();

    let sheet = reload(&workflow, id);
    assert_eq!(sheet.status, ApprovalStatus::Rejected);
    assert_eq!(sheet.version_remark.as_deref(), Some("trim cost too high"));
    assert!(FormSession::cost_sheet(sheet, EngineConfig::default())
        .available_actions()
        .is_empty());
}

// =============================================================================
// Action Gating Tests
// =============================================================================

#[test]
fn test_unoffered_action_is_refused() {
    let mut workflow = InMemoryApprovalWorkflow::default();
    let id = stored_sheet(&mut workflow);
    let sheet = reload(&workflow, id);

    let result = perform(
        &mut workflow,
        &sheet,
        ActionRequest::Approve {
            approver: "manager".into(),
        },
    );
    assert!(matches!(
        result,
        Err(WorkflowError::ActionUnavailable {
            action: WorkflowAction::Approve,
            status: ApprovalStatus::Draft,
            ..
        })
    ));
    assert_eq!(reload(&workflow, id).status, ApprovalStatus::Draft);
}

#[test]
fn test_submitted_document_offers_nothing() {
    let mut workflow = InMemoryApprovalWorkflow::default();
    let id = stored_sheet(&mut workflow);
    let mut sheet = reload(&workflow, id);
    sheet.docstatus = DocStatus::Submitted;

    let result = perform(&mut workflow, &sheet, ActionRequest::SubmitForApproval);
    assert!(matches!(result, Err(WorkflowError::ActionUnavailable { .. })));
}

#[test]
fn test_unsaved_sheet_cannot_run_actions() {
    let mut workflow = InMemoryApprovalWorkflow::default();
    let sheet = empty_sheet("ABC", "123");

    let result = perform(&mut workflow, &sheet, ActionRequest::SubmitForApproval);
    assert!(matches!(result, Err(WorkflowError::Unsaved)));
}

#[test]
fn test_stale_form_state_reported_by_workflow() {
    let mut workflow = InMemoryApprovalWorkflow::default();
    let id = stored_sheet(&mut workflow);
    let stale = reload(&workflow, id);
    workflow.submit_for_approval(id).unwrap();

    // The form still shows draft, the stored sheet is pending.
    let result = perform(&mut workflow, &stale, ActionRequest::SubmitForApproval);
    assert!(matches!(
        result,
        Err(WorkflowError::InvalidTransition {
            status: ApprovalStatus::Pending,
            ..
        })
    ));
}

// =============================================================================
// Versioning Tests
// =============================================================================

#[test]
fn test_new_version_from_approved_sheet() {
    let mut workflow = InMemoryApprovalWorkflow::default();
    let id = stored_sheet(&mut workflow);
    workflow.submit_for_approval(id).unwrap();
    workflow.approve(id, "manager").unwrap();

    let approved = reload(&workflow, id);
    let mut form = FormSession::cost_sheet(approved.clone(), EngineConfig::default());
    assert!(matches!(
        form.add_item(CostCategory::Accessory, consumption_item(dec!(1), dec!(1), None)),
        Err(FieldError::Locked(CostCategory::Accessory))
    ));

    let outcome = perform(
        &mut workflow,
        &approved,
        ActionRequest::CreateNewVersion {
            remark: String::new(),
        },
    )
    .unwrap();
    let ActionOutcome::OpenVersion(new_id) = outcome else {
        panic!("expected a new version, got {outcome:?}");
    };

    let draft = reload(&workflow, new_id);
    assert_eq!(draft.status, ApprovalStatus::Draft);
    assert_eq!(draft.version_no, Some(2));
    assert_eq!(draft.parent_version_id, Some(id));
    assert_eq!(draft.version_remark.as_deref(), Some("copied from version 1"));
    assert_eq!(draft.business_key, approved.business_key);
    assert_eq!(draft.totals, approved.totals);
    assert!(draft.is_latest_version);
    assert!(!reload(&workflow, id).is_latest_version);

    // The new draft is editable again.
    let mut form = FormSession::cost_sheet(draft, EngineConfig::default());
    form.add_item(CostCategory::Accessory, consumption_item(dec!(1), dec!(1), None))
        .unwrap();
    assert_eq!(form.document().totals.accessory_cost, dec!(1));
}

#[test]
fn test_version_numbers_keep_increasing() {
    let mut workflow = InMemoryApprovalWorkflow::default();
    let id = stored_sheet(&mut workflow);

    let v2 = workflow.create_new_version(id, "second").unwrap();
    let v3 = workflow.create_new_version(v2, "third").unwrap();
    // Branching from an old version still takes the next number.
    let v4 = workflow.create_new_version(id, "fourth").unwrap();

    let numbers: Vec<_> = [id, v2, v3, v4]
        .into_iter()
        .map(|v| reload(&workflow, v).version_no)
        .collect();
    assert_eq!(numbers, vec![Some(1), Some(2), Some(3), Some(4)]);
    assert_eq!(workflow.versions_of(v3).len(), 4);

    let latest: Vec<_> = [id, v2, v3, v4]
        .into_iter()
        .filter(|v| reload(&workflow, *v).is_latest_version)
        .collect();
    assert_eq!(latest, vec![v4]);

    let missing = workflow.create_new_version(CostSheetId::new(404), "");
    assert!(matches!(missing, Err(WorkflowError::NotFound(_))));
}
