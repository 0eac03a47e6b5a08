//! Which workflow actions a cost sheet form offers, and invoking them.

use garment_costing_core::{ApprovalStatus, CostSheetId, DocStatus};
use serde::{Deserialize, Serialize};

use super::{ApprovalWorkflow, WorkflowError};
use crate::cost_sheet::CostDocument;

/// A workflow action a form can surface as a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowAction {
    SubmitForApproval,
    Approve,
    Reject,
    CreateNewVersion,
}

impl std::fmt::Display for WorkflowAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SubmitForApproval => write!(f, "submit_for_approval"),
            Self::Approve => write!(f, "approve"),
            Self::Reject => write!(f, "reject"),
            Self::CreateNewVersion => write!(f, "create_new_version"),
        }
    }
}

/// The actions offered for a sheet in the given state.
///
/// Nothing is offered once the document has left draft `docstatus`.
#[must_use]
pub fn available_actions(status: ApprovalStatus, docstatus: DocStatus) -> Vec<WorkflowAction> {
    if !docstatus.is_draft() {
        return Vec::new();
    }
    match status {
        ApprovalStatus::Draft => vec![WorkflowAction::SubmitForApproval],
        ApprovalStatus::Pending => vec![WorkflowAction::Approve, WorkflowAction::Reject],
        ApprovalStatus::Approved => vec![WorkflowAction::CreateNewVersion],
        ApprovalStatus::Rejected => Vec::new(),
    }
}

/// Whether the four item tables are frozen.
#[must_use]
pub const fn line_items_read_only(status: ApprovalStatus) -> bool {
    matches!(status, ApprovalStatus::Approved)
}

/// A workflow action together with the input its prompt collected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRequest {
    SubmitForApproval,
    Approve { approver: String },
    /// An empty reason is accepted.
    Reject { reason: String },
    CreateNewVersion { remark: String },
}

impl ActionRequest {
    /// The action this request performs.
    #[must_use]
    pub const fn action(&self) -> WorkflowAction {
        match self {
            Self::SubmitForApproval => WorkflowAction::SubmitForApproval,
            Self::Approve { .. } => WorkflowAction::Approve,
            Self::Reject { .. } => WorkflowAction::Reject,
            Self::CreateNewVersion { .. } => WorkflowAction::CreateNewVersion,
        }
    }
}

/// What the form should do after an action succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Reload this sheet.
    Reload(CostSheetId),
    /// Open the newly created version.
    OpenVersion(CostSheetId),
}

/// Invoke an action the way a form button does.
///
/// The action must be one [`available_actions`] offers for the sheet as the
/// form currently shows it.
///
/// # Errors
///
/// Returns [`WorkflowError::Unsaved`] for a sheet without an ID,
/// [`WorkflowError::ActionUnavailable`] if the form would not offer the
/// action, or whatever the workflow collaborator reports.
pub fn perform<W>(
    workflow: &mut W,
    sheet: &CostDocument,
    request: ActionRequest,
) -> Result<ActionOutcome, WorkflowError>
where
    W: ApprovalWorkflow + ?Sized,
{
    let id = sheet.id.ok_or(WorkflowError::Unsaved)?;
    let action = request.action();
    if !available_actions(sheet.status, sheet.docstatus).contains(&action) {
        return Err(WorkflowError::ActionUnavailable {
            id,
            action,
            status: sheet.status,
            docstatus: sheet.docstatus,
        });
    }

    match request {
        ActionRequest::SubmitForApproval => workflow.submit_for_approval(id)?,
        ActionRequest::Approve { approver } => workflow.approve(id, &approver)?,
        ActionRequest::Reject { reason } => workflow.reject(id, &reason)?,
        ActionRequest::CreateNewVersion { remark } => {
            let new_id = workflow.create_new_version(id, &remark)?;
            return Ok(ActionOutcome::OpenVersion(new_id));
        }
    }
    Ok(ActionOutcome::Reload(id))
}
