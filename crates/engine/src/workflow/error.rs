//! Workflow error types.

use garment_costing_core::{ApprovalStatus, CostSheetId, DocStatus};
use thiserror::Error;

use super::WorkflowAction;

/// Errors that can occur while moving a cost sheet through approval.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// No cost sheet with this ID.
    #[error("cost sheet {0} not found")]
    NotFound(CostSheetId),

    /// The sheet has never been inserted, so it has no ID to act on.
    #[error("cost sheet has not been saved yet")]
    Unsaved,

    /// The action is not valid from the sheet's current status.
    #[error("cannot run {action} on a cost sheet that is {status}")]
    InvalidTransition {
        action: WorkflowAction,
        status: ApprovalStatus,
    },

    /// The form does not offer this action in the sheet's current state.
    #[error("{action} is not available for cost sheet {id} (status {status}, docstatus {docstatus:?})")]
    ActionUnavailable {
        id: CostSheetId,
        action: WorkflowAction,
        status: ApprovalStatus,
        docstatus: DocStatus,
    },
}
