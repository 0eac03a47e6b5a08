//! Approval workflow for cost sheets.
//!
//! The status model is `draft → pending → approved | rejected`; an approved
//! sheet is revised by creating a new version, which starts again as a
//! draft. This module decides which actions a form offers ([`actions`]) and
//! defines the collaborator that performs them ([`ApprovalWorkflow`]).

mod actions;
mod error;
mod service;

pub use actions::{
    ActionOutcome, ActionRequest, WorkflowAction, available_actions, line_items_read_only, perform,
};
pub use error::WorkflowError;
pub use service::{ApprovalWorkflow, InMemoryApprovalWorkflow};
