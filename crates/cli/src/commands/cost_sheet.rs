//! Cost sheet commands.

use std::path::Path;

use garment_costing::workflow::{available_actions, line_items_read_only};
use garment_costing::{CostDocument, EngineConfig, WorkflowAction};
use garment_costing_core::{ApprovalStatus, DocStatus};
use serde::Serialize;
use tracing::info;

use super::{CommandError, OutputFormat, emit, load_document};

/// Workflow state of a cost sheet as a form would present it.
#[derive(Debug, Serialize)]
pub struct ActionsReport {
    pub status: ApprovalStatus,
    pub docstatus: DocStatus,
    pub actions: Vec<WorkflowAction>,
    pub line_items_read_only: bool,
}

impl ActionsReport {
    /// Build the report for a sheet.
    #[must_use]
    pub fn for_sheet(sheet: &CostDocument) -> Self {
        Self {
            status: sheet.status,
            docstatus: sheet.docstatus,
            actions: available_actions(sheet.status, sheet.docstatus),
            line_items_read_only: line_items_read_only(sheet.status),
        }
    }
}

/// Load a cost sheet, recompute every derived field and print it.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or the output cannot be
/// serialized.
pub fn recompute(
    path: &Path,
    config: &EngineConfig,
    format: OutputFormat,
) -> Result<(), CommandError> {
    let mut sheet: CostDocument = load_document(path)?;
    sheet.validate(config);

    info!(
        business_key = ?sheet.business_key,
        total_production_cost = %sheet.totals.total_production_cost,
        fob_price = %sheet.totals.fob_price,
        "Cost sheet recomputed"
    );
    emit(&sheet, format)
}

/// Load a cost sheet and print the workflow actions it offers.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or the output cannot be
/// serialized.
pub fn actions(path: &Path, format: OutputFormat) -> Result<(), CommandError> {
    let sheet: CostDocument = load_document(path)?;
    emit(&ActionsReport::for_sheet(&sheet), format)
}
