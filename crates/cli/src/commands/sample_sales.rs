//! Sample-sales commands.

use std::path::Path;

use garment_costing::{EngineConfig, FormSession, SampleSalesRecord};
use tracing::info;

use super::{CommandError, OutputFormat, emit, load_document};

/// Load a sample-sales record, recompute amount and gross profit, print it.
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
    let record: SampleSalesRecord = load_document(path)?;

    let mut form = FormSession::sample_sales(record, *config);
    form.refresh();
    let record = form.into_document();

    info!(
        amount = ?record.amount,
        gross_profit = ?record.gross_profit,
        "Sample sale recomputed"
    );
    emit(&record, format)
}
