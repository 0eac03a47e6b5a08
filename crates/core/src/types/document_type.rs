//! Document types known to the costing engine.

use serde::{Deserialize, Serialize};

/// The kind of document a form or field belongs to.
///
/// Form handlers are registered per document type so that a field name on
/// one document never dispatches to another document's handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// A garment cost sheet with four line-item tables.
    CostSheet,
    /// A single row in one of the cost sheet's item tables.
    CostSheetItem,
    /// A sample-sales record.
    SampleSales,
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CostSheet => write!(f, "cost_sheet"),
            Self::CostSheetItem => write!(f, "cost_sheet_item"),
            Self::SampleSales => write!(f, "sample_sales"),
        }
    }
}
