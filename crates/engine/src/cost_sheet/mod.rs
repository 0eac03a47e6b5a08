//! Cost sheets: line items, category subtotals, profit and FOB price.
//!
//! The derivation runs in two stages. Each [`LineItem`] derives its own
//! consumption and amount; [`compute_totals`] then folds the four item
//! tables into subtotals, total production cost, profit and FOB price.
//! Both stages are pure recomputations, so running either twice in a row
//! yields the same document.

mod document;
mod item;
mod totals;

pub use document::CostDocument;
pub use item::{ItemUpdate, LineItem};
pub use totals::{CostTotals, compute_totals};
