//! Form sessions: explicit event handlers and batched recomputation.
//!
//! A [`FormSession`] owns one document being edited together with a
//! [`HandlerRegistry`] mapping `(document type, trigger)` to handler
//! functions. Edits go through the session, which writes the field and runs
//! the handlers registered for it.
//!
//! Handlers that change line-item amounts do not recompute totals
//! themselves; they mark the batch dirty and [`FormSession::commit`] runs a
//! single totals pass for any number of edits.

mod handlers;
mod registry;
mod session;

pub use handlers::{cost_sheet_registry, sample_sales_registry};
pub use registry::{
    Followup, Handler, HandlerContext, HandlerKey, HandlerRegistry, ItemRef, Trigger,
};
pub use session::{FormDocument, FormSession};
