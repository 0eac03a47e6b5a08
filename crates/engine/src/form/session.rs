//! A single document being edited through a form.

use garment_costing_core::CostCategory;
use tracing::{debug, trace};

use super::handlers::{cost_sheet_registry, sample_sales_registry};
use super::registry::{Followup, HandlerContext, HandlerRegistry, ItemRef, Trigger};
use crate::config::EngineConfig;
use crate::cost_sheet::{CostDocument, LineItem};
use crate::field::{FieldError, FieldStore, FieldValue};
use crate::sample_sales::SampleSalesRecord;
use crate::workflow::{self, WorkflowAction};

/// A document type that can be edited through a [`FormSession`].
pub trait FormDocument: FieldStore {
    /// The deferred recompute run by [`FormSession::commit`].
    fn commit_batch(&mut self, config: &EngineConfig);
}

impl FormDocument for CostDocument {
    fn commit_batch(&mut self, config: &EngineConfig) {
        self.recompute_totals(config);
    }
}

impl FormDocument for SampleSalesRecord {
    fn commit_batch(&mut self, _config: &EngineConfig) {
        self.compute_gross_profit();
    }
}

/// One document plus the handlers reacting to its edits.
#[derive(Debug)]
pub struct FormSession<D> {
    document: D,
    registry: HandlerRegistry<D>,
    config: EngineConfig,
    batch_pending: bool,
}

impl<D: FormDocument> FormSession<D> {
    /// Create a session with an explicit handler registry.
    #[must_use]
    pub const fn new(document: D, registry: HandlerRegistry<D>, config: EngineConfig) -> Self {
        Self {
            document,
            registry,
            config,
            batch_pending: false,
        }
    }

    /// The document in its current state.
    #[must_use]
    pub const fn document(&self) -> &D {
        &self.document
    }

    /// The engine configuration used by this session.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Whether edits are waiting for [`commit`](Self::commit).
    #[must_use]
    pub const fn is_batch_pending(&self) -> bool {
        self.batch_pending
    }

    /// Commit any pending batch and hand back the document.
    #[must_use]
    pub fn into_document(mut self) -> D {
        self.commit();
        self.document
    }

    /// Write a document field and run its handlers.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] if the field is unknown, read-only, or the value
    /// has the wrong type. Handlers do not run in that case.
    pub fn set_field(&mut self, name: &str, value: Option<FieldValue>) -> Result<(), FieldError> {
        self.document.set_field(name, value)?;
        self.dispatch(&Trigger::field(name), None);
        Ok(())
    }

    /// Run the refresh handlers, as when the form is (re)loaded.
    pub fn refresh(&mut self) {
        self.dispatch(&Trigger::Refresh, None);
    }

    /// Run the deferred recompute once if any edit requested it.
    ///
    /// Returns whether anything ran. Committing with nothing pending is a
    /// no-op.
    pub fn commit(&mut self) -> bool {
        if !self.batch_pending {
            return false;
        }
        self.document.commit_batch(&self.config);
        self.batch_pending = false;
        debug!(document_type = %D::DOCUMENT_TYPE, "Committed batched recompute");
        true
    }

    fn dispatch(&mut self, trigger: &Trigger, item: Option<ItemRef>) {
        let ctx = HandlerContext {
            config: &self.config,
            item,
        };
        let handlers = self.registry.handlers_for(trigger);
        trace!(?trigger, handlers = handlers.len(), "Dispatching form event");

        for handler in handlers {
            if handler(&mut self.document, &ctx) == Followup::Batch {
                self.batch_pending = true;
            }
        }
    }
}

impl FormSession<CostDocument> {
    /// A cost sheet session with the default handlers.
    #[must_use]
    pub fn cost_sheet(document: CostDocument, config: EngineConfig) -> Self {
        Self::new(document, cost_sheet_registry(), config)
    }

    /// Write a field on one line item and run its handlers.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] if the sheet is approved, the item does not
    /// exist, or the field write is rejected.
    pub fn set_item_field(
        &mut self,
        category: CostCategory,
        index: usize,
        name: &str,
        value: Option<FieldValue>,
    ) -> Result<(), FieldError> {
        self.ensure_editable(category)?;
        let item = self
            .document
            .item_mut(category, index)
            .ok_or(FieldError::ItemNotFound { category, index })?;
        item.set_field(name, value)?;
        self.dispatch(
            &Trigger::item_field(name),
            Some(ItemRef { category, index }),
        );
        Ok(())
    }

    /// Append a line item to a table and run the item-added handlers.
    ///
    /// Returns the index of the new item.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Locked`] if the sheet is approved.
    pub fn add_item(&mut self, category: CostCategory, item: LineItem) -> Result<usize, FieldError> {
        self.ensure_editable(category)?;
        let items = self.document.items_mut(category);
        items.push(item);
        let index = items.len() - 1;
        self.dispatch(
            &Trigger::ItemAdded(category),
            Some(ItemRef { category, index }),
        );
        Ok(index)
    }

    /// Remove a line item and run the item-removed handlers.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] if the sheet is approved or the item does not
    /// exist.
    pub fn remove_item(
        &mut self,
        category: CostCategory,
        index: usize,
    ) -> Result<LineItem, FieldError> {
        self.ensure_editable(category)?;
        let removed = self
            .document
            .remove_item(category, index)
            .ok_or(FieldError::ItemNotFound { category, index })?;
        self.dispatch(&Trigger::ItemRemoved(category), None);
        Ok(removed)
    }

    /// Workflow actions the form should offer in the sheet's current state.
    #[must_use]
    pub fn available_actions(&self) -> Vec<WorkflowAction> {
        workflow::available_actions(self.document.status, self.document.docstatus)
    }

    fn ensure_editable(&self, category: CostCategory) -> Result<(), FieldError> {
        if workflow::line_items_read_only(self.document.status) {
            return Err(FieldError::Locked(category));
        }
        Ok(())
    }
}

impl FormSession<SampleSalesRecord> {
    /// A sample-sales session with the default handlers.
    #[must_use]
    pub fn sample_sales(record: SampleSalesRecord, config: EngineConfig) -> Self {
        Self::new(record, sample_sales_registry(), config)
    }
}
