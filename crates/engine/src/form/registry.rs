//! Handler registry keyed by document type and trigger.

use std::collections::HashMap;

use garment_costing_core::{CostCategory, DocumentType};

use crate::config::EngineConfig;
use crate::field::FieldStore;

/// What caused a handler to run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// A document-level field changed.
    Field(String),
    /// A field on a line item changed.
    ItemField(String),
    /// A line item was appended to a table.
    ItemAdded(CostCategory),
    /// A line item was removed from a table.
    ItemRemoved(CostCategory),
    /// The form was (re)loaded.
    Refresh,
}

impl Trigger {
    /// Shorthand for [`Trigger::Field`].
    #[must_use]
    pub fn field(name: &str) -> Self {
        Self::Field(name.to_owned())
    }

    /// Shorthand for [`Trigger::ItemField`].
    #[must_use]
    pub fn item_field(name: &str) -> Self {
        Self::ItemField(name.to_owned())
    }
}

/// Registry key: handlers for one document type never fire for another.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandlerKey {
    pub document_type: DocumentType,
    pub trigger: Trigger,
}

/// Location of the line item an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemRef {
    pub category: CostCategory,
    pub index: usize,
}

/// Context handed to every handler.
#[derive(Debug, Clone, Copy)]
pub struct HandlerContext<'a> {
    pub config: &'a EngineConfig,
    /// Set for item events.
    pub item: Option<ItemRef>,
}

/// Work a handler asks the session to do later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Followup {
    /// Nothing further.
    Done,
    /// Run the document's batch recompute at the next commit.
    Batch,
}

/// A form event handler.
pub type Handler<D> = fn(&mut D, &HandlerContext<'_>) -> Followup;

/// Explicit mapping from `(document type, trigger)` to handlers.
///
/// Each form session owns its registry; nothing is registered globally.
pub struct HandlerRegistry<D> {
    handlers: HashMap<HandlerKey, Vec<Handler<D>>>,
}

impl<D: FieldStore> HandlerRegistry<D> {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler for a trigger on `D`'s document type.
    ///
    /// Handlers for the same trigger run in registration order.
    #[must_use]
    pub fn on(mut self, trigger: Trigger, handler: Handler<D>) -> Self {
        self.register(trigger, handler);
        self
    }

    /// Register a handler in place.
    pub fn register(&mut self, trigger: Trigger, handler: Handler<D>) {
        let key = HandlerKey {
            document_type: D::DOCUMENT_TYPE,
            trigger,
        };
        self.handlers.entry(key).or_default().push(handler);
    }

    /// Handlers registered for a trigger, in registration order.
    #[must_use]
    pub fn handlers_for(&self, trigger: &Trigger) -> &[Handler<D>] {
        let key = HandlerKey {
            document_type: D::DOCUMENT_TYPE,
            trigger: trigger.clone(),
        };
        self.handlers
            .get(&key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of distinct keys with at least one handler.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<D: FieldStore> Default for HandlerRegistry<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> std::fmt::Debug for HandlerRegistry<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("keys", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample_sales::SampleSalesRecord;

    fn noop(_: &mut SampleSalesRecord, _: &HandlerContext<'_>) -> Followup {
        Followup::Done
    }

    fn batch(_: &mut SampleSalesRecord, _: &HandlerContext<'_>) -> Followup {
        Followup::Batch
    }

    #[test]
    fn test_handlers_in_registration_order() {
        let registry = HandlerRegistry::<SampleSalesRecord>::new()
            .on(Trigger::field("quantity"), noop)
            .on(Trigger::field("quantity"), batch);

        let handlers = registry.handlers_for(&Trigger::field("quantity"));
        assert_eq!(handlers.len(), 2);

        let mut record = SampleSalesRecord::default();
        let config = EngineConfig::default();
        let ctx = HandlerContext {
            config: &config,
            item: None,
        };
        let outcomes: Vec<_> = handlers.iter().map(|h| h(&mut record, &ctx)).collect();
        assert_eq!(outcomes, vec![Followup::Done, Followup::Batch]);
    }

    #[test]
    fn test_unregistered_trigger_is_empty() {
        let registry = HandlerRegistry::<SampleSalesRecord>::new().on(Trigger::Refresh, noop);
        assert!(registry.handlers_for(&Trigger::field("amount")).is_empty());
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
    }
}
