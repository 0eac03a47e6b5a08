//! The cost sheet document and its lifecycle hooks.

use chrono::{DateTime, Utc};
use garment_costing_core::{ApprovalStatus, BusinessKey, CostCategory, CostSheetId, DocStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CostTotals, LineItem, compute_totals};
use crate::config::EngineConfig;

/// A garment cost sheet.
///
/// Holds the four item tables, the scalar inputs, the derived totals and the
/// approval/version bookkeeping. Derived fields are written only by the
/// engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostDocument {
    /// Identifier assigned on insert.
    pub id: Option<CostSheetId>,
    pub customer: Option<String>,
    pub style_number: Option<String>,
    /// Derived from customer and style number.
    pub business_key: Option<BusinessKey>,
    /// Profit margin in percent; the configured default applies when unset.
    pub profit_percentage: Option<Decimal>,

    pub fabric_items: Vec<LineItem>,
    pub accessory_items: Vec<LineItem>,
    pub process_items: Vec<LineItem>,
    pub production_items: Vec<LineItem>,

    #[serde(flatten)]
    pub totals: CostTotals,

    pub status: ApprovalStatus,
    pub docstatus: DocStatus,
    pub version_no: Option<u32>,
    pub is_latest_version: bool,
    pub parent_version_id: Option<CostSheetId>,
    pub version_remark: Option<String>,
    pub creator: Option<String>,
    pub approver: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
}

impl Default for CostDocument {
    fn default() -> Self {
        Self {
            id: None,
            customer: None,
            style_number: None,
            business_key: None,
            profit_percentage: None,
            fabric_items: Vec::new(),
            accessory_items: Vec::new(),
            process_items: Vec::new(),
            production_items: Vec::new(),
            totals: CostTotals::default(),
            status: ApprovalStatus::Draft,
            docstatus: DocStatus::Draft,
            version_no: None,
            is_latest_version: true,
            parent_version_id: None,
            version_remark: None,
            creator: None,
            approver: None,
            approved_at: None,
        }
    }
}

impl CostDocument {
    /// The item table for a category, in order.
    #[must_use]
    pub fn items(&self, category: CostCategory) -> &[LineItem] {
        match category {
            CostCategory::Fabric => &self.fabric_items,
            CostCategory::Accessory => &self.accessory_items,
            CostCategory::Process => &self.process_items,
            CostCategory::Production => &self.production_items,
        }
    }

    /// Mutable access to the item table for a category.
    pub fn items_mut(&mut self, category: CostCategory) -> &mut Vec<LineItem> {
        match category {
            CostCategory::Fabric => &mut self.fabric_items,
            CostCategory::Accessory => &mut self.accessory_items,
            CostCategory::Process => &mut self.process_items,
            CostCategory::Production => &mut self.production_items,
        }
    }

    /// A single item, if the index is in range.
    #[must_use]
    pub fn item(&self, category: CostCategory, index: usize) -> Option<&LineItem> {
        self.items(category).get(index)
    }

    /// A single item for mutation, if the index is in range.
    pub fn item_mut(&mut self, category: CostCategory, index: usize) -> Option<&mut LineItem> {
        self.items_mut(category).get_mut(index)
    }

    /// Append an item to a category's table and stamp it.
    ///
    /// Returns the index of the new item.
    pub fn push_item(&mut self, category: CostCategory, item: LineItem) -> usize {
        let items = self.items_mut(category);
        items.push(item);
        let index = items.len() - 1;
        self.assign_sequence(category, index);
        index
    }

    /// Remove an item from a category's table.
    ///
    /// Remaining items keep their sequence numbers.
    pub fn remove_item(&mut self, category: CostCategory, index: usize) -> Option<LineItem> {
        let items = self.items_mut(category);
        (index < items.len()).then(|| items.remove(index))
    }

    /// Stamp a freshly appended item with its category and position.
    ///
    /// `sequence` is the table length minus one at the time of the call,
    /// i.e. the zero-based position of the item just appended.
    pub fn assign_sequence(&mut self, category: CostCategory, index: usize) {
        let items = self.items_mut(category);
        let sequence = u32::try_from(items.len().saturating_sub(1)).unwrap_or(u32::MAX);
        if let Some(item) = items.get_mut(index) {
            item.item_type = Some(category);
            item.sequence = Some(sequence);
        }
    }

    /// Regenerate the business key from customer and style number.
    ///
    /// Overwrites any previous value, including a manually entered one.
    pub fn refresh_business_key(&mut self) {
        self.business_key =
            BusinessKey::derive(self.customer.as_deref(), self.style_number.as_deref());
    }

    /// Recompute the derived totals from the current item amounts.
    ///
    /// Totals that would overflow are left as they were.
    pub fn recompute_totals(&mut self, config: &EngineConfig) {
        match compute_totals(self, config) {
            Some(totals) => self.totals = totals,
            None => debug!(
                business_key = ?self.business_key,
                "Cost totals overflow, totals left unchanged"
            ),
        }
    }

    /// Recompute every item, then the totals.
    pub fn recompute_all(&mut self, config: &EngineConfig) {
        for category in CostCategory::ALL {
            for item in self.items_mut(category) {
                item.recompute(config.input_policy);
            }
        }
        self.recompute_totals(config);
    }

    /// Stamp every item with the category of the table it sits in.
    ///
    /// Items loaded from outside (files, copies) may lack their category or
    /// sequence; existing sequence numbers are kept.
    pub fn normalize_items(&mut self) {
        for category in CostCategory::ALL {
            for (position, item) in self.items_mut(category).iter_mut().enumerate() {
                item.item_type = Some(category);
                if item.sequence.is_none() {
                    item.sequence = Some(u32::try_from(position).unwrap_or(u32::MAX));
                }
            }
        }
    }

    /// Fill defaults for a document about to be stored for the first time.
    pub fn prepare_for_insert(&mut self, creator: &str) {
        if self.business_key.is_none() {
            self.refresh_business_key();
        }
        if self.version_no.is_none() {
            self.version_no = Some(1);
        }
        self.is_latest_version = true;
        if self.creator.is_none() {
            self.creator = Some(creator.to_owned());
        }
    }

    /// Bring every derived field up to date before the document is saved.
    pub fn validate(&mut self, config: &EngineConfig) {
        if self.business_key.is_none() {
            self.refresh_business_key();
        }
        self.normalize_items();
        self.recompute_all(config);
        debug!(
            business_key = ?self.business_key,
            fob_price = %self.totals.fob_price,
            "Cost sheet validated"
        );
    }
}
