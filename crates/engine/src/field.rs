//! Name-based field access to documents.
//!
//! Form sessions receive edits as `(field name, value)` pairs, the way a form
//! UI reports them. [`FieldStore`] maps those names onto the typed document
//! structs. Derived fields can be read but not written; only the derivation
//! engine writes them.

use garment_costing_core::{BusinessKey, CostCategory, DocumentType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::cost_sheet::{CostDocument, LineItem};
use crate::sample_sales::{SampleCostField, SampleSalesRecord};

/// A field value as reported by a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(Decimal),
    Text(String),
}

impl FieldValue {
    /// The value as a number, parsing text if needed.
    #[must_use]
    pub fn to_number(&self) -> Option<Decimal> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    /// The value as text.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Errors raised by field access.
///
/// These are host-framework errors (bad field names, bad values). The
/// derivation itself never fails.
#[derive(Debug, Error)]
pub enum FieldError {
    /// The document type has no field with this name.
    #[error("unknown field `{field}` on {document_type}")]
    UnknownField {
        document_type: DocumentType,
        field: String,
    },

    /// The value cannot be stored in this field.
    #[error("field `{field}` expects {expected}, got `{value}`")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        value: String,
    },

    /// The field is derived or workflow-owned.
    #[error("field `{0}` is read-only")]
    ReadOnly(String),

    /// No item exists at this position.
    #[error("no {category} item at index {index}")]
    ItemNotFound { category: CostCategory, index: usize },

    /// The item tables are frozen by the approval status.
    #[error("{} is read-only on an approved cost sheet", .0.table_field())]
    Locked(CostCategory),
}

/// Read and write document fields by name.
pub trait FieldStore {
    /// The document type, used in error messages and handler keys.
    const DOCUMENT_TYPE: DocumentType;

    /// Read a field. `Ok(None)` means the field exists but is unset.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::UnknownField`] if the name is not a field.
    fn get_field(&self, name: &str) -> Result<Option<FieldValue>, FieldError>;

    /// Write a field. `None` clears it.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] if the name is unknown, the field is read-only,
    /// or the value has the wrong type.
    fn set_field(&mut self, name: &str, value: Option<FieldValue>) -> Result<(), FieldError>;
}

fn unknown<T: FieldStore + ?Sized>(field: &str) -> FieldError {
    FieldError::UnknownField {
        document_type: T::DOCUMENT_TYPE,
        field: field.to_owned(),
    }
}

/// Convert a value for a numeric field; unparseable text is an error.
fn number(field: &str, value: Option<FieldValue>) -> Result<Option<Decimal>, FieldError> {
    value
        .map(|v| {
            v.to_number().ok_or_else(|| FieldError::TypeMismatch {
                field: field.to_owned(),
                expected: "a number",
                value: v.to_text(),
            })
        })
        .transpose()
}

/// Convert a value for a numeric field where non-numeric text means "unset".
fn lenient_number(field: &str, value: Option<FieldValue>) -> Option<Decimal> {
    let value = value?;
    let parsed = value.to_number();
    if parsed.is_none() {
        debug!(field, value = %value.to_text(), "Non-numeric cost treated as absent");
    }
    parsed
}

/// Convert a value for a text field; blank text clears it.
fn text(value: Option<FieldValue>) -> Option<String> {
    value
        .map(|v| v.to_text())
        .filter(|s| !s.trim().is_empty())
}

/// The category whose subtotal is stored under `name`.
fn subtotal_category(name: &str) -> Option<CostCategory> {
    CostCategory::ALL
        .into_iter()
        .find(|category| category.cost_field() == name)
}

fn num(value: Option<Decimal>) -> Option<FieldValue> {
    value.map(FieldValue::Number)
}

impl FieldStore for CostDocument {
    const DOCUMENT_TYPE: DocumentType = DocumentType::CostSheet;

    fn get_field(&self, name: &str) -> Result<Option<FieldValue>, FieldError> {
        let totals = &self.totals;
        if let Some(category) = subtotal_category(name) {
            return Ok(num(Some(totals.category_cost(category))));
        }
        let value = match name {
            "customer" => self.customer.clone().map(FieldValue::Text),
            "style_number" => self.style_number.clone().map(FieldValue::Text),
            "business_key" => self
                .business_key
                .as_ref()
                .map(|k| FieldValue::Text(k.to_string())),
            "profit_percentage" => num(self.profit_percentage),
            "version_remark" => self.version_remark.clone().map(FieldValue::Text),
            "status" => Some(FieldValue::Text(self.status.to_string())),
            "docstatus" => Some(FieldValue::Number(u8::from(self.docstatus).into())),
            "version_no" => self.version_no.map(|v| FieldValue::Number(v.into())),
            "total_production_cost" => num(Some(totals.total_production_cost)),
            "profit_amount" => num(Some(totals.profit_amount)),
            "fob_price" => num(Some(totals.fob_price)),
            _ => return Err(unknown::<Self>(name)),
        };
        Ok(value)
    }

    fn set_field(&mut self, name: &str, value: Option<FieldValue>) -> Result<(), FieldError> {
        if subtotal_category(name).is_some() {
            return Err(FieldError::ReadOnly(name.to_owned()));
        }
        match name {
            "customer" => self.customer = text(value),
            "style_number" => self.style_number = text(value),
            "business_key" => {
                self.business_key = text(value).and_then(|s| BusinessKey::parse(&s).ok());
            }
            "profit_percentage" => self.profit_percentage = number(name, value)?,
            "version_remark" => self.version_remark = text(value),
            "status" | "docstatus" | "version_no" | "total_production_cost" | "profit_amount"
            | "fob_price" => return Err(FieldError::ReadOnly(name.to_owned())),
            _ => return Err(unknown::<Self>(name)),
        }
        Ok(())
    }
}

impl FieldStore for LineItem {
    const DOCUMENT_TYPE: DocumentType = DocumentType::CostSheetItem;

    fn get_field(&self, name: &str) -> Result<Option<FieldValue>, FieldError> {
        let value = match name {
            "item_type" => self.item_type.map(|c| FieldValue::Text(c.to_string())),
            "sequence" => self.sequence.map(|s| FieldValue::Number(s.into())),
            "item_name" => self.item_name.clone().map(FieldValue::Text),
            "unit_price" => num(self.unit_price),
            "quantity" => num(self.quantity),
            "net_consumption" => num(self.net_consumption),
            "loss_rate" => num(self.loss_rate),
            "total_consumption" => num(self.total_consumption),
            "amount" => num(self.amount),
            _ => return Err(unknown::<Self>(name)),
        };
        Ok(value)
    }

    fn set_field(&mut self, name: &str, value: Option<FieldValue>) -> Result<(), FieldError> {
        match name {
            "item_name" => self.item_name = text(value),
            "unit_price" => self.unit_price = number(name, value)?,
            "quantity" => self.quantity = number(name, value)?,
            "net_consumption" => self.net_consumption = number(name, value)?,
            "loss_rate" => self.loss_rate = number(name, value)?,
            "item_type" | "sequence" | "total_consumption" | "amount" => {
                return Err(FieldError::ReadOnly(name.to_owned()));
            }
            _ => return Err(unknown::<Self>(name)),
        }
        Ok(())
    }
}

impl FieldStore for SampleSalesRecord {
    const DOCUMENT_TYPE: DocumentType = DocumentType::SampleSales;

    fn get_field(&self, name: &str) -> Result<Option<FieldValue>, FieldError> {
        if let Some(field) = SampleCostField::from_field_name(name) {
            return Ok(num(self.cost(field)));
        }
        let value = match name {
            "quantity" => num(self.quantity),
            "unit_price" => num(self.unit_price),
            "amount" => num(self.amount),
            "gross_profit" => num(self.gross_profit),
            _ => return Err(unknown::<Self>(name)),
        };
        Ok(value)
    }

    fn set_field(&mut self, name: &str, value: Option<FieldValue>) -> Result<(), FieldError> {
        if let Some(field) = SampleCostField::from_field_name(name) {
            *self.cost_mut(field) = lenient_number(name, value);
            return Ok(());
        }
        match name {
            "quantity" => self.quantity = number(name, value)?,
            "unit_price" => self.unit_price = number(name, value)?,
            // Amount is derived but may be entered by hand when quantity or
            // price is unknown.
            "amount" => self.amount = number(name, value)?,
            "gross_profit" => return Err(FieldError::ReadOnly(name.to_owned())),
            _ => return Err(unknown::<Self>(name)),
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_to_number_parses_text() {
        assert_eq!(FieldValue::from(" 2.50 ").to_number(), Some(dec!(2.5)));
        assert_eq!(FieldValue::from("abc").to_number(), None);
        assert_eq!(FieldValue::from(dec!(3)).to_number(), Some(dec!(3)));
    }

    #[test]
    fn test_cost_document_roundtrip_fields() {
        let mut sheet = CostDocument::default();
        sheet.set_field("customer", Some("ABC".into())).unwrap();
        sheet
            .set_field("profit_percentage", Some(dec!(20).into()))
            .unwrap();

        assert_eq!(
            sheet.get_field("customer").unwrap(),
            Some(FieldValue::Text("ABC".into()))
        );
        assert_eq!(
            sheet.get_field("profit_percentage").unwrap(),
            Some(FieldValue::Number(dec!(20)))
        );
        assert_eq!(sheet.get_field("style_number").unwrap(), None);
        assert_eq!(
            sheet.get_field("fob_price").unwrap(),
            Some(FieldValue::Number(Decimal::ZERO))
        );
    }

    #[test]
    fn test_cost_document_rejects_derived_writes() {
        let mut sheet = CostDocument::default();
        assert!(matches!(
            sheet.set_field("fob_price", Some(dec!(1).into())),
            Err(FieldError::ReadOnly(_))
        ));
        assert!(matches!(
            sheet.set_field("status", Some("approved".into())),
            Err(FieldError::ReadOnly(_))
        ));
    }

    #[test]
    fn test_category_subtotals_read_only() {
        let mut sheet = CostDocument::default();
        sheet.totals.process_cost = dec!(7.5);

        assert_eq!(
            sheet.get_field("process_cost").unwrap(),
            Some(FieldValue::Number(dec!(7.5)))
        );
        for category in CostCategory::ALL {
            assert!(matches!(
                sheet.set_field(category.cost_field(), Some(dec!(1).into())),
                Err(FieldError::ReadOnly(_))
            ));
        }
    }

    #[test]
    fn test_locked_message_names_table() {
        let err = FieldError::Locked(CostCategory::Accessory);
        assert_eq!(
            err.to_string(),
            "accessory_items is read-only on an approved cost sheet"
        );
    }

    #[test]
    fn test_unknown_field() {
        let sheet = CostDocument::default();
        let err = sheet.get_field("colour").unwrap_err();
        assert_eq!(err.to_string(), "unknown field `colour` on cost_sheet");
    }

    #[test]
    fn test_blank_text_clears() {
        let mut sheet = CostDocument::default();
        sheet.set_field("customer", Some("ABC".into())).unwrap();
        sheet.set_field("customer", Some("  ".into())).unwrap();
        assert_eq!(sheet.customer, None);
    }

    #[test]
    fn test_line_item_numeric_type_mismatch() {
        let mut item = LineItem::default();
        let err = item
            .set_field("unit_price", Some("cheap".into()))
            .unwrap_err();
        assert!(matches!(err, FieldError::TypeMismatch { .. }));

        item.set_field("unit_price", Some("4.20".into())).unwrap();
        assert_eq!(item.unit_price, Some(dec!(4.2)));

        assert!(matches!(
            item.set_field("amount", Some(dec!(1).into())),
            Err(FieldError::ReadOnly(_))
        ));
    }

    #[test]
    fn test_sample_cost_field_non_numeric_is_absent() {
        let mut record = SampleSalesRecord::default();
        record
            .set_field("freight_cost", Some("n/a".into()))
            .unwrap();
        assert_eq!(record.freight_cost, None);

        record
            .set_field("freight_cost", Some("12".into()))
            .unwrap();
        assert_eq!(
            record.get_field("freight_cost").unwrap(),
            Some(FieldValue::Number(dec!(12)))
        );
    }

    #[test]
    fn test_sample_amount_is_writable_gross_profit_is_not() {
        let mut record = SampleSalesRecord::default();
        record.set_field("amount", Some(dec!(80).into())).unwrap();
        assert_eq!(record.amount, Some(dec!(80)));
        assert!(matches!(
            record.set_field("gross_profit", Some(dec!(1).into())),
            Err(FieldError::ReadOnly(_))
        ));
    }
}
