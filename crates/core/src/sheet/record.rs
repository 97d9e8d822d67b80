//! Typed row records and admission.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::cell::{to_date, to_decimal, to_int, CellValue};
use super::schema::{FieldKind, SheetSchema};

/// A typed field value after coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Date field.
    Date(Option<NaiveDate>),
    /// Decimal field.
    Decimal(Option<Decimal>),
    /// Integer field.
    Integer(Option<i64>),
    /// Text field.
    Text(Option<String>),
}

impl FieldValue {
    /// Returns true when the coerced value is absent.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(
            self,
            Self::Date(None) | Self::Decimal(None) | Self::Integer(None) | Self::Text(None)
        )
    }
}

/// One admitted spreadsheet row, keyed by canonical field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowRecord {
    fields: BTreeMap<&'static str, FieldValue>,
}

impl RowRecord {
    /// Builds a record by coercing each resolved column through its declared
    /// field type. Unresolved columns are ignored; a missing or unparseable
    /// cell becomes `None`.
    #[must_use]
    pub fn from_cells(
        schema: &SheetSchema,
        resolved_columns: &[Option<&'static str>],
        cells: &[CellValue],
    ) -> Self {
        let mut fields = BTreeMap::new();
        for (idx, column) in resolved_columns.iter().enumerate() {
            let Some(name) = column else { continue };
            // First resolved occurrence of a field wins.
            if fields.contains_key(name) {
                continue;
            }
            let cell = cells.get(idx).unwrap_or(&CellValue::Empty);
            let Some(spec) = schema.field(name) else {
                continue;
            };
            let value = match spec.kind {
                FieldKind::Date => FieldValue::Date(to_date(cell)),
                FieldKind::Decimal => FieldValue::Decimal(to_decimal(cell)),
                FieldKind::Integer => FieldValue::Integer(to_int(cell)),
                FieldKind::Text => FieldValue::Text(cell.as_text()),
            };
            fields.insert(spec.name, value);
        }
        Self { fields }
    }

    /// Returns true when every coerced field is absent; such rows are
    /// discarded instead of persisted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.values().all(FieldValue::is_none)
    }

    /// Date field accessor.
    #[must_use]
    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        match self.fields.get(name) {
            Some(FieldValue::Date(value)) => *value,
            _ => None,
        }
    }

    /// Decimal field accessor.
    #[must_use]
    pub fn decimal(&self, name: &str) -> Option<Decimal> {
        match self.fields.get(name) {
            Some(FieldValue::Decimal(value)) => *value,
            _ => None,
        }
    }

    /// Integer field accessor.
    #[must_use]
    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.fields.get(name) {
            Some(FieldValue::Integer(value)) => *value,
            _ => None,
        }
    }

    /// Text field accessor.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<String> {
        match self.fields.get(name) {
            Some(FieldValue::Text(value)) => value.clone(),
            _ => None,
        }
    }

    /// Iterates fields in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (*name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::schema::{schema_for_family, RowFamily};
    use rust_decimal_macros::dec;

    fn collateral_schema() -> &'static SheetSchema {
        schema_for_family(RowFamily::CollateralOverview).unwrap()
    }

    #[test]
    fn test_from_cells_types_each_field() {
        let schema = collateral_schema();
        let columns = [
            Some("main_type"),
            Some("eligible_collateral"),
            Some("nolv_pct"),
            None,
        ];
        let cells = [
            CellValue::Text("Inventory".into()),
            CellValue::Float(1000.0),
            CellValue::Text("65%".into()),
            CellValue::Text("ignored".into()),
        ];
        let record = RowRecord::from_cells(schema, &columns, &cells);

        assert_eq!(record.text("main_type").as_deref(), Some("Inventory"));
        assert_eq!(record.decimal("eligible_collateral"), Some(dec!(1000)));
        assert_eq!(record.decimal("nolv_pct"), Some(dec!(0.65)));
        assert_eq!(record.text("sub_type"), None);
    }

    #[test]
    fn test_blank_row_is_empty() {
        let schema = collateral_schema();
        let columns = [Some("main_type"), Some("eligible_collateral")];
        let cells = [CellValue::Text("-".into()), CellValue::Empty];
        let record = RowRecord::from_cells(schema, &columns, &cells);
        assert!(record.is_empty());
    }

    #[test]
    fn test_partially_populated_row_is_not_empty() {
        let schema = collateral_schema();
        let columns = [Some("main_type"), Some("eligible_collateral")];
        let cells = [CellValue::Empty, CellValue::Int(500)];
        let record = RowRecord::from_cells(schema, &columns, &cells);
        assert!(!record.is_empty());
    }

    #[test]
    fn test_unparseable_cell_becomes_none_but_row_admitted() {
        let schema = collateral_schema();
        let columns = [Some("main_type"), Some("eligible_collateral")];
        let cells = [
            CellValue::Text("Inventory".into()),
            CellValue::Text("not a number".into()),
        ];
        let record = RowRecord::from_cells(schema, &columns, &cells);
        assert_eq!(record.decimal("eligible_collateral"), None);
        assert!(!record.is_empty());
    }

    #[test]
    fn test_duplicate_columns_first_occurrence_wins() {
        let schema = collateral_schema();
        let columns = [Some("main_type"), Some("main_type")];
        let cells = [
            CellValue::Text("Inventory".into()),
            CellValue::Text("Equipment".into()),
        ];
        let record = RowRecord::from_cells(schema, &columns, &cells);
        assert_eq!(record.text("main_type").as_deref(), Some("Inventory"));
    }
}
