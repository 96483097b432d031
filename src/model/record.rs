//! Shipment record and cell value types.

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// A scalar cell value extracted from the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Field absent in the source line
    Empty,
    /// Free text
    Text(String),
    /// Whole number (package counts)
    Integer(i64),
    /// Decimal number
    Number(f64),
    /// Calendar date
    Date(NaiveDate),
}

impl FieldValue {
    /// Build a text value, mapping blank strings to [`FieldValue::Empty`].
    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.trim().is_empty() {
            FieldValue::Empty
        } else {
            FieldValue::Text(s)
        }
    }

    /// Check if the value is empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Empty)
    }

    /// Get the text if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the integer if this is an integer value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Empty => Ok(()),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Date(d) => write!(f, "{}", d.format("%d-%m-%Y")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::text(s)
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(d: NaiveDate) -> Self {
        FieldValue::Date(d)
    }
}

/// One shipment entry (or summary row) extracted from the report.
///
/// Fields keep the order they were added in. Records are built once by the
/// extractor and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentRecord {
    page: u32,
    fields: Vec<(String, FieldValue)>,
}

impl ShipmentRecord {
    /// Start a record found on `page` (1-indexed).
    pub fn new(page: u32) -> Self {
        Self {
            page,
            fields: Vec::new(),
        }
    }

    /// Append a field. A repeated name replaces the earlier value in place.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
        self
    }

    /// Source page (1-indexed).
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Field names in insertion order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// Fields in insertion order.
    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for ShipmentRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry("page", &self.page)?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_preserves_field_order() {
        let record = ShipmentRecord::new(1)
            .with("Tracking Number", "1Z9999")
            .with("Weight", "2.3kg")
            .with("Destination", "Berlin");

        let names: Vec<_> = record.field_names().collect();
        assert_eq!(names, vec!["Tracking Number", "Weight", "Destination"]);
        assert_eq!(record.get("Weight").and_then(|v| v.as_text()), Some("2.3kg"));
        assert_eq!(record.page(), 1);
    }

    #[test]
    fn test_record_repeated_field_replaces() {
        let record = ShipmentRecord::new(2).with("Air", 1i64).with("Air", 5i64);
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("Air").and_then(|v| v.as_integer()), Some(5));
    }

    #[test]
    fn test_blank_text_is_empty() {
        assert!(FieldValue::text("   ").is_empty());
        assert!(!FieldValue::text("x").is_empty());
    }

    #[test]
    fn test_field_value_display() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        assert_eq!(FieldValue::Date(date).to_string(), "01-10-2025");
        assert_eq!(FieldValue::Integer(42).to_string(), "42");
        assert_eq!(FieldValue::Empty.to_string(), "");
    }

    #[test]
    fn test_record_serializes_as_ordered_map() {
        let record = ShipmentRecord::new(3)
            .with("Customer", "ACME")
            .with("Service", FieldValue::Empty);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"page":3,"Customer":"ACME","Service":null}"#);
    }
}
