#![deny(unsafe_code)]

use chrono::NaiveDate;

/// A single raw field value as read from a source row.
///
/// Cleaning and validation branch on the tag; no operation probes types at
/// runtime. `Null` covers both genuinely missing cells and empty source
/// fields after ingestion.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Null,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl CellValue {
    /// Returns the text payload for `Text` cells, `None` otherwise.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Builds a cell from raw text, mapping empty/whitespace-only input to `Null`.
    pub fn from_raw_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Self::Null
        } else {
            Self::Text(trimmed.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_text_maps_blank_to_null() {
        assert_eq!(CellValue::from_raw_text(""), CellValue::Null);
        assert_eq!(CellValue::from_raw_text("   "), CellValue::Null);
        assert_eq!(
            CellValue::from_raw_text(" x "),
            CellValue::Text("x".to_string())
        );
    }

    #[test]
    fn as_text_only_for_text_cells() {
        assert_eq!(CellValue::Text("a".into()).as_text(), Some("a"));
        assert_eq!(CellValue::Number(1.0).as_text(), None);
        assert_eq!(CellValue::Null.as_text(), None);
    }
}
