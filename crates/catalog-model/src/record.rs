//! Raw and mapped record types produced before coercion.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::field::TargetField;

/// One CSV data line keyed by the file's header row.
///
/// Headers are shared between all records of a file. A record shorter than the
/// header row simply lacks the trailing columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    /// 1-based line number in the source file.
    pub line: u64,
    headers: Arc<[String]>,
    values: Vec<String>,
}

impl SourceRecord {
    pub fn new(line: u64, headers: Arc<[String]>, values: Vec<String>) -> Self {
        Self {
            line,
            headers,
            values,
        }
    }

    /// Value of the first column named `header`, if the record has one.
    pub fn get(&self, header: &str) -> Option<&str> {
        let idx = self.headers.iter().position(|h| h == header)?;
        self.values.get(idx).map(String::as_str)
    }

    pub fn contains(&self, header: &str) -> bool {
        self.get(header).is_some()
    }

    /// Iterates `(header, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .zip(self.values.iter())
            .map(|(h, v)| (h.as_str(), v.as_str()))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.values.len().min(self.headers.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A record after field mapping: canonical field → raw text.
///
/// Fields whose source column was missing are absent, not empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappedRecord {
    /// Line number of the source record, kept for diagnostics.
    pub line: u64,
    pub fields: BTreeMap<TargetField, String>,
}

impl MappedRecord {
    pub fn new(line: u64) -> Self {
        Self {
            line,
            fields: BTreeMap::new(),
        }
    }

    pub fn get(&self, field: TargetField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn insert(&mut self, field: TargetField, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Arc<[String]> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn short_record_lacks_trailing_columns() {
        let record = SourceRecord::new(2, headers(&["A", "B", "C"]), vec!["1".into()]);
        assert_eq!(record.get("A"), Some("1"));
        assert_eq!(record.get("B"), None);
        assert!(!record.contains("C"));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn empty_cell_is_present() {
        let record = SourceRecord::new(2, headers(&["A", "B"]), vec!["1".into(), String::new()]);
        assert_eq!(record.get("B"), Some(""));
        assert_eq!(record.iter().count(), 2);
    }
}
