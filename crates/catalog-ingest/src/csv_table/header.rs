//! CSV header row handling.

use std::collections::BTreeSet;
use std::sync::Arc;

/// Column names of a CSV export, shared by every record of the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvHeaders {
    columns: Arc<[String]>,
}

impl CsvHeaders {
    /// Builds headers from raw header cells, keeping them verbatim.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Shared handle for building records.
    pub fn shared(&self) -> Arc<[String]> {
        Arc::clone(&self.columns)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// True when every header cell is blank.
    pub fn is_blank(&self) -> bool {
        self.columns.iter().all(|c| c.trim().is_empty())
    }

    /// Header names that occur more than once. Lookups resolve to the first.
    pub fn duplicates(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut dupes = BTreeSet::new();
        for column in self.columns.iter() {
            if !seen.insert(column.as_str()) {
                dupes.insert(column.clone());
            }
        }
        dupes.into_iter().collect()
    }
}
