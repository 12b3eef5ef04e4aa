#![deny(unsafe_code)]

//! Header-driven field mapping.

use catalog_model::{FieldMap, MappedRecord, SourceRecord};

/// Projects a source record onto the canonical fields named by `field_map`.
///
/// Only headers present in both the map and the record are carried over;
/// everything else is dropped without error.
pub fn map_record(record: &SourceRecord, field_map: &FieldMap) -> MappedRecord {
    let mut mapped = MappedRecord::new(record.line);
    for (header, field) in field_map.iter() {
        if let Some(value) = record.get(header) {
            mapped.insert(field, value);
        }
    }
    mapped
}

/// Maps every record, reporting map headers that never appear in the file.
pub fn map_records(records: &[SourceRecord], field_map: &FieldMap) -> Vec<MappedRecord> {
    if let Some(first) = records.first() {
        let headers = first.headers();
        for (header, field) in field_map.iter() {
            if !headers.iter().any(|h| h == header) {
                tracing::warn!(
                    header = %header,
                    field = %field,
                    "mapped header missing from CSV, field will be empty"
                );
            }
        }
    }
    records
        .iter()
        .map(|record| map_record(record, field_map))
        .collect()
}
