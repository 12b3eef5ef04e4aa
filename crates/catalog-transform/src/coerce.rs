//! Mapped record → canonical row coercion.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use catalog_model::{CanonicalRow, MappedRecord, NumericPolicy, RunConfig, TargetField};

use crate::error::{CoercionError, Result};
use crate::numeric::{parse_f64, parse_i64};

/// Marker value of the `listed` column.
pub const LISTED_MARKER: &str = "Ativo";

/// Generated identity of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowStamp {
    pub id: Uuid,
    pub at: DateTime<Utc>,
}

impl RowStamp {
    /// Fresh random id stamped with the current instant.
    pub fn now() -> Self {
        Self {
            id: Uuid::new_v4(),
            at: Utc::now(),
        }
    }
}

/// A numeric cell that did not parse and was stored as NULL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercionWarning {
    pub line: u64,
    pub field: TargetField,
    pub value: String,
}

impl fmt::Display for CoercionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: invalid number {:?} for {}, stored as NULL",
            self.line, self.value, self.field
        )
    }
}

/// Result of coercing one record.
#[derive(Debug, Clone)]
pub struct CoercedRow {
    pub row: CanonicalRow,
    pub warnings: Vec<CoercionWarning>,
}

/// Per-record coercion state.
struct Coercer<'a> {
    record: &'a MappedRecord,
    config: &'a RunConfig,
    warnings: Vec<CoercionWarning>,
}

impl<'a> Coercer<'a> {
    fn raw(&self, field: TargetField) -> Option<&'a str> {
        self.record.get(field)
    }

    /// Empty and absent both become NULL; parse failures follow the policy.
    fn numeric<T>(
        &mut self,
        field: TargetField,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<Option<T>> {
        let Some(raw) = self.raw(field).filter(|v| !v.is_empty()) else {
            return Ok(None);
        };
        if let Some(value) = parse(raw) {
            return Ok(Some(value));
        }
        match self.config.numeric_policy {
            NumericPolicy::Strict => Err(CoercionError::InvalidNumber {
                line: self.record.line,
                field,
                value: raw.to_string(),
            }),
            NumericPolicy::Lenient => {
                self.warnings.push(CoercionWarning {
                    line: self.record.line,
                    field,
                    value: raw.to_string(),
                });
                Ok(None)
            }
        }
    }

    fn float(&mut self, field: TargetField) -> Result<Option<f64>> {
        let separator = self.config.decimal_separator;
        self.numeric(field, |raw| parse_f64(raw, separator))
    }

    fn integer(&mut self, field: TargetField) -> Result<Option<i64>> {
        let separator = self.config.decimal_separator;
        self.numeric(field, |raw| parse_i64(raw, separator))
    }

    /// Passes the cell through untouched, empty included.
    fn text(&self, field: TargetField) -> Option<String> {
        self.raw(field).map(str::to_string)
    }

    fn optional_text(&self, field: TargetField) -> Option<String> {
        self.raw(field)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Encodes the raw cell as a JSON string literal.
    fn json_text(&self, field: TargetField) -> Option<String> {
        self.raw(field)
            .filter(|v| !v.is_empty())
            .map(|v| serde_json::Value::String(v.to_string()).to_string())
    }
}

/// Coerces one mapped record into a typed row.
pub fn coerce_record(
    record: &MappedRecord,
    config: &RunConfig,
    stamp: RowStamp,
) -> Result<CoercedRow> {
    let mut c = Coercer {
        record,
        config,
        warnings: Vec::new(),
    };

    let price = c.float(TargetField::Price)?;
    let quantity = c.integer(TargetField::Quantity)?;
    let cost = c.float(TargetField::Cost)?;
    let minimal_quantity = c.integer(TargetField::MinimalQuantity)?;
    let weight = c.float(TargetField::Weight)?;

    let row = CanonicalRow {
        id: stamp.id,
        code: c.text(TargetField::Code),
        description: c.text(TargetField::Description),
        price,
        details: c.optional_text(TargetField::Details),
        listed: c.raw(TargetField::Listed) == Some(LISTED_MARKER),
        quantity,
        category: c.optional_text(TargetField::Category),
        brand: c.optional_text(TargetField::Brand),
        package: c.json_text(TargetField::Package),
        measuring_unit: c.optional_text(TargetField::MeasuringUnit),
        origin: c.optional_text(TargetField::Origin),
        cost,
        minimal_quantity,
        weight,
        gtin_ean: c.optional_text(TargetField::GtinEan),
        tax_categories: c.json_text(TargetField::TaxCategories),
        merchant_id: config.merchant_id.clone(),
        inserted_at: stamp.at,
        updated_at: stamp.at,
    };

    Ok(CoercedRow {
        row,
        warnings: c.warnings,
    })
}

/// Rows and warnings for a whole file.
#[derive(Debug, Clone, Default)]
pub struct CoercedRows {
    pub rows: Vec<CanonicalRow>,
    pub warnings: Vec<CoercionWarning>,
}

/// Coerces every record in order, stamping each with a fresh id and time.
pub fn coerce_records(records: &[MappedRecord], config: &RunConfig) -> Result<CoercedRows> {
    coerce_records_with(records, config, RowStamp::now)
}

/// Like [`coerce_records`] with a caller-supplied stamp source.
pub fn coerce_records_with(
    records: &[MappedRecord],
    config: &RunConfig,
    mut stamp: impl FnMut() -> RowStamp,
) -> Result<CoercedRows> {
    let mut out = CoercedRows {
        rows: Vec::with_capacity(records.len()),
        warnings: Vec::new(),
    };
    for record in records {
        let coerced = coerce_record(record, config, stamp())?;
        for warning in &coerced.warnings {
            tracing::warn!(
                line = warning.line,
                field = %warning.field,
                "invalid number stored as NULL"
            );
        }
        out.rows.push(coerced.row);
        out.warnings.extend(coerced.warnings);
    }
    Ok(out)
}
