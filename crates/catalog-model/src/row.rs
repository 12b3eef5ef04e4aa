//! Database-ready product rows.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use uuid::Uuid;

/// Renders a timestamp as RFC 3339 UTC with millisecond precision
/// (`2025-08-11T17:25:16.123Z`).
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_timestamp<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(at))
}

/// A fully typed product row.
///
/// `package` and `tax_categories` hold JSON text (the raw cell encoded as a
/// JSON string literal), not the raw cell itself. `code` and `description`
/// are `None` only when their column is missing from the file; an empty cell
/// stays `Some("")`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalRow {
    pub id: Uuid,
    pub code: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub details: Option<String>,
    pub listed: bool,
    pub quantity: Option<i64>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub package: Option<String>,
    pub measuring_unit: Option<String>,
    pub origin: Option<String>,
    pub cost: Option<f64>,
    pub minimal_quantity: Option<i64>,
    pub weight: Option<f64>,
    pub gtin_ean: Option<String>,
    pub tax_categories: Option<String>,
    pub merchant_id: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub inserted_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub updated_at: DateTime<Utc>,
}
