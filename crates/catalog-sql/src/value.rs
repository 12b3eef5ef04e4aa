//! Typed column values and their SQL literal rendering.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use catalog_model::{CanonicalRow, Column, format_timestamp};

use crate::error::Result;
use crate::quote::quote_literal;

/// One cell of an INSERT, carrying its column type even when NULL.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Uuid(Uuid),
    Text(Option<String>),
    Float(Option<f64>),
    Integer(Option<i64>),
    Bool(bool),
    Json(Option<serde_json::Value>),
    Timestamp(DateTime<Utc>),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(
            self,
            SqlValue::Text(None)
                | SqlValue::Float(None)
                | SqlValue::Integer(None)
                | SqlValue::Json(None)
        )
    }

    /// Inline SQL literal for this value.
    pub fn to_literal(&self) -> String {
        match self {
            SqlValue::Uuid(id) => quote_literal(&id.to_string()),
            SqlValue::Text(Some(text)) => quote_literal(text),
            SqlValue::Float(Some(v)) => v.to_string(),
            SqlValue::Integer(Some(v)) => v.to_string(),
            SqlValue::Bool(true) => "TRUE".to_string(),
            SqlValue::Bool(false) => "FALSE".to_string(),
            SqlValue::Json(Some(json)) => quote_literal(&json.to_string()),
            SqlValue::Timestamp(at) => quote_literal(&format_timestamp(at)),
            SqlValue::Text(None)
            | SqlValue::Float(None)
            | SqlValue::Integer(None)
            | SqlValue::Json(None) => "NULL".to_string(),
        }
    }
}

fn json(text: Option<&String>) -> Result<Option<serde_json::Value>> {
    Ok(text.map(|t| serde_json::from_str(t)).transpose()?)
}

/// Values of `row` in [`Column::ALL`] order.
pub fn row_values(row: &CanonicalRow) -> Result<Vec<SqlValue>> {
    let mut values = Vec::with_capacity(Column::COUNT);
    for column in Column::ALL {
        let value = match column {
            Column::Id => SqlValue::Uuid(row.id),
            Column::Code => SqlValue::Text(row.code.clone()),
            Column::Description => SqlValue::Text(row.description.clone()),
            Column::Price => SqlValue::Float(row.price),
            Column::Details => SqlValue::Text(row.details.clone()),
            Column::Listed => SqlValue::Bool(row.listed),
            Column::Quantity => SqlValue::Integer(row.quantity),
            Column::Category => SqlValue::Text(row.category.clone()),
            Column::Brand => SqlValue::Text(row.brand.clone()),
            Column::Package => SqlValue::Json(json(row.package.as_ref())?),
            Column::MeasuringUnit => SqlValue::Text(row.measuring_unit.clone()),
            Column::Origin => SqlValue::Text(row.origin.clone()),
            Column::Cost => SqlValue::Float(row.cost),
            Column::MinimalQuantity => SqlValue::Integer(row.minimal_quantity),
            Column::Weight => SqlValue::Float(row.weight),
            Column::GtinEan => SqlValue::Text(row.gtin_ean.clone()),
            Column::TaxCategories => SqlValue::Json(json(row.tax_categories.as_ref())?),
            Column::MerchantId => SqlValue::Text(Some(row.merchant_id.clone())),
            Column::InsertedAt => SqlValue::Timestamp(row.inserted_at),
            Column::UpdatedAt => SqlValue::Timestamp(row.updated_at),
        };
        values.push(value);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_literals() {
        assert_eq!(SqlValue::Text(None).to_literal(), "NULL");
        assert_eq!(SqlValue::Float(None).to_literal(), "NULL");
        assert_eq!(SqlValue::Json(None).to_literal(), "NULL");
        assert!(SqlValue::Integer(None).is_null());
        assert!(!SqlValue::Bool(false).is_null());
    }

    #[test]
    fn scalar_literals() {
        assert_eq!(SqlValue::Float(Some(19.9)).to_literal(), "19.9");
        assert_eq!(SqlValue::Float(Some(10.0)).to_literal(), "10");
        assert_eq!(SqlValue::Integer(Some(-3)).to_literal(), "-3");
        assert_eq!(SqlValue::Bool(true).to_literal(), "TRUE");
    }

    #[test]
    fn text_and_json_literals_are_escaped() {
        assert_eq!(
            SqlValue::Text(Some("Pão d'água".to_string())).to_literal(),
            "'Pão d''água'"
        );
        let json = serde_json::Value::String("d'x".to_string());
        assert_eq!(SqlValue::Json(Some(json)).to_literal(), "'\"d''x\"'");
    }
}
