//! INSERT statement rendering.

use std::fmt::Write as _;

use catalog_model::Column;

use crate::batch::Batch;
use crate::error::{Result, SqlError};
use crate::quote::{qualified_table_name, quote_identifier};
use crate::value::{SqlValue, row_values};

/// PostgreSQL's limit on bind parameters per statement.
pub const MAX_BIND_PARAMS: usize = 65_535;

/// Largest batch that fits in one parameterized statement.
pub const MAX_PARAMETERIZED_BATCH: usize = MAX_BIND_PARAMS / Column::COUNT;

/// A multi-row INSERT with positional placeholders and its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    pub sql: String,
    /// Row-major, [`Column::COUNT`] values per row.
    pub params: Vec<SqlValue>,
    pub rows: usize,
}

/// `id, code, ..., updated_at`
pub fn column_list() -> String {
    Column::ALL
        .iter()
        .map(|c| quote_identifier(c.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn insert_head(table: &str) -> String {
    format!(
        "INSERT INTO {} ({}) VALUES",
        qualified_table_name(table),
        column_list()
    )
}

/// Builds a `$n`-placeholder INSERT for `batch`; the driver binds `params`.
pub fn parameterized_insert(batch: &Batch<'_>, table: &str) -> Result<InsertStatement> {
    let param_count = batch.len() * Column::COUNT;
    if param_count > MAX_BIND_PARAMS {
        return Err(SqlError::TooManyParameters {
            rows: batch.len(),
            params: param_count,
            limit: MAX_BIND_PARAMS,
        });
    }

    let mut sql = insert_head(table);
    let mut params = Vec::with_capacity(param_count);
    for (row_idx, row) in batch.rows.iter().enumerate() {
        sql.push_str(if row_idx == 0 { " (" } else { ", (" });
        for col_idx in 0..Column::COUNT {
            if col_idx > 0 {
                sql.push_str(", ");
            }
            let _ = write!(sql, "${}", row_idx * Column::COUNT + col_idx + 1);
        }
        sql.push(')');
        params.extend(row_values(row)?);
    }

    Ok(InsertStatement {
        sql,
        params,
        rows: batch.len(),
    })
}

/// Builds an INSERT with every value inlined as an escaped literal.
///
/// One tuple per line, terminated by `;`.
pub fn literal_insert(batch: &Batch<'_>, table: &str) -> Result<String> {
    let mut sql = insert_head(table);
    for (row_idx, row) in batch.rows.iter().enumerate() {
        sql.push_str(if row_idx == 0 { "\n(" } else { ",\n(" });
        let literals: Vec<String> = row_values(row)?
            .iter()
            .map(SqlValue::to_literal)
            .collect();
        sql.push_str(&literals.join(", "));
        sql.push(')');
    }
    sql.push(';');
    Ok(sql)
}
