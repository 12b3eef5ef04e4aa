//! Integration tests for INSERT rendering.

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use catalog_model::{CanonicalRow, Column};
use catalog_sql::{
    MAX_PARAMETERIZED_BATCH, SqlError, SqlValue, batches, column_list, literal_insert,
    parameterized_insert,
};

fn full_row() -> CanonicalRow {
    let at = Utc.with_ymd_and_hms(2025, 8, 11, 17, 25, 16).unwrap();
    CanonicalRow {
        id: Uuid::from_u128(1),
        code: Some("SKU1".to_string()),
        description: Some("Widget d'Or".to_string()),
        price: Some(19.9),
        details: None,
        listed: true,
        quantity: Some(10),
        category: Some("Ferramentas".to_string()),
        brand: None,
        package: Some("\"Caixa\"".to_string()),
        measuring_unit: Some("UN".to_string()),
        origin: Some("0".to_string()),
        cost: None,
        minimal_quantity: None,
        weight: Some(0.25),
        gtin_ean: Some("7891234567890".to_string()),
        tax_categories: None,
        merchant_id: "m-1".to_string(),
        inserted_at: at,
        updated_at: at,
    }
}

fn sparse_row() -> CanonicalRow {
    CanonicalRow {
        id: Uuid::from_u128(2),
        code: Some("SKU2".to_string()),
        description: Some(String::new()),
        price: None,
        listed: false,
        quantity: None,
        category: None,
        package: None,
        measuring_unit: None,
        origin: None,
        weight: None,
        gtin_ean: None,
        ..full_row()
    }
}

#[test]
fn column_list_is_fixed() {
    assert_eq!(
        column_list(),
        "id, code, description, price, details, listed, quantity, category, brand, package, \
         measuring_unit, origin, cost, minimal_quantity, weight, gtin_ean, tax_categories, \
         merchant_id, inserted_at, updated_at"
    );
}

#[test]
fn literal_insert_escapes_and_nulls() {
    let rows = vec![full_row(), sparse_row()];
    let batch = batches(&rows, 500).next().unwrap();
    let sql = literal_insert(&batch, "products").unwrap();
    insta::assert_snapshot!(sql, @r#"
INSERT INTO products (id, code, description, price, details, listed, quantity, category, brand, package, measuring_unit, origin, cost, minimal_quantity, weight, gtin_ean, tax_categories, merchant_id, inserted_at, updated_at) VALUES
('00000000-0000-0000-0000-000000000001', 'SKU1', 'Widget d''Or', 19.9, NULL, TRUE, 10, 'Ferramentas', NULL, '"Caixa"', 'UN', '0', NULL, NULL, 0.25, '7891234567890', NULL, 'm-1', '2025-08-11T17:25:16.000Z', '2025-08-11T17:25:16.000Z'),
('00000000-0000-0000-0000-000000000002', 'SKU2', '', NULL, NULL, FALSE, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, 'm-1', '2025-08-11T17:25:16.000Z', '2025-08-11T17:25:16.000Z');
"#);
}

#[test]
fn literal_insert_neutralizes_injection() {
    let row = CanonicalRow {
        code: Some("x'); DROP TABLE products; --".to_string()),
        ..full_row()
    };
    let rows = vec![row];
    let batch = batches(&rows, 500).next().unwrap();
    let sql = literal_insert(&batch, "products").unwrap();
    assert!(sql.contains("'x''); DROP TABLE products; --'"));
    assert_eq!(sql.matches(';').count(), 3);
}

#[test]
fn absent_code_and_description_render_null() {
    let row = CanonicalRow {
        code: None,
        description: None,
        ..full_row()
    };
    let rows = vec![row];
    let batch = batches(&rows, 500).next().unwrap();
    let sql = literal_insert(&batch, "products").unwrap();
    assert!(sql.contains("('00000000-0000-0000-0000-000000000001', NULL, NULL, 19.9,"), "{sql}");

    let statement = parameterized_insert(&batch, "products").unwrap();
    assert_eq!(statement.params[1], SqlValue::Text(None));
    assert_eq!(statement.params[2], SqlValue::Text(None));
}

#[test]
fn parameterized_insert_numbers_placeholders_row_major() {
    let rows = vec![full_row(), sparse_row()];
    let batch = batches(&rows, 500).next().unwrap();
    let statement = parameterized_insert(&batch, "products").unwrap();

    assert_eq!(statement.rows, 2);
    assert_eq!(statement.params.len(), 2 * Column::COUNT);
    assert!(statement.sql.starts_with(&format!(
        "INSERT INTO products ({}) VALUES ($1, $2, ",
        column_list()
    )));
    assert!(statement.sql.contains("$20), ($21, $22"));
    assert!(statement.sql.ends_with("$39, $40)"));
    assert!(!statement.sql.contains("SKU1"));

    assert_eq!(statement.params[0], SqlValue::Uuid(Uuid::from_u128(1)));
    assert_eq!(statement.params[1], SqlValue::Text(Some("SKU1".to_string())));
    assert_eq!(statement.params[3], SqlValue::Float(Some(19.9)));
    assert_eq!(statement.params[5], SqlValue::Bool(true));
    assert_eq!(
        statement.params[9],
        SqlValue::Json(Some(serde_json::Value::String("Caixa".to_string())))
    );
    assert_eq!(statement.params[20], SqlValue::Uuid(Uuid::from_u128(2)));
    assert_eq!(statement.params[23], SqlValue::Float(None));
}

#[test]
fn qualified_and_quoted_table_names() {
    let rows = vec![full_row()];
    let batch = batches(&rows, 500).next().unwrap();
    let statement = parameterized_insert(&batch, "Loja.products").unwrap();
    assert!(statement.sql.starts_with("INSERT INTO \"Loja\".products ("));
}

#[test]
fn oversized_batch_is_rejected() {
    let rows = vec![full_row(); MAX_PARAMETERIZED_BATCH + 1];
    let batch = batches(&rows, rows.len()).next().unwrap();
    let err = parameterized_insert(&batch, "products").unwrap_err();
    assert!(matches!(err, SqlError::TooManyParameters { .. }));
}
