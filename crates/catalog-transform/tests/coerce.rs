//! Tests for canonical row coercion.

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use catalog_model::{
    DecimalSeparator, MappedRecord, NumericPolicy, RunConfig, RunMode, TargetField,
};
use catalog_transform::{CoercionError, RowStamp, coerce_record, coerce_records_with};

const MERCHANT: &str = "4d9a292e-de49-4fa4-8ed8-f3672246ff3c";

fn config() -> RunConfig {
    RunConfig::new(RunMode::Preview, "produtos.csv", MERCHANT)
}

fn stamp() -> RowStamp {
    RowStamp {
        id: Uuid::from_u128(1),
        at: Utc.with_ymd_and_hms(2025, 8, 11, 17, 25, 16).unwrap(),
    }
}

fn record(fields: &[(TargetField, &str)]) -> MappedRecord {
    let mut record = MappedRecord::new(2);
    for (field, value) in fields {
        record.insert(*field, *value);
    }
    record
}

#[test]
fn listed_is_true_only_for_exact_marker() {
    let cases = [
        (Some("Ativo"), true),
        (Some("ativo"), false),
        (Some(""), false),
        (Some("Inativo"), false),
        (Some("Ativo "), false),
        (None, false),
    ];
    for (raw, expected) in cases {
        let fields: Vec<(TargetField, &str)> =
            raw.map(|v| (TargetField::Listed, v)).into_iter().collect();
        let row = coerce_record(&record(&fields), &config(), stamp()).unwrap().row;
        assert_eq!(row.listed, expected, "listed for {raw:?}");
    }
}

#[test]
fn empty_and_absent_numbers_are_null() {
    let row = coerce_record(
        &record(&[
            (TargetField::Price, ""),
            (TargetField::Quantity, ""),
            (TargetField::Weight, ""),
        ]),
        &config(),
        stamp(),
    )
    .unwrap()
    .row;
    assert_eq!(row.price, None);
    assert_eq!(row.cost, None);
    assert_eq!(row.weight, None);
    assert_eq!(row.quantity, None);
    assert_eq!(row.minimal_quantity, None);
}

#[test]
fn valid_numbers_round_trip() {
    let row = coerce_record(
        &record(&[
            (TargetField::Price, "19.90"),
            (TargetField::Cost, "7,5"),
            (TargetField::Weight, "0,250"),
            (TargetField::Quantity, "10"),
            (TargetField::MinimalQuantity, "2"),
        ]),
        &config(),
        stamp(),
    )
    .unwrap()
    .row;
    assert_eq!(row.price, Some(19.9));
    assert_eq!(row.cost, Some(7.5));
    assert_eq!(row.weight, Some(0.25));
    assert_eq!(row.quantity, Some(10));
    assert_eq!(row.minimal_quantity, Some(2));
}

#[test]
fn comma_decimal_price_parses_under_auto() {
    let row = coerce_record(&record(&[(TargetField::Price, "19,90")]), &config(), stamp())
        .unwrap()
        .row;
    assert_eq!(row.price, Some(19.9));
}

#[test]
fn period_mode_nulls_comma_decimal_with_warning() {
    let config = config().with_decimal_separator(DecimalSeparator::Period);
    let coerced = coerce_record(&record(&[(TargetField::Price, "19,90")]), &config, stamp())
        .unwrap();
    assert_eq!(coerced.row.price, None);
    assert_eq!(coerced.warnings.len(), 1);
    assert_eq!(coerced.warnings[0].field, TargetField::Price);
    assert_eq!(coerced.warnings[0].value, "19,90");
}

#[test]
fn strict_policy_rejects_invalid_numbers() {
    let config = config().with_numeric_policy(NumericPolicy::Strict);
    let err = coerce_record(&record(&[(TargetField::Quantity, "muitos")]), &config, stamp())
        .unwrap_err();
    assert_eq!(
        err,
        CoercionError::InvalidNumber {
            line: 2,
            field: TargetField::Quantity,
            value: "muitos".to_string(),
        }
    );
}

#[test]
fn structured_fields_are_json_string_literals() {
    let row = coerce_record(
        &record(&[
            (TargetField::Package, "Caixa \"grande\""),
            (TargetField::TaxCategories, ""),
        ]),
        &config(),
        stamp(),
    )
    .unwrap()
    .row;
    assert_eq!(row.package.as_deref(), Some(r#""Caixa \"grande\"""#));
    assert_eq!(row.tax_categories, None);
}

#[test]
fn text_fields() {
    let row = coerce_record(
        &record(&[
            (TargetField::Code, ""),
            (TargetField::Details, ""),
            (TargetField::Brand, "Acme"),
            (TargetField::GtinEan, " "),
        ]),
        &config(),
        stamp(),
    )
    .unwrap()
    .row;
    assert_eq!(row.code.as_deref(), Some(""));
    assert_eq!(row.description, None);
    assert_eq!(row.details, None);
    assert_eq!(row.brand.as_deref(), Some("Acme"));
    assert_eq!(row.gtin_ean.as_deref(), Some(" "));
    assert_eq!(row.category, None);
}

#[test]
fn missing_code_and_description_columns_stay_null() {
    let row = coerce_record(
        &record(&[(TargetField::Price, "5")]),
        &config(),
        stamp(),
    )
    .unwrap()
    .row;
    assert_eq!(row.code, None);
    assert_eq!(row.description, None);
    assert_eq!(row.price, Some(5.0));
}

#[test]
fn generated_fields() {
    let row = coerce_record(&record(&[]), &config(), stamp()).unwrap().row;
    assert_eq!(row.id, Uuid::from_u128(1));
    assert_eq!(row.merchant_id, MERCHANT);
    assert_eq!(row.inserted_at, row.updated_at);
}

#[test]
fn every_row_gets_its_own_id() {
    let records = vec![record(&[]), record(&[]), record(&[])];
    let rows = coerce_records_with(&records, &config(), RowStamp::now)
        .unwrap()
        .rows;
    assert_ne!(rows[0].id, rows[1].id);
    assert_ne!(rows[1].id, rows[2].id);
    assert_ne!(rows[0].id, rows[2].id);
    for row in &rows {
        assert_eq!(row.inserted_at, row.updated_at);
    }
}

#[test]
fn lenient_warnings_are_collected_across_rows() {
    let records = vec![
        record(&[(TargetField::Price, "abc")]),
        record(&[(TargetField::Price, "1")]),
        record(&[(TargetField::Weight, "x"), (TargetField::Cost, "y")]),
    ];
    let coerced = coerce_records_with(&records, &config(), stamp).unwrap();
    assert_eq!(coerced.rows.len(), 3);
    assert_eq!(coerced.warnings.len(), 3);
    assert_eq!(coerced.rows[1].price, Some(1.0));
}
