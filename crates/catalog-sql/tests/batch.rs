//! Batch partition properties.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use uuid::Uuid;

use catalog_model::CanonicalRow;
use catalog_sql::{batch_count, batches};

fn row(n: u128) -> CanonicalRow {
    let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    CanonicalRow {
        id: Uuid::from_u128(n),
        code: Some(format!("SKU{n}")),
        description: None,
        price: None,
        details: None,
        listed: false,
        quantity: None,
        category: None,
        brand: None,
        package: None,
        measuring_unit: None,
        origin: None,
        cost: None,
        minimal_quantity: None,
        weight: None,
        gtin_ean: None,
        tax_categories: None,
        merchant_id: "m".to_string(),
        inserted_at: at,
        updated_at: at,
    }
}

fn rows(count: usize) -> Vec<CanonicalRow> {
    (0..count as u128).map(row).collect()
}

#[test]
fn default_size_splits_1201_rows_into_three() {
    let rows = rows(1201);
    let sizes: Vec<usize> = batches(&rows, 500).map(|b| b.len()).collect();
    assert_eq!(sizes, vec![500, 500, 201]);
    assert_eq!(batch_count(1201, 500), 3);
}

#[test]
fn no_rows_no_batches() {
    assert_eq!(batches(&[], 500).count(), 0);
    assert_eq!(batch_count(0, 500), 0);
}

#[test]
fn batches_carry_index_and_offset() {
    let rows = rows(7);
    let meta: Vec<(usize, usize)> = batches(&rows, 3).map(|b| (b.index, b.offset)).collect();
    assert_eq!(meta, vec![(0, 0), (1, 3), (2, 6)]);
}

#[test]
#[should_panic(expected = "batch size must be at least 1")]
fn zero_size_panics() {
    let _ = batches(&rows(1), 0);
}

proptest! {
    #[test]
    fn concatenated_batches_reproduce_rows(count in 0usize..1200, size in 1usize..600) {
        let rows = rows(count);
        let parts: Vec<_> = batches(&rows, size).collect();

        prop_assert_eq!(parts.len(), batch_count(count, size));
        for part in &parts {
            prop_assert!(!part.is_empty());
            prop_assert!(part.len() <= size);
            prop_assert_eq!(part.offset, part.index * size);
        }

        let joined: Vec<Uuid> = parts
            .iter()
            .flat_map(|b| b.rows.iter().map(|r| r.id))
            .collect();
        let original: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        prop_assert_eq!(joined, original);
    }
}
