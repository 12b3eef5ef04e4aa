//! Fixed-size batching of canonical rows.

use std::slice::Chunks;

use catalog_model::CanonicalRow;

/// A contiguous slice of rows emitted as one INSERT.
#[derive(Debug, Clone, Copy)]
pub struct Batch<'a> {
    /// 0-based batch number.
    pub index: usize,
    /// Position of the first row in the full row set.
    pub offset: usize,
    pub rows: &'a [CanonicalRow],
}

impl Batch<'_> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Lazy, order-preserving partition of a row set.
#[derive(Debug, Clone)]
pub struct Batches<'a> {
    chunks: Chunks<'a, CanonicalRow>,
    size: usize,
    next_index: usize,
}

impl<'a> Iterator for Batches<'a> {
    type Item = Batch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rows = self.chunks.next()?;
        let index = self.next_index;
        self.next_index += 1;
        Some(Batch {
            index,
            offset: index * self.size,
            rows,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for Batches<'_> {}

/// Splits `rows` into batches of at most `size` rows.
///
/// # Panics
///
/// Panics if `size` is zero; run configuration rejects that before any
/// batching happens.
pub fn batches(rows: &[CanonicalRow], size: usize) -> Batches<'_> {
    assert!(size > 0, "batch size must be at least 1");
    Batches {
        chunks: rows.chunks(size),
        size,
        next_index: 0,
    }
}

/// Number of batches `row_count` rows split into.
pub fn batch_count(row_count: usize, size: usize) -> usize {
    row_count.div_ceil(size)
}
