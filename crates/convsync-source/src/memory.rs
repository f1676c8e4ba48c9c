//! In-memory source — canned rows per family, for tests and offline replays.

use std::collections::HashMap;

use convsync_core::{PurchaseFilter, PurchaseKind, RawPurchaseRecord};
use futures::StreamExt;

use crate::{RecordSource, RecordStream};

/// Returns the rows registered for the filter's family, in insertion order.
///
/// The window and row filters are not re-applied: rows stand for what the
/// store would already have selected.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    rows: HashMap<PurchaseKind, Vec<RawPurchaseRecord>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(mut self, kind: PurchaseKind, rows: Vec<RawPurchaseRecord>) -> Self {
        self.rows.entry(kind).or_default().extend(rows);
        self
    }

    pub fn push(&mut self, kind: PurchaseKind, row: RawPurchaseRecord) {
        self.rows.entry(kind).or_default().push(row);
    }
}

impl RecordSource for MemorySource {
    fn fetch<'a>(&'a self, filter: &'a PurchaseFilter) -> RecordStream<'a> {
        let rows = self.rows.get(&filter.kind).map(Vec::as_slice).unwrap_or_default();
        tracing::debug!(kind = %filter.kind, rows = rows.len(), "serving in-memory rows");
        futures::stream::iter(rows.iter().cloned().map(Ok)).boxed()
    }
}
