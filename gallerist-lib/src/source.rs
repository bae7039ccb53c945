//! Record source abstraction and page snapshots.

use async_trait::async_trait;

use crate::error::Error;
use crate::model::RecordKey;

/// One fetched page of catalog records plus the catalog-wide total.
///
/// A snapshot is replaced wholesale on every successful fetch and never
/// mutated in place.
#[derive(Debug, Clone)]
pub struct PageSnapshot<R> {
    records: Vec<R>,
    total_count: usize,
}

impl<R> PageSnapshot<R> {
    /// Creates a new snapshot from fetched records and the total count.
    pub fn new(records: Vec<R>, total_count: usize) -> Self {
        Self {
            records,
            total_count,
        }
    }

    /// Returns a reference to the records in this page, in fetch order.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Consumes the snapshot and returns the records.
    pub fn into_records(self) -> Vec<R> {
        self.records
    }

    /// Returns the total record count across all pages.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Returns the number of records in this page.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if this page has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<R> Default for PageSnapshot<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            total_count: 0,
        }
    }
}

/// Asynchronous source of paginated catalog records.
///
/// Page indices are one-based. A failed fetch is reported to the caller and
/// must leave any previously returned data untouched; the browser applies a
/// fetch result only after it succeeds.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// The record type this source yields.
    type Record: RecordKey + Clone + Send + Sync;

    /// Fetches one page of records and the total record count.
    async fn fetch_page(&self, page: u32) -> Result<PageSnapshot<Self::Record>, Error>;

    /// Returns the fixed number of records per page this source serves.
    fn page_size(&self) -> usize;
}
