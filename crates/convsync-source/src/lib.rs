//! convsync-source — purchase record sources for convsync.
//!
//! A [`RecordSource`] turns a [`PurchaseFilter`] into a single-pass stream of
//! [`RawPurchaseRecord`] values. The filter is applied by the store; sources
//! never drop rows on their own.

pub mod memory;
pub mod mysql;

pub use memory::MemorySource;
pub use mysql::MySqlSource;

use convsync_core::{PurchaseFilter, RawPurchaseRecord};
use futures::stream::BoxStream;

/// Lazy, finite stream of rows. Consumed once; not restartable.
pub type RecordStream<'a> = BoxStream<'a, Result<RawPurchaseRecord, SourceError>>;

/// Trait implemented by each record source.
///
/// Nothing happens until the stream is polled; connection failures surface as
/// the first item.
pub trait RecordSource: Send + Sync {
    fn fetch<'a>(&'a self, filter: &'a PurchaseFilter) -> RecordStream<'a>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to reach the purchase database: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("purchase query failed: {0}")]
    Query(#[source] sqlx::Error),
    #[error("failed to decode purchase row: {0}")]
    Decode(#[source] sqlx::Error),
}

impl From<sqlx::Error> for SourceError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Configuration(_) => SourceError::Connect(err),
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::Decode(_) => SourceError::Decode(err),
            _ => SourceError::Query(err),
        }
    }
}
