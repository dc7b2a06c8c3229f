//! Persistent cache of BIN records.
//!
//! One row per BIN lives in the `binbase` table. The lookup policy only sees
//! the [`BinStore`] trait, so tests and development mode can swap the
//! PostgreSQL store for the in-memory one.

mod error;
mod memory;
mod postgres;
mod record;

use async_trait::async_trait;

use crate::domain::{Bin, LookupResult};

pub use error::StoreError;
pub use memory::MemoryBinStore;
pub use postgres::{PgBinStore, PgStoreConfig};
pub use record::{BinFields, BinRecord};

/// Read/write access to cached BIN records.
#[async_trait]
pub trait BinStore: Send + Sync {
    /// Exact-match lookup by BIN.
    async fn read(&self, bin: Bin) -> Result<Option<BinRecord>, StoreError>;

    /// Insert a record for `bin` holding the fields of `result`.
    ///
    /// Fields missing from `result` are stored as absent. If a record for
    /// `bin` already exists it is overwritten (last write wins).
    async fn create(&self, bin: Bin, result: &LookupResult) -> Result<(), StoreError>;

    /// Refresh `existing` from `result`, keeping stored values for any field
    /// `result` does not provide. Matched by the record's id.
    async fn update(&self, existing: &BinRecord, result: &LookupResult) -> Result<(), StoreError>;
}
