//! In-memory BIN store for tests and development.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::{Bin, LookupResult};

use super::error::StoreError;
use super::record::{BinFields, BinRecord};
use super::BinStore;

#[derive(Default)]
struct Inner {
    records: HashMap<Bin, BinRecord>,
    next_id: i32,
}

impl Inner {
    fn allocate_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Thread-safe in-memory store with the same semantics as the PostgreSQL
/// store.
#[derive(Clone, Default)]
pub struct MemoryBinStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryBinStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record with explicit timestamps, bypassing the normal write
    /// path. Useful for staging stale records.
    pub async fn seed(&self, bin: Bin, fields: BinFields, updated_at: DateTime<Utc>) -> BinRecord {
        let mut guard = self.inner.write().await;
        let id = guard.allocate_id();
        let record = build_record(id, bin, fields, updated_at, updated_at);
        guard.records.insert(bin, record.clone());
        record
    }

    /// Get the stored record for a BIN.
    pub async fn get(&self, bin: Bin) -> Option<BinRecord> {
        let guard = self.inner.read().await;
        guard.records.get(&bin).cloned()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.records.len()
    }

    /// Check if the store is empty.
    pub async fn is_empty(&self) -> bool {
        let guard = self.inner.read().await;
        guard.records.is_empty()
    }
}

#[async_trait]
impl BinStore for MemoryBinStore {
    async fn read(&self, bin: Bin) -> Result<Option<BinRecord>, StoreError> {
        Ok(self.get(bin).await)
    }

    async fn create(&self, bin: Bin, result: &LookupResult) -> Result<(), StoreError> {
        let now = Utc::now();
        let fields = BinFields::from_result(result);
        let mut guard = self.inner.write().await;

        // Mirror the upsert on the unique `bin` column.
        let (id, created_at) = match guard.records.get(&bin) {
            Some(existing) => (existing.id, existing.created_at),
            None => (guard.allocate_id(), now),
        };

        guard
            .records
            .insert(bin, build_record(id, bin, fields, created_at, now));
        Ok(())
    }

    async fn update(&self, existing: &BinRecord, result: &LookupResult) -> Result<(), StoreError> {
        let fields = BinFields::merged(existing, result);
        let mut guard = self.inner.write().await;

        let record = guard
            .records
            .values_mut()
            .find(|r| r.id == existing.id)
            .ok_or(StoreError::NotFound { id: existing.id })?;

        apply(record, fields);
        record.updated_at = Utc::now();
        Ok(())
    }
}

fn build_record(
    id: i32,
    bin: Bin,
    fields: BinFields,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
) -> BinRecord {
    let mut record = BinRecord {
        id,
        bin: bin.as_i32(),
        brand: None,
        bank: None,
        card_type: None,
        level: None,
        isocountry: None,
        isoa2: None,
        isoa3: None,
        isonumber: None,
        www: None,
        phone: None,
        created_at,
        updated_at,
    };
    apply(&mut record, fields);
    record
}

fn apply(record: &mut BinRecord, fields: BinFields) {
    record.brand = fields.brand;
    record.bank = fields.bank;
    record.card_type = fields.card_type;
    record.level = fields.level;
    record.isocountry = fields.isocountry;
    record.isoa2 = fields.isoa2;
    record.isoa3 = fields.isoa3;
    record.isonumber = fields.isonumber;
}
