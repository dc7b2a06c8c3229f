//! Cache-then-provider lookup.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::{Bin, LookupResult};
use crate::store::{BinStore, StoreError};

use super::RemoteLookup;
use super::freshness::is_stale;

/// Answers BIN lookups from the store, refreshing from the provider on a
/// miss or when the cached record is stale.
///
/// Provider failures never become errors: a failed refresh serves the cached
/// record, a failed first lookup returns `None`. Store errors propagate.
#[derive(Clone)]
pub struct LookupService {
    store: Arc<dyn BinStore>,
    remote: Arc<dyn RemoteLookup>,
}

impl LookupService {
    /// Create a service over the given store and provider.
    pub fn new(store: Arc<dyn BinStore>, remote: Arc<dyn RemoteLookup>) -> Self {
        Self { store, remote }
    }

    /// Look up a BIN as of the current time.
    pub async fn lookup(&self, bin: Bin) -> Result<Option<LookupResult>, StoreError> {
        self.lookup_at(bin, Utc::now()).await
    }

    /// Look up a BIN, judging staleness against `now`.
    pub async fn lookup_at(
        &self,
        bin: Bin,
        now: DateTime<Utc>,
    ) -> Result<Option<LookupResult>, StoreError> {
        let Some(record) = self.store.read(bin).await? else {
            debug!(%bin, "cache miss");
            return match self.remote.fetch_remote(bin).await {
                Some(result) => {
                    self.store.create(bin, &result).await?;
                    info!(%bin, "cached new BIN record");
                    Ok(Some(result))
                }
                None => Ok(None),
            };
        };

        if !is_stale(record.updated_at, now) {
            debug!(%bin, "cache hit");
            return Ok(Some(record.to_lookup_result()));
        }

        debug!(%bin, updated_at = %record.updated_at, "cached record is stale");
        match self.remote.fetch_remote(bin).await {
            Some(result) => {
                self.store.update(&record, &result).await?;
                info!(%bin, "refreshed BIN record");
                Ok(Some(result))
            }
            None => {
                info!(%bin, "refresh failed, serving stale record");
                Ok(Some(record.to_lookup_result()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};

    use crate::domain::Country;
    use crate::store::{BinFields, BinRecord, MemoryBinStore};

    /// Provider stub returning a fixed answer and counting calls.
    struct StubRemote {
        answer: Option<LookupResult>,
        calls: AtomicUsize,
    }

    impl StubRemote {
        fn new(answer: Option<LookupResult>) -> Arc<Self> {
            Arc::new(Self {
                answer,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RemoteLookup for StubRemote {
        async fn fetch_remote(&self, _bin: Bin) -> Option<LookupResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer.clone()
        }
    }

    /// Store whose every operation fails.
    struct BrokenStore;

    #[async_trait]
    impl BinStore for BrokenStore {
        async fn read(&self, _bin: Bin) -> Result<Option<BinRecord>, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn create(&self, _bin: Bin, _result: &LookupResult) -> Result<(), StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn update(
            &self,
            _existing: &BinRecord,
            _result: &LookupResult,
        ) -> Result<(), StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }
    }

    fn bin() -> Bin {
        Bin::parse("411111").unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn cached() -> LookupResult {
        LookupResult {
            scheme: Some("VISA".into()),
            card_type: Some("CREDIT".into()),
            issuer: Some("CACHED BANK".into()),
            tier: Some("CLASSIC".into()),
            country: Some(Country {
                iso_a2: Some("US".into()),
                iso_a3: Some("USA".into()),
                iso_country: Some("United States of America".into()),
                iso_number: Some(840),
            }),
            luhn: Some(true),
        }
    }

    fn fresh() -> LookupResult {
        LookupResult {
            scheme: Some("VISA".into()),
            card_type: Some("CREDIT".into()),
            issuer: Some("FRESH BANK".into()),
            tier: Some("PLATINUM".into()),
            country: Some(Country {
                iso_a2: Some("US".into()),
                iso_a3: None,
                iso_country: None,
                iso_number: Some(840),
            }),
            luhn: Some(false),
        }
    }

    fn service(store: &MemoryBinStore, remote: &Arc<StubRemote>) -> LookupService {
        LookupService::new(Arc::new(store.clone()), remote.clone())
    }

    #[tokio::test]
    async fn miss_with_remote_result_creates_one_record() {
        let store = MemoryBinStore::new();
        let remote = StubRemote::new(Some(fresh()));

        let result = service(&store, &remote).lookup_at(bin(), now()).await.unwrap();

        assert_eq!(result, Some(fresh()));
        assert_eq!(remote.calls(), 1);
        assert_eq!(store.len().await, 1);
        let record = store.get(bin()).await.unwrap();
        assert_eq!(record.fields(), BinFields::from_result(&fresh()));
    }

    #[tokio::test]
    async fn miss_without_remote_result_is_none() {
        let store = MemoryBinStore::new();
        let remote = StubRemote::new(None);

        let result = service(&store, &remote).lookup_at(bin(), now()).await.unwrap();

        assert_eq!(result, None);
        assert_eq!(remote.calls(), 1);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn fresh_record_served_without_remote_call() {
        let store = MemoryBinStore::new();
        store
            .seed(bin(), BinFields::from_result(&cached()), now() - Duration::days(1))
            .await;
        let remote = StubRemote::new(Some(fresh()));

        let result = service(&store, &remote).lookup_at(bin(), now()).await.unwrap();

        assert_eq!(result, Some(cached()));
        assert_eq!(remote.calls(), 0);
    }

    #[tokio::test]
    async fn stale_record_is_refreshed_with_merge() {
        let store = MemoryBinStore::new();
        let seeded = store
            .seed(bin(), BinFields::from_result(&cached()), now() - Duration::days(45))
            .await;
        let remote = StubRemote::new(Some(fresh()));

        let result = service(&store, &remote).lookup_at(bin(), now()).await.unwrap();

        assert_eq!(result, Some(fresh()));
        assert_eq!(remote.calls(), 1);

        let record = store.get(bin()).await.unwrap();
        assert_eq!(record.id, seeded.id);
        assert_eq!(record.bank.as_deref(), Some("FRESH BANK"));
        assert_eq!(record.level.as_deref(), Some("PLATINUM"));
        // Absent in the refresh, kept from the cache.
        assert_eq!(record.isoa3.as_deref(), Some("USA"));
        assert_eq!(record.isocountry.as_deref(), Some("United States of America"));
        assert!(record.updated_at > seeded.updated_at);
    }

    #[tokio::test]
    async fn failed_refresh_serves_stale_record() {
        let store = MemoryBinStore::new();
        let seeded = store
            .seed(bin(), BinFields::from_result(&cached()), now() - Duration::days(45))
            .await;
        let remote = StubRemote::new(None);

        let result = service(&store, &remote).lookup_at(bin(), now()).await.unwrap();

        assert_eq!(result, Some(cached()));
        assert_eq!(remote.calls(), 1);
        assert_eq!(store.get(bin()).await.unwrap(), seeded);
    }

    #[tokio::test]
    async fn migration_marker_forces_refresh() {
        let store = MemoryBinStore::new();
        let marker = Utc.with_ymd_and_hms(2024, 11, 27, 0, 0, 0).unwrap();
        store
            .seed(bin(), BinFields::from_result(&cached()), marker)
            .await;
        let remote = StubRemote::new(Some(fresh()));

        let next_day = marker + Duration::days(1);
        let result = service(&store, &remote).lookup_at(bin(), next_day).await.unwrap();

        assert_eq!(result, Some(fresh()));
        assert_eq!(remote.calls(), 1);
    }

    #[tokio::test]
    async fn store_errors_propagate() {
        let remote = StubRemote::new(Some(fresh()));
        let service = LookupService::new(Arc::new(BrokenStore), remote.clone());

        let err = service.lookup_at(bin(), now()).await.unwrap_err();

        assert!(matches!(err, StoreError::Database(_)));
        assert_eq!(remote.calls(), 0);
    }

    #[tokio::test]
    async fn second_lookup_hits_cache() {
        let store = MemoryBinStore::new();
        let remote = StubRemote::new(Some(fresh()));
        let service = service(&store, &remote);

        service.lookup(bin()).await.unwrap();
        let second = service.lookup(bin()).await.unwrap().unwrap();

        assert_eq!(remote.calls(), 1);
        assert_eq!(second.issuer.as_deref(), Some("FRESH BANK"));
        assert_eq!(second.luhn, Some(true));
    }
}
