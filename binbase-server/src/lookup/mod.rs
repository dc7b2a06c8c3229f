//! BIN lookup policy.
//!
//! Decides when a cached record can be served as is, when it must be
//! refreshed from the provider, and what to return when the provider is
//! unavailable.

mod freshness;
mod service;

use async_trait::async_trait;

use crate::domain::{Bin, LookupResult};

pub use freshness::{MIGRATION_MARKER, is_stale};
pub use service::LookupService;

/// Source of fresh BIN data.
///
/// Implementations report every failure (transport, bad status, unknown BIN)
/// as `None`; callers cannot and must not tell these apart.
#[async_trait]
pub trait RemoteLookup: Send + Sync {
    /// Fetch data for an already-validated BIN.
    async fn fetch_remote(&self, bin: Bin) -> Option<LookupResult>;
}
