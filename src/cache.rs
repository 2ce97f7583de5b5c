//! Single-flight metadata cache
//!
//! Memoizes provider responses keyed by package name. When multiple resolver
//! tasks request the same uncached name concurrently, only one provider query
//! executes; the other tasks subscribe to its outcome and share the result.
//! Successful records are kept for the lifetime of the resolution run, so the
//! provider is queried at most once per package name.

use crate::domain::PackageRecord;
use crate::error::ProviderError;
use crate::provider::MetadataProvider;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

/// Outcome of one in-flight provider query, shared with coalesced waiters
#[derive(Clone)]
enum FetchOutcome {
    Found(Arc<PackageRecord>),
    Failed(ProviderError),
}

/// Per-run metadata cache with in-flight query deduplication
pub struct MetadataCache {
    /// Completed successful queries
    records: DashMap<String, Arc<PackageRecord>>,
    /// In-flight queries (package name -> broadcast sender)
    inflight: DashMap<String, broadcast::Sender<FetchOutcome>>,
}

impl MetadataCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            inflight: DashMap::new(),
        }
    }

    /// Returns the cached record for a package, if one exists
    pub fn get(&self, name: &str) -> Option<Arc<PackageRecord>> {
        self.records.get(name).map(|entry| Arc::clone(&entry))
    }

    /// Inserts a record directly, bypassing the provider
    pub fn insert(&self, record: PackageRecord) {
        self.records.insert(record.name.clone(), Arc::new(record));
    }

    /// Number of cached records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records are cached
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the cached record, waiting for an in-flight query if one
    /// exists; never initiates a new query
    ///
    /// `None` means the package has not been queried (or its query failed).
    pub async fn get_or_wait(&self, name: &str) -> Option<Arc<PackageRecord>> {
        loop {
            if let Some(record) = self.get(name) {
                return Some(record);
            }

            let mut rx = match self.inflight.get(name) {
                Some(sender) => {
                    let rx = sender.subscribe();
                    drop(sender);
                    rx
                }
                None => return None,
            };

            match rx.recv().await {
                Ok(FetchOutcome::Found(record)) => return Some(record),
                Ok(FetchOutcome::Failed(_)) => return None,
                Err(_) => continue,
            }
        }
    }

    /// Returns the cached record, querying the provider on a miss
    ///
    /// Concurrent calls for the same uncached name coalesce onto a single
    /// provider query; every caller observes that query's outcome. Failures
    /// are shared with coalesced waiters but not memoized, so a later call
    /// for the same name would query again.
    pub async fn get_or_fetch(
        &self,
        name: &str,
        provider: &dyn MetadataProvider,
    ) -> Result<Arc<PackageRecord>, ProviderError> {
        loop {
            if let Some(record) = self.get(name) {
                return Ok(record);
            }

            if let Some(sender) = self.inflight.get(name) {
                let mut rx = sender.subscribe();
                drop(sender); // release the shard lock before awaiting

                debug!(package = name, "coalescing metadata query");
                match rx.recv().await {
                    Ok(FetchOutcome::Found(record)) => return Ok(record),
                    Ok(FetchOutcome::Failed(err)) => return Err(err),
                    // Sender dropped without a result (fetching task was
                    // aborted) - retry from the top.
                    Err(_) => continue,
                }
            }

            let (tx, _rx) = broadcast::channel::<FetchOutcome>(1);
            match self.inflight.entry(name.to_string()) {
                // Another task registered between our check and this insert;
                // loop around and subscribe to it instead.
                Entry::Occupied(_) => continue,
                Entry::Vacant(vacant) => {
                    vacant.insert(tx.clone());
                }
            }

            // A query that completed between the record check and our
            // registration is visible in `records` by now.
            if let Some(record) = self.get(name) {
                self.inflight.remove(name);
                let _ = tx.send(FetchOutcome::Found(Arc::clone(&record)));
                return Ok(record);
            }

            let outcome = match provider.fetch(name).await {
                Ok(record) => {
                    let record = Arc::new(record);
                    self.records.insert(name.to_string(), Arc::clone(&record));
                    FetchOutcome::Found(record)
                }
                Err(err) => FetchOutcome::Failed(err),
            };

            self.inflight.remove(name);
            let _ = tx.send(outcome.clone());

            return match outcome {
                FetchOutcome::Found(record) => Ok(record),
                FetchOutcome::Failed(err) => Err(err),
            };
        }
    }
}

impl Default for MetadataCache {
    fn default() -> Self {
        Self::new()
    }
}
