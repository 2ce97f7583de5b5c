//! Dependency resolver core
//!
//! This module provides:
//! - Bounded-concurrency expansion of top-level requirements
//! - Depth-bounded, cycle-safe recursive dependency walks
//! - Single-flight metadata queries through the per-run cache
//! - Per-package failure collection with partial continuation

use crate::cache::MetadataCache;
use crate::domain::{
    identity_of, DependencyTree, NodeInfo, Requirements, ResolutionFailure, ResolutionReport,
    ResolvedNode,
};
use crate::provider::MetadataProvider;
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

/// Default maximum expansion depth (edges traversed from a requirement)
pub const DEFAULT_MAX_DEPTH: u32 = 5;

/// Default number of concurrent top-level expansion workers
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Resolver configuration
#[derive(Debug, Clone, Copy)]
pub struct ResolverConfig {
    /// Maximum number of dependency edges to traverse from a requirement
    pub max_depth: u32,
    /// Size of the worker pool for top-level expansions
    pub concurrency: usize,
}

impl ResolverConfig {
    /// Creates a configuration, clamping concurrency to at least one worker
    pub fn new(max_depth: u32, concurrency: usize) -> Self {
        Self {
            max_depth,
            concurrency: concurrency.max(1),
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// Resolves declared requirements into a transitive dependency tree
pub struct Resolver {
    provider: Arc<dyn MetadataProvider>,
    config: ResolverConfig,
}

/// Shared state for one resolution run
///
/// The visited set, tree and failure list are mutated by concurrent workers
/// and are guarded by mutexes; locks are never held across an await point.
struct ResolveRun {
    provider: Arc<dyn MetadataProvider>,
    cache: MetadataCache,
    visited: Mutex<HashSet<String>>,
    tree: Mutex<DependencyTree>,
    failures: Mutex<Vec<ResolutionFailure>>,
}

impl Resolver {
    /// Creates a resolver with default depth and concurrency
    pub fn new(provider: Arc<dyn MetadataProvider>) -> Self {
        Self::with_config(provider, ResolverConfig::default())
    }

    /// Creates a resolver with a custom configuration
    pub fn with_config(provider: Arc<dyn MetadataProvider>, config: ResolverConfig) -> Self {
        Self { provider, config }
    }

    /// Resolves the given requirements into a dependency tree
    ///
    /// Each top-level requirement is expanded on a bounded worker pool; a
    /// worker slot is acquired before a task is spawned, so scheduling blocks
    /// when the pool is full instead of queueing live work. The run completes
    /// only after every spawned expansion has finished.
    ///
    /// Per-package query failures never abort the run: the affected package
    /// is omitted from the tree and reported in the failure list.
    pub async fn resolve(&self, requirements: &Requirements) -> ResolutionReport {
        let run = Arc::new(ResolveRun {
            provider: Arc::clone(&self.provider),
            cache: MetadataCache::new(),
            visited: Mutex::new(HashSet::new()),
            tree: Mutex::new(DependencyTree::new()),
            failures: Mutex::new(Vec::new()),
        });

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));
        let mut handles = Vec::with_capacity(requirements.len());

        for name in requirements.keys() {
            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .expect("resolver semaphore closed");

            let run = Arc::clone(&run);
            let name = name.clone();
            let depth = self.config.max_depth;
            handles.push(tokio::spawn(async move {
                let _permit = permit;
                run.expand(&name, depth).await;
            }));
        }

        for handle in handles {
            let _ = handle.await;
        }

        let report = ResolutionReport {
            tree: std::mem::take(&mut *run.tree.lock().unwrap()),
            failures: std::mem::take(&mut *run.failures.lock().unwrap()),
        };
        report
    }
}

impl ResolveRun {
    /// Expands one package: query its metadata, recurse into dependencies,
    /// record its node
    ///
    /// No-op when no depth remains or the package was already visited. The
    /// visited insertion happens before any recursion, so a cyclic
    /// declaration graph terminates with each name expanded at most once.
    fn expand<'a>(&'a self, name: &'a str, depth: u32) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            if depth == 0 {
                return;
            }
            {
                let mut visited = self.visited.lock().unwrap();
                if !visited.insert(name.to_string()) {
                    return;
                }
            }

            debug!(package = name, depth, "expanding");
            let record = match self.cache.get_or_fetch(name, self.provider.as_ref()).await {
                Ok(record) => record,
                Err(err) => {
                    warn!(package = name, error = %err, "metadata query failed");
                    self.failures.lock().unwrap().push(ResolutionFailure {
                        package: name.to_string(),
                        error: err.to_string(),
                    });
                    return;
                }
            };

            for (dep_name, _) in &record.dependencies {
                self.expand(dep_name, depth - 1).await;
            }

            // A dependency is referenced by its own record's identity when
            // one was resolved (by this walk or a previous path), falling
            // back to the declared version, then to the bare name. A query
            // still in flight on a sibling worker is awaited rather than
            // raced.
            let mut dependencies = Vec::with_capacity(record.dependencies.len());
            for (dep_name, declared) in &record.dependencies {
                let reference = match self.cache.get_or_wait(dep_name).await {
                    Some(dep_record) => dep_record.identity(),
                    None => identity_of(dep_name, declared.as_deref()),
                };
                dependencies.push(reference);
            }

            let node = ResolvedNode {
                dependencies,
                info: NodeInfo::from_record(&record),
            };
            self.tree.lock().unwrap().insert(record.identity(), node);
        })
    }
}
