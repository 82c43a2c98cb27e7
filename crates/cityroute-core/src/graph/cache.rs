//! Process-wide graph cache and its reader-writer discipline.
//!
//! # Locking
//!
//! - `current` (`RwLock<Arc<GraphSnapshot>>`): readers take the shared lock
//!   only long enough to clone the `Arc`; a rebuild takes the exclusive lock
//!   only for the pointer swap.
//! - `writer` (`Mutex<u64>`, last issued generation): serializes rebuilds and
//!   mutations. Fetching edges and building the new snapshot happen under this
//!   mutex but outside `current`, so queries never wait on a slow edge source.
//!
//! Lock order: `writer` before `current`, `health` is always taken alone.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use serde::Serialize;

use crate::edge_source::EdgeSource;
use crate::error::{Error, Result};

use super::snapshot::GraphSnapshot;

#[derive(Debug, Default)]
struct RebuildHealth {
    rebuilds: u64,
    failed_rebuilds: u64,
    last_error: Option<String>,
}

/// Point-in-time view of the cache, for status endpoints and logs.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CacheStatus {
    /// Generation of the visible snapshot.
    pub generation: u64,
    /// Cities in the visible snapshot.
    pub node_count: usize,
    /// Undirected edges in the visible snapshot.
    pub edge_count: usize,
    /// Age of the visible snapshot in milliseconds.
    pub snapshot_age_ms: u64,
    /// Successful rebuilds since startup.
    pub rebuilds: u64,
    /// Failed rebuilds since startup.
    pub failed_rebuilds: u64,
    /// Error of the most recent rebuild, `None` once a rebuild succeeds.
    pub last_error: Option<String>,
}

impl CacheStatus {
    /// True when the last rebuild failed and the visible snapshot may lag the
    /// edge source.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.last_error.is_some()
    }
}

/// Holder of the single visible [`GraphSnapshot`].
///
/// # Example
///
/// ```rust
/// use cityroute_core::edge_source::{EdgeSource, InMemoryEdgeSource};
/// use cityroute_core::graph::GraphCache;
///
/// let source = InMemoryEdgeSource::new();
/// source.upsert_edge("A", "B", 5).unwrap();
///
/// let cache = GraphCache::load(&source);
/// let snapshot = cache.snapshot();
/// assert_eq!(snapshot.weight("B", "A"), Some(5));
/// ```
#[derive(Debug)]
pub struct GraphCache {
    current: RwLock<Arc<GraphSnapshot>>,
    writer: Mutex<u64>,
    health: Mutex<RebuildHealth>,
}

impl GraphCache {
    /// Creates a cache holding an empty generation-0 snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(GraphSnapshot::empty(0))),
            writer: Mutex::new(0),
            health: Mutex::new(RebuildHealth::default()),
        }
    }

    /// Creates a cache and builds its first snapshot from `source`.
    ///
    /// A failed initial build is recorded and the cache starts empty.
    #[must_use]
    pub fn load(source: &dyn EdgeSource) -> Self {
        let cache = Self::new();
        cache.refresh(source);
        cache
    }

    /// Returns a handle to the visible snapshot.
    ///
    /// The handle stays valid and unchanged for as long as the caller holds
    /// it, even if a rebuild swaps in a newer snapshot meanwhile.
    #[must_use]
    pub fn snapshot(&self) -> Arc<GraphSnapshot> {
        Arc::clone(&self.current.read())
    }

    /// Rebuilds the snapshot from the full edge list of `source`.
    ///
    /// On failure the previous snapshot stays visible and the error is
    /// recorded in [`status`](Self::status).
    ///
    /// # Errors
    ///
    /// Returns `Error::Rebuild` if the edge list cannot be fetched.
    pub fn rebuild(&self, source: &dyn EdgeSource) -> Result<Arc<GraphSnapshot>> {
        let mut generation = self.writer.lock();
        self.rebuild_locked(&mut generation, source)
    }

    /// Rebuilds, logging and recording a failure instead of returning it.
    ///
    /// Returns true if a new snapshot was swapped in.
    pub fn refresh(&self, source: &dyn EdgeSource) -> bool {
        self.rebuild(source).is_ok()
    }

    /// Applies `mutation` to `source`, then rebuilds.
    ///
    /// Mutations and rebuilds are serialized, so the snapshot swapped in here
    /// reflects at least this mutation. The rebuild runs even when the
    /// mutation fails, since it may have written part of its changes first.
    /// A rebuild failure does not fail the call; it is recorded instead.
    /// Returns the new snapshot, or `None` if the rebuild failed.
    ///
    /// # Errors
    ///
    /// Returns the mutation's own error, after the rebuild.
    pub fn mutate<F>(
        &self,
        source: &dyn EdgeSource,
        mutation: F,
    ) -> Result<Option<Arc<GraphSnapshot>>>
    where
        F: FnOnce(&dyn EdgeSource) -> Result<()>,
    {
        let mut generation = self.writer.lock();
        let applied = mutation(source);
        let rebuilt = self.rebuild_locked(&mut generation, source).ok();
        applied.map(|()| rebuilt)
    }

    /// Deletes every edge from `source` and swaps in an empty snapshot.
    ///
    /// # Errors
    ///
    /// Returns the edge source error; the cache is left untouched.
    pub fn clear(&self, source: &dyn EdgeSource) -> Result<()> {
        let mut generation = self.writer.lock();
        source.delete_all_edges()?;

        *generation += 1;
        let empty = Arc::new(GraphSnapshot::empty(*generation));
        *self.current.write() = empty;
        self.record_success();

        tracing::info!(generation = *generation, "Graph cache cleared");
        Ok(())
    }

    /// Returns the current cache status.
    #[must_use]
    pub fn status(&self) -> CacheStatus {
        let snapshot = self.snapshot();
        let health = self.health.lock();
        CacheStatus {
            generation: snapshot.generation(),
            node_count: snapshot.node_count(),
            edge_count: snapshot.edge_count(),
            snapshot_age_ms: millis(snapshot.built_at().elapsed()),
            rebuilds: health.rebuilds,
            failed_rebuilds: health.failed_rebuilds,
            last_error: health.last_error.clone(),
        }
    }

    fn rebuild_locked(
        &self,
        generation: &mut u64,
        source: &dyn EdgeSource,
    ) -> Result<Arc<GraphSnapshot>> {
        let started = Instant::now();

        let edges = match source.list_all_edges() {
            Ok(edges) => edges,
            Err(e) => {
                let err = Error::Rebuild(e.to_string());
                self.record_failure(&err);
                tracing::error!(
                    error = %e,
                    generation = *generation,
                    "Graph cache rebuild failed; serving the previous snapshot, which may be stale"
                );
                return Err(err);
            }
        };

        let next = *generation + 1;
        let snapshot = Arc::new(GraphSnapshot::build(&edges, next));
        let build_time = started.elapsed();

        *self.current.write() = Arc::clone(&snapshot);
        *generation = next;
        self.record_success();

        tracing::info!(
            generation = next,
            nodes = snapshot.node_count(),
            edges = snapshot.edge_count(),
            build_ms = millis(build_time),
            "Graph cache rebuilt"
        );
        Ok(snapshot)
    }

    fn record_success(&self) {
        let mut health = self.health.lock();
        health.rebuilds += 1;
        health.last_error = None;
    }

    fn record_failure(&self, err: &Error) {
        let mut health = self.health.lock();
        health.failed_rebuilds += 1;
        health.last_error = Some(err.to_string());
    }
}

impl Default for GraphCache {
    fn default() -> Self {
        Self::new()
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
