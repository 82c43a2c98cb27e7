//! Route service: the entry points a request layer calls.
//!
//! Validates boundary input, writes through to the edge source, keeps the
//! graph cache in step with it and runs path queries against the current
//! snapshot.

use std::sync::Arc;

use serde::Serialize;

use crate::config::RouteConfig;
use crate::edge_source::{
    EdgeRecords, EdgeSource, InMemoryEdgeSource, JsonFileEdgeSource,
};
use crate::error::Result;
use crate::graph::{
    find_all_paths, validate_city_name, CacheStatus, Distance, DistanceInput, GraphCache,
    RoutePath, SearchBudget,
};

/// Summary of one `submit_distances` call.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Records inserted for pairs not stored in either orientation.
    pub created: usize,
    /// Records whose distance was overwritten.
    pub updated: usize,
    /// Generation of the rebuilt snapshot, `None` if the rebuild failed.
    pub generation: Option<u64>,
}

/// City route service over an edge source and its graph cache.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use cityroute_core::edge_source::InMemoryEdgeSource;
/// use cityroute_core::graph::{DistanceInput, SearchBudget};
/// use cityroute_core::RouteService;
///
/// let service = RouteService::new(Arc::new(InMemoryEdgeSource::new()), SearchBudget::default());
/// service
///     .submit_distances(&[DistanceInput::new("A", "B", 5), DistanceInput::new("B", "C", 10)])
///     .unwrap();
///
/// let paths = service.query_paths("A", "C").unwrap();
/// assert_eq!(paths[0].path, vec!["A", "B", "C"]);
/// ```
pub struct RouteService {
    source: Arc<dyn EdgeSource>,
    cache: GraphCache,
    budget: SearchBudget,
}

impl std::fmt::Debug for RouteService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteService")
            .field("cache", &self.cache)
            .field("budget", &self.budget)
            .finish_non_exhaustive()
    }
}

impl RouteService {
    /// Creates the service and builds the initial snapshot from `source`.
    #[must_use]
    pub fn new(source: Arc<dyn EdgeSource>, budget: SearchBudget) -> Self {
        let cache = GraphCache::load(source.as_ref());
        Self {
            source,
            cache,
            budget,
        }
    }

    /// Creates the service with the edge source and budget named in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured data file cannot be opened.
    pub fn from_config(config: &RouteConfig) -> Result<Self> {
        let source: Arc<dyn EdgeSource> = match &config.storage.data_file {
            Some(path) => Arc::new(JsonFileEdgeSource::open(path)?),
            None => {
                tracing::warn!("No storage.data_file configured; distances are kept in memory only");
                Arc::new(InMemoryEdgeSource::new())
            }
        };
        Ok(Self::new(source, config.search_budget()))
    }

    /// Stores the given distances and rebuilds the graph cache.
    ///
    /// The whole batch is validated before anything is written. Each pair is
    /// looked up in both orientations, earlier entries of the same batch
    /// included: an existing record is updated in the orientation it was
    /// stored in, otherwise a new record is inserted. The resolved records go
    /// to the edge source as one batch.
    ///
    /// A failed rebuild is recorded in the cache status and logged; the call
    /// still succeeds because the edge source already holds the new data.
    ///
    /// # Errors
    ///
    /// Returns a validation error for invalid input, or the edge source error.
    /// The cache is rebuilt before a write error is returned, so records the
    /// source did store become visible.
    pub fn submit_distances(&self, inputs: &[DistanceInput]) -> Result<SubmitOutcome> {
        let distances = inputs
            .iter()
            .map(DistanceInput::validate)
            .collect::<Result<Vec<Distance>>>()?;

        let mut outcome = SubmitOutcome::default();
        let rebuilt = self.cache.mutate(self.source.as_ref(), |source| {
            let mut batch = EdgeRecords::default();
            for d in &distances {
                let (a, b) = (d.first_city(), d.second_city());
                let stored = |x: &str, y: &str| -> Result<bool> {
                    Ok(batch.get(x, y).is_some() || source.find_edge(x, y)?.is_some())
                };
                let (first, second) = if stored(a, b)? {
                    outcome.updated += 1;
                    (a, b)
                } else if stored(b, a)? {
                    outcome.updated += 1;
                    (b, a)
                } else {
                    outcome.created += 1;
                    (a, b)
                };
                batch.upsert(&Distance::new(first, second, d.distance())?);
            }
            source.upsert_edges(&batch.to_distances()?)
        })?;
        outcome.generation = rebuilt.map(|snapshot| snapshot.generation());

        tracing::debug!(
            created = outcome.created,
            updated = outcome.updated,
            generation = ?outcome.generation,
            "Distances submitted"
        );
        Ok(outcome)
    }

    /// Returns every simple path from `start` to `destination`, shortest first.
    ///
    /// Runs against the snapshot visible when the call starts.
    ///
    /// # Errors
    ///
    /// `Error::InvalidCityName`, `Error::UnknownCity`, `Error::NoPath` or
    /// `Error::SearchBudgetExceeded`.
    pub fn query_paths(&self, start: &str, destination: &str) -> Result<Vec<RoutePath>> {
        validate_city_name(start)?;
        validate_city_name(destination)?;

        let snapshot = self.cache.snapshot();
        find_all_paths(&snapshot, start, destination, &self.budget)
    }

    /// Deletes every distance and resets the cache to an empty snapshot.
    ///
    /// # Errors
    ///
    /// Returns the edge source error; the cache is left as it was.
    pub fn clear_all(&self) -> Result<()> {
        self.cache.clear(self.source.as_ref())
    }

    /// Rebuilds the cache from the edge source on demand.
    ///
    /// # Errors
    ///
    /// Returns `Error::Rebuild` if the edge list cannot be fetched.
    pub fn refresh(&self) -> Result<CacheStatus> {
        self.cache.rebuild(self.source.as_ref())?;
        Ok(self.cache.status())
    }

    /// Returns the graph cache status.
    #[must_use]
    pub fn cache_status(&self) -> CacheStatus {
        self.cache.status()
    }

    /// Returns the graph cache.
    #[must_use]
    pub fn cache(&self) -> &GraphCache {
        &self.cache
    }

    /// Returns the search budget applied to queries.
    #[must_use]
    pub fn budget(&self) -> &SearchBudget {
        &self.budget
    }
}
