//! City distance graph: snapshot, cache and path enumeration.
//!
//! # Example
//!
//! ```rust
//! use cityroute_core::edge_source::{EdgeSource, InMemoryEdgeSource};
//! use cityroute_core::graph::{find_all_paths, GraphCache, SearchBudget};
//!
//! let source = InMemoryEdgeSource::new();
//! source.upsert_edge("A", "B", 5).unwrap();
//! source.upsert_edge("B", "C", 10).unwrap();
//! source.upsert_edge("C", "D", 1).unwrap();
//!
//! let cache = GraphCache::load(&source);
//! let paths = find_all_paths(&cache.snapshot(), "A", "D", &SearchBudget::default()).unwrap();
//! assert_eq!(paths.len(), 1);
//! assert_eq!(paths[0].distance, 16);
//! ```

mod cache;
pub mod path_finder;
mod snapshot;
mod types;

#[cfg(test)]
mod types_tests;

pub use cache::{CacheStatus, GraphCache};
pub use path_finder::{
    find_all_paths, find_all_paths_with_stats, LimitType, SearchBudget, SearchStats,
};
pub use snapshot::GraphSnapshot;
pub use types::{
    validate_city_name, CityNode, Distance, DistanceInput, NodeId, RoutePath, MAX_DISTANCE,
};
