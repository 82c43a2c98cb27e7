//! # CityRoute Core
//!
//! In-memory graph of cities and pairwise distances that answers, for any two
//! cities, every simple path between them ranked by total distance.
//!
//! ## Components
//!
//! - **Edge source** ([`edge_source`]): authoritative distance records
//!   (in-memory or JSON file).
//! - **Graph cache** ([`graph::GraphCache`]): immutable adjacency snapshot,
//!   rebuilt wholesale after every mutation and swapped in atomically.
//! - **Path finder** ([`graph::find_all_paths`]): depth-first enumeration of all
//!   simple paths under a search budget.
//! - **Route service** ([`RouteService`]): validation plus the
//!   submit / query / clear entry points.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use cityroute_core::edge_source::InMemoryEdgeSource;
//! use cityroute_core::graph::{DistanceInput, SearchBudget};
//! use cityroute_core::{Error, RouteService};
//!
//! let service = RouteService::new(Arc::new(InMemoryEdgeSource::new()), SearchBudget::default());
//! service.submit_distances(&[
//!     DistanceInput::new("A", "B", 5),
//!     DistanceInput::new("B", "C", 10),
//!     DistanceInput::new("C", "D", 1),
//! ])?;
//!
//! let paths = service.query_paths("A", "D")?;
//! assert_eq!(paths[0].path, vec!["A", "B", "C", "D"]);
//! assert_eq!(paths[0].distance, 16);
//!
//! assert!(matches!(service.query_paths("ER", "DEST"), Err(Error::UnknownCity(_))));
//! # Ok::<(), cityroute_core::Error>(())
//! ```

#![warn(missing_docs)]
#![cfg_attr(
    test,
    allow(clippy::doc_markdown, clippy::uninlined_format_args, clippy::manual_assert)
)]

pub mod config;
pub mod edge_source;
pub mod error;
pub mod graph;
pub mod service;
#[cfg(test)]
mod service_tests;

pub use config::{
    ConfigError, LoggingConfig, RouteConfig, SearchConfig, ServerConfig, StorageConfig,
};
pub use edge_source::{EdgeSource, InMemoryEdgeSource, JsonFileEdgeSource};
pub use error::{Error, Result};
pub use graph::{
    CacheStatus, Distance, DistanceInput, GraphCache, GraphSnapshot, RoutePath, SearchBudget,
};
pub use service::{RouteService, SubmitOutcome};
