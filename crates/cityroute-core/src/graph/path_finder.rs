//! Exhaustive simple-path enumeration over a [`GraphSnapshot`].
//!
//! Depth-first backtracking: the current path lives in one owned buffer that
//! is pushed when a city is entered and popped when its neighbors are
//! exhausted, and an on-path bitmap indexed by [`NodeId`] enforces that no
//! city repeats. The walk keeps its own frame stack instead of recursing.
//!
//! The number of simple paths grows exponentially with graph density, so
//! every search runs under a [`SearchBudget`] and reports exhaustion as an
//! error.

use std::time::{Duration, Instant};

use crate::error::{Error, Result};

use super::snapshot::GraphSnapshot;
use super::types::{NodeId, RoutePath};

/// Expansions between two wall-clock checks.
const TIMEOUT_CHECK_INTERVAL: u64 = 1024;

/// Kinds of search budget that can be exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimitType {
    /// Elapsed time budget exceeded.
    Timeout,
    /// Maximum number of result paths exceeded.
    Cardinality,
}

impl LimitType {
    /// Returns the string representation for logs and error messages.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Cardinality => "cardinality",
        }
    }
}

/// Resource limits for a single path query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBudget {
    /// Maximum number of paths a query may collect.
    pub max_paths: Option<usize>,
    /// Maximum wall-clock time a query may run.
    pub timeout: Option<Duration>,
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self {
            max_paths: Some(100_000),
            timeout: Some(Duration::from_secs(5)),
        }
    }
}

impl SearchBudget {
    /// Creates a budget with the given limits.
    #[must_use]
    pub fn new(max_paths: Option<usize>, timeout: Option<Duration>) -> Self {
        Self { max_paths, timeout }
    }

    /// A budget that never runs out.
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            max_paths: None,
            timeout: None,
        }
    }
}

/// Counters collected by one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Paths recorded at the destination.
    pub paths_found: usize,
    /// Cities entered during the walk, the start included.
    pub nodes_expanded: u64,
    /// Wall-clock duration of the search.
    pub elapsed: Duration,
}

/// Finds every simple path between two cities, ranked by total distance.
///
/// Ties keep discovery order: depth-first, neighbors in adjacency order.
///
/// # Errors
///
/// - `Error::UnknownCity` if `start` (checked first) or `destination` is absent.
/// - `Error::NoPath` if no simple path connects them.
/// - `Error::SearchBudgetExceeded` if the search runs past `budget`.
///
/// # Example
///
/// ```rust
/// use cityroute_core::graph::{find_all_paths, Distance, GraphSnapshot, SearchBudget};
///
/// let edges = vec![
///     Distance::new("A", "B", 5).unwrap(),
///     Distance::new("B", "C", 10).unwrap(),
/// ];
/// let snapshot = GraphSnapshot::build(&edges, 1);
/// let paths = find_all_paths(&snapshot, "A", "C", &SearchBudget::unlimited()).unwrap();
/// assert_eq!(paths[0].path, vec!["A", "B", "C"]);
/// assert_eq!(paths[0].distance, 15);
/// ```
pub fn find_all_paths(
    snapshot: &GraphSnapshot,
    start: &str,
    destination: &str,
    budget: &SearchBudget,
) -> Result<Vec<RoutePath>> {
    find_all_paths_with_stats(snapshot, start, destination, budget).map(|(paths, _)| paths)
}

/// Same as [`find_all_paths`], also returning the search counters.
pub fn find_all_paths_with_stats(
    snapshot: &GraphSnapshot,
    start: &str,
    destination: &str,
    budget: &SearchBudget,
) -> Result<(Vec<RoutePath>, SearchStats)> {
    let start_id = snapshot
        .resolve(start)
        .ok_or_else(|| Error::UnknownCity(start.to_string()))?;
    let destination_id = snapshot
        .resolve(destination)
        .ok_or_else(|| Error::UnknownCity(destination.to_string()))?;

    let mut search = PathSearch::new(snapshot, destination_id, budget);
    let outcome = search.run(start_id);
    let stats = SearchStats {
        paths_found: search.found.len(),
        nodes_expanded: search.nodes_expanded,
        elapsed: search.started.elapsed(),
    };

    if let Err(limit) = outcome {
        tracing::warn!(
            start,
            destination,
            limit = limit.as_str(),
            paths_found = stats.paths_found,
            nodes_expanded = stats.nodes_expanded,
            "Path search budget exceeded"
        );
        return Err(Error::SearchBudgetExceeded {
            limit,
            start: start.to_string(),
            destination: destination.to_string(),
        });
    }

    tracing::debug!(
        start,
        destination,
        generation = snapshot.generation(),
        paths_found = stats.paths_found,
        nodes_expanded = stats.nodes_expanded,
        elapsed_us = u64::try_from(stats.elapsed.as_micros()).unwrap_or(u64::MAX),
        "Path search completed"
    );

    let mut paths = search.found;
    if paths.is_empty() {
        return Err(Error::NoPath {
            start: start.to_string(),
            destination: destination.to_string(),
        });
    }

    // Stable: equal distances keep their discovery order.
    paths.sort_by_key(|p| p.distance);
    Ok((paths, stats))
}

/// One city on the current path and how far its neighbor scan has got.
struct Frame {
    node: NodeId,
    next_neighbor: usize,
    distance: u64,
}

struct PathSearch<'a> {
    snapshot: &'a GraphSnapshot,
    destination: NodeId,
    budget: &'a SearchBudget,
    path: Vec<NodeId>,
    on_path: Vec<bool>,
    found: Vec<RoutePath>,
    nodes_expanded: u64,
    started: Instant,
}

impl<'a> PathSearch<'a> {
    fn new(snapshot: &'a GraphSnapshot, destination: NodeId, budget: &'a SearchBudget) -> Self {
        let n = snapshot.node_count();
        Self {
            snapshot,
            destination,
            budget,
            path: Vec::with_capacity(n),
            on_path: vec![false; n],
            found: Vec::new(),
            nodes_expanded: 0,
            started: Instant::now(),
        }
    }

    /// Depth-first walk driven by an explicit frame stack, so path length is
    /// bounded by the heap rather than the thread stack.
    fn run(&mut self, start: NodeId) -> std::result::Result<(), LimitType> {
        let snapshot = self.snapshot;
        let mut frames = Vec::with_capacity(snapshot.node_count());

        self.enter(start, 0)?;
        frames.push(Frame {
            node: start,
            next_neighbor: 0,
            distance: 0,
        });

        while let Some(frame) = frames.last_mut() {
            let next = snapshot
                .node(frame.node)
                .and_then(|node| node.neighbor_at(frame.next_neighbor));

            let Some((neighbor, weight)) = next else {
                frames.pop();
                self.leave();
                continue;
            };
            frame.next_neighbor += 1;
            if self.on_path[neighbor.index()] {
                continue;
            }

            // Cannot overflow: weights are capped at MAX_DISTANCE.
            let distance = frame.distance + weight;
            self.enter(neighbor, distance)?;
            frames.push(Frame {
                node: neighbor,
                next_neighbor: 0,
                distance,
            });
        }

        Ok(())
    }

    /// Puts `node` on the current path and records it if it is the destination.
    ///
    /// The walk keeps going past the destination: it is on the path now and
    /// can never be recorded twice, so the continuation only costs time.
    fn enter(&mut self, node: NodeId, distance: u64) -> std::result::Result<(), LimitType> {
        self.nodes_expanded += 1;
        self.check_timeout()?;

        self.path.push(node);
        self.on_path[node.index()] = true;

        if node == self.destination {
            self.record(distance)?;
        }
        Ok(())
    }

    fn leave(&mut self) {
        if let Some(node) = self.path.pop() {
            self.on_path[node.index()] = false;
        }
    }

    fn record(&mut self, distance: u64) -> std::result::Result<(), LimitType> {
        if let Some(max) = self.budget.max_paths {
            if self.found.len() >= max {
                return Err(LimitType::Cardinality);
            }
        }

        let path = self
            .path
            .iter()
            .filter_map(|&id| self.snapshot.node(id))
            .map(|node| node.name().to_string())
            .collect();
        self.found.push(RoutePath { path, distance });
        Ok(())
    }

    fn check_timeout(&self) -> std::result::Result<(), LimitType> {
        if let Some(timeout) = self.budget.timeout {
            if self.nodes_expanded % TIMEOUT_CHECK_INTERVAL == 0 && self.started.elapsed() > timeout
            {
                return Err(LimitType::Timeout);
            }
        }
        Ok(())
    }
}
