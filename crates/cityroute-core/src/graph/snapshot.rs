//! Immutable adjacency snapshot built from the full edge list.
//!
//! A snapshot is built in one pass and never mutated afterwards; the cache
//! replaces it wholesale on every mutation of the edge source.

use std::time::Instant;

use rustc_hash::FxHashMap;

use super::types::{CityNode, Distance, NodeId};

/// Arena of cities with symmetric weighted adjacency.
///
/// Provides O(1) name resolution and O(degree) neighbor iteration.
#[derive(Debug)]
pub struct GraphSnapshot {
    /// All cities, addressed by `NodeId`.
    nodes: Vec<CityNode>,
    /// Secondary index: city name -> arena handle.
    by_name: FxHashMap<String, NodeId>,
    /// Number of distinct undirected edges.
    edge_count: usize,
    /// Rebuild generation that produced this snapshot (0 = startup empty).
    generation: u64,
    built_at: Instant,
}

impl GraphSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn empty(generation: u64) -> Self {
        Self {
            nodes: Vec::new(),
            by_name: FxHashMap::default(),
            edge_count: 0,
            generation,
            built_at: Instant::now(),
        }
    }

    /// Builds a snapshot from an edge list.
    ///
    /// Both endpoints of every edge are created on first sight and linked in
    /// both directions. A pair listed more than once keeps the weight of its
    /// last occurrence.
    #[must_use]
    pub fn build(edges: &[Distance], generation: u64) -> Self {
        let mut snapshot = Self {
            nodes: Vec::with_capacity(edges.len()),
            by_name: FxHashMap::default(),
            edge_count: 0,
            generation,
            built_at: Instant::now(),
        };

        for edge in edges {
            let a = snapshot.intern(edge.first_city());
            let b = snapshot.intern(edge.second_city());
            let weight = edge.distance();

            if snapshot.nodes[a.index()].weight_to(b).is_none() {
                snapshot.edge_count += 1;
            }
            snapshot.nodes[a.index()].link(b, weight);
            snapshot.nodes[b.index()].link(a, weight);
        }

        snapshot
    }

    fn intern(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(CityNode::new(name));
        self.by_name.insert(name.to_string(), id);
        id
    }

    /// Resolves a city name to its arena handle.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    /// Gets a city by handle.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&CityNode> {
        self.nodes.get(id.index())
    }

    /// Gets a city by name.
    #[must_use]
    pub fn city(&self, name: &str) -> Option<&CityNode> {
        self.resolve(name).and_then(|id| self.node(id))
    }

    /// Returns true if a city with the given name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Returns the neighbors of a city as `(name, weight)` in visitation order.
    #[must_use]
    pub fn neighbors(&self, name: &str) -> Vec<(&str, u64)> {
        self.city(name)
            .map(|city| {
                city.neighbors()
                    .filter_map(|(id, w)| self.node(id).map(|n| (n.name(), w)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the weight of the edge between two cities, if any.
    #[must_use]
    pub fn weight(&self, a: &str, b: &str) -> Option<u64> {
        let b = self.resolve(b)?;
        self.city(a)?.weight_to(b)
    }

    /// Returns all city names in arena order.
    #[must_use]
    pub fn city_names(&self) -> Vec<&str> {
        self.nodes.iter().map(CityNode::name).collect()
    }

    /// Returns the total number of cities.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of distinct undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns true if the snapshot holds no cities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the rebuild generation of this snapshot.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns when this snapshot was built.
    #[must_use]
    pub fn built_at(&self) -> Instant {
        self.built_at
    }
}

impl Default for GraphSnapshot {
    fn default() -> Self {
        Self::empty(0)
    }
}
