//! Shared graph fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use cityroute_core::edge_source::InMemoryEdgeSource;
use cityroute_core::graph::{DistanceInput, SearchBudget};
use cityroute_core::RouteService;

/// 26 cities, 37 distinct roads (M-S is listed twice). A to K has 217 paths.
pub const BIG_GRAPH: &[(&str, &str, i64)] = &[
    ("A", "B", 1),
    ("A", "D", 15),
    ("A", "C", 7),
    ("B", "E", 4),
    ("C", "G", 8),
    ("C", "H", 10),
    ("D", "J", 8),
    ("E", "F", 5),
    ("E", "J", 4),
    ("F", "H", 2),
    ("H", "M", 1),
    ("I", "J", 5),
    ("I", "L", 9),
    ("I", "M", 1),
    ("J", "K", 3),
    ("L", "Q", 7),
    ("L", "N", 5),
    ("N", "P", 6),
    ("O", "P", 7),
    ("N", "O", 13),
    ("Q", "R", 10),
    ("R", "P", 8),
    ("O", "U", 4),
    ("U", "V", 11),
    ("V", "W", 16),
    ("T", "V", 6),
    ("O", "T", 3),
    ("U", "T", 5),
    ("M", "O", 2),
    ("M", "S", 6),
    ("M", "S", 6),
    ("S", "T", 8),
    ("S", "Z", 14),
    ("Z", "M", 9),
    ("Z", "Y", 9),
    ("Y", "M", 17),
    ("Y", "X", 10),
    ("H", "X", 11),
];

pub const SMALL_GRAPH: &[(&str, &str, i64)] = &[("A", "B", 5), ("B", "C", 10), ("C", "D", 1)];

pub fn inputs(edges: &[(&str, &str, i64)]) -> Vec<DistanceInput> {
    edges
        .iter()
        .map(|&(a, b, d)| DistanceInput::new(a, b, d))
        .collect()
}

pub fn service_with(edges: &[(&str, &str, i64)]) -> RouteService {
    let service = RouteService::new(
        Arc::new(InMemoryEdgeSource::new()),
        SearchBudget::unlimited(),
    );
    service
        .submit_distances(&inputs(edges))
        .expect("fixture should be accepted");
    service
}
