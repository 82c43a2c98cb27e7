//! Tests for InMemoryEdgeSource.

use super::{EdgeSource, InMemoryEdgeSource};
use crate::graph::Distance;

#[test]
fn test_upsert_and_find_is_ordered() {
    let source = InMemoryEdgeSource::new();
    source.upsert_edge("A", "B", 5).unwrap();

    assert_eq!(source.find_edge("A", "B").unwrap(), Some(5));
    // Lookup is exact; undirected handling belongs to the caller.
    assert_eq!(source.find_edge("B", "A").unwrap(), None);
}

#[test]
fn test_upsert_overwrites_in_place() {
    let source = InMemoryEdgeSource::new();
    source.upsert_edge("A", "B", 5).unwrap();
    source.upsert_edge("B", "C", 10).unwrap();
    source.upsert_edge("A", "B", 7).unwrap();

    let edges = source.list_all_edges().unwrap();
    assert_eq!(edges.len(), 2);
    assert_eq!(edges[0], Distance::new("A", "B", 7).unwrap());
    assert_eq!(edges[1], Distance::new("B", "C", 10).unwrap());
}

#[test]
fn test_upsert_rejects_invalid_record() {
    let source = InMemoryEdgeSource::new();
    assert!(source.upsert_edge("A", "B", 0).is_err());
    assert!(source.upsert_edge(" ", "B", 3).is_err());
    assert_eq!(source.edge_count().unwrap(), 0);
}

#[test]
fn test_delete_all_edges() {
    let source = InMemoryEdgeSource::with_edges(&[
        Distance::new("A", "B", 1).unwrap(),
        Distance::new("C", "D", 2).unwrap(),
    ]);
    assert_eq!(source.edge_count().unwrap(), 2);

    source.delete_all_edges().unwrap();
    assert!(source.list_all_edges().unwrap().is_empty());
}

#[test]
fn test_with_edges_later_duplicate_wins() {
    let source = InMemoryEdgeSource::with_edges(&[
        Distance::new("M", "S", 6).unwrap(),
        Distance::new("M", "S", 9).unwrap(),
    ]);
    assert_eq!(source.edge_count().unwrap(), 1);
    assert_eq!(source.find_edge("M", "S").unwrap(), Some(9));
}

#[test]
fn test_upsert_edges_keeps_first_stored_order() {
    let source = InMemoryEdgeSource::new();
    source.upsert_edge("B", "C", 10).unwrap();
    source
        .upsert_edges(&[
            Distance::new("A", "B", 5).unwrap(),
            Distance::new("B", "C", 11).unwrap(),
        ])
        .unwrap();

    let edges = source.list_all_edges().unwrap();
    assert_eq!(edges.len(), 2);
    assert_eq!(edges[0], Distance::new("B", "C", 11).unwrap());
    assert_eq!(edges[1], Distance::new("A", "B", 5).unwrap());
}
