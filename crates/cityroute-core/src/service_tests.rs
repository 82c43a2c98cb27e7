//! Tests for RouteService boundary behavior.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tempfile::TempDir;

use super::config::RouteConfig;
use super::edge_source::{EdgeSource, InMemoryEdgeSource};
use super::error::{Error, Result};
use super::graph::{Distance, DistanceInput, SearchBudget};
use super::service::RouteService;

/// Edge source whose second single-record write fails.
#[derive(Default)]
struct FailingSecondWrite {
    inner: InMemoryEdgeSource,
    writes: AtomicUsize,
}

impl EdgeSource for FailingSecondWrite {
    fn list_all_edges(&self) -> Result<Vec<Distance>> {
        self.inner.list_all_edges()
    }

    fn find_edge(&self, first: &str, second: &str) -> Result<Option<u64>> {
        self.inner.find_edge(first, second)
    }

    fn upsert_edge(&self, first: &str, second: &str, distance: u64) -> Result<()> {
        if self.writes.fetch_add(1, Ordering::SeqCst) == 1 {
            return Err(Error::EdgeSource("disk full".to_string()));
        }
        self.inner.upsert_edge(first, second, distance)
    }

    fn delete_all_edges(&self) -> Result<()> {
        self.inner.delete_all_edges()
    }
}

fn small_input() -> Vec<DistanceInput> {
    vec![
        DistanceInput::new("A", "B", 5),
        DistanceInput::new("B", "C", 10),
        DistanceInput::new("C", "D", 1),
    ]
}

fn service_with_source() -> (Arc<InMemoryEdgeSource>, RouteService) {
    let source = Arc::new(InMemoryEdgeSource::new());
    let service = RouteService::new(source.clone(), SearchBudget::unlimited());
    (source, service)
}

#[test]
fn test_submit_stores_and_caches() {
    let (source, service) = service_with_source();
    let outcome = service.submit_distances(&small_input()).unwrap();

    assert_eq!(outcome.created, 3);
    assert_eq!(outcome.updated, 0);
    assert_eq!(outcome.generation, Some(2));
    assert_eq!(source.edge_count().unwrap(), 3);

    let snapshot = service.cache().snapshot();
    assert_eq!(snapshot.node_count(), 4);
    for city in ["A", "B", "C", "D"] {
        assert!(snapshot.contains(city));
    }
}

#[test]
fn test_submit_updates_reverse_orientation() {
    let (source, service) = service_with_source();
    service.submit_distances(&small_input()).unwrap();

    let outcome = service
        .submit_distances(&[DistanceInput::new("B", "A", 7)])
        .unwrap();
    assert_eq!(outcome.updated, 1);
    assert_eq!(outcome.created, 0);

    // Updated in its stored orientation, no duplicate record.
    assert_eq!(source.find_edge("A", "B").unwrap(), Some(7));
    assert_eq!(source.find_edge("B", "A").unwrap(), None);
    assert_eq!(source.edge_count().unwrap(), 3);

    let paths = service.query_paths("A", "D").unwrap();
    assert_eq!(paths[0].distance, 18);
}

#[test]
fn test_submit_rejects_whole_batch_on_invalid_entry() {
    let (source, service) = service_with_source();
    let err = service
        .submit_distances(&[
            DistanceInput::new("A", "B", 5),
            DistanceInput::new("B", "", 3),
        ])
        .unwrap_err();

    assert!(matches!(err, Error::InvalidCityName(_)));
    assert_eq!(source.edge_count().unwrap(), 0);
}

#[test]
fn test_submit_rejects_non_positive_distance() {
    let (_source, service) = service_with_source();
    for bad in [0, -1] {
        let err = service
            .submit_distances(&[DistanceInput::new("A", "B", bad)])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDistance { .. }));
    }
}

#[test]
fn test_query_small_graph() {
    let (_source, service) = service_with_source();
    service.submit_distances(&small_input()).unwrap();

    let paths = service.query_paths("A", "D").unwrap();
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].distance, 16);
    assert_eq!(paths[0].path, vec!["A", "B", "C", "D"]);
}

#[test]
fn test_query_blank_name_rejected_before_lookup() {
    let (_source, service) = service_with_source();
    service.submit_distances(&small_input()).unwrap();

    assert!(matches!(
        service.query_paths(" ", "D"),
        Err(Error::InvalidCityName(_))
    ));
}

#[test]
fn test_query_unknown_city() {
    let (_source, service) = service_with_source();
    service.submit_distances(&small_input()).unwrap();

    let err = service.query_paths("ER", "DEST").unwrap_err();
    assert_eq!(err.to_string(), "ER is unknown in the system");
}

#[test]
fn test_clear_all_resets_source_and_cache() {
    let (source, service) = service_with_source();
    service.submit_distances(&small_input()).unwrap();

    service.clear_all().unwrap();
    assert_eq!(source.edge_count().unwrap(), 0);
    assert!(service.cache().snapshot().is_empty());
    assert!(matches!(
        service.query_paths("A", "D"),
        Err(Error::UnknownCity(_))
    ));
}

#[test]
fn test_service_picks_up_existing_records() {
    let source = Arc::new(InMemoryEdgeSource::new());
    source.upsert_edge("A", "B", 5).unwrap();

    let service = RouteService::new(source, SearchBudget::unlimited());
    assert_eq!(service.query_paths("B", "A").unwrap()[0].distance, 5);
}

#[test]
fn test_refresh_reports_status() {
    let (source, service) = service_with_source();
    source.upsert_edge("A", "B", 5).unwrap();
    assert!(!service.cache().snapshot().contains("A"));

    let status = service.refresh().unwrap();
    assert_eq!(status.node_count, 2);
    assert_eq!(status.generation, service.cache_status().generation);
    assert!(!status.is_degraded());
}

#[test]
fn test_from_config_uses_data_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = RouteConfig::default();
    config.storage.data_file = Some(dir.path().join("edges.json"));

    {
        let service = RouteService::from_config(&config).unwrap();
        service.submit_distances(&small_input()).unwrap();
    }

    let reopened = RouteService::from_config(&config).unwrap();
    assert_eq!(reopened.query_paths("A", "D").unwrap()[0].distance, 16);
    assert_eq!(reopened.budget(), &config.search_budget());
}

#[test]
fn test_submit_resolves_pairs_within_one_batch() {
    let (source, service) = service_with_source();
    let outcome = service
        .submit_distances(&[
            DistanceInput::new("A", "B", 5),
            DistanceInput::new("B", "A", 7),
        ])
        .unwrap();

    assert_eq!(outcome.created, 1);
    assert_eq!(outcome.updated, 1);
    assert_eq!(source.edge_count().unwrap(), 1);
    assert_eq!(source.find_edge("A", "B").unwrap(), Some(7));
    assert_eq!(service.query_paths("B", "A").unwrap()[0].distance, 7);
}

#[test]
fn test_partial_write_failure_is_still_cached() {
    let source = Arc::new(FailingSecondWrite::default());
    let service = RouteService::new(source.clone(), SearchBudget::unlimited());

    let err = service
        .submit_distances(&[
            DistanceInput::new("A", "B", 5),
            DistanceInput::new("B", "C", 1),
        ])
        .unwrap_err();
    assert!(matches!(err, Error::EdgeSource(_)));

    // A-B reached the source before the failure, so queries must see it.
    assert_eq!(source.find_edge("A", "B").unwrap(), Some(5));
    let paths = service.query_paths("A", "B").unwrap();
    assert_eq!(paths[0].distance, 5);
    assert!(matches!(
        service.query_paths("A", "C"),
        Err(Error::UnknownCity(_))
    ));
}
