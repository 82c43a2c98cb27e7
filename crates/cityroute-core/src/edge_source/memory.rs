//! Process-local edge source.

use parking_lot::RwLock;

use crate::error::Result;
use crate::graph::Distance;

use super::{EdgeRecords, EdgeSource};

/// Edge source kept entirely in memory.
///
/// # Example
///
/// ```rust
/// use cityroute_core::edge_source::{EdgeSource, InMemoryEdgeSource};
///
/// let source = InMemoryEdgeSource::new();
/// source.upsert_edge("A", "B", 5).unwrap();
/// assert_eq!(source.find_edge("A", "B").unwrap(), Some(5));
/// assert_eq!(source.find_edge("B", "A").unwrap(), None);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryEdgeSource {
    records: RwLock<EdgeRecords>,
}

impl InMemoryEdgeSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source pre-populated with `edges`, later duplicates winning.
    #[must_use]
    pub fn with_edges(edges: &[Distance]) -> Self {
        Self {
            records: RwLock::new(EdgeRecords::from_distances(edges)),
        }
    }
}

impl EdgeSource for InMemoryEdgeSource {
    fn list_all_edges(&self) -> Result<Vec<Distance>> {
        self.records.read().to_distances()
    }

    fn find_edge(&self, first: &str, second: &str) -> Result<Option<u64>> {
        Ok(self.records.read().get(first, second))
    }

    fn upsert_edge(&self, first: &str, second: &str, distance: u64) -> Result<()> {
        let record = Distance::new(first, second, distance)?;
        self.records.write().upsert(&record);
        Ok(())
    }

    fn upsert_edges(&self, edges: &[Distance]) -> Result<()> {
        let mut records = self.records.write();
        for edge in edges {
            records.upsert(edge);
        }
        Ok(())
    }

    fn delete_all_edges(&self) -> Result<()> {
        self.records.write().clear();
        Ok(())
    }

    fn edge_count(&self) -> Result<usize> {
        Ok(self.records.read().len())
    }
}
