//! Edge sources: the authoritative store of city distance records.
//!
//! The graph cache never owns edges; it asks an [`EdgeSource`] for the full
//! list on every rebuild. Two implementations ship with the crate:
//!
//! - [`InMemoryEdgeSource`]: process-local, lost on restart.
//! - [`JsonFileEdgeSource`]: the same records persisted to a JSON file.

mod file;
mod memory;

#[cfg(test)]
mod memory_tests;

pub use file::JsonFileEdgeSource;
pub use memory::InMemoryEdgeSource;

use indexmap::IndexMap;

use crate::error::Result;
use crate::graph::Distance;

/// Store of undirected distance records keyed by their two city names.
///
/// Records are keyed by the orientation they were first stored in;
/// [`find_edge`](EdgeSource::find_edge) does not look at the reverse pair.
/// Callers that treat edges as undirected check both orientations.
pub trait EdgeSource: Send + Sync {
    /// Returns every record, in the order the pairs were first stored.
    fn list_all_edges(&self) -> Result<Vec<Distance>>;

    /// Returns the distance stored for exactly (`first`, `second`).
    fn find_edge(&self, first: &str, second: &str) -> Result<Option<u64>>;

    /// Inserts (`first`, `second`) or overwrites its distance.
    fn upsert_edge(&self, first: &str, second: &str, distance: u64) -> Result<()>;

    /// Inserts or overwrites every record in `edges`, in order.
    ///
    /// The default writes one record at a time, so a failure can leave the
    /// earlier records written. Sources that can apply the batch in one
    /// write override it.
    fn upsert_edges(&self, edges: &[Distance]) -> Result<()> {
        for edge in edges {
            self.upsert_edge(edge.first_city(), edge.second_city(), edge.distance())?;
        }
        Ok(())
    }

    /// Removes every record.
    fn delete_all_edges(&self) -> Result<()>;

    /// Returns the number of stored records.
    fn edge_count(&self) -> Result<usize> {
        Ok(self.list_all_edges()?.len())
    }
}

/// Insertion-ordered record table shared by the bundled sources.
///
/// Updating an existing pair keeps its position, so the edge list stays in
/// first-stored order with the latest distance per pair.
#[derive(Debug, Clone, Default)]
pub(crate) struct EdgeRecords {
    records: IndexMap<(String, String), u64>,
}

impl EdgeRecords {
    pub(crate) fn from_distances(distances: &[Distance]) -> Self {
        let mut records = Self::default();
        for d in distances {
            records.upsert(d);
        }
        records
    }

    pub(crate) fn to_distances(&self) -> Result<Vec<Distance>> {
        self.records
            .iter()
            .map(|((a, b), &w)| Distance::new(a, b, w))
            .collect()
    }

    pub(crate) fn get(&self, first: &str, second: &str) -> Option<u64> {
        self.records
            .get(&(first.to_string(), second.to_string()))
            .copied()
    }

    pub(crate) fn upsert(&mut self, distance: &Distance) {
        self.records.insert(
            (
                distance.first_city().to_string(),
                distance.second_city().to_string(),
            ),
            distance.distance(),
        );
    }

    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }
}
