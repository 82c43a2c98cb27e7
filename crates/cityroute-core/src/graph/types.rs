//! Graph types: distance records, arena nodes and ranked paths.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest accepted edge weight.
///
/// A simple path has fewer than `u32::MAX` edges (see [`NodeId`]), so the
/// distance of any path fits in a `u64` without overflow.
pub const MAX_DISTANCE: u64 = u32::MAX as u64;

/// Arena handle of a city inside one [`GraphSnapshot`](super::GraphSnapshot).
///
/// Handles are only meaningful for the snapshot that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        // Reason: a snapshot holding more than u32::MAX cities cannot be enumerated anyway
        #[allow(clippy::cast_possible_truncation)]
        Self(index as u32)
    }

    /// Position of the node in the snapshot arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// An undirected, positively weighted edge between two cities.
///
/// The stored orientation (`first_city`, `second_city`) carries no meaning for
/// the graph; it only identifies the record inside an edge source.
///
/// # Example
///
/// ```rust
/// use cityroute_core::graph::Distance;
///
/// let d = Distance::new("A", "B", 5).unwrap();
/// assert_eq!(d.first_city(), "A");
/// assert_eq!(d.distance(), 5);
/// assert!(Distance::new("A", "B", 0).is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "DistanceRecord")]
pub struct Distance {
    first_city: String,
    second_city: String,
    distance: u64,
}

impl Distance {
    /// Creates a distance record.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidCityName` for a blank city name and
    /// `Error::InvalidDistance` for a distance outside `1..=MAX_DISTANCE`.
    pub fn new(first_city: &str, second_city: &str, distance: u64) -> Result<Self> {
        validate_city_name(first_city)?;
        validate_city_name(second_city)?;
        if !(1..=MAX_DISTANCE).contains(&distance) {
            return Err(Error::InvalidDistance {
                city_a: first_city.to_string(),
                city_b: second_city.to_string(),
                distance: i64::try_from(distance).unwrap_or(i64::MAX),
            });
        }
        Ok(Self {
            first_city: first_city.to_string(),
            second_city: second_city.to_string(),
            distance,
        })
    }

    /// Returns the first city as stored.
    #[must_use]
    pub fn first_city(&self) -> &str {
        &self.first_city
    }

    /// Returns the second city as stored.
    #[must_use]
    pub fn second_city(&self) -> &str {
        &self.second_city
    }

    /// Returns the edge weight.
    #[must_use]
    pub fn distance(&self) -> u64 {
        self.distance
    }

    /// Returns true if this record joins `a` and `b`, in either orientation.
    #[must_use]
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.first_city == a && self.second_city == b)
            || (self.first_city == b && self.second_city == a)
    }
}

/// Unchecked serialized form; every deserialized [`Distance`] passes through
/// [`Distance::new`].
#[derive(Deserialize)]
struct DistanceRecord {
    first_city: String,
    second_city: String,
    distance: u64,
}

impl TryFrom<DistanceRecord> for Distance {
    type Error = Error;

    fn try_from(record: DistanceRecord) -> Result<Self> {
        Self::new(&record.first_city, &record.second_city, record.distance)
    }
}

/// A distance entry as submitted by a client, before validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DistanceInput {
    /// First city.
    #[serde(rename = "cityA")]
    pub city_a: String,
    /// Second city.
    #[serde(rename = "cityB")]
    pub city_b: String,
    /// Distance, must be in `1..=MAX_DISTANCE`.
    pub distance: i64,
}

impl DistanceInput {
    /// Creates an unvalidated input entry.
    #[must_use]
    pub fn new(city_a: &str, city_b: &str, distance: i64) -> Self {
        Self {
            city_a: city_a.to_string(),
            city_b: city_b.to_string(),
            distance,
        }
    }

    /// Validates the entry and converts it into a [`Distance`] record.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidCityName` or `Error::InvalidDistance`.
    pub fn validate(&self) -> Result<Distance> {
        let weight = u64::try_from(self.distance)
            .ok()
            .filter(|w| (1..=MAX_DISTANCE).contains(w))
            .ok_or_else(|| Error::InvalidDistance {
                city_a: self.city_a.clone(),
                city_b: self.city_b.clone(),
                distance: self.distance,
            })?;
        Distance::new(&self.city_a, &self.city_b, weight)
    }
}

/// Rejects empty and whitespace-only city names.
///
/// # Errors
///
/// Returns `Error::InvalidCityName` if the name is blank.
pub fn validate_city_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidCityName(name.to_string()));
    }
    Ok(())
}

/// A city in the snapshot arena with its weighted neighbors.
///
/// Neighbors keep the order in which their edge was first seen during the
/// build, which fixes the depth-first visitation order of path searches.
#[derive(Debug, Clone)]
pub struct CityNode {
    name: String,
    neighbors: IndexMap<NodeId, u64>,
}

impl CityNode {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            neighbors: IndexMap::new(),
        }
    }

    /// Returns the city name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the neighbor handles and edge weights in visitation order.
    pub fn neighbors(&self) -> impl Iterator<Item = (NodeId, u64)> + '_ {
        self.neighbors.iter().map(|(&id, &w)| (id, w))
    }

    /// Returns the `position`-th neighbor in visitation order.
    pub(crate) fn neighbor_at(&self, position: usize) -> Option<(NodeId, u64)> {
        self.neighbors.get_index(position).map(|(&id, &w)| (id, w))
    }

    /// Returns the weight of the edge to `neighbor`, if any.
    #[must_use]
    pub fn weight_to(&self, neighbor: NodeId) -> Option<u64> {
        self.neighbors.get(&neighbor).copied()
    }

    /// Returns the number of neighbors.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    /// Inserts or overwrites a neighbor. An overwrite keeps its position.
    pub(crate) fn link(&mut self, neighbor: NodeId, weight: u64) {
        self.neighbors.insert(neighbor, weight);
    }
}

/// A simple path between two cities and its total distance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoutePath {
    /// City names from start to destination.
    pub path: Vec<String>,
    /// Sum of the edge weights along `path`.
    pub distance: u64,
}

impl RoutePath {
    /// Number of edges traversed.
    #[must_use]
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}
