use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

use crate::error::{ErrorSeverity, GameError};
use crate::map::Adjacency;
use crate::state::Coordinate;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathError {
    #[error("{destination} is not reachable from {origin}")]
    Unreachable {
        origin: Coordinate,
        destination: Coordinate,
    },
}

impl GameError for PathError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            PathError::Unreachable { .. } => "PATH_UNREACHABLE",
        }
    }
}

/// Minimum cost to reach a cell and the cell it is entered from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReachableCell {
    pub cost: u32,
    /// `None` only for the origin.
    pub predecessor: Option<Coordinate>,
}

/// Reachability snapshot for one actor at one map state.
///
/// Always contains the origin at cost 0, and every cost is within the
/// budget. The snapshot goes stale as soon as the actor moves, spends
/// movement points, or the map's passability or occupancy changes; callers
/// recompute rather than patch it. [`PathfindResult::map_revision`] records
/// the [`GridMap::revision`](crate::map::GridMap::revision) it was computed at.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathfindResult {
    origin: Coordinate,
    budget: u32,
    adjacency: Adjacency,
    map_revision: u64,
    cells: BTreeMap<Coordinate, ReachableCell>,
}

impl PathfindResult {
    pub(crate) fn new(
        origin: Coordinate,
        budget: u32,
        adjacency: Adjacency,
        map_revision: u64,
        cells: BTreeMap<Coordinate, ReachableCell>,
    ) -> Self {
        debug_assert_eq!(cells.get(&origin).map(|cell| cell.cost), Some(0));
        Self {
            origin,
            budget,
            adjacency,
            map_revision,
            cells,
        }
    }

    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    pub fn adjacency(&self) -> Adjacency {
        self.adjacency
    }

    pub fn map_revision(&self) -> u64 {
        self.map_revision
    }

    /// Number of reachable cells, origin included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: the origin is always reachable.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        self.cells.contains_key(&coordinate)
    }

    pub fn cell(&self, coordinate: Coordinate) -> Option<&ReachableCell> {
        self.cells.get(&coordinate)
    }

    pub fn cost_to(&self, coordinate: Coordinate) -> Option<u32> {
        self.cell(coordinate).map(|cell| cell.cost)
    }

    /// Reachable cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, &ReachableCell)> + '_ {
        self.cells.iter().map(|(coordinate, cell)| (*coordinate, cell))
    }

    /// Reachable cells other than the origin, i.e. valid move destinations.
    pub fn destinations(&self) -> impl Iterator<Item = Coordinate> + '_ {
        let origin = self.origin;
        self.cells.keys().copied().filter(move |c| *c != origin)
    }

    /// Ordered waypoints from the origin to `destination`, both inclusive.
    pub fn reconstruct_path(&self, destination: Coordinate) -> Result<Vec<Coordinate>, PathError> {
        let unreachable = PathError::Unreachable {
            origin: self.origin,
            destination,
        };
        let mut cell = self.cells.get(&destination).ok_or(unreachable)?;
        let mut path = vec![destination];

        while let Some(previous) = cell.predecessor {
            path.push(previous);
            cell = self.cells.get(&previous).ok_or(unreachable)?;
        }

        path.reverse();
        Ok(path)
    }

    /// SHA-256 over the canonical contents, for replay verification. The map
    /// revision is bookkeeping and not hashed.
    pub fn fingerprint(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.origin.column.to_le_bytes());
        hasher.update(self.origin.row.to_le_bytes());
        hasher.update(self.budget.to_le_bytes());
        hasher.update([self.adjacency as u8]);

        for (coordinate, cell) in &self.cells {
            hasher.update(coordinate.column.to_le_bytes());
            hasher.update(coordinate.row.to_le_bytes());
            hasher.update(cell.cost.to_le_bytes());
            match cell.predecessor {
                Some(previous) => {
                    hasher.update([1]);
                    hasher.update(previous.column.to_le_bytes());
                    hasher.update(previous.row.to_le_bytes());
                }
                None => hasher.update([0]),
            }
        }

        hasher.finalize().into()
    }
}

/// Free-function form of [`PathfindResult::reconstruct_path`].
pub fn reconstruct_path(
    result: &PathfindResult,
    destination: Coordinate,
) -> Result<Vec<Coordinate>, PathError> {
    result.reconstruct_path(destination)
}
