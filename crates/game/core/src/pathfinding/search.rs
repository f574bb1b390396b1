use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use crate::cost::CostModel;
use crate::map::{Adjacency, GridMap, MapError, MoveCost, TileProperties};
use crate::state::{Actor, Coordinate};

use super::{PathfindResult, ReachableCell};

/// Budget-limited uniform-cost search over a [`GridMap`].
///
/// Entering a tile costs whatever the cost model says for that tile; the
/// origin itself is free. Tiles held by another actor are neither crossed nor
/// ended on. A branch is dropped as soon as its accumulated cost exceeds the
/// budget, which keeps every cost within budget exact.
///
/// Ties are broken by the heap key `(cost, coordinate)` and the fixed neighbor
/// order, and a cell only changes predecessor on a strict improvement, so the
/// same map and budget always yield the same result.
#[derive(Clone, Debug)]
pub struct Pathfinder<'a, C> {
    map: &'a GridMap,
    cost_model: C,
    adjacency: Adjacency,
}

impl<'a, C: CostModel> Pathfinder<'a, C> {
    pub fn new(map: &'a GridMap, cost_model: C) -> Self {
        Self {
            map,
            cost_model,
            adjacency: Adjacency::default(),
        }
    }

    pub fn with_adjacency(mut self, adjacency: Adjacency) -> Self {
        self.adjacency = adjacency;
        self
    }

    /// Reachable cells from `start` within `budget`, using tile-only costs.
    pub fn reachable(&self, start: Coordinate, budget: u32) -> Result<PathfindResult, MapError> {
        self.search(start, budget, |tile| self.cost_model.tile_cost(tile))
    }

    /// Reachable cells for `actor` from where it stands, within its remaining
    /// movement points, using the actor-aware cost hook.
    pub fn reachable_for(&self, actor: &Actor) -> Result<PathfindResult, MapError> {
        let start = self.map.require_position(actor.id)?;
        self.search(start, actor.movement_points(), |tile| {
            self.cost_model.actor_cost(actor, tile)
        })
    }

    fn search<F>(
        &self,
        start: Coordinate,
        budget: u32,
        step_cost: F,
    ) -> Result<PathfindResult, MapError>
    where
        F: Fn(&TileProperties) -> MoveCost,
    {
        let map = self.map;
        let start_index = map.checked_index(start)?;

        let mut best: Vec<Option<ReachableCell>> = vec![None; map.len()];
        best[start_index] = Some(ReachableCell {
            cost: 0,
            predecessor: None,
        });

        let mut frontier = BinaryHeap::new();
        frontier.push(Reverse((0u32, start)));

        // Step cost into `cell`; `None` when impassable or held by another actor.
        let enterable = |cell: Coordinate| -> Option<u32> {
            if cell != start && map.is_occupied(cell) {
                return None;
            }
            let tile = map.tile_at(cell).ok()?;
            step_cost(tile).points()
        };

        while let Some(Reverse((cost, cell))) = frontier.pop() {
            let settled = map
                .index(cell)
                .and_then(|index| best[index])
                .map(|entry| entry.cost);
            if settled != Some(cost) {
                continue;
            }

            for neighbor in map.neighbors(cell, self.adjacency) {
                let Some(neighbor_index) = map.index(neighbor) else {
                    continue;
                };
                let Some(step) = enterable(neighbor) else {
                    continue;
                };

                // Diagonal steps may not squeeze past a blocked orthogonal cell.
                let (dx, dy) = (neighbor.column - cell.column, neighbor.row - cell.row);
                if dx != 0
                    && dy != 0
                    && (enterable(cell.offset(dx, 0)).is_none()
                        || enterable(cell.offset(0, dy)).is_none())
                {
                    continue;
                }

                let Some(next) = cost.checked_add(step) else {
                    continue;
                };
                if next > budget {
                    continue;
                }

                let improves = best[neighbor_index].is_none_or(|entry| next < entry.cost);
                if improves {
                    best[neighbor_index] = Some(ReachableCell {
                        cost: next,
                        predecessor: Some(cell),
                    });
                    frontier.push(Reverse((next, neighbor)));
                }
            }
        }

        let cells: BTreeMap<Coordinate, ReachableCell> = map
            .coordinates()
            .zip(best)
            .filter_map(|(coordinate, entry)| entry.map(|cell| (coordinate, cell)))
            .collect();

        tracing::debug!(
            origin = %start,
            budget,
            adjacency = %self.adjacency,
            reachable = cells.len(),
            "computed reachability"
        );

        Ok(PathfindResult::new(
            start,
            budget,
            self.adjacency,
            map.revision(),
            cells,
        ))
    }
}
