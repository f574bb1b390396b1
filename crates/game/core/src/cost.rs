//! Tile movement cost rules.

use crate::map::{MoveCost, TileProperties};
use crate::state::Actor;

/// Maps tiles to movement costs.
///
/// Costs returned by a model are either `MoveCost::Cost(n)` with `n >= 1` or
/// `MoveCost::Impassable`. The pathfinder always calls [`CostModel::actor_cost`],
/// so an implementation can specialise per actor without touching callers.
pub trait CostModel {
    /// Cost of entering `tile` for any actor.
    fn tile_cost(&self, tile: &TileProperties) -> MoveCost;

    /// Cost of entering `tile` for `actor`. Defaults to [`CostModel::tile_cost`].
    fn actor_cost(&self, actor: &Actor, tile: &TileProperties) -> MoveCost {
        let _ = actor;
        self.tile_cost(tile)
    }
}

impl<C: CostModel + ?Sized> CostModel for &C {
    fn tile_cost(&self, tile: &TileProperties) -> MoveCost {
        (**self).tile_cost(tile)
    }

    fn actor_cost(&self, actor: &Actor, tile: &TileProperties) -> MoveCost {
        (**self).actor_cost(actor, tile)
    }
}

/// Default model: the tile's own cost, never below 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TerrainCost;

impl CostModel for TerrainCost {
    fn tile_cost(&self, tile: &TileProperties) -> MoveCost {
        if !tile.is_passable() {
            return MoveCost::Impassable;
        }
        match tile.cost() {
            MoveCost::Cost(points) => MoveCost::Cost(points.max(1)),
            MoveCost::Impassable => MoveCost::Impassable,
        }
    }
}
