//! Grid map: static tile data plus actor occupancy.

mod grid;
mod tile;

pub use grid::{Adjacency, GridMap, MapError, Neighbors};
pub use tile::{MoveCost, TerrainKind, TileProperties};
