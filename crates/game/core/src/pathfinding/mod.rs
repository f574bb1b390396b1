//! Movement range and path computation.
//!
//! [`Pathfinder`] runs a budget-limited Dijkstra search from an actor's cell
//! and produces a [`PathfindResult`]: the minimum cost to every reachable cell
//! plus the predecessor chain used by [`reconstruct_path`].

mod result;
mod search;

pub use result::{PathError, PathfindResult, ReachableCell, reconstruct_path};
pub use search::Pathfinder;
