//! Deterministic rules for a grid-based tactics battle.
//!
//! `tactics-core` owns the parts of a battle that must behave the same on
//! every machine: the grid map and its occupancy, terrain movement costs,
//! budget-limited reachability search, the per-actor turn state machine and
//! the closed set of abilities. Rendering, input and animation live outside
//! and talk to this crate through [`engine::Battle`] or the lower-level
//! [`pathfinding::Pathfinder`] and [`action::Ability::activate`].
pub mod action;
pub mod config;
pub mod cost;
pub mod engine;
pub mod error;
pub mod map;
pub mod pathfinding;
pub mod state;

pub use action::{
    Ability, AbilityContext, AbilityEffect, AbilityError, ActivationReport, attack_targets,
};
pub use config::EngineConfig;
pub use cost::{CostModel, TerrainCost};
pub use engine::{Battle, BattleError};
pub use error::{ErrorSeverity, GameError};
pub use map::{Adjacency, GridMap, MapError, MoveCost, Neighbors, TerrainKind, TileProperties};
pub use pathfinding::{PathError, PathfindResult, Pathfinder, ReachableCell, reconstruct_path};
pub use state::{
    AbilitySet, Actor, ActorId, AttackProfile, Controller, Coordinate, ResourceMeter, Roster,
    Side, TransitionError, TurnEvent, TurnMachine, TurnOutcome, TurnState,
};
