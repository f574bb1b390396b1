//! Per-actor state: identity, resources and turn lifecycle.
//!
//! Actors are owned by the battle roster. The grid map refers to them by
//! [`ActorId`] only, so there is no ownership cycle between the two.
mod actor;
mod common;
mod turn;

pub use actor::{AbilitySet, Actor, AttackProfile, Controller, Roster, Side};
pub use common::{ActorId, Coordinate, ResourceMeter};
pub use turn::{TransitionError, TurnEvent, TurnMachine, TurnOutcome, TurnState};
