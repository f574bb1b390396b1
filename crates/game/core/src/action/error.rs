//! Ability activation errors.

use crate::error::{ErrorSeverity, GameError};
use crate::map::MapError;
use crate::pathfinding::PathError;
use crate::state::{ActorId, Coordinate};

use super::Ability;

/// Errors that can occur while activating an ability.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityError {
    /// Acting actor is not in the roster.
    #[error("actor {0} not found")]
    ActorNotFound(ActorId),

    /// Actor does not have the ability, or cannot use it right now.
    #[error("actor {actor} cannot use {ability}")]
    NotAvailable { actor: ActorId, ability: Ability },

    /// Ability needs a target cell and none was given.
    #[error("{ability} needs a target cell")]
    MissingTarget { ability: Ability },

    /// Target cell is not a legal choice for the ability.
    #[error("{target} is not a valid target for {ability}")]
    InvalidTarget { ability: Ability, target: Coordinate },

    /// Move was requested without reachability computed for the actor's
    /// current position, movement points and map revision.
    #[error("reachability for actor {actor} is missing or stale")]
    StaleReachability { actor: ActorId },

    /// Path costs more than the actor has left.
    #[error("path costs {needed} movement points but only {available} remain")]
    InsufficientMovement { needed: u32, available: u32 },

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Path(#[from] PathError),
}

impl GameError for AbilityError {
    fn severity(&self) -> ErrorSeverity {
        use AbilityError::*;
        match self {
            ActorNotFound(_) | NotAvailable { .. } | MissingTarget { .. } => {
                ErrorSeverity::Validation
            }
            InvalidTarget { .. } | InsufficientMovement { .. } => ErrorSeverity::Recoverable,
            StaleReachability { .. } => ErrorSeverity::Internal,
            Map(err) => err.severity(),
            Path(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use AbilityError::*;
        match self {
            ActorNotFound(_) => "ABILITY_ACTOR_NOT_FOUND",
            NotAvailable { .. } => "ABILITY_NOT_AVAILABLE",
            MissingTarget { .. } => "ABILITY_MISSING_TARGET",
            InvalidTarget { .. } => "ABILITY_INVALID_TARGET",
            StaleReachability { .. } => "ABILITY_STALE_REACHABILITY",
            InsufficientMovement { .. } => "ABILITY_INSUFFICIENT_MOVEMENT",
            Map(err) => err.error_code(),
            Path(err) => err.error_code(),
        }
    }
}
