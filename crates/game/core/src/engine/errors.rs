//! Errors surfaced by the battle driver.

use crate::action::{Ability, AbilityError};
use crate::error::{ErrorSeverity, GameError};
use crate::map::MapError;
use crate::state::{ActorId, Controller, Side, TransitionError, TurnState};

/// Errors surfaced while driving a battle.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleError {
    #[error("actor {0} not found")]
    ActorNotFound(ActorId),

    #[error("actor {0} is already part of the battle")]
    DuplicateActor(ActorId),

    #[error("roster is full ({max} actors)")]
    RosterFull { max: usize },

    #[error("no round is in progress")]
    NoActiveRound,

    #[error("actor {actor} fights for {side} but {active} is acting")]
    WrongSide {
        actor: ActorId,
        side: Side,
        active: Side,
    },

    #[error("actor {actor} is controlled by {expected}, not {requested}")]
    WrongController {
        actor: ActorId,
        expected: Controller,
        requested: Controller,
    },

    #[error("actor {0} is defeated")]
    Defeated(ActorId),

    #[error("actor {current} is still taking its turn")]
    SelectionInProgress { current: ActorId },

    #[error("no actor is selected")]
    NoSelection,

    #[error("{ability} cannot be used while {state}")]
    AbilityNotReady { ability: Ability, state: TurnState },

    #[error(transparent)]
    Turn(#[from] TransitionError),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Ability(#[from] AbilityError),
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        use BattleError::*;
        match self {
            ActorNotFound(_)
            | DuplicateActor(_)
            | RosterFull { .. }
            | WrongSide { .. }
            | WrongController { .. }
            | Defeated(_) => ErrorSeverity::Validation,
            NoActiveRound | SelectionInProgress { .. } | NoSelection | AbilityNotReady { .. } => {
                ErrorSeverity::Recoverable
            }
            Turn(err) => err.severity(),
            Map(err) => err.severity(),
            Ability(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use BattleError::*;
        match self {
            ActorNotFound(_) => "BATTLE_ACTOR_NOT_FOUND",
            DuplicateActor(_) => "BATTLE_DUPLICATE_ACTOR",
            RosterFull { .. } => "BATTLE_ROSTER_FULL",
            NoActiveRound => "BATTLE_NO_ACTIVE_ROUND",
            WrongSide { .. } => "BATTLE_WRONG_SIDE",
            WrongController { .. } => "BATTLE_WRONG_CONTROLLER",
            Defeated(_) => "BATTLE_ACTOR_DEFEATED",
            SelectionInProgress { .. } => "BATTLE_SELECTION_IN_PROGRESS",
            NoSelection => "BATTLE_NO_SELECTION",
            AbilityNotReady { .. } => "BATTLE_ABILITY_NOT_READY",
            Turn(err) => err.error_code(),
            Map(err) => err.error_code(),
            Ability(err) => err.error_code(),
        }
    }
}
