//! Abilities an actor can use during its turn.
//!
//! The ability set is closed: [`Ability`] is a plain enum and
//! [`Ability::activate`] dispatches to one module per variant. Every
//! activation follows the same two steps: `validate` against the current
//! state without touching it, then `apply` the mutation. The result is
//! returned synchronously as an [`ActivationReport`] whose [`TurnOutcome`]
//! tells the caller whether the actor's turn is over.

mod combat;
mod error;
mod movement;
mod targeting;
mod wait;

pub use error::AbilityError;
pub use targeting::attack_targets;

pub use crate::state::TurnOutcome;

use crate::map::GridMap;
use crate::pathfinding::PathfindResult;
use crate::state::{Actor, ActorId, Coordinate, Roster};

/// Actions an actor can take.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Ability {
    /// Walk along a path to a reachable cell, spending movement points.
    Move,
    /// End the turn without doing anything else.
    Wait,
    /// Strike a hostile actor within range.
    Attack,
}

impl Ability {
    pub const ALL: [Ability; 3] = [Ability::Move, Ability::Wait, Ability::Attack];

    /// Icon identifier the presentation layer uses for this ability's button.
    pub const fn icon(self) -> &'static str {
        match self {
            Ability::Move => "move",
            Ability::Wait => "wait",
            Ability::Attack => "crosshair",
        }
    }

    /// True for abilities that go through target selection first.
    pub const fn is_attack(self) -> bool {
        matches!(self, Ability::Attack)
    }

    /// True when the ability needs [`AbilityContext::target`].
    pub const fn requires_target(self) -> bool {
        matches!(self, Ability::Move | Ability::Attack)
    }

    /// Whether `actor` has the resources to use this ability at all.
    pub fn is_usable_by(self, actor: &Actor) -> bool {
        match self {
            Ability::Move => actor.movement_points() > 0,
            Ability::Wait => true,
            Ability::Attack => actor.attack.damage > 0,
        }
    }

    /// Runs the ability for `actor`.
    ///
    /// Turn-state bookkeeping is left to the caller, which feeds the returned
    /// outcome to the actor's turn machine.
    pub fn activate(
        self,
        actor: ActorId,
        context: &mut AbilityContext<'_>,
    ) -> Result<ActivationReport, AbilityError> {
        let acting = context
            .roster
            .get(&actor)
            .ok_or(AbilityError::ActorNotFound(actor))?;
        if !acting.has_ability(self) || !self.is_usable_by(acting) {
            return Err(AbilityError::NotAvailable {
                actor,
                ability: self,
            });
        }

        let effect = match self {
            Ability::Move => movement::activate(actor, context)?,
            Ability::Wait => wait::activate(actor, context)?,
            Ability::Attack => combat::activate(actor, context)?,
        };

        let outcome = match effect {
            AbilityEffect::Moved { .. } => TurnOutcome::Continue,
            AbilityEffect::Waited | AbilityEffect::Attacked { .. } => TurnOutcome::TurnOver,
        };

        tracing::debug!(%actor, ability = %self, %outcome, "ability activated");

        Ok(ActivationReport {
            ability: self,
            outcome,
            effect,
        })
    }
}

/// State an ability reads and mutates.
pub struct AbilityContext<'a> {
    pub map: &'a mut GridMap,
    pub roster: &'a mut Roster,
    /// Reachability computed for the acting actor at its current position.
    pub reachability: Option<&'a PathfindResult>,
    /// Destination for `Move`, target cell for `Attack`.
    pub target: Option<Coordinate>,
}

impl<'a> AbilityContext<'a> {
    pub fn new(map: &'a mut GridMap, roster: &'a mut Roster) -> Self {
        Self {
            map,
            roster,
            reachability: None,
            target: None,
        }
    }

    pub fn with_reachability(mut self, reachability: &'a PathfindResult) -> Self {
        self.reachability = Some(reachability);
        self
    }

    pub fn with_target(mut self, target: Coordinate) -> Self {
        self.target = Some(target);
        self
    }

    fn actor(&self, id: ActorId) -> Result<&Actor, AbilityError> {
        self.roster.get(&id).ok_or(AbilityError::ActorNotFound(id))
    }

    fn actor_mut(&mut self, id: ActorId) -> Result<&mut Actor, AbilityError> {
        self.roster
            .get_mut(&id)
            .ok_or(AbilityError::ActorNotFound(id))
    }

    fn require_target(&self, ability: Ability) -> Result<Coordinate, AbilityError> {
        self.target.ok_or(AbilityError::MissingTarget { ability })
    }
}

/// What an ability did, for the presentation layer to animate.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityEffect {
    /// The actor walked `path` (origin and destination inclusive).
    Moved { path: Vec<Coordinate>, cost: u32 },
    Waited,
    Attacked {
        target: ActorId,
        at: Coordinate,
        damage: u32,
        defeated: bool,
    },
}

/// Synchronous completion report of an activation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivationReport {
    pub ability: Ability,
    pub outcome: TurnOutcome,
    pub effect: AbilityEffect,
}
