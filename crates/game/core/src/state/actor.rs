use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::action::Ability;
use crate::config::EngineConfig;

use super::{ActorId, ResourceMeter, TurnMachine, TurnState};

/// Actors taking part in a battle, keyed by id.
pub type Roster = BTreeMap<ActorId, Actor>;

/// Ability slots available to a single actor.
pub type AbilitySet = ArrayVec<Ability, { EngineConfig::MAX_ABILITIES }>;

// Deduplicated abilities always fit.
const _: () = assert!(Ability::ALL.len() <= EngineConfig::MAX_ABILITIES);

/// Allegiance of an actor. Actors on different sides are hostile.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Side {
    #[default]
    Blue,
    Red,
}

/// Who issues commands for an actor.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Controller {
    #[default]
    Player,
    Computer,
}

/// Reach and damage of an actor's attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackProfile {
    /// Maximum Manhattan distance to a target.
    pub range: u32,
    pub damage: u32,
}

impl AttackProfile {
    pub const fn new(range: u32, damage: u32) -> Self {
        Self { range, damage }
    }
}

impl Default for AttackProfile {
    fn default() -> Self {
        Self::new(
            EngineConfig::DEFAULT_ATTACK_RANGE,
            EngineConfig::DEFAULT_ATTACK_DAMAGE,
        )
    }
}

/// Mutable per-unit state.
///
/// An actor never stores its own position: [`GridMap::position_of`] is the
/// single source of truth for where it stands.
///
/// [`GridMap::position_of`]: crate::map::GridMap::position_of
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    /// Template or sprite identifier used by the presentation layer.
    pub kind: String,
    pub side: Side,
    pub controller: Controller,
    /// Movement points left this turn; refilled by [`Actor::begin_turn`].
    pub movement: ResourceMeter,
    pub health: ResourceMeter,
    pub attack: AttackProfile,
    pub abilities: AbilitySet,
    pub turn: TurnMachine,
}

impl Actor {
    pub fn new(id: ActorId, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: kind.into(),
            side: Side::default(),
            controller: Controller::default(),
            movement: ResourceMeter::full(EngineConfig::DEFAULT_MOVEMENT_POINTS),
            health: ResourceMeter::full(EngineConfig::DEFAULT_HEALTH),
            attack: AttackProfile::default(),
            abilities: AbilitySet::new(),
            turn: TurnMachine::new(),
        }
    }

    /// Creates an actor whose unspecified stats come from `config`.
    pub fn from_config(
        id: ActorId,
        name: impl Into<String>,
        kind: impl Into<String>,
        config: &EngineConfig,
    ) -> Self {
        Self::new(id, name, kind)
            .with_movement_points(config.default_movement_points)
            .with_health(config.default_health)
            .with_attack(AttackProfile::new(
                config.default_attack_range,
                config.default_attack_damage,
            ))
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn with_controller(mut self, controller: Controller) -> Self {
        self.controller = controller;
        self
    }

    pub fn with_movement_points(mut self, points: u32) -> Self {
        self.movement = ResourceMeter::full(points);
        self
    }

    pub fn with_health(mut self, health: u32) -> Self {
        self.health = ResourceMeter::full(health);
        self
    }

    pub fn with_attack(mut self, attack: AttackProfile) -> Self {
        self.attack = attack;
        self
    }

    /// Adds an ability; duplicates are ignored.
    pub fn with_ability(mut self, ability: Ability) -> Self {
        if !self.has_ability(ability) {
            let pushed = self.abilities.try_push(ability);
            debug_assert!(pushed.is_ok(), "ability slots exhausted");
        }
        self
    }

    pub fn with_abilities(self, abilities: impl IntoIterator<Item = Ability>) -> Self {
        abilities
            .into_iter()
            .fold(self, |actor, ability| actor.with_ability(ability))
    }

    pub fn is_computer(&self) -> bool {
        self.controller == Controller::Computer
    }

    pub fn is_alive(&self) -> bool {
        self.health.current > 0
    }

    pub fn is_hostile_to(&self, other: &Actor) -> bool {
        self.side != other.side
    }

    pub fn movement_points(&self) -> u32 {
        self.movement.current
    }

    pub fn turn_state(&self) -> TurnState {
        self.turn.state()
    }

    pub fn has_ability(&self, ability: Ability) -> bool {
        self.abilities.contains(&ability)
    }

    /// Abilities usable right now: all of them while awaiting a command, none otherwise.
    pub fn available_abilities(&self) -> impl Iterator<Item = Ability> + '_ {
        let awaiting = self.turn_state() == TurnState::AwaitingCommand;
        self.abilities
            .iter()
            .copied()
            .filter(move |ability| awaiting && ability.is_usable_by(self))
    }

    /// Resets the actor for its next turn.
    pub fn begin_turn(&mut self) {
        self.turn.begin_turn();
        self.movement.refill();
    }

    /// Applies damage and returns true when the actor is defeated by it.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.health.spend(amount);
        !self.is_alive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TurnEvent;

    fn soldier() -> Actor {
        Actor::new(ActorId(1), "Hunkenheim", "goodsoldier")
            .with_movement_points(6)
            .with_abilities([Ability::Move, Ability::Wait, Ability::Move])
    }

    #[test]
    fn duplicate_abilities_are_ignored() {
        let actor = soldier();
        assert_eq!(actor.abilities.as_slice(), &[Ability::Move, Ability::Wait]);
    }

    #[test]
    fn repeated_ability_lists_never_overflow_slots() {
        let repeated = Ability::ALL
            .iter()
            .cycle()
            .take(EngineConfig::MAX_ABILITIES * 3)
            .copied();
        let actor = Actor::new(ActorId(2), "Bob", "badsoldier").with_abilities(repeated);
        assert_eq!(actor.abilities.as_slice(), Ability::ALL.as_slice());
    }

    #[test]
    fn abilities_are_only_available_while_awaiting_command() {
        let mut actor = soldier();
        assert_eq!(actor.available_abilities().count(), 0);

        actor.turn.apply(TurnEvent::Select).unwrap();
        assert_eq!(
            actor.available_abilities().collect::<Vec<_>>(),
            vec![Ability::Move, Ability::Wait]
        );

        actor.movement.spend(6);
        assert_eq!(
            actor.available_abilities().collect::<Vec<_>>(),
            vec![Ability::Wait]
        );
    }

    #[test]
    fn begin_turn_restores_movement_and_state() {
        let mut actor = soldier();
        actor.turn.apply(TurnEvent::Select).unwrap();
        actor.movement.spend(4);

        actor.begin_turn();
        assert_eq!(actor.movement_points(), 6);
        assert_eq!(actor.turn_state(), TurnState::TurnStart);
    }

    #[test]
    fn damage_defeats_at_zero_health() {
        let mut actor = soldier().with_health(5);
        assert!(!actor.take_damage(3));
        assert!(actor.take_damage(3));
        assert_eq!(actor.health.current, 0);
    }
}
