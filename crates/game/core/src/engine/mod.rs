//! Battle driver.
//!
//! [`Battle`] is the single owner of a battle's map and roster. The
//! presentation layer drives it with one call per player input (select an
//! actor, choose an attack, activate an ability) and reads back the cached
//! reachability and target sets to highlight cells. Every mutation goes
//! through the same sequence: select, compute reachability, activate, apply
//! the turn outcome, then recompute reachability if the turn continues.

mod errors;
mod turns;

pub use errors::BattleError;

use std::collections::BTreeSet;

use crate::action::attack_targets;
use crate::config::EngineConfig;
use crate::cost::{CostModel, TerrainCost};
use crate::map::GridMap;
use crate::pathfinding::{PathfindResult, Pathfinder};
use crate::state::{Actor, ActorId, Coordinate, Roster, Side, TurnState};

/// One battle: map, actors and the turn in progress.
#[derive(Clone, Debug)]
pub struct Battle<C = TerrainCost> {
    map: GridMap,
    roster: Roster,
    config: EngineConfig,
    cost_model: C,
    active_side: Option<Side>,
    selected: Option<ActorId>,
    reachability: Option<PathfindResult>,
    targets: BTreeSet<Coordinate>,
}

impl Battle<TerrainCost> {
    /// Creates a battle on `map` using the default terrain costs.
    pub fn new(map: GridMap, config: EngineConfig) -> Self {
        Self::with_cost_model(map, config, TerrainCost)
    }
}

impl<C: CostModel> Battle<C> {
    pub fn with_cost_model(map: GridMap, config: EngineConfig, cost_model: C) -> Self {
        Self {
            map,
            roster: Roster::new(),
            config,
            cost_model,
            active_side: None,
            selected: None,
            reachability: None,
            targets: BTreeSet::new(),
        }
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.roster.get(&id)
    }

    pub fn position_of(&self, id: ActorId) -> Option<Coordinate> {
        self.map.position_of(id)
    }

    /// Side whose round is in progress, if any.
    pub fn active_side(&self) -> Option<Side> {
        self.active_side
    }

    /// Actor currently taking its turn, if any.
    pub fn selected(&self) -> Option<ActorId> {
        self.selected
    }

    /// Adds `actor` to the roster and places it at `at`.
    ///
    /// Nothing changes when placement fails. The selected actor's
    /// reachability and targets are recomputed around the new occupant.
    pub fn add_actor(&mut self, actor: Actor, at: Coordinate) -> Result<(), BattleError> {
        if self.roster.contains_key(&actor.id) {
            return Err(BattleError::DuplicateActor(actor.id));
        }
        if self.roster.len() >= EngineConfig::MAX_ACTORS {
            return Err(BattleError::RosterFull {
                max: EngineConfig::MAX_ACTORS,
            });
        }

        self.map.place_actor(actor.id, at)?;
        tracing::debug!(actor = %actor.id, name = %actor.name, %at, "actor added");
        self.roster.insert(actor.id, actor);
        self.refresh_selection()
    }

    /// Removes `id` from both the roster and the map.
    ///
    /// Removing the selected actor ends the selection.
    pub fn remove_actor(&mut self, id: ActorId) -> Result<Actor, BattleError> {
        let actor = self
            .roster
            .remove(&id)
            .ok_or(BattleError::ActorNotFound(id))?;
        if let Some(at) = self.map.position_of(id) {
            self.map.remove_actor(at);
        }
        if self.selected == Some(id) {
            self.clear_selection();
        }
        self.refresh_selection()?;

        tracing::debug!(actor = %id, "actor removed");
        Ok(actor)
    }

    fn pathfinder(&self) -> Pathfinder<'_, &C> {
        Pathfinder::new(&self.map, &self.cost_model).with_adjacency(self.config.adjacency)
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.reachability = None;
        self.targets.clear();
    }

    /// Recomputes reachability, and targets while selecting an enemy, for
    /// the selected actor after the map changed under it.
    fn refresh_selection(&mut self) -> Result<(), BattleError> {
        let Some(id) = self.selected else {
            return Ok(());
        };
        let actor = self.actor(id).ok_or(BattleError::ActorNotFound(id))?;
        let reachability = self.pathfinder().reachable_for(actor)?;
        let targets = match actor.turn_state() {
            TurnState::SelectingEnemy => Some(attack_targets(&self.map, &self.roster, actor)?),
            _ => None,
        };

        self.reachability = Some(reachability);
        if let Some(targets) = targets {
            self.targets = targets;
        }
        Ok(())
    }

    /// Drops cached targets that no longer hold a living enemy.
    fn refresh_targets(&mut self) {
        let map = &self.map;
        let roster = &self.roster;
        self.targets.retain(|cell| {
            map.actor_at(*cell)
                .and_then(|id| roster.get(&id))
                .is_some_and(Actor::is_alive)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Ability, AbilityEffect, AbilityError};
    use crate::map::{MapError, TileProperties};
    use crate::state::{AttackProfile, Controller};

    fn c(column: i32, row: i32) -> Coordinate {
        Coordinate::new(column, row)
    }

    fn battle() -> Battle {
        Battle::new(
            GridMap::new(4, 4, TileProperties::default()),
            EngineConfig::default(),
        )
    }

    #[test]
    fn add_actor_places_on_map() {
        let mut battle = battle();
        battle
            .add_actor(Actor::new(ActorId(1), "Hunkenheim", "goodsoldier"), c(1, 2))
            .unwrap();

        assert_eq!(battle.position_of(ActorId(1)), Some(c(1, 2)));
        assert_eq!(battle.map().actor_at(c(1, 2)), Some(ActorId(1)));
        assert!(battle.actor(ActorId(1)).is_some());
    }

    #[test]
    fn add_actor_rejects_duplicates_and_bad_cells() {
        let mut battle = battle();
        battle
            .add_actor(Actor::new(ActorId(1), "a", "goodsoldier"), c(0, 0))
            .unwrap();

        assert_eq!(
            battle.add_actor(Actor::new(ActorId(1), "b", "goodsoldier"), c(1, 0)),
            Err(BattleError::DuplicateActor(ActorId(1)))
        );
        assert!(matches!(
            battle.add_actor(Actor::new(ActorId(2), "c", "goodsoldier"), c(0, 0)),
            Err(BattleError::Map(MapError::Occupied { .. }))
        ));
        assert!(matches!(
            battle.add_actor(Actor::new(ActorId(3), "d", "goodsoldier"), c(9, 0)),
            Err(BattleError::Map(MapError::OutOfBounds { .. }))
        ));
        assert_eq!(battle.roster().len(), 1);
    }

    #[test]
    fn remove_actor_clears_map_and_roster() {
        let mut battle = battle();
        battle
            .add_actor(Actor::new(ActorId(1), "a", "goodsoldier"), c(2, 2))
            .unwrap();

        let removed = battle.remove_actor(ActorId(1)).unwrap();
        assert_eq!(removed.id, ActorId(1));
        assert_eq!(battle.map().actor_at(c(2, 2)), None);
        assert_eq!(
            battle.remove_actor(ActorId(1)),
            Err(BattleError::ActorNotFound(ActorId(1)))
        );
    }

    fn corridor() -> Battle {
        let mut battle = Battle::new(
            GridMap::new(5, 1, TileProperties::new(1)),
            EngineConfig::default(),
        );
        battle
            .add_actor(
                Actor::new(ActorId(1), "Hunkenheim", "goodsoldier")
                    .with_movement_points(3)
                    .with_attack(AttackProfile::new(1, 2))
                    .with_abilities(Ability::ALL),
                c(0, 0),
            )
            .unwrap();
        battle.begin_round(Side::Blue);
        let reach = battle.select(ActorId(1), Controller::Player).unwrap();
        assert!(reach.contains(c(2, 0)));
        battle
    }

    fn bandit() -> Actor {
        Actor::new(ActorId(2), "Bob", "badsoldier")
            .with_side(Side::Red)
            .with_controller(Controller::Computer)
    }

    #[test]
    fn adding_an_actor_refreshes_selected_reachability() {
        let mut battle = corridor();
        battle.add_actor(bandit(), c(1, 0)).unwrap();

        let reach = battle.reachability().unwrap();
        assert_eq!(reach.map_revision(), battle.map().revision());
        assert_eq!(reach.len(), 1);

        assert_eq!(
            battle.activate(Ability::Move, Some(c(2, 0))),
            Err(BattleError::Ability(AbilityError::InvalidTarget {
                ability: Ability::Move,
                target: c(2, 0)
            }))
        );
        assert_eq!(battle.position_of(ActorId(1)), Some(c(0, 0)));
    }

    #[test]
    fn removing_an_actor_reopens_the_path() {
        let mut battle = corridor();
        battle.add_actor(bandit(), c(1, 0)).unwrap();
        battle.remove_actor(ActorId(2)).unwrap();

        assert_eq!(battle.reachability().unwrap().cost_to(c(3, 0)), Some(3));
        let report = battle.activate(Ability::Move, Some(c(2, 0))).unwrap();
        assert!(matches!(report.effect, AbilityEffect::Moved { cost: 2, .. }));
        assert_eq!(battle.position_of(ActorId(1)), Some(c(2, 0)));
    }

    #[test]
    fn adding_an_enemy_in_range_updates_targets() {
        let mut battle = corridor();
        assert!(battle.choose_attack().unwrap().is_empty());

        battle.add_actor(bandit(), c(1, 0)).unwrap();
        assert!(battle.targets().contains(&c(1, 0)));
        battle.activate(Ability::Attack, Some(c(1, 0))).unwrap();
        assert_eq!(battle.actor(ActorId(2)).unwrap().health.current, 8);
    }
}
