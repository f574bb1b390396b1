//! Scenario loader.
//!
//! A scenario names the map to fight on and lists every actor with its side,
//! controller, starting cell and any stats that differ from the engine
//! defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::{
    Ability, Actor, ActorId, AttackProfile, Battle, Controller, Coordinate, EngineConfig, GridMap,
    Side,
};

use crate::loaders::{LoadResult, read_file};

/// One actor entry in a scenario file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorSpec {
    pub id: u32,
    pub name: String,
    /// Sprite or template tag, passed through to the presentation layer.
    pub kind: String,
    #[serde(default)]
    pub side: Side,
    #[serde(default)]
    pub controller: Controller,
    pub position: (i32, i32),
    #[serde(default)]
    pub movement_points: Option<u32>,
    #[serde(default)]
    pub health: Option<u32>,
    #[serde(default)]
    pub attack: Option<AttackProfile>,
    #[serde(default = "default_abilities")]
    pub abilities: Vec<Ability>,
}

fn default_abilities() -> Vec<Ability> {
    Ability::ALL.to_vec()
}

impl ActorSpec {
    pub fn position(&self) -> Coordinate {
        Coordinate::from(self.position)
    }

    /// Builds the actor, filling unspecified stats from `config`.
    pub fn to_actor(&self, config: &EngineConfig) -> Actor {
        let mut actor = Actor::from_config(ActorId(self.id), &self.name, &self.kind, config)
            .with_side(self.side)
            .with_controller(self.controller)
            .with_abilities(self.abilities.iter().copied());

        if let Some(points) = self.movement_points {
            actor = actor.with_movement_points(points);
        }
        if let Some(health) = self.health {
            actor = actor.with_health(health);
        }
        if let Some(attack) = self.attack {
            actor = actor.with_attack(attack);
        }
        actor
    }
}

/// Scenario file contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Map file name under `maps/`, without the `.ron` extension.
    pub map: String,
    pub actors: Vec<ActorSpec>,
}

impl Scenario {
    /// Places every actor on `map` and returns the ready battle.
    pub fn build_battle(&self, map: GridMap, config: EngineConfig) -> LoadResult<Battle> {
        let mut battle = Battle::new(map, config);
        for spec in &self.actors {
            let actor = spec.to_actor(battle.config());
            battle.add_actor(actor, spec.position()).map_err(|e| {
                anyhow::anyhow!("Failed to place actor {} ({}): {}", spec.id, spec.name, e)
            })?;
        }
        Ok(battle)
    }
}

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load a scenario from a RON file.
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a scenario from RON text.
    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let scenario: Scenario = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;

        Ok(scenario)
    }
}
