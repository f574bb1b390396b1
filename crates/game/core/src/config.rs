use crate::map::Adjacency;

/// Engine configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Which neighboring cells count as a single movement step.
    pub adjacency: Adjacency,
    /// Movement points given to actors that do not specify their own.
    pub default_movement_points: u32,
    /// Health given to actors that do not specify their own.
    pub default_health: u32,
    /// Attack reach (Manhattan distance) for actors that do not specify their own.
    pub default_attack_range: u32,
    /// Attack damage for actors that do not specify their own.
    pub default_attack_damage: u32,
}

impl EngineConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_ABILITIES: usize = 8;
    pub const MAX_ACTORS: usize = 256;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MOVEMENT_POINTS: u32 = 6;
    pub const DEFAULT_HEALTH: u32 = 10;
    pub const DEFAULT_ATTACK_RANGE: u32 = 1;
    pub const DEFAULT_ATTACK_DAMAGE: u32 = 3;

    pub fn new() -> Self {
        Self {
            adjacency: Adjacency::Cardinal,
            default_movement_points: Self::DEFAULT_MOVEMENT_POINTS,
            default_health: Self::DEFAULT_HEALTH,
            default_attack_range: Self::DEFAULT_ATTACK_RANGE,
            default_attack_damage: Self::DEFAULT_ATTACK_DAMAGE,
        }
    }

    pub fn with_adjacency(mut self, adjacency: Adjacency) -> Self {
        self.adjacency = adjacency;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
