/// Movement cost of entering a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveCost {
    /// Movement points spent to enter the tile.
    Cost(u32),
    /// The tile can never be entered.
    Impassable,
}

impl MoveCost {
    /// Returns the cost in movement points, or `None` when impassable.
    pub const fn points(self) -> Option<u32> {
        match self {
            MoveCost::Cost(points) => Some(points),
            MoveCost::Impassable => None,
        }
    }

    pub const fn is_impassable(self) -> bool {
        matches!(self, MoveCost::Impassable)
    }
}

/// Canonical terrain classes for map tiles.
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
pub enum TerrainKind {
    #[default]
    Grass,
    Road,
    Forest,
    Hills,
    Water,
    Wall,
}

impl TerrainKind {
    pub const ALL: [TerrainKind; 6] = [
        TerrainKind::Grass,
        TerrainKind::Road,
        TerrainKind::Forest,
        TerrainKind::Hills,
        TerrainKind::Water,
        TerrainKind::Wall,
    ];

    /// Default movement cost for this terrain.
    pub const fn base_cost(self) -> MoveCost {
        match self {
            TerrainKind::Grass | TerrainKind::Road => MoveCost::Cost(1),
            TerrainKind::Forest => MoveCost::Cost(2),
            TerrainKind::Hills => MoveCost::Cost(3),
            TerrainKind::Water | TerrainKind::Wall => MoveCost::Impassable,
        }
    }
}

/// Immutable descriptor for a single map tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileProperties {
    passable: bool,
    cost: MoveCost,
    terrain: Option<TerrainKind>,
}

impl TileProperties {
    /// Passable, untagged tile with the given movement cost.
    pub const fn new(cost: u32) -> Self {
        Self {
            passable: true,
            cost: MoveCost::Cost(cost),
            terrain: None,
        }
    }

    /// Untagged tile nothing can enter or stand on.
    pub const fn impassable() -> Self {
        Self {
            passable: false,
            cost: MoveCost::Impassable,
            terrain: None,
        }
    }

    /// Tile using the terrain's default cost and passability.
    pub const fn from_terrain(terrain: TerrainKind) -> Self {
        let cost = terrain.base_cost();
        Self {
            passable: !cost.is_impassable(),
            cost,
            terrain: Some(terrain),
        }
    }

    pub const fn with_terrain(mut self, terrain: TerrainKind) -> Self {
        self.terrain = Some(terrain);
        self
    }

    pub const fn with_cost(mut self, cost: MoveCost) -> Self {
        self.cost = cost;
        self
    }

    /// True when the tile may be entered and host an actor.
    pub const fn is_passable(&self) -> bool {
        self.passable && !self.cost.is_impassable()
    }

    pub const fn cost(&self) -> MoveCost {
        self.cost
    }

    pub const fn terrain(&self) -> Option<TerrainKind> {
        self.terrain
    }
}

impl Default for TileProperties {
    fn default() -> Self {
        Self::from_terrain(TerrainKind::default())
    }
}

impl From<TerrainKind> for TileProperties {
    fn from(terrain: TerrainKind) -> Self {
        Self::from_terrain(terrain)
    }
}
