use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::error::{ErrorSeverity, GameError};
use crate::state::{ActorId, Coordinate};

use super::TileProperties;

/// Neighbor candidates for a single cell; 8 is the octile maximum.
pub type Neighbors = ArrayVec<Coordinate, 8>;

/// Which adjacent cells count as one step.
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
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Adjacency {
    /// North, east, south, west.
    #[default]
    Cardinal,
    /// Cardinal directions followed by the four diagonals.
    Octile,
}

impl Adjacency {
    /// Step deltas in enumeration order: N, E, S, W, then NE, SE, SW, NW.
    const STEPS: [(i32, i32); 8] = [
        (0, -1),
        (1, 0),
        (0, 1),
        (-1, 0),
        (1, -1),
        (1, 1),
        (-1, 1),
        (-1, -1),
    ];

    pub fn steps(self) -> &'static [(i32, i32)] {
        match self {
            Adjacency::Cardinal => &Self::STEPS[..4],
            Adjacency::Octile => &Self::STEPS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MapError {
    #[error("{coordinate} is outside the {width}x{height} map")]
    OutOfBounds {
        coordinate: Coordinate,
        width: u32,
        height: u32,
    },

    #[error("{coordinate} is already occupied by actor {occupant}")]
    Occupied {
        coordinate: Coordinate,
        occupant: ActorId,
    },

    #[error("{coordinate} is impassable")]
    Impassable { coordinate: Coordinate },

    #[error("actor {actor} already stands at {at}")]
    AlreadyPlaced { actor: ActorId, at: Coordinate },

    #[error("no actor stands at {coordinate}")]
    Vacant { coordinate: Coordinate },

    #[error("actor {actor} is not on the map")]
    NotPlaced { actor: ActorId },

    #[error("{tiles} tiles cannot fill a {width}x{height} map")]
    InvalidDimensions { width: u32, height: u32, tiles: usize },

    #[error("occupancy index disagrees with position index for actor {actor}")]
    OccupancyMismatch { actor: ActorId },
}

impl GameError for MapError {
    fn severity(&self) -> ErrorSeverity {
        use MapError::*;
        match self {
            OutOfBounds { .. } | InvalidDimensions { .. } | OccupancyMismatch { .. } => {
                ErrorSeverity::Internal
            }
            Occupied { .. } | Impassable { .. } => ErrorSeverity::Recoverable,
            AlreadyPlaced { .. } | Vacant { .. } | NotPlaced { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use MapError::*;
        match self {
            OutOfBounds { .. } => "MAP_OUT_OF_BOUNDS",
            Occupied { .. } => "MAP_OCCUPIED",
            Impassable { .. } => "MAP_IMPASSABLE",
            AlreadyPlaced { .. } => "MAP_ALREADY_PLACED",
            Vacant { .. } => "MAP_VACANT",
            NotPlaced { .. } => "MAP_NOT_PLACED",
            InvalidDimensions { .. } => "MAP_INVALID_DIMENSIONS",
            OccupancyMismatch { .. } => "MAP_OCCUPANCY_MISMATCH",
        }
    }
}

/// Fixed-size tile grid plus actor occupancy.
///
/// Tiles are stored densely in row-major order. Actors are referenced by id
/// only: the roster that owns them lives elsewhere, and an actor's position is
/// always looked up here rather than stored on the actor.
///
/// # Invariants
///
/// - at most one actor per cell, and each actor on at most one cell
/// - no actor stands on an impassable tile
/// - `revision` changes on every tile or occupancy mutation
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GridMapData"))]
pub struct GridMap {
    width: u32,
    height: u32,
    tiles: Vec<TileProperties>,
    occupants: BTreeMap<Coordinate, ActorId>,
    positions: BTreeMap<ActorId, Coordinate>,
    revision: u64,
}

/// Unchecked wire form of [`GridMap`]; converted through [`GridMap::try_from`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridMapData {
    width: u32,
    height: u32,
    tiles: Vec<TileProperties>,
    occupants: BTreeMap<Coordinate, ActorId>,
    positions: BTreeMap<ActorId, Coordinate>,
    revision: u64,
}

#[cfg(feature = "serde")]
impl TryFrom<GridMapData> for GridMap {
    type Error = MapError;

    fn try_from(data: GridMapData) -> Result<Self, Self::Error> {
        let mut map = GridMap::from_tiles(data.width, data.height, data.tiles)?;

        for (&coordinate, &actor) in &data.occupants {
            if data.positions.get(&actor) != Some(&coordinate) {
                return Err(MapError::OccupancyMismatch { actor });
            }
            map.place_actor(actor, coordinate)?;
        }
        if let Some(&actor) = data
            .positions
            .keys()
            .find(|actor| map.position_of(**actor).is_none())
        {
            return Err(MapError::OccupancyMismatch { actor });
        }

        map.revision = data.revision;
        Ok(map)
    }
}

impl GridMap {
    /// Creates a map where every tile has the same properties.
    pub fn new(width: u32, height: u32, fill: TileProperties) -> Self {
        let count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            tiles: vec![fill; count],
            occupants: BTreeMap::new(),
            positions: BTreeMap::new(),
            revision: 0,
        }
    }

    /// Creates a map from row-major tile data.
    pub fn from_tiles(
        width: u32,
        height: u32,
        tiles: Vec<TileProperties>,
    ) -> Result<Self, MapError> {
        if tiles.len() != (width as usize) * (height as usize) {
            return Err(MapError::InvalidDimensions {
                width,
                height,
                tiles: tiles.len(),
            });
        }

        Ok(Self {
            width,
            height,
            tiles,
            occupants: BTreeMap::new(),
            positions: BTreeMap::new(),
            revision: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells in the map.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Mutation counter. Anything derived from the map, such as a
    /// reachability result, is only valid at the revision it was computed at.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        coordinate.column >= 0
            && coordinate.row >= 0
            && (coordinate.column as u32) < self.width
            && (coordinate.row as u32) < self.height
    }

    /// Row-major dense index of an in-bounds coordinate.
    pub(crate) fn index(&self, coordinate: Coordinate) -> Option<usize> {
        if !self.contains(coordinate) {
            return None;
        }
        Some(coordinate.row as usize * self.width as usize + coordinate.column as usize)
    }

    pub(crate) fn checked_index(&self, coordinate: Coordinate) -> Result<usize, MapError> {
        self.index(coordinate).ok_or(MapError::OutOfBounds {
            coordinate,
            width: self.width,
            height: self.height,
        })
    }

    pub fn tile_at(&self, coordinate: Coordinate) -> Result<&TileProperties, MapError> {
        let index = self.checked_index(coordinate)?;
        Ok(&self.tiles[index])
    }

    /// Replaces a tile. An occupied tile cannot be made impassable.
    pub fn set_tile(
        &mut self,
        coordinate: Coordinate,
        tile: TileProperties,
    ) -> Result<(), MapError> {
        let index = self.checked_index(coordinate)?;
        if !tile.is_passable() && self.occupants.contains_key(&coordinate) {
            return Err(MapError::Impassable { coordinate });
        }
        self.tiles[index] = tile;
        self.touch();
        Ok(())
    }

    pub fn actor_at(&self, coordinate: Coordinate) -> Option<ActorId> {
        self.occupants.get(&coordinate).copied()
    }

    pub fn position_of(&self, actor: ActorId) -> Option<Coordinate> {
        self.positions.get(&actor).copied()
    }

    /// Like [`GridMap::position_of`], but an absent actor is an error.
    pub fn require_position(&self, actor: ActorId) -> Result<Coordinate, MapError> {
        self.position_of(actor).ok_or(MapError::NotPlaced { actor })
    }

    pub fn is_occupied(&self, coordinate: Coordinate) -> bool {
        self.occupants.contains_key(&coordinate)
    }

    /// Occupied cells in row-major order.
    pub fn occupants(&self) -> impl Iterator<Item = (Coordinate, ActorId)> + '_ {
        self.occupants.iter().map(|(coordinate, actor)| (*coordinate, *actor))
    }

    /// Checks that `coordinate` could host a newly arriving actor.
    fn check_vacant(&self, coordinate: Coordinate) -> Result<(), MapError> {
        let tile = self.tile_at(coordinate)?;
        if let Some(occupant) = self.actor_at(coordinate) {
            return Err(MapError::Occupied {
                coordinate,
                occupant,
            });
        }
        if !tile.is_passable() {
            return Err(MapError::Impassable { coordinate });
        }
        Ok(())
    }

    pub fn place_actor(&mut self, actor: ActorId, coordinate: Coordinate) -> Result<(), MapError> {
        self.check_vacant(coordinate)?;
        if let Some(at) = self.position_of(actor) {
            return Err(MapError::AlreadyPlaced { actor, at });
        }

        self.occupants.insert(coordinate, actor);
        self.positions.insert(actor, coordinate);
        self.touch();
        Ok(())
    }

    /// Removes whichever actor stands at `coordinate`; no-op on an empty cell.
    pub fn remove_actor(&mut self, coordinate: Coordinate) -> Option<ActorId> {
        let actor = self.occupants.remove(&coordinate)?;
        self.positions.remove(&actor);
        self.touch();
        Some(actor)
    }

    /// Relocates the actor at `from` to `to`, returning its id.
    pub fn move_actor(&mut self, from: Coordinate, to: Coordinate) -> Result<ActorId, MapError> {
        self.tile_at(from)?;
        let actor = self
            .actor_at(from)
            .ok_or(MapError::Vacant { coordinate: from })?;
        if from == to {
            return Ok(actor);
        }
        self.check_vacant(to)?;

        self.occupants.remove(&from);
        self.occupants.insert(to, actor);
        self.positions.insert(actor, to);
        self.touch();
        Ok(actor)
    }

    /// In-bounds neighbors of `coordinate` in fixed enumeration order.
    pub fn neighbors(&self, coordinate: Coordinate, adjacency: Adjacency) -> Neighbors {
        adjacency
            .steps()
            .iter()
            .map(|&(dx, dy)| coordinate.offset(dx, dy))
            .filter(|neighbor| self.contains(*neighbor))
            .collect()
    }

    /// All coordinates in row-major order.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        let width = self.width as i32;
        (0..self.height as i32)
            .flat_map(move |row| (0..width).map(move |column| Coordinate::new(column, row)))
    }
}
