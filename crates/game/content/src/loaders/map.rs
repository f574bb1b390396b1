//! Map data loader.
//!
//! Loads terrain data from map RON files. Actor placement is handled
//! separately via scenario files.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::{Coordinate, GridMap, TerrainKind, TileProperties};

use crate::loaders::{LoadResult, read_file};

/// Map data structure for RON files (terrain only).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MapDataRon {
    dimensions: (u32, u32),
    #[serde(default)]
    default_terrain: TerrainKind,
    #[serde(default)]
    tiles: Vec<(i32, i32, TerrainKind)>, // (x, y, terrain)
}

/// Loader for map data from RON files.
pub struct MapLoader;

impl MapLoader {
    /// Load a map from a RON file.
    ///
    /// Every cell starts as `default_terrain` (grass when omitted); entries in
    /// `tiles` override single cells.
    pub fn load(path: &Path) -> LoadResult<GridMap> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a map from RON text.
    pub fn parse(content: &str) -> LoadResult<GridMap> {
        let data: MapDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;

        let (width, height) = data.dimensions;
        if width == 0 || height == 0 {
            anyhow::bail!("Map dimensions must be non-zero, got {}x{}", width, height);
        }

        let mut map = GridMap::new(
            width,
            height,
            TileProperties::from_terrain(data.default_terrain),
        );

        for (x, y, terrain) in data.tiles {
            map.set_tile(Coordinate::new(x, y), TileProperties::from_terrain(terrain))
                .map_err(|e| anyhow::anyhow!("Invalid tile ({}, {}): {}", x, y, e))?;
        }

        Ok(map)
    }
}
