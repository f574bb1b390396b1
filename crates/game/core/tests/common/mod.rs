#![allow(dead_code)]

use tactics_core::{Coordinate, GridMap, TerrainKind, TileProperties};

/// Routes `tracing` output to the test harness; `RUST_LOG=debug` to see it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn c(column: i32, row: i32) -> Coordinate {
    Coordinate::new(column, row)
}

/// Builds a map from rows of terrain glyphs.
///
/// `.` grass, `=` road, `f` forest, `h` hills, `~` water, `#` wall.
pub fn map_from_rows(rows: &[&str]) -> GridMap {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |row| row.len()) as u32;
    let mut map = GridMap::new(width, height, TileProperties::default());

    for (row, line) in rows.iter().enumerate() {
        for (column, glyph) in line.chars().enumerate() {
            let terrain = match glyph {
                '.' => TerrainKind::Grass,
                '=' => TerrainKind::Road,
                'f' => TerrainKind::Forest,
                'h' => TerrainKind::Hills,
                '~' => TerrainKind::Water,
                '#' => TerrainKind::Wall,
                other => panic!("unknown terrain glyph {other:?}"),
            };
            map.set_tile(
                c(column as i32, row as i32),
                TileProperties::from_terrain(terrain),
            )
            .unwrap();
        }
    }
    map
}
