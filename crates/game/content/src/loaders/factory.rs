//! Content factory for building battles from data files.

use std::path::{Path, PathBuf};

use tactics_core::{Battle, EngineConfig, GridMap};

use crate::loaders::{ConfigLoader, LoadResult, MapLoader, Scenario, ScenarioLoader};

/// Content factory that loads battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml        (optional)
/// ├── maps/
/// │   └── meadow.ron
/// └── scenarios/
///     └── skirmish.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load engine configuration from `config.toml`, or the defaults when the
    /// file does not exist.
    pub fn load_config(&self) -> LoadResult<EngineConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(EngineConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load a map from `maps/{map_name}.ron`.
    pub fn load_map(&self, map_name: &str) -> LoadResult<GridMap> {
        let path = self.data_dir.join("maps").join(format!("{}.ron", map_name));
        MapLoader::load(&path)
    }

    /// Load a scenario from `scenarios/{scenario_name}.ron`.
    pub fn load_scenario(&self, scenario_name: &str) -> LoadResult<Scenario> {
        let path = self
            .data_dir
            .join("scenarios")
            .join(format!("{}.ron", scenario_name));
        ScenarioLoader::load(&path)
    }

    /// Load config, scenario and its map, and set up the battle.
    pub fn load_battle(&self, scenario_name: &str) -> LoadResult<Battle> {
        let config = self.load_config()?;
        let scenario = self.load_scenario(scenario_name)?;
        let map = self.load_map(&scenario.map)?;
        scenario.build_battle(map, config)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_scenario_reports_path() {
        let factory = ContentFactory::new("/nonexistent/data");
        let err = factory.load_scenario("skirmish").unwrap_err();
        assert!(err.to_string().contains("skirmish.ron"));
    }
}
