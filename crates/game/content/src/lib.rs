//! Data-driven battle content and loaders.
//!
//! This crate reads the files a battle is set up from:
//! - Engine configuration (data-driven via TOML)
//! - Map terrain (data-driven via RON)
//! - Scenarios: which actors fight, with which stats, where (RON)
//!
//! Everything is converted straight into `tactics-core` types; nothing here
//! takes part in the rules once the battle is built.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ActorSpec, ConfigLoader, ContentFactory, LoadResult, MapLoader, Scenario, ScenarioLoader,
};
