//! Application Configuration
//!
//! User-configured team modules and runner settings stored in TOML format.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::planner::TeamModule;

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HallConfig {
    /// Runner settings
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Configured team modules, in search order
    #[serde(default)]
    pub team_modules: Vec<TeamModule>,
}

/// Runner settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Number of missions in the hall
    pub mission_count: u32,
    /// Stars awarded by a fully cleared mission
    pub stars_per_mission: u32,
    /// Character-count cap used by the search's support/affinity pruning
    /// bound
    pub projection_cap: u32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            mission_count: 10,
            stars_per_mission: 3,
            projection_cap: 8,
        }
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<HallConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: HallConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &HallConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
