use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::WorldConfig;
use crate::sim::Simulation;

fn default_seed_population() -> bool {
    true
}

/// A YAML-described run: the world shape, the RNG seed, and how long to
/// simulate by default.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    pub seed: u64,
    #[serde(default)]
    pub ticks: Option<u64>,
    pub world: WorldConfig,
    #[serde(default = "default_seed_population")]
    pub seed_population: bool,
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(scenario)
    }
}

impl Scenario {
    /// Builds the simulation this scenario describes, seeding the demo
    /// population when requested.
    pub fn build_simulation(&self) -> Result<Simulation> {
        let mut sim = Simulation::new(self.world.clone(), self.seed)
            .with_context(|| format!("Invalid world config in scenario '{}'", self.name))?;
        if self.seed_population {
            sim.create_test_population();
        }
        Ok(sim)
    }

    pub fn ticks(&self, override_ticks: Option<u64>) -> u64 {
        override_ticks.or(self.ticks).unwrap_or(120)
    }
}
