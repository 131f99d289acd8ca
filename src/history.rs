//! Year-keyed archive of immutable world-state snapshots.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::grid::{MineralSlot, VegetationSlot};
use crate::terrain::TerrainField;

/// Immutable capture of the world at one simulation year: the terrain plus
/// flat row-major vegetation and mineral arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    pub year: u64,
    pub terrain: TerrainField,
    pub vegetation: Vec<VegetationSlot>,
    pub minerals: Vec<MineralSlot>,
}

impl WorldState {
    pub fn new(
        year: u64,
        terrain: TerrainField,
        vegetation: Vec<VegetationSlot>,
        minerals: Vec<MineralSlot>,
    ) -> Self {
        Self {
            year,
            terrain,
            vegetation,
            minerals,
        }
    }
}

/// Stores snapshots per year for arbitrary-year playback.
///
/// There is no size bound or eviction: the archive grows until [`clear`]
/// is called. A consumer running indefinitely must clear periodically or
/// accept unbounded growth.
///
/// [`clear`]: HistoryArchive::clear
#[derive(Default)]
pub struct HistoryArchive {
    snapshots: HashMap<u64, WorldState>,
}

impl HistoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the snapshot for `year`, overwriting any existing one.
    pub fn save(&mut self, year: u64, state: WorldState) {
        self.snapshots.insert(year, state);
    }

    pub fn load(&self, year: u64) -> Option<&WorldState> {
        self.snapshots.get(&year)
    }

    pub fn has(&self, year: u64) -> bool {
        self.snapshots.contains_key(&year)
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
