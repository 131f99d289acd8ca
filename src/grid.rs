//! Lazy chunked view over a terrain field.
//!
//! Chunks are derived, cached data: they can be rebuilt at any time from the
//! backing [`TerrainField`] plus fresh vegetation/mineral slots, and the
//! cache is dropped wholesale whenever a new field is loaded.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::history::WorldState;
use crate::terrain::{TerrainField, TerrainTile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VegetationKind {
    Grass,
    Flower,
    Bush,
    Tree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MineralKind {
    Rock,
    Ore,
    Gemstone,
    Stone,
    Gravel,
}

/// A slot that can evolve over time: what occupies it now, what it is
/// turning into, and how long it has been since the last change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evolvable<T> {
    pub current: Option<T>,
    pub next: Option<T>,
    pub ticks_since_change: u32,
    pub life_expectancy: Option<u32>,
}

impl<T> Default for Evolvable<T> {
    fn default() -> Self {
        Self {
            current: None,
            next: None,
            ticks_since_change: 0,
            life_expectancy: None,
        }
    }
}

pub type VegetationSlot = Evolvable<VegetationKind>;
pub type MineralSlot = Evolvable<MineralKind>;

/// One materialized grid cell: global position, a copy of its terrain
/// entry, and independently evolvable vegetation and mineral slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    pub terrain: TerrainTile,
    pub vegetation: VegetationSlot,
    pub mineral: MineralSlot,
}

impl Cell {
    fn new(x: usize, y: usize, terrain: TerrainTile) -> Self {
        Self {
            x,
            y,
            terrain,
            vegetation: VegetationSlot::default(),
            mineral: MineralSlot::default(),
        }
    }
}

/// Fixed-size square of cells. Slots that fall outside the terrain field
/// (edge chunks of a non-divisible map) stay `None`.
#[derive(Debug, Clone)]
pub struct Chunk {
    chunk_x: usize,
    chunk_y: usize,
    size: usize,
    cells: Vec<Option<Cell>>,
}

impl Chunk {
    pub fn coords(&self) -> (usize, usize) {
        (self.chunk_x, self.chunk_y)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, local_x: usize, local_y: usize) -> Option<&Cell> {
        if local_x < self.size && local_y < self.size {
            self.cells[local_y * self.size + local_x].as_ref()
        } else {
            None
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter_map(|c| c.as_ref())
    }
}

/// Wraps a terrain field and carves it lazily into cached chunks.
pub struct ChunkStore {
    terrain: TerrainField,
    chunk_size: usize,
    chunks_wide: usize,
    chunks_high: usize,
    cache: HashMap<(usize, usize), Chunk>,
}

impl ChunkStore {
    pub fn new(terrain: TerrainField, chunk_size: usize) -> Self {
        let chunks_wide = terrain.width().div_ceil(chunk_size);
        let chunks_high = terrain.height().div_ceil(chunk_size);
        Self {
            terrain,
            chunk_size,
            chunks_wide,
            chunks_high,
            cache: HashMap::new(),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunks_wide(&self) -> usize {
        self.chunks_wide
    }

    pub fn chunks_high(&self) -> usize {
        self.chunks_high
    }

    pub fn terrain(&self) -> &TerrainField {
        &self.terrain
    }

    pub fn chunk_in_bounds(&self, chunk_x: usize, chunk_y: usize) -> bool {
        chunk_x < self.chunks_wide && chunk_y < self.chunks_high
    }

    /// Returns the cached chunk, materializing it from the terrain field on
    /// first access. `None` for out-of-bounds chunk coordinates. Repeated
    /// calls return the same cached instance.
    pub fn get_or_create_chunk(&mut self, chunk_x: usize, chunk_y: usize) -> Option<&Chunk> {
        if !self.chunk_in_bounds(chunk_x, chunk_y) {
            return None;
        }
        let terrain = &self.terrain;
        let size = self.chunk_size;
        let chunk = self.cache.entry((chunk_x, chunk_y)).or_insert_with(|| {
            let mut cells = Vec::with_capacity(size * size);
            for local_y in 0..size {
                for local_x in 0..size {
                    let x = chunk_x * size + local_x;
                    let y = chunk_y * size + local_y;
                    cells.push(terrain.get(x, y).map(|tile| Cell::new(x, y, *tile)));
                }
            }
            debug!(chunk_x, chunk_y, "chunk materialized");
            Chunk {
                chunk_x,
                chunk_y,
                size,
                cells,
            }
        });
        Some(chunk)
    }

    /// Looks up a single cell by global coordinates via integer division
    /// and modulo by the chunk size.
    pub fn get_cell(&mut self, global_x: usize, global_y: usize) -> Option<&Cell> {
        let chunk_x = global_x / self.chunk_size;
        let chunk_y = global_y / self.chunk_size;
        let local_x = global_x % self.chunk_size;
        let local_y = global_y % self.chunk_size;
        self.get_or_create_chunk(chunk_x, chunk_y)?.get(local_x, local_y)
    }

    /// Deep, independent copy of the backing terrain.
    pub fn snapshot(&self) -> TerrainField {
        self.terrain.clone()
    }

    /// Assembles a year-tagged world state: a terrain copy plus the
    /// vegetation/mineral arrays as currently materialized (cells never
    /// touched by a chunk report default slots).
    pub fn capture_state(&self, year: u64) -> WorldState {
        let width = self.terrain.width();
        let height = self.terrain.height();
        let mut vegetation = vec![VegetationSlot::default(); width * height];
        let mut minerals = vec![MineralSlot::default(); width * height];
        for chunk in self.cache.values() {
            for cell in chunk.cells() {
                let idx = cell.y * width + cell.x;
                vegetation[idx] = cell.vegetation;
                minerals[idx] = cell.mineral;
            }
        }
        WorldState::new(year, self.terrain.clone(), vegetation, minerals)
    }

    /// Replaces the backing terrain and drops every cached chunk, so stale
    /// chunks referencing the old field are never served again.
    pub fn load(&mut self, terrain: TerrainField) {
        self.chunks_wide = terrain.width().div_ceil(self.chunk_size);
        self.chunks_high = terrain.height().div_ceil(self.chunk_size);
        self.terrain = terrain;
        self.cache.clear();
    }

    pub fn cached_chunk_count(&self) -> usize {
        self.cache.len()
    }
}
