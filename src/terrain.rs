//! Terrain data model and the procedural generation passes.
//!
//! Generation runs three fixed passes over an all-saltwater grid: randomized
//! flood-fill landmass growth, inland water reclassification, then coastal
//! sand dressing. The order matters — the coastal pass reads the final
//! land/water partition and the inland pass must see it already settled.

use std::collections::{HashSet, VecDeque};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{ConfigError, WorldConfig};
use crate::rng::RngExt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainCategory {
    Land,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainSubtype {
    Soil,
    Sand,
    Saltwater,
    Freshwater,
}

/// One grid cell's terrain. Small and `Copy`; chunks carry copies of these
/// rather than borrows into the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainTile {
    pub category: TerrainCategory,
    pub subtype: TerrainSubtype,
    pub elevation: u32,
}

impl TerrainTile {
    pub fn saltwater() -> Self {
        Self {
            category: TerrainCategory::Water,
            subtype: TerrainSubtype::Saltwater,
            elevation: 0,
        }
    }

    pub fn soil() -> Self {
        Self {
            category: TerrainCategory::Land,
            subtype: TerrainSubtype::Soil,
            elevation: 0,
        }
    }

    pub fn is_land(&self) -> bool {
        self.category == TerrainCategory::Land
    }

    pub fn is_water(&self) -> bool {
        self.category == TerrainCategory::Water
    }

    /// Water pairs only with Saltwater/Freshwater, Land only with Soil/Sand.
    pub fn pairing_is_valid(&self) -> bool {
        match self.category {
            TerrainCategory::Water => matches!(
                self.subtype,
                TerrainSubtype::Saltwater | TerrainSubtype::Freshwater
            ),
            TerrainCategory::Land => {
                matches!(self.subtype, TerrainSubtype::Soil | TerrainSubtype::Sand)
            }
        }
    }
}

/// Rectangular terrain grid, row-major, mutated only during generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainField {
    width: usize,
    height: usize,
    tiles: Vec<TerrainTile>,
}

impl TerrainField {
    /// An all-saltwater field at elevation 0.
    pub fn water(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![TerrainTile::saltwater(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&TerrainTile> {
        if x < self.width && y < self.height {
            Some(&self.tiles[y * self.width + x])
        } else {
            None
        }
    }

    pub fn tiles(&self) -> impl Iterator<Item = &TerrainTile> {
        self.tiles.iter()
    }

    pub fn land_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_land()).count()
    }

    fn tile(&self, x: usize, y: usize) -> &TerrainTile {
        &self.tiles[y * self.width + x]
    }

    fn tile_mut(&mut self, x: usize, y: usize) -> &mut TerrainTile {
        &mut self.tiles[y * self.width + x]
    }

    fn neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        const DIRS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        DIRS.iter().filter_map(move |&(dx, dy)| {
            let nx = x.checked_add_signed(dx)?;
            let ny = y.checked_add_signed(dy)?;
            (nx < self.width && ny < self.height).then_some((nx, ny))
        })
    }

    /// Runs the full generation pipeline. Returns the field and the list of
    /// accepted landmass seed points. The output is a function of the RNG's
    /// draw sequence alone.
    pub fn generate(params: &GenParams, rng: &mut impl Rng) -> (Self, Vec<(usize, usize)>) {
        let mut field = Self::water(params.width, params.height);
        let seeds = field.seed_landmasses(params, rng);
        field.classify_inland_water();
        field.apply_coastal_sand(rng);
        info!(
            width = params.width,
            height = params.height,
            seeds = seeds.len(),
            land = field.land_count(),
            "terrain generated"
        );
        (field, seeds)
    }

    /// Places `seed_count` landmass seeds and flood-fill-grows each one.
    /// A seed is retried up to 100 times while it lands too close to
    /// existing land; exhausting retries skips that seed.
    fn seed_landmasses(&mut self, params: &GenParams, rng: &mut impl Rng) -> Vec<(usize, usize)> {
        let mut seeds = Vec::new();
        for _ in 0..params.seed_count {
            let mut attempts = 0;
            let (mut sx, mut sy);
            loop {
                sx = sample_margin(self.width, rng);
                sy = sample_margin(self.height, rng);
                attempts += 1;
                if !self.is_too_close_to_land(sx, sy, 5) || attempts >= 100 {
                    break;
                }
            }
            if attempts >= 100 {
                debug!(x = sx, y = sy, "seed placement exhausted retries, skipping");
                continue;
            }

            let budget = rng.gen_range(params.min_landmass..params.max_landmass);
            seeds.push((sx, sy));
            self.grow_landmass(sx, sy, budget, rng);
        }
        seeds
    }

    /// Square neighborhood scan of the given radius for any Land cell.
    fn is_too_close_to_land(&self, x: usize, y: usize, radius: isize) -> bool {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let Some(nx) = x.checked_add_signed(dx) else {
                    continue;
                };
                let Some(ny) = y.checked_add_signed(dy) else {
                    continue;
                };
                if let Some(tile) = self.get(nx, ny) {
                    if tile.is_land() {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Breadth-first growth from a seed. Each visited water cell becomes
    /// Land/Soil; neighbors are enqueued independently with probability 0.6
    /// so the landmass edge comes out ragged rather than diamond-shaped.
    fn grow_landmass(&mut self, start_x: usize, start_y: usize, max_tiles: usize, rng: &mut impl Rng) {
        let mut queue = VecDeque::new();
        let mut visited = HashSet::new();
        queue.push_back((start_x, start_y));
        visited.insert((start_x, start_y));

        let mut placed = 0;
        while let Some((x, y)) = queue.pop_front() {
            if placed >= max_tiles {
                break;
            }
            if self.tile(x, y).is_water() {
                *self.tile_mut(x, y) = TerrainTile::soil();
                placed += 1;
            }
            let neighbors: Vec<_> = self.neighbors(x, y).collect();
            for next in neighbors {
                if !visited.contains(&next) && rng.chance(0.6) {
                    visited.insert(next);
                    queue.push_back(next);
                }
            }
        }
    }

    /// Saltwater cells whose four axis neighbors are all land become
    /// freshwater. Single pass over the interior, no propagation.
    fn classify_inland_water(&mut self) {
        if self.width < 3 || self.height < 3 {
            return;
        }
        for y in 1..self.height - 1 {
            for x in 1..self.width - 1 {
                let cell = self.tile(x, y);
                if cell.is_water() && cell.subtype == TerrainSubtype::Saltwater {
                    let landlocked = self
                        .neighbors(x, y)
                        .all(|(nx, ny)| self.tile(nx, ny).is_land());
                    if landlocked {
                        self.tile_mut(x, y).subtype = TerrainSubtype::Freshwater;
                    }
                }
            }
        }
    }

    /// Land cells touching water become sand with a per-cell chance drawn
    /// fresh from [0.6, 0.8).
    fn apply_coastal_sand(&mut self, rng: &mut impl Rng) {
        if self.width < 3 || self.height < 3 {
            return;
        }
        for y in 1..self.height - 1 {
            for x in 1..self.width - 1 {
                let cell = self.tile(x, y);
                if cell.is_land() && cell.subtype != TerrainSubtype::Sand {
                    let coastal = self
                        .neighbors(x, y)
                        .any(|(nx, ny)| self.tile(nx, ny).is_water());
                    if coastal {
                        let threshold = 0.6 + rng.gen::<f64>() * 0.2;
                        if rng.chance(threshold) {
                            self.tile_mut(x, y).subtype = TerrainSubtype::Sand;
                        }
                    }
                }
            }
        }
    }
}

/// Seed coordinates avoid the outer tenth of each dimension so landmasses
/// do not start pressed against the map edge.
fn sample_margin(dim: usize, rng: &mut impl Rng) -> usize {
    let margin = dim / 10;
    if margin > 0 && dim > 2 * margin {
        rng.gen_range(margin..dim - margin)
    } else {
        rng.gen_range(0..dim)
    }
}

/// Inputs to terrain generation, derived from a [`WorldConfig`].
#[derive(Debug, Clone)]
pub struct GenParams {
    pub width: usize,
    pub height: usize,
    pub seed_count: usize,
    /// Tile budget bounds per landmass, half-open.
    pub min_landmass: usize,
    pub max_landmass: usize,
}

impl GenParams {
    /// Landmass budgets span `total/120 .. total/40` tiles; the seed count
    /// is however many average-sized landmasses it takes to reach the
    /// configured land ratio. A ratio of 0 places no seeds at all.
    pub fn from_config(config: &WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let total = config.width * config.height;
        let min_landmass = (total / 120).max(1);
        let max_landmass = (total / 40).max(min_landmass + 1);
        let mean = (min_landmass + max_landmass) as f64 / 2.0;
        let seed_count = (total as f64 * config.land_ratio / mean).round() as usize;
        Ok(Self {
            width: config.width,
            height: config.height,
            seed_count,
            min_landmass,
            max_landmass,
        })
    }
}
