//! The simulation facade the presentation layer drives.
//!
//! One external driver calls [`Simulation::advance`] per step; everything —
//! clock update, history capture, organism growth/produce/decay — completes
//! before it returns. Nothing here suspends or runs concurrently.

use tracing::info;

use crate::clock::SimulationClock;
use crate::config::{ConfigError, WorldConfig};
use crate::grid::{Cell, ChunkStore};
use crate::history::HistoryArchive;
use crate::nature::{NatureRegistry, OrganismSummary};
use crate::rng::{self, SimRng};
use crate::terrain::{GenParams, TerrainField};

/// Where the map view is looking: a zoom center in global coordinates and
/// an odd zoom level counting the chunk window's edge length.
#[derive(Debug, Clone, Copy)]
struct ViewState {
    center_x: usize,
    center_y: usize,
    zoom: u32,
}

pub struct Simulation {
    config: WorldConfig,
    rng: SimRng,
    clock: SimulationClock,
    history: HistoryArchive,
    store: ChunkStore,
    nature: NatureRegistry,
    seeds: Vec<(usize, usize)>,
    view: ViewState,
}

impl Simulation {
    /// Validates the config, generates the terrain and assembles an idle
    /// world at year 0.
    pub fn new(config: WorldConfig, seed: u64) -> Result<Self, ConfigError> {
        let params = GenParams::from_config(&config)?;
        let mut rng = rng::seeded(seed);
        let (field, seeds) = TerrainField::generate(&params, &mut rng);
        let store = ChunkStore::new(field, config.chunk_size);
        let view = ViewState {
            center_x: config.width / 2,
            center_y: config.height / 2,
            zoom: 1,
        };
        Ok(Self {
            config,
            rng,
            clock: SimulationClock::new(),
            history: HistoryArchive::new(),
            store,
            nature: NatureRegistry::new(),
            seeds,
            view,
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn current_year(&self) -> u64 {
        self.clock.current_year()
    }

    pub fn history(&self) -> &HistoryArchive {
        &self.history
    }

    pub fn nature(&self) -> &NatureRegistry {
        &self.nature
    }

    pub fn nature_mut(&mut self) -> &mut NatureRegistry {
        &mut self.nature
    }

    pub fn chunks(&mut self) -> &mut ChunkStore {
        &mut self.store
    }

    pub fn terrain(&self) -> &TerrainField {
        self.store.terrain()
    }

    /// Landmass seed points accepted during generation.
    pub fn landmass_seeds(&self) -> &[(usize, usize)] {
        &self.seeds
    }

    /// Registers an external observer of year changes.
    pub fn on_tick(&mut self, listener: impl FnMut(u64) + 'static) {
        self.clock.on_tick(listener);
    }

    /// One simulation step: advance the year, archive a snapshot of the
    /// world for that year, then run every organism's growth/produce/decay
    /// cycle. Returns the new year.
    pub fn advance(&mut self) -> u64 {
        let year = self.clock.tick();
        self.history.save(year, self.store.capture_state(year));
        self.nature.tick_all(&mut self.rng);
        info!(year, organisms = self.nature.len(), "tick complete");
        year
    }

    /// Rewinds the clock to year 0 and drops all history. The generated
    /// terrain and the living organisms are kept.
    pub fn reset(&mut self) {
        self.history.clear();
        self.clock.reset();
    }

    /// Loads the archived terrain for `year` into the chunk store,
    /// invalidating every cached chunk. Returns false when no snapshot
    /// exists for that year; the caller decides what to fall back to.
    pub fn load_year(&mut self, year: u64) -> bool {
        match self.history.load(year) {
            Some(state) => {
                let terrain = state.terrain.clone();
                self.store.load(terrain);
                true
            }
            None => false,
        }
    }

    /// Points the view at a global coordinate.
    pub fn center_on(&mut self, x: usize, y: usize) {
        if x < self.config.width && y < self.config.height {
            self.view.center_x = x;
            self.view.center_y = y;
        }
    }

    /// Shifts the view by whole chunks. Returns false (and stays put) when
    /// the target chunk is out of bounds.
    pub fn move_chunk(&mut self, dx: i64, dy: i64) -> bool {
        let size = self.config.chunk_size;
        let chunk_x = (self.view.center_x / size) as i64 + dx;
        let chunk_y = (self.view.center_y / size) as i64 + dy;
        if chunk_x < 0
            || chunk_y < 0
            || chunk_x as usize >= self.store.chunks_wide()
            || chunk_y as usize >= self.store.chunks_high()
        {
            return false;
        }
        self.view.center_x = chunk_x as usize * size + size / 2;
        self.view.center_y = chunk_y as usize * size + size / 2;
        true
    }

    /// Sets the zoom window edge length in chunks. Only odd levels keep a
    /// well-defined center chunk; even values are rejected.
    pub fn set_zoom(&mut self, level: u32) -> bool {
        if level % 2 == 1 {
            self.view.zoom = level;
            true
        } else {
            false
        }
    }

    pub fn zoom(&self) -> u32 {
        self.view.zoom
    }

    /// Flat clone of every cell in the zoom window of chunks around the
    /// view center. Chunks falling outside the world are skipped.
    pub fn visible_cells(&mut self) -> Vec<Cell> {
        let size = self.config.chunk_size;
        let center_chunk_x = (self.view.center_x / size) as i64;
        let center_chunk_y = (self.view.center_y / size) as i64;
        let half = (self.view.zoom / 2) as i64;

        let mut cells = Vec::new();
        for offset_y in -half..=half {
            for offset_x in -half..=half {
                let chunk_x = center_chunk_x + offset_x;
                let chunk_y = center_chunk_y + offset_y;
                if chunk_x < 0 || chunk_y < 0 {
                    continue;
                }
                if let Some(chunk) = self
                    .store
                    .get_or_create_chunk(chunk_x as usize, chunk_y as usize)
                {
                    cells.extend(chunk.cells().cloned());
                }
            }
        }
        cells
    }

    /// Display records for every living organism.
    pub fn organisms(&self) -> Vec<OrganismSummary> {
        self.nature.summaries()
    }

    /// Seeds the fixed demo population.
    pub fn create_test_population(&mut self) {
        self.nature.create_test_population(&mut self.rng);
    }
}
