//! Organisms and their forward-only growth/produce life cycle.
//!
//! An organism walks the stage order Plant → Young → Grown → Aged → Old →
//! Dead → None, one probabilistic transition per tick at most, each gated
//! on a minimum fraction of its lifespan. Producer-capable kinds carry a
//! composed [`Production`] component that spawns and decays produce items
//! while the organism is in a fruiting stage.

mod produce;
pub mod registry;

pub use produce::{Produce, ProduceKind};
pub use registry::{NatureRegistry, OrganismSummary};

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TickRange;
use crate::rng::RngExt;

/// Default per-kind ceiling on simultaneously active produce items.
pub const DEFAULT_PRODUCE_CAP: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    Plant,
    Young,
    Grown,
    Aged,
    Old,
    Dead,
    /// Terminal: the organism is gone and will be purged from the registry.
    None,
}

impl Stage {
    /// The deterministic next candidate in the forward order.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Plant => Some(Stage::Young),
            Stage::Young => Some(Stage::Grown),
            Stage::Grown => Some(Stage::Aged),
            Stage::Aged => Some(Stage::Old),
            Stage::Old => Some(Stage::Dead),
            Stage::Dead => Some(Stage::None),
            Stage::None => None,
        }
    }

    /// Minimum fraction of lifespan an organism must have reached before
    /// it can advance *into* this stage. Entry into `None` is ungated.
    pub fn min_lifespan_fraction(self) -> Option<f64> {
        match self {
            Stage::Young => Some(0.10),
            Stage::Grown => Some(0.30),
            Stage::Aged => Some(0.50),
            Stage::Old => Some(0.75),
            Stage::Dead => Some(0.90),
            Stage::Plant | Stage::None => None,
        }
    }

    /// (min, max) chance band for leaving this stage, interpolated over the
    /// age fraction. Plant's band decreases with age; that asymmetry is
    /// deliberate and preserved from the source behavior.
    fn advance_band(self) -> Option<(f64, f64)> {
        match self {
            Stage::Plant => Some((0.50, 0.20)),
            Stage::Young => Some((0.10, 0.35)),
            Stage::Grown => Some((0.08, 0.30)),
            Stage::Aged => Some((0.05, 0.15)),
            Stage::Old => Some((0.02, 0.10)),
            Stage::Dead => Some((0.10, 0.40)),
            Stage::None => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Plant => "Plant",
            Stage::Young => "Young",
            Stage::Grown => "Grown",
            Stage::Aged => "Aged",
            Stage::Old => "Old",
            Stage::Dead => "Dead",
            Stage::None => "None",
        };
        f.write_str(name)
    }
}

/// Entry in an organism's growth history. `Produced` marks a produce
/// spawn or decay event; it is never a resting stage, which this type
/// makes unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryMark {
    Stage(Stage),
    Produced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NatureKind {
    Grass,
    Flower,
    Bush,
    Vine,
    Fern,
    Moss,
    Cactus,
    Mycelium,
    Tree,
}

impl NatureKind {
    /// Lifespan band, half-open, sampled once at construction.
    pub fn lifespan_range(self) -> TickRange {
        match self {
            NatureKind::Grass => TickRange::unchecked(1, 20),
            NatureKind::Flower => TickRange::unchecked(3, 7),
            NatureKind::Bush => TickRange::unchecked(10, 50),
            NatureKind::Vine => TickRange::unchecked(5, 50),
            NatureKind::Fern => TickRange::unchecked(5, 100),
            NatureKind::Moss => TickRange::unchecked(10, 100),
            NatureKind::Cactus => TickRange::unchecked(10, 200),
            NatureKind::Mycelium => TickRange::unchecked(10, 1000),
            NatureKind::Tree => TickRange::unchecked(270, 330),
        }
    }

    pub fn supports_produce(self) -> bool {
        matches!(
            self,
            NatureKind::Bush | NatureKind::Cactus | NatureKind::Mycelium | NatureKind::Tree
        )
    }
}

impl fmt::Display for NatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NatureKind::Grass => "Grass",
            NatureKind::Flower => "Flower",
            NatureKind::Bush => "Bush",
            NatureKind::Vine => "Vine",
            NatureKind::Fern => "Fern",
            NatureKind::Moss => "Moss",
            NatureKind::Cactus => "Cactus",
            NatureKind::Mycelium => "Mycelium",
            NatureKind::Tree => "Tree",
        };
        f.write_str(name)
    }
}

/// A life event, kept as data; the presentation layer decides whether and
/// how to surface the message text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NatureEvent {
    Planted { age: u32 },
    Grew { from: Stage, to: Stage, age: u32 },
    Produced { kind: ProduceKind, age: u32 },
    Decayed { kind: ProduceKind, age: u32 },
}

impl NatureEvent {
    pub fn describe(&self, name: &str) -> String {
        match self {
            NatureEvent::Planted { age } => format!("{name} was planted at age {age}."),
            NatureEvent::Grew { from, to, age } => {
                format!("{name} grew {from} to {to} at age {age}.")
            }
            NatureEvent::Produced { kind, age } => {
                format!("{name} produced {} at age {age}", lowercase(*kind))
            }
            NatureEvent::Decayed { kind, age } => {
                format!("{name}'s {} decayed at age {age}", lowercase(*kind))
            }
        }
    }
}

fn lowercase(kind: ProduceKind) -> String {
    kind.to_string().to_lowercase()
}

/// Production capability, composed onto producer kinds: the produce kinds
/// the organism supports, the per-kind cap and the live items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Production {
    supported: Vec<ProduceKind>,
    cap: usize,
    items: Vec<Produce>,
}

impl Production {
    fn new(supported: Vec<ProduceKind>) -> Self {
        Self {
            supported,
            cap: DEFAULT_PRODUCE_CAP,
            items: Vec::new(),
        }
    }

    pub fn supported(&self) -> &[ProduceKind] {
        &self.supported
    }

    pub fn items(&self) -> &[Produce] {
        &self.items
    }

    fn count(&self, kind: ProduceKind) -> usize {
        self.items.iter().filter(|p| p.kind == kind).count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organism {
    name: String,
    kind: NatureKind,
    age: u32,
    lifespan: u32,
    stage: Stage,
    history: Vec<(u32, HistoryMark)>,
    events: Vec<NatureEvent>,
    production: Option<Production>,
}

impl Organism {
    /// A plain organism of the given kind, lifespan drawn from the kind's
    /// band. Producer-capable kinds get an empty production component.
    pub fn new(name: impl Into<String>, kind: NatureKind, rng: &mut impl Rng) -> Self {
        Self::with_produce(name, kind, Vec::new(), rng)
    }

    /// An organism that spawns the given produce kinds. The list is ignored
    /// for kinds that do not support production.
    pub fn with_produce(
        name: impl Into<String>,
        kind: NatureKind,
        produce: Vec<ProduceKind>,
        rng: &mut impl Rng,
    ) -> Self {
        let lifespan = kind.lifespan_range().sample(rng);
        Self {
            name: name.into(),
            kind,
            age: 0,
            lifespan,
            stage: Stage::Plant,
            history: vec![(0, HistoryMark::Stage(Stage::Plant))],
            events: vec![NatureEvent::Planted { age: 0 }],
            production: kind.supports_produce().then(|| Production::new(produce)),
        }
    }

    /// Override the drawn lifespan. Intended for tests and demos.
    pub fn with_lifespan(mut self, lifespan: u32) -> Self {
        self.lifespan = lifespan;
        self
    }

    /// Override the starting age. Intended for tests and demos.
    pub fn with_age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    /// Override the per-kind produce cap. No effect on non-producers.
    pub fn with_produce_cap(mut self, cap: usize) -> Self {
        if let Some(production) = self.production.as_mut() {
            production.cap = cap;
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NatureKind {
        self.kind
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn lifespan(&self) -> u32 {
        self.lifespan
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn history(&self) -> &[(u32, HistoryMark)] {
        &self.history
    }

    pub fn events(&self) -> &[NatureEvent] {
        &self.events
    }

    pub fn event_messages(&self) -> Vec<String> {
        self.events.iter().map(|e| e.describe(&self.name)).collect()
    }

    pub fn production(&self) -> Option<&Production> {
        self.production.as_ref()
    }

    pub fn produce_count(&self, kind: ProduceKind) -> usize {
        self.production.as_ref().map_or(0, |p| p.count(kind))
    }

    /// Display string in the shape "Fruits (3 / 10), Nuts (0 / 10)", or
    /// "None" while nothing is active.
    pub fn produce_summary(&self) -> String {
        let Some(production) = &self.production else {
            return "None".to_string();
        };
        if production.items.is_empty() {
            return "None".to_string();
        }
        production
            .supported
            .iter()
            .map(|kind| format!("{}s ({} / {})", kind, production.count(*kind), production.cap))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// True once the registry should purge this organism.
    pub fn expired(&self) -> bool {
        self.age >= self.lifespan || self.stage == Stage::None
    }

    pub(crate) fn increment_age(&mut self) {
        self.age += 1;
    }

    /// Capped age fraction the chance interpolation runs over.
    fn age_factor(&self) -> f64 {
        if self.lifespan == 0 {
            return 0.0;
        }
        (self.age as f64 / self.lifespan as f64).min(1.0)
    }

    /// Evaluates at most one forward transition: age gate first, then a
    /// roll against the interpolated stage chance.
    pub(crate) fn attempt_growth(&mut self, rng: &mut impl Rng) {
        let Some(candidate) = self.stage.next() else {
            return;
        };
        if let Some(fraction) = candidate.min_lifespan_fraction() {
            let required = (self.lifespan as f64 * fraction).ceil() as u32;
            if self.age < required {
                return;
            }
        }
        let Some((min_chance, max_chance)) = self.stage.advance_band() else {
            return;
        };
        let chance = min_chance + (max_chance - min_chance) * self.age_factor();
        if rng.gen::<f64>() <= chance {
            let from = self.stage;
            self.stage = candidate;
            self.history.push((self.age, HistoryMark::Stage(candidate)));
            self.events.push(NatureEvent::Grew {
                from,
                to: candidate,
                age: self.age,
            });
            debug!(name = %self.name, %from, to = %candidate, age = self.age, "stage advanced");
        }
    }

    /// Runs the produce spawn check (only in fruiting stages) and then ages
    /// and decays every active item. No-op for non-producers.
    pub(crate) fn tick_production(&mut self, rng: &mut impl Rng) {
        let Some(production) = self.production.as_mut() else {
            return;
        };

        if matches!(self.stage, Stage::Grown | Stage::Aged | Stage::Old) {
            for i in 0..production.supported.len() {
                let kind = production.supported[i];
                if production.count(kind) >= production.cap {
                    continue;
                }
                if rng.chance(0.4) {
                    production.items.push(Produce::new(kind, rng));
                    self.history.push((self.age, HistoryMark::Produced));
                    self.events.push(NatureEvent::Produced {
                        kind,
                        age: self.age,
                    });
                }
            }
        }

        let mut i = 0;
        while i < production.items.len() {
            production.items[i].age += 1;
            if production.items[i].expired() {
                let kind = production.items[i].kind;
                production.items.remove(i);
                self.history.push((self.age, HistoryMark::Produced));
                self.events.push(NatureEvent::Decayed {
                    kind,
                    age: self.age,
                });
            } else {
                i += 1;
            }
        }
    }
}
