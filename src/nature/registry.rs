//! Ownership and per-tick driving of the living organisms.

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use super::{NatureKind, Organism, ProduceKind};

/// Display-oriented record for one organism, consumed by the presentation
/// layer after each tick.
#[derive(Debug, Clone, Serialize)]
pub struct OrganismSummary {
    pub name: String,
    pub kind: String,
    pub produce: String,
    pub age: u32,
    pub lifespan: u32,
    pub stage: String,
    pub log: Vec<String>,
}

/// Owns the set of living organisms and runs their full per-tick cycle.
#[derive(Default)]
pub struct NatureRegistry {
    organisms: Vec<Organism>,
}

impl NatureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, organism: Organism) {
        self.organisms.push(organism);
    }

    pub fn len(&self) -> usize {
        self.organisms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.organisms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Organism> {
        self.organisms.iter()
    }

    pub fn find(&self, name: &str) -> Option<&Organism> {
        self.organisms.iter().find(|o| o.name() == name)
    }

    /// One simulation step for every organism: age, growth attempt, produce
    /// spawn and decay, then purge. An organism that expires this tick
    /// still gets its full processing before removal.
    pub fn tick_all(&mut self, rng: &mut impl Rng) {
        self.organisms.retain_mut(|organism| {
            organism.increment_age();
            organism.attempt_growth(rng);
            organism.tick_production(rng);
            let keep = !organism.expired();
            if !keep {
                debug!(
                    name = %organism.name(),
                    age = organism.age(),
                    stage = %organism.stage(),
                    "organism removed"
                );
            }
            keep
        });
    }

    pub fn summaries(&self) -> Vec<OrganismSummary> {
        self.organisms
            .iter()
            .map(|o| OrganismSummary {
                name: o.name().to_string(),
                kind: o.kind().to_string(),
                produce: o.produce_summary(),
                age: o.age(),
                lifespan: o.lifespan(),
                stage: o.stage().to_string(),
                log: o.event_messages(),
            })
            .collect()
    }

    /// Seeds the fixed illustrative population used by demos. Not part of
    /// the simulation's own logic.
    pub fn create_test_population(&mut self, rng: &mut impl Rng) {
        use NatureKind::*;
        use ProduceKind::*;

        let fixtures: Vec<Organism> = vec![
            Organism::with_produce("Berry bush", Bush, vec![Blossom, Fruit], rng),
            Organism::with_produce("Flower bush", Bush, vec![Blossom], rng),
            Organism::with_produce("Cactus", Cactus, vec![Blossom, Fruit], rng),
            Organism::new("Fern", Fern, rng),
            Organism::new("Red flower", Flower, rng),
            Organism::new("Yellow flower", Flower, rng),
            Organism::new("Green flower", Flower, rng),
            Organism::new("Short grass", Grass, rng),
            Organism::new("Tall grass", Grass, rng),
            Organism::new("Moss", Moss, rng),
            Organism::with_produce("Mycelium", Mycelium, vec![Fungi], rng),
            Organism::new("Oak tree", Tree, rng),
            Organism::with_produce("Apple tree", Tree, vec![Fruit], rng),
            Organism::with_produce("Hazel tree", Tree, vec![Nut], rng),
            Organism::with_produce("Hybrid tree", Tree, vec![Fruit, Nut], rng),
            Organism::new("Vine", Vine, rng),
        ];
        for organism in fixtures {
            self.add(organism);
        }
    }
}
