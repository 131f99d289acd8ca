//! Perishable sub-resources spawned by producer-capable organisms.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::TickRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProduceKind {
    Blossom,
    Fruit,
    Fungi,
    Nut,
}

impl ProduceKind {
    /// Decay-age band the item's lifespan is drawn from at construction.
    pub fn decay_range(self) -> TickRange {
        match self {
            ProduceKind::Blossom => TickRange::unchecked(2, 5),
            ProduceKind::Fruit => TickRange::unchecked(3, 8),
            ProduceKind::Fungi => TickRange::unchecked(8, 25),
            ProduceKind::Nut => TickRange::unchecked(10, 20),
        }
    }
}

impl fmt::Display for ProduceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProduceKind::Blossom => "Blossom",
            ProduceKind::Fruit => "Fruit",
            ProduceKind::Fungi => "Fungi",
            ProduceKind::Nut => "Nut",
        };
        f.write_str(name)
    }
}

/// One produce item. Belongs to exactly one organism; removed once its age
/// reaches the decay age drawn at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Produce {
    pub kind: ProduceKind,
    pub age: u32,
    pub decay_age: u32,
}

impl Produce {
    /// Fallback band for produce constructed without a kind-tuned range.
    pub const DEFAULT_DECAY: TickRange = TickRange::unchecked(5, 15);

    pub fn new(kind: ProduceKind, rng: &mut impl Rng) -> Self {
        Self::with_decay_range(kind, kind.decay_range(), rng)
    }

    pub fn with_decay_range(kind: ProduceKind, range: TickRange, rng: &mut impl Rng) -> Self {
        Self {
            kind,
            age: 0,
            decay_age: range.sample(rng),
        }
    }

    pub fn expired(&self) -> bool {
        self.age >= self.decay_age
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;

    #[test]
    fn decay_age_stays_inside_the_kind_band() {
        let mut rng = seeded(9);
        for _ in 0..200 {
            let item = Produce::new(ProduceKind::Fungi, &mut rng);
            assert!((8..25).contains(&item.decay_age));
        }
    }

    #[test]
    fn fresh_produce_is_not_expired() {
        let mut rng = seeded(9);
        let item = Produce::new(ProduceKind::Blossom, &mut rng);
        assert_eq!(item.age, 0);
        assert!(!item.expired());
    }
}
