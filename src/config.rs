use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("map dimensions must be positive, got {width}x{height}")]
    EmptyMap { width: usize, height: usize },

    #[error("chunk size must be positive")]
    ZeroChunkSize,

    #[error("land ratio {0} is outside [0.0, 1.0]")]
    LandRatioOutOfRange(f64),

    #[error("{context}: minimum {min} must be below maximum {max}")]
    EmptyRange {
        context: &'static str,
        min: u32,
        max: u32,
    },
}

/// Half-open `[min, max)` range of ticks, used for lifespans and decay ages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRange {
    pub min: u32,
    pub max: u32,
}

impl TickRange {
    pub fn new(context: &'static str, min: u32, max: u32) -> Result<Self, ConfigError> {
        if min >= max {
            return Err(ConfigError::EmptyRange { context, min, max });
        }
        Ok(Self { min, max })
    }

    /// For compile-time kind tables whose literals are known to be valid.
    pub(crate) const fn unchecked(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn sample(&self, rng: &mut impl rand::Rng) -> u32 {
        rng.gen_range(self.min..self.max)
    }
}

/// Static shape of the world: grid dimensions, chunk size and how much of
/// the grid the terrain generator should turn into land.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    pub width: usize,
    pub height: usize,
    pub chunk_size: usize,
    pub land_ratio: f64,
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyMap {
                width: self.width,
                height: self.height,
            });
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if !(0.0..=1.0).contains(&self.land_ratio) || self.land_ratio.is_nan() {
            return Err(ConfigError::LandRatioOutOfRange(self.land_ratio));
        }
        Ok(())
    }

    /// Number of chunk columns, counting a trailing partial chunk.
    pub fn chunks_wide(&self) -> usize {
        self.width.div_ceil(self.chunk_size)
    }

    /// Number of chunk rows, counting a trailing partial chunk.
    pub fn chunks_high(&self) -> usize {
        self.height.div_ceil(self.chunk_size)
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 441,
            height: 441,
            chunk_size: 21,
            land_ratio: 0.3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = WorldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chunks_wide(), 21);
        assert_eq!(config.chunks_high(), 21);
    }

    #[test]
    fn partial_chunks_are_counted() {
        let config = WorldConfig {
            width: 50,
            height: 30,
            chunk_size: 21,
            land_ratio: 0.2,
        };
        assert_eq!(config.chunks_wide(), 3);
        assert_eq!(config.chunks_high(), 2);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let zero_dim = WorldConfig {
            width: 0,
            ..WorldConfig::default()
        };
        assert!(matches!(
            zero_dim.validate(),
            Err(ConfigError::EmptyMap { .. })
        ));

        let zero_chunk = WorldConfig {
            chunk_size: 0,
            ..WorldConfig::default()
        };
        assert!(matches!(
            zero_chunk.validate(),
            Err(ConfigError::ZeroChunkSize)
        ));

        let bad_ratio = WorldConfig {
            land_ratio: 1.5,
            ..WorldConfig::default()
        };
        assert!(matches!(
            bad_ratio.validate(),
            Err(ConfigError::LandRatioOutOfRange(_))
        ));
    }

    #[test]
    fn empty_tick_range_is_rejected() {
        assert!(TickRange::new("lifespan", 5, 5).is_err());
        assert!(TickRange::new("lifespan", 7, 3).is_err());
        assert!(TickRange::new("lifespan", 3, 7).is_ok());
    }
}
