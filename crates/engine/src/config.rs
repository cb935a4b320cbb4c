//! Environment configuration
//!
//! Defaults give a 20x10 board, bag randomizer, seed 1, centered spawns, no step
//! limit, and raw basic grouped features. [`EnvConfig::from_env`] overrides any of them from environment variables:
//!
//! | Variable | Values |
//! |----------|--------|
//! | `RL_TETRIS_HEIGHT` | rows, > 0 |
//! | `RL_TETRIS_WIDTH` | columns, > 0 |
//! | `RL_TETRIS_RANDOMIZER` | `bag` or `uniform` |
//! | `RL_TETRIS_SEED` | u64 |
//! | `RL_TETRIS_SPAWN` | `center` or `left` |
//! | `RL_TETRIS_MAX_STEPS` | steps before truncation |
//! | `RL_TETRIS_FEATURES` | `basic` or `advanced` (grouped feature vector) |
//! | `RL_TETRIS_NORMALIZE` | `true` to scale grouped features with the default maxima |

use std::env;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::core::{FeatureScale, GameConfig, RandomizerKind, SpawnPolicy};
use crate::types::{ADVANCED_FEATURE_DIM, FEATURE_DIM};

/// Which feature vector the grouped environment reports per placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeatureSet {
    /// `[lines_cleared, holes, bumpiness, total_height]`
    #[default]
    Basic,
    /// The basic four plus height statistics, weighted holes, and wells
    Advanced,
}

impl FeatureSet {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "basic" => Some(FeatureSet::Basic),
            "advanced" | "extended" => Some(FeatureSet::Advanced),
            _ => None,
        }
    }

    /// Length of one feature vector
    pub fn dim(self) -> usize {
        match self {
            FeatureSet::Basic => FEATURE_DIM,
            FeatureSet::Advanced => ADVANCED_FEATURE_DIM,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnvConfig {
    pub game: GameConfig,
    /// Episodes are truncated after this many steps
    pub max_steps: Option<u32>,
    pub features: FeatureSet,
    /// When set, grouped features are clipped into `[0, 1]` by these maxima
    pub feature_scale: Option<FeatureScale>,
}

impl EnvConfig {
    pub fn with_size(mut self, height: usize, width: usize) -> Self {
        self.game.height = height;
        self.game.width = width;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.game.seed = seed;
        self
    }

    pub fn with_randomizer(mut self, randomizer: RandomizerKind) -> Self {
        self.game.randomizer = randomizer;
        self
    }

    pub fn with_spawn(mut self, spawn: SpawnPolicy) -> Self {
        self.game.spawn = spawn;
        self
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn with_features(mut self, features: FeatureSet) -> Self {
        self.features = features;
        self
    }

    pub fn with_feature_scale(mut self, scale: FeatureScale) -> Self {
        self.feature_scale = Some(scale);
        self
    }

    /// Load configuration from `RL_TETRIS_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Missing or blank keys keep their defaults; present but unparsable values are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let mut config = Self::default();

        if let Some(v) = get("RL_TETRIS_HEIGHT") {
            config.game.height = parse_positive("RL_TETRIS_HEIGHT", &v)?;
        }
        if let Some(v) = get("RL_TETRIS_WIDTH") {
            config.game.width = parse_positive("RL_TETRIS_WIDTH", &v)?;
        }
        if let Some(v) = get("RL_TETRIS_RANDOMIZER") {
            config.game.randomizer = RandomizerKind::from_str(&v)
                .ok_or_else(|| anyhow!("RL_TETRIS_RANDOMIZER: unknown randomizer: {}", v))?;
        }
        if let Some(v) = get("RL_TETRIS_SEED") {
            config.game.seed = parse("RL_TETRIS_SEED", &v)?;
        }
        if let Some(v) = get("RL_TETRIS_SPAWN") {
            config.game.spawn = SpawnPolicy::from_str(&v)
                .ok_or_else(|| anyhow!("RL_TETRIS_SPAWN: unknown spawn policy: {}", v))?;
        }
        if let Some(v) = get("RL_TETRIS_MAX_STEPS") {
            config.max_steps = Some(parse("RL_TETRIS_MAX_STEPS", &v)?);
        }
        if let Some(v) = get("RL_TETRIS_FEATURES") {
            config.features = FeatureSet::from_str(&v)
                .ok_or_else(|| anyhow!("RL_TETRIS_FEATURES: unknown feature set: {}", v))?;
        }
        if let Some(v) = get("RL_TETRIS_NORMALIZE") {
            if parse::<bool>("RL_TETRIS_NORMALIZE", &v.to_lowercase())? {
                config.feature_scale = Some(FeatureScale::default());
            }
        }

        Ok(config)
    }
}

fn parse<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse::<T>()
        .with_context(|| format!("{}: invalid value: {}", key, value))
}

fn parse_positive(key: &str, value: &str) -> Result<usize> {
    let n: usize = parse(key, value)?;
    if n == 0 {
        return Err(anyhow!("{}: must be positive", key));
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = EnvConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, EnvConfig::default());
        assert_eq!(config.game.height, 20);
        assert_eq!(config.game.width, 10);
        assert_eq!(config.max_steps, None);
    }

    #[test]
    fn test_overrides() {
        let config = EnvConfig::from_lookup(lookup(&[
            ("RL_TETRIS_HEIGHT", "12"),
            ("RL_TETRIS_WIDTH", " 6 "),
            ("RL_TETRIS_RANDOMIZER", "uniform"),
            ("RL_TETRIS_SEED", "42"),
            ("RL_TETRIS_SPAWN", "left"),
            ("RL_TETRIS_MAX_STEPS", "500"),
            ("RL_TETRIS_FEATURES", "advanced"),
            ("RL_TETRIS_NORMALIZE", "True"),
        ]))
        .unwrap();
        let expected = EnvConfig::default()
            .with_size(12, 6)
            .with_randomizer(RandomizerKind::Uniform)
            .with_seed(42)
            .with_spawn(SpawnPolicy::Left)
            .with_max_steps(500)
            .with_features(FeatureSet::Advanced)
            .with_feature_scale(FeatureScale::default());
        assert_eq!(config, expected);
        assert_eq!(config.features.dim(), 10);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let err = EnvConfig::from_lookup(lookup(&[("RL_TETRIS_WIDTH", "0")])).unwrap_err();
        assert!(err.to_string().contains("RL_TETRIS_WIDTH"));

        let err = EnvConfig::from_lookup(lookup(&[("RL_TETRIS_SEED", "abc")])).unwrap_err();
        assert!(err.to_string().contains("RL_TETRIS_SEED"));

        assert!(EnvConfig::from_lookup(lookup(&[("RL_TETRIS_RANDOMIZER", "nes")])).is_err());
        assert!(EnvConfig::from_lookup(lookup(&[("RL_TETRIS_NORMALIZE", "maybe")])).is_err());
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let _ = EnvConfig::from_env();
    }
}
