//! CLI configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use club_tournament::draw::DrawRandomizer;
use club_tournament::groups::{MAX_GROUP_SIZE, MIN_GROUP_SIZE};

/// Defaults for draw commands, loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Desired group size for `capacities` and `groups`
    pub group_size: usize,
    /// Seed count for `seed`
    pub num_seeds: usize,
    /// Fixed RNG seed; `None` draws from OS entropy
    pub rng_seed: Option<u64>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            group_size: 4,
            num_seeds: 0,
            rng_seed: None,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `rng_seed_override` - Optional RNG seed override (from CLI args)
    ///
    /// # Returns
    ///
    /// * `Result<CliConfig, ConfigError>` - Loaded configuration or error
    ///
    /// # Errors
    ///
    /// Returns error if `CT_RNG_SEED` is set but not a `u64`, or if a loaded
    /// value fails [`CliConfig::validate`]
    pub fn from_env(rng_seed_override: Option<u64>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok(), rng_seed_override)
    }

    /// Same as [`CliConfig::from_env`] with a custom variable source
    pub fn from_lookup<F>(lookup: F, rng_seed_override: Option<u64>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let rng_seed = match rng_seed_override {
            Some(seed) => Some(seed),
            None => lookup("CT_RNG_SEED")
                .map(|raw| {
                    raw.trim().parse().map_err(|_| ConfigError::Invalid {
                        var: "CT_RNG_SEED".to_string(),
                        reason: format!("Expected an unsigned 64-bit integer, got '{raw}'"),
                    })
                })
                .transpose()?,
        };

        let config = CliConfig {
            group_size: parse_env_or(&lookup, "CT_GROUP_SIZE", defaults.group_size),
            num_seeds: parse_env_or(&lookup, "CT_NUM_SEEDS", defaults.num_seeds),
            rng_seed,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_GROUP_SIZE..=MAX_GROUP_SIZE).contains(&self.group_size) {
            return Err(ConfigError::Invalid {
                var: "CT_GROUP_SIZE".to_string(),
                reason: format!(
                    "Must be between {MIN_GROUP_SIZE} and {MAX_GROUP_SIZE}, got {}",
                    self.group_size
                ),
            });
        }

        if self.num_seeds != 0 && (self.num_seeds < 2 || !self.num_seeds.is_power_of_two()) {
            return Err(ConfigError::Invalid {
                var: "CT_NUM_SEEDS".to_string(),
                reason: format!("Must be 0 or a power of two from 2 up, got {}", self.num_seeds),
            });
        }

        Ok(())
    }

    /// Random source for draws, seeded when a seed is configured
    pub fn randomizer(&self) -> DrawRandomizer {
        self.rng_seed
            .map_or_else(DrawRandomizer::new, DrawRandomizer::from_seed)
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)], seed: Option<u64>) -> Result<CliConfig, ConfigError> {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CliConfig::from_lookup(|key| env.get(key).cloned(), seed)
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = load(&[], None).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_reads_environment() {
        let config = load(
            &[
                ("CT_GROUP_SIZE", "6"),
                ("CT_NUM_SEEDS", "4"),
                ("CT_RNG_SEED", " 99 "),
            ],
            None,
        )
        .unwrap();
        assert_eq!(config.group_size, 6);
        assert_eq!(config.num_seeds, 4);
        assert_eq!(config.rng_seed, Some(99));
    }

    #[test]
    fn test_flag_overrides_environment_seed() {
        let config = load(&[("CT_RNG_SEED", "1")], Some(7)).unwrap();
        assert_eq!(config.rng_seed, Some(7));
    }

    #[test]
    fn test_unparsable_numbers_fall_back() {
        let config = load(&[("CT_GROUP_SIZE", "big")], None).unwrap();
        assert_eq!(config.group_size, 4);
    }

    #[test]
    fn test_bad_seed_is_an_error() {
        let err = load(&[("CT_RNG_SEED", "-3")], None).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("CT_RNG_SEED"));
        assert!(msg.contains("-3"));
    }

    #[test]
    fn test_config_validation_group_size() {
        let err = load(&[("CT_GROUP_SIZE", "13")], None).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref var, .. } if var == "CT_GROUP_SIZE"));

        let config = CliConfig {
            group_size: 2,
            ..CliConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_odd_seeds() {
        let config = CliConfig {
            num_seeds: 3,
            ..CliConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_seeded_randomizer_is_reproducible() {
        let config = CliConfig {
            rng_seed: Some(5),
            ..CliConfig::default()
        };
        let mut a = config.randomizer();
        let mut b = config.randomizer();
        assert_eq!(a.sample_indices(50, 10), b.sample_indices(50, 10));
    }
}
