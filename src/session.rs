//! Generation sessions.
//!
//! A [`Session`] owns a registry together with the parameters its samples
//! are drawn with, and advances the sample index after every draw.

use anyhow::{Context, Result};
use arbitrary_core::{GenConfig, GenError, GenParams, GenValue, TypeShape};
use arbitrary_generator::{Arbitraries, Arbitrary};
use std::path::Path;
use tracing::info;

/// Environment variable overriding the configured seed.
pub const SEED_ENV_VAR: &str = "ARBITRARIES_SEED";

/// A registry plus the parameters samples are drawn with.
#[derive(Debug)]
pub struct Session {
    arbitraries: Arbitraries,
    params: GenParams,
}

impl Session {
    /// Create a session with the default registry and the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            arbitraries: Arbitraries::new(),
            params: GenParams::new(seed),
        }
    }

    /// Create a session from configuration.
    ///
    /// The seed is taken from `ARBITRARIES_SEED` when set, then from the
    /// configuration, and is random otherwise.
    pub fn from_config(config: GenConfig) -> Result<Self> {
        let seed = resolve_seed(config.seed, std::env::var(SEED_ENV_VAR).ok())?;
        let arbitraries =
            Arbitraries::from_config(&config).context("Failed to build generator registry")?;
        let params = GenParams::new(seed).with_size(config.min_size, config.max_size);

        info!(
            seed,
            generators = config.generators.len(),
            "Created generation session"
        );

        Ok(Self {
            arbitraries,
            params,
        })
    }

    /// Load configuration from a YAML file and create a session from it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config = GenConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?;
        Self::from_config(config)
    }

    pub fn seed(&self) -> u64 {
        self.params.seed()
    }

    pub fn arbitraries(&self) -> &Arbitraries {
        &self.arbitraries
    }

    pub fn arbitraries_mut(&mut self) -> &mut Arbitraries {
        &mut self.arbitraries
    }

    pub fn params_mut(&mut self) -> &mut GenParams {
        &mut self.params
    }

    /// Sample a value of type `T`.
    pub fn sample<T: Arbitrary>(&mut self) -> Result<T, GenError> {
        let value = self.arbitraries.sample(&mut self.params);
        self.params.index += 1;
        value
    }

    /// Sample a value of `shape`.
    pub fn sample_shape(&mut self, shape: &TypeShape) -> Result<GenValue, GenError> {
        let value = self
            .arbitraries
            .gen_for_shape(shape)
            .sample(&mut self.params)
            .retrieve();
        self.params.index += 1;
        value
    }
}

/// Pick the session seed: an override wins over the configured seed, and
/// a random seed is used when neither is present.
fn resolve_seed(configured: Option<u64>, env_override: Option<String>) -> Result<u64> {
    if let Some(raw) = env_override {
        return raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {SEED_ENV_VAR} value: {raw}"));
    }
    Ok(configured.unwrap_or_else(rand::random))
}
