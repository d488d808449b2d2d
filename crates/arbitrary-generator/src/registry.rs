//! The typed generator registry.
//!
//! [`Arbitraries`] maps a [`TypeShape`] to the [`Gen`] registered for it.
//! Resolving a shape returns the exact registration when one exists and
//! otherwise synthesizes a generator from the shape's kind.

use crate::arbitrary::Arbitrary;
use crate::gen::Gen;
use crate::generators::{self, composite, timestamp};
use crate::synthesize::Synthesizer;
use arbitrary_core::{ConfigError, GenConfig, GenError, GenParams, TypeShape};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Generators every fresh registry starts with: timestamps over the widest
/// calendar range and their optional form.
pub fn default_generators() -> Vec<Gen> {
    let timestamps = timestamp::any_timestamp();
    let optional = composite::optional_of(timestamps.clone(), 0.5);
    vec![timestamps, optional]
}

/// Registry of generators keyed by the shape they produce.
///
/// Resolution takes `&self` and registration `&mut self`, so a registry
/// shared across threads needs an outer lock for registration.
#[derive(Debug, Clone)]
pub struct Arbitraries {
    generators: HashMap<TypeShape, Gen>,
    synthesizer: Synthesizer,
}

impl Default for Arbitraries {
    fn default() -> Self {
        Self::new()
    }
}

impl Arbitraries {
    /// Create a registry holding [`default_generators`] and the default
    /// synthesizer.
    pub fn new() -> Self {
        Self::with_generators(default_generators(), Synthesizer::default())
    }

    /// Create a registry from an explicit initial table.
    ///
    /// Later entries replace earlier ones with the same shape.
    pub fn with_generators(
        defaults: impl IntoIterator<Item = Gen>,
        synthesizer: Synthesizer,
    ) -> Self {
        let mut arbitraries = Self {
            generators: HashMap::new(),
            synthesizer,
        };
        for gen in defaults {
            arbitraries.register_gen(gen);
        }
        arbitraries
    }

    /// Create a registry from configuration.
    ///
    /// The defaults are registered first, then every configured generator
    /// in order, so configuration overrides the defaults.
    pub fn from_config(config: &GenConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut arbitraries = Self::with_generators(
            default_generators(),
            Synthesizer::new(config.synthesis.clone()),
        );
        for registered in &config.generators {
            arbitraries.register_gen(generators::from_config(
                &registered.generator,
                &registered.shape,
            )?);
        }
        Ok(arbitraries)
    }

    /// Resolve the generator for `shape`.
    ///
    /// Returns the registered instance when there is one, otherwise a
    /// synthesized generator. Never fails; a synthesized generator for an
    /// unsupported kind fails when sampled instead.
    pub fn gen_for_shape(&self, shape: &TypeShape) -> Gen {
        self.registered(shape)
            .unwrap_or_else(|| self.synthesizer.synthesize_for_kind(shape, self))
    }

    /// Resolve the generator for `T`.
    pub fn gen_for<T: Arbitrary>(&self) -> Gen {
        self.gen_for_shape(&T::shape())
    }

    /// The registered generator for `shape`, if any.
    pub(crate) fn registered(&self, shape: &TypeShape) -> Option<Gen> {
        let gen = self.generators.get(shape)?;
        trace!(%shape, "Resolved registered generator");
        Some(gen.clone())
    }

    /// Register `gen` under the shape it produces, replacing any earlier
    /// registration for that shape.
    pub fn register_gen(&mut self, gen: Gen) {
        let shape = gen.result_shape().clone();
        match self.generators.insert(shape.clone(), gen) {
            Some(_) => debug!(%shape, "Replaced generator"),
            None => debug!(%shape, "Registered generator"),
        }
    }

    /// Register a sampling function for `T`.
    pub fn register_for<T, F>(&mut self, sample: F)
    where
        T: Arbitrary,
        F: Fn(&mut GenParams) -> T + Send + Sync + 'static,
    {
        self.register_gen(Gen::from_fn(T::shape(), move |params| {
            Ok(sample(params).into_value())
        }));
    }

    pub fn contains(&self, shape: &TypeShape) -> bool {
        self.generators.contains_key(shape)
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Shapes with a registered generator, in no particular order.
    pub fn shapes(&self) -> impl Iterator<Item = &TypeShape> {
        self.generators.keys()
    }

    pub fn synthesizer(&self) -> &Synthesizer {
        &self.synthesizer
    }

    /// Resolve, sample and convert a value of type `T`.
    pub fn sample<T: Arbitrary>(&self, params: &mut GenParams) -> Result<T, GenError> {
        let value = self.gen_for::<T>().sample(params).retrieve()?;
        T::from_value(value)
    }
}
