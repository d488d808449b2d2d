//! Arbitraries
//!
//! A typed registry of random value generators for property-based testing.
//!
//! # Features
//!
//! - Exact registrations: a generator registered for a type is returned as-is
//! - Structural fallback: unregistered types get a generator derived from their shape
//! - Deterministic sampling: the same seed yields the same values
//! - YAML configuration: seed, size bounds, synthesis bounds and declared generators
//!
//! # Crates
//!
//! - `arbitrary_core` - Type shapes, generated values, parameters, configuration
//! - `arbitrary_generator` - The `Arbitraries` registry, synthesizer and building blocks
//!
//! # Usage
//!
//! ```rust
//! use arbitraries::Session;
//!
//! let mut session = Session::new(42);
//! session.arbitraries_mut().register_for::<u8, _>(|_| 21);
//!
//! let ages: Vec<u8> = session.sample().unwrap();
//! assert!(ages.iter().all(|age| *age == 21));
//! ```
//!
//! The seed of a session loaded from configuration can be overridden with the
//! `ARBITRARIES_SEED` environment variable.

pub mod session;
pub mod testing;

pub use arbitrary_core::{
    ConfigError, FieldShape, GenConfig, GenError, GenParams, GenResult, GenValue,
    GeneratorConfig, SynthesisBounds, TypeShape,
};
pub use arbitrary_generator::{generators, Arbitraries, Arbitrary, Gen, Synthesizer};
pub use session::Session;
