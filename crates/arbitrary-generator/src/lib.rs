//! Generator registry and structural synthesis for arbitrary values.
//!
//! This crate provides [`Arbitraries`], a registry mapping a [`TypeShape`]
//! to the [`Gen`] that produces values of that shape. Resolving a shape
//! that has no registration synthesizes a generator from the shape's kind,
//! resolving child shapes through the registry again.
//!
//! # Architecture
//!
//! ```text
//!  register_gen / register_for::<T>
//!        │
//!        ▼
//! ┌──────────────────────────┐
//! │       Arbitraries        │
//! │                          │
//! │  HashMap<TypeShape, Gen> │──── miss ───▶ Synthesizer
//! └────────────┬─────────────┘                 │
//!              │ hit                           │ children resolved
//!              ▼                               ▼ through the registry
//!             Gen ◀────────────────────────────┘
//!              │
//!              ▼  sample(&mut GenParams)
//!   GenResult { result_shape, labels, value }
//! ```
//!
//! # Example
//!
//! ```rust
//! use arbitrary_core::{GenParams, TypeShape};
//! use arbitrary_generator::{generators::numeric::int_range, Arbitraries, Gen};
//!
//! let mut arbitraries = Arbitraries::new();
//! let ages = int_range(TypeShape::UInt8, 18, 80);
//! arbitraries.register_gen(ages.clone());
//!
//! assert!(Gen::ptr_eq(&arbitraries.gen_for::<u8>(), &ages));
//!
//! let mut params = GenParams::new(42);
//! let sample: Vec<u8> = arbitraries.sample(&mut params).unwrap();
//! assert!(sample.iter().all(|age| (18..=80).contains(age)));
//! ```
//!
//! # Configured generators
//!
//! The following generator types can be declared in configuration:
//!
//! - `uuid_v4` - Random UUID v4
//! - `sequential` - Sequential integers from the sample index
//! - `pattern` - Pattern strings with placeholders (`{index}`, `{uuid}`, `{rand:N}`)
//! - `int_range` - Random integers in a range
//! - `float_range` - Random floats in a range
//! - `timestamp_range` - Random timestamps in a date range
//! - `timestamp_now` - The current time
//! - `weighted_bool` - Boolean with configurable true probability
//! - `one_of` - Random selection from a list
//! - `sample_array` - Array of random samples from a pool
//! - `static` - Static value
//! - `null` - Null value

pub mod arbitrary;
pub mod gen;
pub mod generators;
pub mod registry;
pub mod synthesize;

// Re-exports for convenience
pub use arbitrary::Arbitrary;
pub use gen::Gen;
pub use registry::{default_generators, Arbitraries};
pub use synthesize::Synthesizer;
