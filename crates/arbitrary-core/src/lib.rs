//! Core types for the arbitraries generator registry.
//!
//! This crate provides the foundational types shared by the generator
//! crate and the session facade:
//!
//! - [`TypeShape`] - Type identity used as the registry key
//! - [`GenValue`] - Values produced by generators
//! - [`GenParams`] - Size controls and the seeded RNG handed to generators
//! - [`GenResult`] - Labeled outcome of a single generator invocation
//! - [`GenConfig`] - Session configuration loaded from YAML
//!
//! # Architecture
//!
//! ```text
//! arbitrary-core (this crate)
//!    │
//!    └─── arbitrary-generator  (Gen, synthesizer, Arbitraries registry)
//!             │
//!             └─── arbitraries (Session facade, test tooling)
//! ```
//!
//! # Example
//!
//! ```rust
//! use arbitrary_core::{GenValue, TypeShape};
//!
//! let shape = TypeShape::sequence(TypeShape::Int32);
//! let value = GenValue::Array(vec![GenValue::Int(1), GenValue::Int(-7)]);
//!
//! assert!(value.conforms_to(&shape));
//! assert_eq!(shape.to_string(), "sequence<int32>");
//! ```

pub mod config;
pub mod error;
pub mod params;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use config::{ConfigError, GenConfig, GeneratorConfig, RegisteredGenerator, SynthesisBounds};
pub use error::GenError;
pub use params::GenParams;
pub use types::{FieldShape, TypeShape};
pub use values::{parse_timestamp, GenResult, GenValue};
