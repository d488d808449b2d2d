//! Session configuration for the arbitraries registry.
//!
//! A configuration file seeds a generation session, pins the bounds used by
//! structural synthesis, and declares generators to register up front.
//!
//! ```yaml
//! version: 1
//! seed: 42
//! max_size: 20
//! synthesis:
//!   max_collection_length: 10
//! generators:
//!   - type: int32
//!     generator:
//!       type: int_range
//!       min: 18
//!       max: 80
//! ```

use crate::types::TypeShape;
use crate::values::parse_timestamp;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading config file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Configuration parsed but is not usable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// ============================================================================
// Synthesis Bounds
// ============================================================================

fn default_max_depth() -> usize {
    4
}

fn default_max_collection_length() -> usize {
    32
}

fn default_max_text_length() -> usize {
    64
}

fn default_none_probability() -> f64 {
    0.5
}

fn default_float_bound() -> f64 {
    1e9
}

/// Bounds used when a generator is synthesized from a shape.
///
/// Sizes drawn from [`GenParams`](crate::GenParams) are additionally capped
/// by these limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisBounds {
    /// Nesting depth past which collections are empty and optionals null
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Cap on sequence lengths and map entry counts
    #[serde(default = "default_max_collection_length")]
    pub max_collection_length: usize,

    /// Cap on text lengths, in characters
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,

    /// Probability that an optional value is null
    #[serde(default = "default_none_probability")]
    pub none_probability: f64,

    /// Floats are drawn from `[-float_bound, float_bound]`
    #[serde(default = "default_float_bound")]
    pub float_bound: f64,
}

impl Default for SynthesisBounds {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_collection_length: default_max_collection_length(),
            max_text_length: default_max_text_length(),
            none_probability: default_none_probability(),
            float_bound: default_float_bound(),
        }
    }
}

impl SynthesisBounds {
    /// Validate the bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.none_probability) {
            return Err(ConfigError::Invalid(format!(
                "none_probability must be within [0, 1], got {}",
                self.none_probability
            )));
        }
        if !(2.0 * self.float_bound).is_finite() || self.float_bound < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "float_bound must be non-negative and at most f64::MAX / 2, got {}",
                self.float_bound
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Generator Configuration
// ============================================================================

/// Generator configuration for a registered type.
///
/// This enum defines the value generators that can be declared in a
/// configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeneratorConfig {
    /// Generate UUIDs (v4)
    UuidV4,

    /// Generate sequential integers from the sample index
    Sequential {
        /// Starting value
        #[serde(default)]
        start: i64,
    },

    /// Generate values using a pattern with placeholders
    Pattern {
        /// Pattern string (supports {index}, {uuid}, {rand:N})
        pattern: String,
    },

    /// Generate random integers in a range
    IntRange {
        /// Minimum value (inclusive)
        min: i64,
        /// Maximum value (inclusive)
        max: i64,
    },

    /// Generate random floats in a range
    FloatRange {
        /// Minimum value (inclusive)
        min: f64,
        /// Maximum value (inclusive)
        max: f64,
    },

    /// Generate timestamps in a range
    TimestampRange {
        /// Start timestamp (ISO 8601)
        start: String,
        /// End timestamp (ISO 8601)
        end: String,
    },

    /// Generate the current timestamp at generation time
    ///
    /// Note: This is NOT deterministic - each generation produces a different value.
    TimestampNow,

    /// Generate weighted boolean values
    WeightedBool {
        /// Weight for true value (0.0 to 1.0)
        true_weight: f64,
    },

    /// Generate random selection from a pool of values
    OneOf {
        /// Pool of values to select from
        values: Vec<serde_yaml::Value>,
    },

    /// Generate arrays by sampling from a pool
    SampleArray {
        /// Pool of values to sample from
        pool: Vec<String>,
        /// Minimum array length
        #[serde(default)]
        min_length: usize,
        /// Maximum array length
        max_length: usize,
    },

    /// Generate a static value
    Static {
        /// The static value to use
        value: serde_yaml::Value,
    },

    /// Generate null values (for optional types)
    Null,
}

impl GeneratorConfig {
    /// Name of the generator as written in configuration.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::UuidV4 => "uuid_v4",
            Self::Sequential { .. } => "sequential",
            Self::Pattern { .. } => "pattern",
            Self::IntRange { .. } => "int_range",
            Self::FloatRange { .. } => "float_range",
            Self::TimestampRange { .. } => "timestamp_range",
            Self::TimestampNow => "timestamp_now",
            Self::WeightedBool { .. } => "weighted_bool",
            Self::OneOf { .. } => "one_of",
            Self::SampleArray { .. } => "sample_array",
            Self::Static { .. } => "static",
            Self::Null => "null",
        }
    }

    /// Check whether this generator can produce values of `shape`.
    ///
    /// Optional shapes accept whatever their inner shape accepts. `one_of`
    /// and `static` accept any shape here; their values are checked when the
    /// generator is built.
    pub fn supports(&self, shape: &TypeShape) -> bool {
        let mut target = shape;
        while let TypeShape::Optional { inner } = target {
            target = inner;
        }
        match self {
            Self::UuidV4 => matches!(target, TypeShape::Uuid | TypeShape::Text),
            Self::Sequential { .. } | Self::IntRange { .. } => target.is_numeric(),
            Self::Pattern { .. } => matches!(target, TypeShape::Text),
            Self::FloatRange { .. } => matches!(target, TypeShape::Float32 | TypeShape::Float64),
            Self::TimestampRange { .. } | Self::TimestampNow => {
                matches!(target, TypeShape::Timestamp | TypeShape::Text)
            }
            Self::WeightedBool { .. } => matches!(target, TypeShape::Bool),
            Self::SampleArray { .. } => matches!(target, TypeShape::Sequence { .. }),
            Self::OneOf { .. } | Self::Static { .. } => true,
            Self::Null => matches!(shape, TypeShape::Optional { .. }),
        }
    }

    /// Validate this generator against the shape it is registered for.
    pub fn validate(&self, shape: &TypeShape) -> Result<(), ConfigError> {
        if !self.supports(shape) {
            return Err(ConfigError::Invalid(format!(
                "{} generator cannot produce values of type {shape}",
                self.kind_name()
            )));
        }

        let mut target = shape;
        while let TypeShape::Optional { inner } = target {
            target = inner;
        }

        match self {
            Self::IntRange { min, max } if min > max => Err(ConfigError::Invalid(format!(
                "int_range for {shape}: min {min} is greater than max {max}"
            ))),
            Self::IntRange { min, max } => check_integer_bounds(target, *min, *max),
            Self::Sequential { start } => check_integer_bounds(target, *start, *start),
            Self::FloatRange { min, max } if !(min <= max) => Err(ConfigError::Invalid(
                format!("float_range for {shape}: min {min} is greater than max {max}"),
            )),
            Self::FloatRange { min, max }
                if *target == TypeShape::Float32
                    && (min.abs() > f32::MAX as f64 || max.abs() > f32::MAX as f64) =>
            {
                Err(ConfigError::Invalid(format!(
                    "float_range {min}..={max} does not fit type {shape}"
                )))
            }
            Self::TimestampRange { start, end } => {
                match (parse_timestamp(start), parse_timestamp(end)) {
                    (Some(from), Some(to)) if from <= to => Ok(()),
                    (Some(_), Some(_)) => Err(ConfigError::Invalid(format!(
                        "timestamp_range for {shape}: start {start} is after end {end}"
                    ))),
                    _ => Err(ConfigError::Invalid(format!(
                        "timestamp_range for {shape}: cannot parse {start}..{end}"
                    ))),
                }
            }
            Self::WeightedBool { true_weight } if !(0.0..=1.0).contains(true_weight) => {
                Err(ConfigError::Invalid(format!(
                    "weighted_bool for {shape}: true_weight must be within [0, 1], got {true_weight}"
                )))
            }
            Self::OneOf { values } if values.is_empty() => Err(ConfigError::Invalid(format!(
                "one_of for {shape}: values must not be empty"
            ))),
            Self::SampleArray {
                min_length,
                max_length,
                ..
            } if min_length > max_length => Err(ConfigError::Invalid(format!(
                "sample_array for {shape}: min_length {min_length} is greater than max_length {max_length}"
            ))),
            _ => Ok(()),
        }
    }
}

/// Integer bounds must fit the integer shape they are registered for.
fn check_integer_bounds(shape: &TypeShape, min: i64, max: i64) -> Result<(), ConfigError> {
    let fits = if let Some((lo, hi)) = shape.signed_bounds() {
        lo <= min && max <= hi
    } else if let Some((_, hi)) = shape.unsigned_bounds() {
        min >= 0 && max as u64 <= hi
    } else {
        true
    };
    if fits {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "integer range {min}..={max} does not fit type {shape}"
        )))
    }
}

/// A generator declared in configuration, keyed by the type it produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredGenerator {
    /// Type the generator produces
    #[serde(rename = "type")]
    pub shape: TypeShape,

    /// Generator configuration for this type
    pub generator: GeneratorConfig,
}

// ============================================================================
// Session Configuration
// ============================================================================

fn default_version() -> u32 {
    1
}

fn default_max_size() -> usize {
    crate::params::DEFAULT_MAX_SIZE
}

/// Full session configuration.
///
/// Loaded from a YAML file; drives registry construction and the
/// generation parameters of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenConfig {
    /// Config version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Seed for the session RNG
    #[serde(default)]
    pub seed: Option<u64>,

    /// Lower bound for generated sizes
    #[serde(default)]
    pub min_size: usize,

    /// Upper bound for generated sizes
    #[serde(default = "default_max_size")]
    pub max_size: usize,

    /// Bounds for structural synthesis
    #[serde(default)]
    pub synthesis: SynthesisBounds,

    /// Generators registered at session start, applied in order
    #[serde(default)]
    pub generators: Vec<RegisteredGenerator>,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            seed: None,
            min_size: 0,
            max_size: default_max_size(),
            synthesis: SynthesisBounds::default(),
            generators: Vec::new(),
        }
    }
}

impl GenConfig {
    /// Load config from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: GenConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate sizes, synthesis bounds and every declared generator.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_size > self.max_size {
            return Err(ConfigError::Invalid(format!(
                "min_size {} is greater than max_size {}",
                self.min_size, self.max_size
            )));
        }
        self.synthesis.validate()?;
        for registered in &self.generators {
            registered.generator.validate(&registered.shape)?;
        }
        Ok(())
    }
}
