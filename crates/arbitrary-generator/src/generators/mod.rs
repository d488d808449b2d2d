//! Building-block generators for each kind of value.
//!
//! This module also turns a [`GeneratorConfig`] from a configuration file
//! into a [`Gen`] registered for a declared shape.

pub mod collection;
pub mod composite;
pub mod numeric;
pub mod static_value;
pub mod text;
pub mod timestamp;
pub mod uuid;

use crate::gen::Gen;
use arbitrary_core::{ConfigError, GenError, GenValue, GeneratorConfig, TypeShape};

/// Build a generator from its configuration.
///
/// Every value is coerced to `shape`, and the returned generator declares
/// `shape` as its result shape, so registering it keys it under `shape`.
/// Configured values that cannot be coerced to `shape` are rejected here;
/// generated values that still do not conform fail with a type mismatch.
pub fn from_config(config: &GeneratorConfig, shape: &TypeShape) -> Result<Gen, ConfigError> {
    config.validate(shape)?;

    let inner = match config {
        GeneratorConfig::UuidV4 => uuid::uuid_v4(),

        GeneratorConfig::Sequential { start } => {
            let start = *start;
            Gen::from_fn(TypeShape::Int64, move |params| {
                Ok(GenValue::Int(start.wrapping_add(params.index as i64)))
            })
        }

        GeneratorConfig::Pattern { pattern } => text::pattern(pattern.clone()),

        GeneratorConfig::IntRange { min, max } => numeric::int_range(TypeShape::Int64, *min, *max),

        GeneratorConfig::FloatRange { min, max } => {
            numeric::float_range(TypeShape::Float64, *min, *max)
        }

        GeneratorConfig::TimestampRange { start, end } => timestamp::timestamp_range(start, end),

        GeneratorConfig::TimestampNow => timestamp::timestamp_now(),

        GeneratorConfig::WeightedBool { true_weight } => composite::weighted_bool(*true_weight),

        GeneratorConfig::OneOf { values } => {
            let values = values
                .iter()
                .map(|value| conforming(static_value::yaml_to_gen_value(value), shape))
                .collect::<Result<Vec<_>, _>>()?;
            composite::one_of(shape.clone(), values)
        }

        GeneratorConfig::SampleArray {
            pool,
            min_length,
            max_length,
        } => {
            let element_shape = match strip_optional(shape) {
                TypeShape::Sequence { element } => element.as_ref().clone(),
                _ => TypeShape::Text,
            };
            for item in pool {
                conforming(GenValue::Text(item.clone()), &element_shape)?;
            }
            collection::sample_array(pool.clone(), *min_length, *max_length, element_shape)
        }

        GeneratorConfig::Static { value } => {
            let value = conforming(static_value::yaml_to_gen_value(value), shape)?;
            static_value::constant(shape.clone(), value)
        }

        GeneratorConfig::Null => Gen::constant(shape.clone(), GenValue::Null),
    };

    Ok(coerced(inner, shape.clone()))
}

fn strip_optional(shape: &TypeShape) -> &TypeShape {
    match shape {
        TypeShape::Optional { inner } => strip_optional(inner),
        other => other,
    }
}

/// Coerce a configured value to `shape`, rejecting it if it still does not fit.
fn conforming(value: GenValue, shape: &TypeShape) -> Result<GenValue, ConfigError> {
    let coerced = static_value::coerce(value, shape);
    if coerced.conforms_to(shape) {
        Ok(coerced)
    } else {
        Err(ConfigError::Invalid(format!(
            "configured {} value {coerced:?} does not fit type {shape}",
            coerced.kind_name()
        )))
    }
}

/// Wrap `inner` so its values are coerced to, and reported as, `shape`.
///
/// A value that does not conform to `shape` after coercion is reported as
/// a type mismatch.
fn coerced(inner: Gen, shape: TypeShape) -> Gen {
    let target = shape.clone();
    Gen::new(shape, move |params| {
        let mut result = inner.sample(params);
        result.value = result.value.and_then(|value| {
            let value = static_value::coerce(value, &target);
            if value.conforms_to(&target) {
                Ok(value)
            } else {
                Err(GenError::mismatch(&target, value.kind_name()))
            }
        });
        result.result_shape = target.clone();
        result
    })
}
