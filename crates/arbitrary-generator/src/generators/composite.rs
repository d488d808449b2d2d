//! Generators composed from other generators or from fixed choices.

use crate::gen::Gen;
use arbitrary_core::{FieldShape, GenError, GenValue, TypeShape};
use rand::seq::IndexedRandom;
use rand::Rng;

/// Generate optional values: `Null` with probability `none_probability`,
/// otherwise a value from `inner`.
pub fn optional_of(inner: Gen, none_probability: f64) -> Gen {
    let none_probability = probability(none_probability);
    let shape = TypeShape::optional(inner.result_shape().clone());
    Gen::from_fn(shape, move |params| {
        if params.rng().random_bool(none_probability) {
            Ok(GenValue::Null)
        } else {
            inner.sample(params).retrieve()
        }
    })
}

/// Generate records whose fields come from the given generators, in order.
pub fn record_of(name: impl Into<String>, fields: Vec<(String, Gen)>) -> Gen {
    let name = name.into();
    let shape = TypeShape::Record {
        name: name.clone(),
        fields: fields
            .iter()
            .map(|(field, gen)| FieldShape::new(field.clone(), gen.result_shape().clone()))
            .collect(),
    };
    Gen::from_fn(shape, move |params| {
        let values = fields
            .iter()
            .map(|(field, gen)| Ok((field.clone(), gen.sample(params).retrieve()?)))
            .collect::<Result<Vec<_>, GenError>>()?;
        Ok(GenValue::Record {
            name: name.clone(),
            fields: values,
        })
    })
}

/// Generate a uniformly chosen value from `values`.
///
/// An empty pool yields a generator that fails with
/// [`GenError::EmptyChoice`] when sampled.
pub fn one_of(shape: TypeShape, values: Vec<GenValue>) -> Gen {
    if values.is_empty() {
        let error = GenError::EmptyChoice {
            shape: shape.to_string(),
        };
        return Gen::failing(shape, error);
    }
    Gen::from_fn(shape, move |params| {
        Ok(values.choose(params.rng()).cloned().unwrap_or(GenValue::Null))
    })
}

/// Generate booleans that are `true` with probability `true_weight`.
pub fn weighted_bool(true_weight: f64) -> Gen {
    let true_weight = probability(true_weight);
    Gen::from_fn(TypeShape::Bool, move |params| {
        Ok(GenValue::Bool(params.rng().random_bool(true_weight)))
    })
}

/// Clamp `p` into `[0, 1]`, mapping NaN to zero.
fn probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}
