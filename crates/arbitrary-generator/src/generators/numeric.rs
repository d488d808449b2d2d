//! Numeric value generators.

use crate::gen::Gen;
use arbitrary_core::{GenError, GenValue, TypeShape};
use rand::distr::Uniform;
use rand::Rng;

/// Generate signed integers in the given range (inclusive).
pub fn int_range(shape: TypeShape, min: i64, max: i64) -> Gen {
    match Uniform::new_inclusive(min, max) {
        Ok(dist) => Gen::from_fn(shape, move |params| {
            Ok(GenValue::Int(params.rng().sample(&dist)))
        }),
        Err(e) => Gen::failing(shape, GenError::InvalidRange(format!("{min}..={max}: {e}"))),
    }
}

/// Generate unsigned integers in the given range (inclusive).
pub fn uint_range(shape: TypeShape, min: u64, max: u64) -> Gen {
    match Uniform::new_inclusive(min, max) {
        Ok(dist) => Gen::from_fn(shape, move |params| {
            Ok(GenValue::UInt(params.rng().sample(&dist)))
        }),
        Err(e) => Gen::failing(shape, GenError::InvalidRange(format!("{min}..={max}: {e}"))),
    }
}

/// Generate floats in the given range (inclusive).
///
/// For `Float32` shapes the sample is rounded to single precision.
pub fn float_range(shape: TypeShape, min: f64, max: f64) -> Gen {
    let single = shape == TypeShape::Float32;
    match Uniform::new_inclusive(min, max) {
        Ok(dist) => Gen::from_fn(shape, move |params| {
            let value: f64 = params.rng().sample(&dist);
            if single {
                Ok(GenValue::Float(value as f32 as f64))
            } else {
                Ok(GenValue::Float(value))
            }
        }),
        Err(e) => Gen::failing(shape, GenError::InvalidRange(format!("{min}..={max}: {e}"))),
    }
}

/// Generate integers over the full width of an integer shape.
pub fn any_int(shape: TypeShape) -> Gen {
    if let Some((min, max)) = shape.signed_bounds() {
        return int_range(shape, min, max);
    }
    if let Some((min, max)) = shape.unsigned_bounds() {
        return uint_range(shape, min, max);
    }
    let error = GenError::mismatch("integer type", &shape);
    Gen::failing(shape, error)
}

/// Generate floats in `[-bound, bound]`, capped to what the shape can hold.
///
/// The bound is also capped at `f64::MAX / 2` so the width of the range
/// stays finite.
pub fn any_float(shape: TypeShape, bound: f64) -> Gen {
    let bound = match shape {
        TypeShape::Float32 => bound.min(f32::MAX as f64),
        _ => bound.min(f64::MAX / 2.0),
    };
    float_range(shape, -bound, bound)
}
