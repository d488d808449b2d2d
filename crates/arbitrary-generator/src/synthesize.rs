//! Structural synthesis of generators from a [`TypeShape`].
//!
//! When the registry has no generator for a shape, the [`Synthesizer`]
//! derives one from the shape's kind. Child shapes are resolved through the
//! registry, so registered generators are used inside synthesized
//! composites.

use crate::gen::Gen;
use crate::generators::{collection, composite, numeric, text, timestamp, uuid};
use crate::registry::Arbitraries;
use arbitrary_core::{GenError, GenValue, SynthesisBounds, TypeShape};
use tracing::debug;

/// Derives generators from the kind of a shape, within [`SynthesisBounds`].
#[derive(Debug, Clone, Default)]
pub struct Synthesizer {
    bounds: SynthesisBounds,
}

impl Synthesizer {
    pub fn new(bounds: SynthesisBounds) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> &SynthesisBounds {
        &self.bounds
    }

    /// Synthesize a generator for `shape`.
    ///
    /// Never fails: kinds without a strategy yield a generator that fails
    /// when sampled.
    pub fn synthesize_for_kind(&self, shape: &TypeShape, arbitraries: &Arbitraries) -> Gen {
        self.synthesize_at(shape, arbitraries, 0)
    }

    pub(crate) fn synthesize_at(
        &self,
        shape: &TypeShape,
        arbitraries: &Arbitraries,
        depth: usize,
    ) -> Gen {
        debug!(%shape, depth, "Synthesizing generator");

        let exhausted = depth >= self.bounds.max_depth;
        let resolve = |child: &TypeShape| {
            arbitraries
                .registered(child)
                .unwrap_or_else(|| self.synthesize_at(child, arbitraries, depth + 1))
        };

        match shape {
            TypeShape::Bool => composite::weighted_bool(0.5),

            TypeShape::Int8
            | TypeShape::Int16
            | TypeShape::Int32
            | TypeShape::Int64
            | TypeShape::UInt8
            | TypeShape::UInt16
            | TypeShape::UInt32
            | TypeShape::UInt64 => numeric::any_int(shape.clone()),

            TypeShape::Float32 | TypeShape::Float64 => {
                numeric::any_float(shape.clone(), self.bounds.float_bound)
            }

            TypeShape::Text => text::any_text(self.bounds.max_text_length),

            TypeShape::Uuid => uuid::uuid_v4(),

            TypeShape::Timestamp => timestamp::any_timestamp(),

            TypeShape::Optional { .. } if exhausted => Gen::constant(shape.clone(), GenValue::Null),
            TypeShape::Optional { inner } => {
                composite::optional_of(resolve(inner), self.bounds.none_probability)
            }

            TypeShape::Sequence { .. } | TypeShape::Map { .. } if exhausted => {
                let empty = match shape {
                    TypeShape::Map { .. } => GenValue::Map(Vec::new()),
                    _ => GenValue::Array(Vec::new()),
                };
                Gen::constant(shape.clone(), empty)
            }
            TypeShape::Sequence { element } => {
                collection::sequence_of(resolve(element), 0, self.bounds.max_collection_length)
            }
            TypeShape::Map { key, value } => collection::map_of(
                resolve(key),
                resolve(value),
                0,
                self.bounds.max_collection_length,
            ),

            TypeShape::Enum { values } => composite::one_of(
                shape.clone(),
                values.iter().cloned().map(GenValue::Text).collect(),
            ),

            TypeShape::Record { name, fields } => composite::record_of(
                name.clone(),
                fields
                    .iter()
                    .map(|field| (field.name.clone(), resolve(&field.shape)))
                    .collect(),
            ),

            TypeShape::Opaque { .. } => {
                let error = GenError::UnsupportedKind {
                    shape: shape.to_string(),
                };
                Gen::failing(shape.clone(), error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbitrary_core::GenParams;

    fn synthesize(shape: &TypeShape) -> Gen {
        let arbitraries = Arbitraries::new();
        Synthesizer::default().synthesize_for_kind(shape, &arbitraries)
    }

    fn assert_samples_conform(shape: &TypeShape, samples: usize) {
        let gen = synthesize(shape);
        assert_eq!(gen.result_shape(), shape);

        let mut params = GenParams::new(42);
        for _ in 0..samples {
            let value = gen.sample(&mut params).retrieve().unwrap();
            assert!(value.conforms_to(shape), "{value:?} does not conform to {shape}");
        }
    }

    #[test]
    fn test_scalars_conform() {
        for shape in [
            TypeShape::Bool,
            TypeShape::Int8,
            TypeShape::Int16,
            TypeShape::Int32,
            TypeShape::Int64,
            TypeShape::UInt8,
            TypeShape::UInt16,
            TypeShape::UInt32,
            TypeShape::UInt64,
            TypeShape::Float32,
            TypeShape::Float64,
            TypeShape::Text,
            TypeShape::Uuid,
            TypeShape::Timestamp,
        ] {
            assert_samples_conform(&shape, 50);
        }
    }

    #[test]
    fn test_composites_conform() {
        let user = TypeShape::record(
            "User",
            [
                ("id", TypeShape::Uuid),
                ("name", TypeShape::Text),
                ("tags", TypeShape::sequence(TypeShape::Text)),
                ("score", TypeShape::optional(TypeShape::Float64)),
                ("status", TypeShape::enumeration(["active", "banned"])),
            ],
        );
        assert_samples_conform(&user, 30);
        assert_samples_conform(&TypeShape::map(TypeShape::UInt8, TypeShape::Bool), 30);
    }

    #[test]
    fn test_text_length_capped() {
        let bounds = SynthesisBounds {
            max_text_length: 5,
            ..SynthesisBounds::default()
        };
        let arbitraries = Arbitraries::new();
        let gen = Synthesizer::new(bounds).synthesize_for_kind(&TypeShape::Text, &arbitraries);

        let mut params = GenParams::new(3);
        for _ in 0..50 {
            let value = gen.sample(&mut params).retrieve().unwrap();
            assert!(value.as_str().unwrap().chars().count() <= 5);
        }
    }

    #[test]
    fn test_sequence_length_capped() {
        let gen = synthesize(&TypeShape::sequence(TypeShape::Int64));
        let mut params = GenParams::new(9);
        for _ in 0..50 {
            let value = gen.sample(&mut params).retrieve().unwrap();
            let max = SynthesisBounds::default().max_collection_length;
            assert!(value.as_array().unwrap().len() <= max);
        }
    }

    #[test]
    fn test_nesting_past_max_depth_is_empty() {
        let bounds = SynthesisBounds {
            max_depth: 1,
            ..SynthesisBounds::default()
        };
        let arbitraries = Arbitraries::new();
        let shape = TypeShape::sequence(TypeShape::sequence(TypeShape::Int32));
        let gen = Synthesizer::new(bounds).synthesize_for_kind(&shape, &arbitraries);

        let mut params = GenParams::new(5).with_size(2, 4);
        let value = gen.sample(&mut params).retrieve().unwrap();
        let outer = value.as_array().unwrap();
        assert!(!outer.is_empty());
        assert!(outer.iter().all(|inner| inner.as_array() == Some(&[][..])));
    }

    #[test]
    fn test_nested_map_past_max_depth_is_empty() {
        let bounds = SynthesisBounds {
            max_depth: 1,
            ..SynthesisBounds::default()
        };
        let arbitraries = Arbitraries::new();
        let shape = TypeShape::map(
            TypeShape::Int32,
            TypeShape::map(TypeShape::Int32, TypeShape::Bool),
        );
        let gen = Synthesizer::new(bounds).synthesize_for_kind(&shape, &arbitraries);

        let mut params = GenParams::new(9).with_size(2, 4);
        for _ in 0..10 {
            let value = gen.sample(&mut params).retrieve().unwrap();
            assert!(value.conforms_to(&shape));
            let outer = value.as_map().unwrap();
            assert!(!outer.is_empty());
            assert!(outer.iter().all(|(_, inner)| inner.as_map() == Some(&[][..])));
        }
    }

    #[test]
    fn test_optional_past_max_depth_is_null() {
        let bounds = SynthesisBounds {
            max_depth: 0,
            ..SynthesisBounds::default()
        };
        let arbitraries = Arbitraries::new();
        let shape = TypeShape::optional(TypeShape::Int32);
        let gen = Synthesizer::new(bounds).synthesize_for_kind(&shape, &arbitraries);

        let mut params = GenParams::new(5);
        for _ in 0..10 {
            assert_eq!(gen.sample(&mut params).retrieve(), Ok(GenValue::Null));
        }
    }

    #[test]
    fn test_empty_enum_fails_at_sample_time() {
        let gen = synthesize(&TypeShape::enumeration(Vec::<String>::new()));
        let result = gen.sample(&mut GenParams::new(1)).retrieve();
        assert!(matches!(result, Err(GenError::EmptyChoice { .. })));
    }

    #[test]
    fn test_opaque_fails_at_sample_time() {
        let gen = synthesize(&TypeShape::opaque("socket"));
        assert_eq!(gen.result_shape(), &TypeShape::opaque("socket"));
        let result = gen.sample(&mut GenParams::new(1)).retrieve();
        assert!(matches!(result, Err(GenError::UnsupportedKind { .. })));
    }

    #[test]
    fn test_deterministic_generation() {
        let shape = TypeShape::map(TypeShape::Text, TypeShape::sequence(TypeShape::Float32));
        let gen = synthesize(&shape);
        let mut p1 = GenParams::new(42);
        let mut p2 = GenParams::new(42);

        for _ in 0..5 {
            assert_eq!(gen.sample(&mut p1), gen.sample(&mut p2));
        }
    }
}
