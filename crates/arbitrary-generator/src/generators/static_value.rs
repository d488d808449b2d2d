//! Static value generator, YAML to GenValue conversion, and coercion of
//! values to a target shape.

use crate::gen::Gen;
use arbitrary_core::{parse_timestamp, GenValue, TypeShape};
use serde_yaml::Value as YamlValue;
use uuid::Uuid;

/// Generator that always yields `value`, coerced to `shape`.
pub fn constant(shape: TypeShape, value: GenValue) -> Gen {
    let value = coerce(value, &shape);
    Gen::constant(shape, value)
}

/// Convert a YAML value to a GenValue.
pub fn yaml_to_gen_value(yaml: &YamlValue) -> GenValue {
    match yaml {
        YamlValue::Null => GenValue::Null,
        YamlValue::Bool(b) => GenValue::Bool(*b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                GenValue::Int(i)
            } else if let Some(u) = n.as_u64() {
                GenValue::UInt(u)
            } else if let Some(f) = n.as_f64() {
                GenValue::Float(f)
            } else {
                GenValue::Text(n.to_string())
            }
        }
        YamlValue::String(s) => GenValue::Text(s.clone()),
        YamlValue::Sequence(arr) => GenValue::Array(arr.iter().map(yaml_to_gen_value).collect()),
        YamlValue::Mapping(map) => GenValue::Map(
            map.iter()
                .map(|(k, v)| (yaml_to_gen_value(k), yaml_to_gen_value(v)))
                .collect(),
        ),
        YamlValue::Tagged(tagged) => yaml_to_gen_value(&tagged.value),
    }
}

/// Convert `value` to the representation expected for `shape`, where possible.
///
/// Text is parsed into numbers, booleans, UUIDs and timestamps; integers
/// widen to floats; YAML mappings become records when every required field
/// is present, and missing optional fields become null. Values that cannot
/// be converted are returned unchanged.
pub fn coerce(value: GenValue, shape: &TypeShape) -> GenValue {
    match (value, shape) {
        (GenValue::Null, _) => GenValue::Null,
        (value, TypeShape::Optional { inner }) => coerce(value, inner),
        (GenValue::Text(s), shape) => coerce_text(s, shape),
        (GenValue::Int(i), TypeShape::Float32 | TypeShape::Float64) => GenValue::Float(i as f64),
        (GenValue::UInt(u), TypeShape::Float32 | TypeShape::Float64) => GenValue::Float(u as f64),
        (GenValue::Int(i), shape) if shape.unsigned_bounds().is_some() && i >= 0 => {
            GenValue::UInt(i as u64)
        }
        (GenValue::Uuid(u), TypeShape::Text) => GenValue::Text(u.to_string()),
        (GenValue::Timestamp(dt), TypeShape::Text) => GenValue::Text(dt.to_rfc3339()),
        (GenValue::Array(items), TypeShape::Sequence { element }) => GenValue::Array(
            items
                .into_iter()
                .map(|item| coerce(item, element))
                .collect(),
        ),
        (GenValue::Map(entries), TypeShape::Map { key, value }) => GenValue::Map(
            entries
                .into_iter()
                .map(|(k, v)| (coerce(k, key), coerce(v, value)))
                .collect(),
        ),
        (GenValue::Map(entries), TypeShape::Record { fields, .. })
            if fields.iter().any(|field| {
                !matches!(field.shape, TypeShape::Optional { .. })
                    && !entries
                        .iter()
                        .any(|(k, _)| k.as_str() == Some(field.name.as_str()))
            }) =>
        {
            GenValue::Map(entries)
        }
        (GenValue::Map(mut entries), TypeShape::Record { name, fields }) => {
            let fields = fields
                .iter()
                .map(|field| {
                    let position = entries
                        .iter()
                        .position(|(k, _)| k.as_str() == Some(field.name.as_str()));
                    let value = match position {
                        Some(idx) => coerce(entries.swap_remove(idx).1, &field.shape),
                        None => GenValue::Null,
                    };
                    (field.name.clone(), value)
                })
                .collect();
            GenValue::Record {
                name: name.clone(),
                fields,
            }
        }
        (value, _) => value,
    }
}

/// Convert a string value to the appropriate GenValue based on the target shape.
fn coerce_text(s: String, shape: &TypeShape) -> GenValue {
    match shape {
        shape if shape.signed_bounds().is_some() => match s.parse::<i64>() {
            Ok(i) => GenValue::Int(i),
            Err(_) => GenValue::Text(s),
        },
        shape if shape.unsigned_bounds().is_some() => match s.parse::<u64>() {
            Ok(u) => GenValue::UInt(u),
            Err(_) => GenValue::Text(s),
        },
        TypeShape::Float32 | TypeShape::Float64 => match s.parse::<f64>() {
            Ok(f) => GenValue::Float(f),
            Err(_) => GenValue::Text(s),
        },
        TypeShape::Bool => match s.to_lowercase().as_str() {
            "true" | "1" | "yes" => GenValue::Bool(true),
            "false" | "0" | "no" => GenValue::Bool(false),
            _ => GenValue::Text(s),
        },
        TypeShape::Uuid => match Uuid::parse_str(&s) {
            Ok(u) => GenValue::Uuid(u),
            Err(_) => GenValue::Text(s),
        },
        TypeShape::Timestamp => match parse_timestamp(&s) {
            Some(dt) => GenValue::Timestamp(dt),
            None => GenValue::Text(s),
        },
        // For text, enums and all others, keep as string
        _ => GenValue::Text(s),
    }
}
