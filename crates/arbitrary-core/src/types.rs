//! Type identities for the arbitraries registry.
//!
//! This module defines `TypeShape`, the explicit set of kinds a generator can
//! produce. A `TypeShape` is the registry's lookup key and the input to
//! structural synthesis.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Type identity of generated values.
///
/// Two shapes identify the same type exactly when they compare equal, so a
/// `TypeShape` can be used directly as a `HashMap` key. There is no subtype or
/// structural matching: `Sequence<Int32>` and `Sequence<Int64>` are unrelated.
///
/// # YAML Format
///
/// Simple types can be specified as strings:
/// ```yaml
/// type: int32
/// type: text
/// type: timestamp
/// ```
///
/// Compound types use object format:
/// ```yaml
/// type:
///   type: sequence
///   element: int32
/// type:
///   type: record
///   name: User
///   fields:
///     - name: age
///       type: uint8
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeShape {
    // Boolean
    /// Boolean value
    Bool,

    // Signed integers
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,

    // Unsigned integers
    /// 8-bit unsigned integer
    UInt8,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit unsigned integer
    UInt32,
    /// 64-bit unsigned integer
    UInt64,

    // Floating point
    /// 32-bit IEEE 754 floating point
    Float32,
    /// 64-bit IEEE 754 floating point
    Float64,

    /// Unicode text
    Text,

    /// UUID (128-bit)
    Uuid,

    /// Calendar timestamp in UTC
    Timestamp,

    /// Nullable form of another type
    Optional {
        /// Shape of the value when present
        inner: Box<TypeShape>,
    },

    /// Ordered, variable-length sequence
    Sequence {
        /// Element shape
        element: Box<TypeShape>,
    },

    /// Associative mapping
    Map {
        /// Key shape
        key: Box<TypeShape>,
        /// Value shape
        value: Box<TypeShape>,
    },

    /// Closed set of text labels
    Enum {
        /// Allowed labels
        values: Vec<String>,
    },

    /// Structured record with named, ordered fields
    Record {
        /// Record type name
        name: String,
        /// Field shapes in declaration order
        fields: Vec<FieldShape>,
    },

    /// A kind no generation strategy exists for
    Opaque {
        /// Descriptive name of the type
        name: String,
    },
}

/// A named field of a [`TypeShape::Record`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldShape {
    /// Field name
    pub name: String,

    /// Field type
    #[serde(rename = "type")]
    pub shape: TypeShape,
}

impl FieldShape {
    /// Create a new field shape.
    pub fn new(name: impl Into<String>, shape: TypeShape) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }
}

impl TypeShape {
    /// Create an optional shape wrapping `inner`.
    pub fn optional(inner: TypeShape) -> Self {
        Self::Optional {
            inner: Box::new(inner),
        }
    }

    /// Create a sequence shape with the given element shape.
    pub fn sequence(element: TypeShape) -> Self {
        Self::Sequence {
            element: Box::new(element),
        }
    }

    /// Create a map shape with the given key and value shapes.
    pub fn map(key: TypeShape, value: TypeShape) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Create an enum shape with the given labels.
    pub fn enumeration<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::Enum {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a record shape from `(field name, field shape)` pairs.
    pub fn record<N: Into<String>>(
        name: impl Into<String>,
        fields: impl IntoIterator<Item = (N, TypeShape)>,
    ) -> Self {
        Self::Record {
            name: name.into(),
            fields: fields
                .into_iter()
                .map(|(name, shape)| FieldShape::new(name, shape))
                .collect(),
        }
    }

    /// Create an opaque shape.
    pub fn opaque(name: impl Into<String>) -> Self {
        Self::Opaque { name: name.into() }
    }

    /// Check if this shape is a signed or unsigned integer.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::UInt8
                | Self::UInt16
                | Self::UInt32
                | Self::UInt64
        )
    }

    /// Check if this shape represents a numeric type.
    pub fn is_numeric(&self) -> bool {
        self.is_integer() || matches!(self, Self::Float32 | Self::Float64)
    }

    /// Check if this shape is a sequence or map.
    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Sequence { .. } | Self::Map { .. })
    }

    /// Inclusive value bounds of a signed integer shape.
    pub fn signed_bounds(&self) -> Option<(i64, i64)> {
        match self {
            Self::Int8 => Some((i8::MIN as i64, i8::MAX as i64)),
            Self::Int16 => Some((i16::MIN as i64, i16::MAX as i64)),
            Self::Int32 => Some((i32::MIN as i64, i32::MAX as i64)),
            Self::Int64 => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }

    /// Inclusive value bounds of an unsigned integer shape.
    pub fn unsigned_bounds(&self) -> Option<(u64, u64)> {
        match self {
            Self::UInt8 => Some((0, u8::MAX as u64)),
            Self::UInt16 => Some((0, u16::MAX as u64)),
            Self::UInt32 => Some((0, u32::MAX as u64)),
            Self::UInt64 => Some((0, u64::MAX)),
            _ => None,
        }
    }

    /// Name used for simple shapes in YAML and `Display`.
    fn simple_name(&self) -> Option<&'static str> {
        let name = match self {
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::UInt8 => "uint8",
            Self::UInt16 => "uint16",
            Self::UInt32 => "uint32",
            Self::UInt64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Text => "text",
            Self::Uuid => "uuid",
            Self::Timestamp => "timestamp",
            _ => return None,
        };
        Some(name)
    }

    fn from_simple_name(name: &str) -> Option<Self> {
        let shape = match name {
            "bool" | "boolean" => Self::Bool,
            "int8" | "tiny_int" | "tinyint" => Self::Int8,
            "int16" | "small_int" | "smallint" => Self::Int16,
            "int32" | "int" => Self::Int32,
            "int64" | "big_int" | "bigint" => Self::Int64,
            "uint8" => Self::UInt8,
            "uint16" => Self::UInt16,
            "uint32" => Self::UInt32,
            "uint64" => Self::UInt64,
            "float32" | "float" => Self::Float32,
            "float64" | "double" => Self::Float64,
            "text" | "string" => Self::Text,
            "uuid" => Self::Uuid,
            "timestamp" | "date_time" | "datetime" => Self::Timestamp,
            _ => return None,
        };
        Some(shape)
    }
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.simple_name() {
            return f.write_str(name);
        }
        match self {
            Self::Optional { inner } => write!(f, "optional<{inner}>"),
            Self::Sequence { element } => write!(f, "sequence<{element}>"),
            Self::Map { key, value } => write!(f, "map<{key}, {value}>"),
            Self::Enum { values } => write!(f, "enum{{{}}}", values.join("|")),
            Self::Record { name, .. } => write!(f, "record<{name}>"),
            Self::Opaque { name } => write!(f, "opaque<{name}>"),
            _ => unreachable!("simple shapes are handled above"),
        }
    }
}

// Custom serialization/deserialization for TypeShape
// Supports both simple string format ("int32", "text") and object format ({"type": "sequence", "element": "int32"})

impl Serialize for TypeShape {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        if let Some(name) = self.simple_name() {
            return serializer.serialize_str(name);
        }

        match self {
            Self::Optional { inner } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "optional")?;
                map.serialize_entry("inner", inner)?;
                map.end()
            }
            Self::Sequence { element } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "sequence")?;
                map.serialize_entry("element", element)?;
                map.end()
            }
            Self::Map { key, value } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("type", "map")?;
                map.serialize_entry("key", key)?;
                map.serialize_entry("value", value)?;
                map.end()
            }
            Self::Enum { values } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "enum")?;
                map.serialize_entry("values", values)?;
                map.end()
            }
            Self::Record { name, fields } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("type", "record")?;
                map.serialize_entry("name", name)?;
                map.serialize_entry("fields", fields)?;
                map.end()
            }
            Self::Opaque { name } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "opaque")?;
                map.serialize_entry("name", name)?;
                map.end()
            }
            _ => unreachable!("simple shapes are handled above"),
        }
    }
}

impl<'de> Deserialize<'de> for TypeShape {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{Error, MapAccess, Visitor};

        struct TypeShapeVisitor;

        impl<'de> Visitor<'de> for TypeShapeVisitor {
            type Value = TypeShape;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or map representing a TypeShape")
            }

            // Handle string format: "int32", "text", etc.
            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                TypeShape::from_simple_name(value)
                    .ok_or_else(|| E::custom(format!("unknown simple type: {value}")))
            }

            // Handle map format: {"type": "sequence", "element": "int32"}
            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut type_name: Option<String> = None;
                let mut fields: HashMap<String, serde_yaml::Value> = HashMap::new();

                while let Some(key) = map.next_key::<String>()? {
                    if key == "type" {
                        type_name = Some(map.next_value()?);
                    } else {
                        fields.insert(key, map.next_value()?);
                    }
                }

                let type_name = type_name.ok_or_else(|| M::Error::missing_field("type"))?;

                // Simple types that might appear in map format
                if let Some(shape) = TypeShape::from_simple_name(&type_name) {
                    return Ok(shape);
                }

                match type_name.as_str() {
                    "optional" | "nullable" => {
                        let inner: TypeShape = get_field_required(&fields, "inner")?;
                        Ok(TypeShape::optional(inner))
                    }
                    "sequence" | "array" => {
                        let element: TypeShape = get_field_required(&fields, "element")?;
                        Ok(TypeShape::sequence(element))
                    }
                    "map" => {
                        let key: TypeShape = get_field_required(&fields, "key")?;
                        let value: TypeShape = get_field_required(&fields, "value")?;
                        Ok(TypeShape::map(key, value))
                    }
                    "enum" => {
                        let values: Vec<String> = get_field_required(&fields, "values")?;
                        Ok(TypeShape::Enum { values })
                    }
                    "record" => {
                        let name = get_field_required(&fields, "name")?;
                        let fields = get_field(&fields, "fields").unwrap_or_default();
                        Ok(TypeShape::Record { name, fields })
                    }
                    "opaque" => {
                        let name = get_field_required(&fields, "name")?;
                        Ok(TypeShape::Opaque { name })
                    }
                    _ => Err(M::Error::custom(format!("unknown type: {type_name}"))),
                }
            }
        }

        deserializer.deserialize_any(TypeShapeVisitor)
    }
}

// Helper functions for deserialization
fn get_field<T: for<'de> Deserialize<'de>>(
    fields: &HashMap<String, serde_yaml::Value>,
    key: &str,
) -> Option<T> {
    fields
        .get(key)
        .and_then(|v| serde_yaml::from_value(v.clone()).ok())
}

fn get_field_required<T: for<'de> Deserialize<'de>, E: serde::de::Error>(
    fields: &HashMap<String, serde_yaml::Value>,
    key: &'static str,
) -> Result<T, E> {
    let value = fields.get(key).ok_or_else(|| E::missing_field(key))?;
    serde_yaml::from_value(value.clone())
        .map_err(|e| E::custom(format!("invalid field '{key}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_constructors() {
        assert_eq!(
            TypeShape::sequence(TypeShape::Int32),
            TypeShape::Sequence {
                element: Box::new(TypeShape::Int32)
            }
        );
        assert_eq!(
            TypeShape::enumeration(["a", "b"]),
            TypeShape::Enum {
                values: vec!["a".to_string(), "b".to_string()]
            }
        );
        let record = TypeShape::record("User", [("age", TypeShape::UInt8)]);
        if let TypeShape::Record { name, fields } = record {
            assert_eq!(name, "User");
            assert_eq!(fields, vec![FieldShape::new("age", TypeShape::UInt8)]);
        } else {
            panic!("Expected Record shape");
        }
    }

    #[test]
    fn test_shape_categories() {
        assert!(TypeShape::Int8.is_integer());
        assert!(TypeShape::UInt64.is_integer());
        assert!(!TypeShape::Float32.is_integer());

        assert!(TypeShape::Float64.is_numeric());
        assert!(TypeShape::Int32.is_numeric());
        assert!(!TypeShape::Text.is_numeric());

        assert!(TypeShape::sequence(TypeShape::Bool).is_collection());
        assert!(TypeShape::map(TypeShape::Text, TypeShape::Bool).is_collection());
        assert!(!TypeShape::optional(TypeShape::Bool).is_collection());
    }

    #[test]
    fn test_integer_bounds() {
        assert_eq!(TypeShape::Int8.signed_bounds(), Some((-128, 127)));
        assert_eq!(TypeShape::UInt16.unsigned_bounds(), Some((0, 65535)));
        assert_eq!(TypeShape::Int8.unsigned_bounds(), None);
        assert_eq!(TypeShape::Text.signed_bounds(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(TypeShape::Timestamp.to_string(), "timestamp");
        assert_eq!(
            TypeShape::optional(TypeShape::Timestamp).to_string(),
            "optional<timestamp>"
        );
        assert_eq!(
            TypeShape::map(TypeShape::Text, TypeShape::sequence(TypeShape::UInt8)).to_string(),
            "map<text, sequence<uint8>>"
        );
        assert_eq!(
            TypeShape::enumeration(["red", "green"]).to_string(),
            "enum{red|green}"
        );
        assert_eq!(TypeShape::opaque("channel").to_string(), "opaque<channel>");
    }

    #[test]
    fn test_deserialize_simple_string() {
        let parsed: TypeShape = serde_yaml::from_str("timestamp").unwrap();
        assert_eq!(parsed, TypeShape::Timestamp);

        let parsed: TypeShape = serde_yaml::from_str("int").unwrap();
        assert_eq!(parsed, TypeShape::Int32);

        let parsed: TypeShape = serde_yaml::from_str("double").unwrap();
        assert_eq!(parsed, TypeShape::Float64);

        assert!(serde_yaml::from_str::<TypeShape>("complex128").is_err());
    }

    #[test]
    fn test_deserialize_compound_types() {
        let yaml = r#"
type: sequence
element: int32
"#;
        let parsed: TypeShape = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed, TypeShape::sequence(TypeShape::Int32));

        let yaml = r#"
type: map
key: text
value:
  type: optional
  inner: timestamp
"#;
        let parsed: TypeShape = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            parsed,
            TypeShape::map(TypeShape::Text, TypeShape::optional(TypeShape::Timestamp))
        );

        let yaml = r#"
type: record
name: User
fields:
  - name: id
    type: uuid
  - name: tags
    type:
      type: sequence
      element: text
"#;
        let parsed: TypeShape = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            parsed,
            TypeShape::record(
                "User",
                [
                    ("id", TypeShape::Uuid),
                    ("tags", TypeShape::sequence(TypeShape::Text)),
                ]
            )
        );
    }

    #[test]
    fn test_deserialize_missing_required_field() {
        let yaml = r#"
type: sequence
"#;
        assert!(serde_yaml::from_str::<TypeShape>(yaml).is_err());
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        let shapes = vec![
            TypeShape::Bool,
            TypeShape::UInt32,
            TypeShape::optional(TypeShape::Timestamp),
            TypeShape::map(TypeShape::Text, TypeShape::Float64),
            TypeShape::enumeration(["a", "b"]),
            TypeShape::record("Point", [("x", TypeShape::Int64), ("y", TypeShape::Int64)]),
            TypeShape::opaque("fn"),
        ];

        for shape in shapes {
            let yaml = serde_yaml::to_string(&shape).unwrap();
            let parsed: TypeShape = serde_yaml::from_str(&yaml).unwrap();
            assert_eq!(shape, parsed);
        }
    }
}
