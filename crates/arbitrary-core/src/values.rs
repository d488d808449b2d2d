//! Value representations produced by generators.
//!
//! This module defines `GenValue`, the type-agnostic value a generator
//! produces, and `GenResult`, the labeled outcome of one generator call.

use crate::error::GenError;
use crate::types::{FieldShape, TypeShape};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Raw generated value.
///
/// `GenValue` carries the data; the [`TypeShape`] it was generated for
/// travels alongside it in [`GenResult`]. Use [`GenValue::conforms_to`] to
/// check that a value is validly typed for a shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GenValue {
    /// Absent value of an optional type
    Null,

    /// Boolean value
    Bool(bool),

    /// Signed integer (any width up to 64 bits)
    Int(i64),

    /// Unsigned integer (any width up to 64 bits)
    UInt(u64),

    /// Floating point value
    Float(f64),

    /// Text value
    Text(String),

    /// UUID value
    Uuid(Uuid),

    /// UTC timestamp
    Timestamp(DateTime<Utc>),

    /// Sequence of values
    Array(Vec<GenValue>),

    /// Key/value entries of a mapping
    Map(Vec<(GenValue, GenValue)>),

    /// Record with ordered, named fields
    Record {
        /// Record type name
        name: String,
        /// Field values in declaration order
        fields: Vec<(String, GenValue)>,
    },
}

impl GenValue {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short name of the value's variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Uuid(_) => "uuid",
            Self::Timestamp(_) => "timestamp",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
            Self::Record { .. } => "record",
        }
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::UInt(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    /// Try to get this value as a u64.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::UInt(u) => Some(*u),
            Self::Int(i) => u64::try_from(*i).ok(),
            _ => None,
        }
    }

    /// Try to get this value as an f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a UUID.
    pub fn as_uuid(&self) -> Option<&Uuid> {
        match self {
            Self::Uuid(u) => Some(u),
            _ => None,
        }
    }

    /// Try to get this value as a timestamp.
    pub fn as_timestamp(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Timestamp(dt) => Some(dt),
            _ => None,
        }
    }

    /// Try to get this value as an array.
    pub fn as_array(&self) -> Option<&[GenValue]> {
        match self {
            Self::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to get this value as map entries.
    pub fn as_map(&self) -> Option<&[(GenValue, GenValue)]> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Get a record field by name.
    pub fn field(&self, name: &str) -> Option<&GenValue> {
        match self {
            Self::Record { fields, .. } => fields
                .iter()
                .find(|(field, _)| field == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Check whether this value is validly typed for `shape`.
    ///
    /// Integers must fit the declared width; signed and unsigned values are
    /// interchangeable as long as they fit. `Null` conforms only to optional
    /// shapes, and nothing conforms to an opaque shape.
    pub fn conforms_to(&self, shape: &TypeShape) -> bool {
        match (self, shape) {
            (Self::Null, TypeShape::Optional { .. }) => true,
            (value, TypeShape::Optional { inner }) => value.conforms_to(inner),
            (Self::Bool(_), TypeShape::Bool) => true,
            (Self::Int(_) | Self::UInt(_), shape) if shape.is_integer() => {
                integer_fits(self, shape)
            }
            (Self::Float(f), TypeShape::Float32) => {
                !f.is_finite() || f.abs() <= f32::MAX as f64
            }
            (Self::Float(_), TypeShape::Float64) => true,
            (Self::Text(_), TypeShape::Text) => true,
            (Self::Text(s), TypeShape::Enum { values }) => values.iter().any(|v| v == s),
            (Self::Uuid(_), TypeShape::Uuid) => true,
            (Self::Timestamp(_), TypeShape::Timestamp) => true,
            (Self::Array(items), TypeShape::Sequence { element }) => {
                items.iter().all(|item| item.conforms_to(element))
            }
            (Self::Map(entries), TypeShape::Map { key, value }) => entries
                .iter()
                .all(|(k, v)| k.conforms_to(key) && v.conforms_to(value)),
            (
                Self::Record { name, fields },
                TypeShape::Record {
                    name: shape_name,
                    fields: shape_fields,
                },
            ) => name == shape_name && fields_conform(fields, shape_fields),
            _ => false,
        }
    }
}

fn integer_fits(value: &GenValue, shape: &TypeShape) -> bool {
    if let Some((min, max)) = shape.signed_bounds() {
        return value.as_i64().is_some_and(|i| (min..=max).contains(&i));
    }
    if let Some((min, max)) = shape.unsigned_bounds() {
        return value.as_u64().is_some_and(|u| (min..=max).contains(&u));
    }
    false
}

fn fields_conform(fields: &[(String, GenValue)], shapes: &[FieldShape]) -> bool {
    fields.len() == shapes.len()
        && fields
            .iter()
            .zip(shapes)
            .all(|((name, value), field)| *name == field.name && value.conforms_to(&field.shape))
}

/// Parse an RFC 3339 timestamp or a plain `YYYY-MM-DD` date (midnight UTC).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

/// Outcome of a single generator invocation.
///
/// Carries the shape the generator produces, any labels attached along the
/// way, and either the value or the generation-time failure.
#[derive(Debug, Clone, PartialEq)]
pub struct GenResult {
    /// Shape of the value the generator produces
    pub result_shape: TypeShape,

    /// Labels attached by the generator (for diagnostics)
    pub labels: Vec<String>,

    /// Generated value, or the reason generation failed
    pub value: Result<GenValue, GenError>,
}

impl GenResult {
    /// Create a successful result.
    pub fn new(result_shape: TypeShape, value: GenValue) -> Self {
        Self {
            result_shape,
            labels: Vec::new(),
            value: Ok(value),
        }
    }

    /// Create a failed result.
    pub fn failed(result_shape: TypeShape, error: GenError) -> Self {
        Self {
            result_shape,
            labels: Vec::new(),
            value: Err(error),
        }
    }

    /// Attach a label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Check if generation succeeded.
    pub fn is_ok(&self) -> bool {
        self.value.is_ok()
    }

    /// Take the generated value, or the failure.
    pub fn retrieve(self) -> Result<GenValue, GenError> {
        self.value
    }
}
