//! Typed layer over the registry.
//!
//! [`Arbitrary`] ties a Rust type to the [`TypeShape`] it is registered
//! under and converts between [`GenValue`] and the Rust value. Users
//! implement it for their own record types.

use arbitrary_core::{GenError, GenValue, TypeShape};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use uuid::Uuid;

/// A Rust type that can be generated through the registry.
///
/// ```rust
/// use arbitrary_core::{GenError, GenValue, TypeShape};
/// use arbitrary_generator::Arbitrary;
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Arbitrary for Point {
///     fn shape() -> TypeShape {
///         TypeShape::record("Point", [("x", i32::shape()), ("y", i32::shape())])
///     }
///
///     fn from_value(value: GenValue) -> Result<Self, GenError> {
///         let field = |name: &str| {
///             value
///                 .field(name)
///                 .cloned()
///                 .ok_or_else(|| GenError::mismatch(Self::shape(), value.kind_name()))
///         };
///         Ok(Point {
///             x: i32::from_value(field("x")?)?,
///             y: i32::from_value(field("y")?)?,
///         })
///     }
///
///     fn into_value(self) -> GenValue {
///         GenValue::Record {
///             name: "Point".to_string(),
///             fields: vec![
///                 ("x".to_string(), self.x.into_value()),
///                 ("y".to_string(), self.y.into_value()),
///             ],
///         }
///     }
/// }
/// ```
pub trait Arbitrary: Sized {
    /// The type identity this type is registered and resolved under.
    fn shape() -> TypeShape;

    /// Convert a generated value into this type.
    fn from_value(value: GenValue) -> Result<Self, GenError>;

    /// Convert this value into its generated form.
    fn into_value(self) -> GenValue;
}

fn mismatch<T: Arbitrary>(value: &GenValue) -> GenError {
    GenError::mismatch(T::shape(), value.kind_name())
}

impl Arbitrary for bool {
    fn shape() -> TypeShape {
        TypeShape::Bool
    }

    fn from_value(value: GenValue) -> Result<Self, GenError> {
        value.as_bool().ok_or_else(|| mismatch::<Self>(&value))
    }

    fn into_value(self) -> GenValue {
        GenValue::Bool(self)
    }
}

macro_rules! impl_arbitrary_signed {
    ($($ty:ty => $shape:ident),* $(,)?) => {
        $(
            impl Arbitrary for $ty {
                fn shape() -> TypeShape {
                    TypeShape::$shape
                }

                fn from_value(value: GenValue) -> Result<Self, GenError> {
                    let converted = match &value {
                        GenValue::Int(i) => <$ty>::try_from(*i).ok(),
                        GenValue::UInt(u) => <$ty>::try_from(*u).ok(),
                        _ => None,
                    };
                    converted.ok_or_else(|| mismatch::<Self>(&value))
                }

                fn into_value(self) -> GenValue {
                    GenValue::Int(i64::from(self))
                }
            }
        )*
    };
}

macro_rules! impl_arbitrary_unsigned {
    ($($ty:ty => $shape:ident),* $(,)?) => {
        $(
            impl Arbitrary for $ty {
                fn shape() -> TypeShape {
                    TypeShape::$shape
                }

                fn from_value(value: GenValue) -> Result<Self, GenError> {
                    let converted = match &value {
                        GenValue::Int(i) => <$ty>::try_from(*i).ok(),
                        GenValue::UInt(u) => <$ty>::try_from(*u).ok(),
                        _ => None,
                    };
                    converted.ok_or_else(|| mismatch::<Self>(&value))
                }

                fn into_value(self) -> GenValue {
                    GenValue::UInt(u64::from(self))
                }
            }
        )*
    };
}

impl_arbitrary_signed!(i8 => Int8, i16 => Int16, i32 => Int32, i64 => Int64);
impl_arbitrary_unsigned!(u8 => UInt8, u16 => UInt16, u32 => UInt32, u64 => UInt64);

impl Arbitrary for f32 {
    fn shape() -> TypeShape {
        TypeShape::Float32
    }

    fn from_value(value: GenValue) -> Result<Self, GenError> {
        value
            .as_f64()
            .map(|f| f as f32)
            .ok_or_else(|| mismatch::<Self>(&value))
    }

    fn into_value(self) -> GenValue {
        GenValue::Float(f64::from(self))
    }
}

impl Arbitrary for f64 {
    fn shape() -> TypeShape {
        TypeShape::Float64
    }

    fn from_value(value: GenValue) -> Result<Self, GenError> {
        value.as_f64().ok_or_else(|| mismatch::<Self>(&value))
    }

    fn into_value(self) -> GenValue {
        GenValue::Float(self)
    }
}

impl Arbitrary for String {
    fn shape() -> TypeShape {
        TypeShape::Text
    }

    fn from_value(value: GenValue) -> Result<Self, GenError> {
        match value {
            GenValue::Text(s) => Ok(s),
            other => Err(mismatch::<Self>(&other)),
        }
    }

    fn into_value(self) -> GenValue {
        GenValue::Text(self)
    }
}

impl Arbitrary for Uuid {
    fn shape() -> TypeShape {
        TypeShape::Uuid
    }

    fn from_value(value: GenValue) -> Result<Self, GenError> {
        match &value {
            GenValue::Uuid(u) => Ok(*u),
            GenValue::Text(s) => Uuid::parse_str(s).map_err(|_| mismatch::<Self>(&value)),
            _ => Err(mismatch::<Self>(&value)),
        }
    }

    fn into_value(self) -> GenValue {
        GenValue::Uuid(self)
    }
}

impl Arbitrary for DateTime<Utc> {
    fn shape() -> TypeShape {
        TypeShape::Timestamp
    }

    fn from_value(value: GenValue) -> Result<Self, GenError> {
        value
            .as_timestamp()
            .copied()
            .ok_or_else(|| mismatch::<Self>(&value))
    }

    fn into_value(self) -> GenValue {
        GenValue::Timestamp(self)
    }
}

impl<T: Arbitrary> Arbitrary for Option<T> {
    fn shape() -> TypeShape {
        TypeShape::optional(T::shape())
    }

    fn from_value(value: GenValue) -> Result<Self, GenError> {
        match value {
            GenValue::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }

    fn into_value(self) -> GenValue {
        self.map_or(GenValue::Null, T::into_value)
    }
}

impl<T: Arbitrary> Arbitrary for Vec<T> {
    fn shape() -> TypeShape {
        TypeShape::sequence(T::shape())
    }

    fn from_value(value: GenValue) -> Result<Self, GenError> {
        match value {
            GenValue::Array(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(mismatch::<Self>(&other)),
        }
    }

    fn into_value(self) -> GenValue {
        GenValue::Array(self.into_iter().map(T::into_value).collect())
    }
}

impl<K, V> Arbitrary for HashMap<K, V>
where
    K: Arbitrary + Eq + Hash,
    V: Arbitrary,
{
    fn shape() -> TypeShape {
        TypeShape::map(K::shape(), V::shape())
    }

    fn from_value(value: GenValue) -> Result<Self, GenError> {
        match value {
            GenValue::Map(entries) => entries
                .into_iter()
                .map(|(k, v)| Ok((K::from_value(k)?, V::from_value(v)?)))
                .collect(),
            other => Err(mismatch::<Self>(&other)),
        }
    }

    fn into_value(self) -> GenValue {
        GenValue::Map(
            self.into_iter()
                .map(|(k, v)| (k.into_value(), v.into_value()))
                .collect(),
        )
    }
}

impl<K, V> Arbitrary for BTreeMap<K, V>
where
    K: Arbitrary + Ord,
    V: Arbitrary,
{
    fn shape() -> TypeShape {
        TypeShape::map(K::shape(), V::shape())
    }

    fn from_value(value: GenValue) -> Result<Self, GenError> {
        match value {
            GenValue::Map(entries) => entries
                .into_iter()
                .map(|(k, v)| Ok((K::from_value(k)?, V::from_value(v)?)))
                .collect(),
            other => Err(mismatch::<Self>(&other)),
        }
    }

    fn into_value(self) -> GenValue {
        GenValue::Map(
            self.into_iter()
                .map(|(k, v)| (k.into_value(), v.into_value()))
                .collect(),
        )
    }
}
