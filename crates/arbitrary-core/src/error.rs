//! Generation-time errors.

/// Error produced when a generator cannot produce, or a caller cannot use, a value.
///
/// These errors travel inside [`GenResult`](crate::GenResult) rather than
/// being returned from registry lookups: resolving a generator always
/// succeeds, and failures surface only when a sample is requested.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenError {
    /// No registered generator and no structural strategy exists for the shape
    #[error("No generation strategy for type: {shape}")]
    UnsupportedKind { shape: String },

    /// A choice generator was given nothing to choose from
    #[error("Nothing to choose from for type: {shape}")]
    EmptyChoice { shape: String },

    /// A generated value does not have the type the caller asked for
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// A range generator was built with unusable bounds
    #[error("Invalid range: {0}")]
    InvalidRange(String),
}

impl GenError {
    /// Create a type mismatch error from anything displayable.
    pub fn mismatch(expected: impl ToString, found: impl ToString) -> Self {
        Self::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}
