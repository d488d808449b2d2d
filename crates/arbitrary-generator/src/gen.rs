//! The shared generator handle.

use arbitrary_core::{GenError, GenParams, GenResult, GenValue, TypeShape};
use std::fmt;
use std::sync::Arc;

type SampleFn = dyn Fn(&mut GenParams) -> GenResult + Send + Sync;

struct GenInner {
    result_shape: TypeShape,
    sample: Box<SampleFn>,
}

/// A generator of values of one fixed [`TypeShape`].
///
/// `Gen` is an immutable handle around a sampling function. Cloning is cheap
/// and clones share the same underlying instance, which [`Gen::ptr_eq`]
/// observes. The produced shape is declared when the generator is built, so
/// it is known without invoking the generator.
#[derive(Clone)]
pub struct Gen {
    inner: Arc<GenInner>,
}

impl Gen {
    /// Create a generator from a function returning a full [`GenResult`].
    pub fn new<F>(result_shape: TypeShape, sample: F) -> Self
    where
        F: Fn(&mut GenParams) -> GenResult + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(GenInner {
                result_shape,
                sample: Box::new(sample),
            }),
        }
    }

    /// Create a generator from a function returning a value or an error.
    pub fn from_fn<F>(result_shape: TypeShape, sample: F) -> Self
    where
        F: Fn(&mut GenParams) -> Result<GenValue, GenError> + Send + Sync + 'static,
    {
        let shape = result_shape.clone();
        Self::new(result_shape, move |params| GenResult {
            result_shape: shape.clone(),
            labels: Vec::new(),
            value: sample(params),
        })
    }

    /// Generator that always yields `value`.
    pub fn constant(result_shape: TypeShape, value: GenValue) -> Self {
        Self::from_fn(result_shape, move |_| Ok(value.clone()))
    }

    /// Generator that fails every time it is invoked.
    ///
    /// Used to defer errors from construction time to sample time.
    pub fn failing(result_shape: TypeShape, error: GenError) -> Self {
        Self::from_fn(result_shape, move |_| Err(error.clone()))
    }

    /// Shape of the values this generator produces.
    pub fn result_shape(&self) -> &TypeShape {
        &self.inner.result_shape
    }

    /// Invoke the generator once.
    pub fn sample(&self, params: &mut GenParams) -> GenResult {
        (self.inner.sample)(params)
    }

    /// Wrap this generator so every result carries `label`.
    pub fn with_label(self, label: impl Into<String>) -> Self {
        let label = label.into();
        let shape = self.result_shape().clone();
        Self::new(shape, move |params| {
            self.sample(params).with_label(label.clone())
        })
    }

    /// Check whether two handles share the same generator instance.
    pub fn ptr_eq(a: &Gen, b: &Gen) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl fmt::Debug for Gen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gen")
            .field("result_shape", &self.inner.result_shape)
            .finish_non_exhaustive()
    }
}
