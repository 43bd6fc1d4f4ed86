//! Reference resolver

use crate::{Context, Lifecycle, Name, Value, error::Error};

/// Refers to an existing registration, i.e. a resolver with the target name
/// must be registered in the container by the time it is resolved
#[derive(Debug, Clone)]
pub struct ReferenceResolver {
    target: Name,
    lifecycle: Option<Lifecycle>,
}

impl ReferenceResolver {
    /// Creates a reference to `target`
    #[inline]
    pub fn new(target: impl Into<Name>) -> Self {
        Self { target: target.into(), lifecycle: None }
    }

    /// Returns the referenced name
    #[inline]
    pub fn target(&self) -> &Name {
        &self.target
    }

    /// Caches the referenced value under the reference's own name
    #[inline]
    pub fn singleton(self) -> Self {
        self.with_lifecycle(Lifecycle::Singleton)
    }

    /// Looks the referenced value up on every resolution
    #[inline]
    pub fn transient(self) -> Self {
        self.with_lifecycle(Lifecycle::Transient)
    }

    #[inline]
    pub(crate) fn with_lifecycle(mut self, lifecycle: Lifecycle) -> Self {
        self.lifecycle = Some(lifecycle);
        self
    }

    #[inline]
    pub(crate) fn lifecycle(&self) -> Option<Lifecycle> {
        self.lifecycle
    }

    #[inline]
    pub(crate) fn resolve(&self, cx: &Context<'_>) -> Result<Value, Error> {
        cx.get_value(&self.target)
    }
}
