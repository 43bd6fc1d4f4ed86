//! Lifecycle of registered dependencies

/// How often a registered resolver is invoked
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Invoked at most once per container, the result is cached
    Singleton,
    /// Invoked on every lookup
    #[default]
    Transient,
}

impl Lifecycle {
    /// Returns `true` for [`Lifecycle::Singleton`]
    #[inline]
    pub fn is_singleton(self) -> bool {
        matches!(self, Lifecycle::Singleton)
    }
}
