//! Container configuration

use crate::Lifecycle;

/// What to do when a transient dependency is resolved while a singleton is being built
///
/// The transient instance ends up living as long as the singleton that captured it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CaptivePolicy {
    /// Resolve silently
    Allow,
    /// Resolve and emit a `tracing` warning
    #[default]
    Warn,
    /// Fail with [`Error::CaptiveDependency`](crate::error::Error::CaptiveDependency)
    Deny,
}

/// Per-container settings
#[derive(Debug, Default, Clone, Copy)]
pub struct ContainerConfig {
    /// Lifecycle of object, factory and function resolvers that do not set one
    ///
    /// Default: [`Lifecycle::Transient`]
    default_lifecycle: Lifecycle,

    /// Handling of transient dependencies captured by singletons
    ///
    /// Default: [`CaptivePolicy::Warn`]
    captive_policy: CaptivePolicy,
}

impl ContainerConfig {
    /// Creates a default container configuration
    ///
    /// Defaults:
    /// - default_lifecycle: [`Lifecycle::Transient`]
    /// - captive_policy: [`CaptivePolicy::Warn`]
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the lifecycle used by resolvers that do not set one explicitly
    ///
    /// Raw values stay singleton and references stay transient regardless.
    ///
    /// Default: [`Lifecycle::Transient`]
    #[inline]
    pub fn with_default_lifecycle(mut self, lifecycle: Lifecycle) -> Self {
        self.default_lifecycle = lifecycle;
        self
    }

    /// Configures how transient dependencies of singletons are handled
    ///
    /// Default: [`CaptivePolicy::Warn`]
    #[inline]
    pub fn with_captive_policy(mut self, policy: CaptivePolicy) -> Self {
        self.captive_policy = policy;
        self
    }

    /// Returns the default lifecycle
    #[inline]
    pub fn default_lifecycle(&self) -> Lifecycle {
        self.default_lifecycle
    }

    /// Returns the captive dependency policy
    #[inline]
    pub fn captive_policy(&self) -> CaptivePolicy {
        self.captive_policy
    }
}
