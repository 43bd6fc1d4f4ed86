//! Dependency Injection container and tools

use crate::{
    IntoResolver, Lifecycle, Name, Resolver, Value,
    error::Error,
    resolver::ReferenceResolver,
};
use indexmap::IndexMap;
use std::{
    any::type_name,
    fmt::{Debug, Formatter},
    sync::{Arc, OnceLock},
};

pub use self::{
    config::{CaptivePolicy, ContainerConfig},
    context::Context,
};
pub(crate) use self::path::Path;

pub mod config;
pub mod context;
mod path;

/// A registered resolver with its lifecycle and singleton cell
#[derive(Debug)]
struct Entry {
    resolver: Resolver,
    lifecycle: Lifecycle,
    cell: OnceLock<Value>,
}

impl Entry {
    #[inline]
    fn new(resolver: Resolver, lifecycle: Lifecycle) -> Self {
        Self { resolver, lifecycle, cell: OnceLock::new() }
    }

    #[inline]
    fn is_captive(&self) -> bool {
        !self.lifecycle.is_singleton() && matches!(
            self.resolver,
            Resolver::Object(_) | Resolver::Factory(_) | Resolver::Function(_)
        )
    }
}

/// Inner map of dependencies, kept in registration order
type EntryMap = IndexMap<Name, Entry>;

/// Represents a DI container that holds named resolvers
/// and builds the object graph on demand.
///
/// # Example
/// ```
/// use rigger::{Class, Container, args, object};
/// use std::sync::Arc;
///
/// struct Bar;
/// struct Foo {
///     name: String,
///     bar: Arc<Bar>,
/// }
///
/// let mut container = Container::new();
/// let bar = container.reference("bar");
/// container
///     .add("bar", object(Class::new(|| Bar)).singleton())?
///     .add("foo", object(Class::new(|name: String, bar: Arc<Bar>| Ok(Foo { name, bar })))
///         .construct(args!["x", bar]))?;
///
/// let first = container.get::<Foo>("foo")?;
/// let second = container.get::<Foo>("foo")?;
///
/// assert!(!Arc::ptr_eq(&first, &second));
/// assert!(Arc::ptr_eq(&first.bar, &second.bar));
/// # Ok::<(), rigger::error::Error>(())
/// ```
pub struct Container {
    entries: EntryMap,
    config: ContainerConfig,
}

impl Debug for Container {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .field("config", &self.config)
            .finish()
    }
}

impl Default for Container {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Container {
    /// Creates an empty container with the default configuration
    #[inline]
    pub fn new() -> Self {
        Self::with_config(ContainerConfig::default())
    }

    /// Creates an empty container with a specific configuration
    #[inline]
    pub fn with_config(config: ContainerConfig) -> Self {
        Self { entries: EntryMap::new(), config }
    }

    /// Returns the container configuration
    #[inline]
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// Registers a resolver or a literal value under `name`
    ///
    /// Literals are stored as raw values. Registering the same name twice fails with
    /// [`Error::DuplicateRegistration`] and keeps the first registration.
    pub fn add(&mut self, name: impl Into<Name>, resolver: impl IntoResolver) -> Result<&mut Self, Error> {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(Error::DuplicateRegistration(name));
        }

        let resolver = resolver.into_resolver();
        let lifecycle = self.lifecycle_of(&resolver);

        tracing::trace!(name = %name, kind = resolver.kind(), ?lifecycle, "dependency registered");

        self.entries.insert(name, Entry::new(resolver, lifecycle));
        Ok(self)
    }

    /// Registers every `(name, resolver)` pair in iteration order
    ///
    /// Stops at the first failure, pairs registered before it stay registered.
    pub fn add_all<I, N, R>(&mut self, entries: I) -> Result<&mut Self, Error>
    where
        I: IntoIterator<Item = (N, R)>,
        N: Into<Name>,
        R: IntoResolver,
    {
        for (name, resolver) in entries {
            self.add(name, resolver)?;
        }
        Ok(self)
    }

    /// Resolves a dependency as a shared `T`
    ///
    /// Fails with [`Error::TypeMismatch`] if the resolved value is not a `T`.
    #[inline]
    pub fn get<T: Send + Sync + 'static>(&self, name: impl AsRef<str>) -> Result<Arc<T>, Error> {
        let name = name.as_ref();
        let value = self.get_value(name)?;
        downcast(name, value)
    }

    /// Resolves a dependency and clones it
    #[inline]
    pub fn resolve<T: Clone + Send + Sync + 'static>(&self, name: impl AsRef<str>) -> Result<T, Error> {
        self.get::<T>(name).map(|value| value.as_ref().clone())
    }

    /// Resolves a dependency as an untyped [`Value`]
    #[inline]
    pub fn get_value(&self, name: impl AsRef<str>) -> Result<Value, Error> {
        let path = Path::default();
        self.resolve_entry(name.as_ref(), &path)
    }

    /// Creates a resolver that delegates to `name`, without resolving anything
    #[inline]
    pub fn reference(&self, name: impl Into<Name>) -> ReferenceResolver {
        ReferenceResolver::new(name)
    }

    /// Returns `true` if `name` is registered
    #[inline]
    pub fn contains(&self, name: impl AsRef<str>) -> bool {
        self.entries.contains_key(name.as_ref())
    }

    /// Returns registered names in registration order
    #[inline]
    pub fn names(&self) -> impl Iterator<Item = &Name> {
        self.entries.keys()
    }

    /// Returns the lifecycle `name` was registered with
    #[inline]
    pub fn lifecycle(&self, name: impl AsRef<str>) -> Option<Lifecycle> {
        self.entries
            .get(name.as_ref())
            .map(|entry| entry.lifecycle)
    }

    /// Returns the number of registered names
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if the singleton registered under `name` has been built
    #[inline]
    pub fn is_cached(&self, name: impl AsRef<str>) -> bool {
        self.entries
            .get(name.as_ref())
            .is_some_and(|entry| entry.cell.get().is_some())
    }

    /// Drops every cached singleton, registrations stay in place
    ///
    /// Singletons are built again on the next lookup.
    pub fn reset(&mut self) {
        for entry in self.entries.values_mut() {
            entry.cell.take();
        }
        tracing::debug!("singleton cache cleared");
    }

    #[inline]
    fn lifecycle_of(&self, resolver: &Resolver) -> Lifecycle {
        match resolver {
            Resolver::Reference(r) => r.lifecycle().unwrap_or(Lifecycle::Transient),
            resolver => resolver
                .lifecycle()
                .unwrap_or(self.config.default_lifecycle()),
        }
    }

    /// Resolves `name` as part of the lookup described by `path`
    pub(crate) fn resolve_entry(&self, name: &str, path: &Path) -> Result<Value, Error> {
        let Some((key, entry)) = self.entries.get_key_value(name) else {
            return Err(Error::DependencyMissing(Name::from(name.to_owned())));
        };

        if path.contains(name) {
            return Err(Error::CircularDependency { name: key.clone(), path: path.names() });
        }

        if let Some(value) = entry.cell.get() {
            tracing::trace!(name, "singleton cache hit");
            return Ok(value.clone());
        }

        if entry.is_captive() && let Some(owner) = path.nearest_singleton() {
            match self.config.captive_policy() {
                CaptivePolicy::Allow => (),
                CaptivePolicy::Warn => tracing::warn!(
                    name,
                    owner = %owner,
                    "transient dependency is captured by a singleton"
                ),
                CaptivePolicy::Deny => return Err(Error::CaptiveDependency { name: key.clone(), owner }),
            }
        }

        tracing::trace!(name, kind = entry.resolver.kind(), "resolving dependency");

        let value = {
            let _frame = path.enter(key.clone(), entry.lifecycle);
            entry.resolver.resolve_with(&Context::new(self, path))?
        };

        if entry.lifecycle.is_singleton() {
            tracing::debug!(name, type_name = value.type_name(), "singleton created");
            Ok(entry.cell.get_or_init(|| value).clone())
        } else {
            Ok(value)
        }
    }
}

#[inline]
pub(crate) fn downcast<T: Send + Sync + 'static>(name: &str, value: Value) -> Result<Arc<T>, Error> {
    value.downcast::<T>().ok_or_else(|| Error::TypeMismatch {
        name: Name::from(name.to_owned()),
        expected: type_name::<T>(),
        found: value.type_name(),
    })
}
