//! Factory resolver

use crate::{Context, Lifecycle, Value, error::Error};
use std::{
    any::type_name,
    fmt::{Debug, Formatter},
    sync::Arc,
};

type FactoryFn = Arc<
    dyn Fn(&Context<'_>) -> Result<Value, Error>
    + Send
    + Sync
>;

/// A type-erased callback that builds a value from a resolution [`Context`]
#[derive(Clone)]
pub struct Factory {
    output: &'static str,
    call: FactoryFn,
}

impl Debug for Factory {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Factory(.. -> {})", self.output)
    }
}

impl Factory {
    /// Wraps a callback
    pub fn new<T, F>(factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&Context<'_>) -> Result<T, Error> + Send + Sync + 'static,
    {
        Self {
            output: type_name::<T>(),
            call: erase(move |cx| factory(cx).map(Value::new)),
        }
    }

    /// Returns the type name of the produced value
    #[inline]
    pub fn output(&self) -> &'static str {
        self.output
    }
}

#[inline]
fn erase<F>(call: F) -> FactoryFn
where
    F: Fn(&Context<'_>) -> Result<Value, Error> + Send + Sync + 'static,
{
    Arc::new(call)
}

impl TryFrom<Value> for Factory {
    type Error = Error;

    /// Extracts a [`Factory`] stored as a value, fails with [`Error::InvalidFactory`]
    /// if the value holds anything else
    #[inline]
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value.downcast_ref::<Factory>()
            .cloned()
            .ok_or(Error::InvalidFactory(value.type_name()))
    }
}

/// Calls a custom callback to build a dependency
///
/// Whatever the callback returns, including a pending [`Deferred`](crate::Deferred) value,
/// is passed through without being awaited.
#[derive(Debug, Clone)]
pub struct FactoryResolver {
    factory: Factory,
    lifecycle: Option<Lifecycle>,
}

impl FactoryResolver {
    /// Creates a factory resolver
    #[inline]
    pub fn new(factory: Factory) -> Self {
        Self { factory, lifecycle: None }
    }

    /// Creates a factory resolver from a value that must hold a [`Factory`]
    #[inline]
    pub fn try_new(factory: Value) -> Result<Self, Error> {
        Factory::try_from(factory).map(Self::new)
    }

    /// Marks this resolver as [`Lifecycle::Singleton`]
    #[inline]
    pub fn singleton(self) -> Self {
        self.with_lifecycle(Lifecycle::Singleton)
    }

    /// Marks this resolver as [`Lifecycle::Transient`]
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
        (self.factory.call)(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Container, Resolver, factory};

    #[test]
    fn it_passes_container_to_callback() {
        let mut container = Container::new();
        container.add("dsn", "DSN-secret").unwrap();

        let resolver = Resolver::from(factory(|cx| {
            let dsn = cx.resolve::<String>("dsn")?;
            Ok(format!("connected to {dsn}"))
        }));

        let value = resolver.resolve(&container).unwrap();

        assert_eq!(value.downcast_ref::<String>().unwrap(), "connected to DSN-secret");
    }

    #[test]
    fn it_propagates_callback_error() {
        let container = Container::new();

        let resolver = Resolver::from(factory(|_| -> Result<(), Error> {
            Err(Error::other("connection refused"))
        }));

        assert_eq!(resolver.resolve(&container).unwrap_err(), Error::other("connection refused"));
    }

    #[test]
    fn it_rejects_non_factory_value() {
        let err = FactoryResolver::try_new(Value::new("not a function")).unwrap_err();

        assert_eq!(err, Error::InvalidFactory("&str"));
    }

    #[test]
    fn it_accepts_factory_stored_as_value() {
        let container = Container::new();
        let stored = Value::new(Factory::new(|_| Ok(7u8)));

        let resolver = FactoryResolver::try_new(stored).unwrap();
        let value = Resolver::from(resolver).resolve(&container).unwrap();

        assert_eq!(value.downcast_ref::<u8>(), Some(&7));
        assert_eq!(Factory::new(|_| Ok(7u8)).output(), "u8");
    }
}
