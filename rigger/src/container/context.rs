//! Resolution context handed to factories and nested resolvers

use super::{Container, Path};
use crate::{Name, Value, error::Error};
use std::sync::Arc;

/// A view of the [`Container`] bound to the current resolution path
///
/// Every lookup made through a context takes part in cycle detection
/// of the lookup that invoked the factory.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    container: &'a Container,
    path: &'a Path,
}

impl<'a> Context<'a> {
    #[inline]
    pub(crate) fn new(container: &'a Container, path: &'a Path) -> Self {
        Self { container, path }
    }

    /// Returns the names currently being resolved, outermost first
    #[inline]
    pub fn path(&self) -> Vec<Name> {
        self.path.names()
    }

    /// Returns `true` if `name` is registered
    #[inline]
    pub fn contains(&self, name: impl AsRef<str>) -> bool {
        self.container.contains(name)
    }

    /// Resolves a dependency as a shared `T`
    #[inline]
    pub fn get<T: Send + Sync + 'static>(&self, name: impl AsRef<str>) -> Result<Arc<T>, Error> {
        let name = name.as_ref();
        let value = self.get_value(name)?;
        super::downcast(name, value)
    }

    /// Resolves a dependency and clones it
    #[inline]
    pub fn resolve<T: Clone + Send + Sync + 'static>(&self, name: impl AsRef<str>) -> Result<T, Error> {
        self.get::<T>(name).map(|value| value.as_ref().clone())
    }

    /// Resolves a dependency as an untyped [`Value`]
    #[inline]
    pub fn get_value(&self, name: impl AsRef<str>) -> Result<Value, Error> {
        self.container.resolve_entry(name.as_ref(), self.path)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Container, Name, error::Error, factory};

    #[test]
    fn it_detects_cycle_between_factories() {
        let mut container = Container::new();
        container
            .add("foo", factory(|cx| cx.get::<u8>("bar").map(|bar| *bar))).unwrap()
            .add("bar", factory(|cx| cx.get::<u8>("foo").map(|foo| *foo))).unwrap();

        let err = container.get_value("foo").unwrap_err();

        assert_eq!(err, Error::CircularDependency {
            name: Name::from("foo"),
            path: vec![Name::from("foo"), Name::from("bar")],
        });
    }

    #[test]
    fn it_sees_outer_frames_in_nested_factory() {
        let mut container = Container::new();
        container
            .add("outer", factory(|cx| cx.resolve::<usize>("inner"))).unwrap()
            .add("inner", factory(|cx| Ok(cx.path().len()))).unwrap();

        assert_eq!(container.resolve::<usize>("outer").unwrap(), 2);
        assert_eq!(container.resolve::<usize>("inner").unwrap(), 1);
    }

    #[test]
    fn it_checks_registration_through_context() {
        let mut container = Container::new();
        container
            .add("dsn", "secret").unwrap()
            .add("flags", factory(|cx| Ok((cx.contains("dsn"), cx.contains("missing"))))).unwrap();

        assert_eq!(container.resolve::<(bool, bool)>("flags").unwrap(), (true, false));
    }
}
