//! Resolvers: configured recipes that produce a value given a container

use crate::{
    Arg, Callable, Container, Context, FromArgs, IntoArg, Lifecycle, Name, Value,
    container::Path,
    error::Error,
};

pub use self::{
    factory::{Factory, FactoryResolver},
    function::{Function, FunctionResolver},
    object::{Class, Construct, Constructor, ObjectResolver},
    raw::RawValue,
    reference::ReferenceResolver,
};

pub mod factory;
pub mod function;
pub mod object;
pub mod raw;
pub mod reference;

/// A recipe that produces a value given a [`Container`]
///
/// # Example
/// ```
/// use rigger::{Container, Resolver, args, func, reference};
///
/// let mut container = Container::new();
/// container.add("n", 3).unwrap();
///
/// let resolver: Resolver = func(|s: String, n: i32| Ok(format!("{s}{n}")), args!["20", reference("n")]).into();
/// let value = resolver.resolve(&container).unwrap();
///
/// assert_eq!(value.downcast_ref::<String>().unwrap(), "203");
/// ```
#[derive(Debug, Clone)]
pub enum Resolver {
    /// Returns a stored value
    Value(RawValue),
    /// Constructs an instance and calls its methods
    Object(ObjectResolver),
    /// Calls a callback with the container
    Factory(FactoryResolver),
    /// Calls a function with resolved arguments
    Function(FunctionResolver),
    /// Delegates to another registered name
    Reference(ReferenceResolver),
}

impl Resolver {
    /// Returns the lifecycle configured on this resolver, if any
    ///
    /// Raw values are always [`Lifecycle::Singleton`].
    #[inline]
    pub fn lifecycle(&self) -> Option<Lifecycle> {
        match self {
            Resolver::Value(_) => Some(Lifecycle::Singleton),
            Resolver::Object(r) => r.lifecycle(),
            Resolver::Factory(r) => r.lifecycle(),
            Resolver::Function(r) => r.lifecycle(),
            Resolver::Reference(r) => r.lifecycle(),
        }
    }

    /// Marks this resolver as [`Lifecycle::Singleton`]
    #[inline]
    pub fn singleton(self) -> Self {
        self.with_lifecycle(Lifecycle::Singleton)
    }

    /// Marks this resolver as [`Lifecycle::Transient`], raw values ignore it
    #[inline]
    pub fn transient(self) -> Self {
        self.with_lifecycle(Lifecycle::Transient)
    }

    fn with_lifecycle(self, lifecycle: Lifecycle) -> Self {
        match self {
            Resolver::Value(r) => Resolver::Value(r),
            Resolver::Object(r) => Resolver::Object(r.with_lifecycle(lifecycle)),
            Resolver::Factory(r) => Resolver::Factory(r.with_lifecycle(lifecycle)),
            Resolver::Function(r) => Resolver::Function(r.with_lifecycle(lifecycle)),
            Resolver::Reference(r) => Resolver::Reference(r.with_lifecycle(lifecycle)),
        }
    }

    /// Returns a short name of the variant
    #[inline]
    pub fn kind(&self) -> &'static str {
        match self {
            Resolver::Value(_) => "value",
            Resolver::Object(_) => "object",
            Resolver::Factory(_) => "factory",
            Resolver::Function(_) => "function",
            Resolver::Reference(_) => "reference",
        }
    }

    /// Resolves this resolver against `container` with an empty resolution path
    #[inline]
    pub fn resolve(&self, container: &Container) -> Result<Value, Error> {
        let path = Path::default();
        self.resolve_with(&Context::new(container, &path))
    }

    pub(crate) fn resolve_with(&self, cx: &Context<'_>) -> Result<Value, Error> {
        match self {
            Resolver::Value(r) => Ok(r.value().clone()),
            Resolver::Object(r) => r.resolve(cx),
            Resolver::Factory(r) => r.resolve(cx),
            Resolver::Function(r) => r.resolve(cx),
            Resolver::Reference(r) => r.resolve(cx),
        }
    }
}

/// A trait for types that can be registered in a [`Container`]
///
/// Resolvers are registered as is, anything else is wrapped into a [`RawValue`].
/// String slices are stored as [`String`].
pub trait IntoResolver {
    /// Converts `self` into a resolver
    fn into_resolver(self) -> Resolver;
}

impl IntoResolver for Resolver {
    #[inline]
    fn into_resolver(self) -> Resolver {
        self
    }
}

impl IntoResolver for Value {
    #[inline]
    fn into_resolver(self) -> Resolver {
        match self.downcast_ref::<Resolver>() {
            Some(resolver) => resolver.clone(),
            None => Resolver::Value(RawValue::new(self)),
        }
    }
}

impl IntoResolver for &'static str {
    #[inline]
    fn into_resolver(self) -> Resolver {
        value(String::from(self))
    }
}

macro_rules! define_literal_resolver {
    ($($type:ty)*) => {
        $(impl IntoResolver for $type {
            #[inline]
            fn into_resolver(self) -> Resolver {
                value(self)
            }
        })*
    };
}

define_literal_resolver! {
    bool char
    i8 i16 i32 i64 i128 isize
    u8 u16 u32 u64 u128 usize
    f32 f64
    String
}

macro_rules! define_resolver_variant {
    ($($variant:ident => $type:ty),* $(,)?) => {
        $(
        impl From<$type> for Resolver {
            #[inline]
            fn from(resolver: $type) -> Self {
                Resolver::$variant(resolver)
            }
        }

        impl IntoResolver for $type {
            #[inline]
            fn into_resolver(self) -> Resolver {
                Resolver::$variant(self)
            }
        }

        impl IntoArg for $type {
            #[inline]
            fn into_arg(self) -> Arg {
                Resolver::$variant(self).into_arg()
            }
        }
        )*
    };
}

define_resolver_variant! {
    Value => RawValue,
    Object => ObjectResolver,
    Factory => FactoryResolver,
    Function => FunctionResolver,
    Reference => ReferenceResolver,
}

/// Creates a resolver that returns `value`, stored exactly as given
#[inline]
pub fn value<T: Send + Sync + 'static>(value: T) -> Resolver {
    Resolver::Value(RawValue::new(Value::new(value)))
}

/// Creates a resolver that constructs instances of a class
///
/// # Example
/// ```
/// use rigger::{Class, Container, args, object};
///
/// struct Foo {
///     name: String,
///     items: Vec<String>,
/// }
///
/// let class = Class::new(|name: String| Ok(Foo { name, items: Vec::new() }))
///     .with_method("add_item", |foo: &mut Foo, item: String| {
///         foo.items.push(item);
///         Ok(())
///     });
///
/// let mut container = Container::new();
/// container.add("foo", object(class)
///     .construct(args!["foo"])
///     .method("add_item", args!["item1"])
///     .method("add_item", args!["item2"])).unwrap();
///
/// let foo = container.get::<Foo>("foo").unwrap();
/// assert_eq!(foo.name, "foo");
/// assert_eq!(foo.items, ["item1", "item2"]);
/// ```
#[inline]
pub fn object(constructor: impl Into<Constructor>) -> ObjectResolver {
    ObjectResolver::new(constructor)
}

/// Creates a resolver that constructs instances of a [`Construct`] type
#[inline]
pub fn object_of<T: Construct>() -> ObjectResolver {
    ObjectResolver::new(T::class())
}

/// Creates a resolver that calls `factory` with a resolution [`Context`]
///
/// The returned value is passed through verbatim.
#[inline]
pub fn factory<T, F>(factory: F) -> FactoryResolver
where
    T: Send + Sync + 'static,
    F: Fn(&Context<'_>) -> Result<T, Error> + Send + Sync + 'static,
{
    FactoryResolver::new(Factory::new(factory))
}

/// Creates a resolver that calls `function` with typed parameters
/// extracted from resolved `args`
#[inline]
pub fn func<P, F>(function: F, args: impl IntoIterator<Item = Arg>) -> FunctionResolver
where
    P: FromArgs + 'static,
    F: Callable<P>,
    F::Output: Send + Sync + 'static,
{
    FunctionResolver::new(Function::new(function)).construct(args)
}

/// Creates a resolver that calls `function` with the raw resolved [`Args`](crate::Args)
#[inline]
pub fn func_with<T, F>(function: F, args: impl IntoIterator<Item = Arg>) -> FunctionResolver
where
    T: Send + Sync + 'static,
    F: Fn(&mut crate::Args) -> Result<T, Error> + Send + Sync + 'static,
{
    FunctionResolver::new(Function::from_args(function)).construct(args)
}

/// Creates a resolver that delegates to another registered name
#[inline]
pub fn reference(name: impl Into<Name>) -> ReferenceResolver {
    ReferenceResolver::new(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    #[test]
    fn it_wraps_literals_as_raw_values() {
        let resolver = 123.into_resolver();

        assert_eq!(resolver.kind(), "value");
        assert_eq!(resolver.lifecycle(), Some(Lifecycle::Singleton));
    }

    #[test]
    fn it_does_not_wrap_resolvers_twice() {
        let resolver = Value::new(Resolver::from(reference("foo"))).into_resolver();

        assert_eq!(resolver.kind(), "reference");
    }

    #[test]
    fn it_keeps_raw_values_singleton() {
        let resolver = value(1).transient();

        assert_eq!(resolver.lifecycle(), Some(Lifecycle::Singleton));
    }

    #[test]
    fn it_sets_lifecycle_on_resolvers() {
        let resolver = Resolver::from(func(|| 1, args![])).singleton();
        assert_eq!(resolver.lifecycle(), Some(Lifecycle::Singleton));

        let resolver = Resolver::from(func(|| 1, args![]));
        assert_eq!(resolver.lifecycle(), None);
    }

    #[test]
    fn it_resolves_raw_value_without_container_entries() {
        let container = Container::new();

        let value = value("abc").resolve(&container).unwrap();

        assert_eq!(value.downcast_ref::<&str>(), Some(&"abc"));
    }
}
