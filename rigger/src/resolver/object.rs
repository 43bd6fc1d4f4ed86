//! Object resolver: constructs instances and calls their methods

use crate::{
    Arg, Args, Callable, Context, FromArgs, IntoArg, Lifecycle, Method, Value,
    args::resolve_all,
    error::Error,
};
use std::{
    any::{Any, type_name},
    collections::HashMap,
    fmt::{Debug, Formatter},
    marker::PhantomData,
    sync::Arc,
};

type Instance = Box<
    dyn Any
    + Send
    + Sync
>;

type ConstructFn = Arc<
    dyn Fn(&mut Args) -> Result<Instance, Error>
    + Send
    + Sync
>;

type MethodFn = Arc<
    dyn Fn(&mut (dyn Any + Send + Sync + 'static), Args) -> Result<(), Error>
    + Send
    + Sync
>;

/// A trait for types that describe how to construct themselves
///
/// Usually derived with `#[derive(Construct)]` (requires the `macros` feature).
pub trait Construct: Sized + Send + Sync + 'static {
    /// Returns the class of `Self`
    fn class() -> Class<Self>;
}

/// Describes how to construct a `T` and which methods can be called on it afterwards
///
/// # Example
/// ```
/// use rigger::Class;
///
/// struct Counter {
///     start: i32,
///     steps: Vec<i32>,
/// }
///
/// let class = Class::new(|start: i32| Ok(Counter { start, steps: Vec::new() }))
///     .with_method("step", |c: &mut Counter, by: i32| {
///         c.steps.push(by);
///         Ok(())
///     });
///
/// assert_eq!(class.arity(), Some(1));
/// ```
pub struct Class<T> {
    inner: Constructor,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Class<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone(), _marker: PhantomData }
    }
}

impl<T> Debug for Class<T> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.inner.fmt(f)
    }
}

impl<T: Send + Sync + 'static> Class<T> {
    /// Creates a class from a constructor with typed parameters,
    /// the arity of the class is the number of parameters
    ///
    /// A constructor without parameters returns the instance itself and cannot fail:
    /// `Class::new(|| Ok::<_, Error>(x))` describes a `Class<Result<_, Error>>`.
    /// Use [`Class::from_args`] with [`Class::with_arity`]`(0)` for a fallible one.
    pub fn new<P, F>(ctor: F) -> Self
    where
        P: FromArgs + 'static,
        F: Callable<P, Output = T>,
    {
        Self::from_args(move |args| ctor.call(P::from_args(args)?))
            .with_arity(P::ARITY)
    }

    /// Creates a class from a constructor that reads its arguments itself,
    /// the arity is not checked unless set with [`Class::with_arity`]
    pub fn from_args<F>(ctor: F) -> Self
    where
        F: Fn(&mut Args) -> Result<T, Error> + Send + Sync + 'static,
    {
        let inner = Constructor {
            type_name: type_name::<T>(),
            arity: None,
            construct: erase_ctor(move |args| ctor(args).map(|instance| Box::new(instance) as Instance)),
            methods: HashMap::new(),
        };
        Self { inner, _marker: PhantomData }
    }

    /// Declares the number of constructor arguments
    #[inline]
    pub fn with_arity(mut self, arity: usize) -> Self {
        self.inner.arity = Some(arity);
        self
    }

    /// Declares a method that can be called after construction
    pub fn with_method<P, M>(mut self, name: &'static str, method: M) -> Self
    where
        P: FromArgs + 'static,
        M: Method<T, P>,
    {
        let method = erase_method(move |target, mut args| {
            check_arity(name, P::ARITY, args.len())?;
            let params = P::from_args(&mut args)?;
            let target = target
                .downcast_mut::<T>()
                .ok_or_else(|| Error::other(format!("{name} cannot be called on {}", type_name::<T>())))?;
            method.call(target, params)
        });
        self.inner.methods.insert(name, method);
        self
    }

    /// Returns the declared number of constructor arguments
    #[inline]
    pub fn arity(&self) -> Option<usize> {
        self.inner.arity
    }

    /// Erases the type of the class
    #[inline]
    pub fn into_constructor(self) -> Constructor {
        self.inner
    }
}

impl<T: Default + Send + Sync + 'static> Default for Class<T> {
    #[inline]
    fn default() -> Self {
        Self::new(T::default)
    }
}

impl<T> From<Class<T>> for Constructor {
    #[inline]
    fn from(class: Class<T>) -> Self {
        class.inner
    }
}

/// A type-erased [`Class`]
#[derive(Clone)]
pub struct Constructor {
    type_name: &'static str,
    arity: Option<usize>,
    construct: ConstructFn,
    methods: HashMap<&'static str, MethodFn>,
}

impl Debug for Constructor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut methods = self.methods.keys().collect::<Vec<_>>();
        methods.sort();
        f.debug_struct("Constructor")
            .field("type_name", &self.type_name)
            .field("arity", &self.arity)
            .field("methods", &methods)
            .finish()
    }
}

impl Constructor {
    /// Returns the type name of constructed instances
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns `true` if the class declares a method with this name
    #[inline]
    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    fn construct(&self, mut args: Args) -> Result<Instance, Error> {
        if let Some(expected) = self.arity {
            check_arity(self.type_name, expected, args.len())?;
        }
        (self.construct)(&mut args)
    }

    fn method(&self, name: &str) -> Result<&MethodFn, Error> {
        self.methods.get(name).ok_or_else(|| Error::MethodMissing {
            type_name: self.type_name,
            method: name.into(),
        })
    }
}

impl TryFrom<Value> for Constructor {
    type Error = Error;

    /// Extracts a [`Constructor`] stored as a value, fails with [`Error::InvalidConstructor`]
    /// if the value holds anything else
    #[inline]
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value.downcast_ref::<Constructor>()
            .cloned()
            .ok_or(Error::InvalidConstructor(value.type_name()))
    }
}

#[inline]
fn erase_ctor<F>(construct: F) -> ConstructFn
where
    F: Fn(&mut Args) -> Result<Instance, Error> + Send + Sync + 'static,
{
    Arc::new(construct)
}

#[inline]
fn erase_method<F>(method: F) -> MethodFn
where
    F: Fn(&mut (dyn Any + Send + Sync + 'static), Args) -> Result<(), Error> + Send + Sync + 'static,
{
    Arc::new(method)
}

#[inline]
fn check_arity(callee: &'static str, expected: usize, actual: usize) -> Result<(), Error> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::ArgumentCount { callee, expected, actual })
    }
}

#[derive(Debug, Clone)]
struct MethodCall {
    name: String,
    args: Vec<Arg>,
}

/// Creates objects of a class from configured constructor arguments,
/// then calls the configured methods in order
#[derive(Debug, Clone)]
pub struct ObjectResolver {
    constructor: Constructor,
    args: Vec<Arg>,
    calls: Vec<MethodCall>,
    lifecycle: Option<Lifecycle>,
}

impl ObjectResolver {
    /// Creates an object resolver with no constructor arguments
    #[inline]
    pub fn new(constructor: impl Into<Constructor>) -> Self {
        Self {
            constructor: constructor.into(),
            args: Vec::new(),
            calls: Vec::new(),
            lifecycle: None,
        }
    }

    /// Creates an object resolver from a value that must hold a [`Constructor`]
    #[inline]
    pub fn try_new(constructor: Value) -> Result<Self, Error> {
        Constructor::try_from(constructor).map(Self::new)
    }

    /// Replaces constructor arguments
    #[inline]
    pub fn construct(mut self, args: impl IntoIterator<Item = Arg>) -> Self {
        self.args = args.into_iter().collect();
        self
    }

    /// Appends one constructor argument
    #[inline]
    pub fn arg(mut self, arg: impl IntoArg) -> Self {
        self.args.push(arg.into_arg());
        self
    }

    /// Calls `name` with `args` after the object has been constructed
    ///
    /// Calls are made in the order they were added.
    #[inline]
    pub fn method(mut self, name: impl Into<String>, args: impl IntoIterator<Item = Arg>) -> Self {
        self.calls.push(MethodCall {
            name: name.into(),
            args: args.into_iter().collect(),
        });
        self
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

    pub(crate) fn resolve(&self, cx: &Context<'_>) -> Result<Value, Error> {
        let args = resolve_all(&self.args, cx)?;
        let mut instance = self.constructor.construct(args)?;

        for call in &self.calls {
            let method = self.constructor.method(&call.name)?;
            let args = resolve_all(&call.args, cx)?;
            method(instance.as_mut(), args)?;
        }

        Ok(Value::from_boxed(instance, self.constructor.type_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Container, Resolver, args, object, reference};

    #[derive(Debug, Default)]
    struct Bar;

    impl Bar {
        fn buzz(&self) -> &'static str {
            "buzz"
        }
    }

    #[derive(Debug)]
    struct Foo {
        name: String,
        service: Arc<Bar>,
        items: Vec<String>,
    }

    fn foo_class() -> Class<Foo> {
        Class::new(|name: String, service: Arc<Bar>| Ok(Foo { name, service, items: Vec::new() }))
            .with_method("add_item", |foo: &mut Foo, item: String| {
                foo.items.push(item);
                Ok(())
            })
    }

    fn resolve_foo(resolver: ObjectResolver, container: &Container) -> Result<Arc<Foo>, Error> {
        Resolver::from(resolver)
            .resolve(container)
            .map(|value| value.downcast::<Foo>().unwrap())
    }

    #[test]
    fn it_constructs_with_nested_resolvers() {
        let container = Container::new();
        let definition = object(foo_class()).construct(args!["My name is Foo", object(Class::<Bar>::default())]);

        let foo = resolve_foo(definition, &container).unwrap();

        assert_eq!(foo.name, "My name is Foo");
        assert_eq!(foo.service.buzz(), "buzz");
    }

    #[test]
    fn it_calls_methods_in_order() {
        let container = Container::new();
        let definition = object(foo_class())
            .construct(args!["string", crate::value(Bar)])
            .method("add_item", args!["item1"])
            .method("add_item", args!["item2"]);

        let foo = resolve_foo(definition, &container).unwrap();

        assert_eq!(foo.items, ["item1", "item2"]);
    }

    #[test]
    fn it_resolves_deps_while_calling_method() {
        let mut container = Container::new();
        container.add("key1", "value1").unwrap();

        let definition = object(foo_class())
            .arg("str")
            .arg(crate::value(Bar))
            .method("add_item", args![reference("key1")]);

        let foo = resolve_foo(definition, &container).unwrap();

        assert_eq!(foo.items, ["value1"]);
    }

    #[test]
    fn it_fails_if_method_does_not_exist() {
        let container = Container::new();
        let definition = object(Class::<Bar>::default()).method("undefined_method", args!["item1"]);

        let err = Resolver::from(definition).resolve(&container).unwrap_err();

        assert_eq!(err, Error::MethodMissing {
            type_name: type_name::<Bar>(),
            method: "undefined_method".into(),
        });
    }

    #[test]
    fn it_fails_on_constructor_argument_count() {
        let container = Container::new();
        let definition = object(foo_class()).construct(args!["only name"]);

        let err = resolve_foo(definition, &container).unwrap_err();

        assert_eq!(err, Error::ArgumentCount {
            callee: type_name::<Foo>(),
            expected: 2,
            actual: 1,
        });
    }

    #[test]
    fn it_fails_on_method_argument_count() {
        let container = Container::new();
        let definition = object(foo_class())
            .construct(args!["name", crate::value(Bar)])
            .method("add_item", args![]);

        let err = resolve_foo(definition, &container).unwrap_err();

        assert!(matches!(err, Error::ArgumentCount { callee: "add_item", expected: 1, actual: 0 }));
    }

    #[test]
    fn it_constructs_class_without_explicit_arguments() {
        let container = Container::new();

        let value = Resolver::from(object(Class::<Bar>::default()))
            .resolve(&container)
            .unwrap();

        assert!(value.is::<Bar>());
    }

    #[test]
    fn it_rejects_invalid_constructor() {
        for value in [Value::new(()), Value::new("abc"), Value::new(Bar)] {
            let err = ObjectResolver::try_new(value.clone()).unwrap_err();

            assert_eq!(err, Error::InvalidConstructor(value.type_name()));
        }
    }

    #[test]
    fn it_accepts_constructor_stored_as_value() {
        let container = Container::new();
        let stored = Value::new(Class::<Bar>::default().into_constructor());

        let resolver = ObjectResolver::try_new(stored).unwrap();
        let value = Resolver::from(resolver).resolve(&container).unwrap();

        assert!(value.is::<Bar>());
    }

    #[test]
    fn it_reports_failure_of_constructor_without_params() {
        let container = Container::new();
        let class = Class::<Bar>::from_args(|_| Err(Error::other("no connection"))).with_arity(0);

        let err = Resolver::from(object(class)).resolve(&container).unwrap_err();

        assert_eq!(err, Error::other("no connection"));
    }

    #[test]
    fn it_builds_instances_with_raw_args() {
        let container = Container::new();
        let class = Class::from_args(|args| {
            Ok(Foo {
                name: args.take()?,
                service: args.read()?,
                items: args.take()?,
            })
        });
        let definition = object(class).construct(args![
            "raw",
            crate::value(Bar),
            Value::new(vec![String::from("a")]),
        ]);

        let foo = resolve_foo(definition, &container).unwrap();

        assert_eq!(foo.name, "raw");
        assert_eq!(foo.items, ["a"]);
    }
}
