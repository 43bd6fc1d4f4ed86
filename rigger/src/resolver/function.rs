//! Function resolver

use crate::{
    Arg, Args, Callable, Context, FromArgs, Lifecycle, Value,
    args::resolve_all,
    error::Error,
};
use std::{
    any::type_name,
    fmt::{Debug, Formatter},
    sync::Arc,
};

type FunctionFn = Arc<
    dyn Fn(&mut Args) -> Result<Value, Error>
    + Send
    + Sync
>;

/// A type-erased function called with resolved arguments
///
/// Named after the type it produces.
#[derive(Clone)]
pub struct Function {
    name: &'static str,
    arity: Option<usize>,
    call: FunctionFn,
}

impl Debug for Function {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

impl Function {
    /// Wraps a function with typed parameters, its arity is checked before every call
    pub fn new<P, F>(function: F) -> Self
    where
        P: FromArgs + 'static,
        F: Callable<P>,
        F::Output: Send + Sync + 'static,
    {
        Self {
            name: type_name::<F::Output>(),
            arity: Some(P::ARITY),
            call: erase(move |args| {
                let params = P::from_args(args)?;
                function.call(params).map(Value::new)
            }),
        }
    }

    /// Wraps a function that reads its arguments itself
    pub fn from_args<T, F>(function: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&mut Args) -> Result<T, Error> + Send + Sync + 'static,
    {
        Self {
            name: type_name::<T>(),
            arity: None,
            call: erase(move |args| function(args).map(Value::new)),
        }
    }

    /// Returns the declared number of parameters, if known
    #[inline]
    pub fn arity(&self) -> Option<usize> {
        self.arity
    }

    pub(crate) fn call(&self, mut args: Args) -> Result<Value, Error> {
        if let Some(expected) = self.arity && expected != args.len() {
            return Err(Error::ArgumentCount {
                callee: self.name,
                expected,
                actual: args.len(),
            });
        }
        (self.call)(&mut args)
    }
}

#[inline]
fn erase<F>(call: F) -> FunctionFn
where
    F: Fn(&mut Args) -> Result<Value, Error> + Send + Sync + 'static,
{
    Arc::new(call)
}

impl TryFrom<Value> for Function {
    type Error = Error;

    /// Extracts a [`Function`] stored as a value, fails with [`Error::InvalidFactory`]
    /// if the value holds anything else
    #[inline]
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value.downcast_ref::<Function>()
            .cloned()
            .ok_or(Error::InvalidFactory(value.type_name()))
    }
}

/// Calls a function with configured arguments, where arguments are either
/// literals or references to existing dependencies
#[derive(Debug, Clone)]
pub struct FunctionResolver {
    function: Function,
    args: Vec<Arg>,
    lifecycle: Option<Lifecycle>,
}

impl FunctionResolver {
    /// Creates a function resolver without arguments
    #[inline]
    pub fn new(function: Function) -> Self {
        Self { function, args: Vec::new(), lifecycle: None }
    }

    /// Creates a function resolver from a value that must hold a [`Function`]
    #[inline]
    pub fn try_new(function: Value) -> Result<Self, Error> {
        Function::try_from(function).map(Self::new)
    }

    /// Replaces the arguments the function is called with
    #[inline]
    pub fn construct(mut self, args: impl IntoIterator<Item = Arg>) -> Self {
        self.args = args.into_iter().collect();
        self
    }

    /// Appends one argument
    #[inline]
    pub fn arg(mut self, arg: impl crate::IntoArg) -> Self {
        self.args.push(arg.into_arg());
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
        self.function.call(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Container, Resolver, args, func, func_with, reference};

    struct Logger;

    impl Logger {
        fn info(&self, message: &str) -> String {
            format!("INFO {message}")
        }
    }

    #[test]
    fn it_resolves_function_lazily() {
        let container = Container::new();

        let value = Resolver::from(func(|| "A", args![]))
            .resolve(&container)
            .unwrap();

        assert_eq!(value.downcast_ref::<&str>(), Some(&"A"));
    }

    #[test]
    fn it_accepts_raw_values_as_parameters() {
        let container = Container::new();

        let value = Resolver::from(func(|s: String| Ok(s), args!["abc"]))
            .resolve(&container)
            .unwrap();

        assert_eq!(value.downcast_ref::<String>().unwrap(), "abc");
    }

    #[test]
    fn it_accepts_references_as_parameters() {
        type ProcessTask = Box<dyn Fn(&str) -> String + Send + Sync>;

        let mut container = Container::new();
        container.add("Logger", crate::value(Logger)).unwrap();

        let resolver = Resolver::from(func(
            |logger: Arc<Logger>| Ok(Box::new(move |task: &str| logger.info(task)) as ProcessTask),
            args![reference("Logger")],
        ));

        let process = resolver.resolve(&container).unwrap();
        let process = process.downcast_ref::<ProcessTask>().unwrap();

        assert_eq!(process("task 1 finished"), "INFO task 1 finished");
    }

    #[test]
    fn it_accepts_raw_and_references_as_parameters() {
        let mut container = Container::new();
        container.add("n", 3).unwrap();

        let value = Resolver::from(func(|s: String, n: i32| Ok(format!("{s}{n}")), args!["20", reference("n")]))
            .resolve(&container)
            .unwrap();

        assert_eq!(value.downcast_ref::<String>().unwrap(), "203");
    }

    #[test]
    fn it_checks_arity() {
        let container = Container::new();

        let err = Resolver::from(func(|s: String| Ok(s), args!["a", "b"]))
            .resolve(&container)
            .unwrap_err();

        assert_eq!(err, Error::ArgumentCount {
            callee: "alloc::string::String",
            expected: 1,
            actual: 2,
        });
    }

    #[test]
    fn it_reads_raw_arguments() {
        let container = Container::new();

        let value = Resolver::from(func_with(|args| {
            let mut sum = 0i64;
            while args.remaining() > 0 {
                sum += args.read::<i64>()?;
            }
            Ok(sum)
        }, args![1i64, 2i64, 3i64]))
            .resolve(&container)
            .unwrap();

        assert_eq!(value.downcast_ref::<i64>(), Some(&6));
    }

    #[test]
    fn it_rejects_non_function_value() {
        let err = FunctionResolver::try_new(Value::new(42)).unwrap_err();

        assert_eq!(err, Error::InvalidFactory("i32"));
    }
}
