//! Arguments of constructors, methods and functions

use crate::{
    Context, FromValue, Resolver, Value,
    error::Error,
};
use std::any::type_name;

/// A configured argument: either a literal value or a nested resolver
/// that is resolved right before the call
#[derive(Debug, Clone)]
pub enum Arg {
    /// Passed as is
    Value(Value),
    /// Resolved through the container on every call
    Resolver(Resolver),
}

impl Arg {
    #[inline]
    pub(crate) fn resolve(&self, cx: &Context<'_>) -> Result<Value, Error> {
        match self {
            Arg::Value(value) => Ok(value.clone()),
            Arg::Resolver(resolver) => resolver.resolve_with(cx),
        }
    }
}

/// Resolves configured arguments strictly left to right
pub(crate) fn resolve_all(args: &[Arg], cx: &Context<'_>) -> Result<Args, Error> {
    args.iter()
        .map(|arg| arg.resolve(cx))
        .collect::<Result<Vec<_>, _>>()
        .map(Args::new)
}

/// A trait for types that can be passed as an [`Arg`]
///
/// Literals become [`Arg::Value`], resolvers become [`Arg::Resolver`].
/// String slices are stored as [`String`].
pub trait IntoArg {
    /// Converts `self` into an argument
    fn into_arg(self) -> Arg;
}

impl IntoArg for Arg {
    #[inline]
    fn into_arg(self) -> Arg {
        self
    }
}

impl IntoArg for Value {
    #[inline]
    fn into_arg(self) -> Arg {
        match self.downcast_ref::<Resolver>() {
            Some(resolver) => Arg::Resolver(resolver.clone()),
            None => Arg::Value(self),
        }
    }
}

impl IntoArg for Resolver {
    #[inline]
    fn into_arg(self) -> Arg {
        match self {
            Resolver::Value(raw) => Arg::Value(raw.value().clone()),
            resolver => Arg::Resolver(resolver),
        }
    }
}

impl IntoArg for &'static str {
    #[inline]
    fn into_arg(self) -> Arg {
        Arg::Value(Value::new(String::from(self)))
    }
}

macro_rules! define_literal_arg {
    ($($type:ty)*) => {
        $(impl IntoArg for $type {
            #[inline]
            fn into_arg(self) -> Arg {
                Arg::Value(Value::new(self))
            }
        })*
    };
}

define_literal_arg! {
    bool char
    i8 i16 i32 i64 i128 isize
    u8 u16 u32 u64 u128 usize
    f32 f64
    String
}

/// Builds a `Vec<Arg>` from literals and resolvers
///
/// # Example
/// ```
/// use rigger::{args, reference};
///
/// let args = args!["name", 42, reference("logger")];
///
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Arg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::IntoArg::into_arg($arg)),+]
    };
}

/// Resolved arguments handed to a constructor, a method or a function
///
/// Arguments are read in order; each read advances an internal cursor.
#[derive(Debug)]
pub struct Args {
    values: Vec<Value>,
    cursor: usize,
}

impl Args {
    #[inline]
    pub(crate) fn new(values: Vec<Value>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Returns the total number of arguments
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there are no arguments at all
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the number of arguments that have not been read yet
    #[inline]
    pub fn remaining(&self) -> usize {
        self.values.len() - self.cursor
    }

    /// Reads the next argument as an untyped [`Value`]
    #[inline]
    pub fn read_value(&mut self) -> Result<Value, Error> {
        let index = self.cursor;
        let value = self.values
            .get(index)
            .cloned()
            .ok_or(Error::ArgumentMissing { index })?;
        self.cursor += 1;
        Ok(value)
    }

    /// Reads the next argument as `T`
    pub fn read<T: FromValue>(&mut self) -> Result<T, Error> {
        let index = self.cursor;
        let value = self.read_value()?;
        T::from_value(&value).ok_or(Error::ArgumentType {
            index,
            expected: type_name::<T>(),
            found: value.type_name(),
        })
    }

    /// Reads the next argument and clones it out of its shared pointer
    pub fn take<T: Clone + Send + Sync + 'static>(&mut self) -> Result<T, Error> {
        let index = self.cursor;
        let value = self.read_value()?;
        value.downcast_ref::<T>().cloned().ok_or(Error::ArgumentType {
            index,
            expected: type_name::<T>(),
            found: value.type_name(),
        })
    }
}

/// A trait that defines how to extract a parameter tuple from [`Args`]
pub trait FromArgs: Sized {
    /// Number of arguments consumed
    const ARITY: usize;

    /// Extracts `Self` from arguments
    fn from_args(args: &mut Args) -> Result<Self, Error>;
}

impl FromArgs for () {
    const ARITY: usize = 0;

    #[inline]
    fn from_args(_: &mut Args) -> Result<Self, Error> {
        Ok(())
    }
}

macro_rules! define_generic_from_args {
    ($arity:literal => $($T: ident),*) => {
        impl<$($T: FromValue),+> FromArgs for ($($T,)+) {
            const ARITY: usize = $arity;

            #[inline]
            fn from_args(args: &mut Args) -> Result<Self, Error> {
                let tuple = (
                    $(
                    args.read::<$T>()?,
                    )*
                );
                Ok(tuple)
            }
        }
    }
}

define_generic_from_args! { 1 => T1 }
define_generic_from_args! { 2 => T1, T2 }
define_generic_from_args! { 3 => T1, T2, T3 }
define_generic_from_args! { 4 => T1, T2, T3, T4 }
define_generic_from_args! { 5 => T1, T2, T3, T4, T5 }
define_generic_from_args! { 6 => T1, T2, T3, T4, T5, T6 }
