//! Generic callables invoked with resolved arguments

use super::error::Error;

/// A trait that describes a generic function that produces a value
/// from a tuple of resolved parameters
///
/// A function without parameters returns its output directly and cannot fail,
/// a function with parameters returns `Result<Output, Error>`.
pub trait Callable<Params>: Send + Sync + 'static {
    /// A type of produced value
    type Output;

    /// Calls a generic function and returns either the produced value or error
    fn call(&self, params: Params) -> Result<Self::Output, Error>;
}

impl<F, R> Callable<()> for F
where
    F: Fn() -> R + Send + Sync + 'static
{
    type Output = R;

    #[inline]
    fn call(&self, _: ()) -> Result<Self::Output, Error> {
        Ok(self())
    }
}

macro_rules! define_generic_callable ({ $($param:ident)* } => {
    impl<F, R, $($param,)*> Callable<($($param,)*)> for F
    where
        F: Fn($($param),*) -> Result<R, Error> + Send + Sync + 'static,
    {
        type Output = R;

        #[inline]
        #[allow(non_snake_case)]
        fn call(&self, ($($param,)*): ($($param,)*)) -> Result<Self::Output, Error> {
            (self)($($param,)*)
        }
    }
});

define_generic_callable! { T1 }
define_generic_callable! { T1 T2 }
define_generic_callable! { T1 T2 T3 }
define_generic_callable! { T1 T2 T3 T4 }
define_generic_callable! { T1 T2 T3 T4 T5 }
define_generic_callable! { T1 T2 T3 T4 T5 T6 }

/// A trait that describes a method called on a freshly constructed `T`
/// with a tuple of resolved parameters
pub trait Method<T, Params>: Send + Sync + 'static {
    /// Calls the method on `target`
    fn call(&self, target: &mut T, params: Params) -> Result<(), Error>;
}

impl<F, T> Method<T, ()> for F
where
    F: Fn(&mut T) -> Result<(), Error> + Send + Sync + 'static
{
    #[inline]
    fn call(&self, target: &mut T, _: ()) -> Result<(), Error> {
        self(target)
    }
}

macro_rules! define_generic_method ({ $($param:ident)* } => {
    impl<F, T, $($param,)*> Method<T, ($($param,)*)> for F
    where
        F: Fn(&mut T, $($param),*) -> Result<(), Error> + Send + Sync + 'static,
    {
        #[inline]
        #[allow(non_snake_case)]
        fn call(&self, target: &mut T, ($($param,)*): ($($param,)*)) -> Result<(), Error> {
            (self)(target, $($param,)*)
        }
    }
});

define_generic_method! { T1 }
define_generic_method! { T1 T2 }
define_generic_method! { T1 T2 T3 }
define_generic_method! { T1 T2 T3 T4 }
