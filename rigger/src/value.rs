//! Dynamically typed values produced by resolvers

use std::{
    any::{Any, type_name},
    fmt::{Debug, Formatter},
    sync::Arc,
};

type ArcAny = Arc<
    dyn Any
    + Send
    + Sync
>;

/// A shared, dynamically typed value
///
/// Cloning a [`Value`] clones the pointer, so every clone refers to the same instance.
#[derive(Clone)]
pub struct Value {
    inner: ArcAny,
    type_name: &'static str,
}

impl Debug for Value {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Value({})", self.type_name)
    }
}

impl Value {
    /// Wraps an owned value
    #[inline]
    pub fn new<T: Send + Sync + 'static>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Wraps an already shared value without copying it
    #[inline]
    pub fn from_arc<T: Send + Sync + 'static>(value: Arc<T>) -> Self {
        Self { inner: value, type_name: type_name::<T>() }
    }

    #[inline]
    pub(crate) fn from_boxed(value: Box<dyn Any + Send + Sync>, type_name: &'static str) -> Self {
        Self { inner: Arc::from(value), type_name }
    }

    /// Returns the type name of the wrapped value
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns `true` if the wrapped value is a `T`
    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Returns a shared pointer to the wrapped value if it is a `T`
    #[inline]
    pub fn downcast<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.inner.clone().downcast::<T>().ok()
    }

    /// Returns a reference to the wrapped value if it is a `T`
    #[inline]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Returns `true` if both values point to the same instance
    #[inline]
    pub fn ptr_eq(&self, other: &Value) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.inner), Arc::as_ptr(&other.inner))
    }
}

/// A trait that defines how to extract `Self` from a resolved [`Value`]
///
/// Implemented for [`Value`], for `Arc<T>` of any `T` (the shared instance itself)
/// and for common owned types, which are cloned out of the value.
/// The [`from_value!`](crate::from_value) macro implements it for other [`Clone`] types.
pub trait FromValue: Sized {
    /// Extracts `Self`, returns `None` if the value holds another type
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    #[inline]
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl<T: Send + Sync + 'static> FromValue for Arc<T> {
    #[inline]
    fn from_value(value: &Value) -> Option<Self> {
        value.downcast::<T>()
    }
}

/// Implements [`FromValue`] for one or more [`Clone`] types by cloning them out of the value
///
/// # Example
/// ```
/// use rigger::{from_value, FromValue, Value};
///
/// #[derive(Clone)]
/// struct Settings {
///     port: u16
/// }
///
/// from_value! { Settings }
///
/// let value = Value::new(Settings { port: 8080 });
/// let settings = Settings::from_value(&value).unwrap();
///
/// assert_eq!(settings.port, 8080);
/// ```
#[macro_export]
macro_rules! from_value {
    ($($type:ty)*) => {
        $(impl $crate::FromValue for $type {
            #[inline]
            fn from_value(value: &$crate::Value) -> ::core::option::Option<Self> {
                value.downcast_ref::<$type>().cloned()
            }
        })*
    };
}

from_value! {
    bool char
    i8 i16 i32 i64 i128 isize
    u8 u16 u32 u64 u128 usize
    f32 f64
    String
}
