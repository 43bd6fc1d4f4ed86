//! # rigger
//!
//! A dependency injection registry and resolution engine.
//!
//! Dependencies are registered in a [`Container`] under a name, each with a [`Resolver`]
//! that knows how to produce it: a raw value, a constructed object, a factory callback,
//! a function call or a reference to another name. The container builds the object graph
//! on demand, caches [`Lifecycle::Singleton`] values, and reports circular dependencies
//! together with the resolution path.
//!
//! ## Example
//! ```
//! use rigger::{Class, Container, args, object, reference};
//! use std::sync::Arc;
//!
//! struct Logger;
//! struct Service {
//!     name: String,
//!     logger: Arc<Logger>,
//! }
//!
//! let mut container = Container::new();
//! container
//!     .add("logger", object(Class::new(|| Logger)).singleton())?
//!     .add("service", object(Class::new(|name: String, logger: Arc<Logger>| Ok(Service { name, logger })))
//!         .construct(args!["billing", reference("logger")]))?;
//!
//! let service = container.get::<Service>("service")?;
//! assert_eq!(service.name, "billing");
//! # Ok::<(), rigger::error::Error>(())
//! ```

pub use crate::{
    args::{Arg, Args, FromArgs, IntoArg},
    callable::{Callable, Method},
    container::{CaptivePolicy, Container, ContainerConfig, Context},
    deferred::{Deferred, deferred},
    lifecycle::Lifecycle,
    name::Name,
    resolver::{
        Class, Construct, Constructor, Factory, FactoryResolver, Function, FunctionResolver,
        IntoResolver, ObjectResolver, RawValue, ReferenceResolver, Resolver,
        factory, func, func_with, object, object_of, reference, value,
    },
    value::{FromValue, Value},
};

#[cfg(feature = "macros")]
pub use rigger_macros::Construct;

pub mod error;
pub mod container;
pub mod resolver;
mod args;
mod callable;
mod deferred;
mod lifecycle;
mod name;
mod value;
