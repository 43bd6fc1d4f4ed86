//! Describes dependency resolution errors

use crate::Name;
use std::fmt::{Display, Formatter};

/// Errors produced while registering or resolving dependencies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Requested name was never registered
    DependencyMissing(Name),

    /// Name reappeared in the active resolution path
    CircularDependency {
        /// Name that closed the cycle
        name: Name,
        /// Names that were being resolved, outermost first
        path: Vec<Name>,
    },

    /// A value that is not a [`Constructor`](crate::Constructor) was used as one
    InvalidConstructor(&'static str),

    /// A post-construction call targets a method the class does not declare
    MethodMissing {
        /// Type name of the constructed instance
        type_name: &'static str,
        /// Requested method
        method: String,
    },

    /// A value that is not a factory or a function was used as one
    InvalidFactory(&'static str),

    /// The name is already registered in this container
    DuplicateRegistration(Name),

    /// Typed access to a registered value of a different type
    TypeMismatch {
        /// Registered name
        name: Name,
        /// Requested type
        expected: &'static str,
        /// Type actually produced
        found: &'static str,
    },

    /// A callee read past the end of its arguments
    ArgumentMissing {
        /// Zero-based position of the missing argument
        index: usize,
    },

    /// An argument holds a different type than the callee expects
    ArgumentType {
        /// Zero-based position of the argument
        index: usize,
        /// Requested type
        expected: &'static str,
        /// Type actually passed
        found: &'static str,
    },

    /// Configured argument count differs from the callee's arity
    ArgumentCount {
        /// Type a constructor or function produces, or a method name
        callee: &'static str,
        /// Declared arity
        expected: usize,
        /// Configured arguments
        actual: usize,
    },

    /// A transient dependency was requested while building a singleton
    /// and the container forbids it
    CaptiveDependency {
        /// Transient name
        name: Name,
        /// Nearest singleton being built
        owner: Name,
    },

    /// Failure reported by a user callback
    Other(String),
}

impl Error {
    /// Creates an [`Error::Other`] from a message
    #[inline]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::DependencyMissing(name) => write!(f, "DI Error: dependency with name {name} is not defined"),
            Error::CircularDependency { name, path } => {
                write!(f, "DI Error: circular dependency detected: \"{name}\", path: ")?;
                write_path(f, path)
            },
            Error::InvalidConstructor(found) => write!(f, "DI Error: invalid constructor provided: {found}"),
            Error::MethodMissing { type_name, method } => write!(f, "DI Error: {method} is not a member of {type_name}"),
            Error::InvalidFactory(found) => write!(f, "DI Error: factory must be a function, got: {found}"),
            Error::DuplicateRegistration(name) => write!(f, "DI Error: dependency with name {name} is already declared"),
            Error::TypeMismatch { name, expected, found } =>
                write!(f, "DI Error: dependency {name} is {found}, but {expected} was requested"),
            Error::ArgumentMissing { index } => write!(f, "DI Error: argument #{index} is missing"),
            Error::ArgumentType { index, expected, found } =>
                write!(f, "DI Error: argument #{index} is {found}, but {expected} was expected"),
            Error::ArgumentCount { callee, expected, actual } =>
                write!(f, "DI Error: {callee} expects {expected} arguments, got {actual}"),
            Error::CaptiveDependency { name, owner } =>
                write!(f, "DI Error: transient dependency {name} cannot be captured by singleton {owner}"),
            Error::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {}

fn write_path(f: &mut Formatter<'_>, path: &[Name]) -> std::fmt::Result {
    let mut iter = path.iter();
    if let Some(first) = iter.next() {
        write!(f, "{first}")?;
    }
    for name in iter {
        write!(f, " -> {name}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_formats_circular_path() {
        let err = Error::CircularDependency {
            name: Name::from("foo"),
            path: vec![Name::from("foo"), Name::from("bar"), Name::from("buzz")],
        };

        assert_eq!(
            err.to_string(),
            "DI Error: circular dependency detected: \"foo\", path: foo -> bar -> buzz"
        );
    }

    #[test]
    fn it_formats_missing_dependency() {
        let err = Error::DependencyMissing(Name::from("Logger"));

        assert_eq!(err.to_string(), "DI Error: dependency with name Logger is not defined");
    }

    #[test]
    fn it_formats_other_verbatim() {
        let err = Error::other("connection refused");

        assert_eq!(err.to_string(), "connection refused");
    }
}
