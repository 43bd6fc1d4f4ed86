//! Names of registered dependencies

use std::{
    borrow::{Borrow, Cow},
    fmt::{Display, Formatter},
};

/// A key under which a resolver is registered in a [`Container`](crate::Container)
///
/// Either an arbitrary string or the short name of a Rust type.
///
/// # Example
/// ```
/// use rigger::Name;
///
/// struct Logger;
///
/// assert_eq!(Name::from("logger").as_str(), "logger");
/// assert_eq!(Name::of::<Logger>().as_str(), "Logger");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(Cow<'static, str>);

impl Name {
    /// Creates a name from a static string
    #[inline]
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Creates a name from the type name of `T` without its module path
    #[inline]
    pub fn of<T: ?Sized>() -> Self {
        Self(Cow::Borrowed(short_type_name(std::any::type_name::<T>())))
    }

    /// Returns the name as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Strips the module path of the outer type, generic arguments are kept as is
fn short_type_name(full: &'static str) -> &'static str {
    let end = full.find('<').unwrap_or(full.len());
    let start = full[..end].rfind("::").map_or(0, |i| i + 2);
    &full[start..]
}

impl Display for Name {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Name {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Name {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for Name {
    #[inline]
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for Name {
    #[inline]
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl From<&Name> for Name {
    #[inline]
    fn from(name: &Name) -> Self {
        name.clone()
    }
}

impl PartialEq<str> for Name {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Name {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Logger;
    struct Wrapper<T>(T);

    #[test]
    fn it_strips_module_path() {
        assert_eq!(Name::of::<Logger>(), "Logger");
        assert_eq!(Name::of::<String>(), "String");
    }

    #[test]
    fn it_keeps_generic_arguments() {
        let name = Name::of::<Wrapper<Logger>>();

        assert!(name.as_str().starts_with("Wrapper<"));
        assert!(name.as_str().ends_with("Logger>"));
    }

    #[test]
    fn it_looks_up_by_str() {
        let mut map = HashMap::new();
        map.insert(Name::from(String::from("key")), 1);

        assert_eq!(map.get("key"), Some(&1));
    }
}
