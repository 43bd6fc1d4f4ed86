//! Raw value resolver

use crate::Value;

/// Keeps a value of any type and returns it on every resolution
#[derive(Debug, Clone)]
pub struct RawValue(Value);

impl RawValue {
    /// Creates a raw value resolver
    #[inline]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the stored value
    #[inline]
    pub fn value(&self) -> &Value {
        &self.0
    }
}
