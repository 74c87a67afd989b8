//! Three-state field wrapper for partial updates.
//!
//! JSON bodies distinguish a field that was omitted from one explicitly set
//! to `null`. `Option<T>` collapses both cases, so update payloads use
//! [`Patch`] instead. Combine it with `#[serde(default)]` so omitted fields
//! decode as [`Patch::Absent`].

use serde::{Deserialize, Deserializer};

/// A field in a partial update request.
///
/// # Examples
/// ```
/// use incident_tracker::domain::Patch;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Body {
///     #[serde(default)]
///     desc: Patch<String>,
/// }
///
/// let omitted: Body = serde_json::from_str("{}").unwrap();
/// let cleared: Body = serde_json::from_str(r#"{"desc":null}"#).unwrap();
/// assert_eq!(omitted.desc, Patch::Absent);
/// assert_eq!(cleared.desc, Patch::Null);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// The field was not supplied; leave the stored value untouched.
    Absent,
    /// The field was supplied as `null`.
    Null,
    /// The field was supplied with a value.
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> Patch<T> {
    /// Whether the field was omitted from the request.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|value| value.map_or(Self::Null, Self::Value))
    }
}
