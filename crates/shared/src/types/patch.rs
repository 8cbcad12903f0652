//! Serde helper for nullable fields of partial updates.

use serde::{Deserialize, Deserializer};

/// Deserializes a nullable patch field.
///
/// With `#[serde(default, deserialize_with = "deserialize_patch")]` an absent
/// key stays `None` (keep), `null` becomes `Some(None)` (clear) and a value
/// becomes `Some(Some(value))` (set).
pub fn deserialize_patch<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
