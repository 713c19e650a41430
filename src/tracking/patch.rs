//! Three-way optional field semantics for partial updates.
//!
//! A JSON PATCH body must distinguish a field that is absent (leave it
//! alone), explicitly `null` (clear it), and present with a value (set it).
//! A plain `Option` collapses the first two cases, which for the clock-out
//! field is a correctness bug: clearing reopens the session and zeroes the
//! totals, while absence changes nothing.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A field in a partial-update body: absent, explicit null, or a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Patch<T> {
    /// Field was not present in the body; leave the target unchanged.
    Unset,
    /// Field was explicitly `null`; clear the target.
    Clear,
    /// Field carried a value; set the target.
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Unset
    }
}

impl<T> Patch<T> {
    /// Returns true for the absent case.
    pub fn is_unset(&self) -> bool {
        matches!(self, Patch::Unset)
    }

    /// Maps the `Set` value, preserving `Unset`/`Clear`.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Patch<U> {
        match self {
            Patch::Unset => Patch::Unset,
            Patch::Clear => Patch::Clear,
            Patch::Set(value) => Patch::Set(f(value)),
        }
    }
}

// Deserialized via Option so `null` maps to Clear and a value to Set; the
// Unset case comes from `#[serde(default)]` when the field is missing.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Set(value),
            None => Patch::Clear,
        })
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            // Unset fields should be skipped via skip_serializing_if; when
            // serialized anyway they degrade to null.
            Patch::Unset | Patch::Clear => serializer.serialize_none(),
            Patch::Set(value) => serializer.serialize_some(value),
        }
    }
}
