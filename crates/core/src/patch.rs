//! Tri-state field values for partial updates.
//!
//! A plain `Option<T>` cannot tell "the client left this field out" apart
//! from "the client supplied a value". [`Patch`] keeps the two states
//! distinct so that an absent field never overwrites stored data.

use serde::{Deserialize, Deserializer};

/// A single field of a partial update: either left out of the request or
/// supplied with a value that must be applied verbatim.
///
/// Used as a struct field together with `#[serde(default)]`, a missing key
/// deserializes to [`Patch::Absent`]. An explicit JSON `null` is treated the
/// same as a missing key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// The field was not supplied; the stored value stays as it is.
    Absent,
    /// The field was supplied; the stored value is replaced.
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, Patch::Set(_))
    }

    /// Borrow the supplied value, if any.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Patch::Set(value) => Some(value),
            Patch::Absent => None,
        }
    }

    /// Overwrite `target` with the supplied value. No-op when absent.
    pub fn apply_to(&self, target: &mut T)
    where
        T: Clone,
    {
        if let Patch::Set(value) = self {
            *target = value.clone();
        }
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Patch::Absent, Patch::Set)
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
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}
