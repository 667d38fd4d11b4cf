//! Type-safe parking spot identifier.
//!
//! [`SpotId`] is a newtype wrapper around the positive integer that numbers
//! every physical spot, so that spot numbers cannot be confused with ticket
//! identifiers or counts.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unique identifier for a parking spot.
///
/// Spots are pre-seeded in storage and their identifiers never change. The
/// allocator orders candidate spots by this value, so the smallest free
/// identifier of a type is always handed out first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct SpotId(i32);

impl SpotId {
    /// Creates a `SpotId` from its spot number.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the spot number.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for SpotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for SpotId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl From<SpotId> for i32 {
    fn from(id: SpotId) -> Self {
        id.0
    }
}
