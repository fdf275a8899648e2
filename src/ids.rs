//! Strongly typed identifiers supplied by the caller on every write.
//!
//! [`Timestamp`] and [`EntityId`] are deliberately distinct types so that the optional filter
//! arguments of [`get_cyclic`](crate::DataStoreRead::get_cyclic) cannot be transposed by
//! accident. Neither converts into the other.

use std::fmt::{Display, Formatter};
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Simulation time in milliseconds.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub const MIN: Timestamp = Timestamp(i64::MIN);
    pub const MAX: Timestamp = Timestamp(i64::MAX);

    #[must_use]
    pub const fn new(milliseconds: i64) -> Self {
        Timestamp(milliseconds)
    }

    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.0
    }
}

impl From<i64> for Timestamp {
    fn from(milliseconds: i64) -> Self {
        Timestamp(milliseconds)
    }
}

// The value `Timestamp(100)` will display as "100".
impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Timestamp {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Timestamp)
    }
}

/// Identifies an agent or object in the simulated world.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub usize);

impl EntityId {
    pub const MIN: EntityId = EntityId(usize::MIN);
    pub const MAX: EntityId = EntityId(usize::MAX);

    #[must_use]
    pub const fn new(id: usize) -> Self {
        EntityId(id)
    }

    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0
    }
}

impl From<usize> for EntityId {
    fn from(id: usize) -> Self {
        EntityId(id)
    }
}

// The value `EntityId(7)` will display as "7".
impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(EntityId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prints_raw_integer() {
        assert_eq!(Timestamp::new(-100).to_string(), "-100");
        assert_eq!(EntityId::new(7).to_string(), "7");
    }

    #[test]
    fn parse_round_trips_display() {
        assert_eq!("42".parse::<Timestamp>().unwrap(), Timestamp(42));
        assert_eq!("3".parse::<EntityId>().unwrap(), EntityId(3));
        assert!("-1".parse::<EntityId>().is_err());
        assert!("abc".parse::<Timestamp>().is_err());
    }

    #[test]
    fn ordering_follows_raw_value() {
        assert!(Timestamp(1) < Timestamp(2));
        assert!(EntityId(0) < EntityId(10));
        assert_eq!(Timestamp::MIN.min(Timestamp(0)), Timestamp::MIN);
    }

    #[test]
    fn serializes_transparently() {
        assert_eq!(serde_json::to_string(&Timestamp(5)).unwrap(), "5");
        assert_eq!(serde_json::from_str::<EntityId>("9").unwrap(), EntityId(9));
    }
}
