//! Prop catalog
//!
//! Fixed two-entry catalog of mountable props. Selection moves one step at
//! a time and clamps at both ends.

use serde::{Deserialize, Serialize};

/// A mountable prop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Prop {
    /// A ball orbiting the head; not articulated
    OrbitingBall,
    /// The face-driven scarecrow puppet
    Scarecrow,
}

impl Prop {
    /// Number of catalog entries
    pub const COUNT: usize = 2;

    /// Catalog index of this prop
    pub fn index(self) -> usize {
        match self {
            Prop::OrbitingBall => 0,
            Prop::Scarecrow => 1,
        }
    }

    /// Prop at the given catalog index, if any
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Prop::OrbitingBall),
            1 => Some(Prop::Scarecrow),
            _ => None,
        }
    }

    /// Previous catalog entry, clamped at the first
    pub fn prev(self) -> Self {
        Prop::from_index(self.index().saturating_sub(1)).unwrap_or(self)
    }

    /// Next catalog entry, clamped at the last
    pub fn next(self) -> Self {
        Prop::from_index(self.index() + 1).unwrap_or(self)
    }

    /// Whether this prop has face-driven joints
    pub fn is_articulated(self) -> bool {
        matches!(self, Prop::Scarecrow)
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Prop::OrbitingBall => "orbiting_ball",
            Prop::Scarecrow => "scarecrow",
        }
    }
}

impl std::fmt::Display for Prop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for i in 0..Prop::COUNT {
            assert_eq!(Prop::from_index(i).unwrap().index(), i);
        }
        assert!(Prop::from_index(Prop::COUNT).is_none());
    }

    #[test]
    fn test_next_clamps_at_last() {
        assert_eq!(Prop::OrbitingBall.next(), Prop::Scarecrow);
        assert_eq!(Prop::Scarecrow.next(), Prop::Scarecrow);
    }

    #[test]
    fn test_prev_clamps_at_first() {
        assert_eq!(Prop::Scarecrow.prev(), Prop::OrbitingBall);
        assert_eq!(Prop::OrbitingBall.prev(), Prop::OrbitingBall);
    }

    #[test]
    fn test_articulation() {
        assert!(Prop::Scarecrow.is_articulated());
        assert!(!Prop::OrbitingBall.is_articulated());
    }
}
