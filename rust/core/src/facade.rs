// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Architectural facade identifiers and world-side conventions

/// Relative architectural side of the building, independent of world orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FacadeId {
    Left,
    Right,
}

impl FacadeId {
    pub const ALL: [FacadeId; 2] = [FacadeId::Left, FacadeId::Right];

    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            FacadeId::Left => FacadeId::Right,
            FacadeId::Right => FacadeId::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FacadeId::Left => "left",
            FacadeId::Right => "right",
        }
    }
}

/// Coordinate convention variant mapping architectural sides onto world X
///
/// `Standard` places the viewer in front of the −Z front elevation looking
/// toward +Z, so architectural left is +X. `Mirrored` swaps the sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Handedness {
    #[default]
    Standard,
    Mirrored,
}

impl Handedness {
    pub const ALL: [Handedness; 2] = [Handedness::Standard, Handedness::Mirrored];

    /// World X side a facade faces under this convention
    #[inline]
    pub fn world_side(self, facade: FacadeId) -> WorldSide {
        match (self, facade) {
            (Handedness::Standard, FacadeId::Left) | (Handedness::Mirrored, FacadeId::Right) => {
                WorldSide::PositiveX
            }
            (Handedness::Standard, FacadeId::Right) | (Handedness::Mirrored, FacadeId::Left) => {
                WorldSide::NegativeX
            }
        }
    }
}

/// One of the two world X half-spaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WorldSide {
    PositiveX,
    NegativeX,
}

impl WorldSide {
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            WorldSide::PositiveX => 1.0,
            WorldSide::NegativeX => -1.0,
        }
    }

    #[inline]
    pub fn from_sign(sign: f64) -> Self {
        if sign >= 0.0 {
            WorldSide::PositiveX
        } else {
            WorldSide::NegativeX
        }
    }

    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            WorldSide::PositiveX => WorldSide::NegativeX,
            WorldSide::NegativeX => WorldSide::PositiveX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sides_are_opposite_in_every_convention() {
        for handedness in Handedness::ALL {
            let left = handedness.world_side(FacadeId::Left);
            let right = handedness.world_side(FacadeId::Right);
            assert_eq!(left.opposite(), right);
            assert_eq!(left.sign(), -right.sign());
        }
    }

    #[test]
    fn test_standard_left_is_positive_x() {
        assert_eq!(
            Handedness::Standard.world_side(FacadeId::Left),
            WorldSide::PositiveX
        );
        assert_eq!(
            Handedness::Mirrored.world_side(FacadeId::Left),
            WorldSide::NegativeX
        );
    }

    #[test]
    fn test_sign_round_trip() {
        assert_eq!(WorldSide::from_sign(-1.0), WorldSide::NegativeX);
        assert_eq!(WorldSide::from_sign(1.0), WorldSide::PositiveX);
    }
}
