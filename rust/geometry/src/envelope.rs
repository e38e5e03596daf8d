// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building envelope extremes

use houseforge_core::{FacadeId, FootprintPolygon, Handedness, PlanBounds, WorldSide};

/// Extremal planes of the outer footprint
///
/// `left_x` / `right_x` are the outermost X of the architectural left and
/// right facades, so they swap between world min/max with handedness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeBounds {
    /// Front elevation (minimum Z)
    pub front_z: f64,
    /// Rear elevation (maximum Z)
    pub rear_z: f64,
    pub left_x: f64,
    pub right_x: f64,
}

impl EnvelopeBounds {
    pub fn from_footprint(footprint: &FootprintPolygon, handedness: Handedness) -> Self {
        Self::from_bounds(&footprint.bounds(), handedness)
    }

    pub fn from_bounds(bounds: &PlanBounds, handedness: Handedness) -> Self {
        let side_x = |facade| match handedness.world_side(facade) {
            WorldSide::PositiveX => bounds.max_x,
            WorldSide::NegativeX => bounds.min_x,
        };
        Self {
            front_z: bounds.min_z,
            rear_z: bounds.max_z,
            left_x: side_x(FacadeId::Left),
            right_x: side_x(FacadeId::Right),
        }
    }

    /// Outermost X of a side facade
    #[inline]
    pub fn side_x(&self, facade: FacadeId) -> f64 {
        match facade {
            FacadeId::Left => self.left_x,
            FacadeId::Right => self.right_x,
        }
    }

    #[inline]
    pub fn z_range(&self) -> (f64, f64) {
        (self.front_z, self.rear_z)
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        self.left_x.min(self.right_x)
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.left_x.max(self.right_x)
    }

    /// Inner face planes of the front and rear walls
    #[inline]
    pub fn inner_z(&self, wall_thickness: f64) -> (f64, f64) {
        (self.front_z + wall_thickness, self.rear_z - wall_thickness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use houseforge_core::HouseParams;

    #[test]
    fn test_reference_envelope() {
        let footprint = HouseParams::default().footprint_polygon().unwrap();
        let env = EnvelopeBounds::from_footprint(&footprint, Handedness::Standard);
        assert_eq!(env.front_z, 0.0);
        assert_eq!(env.rear_z, 12.0);
        assert_eq!(env.left_x, 4.8);
        assert_eq!(env.right_x, -4.8);
        assert_eq!(env.inner_z(0.3), (0.3, 11.7));
    }

    #[test]
    fn test_mirrored_swaps_sides() {
        let footprint = FootprintPolygon::rectangle(-1.0, 0.0, 3.0, 5.0).unwrap();
        let env = EnvelopeBounds::from_footprint(&footprint, Handedness::Mirrored);
        assert_eq!(env.left_x, -1.0);
        assert_eq!(env.right_x, 3.0);
        assert_eq!(env.side_x(FacadeId::Right), 3.0);
        assert_eq!(env.min_x(), -1.0);
    }
}
