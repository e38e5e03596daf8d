// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Facade context resolution
//!
//! Maps an architectural side onto world-space conventions: which way the
//! facade faces along X, which way is "into the house", and which side a sill
//! projects toward.

use houseforge_core::{FacadeId, Handedness, WorldSide};

/// World-space conventions for one side facade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacadeContext {
    pub facade: FacadeId,
    pub handedness: Handedness,
    /// +1 when the facade faces world +X, −1 for −X
    pub outward_sign: f64,
    /// Always `-outward_sign`
    pub interior_sign: f64,
    /// Side the sill overhang projects toward
    pub sill_side: WorldSide,
}

impl FacadeContext {
    /// Resolve the context of a facade under a coordinate convention
    pub fn resolve(facade: FacadeId, handedness: Handedness) -> Self {
        let side = handedness.world_side(facade);
        let outward_sign = side.sign();
        Self {
            facade,
            handedness,
            outward_sign,
            interior_sign: -outward_sign,
            sill_side: side,
        }
    }

    /// World side the facade faces
    #[inline]
    pub fn outward_side(&self) -> WorldSide {
        WorldSide::from_sign(self.outward_sign)
    }

    /// Context of the facade across the house
    #[inline]
    pub fn opposite(&self) -> Self {
        Self::resolve(self.facade.opposite(), self.handedness)
    }

    /// Move `x` outward (positive `distance`) or inward (negative)
    #[inline]
    pub fn offset_x(&self, x: f64, distance: f64) -> f64 {
        x + self.outward_sign * distance
    }
}
