// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Side-facade profile tables

use smallvec::SmallVec;

/// One run of constant outer-wall-plane X over a Z interval
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfileSegment {
    pub z_start: f64,
    pub z_end: f64,
    pub plane_x: f64,
}

impl ProfileSegment {
    #[inline]
    pub const fn new(z_start: f64, z_end: f64, plane_x: f64) -> Self {
        Self {
            z_start,
            z_end,
            plane_x,
        }
    }

    #[inline]
    pub fn span(&self) -> f64 {
        self.z_end - self.z_start
    }

    #[inline]
    pub fn mid_z(&self) -> f64 {
        (self.z_start + self.z_end) * 0.5
    }

    #[inline]
    pub fn contains_z(&self, z: f64) -> bool {
        self.z_start <= z && z <= self.z_end
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.z_start * factor, self.z_end * factor, self.plane_x * factor)
    }
}

/// Segment list as stored in parameter tables; stepped facades rarely exceed five runs
pub type ProfileTable = SmallVec<[ProfileSegment; 5]>;
