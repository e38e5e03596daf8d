// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plan-view bounds of footprints and envelopes

/// Axis-aligned bounds in the horizontal X–Z plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanBounds {
    /// Minimum X coordinate found
    pub min_x: f64,
    /// Maximum X coordinate found
    pub max_x: f64,
    /// Minimum Z coordinate found (front elevation)
    pub min_z: f64,
    /// Maximum Z coordinate found (rear elevation)
    pub max_z: f64,
    /// Number of points sampled
    pub sample_count: usize,
}

impl PlanBounds {
    /// Create new bounds initialized to invalid state
    pub fn new() -> Self {
        Self {
            min_x: f64::MAX,
            max_x: f64::MIN,
            min_z: f64::MAX,
            max_z: f64::MIN,
            sample_count: 0,
        }
    }

    /// Check if bounds are valid (at least one point added)
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.sample_count > 0
    }

    /// Expand bounds to include a point
    #[inline]
    pub fn expand(&mut self, x: f64, z: f64) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_z = self.min_z.min(z);
        self.max_z = self.max_z.max(z);
        self.sample_count += 1;
    }

    /// Extent along X
    #[inline]
    pub fn width(&self) -> f64 {
        if self.is_valid() {
            self.max_x - self.min_x
        } else {
            0.0
        }
    }

    /// Extent along Z
    #[inline]
    pub fn depth(&self) -> f64 {
        if self.is_valid() {
            self.max_z - self.min_z
        } else {
            0.0
        }
    }

    /// Center of the bounding rectangle
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        if !self.is_valid() {
            return (0.0, 0.0);
        }
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_z + self.max_z) / 2.0,
        )
    }
}

impl Default for PlanBounds {
    fn default() -> Self {
        Self::new()
    }
}
