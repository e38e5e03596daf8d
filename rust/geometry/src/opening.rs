// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Opening cut descriptors for wall carving and panel subtraction

use crate::planner::WindowPlacement;
use houseforge_core::FacadeId;
use nalgebra::Point3;

/// Minimal carving descriptor of one side-facade opening
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpeningCut {
    pub facade: FacadeId,
    pub outer_plane_x: f64,
    pub z_center: f64,
    pub width: f64,
    pub height: f64,
    pub bottom_y: f64,
}

impl OpeningCut {
    #[inline]
    pub fn top_y(&self) -> f64 {
        self.bottom_y + self.height
    }

    #[inline]
    pub fn z_range(&self) -> (f64, f64) {
        let half = self.width * 0.5;
        (self.z_center - half, self.z_center + half)
    }

    /// Whether `point` lies inside the opening's box through the wall
    ///
    /// The box spans X between the outer plane and `inner_plane_x`, Z across
    /// the opening width and Y across its height, grown by `tolerance`.
    pub fn contains(&self, point: &Point3<f64>, inner_plane_x: f64, tolerance: f64) -> bool {
        let (x_lo, x_hi) = if self.outer_plane_x < inner_plane_x {
            (self.outer_plane_x, inner_plane_x)
        } else {
            (inner_plane_x, self.outer_plane_x)
        };
        let (z_lo, z_hi) = self.z_range();

        point.x >= x_lo - tolerance
            && point.x <= x_hi + tolerance
            && point.z >= z_lo - tolerance
            && point.z <= z_hi + tolerance
            && point.y >= self.bottom_y - tolerance
            && point.y <= self.top_y() + tolerance
    }

    /// Vertical overlap with a floor slice `[base_y, top_y]`
    #[inline]
    pub fn overlaps_y(&self, base_y: f64, top_y: f64) -> bool {
        self.bottom_y < top_y && self.top_y() > base_y
    }
}

impl From<&WindowPlacement> for OpeningCut {
    fn from(placement: &WindowPlacement) -> Self {
        Self {
            facade: placement.facade,
            outer_plane_x: placement.resolved_outer_plane_x,
            z_center: placement.adjusted_z_center,
            width: placement.width,
            height: placement.total_height,
            bottom_y: placement.bottom_y,
        }
    }
}

/// Reduce placements to cuts; trivial placements produce none
pub fn opening_cuts(placements: &[WindowPlacement]) -> Vec<OpeningCut> {
    placements
        .iter()
        .filter(|p| !p.is_trivial())
        .map(OpeningCut::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facade_context::FacadeContext;
    use crate::facade_profile::FacadeProfile;
    use crate::planner::plan_windows;
    use houseforge_core::{Band, Handedness, WindowSpec};

    fn cuts() -> Vec<OpeningCut> {
        let ctx = FacadeContext::resolve(FacadeId::Left, Handedness::Standard);
        let specs = vec![
            WindowSpec::simple("a", 1.0, 5.5, Band::new(0.0, 2.15)),
            WindowSpec::simple("empty", 1.0, 8.0, Band::none()),
            WindowSpec::tall("b", 1.4, 9.0, Band::new(0.0, 2.45), Band::new(2.45, 5.0)),
        ];
        opening_cuts(&plan_windows(&ctx, &FacadeProfile::flat(4.8), &specs))
    }

    #[test]
    fn test_trivial_placements_dropped() {
        let cuts = cuts();
        assert_eq!(cuts.len(), 2);
        assert_eq!(cuts[0].z_center, 5.5);
        assert_eq!(cuts[0].height, 2.15);
        assert_eq!(cuts[1].height, 5.0);
        assert_eq!(cuts[1].outer_plane_x, 4.8);
    }

    #[test]
    fn test_contains_spans_wall_thickness() {
        let cut = cuts()[0];
        assert!(cut.contains(&Point3::new(4.8, 1.0, 5.5), 4.5, 0.01));
        assert!(cut.contains(&Point3::new(4.5, 2.15, 6.0), 4.5, 0.01));
        assert!(!cut.contains(&Point3::new(4.3, 1.0, 5.5), 4.5, 0.01));
        assert!(!cut.contains(&Point3::new(4.6, 1.0, 6.2), 4.5, 0.01));
        assert!(!cut.contains(&Point3::new(4.6, 2.5, 5.5), 4.5, 0.01));
    }

    #[test]
    fn test_overlaps_floor() {
        let cut = cuts()[1];
        assert!(cut.overlaps_y(0.0, 2.75));
        assert!(cut.overlaps_y(2.75, 5.6));
        assert!(!cuts()[0].overlaps_y(2.75, 5.6));
    }
}
