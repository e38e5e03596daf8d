// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Window placement planning
//!
//! Turns abstract window specs into concrete placements on a side facade:
//! resolved outer-plane X, adjusted Z center, width and total opening height.

use crate::facade_context::FacadeContext;
use crate::facade_profile::FacadeProfile;
use houseforge_core::constants::{TALL_FRONT_OFFSET, TALL_SPLIT_THRESHOLD};
use houseforge_core::{FacadeId, WindowKind, WindowSpec};

/// Concrete position and extent of one window opening
#[derive(Debug, Clone, PartialEq)]
pub struct WindowPlacement {
    pub spec: WindowSpec,
    pub facade: FacadeId,
    pub resolved_outer_plane_x: f64,
    /// Z center after the tall-window front offset
    pub adjusted_z_center: f64,
    pub width: f64,
    /// Opening height above `bottom_y`, never negative
    pub total_height: f64,
    /// Sill level of the opening (ground band start)
    pub bottom_y: f64,
}

impl WindowPlacement {
    #[inline]
    pub fn id(&self) -> &str {
        self.spec.id()
    }

    #[inline]
    pub fn kind(&self) -> WindowKind {
        self.spec.kind()
    }

    #[inline]
    pub fn top_y(&self) -> f64 {
        self.bottom_y + self.total_height
    }

    /// Zero-area opening that should produce no cut and no assembly
    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.total_height <= 0.0 || self.width <= 0.0
    }

    /// Tall window spanning both floors as a three-part split opening
    #[inline]
    pub fn is_split(&self) -> bool {
        self.kind() == WindowKind::Tall && self.total_height >= TALL_SPLIT_THRESHOLD
    }
}

/// Opening height of a spec, clamped at zero
pub fn opening_height(spec: &WindowSpec) -> f64 {
    let fields = spec.fields();
    let top = match spec {
        WindowSpec::Simple(_) => fields.ground_band.y1,
        WindowSpec::Tall(_) => fields.ground_band.y1.max(fields.first_floor_band.y1),
    };
    (top - fields.ground_band.y0).max(0.0)
}

/// Plan one placement per spec, preserving order
pub fn plan_windows(
    ctx: &FacadeContext,
    profile: &FacadeProfile,
    specs: &[WindowSpec],
) -> Vec<WindowPlacement> {
    specs
        .iter()
        .map(|spec| {
            let fields = spec.fields();
            let adjusted_z_center = match spec {
                WindowSpec::Simple(_) => fields.z_center,
                WindowSpec::Tall(_) => fields.z_center - TALL_FRONT_OFFSET,
            };
            let resolved_outer_plane_x = profile.resolve_plane_x(adjusted_z_center);
            let total_height = opening_height(spec);

            tracing::trace!(
                id = spec.id(),
                facade = ctx.facade.as_str(),
                plane_x = resolved_outer_plane_x,
                z = adjusted_z_center,
                height = total_height,
                "planned window"
            );

            WindowPlacement {
                spec: spec.clone(),
                facade: ctx.facade,
                resolved_outer_plane_x,
                adjusted_z_center,
                width: fields.width.max(0.0),
                total_height,
                bottom_y: fields.ground_band.y0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use houseforge_core::{Band, Handedness, HouseParams};

    fn left() -> FacadeContext {
        FacadeContext::resolve(FacadeId::Left, Handedness::Standard)
    }

    #[test]
    fn test_opening_heights() {
        let tall = WindowSpec::tall("t", 1.4, 6.0, Band::new(0.0, 2.45), Band::new(2.45, 5.0));
        let simple = WindowSpec::simple("s", 1.0, 2.0, Band::new(0.0, 2.15));
        assert_relative_eq!(opening_height(&tall), 5.0);
        assert_relative_eq!(opening_height(&simple), 2.15);
    }

    #[test]
    fn test_tall_offset_and_stepped_resolution() {
        let params = HouseParams::default();
        let profile = FacadeProfile::new(params.left_profile.clone()).unwrap();
        // Tall at z 4.1 moves to 3.95 and lands on the first segment
        let spec = WindowSpec::tall("t", 1.4, 4.1, Band::new(0.0, 2.45), Band::new(2.45, 5.0));
        let placements = plan_windows(&left(), &profile, &[spec]);

        assert_relative_eq!(placements[0].adjusted_z_center, 3.95, epsilon = 1e-12);
        assert_eq!(placements[0].resolved_outer_plane_x, 4.8);
        assert!(placements[0].is_split());
    }

    #[test]
    fn test_order_preserved_and_trivial_kept() {
        let profile = FacadeProfile::flat(4.8);
        let specs = vec![
            WindowSpec::simple("a", 1.0, 2.0, Band::new(0.85, 2.15)),
            WindowSpec::tall("b", 0.0, 5.0, Band::none(), Band::none()),
            WindowSpec::simple("c", 1.0, 9.0, Band::new(2.0, 1.0)),
        ];
        let placements = plan_windows(&left(), &profile, &specs);

        let ids: Vec<_> = placements.iter().map(|p| p.id()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert!(!placements[0].is_trivial());
        assert!(placements[1].is_trivial());
        // Inverted band clamps to zero height
        assert_eq!(placements[2].total_height, 0.0);
        assert!(placements[2].is_trivial());
    }

    #[test]
    fn test_short_tall_is_not_split() {
        let profile = FacadeProfile::flat(-4.8);
        let spec = WindowSpec::tall("t", 1.0, 3.0, Band::new(0.0, 2.45), Band::none());
        let ctx = FacadeContext::resolve(FacadeId::Right, Handedness::Standard);
        let placement = &plan_windows(&ctx, &profile, &[spec])[0];
        assert_relative_eq!(placement.total_height, 2.45);
        assert!(!placement.is_split());
        assert_eq!(placement.facade, FacadeId::Right);
    }
}
