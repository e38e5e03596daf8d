// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Prepared house model.
//!
//! Everything derived from the parameter table is computed once here and
//! shared read-only by every build step.

use crate::error::Result;
use houseforge_core::{FacadeId, FootprintPolygon, HouseParams};
use houseforge_geometry::{
    flat_roof_polygon, locate_side_extension, CarverFacade, EnvelopeBounds, ExtensionWall,
    FacadeContext, FacadeProfile, ShellCarver,
};

/// One side facade with its resolved context and profile.
#[derive(Debug, Clone)]
pub struct FacadeSide {
    pub ctx: FacadeContext,
    pub profile: FacadeProfile,
}

/// Immutable inputs of a house build.
#[derive(Debug, Clone)]
pub struct HouseModel {
    /// Parameter table in meters.
    pub params: HouseParams,
    pub outer: FootprintPolygon,
    /// Inner wall face, the outer footprint offset by the wall thickness.
    pub inner: FootprintPolygon,
    /// Footprint grown by the eave overhang.
    pub roof: FootprintPolygon,
    pub envelope: EnvelopeBounds,
    pub left: FacadeSide,
    pub right: FacadeSide,
    pub extension: Option<ExtensionWall>,
}

impl HouseModel {
    /// Validate the table and derive every shared value.
    pub fn prepare(params: &HouseParams) -> Result<Self> {
        let params = params.normalized();
        params.validate()?;

        let outer = params.footprint_polygon()?;
        let inner = outer.offset(-params.wall_thickness)?;
        let roof = flat_roof_polygon(&outer, params.eave_overhang)?;
        let envelope = EnvelopeBounds::from_footprint(&outer, params.handedness);

        let side = |facade: FacadeId| -> Result<FacadeSide> {
            Ok(FacadeSide {
                ctx: FacadeContext::resolve(facade, params.handedness),
                profile: FacadeProfile::new(params.profile(facade).clone())?,
            })
        };
        let left = side(FacadeId::Left)?;
        let right = side(FacadeId::Right)?;
        for s in [&left, &right] {
            check_outward(s, &envelope)?;
        }

        let extension = [&left, &right]
            .into_iter()
            .find_map(|s| locate_side_extension(&s.ctx, &s.profile, &outer, &roof));

        tracing::info!(
            footprint_points = outer.len(),
            wall_thickness = params.wall_thickness,
            left_segments = left.profile.segments().len(),
            right_segments = right.profile.segments().len(),
            extension = extension.is_some(),
            "prepared house model"
        );

        Ok(Self {
            params,
            outer,
            inner,
            roof,
            envelope,
            left,
            right,
            extension,
        })
    }

    #[inline]
    pub fn side(&self, facade: FacadeId) -> &FacadeSide {
        match facade {
            FacadeId::Left => &self.left,
            FacadeId::Right => &self.right,
        }
    }

    /// Carver over this model's envelope and profiles, without openings.
    pub fn carver(&self) -> ShellCarver {
        ShellCarver::new(
            self.envelope,
            self.params.wall_thickness,
            CarverFacade::new(self.left.ctx, self.left.profile.clone()),
            CarverFacade::new(self.right.ctx, self.right.profile.clone()),
        )
        .with_extension(self.extension)
    }
}

/// Every segment of a side profile must lie on that facade's outward half
/// of the envelope; a table authored for the other handedness fails here.
fn check_outward(side: &FacadeSide, envelope: &EnvelopeBounds) -> Result<()> {
    let center_x = (envelope.min_x() + envelope.max_x()) * 0.5;
    let facade = side.ctx.facade.as_str();
    for seg in side.profile.segments() {
        if (seg.plane_x - center_x) * side.ctx.outward_sign <= 0.0 {
            return Err(houseforge_core::Error::InvalidProfile(format!(
                "{} segment [{}, {}] at x = {} is not on the {:?} side of the envelope",
                facade,
                seg.z_start,
                seg.z_end,
                seg.plane_x,
                side.ctx.outward_side(),
            ))
            .into());
        }
    }
    Ok(())
}
