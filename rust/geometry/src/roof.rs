// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flat roof boundary and slab
//!
//! The roof polygon is the footprint grown by the eave overhang. It is the
//! boundary handed to the roof plane subsystem and the fallback reference for
//! the extension locator.

use crate::error::{Error, Result};
use crate::extrusion::extrude_profile;
use crate::mesh::Mesh;
use crate::profile::Profile2D;
use crate::transform::Placement;
use houseforge_core::FootprintPolygon;

/// Footprint offset outward by `overhang`
pub fn flat_roof_polygon(footprint: &FootprintPolygon, overhang: f64) -> Result<FootprintPolygon> {
    if overhang < 0.0 {
        return Err(Error::InvalidProfile(format!(
            "eave overhang must not be negative, got {}",
            overhang
        )));
    }
    Ok(footprint.offset(overhang)?)
}

/// Slab of `thickness` sitting on the eaves, in world coordinates
pub fn build_roof_slab(polygon: &FootprintPolygon, eaves_y: f64, thickness: f64) -> Result<Mesh> {
    let profile = Profile2D::from_footprint(polygon);
    let placement = Placement::z_up_to_y_up(eaves_y);
    let mesh = extrude_profile(&profile, thickness, Some(placement.to_matrix()))?;

    tracing::debug!(
        eaves_y,
        thickness,
        triangles = mesh.triangle_count(),
        "built roof slab"
    );

    Ok(mesh)
}
