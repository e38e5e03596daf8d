// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extruded wall shell
//!
//! The outer footprint with the inner footprint as a through-hole, extruded
//! as one polygon-with-hole prism. Geometry stays in the extrusion's local
//! frame; the [`Placement`] stands it upright at the floor's base elevation.

use crate::error::{Error, Result};
use crate::extrusion::{apply_transform, extrude_profile};
use crate::mesh::Mesh;
use crate::profile::Profile2D;
use crate::transform::Placement;
use houseforge_core::FootprintPolygon;

/// Wall shell of one floor
#[derive(Debug, Clone)]
pub struct ExtrudedShell {
    /// Local-frame mesh, extrusion along +Z
    pub mesh: Mesh,
    pub placement: Placement,
    pub height: f64,
    pub base_y: f64,
}

impl ExtrudedShell {
    /// Copy of the mesh in world coordinates
    pub fn world_mesh(&self) -> Mesh {
        let mut mesh = self.mesh.clone();
        apply_transform(&mut mesh, &self.placement.to_matrix());
        mesh
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }
}

/// Extrude the ring between `outer` and `inner` by `height` from `base_y`
///
/// Both footprints are plan polygons; they may wind either way and may repeat
/// their first point at the end.
pub fn build_shell(
    outer: &FootprintPolygon,
    inner: &FootprintPolygon,
    height: f64,
    base_y: f64,
) -> Result<ExtrudedShell> {
    if !(height > 0.0) {
        return Err(Error::InvalidExtrusion(format!(
            "shell height must be positive, got {}",
            height
        )));
    }

    if let Some(p) = inner.points().iter().find(|p| !outer.contains(p)) {
        return Err(Error::InvalidProfile(format!(
            "inner footprint point ({:.3}, {:.3}) lies outside the outer footprint",
            p.x, p.z
        )));
    }

    let mut profile = Profile2D::from_footprint(outer);
    profile.add_hole(Profile2D::from_footprint(inner).outer);

    let mesh = extrude_profile(&profile, height, None)?;

    tracing::debug!(
        base_y,
        height,
        triangles = mesh.triangle_count(),
        "built wall shell"
    );

    Ok(ExtrudedShell {
        mesh,
        placement: Placement::z_up_to_y_up(base_y),
        height,
        base_y,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rectangular_shell_world_bounds() {
        let outer = FootprintPolygon::rectangle(-4.8, 0.0, 4.8, 12.0).unwrap();
        let inner = outer.offset(-0.3).unwrap();
        let shell = build_shell(&outer, &inner, 2.75, 0.0).unwrap();

        let (min, max) = shell.world_mesh().bounds();
        assert_relative_eq!(min.x, -4.8, epsilon = 1e-5);
        assert_relative_eq!(max.x, 4.8, epsilon = 1e-5);
        assert_relative_eq!(min.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(max.y, 2.75, epsilon = 1e-5);
        assert_relative_eq!(min.z, 0.0, epsilon = 1e-5);
        assert_relative_eq!(max.z, 12.0, epsilon = 1e-5);
    }

    #[test]
    fn test_base_elevation_applied() {
        let outer = FootprintPolygon::rectangle(0.0, 0.0, 4.0, 4.0).unwrap();
        let inner = outer.offset(-0.3).unwrap();
        let shell = build_shell(&outer, &inner, 2.85, 2.75).unwrap();
        let (min, max) = shell.world_mesh().bounds();
        assert_relative_eq!(min.y, 2.75, epsilon = 1e-5);
        assert_relative_eq!(max.y, 5.6, epsilon = 1e-5);
    }

    #[test]
    fn test_ring_area() {
        let outer = FootprintPolygon::rectangle(0.0, 0.0, 4.0, 4.0).unwrap();
        let inner = outer.offset(-0.5).unwrap();
        let shell = build_shell(&outer, &inner, 1.0, 0.0).unwrap();
        // Caps 2 x (16 - 9), outer sides 16, inner sides 12
        assert_relative_eq!(shell.mesh.surface_area(), 14.0 + 16.0 + 12.0, epsilon = 1e-4);
    }

    #[test]
    fn test_clockwise_input_accepted() {
        let outer = FootprintPolygon::rectangle(0.0, 0.0, 4.0, 4.0).unwrap().reversed();
        let inner = FootprintPolygon::rectangle(1.0, 1.0, 3.0, 3.0).unwrap();
        assert!(build_shell(&outer, &inner, 1.0, 0.0).is_ok());
    }

    #[test]
    fn test_invalid_inputs() {
        let outer = FootprintPolygon::rectangle(0.0, 0.0, 4.0, 4.0).unwrap();
        let inner = outer.offset(-0.5).unwrap();
        assert!(matches!(
            build_shell(&outer, &inner, 0.0, 0.0),
            Err(Error::InvalidExtrusion(_))
        ));

        let escaping = FootprintPolygon::rectangle(1.0, 1.0, 5.0, 3.0).unwrap();
        assert!(matches!(
            build_shell(&outer, &escaping, 1.0, 0.0),
            Err(Error::InvalidProfile(_))
        ));
    }
}
