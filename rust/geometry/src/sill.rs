// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stone sill boxes

use crate::assembly::{GeometryKind, MaterialRef, WindowAssemblyMesh};
use houseforge_core::constants::{SILL_DEPTH, SILL_HEIGHT, SILL_OVERHANG};
use houseforge_core::SillSpec;
use nalgebra::{Point3, UnitQuaternion, Vector3};

/// Center and world-aligned size of the sill box
///
/// The top face sits at `top_y`. The box projects `SILL_OVERHANG` past the
/// wall face on the sill's outward side.
pub fn sill_box(spec: &SillSpec) -> (Point3<f64>, Vector3<f64>) {
    let projection = SILL_DEPTH * 0.5 + SILL_OVERHANG;
    let center_y = spec.top_y() - SILL_HEIGHT * 0.5;

    match *spec {
        SillSpec::RearFacing {
            plane_z,
            outward_sign,
            center_x,
            width,
            ..
        } => (
            Point3::new(center_x, center_y, plane_z + outward_sign * projection),
            Vector3::new(width, SILL_HEIGHT, SILL_DEPTH),
        ),
        SillSpec::SideFacing {
            side,
            plane_x,
            center_z,
            width,
            ..
        } => (
            Point3::new(plane_x + side.sign() * projection, center_y, center_z),
            Vector3::new(SILL_DEPTH, SILL_HEIGHT, width),
        ),
    }
}

/// Sill as an assembly part named `<owner>_sill`
pub fn sill_part(owner_id: &str, spec: &SillSpec) -> WindowAssemblyMesh {
    let (center, size) = sill_box(spec);
    WindowAssemblyMesh {
        id: format!("{}_sill", owner_id),
        geometry_kind: GeometryKind::Box { size },
        local_position: center,
        local_rotation: UnitQuaternion::identity(),
        material: MaterialRef::Stone,
    }
}
