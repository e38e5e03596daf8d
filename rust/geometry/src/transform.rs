// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placement transforms handed to the rendering layer
//!
//! Extruded geometry is built in a local frame where the extrusion runs along
//! +Z. A [`Placement`] carries the position and rotation that take it into
//! world space (Y up).

use nalgebra::{Isometry3, Matrix4, Point3, Translation3, UnitQuaternion, Vector3};

/// Position + rotation of a locally-built mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vector3<f64>,
    pub rotation: UnitQuaternion<f64>,
}

impl Placement {
    /// Placement turning local +Z (extrusion direction) into world +Y,
    /// raised to `base_y`
    ///
    /// Local profile Y maps to world −Z, so plan points must be fed as
    /// `(x, -z)` to land at world `(x, z)`.
    pub fn z_up_to_y_up(base_y: f64) -> Self {
        Self {
            position: Vector3::new(0.0, base_y, 0.0),
            rotation: UnitQuaternion::from_axis_angle(
                &Vector3::x_axis(),
                -std::f64::consts::FRAC_PI_2,
            ),
        }
    }

    #[inline]
    pub fn isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(Translation3::from(self.position), self.rotation)
    }

    #[inline]
    pub fn to_matrix(&self) -> Matrix4<f64> {
        self.isometry().to_homogeneous()
    }

    #[inline]
    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.isometry().transform_point(point)
    }
}

/// Build an affine matrix from explicit local axes and an origin
///
/// Columns are the images of local X, Y, Z. Callers keep the basis
/// right-handed so triangle winding survives the transform.
pub fn frame_matrix(
    u: Vector3<f64>,
    v: Vector3<f64>,
    w: Vector3<f64>,
    origin: Vector3<f64>,
) -> Matrix4<f64> {
    Matrix4::new(
        u.x, v.x, w.x, origin.x,
        u.y, v.y, w.y, origin.y,
        u.z, v.z, w.z, origin.z,
        0.0, 0.0, 0.0, 1.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_z_up_to_y_up() {
        let placement = Placement::z_up_to_y_up(2.75);
        // Plan point (x=1, z=3) fed as profile (1, -3), extruded 2 along local Z
        let world = placement.transform_point(&Point3::new(1.0, -3.0, 2.0));
        assert_relative_eq!(world.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(world.y, 4.75, epsilon = 1e-12);
        assert_relative_eq!(world.z, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_frame_matrix_maps_axes() {
        let m = frame_matrix(
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::new(4.8, 0.0, 0.0),
        );
        let p = m.transform_point(&Point3::new(2.0, 1.0, 0.3));
        assert_relative_eq!(p.x, 4.5, epsilon = 1e-12);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 2.0, epsilon = 1e-12);
        assert!(m.fixed_view::<3, 3>(0, 0).clone_owned().determinant() > 0.0);
    }
}
