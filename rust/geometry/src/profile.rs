// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D Profile definitions and triangulation

use crate::bool2d::{compute_signed_area, ensure_ccw, ensure_cw};
use crate::error::{Error, Result};
use houseforge_core::FootprintPolygon;
use nalgebra::Point2;

/// Distance below which a closing point is treated as a repeat of the first
const CLOSING_EPSILON: f64 = 1e-9;

/// 2D Profile with optional holes
#[derive(Debug, Clone)]
pub struct Profile2D {
    /// Outer boundary (counter-clockwise)
    pub outer: Vec<Point2<f64>>,
    /// Holes (clockwise)
    pub holes: Vec<Vec<Point2<f64>>>,
}

impl Profile2D {
    /// Create a new profile
    pub fn new(outer: Vec<Point2<f64>>) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    /// Axis-aligned rectangle from two corners
    pub fn rectangle(min: Point2<f64>, max: Point2<f64>) -> Self {
        Self::new(vec![
            Point2::new(min.x, min.y),
            Point2::new(max.x, min.y),
            Point2::new(max.x, max.y),
            Point2::new(min.x, max.y),
        ])
    }

    /// Plan polygon as profile, feeding points as `(x, -z)`
    ///
    /// Paired with [`Placement::z_up_to_y_up`](crate::Placement::z_up_to_y_up)
    /// this lands extruded geometry back at world `(x, z)`.
    pub fn from_footprint(footprint: &FootprintPolygon) -> Self {
        Self::new(
            footprint
                .points()
                .iter()
                .map(|p| Point2::new(p.x, -p.z))
                .collect(),
        )
    }

    /// Add a hole to the profile
    pub fn add_hole(&mut self, hole: Vec<Point2<f64>>) {
        self.holes.push(hole);
    }

    /// Strip closing duplicates and force outer CCW / holes CW
    pub fn normalized(&self) -> Self {
        Self {
            outer: ensure_ccw(&strip_closing_point(&self.outer)),
            holes: self
                .holes
                .iter()
                .map(|h| ensure_cw(&strip_closing_point(h)))
                .collect(),
        }
    }

    /// Net area (outer minus holes)
    pub fn area(&self) -> f64 {
        compute_signed_area(&self.outer).abs()
            - self
                .holes
                .iter()
                .map(|h| compute_signed_area(h).abs())
                .sum::<f64>()
    }

    /// Triangulate the profile using earcutr
    /// Returns triangle indices into the flattened vertex array
    pub fn triangulate(&self) -> Result<Triangulation> {
        if self.outer.len() < 3 {
            return Err(Error::InvalidProfile(
                "Profile must have at least 3 vertices".to_string(),
            ));
        }

        // Flatten vertices for earcutr
        let mut vertices = Vec::with_capacity(
            (self.outer.len() + self.holes.iter().map(|h| h.len()).sum::<usize>()) * 2,
        );

        // Add outer boundary
        for p in &self.outer {
            vertices.push(p.x);
            vertices.push(p.y);
        }

        // Add holes
        let mut hole_indices = Vec::with_capacity(self.holes.len());
        for hole in &self.holes {
            hole_indices.push(vertices.len() / 2);
            for p in hole {
                vertices.push(p.x);
                vertices.push(p.y);
            }
        }

        let indices = earcutr::earcut(&vertices, &hole_indices, 2)
            .map_err(|e| Error::TriangulationError(format!("{:?}", e)))?;

        if indices.is_empty() {
            return Err(Error::TriangulationError(
                "earcut produced no triangles".to_string(),
            ));
        }

        // Convert to Point2 array
        let mut points = Vec::with_capacity(vertices.len() / 2);
        for i in (0..vertices.len()).step_by(2) {
            points.push(Point2::new(vertices[i], vertices[i + 1]));
        }

        Ok(Triangulation { points, indices })
    }
}

/// Triangulated profile result
#[derive(Debug, Clone)]
pub struct Triangulation {
    /// All vertices (outer + holes)
    pub points: Vec<Point2<f64>>,
    /// Triangle indices
    pub indices: Vec<usize>,
}

/// Drop a trailing point that repeats the first one
pub fn strip_closing_point(contour: &[Point2<f64>]) -> Vec<Point2<f64>> {
    let mut points = contour.to_vec();
    if points.len() > 1 {
        let first = points[0];
        let last = points[points.len() - 1];
        if (first - last).norm() < CLOSING_EPSILON {
            points.pop();
        }
    }
    points
}
