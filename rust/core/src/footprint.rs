// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building footprint polygons in the horizontal X–Z plane

use crate::bounds::PlanBounds;
use crate::error::{Error, Result};

/// Distance below which two consecutive points count as the same point
const POINT_EPSILON: f64 = 1e-9;

/// Minimum area threshold - polygons smaller than this are considered degenerate
const MIN_AREA_THRESHOLD: f64 = 1e-10;

/// A point in plan view (world X, world Z)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanPoint {
    pub x: f64,
    pub z: f64,
}

impl PlanPoint {
    #[inline]
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    #[inline]
    pub fn distance_to(&self, other: &PlanPoint) -> f64 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }

    #[inline]
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.z * factor)
    }
}

/// Ordered, non-self-intersecting polygon describing a building boundary
///
/// The closing point is implicit: a trailing point equal to the first one is
/// stripped on construction. Consecutive duplicates are rejected because a
/// zero-length edge has no plane to resolve against.
#[derive(Debug, Clone, PartialEq)]
pub struct FootprintPolygon {
    points: Vec<PlanPoint>,
}

impl FootprintPolygon {
    /// Build a polygon from plan points, accepting open or closed input
    pub fn new(mut points: Vec<PlanPoint>) -> Result<Self> {
        if points.len() > 1 {
            let first = points[0];
            let last = points[points.len() - 1];
            if first.distance_to(&last) < POINT_EPSILON {
                points.pop();
            }
        }

        if points.len() < 3 {
            return Err(Error::DegeneratePolygon(format!(
                "need at least 3 distinct points, got {}",
                points.len()
            )));
        }

        for i in 1..points.len() {
            if points[i - 1].distance_to(&points[i]) < POINT_EPSILON {
                return Err(Error::DuplicatePoint {
                    index: i,
                    x: points[i].x,
                    z: points[i].z,
                });
            }
        }

        let polygon = Self { points };
        if polygon.signed_area().abs() < MIN_AREA_THRESHOLD {
            return Err(Error::DegeneratePolygon("polygon has no area".to_string()));
        }
        Ok(polygon)
    }

    /// Axis-aligned rectangle spanning `[min_x, max_x] x [min_z, max_z]`
    pub fn rectangle(min_x: f64, min_z: f64, max_x: f64, max_z: f64) -> Result<Self> {
        Self::new(vec![
            PlanPoint::new(min_x, min_z),
            PlanPoint::new(max_x, min_z),
            PlanPoint::new(max_x, max_z),
            PlanPoint::new(min_x, max_z),
        ])
    }

    #[inline]
    pub fn points(&self) -> &[PlanPoint] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate the closed edge loop as `(start, end)` pairs
    pub fn edges(&self) -> impl Iterator<Item = (PlanPoint, PlanPoint)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Shoelace area in the X–Z plane.
    /// Positive = counter-clockwise with X to the right and Z up.
    pub fn signed_area(&self) -> f64 {
        let mut area = 0.0;
        for (a, b) in self.edges() {
            area += a.x * b.z - b.x * a.z;
        }
        area * 0.5
    }

    #[inline]
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Same polygon with reversed winding
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self { points }
    }

    pub fn bounds(&self) -> PlanBounds {
        let mut bounds = PlanBounds::new();
        for p in &self.points {
            bounds.expand(p.x, p.z);
        }
        bounds
    }

    /// Uniformly scale every point (unit conversion)
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            points: self.points.iter().map(|p| p.scaled(factor)).collect(),
        }
    }

    /// Minimum and maximum X of the boundary at a given Z
    ///
    /// Edges crossing `z` contribute their interpolated X. Edges of constant Z
    /// lying on `z` (within `tolerance`) contribute both endpoints. Returns
    /// `None` when no edge reaches `z`.
    pub fn x_extents_at(&self, z: f64, tolerance: f64) -> Option<(f64, f64)> {
        let mut min_x = f64::MAX;
        let mut max_x = f64::MIN;
        let mut hit = false;

        for (a, b) in self.edges() {
            if (a.z - b.z).abs() <= tolerance {
                if (a.z - z).abs() <= tolerance {
                    min_x = min_x.min(a.x).min(b.x);
                    max_x = max_x.max(a.x).max(b.x);
                    hit = true;
                }
                continue;
            }

            let (lo, hi) = if a.z < b.z { (a.z, b.z) } else { (b.z, a.z) };
            if z < lo - tolerance || z > hi + tolerance {
                continue;
            }

            let t = ((z - a.z) / (b.z - a.z)).clamp(0.0, 1.0);
            let x = a.x + (b.x - a.x) * t;
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            hit = true;
        }

        hit.then_some((min_x, max_x))
    }

    /// Ray-casting point containment test
    pub fn contains(&self, point: &PlanPoint) -> bool {
        let mut inside = false;
        let n = self.points.len();
        let mut j = n - 1;
        for i in 0..n {
            let pi = &self.points[i];
            let pj = &self.points[j];
            if ((pi.z > point.z) != (pj.z > point.z))
                && (point.x < (pj.x - pi.x) * (point.z - pi.z) / (pj.z - pi.z) + pi.x)
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// Mitred parallel offset of every edge
    ///
    /// Positive `distance` grows the polygon (eave overhangs), negative shrinks
    /// it (inner wall face from outer footprint). Winding is preserved.
    pub fn offset(&self, distance: f64) -> Result<Self> {
        if distance == 0.0 {
            return Ok(self.clone());
        }

        // Outward normal of edge direction (dx, dz) is (dz, -dx) for CCW loops
        let orientation = if self.is_ccw() { 1.0 } else { -1.0 };
        let n = self.points.len();
        let mut result = Vec::with_capacity(n);

        for i in 0..n {
            let prev = self.points[(i + n - 1) % n];
            let curr = self.points[i];
            let next = self.points[(i + 1) % n];

            let n_prev = edge_normal(prev, curr, orientation);
            let n_next = edge_normal(curr, next, orientation);

            let denom = 1.0 + n_prev.0 * n_next.0 + n_prev.1 * n_next.1;
            let (mx, mz) = if denom.abs() < 1e-9 {
                // Reversing spike: no finite miter exists
                n_prev
            } else {
                ((n_prev.0 + n_next.0) / denom, (n_prev.1 + n_next.1) / denom)
            };

            result.push(PlanPoint::new(
                curr.x + mx * distance,
                curr.z + mz * distance,
            ));
        }

        let offset = Self::new(result)?;

        // An over-shrunk edge flips direction instead of vanishing
        let inverted = self.edges().zip(offset.edges()).any(|((a, b), (c, d))| {
            (b.x - a.x) * (d.x - c.x) + (b.z - a.z) * (d.z - c.z) <= 0.0
        });
        if inverted {
            return Err(Error::DegeneratePolygon(format!(
                "offset by {:.3} inverts the polygon",
                distance
            )));
        }
        Ok(offset)
    }
}

#[inline]
fn edge_normal(a: PlanPoint, b: PlanPoint, orientation: f64) -> (f64, f64) {
    let dx = b.x - a.x;
    let dz = b.z - a.z;
    let len = (dx * dx + dz * dz).sqrt();
    (orientation * dz / len, -orientation * dx / len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn stepped() -> FootprintPolygon {
        FootprintPolygon::new(vec![
            PlanPoint::new(-4.8, 0.0),
            PlanPoint::new(4.8, 0.0),
            PlanPoint::new(4.8, 4.0),
            PlanPoint::new(4.1, 4.0),
            PlanPoint::new(4.1, 8.45),
            PlanPoint::new(3.5, 8.45),
            PlanPoint::new(3.5, 12.0),
            PlanPoint::new(-4.8, 12.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_closed_input_is_stripped() {
        let poly = FootprintPolygon::new(vec![
            PlanPoint::new(0.0, 0.0),
            PlanPoint::new(1.0, 0.0),
            PlanPoint::new(1.0, 1.0),
            PlanPoint::new(0.0, 0.0),
        ])
        .unwrap();
        assert_eq!(poly.len(), 3);
    }

    #[test]
    fn test_duplicate_point_rejected() {
        let err = FootprintPolygon::new(vec![
            PlanPoint::new(0.0, 0.0),
            PlanPoint::new(1.0, 0.0),
            PlanPoint::new(1.0, 0.0),
            PlanPoint::new(1.0, 1.0),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::DuplicatePoint { index: 2, .. }));
    }

    #[test]
    fn test_collinear_rejected() {
        let result = FootprintPolygon::new(vec![
            PlanPoint::new(0.0, 0.0),
            PlanPoint::new(1.0, 0.0),
            PlanPoint::new(2.0, 0.0),
        ]);
        assert!(matches!(result, Err(Error::DegeneratePolygon(_))));
    }

    #[test]
    fn test_signed_area() {
        let rect = FootprintPolygon::rectangle(0.0, 0.0, 4.0, 2.0).unwrap();
        assert_relative_eq!(rect.signed_area(), 8.0);
        assert!(rect.is_ccw());
        assert_relative_eq!(rect.reversed().signed_area(), -8.0);
    }

    #[test]
    fn test_x_extents_crossing() {
        let poly = stepped();
        let (min_x, max_x) = poly.x_extents_at(2.0, 1e-6).unwrap();
        assert_relative_eq!(min_x, -4.8);
        assert_relative_eq!(max_x, 4.8);

        let (_, max_x) = poly.x_extents_at(10.0, 1e-6).unwrap();
        assert_relative_eq!(max_x, 3.5);
    }

    #[test]
    fn test_x_extents_on_horizontal_edge() {
        let poly = stepped();
        // z = 4.0 lies on the 4.8 -> 4.1 step edge
        let (min_x, max_x) = poly.x_extents_at(4.0, 1e-6).unwrap();
        assert_relative_eq!(min_x, -4.8);
        assert_relative_eq!(max_x, 4.8);
    }

    #[test]
    fn test_x_extents_outside() {
        assert!(stepped().x_extents_at(20.0, 1e-6).is_none());
    }

    #[test]
    fn test_inward_offset_rectangle() {
        let rect = FootprintPolygon::rectangle(0.0, 0.0, 10.0, 6.0).unwrap();
        let inner = rect.offset(-0.3).unwrap();
        let b = inner.bounds();
        assert_relative_eq!(b.min_x, 0.3, epsilon = 1e-9);
        assert_relative_eq!(b.max_x, 9.7, epsilon = 1e-9);
        assert_relative_eq!(b.min_z, 0.3, epsilon = 1e-9);
        assert_relative_eq!(b.max_z, 5.7, epsilon = 1e-9);
    }

    #[test]
    fn test_offset_preserves_steps() {
        let inner = stepped().offset(-0.3).unwrap();
        let (_, max_x) = inner.x_extents_at(10.0, 1e-6).unwrap();
        assert_relative_eq!(max_x, 3.2, epsilon = 1e-9);
        assert!(inner.is_ccw());
    }

    #[test]
    fn test_offset_cw_polygon_grows() {
        let rect = FootprintPolygon::rectangle(0.0, 0.0, 2.0, 2.0)
            .unwrap()
            .reversed();
        let grown = rect.offset(0.5).unwrap();
        assert_relative_eq!(grown.signed_area().abs(), 9.0, epsilon = 1e-9);
    }

    #[test]
    fn test_offset_collapse_is_error() {
        let rect = FootprintPolygon::rectangle(0.0, 0.0, 1.0, 1.0).unwrap();
        assert!(rect.offset(-0.75).is_err());
    }

    #[test]
    fn test_contains() {
        let poly = stepped();
        assert!(poly.contains(&PlanPoint::new(0.0, 6.0)));
        assert!(!poly.contains(&PlanPoint::new(4.5, 10.0)));
    }
}
