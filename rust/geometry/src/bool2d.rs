// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D Boolean Operations for Panel-Level Opening Subtraction
//!
//! Window and door openings are subtracted from a wall panel's 2D face before
//! extrusion using the i_overlay crate.

use crate::error::{Error, Result};
use crate::profile::Profile2D;
use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;
use nalgebra::Point2;

/// Minimum area threshold - polygons smaller than this are considered degenerate
const MIN_AREA_THRESHOLD: f64 = 1e-10;

/// Subtract every opening contour from a profile in one boolean pass
///
/// Openings fully inside the face become holes; openings touching an edge
/// (doors at the panel foot) reshape the outer boundary. An opening spanning
/// the whole face can split it, so every resulting shape is returned, largest
/// first. A face consumed entirely yields an empty list.
pub fn subtract_openings(
    profile: &Profile2D,
    openings: &[Vec<Point2<f64>>],
) -> Result<Vec<Profile2D>> {
    if profile.outer.len() < 3 {
        return Err(Error::InvalidProfile(
            "Profile must have at least 3 vertices".to_string(),
        ));
    }

    let clip: Vec<Vec<[f64; 2]>> = openings
        .iter()
        .filter(|c| is_valid_contour(c))
        .map(|c| contour_to_path(&ensure_ccw(c)))
        .collect();

    if clip.is_empty() {
        return Ok(vec![profile.normalized()]);
    }

    let subject = profile_to_paths(profile);

    // Vec of shapes, each shape a Vec of contours (outer first, then holes)
    let result = subject.overlay(&clip, OverlayRule::Difference, FillRule::EvenOdd);

    let mut profiles = shapes_to_profiles(&result);
    profiles.sort_by(|a, b| b.area().total_cmp(&a.area()));
    Ok(profiles)
}

/// Check if a contour is valid (has area, not degenerate)
pub fn is_valid_contour(contour: &[Point2<f64>]) -> bool {
    if contour.len() < 3 {
        return false;
    }

    let area = compute_signed_area(contour).abs();
    area > MIN_AREA_THRESHOLD
}

/// Compute the signed area of a 2D contour
/// Positive = counter-clockwise, Negative = clockwise
pub fn compute_signed_area(contour: &[Point2<f64>]) -> f64 {
    if contour.len() < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    let n = contour.len();

    for i in 0..n {
        let j = (i + 1) % n;
        area += contour[i].x * contour[j].y;
        area -= contour[j].x * contour[i].y;
    }

    area * 0.5
}

/// Ensure contour has counter-clockwise winding (positive area)
pub fn ensure_ccw(contour: &[Point2<f64>]) -> Vec<Point2<f64>> {
    let area = compute_signed_area(contour);
    if area < 0.0 {
        // Clockwise - reverse to make counter-clockwise
        contour.iter().rev().cloned().collect()
    } else {
        contour.to_vec()
    }
}

/// Ensure contour has clockwise winding (for holes)
pub fn ensure_cw(contour: &[Point2<f64>]) -> Vec<Point2<f64>> {
    let area = compute_signed_area(contour);
    if area > 0.0 {
        // Counter-clockwise - reverse to make clockwise
        contour.iter().rev().cloned().collect()
    } else {
        contour.to_vec()
    }
}

// ============================================================================
// Internal Helper Functions
// ============================================================================

/// Convert Profile2D to i_overlay path format
fn profile_to_paths(profile: &Profile2D) -> Vec<Vec<[f64; 2]>> {
    let mut paths = Vec::with_capacity(1 + profile.holes.len());

    let outer = ensure_ccw(&profile.outer);
    paths.push(contour_to_path(&outer));

    // EvenOdd fill makes hole winding irrelevant, CW kept for consistency
    for hole in &profile.holes {
        let hole_cw = ensure_cw(hole);
        paths.push(contour_to_path(&hole_cw));
    }

    paths
}

/// Convert a Point2 contour to i_overlay path format
fn contour_to_path(contour: &[Point2<f64>]) -> Vec<[f64; 2]> {
    contour.iter().map(|p| [p.x, p.y]).collect()
}

fn path_to_contour(path: &[[f64; 2]]) -> Vec<Point2<f64>> {
    path.iter().map(|p| Point2::new(p[0], p[1])).collect()
}

/// Convert i_overlay result shapes back to profiles, dropping slivers
fn shapes_to_profiles(shapes: &[Vec<Vec<[f64; 2]>>]) -> Vec<Profile2D> {
    shapes
        .iter()
        .filter_map(|shape| {
            let outer = path_to_contour(shape.first()?);
            if !is_valid_contour(&outer) {
                return None;
            }

            let holes = shape
                .iter()
                .skip(1)
                .map(|c| path_to_contour(c))
                .filter(|h| is_valid_contour(h))
                .map(|h| ensure_cw(&h))
                .collect();

            Some(Profile2D {
                outer: ensure_ccw(&outer),
                holes,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(min: f64, max: f64) -> Vec<Point2<f64>> {
        vec![
            Point2::new(min, min),
            Point2::new(max, min),
            Point2::new(max, max),
            Point2::new(min, max),
        ]
    }

    #[test]
    fn test_compute_signed_area() {
        let ccw = square(0.0, 1.0);
        assert_relative_eq!(compute_signed_area(&ccw), 1.0);

        let cw: Vec<_> = ccw.iter().rev().cloned().collect();
        assert_relative_eq!(compute_signed_area(&cw), -1.0);
        assert!(compute_signed_area(&ensure_ccw(&cw)) > 0.0);
    }

    #[test]
    fn test_subtract_interior_opening_becomes_hole() {
        let profile = Profile2D::new(square(0.0, 10.0));
        let result = subtract_openings(&profile, &[square(4.0, 6.0)]).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].holes.len(), 1);
        assert_eq!(result[0].outer.len(), 4);
        assert_relative_eq!(result[0].area(), 96.0, epsilon = 1e-6);
    }

    #[test]
    fn test_subtract_multiple_openings() {
        let profile = Profile2D::new(square(0.0, 10.0));
        let result = subtract_openings(&profile, &[square(2.0, 3.0), square(7.0, 8.0)]).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].holes.len(), 2);
    }

    #[test]
    fn test_subtract_door_notches_outer_boundary() {
        let profile = Profile2D::new(square(0.0, 10.0));
        let door = vec![
            Point2::new(4.0, -1.0),
            Point2::new(6.0, -1.0),
            Point2::new(6.0, 5.0),
            Point2::new(4.0, 5.0),
        ];
        let result = subtract_openings(&profile, &[door]).unwrap();

        assert_eq!(result.len(), 1);
        assert!(result[0].holes.is_empty());
        assert_relative_eq!(result[0].area(), 90.0, epsilon = 1e-6);
    }

    #[test]
    fn test_subtract_full_height_opening_splits() {
        let profile = Profile2D::rectangle(Point2::new(0.0, 0.0), Point2::new(10.0, 3.0));
        let slot = vec![
            Point2::new(2.0, -1.0),
            Point2::new(3.0, -1.0),
            Point2::new(3.0, 4.0),
            Point2::new(2.0, 4.0),
        ];
        let result = subtract_openings(&profile, &[slot]).unwrap();

        assert_eq!(result.len(), 2);
        // Largest piece first
        assert_relative_eq!(result[0].area(), 21.0, epsilon = 1e-6);
        assert_relative_eq!(result[1].area(), 6.0, epsilon = 1e-6);
    }

    #[test]
    fn test_subtract_without_openings_is_identity() {
        let profile = Profile2D::new(square(0.0, 2.0));
        let result = subtract_openings(&profile, &[]).unwrap();
        assert_eq!(result.len(), 1);
        assert_relative_eq!(result[0].area(), 4.0);
    }

    #[test]
    fn test_is_valid_contour() {
        assert!(is_valid_contour(&square(0.0, 1.0)));
        assert!(!is_valid_contour(&[
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        ]));
        assert!(!is_valid_contour(&[Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]));
    }
}
