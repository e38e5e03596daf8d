// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stepped side-facade profiles
//!
//! A profile maps a Z position along a side elevation to the X of the outer
//! wall plane there. Flat facades are the single-segment case.

use crate::error::{Error, Result};
use houseforge_core::{ProfileSegment, ProfileTable};
use smallvec::smallvec;

/// Ordered, non-overlapping run of outer-plane segments
#[derive(Debug, Clone, PartialEq)]
pub struct FacadeProfile {
    segments: ProfileTable,
}

impl FacadeProfile {
    /// Validate and wrap a segment table
    ///
    /// Segments must be non-empty, each with `z_start <= z_end`, sorted by Z
    /// and non-overlapping. Shared boundaries are allowed.
    pub fn new(segments: ProfileTable) -> Result<Self> {
        if segments.is_empty() {
            return Err(Error::InvalidProfile(
                "facade profile needs at least one segment".to_string(),
            ));
        }

        for (i, seg) in segments.iter().enumerate() {
            if !(seg.z_start <= seg.z_end) || !seg.plane_x.is_finite() {
                return Err(Error::InvalidProfile(format!(
                    "segment {} spans z {}..{} at x {}",
                    i, seg.z_start, seg.z_end, seg.plane_x
                )));
            }
        }

        for (i, pair) in segments.windows(2).enumerate() {
            if pair[1].z_start < pair[0].z_end {
                return Err(Error::InvalidProfile(format!(
                    "segment {} starts at z {} before segment {} ends at z {}",
                    i + 1,
                    pair[1].z_start,
                    i,
                    pair[0].z_end
                )));
            }
        }

        Ok(Self { segments })
    }

    /// Single plane covering every Z
    pub fn flat(plane_x: f64) -> Self {
        Self {
            segments: smallvec![ProfileSegment::new(
                f64::NEG_INFINITY,
                f64::INFINITY,
                plane_x
            )],
        }
    }

    #[inline]
    pub fn segments(&self) -> &[ProfileSegment] {
        &self.segments
    }

    /// Outer-plane X at `z`
    ///
    /// First segment with `z_start <= z <= z_end` wins, so a shared boundary
    /// resolves to the earlier segment. Z outside every range clamps to the
    /// last segment.
    pub fn resolve_plane_x(&self, z: f64) -> f64 {
        self.resolve_segment(z).plane_x
    }

    /// Segment owning `z` under the same rule as [`Self::resolve_plane_x`]
    pub fn resolve_segment(&self, z: f64) -> &ProfileSegment {
        let last = &self.segments[self.segments.len() - 1];
        self.segments
            .iter()
            .find(|seg| seg.contains_z(z))
            .unwrap_or(last)
    }

    /// Whether the outer plane changes anywhere along the facade
    pub fn is_stepped(&self, tolerance: f64) -> bool {
        let first = self.segments[0].plane_x;
        self.segments
            .iter()
            .any(|seg| (seg.plane_x - first).abs() > tolerance)
    }

    /// Z range covered by the segments
    pub fn z_range(&self) -> (f64, f64) {
        (self.segments[0].z_start, self.segments[self.segments.len() - 1].z_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stepped() -> FacadeProfile {
        FacadeProfile::new(smallvec![
            ProfileSegment::new(0.0, 4.0, 4.8),
            ProfileSegment::new(4.0, 8.45, 4.1),
            ProfileSegment::new(8.45, 12.0, 3.5),
        ])
        .unwrap()
    }

    #[test]
    fn test_resolve_inside_segments() {
        let profile = stepped();
        assert_eq!(profile.resolve_plane_x(2.0), 4.8);
        assert_eq!(profile.resolve_plane_x(6.0), 4.1);
        assert_eq!(profile.resolve_plane_x(10.0), 3.5);
    }

    #[test]
    fn test_shared_boundary_resolves_to_earlier_segment() {
        let profile = stepped();
        assert_eq!(profile.resolve_plane_x(4.0), 4.8);
        assert_eq!(profile.resolve_plane_x(8.45), 4.1);
    }

    #[test]
    fn test_out_of_range_clamps_to_last() {
        let profile = stepped();
        assert_eq!(profile.resolve_plane_x(20.0), 3.5);
        assert_eq!(profile.resolve_plane_x(-1.0), 3.5);
    }

    #[test]
    fn test_constant_within_each_segment() {
        let profile = stepped();
        for seg in profile.segments() {
            let mut z = seg.z_start;
            while z <= seg.z_end {
                let x = profile.resolve_plane_x(z);
                assert!(profile.segments().iter().any(|s| s.plane_x == x));
                if z > seg.z_start {
                    assert_eq!(x, seg.plane_x);
                }
                z += 0.25;
            }
        }
    }

    #[test]
    fn test_flat_profile() {
        let profile = FacadeProfile::flat(4.8);
        for z in [-100.0, 0.0, 5.5, 1e6] {
            assert_eq!(profile.resolve_plane_x(z), 4.8);
        }
        assert!(!profile.is_stepped(0.01));
        assert!(stepped().is_stepped(0.01));
    }

    #[test]
    fn test_rejects_overlap_and_empty() {
        assert!(FacadeProfile::new(ProfileTable::new()).is_err());
        let overlapping = FacadeProfile::new(smallvec![
            ProfileSegment::new(0.0, 5.0, 4.8),
            ProfileSegment::new(4.0, 8.0, 4.1),
        ]);
        assert!(matches!(overlapping, Err(Error::InvalidProfile(_))));
        let inverted = FacadeProfile::new(smallvec![ProfileSegment::new(5.0, 1.0, 4.8)]);
        assert!(inverted.is_err());
    }
}
