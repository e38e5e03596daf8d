// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stone sill placement
//!
//! Sills sit either under a rear-elevation opening (projecting along ±Z) or
//! under a side-facade window (projecting along ±X). Callers pick the
//! constructor for their context. Raw parameter tables go through
//! [`SillSpec::from_params`], which refuses incomplete input.

use crate::error::{Error, Result};
use crate::facade::WorldSide;

/// Resolved sill placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SillSpec {
    /// Sill in a Z-plane (rear/front) elevation
    RearFacing {
        /// Outer wall plane Z
        plane_z: f64,
        /// +1 when the elevation faces +Z, −1 for −Z
        outward_sign: f64,
        center_x: f64,
        width: f64,
        top_y: f64,
    },
    /// Sill in a side (X-plane) facade
    SideFacing {
        /// World side the sill projects toward
        side: WorldSide,
        /// Outer wall plane X
        plane_x: f64,
        center_z: f64,
        width: f64,
        top_y: f64,
    },
}

impl SillSpec {
    pub fn rear_facing(plane_z: f64, outward_sign: f64, center_x: f64, width: f64, top_y: f64) -> Self {
        SillSpec::RearFacing {
            plane_z,
            outward_sign: if outward_sign >= 0.0 { 1.0 } else { -1.0 },
            center_x,
            width,
            top_y,
        }
    }

    pub fn side_facing(side: WorldSide, plane_x: f64, center_z: f64, width: f64, top_y: f64) -> Self {
        SillSpec::SideFacing {
            side,
            plane_x,
            center_z,
            width,
            top_y,
        }
    }

    /// Resolve raw parameters into a placement
    ///
    /// The facing set (`facing_plane_z` + `facing_sign`) takes precedence over
    /// the side set (`side` + `side_plane_x`). Having neither complete is a
    /// contract violation and fails.
    pub fn from_params(params: &SillParams) -> Result<Self> {
        if let (Some(plane_z), Some(sign)) = (params.facing_plane_z, params.facing_sign) {
            return Ok(Self::rear_facing(
                plane_z,
                sign,
                params.center,
                params.width,
                params.top_y,
            ));
        }

        if let (Some(side), Some(plane_x)) = (params.side, params.side_plane_x) {
            return Ok(Self::side_facing(
                side,
                plane_x,
                params.center,
                params.width,
                params.top_y,
            ));
        }

        Err(Error::MalformedSill(format!(
            "need facing_plane_z + facing_sign or side + side_plane_x \
             (got facing_plane_z={:?}, facing_sign={:?}, side={:?}, side_plane_x={:?})",
            params.facing_plane_z, params.facing_sign, params.side, params.side_plane_x
        )))
    }

    #[inline]
    pub fn width(&self) -> f64 {
        match self {
            SillSpec::RearFacing { width, .. } | SillSpec::SideFacing { width, .. } => *width,
        }
    }

    #[inline]
    pub fn top_y(&self) -> f64 {
        match self {
            SillSpec::RearFacing { top_y, .. } | SillSpec::SideFacing { top_y, .. } => *top_y,
        }
    }
}

/// Loosely-typed sill parameters as found in authored tables
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SillParams {
    pub facing_plane_z: Option<f64>,
    pub facing_sign: Option<f64>,
    pub side: Option<WorldSide>,
    pub side_plane_x: Option<f64>,
    /// Center along the facade (X for rear-facing, Z for side-facing)
    pub center: f64,
    pub width: f64,
    pub top_y: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_params_resolve_to_rear() {
        let params = SillParams {
            facing_plane_z: Some(12.0),
            facing_sign: Some(1.0),
            center: -2.0,
            width: 1.2,
            top_y: 3.6,
            ..Default::default()
        };
        let sill = SillSpec::from_params(&params).unwrap();
        assert!(matches!(sill, SillSpec::RearFacing { plane_z, .. } if plane_z == 12.0));
    }

    #[test]
    fn test_side_params_resolve_to_side() {
        let params = SillParams {
            side: Some(WorldSide::NegativeX),
            side_plane_x: Some(-4.8),
            center: 3.0,
            width: 1.0,
            top_y: 0.85,
            ..Default::default()
        };
        let sill = SillSpec::from_params(&params).unwrap();
        assert!(matches!(
            sill,
            SillSpec::SideFacing { side: WorldSide::NegativeX, .. }
        ));
        assert_eq!(sill.width(), 1.0);
    }

    #[test]
    fn test_partial_params_fail_fast() {
        let params = SillParams {
            facing_plane_z: Some(12.0),
            side: Some(WorldSide::PositiveX),
            ..Default::default()
        };
        let err = SillSpec::from_params(&params).unwrap_err();
        assert!(matches!(err, Error::MalformedSill(_)));
    }

    #[test]
    fn test_rear_facing_normalizes_sign() {
        let sill = SillSpec::rear_facing(0.0, -3.0, 0.0, 1.0, 1.0);
        assert!(matches!(sill, SillSpec::RearFacing { outward_sign, .. } if outward_sign == -1.0));
    }
}
