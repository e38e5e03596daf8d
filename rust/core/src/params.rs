// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! House parameter table
//!
//! The static input of the whole pipeline: footprint, wall thickness, level
//! datums, side-facade profiles and window lists. Tables may be authored in
//! centimeters; [`HouseParams::normalized`] converts everything to meters.

use crate::constants::{DEFAULT_EAVE_OVERHANG, DEFAULT_ROOF_THICKNESS};
use crate::error::{Error, Result};
use crate::facade::{FacadeId, Handedness};
use crate::footprint::{FootprintPolygon, PlanPoint};
use crate::levels::LevelHeights;
use crate::profile::{ProfileSegment, ProfileTable};
use crate::units::LengthUnit;
use crate::window::{Band, RearOpening, WindowSpec};
use smallvec::smallvec;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HouseParams {
    #[cfg_attr(feature = "serde", serde(default))]
    pub unit: LengthUnit,
    /// Outer footprint, front elevation at minimum Z
    pub footprint: Vec<PlanPoint>,
    pub wall_thickness: f64,
    pub levels: LevelHeights,
    #[cfg_attr(feature = "serde", serde(default))]
    pub handedness: Handedness,
    pub left_profile: ProfileTable,
    pub right_profile: ProfileTable,
    #[cfg_attr(feature = "serde", serde(default))]
    pub left_windows: Vec<WindowSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub right_windows: Vec<WindowSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rear_openings: Vec<RearOpening>,
    #[cfg_attr(feature = "serde", serde(default = "default_eave_overhang"))]
    pub eave_overhang: f64,
    #[cfg_attr(feature = "serde", serde(default = "default_roof_thickness"))]
    pub roof_thickness: f64,
}

#[cfg(feature = "serde")]
fn default_eave_overhang() -> f64 {
    DEFAULT_EAVE_OVERHANG
}

#[cfg(feature = "serde")]
fn default_roof_thickness() -> f64 {
    DEFAULT_ROOF_THICKNESS
}

impl HouseParams {
    /// Copy of the table converted to meters
    ///
    /// Eave overhang and roof thickness are authored in the table unit too.
    pub fn normalized(&self) -> Self {
        let factor = self.unit.to_meters();
        if factor == 1.0 {
            return self.clone();
        }
        Self {
            unit: LengthUnit::Meter,
            footprint: self.footprint.iter().map(|p| p.scaled(factor)).collect(),
            wall_thickness: self.wall_thickness * factor,
            levels: self.levels.scaled(factor),
            handedness: self.handedness,
            left_profile: self.left_profile.iter().map(|s| s.scaled(factor)).collect(),
            right_profile: self.right_profile.iter().map(|s| s.scaled(factor)).collect(),
            left_windows: self.left_windows.iter().map(|w| w.scaled(factor)).collect(),
            right_windows: self.right_windows.iter().map(|w| w.scaled(factor)).collect(),
            rear_openings: self.rear_openings.iter().map(|o| o.scaled(factor)).collect(),
            eave_overhang: self.eave_overhang * factor,
            roof_thickness: self.roof_thickness * factor,
        }
    }

    pub fn footprint_polygon(&self) -> Result<FootprintPolygon> {
        FootprintPolygon::new(self.footprint.clone())
    }

    #[inline]
    pub fn profile(&self, facade: FacadeId) -> &ProfileTable {
        match facade {
            FacadeId::Left => &self.left_profile,
            FacadeId::Right => &self.right_profile,
        }
    }

    #[inline]
    pub fn windows(&self, facade: FacadeId) -> &[WindowSpec] {
        match facade {
            FacadeId::Left => &self.left_windows,
            FacadeId::Right => &self.right_windows,
        }
    }

    /// Check scalar parameters; polygon and profile shape are checked where
    /// they are built
    pub fn validate(&self) -> Result<()> {
        if !(self.wall_thickness > 0.0) {
            return Err(Error::invalid(
                "wall_thickness",
                format!("must be positive, got {}", self.wall_thickness),
            ));
        }
        if self.eave_overhang < 0.0 {
            return Err(Error::invalid(
                "eave_overhang",
                format!("must not be negative, got {}", self.eave_overhang),
            ));
        }
        if !(self.roof_thickness > 0.0) {
            return Err(Error::invalid(
                "roof_thickness",
                format!("must be positive, got {}", self.roof_thickness),
            ));
        }
        self.levels.validate()?;

        for facade in FacadeId::ALL {
            if self.profile(facade).is_empty() {
                return Err(Error::InvalidProfile(format!(
                    "{} profile has no segments",
                    facade.as_str()
                )));
            }
            for spec in self.windows(facade) {
                if !(spec.fields().width > 0.0) {
                    return Err(Error::invalid(
                        "window.width",
                        format!("window `{}` has width {}", spec.id(), spec.fields().width),
                    ));
                }
            }
        }

        for opening in &self.rear_openings {
            if !(opening.width > 0.0) {
                return Err(Error::invalid(
                    "rear_opening.width",
                    format!("opening `{}` has width {}", opening.id, opening.width),
                ));
            }
        }
        Ok(())
    }
}

impl Default for HouseParams {
    /// Reference two-story house: 9.6 m wide, 12 m deep, left facade stepping
    /// in twice toward the rear
    fn default() -> Self {
        Self {
            unit: LengthUnit::Meter,
            footprint: vec![
                PlanPoint::new(-4.8, 0.0),
                PlanPoint::new(4.8, 0.0),
                PlanPoint::new(4.8, 4.0),
                PlanPoint::new(4.1, 4.0),
                PlanPoint::new(4.1, 8.45),
                PlanPoint::new(3.5, 8.45),
                PlanPoint::new(3.5, 12.0),
                PlanPoint::new(-4.8, 12.0),
            ],
            wall_thickness: 0.3,
            levels: LevelHeights::default(),
            handedness: Handedness::Standard,
            left_profile: smallvec![
                ProfileSegment::new(0.0, 4.0, 4.8),
                ProfileSegment::new(4.0, 8.45, 4.1),
                ProfileSegment::new(8.45, 12.0, 3.5),
            ],
            right_profile: smallvec![ProfileSegment::new(0.0, 12.0, -4.8)],
            left_windows: vec![
                WindowSpec::simple("left_w1", 1.0, 2.0, Band::new(0.85, 2.15)),
                WindowSpec::tall(
                    "left_w2",
                    1.4,
                    6.2,
                    Band::new(0.0, 2.45),
                    Band::new(2.45, 5.0),
                ),
                WindowSpec::simple("left_w3", 1.0, 10.2, Band::new(0.85, 2.15)),
            ],
            right_windows: vec![
                WindowSpec::tall(
                    "right_w1",
                    1.6,
                    3.0,
                    Band::new(0.0, 2.45),
                    Band::new(2.45, 5.0),
                ),
                WindowSpec::simple("right_w2", 1.2, 9.0, Band::new(0.85, 2.15)),
            ],
            rear_openings: vec![
                RearOpening {
                    id: "rear_door".to_string(),
                    x_center: -2.0,
                    width: 1.0,
                    band: Band::new(0.0, 2.2),
                    is_door: true,
                },
                RearOpening {
                    id: "rear_w1".to_string(),
                    x_center: 1.0,
                    width: 1.2,
                    band: Band::new(3.6, 4.9),
                    is_door: false,
                },
            ],
            eave_overhang: DEFAULT_EAVE_OVERHANG,
            roof_thickness: DEFAULT_ROOF_THICKNESS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let params = HouseParams::default();
        params.validate().unwrap();
        let footprint = params.footprint_polygon().unwrap();
        assert!(footprint.is_ccw());
    }

    #[test]
    fn test_normalized_from_centimeters() {
        let mut params = HouseParams::default().normalized();
        params.unit = LengthUnit::Centimeter;
        params.footprint = params.footprint.iter().map(|p| p.scaled(100.0)).collect();
        params.wall_thickness = 30.0;

        let meters = params.normalized();
        assert_eq!(meters.unit, LengthUnit::Meter);
        assert!((meters.wall_thickness - 0.3).abs() < 1e-12);
        assert!((meters.footprint[1].x - 4.8).abs() < 1e-12);
    }

    #[test]
    fn test_zero_thickness_rejected() {
        let params = HouseParams {
            wall_thickness: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(Error::InvalidParameter { name: "wall_thickness", .. })
        ));
    }

    #[test]
    fn test_empty_profile_rejected() {
        let mut params = HouseParams::default();
        params.right_profile.clear();
        assert!(matches!(params.validate(), Err(Error::InvalidProfile(_))));
    }
}
