// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Window specifications
//!
//! A window is authored as a tagged variant per kind. Both variants carry the
//! same fixed field set; the kind only changes how the planner and the
//! assembly factory interpret the bands.

/// Vertical extent `[y0, y1]` of an opening on one floor, absolute heights
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Band {
    pub y0: f64,
    pub y1: f64,
}

impl Band {
    #[inline]
    pub const fn new(y0: f64, y1: f64) -> Self {
        Self { y0, y1 }
    }

    /// Band meaning "no opening on this floor"
    #[inline]
    pub const fn none() -> Self {
        Self { y0: 0.0, y1: 0.0 }
    }

    /// `y1 <= y0` marks an absent opening
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.y1 <= self.y0
    }

    /// Height of the band, never negative
    #[inline]
    pub fn height(&self) -> f64 {
        (self.y1 - self.y0).max(0.0)
    }

    #[inline]
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.y0 * factor, self.y1 * factor)
    }
}

/// Fields shared by every window kind
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowFields {
    /// Stable identifier; generated sub-mesh IDs are derived from it
    pub id: String,
    /// Opening width along the facade
    pub width: f64,
    /// Nominal design center along world Z
    pub z_center: f64,
    pub ground_band: Band,
    pub first_floor_band: Band,
}

impl WindowFields {
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            id: self.id.clone(),
            width: self.width * factor,
            z_center: self.z_center * factor,
            ground_band: self.ground_band.scaled(factor),
            first_floor_band: self.first_floor_band.scaled(factor),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowKind {
    /// Single-floor punched window
    Simple,
    /// Full-height industrial window that may span both floors
    Tall,
}

/// Window specification, one variant per kind
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum WindowSpec {
    Simple(WindowFields),
    Tall(WindowFields),
}

impl WindowSpec {
    /// Simple window occupying only the ground band
    pub fn simple(id: impl Into<String>, width: f64, z_center: f64, ground_band: Band) -> Self {
        WindowSpec::Simple(WindowFields {
            id: id.into(),
            width,
            z_center,
            ground_band,
            first_floor_band: Band::none(),
        })
    }

    pub fn tall(
        id: impl Into<String>,
        width: f64,
        z_center: f64,
        ground_band: Band,
        first_floor_band: Band,
    ) -> Self {
        WindowSpec::Tall(WindowFields {
            id: id.into(),
            width,
            z_center,
            ground_band,
            first_floor_band,
        })
    }

    #[inline]
    pub fn kind(&self) -> WindowKind {
        match self {
            WindowSpec::Simple(_) => WindowKind::Simple,
            WindowSpec::Tall(_) => WindowKind::Tall,
        }
    }

    #[inline]
    pub fn fields(&self) -> &WindowFields {
        match self {
            WindowSpec::Simple(fields) | WindowSpec::Tall(fields) => fields,
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.fields().id
    }

    pub fn scaled(&self, factor: f64) -> Self {
        match self {
            WindowSpec::Simple(fields) => WindowSpec::Simple(fields.scaled(factor)),
            WindowSpec::Tall(fields) => WindowSpec::Tall(fields.scaled(factor)),
        }
    }
}

/// Opening in the rear elevation (a Z-plane facade)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RearOpening {
    pub id: String,
    /// Center along world X
    pub x_center: f64,
    pub width: f64,
    pub band: Band,
    /// Doors have no sill
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_door: bool,
}

impl RearOpening {
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            id: self.id.clone(),
            x_center: self.x_center * factor,
            width: self.width * factor,
            band: self.band.scaled(factor),
            is_door: self.is_door,
        }
    }
}
