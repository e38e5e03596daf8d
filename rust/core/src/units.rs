// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Length units for parameter tables
//!
//! Footprints and profiles are authored either in centimeters or meters.
//! Everything downstream of [`crate::HouseParams::normalized`] works in meters.

/// Length unit a parameter table is authored in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LengthUnit {
    Millimeter,
    Centimeter,
    #[default]
    Meter,
}

impl LengthUnit {
    /// Multiplier converting a value in this unit to meters
    #[inline]
    pub fn to_meters(self) -> f64 {
        match self {
            LengthUnit::Millimeter => 1e-3,
            LengthUnit::Centimeter => 1e-2,
            LengthUnit::Meter => 1.0,
        }
    }

    /// Parse an SI-style unit name ("MILLI", "cm", "meter", ...)
    ///
    /// Unknown names fall back to meters.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "MILLI" | "MM" | "MILLIMETER" | "MILLIMETRE" => LengthUnit::Millimeter,
            "CENTI" | "CM" | "CENTIMETER" | "CENTIMETRE" => LengthUnit::Centimeter,
            _ => LengthUnit::Meter,
        }
    }
}
