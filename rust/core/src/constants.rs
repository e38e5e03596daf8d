// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Architectural constants, all in meters

/// Plane-coincidence tolerance for classification and tie-breaks
pub const PLANE_TOLERANCE: f64 = 0.01;

/// Normal component above which a triangle counts as facing that axis
pub const AXIS_FACING_THRESHOLD: f64 = 0.85;

/// Margin beyond which the envelope is considered to step inward
pub const ENVELOPE_STEP_MARGIN: f64 = 0.05;

/// Smallest dimension emitted for any generated box
pub const MIN_DIMENSION: f64 = 0.01;

// Tall (industrial) windows

/// Combined opening height from which a tall window splits into three bands
pub const TALL_SPLIT_THRESHOLD: f64 = 4.8;
/// Height of the lower glazing band of a split tall window
pub const TALL_LOWER_GLASS_HEIGHT: f64 = 2.45;
/// Height of the metal band between lower and upper glazing
pub const TALL_METAL_BAND_HEIGHT: f64 = 0.45;
/// Forward shift (toward −Z) of tall windows relative to their design center
pub const TALL_FRONT_OFFSET: f64 = 0.15;

// Frame and glazing

pub const FRAME_DEPTH: f64 = 0.12;
pub const FRAME_HALF_DEPTH: f64 = FRAME_DEPTH / 2.0;
/// Frame border on each side of the clear opening
pub const FRAME_BORDER: f64 = 0.08;
/// Glass plane inset from the frame center, toward the interior
pub const GLASS_INSET: f64 = 0.03;
pub const GLASS_THICKNESS: f64 = 0.012;

// Sills

pub const SILL_DEPTH: f64 = 0.2;
pub const SILL_HEIGHT: f64 = 0.05;
/// Stone overhang beyond the outer wall face
pub const SILL_OVERHANG: f64 = 0.04;
/// Extra sill length on each side of the opening
pub const SILL_MARGIN: f64 = 0.05;

// Reveals

/// Nominal face thickness of jamb/head/sill-return reveal panels
pub const REVEAL_FACE_THICKNESS: f64 = 0.12;

// Decorative bands

pub const SLATE_BAND_HEIGHT: f64 = 0.3;
pub const SLATE_BAND_DEPTH: f64 = 0.03;
pub const TRANSITION_BAND_DEPTH: f64 = 0.02;
/// Gap between the frame face and the floor-transition band
pub const TRANSITION_BAND_OFFSET: f64 = 0.01;

// Roof

pub const DEFAULT_EAVE_OVERHANG: f64 = 0.35;
pub const DEFAULT_ROOF_THICKNESS: f64 = 0.25;
