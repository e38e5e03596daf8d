// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Houseforge Core
//!
//! Architectural parameter model for procedural house geometry.
//!
//! ## Overview
//!
//! This crate holds the static input of the geometry pipeline:
//!
//! - **Footprints**: plan polygons in the horizontal X–Z plane with offsetting
//!   and envelope lookups
//! - **Facades**: architectural left/right identifiers and the handedness
//!   convention mapping them onto world ±X
//! - **Windows**: closed per-kind window specifications with vertical bands
//! - **Sills**: explicit rear-facing and side-facing sill placements
//! - **Parameter tables**: [`HouseParams`] with a reference house as default
//!
//! World Y is up. The front elevation faces −Z.
//!
//! ## Quick Start
//!
//! ```rust
//! use houseforge_core::{FacadeId, HouseParams};
//!
//! let params = HouseParams::default().normalized();
//! params.validate().unwrap();
//!
//! let footprint = params.footprint_polygon().unwrap();
//! let (min_x, max_x) = footprint.x_extents_at(2.0, 1e-6).unwrap();
//! assert!(min_x < 0.0 && max_x > 0.0);
//! assert_eq!(params.windows(FacadeId::Left).len(), 3);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable (de)serialization of parameter tables

pub mod bounds;
pub mod constants;
pub mod error;
pub mod facade;
pub mod footprint;
pub mod levels;
pub mod params;
pub mod profile;
pub mod sill;
pub mod units;
pub mod window;

pub use bounds::PlanBounds;
pub use error::{Error, Result};
pub use facade::{FacadeId, Handedness, WorldSide};
pub use footprint::{FootprintPolygon, PlanPoint};
pub use levels::{Floor, LevelHeights};
pub use params::HouseParams;
pub use profile::{ProfileSegment, ProfileTable};
pub use sill::{SillParams, SillSpec};
pub use units::LengthUnit;
pub use window::{Band, RearOpening, WindowFields, WindowKind, WindowSpec};
