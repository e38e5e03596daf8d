// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Whole-house geometry pipeline shared by the command line driver.
//!
//! [`HouseModel::prepare`] derives the immutable inputs once; [`build_house`]
//! runs every floor, window, panel and the roof, in parallel when configured.

pub mod build;
pub mod config;
pub mod error;
pub mod export;
pub mod model;

pub use build::{
    build_floor, build_house, FloorGeometry, HouseGeometry, NamedMesh, RearOpeningGeometry,
    RoofGeometry, WindowGeometry,
};
pub use config::BuildConfig;
pub use error::{Error, Result};
pub use export::{summary_json, to_obj, to_obj_string};
pub use model::{FacadeSide, HouseModel};
