// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Houseforge Geometry
//!
//! Facade and opening geometry for procedural houses: profile resolution,
//! window planning and assembly, extruded wall shells and their carving,
//! facade panels and the flat roof. Uses earcutr triangulation, i_overlay
//! 2D booleans and nalgebra for transformations.

pub mod assembly;
pub mod bool2d;
pub mod carver;
pub mod envelope;
pub mod error;
pub mod extension;
pub mod extrusion;
pub mod facade_context;
pub mod facade_profile;
pub mod mesh;
pub mod opening;
pub mod panels;
pub mod planner;
pub mod profile;
pub mod roof;
pub mod shell;
pub mod sill;
pub mod transform;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};

pub use assembly::{
    assemble_window, is_transparent_id, GeometryKind, MaterialRef, WindowAssemblyFactory,
    WindowAssemblyMesh,
};
pub use bool2d::subtract_openings;
pub use carver::{CarveStats, CarvedShell, CarverFacade, ShellCarver, ShellRole, WallClass, WallTriangle};
pub use envelope::EnvelopeBounds;
pub use error::{Error, Result};
pub use extension::{locate_side_extension, ExtensionWall};
pub use extrusion::extrude_profile;
pub use facade_context::FacadeContext;
pub use facade_profile::FacadeProfile;
pub use mesh::Mesh;
pub use opening::{opening_cuts, OpeningCut};
pub use panels::{build_end_panel, build_side_panels, FacadeEnd, FacadePanel};
pub use planner::{plan_windows, WindowPlacement};
pub use profile::Profile2D;
pub use roof::{build_roof_slab, flat_roof_polygon};
pub use shell::{build_shell, ExtrudedShell};
pub use sill::{sill_box, sill_part};
pub use transform::Placement;
