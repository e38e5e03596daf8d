// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wavefront OBJ and JSON summary export.

use crate::build::HouseGeometry;
use crate::error::Result;
use houseforge_geometry::{is_transparent_id, WallClass};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// Write every mesh as an OBJ object with positions and normals.
pub fn to_obj<W: Write>(geometry: &HouseGeometry, writer: &mut W) -> Result<()> {
    writeln!(writer, "# houseforge {}", env!("CARGO_PKG_VERSION"))?;

    let mut base = 1usize;
    let mut objects = 0usize;
    for named in geometry.meshes()? {
        let mesh = &named.mesh;
        if mesh.is_empty() {
            continue;
        }

        writeln!(writer, "o {}", named.name)?;
        writeln!(writer, "usemtl {}", named.material)?;
        for p in mesh.positions.chunks_exact(3) {
            writeln!(writer, "v {} {} {}", p[0], p[1], p[2])?;
        }
        for n in mesh.normals.chunks_exact(3) {
            writeln!(writer, "vn {} {} {}", n[0], n[1], n[2])?;
        }
        for [a, b, c] in mesh.triangles() {
            let (a, b, c) = (a + base, b + base, c + base);
            writeln!(writer, "f {a}//{a} {b}//{b} {c}//{c}")?;
        }

        base += mesh.vertex_count();
        objects += 1;
    }

    tracing::debug!(objects, vertices = base - 1, "wrote OBJ");
    Ok(())
}

/// OBJ text in memory.
pub fn to_obj_string(geometry: &HouseGeometry) -> Result<String> {
    let mut buffer = Vec::new();
    to_obj(geometry, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[derive(Debug, Serialize)]
struct FloorSummary {
    index: usize,
    base_y: f64,
    height: f64,
    input_triangles: usize,
    kept_triangles: usize,
    removed_triangles: usize,
    classes: BTreeMap<&'static str, usize>,
    panels: Vec<String>,
}

#[derive(Debug, Serialize)]
struct WindowSummary {
    id: String,
    facade: &'static str,
    plane_x: f64,
    z_center: f64,
    width: f64,
    height: f64,
    parts: Vec<String>,
    transparent: Vec<String>,
}

#[derive(Debug, Serialize)]
struct RearOpeningSummary {
    id: String,
    is_door: bool,
    sill: Option<String>,
}

#[derive(Debug, Serialize)]
struct RoofSummary {
    polygon: Vec<[f64; 2]>,
    triangles: usize,
}

#[derive(Debug, Serialize)]
struct HouseSummary {
    floors: Vec<FloorSummary>,
    windows: Vec<WindowSummary>,
    rear_openings: Vec<RearOpeningSummary>,
    roof: RoofSummary,
    wall_triangles: usize,
}

/// Pretty-printed JSON report of the build.
pub fn summary_json(geometry: &HouseGeometry) -> Result<String> {
    let floors = geometry
        .floors
        .iter()
        .map(|f| {
            let stats = &f.shell.stats;
            FloorSummary {
                index: f.floor.index,
                base_y: f.floor.base_y,
                height: f.floor.height,
                input_triangles: stats.input,
                kept_triangles: stats.kept,
                removed_triangles: stats.removed,
                classes: WallClass::ALL
                    .iter()
                    .map(|c| (c.as_str(), stats.count(*c)))
                    .filter(|(_, n)| *n > 0)
                    .collect(),
                panels: f.panels.iter().map(|p| p.id.clone()).collect(),
            }
        })
        .collect();

    let windows = geometry
        .windows
        .iter()
        .map(|w| {
            let p = &w.placement;
            let parts: Vec<String> = w.parts.iter().map(|part| part.id.clone()).collect();
            WindowSummary {
                id: p.id().to_string(),
                facade: p.facade.as_str(),
                plane_x: p.resolved_outer_plane_x,
                z_center: p.adjusted_z_center,
                width: p.width,
                height: p.total_height,
                transparent: parts.iter().filter(|id| is_transparent_id(id)).cloned().collect(),
                parts,
            }
        })
        .collect();

    let rear_openings = geometry
        .rear_openings
        .iter()
        .map(|o| RearOpeningSummary {
            id: o.id.clone(),
            is_door: o.is_door,
            sill: o.sill.as_ref().map(|s| s.id.clone()),
        })
        .collect();

    let summary = HouseSummary {
        floors,
        windows,
        rear_openings,
        roof: RoofSummary {
            polygon: geometry
                .roof
                .polygon
                .points()
                .iter()
                .map(|p| [p.x, p.z])
                .collect(),
            triangles: geometry.roof.mesh.triangle_count(),
        },
        wall_triangles: geometry.wall_triangle_count(),
    };

    Ok(serde_json::to_string_pretty(&summary)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::build_house;
    use crate::config::BuildConfig;
    use crate::model::HouseModel;
    use houseforge_core::HouseParams;

    fn geometry() -> HouseGeometry {
        let model = HouseModel::prepare(&HouseParams::default()).unwrap();
        build_house(&model, &BuildConfig::sequential()).unwrap()
    }

    #[test]
    fn test_obj_face_indices_in_range() {
        let obj = to_obj_string(&geometry()).unwrap();
        let vertices = obj.lines().filter(|l| l.starts_with("v ")).count();
        let normals = obj.lines().filter(|l| l.starts_with("vn ")).count();
        assert_eq!(vertices, normals);

        for line in obj.lines().filter(|l| l.starts_with("f ")) {
            for corner in line[2..].split_whitespace() {
                let index: usize = corner.split("//").next().unwrap().parse().unwrap();
                assert!(index >= 1 && index <= vertices);
            }
        }
        assert!(obj.contains("o roof"));
    }

    #[test]
    fn test_summary_lists_glazing() {
        let json = summary_json(&geometry()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let windows = value["windows"].as_array().unwrap();
        assert!(!windows.is_empty());
        for w in windows {
            let transparent = w["transparent"].as_array().unwrap();
            assert!(!transparent.is_empty());
            assert!(transparent.iter().all(|id| id.as_str().unwrap().contains("_glass")));
        }
        assert_eq!(value["floors"].as_array().unwrap().len(), 2);
    }
}
