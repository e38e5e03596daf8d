// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Whole-house geometry build with parallel floor and window processing.

use crate::config::BuildConfig;
use crate::error::Result;
use crate::model::HouseModel;
use houseforge_core::constants::SILL_MARGIN;
use houseforge_core::{FacadeId, Floor, FootprintPolygon, SillSpec};
use houseforge_geometry::{
    build_end_panel, build_roof_slab, build_shell, build_side_panels, opening_cuts,
    plan_windows, sill_part, CarvedShell, FacadeEnd, FacadePanel, Mesh, OpeningCut, ShellRole,
    WindowAssemblyFactory, WindowAssemblyMesh, WindowPlacement,
};
use rayon::prelude::*;
use std::time::Instant;

/// Carved shell and replacement panels of one floor.
#[derive(Debug, Clone)]
pub struct FloorGeometry {
    pub floor: Floor,
    pub shell: CarvedShell,
    pub panels: Vec<FacadePanel>,
}

/// One side window with its assembly parts.
#[derive(Debug, Clone)]
pub struct WindowGeometry {
    pub placement: WindowPlacement,
    pub parts: Vec<WindowAssemblyMesh>,
}

/// Rear elevation opening; doors carry no sill.
#[derive(Debug, Clone)]
pub struct RearOpeningGeometry {
    pub id: String,
    pub is_door: bool,
    pub sill: Option<WindowAssemblyMesh>,
}

#[derive(Debug, Clone)]
pub struct RoofGeometry {
    /// Boundary handed to the roof plane subsystem.
    pub polygon: FootprintPolygon,
    pub mesh: Mesh,
}

/// A named world-space mesh ready for export.
#[derive(Debug, Clone)]
pub struct NamedMesh {
    pub name: String,
    pub material: &'static str,
    pub mesh: Mesh,
}

/// Complete build output.
#[derive(Debug, Clone)]
pub struct HouseGeometry {
    pub floors: Vec<FloorGeometry>,
    pub windows: Vec<WindowGeometry>,
    pub rear_openings: Vec<RearOpeningGeometry>,
    pub roof: RoofGeometry,
}

impl HouseGeometry {
    /// Every mesh in build order: floors, windows, rear sills, roof.
    pub fn meshes(&self) -> Result<Vec<NamedMesh>> {
        let mut meshes = Vec::new();

        for floor in &self.floors {
            meshes.push(NamedMesh {
                name: format!("shell_f{}", floor.floor.index),
                material: "wall",
                mesh: floor.shell.world_mesh(),
            });
            meshes.extend(floor.panels.iter().map(|panel| NamedMesh {
                name: panel.id.clone(),
                material: "wall",
                mesh: panel.mesh.clone(),
            }));
        }

        let parts = self
            .windows
            .iter()
            .flat_map(|w| w.parts.iter())
            .chain(self.rear_openings.iter().filter_map(|o| o.sill.as_ref()));
        for part in parts {
            meshes.push(NamedMesh {
                name: part.id.clone(),
                material: part.material.as_str(),
                mesh: part.to_mesh()?,
            });
        }

        meshes.push(NamedMesh {
            name: "roof".to_string(),
            material: "roof",
            mesh: self.roof.mesh.clone(),
        });

        Ok(meshes)
    }

    /// Triangles across shells, panels and the roof (window parts excluded).
    pub fn wall_triangle_count(&self) -> usize {
        self.floors
            .iter()
            .map(|f| {
                f.shell.triangle_count()
                    + f.panels.iter().map(|p| p.mesh.triangle_count()).sum::<usize>()
            })
            .sum::<usize>()
            + self.roof.mesh.triangle_count()
    }
}

/// Build the whole house.
///
/// Floors and windows are independent and run on rayon when
/// `config.parallel` is set. Output order does not depend on scheduling.
pub fn build_house(model: &HouseModel, config: &BuildConfig) -> Result<HouseGeometry> {
    if config.parallel && config.worker_threads > 0 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.worker_threads)
            .build()?;
        pool.install(|| build_all(model, config))
    } else {
        build_all(model, config)
    }
}

fn build_all(model: &HouseModel, config: &BuildConfig) -> Result<HouseGeometry> {
    let start = Instant::now();
    let params = &model.params;

    let placements: Vec<WindowPlacement> = FacadeId::ALL
        .iter()
        .flat_map(|&facade| {
            let side = model.side(facade);
            plan_windows(&side.ctx, &side.profile, params.windows(facade))
        })
        .collect();
    let cuts = opening_cuts(&placements);

    tracing::debug!(
        windows = placements.len(),
        cuts = cuts.len(),
        parallel = config.parallel,
        "planned side windows"
    );

    let floors = map_units(config.parallel, &params.levels.floors(), |floor| {
        build_floor(model, floor, &cuts, config.shell_role)
    })?;

    let live: Vec<&WindowPlacement> = placements.iter().filter(|p| !p.is_trivial()).collect();
    let windows = map_units(config.parallel, &live, |placement| {
        let factory = WindowAssemblyFactory::new(
            model.side(placement.facade).ctx,
            params.levels,
            params.wall_thickness,
        );
        Ok(WindowGeometry {
            parts: factory.assemble(placement),
            placement: (*placement).clone(),
        })
    })?;

    let rear_openings = params
        .rear_openings
        .iter()
        .map(|opening| {
            let sill = (!opening.is_door && !opening.band.is_empty()).then(|| {
                let spec = SillSpec::rear_facing(
                    model.envelope.rear_z,
                    1.0,
                    opening.x_center,
                    opening.width + 2.0 * SILL_MARGIN,
                    opening.band.y0,
                );
                sill_part(&opening.id, &spec)
            });
            RearOpeningGeometry {
                id: opening.id.clone(),
                is_door: opening.is_door,
                sill,
            }
        })
        .collect();

    let roof = RoofGeometry {
        polygon: model.roof.clone(),
        mesh: build_roof_slab(&model.roof, params.levels.eaves, params.roof_thickness)?,
    };

    let geometry = HouseGeometry {
        floors,
        windows,
        rear_openings,
        roof,
    };

    tracing::info!(
        floors = geometry.floors.len(),
        windows = geometry.windows.len(),
        wall_triangles = geometry.wall_triangle_count(),
        total_time_ms = start.elapsed().as_millis() as u64,
        "house build complete"
    );

    Ok(geometry)
}

/// Shell, carving and panels of one floor.
pub fn build_floor(
    model: &HouseModel,
    floor: &Floor,
    cuts: &[OpeningCut],
    role: ShellRole,
) -> Result<FloorGeometry> {
    let t = model.params.wall_thickness;
    let shell = build_shell(&model.outer, &model.inner, floor.height, floor.base_y)?;

    let floor_cuts: Vec<OpeningCut> = cuts
        .iter()
        .filter(|c| c.overlaps_y(floor.base_y, floor.top_y()))
        .copied()
        .collect();

    let carved = model
        .carver()
        .with_role(role)
        .with_openings(floor_cuts.iter().copied())
        .carve(&shell);

    // Structure shells keep the right wall, so only the left gets panels
    let panel_facades: &[FacadeId] = match role {
        ShellRole::Facade => &FacadeId::ALL,
        ShellRole::Structure => &[FacadeId::Left],
    };

    let z_range = model.envelope.inner_z(t);
    let mut panels = Vec::new();
    for &facade in panel_facades {
        let side = model.side(facade);
        panels.extend(build_side_panels(
            &side.ctx,
            &side.profile,
            z_range,
            floor,
            t,
            &floor_cuts,
        )?);
    }
    for end in FacadeEnd::ALL {
        let openings = match end {
            FacadeEnd::Front => &[][..],
            FacadeEnd::Rear => &model.params.rear_openings[..],
        };
        panels.extend(build_end_panel(end, &model.outer, floor, t, openings)?);
    }

    tracing::debug!(
        floor = floor.index,
        kept = carved.stats.kept,
        removed = carved.stats.removed,
        cuts = floor_cuts.len(),
        panels = panels.len(),
        "built floor"
    );

    Ok(FloorGeometry {
        floor: *floor,
        shell: carved,
        panels,
    })
}

/// Map independent units, on rayon when `parallel` is set.
fn map_units<T, R, F>(parallel: bool, items: &[T], f: F) -> Result<Vec<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> Result<R> + Sync + Send,
{
    if parallel {
        items.par_iter().map(f).collect()
    } else {
        items.iter().map(f).collect()
    }
}
