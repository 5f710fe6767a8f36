// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Builds a cell complex from stacked level footprints.
//!
//! Each level above the first is inset, tessellated by the U/V grid, and
//! every tile is extruded into the story below that level. The topmost
//! level also gets the story above it, which caps the building.

use bayframe_geometry::{Grid2d, Polygon};
use bayframe_topology::CellComplex;

use crate::inputs::LevelVolume;

/// Builds the complex of `levels` (in the given order) against `grid`.
///
/// Degenerate footprints, failed insets and rejected cells are logged and
/// skipped; the rest of the building is still built.
pub fn build_complex(levels: &[LevelVolume], grid: &Grid2d, inset: f64) -> CellComplex {
    let mut complex = CellComplex::new();

    if levels.len() < 2 {
        tracing::warn!(
            levels = levels.len(),
            "at least two levels are needed to build stories; no cells built"
        );
        return complex;
    }

    let top = levels.len() - 1;
    for i in 1..levels.len() {
        let below = &levels[i - 1];
        let level = &levels[i];

        let Some(footprint) = trimmed_footprint(level, inset) else {
            continue;
        };
        let tiles = grid.tessellate(&footprint);
        tracing::debug!(
            level = %level.name,
            elevation = level.elevation,
            tiles = tiles.len(),
            "tessellated level footprint"
        );

        for tile in &tiles {
            for outline in &tile.polygons {
                add_story(
                    &mut complex,
                    outline,
                    below.height,
                    level.elevation - below.height,
                    grid,
                    &level.name,
                );
                if i == top {
                    add_story(
                        &mut complex,
                        outline,
                        level.height,
                        level.elevation,
                        grid,
                        &level.name,
                    );
                }
            }
        }
    }

    tracing::debug!(
        cells = complex.cell_count(),
        faces = complex.face_count(),
        edges = complex.edge_count(),
        vertices = complex.vertex_count(),
        "built cell complex"
    );
    complex
}

/// The level footprint pulled in by `inset`, or `None` (logged) if either
/// step fails.
fn trimmed_footprint(level: &LevelVolume, inset: f64) -> Option<Polygon> {
    let footprint = match level.polygon() {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(level = %level.name, error = %e, "skipping level with degenerate footprint");
            return None;
        }
    };
    if inset <= 0.0 {
        return Some(footprint);
    }
    match footprint.offset(-inset) {
        Ok(p) => Some(p),
        Err(e) => {
            tracing::warn!(level = %level.name, inset, error = %e, "skipping level whose footprint cannot be inset");
            None
        }
    }
}

fn add_story(
    complex: &mut CellComplex,
    outline: &Polygon,
    height: f64,
    base_elevation: f64,
    grid: &Grid2d,
    level: &str,
) {
    if let Err(e) = complex.add_cell(outline.vertices(), height, base_elevation, Some(grid)) {
        tracing::warn!(level, base_elevation, height, error = %e, "skipping cell");
    }
}
