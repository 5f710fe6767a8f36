// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Secondary beam infill across each cell's top face.
//!
//! The longest edge of the top face is divided at the beam spacing with the
//! remainder split at both ends. From every interior separator a probe is
//! cast perpendicular to that edge, into the face; each hit on another
//! boundary segment becomes a beam unless it is too close to the probe
//! origin. Separators too close to either end of the longest edge are not
//! probed.

use bayframe_geometry::{
    FixedDivisionMode, Grid1d, Point2, Point3, Polygon, Ray2, Vector2, EPSILON,
};
use bayframe_topology::{CellComplex, CellKey};

use crate::framing::FramingContext;
use crate::members::{FramingMember, MemberKind};

/// Lays infill beams across the top face of every cell.
pub fn derive_infill_beams(complex: &CellComplex, ctx: &FramingContext<'_>) -> Vec<FramingMember> {
    let mut members = Vec::new();
    for (ck, _) in complex.cells() {
        infill_cell(complex, ck, ctx, &mut members);
    }
    tracing::debug!(beams = members.len(), "derived infill beams");
    members
}

fn infill_cell(
    complex: &CellComplex,
    cell: CellKey,
    ctx: &FramingContext<'_>,
    out: &mut Vec<FramingMember>,
) {
    let Some(points) = complex.top_face_points(cell) else {
        tracing::warn!(cell = ?cell, "skipping cell without a top face");
        return;
    };
    let Some(elevation) = points.first().map(|p| p.z) else {
        return;
    };
    let outline: Vec<Point2<f64>> = points.iter().map(|p| Point2::new(p.x, p.y)).collect();
    let polygon = match Polygon::new(outline) {
        Ok(p) => p.to_ccw(),
        Err(e) => {
            tracing::warn!(cell = ?cell, error = %e, "skipping degenerate top face");
            return;
        }
    };

    for (start, end) in beam_spans(&polygon, ctx.inputs.beam_spacing, ctx.inputs.min_beam_clearance) {
        let z = elevation + ctx.drop_below_slab(ctx.beam).z;
        out.push(FramingMember::new(
            MemberKind::Beam,
            Point3::new(start.x, start.y, z),
            Point3::new(end.x, end.y, z),
            &ctx.beam.name,
            0.0,
        ));
    }
}

/// Plan-view beam lines across a counter-clockwise polygon.
pub fn beam_spans(polygon: &Polygon, spacing: f64, clearance: f64) -> Vec<(Point2<f64>, Point2<f64>)> {
    let segments = polygon.segments();
    let longest_index = polygon.longest_segment_index();
    let longest = segments[longest_index];

    let Some(direction) = longest.direction() else {
        return Vec::new();
    };
    let Ok(mut divisions) = Grid1d::new(longest.start, longest.end) else {
        return Vec::new();
    };
    if let Err(e) = divisions.divide_by_fixed_length(spacing, FixedDivisionMode::RemainderAtBothEnds) {
        tracing::warn!(spacing, error = %e, "cannot divide edge for infill");
        return Vec::new();
    }

    // Left of a counter-clockwise edge is inside
    let inward = Vector2::new(-direction.y, direction.x);
    let parameters = divisions.parameters();
    let mut spans = Vec::new();

    for &t in &parameters[1..parameters.len() - 1] {
        let origin = divisions.point_at(t);
        if (origin - longest.start).norm() < clearance || (origin - longest.end).norm() < clearance {
            continue;
        }
        let Ok(probe) = Ray2::new(origin, inward) else {
            continue;
        };

        let mut hits: Vec<Point2<f64>> = Vec::new();
        for (i, segment) in segments.iter().enumerate() {
            if i == longest_index {
                continue;
            }
            let Some(hit) = probe.intersect_segment(segment) else {
                continue;
            };
            if (hit - origin).norm() < clearance {
                continue;
            }
            // A probe through a vertex hits both segments meeting there
            if hits.iter().any(|h| (h - hit).norm() < EPSILON) {
                continue;
            }
            hits.push(hit);
        }

        spans.extend(hits.into_iter().map(|hit| (origin, hit)));
    }

    spans
}
