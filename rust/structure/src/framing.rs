// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Primary framing: columns and girders along the edges of the complex.

use bayframe_geometry::{angle_between, Line, Vector3};
use bayframe_topology::{CellComplex, EdgeKey};

use crate::config::StructureInputs;
use crate::members::{FramingMember, MemberKind};
use crate::profiles::StructuralProfile;

/// Inputs and resolved profiles shared by the framing passes.
#[derive(Debug, Clone, Copy)]
pub struct FramingContext<'a> {
    pub inputs: &'a StructureInputs,
    pub column: &'a StructuralProfile,
    pub girder: &'a StructuralProfile,
    pub beam: &'a StructuralProfile,
}

impl FramingContext<'_> {
    /// How far a horizontal member of `profile` hangs below its edge: the
    /// slab plus half the section depth.
    pub fn drop_below_slab(&self, profile: &StructuralProfile) -> Vector3<f64> {
        Vector3::new(0.0, 0.0, -(self.inputs.slab_thickness + profile.depth() / 2.0))
    }
}

/// Walks every edge from the lowest to the highest and emits a column for
/// each plumb edge and a girder for each other edge above the lowest tier.
///
/// Ties in elevation keep the complex's edge order. External plumb edges
/// are skipped unless `insert_columns_at_external_edges` is set. The lowest
/// tier is the elevation of the first non-plumb edge met; edges at that
/// elevation are framed only with `create_beams_on_first_level`.
pub fn derive_primary_framing(
    complex: &CellComplex,
    primary_direction: &Vector3<f64>,
    ctx: &FramingContext<'_>,
) -> Vec<FramingMember> {
    let inputs = ctx.inputs;
    let tolerance = complex.tolerance();

    let mut ordered: Vec<(EdgeKey, Line)> = complex
        .edges()
        .filter_map(|(ek, _)| match complex.edge_endpoints(ek) {
            Some((start, end)) => Some((ek, Line::new(start, end))),
            None => {
                tracing::warn!(edge = ?ek, "skipping edge with a dangling vertex");
                None
            }
        })
        .collect();
    // Stable, so equal elevations keep insertion order
    ordered.sort_by(|a, b| a.1.min_z().total_cmp(&b.1.min_z()));

    let rotation = angle_between(&Vector3::x(), primary_direction);
    let girder_drop = ctx.drop_below_slab(ctx.girder);

    let mut members = Vec::new();
    let mut lowest_tier: Option<f64> = None;

    for (ek, line) in ordered {
        let length = line.length();
        if !length.is_finite() || length < tolerance {
            tracing::warn!(edge = ?ek, length, "skipping degenerate edge");
            continue;
        }

        if line.is_vertical(inputs.plumb_tolerance) {
            if !inputs.insert_columns_at_external_edges && complex.is_external_edge(ek) {
                continue;
            }
            let base = line.lower_point();
            let top = base + Vector3::z() * length;
            members.push(FramingMember::new(
                MemberKind::Column,
                base,
                top,
                &ctx.column.name,
                rotation,
            ));
        } else {
            let elevation = line.min_z();
            let lowest = *lowest_tier.get_or_insert(elevation);
            if inputs.create_beams_on_first_level || elevation > lowest + tolerance {
                let girder = line.translated(&girder_drop);
                members.push(FramingMember::new(
                    MemberKind::Girder,
                    girder.start,
                    girder.end,
                    &ctx.girder.name,
                    0.0,
                ));
            }
        }
    }

    tracing::debug!(
        columns = members.iter().filter(|m| m.kind == MemberKind::Column).count(),
        girders = members.iter().filter(|m| m.kind == MemberKind::Girder).count(),
        lowest_tier = ?lowest_tier,
        "derived primary framing"
    );
    members
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::{ProfileCatalog, WideFlangeCatalog};
    use approx::assert_relative_eq;
    use bayframe_geometry::Point2;

    struct Profiles {
        column: StructuralProfile,
        girder: StructuralProfile,
        beam: StructuralProfile,
    }

    fn profiles(inputs: &StructureInputs) -> Profiles {
        let catalog = WideFlangeCatalog;
        Profiles {
            column: catalog.require(&inputs.column_type).unwrap(),
            girder: catalog.require(&inputs.girder_type).unwrap(),
            beam: catalog.require(&inputs.beam_type).unwrap(),
        }
    }

    fn frame(complex: &CellComplex, inputs: &StructureInputs) -> Vec<FramingMember> {
        let p = profiles(inputs);
        let ctx = FramingContext {
            inputs,
            column: &p.column,
            girder: &p.girder,
            beam: &p.beam,
        };
        derive_primary_framing(complex, &Vector3::x(), &ctx)
    }

    fn square(x: f64, y: f64) -> Vec<Point2<f64>> {
        vec![
            Point2::new(x, y),
            Point2::new(x + 4.0, y),
            Point2::new(x + 4.0, y + 4.0),
            Point2::new(x, y + 4.0),
        ]
    }

    /// 2x2 bays over 2 stories of 3.
    fn block() -> CellComplex {
        let mut complex = CellComplex::new();
        for story in 0..2 {
            for (x, y) in [(0.0, 0.0), (4.0, 0.0), (0.0, 4.0), (4.0, 4.0)] {
                complex
                    .add_cell(&square(x, y), 3.0, story as f64 * 3.0, None)
                    .unwrap();
            }
        }
        complex
    }

    #[test]
    fn columns_on_every_plumb_edge() {
        let complex = block();
        let members = frame(&complex, &StructureInputs::default());
        let columns: Vec<_> = members.iter().filter(|m| m.kind == MemberKind::Column).collect();
        // 3 x 3 column lines, 2 stories
        assert_eq!(columns.len(), 18);
        for c in &columns {
            assert_relative_eq!(c.length, 3.0, epsilon = 1e-9);
            assert!(c.end[2] > c.start[2]);
            assert_eq!(c.profile, "W10x100");
        }
    }

    #[test]
    fn external_columns_can_be_suppressed() {
        let complex = block();
        let inputs = StructureInputs {
            insert_columns_at_external_edges: false,
            ..Default::default()
        };
        let members = frame(&complex, &inputs);
        let columns: Vec<_> = members.iter().filter(|m| m.kind == MemberKind::Column).collect();
        // Only the central column line is interior
        assert_eq!(columns.len(), 2);
        for c in columns {
            assert_relative_eq!(c.start[0], 4.0);
            assert_relative_eq!(c.start[1], 4.0);
        }
    }

    #[test]
    fn lowest_tier_is_not_framed() {
        let complex = block();
        let members = frame(&complex, &StructureInputs::default());
        let girders: Vec<_> = members.iter().filter(|m| m.kind == MemberKind::Girder).collect();
        // 12 grid-line edges per floor at z = 3 and z = 6
        assert_eq!(girders.len(), 24);

        let inputs = StructureInputs::default();
        let drop = inputs.slab_thickness + profiles(&inputs).girder.depth() / 2.0;
        for g in &girders {
            let z = g.start[2] + drop;
            assert!((z - 3.0).abs() < 1e-9 || (z - 6.0).abs() < 1e-9, "girder at {z}");
            assert_relative_eq!(g.start[2], g.end[2]);
        }
    }

    #[test]
    fn first_level_framed_on_request() {
        let complex = block();
        let inputs = StructureInputs {
            create_beams_on_first_level: true,
            ..Default::default()
        };
        let members = frame(&complex, &inputs);
        assert_eq!(members.iter().filter(|m| m.kind == MemberKind::Girder).count(), 36);
    }

    #[test]
    fn columns_come_before_girders_of_the_same_floor() {
        let complex = block();
        let members = frame(&complex, &StructureInputs::default());
        // Ground-floor edges sort first: columns rising from z = 0
        assert_eq!(members[0].kind, MemberKind::Column);
        assert_relative_eq!(members[0].start[2], 0.0);
        let elevations: Vec<f64> = members
            .iter()
            .map(|m| if m.kind == MemberKind::Column { m.start[2] } else { m.start[2] + 0.15 + 0.2 })
            .collect();
        assert!(elevations.windows(2).all(|w| w[0] <= w[1] + 0.1));
    }

    #[test]
    fn column_rotation_follows_primary_direction() {
        let complex = block();
        let inputs = StructureInputs::default();
        let p = profiles(&inputs);
        let ctx = FramingContext {
            inputs: &inputs,
            column: &p.column,
            girder: &p.girder,
            beam: &p.beam,
        };
        let members = derive_primary_framing(&complex, &Vector3::new(0.0, 1.0, 0.0), &ctx);
        let column = members.iter().find(|m| m.kind == MemberKind::Column).unwrap();
        assert_relative_eq!(column.rotation, 90.0, epsilon = 1e-9);
        let girder = members.iter().find(|m| m.kind == MemberKind::Girder).unwrap();
        assert_eq!(girder.rotation, 0.0);
    }
}
