// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structure derivation for a 30 x 20 footprint with levels at 0 and 10.
//!
//! The derived grid runs U along the top edge (5 spans of 6) and V across
//! the footprint (7 spans). After the 0.5 inset every floor has 6 x 8 grid
//! points, and the two stories are 0..10 and the cap 10..20.

use std::path::PathBuf;

use approx::assert_relative_eq;
use bayframe_geometry::Grid2d;
use bayframe_structure::{
    build_complex, derive_grid, execute, FramingMember, GridDivisions, InputModels, LevelVolume,
    MemberKind, ProfileCatalog, StructureInputs, WideFlangeCatalog,
};

fn levels() -> Vec<LevelVolume> {
    [("Ground", 0.0), ("First", 10.0)]
        .into_iter()
        .map(|(name, elevation)| LevelVolume {
            name: name.into(),
            perimeter: vec![[0.0, 0.0], [30.0, 0.0], [30.0, 20.0], [0.0, 20.0]],
            height: 10.0,
            elevation,
        })
        .collect()
}

fn models() -> InputModels {
    InputModels {
        levels: Some(levels()),
        ..Default::default()
    }
}

fn grid() -> Grid2d {
    let footprint = levels()[0].polygon().unwrap();
    derive_grid(&footprint, &GridDivisions::default()).unwrap().grid
}

fn girder_drop() -> f64 {
    let inputs = StructureInputs::default();
    let girder = WideFlangeCatalog.require(&inputs.girder_type).unwrap();
    inputs.slab_thickness + girder.depth() / 2.0
}

fn of_kind(members: &[FramingMember], kind: MemberKind) -> Vec<&FramingMember> {
    members.iter().filter(|m| m.kind == kind).collect()
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("bayframe-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn complex_has_shared_topology() {
    let complex = build_complex(&levels(), &grid(), 0.5);
    assert_eq!(complex.cell_count(), 70);
    assert_eq!(complex.vertex_count(), 144);

    let plumb: Vec<_> = complex
        .edges()
        .filter(|(ek, _)| {
            let (a, b) = complex.edge_endpoints(*ek).unwrap();
            (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6
        })
        .map(|(ek, _)| ek)
        .collect();
    assert_eq!(plumb.len(), 96);
    let interior = plumb.iter().filter(|&&ek| !complex.is_external_edge(ek)).count();
    assert_eq!(interior, 48);
    // Horizontal edges: 82 per floor on three floors
    assert_eq!(complex.edge_count() - plumb.len(), 246);
}

#[test]
fn columns_at_every_grid_intersection() {
    let outputs = execute(models(), &StructureInputs::default()).unwrap();
    let columns = of_kind(&outputs.members, MemberKind::Column);
    assert_eq!(columns.len(), 96);
    for c in &columns {
        assert_relative_eq!(c.length, 10.0, epsilon = 1e-6);
        assert!(c.start[2].abs() < 1e-6 || (c.start[2] - 10.0).abs() < 1e-6);
        assert_eq!(c.profile, "W10x100");
        assert_relative_eq!(c.rotation, 180.0, epsilon = 1e-9);
    }
}

#[test]
fn external_columns_suppressed() {
    let inputs = StructureInputs {
        insert_columns_at_external_edges: false,
        ..Default::default()
    };
    let outputs = execute(models(), &inputs).unwrap();
    let columns = of_kind(&outputs.members, MemberKind::Column);
    // 4 x 6 interior grid points per story
    assert_eq!(columns.len(), 48);
    for c in columns {
        assert!(c.start[0] > 1.0 && c.start[0] < 29.0);
        assert!(c.start[1] > 1.0 && c.start[1] < 19.0);
    }
}

#[test]
fn girders_skip_the_ground_tier() {
    let outputs = execute(models(), &StructureInputs::default()).unwrap();
    let girders = of_kind(&outputs.members, MemberKind::Girder);
    assert_eq!(girders.len(), 164);

    let drop = girder_drop();
    let mut at_10 = 0;
    let mut at_20 = 0;
    for g in &girders {
        assert_relative_eq!(g.start[2], g.end[2], epsilon = 1e-9);
        let floor = g.start[2] + drop;
        if (floor - 10.0).abs() < 1e-6 {
            at_10 += 1;
        } else if (floor - 20.0).abs() < 1e-6 {
            at_20 += 1;
        } else {
            panic!("girder at unexpected elevation {floor}");
        }
    }
    assert_eq!(at_10, 82);
    assert_eq!(at_20, 82);
}

#[test]
fn ground_tier_framed_on_request() {
    let inputs = StructureInputs {
        create_beams_on_first_level: true,
        ..Default::default()
    };
    let outputs = execute(models(), &inputs).unwrap();
    assert_eq!(outputs.count(MemberKind::Girder), 246);
}

#[test]
fn infill_beams_span_each_bay() {
    let outputs = execute(models(), &StructureInputs::default()).unwrap();
    let beams = of_kind(&outputs.members, MemberKind::Beam);

    // Per row of bays: two trimmed end bays with 2 beams, three full bays
    // with 3, over 7 rows and 2 stories
    assert_eq!(beams.len(), 182);

    let inputs = StructureInputs::default();
    let beam = WideFlangeCatalog.require(&inputs.beam_type).unwrap();
    let drop = inputs.slab_thickness + beam.depth() / 2.0;
    for b in &beams {
        // Beams run across V, parallel to the Y axis
        assert_relative_eq!(b.start[0], b.end[0], epsilon = 1e-6);
        assert!(b.length >= 1.0);
        let floor = b.start[2] + drop;
        assert!((floor - 10.0).abs() < 1e-6 || (floor - 20.0).abs() < 1e-6);
    }
}

#[test]
fn infill_follows_primary_framing() {
    let outputs = execute(models(), &StructureInputs::default()).unwrap();
    let first_beam = outputs
        .members
        .iter()
        .position(|m| m.kind == MemberKind::Beam)
        .unwrap();
    assert_eq!(first_beam, 96 + 164);
}

#[test]
fn levels_and_bays_load_from_a_model_directory() {
    let dir = scratch_dir("model");
    std::fs::write(
        dir.join("Levels.json"),
        serde_json::to_string(&levels()).unwrap(),
    )
    .unwrap();
    let from_levels = execute(InputModels::load_dir(&dir).unwrap(), &StructureInputs::default())
        .unwrap();

    // The same complex, supplied pre-built
    let complex = build_complex(&levels(), &grid(), 0.5);
    let bays_dir = scratch_dir("bays");
    std::fs::write(bays_dir.join("Bays.json"), complex.to_json().unwrap()).unwrap();
    let models = InputModels::load_dir(&bays_dir).unwrap();
    assert!(models.bays.is_some());
    let from_bays = execute(models, &StructureInputs::default()).unwrap();

    for kind in [MemberKind::Column, MemberKind::Girder, MemberKind::Beam] {
        assert_eq!(from_levels.count(kind), from_bays.count(kind), "{kind}");
    }
    // Without grid lines or levels the columns are oriented along +X
    let column = from_bays.members_of(MemberKind::Column).next().unwrap();
    assert_eq!(column.rotation, 0.0);

    let _ = std::fs::remove_dir_all(&dir);
    let _ = std::fs::remove_dir_all(&bays_dir);
}

#[test]
fn outputs_round_trip_through_json() {
    let outputs = execute(models(), &StructureInputs::default()).unwrap();
    let dir = scratch_dir("outputs");
    let path = dir.join("structure.json");
    outputs.write_json_file(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let back: bayframe_structure::StructureOutputs = serde_json::from_str(&text).unwrap();
    assert_eq!(back.members.len(), outputs.members.len());
    assert_eq!(back.materials[0].name, "Steel");
    let _ = std::fs::remove_dir_all(&dir);
}
