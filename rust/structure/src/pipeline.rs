// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end structure derivation.

use bayframe_geometry::Vector3;
use bayframe_topology::CellComplex;

use crate::complex_builder::build_complex;
use crate::config::StructureInputs;
use crate::error::Result;
use crate::framing::{derive_primary_framing, FramingContext};
use crate::grid_deriver::{derive_grid, DerivedGrid};
use crate::infill::derive_infill_beams;
use crate::inputs::{ComplexSource, InputModels, LevelVolume};
use crate::members::{Material, MemberKind, StructureOutputs};
use crate::profiles::{ProfileCatalog, WideFlangeCatalog};

/// Derives the structure of `models` with the built-in wide-flange catalog.
pub fn execute(models: InputModels, inputs: &StructureInputs) -> Result<StructureOutputs> {
    execute_with_catalog(models, inputs, &WideFlangeCatalog)
}

/// Derives the structure of `models`, looking profiles up in `catalog`.
///
/// Configuration errors (bad inputs, no `Bays` or `Levels`, unknown
/// profiles) are returned before any framing is attempted. Problems with
/// single levels, cells or edges are logged and skipped.
pub fn execute_with_catalog<C: ProfileCatalog + ?Sized>(
    models: InputModels,
    inputs: &StructureInputs,
    catalog: &C,
) -> Result<StructureOutputs> {
    inputs.validate()?;

    let authored_direction = models.primary_grid_direction();
    let source = ComplexSource::resolve(models)?;

    let column = catalog.require(&inputs.column_type)?;
    let girder = catalog.require(&inputs.girder_type)?;
    let beam = catalog.require(&inputs.beam_type)?;

    let (complex, derived) = match source {
        ComplexSource::FootprintLevels(levels) => {
            let derived = reference_grid(&levels, inputs)?;
            let complex = build_complex(&levels, &derived.grid, inputs.perimeter_inset);
            (complex, Some(derived))
        }
        ComplexSource::Explicit { complex, levels } => {
            let derived = levels.as_deref().and_then(|levels| {
                reference_grid(levels, inputs)
                    .map_err(|e| {
                        tracing::warn!(error = %e, "cannot derive a grid from the first level");
                    })
                    .ok()
            });
            (complex, derived)
        }
    };

    let primary_direction = primary_direction(authored_direction, derived.as_ref());

    let ctx = FramingContext {
        inputs,
        column: &column,
        girder: &girder,
        beam: &beam,
    };

    let mut outputs = StructureOutputs {
        materials: vec![Material::steel()],
        ..Default::default()
    };
    outputs.add_profile(column.clone());
    outputs.add_profile(girder.clone());
    outputs.add_profile(beam.clone());

    frame(&complex, &primary_direction, &ctx, &mut outputs);

    // TODO: report the longest span of the derived grid once downstream
    // consumers agree on U-only or U-and-V.
    outputs.longest_grid_span = 0.0;

    tracing::info!(
        cells = complex.cell_count(),
        columns = outputs.count(MemberKind::Column),
        girders = outputs.count(MemberKind::Girder),
        beams = outputs.count(MemberKind::Beam),
        "derived structure"
    );
    Ok(outputs)
}

fn frame(
    complex: &CellComplex,
    primary_direction: &Vector3<f64>,
    ctx: &FramingContext<'_>,
    outputs: &mut StructureOutputs,
) {
    outputs
        .members
        .extend(derive_primary_framing(complex, primary_direction, ctx));
    outputs.members.extend(derive_infill_beams(complex, ctx));
}

/// Grid derived from the first level's footprint.
fn reference_grid(levels: &[LevelVolume], inputs: &StructureInputs) -> Result<DerivedGrid> {
    let Some(first) = levels.first() else {
        return Err(crate::Error::NoLevelVolumes);
    };
    let footprint = first.polygon()?;
    derive_grid(&footprint, &inputs.grid)
}

/// Authored grid direction, else the derived U axis, else +X.
fn primary_direction(
    authored: Option<Vector3<f64>>,
    derived: Option<&DerivedGrid>,
) -> Vector3<f64> {
    if let Some(d) = authored {
        return d;
    }
    if let Some(grid) = derived {
        return grid.primary_direction();
    }
    tracing::warn!("no grid lines or levels to orient columns; using +X");
    Vector3::x()
}
