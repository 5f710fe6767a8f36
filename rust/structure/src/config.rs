// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structure inputs.
//!
//! Every field has a default, so an empty JSON object is a valid inputs
//! file.

use std::path::Path;

use bayframe_geometry::{FixedDivisionMode, Grid1d};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How one grid axis is subdivided.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisDivision {
    /// A fixed number of equal spans.
    Count(usize),
    /// Spans of a fixed length, remainder split at both ends.
    FixedLength(f64),
}

impl AxisDivision {
    /// Subdivides `axis` in place.
    pub fn apply(&self, axis: &mut Grid1d) -> bayframe_geometry::Result<()> {
        match *self {
            AxisDivision::Count(n) => axis.divide_by_count(n),
            AxisDivision::FixedLength(len) => {
                axis.divide_by_fixed_length(len, FixedDivisionMode::RemainderAtBothEnds)
            }
        }
    }

    fn validate(&self, axis: &str) -> Result<()> {
        match *self {
            AxisDivision::Count(0) => Err(Error::InvalidConfig(format!(
                "{axis} grid needs at least one span"
            ))),
            AxisDivision::FixedLength(len) if !(len.is_finite() && len > 0.0) => Err(
                Error::InvalidConfig(format!("{axis} span length must be positive, got {len}")),
            ),
            _ => Ok(()),
        }
    }
}

/// Subdivision of the derived U/V grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridDivisions {
    pub u: AxisDivision,
    pub v: AxisDivision,
}

impl Default for GridDivisions {
    fn default() -> Self {
        Self {
            u: AxisDivision::Count(5),
            v: AxisDivision::Count(7),
        }
    }
}

/// User-facing parameters of a structure derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureInputs {
    /// Column profile name.
    pub column_type: String,
    /// Girder profile name.
    pub girder_type: String,
    /// Infill beam profile name.
    pub beam_type: String,
    /// Distance between infill beams.
    pub beam_spacing: f64,
    /// Slab depth; framing hangs below it.
    pub slab_thickness: f64,
    pub insert_columns_at_external_edges: bool,
    /// Frame the lowest tier of horizontal edges too.
    pub create_beams_on_first_level: bool,
    pub grid: GridDivisions,
    /// Inward offset applied to each footprint before tessellation.
    pub perimeter_inset: f64,
    /// Minimum distance of an infill beam end from the probe origin and
    /// from the ends of the edge it is laid out along.
    pub min_beam_clearance: f64,
    /// XY deviation under which an edge still counts as plumb.
    pub plumb_tolerance: f64,
}

impl Default for StructureInputs {
    fn default() -> Self {
        Self {
            column_type: "W10x100".into(),
            girder_type: "W16x31".into(),
            beam_type: "W16x31".into(),
            beam_spacing: 1.5,
            slab_thickness: 0.15,
            insert_columns_at_external_edges: true,
            create_beams_on_first_level: false,
            grid: GridDivisions::default(),
            perimeter_inset: 0.5,
            min_beam_clearance: 1.0,
            plumb_tolerance: 1e-3,
        }
    }
}

impl StructureInputs {
    /// Loads inputs from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Rejects values no derivation can use.
    pub fn validate(&self) -> Result<()> {
        if !(self.beam_spacing.is_finite() && self.beam_spacing > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "beam spacing must be positive, got {}",
                self.beam_spacing
            )));
        }
        non_negative("slab thickness", self.slab_thickness)?;
        non_negative("perimeter inset", self.perimeter_inset)?;
        non_negative("minimum beam clearance", self.min_beam_clearance)?;
        non_negative("plumb tolerance", self.plumb_tolerance)?;
        self.grid.u.validate("U")?;
        self.grid.v.validate("V")?;
        Ok(())
    }
}

fn non_negative(what: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{what} must be zero or positive, got {value}"
        )))
    }
}
