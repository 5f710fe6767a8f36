// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Bayframe Structure
//!
//! Derives a steel framing layout (columns, girders and infill beams) for a
//! multi-story building.
//!
//! The building is described either by a pre-built [`CellComplex`] of bays
//! or by stacked level footprints. Footprints are tessellated by a U/V grid
//! (derived from the first level when no grid is given) and extruded into a
//! complex. Framing is then read off the complex: plumb edges become
//! columns, other edges above the lowest tier become girders, and the top
//! face of every cell is infilled with evenly spaced beams.
//!
//! ```no_run
//! use bayframe_structure::{execute, InputModels, StructureInputs};
//!
//! let models = InputModels::load_dir("model")?;
//! let outputs = execute(models, &StructureInputs::default())?;
//! println!("{} members", outputs.members.len());
//! # Ok::<(), bayframe_structure::Error>(())
//! ```
//!
//! [`CellComplex`]: bayframe_topology::CellComplex

pub mod complex_builder;
pub mod config;
pub mod error;
pub mod framing;
pub mod grid_deriver;
pub mod infill;
pub mod inputs;
pub mod members;
pub mod pipeline;
pub mod profiles;

pub use complex_builder::build_complex;
pub use config::{AxisDivision, GridDivisions, StructureInputs};
pub use error::{Error, Result};
pub use framing::{derive_primary_framing, FramingContext};
pub use grid_deriver::{derive_grid, DerivedGrid};
pub use infill::{beam_spans, derive_infill_beams};
pub use inputs::{ComplexSource, GridLine, InputModels, LevelVolume};
pub use members::{FramingMember, Material, MemberKind, StructureOutputs};
pub use pipeline::{execute, execute_with_catalog};
pub use profiles::{ProfileCatalog, StructuralProfile, WideFlangeCatalog};
