// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Input models consumed by a structure derivation.
//!
//! Three optional models feed a run: `Bays` (a pre-built cell complex),
//! `Levels` (stacked footprints) and `Grids` (authored grid lines that fix
//! the primary framing direction).

use std::path::{Path, PathBuf};

use bayframe_geometry::{Polygon, Vector3};
use bayframe_topology::CellComplex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const BAYS_FILE: &str = "Bays.json";
pub const LEVELS_FILE: &str = "Levels.json";
pub const GRIDS_FILE: &str = "Grids.json";

/// One story footprint: the level's elevation and the height of the story
/// above it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelVolume {
    #[serde(default)]
    pub name: String,
    /// Closed outline as `[x, y]` pairs; the closing point is optional.
    pub perimeter: Vec<[f64; 2]>,
    pub height: f64,
    pub elevation: f64,
}

impl LevelVolume {
    /// The footprint as a validated polygon.
    pub fn polygon(&self) -> bayframe_geometry::Result<Polygon> {
        Polygon::from_coords(&self.perimeter)
    }
}

/// An authored grid line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    #[serde(default)]
    pub name: String,
    /// Polyline vertices as `[x, y, z]`.
    pub points: Vec<[f64; 3]>,
}

impl GridLine {
    /// Direction of the first segment, or `None` if it is missing or has no
    /// length.
    pub fn first_direction(&self) -> Option<Vector3<f64>> {
        let [a, b] = self.points.get(..2)? else {
            return None;
        };
        let d = Vector3::new(b[0] - a[0], b[1] - a[1], b[2] - a[2]);
        let len = d.norm();
        (len > bayframe_geometry::EPSILON).then(|| d / len)
    }
}

/// The input models of one run. Each model is optional.
#[derive(Debug, Default)]
pub struct InputModels {
    pub bays: Option<CellComplex>,
    pub levels: Option<Vec<LevelVolume>>,
    pub grids: Option<Vec<GridLine>>,
}

impl InputModels {
    /// Loads whichever of `Bays.json`, `Levels.json` and `Grids.json`
    /// exist in `dir`.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();

        let bays = match read_optional(&dir.join(BAYS_FILE))? {
            Some(text) => Some(CellComplex::from_json(&text)?),
            None => None,
        };
        let levels = read_optional(&dir.join(LEVELS_FILE))?
            .map(|text| parse(&dir.join(LEVELS_FILE), &text))
            .transpose()?;
        let grids = read_optional(&dir.join(GRIDS_FILE))?
            .map(|text| parse(&dir.join(GRIDS_FILE), &text))
            .transpose()?;

        Ok(Self { bays, levels, grids })
    }

    /// Direction of the first authored grid line, if any.
    pub fn primary_grid_direction(&self) -> Option<Vector3<f64>> {
        self.grids.as_ref()?.first()?.first_direction()
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(Error::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn parse<T: serde::de::DeserializeOwned>(path: &Path, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|source| Error::Json {
        path: PathBuf::from(path),
        source,
    })
}

/// Where the cell complex of a run comes from.
#[derive(Debug)]
pub enum ComplexSource {
    /// A pre-built `Bays` complex, used as is. Any levels supplied next to
    /// it are kept for grid derivation.
    Explicit {
        complex: CellComplex,
        levels: Option<Vec<LevelVolume>>,
    },
    /// Level footprints to build the complex from.
    FootprintLevels(Vec<LevelVolume>),
}

impl ComplexSource {
    /// Picks the complex source. A `Bays` model wins over `Levels`.
    ///
    /// Fails with a configuration error when neither model is present or
    /// the levels are empty.
    pub fn resolve(models: InputModels) -> Result<Self> {
        let InputModels { bays, levels, .. } = models;
        match (bays, levels) {
            (Some(complex), levels) => Ok(ComplexSource::Explicit { complex, levels }),
            (None, None) => Err(Error::MissingLevels),
            (None, Some(levels)) if levels.is_empty() => Err(Error::NoLevelVolumes),
            (None, Some(levels)) => Ok(ComplexSource::FootprintLevels(levels)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(elevation: f64) -> LevelVolume {
        LevelVolume {
            name: format!("L{elevation}"),
            perimeter: vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]],
            height: 4.0,
            elevation,
        }
    }

    #[test]
    fn bays_win_over_levels() {
        let models = InputModels {
            bays: Some(CellComplex::new()),
            levels: Some(vec![level(0.0)]),
            grids: None,
        };
        let source = ComplexSource::resolve(models).unwrap();
        let ComplexSource::Explicit { levels, .. } = source else {
            panic!("expected an explicit complex");
        };
        assert_eq!(levels.map(|l| l.len()), Some(1));
    }

    #[test]
    fn levels_are_required_without_bays() {
        let err = ComplexSource::resolve(InputModels::default()).unwrap_err();
        assert!(matches!(err, Error::MissingLevels));
        assert!(err.is_configuration());

        let models = InputModels {
            levels: Some(Vec::new()),
            ..Default::default()
        };
        let err = ComplexSource::resolve(models).unwrap_err();
        assert!(matches!(err, Error::NoLevelVolumes));
    }

    #[test]
    fn footprint_levels_are_kept_in_order() {
        let models = InputModels {
            levels: Some(vec![level(0.0), level(4.0)]),
            ..Default::default()
        };
        let source = ComplexSource::resolve(models).unwrap();
        let ComplexSource::FootprintLevels(levels) = source else {
            panic!("expected footprint levels");
        };
        assert_eq!(levels[1].elevation, 4.0);
    }

    #[test]
    fn level_json_shape() {
        let json = r#"[{"name": "Ground", "perimeter": [[0,0],[5,0],[5,5],[0,5]], "height": 3.5, "elevation": 0}]"#;
        let levels: Vec<LevelVolume> = serde_json::from_str(json).unwrap();
        assert_eq!(levels[0].height, 3.5);
        assert_eq!(levels[0].polygon().unwrap().len(), 4);
    }

    #[test]
    fn grid_line_direction() {
        let line = GridLine {
            name: "A".into(),
            points: vec![[0.0, 0.0, 0.0], [0.0, 5.0, 0.0], [3.0, 5.0, 0.0]],
        };
        let d = line.first_direction().unwrap();
        assert!((d.y - 1.0).abs() < 1e-12);

        let short = GridLine {
            name: "B".into(),
            points: vec![[1.0, 1.0, 0.0]],
        };
        assert!(short.first_direction().is_none());

        let models = InputModels {
            grids: Some(vec![line]),
            ..Default::default()
        };
        assert!(models.primary_grid_direction().is_some());
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("bayframe-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn load_dir_without_files_is_empty() {
        let dir = scratch_dir("empty-inputs");
        let models = InputModels::load_dir(&dir).unwrap();
        assert!(models.bays.is_none());
        assert!(models.levels.is_none());
        assert!(models.grids.is_none());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
