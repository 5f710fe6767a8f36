// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Output model: framing members and the materials and profiles they use.

use std::path::Path;

use bayframe_geometry::{Line, Point3};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::profiles::StructuralProfile;

/// Class of a framing member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberKind {
    Column,
    Girder,
    Beam,
}

impl MemberKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberKind::Column => "Column",
            MemberKind::Girder => "Girder",
            MemberKind::Beam => "Beam",
        }
    }
}

impl std::fmt::Display for MemberKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A surface material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    /// RGBA, each channel in `0.0..=1.0`.
    pub color: [f64; 4],
    pub specular_factor: f64,
    pub glossiness_factor: f64,
}

impl Material {
    pub const STEEL: &'static str = "Steel";

    /// The grey steel every framing member is assigned.
    pub fn steel() -> Self {
        Self {
            name: Self::STEEL.into(),
            color: [0.5, 0.5, 0.5, 1.0],
            specular_factor: 0.5,
            glossiness_factor: 0.3,
        }
    }
}

/// One linear structural element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FramingMember {
    pub kind: MemberKind,
    pub start: [f64; 3],
    pub end: [f64; 3],
    pub length: f64,
    /// Name of the member's profile in [`StructureOutputs::profiles`].
    pub profile: String,
    /// Name of the member's material in [`StructureOutputs::materials`].
    pub material: String,
    /// Rotation about the member axis, in degrees.
    pub rotation: f64,
}

impl FramingMember {
    pub fn new(
        kind: MemberKind,
        start: Point3<f64>,
        end: Point3<f64>,
        profile: &str,
        rotation: f64,
    ) -> Self {
        Self {
            kind,
            start: [start.x, start.y, start.z],
            end: [end.x, end.y, end.z],
            length: (end - start).norm(),
            profile: profile.to_string(),
            material: Material::STEEL.to_string(),
            rotation,
        }
    }

    pub fn start_point(&self) -> Point3<f64> {
        Point3::new(self.start[0], self.start[1], self.start[2])
    }

    pub fn end_point(&self) -> Point3<f64> {
        Point3::new(self.end[0], self.end[1], self.end[2])
    }

    pub fn line(&self) -> Line {
        Line::new(self.start_point(), self.end_point())
    }
}

/// Everything a run produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructureOutputs {
    pub materials: Vec<Material>,
    pub profiles: Vec<StructuralProfile>,
    /// Columns and girders first, then infill beams.
    pub members: Vec<FramingMember>,
    pub longest_grid_span: f64,
}

impl StructureOutputs {
    /// Registers a profile once by name.
    pub fn add_profile(&mut self, profile: StructuralProfile) {
        if !self.profiles.iter().any(|p| p.name == profile.name) {
            self.profiles.push(profile);
        }
    }

    pub fn count(&self, kind: MemberKind) -> usize {
        self.members.iter().filter(|m| m.kind == kind).count()
    }

    pub fn members_of(&self, kind: MemberKind) -> impl Iterator<Item = &FramingMember> + '_ {
        self.members.iter().filter(move |m| m.kind == kind)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Writes the outputs as pretty JSON.
    pub fn write_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json().map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn steel_is_grey_with_matte_sheen() {
        let steel = Material::steel();
        assert_eq!(steel.name, "Steel");
        assert_eq!(steel.color, [0.5, 0.5, 0.5, 1.0]);
        assert_relative_eq!(steel.specular_factor, 0.5);
        assert_relative_eq!(steel.glossiness_factor, 0.3);
    }

    #[test]
    fn member_length_and_material() {
        let m = FramingMember::new(
            MemberKind::Column,
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(1.0, 2.0, 4.0),
            "W10x100",
            90.0,
        );
        assert_relative_eq!(m.length, 4.0);
        assert_eq!(m.material, "Steel");
        assert!(m.line().is_vertical(1e-6));
    }

    #[test]
    fn outputs_serialize_with_kind_names() {
        let mut outputs = StructureOutputs::default();
        outputs.members.push(FramingMember::new(
            MemberKind::Girder,
            Point3::new(0.0, 0.0, 3.0),
            Point3::new(5.0, 0.0, 3.0),
            "W16x31",
            0.0,
        ));
        let json = outputs.to_json().unwrap();
        assert!(json.contains("\"Girder\""));
        assert!(json.contains("\"longest_grid_span\": 0.0"));

        let back: StructureOutputs = serde_json::from_str(&json).unwrap();
        assert_eq!(back.count(MemberKind::Girder), 1);
        assert_eq!(back.count(MemberKind::Beam), 0);
    }

    #[test]
    fn profiles_are_registered_once() {
        let profile = StructuralProfile {
            name: "W16x31".into(),
            perimeter: vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]],
        };
        let mut outputs = StructureOutputs::default();
        outputs.add_profile(profile.clone());
        outputs.add_profile(profile);
        assert_eq!(outputs.profiles.len(), 1);
    }
}
