// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structural cross-section catalog.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const INCH: f64 = 0.0254;

/// A named cross-section outline in the member's local XY plane, centred on
/// the member axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralProfile {
    pub name: String,
    /// Counter-clockwise outline as `[x, y]` pairs.
    pub perimeter: Vec<[f64; 2]>,
}

impl StructuralProfile {
    /// Height of the outline's bounding box.
    pub fn depth(&self) -> f64 {
        let (min, max) = self
            .perimeter
            .iter()
            .fold((f64::MAX, f64::MIN), |(lo, hi), p| (lo.min(p[1]), hi.max(p[1])));
        if self.perimeter.is_empty() {
            0.0
        } else {
            max - min
        }
    }

    /// Width of the outline's bounding box.
    pub fn width(&self) -> f64 {
        let (min, max) = self
            .perimeter
            .iter()
            .fold((f64::MAX, f64::MIN), |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])));
        if self.perimeter.is_empty() {
            0.0
        } else {
            max - min
        }
    }
}

/// Looks up cross-sections by name.
pub trait ProfileCatalog {
    fn profile(&self, name: &str) -> Option<StructuralProfile>;

    /// Like [`ProfileCatalog::profile`], failing with a configuration error
    /// for unknown names.
    fn require(&self, name: &str) -> Result<StructuralProfile> {
        self.profile(name)
            .ok_or_else(|| Error::UnknownProfile(name.to_string()))
    }
}

/// Nominal W-shape dimensions in inches.
struct WideFlange {
    name: &'static str,
    depth: f64,
    flange_width: f64,
    web_thickness: f64,
    flange_thickness: f64,
}

// AISC Shapes Database, nominal dimensions
const WIDE_FLANGES: &[WideFlange] = &[
    WideFlange { name: "W8x31", depth: 8.00, flange_width: 8.00, web_thickness: 0.285, flange_thickness: 0.435 },
    WideFlange { name: "W10x49", depth: 9.98, flange_width: 10.0, web_thickness: 0.340, flange_thickness: 0.560 },
    WideFlange { name: "W10x100", depth: 11.1, flange_width: 10.3, web_thickness: 0.680, flange_thickness: 1.12 },
    WideFlange { name: "W12x26", depth: 12.2, flange_width: 6.49, web_thickness: 0.230, flange_thickness: 0.380 },
    WideFlange { name: "W12x53", depth: 12.1, flange_width: 10.0, web_thickness: 0.345, flange_thickness: 0.575 },
    WideFlange { name: "W14x90", depth: 14.0, flange_width: 14.5, web_thickness: 0.440, flange_thickness: 0.710 },
    WideFlange { name: "W16x31", depth: 15.9, flange_width: 5.53, web_thickness: 0.275, flange_thickness: 0.440 },
    WideFlange { name: "W18x40", depth: 17.9, flange_width: 6.02, web_thickness: 0.315, flange_thickness: 0.525 },
    WideFlange { name: "W21x44", depth: 20.7, flange_width: 6.50, web_thickness: 0.350, flange_thickness: 0.450 },
    WideFlange { name: "W24x55", depth: 23.6, flange_width: 7.01, web_thickness: 0.395, flange_thickness: 0.505 },
];

/// AISC wide-flange shapes, in metres.
#[derive(Debug, Clone, Copy, Default)]
pub struct WideFlangeCatalog;

impl WideFlangeCatalog {
    /// Names of every shape in the catalog.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        WIDE_FLANGES.iter().map(|w| w.name)
    }
}

impl ProfileCatalog for WideFlangeCatalog {
    fn profile(&self, name: &str) -> Option<StructuralProfile> {
        let shape = WIDE_FLANGES
            .iter()
            .find(|w| w.name.eq_ignore_ascii_case(name))?;
        Some(StructuralProfile {
            name: shape.name.to_string(),
            perimeter: i_shape(
                shape.flange_width * INCH,
                shape.depth * INCH,
                shape.web_thickness * INCH,
                shape.flange_thickness * INCH,
            ),
        })
    }
}

/// I-shape outline, counter-clockwise from bottom-left.
fn i_shape(width: f64, depth: f64, web: f64, flange: f64) -> Vec<[f64; 2]> {
    let hw = width / 2.0;
    let hd = depth / 2.0;
    let tw = web / 2.0;

    vec![
        // Bottom flange
        [-hw, -hd],
        [hw, -hd],
        [hw, -hd + flange],
        // Right side of web
        [tw, -hd + flange],
        [tw, hd - flange],
        // Top flange
        [hw, hd - flange],
        [hw, hd],
        [-hw, hd],
        [-hw, hd - flange],
        // Left side of web
        [-tw, hd - flange],
        [-tw, -hd + flange],
        [-hw, -hd + flange],
    ]
}
