// Dweve CIF - Crystallographic Information File toolkit
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Cell parameters and cell variants.

use std::fmt;

use crate::block::Block;
use crate::value::ScalarValue;

/// Which representation of the unit cell a block describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellVariant {
    /// The cell as reported in the source publication.
    Published,
    /// The standardized conventional cell.
    Standardized,
    /// The Niggli-reduced primitive cell.
    NiggliReduced,
}

impl CellVariant {
    /// All variants, in the order a record usually lists them.
    pub const ALL: [CellVariant; 3] = [Self::Published, Self::Standardized, Self::NiggliReduced];

    /// Block-name suffix identifying the variant.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Published => "published_cell",
            Self::Standardized => "standardized_unitcell",
            Self::NiggliReduced => "niggli_reduced_cell",
        }
    }

    /// Recognises the variant from a block name such as
    /// `sm_isp_SD1601634-standardized_unitcell`.
    pub fn from_block_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        Self::ALL.into_iter().find(|v| lower.ends_with(v.suffix()))
    }
}

impl fmt::Display for CellVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Published => "published",
            Self::Standardized => "standardized",
            Self::NiggliReduced => "Niggli-reduced",
        };
        f.write_str(name)
    }
}

/// Tags read by [`CellParameters::from_block`].
pub mod tags {
    pub const LENGTH_A: &str = "_cell_length_a";
    pub const LENGTH_B: &str = "_cell_length_b";
    pub const LENGTH_C: &str = "_cell_length_c";
    pub const ANGLE_ALPHA: &str = "_cell_angle_alpha";
    pub const ANGLE_BETA: &str = "_cell_angle_beta";
    pub const ANGLE_GAMMA: &str = "_cell_angle_gamma";
    pub const VOLUME: &str = "_cell_volume";
    pub const SPACE_GROUP_NAME: [&str; 2] =
        ["_space_group_name_H-M_alt", "_symmetry_space_group_name_H-M"];
    pub const SPACE_GROUP_NUMBER: [&str; 2] =
        ["_space_group_IT_number", "_symmetry_Int_Tables_number"];
    pub const FORMULA_UNITS_Z: &str = "_cell_formula_units_Z";
    pub const RATIO_AB: &str = "_sm_length_ratio_ab";
    pub const RATIO_BC: &str = "_sm_length_ratio_bc";
    pub const RATIO_CA: &str = "_sm_length_ratio_ca";
}

/// Unit-cell metrics and symmetry of one block.
///
/// Tags absent from the block read as `?`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellParameters {
    pub a: ScalarValue,
    pub b: ScalarValue,
    pub c: ScalarValue,
    pub alpha: ScalarValue,
    pub beta: ScalarValue,
    pub gamma: ScalarValue,
    pub volume: ScalarValue,
    pub space_group_name: ScalarValue,
    pub space_group_number: ScalarValue,
    pub formula_units_z: ScalarValue,
    pub ratio_ab: ScalarValue,
    pub ratio_bc: ScalarValue,
    pub ratio_ca: ScalarValue,
}

impl CellParameters {
    /// Reads the cell tags of `block`.
    pub fn from_block(block: &Block) -> Self {
        let read = |tag: &str| block.tag(tag).cloned().unwrap_or(ScalarValue::Unknown);
        let first_of = |candidates: [&str; 2]| {
            candidates
                .iter()
                .find_map(|tag| block.tag(tag).cloned())
                .unwrap_or(ScalarValue::Unknown)
        };

        Self {
            a: read(tags::LENGTH_A),
            b: read(tags::LENGTH_B),
            c: read(tags::LENGTH_C),
            alpha: read(tags::ANGLE_ALPHA),
            beta: read(tags::ANGLE_BETA),
            gamma: read(tags::ANGLE_GAMMA),
            volume: read(tags::VOLUME),
            space_group_name: first_of(tags::SPACE_GROUP_NAME),
            space_group_number: first_of(tags::SPACE_GROUP_NUMBER),
            formula_units_z: read(tags::FORMULA_UNITS_Z),
            ratio_ab: read(tags::RATIO_AB),
            ratio_bc: read(tags::RATIO_BC),
            ratio_ca: read(tags::RATIO_CA),
        }
    }

    /// Lengths `a`, `b`, `c`, if all are numbers.
    pub fn lengths(&self) -> Option<[f64; 3]> {
        Some([self.a.magnitude()?, self.b.magnitude()?, self.c.magnitude()?])
    }

    /// Angles alpha, beta, gamma in degrees, if all are numbers.
    pub fn angles(&self) -> Option<[f64; 3]> {
        Some([
            self.alpha.magnitude()?,
            self.beta.magnitude()?,
            self.gamma.magnitude()?,
        ])
    }

    /// Axial ratios a/b, b/c, c/a derived from the lengths.
    pub fn computed_ratios(&self) -> Option<[f64; 3]> {
        let [a, b, c] = self.lengths()?;
        if a == 0.0 || b == 0.0 || c == 0.0 {
            return None;
        }
        Some([a / b, b / c, c / a])
    }

    /// Axial ratios as recorded in the block.
    pub fn recorded_ratios(&self) -> [&ScalarValue; 3] {
        [&self.ratio_ab, &self.ratio_bc, &self.ratio_ca]
    }
}
