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

//! Atom sites: a typed view over the rows of an atom-site loop.

use crate::lex::SourcePos;
use crate::loop_table::LoopTable;
use crate::value::ScalarValue;

/// Column tags read by [`AtomSite::from_table`].
pub mod tags {
    pub const LABEL: &str = "_atom_site_label";
    pub const TYPE_SYMBOL: &str = "_atom_site_type_symbol";
    pub const WYCKOFF: &str = "_atom_site_Wyckoff_symbol";
    pub const SITE_SYMMETRY: &str = "_sm_site_symmetry";
    pub const FRACT_X: &str = "_atom_site_fract_x";
    pub const FRACT_Y: &str = "_atom_site_fract_y";
    pub const FRACT_Z: &str = "_atom_site_fract_z";
    pub const OCCUPANCY: &str = "_atom_site_occupancy";
    pub const COORDINATION_NUMBER: &str = "_sm_coordination_number";
    pub const ENVIRONMENT_TYPE: &str = "_sm_atomic_environment_type";
}

/// One atom site.
///
/// Every field keeps its [`ScalarValue`] so sentinels and uncertainties pass
/// through. A column missing from the table reads as `?`, except occupancy,
/// which defaults to full occupancy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AtomSite {
    pub label: ScalarValue,
    pub species: ScalarValue,
    pub wyckoff: ScalarValue,
    pub site_symmetry: ScalarValue,
    pub fract: [ScalarValue; 3],
    pub occupancy: ScalarValue,
    pub coordination_number: ScalarValue,
    pub environment_type: ScalarValue,
    /// Index of the source row in its loop table.
    pub row: usize,
    pub position: SourcePos,
}

impl AtomSite {
    /// Builds one site per row of an atom-site table.
    ///
    /// Rows made only of `?` are "no data" placeholders and yield no site.
    pub fn from_table(table: &LoopTable) -> Vec<AtomSite> {
        let column = |tag: &str| table.column_index(tag);
        let label = column(tags::LABEL);
        let species = column(tags::TYPE_SYMBOL);
        let wyckoff = column(tags::WYCKOFF);
        let site_symmetry = column(tags::SITE_SYMMETRY);
        let fract = [
            column(tags::FRACT_X),
            column(tags::FRACT_Y),
            column(tags::FRACT_Z),
        ];
        let occupancy = column(tags::OCCUPANCY);
        let coordination = column(tags::COORDINATION_NUMBER);
        let environment = column(tags::ENVIRONMENT_TYPE);

        table
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.is_all_unknown())
            .map(|(index, row)| {
                let read = |col: Option<usize>| {
                    col.and_then(|i| row.get(i))
                        .cloned()
                        .unwrap_or(ScalarValue::Unknown)
                };
                AtomSite {
                    label: read(label),
                    species: read(species),
                    wyckoff: read(wyckoff),
                    site_symmetry: read(site_symmetry),
                    fract: fract.map(read),
                    occupancy: match occupancy {
                        Some(_) => read(occupancy),
                        None => ScalarValue::known(1.0),
                    },
                    coordination_number: read(coordination),
                    environment_type: read(environment),
                    row: index,
                    position: row.position(),
                }
            })
            .collect()
    }

    /// The label as written.
    pub fn label(&self) -> String {
        self.label.to_string()
    }

    /// Wyckoff symbol, if one is given.
    pub fn wyckoff_symbol(&self) -> Option<String> {
        self.wyckoff.is_present().then(|| self.wyckoff.to_string())
    }

    /// Fractional coordinates, if all three are numbers.
    pub fn coordinates(&self) -> Option<[f64; 3]> {
        let [x, y, z] = &self.fract;
        Some([x.magnitude()?, y.magnitude()?, z.magnitude()?])
    }

    /// Numeric occupancy, if known.
    pub fn occupancy_value(&self) -> Option<f64> {
        self.occupancy.magnitude()
    }
}
