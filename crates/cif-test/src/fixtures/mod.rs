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

//! CIF text fixtures.
//!
//! - [`sd1601634`]: a three-block record (published, standardized and
//!   Niggli-reduced cells) with split sites at `4i` and `4f`
//! - [`documents`]: small valid documents exercising one grammar feature each
//! - [`errors`]: invalid inputs with the error kind they must produce
//! - [`synthetic`]: generated documents of arbitrary size

pub mod documents;
pub mod errors;

/// Name of the published-cell block of [`sd1601634`].
pub const PUBLISHED: &str = "sm_isp_SD1601634-published_cell";
/// Name of the standardized-cell block of [`sd1601634`].
pub const STANDARDIZED: &str = "sm_isp_SD1601634-standardized_unitcell";
/// Name of the Niggli-reduced-cell block of [`sd1601634`].
pub const NIGGLI: &str = "sm_isp_SD1601634-niggli_reduced_cell";

const SD1601634: &str = include_str!("data/sm_isp_SD1601634.cif");

/// The tsumcorite record SD1601634 in three cell settings.
///
/// The published and Niggli blocks carry a single wildcard atom-site row;
/// the standardized block lists ten sites forming two disorder groups.
pub fn sd1601634() -> &'static str {
    SD1601634
}

/// Generates `blocks` standardized-style blocks with `rows` atom sites each.
///
/// Every third pair of rows shares a position with complementary
/// occupancies, so the output has disorder groups but no overflow.
pub fn synthetic(blocks: usize, rows: usize) -> String {
    let mut out = String::from("# synthetic\n");
    for b in 0..blocks {
        out.push_str(&format!(
            "\ndata_synthetic_{}-standardized_unitcell\n\
             _cell_length_a {}.{:03}(2)\n_cell_length_b 6.335(1)\n_cell_length_c 7.598(2)\n\
             _cell_angle_beta 115.3(1)\n_symmetry_space_group_name_H-M 'C 1 2/m 1'\n\n\
             loop_\n _atom_site_label\n _atom_site_Wyckoff_symbol\n _atom_site_fract_x\n\
             _atom_site_fract_y\n _atom_site_fract_z\n _atom_site_occupancy\n",
            b,
            5 + b % 5,
            b % 1000
        ));
        for r in 0..rows {
            let shared = r % 3 == 1 && r + 1 < rows;
            let x = if r % 3 == 2 && r > 0 { r - 1 } else { r };
            let occupancy = match r % 3 {
                1 if shared => "0.6",
                2 => "0.4",
                _ => "1",
            };
            if shared {
                out.push_str(&format!(" # M{} split site\n", r));
            }
            out.push_str(&format!(
                " A{} 4i 0.{:04} 0 0.{:04}(3) {}\n",
                r,
                x % 10_000,
                (x * 7) % 10_000,
                occupancy
            ));
        }
    }
    out
}
