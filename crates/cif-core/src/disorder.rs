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

//! Disorder resolution: grouping split and partially occupied sites.
//!
//! Sites sharing a Wyckoff symbol and coordinates (within a tolerance) are
//! alternative occupants of one crystallographic site. Grouping is a derived
//! view; the loop table keeps its rows in source order.

use crate::atom::AtomSite;
use crate::loop_table::LoopTable;
use crate::warning::Warning;

/// Default coordinate tolerance for matching sites.
pub const DEFAULT_COORDINATE_TOLERANCE: f64 = 1e-4;

/// Default slack allowed above a total occupancy of one.
pub const DEFAULT_OCCUPANCY_EPSILON: f64 = 1e-6;

/// Sites that share one crystallographic position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisorderGroup {
    members: Vec<AtomSite>,
    annotation: Option<String>,
}

impl DisorderGroup {
    /// Member sites in row order.
    pub fn members(&self) -> &[AtomSite] {
        &self.members
    }

    /// Number of member sites.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false; a group has at least one member.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns true when more than one site shares the position.
    pub fn is_disordered(&self) -> bool {
        self.members.len() > 1
    }

    /// Comment preceding the first member row, e.g. a substitution formula.
    pub fn annotation(&self) -> Option<&str> {
        self.annotation.as_deref()
    }

    /// Wyckoff symbol of the first member.
    pub fn wyckoff(&self) -> Option<String> {
        self.members.first().and_then(AtomSite::wyckoff_symbol)
    }

    /// Coordinates of the first member.
    pub fn coordinates(&self) -> Option<[f64; 3]> {
        self.members.first().and_then(AtomSite::coordinates)
    }

    /// Member labels in row order.
    pub fn labels(&self) -> Vec<String> {
        self.members.iter().map(AtomSite::label).collect()
    }

    /// Sum of the known member occupancies; `?` and `.` count as nothing.
    pub fn total_occupancy(&self) -> f64 {
        self.members.iter().filter_map(AtomSite::occupancy_value).sum()
    }
}

/// Wyckoff symbol and coordinates; sites without both never share a group.
type SiteKey = Option<(String, [f64; 3])>;

fn site_key(site: &AtomSite) -> SiteKey {
    Some((site.wyckoff_symbol()?, site.coordinates()?))
}

fn same_site(a: &SiteKey, b: &SiteKey, tolerance: f64) -> bool {
    match (a, b) {
        (Some((wa, ca)), Some((wb, cb))) => {
            wa == wb && ca.iter().zip(cb.iter()).all(|(p, q)| (p - q).abs() <= tolerance)
        }
        _ => false,
    }
}

/// Groups the sites of one atom-site table.
///
/// Every site lands in exactly one group; groups are ordered by their first
/// row. Sites missing a Wyckoff symbol or a coordinate stay on their own.
/// Returns a [`Warning::DisorderOverflow`] for each multi-member group whose
/// occupancies exceed `1 + epsilon`.
pub fn resolve(
    table: &LoopTable,
    sites: &[AtomSite],
    tolerance: f64,
    epsilon: f64,
) -> (Vec<DisorderGroup>, Vec<Warning>) {
    let mut groups: Vec<DisorderGroup> = Vec::new();
    let mut keys: Vec<SiteKey> = Vec::new();

    for site in sites {
        let key = site_key(site);
        let existing = keys.iter().position(|k| same_site(k, &key, tolerance));
        match existing {
            Some(index) => groups[index].members.push(site.clone()),
            None => {
                groups.push(DisorderGroup {
                    members: vec![site.clone()],
                    annotation: table
                        .rows()
                        .get(site.row)
                        .and_then(|row| row.comment())
                        .map(str::to_string),
                });
                keys.push(key);
            }
        }
    }

    let warnings = groups
        .iter()
        .filter(|g| g.is_disordered() && g.total_occupancy() > 1.0 + epsilon)
        .map(|g| Warning::DisorderOverflow {
            wyckoff: g.wyckoff().unwrap_or_default(),
            labels: g.labels(),
            total: g.total_occupancy(),
            position: g.members[0].position,
        })
        .collect();

    (groups, warnings)
}
