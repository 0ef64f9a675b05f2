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

//! Lint rules

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use cif_core::{Document, Warning};

/// Absolute tolerance applied when comparing recorded axial ratios, which
/// are usually rounded to three decimals.
pub const DEFAULT_RATIO_TOLERANCE: f64 = 1e-3;

/// Slack allowed above full occupancy.
const OCCUPANCY_EPSILON: f64 = 1e-6;

/// Configuration for a single rule
#[derive(Debug, Clone)]
pub struct RuleConfig {
    /// Whether the rule is enabled
    pub enabled: bool,
    /// Whether to treat warnings as errors
    pub error: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            error: false,
        }
    }
}

/// Trait for lint rules
pub trait LintRule: Send + Sync {
    /// Rule identifier
    fn id(&self) -> &str;

    /// Rule description
    fn description(&self) -> &str;

    /// Run the rule on a document
    fn check(&self, doc: &Document) -> Vec<Diagnostic>;
}

/// Rule: every numeric occupancy lies in `[0, 1]`.
pub struct OccupancyRangeRule;

impl LintRule for OccupancyRangeRule {
    fn id(&self) -> &str {
        "occupancy-range"
    }

    fn description(&self) -> &str {
        "Site occupancies must lie between 0 and 1"
    }

    fn check(&self, doc: &Document) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for block in doc.blocks() {
            for site in block.atom_sites() {
                let occupancy = match site.occupancy_value() {
                    Some(v) => v,
                    None => continue,
                };
                if !(0.0..=1.0 + OCCUPANCY_EPSILON).contains(&occupancy) {
                    diagnostics.push(
                        Diagnostic::error(
                            DiagnosticKind::OccupancyRange,
                            format!(
                                "site '{}' has occupancy {}, outside [0, 1]",
                                site.label(),
                                site.occupancy
                            ),
                            self.id(),
                        )
                        .with_block(block.name())
                        .with_line(site.position.line()),
                    );
                }
            }
        }
        diagnostics
    }
}

/// Rule: surfaces the disorder-overflow warnings recorded by the parser.
pub struct DisorderOverflowRule;

impl LintRule for DisorderOverflowRule {
    fn id(&self) -> &str {
        "disorder-overflow"
    }

    fn description(&self) -> &str {
        "Occupancies of sites sharing one position must not sum past 1"
    }

    fn check(&self, doc: &Document) -> Vec<Diagnostic> {
        doc.warnings()
            .into_iter()
            .filter_map(|(block, warning)| match warning {
                Warning::DisorderOverflow {
                    wyckoff,
                    labels,
                    total,
                    position,
                } => Some(
                    Diagnostic::warning(
                        DiagnosticKind::DisorderOverflow,
                        format!(
                            "sites {} at Wyckoff position {} have a combined occupancy of {}",
                            labels.join(", "),
                            wyckoff,
                            total
                        ),
                        self.id(),
                    )
                    .with_block(block)
                    .with_line(position.line()),
                ),
                _ => None,
            })
            .collect()
    }
}

/// Rule: surfaces tags declared more than once in a block.
pub struct DuplicateTagRule;

impl LintRule for DuplicateTagRule {
    fn id(&self) -> &str {
        "duplicate-tag"
    }

    fn description(&self) -> &str {
        "A tag should be declared once per block"
    }

    fn check(&self, doc: &Document) -> Vec<Diagnostic> {
        doc.warnings()
            .into_iter()
            .filter_map(|(block, warning)| match warning {
                Warning::DuplicateTag {
                    tag,
                    first,
                    duplicate,
                } => Some(
                    Diagnostic::warning(
                        DiagnosticKind::DuplicateTag,
                        format!("'{}' redeclared; the value from {} is ignored", tag, first),
                        self.id(),
                    )
                    .with_block(block)
                    .with_line(duplicate.line())
                    .with_suggestion("remove one of the declarations"),
                ),
                _ => None,
            })
            .collect()
    }
}

/// Rule: recorded axial ratios agree with the cell lengths.
pub struct AxialRatioRule {
    tolerance: f64,
}

impl AxialRatioRule {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }
}

impl Default for AxialRatioRule {
    fn default() -> Self {
        Self::new(DEFAULT_RATIO_TOLERANCE)
    }
}

impl LintRule for AxialRatioRule {
    fn id(&self) -> &str {
        "axial-ratio"
    }

    fn description(&self) -> &str {
        "Recorded a/b, b/c and c/a ratios must match the cell lengths"
    }

    fn check(&self, doc: &Document) -> Vec<Diagnostic> {
        const NAMES: [&str; 3] = ["a/b", "b/c", "c/a"];

        let mut diagnostics = Vec::new();
        for block in doc.blocks() {
            let cell = block.cell();
            let computed = match cell.computed_ratios() {
                Some(ratios) => ratios,
                None => continue,
            };
            let tags = [
                cif_core::cell::tags::RATIO_AB,
                cif_core::cell::tags::RATIO_BC,
                cif_core::cell::tags::RATIO_CA,
            ];
            for (i, recorded) in cell.recorded_ratios().into_iter().enumerate() {
                let value = match recorded.magnitude() {
                    Some(v) => v,
                    None => continue,
                };
                if (value - computed[i]).abs() > self.tolerance {
                    let mut diag = Diagnostic::warning(
                        DiagnosticKind::AxialRatio,
                        format!(
                            "recorded {} ratio {} differs from {:.4} computed from the cell lengths",
                            NAMES[i], recorded, computed[i]
                        ),
                        self.id(),
                    )
                    .with_block(block.name());
                    if let Some(item) = block.item(tags[i]) {
                        diag = diag.with_line(item.position().line());
                    }
                    diagnostics.push(diag);
                }
            }
        }
        diagnostics
    }
}

/// Rule: flags atom-site loops that carry no usable row.
pub struct EmptyAtomSitesRule;

impl LintRule for EmptyAtomSitesRule {
    fn id(&self) -> &str {
        "empty-atom-sites"
    }

    fn description(&self) -> &str {
        "Atom-site loops holding only '?' rows describe no sites"
    }

    fn check(&self, doc: &Document) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for block in doc.blocks() {
            if !block.atom_sites().is_empty() {
                continue;
            }
            for table in block.loops().filter(|t| t.is_atom_site()) {
                diagnostics.push(
                    Diagnostic::hint(
                        DiagnosticKind::EmptyAtomSites,
                        format!(
                            "atom-site loop with {} placeholder row(s) defines no sites",
                            table.len()
                        ),
                        self.id(),
                    )
                    .with_block(block.name())
                    .with_line(table.position().line()),
                );
            }
        }
        diagnostics
    }
}

/// Get all default rules
pub fn default_rules() -> Vec<Box<dyn LintRule>> {
    vec![
        Box::new(OccupancyRangeRule),
        Box::new(DisorderOverflowRule),
        Box::new(DuplicateTagRule),
        Box::new(AxialRatioRule::default()),
        Box::new(EmptyAtomSitesRule),
    ]
}
