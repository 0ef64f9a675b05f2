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

//! CIF Linting
//!
//! Rule-based diagnostics over a parsed [`Document`]. The rules surface the
//! invariants of the data model as graded findings; they do not attempt
//! crystallographic validation.
//!
//! | Rule                | Default severity | Checks |
//! |---------------------|------------------|--------|
//! | `occupancy-range`   | error            | occupancy within `[0, 1]` |
//! | `disorder-overflow` | warning          | occupancies of a shared site sum to at most 1 |
//! | `duplicate-tag`     | warning          | each tag declared once per block |
//! | `axial-ratio`       | warning          | recorded a/b, b/c, c/a match the lengths |
//! | `empty-atom-sites`  | hint             | atom-site loops hold at least one real row |
//!
//! ## Quick Start
//!
//! ```rust
//! use cif_lint::{lint, Severity};
//!
//! let doc = cif_core::parse("data_a\n_x 1\n_x 2\n").unwrap();
//! let diagnostics = lint(&doc);
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].severity(), Severity::Warning);
//! ```
//!
//! ## Custom Configuration
//!
//! ```rust
//! use cif_lint::{lint_with_config, LintConfig, Severity};
//!
//! let doc = cif_core::parse("data_a\n_x 1\n_x 2\n").unwrap();
//!
//! let mut config = LintConfig::default();
//! config.disable_rule("empty-atom-sites");
//! config.set_rule_error("duplicate-tag");
//! config.min_severity = Severity::Warning;
//!
//! let diagnostics = lint_with_config(&doc, config);
//! assert_eq!(diagnostics[0].severity(), Severity::Error);
//! ```
//!
//! ## Custom Rules
//!
//! ```rust
//! use cif_core::Document;
//! use cif_lint::{Diagnostic, DiagnosticKind, LintConfig, LintRule, LintRunner};
//!
//! struct RequireVolume;
//!
//! impl LintRule for RequireVolume {
//!     fn id(&self) -> &str { "require-volume" }
//!     fn description(&self) -> &str { "Every block states its cell volume" }
//!     fn check(&self, doc: &Document) -> Vec<Diagnostic> {
//!         doc.blocks()
//!             .iter()
//!             .filter(|b| !b.contains("_cell_volume"))
//!             .map(|b| {
//!                 Diagnostic::warning(
//!                     DiagnosticKind::Custom("missing-volume".into()),
//!                     "no _cell_volume",
//!                     self.id(),
//!                 )
//!                 .with_block(b.name())
//!             })
//!             .collect()
//!     }
//! }
//!
//! let mut runner = LintRunner::new(LintConfig::default());
//! runner.add_rule(Box::new(RequireVolume));
//!
//! let doc = cif_core::parse("data_a\n_cell_length_a 5\n").unwrap();
//! assert_eq!(runner.run(&doc).len(), 1);
//! ```

mod diagnostic;
mod rules;
mod runner;

pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use rules::{
    default_rules, AxialRatioRule, DisorderOverflowRule, DuplicateTagRule, EmptyAtomSitesRule,
    LintRule, OccupancyRangeRule, RuleConfig, DEFAULT_RATIO_TOLERANCE,
};
pub use runner::{ConfigError, LintConfig, LintRunner};

use cif_core::Document;

/// Run all default lint rules on a document
pub fn lint(doc: &Document) -> Vec<Diagnostic> {
    let runner = LintRunner::new(LintConfig::default());
    runner.run(doc)
}

/// Run lint with custom configuration
pub fn lint_with_config(doc: &Document, config: LintConfig) -> Vec<Diagnostic> {
    let runner = LintRunner::new(config);
    runner.run(doc)
}
