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

//! Lint runner

use crate::diagnostic::{Diagnostic, DiagnosticKind, Severity};
use crate::rules::{default_rules, LintRule, RuleConfig};
use cif_core::Document;
use std::collections::HashMap;
use thiserror::Error;

/// Maximum number of diagnostics to collect before stopping.
const MAX_DIAGNOSTICS: usize = 10_000;

const MAX_RULE_ID_LENGTH: usize = 100;
const MAX_RULES: usize = 1000;

/// Invalid lint configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("too many rule configurations: {count} (max: {max})")]
    TooManyRules { count: usize, max: usize },
    #[error("empty rule ID not allowed")]
    EmptyRuleId,
    #[error("rule ID too long: {len} bytes (max: {max})")]
    RuleIdTooLong { len: usize, max: usize },
}

/// Configuration for the lint runner
#[derive(Debug, Clone)]
pub struct LintConfig {
    /// Rule configurations by rule ID
    pub rules: HashMap<String, RuleConfig>,
    /// Minimum severity to report
    pub min_severity: Severity,
    /// Maximum number of diagnostics to collect (default: 10,000)
    ///
    /// Once reached, remaining rules are skipped and a final
    /// `diagnostic-limit-exceeded` warning is appended.
    pub max_diagnostics: usize,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            rules: HashMap::new(),
            min_severity: Severity::Hint,
            max_diagnostics: MAX_DIAGNOSTICS,
        }
    }
}

impl LintConfig {
    /// Validate configuration (checks rule ID lengths and limits).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rules.len() > MAX_RULES {
            return Err(ConfigError::TooManyRules {
                count: self.rules.len(),
                max: MAX_RULES,
            });
        }

        for id in self.rules.keys() {
            if id.is_empty() {
                return Err(ConfigError::EmptyRuleId);
            }
            if id.len() > MAX_RULE_ID_LENGTH {
                return Err(ConfigError::RuleIdTooLong {
                    len: id.len(),
                    max: MAX_RULE_ID_LENGTH,
                });
            }
        }

        Ok(())
    }

    /// Disable a specific rule
    pub fn disable_rule(&mut self, rule_id: &str) {
        self.rules.insert(
            rule_id.to_string(),
            RuleConfig {
                enabled: false,
                error: false,
            },
        );
    }

    /// Enable a specific rule
    pub fn enable_rule(&mut self, rule_id: &str) {
        self.rules.insert(rule_id.to_string(), RuleConfig::default());
    }

    /// Set a rule to error level
    pub fn set_rule_error(&mut self, rule_id: &str) {
        self.rules.insert(
            rule_id.to_string(),
            RuleConfig {
                enabled: true,
                error: true,
            },
        );
    }
}

/// Lint runner
pub struct LintRunner {
    config: LintConfig,
    rules: Vec<Box<dyn LintRule>>,
}

impl LintRunner {
    /// Create a new lint runner with default rules
    pub fn new(config: LintConfig) -> Self {
        Self {
            config,
            rules: default_rules(),
        }
    }

    /// Create a lint runner with custom rules
    pub fn with_rules(config: LintConfig, rules: Vec<Box<dyn LintRule>>) -> Self {
        Self { config, rules }
    }

    /// Add a custom rule
    pub fn add_rule(&mut self, rule: Box<dyn LintRule>) {
        self.rules.push(rule);
    }

    /// IDs of the registered rules, in run order.
    pub fn rule_ids(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Run all enabled rules on a document.
    ///
    /// Returns at most `config.max_diagnostics` findings (plus the limit
    /// warning), errors first; order within a severity follows the rules.
    pub fn run(&self, doc: &Document) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let mut limit_exceeded = false;

        for rule in &self.rules {
            if diagnostics.len() >= self.config.max_diagnostics {
                limit_exceeded = true;
                break;
            }

            let rule_config = self.config.rules.get(rule.id()).cloned().unwrap_or_default();
            if !rule_config.enabled {
                continue;
            }

            let mut rule_diagnostics = rule.check(doc);
            for diag in &mut rule_diagnostics {
                if rule_config.error && diag.severity() == Severity::Warning {
                    diag.escalate_to_error();
                }
            }

            for diag in rule_diagnostics
                .into_iter()
                .filter(|d| d.severity() >= self.config.min_severity)
            {
                if diagnostics.len() >= self.config.max_diagnostics {
                    limit_exceeded = true;
                    break;
                }
                diagnostics.push(diag);
            }

            if limit_exceeded {
                break;
            }
        }

        if limit_exceeded {
            diagnostics.push(Diagnostic::warning(
                DiagnosticKind::Custom("diagnostic-limit-exceeded".to_string()),
                format!(
                    "diagnostic limit of {} exceeded; further diagnostics suppressed",
                    self.config.max_diagnostics
                ),
                "lint-runner",
            ));
        }

        // Stable: rule order is kept within one severity.
        diagnostics.sort_by(|a, b| b.severity().cmp(&a.severity()));
        diagnostics
    }

    /// Check if any errors were found
    pub fn has_errors(&self, diagnostics: &[Diagnostic]) -> bool {
        diagnostics.iter().any(|d| d.severity() == Severity::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cif_core::parse;

    struct AlwaysHint;

    impl LintRule for AlwaysHint {
        fn id(&self) -> &str {
            "always-hint"
        }
        fn description(&self) -> &str {
            "one hint per block"
        }
        fn check(&self, doc: &Document) -> Vec<Diagnostic> {
            doc.blocks()
                .iter()
                .map(|b| {
                    Diagnostic::hint(DiagnosticKind::Custom("hint".into()), "hi", self.id())
                        .with_block(b.name())
                })
                .collect()
        }
    }

    fn overflow_and_duplicate() -> Document {
        parse(
            "data_t\n_x 1\n_x 2\nloop_\n_atom_site_label\n_atom_site_Wyckoff_symbol\n\
_atom_site_fract_x\n_atom_site_fract_y\n_atom_site_fract_z\n_atom_site_occupancy\n\
A 4f 0 0 0 0.7\nB 4f 0 0 0 0.6\nC 2a 0.5 0.5 0.5 1.5\n",
        )
        .unwrap()
    }

    // ==================== LintConfig tests ====================

    #[test]
    fn test_lint_config_default() {
        let config = LintConfig::default();
        assert_eq!(config.min_severity, Severity::Hint);
        assert_eq!(config.max_diagnostics, 10_000);
        assert!(config.rules.is_empty());
    }

    #[test]
    fn test_disable_enable_error() {
        let mut config = LintConfig::default();
        config.disable_rule("axial-ratio");
        assert!(!config.rules["axial-ratio"].enabled);
        config.enable_rule("axial-ratio");
        assert!(config.rules["axial-ratio"].enabled);
        config.set_rule_error("duplicate-tag");
        assert!(config.rules["duplicate-tag"].error);
    }

    #[test]
    fn test_validate() {
        let mut config = LintConfig::default();
        assert_eq!(config.validate(), Ok(()));
        config.disable_rule("");
        assert_eq!(config.validate(), Err(ConfigError::EmptyRuleId));

        let mut config = LintConfig::default();
        config.disable_rule(&"x".repeat(101));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RuleIdTooLong { len: 101, .. })
        ));
    }

    // ==================== LintRunner tests ====================

    #[test]
    fn test_run_orders_errors_first() {
        let runner = LintRunner::new(LintConfig::default());
        let diags = runner.run(&overflow_and_duplicate());
        let ids: Vec<_> = diags.iter().map(|d| d.rule_id()).collect();
        assert_eq!(ids, vec!["occupancy-range", "disorder-overflow", "duplicate-tag"]);
        assert!(runner.has_errors(&diags));
    }

    #[test]
    fn test_disabled_rule_is_skipped() {
        let mut config = LintConfig::default();
        config.disable_rule("occupancy-range");
        let runner = LintRunner::new(config);
        let diags = runner.run(&overflow_and_duplicate());
        assert!(diags.iter().all(|d| d.rule_id() != "occupancy-range"));
        assert!(!runner.has_errors(&diags));
    }

    #[test]
    fn test_rule_error_escalates_warnings() {
        let mut config = LintConfig::default();
        config.set_rule_error("duplicate-tag");
        let diags = LintRunner::new(config).run(&overflow_and_duplicate());
        let dup = diags.iter().find(|d| d.rule_id() == "duplicate-tag").unwrap();
        assert_eq!(dup.severity(), Severity::Error);
    }

    #[test]
    fn test_min_severity_filters() {
        let config = LintConfig {
            min_severity: Severity::Error,
            ..LintConfig::default()
        };
        let diags = LintRunner::new(config).run(&overflow_and_duplicate());
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule_id(), "occupancy-range");
    }

    #[test]
    fn test_max_diagnostics_limit() {
        let doc = parse("data_a\ndata_b\ndata_c\n").unwrap();
        let config = LintConfig {
            max_diagnostics: 2,
            ..LintConfig::default()
        };
        let runner = LintRunner::with_rules(config, vec![Box::new(AlwaysHint)]);
        let diags = runner.run(&doc);
        assert_eq!(diags.len(), 3);
        assert_eq!(diags[0].rule_id(), "lint-runner");
    }

    #[test]
    fn test_add_rule() {
        let mut runner = LintRunner::new(LintConfig::default());
        runner.add_rule(Box::new(AlwaysHint));
        assert_eq!(runner.rule_ids().last(), Some(&"always-hint"));
        let diags = runner.run(&parse("data_a\n").unwrap());
        assert_eq!(diags.len(), 1);
    }
}
