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

//! Canonicalization configuration.

/// Quoting strategy for text values.
///
/// Numbers and the `?`/`.` sentinels are never quoted. Text that would be
/// read back as a different value when written bare is always quoted,
/// whatever the strategy.
///
/// # Examples
///
/// ```
/// use cif_c14n::{CanonicalConfig, QuotingStrategy};
///
/// let config = CanonicalConfig::new().with_quoting(QuotingStrategy::Always);
/// assert_eq!(config.quoting, QuotingStrategy::Always);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum QuotingStrategy {
    /// Quote only text that cannot be written bare.
    ///
    /// Quotes are added when text:
    /// - Is empty or contains whitespace
    /// - Starts with `_`, `#`, `$`, `'`, `"`, `;`, `[` or `]`
    /// - Equals `?` or `.`
    /// - Starts with a reserved word (`data_`, `loop_`, `save_`, ...)
    #[default]
    Minimal,

    /// Quote every single-line text value.
    Always,
}

/// Configuration for canonical output.
///
/// # Examples
///
/// ```
/// use cif_c14n::{CanonicalConfig, QuotingStrategy};
///
/// let config = CanonicalConfig::default();
/// assert_eq!(config.quoting, QuotingStrategy::Minimal);
/// assert!(config.keep_comments);
/// assert!(config.align_loop_columns);
/// assert!(config.blank_line_between_blocks);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct CanonicalConfig {
    /// Quoting strategy for text values.
    pub quoting: QuotingStrategy,
    /// Emit preamble comments, free-standing block comments and row
    /// annotations.
    ///
    /// Disabling this also drops the annotations that name disorder groups.
    pub keep_comments: bool,
    /// Pad loop cells so that columns line up.
    pub align_loop_columns: bool,
    /// Separate data blocks with one empty line.
    pub blank_line_between_blocks: bool,
}

impl Default for CanonicalConfig {
    fn default() -> Self {
        Self {
            quoting: QuotingStrategy::Minimal,
            keep_comments: true,
            align_loop_columns: true,
            blank_line_between_blocks: true,
        }
    }
}

impl CanonicalConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for the configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use cif_c14n::{CanonicalConfig, QuotingStrategy};
    ///
    /// let config = CanonicalConfig::builder()
    ///     .quoting(QuotingStrategy::Always)
    ///     .align_loop_columns(false)
    ///     .build();
    /// assert!(!config.align_loop_columns);
    /// ```
    pub fn builder() -> CanonicalConfigBuilder {
        CanonicalConfigBuilder::new()
    }

    /// Set the quoting strategy.
    pub fn with_quoting(mut self, quoting: QuotingStrategy) -> Self {
        self.quoting = quoting;
        self
    }

    /// Set whether comments are written.
    pub fn with_comments(mut self, keep_comments: bool) -> Self {
        self.keep_comments = keep_comments;
        self
    }

    /// Set whether loop columns are aligned.
    pub fn with_aligned_loops(mut self, align: bool) -> Self {
        self.align_loop_columns = align;
        self
    }

    /// Set whether blocks are separated by an empty line.
    pub fn with_block_spacing(mut self, blank_line: bool) -> Self {
        self.blank_line_between_blocks = blank_line;
        self
    }
}

/// Builder for [`CanonicalConfig`].
#[derive(Debug, Clone)]
pub struct CanonicalConfigBuilder {
    config: CanonicalConfig,
}

impl Default for CanonicalConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CanonicalConfigBuilder {
    /// Create a builder holding the default configuration.
    ///
    /// ```
    /// use cif_c14n::CanonicalConfig;
    ///
    /// assert_eq!(CanonicalConfig::builder().build(), CanonicalConfig::default());
    /// ```
    pub fn new() -> Self {
        Self {
            config: CanonicalConfig::default(),
        }
    }

    /// Set the quoting strategy.
    pub fn quoting(mut self, quoting: QuotingStrategy) -> Self {
        self.config.quoting = quoting;
        self
    }

    /// Set whether comments are written.
    pub fn keep_comments(mut self, keep: bool) -> Self {
        self.config.keep_comments = keep;
        self
    }

    /// Set whether loop columns are aligned.
    pub fn align_loop_columns(mut self, align: bool) -> Self {
        self.config.align_loop_columns = align;
        self
    }

    /// Set whether blocks are separated by an empty line.
    pub fn blank_line_between_blocks(mut self, blank_line: bool) -> Self {
        self.config.blank_line_between_blocks = blank_line;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> CanonicalConfig {
        self.config
    }
}
