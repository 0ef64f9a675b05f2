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

//! Resource limits for CIF parsing.

/// Configurable limits bounding the resources a single parse may consume.
///
/// Exceeding any limit fails the parse with a
/// [`Security`](crate::CifErrorKind::Security) error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum input size in bytes (default: 256MB).
    pub max_file_size: usize,
    /// Maximum number of data blocks (default: 10k).
    pub max_blocks: usize,
    /// Maximum number of tag/value pairs in one block (default: 100k).
    pub max_tags_per_block: usize,
    /// Maximum columns in one loop table (default: 1k).
    pub max_columns: usize,
    /// Maximum rows in one loop table (default: 10M).
    pub max_rows: usize,
    /// Maximum size of a single `;` text block in bytes (default: 16MB).
    pub max_text_block_size: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_file_size: 256 * 1024 * 1024,
            max_blocks: 10_000,
            max_tags_per_block: 100_000,
            max_columns: 1_000,
            max_rows: 10_000_000,
            max_text_block_size: 16 * 1024 * 1024,
        }
    }
}

impl Limits {
    /// Limits with no restrictions (for trusted input and tests).
    pub fn unlimited() -> Self {
        Self {
            max_file_size: usize::MAX,
            max_blocks: usize::MAX,
            max_tags_per_block: usize::MAX,
            max_columns: usize::MAX,
            max_rows: usize::MAX,
            max_text_block_size: usize::MAX,
        }
    }
}
