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

//! CIF Canonicalization
//!
//! Rebuilds CIF text from the semantic model of a parsed [`Document`].
//! Where `cif-core`'s writer reproduces the input byte for byte, the
//! canonical writer normalizes spelling and layout so that two documents with
//! the same content serialize identically.
//!
//! Canonical output guarantees:
//!
//! - **Deterministic output**: the same document always produces the same text
//! - **Idempotency**: `canonicalize(parse(canonicalize(x))) == canonicalize(x)`
//! - **Round-trip preservation**: parsing canonical output yields the same
//!   values, loops, annotations and disorder groups
//!
//! # Examples
//!
//! ```
//! use cif_c14n::{canonicalize, canonicalize_with_config, CanonicalConfig, QuotingStrategy};
//!
//! let doc = cif_core::parse("data_x\n_symmetry_space_group_name_H-M   \"P -1\"\n").unwrap();
//! assert_eq!(canonicalize(&doc), "data_x\n_symmetry_space_group_name_H-M 'P -1'\n");
//!
//! let config = CanonicalConfig::builder()
//!     .quoting(QuotingStrategy::Always)
//!     .keep_comments(false)
//!     .build();
//! let output = canonicalize_with_config(&doc, &config);
//! assert!(output.contains("'P -1'"));
//! ```

mod config;
mod writer;

pub use config::{CanonicalConfig, CanonicalConfigBuilder, QuotingStrategy};
pub use writer::CanonicalWriter;

use cif_core::{Block, Document};

/// Canonicalize a document with the default configuration.
pub fn canonicalize(doc: &Document) -> String {
    canonicalize_with_config(doc, &CanonicalConfig::default())
}

/// Canonicalize a document with a custom configuration.
pub fn canonicalize_with_config(doc: &Document, config: &CanonicalConfig) -> String {
    CanonicalWriter::new(config.clone()).write_document(doc)
}

/// Canonicalize one block with the default configuration.
pub fn canonicalize_block(block: &Block) -> String {
    CanonicalWriter::new(CanonicalConfig::default()).write_single_block(block)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_normalizes_whitespace() {
        let doc = cif_core::parse("data_a\n   _x    1.0\n\n\n_y   ?\n").unwrap();
        assert_eq!(canonicalize(&doc), "data_a\n_x 1\n_y ?\n");
    }

    #[test]
    fn test_canonicalize_block_matches_document_output() {
        let doc = cif_core::parse("data_a\n_x 1\n").unwrap();
        assert_eq!(canonicalize_block(&doc.blocks()[0]), canonicalize(&doc));
    }

    #[test]
    fn test_blocks_separated_by_blank_line() {
        let doc = cif_core::parse("data_a\n_x 1\ndata_b\n_y 2\n").unwrap();
        assert_eq!(canonicalize(&doc), "data_a\n_x 1\n\ndata_b\n_y 2\n");

        let config = CanonicalConfig::new().with_block_spacing(false);
        assert_eq!(
            canonicalize_with_config(&doc, &config),
            "data_a\n_x 1\ndata_b\n_y 2\n"
        );
    }

    #[test]
    fn test_empty_document() {
        let doc = cif_core::parse("").unwrap();
        assert_eq!(canonicalize(&doc), "");
    }
}
