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

//! Round-trip serialization.
//!
//! The writer replays the lexemes stored in the model: whitespace, comments,
//! quoting and number spelling come out exactly as they went in. For a
//! re-rendering from the semantic model alone see the `cif-c14n` crate.

use crate::block::Block;
use crate::document::Document;

/// Writes a document back to CIF text.
pub fn serialize(doc: &Document) -> String {
    let mut out = String::with_capacity(estimate_size(doc));
    doc.write_to(&mut out);
    out
}

/// Writes a single block, from its `data_` header to its last entry.
pub fn serialize_block(block: &Block) -> String {
    let mut out = String::new();
    block.write_to(&mut out);
    out
}

fn estimate_size(doc: &Document) -> usize {
    doc.blocks()
        .iter()
        .map(|b| 64 + b.len() * 48)
        .sum()
}
