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

//! The parsed document.

use std::collections::HashMap;

use crate::block::Block;
use crate::cell::CellVariant;
use crate::error::{CifError, CifResult};
use crate::lex::Lexeme;
use crate::loop_table::LoopTable;
use crate::value::ScalarValue;
use crate::warning::Warning;

/// A block dropped by lenient parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedBlock {
    /// Name from the block's `data_` header.
    pub name: String,
    /// The error that ended the block.
    pub error: CifError,
}

/// A parsed CIF document: blocks in source order, unique by name.
///
/// Documents are immutable once parsed. Everything needed to write the
/// source back out unchanged is retained, see [`Document::serialize`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    preamble: Vec<Lexeme>,
    blocks: Vec<Block>,
    index: HashMap<String, usize>,
    skipped: Vec<SkippedBlock>,
    trailing: String,
}

impl Document {
    pub(crate) fn new(preamble: Vec<Lexeme>) -> Self {
        Self {
            preamble,
            ..Self::default()
        }
    }

    pub(crate) fn push_block(&mut self, block: Block) -> CifResult<()> {
        let key = block.name().to_ascii_lowercase();
        if let Some(&existing) = self.index.get(&key) {
            return Err(CifError::parse(
                format!(
                    "duplicate block name '{}' (first declared at {})",
                    block.name(),
                    self.blocks[existing].position()
                ),
                0,
            )
            .at(block.position()));
        }
        self.index.insert(key, self.blocks.len());
        self.blocks.push(block);
        Ok(())
    }

    pub(crate) fn push_skipped(&mut self, skipped: SkippedBlock) {
        self.skipped.push(skipped);
    }

    pub(crate) fn set_trailing(&mut self, trailing: &str) {
        self.trailing = trailing.to_string();
    }

    /// Blocks in source order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Looks up a block by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&Block> {
        self.index
            .get(&name.to_ascii_lowercase())
            .map(|&i| &self.blocks[i])
    }

    /// Looks up a block by name, failing with `BlockNotFound` if absent.
    pub fn block(&self, name: &str) -> CifResult<&Block> {
        self.get(name).ok_or_else(|| CifError::block_not_found(name))
    }

    /// Value of a single-valued tag in a named block.
    pub fn tag(&self, block: &str, tag: &str) -> CifResult<Option<&ScalarValue>> {
        Ok(self.block(block)?.tag(tag))
    }

    /// The first loop in a named block with a column starting with `prefix`.
    pub fn loop_table(&self, block: &str, prefix: &str) -> CifResult<Option<&LoopTable>> {
        Ok(self.block(block)?.loop_with_prefix(prefix))
    }

    /// Blocks that carry a cell variant, with that variant.
    pub fn cell_variants(&self) -> Vec<(CellVariant, &Block)> {
        self.blocks
            .iter()
            .filter_map(|b| b.cell_variant().map(|v| (v, b)))
            .collect()
    }

    /// The first block describing the given cell variant.
    pub fn variant(&self, variant: CellVariant) -> Option<&Block> {
        self.blocks
            .iter()
            .find(|b| b.cell_variant() == Some(variant))
    }

    /// All warnings, paired with the name of the block they belong to.
    pub fn warnings(&self) -> Vec<(&str, &Warning)> {
        self.blocks
            .iter()
            .flat_map(|b| b.warnings().iter().map(move |w| (b.name(), w)))
            .collect()
    }

    /// Blocks dropped by lenient parsing.
    pub fn skipped(&self) -> &[SkippedBlock] {
        &self.skipped
    }

    /// Comment lines before the first block.
    pub fn preamble(&self) -> impl Iterator<Item = &str> {
        self.preamble
            .iter()
            .map(|l| l.raw.strip_prefix('#').unwrap_or(&l.raw))
    }

    /// Writes the document back as CIF text.
    ///
    /// For a document parsed in strict mode the output equals the input
    /// byte for byte.
    pub fn serialize(&self) -> String {
        crate::writer::serialize(self)
    }

    pub(crate) fn write_to(&self, out: &mut String) {
        for lexeme in &self.preamble {
            lexeme.write_to(out);
        }
        for block in &self.blocks {
            block.write_to(out);
        }
        out.push_str(&self.trailing);
    }
}
