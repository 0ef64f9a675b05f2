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

//! Data blocks.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::atom::AtomSite;
use crate::cell::{CellParameters, CellVariant};
use crate::disorder::{self, DisorderGroup};
use crate::error::{CifError, CifResult};
use crate::lex::{Lexeme, SourcePos};
use crate::limits::Limits;
use crate::loop_table::LoopTable;
use crate::parser::ParseOptions;
use crate::value::ScalarValue;
use crate::warning::Warning;

/// A tag with its single value.
#[derive(Debug, Clone, PartialEq)]
pub struct DataItem {
    tag: String,
    value: ScalarValue,
    position: SourcePos,
    /// Tag, comments between tag and value, then value.
    lexemes: Vec<Lexeme>,
}

impl DataItem {
    pub(crate) fn new(tag: String, value: ScalarValue, lexemes: Vec<Lexeme>) -> Self {
        let position = lexemes.first().map(Lexeme::position).unwrap_or_default();
        Self {
            tag,
            value,
            position,
            lexemes,
        }
    }

    /// The tag as written.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn value(&self) -> &ScalarValue {
        &self.value
    }

    /// Position of the tag.
    pub fn position(&self) -> SourcePos {
        self.position
    }

    /// Returns true for a `;`-delimited text field.
    pub fn is_text_field(&self) -> bool {
        self.value.is_multiline()
    }
}

/// One element of a block, in source order.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Item(DataItem),
    Loop(LoopTable),
    /// A free-standing comment line.
    Comment(Lexeme),
}

impl Entry {
    pub(crate) fn write_to(&self, out: &mut String) {
        match self {
            Self::Item(item) => item.lexemes.iter().for_each(|l| l.write_to(out)),
            Self::Loop(table) => table.write_to(out),
            Self::Comment(lexeme) => lexeme.write_to(out),
        }
    }
}

/// What a tag refers to inside a block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlockItem<'a> {
    Value(&'a ScalarValue),
    Loop(&'a LoopTable),
}

/// A `data_` block.
///
/// Tags are looked up case-insensitively; their first-seen spelling and order
/// are kept for output. When a tag is declared twice the later declaration
/// wins and a [`Warning::DuplicateTag`] is recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    name: String,
    header: Lexeme,
    entries: Vec<Entry>,
    index: HashMap<String, (usize, SourcePos)>,
    order: Vec<String>,
    warnings: Vec<Warning>,
    atom_sites: Vec<AtomSite>,
    disorder_groups: Vec<DisorderGroup>,
}

impl Block {
    pub(crate) fn new(name: &str, header: Lexeme) -> Self {
        Self {
            name: name.to_string(),
            header,
            entries: Vec::new(),
            index: HashMap::new(),
            order: Vec::new(),
            warnings: Vec::new(),
            atom_sites: Vec::new(),
            disorder_groups: Vec::new(),
        }
    }

    /// Block name without the `data_` prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of the `data_` header.
    pub fn position(&self) -> SourcePos {
        self.header.position()
    }

    /// Items, loops and comments in source order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Tags in first-seen order, loop columns included.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the block declares no tags.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Resolves a tag to its value or to the loop declaring it.
    pub fn get(&self, tag: &str) -> Option<BlockItem<'_>> {
        let (entry, _) = self.index.get(&tag.to_ascii_lowercase())?;
        match &self.entries[*entry] {
            Entry::Item(item) => Some(BlockItem::Value(&item.value)),
            Entry::Loop(table) => Some(BlockItem::Loop(table)),
            Entry::Comment(_) => None,
        }
    }

    /// Value of a single-valued tag.
    pub fn tag(&self, tag: &str) -> Option<&ScalarValue> {
        self.item(tag).map(DataItem::value)
    }

    /// The tag/value item for `tag`.
    pub fn item(&self, tag: &str) -> Option<&DataItem> {
        let (entry, _) = self.index.get(&tag.to_ascii_lowercase())?;
        match &self.entries[*entry] {
            Entry::Item(item) => Some(item),
            _ => None,
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.index.contains_key(&tag.to_ascii_lowercase())
    }

    /// Loop tables in source order.
    pub fn loops(&self) -> impl Iterator<Item = &LoopTable> {
        self.entries.iter().filter_map(|e| match e {
            Entry::Loop(table) => Some(table),
            _ => None,
        })
    }

    /// The loop declaring column `tag`.
    pub fn loop_by_tag(&self, tag: &str) -> Option<&LoopTable> {
        match self.get(tag)? {
            BlockItem::Loop(table) => Some(table),
            BlockItem::Value(_) => None,
        }
    }

    /// The first loop with a column starting with `prefix`, e.g. `_atom_site_`.
    pub fn loop_with_prefix(&self, prefix: &str) -> Option<&LoopTable> {
        self.loops().find(|table| table.has_prefix(prefix))
    }

    /// Items holding multi-line text.
    pub fn text_fields(&self) -> impl Iterator<Item = &DataItem> {
        self.items().filter(|item| item.is_text_field())
    }

    /// Tag/value items in source order, superseded duplicates included.
    pub fn items(&self) -> impl Iterator<Item = &DataItem> {
        self.entries.iter().filter_map(|e| match e {
            Entry::Item(item) => Some(item),
            _ => None,
        })
    }

    /// Free-standing comment lines, without the `#`.
    pub fn comments(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|e| match e {
            Entry::Comment(lexeme) => Some(lexeme.raw.strip_prefix('#').unwrap_or(&lexeme.raw)),
            _ => None,
        })
    }

    /// Sites of every atom-site loop, wildcard rows excluded.
    pub fn atom_sites(&self) -> &[AtomSite] {
        &self.atom_sites
    }

    /// Site groups, singletons included, in order of first row.
    pub fn disorder_groups(&self) -> &[DisorderGroup] {
        &self.disorder_groups
    }

    /// Unit-cell parameters of the block.
    pub fn cell(&self) -> CellParameters {
        CellParameters::from_block(self)
    }

    /// The cell representation the block name announces.
    pub fn cell_variant(&self) -> Option<CellVariant> {
        CellVariant::from_block_name(&self.name)
    }

    /// Warnings recorded while assembling the block.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub(crate) fn write_to(&self, out: &mut String) {
        self.header.write_to(out);
        for entry in &self.entries {
            entry.write_to(out);
        }
    }

    // --- Assembly ---

    fn register(&mut self, tag: &str, position: SourcePos, entry: usize, limits: &Limits) -> CifResult<()> {
        let key = tag.to_ascii_lowercase();
        match self.index.get_mut(&key) {
            // later value wins; the warning keeps pointing at the first declaration
            Some(slot) => {
                slot.0 = entry;
                self.warnings.push(Warning::DuplicateTag {
                    tag: tag.to_string(),
                    first: slot.1,
                    duplicate: position,
                });
            }
            None => {
                if self.order.len() >= limits.max_tags_per_block {
                    return Err(CifError::security(
                        format!(
                            "block declares more than {} tags",
                            limits.max_tags_per_block
                        ),
                        0,
                    )
                    .at(position));
                }
                self.index.insert(key, (entry, position));
                self.order.push(tag.to_string());
            }
        }
        Ok(())
    }

    pub(crate) fn push_comment(&mut self, lexeme: Lexeme) {
        self.entries.push(Entry::Comment(lexeme));
    }

    pub(crate) fn push_item(&mut self, item: DataItem, limits: &Limits) -> CifResult<()> {
        let entry = self.entries.len();
        let tag = item.tag.clone();
        let position = item.position;
        self.entries.push(Entry::Item(item));
        self.register(&tag, position, entry, limits)
    }

    pub(crate) fn push_loop(&mut self, table: LoopTable, limits: &Limits) -> CifResult<()> {
        let entry = self.entries.len();
        let columns = table.columns().to_vec();
        let position = table.position();
        self.entries.push(Entry::Loop(table));
        for column in &columns {
            self.register(column, position, entry, limits)?;
        }
        Ok(())
    }

    /// Derives atom sites and disorder groups once all entries are in.
    pub(crate) fn finish(mut self, options: &ParseOptions) -> Self {
        for entry in &self.entries {
            if let Entry::Loop(table) = entry {
                if !table.is_atom_site() {
                    continue;
                }
                let sites = AtomSite::from_table(table);
                let (groups, warnings) = disorder::resolve(
                    table,
                    &sites,
                    options.coordinate_tolerance,
                    options.occupancy_epsilon,
                );
                self.atom_sites.extend(sites);
                self.disorder_groups.extend(groups);
                self.warnings.extend(warnings);
            }
        }

        for warning in &self.warnings {
            warn!(block = %self.name, "{}", warning);
        }
        debug!(
            block = %self.name,
            entries = self.entries.len(),
            loops = self.loops().count(),
            sites = self.atom_sites.len(),
            "assembled block"
        );
        self
    }
}
