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

//! Canonical CIF writer.
//!
//! Unlike the round-trip writer in `cif-core`, which replays the source
//! lexemes, this writer rebuilds the text from the semantic model: values are
//! respelled, quoting is chosen from content and whitespace is normalized.

use crate::config::{CanonicalConfig, QuotingStrategy};
use cif_core::normalize::classify;
use cif_core::{Block, DataItem, Document, Entry, LoopTable, ScalarValue};

/// Initial buffer capacity for output string.
const INITIAL_OUTPUT_BUFFER_CAPACITY: usize = 4096;

/// Characters that may not begin an unquoted value.
const RESERVED_LEADING_CHARS: [char; 8] = ['_', '#', '$', '\'', '"', ';', '[', ']'];

/// A rendered value: either one inline word or the content of a `;` block.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Cell {
    Inline(String),
    TextBlock(String),
}

/// Writer for canonical CIF output.
///
/// # Layout
///
/// - One `data_` header per block, blocks optionally separated by an empty line
/// - `_tag value` on one line; text blocks start on the line after the tag
/// - `loop_`, then one column tag per line, then one line per row
/// - Row annotations written as `#` lines directly above their row
///
/// Multi-line text containing a line that starts with `;` cannot be
/// expressed in CIF 1.1 and is written as is.
///
/// # Examples
///
/// ```
/// use cif_c14n::{CanonicalConfig, CanonicalWriter};
///
/// let doc = cif_core::parse("data_a\n_name   'Zn'\n_cell_length_a 9.1430(20)\n").unwrap();
/// let mut writer = CanonicalWriter::new(CanonicalConfig::default());
/// assert_eq!(writer.write_document(&doc), "data_a\n_name Zn\n_cell_length_a 9.143(2)\n");
/// ```
pub struct CanonicalWriter {
    config: CanonicalConfig,
    out: String,
}

impl CanonicalWriter {
    /// Create a new writer with the given configuration.
    pub fn new(config: CanonicalConfig) -> Self {
        Self {
            config,
            out: String::with_capacity(INITIAL_OUTPUT_BUFFER_CAPACITY),
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &CanonicalConfig {
        &self.config
    }

    /// Write a whole document in canonical form.
    pub fn write_document(&mut self, doc: &Document) -> String {
        self.out.clear();
        if self.config.keep_comments {
            for comment in doc.preamble() {
                self.out.push('#');
                self.out.push_str(comment);
                self.out.push('\n');
            }
        }
        for block in doc.blocks() {
            if self.config.blank_line_between_blocks && !self.out.is_empty() {
                self.out.push('\n');
            }
            self.write_block(block);
        }
        std::mem::take(&mut self.out)
    }

    /// Write a single block in canonical form.
    pub fn write_single_block(&mut self, block: &Block) -> String {
        self.out.clear();
        self.write_block(block);
        std::mem::take(&mut self.out)
    }

    fn write_block(&mut self, block: &Block) {
        self.out.push_str("data_");
        self.out.push_str(block.name());
        self.out.push('\n');
        for entry in block.entries() {
            match entry {
                Entry::Item(item) => self.write_item(item),
                Entry::Loop(table) => self.write_loop(table),
                Entry::Comment(lexeme) => {
                    if self.config.keep_comments {
                        self.out.push_str(&lexeme.raw);
                        self.out.push('\n');
                    }
                }
            }
        }
    }

    fn write_item(&mut self, item: &DataItem) {
        self.out.push_str(item.tag());
        match self.render_value(item.value()) {
            Cell::Inline(text) => {
                self.out.push(' ');
                self.out.push_str(&text);
                self.out.push('\n');
            }
            Cell::TextBlock(content) => {
                self.out.push('\n');
                self.write_text_block(&content);
            }
        }
    }

    fn write_loop(&mut self, table: &LoopTable) {
        self.out.push_str("loop_\n");
        for column in table.columns() {
            self.out.push_str(column);
            self.out.push('\n');
        }

        let rendered: Vec<Vec<Cell>> = table
            .rows()
            .iter()
            .map(|row| row.values().iter().map(|v| self.render_value(v)).collect())
            .collect();
        let widths = if self.config.align_loop_columns {
            column_widths(&rendered, table.width())
        } else {
            vec![0; table.width()]
        };

        for (row, cells) in table.rows().iter().zip(&rendered) {
            if self.config.keep_comments {
                if let Some(comment) = row.comment() {
                    self.write_annotation(comment);
                }
            }
            self.write_row(cells, &widths);
        }
    }

    fn write_row(&mut self, cells: &[Cell], widths: &[usize]) {
        let mut line = String::new();
        let last = cells.len().saturating_sub(1);
        for (i, cell) in cells.iter().enumerate() {
            match cell {
                Cell::Inline(text) => {
                    if !line.is_empty() {
                        line.push(' ');
                    }
                    line.push_str(text);
                    if i < last {
                        let width = widths.get(i).copied().unwrap_or(0);
                        for _ in text.chars().count()..width {
                            line.push(' ');
                        }
                    }
                }
                Cell::TextBlock(content) => {
                    self.flush_line(&mut line);
                    self.write_text_block(content);
                }
            }
        }
        self.flush_line(&mut line);
    }

    fn flush_line(&mut self, line: &mut String) {
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            self.out.push_str(trimmed);
            self.out.push('\n');
        }
        line.clear();
    }

    fn write_annotation(&mut self, comment: &str) {
        for line in comment.split('\n') {
            self.out.push('#');
            if !line.is_empty() {
                self.out.push(' ');
                self.out.push_str(line);
            }
            self.out.push('\n');
        }
    }

    fn write_text_block(&mut self, content: &str) {
        self.out.push_str(";\n");
        self.out.push_str(content);
        self.out.push_str("\n;\n");
    }

    fn render_value(&self, value: &ScalarValue) -> Cell {
        match value {
            ScalarValue::Text { content, multiline } => self.render_text(content, *multiline),
            other => Cell::Inline(other.to_string()),
        }
    }

    fn render_text(&self, content: &str, multiline: bool) -> Cell {
        // Text blocks are the only form that is never classified as a number.
        let line_break = content.contains(|c: char| c == '\n' || c == '\r');
        if multiline || line_break || !reads_back_as_text(content) {
            return Cell::TextBlock(content.to_string());
        }
        if self.config.quoting == QuotingStrategy::Minimal && can_be_bare(content) {
            return Cell::Inline(content.to_string());
        }
        match ['\'', '"'].into_iter().find(|&q| can_be_quoted(content, q)) {
            Some(quote) => Cell::Inline(format!("{quote}{content}{quote}")),
            None => Cell::TextBlock(content.to_string()),
        }
    }
}

fn column_widths(rows: &[Vec<Cell>], width: usize) -> Vec<usize> {
    let mut widths = vec![0; width];
    for row in rows {
        for (slot, cell) in widths.iter_mut().zip(row) {
            if let Cell::Inline(text) = cell {
                *slot = (*slot).max(text.chars().count());
            }
        }
    }
    widths
}

fn reads_back_as_text(text: &str) -> bool {
    matches!(classify(text), Ok(ScalarValue::Text { .. }))
}

fn is_reserved_word(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    lower.starts_with("data_")
        || lower.starts_with("save_")
        || lower == "loop_"
        || lower == "global_"
        || lower == "stop_"
}

/// True when `text` reads back unchanged as an unquoted value.
fn can_be_bare(text: &str) -> bool {
    let first = match text.chars().next() {
        Some(c) => c,
        None => return false,
    };
    !RESERVED_LEADING_CHARS.contains(&first)
        && text != "?"
        && text != "."
        && !text.chars().any(char::is_whitespace)
        && !is_reserved_word(text)
}

/// True when `text` can be wrapped in `quote`: a quote only closes when
/// followed by whitespace, so that pair must not occur inside.
fn can_be_quoted(text: &str, quote: char) -> bool {
    let q = quote as u8;
    !text
        .as_bytes()
        .windows(2)
        .any(|w| w[0] == q && w[1].is_ascii_whitespace())
}
