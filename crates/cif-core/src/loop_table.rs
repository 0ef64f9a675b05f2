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

//! Loop tables and the loop table parser.

use tracing::trace;

use crate::error::{CifError, CifResult};
use crate::lex::{Lexeme, SourcePos, Token, TokenKind};
use crate::limits::Limits;
use crate::normalize::normalize;
use crate::parser::TokenStream;
use crate::value::ScalarValue;

/// Column that marks a loop as an atom-site table.
pub const ATOM_SITE_MARKER: &str = "_atom_site_fract_x";

/// One row of a loop table, together with the comment lines that preceded it.
///
/// Generic consumers read [`values`](Self::values) and ignore the annotation;
/// the disorder resolver uses it to describe a group of split sites.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedRow {
    comment: Option<String>,
    values: Vec<ScalarValue>,
    position: SourcePos,
    lexemes: Vec<Lexeme>,
}

impl AnnotatedRow {
    /// Text of the comment lines directly above the row, joined by newlines.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Values in column order.
    pub fn values(&self) -> &[ScalarValue] {
        &self.values
    }

    /// Value of the column at `index`.
    pub fn get(&self, index: usize) -> Option<&ScalarValue> {
        self.values.get(index)
    }

    /// Position of the row's first value.
    pub fn position(&self) -> SourcePos {
        self.position
    }

    /// Returns true when every value is the `?` sentinel.
    pub fn is_all_unknown(&self) -> bool {
        self.values.iter().all(ScalarValue::is_unknown)
    }

    pub(crate) fn write_to(&self, out: &mut String) {
        for lexeme in &self.lexemes {
            lexeme.write_to(out);
        }
    }
}

/// A `loop_` table: column tags and rows of equal width.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopTable {
    columns: Vec<String>,
    rows: Vec<AnnotatedRow>,
    position: SourcePos,
    header: Vec<Lexeme>,
}

impl LoopTable {
    /// Column tags in declaration order, as written.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Rows in source order.
    pub fn rows(&self) -> &[AnnotatedRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the `loop_` keyword.
    pub fn position(&self) -> SourcePos {
        self.position
    }

    /// Index of a column, compared case-insensitively.
    pub fn column_index(&self, tag: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.eq_ignore_ascii_case(tag))
    }

    /// Returns true if the table declares `tag`.
    pub fn has_column(&self, tag: &str) -> bool {
        self.column_index(tag).is_some()
    }

    /// Returns true if any column starts with `prefix` (case-insensitive).
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.columns.iter().any(|c| {
            c.len() >= prefix.len() && c.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
        })
    }

    /// Returns true for tables carrying fractional atom coordinates.
    pub fn is_atom_site(&self) -> bool {
        self.has_column(ATOM_SITE_MARKER)
    }

    /// All values of one column, top to bottom.
    pub fn column(&self, tag: &str) -> Option<Vec<&ScalarValue>> {
        let index = self.column_index(tag)?;
        Some(self.rows.iter().map(|row| &row.values[index]).collect())
    }

    /// Value at `row` in column `tag`.
    pub fn value(&self, row: usize, tag: &str) -> Option<&ScalarValue> {
        let index = self.column_index(tag)?;
        self.rows.get(row)?.get(index)
    }

    pub(crate) fn write_to(&self, out: &mut String) {
        for lexeme in &self.header {
            lexeme.write_to(out);
        }
        for row in &self.rows {
            row.write_to(out);
        }
    }
}

/// Result of reading one loop: the table plus comment lines that followed the
/// last row and belong to the enclosing block.
#[derive(Debug)]
pub(crate) struct ParsedLoop {
    pub table: LoopTable,
    pub trailing_comments: Vec<Lexeme>,
}

fn comment_text(raw: &str) -> &str {
    raw.trim()
}

/// Reads a loop whose `loop_` keyword has just been consumed.
pub(crate) fn parse_loop(
    marker: Lexeme,
    stream: &mut TokenStream<'_>,
    limits: &Limits,
) -> CifResult<ParsedLoop> {
    let position = marker.position();
    let mut header = vec![marker];
    let mut columns: Vec<String> = Vec::new();

    // Comments between column tags belong to the header; comments after the
    // last tag annotate the first row.
    let mut held: Vec<Token<'_>> = Vec::new();
    while let Some(token) = stream.peek()? {
        match token.kind {
            TokenKind::Tag(tag) => {
                if columns.len() >= limits.max_columns {
                    return Err(CifError::security(
                        format!("loop declares more than {} columns", limits.max_columns),
                        0,
                    )
                    .at(token.position()));
                }
                columns.push(tag.to_string());
                header.extend(held.drain(..).map(|t| Lexeme::from(&t)));
                header.push(Lexeme::from(&token));
            }
            TokenKind::CommentLine(_) => held.push(token),
            _ => break,
        }
        stream.advance();
    }
    if columns.is_empty() {
        return Err(CifError::parse("loop_ declares no columns", 0).at(position));
    }

    let width = columns.len();
    let mut rows: Vec<AnnotatedRow> = Vec::new();
    let mut pending_lexemes: Vec<Lexeme> = held.iter().map(Lexeme::from).collect();
    let mut pending_text: Vec<&str> = held
        .iter()
        .filter_map(|t| match t.kind {
            TokenKind::CommentLine(text) => Some(comment_text(text)),
            _ => None,
        })
        .collect();
    let mut current: Option<AnnotatedRow> = None;

    while let Some(token) = stream.peek()? {
        match token.kind {
            TokenKind::CommentLine(text) => {
                stream.advance();
                match current.as_mut() {
                    // Mid-row comments are kept for output only.
                    Some(row) => row.lexemes.push(Lexeme::from(&token)),
                    None => {
                        pending_lexemes.push(Lexeme::from(&token));
                        pending_text.push(comment_text(text));
                    }
                }
            }
            kind if kind.is_value() => {
                stream.advance();
                let value = normalize(&token)?;
                let row = current.get_or_insert_with(|| {
                    let comment = if pending_text.is_empty() {
                        None
                    } else {
                        Some(pending_text.join("\n"))
                    };
                    pending_text.clear();
                    AnnotatedRow {
                        comment,
                        values: Vec::with_capacity(width),
                        position: token.position(),
                        lexemes: std::mem::take(&mut pending_lexemes),
                    }
                });
                row.values.push(value);
                row.lexemes.push(Lexeme::from(&token));

                if row.values.len() == width {
                    if rows.len() >= limits.max_rows {
                        return Err(CifError::security(
                            format!("loop has more than {} rows", limits.max_rows),
                            0,
                        )
                        .at(row.position));
                    }
                    if let Some(row) = current.take() {
                        rows.push(row);
                    }
                }
            }
            _ => break,
        }
    }

    if let Some(row) = current {
        return Err(CifError::parse(
            format!(
                "loop row has {} of {} values; value count is not a multiple of the column count",
                row.values.len(),
                width
            ),
            0,
        )
        .at(row.position));
    }

    trace!(
        columns = width,
        rows = rows.len(),
        line = position.line(),
        "parsed loop table"
    );

    Ok(ParsedLoop {
        table: LoopTable {
            columns,
            rows,
            position,
            header,
        },
        trailing_comments: pending_lexemes,
    })
}
