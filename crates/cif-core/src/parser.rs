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

//! Block parser and document assembly.
//!
//! # Security Limits
//!
//! The parser enforces the [`Limits`] carried by [`ParseOptions`]:
//!
//! - `max_file_size`: Maximum input size (default: 256MB)
//! - `max_blocks`: Maximum number of data blocks (default: 10k)
//! - `max_tags_per_block`: Maximum distinct tags per block (default: 100k)
//! - `max_columns`: Maximum columns per loop (default: 1k)
//! - `max_rows`: Maximum rows per loop (default: 10M)
//! - `max_text_block_size`: Maximum `;` text block size (default: 16MB)
//!
//! # Error recovery
//!
//! In strict mode the first structural error is returned. In lenient mode a
//! `Parse` or `Value` error discards only the block it occurs in; parsing
//! resumes at the next `data_` header and the discarded block is listed in
//! [`Document::skipped`]. Lexical errors always abort the whole document,
//! since the token boundaries after them cannot be trusted.

use tracing::{debug, warn};

use crate::block::{Block, DataItem};
use crate::disorder::{DEFAULT_COORDINATE_TOLERANCE, DEFAULT_OCCUPANCY_EPSILON};
use crate::document::{Document, SkippedBlock};
use crate::error::{CifError, CifResult};
use crate::lex::{Lexeme, Token, TokenKind, Tokenizer};
use crate::limits::Limits;
use crate::loop_table::parse_loop;
use crate::normalize::normalize;

/// Options controlling a parse.
///
/// # Examples
///
/// ```
/// use cif_core::ParseOptions;
///
/// let opts = ParseOptions::builder()
///     .lenient(true)
///     .coordinate_tolerance(1e-3)
///     .max_rows(50_000)
///     .build();
/// assert!(opts.lenient);
/// assert_eq!(opts.limits.max_rows, 50_000);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOptions {
    /// Security limits.
    pub limits: Limits,
    /// Skip blocks with structural errors instead of failing.
    pub lenient: bool,
    /// Maximum coordinate difference for two sites to share a position.
    pub coordinate_tolerance: f64,
    /// Slack above a total occupancy of one before a group overflows.
    pub occupancy_epsilon: f64,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            lenient: false,
            coordinate_tolerance: DEFAULT_COORDINATE_TOLERANCE,
            occupancy_epsilon: DEFAULT_OCCUPANCY_EPSILON,
        }
    }
}

impl ParseOptions {
    /// Create a new builder for ParseOptions.
    pub fn builder() -> ParseOptionsBuilder {
        ParseOptionsBuilder::new()
    }
}

/// Builder for ergonomic construction of ParseOptions.
#[derive(Debug, Clone)]
pub struct ParseOptionsBuilder {
    options: ParseOptions,
}

impl ParseOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: ParseOptions::default(),
        }
    }

    /// Replace all limits at once.
    pub fn limits(mut self, limits: Limits) -> Self {
        self.options.limits = limits;
        self
    }

    /// Set lenient block recovery (default: false).
    pub fn lenient(mut self, lenient: bool) -> Self {
        self.options.lenient = lenient;
        self
    }

    /// Set the coordinate tolerance for disorder grouping (default: 1e-4).
    pub fn coordinate_tolerance(mut self, tolerance: f64) -> Self {
        self.options.coordinate_tolerance = tolerance;
        self
    }

    /// Set the occupancy slack for disorder groups (default: 1e-6).
    pub fn occupancy_epsilon(mut self, epsilon: f64) -> Self {
        self.options.occupancy_epsilon = epsilon;
        self
    }

    /// Set the maximum input size in bytes (default: 256MB).
    pub fn max_file_size(mut self, size: usize) -> Self {
        self.options.limits.max_file_size = size;
        self
    }

    /// Set the maximum number of blocks (default: 10k).
    pub fn max_blocks(mut self, count: usize) -> Self {
        self.options.limits.max_blocks = count;
        self
    }

    /// Set the maximum distinct tags per block (default: 100k).
    pub fn max_tags_per_block(mut self, count: usize) -> Self {
        self.options.limits.max_tags_per_block = count;
        self
    }

    /// Set the maximum columns per loop (default: 1k).
    pub fn max_columns(mut self, count: usize) -> Self {
        self.options.limits.max_columns = count;
        self
    }

    /// Set the maximum rows per loop (default: 10M).
    pub fn max_rows(mut self, count: usize) -> Self {
        self.options.limits.max_rows = count;
        self
    }

    /// Set the maximum text block size in bytes (default: 16MB).
    pub fn max_text_block_size(mut self, size: usize) -> Self {
        self.options.limits.max_text_block_size = size;
        self
    }

    /// Build the ParseOptions.
    pub fn build(self) -> ParseOptions {
        self.options
    }
}

impl Default for ParseOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// --- Token stream ---

/// Tokenizer with one token of lookahead.
pub(crate) struct TokenStream<'a> {
    tokens: Tokenizer<'a>,
    peeked: Option<Token<'a>>,
}

impl<'a> TokenStream<'a> {
    pub(crate) fn new(input: &'a str, max_text_block_size: usize) -> Self {
        Self {
            tokens: Tokenizer::with_text_block_limit(input, max_text_block_size),
            peeked: None,
        }
    }

    pub(crate) fn peek(&mut self) -> CifResult<Option<Token<'a>>> {
        if self.peeked.is_none() {
            self.peeked = self.tokens.next().transpose()?;
        }
        Ok(self.peeked)
    }

    /// Drops the peeked token.
    pub(crate) fn advance(&mut self) {
        self.peeked = None;
    }

    pub(crate) fn next_token(&mut self) -> CifResult<Option<Token<'a>>> {
        match self.peeked.take() {
            Some(token) => Ok(Some(token)),
            None => Ok(self.tokens.next().transpose()?),
        }
    }

    pub(crate) fn trailing(&self) -> &'a str {
        self.tokens.trailing()
    }
}

// --- Entry points ---

/// Parse a CIF document with default options.
pub fn parse(input: &str) -> CifResult<Document> {
    parse_with_options(input, ParseOptions::default())
}

/// Parse a CIF document with custom options.
pub fn parse_with_options(input: &str, options: ParseOptions) -> CifResult<Document> {
    let limits = &options.limits;
    if input.len() > limits.max_file_size {
        return Err(CifError::security(
            format!(
                "input size {} exceeds limit {}",
                input.len(),
                limits.max_file_size
            ),
            0,
        ));
    }

    let mut stream = TokenStream::new(input, limits.max_text_block_size);
    let preamble = parse_preamble(&mut stream)?;
    let mut doc = Document::new(preamble);

    while let Some(header) = stream.next_token()? {
        let name = match header.kind {
            TokenKind::DataHeader(name) => name,
            // parse_block stops only at headers or end of input
            other => {
                return Err(CifError::parse(format!("unexpected {}", other.describe()), 0)
                    .at(header.position()))
            }
        };
        if doc.blocks().len() + doc.skipped().len() >= limits.max_blocks {
            return Err(CifError::security(
                format!("document has more than {} blocks", limits.max_blocks),
                0,
            )
            .at(header.position()));
        }

        let result = parse_block(&header, name, &mut stream, &options)
            .and_then(|block| doc.push_block(block));
        match result {
            Ok(()) => {}
            Err(err) if options.lenient && err.is_block_local() => {
                warn!(block = name, error = %err, "skipping malformed block");
                skip_to_next_block(&mut stream)?;
                doc.push_skipped(SkippedBlock {
                    name: name.to_string(),
                    error: err,
                });
            }
            Err(err) => return Err(err.with_context(format!("in block data_{}", name))),
        }
    }

    doc.set_trailing(stream.trailing());
    debug!(
        blocks = doc.blocks().len(),
        skipped = doc.skipped().len(),
        "parsed document"
    );
    Ok(doc)
}

/// Comment lines before the first `data_` header.
fn parse_preamble(stream: &mut TokenStream<'_>) -> CifResult<Vec<Lexeme>> {
    let mut preamble = Vec::new();
    while let Some(token) = stream.peek()? {
        match token.kind {
            TokenKind::CommentLine(_) => {
                stream.advance();
                preamble.push(Lexeme::from(&token));
            }
            TokenKind::DataHeader(_) => break,
            other => {
                return Err(CifError::parse(
                    format!("expected a data_ header, found {}", other.describe()),
                    0,
                )
                .at(token.position()))
            }
        }
    }
    Ok(preamble)
}

fn skip_to_next_block(stream: &mut TokenStream<'_>) -> CifResult<()> {
    while let Some(token) = stream.peek()? {
        if matches!(token.kind, TokenKind::DataHeader(_)) {
            break;
        }
        stream.advance();
    }
    Ok(())
}

// --- Block parsing ---

fn parse_block(
    header: &Token<'_>,
    name: &str,
    stream: &mut TokenStream<'_>,
    options: &ParseOptions,
) -> CifResult<Block> {
    if name.is_empty() {
        return Err(CifError::parse("data_ header without a block name", 0).at(header.position()));
    }

    let limits = &options.limits;
    let mut block = Block::new(name, Lexeme::from(header));

    while let Some(token) = stream.peek()? {
        match token.kind {
            TokenKind::DataHeader(_) => break,
            TokenKind::CommentLine(_) => {
                stream.advance();
                block.push_comment(Lexeme::from(&token));
            }
            TokenKind::Tag(tag) => {
                stream.advance();
                let item = parse_item(&token, tag, stream)?;
                block.push_item(item, limits)?;
            }
            TokenKind::LoopMarker => {
                stream.advance();
                let parsed = parse_loop(Lexeme::from(&token), stream, limits)?;
                block.push_loop(parsed.table, limits)?;
                for comment in parsed.trailing_comments {
                    block.push_comment(comment);
                }
            }
            TokenKind::Reserved(word) => {
                return Err(CifError::parse(
                    format!("reserved word '{}' is not allowed in a CIF 1.1 data block", word),
                    0,
                )
                .at(token.position()));
            }
            other => {
                return Err(CifError::parse(
                    format!("{} is not preceded by a tag", other.describe()),
                    0,
                )
                .at(token.position()));
            }
        }
    }

    Ok(block.finish(options))
}

/// Reads the value of a tag; comments may sit between the two.
fn parse_item(tag_token: &Token<'_>, tag: &str, stream: &mut TokenStream<'_>) -> CifResult<DataItem> {
    let mut lexemes = vec![Lexeme::from(tag_token)];
    loop {
        match stream.peek()? {
            Some(token) if matches!(token.kind, TokenKind::CommentLine(_)) => {
                stream.advance();
                lexemes.push(Lexeme::from(&token));
            }
            Some(token) if token.kind.is_value() => {
                stream.advance();
                let value = normalize(&token)?;
                lexemes.push(Lexeme::from(&token));
                return Ok(DataItem::new(tag.to_string(), value, lexemes));
            }
            _ => {
                return Err(CifError::parse(format!("tag '{}' has no value", tag), 0)
                    .at(tag_token.position()))
            }
        }
    }
}
