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

//! Lazy, single-pass CIF tokenizer.
//!
//! The tokenizer never allocates: every [`Token`] borrows from the input.
//! Whitespace outside quoted and text constructs separates tokens and is
//! handed out as the `leading` slice of the following token, so the input can
//! be reassembled byte for byte.
//!
//! # Examples
//!
//! ```
//! use cif_core::lex::{TokenKind, Tokenizer};
//!
//! let kinds: Vec<_> = Tokenizer::new("data_x\n_cell_length_a 9.143(2)\n")
//!     .map(|t| t.unwrap().kind)
//!     .collect();
//! assert_eq!(
//!     kinds,
//!     vec![
//!         TokenKind::DataHeader("x"),
//!         TokenKind::Tag("_cell_length_a"),
//!         TokenKind::BareValue("9.143(2)"),
//!     ]
//! );
//! ```

use memchr::memchr;

use crate::lex::error::{LexError, LexResult};
use crate::lex::span::{SourcePos, Span};
use crate::lex::token::{Token, TokenKind};

/// Iterator over the tokens of a CIF text.
///
/// After the first error the iterator is fused and yields `None`.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    cursor: SourcePos,
    max_text_block_size: usize,
    trailing: &'a str,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer over `input` with no text block size limit.
    pub fn new(input: &'a str) -> Self {
        Self::with_text_block_limit(input, usize::MAX)
    }

    /// Creates a tokenizer that rejects text blocks larger than `max` bytes.
    pub fn with_text_block_limit(input: &'a str, max: usize) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            cursor: SourcePos::start(),
            max_text_block_size: max,
            trailing: "",
            finished: false,
        }
    }

    /// Whitespace after the last token; only meaningful once iteration ended.
    pub fn trailing(&self) -> &'a str {
        self.trailing
    }

    /// Current position (start of the next unread character).
    pub fn position(&self) -> SourcePos {
        self.cursor
    }

    fn at_line_start(&self) -> bool {
        self.pos == 0 || self.bytes[self.pos - 1] == b'\n'
    }

    fn skip_whitespace(&mut self) -> &'a str {
        let start = self.pos;
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        let leading = &self.input[start..self.pos];
        self.cursor.advance_over(leading);
        leading
    }

    fn scan(&mut self) -> LexResult<Option<Token<'a>>> {
        let leading = self.skip_whitespace();
        if self.pos >= self.bytes.len() {
            self.trailing = leading;
            return Ok(None);
        }

        let start = self.pos;
        let start_pos = self.cursor;
        let kind = match self.bytes[start] {
            b';' if self.at_line_start() => self.scan_text_block(start_pos)?,
            b'#' => self.scan_comment(),
            quote @ (b'\'' | b'"') => self.scan_quoted(quote as char, start_pos)?,
            _ => self.scan_bare(),
        };

        let raw = &self.input[start..self.pos];
        self.cursor.advance_over(raw);
        Ok(Some(Token {
            kind,
            leading,
            raw,
            span: Span::new(start_pos, self.cursor),
        }))
    }

    fn scan_comment(&mut self) -> TokenKind<'a> {
        let start = self.pos;
        let end = memchr(b'\n', &self.bytes[start..])
            .map(|offset| start + offset)
            .unwrap_or(self.bytes.len());
        // A CRLF line ending belongs to the whitespace, not the comment.
        let end = if end > start && self.bytes[end - 1] == b'\r' {
            end - 1
        } else {
            end
        };
        self.pos = end;
        TokenKind::CommentLine(&self.input[start + 1..end])
    }

    fn scan_quoted(&mut self, quote: char, start_pos: SourcePos) -> LexResult<TokenKind<'a>> {
        let open = self.pos;
        let mut i = open + 1;
        while i < self.bytes.len() {
            let b = self.bytes[i];
            if b == b'\n' {
                break;
            }
            if b == quote as u8 {
                let closes = i + 1 >= self.bytes.len() || self.bytes[i + 1].is_ascii_whitespace();
                if closes {
                    self.pos = i + 1;
                    return Ok(TokenKind::QuotedValue {
                        text: &self.input[open + 1..i],
                        quote,
                    });
                }
            }
            i += 1;
        }
        Err(LexError::UnterminatedQuote {
            quote,
            pos: start_pos,
        })
    }

    fn scan_text_block(&mut self, start_pos: SourcePos) -> LexResult<TokenKind<'a>> {
        let content_start = self.pos + 1;
        let mut search = content_start;
        loop {
            let newline = match memchr(b'\n', &self.bytes[search..]) {
                Some(offset) => search + offset,
                None => return Err(LexError::UnterminatedTextBlock { pos: start_pos }),
            };
            let size = newline - content_start;
            if size > self.max_text_block_size {
                return Err(LexError::TextBlockTooLarge {
                    size,
                    max: self.max_text_block_size,
                    pos: start_pos,
                });
            }
            if self.bytes.get(newline + 1) == Some(&b';') {
                self.pos = newline + 2;
                return Ok(TokenKind::TextBlock(&self.input[content_start..newline]));
            }
            search = newline + 1;
        }
    }

    fn scan_bare(&mut self) -> TokenKind<'a> {
        let start = self.pos;
        while self.pos < self.bytes.len() && !self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        classify_bare(&self.input[start..self.pos])
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = LexResult<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.scan() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl std::iter::FusedIterator for Tokenizer<'_> {}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len() && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

fn classify_bare(word: &str) -> TokenKind<'_> {
    if starts_with_ignore_case(word, "data_") {
        TokenKind::DataHeader(&word[5..])
    } else if word.eq_ignore_ascii_case("loop_") {
        TokenKind::LoopMarker
    } else if starts_with_ignore_case(word, "save_")
        || word.eq_ignore_ascii_case("global_")
        || word.eq_ignore_ascii_case("stop_")
    {
        TokenKind::Reserved(word)
    } else if word.starts_with('_') {
        TokenKind::Tag(word)
    } else {
        TokenKind::BareValue(word)
    }
}
