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

//! Token and lexeme types.

use crate::lex::span::{SourcePos, Span};

/// The lexical category of a token, borrowing its payload from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    /// `data_NAME` header; carries `NAME`.
    DataHeader(&'a str),
    /// The `loop_` keyword.
    LoopMarker,
    /// A data name such as `_cell_length_a`.
    Tag(&'a str),
    /// An unquoted value.
    BareValue(&'a str),
    /// A single- or double-quoted value; carries the text between the quotes.
    QuotedValue { text: &'a str, quote: char },
    /// Content between an opening `;` line and the closing `;` line, verbatim.
    ///
    /// The newline that precedes the closing `;` is not part of the content.
    TextBlock(&'a str),
    /// A `#` comment; carries the text after the `#`.
    CommentLine(&'a str),
    /// A reserved word (`save_`, `global_`, `stop_`) that CIF 1.1 data files
    /// must not contain.
    Reserved(&'a str),
}

impl<'a> TokenKind<'a> {
    /// Returns true for tokens that can stand in a value position.
    pub fn is_value(&self) -> bool {
        matches!(
            self,
            Self::BareValue(_) | Self::QuotedValue { .. } | Self::TextBlock(_)
        )
    }

    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::DataHeader(name) => format!("data block header 'data_{}'", name),
            Self::LoopMarker => "'loop_'".to_string(),
            Self::Tag(tag) => format!("tag '{}'", tag),
            Self::BareValue(v) => format!("value '{}'", v),
            Self::QuotedValue { text, quote } => format!("value {}{}{}", quote, text, quote),
            Self::TextBlock(_) => "text block".to_string(),
            Self::CommentLine(_) => "comment".to_string(),
            Self::Reserved(word) => format!("reserved word '{}'", word),
        }
    }
}

/// A token together with the whitespace that preceded it and its raw text.
///
/// `leading` + `raw` of all tokens, followed by the tokenizer's trailing
/// whitespace, reproduces the input exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub leading: &'a str,
    pub raw: &'a str,
    pub span: Span,
}

impl<'a> Token<'a> {
    /// Start position of the token.
    #[inline]
    pub fn position(&self) -> SourcePos {
        self.span.start()
    }
}

/// Owned copy of a token's source text, kept in the document model so the
/// original bytes can be written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Lexeme {
    /// Whitespace preceding the token.
    pub leading: String,
    /// The token exactly as written.
    pub raw: String,
    /// Where the token sits in the source.
    pub span: Span,
}

impl Lexeme {
    /// Appends `leading` and `raw` to `out`.
    #[inline]
    pub fn write_to(&self, out: &mut String) {
        out.push_str(&self.leading);
        out.push_str(&self.raw);
    }

    /// Start position of the underlying token.
    #[inline]
    pub fn position(&self) -> SourcePos {
        self.span.start()
    }
}

impl From<&Token<'_>> for Lexeme {
    fn from(token: &Token<'_>) -> Self {
        Self {
            leading: token.leading.to_string(),
            raw: token.raw.to_string(),
            span: token.span,
        }
    }
}
