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

//! Lexical errors.
//!
//! A lexical error means the token stream itself cannot be recovered, so it
//! always aborts the whole document, even in lenient mode.

use thiserror::Error;

pub use crate::lex::span::SourcePos;

/// Error raised by the [`Tokenizer`](crate::lex::Tokenizer).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LexError {
    /// A `;` text block was opened but the input ended before the closing `;` line.
    #[error("line {}, column {}: unterminated text block (no closing ';' line before end of input)", .pos.line(), .pos.column())]
    UnterminatedTextBlock { pos: SourcePos },

    /// A quoted value was not closed before the end of its line.
    #[error("line {}, column {}: unterminated {} quoted value", .pos.line(), .pos.column(), if *.quote == '\'' { "single" } else { "double" })]
    UnterminatedQuote { quote: char, pos: SourcePos },

    /// A text block exceeds the configured size limit.
    #[error("line {}, column {}: text block size {} exceeds maximum {}", .pos.line(), .pos.column(), .size, .max)]
    TextBlockTooLarge {
        size: usize,
        max: usize,
        pos: SourcePos,
    },
}

impl LexError {
    /// Position at which the offending construct starts.
    pub fn position(&self) -> SourcePos {
        match self {
            Self::UnterminatedTextBlock { pos }
            | Self::UnterminatedQuote { pos, .. }
            | Self::TextBlockTooLarge { pos, .. } => *pos,
        }
    }
}

/// Result type for lexical analysis.
pub type LexResult<T> = Result<T, LexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unterminated_text_block_message() {
        let err = LexError::UnterminatedTextBlock {
            pos: SourcePos::new(40, 1),
        };
        let msg = err.to_string();
        assert!(msg.contains("line 40"));
        assert!(msg.contains("unterminated text block"));
    }

    #[test]
    fn test_unterminated_quote_names_quote_style() {
        let single = LexError::UnterminatedQuote {
            quote: '\'',
            pos: SourcePos::new(1, 5),
        };
        let double = LexError::UnterminatedQuote {
            quote: '"',
            pos: SourcePos::new(1, 5),
        };
        assert!(single.to_string().contains("single"));
        assert!(double.to_string().contains("double"));
    }

    #[test]
    fn test_position_accessor() {
        let err = LexError::TextBlockTooLarge {
            size: 10,
            max: 5,
            pos: SourcePos::new(2, 1),
        };
        assert_eq!(err.position(), SourcePos::new(2, 1));
    }
}
