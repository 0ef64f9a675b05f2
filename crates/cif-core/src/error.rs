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

//! Structural error types for CIF parsing.
//!
//! Grammatically valid input that breaks a domain invariant is not an error;
//! see [`Warning`](crate::Warning).

use std::fmt;
use thiserror::Error;

use crate::lex::{LexError, SourcePos};

/// The kind of structural error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CifErrorKind {
    /// Unterminated text block or quote; aborts the whole document.
    Lex,
    /// Input does not follow the block/loop/tag grammar.
    Parse,
    /// A numeric value carries a non-numeric uncertainty.
    Value,
    /// Lookup of a block name that the document does not contain.
    BlockNotFound,
    /// A configured resource limit was exceeded.
    Security,
    /// I/O failure in a caller-provided reader.
    Io,
}

impl fmt::Display for CifErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lex => write!(f, "LexError"),
            Self::Parse => write!(f, "ParseError"),
            Self::Value => write!(f, "ValueError"),
            Self::BlockNotFound => write!(f, "BlockNotFoundError"),
            Self::Security => write!(f, "SecurityError"),
            Self::Io => write!(f, "IOError"),
        }
    }
}

/// An error raised while parsing or querying a CIF document.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{kind} at line {line}: {message}")]
pub struct CifError {
    /// The kind of error.
    pub kind: CifErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Line number (1-based, 0 when no source position applies).
    pub line: usize,
    /// Column number (1-based, optional).
    pub column: Option<usize>,
    /// Additional context (e.g., "in block sm_isp_SD1601634-published_cell").
    pub context: Option<String>,
}

impl CifError {
    /// Create a new error.
    pub fn new(kind: CifErrorKind, message: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            line,
            column: None,
            context: None,
        }
    }

    /// Add column information.
    pub fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    /// Add line and column from a source position.
    pub fn at(mut self, pos: SourcePos) -> Self {
        self.line = pos.line();
        self.column = Some(pos.column());
        self
    }

    /// Add context information.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Source position, when the error has a column.
    pub fn position(&self) -> Option<SourcePos> {
        self.column.map(|column| SourcePos::new(self.line, column))
    }

    /// Returns true for errors that abort only the enclosing block.
    pub fn is_block_local(&self) -> bool {
        matches!(self.kind, CifErrorKind::Parse | CifErrorKind::Value)
    }

    // Convenience constructors for each error kind
    pub fn lex(message: impl Into<String>, line: usize) -> Self {
        Self::new(CifErrorKind::Lex, message, line)
    }

    pub fn parse(message: impl Into<String>, line: usize) -> Self {
        Self::new(CifErrorKind::Parse, message, line)
    }

    pub fn value(message: impl Into<String>, line: usize) -> Self {
        Self::new(CifErrorKind::Value, message, line)
    }

    pub fn block_not_found(name: &str) -> Self {
        Self::new(
            CifErrorKind::BlockNotFound,
            format!("no data block named '{}'", name),
            0,
        )
    }

    pub fn security(message: impl Into<String>, line: usize) -> Self {
        Self::new(CifErrorKind::Security, message, line)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(CifErrorKind::Io, message, 0)
    }
}

impl From<LexError> for CifError {
    fn from(err: LexError) -> Self {
        let pos = err.position();
        let kind = match err {
            LexError::TextBlockTooLarge { .. } => CifErrorKind::Security,
            _ => CifErrorKind::Lex,
        };
        Self::new(kind, err.to_string(), pos.line()).with_column(pos.column())
    }
}

/// Result type for CIF operations.
pub type CifResult<T> = Result<T, CifError>;

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== CifErrorKind Display tests ====================

    #[test]
    fn test_error_kind_display() {
        assert_eq!(CifErrorKind::Lex.to_string(), "LexError");
        assert_eq!(CifErrorKind::Parse.to_string(), "ParseError");
        assert_eq!(CifErrorKind::Value.to_string(), "ValueError");
        assert_eq!(
            CifErrorKind::BlockNotFound.to_string(),
            "BlockNotFoundError"
        );
        assert_eq!(CifErrorKind::Security.to_string(), "SecurityError");
        assert_eq!(CifErrorKind::Io.to_string(), "IOError");
    }

    // ==================== CifError tests ====================

    #[test]
    fn test_error_display() {
        let err = CifError::parse("tag '_cell_volume' has no value", 42);
        let msg = err.to_string();
        assert!(msg.contains("ParseError"));
        assert!(msg.contains("line 42"));
        assert!(msg.contains("_cell_volume"));
    }

    #[test]
    fn test_error_at_position() {
        let err = CifError::value("bad uncertainty", 0).at(SourcePos::new(7, 16));
        assert_eq!(err.line, 7);
        assert_eq!(err.column, Some(16));
        assert_eq!(err.position(), Some(SourcePos::new(7, 16)));
    }

    #[test]
    fn test_error_with_context() {
        let err = CifError::parse("x", 1).with_context("in block b");
        assert_eq!(err.context.as_deref(), Some("in block b"));
    }

    #[test]
    fn test_block_not_found_message() {
        let err = CifError::block_not_found("missing");
        assert_eq!(err.kind, CifErrorKind::BlockNotFound);
        assert!(err.message.contains("missing"));
    }

    #[test]
    fn test_block_local_kinds() {
        assert!(CifError::parse("x", 1).is_block_local());
        assert!(CifError::value("x", 1).is_block_local());
        assert!(!CifError::lex("x", 1).is_block_local());
        assert!(!CifError::security("x", 1).is_block_local());
    }

    // ==================== Conversion tests ====================

    #[test]
    fn test_from_lex_error() {
        let err: CifError = LexError::UnterminatedTextBlock {
            pos: SourcePos::new(9, 1),
        }
        .into();
        assert_eq!(err.kind, CifErrorKind::Lex);
        assert_eq!(err.line, 9);
        assert_eq!(err.column, Some(1));
    }

    #[test]
    fn test_from_text_block_limit_is_security() {
        let err: CifError = LexError::TextBlockTooLarge {
            size: 11,
            max: 10,
            pos: SourcePos::new(1, 1),
        }
        .into();
        assert_eq!(err.kind, CifErrorKind::Security);
    }

    #[test]
    fn test_error_is_std_error() {
        fn accepts_error<E: std::error::Error>(_: E) {}
        accepts_error(CifError::parse("test", 1));
    }
}
