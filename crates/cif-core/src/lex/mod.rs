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

//! Lexical analysis for CIF 1.1 text.
//!
//! # Module Structure
//!
//! - [`error`] - [`LexError`], the only error that aborts a whole document
//! - [`span`] - Source positions attached to every token
//! - [`token`] - [`Token`], [`TokenKind`] and the owned [`Lexeme`]
//! - [`tokenizer`] - The lazy [`Tokenizer`] iterator
//!
//! # Examples
//!
//! ```
//! use cif_core::lex::{TokenKind, Tokenizer};
//!
//! let mut tokens = Tokenizer::new("_journal_coden_ASTM ?\n");
//! let tag = tokens.next().unwrap().unwrap();
//! assert_eq!(tag.kind, TokenKind::Tag("_journal_coden_ASTM"));
//! let value = tokens.next().unwrap().unwrap();
//! assert_eq!(value.kind, TokenKind::BareValue("?"));
//! assert!(tokens.next().is_none());
//! ```

pub mod error;
pub mod span;
pub mod token;
pub mod tokenizer;

pub use error::{LexError, LexResult};
pub use span::{SourcePos, Span};
pub use token::{Lexeme, Token, TokenKind};
pub use tokenizer::Tokenizer;
