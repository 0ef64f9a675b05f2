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

//! # CIF - Crystallographic Information File toolkit
//!
//! Parses CIF 1.1 materials records into an immutable document model,
//! writes them back byte for byte or in canonical form, and lints them
//! against the invariants of the model.
//!
//! ## Quick Start
//!
//! ```rust
//! use cif::{parse, canonicalize, lint, CellVariant};
//!
//! let text = "\
//! data_sm_isp_SD1601634-published_cell
//! _cell_length_a   9.143(2)
//! _cell_volume     437.2(2)
//! _space_group_IT_number 12
//! ";
//!
//! let doc = parse(text).expect("valid CIF");
//! let block = doc.variant(CellVariant::Published).unwrap();
//! assert_eq!(block.cell().a.uncertainty(), Some(0.002));
//!
//! // Byte-exact round trip
//! assert_eq!(cif::serialize(&doc), text);
//!
//! // Canonical form respells values and normalizes layout
//! assert!(canonicalize(&doc).contains("_cell_length_a 9.143(2)"));
//!
//! assert!(lint(&doc).is_empty());
//! ```
//!
//! ## Modules
//!
//! - [`lex`]: Tokenizer and source positions
//! - [`c14n`](mod@c14n): Canonical writer
//! - [`lint`](mod@lint): Rule-based diagnostics

pub use cif_core::{
    // Functions
    format_measurement,
    parse as core_parse,
    parse_with_options,
    // Model
    AnnotatedRow,
    AtomSite,
    Block,
    BlockItem,
    CellParameters,
    CellVariant,
    DataItem,
    DisorderGroup,
    Document,
    Entry,
    LoopTable,
    ScalarValue,
    SkippedBlock,
    Warning,
    ATOM_SITE_MARKER,
    // Errors
    CifError,
    CifErrorKind,
    CifResult,
    // Parser
    Limits,
    ParseOptions,
    ParseOptionsBuilder,
};

mod error_ext;
pub use error_ext::CifResultExt;

pub mod lex {
    //! Lexical analysis utilities
    pub use cif_core::lex::{LexError, Lexeme, SourcePos, Span, Token, TokenKind, Tokenizer};
}

pub mod c14n {
    //! Canonicalization utilities
    pub use cif_c14n::{
        canonicalize, canonicalize_block, canonicalize_with_config, CanonicalConfig,
        CanonicalConfigBuilder, CanonicalWriter, QuotingStrategy,
    };
}

pub mod lint {
    //! Linting utilities
    pub use cif_lint::{
        lint, lint_with_config, ConfigError, Diagnostic, DiagnosticKind, LintConfig, LintRule,
        LintRunner, RuleConfig, Severity,
    };
}

/// Parse a CIF document in strict mode.
///
/// The first structural error aborts the parse.
///
/// # Examples
///
/// ```rust
/// let doc = cif::parse("data_a\n_cell_angle_beta 115.3(1)\n").unwrap();
/// assert_eq!(doc.tag("a", "_cell_angle_beta").unwrap().unwrap().magnitude(), Some(115.3));
/// ```
#[inline]
pub fn parse(input: &str) -> CifResult<Document> {
    cif_core::parse(input)
}

/// Parse a CIF document, dropping blocks that fail to parse.
///
/// Dropped blocks are listed in [`Document::skipped`]. Lexical errors and
/// exceeded limits still fail the whole parse.
///
/// ```rust
/// let doc = cif::parse_lenient("data_a\n_x 1\ndata_b\n_y\ndata_c\n_z 3\n").unwrap();
/// assert_eq!(doc.blocks().len(), 2);
/// assert_eq!(doc.skipped()[0].name, "b");
/// ```
#[inline]
pub fn parse_lenient(input: &str) -> CifResult<Document> {
    let options = ParseOptions::builder().lenient(true).build();
    cif_core::parse_with_options(input, options)
}

/// Read all of `reader` and parse it in strict mode.
///
/// Read failures and non-UTF-8 input are reported as `Io` errors.
///
/// ```rust
/// let doc = cif::parse_reader("data_a\n_x 1\n".as_bytes()).unwrap();
/// assert_eq!(doc.blocks().len(), 1);
/// ```
pub fn parse_reader<R: std::io::Read>(mut reader: R) -> CifResult<Document> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .context("while reading CIF input")?;
    parse(&text)
}

/// Write a document back as CIF text, byte for byte as parsed.
#[inline]
pub fn serialize(doc: &Document) -> String {
    doc.serialize()
}

/// Write one block back as CIF text, from its `data_` header to its last
/// entry.
///
/// ```rust
/// let doc = cif::parse("data_a\n_x 1\n\ndata_b\n_y  2(1)\n").unwrap();
/// let block = doc.block("b").unwrap();
/// assert_eq!(cif::serialize_block(block), "\n\ndata_b\n_y  2(1)");
/// ```
#[inline]
pub fn serialize_block(block: &Block) -> String {
    cif_core::serialize_block(block)
}

/// Canonicalize a document with the default configuration.
///
/// ```rust
/// let doc = cif::parse("data_a\n_w   '4i'\n").unwrap();
/// assert_eq!(cif::canonicalize(&doc), "data_a\n_w 4i\n");
/// ```
#[inline]
pub fn canonicalize(doc: &Document) -> String {
    cif_c14n::canonicalize(doc)
}

/// Lint a document with the default rules.
#[inline]
pub fn lint(doc: &Document) -> Vec<lint::Diagnostic> {
    cif_lint::lint(doc)
}

/// Check that `input` parses in strict mode.
#[inline]
pub fn validate(input: &str) -> CifResult<()> {
    parse(input).map(|_| ())
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let doc = parse("data_a\n").unwrap();
        assert_eq!(doc.blocks()[0].name(), "a");
    }

    #[test]
    fn test_validate() {
        assert!(validate("data_a\n_x 1\n").is_ok());
        let err = validate("data_a\n_x\n").unwrap_err();
        assert_eq!(err.kind, CifErrorKind::Parse);
    }

    #[test]
    fn test_parse_reader_invalid_utf8() {
        let bytes: &[u8] = &[b'd', 0xff, 0xfe];
        let err = parse_reader(bytes).unwrap_err();
        assert_eq!(err.kind, CifErrorKind::Io);
        assert_eq!(err.context.as_deref(), Some("while reading CIF input"));
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
