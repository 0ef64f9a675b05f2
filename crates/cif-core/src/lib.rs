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

//! Core parser and data model for CIF 1.1 documents.
//!
//! This crate turns Crystallographic Information File text into an immutable
//! [`Document`] of named [`Block`]s. Scalars become [`ScalarValue`]s that keep
//! standard uncertainties and the `?`/`.` sentinels apart from real data;
//! atom-site loops are additionally exposed as [`AtomSite`]s grouped into
//! [`DisorderGroup`]s, and cell tags as [`CellParameters`].
//!
//! Parsing is lossless: [`Document::serialize`] reproduces the input byte for
//! byte, comments and quoting included.
//!
//! # Examples
//!
//! ```
//! use cif_core::{parse, ScalarValue};
//!
//! let doc = parse("data_x-published_cell\n_cell_length_a 9.143(2)\n").unwrap();
//! let a = doc.tag("x-published_cell", "_cell_length_a").unwrap().unwrap();
//! assert_eq!(a, &ScalarValue::measured(9.143, 0.002));
//! assert_eq!(doc.serialize(), "data_x-published_cell\n_cell_length_a 9.143(2)\n");
//! ```
//!
//! # Lexical Analysis
//!
//! The [`lex`] module exposes the lazy [`Tokenizer`](lex::Tokenizer) on its
//! own, for tools that need tokens with positions rather than a model.

pub mod atom;
mod block;
pub mod cell;
pub mod disorder;
mod document;
mod error;
pub mod lex;
mod limits;
mod loop_table;
pub mod normalize;
mod parser;
mod value;
mod warning;
pub mod writer;

pub use atom::AtomSite;
pub use block::{Block, BlockItem, DataItem, Entry};
pub use cell::{CellParameters, CellVariant};
pub use disorder::DisorderGroup;
pub use document::{Document, SkippedBlock};
pub use error::{CifError, CifErrorKind, CifResult};
pub use limits::Limits;
pub use loop_table::{AnnotatedRow, LoopTable, ATOM_SITE_MARKER};
pub use parser::{parse, parse_with_options, ParseOptions, ParseOptionsBuilder};
pub use value::{format_measurement, ScalarValue};
pub use warning::Warning;
pub use writer::{serialize, serialize_block};
