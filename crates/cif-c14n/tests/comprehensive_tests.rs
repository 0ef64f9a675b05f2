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

//! Integration tests for canonical CIF output.
//!
//! - Round-trip: parse(canonicalize(doc)) keeps values, loops, annotations
//! - Idempotency: canonicalizing canonical output changes nothing
//! - Quoting strategies and layout options

use cif_c14n::{canonicalize, canonicalize_with_config, CanonicalConfig, QuotingStrategy};
use cif_core::{parse, CellVariant, Document, Entry};
use cif_test::fixtures::{self, STANDARDIZED};

/// Flattens everything canonical output must preserve into comparable lines.
fn semantics(doc: &Document) -> Vec<String> {
    let mut out: Vec<String> = doc.preamble().map(|c| format!("preamble {}", c)).collect();
    for block in doc.blocks() {
        out.push(format!("block {}", block.name()));
        for entry in block.entries() {
            match entry {
                Entry::Item(item) => out.push(format!("item {} = {:?}", item.tag(), item.value())),
                Entry::Loop(table) => {
                    out.push(format!("loop {:?}", table.columns()));
                    for row in table.rows() {
                        out.push(format!("row {:?} {:?}", row.comment(), row.values()));
                    }
                }
                Entry::Comment(lexeme) => out.push(format!("comment {}", lexeme.raw)),
            }
        }
        for group in block.disorder_groups() {
            out.push(format!("group {:?} {:?}", group.labels(), group.annotation()));
        }
        for warning in block.warnings() {
            out.push(format!("warning {}", warning.code()));
        }
    }
    out
}

fn reparse(text: &str) -> Document {
    match parse(text) {
        Ok(doc) => doc,
        Err(e) => panic!("canonical output failed to parse: {}\n{}", e, text),
    }
}

// =============================================================================
// Sample document
// =============================================================================

#[test]
fn test_sample_round_trip_preserves_semantics() {
    let doc = parse(fixtures::sd1601634()).unwrap();
    let canonical = canonicalize(&doc);
    let reparsed = reparse(&canonical);
    assert_eq!(semantics(&reparsed), semantics(&doc));
}

#[test]
fn test_sample_is_idempotent() {
    let doc = parse(fixtures::sd1601634()).unwrap();
    let once = canonicalize(&doc);
    let twice = canonicalize(&reparse(&once));
    assert_eq!(once, twice);
}

#[test]
fn test_sample_disorder_annotation_survives() {
    let doc = parse(fixtures::sd1601634()).unwrap();
    let reparsed = reparse(&canonicalize(&doc));
    let block = reparsed.block(STANDARDIZED).unwrap();
    let annotated: Vec<_> = block
        .disorder_groups()
        .iter()
        .filter_map(|g| g.annotation())
        .collect();
    assert_eq!(annotated, vec!["M1 Zn0.645Fe0.345Pb0.010"]);
}

#[test]
fn test_sample_cell_variants_survive() {
    let doc = parse(fixtures::sd1601634()).unwrap();
    let reparsed = reparse(&canonicalize(&doc));
    assert_eq!(reparsed.cell_variants().len(), 3);
    let cell = reparsed.variant(CellVariant::Published).unwrap().cell();
    assert_eq!(cell.a.to_string(), "9.143(2)");
}

#[test]
fn test_sample_canonical_differs_from_source() {
    let text = fixtures::sd1601634();
    let doc = parse(text).unwrap();
    assert_ne!(canonicalize(&doc), text);
    assert_eq!(doc.serialize(), text);
}

// =============================================================================
// Values and quoting
// =============================================================================

#[test]
fn test_numbers_are_respelled() {
    let doc = parse("data_a\n_x 0.010\n_y 9.1430(20)\n_z +5\n").unwrap();
    assert_eq!(canonicalize(&doc), "data_a\n_x 0.01\n_y 9.143(2)\n_z 5\n");
}

#[test]
fn test_quoted_text_becomes_bare_when_safe() {
    let doc = parse("data_a\n_w '4i'\n_s \"P -1\"\n").unwrap();
    assert_eq!(canonicalize(&doc), "data_a\n_w 4i\n_s 'P -1'\n");
}

#[test]
fn test_quoted_sentinel_stays_quoted() {
    let doc = parse("data_a\n_q '?'\n_d '.'\n_u ?\n").unwrap();
    assert_eq!(canonicalize(&doc), "data_a\n_q '?'\n_d '.'\n_u ?\n");
}

#[test]
fn test_always_quoting() {
    let doc = parse("data_a\n_w 4i\n_n 1\n_u ?\n").unwrap();
    let config = CanonicalConfig::new().with_quoting(QuotingStrategy::Always);
    assert_eq!(
        canonicalize_with_config(&doc, &config),
        "data_a\n_w '4i'\n_n 1\n_u ?\n"
    );
}

#[test]
fn test_apostrophe_followed_by_space_uses_double_quotes() {
    let doc = parse("data_a\n_t \"O' H\"\n").unwrap();
    let canonical = canonicalize(&doc);
    assert_eq!(canonical, "data_a\n_t \"O' H\"\n");
    assert_eq!(semantics(&reparse(&canonical)), semantics(&doc));
}

#[test]
fn test_text_block_item() {
    let doc = parse("data_a\n_t\n;\nline one\nline two\n;\n").unwrap();
    assert_eq!(canonicalize(&doc), "data_a\n_t\n;\nline one\nline two\n;\n");
}

#[test]
fn test_numeric_text_block_stays_text() {
    let doc = parse("data_a\n_t\n;\n1.5\n;\n").unwrap();
    let reparsed = reparse(&canonicalize(&doc));
    assert_eq!(
        reparsed.tag("a", "_t").unwrap().unwrap().as_text(),
        Some("1.5")
    );
}

// =============================================================================
// Loops
// =============================================================================

#[test]
fn test_loop_columns_aligned() {
    let doc = parse("data_a\nloop_\n_l\n_x\nO1 0.5\nOH2 0.25\n").unwrap();
    assert_eq!(
        canonicalize(&doc),
        "data_a\nloop_\n_l\n_x\nO1  0.5\nOH2 0.25\n"
    );
}

#[test]
fn test_loop_columns_unaligned() {
    let doc = parse("data_a\nloop_\n_l\n_x\nO1 0.5\nOH2 0.25\n").unwrap();
    let config = CanonicalConfig::new().with_aligned_loops(false);
    assert_eq!(
        canonicalize_with_config(&doc, &config),
        "data_a\nloop_\n_l\n_x\nO1 0.5\nOH2 0.25\n"
    );
}

#[test]
fn test_loop_row_with_text_block() {
    let text = "data_a\nloop_\n_n\n_t\nA\n;\nsome text\n;\nB 'x y'\n";
    let doc = parse(text).unwrap();
    let canonical = canonicalize(&doc);
    assert_eq!(canonical, "data_a\nloop_\n_n\n_t\nA\n;\nsome text\n;\nB 'x y'\n");
    assert_eq!(semantics(&reparse(&canonical)), semantics(&doc));
}

#[test]
fn test_row_annotation_written_above_row() {
    let doc = parse("data_a\nloop_\n_l\n_o\nA 1\n   #   M1 Zn\nB 0.5\nC 0.5\n").unwrap();
    assert_eq!(
        canonicalize(&doc),
        "data_a\nloop_\n_l\n_o\nA 1\n# M1 Zn\nB 0.5\nC 0.5\n"
    );
}

#[test]
fn test_empty_loop() {
    let doc = parse("data_a\nloop_\n_k\n_v\n").unwrap();
    assert_eq!(canonicalize(&doc), "data_a\nloop_\n_k\n_v\n");
}

// =============================================================================
// Comments
// =============================================================================

#[test]
fn test_comments_kept_by_default() {
    let doc = parse("# head\ndata_a\n# note\n_x 1\n").unwrap();
    assert_eq!(canonicalize(&doc), "# head\n\ndata_a\n# note\n_x 1\n");
}

#[test]
fn test_comments_dropped() {
    let doc = parse("# head\ndata_a\n# note\nloop_\n_l\nA\n# M1\nB\n").unwrap();
    let config = CanonicalConfig::builder().keep_comments(false).build();
    assert_eq!(
        canonicalize_with_config(&doc, &config),
        "data_a\nloop_\n_l\nA\nB\n"
    );
}

// =============================================================================
// Warnings and lenient documents
// =============================================================================

#[test]
fn test_duplicate_tags_reproduce_warning() {
    let doc = parse("data_a\n_x 1\n_x 2\n").unwrap();
    let reparsed = reparse(&canonicalize(&doc));
    assert_eq!(reparsed.warnings().len(), 1);
    assert_eq!(reparsed.tag("a", "_x").unwrap().unwrap().magnitude(), Some(2.0));
}

#[test]
fn test_skipped_blocks_are_not_written() {
    let options = cif_core::ParseOptions::builder().lenient(true).build();
    let doc = cif_core::parse_with_options("data_a\n_x 1\ndata_b\n_y\ndata_c\n_z 3\n", options)
        .unwrap();
    assert_eq!(doc.skipped().len(), 1);
    assert_eq!(canonicalize(&doc), "data_a\n_x 1\n\ndata_c\n_z 3\n");
}

#[test]
fn test_every_valid_sample_round_trips() {
    for (name, text) in fixtures::documents::valid_cif_samples() {
        let doc = parse(text).unwrap_or_else(|e| panic!("{}: {}", name, e));
        let canonical = canonicalize(&doc);
        let reparsed = reparse(&canonical);
        assert_eq!(semantics(&reparsed), semantics(&doc), "sample {}", name);
        assert_eq!(canonicalize(&reparsed), canonical, "sample {}", name);
    }
}
