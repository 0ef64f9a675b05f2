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

//! Property-based tests for the facade entry points.

use cif::{canonicalize, parse, parse_lenient, serialize, validate};
use proptest::prelude::*;

/// Lines drawn from CIF syntax, so random documents hit real grammar paths.
fn cif_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "data_[a-z]{1,6}",
        Just("loop_".to_string()),
        "_[a-z]{1,6}",
        "_[a-z]{1,6} [A-Za-z0-9.?()-]{1,8}",
        "[A-Za-z0-9.?]{1,6}( [A-Za-z0-9.?]{1,6}){0,3}",
        "# [a-z ]{0,10}",
        "'[a-z ]{0,8}'",
        Just(";".to_string()),
    ]
}

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(cif_line(), 0..20).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: no input makes either parse mode panic.
    #[test]
    fn prop_parse_never_panics(text in document()) {
        let _ = parse(&text);
        let _ = parse_lenient(&text);
    }

    /// Property: validate agrees with parse.
    #[test]
    fn prop_validate_matches_parse(text in document()) {
        prop_assert_eq!(validate(&text).is_ok(), parse(&text).is_ok());
    }

    /// Property: a document accepted in strict mode is accepted unchanged in
    /// lenient mode.
    #[test]
    fn prop_lenient_accepts_strict_documents(text in document()) {
        if let Ok(strict) = parse(&text) {
            let lenient = parse_lenient(&text).unwrap();
            prop_assert!(lenient.skipped().is_empty());
            prop_assert_eq!(lenient.blocks().len(), strict.blocks().len());
            prop_assert_eq!(serialize(&lenient), text);
        }
    }

    /// Property: synthetic records round-trip and canonicalize to a fixed point.
    #[test]
    fn prop_synthetic_round_trip(blocks in 1usize..4, rows in 0usize..20) {
        let text = cif_test::synthetic(blocks, rows);
        let doc = parse(&text).unwrap();
        prop_assert_eq!(serialize(&doc), text.as_str());
        let canonical = canonicalize(&doc);
        prop_assert_eq!(canonicalize(&parse(&canonical).unwrap()), canonical);
    }
}
