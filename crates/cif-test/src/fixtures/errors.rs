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

//! Invalid inputs for error-path testing.

/// Invalid CIF samples as `(name, text, expected_error_kind)` triples.
///
/// The kind is spelled the way `CifErrorKind` displays it.
pub fn invalid_cif_samples() -> Vec<(&'static str, &'static str, &'static str)> {
    vec![
        (
            "unterminated_text_block",
            "data_a\n_title\n;\nnever closed\n",
            "LexError",
        ),
        ("unterminated_quote", "data_a\n_x 'open\n", "LexError"),
        ("tag_without_value", "data_a\n_x\n_y 1\n", "ParseError"),
        ("tag_at_end", "data_a\n_x 1\n_y\n", "ParseError"),
        ("stray_value", "data_a\n_x 1 2\n", "ParseError"),
        ("value_before_block", "_x 1\ndata_a\n", "ParseError"),
        ("loop_without_columns", "data_a\nloop_\n1 2\n", "ParseError"),
        ("ragged_loop", "data_a\nloop_\n_k\n_v\n1 2\n3\n", "ParseError"),
        ("reserved_global", "data_a\nglobal_\n", "ParseError"),
        ("save_frame", "data_a\nsave_x\n_y 1\nsave_\n", "ParseError"),
        ("duplicate_block", "data_a\n_x 1\ndata_a\n_x 1\n", "ParseError"),
        ("empty_block_name", "data_\n_x 1\n", "ParseError"),
        ("letter_uncertainty", "data_a\n_x 9.143(b)\n", "ValueError"),
        ("unclosed_uncertainty", "data_a\n_x 9.143(2\n", "ValueError"),
    ]
}
