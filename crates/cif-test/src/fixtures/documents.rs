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

//! Small valid documents, one grammar feature each.

/// Valid CIF samples as `(name, text)` pairs.
///
/// None of them repeats a tag, so each must survive a parse/serialize round
/// trip unchanged.
pub fn valid_cif_samples() -> Vec<(&'static str, &'static str)> {
    vec![
        ("empty", ""),
        ("comment_only", "# nothing here\n"),
        ("single_pair", "data_a\n_cell_length_a 9.143(2)\n"),
        ("sentinels", "data_a\n_x ?\n_y .\n_z '?'\n"),
        ("quoted", "data_a\n_s 'C 1 2/m 1'\n_t \"it's\"\n_u 'a'b'\n"),
        (
            "text_block",
            "data_a\n_title\n;\nPb<sub>2</sub> &amp; Zn\nsecond line\n;\n",
        ),
        ("empty_text_block", "data_a\n_t\n;\n;\n"),
        ("loop", "data_a\nloop_\n_k\n_v\n1 one\n2 two\n"),
        ("empty_loop", "data_a\nloop_\n_k\n_v\ndata_b\n_x 1\n"),
        (
            "annotated_loop",
            "data_a\nloop_\n_k\n# first\n1\n# second\n# still second\n2\n",
        ),
        ("wildcard_row", "data_a\nloop_\n_atom_site_label\n_atom_site_fract_x\n? ?\n"),
        ("multi_block", "data_a\n_x 1\n\ndata_b\n_x 2\n"),
        ("crlf", "data_a\r\n_x 1\r\n#c\r\n"),
        ("tabs_and_padding", "\t\ndata_a\t_x\t1  \n\n\n"),
        ("no_final_newline", "data_a\n_x 1"),
        ("case_keywords", "DATA_a\nLOOP_\n_k\n1\n"),
        ("semicolon_mid_line", "data_a\n_x ;not-a-block\n"),
    ]
}

/// Names of the block headers in a valid sample, in order.
pub fn block_names(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .filter_map(|w| {
            let lower = w.get(..5)?;
            lower.eq_ignore_ascii_case("data_").then(|| &w[5..])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_have_unique_names() {
        let samples = valid_cif_samples();
        let mut names: Vec<_> = samples.iter().map(|(n, _)| *n).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), samples.len());
    }

    #[test]
    fn test_block_names() {
        assert_eq!(block_names("data_a\n_x 1\nDATA_b\n"), vec!["a", "b"]);
        assert!(block_names("# none").is_empty());
    }
}
