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

//! Semantic warnings.
//!
//! A warning marks grammatically valid input that breaks a domain invariant.
//! It never aborts parsing; the offending data stays in the model unchanged
//! and the warning is attached to the block it was found in.

use std::fmt;

use crate::lex::SourcePos;

/// A non-fatal finding recorded while assembling a block.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Warning {
    /// A tag was declared more than once in the same block; the later value
    /// replaced the earlier one.
    DuplicateTag {
        tag: String,
        first: SourcePos,
        duplicate: SourcePos,
    },
    /// The occupancies of a disorder group add up to more than one.
    DisorderOverflow {
        wyckoff: String,
        labels: Vec<String>,
        total: f64,
        position: SourcePos,
    },
}

impl Warning {
    /// Stable identifier, shared with the matching lint rule.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateTag { .. } => "duplicate-tag",
            Self::DisorderOverflow { .. } => "disorder-overflow",
        }
    }

    /// Where the warning applies.
    pub fn position(&self) -> SourcePos {
        match self {
            Self::DuplicateTag { duplicate, .. } => *duplicate,
            Self::DisorderOverflow { position, .. } => *position,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateTag {
                tag,
                first,
                duplicate,
            } => write!(
                f,
                "DuplicateTagWarning at {}: '{}' already declared at {}",
                duplicate, tag, first
            ),
            Self::DisorderOverflow {
                wyckoff,
                labels,
                total,
                position,
            } => write!(
                f,
                "DisorderOverflowWarning at {}: occupancies of {} at site {} sum to {}",
                position,
                labels.join("+"),
                wyckoff,
                total
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_tag_display() {
        let w = Warning::DuplicateTag {
            tag: "_cell_volume".to_string(),
            first: SourcePos::new(4, 1),
            duplicate: SourcePos::new(9, 1),
        };
        assert_eq!(w.code(), "duplicate-tag");
        assert_eq!(w.position(), SourcePos::new(9, 1));
        let msg = w.to_string();
        assert!(msg.starts_with("DuplicateTagWarning"));
        assert!(msg.contains("line 4"));
    }

    #[test]
    fn test_disorder_overflow_display() {
        let w = Warning::DisorderOverflow {
            wyckoff: "4f".to_string(),
            labels: vec!["Zn1".to_string(), "Fe1".to_string()],
            total: 1.2,
            position: SourcePos::new(30, 1),
        };
        assert_eq!(w.code(), "disorder-overflow");
        assert!(w.to_string().contains("Zn1+Fe1"));
        assert!(w.to_string().contains("4f"));
    }
}
