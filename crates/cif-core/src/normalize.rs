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

//! Value normalization: from raw tokens to [`ScalarValue`]s.
//!
//! Bare and quoted tokens go through the same classification, so `'9.143(2)'`
//! and `9.143(2)` both yield a number. Only the bare sentinels `?` and `.` map
//! to [`ScalarValue::Unknown`] and [`ScalarValue::NotApplicable`]; quoted they
//! are ordinary text.
//!
//! # Uncertainty alignment
//!
//! The digits inside the parentheses are right-aligned against the last digit
//! of the mantissa, then the exponent applies to both:
//!
//! | Input          | Magnitude | Uncertainty |
//! |----------------|-----------|-------------|
//! | `9.143(2)`     | 9.143     | 0.002       |
//! | `115.3(12)`    | 115.3     | 1.2         |
//! | `1230(40)`     | 1230      | 40          |
//! | `1.25e3(4)`    | 1250      | 40          |

use crate::error::{CifError, CifResult};
use crate::lex::{Token, TokenKind};
use crate::value::ScalarValue;

/// Converts one value token into a [`ScalarValue`].
///
/// Fails with a `Value` error when a number carries a non-numeric
/// parenthetical, and with a `Parse` error when `token` is not a value token.
pub fn normalize(token: &Token<'_>) -> CifResult<ScalarValue> {
    match token.kind {
        TokenKind::BareValue("?") => Ok(ScalarValue::Unknown),
        TokenKind::BareValue(".") => Ok(ScalarValue::NotApplicable),
        TokenKind::BareValue(text) | TokenKind::QuotedValue { text, .. } => {
            classify(text).map_err(|e| e.at(token.position()))
        }
        TokenKind::TextBlock(content) => Ok(ScalarValue::multiline(text_block_content(content))),
        other => Err(CifError::parse(format!("expected a value, found {}", other.describe()), 0)
            .at(token.position())),
    }
}

/// Classifies an unquoted or quoted token text as a number or text.
pub fn classify(text: &str) -> CifResult<ScalarValue> {
    Ok(match parse_number(text)? {
        Some((magnitude, uncertainty)) => ScalarValue::Known {
            magnitude,
            uncertainty,
        },
        None => ScalarValue::text(text),
    })
}

/// Parses CIF numeric notation.
///
/// Returns `Ok(None)` when `text` is not a number at all, and an error when it
/// is a number followed by a malformed parenthetical.
pub fn parse_number(text: &str) -> CifResult<Option<(f64, Option<f64>)>> {
    let parts = match scan_numeric(text) {
        Some(parts) => parts,
        None => return Ok(None),
    };

    let mantissa = &text[..parts.end];
    let magnitude: f64 = match mantissa.parse() {
        Ok(v) if f64::is_finite(v) => v,
        _ => return Ok(None),
    };

    let rest = &text[parts.end..];
    if rest.is_empty() {
        return Ok(Some((magnitude, None)));
    }
    if !rest.starts_with('(') {
        // e.g. Wyckoff letters such as `4i`
        return Ok(None);
    }

    let digits = rest
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .filter(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(|| {
            CifError::value(
                format!("non-numeric standard uncertainty '{}' in '{}'", rest, text),
                0,
            )
        })?;

    let out_of_range = || CifError::value(format!("uncertainty out of range in '{}'", text), 0);
    let scale = i64::try_from(parts.decimals)
        .ok()
        .and_then(|decimals| parts.exponent.checked_sub(decimals))
        .ok_or_else(out_of_range)?;
    let uncertainty: f64 = match format!("{}e{}", digits, scale).parse() {
        Ok(u) if f64::is_finite(u) => u,
        _ => return Err(out_of_range()),
    };
    Ok(Some((magnitude, Some(uncertainty))))
}

/// Strips the line break that follows the opening `;` of a text block, and
/// the carriage return of a CRLF before the closing `;`.
pub fn text_block_content(content: &str) -> &str {
    let content = content
        .strip_prefix("\r\n")
        .or_else(|| content.strip_prefix('\n'))
        .unwrap_or(content);
    content.strip_suffix('\r').unwrap_or(content)
}

/// Layout of the numeric prefix of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NumericParts {
    /// Byte offset just past the mantissa and exponent.
    end: usize,
    /// Digits after the decimal point.
    decimals: usize,
    /// Value of the exponent, 0 if absent.
    exponent: i64,
}

fn count_digits(bytes: &[u8], from: usize) -> usize {
    bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count()
}

fn scan_numeric(text: &str) -> Option<NumericParts> {
    let bytes = text.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_digits = count_digits(bytes, i);
    i += int_digits;
    let mut decimals = 0;
    if bytes.get(i) == Some(&b'.') {
        decimals = count_digits(bytes, i + 1);
        i += 1 + decimals;
    }
    if int_digits + decimals == 0 {
        return None;
    }

    let mut exponent = 0;
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits = count_digits(bytes, j);
        if exp_digits == 0 {
            return None;
        }
        exponent = text[i + 1..j + exp_digits].parse().ok()?;
        i = j + exp_digits;
    }

    Some(NumericParts {
        end: i,
        decimals,
        exponent,
    })
}
