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

//! Scalar values of a CIF document.

use std::fmt;

/// A scalar CIF value.
///
/// The sentinels `?` and `.` are separate variants and never collapse into
/// zero or an empty string.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalarValue {
    /// A number, optionally with its standard uncertainty in the same units.
    Known {
        magnitude: f64,
        uncertainty: Option<f64>,
    },
    /// The `?` sentinel: the value exists but is not known.
    Unknown,
    /// The `.` sentinel: no value is appropriate here.
    NotApplicable,
    /// Character data; `multiline` is true for `;` text blocks.
    Text { content: String, multiline: bool },
}

impl ScalarValue {
    /// A number without uncertainty.
    pub fn known(magnitude: f64) -> Self {
        Self::Known {
            magnitude,
            uncertainty: None,
        }
    }

    /// A number with a standard uncertainty.
    pub fn measured(magnitude: f64, uncertainty: f64) -> Self {
        Self::Known {
            magnitude,
            uncertainty: Some(uncertainty),
        }
    }

    /// A single-line text value.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
            multiline: false,
        }
    }

    /// A multi-line text value.
    pub fn multiline(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
            multiline: true,
        }
    }

    /// Returns the magnitude of a number.
    pub fn magnitude(&self) -> Option<f64> {
        match self {
            Self::Known { magnitude, .. } => Some(*magnitude),
            _ => None,
        }
    }

    /// Returns the standard uncertainty of a number, if one was written.
    pub fn uncertainty(&self) -> Option<f64> {
        match self {
            Self::Known { uncertainty, .. } => *uncertainty,
            _ => None,
        }
    }

    /// Returns the text content.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { content, .. } => Some(content),
            _ => None,
        }
    }

    /// Returns true for the `?` sentinel.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Returns true for the `.` sentinel.
    pub fn is_not_applicable(&self) -> bool {
        matches!(self, Self::NotApplicable)
    }

    /// Returns true unless the value is one of the two sentinels.
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Unknown | Self::NotApplicable)
    }

    /// Returns true for multi-line text.
    pub fn is_multiline(&self) -> bool {
        matches!(self, Self::Text { multiline: true, .. })
    }
}

impl fmt::Display for ScalarValue {
    /// Renders the CIF spelling of the value, without any quoting.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known {
                magnitude,
                uncertainty,
            } => f.write_str(&format_measurement(*magnitude, *uncertainty)),
            Self::Unknown => f.write_str("?"),
            Self::NotApplicable => f.write_str("."),
            Self::Text { content, .. } => f.write_str(content),
        }
    }
}

/// Formats a number in CIF notation, e.g. `9.143(2)`.
///
/// The uncertainty is written as an integer aligned with the last printed
/// digit of the magnitude. The magnitude is padded with zeros when the
/// uncertainty has more decimals than its shortest representation.
pub fn format_measurement(magnitude: f64, uncertainty: Option<f64>) -> String {
    let plain = magnitude.to_string();
    let u = match uncertainty {
        None => return plain,
        Some(u) if u == 0.0 => return format!("{}(0)", plain),
        Some(u) if !u.is_finite() || !magnitude.is_finite() => return plain,
        Some(u) => u.abs().to_string(),
    };

    let (u_int, u_frac) = u.split_once('.').unwrap_or((u.as_str(), ""));
    let (m_int, m_frac) = plain.split_once('.').unwrap_or((plain.as_str(), ""));
    let decimals = u_frac.len().max(m_frac.len());

    let padded = format!("{}{:0<width$}", u_int, u_frac, width = decimals);
    let digits = padded.trim_start_matches('0');

    if decimals == 0 {
        format!("{}({})", m_int, digits)
    } else {
        format!("{}.{:0<width$}({})", m_int, m_frac, digits, width = decimals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Constructor and accessor tests ====================

    #[test]
    fn test_known_accessors() {
        let v = ScalarValue::measured(9.143, 0.002);
        assert_eq!(v.magnitude(), Some(9.143));
        assert_eq!(v.uncertainty(), Some(0.002));
        assert!(v.is_present());
        assert_eq!(v.as_text(), None);
    }

    #[test]
    fn test_sentinels_are_distinct() {
        assert!(ScalarValue::Unknown.is_unknown());
        assert!(!ScalarValue::Unknown.is_not_applicable());
        assert!(ScalarValue::NotApplicable.is_not_applicable());
        assert_ne!(ScalarValue::Unknown, ScalarValue::NotApplicable);
        assert_ne!(ScalarValue::Unknown, ScalarValue::known(0.0));
        assert_ne!(ScalarValue::NotApplicable, ScalarValue::text(""));
        assert_eq!(ScalarValue::Unknown.magnitude(), None);
    }

    #[test]
    fn test_text_accessors() {
        let v = ScalarValue::multiline("line\nline");
        assert_eq!(v.as_text(), Some("line\nline"));
        assert!(v.is_multiline());
        assert!(!ScalarValue::text("4i").is_multiline());
    }

    // ==================== Display tests ====================

    #[test]
    fn test_display_sentinels() {
        assert_eq!(ScalarValue::Unknown.to_string(), "?");
        assert_eq!(ScalarValue::NotApplicable.to_string(), ".");
    }

    #[test]
    fn test_display_plain_numbers() {
        assert_eq!(ScalarValue::known(90.0).to_string(), "90");
        assert_eq!(ScalarValue::known(0.345).to_string(), "0.345");
        assert_eq!(ScalarValue::known(-1.0).to_string(), "-1");
    }

    #[test]
    fn test_display_measurement() {
        assert_eq!(ScalarValue::measured(9.143, 0.002).to_string(), "9.143(2)");
        assert_eq!(ScalarValue::measured(115.3, 0.1).to_string(), "115.3(1)");
        assert_eq!(ScalarValue::measured(1230.0, 40.0).to_string(), "1230(40)");
    }

    #[test]
    fn test_display_measurement_pads_magnitude() {
        assert_eq!(ScalarValue::measured(9.14, 0.002).to_string(), "9.140(2)");
        assert_eq!(ScalarValue::measured(1.5, 0.25).to_string(), "1.50(25)");
    }

    #[test]
    fn test_display_measurement_keeps_fine_uncertainty() {
        let v = ScalarValue::measured(1.0, 1e-20);
        assert_eq!(v.to_string(), "1.00000000000000000000(1)");
    }

    #[test]
    fn test_display_measurement_keeps_large_uncertainty() {
        let v = ScalarValue::measured(1e30, 5e30);
        assert_eq!(
            v.to_string(),
            "1000000000000000000000000000000(5000000000000000000000000000000)"
        );
    }

    #[test]
    fn test_display_measurement_coarse_uncertainty() {
        assert_eq!(ScalarValue::measured(1.2345, 0.01).to_string(), "1.2345(100)");
        assert_eq!(ScalarValue::measured(-9.0, 0.5).to_string(), "-9.0(5)");
    }

    #[test]
    fn test_display_zero_uncertainty() {
        assert_eq!(ScalarValue::measured(2.5, 0.0).to_string(), "2.5(0)");
    }

    #[test]
    fn test_display_text_is_unquoted() {
        assert_eq!(ScalarValue::text("C 1 2/m 1").to_string(), "C 1 2/m 1");
    }
}
