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

//! Error context helpers.
//!
//! Extension traits for `Result<T, CifError>` (and `std::io::Error`) that
//! attach context to errors as they propagate.
//!
//! # Examples
//!
//! ```rust
//! use cif::{parse, CifResultExt};
//!
//! fn load(name: &str, text: &str) -> Result<cif::Document, cif::CifError> {
//!     parse(text).with_context(|| format!("while loading record {}", name))
//! }
//!
//! let err = load("1601634", "data_x\n_cell_volume\n").unwrap_err();
//! assert!(err.context.unwrap().starts_with("while loading record 1601634"));
//! ```
//!
//! Foreign errors convert through `map_err_to_cif`:
//!
//! ```rust
//! use cif::{CifError, CifResultExt};
//!
//! fn read_record(path: &str) -> Result<String, CifError> {
//!     std::fs::read_to_string(path)
//!         .map_err_to_cif(|e| CifError::io(format!("failed to read {}: {}", path, e)))
//! }
//! ```

use crate::CifError;
use std::fmt;

/// Extension trait for adding context to results.
///
/// Context is stored in the error's `context` field; the original message is
/// left untouched. New context is prepended to existing context, separated
/// by `"; "`.
pub trait CifResultExt<T> {
    /// The error type for this Result
    type ErrorType;

    /// Add context to an error.
    ///
    /// ```rust
    /// use cif::{parse, CifResultExt};
    ///
    /// let err = parse("data_a\nloop_\n")
    ///     .context("in record A")
    ///     .context("while importing")
    ///     .unwrap_err();
    /// let context = err.context.unwrap();
    /// assert!(context.starts_with("while importing; in record A"));
    /// ```
    fn context<C>(self, context: C) -> Result<T, CifError>
    where
        C: fmt::Display;

    /// Add context computed only on the error path.
    fn with_context<C, F>(self, f: F) -> Result<T, CifError>
    where
        C: fmt::Display,
        F: FnOnce() -> C;

    /// Convert a foreign error type to `CifError`.
    ///
    /// For results that already carry a `CifError` this is the identity.
    fn map_err_to_cif<F>(self, f: F) -> Result<T, CifError>
    where
        F: FnOnce(Self::ErrorType) -> CifError,
        Self: Sized;
}

impl<T> CifResultExt<T> for Result<T, CifError> {
    type ErrorType = CifError;

    fn context<C>(self, context: C) -> Result<T, CifError>
    where
        C: fmt::Display,
    {
        self.map_err(|e| add_context_to_error(e, context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, CifError>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| add_context_to_error(e, f().to_string()))
    }

    fn map_err_to_cif<F>(self, _f: F) -> Result<T, CifError>
    where
        F: FnOnce(Self::ErrorType) -> CifError,
    {
        self
    }
}

impl<T> CifResultExt<T> for Result<T, std::io::Error> {
    type ErrorType = std::io::Error;

    fn context<C>(self, context: C) -> Result<T, CifError>
    where
        C: fmt::Display,
    {
        self.map_err(|e| CifError::io(e.to_string()).with_context(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, CifError>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| CifError::io(e.to_string()).with_context(f().to_string()))
    }

    fn map_err_to_cif<F>(self, f: F) -> Result<T, CifError>
    where
        F: FnOnce(Self::ErrorType) -> CifError,
    {
        self.map_err(f)
    }
}

fn add_context_to_error(mut error: CifError, new_context: String) -> CifError {
    if new_context.is_empty() {
        return error;
    }

    error.context = Some(match error.context {
        Some(existing) => format!("{}; {}", new_context, existing),
        None => new_context,
    });

    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CifErrorKind;

    // ==================== context() tests ====================

    #[test]
    fn test_context_on_error() {
        let result: Result<(), CifError> = Err(CifError::parse("loop_ declares no columns", 5));
        let err = result.context("in function foo").unwrap_err();

        assert_eq!(err.context, Some("in function foo".to_string()));
        assert_eq!(err.line, 5);
        assert_eq!(err.kind, CifErrorKind::Parse);
    }

    #[test]
    fn test_context_on_ok() {
        let result: Result<i32, CifError> = Ok(42);
        assert_eq!(result.context("unused").unwrap(), 42);
    }

    #[test]
    fn test_context_chaining() {
        let result: Result<(), CifError> = Err(CifError::value("bad uncertainty", 10));
        let err = result
            .context("in block a")
            .context("while validating document")
            .unwrap_err();
        assert_eq!(
            err.context.as_deref(),
            Some("while validating document; in block a")
        );
    }

    #[test]
    fn test_empty_context_is_ignored() {
        let result: Result<(), CifError> = Err(CifError::lex("x", 1));
        assert_eq!(result.context("").unwrap_err().context, None);
    }

    // ==================== with_context() tests ====================

    #[test]
    fn test_with_context_is_lazy() {
        let result: Result<i32, CifError> = Ok(1);
        let value = result
            .with_context(|| -> String { panic!("evaluated on success") })
            .unwrap();
        assert_eq!(value, 1);
    }

    // ==================== io::Error tests ====================

    #[test]
    fn test_io_error_context() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        ));
        let err = result.context("reading record").unwrap_err();
        assert_eq!(err.kind, CifErrorKind::Io);
        assert!(err.message.contains("no such file"));
        assert_eq!(err.context.as_deref(), Some("reading record"));
    }

    #[test]
    fn test_map_err_to_cif() {
        let result: Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        let err = result
            .map_err_to_cif(|e| CifError::io(format!("custom: {}", e)))
            .unwrap_err();
        assert_eq!(err.message, "custom: boom");
    }

    #[test]
    fn test_map_err_to_cif_identity() {
        let result: Result<(), CifError> = Err(CifError::parse("p", 2));
        let err = result.map_err_to_cif(|_| CifError::io("never")).unwrap_err();
        assert_eq!(err.kind, CifErrorKind::Parse);
    }
}
