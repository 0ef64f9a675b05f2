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

//! Shared test fixtures for the CIF toolkit.
//!
//! Fixtures are plain CIF text so that every crate in the workspace can use
//! them, `cif-core`'s own tests included.
//!
//! # Quick Start
//!
//! ```rust
//! use cif_test::fixtures;
//!
//! let text = fixtures::sd1601634();
//! assert!(text.contains(fixtures::STANDARDIZED));
//!
//! for (name, input, kind) in fixtures::errors::invalid_cif_samples() {
//!     // feed `input` to the parser, expect an error of `kind`
//!     # let _ = (name, input, kind);
//! }
//! ```

pub mod fixtures;

pub use fixtures::{sd1601634, synthetic};
