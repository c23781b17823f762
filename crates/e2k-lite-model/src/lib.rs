// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! E2K-Lite Model - Shared types and traits for the E2K interchange format
//!
//! This crate provides the structural building model graph that the E2K
//! codec reads into and writes from. It carries no parsing logic of its own.
//!
//! # Architecture
//!
//! - [`StructuralModel`] - the assembled graph: metadata, layout,
//!   properties, topology, loads and placed elements
//! - [`NameResolver`] / [`NameIndex`] - read-only name lookup tables used to
//!   resolve cross references between import stages
//! - [`ParseDiagnostics`] - skipped lines and unresolved references
//! - [`ModelParser`] / [`ModelWriter`] - codec entry points
//!
//! # Example
//!
//! ```ignore
//! use e2k_lite_model::{ModelParser, NameResolver};
//!
//! let outcome = parser.parse_with_diagnostics(e2k_content)?;
//! for frame in outcome.model.properties.frame_properties.values() {
//!     println!("{} -> {:?}", frame.name, frame.shape_type);
//! }
//! ```

pub mod diagnostics;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod loads;
pub mod model;
pub mod properties;
pub mod resolver;
pub mod topology;
pub mod traits;
pub mod types;

// Re-export all public types
pub use diagnostics::*;
pub use error::*;
pub use geometry::*;
pub use layout::*;
pub use loads::*;
pub use model::*;
pub use properties::*;
pub use resolver::*;
pub use topology::*;
pub use traits::*;
pub use types::*;
