// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! E2K-Lite Codec - Reader and writer for the E2K structural interchange format
//!
//! This crate turns section-delimited E2K text into a
//! [`StructuralModel`] and back. It implements the traits defined in
//! `e2k-lite-model`.
//!
//! # Features
//!
//! - **Fast section scanning** using `memchr`
//! - **Line tokenization** using `nom` combinators
//! - **Name resolution** across sections with soft-failure diagnostics
//! - **Canonical output** in a fixed section order
//! - **Section injection** of hand-authored overrides into generated text
//!
//! # Example
//!
//! ```ignore
//! use e2k_lite_codec::{E2kParser, E2kWriter};
//! use e2k_lite_model::{ModelParser, ModelWriter};
//!
//! let outcome = E2kParser::new().parse_with_diagnostics(e2k_content)?;
//! for skipped in &outcome.diagnostics.skipped {
//!     println!("{}:{} skipped", skipped.section, skipped.line);
//! }
//!
//! let text = E2kWriter::new().write(&outcome.model)?;
//! let merged = e2k_lite_codec::inject(&text, custom_sections)?;
//! ```

mod assembler;
mod context;
pub mod export;
mod ids;
pub mod import;
mod injector;
mod scanner;
pub mod sections;
mod tokenizer;

pub use assembler::ModelAssembler;
pub use context::ParseContext;
pub use export::{serialize_sections, DocumentAssembler};
pub use ids::IdAllocator;
pub use injector::{inject, Injector, InjectorState};
pub use scanner::{split_preamble, split_preamble_verbatim, split_sections, SectionMap, SectionScanner};
pub use sections::SectionOrderTable;
pub use tokenizer::{tokenize_line, LineTokens, Token};

use e2k_lite_model::{ModelParser, ModelWriter, ParseOutcome, Result, StructuralModel};
use std::path::Path;

/// Main E2K parser implementing `ModelParser`
///
/// Splits the document into sections and runs every section parser in
/// dependency order.
#[derive(Clone, Copy, Debug)]
pub struct E2kParser {
    /// Whether names resolve regardless of case
    pub case_insensitive_refs: bool,
    /// Whether to place positioned elements after the topology is built
    pub build_elements: bool,
}

impl Default for E2kParser {
    fn default() -> Self {
        Self::new()
    }
}

impl E2kParser {
    /// Create a new parser with default settings
    pub fn new() -> Self {
        Self {
            case_insensitive_refs: true,
            build_elements: true,
        }
    }

    /// Create a parser that stops after topology, assignments and loads
    pub fn topology_only() -> Self {
        Self {
            build_elements: false,
            ..Self::new()
        }
    }

    /// Set whether names resolve regardless of case
    pub fn with_case_insensitive_refs(mut self, enabled: bool) -> Self {
        self.case_insensitive_refs = enabled;
        self
    }

    /// Set whether to build positioned elements
    pub fn with_elements(mut self, enabled: bool) -> Self {
        self.build_elements = enabled;
        self
    }
}

impl ModelParser for E2kParser {
    fn parse_with_diagnostics(&self, content: &str) -> Result<ParseOutcome> {
        let sections = split_sections(content);
        log::debug!("split document into {} sections", sections.len());
        ModelAssembler::new(&sections, self.case_insensitive_refs, self.build_elements).assemble()
    }
}

/// E2K writer implementing `ModelWriter`
#[derive(Clone, Debug, Default)]
pub struct E2kWriter {
    /// Text written before the first section
    pub header: String,
    /// Text written after the closing marker
    pub footer: String,
}

impl E2kWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = footer.into();
        self
    }
}

impl ModelWriter for E2kWriter {
    fn write(&self, model: &StructuralModel) -> Result<String> {
        let mut document = DocumentAssembler::new()
            .with_header(self.header.as_str())
            .with_footer(self.footer.as_str());
        document.add_model(model);
        Ok(document.assemble())
    }
}

/// Quick parse function for simple use cases
pub fn parse(content: &str) -> Result<StructuralModel> {
    E2kParser::new().parse(content)
}

/// Parse and report skipped lines and unresolved references
pub fn parse_with_diagnostics(content: &str) -> Result<ParseOutcome> {
    E2kParser::new().parse_with_diagnostics(content)
}

/// Write a model as a complete document with no header or footer
pub fn write_model(model: &StructuralModel) -> Result<String> {
    E2kWriter::new().write(model)
}

/// Read and parse a document from disk
pub fn read_model(path: impl AsRef<Path>) -> Result<ParseOutcome> {
    let content = std::fs::read_to_string(path)?;
    parse_with_diagnostics(&content)
}

/// Write a model to disk
pub fn write_document(path: impl AsRef<Path>, model: &StructuralModel) -> Result<()> {
    std::fs::write(path, write_model(model)?)?;
    Ok(())
}
