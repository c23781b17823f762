// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core traits for reading and writing the interchange format
//!
//! These traits let consumers depend on the model crate alone and pick a
//! codec implementation at the edge.

use crate::{ParseDiagnostics, Result, StructuralModel};

/// Outcome of an import: the model plus its soft-failure report
#[derive(Clone, Debug, Default)]
pub struct ParseOutcome {
    pub model: StructuralModel,
    pub diagnostics: ParseDiagnostics,
}

/// Main parsing interface - entry point for importing E2K text
///
/// # Example
///
/// ```ignore
/// use e2k_lite_model::ModelParser;
///
/// let parser: Box<dyn ModelParser> = get_parser();
/// let model = parser.parse(e2k_content)?;
/// println!("{} stories", model.layout.levels.len());
/// ```
pub trait ModelParser {
    /// Parse E2K content into a model
    ///
    /// # Arguments
    /// * `content` - The complete document text
    ///
    /// # Returns
    /// The assembled model, or an error if a pipeline stage failed
    fn parse(&self, content: &str) -> Result<StructuralModel> {
        self.parse_with_diagnostics(content).map(|outcome| outcome.model)
    }

    /// Parse E2K content and report skipped lines and unresolved references
    fn parse_with_diagnostics(&self, content: &str) -> Result<ParseOutcome>;
}

/// Export interface - turns a model back into E2K text
pub trait ModelWriter {
    /// Serialize the model as a complete document in canonical section order
    fn write(&self, model: &StructuralModel) -> Result<String>;
}
