// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Document assembly - places section bodies in canonical order

use crate::sections::{SectionOrderTable, END_OF_MODEL_FILE};
use e2k_lite_model::StructuralModel;

/// Render a leading text block followed by `$ NAME` sections
///
/// `lead` is written exactly as given; only a missing final line break is
/// added. Sections are emitted in the given order with one blank line
/// between them. A body keeps its own line breaks; a missing final newline
/// is added.
pub fn render_document<'a>(lead: &str, sections: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut out = String::from(lead);
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }

    for (i, (name, body)) in sections.into_iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str("$ ");
        out.push_str(name);
        out.push('\n');
        if !body.is_empty() {
            out.push_str(body);
            if !body.ends_with('\n') {
                out.push('\n');
            }
        }
    }

    out
}

/// Collects serialized sections and writes them as one document
///
/// Empty sections are dropped and `$ END OF MODEL FILE` always closes the
/// document. The footer follows the closing marker.
#[derive(Debug, Default)]
pub struct DocumentAssembler {
    header: String,
    footer: String,
    sections: Vec<(String, String)>,
    order: SectionOrderTable,
}

impl DocumentAssembler {
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

    /// Add a section; a repeated name replaces the earlier body in place
    pub fn add(&mut self, name: impl Into<String>, body: impl Into<String>) {
        let (name, body) = (name.into(), body.into());
        match self.sections.iter_mut().find(|(known, _)| *known == name) {
            Some(section) => section.1 = body,
            None => self.sections.push((name, body)),
        }
    }

    /// Add every serialized section of a model
    pub fn add_model(&mut self, model: &StructuralModel) {
        for (name, body) in super::serialize_sections(model) {
            self.add(name, body);
        }
    }

    /// Number of sections that will be written, the closing marker excluded
    pub fn len(&self) -> usize {
        self.sections.iter().filter(|(name, body)| is_written(name, body)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn assemble(mut self) -> String {
        self.sections.retain(|(name, body)| is_written(name, body));
        self.order.sort_by_name(&mut self.sections, |(name, _)| name.as_str());
        log::debug!("assembling document with {} sections", self.sections.len());

        let sections = self
            .sections
            .iter()
            .map(|(name, body)| (name.as_str(), body.as_str()))
            .chain(std::iter::once((END_OF_MODEL_FILE, "")));
        let header = self.header.trim_end();
        let lead = if header.is_empty() {
            String::new()
        } else {
            format!("{header}\n\n")
        };
        let mut out = render_document(&lead, sections);

        let footer = self.footer.trim();
        if !footer.is_empty() {
            out.push('\n');
            out.push_str(footer);
            out.push('\n');
        }
        out
    }
}

fn is_written(name: &str, body: &str) -> bool {
    !body.trim().is_empty() && !name.trim().eq_ignore_ascii_case(END_OF_MODEL_FILE)
}
