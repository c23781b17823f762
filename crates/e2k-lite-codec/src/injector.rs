// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Section injector - merges hand-authored sections into a generated document
//!
//! A custom section always replaces the generated section of the same name
//! as a whole. Generated sections without a custom counterpart and the
//! generated preamble are copied byte for byte. The result is put back into
//! canonical order.

use crate::export::document::render_document;
use crate::scanner::{split_preamble_verbatim, split_sections, SectionMap};
use crate::sections::SectionOrderTable;
use e2k_lite_model::{E2kError, Result};

/// Injector progress
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InjectorState {
    Idle,
    ParsingCustom,
    Merging,
    Done,
}

impl InjectorState {
    pub fn name(self) -> &'static str {
        match self {
            InjectorState::Idle => "Idle",
            InjectorState::ParsingCustom => "ParsingCustom",
            InjectorState::Merging => "Merging",
            InjectorState::Done => "Done",
        }
    }
}

/// One-shot merge of custom sections into a generated document
#[derive(Debug)]
pub struct Injector {
    state: InjectorState,
    order: SectionOrderTable,
}

impl Default for Injector {
    fn default() -> Self {
        Self::new()
    }
}

impl Injector {
    pub fn new() -> Self {
        Self {
            state: InjectorState::Idle,
            order: SectionOrderTable::new(),
        }
    }

    pub fn state(&self) -> InjectorState {
        self.state
    }

    fn advance(&mut self, next: InjectorState) {
        log::debug!("injector: {} -> {}", self.state.name(), next.name());
        self.state = next;
    }

    /// Merge `custom` into `generated`
    ///
    /// An injector runs once; a second call fails with
    /// [`E2kError::InjectorState`].
    pub fn run(&mut self, generated: &str, custom: &str) -> Result<String> {
        if self.state != InjectorState::Idle {
            return Err(E2kError::InjectorState {
                expected: InjectorState::Idle.name(),
                actual: self.state.name(),
            });
        }

        self.advance(InjectorState::ParsingCustom);
        let custom = normalize_custom(split_sections(custom));

        self.advance(InjectorState::Merging);
        let (preamble, mut merged) = split_preamble_verbatim(generated);
        let generated_count = merged.len();
        let mut overridden = 0;
        for (name, body) in custom {
            if merged.insert(name, body).is_some() {
                overridden += 1;
            }
        }
        log::debug!(
            "injector: {} generated sections, {} overridden, {} added",
            generated_count,
            overridden,
            merged.len() - generated_count
        );

        let mut sections: Vec<(&str, &str)> = merged
            .iter()
            .map(|(name, body)| (name.as_str(), body.as_str()))
            .collect();
        self.order.sort_by_name(&mut sections, |(name, _)| *name);
        let document = render_document(preamble, sections);

        self.advance(InjectorState::Done);
        Ok(document)
    }
}

/// Tab-indent the first body line and end every non-empty body with a newline
fn normalize_custom(sections: SectionMap) -> SectionMap {
    sections
        .into_iter()
        .map(|(name, body)| {
            let body = body.trim();
            let body = if body.is_empty() {
                String::new()
            } else {
                format!("\t{}\n", body)
            };
            (name, body)
        })
        .collect()
}

/// Merge custom sections into a generated document with a fresh injector
pub fn inject(generated: &str, custom: &str) -> Result<String> {
    Injector::new().run(generated, custom)
}
