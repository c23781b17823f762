// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared state threaded through the import parsers

use crate::ids::IdAllocator;
use crate::tokenizer::{is_data_line, tokenize_line, LineTokens};
use e2k_lite_model::{
    EntityId, IdCategory, NameIndex, NameResolver, ParseDiagnostics, Result, SkipReason,
};
use indexmap::IndexMap;

/// Id allocator, reference policy and diagnostics sink of one import
#[derive(Debug)]
pub struct ParseContext {
    ids: IdAllocator,
    case_insensitive: bool,
    pub diagnostics: ParseDiagnostics,
}

impl ParseContext {
    pub fn new(case_insensitive: bool) -> Self {
        Self {
            ids: IdAllocator::new(),
            case_insensitive,
            diagnostics: ParseDiagnostics::new(),
        }
    }

    /// Whether names resolve case-insensitively
    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// Allocate a fresh identifier
    pub fn next_id(&self, category: IdCategory) -> Result<EntityId> {
        self.ids.next(category)
    }

    /// Build a lookup table over a name-keyed collection
    pub fn index<T>(&self, entities: &IndexMap<String, T>, id: impl Fn(&T) -> EntityId) -> NameIndex {
        NameIndex::from_pairs(
            entities.iter().map(|(name, entity)| (name.as_str(), id(entity))),
            self.case_insensitive,
        )
    }

    /// Tokenize a data line, recording it as malformed on failure
    pub fn tokenize<'a>(&mut self, section: &str, line_no: usize, line: &'a str) -> Option<LineTokens<'a>> {
        match tokenize_line(line) {
            Ok(tokens) => Some(tokens),
            Err(_) => {
                self.skip(section, line_no, line, SkipReason::Malformed);
                None
            }
        }
    }

    /// Record a skipped line
    pub fn skip(&mut self, section: &str, line_no: usize, line: &str, reason: SkipReason) {
        log::trace!("[{section}:{line_no}] skipped ({reason:?}): {}", line.trim());
        self.diagnostics.skip(section, line_no, line, reason);
    }

    /// Resolve a reference, recording it when the target is unknown
    pub fn resolve(
        &mut self,
        index: &NameIndex,
        section: &str,
        entity: &str,
        field: &str,
        target: &str,
    ) -> Option<EntityId> {
        let id = index.resolve(target);
        if id.is_none() {
            self.diagnostics.unresolved_ref(section, entity, field, target);
        }
        id
    }

    /// Resolve an optional reference; an absent name is not an error
    pub fn resolve_opt(
        &mut self,
        index: &NameIndex,
        section: &str,
        entity: &str,
        field: &str,
        target: Option<&str>,
    ) -> Option<EntityId> {
        target.and_then(|target| self.resolve(index, section, entity, field, target))
    }

    pub fn into_diagnostics(self) -> ParseDiagnostics {
        self.diagnostics
    }
}

/// Data lines of a section body with their 1-based line numbers
pub fn data_lines(body: &str) -> impl Iterator<Item = (usize, &str)> {
    body.lines()
        .enumerate()
        .filter(|(_, line)| is_data_line(line))
        .map(|(i, line)| (i + 1, line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_lines_skip_comments_and_blanks() {
        let body = "POINT \"1\" 0 0\n\n$ comment\n  POINT \"2\" 1 0";
        let lines: Vec<(usize, &str)> = data_lines(body).collect();
        assert_eq!(lines, [(1, "POINT \"1\" 0 0"), (4, "  POINT \"2\" 1 0")]);
    }

    #[test]
    fn test_unresolved_reference_is_recorded() {
        let mut ctx = ParseContext::new(true);
        let index = NameIndex::from_pairs([("A992Fy50", EntityId::new(IdCategory::Material, 1))], true);

        assert!(ctx.resolve(&index, "FRAME SECTIONS", "W14X30", "material", "a992fy50").is_some());
        assert!(ctx.resolve(&index, "FRAME SECTIONS", "W14X30", "material", "A36").is_none());
        assert!(ctx.resolve_opt(&index, "FRAME SECTIONS", "W14X30", "material", None).is_none());

        let diagnostics = ctx.into_diagnostics();
        assert_eq!(diagnostics.unresolved.len(), 1);
        assert_eq!(diagnostics.unresolved[0].target, "A36");
    }

    #[test]
    fn test_bad_tokenization_is_malformed() {
        let mut ctx = ParseContext::new(false);
        assert!(ctx.tokenize("GRIDS", 3, "GRID \"G1").is_none());
        assert_eq!(ctx.diagnostics.skipped_count(SkipReason::Malformed), 1);
    }
}
