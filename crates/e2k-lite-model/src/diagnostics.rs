// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Soft-failure report of an import
//!
//! Skipped lines and unresolved references never abort an import. They are
//! collected here so callers can tell an absent field from a missing one.

use serde::{Deserialize, Serialize};

/// Why a data line was skipped
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum SkipReason {
    /// The line does not match any grammar of its section
    Malformed,
    /// A secondary line names an entity no primary line created
    Orphan,
}

/// A data line that produced nothing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkippedLine {
    pub section: String,
    /// 1-based line number within the section body
    pub line: usize,
    pub text: String,
    pub reason: SkipReason,
}

/// A named reference with no target in its lookup table
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnresolvedReference {
    pub section: String,
    /// Name of the entity holding the reference
    pub entity: String,
    /// Field the reference was meant to fill
    pub field: String,
    /// Name that failed to resolve
    pub target: String,
}

/// Collected soft failures
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseDiagnostics {
    pub skipped: Vec<SkippedLine>,
    pub unresolved: Vec<UnresolvedReference>,
}

impl ParseDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.unresolved.is_empty()
    }

    pub fn skip(&mut self, section: &str, line: usize, text: &str, reason: SkipReason) {
        self.skipped.push(SkippedLine {
            section: section.to_string(),
            line,
            text: text.trim().to_string(),
            reason,
        });
    }

    pub fn unresolved_ref(&mut self, section: &str, entity: &str, field: &str, target: &str) {
        self.unresolved.push(UnresolvedReference {
            section: section.to_string(),
            entity: entity.to_string(),
            field: field.to_string(),
            target: target.to_string(),
        });
    }

    /// Number of skipped lines with the given reason
    pub fn skipped_count(&self, reason: SkipReason) -> usize {
        self.skipped.iter().filter(|s| s.reason == reason).count()
    }

    /// Skipped lines and unresolved references of one section
    pub fn for_section<'a>(&'a self, section: &'a str) -> (Vec<&'a SkippedLine>, Vec<&'a UnresolvedReference>) {
        (
            self.skipped.iter().filter(|s| s.section == section).collect(),
            self.unresolved.iter().filter(|u| u.section == section).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_by_reason() {
        let mut diagnostics = ParseDiagnostics::new();
        assert!(diagnostics.is_clean());

        diagnostics.skip("MATERIAL PROPERTIES", 2, "  MATERIAL \"X\" E 1 ", SkipReason::Orphan);
        diagnostics.skip("POINT COORDINATES", 7, "POINT", SkipReason::Malformed);
        diagnostics.unresolved_ref("FRAME SECTIONS", "W14X30", "material", "A36");

        assert_eq!(diagnostics.skipped_count(SkipReason::Orphan), 1);
        assert_eq!(diagnostics.skipped_count(SkipReason::Malformed), 1);
        assert_eq!(diagnostics.skipped[0].text, "MATERIAL \"X\" E 1");

        let (skipped, unresolved) = diagnostics.for_section("FRAME SECTIONS");
        assert!(skipped.is_empty());
        assert_eq!(unresolved.len(), 1);
    }
}
