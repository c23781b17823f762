// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity serializers
//!
//! Each serializer renders one category of the model into the body text of
//! its section. Serializers know nothing about section order; the
//! [`DocumentAssembler`] places their output.

pub mod document;
pub mod layout;
pub mod loads;
pub mod properties;
pub mod topology;

pub use document::DocumentAssembler;
pub use layout::{write_controls, write_grids, write_program_information, write_stories};
pub use loads::{write_load_combinations, write_load_patterns, write_shell_uniform_load_sets};
pub use properties::{
    write_deck_properties, write_diaphragms, write_frame_sections, write_materials,
    write_slab_properties, write_wall_properties, WALL_MODIFIER_LINE,
};
pub use topology::{
    write_area_assigns, write_area_connectivities, write_line_assigns,
    write_line_connectivities, write_points,
};

use crate::sections::*;
use crate::tokenizer::quote;
use e2k_lite_model::StructuralModel;

/// Render a number with the shortest representation that reads back exactly
///
/// Only finite values read back; [`Record`] keeps the others out of lines.
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

/// Builder for one data line
#[derive(Debug)]
pub struct Record {
    text: String,
}

impl Record {
    pub fn new(keyword: &str) -> Self {
        Self {
            text: keyword.to_string(),
        }
    }

    fn push(mut self, token: &str) -> Self {
        self.text.push_str("  ");
        self.text.push_str(token);
        self
    }

    pub fn quoted(self, value: &str) -> Self {
        self.push(&quote(value))
    }

    pub fn word(self, value: &str) -> Self {
        self.push(value)
    }

    /// Positional number; a non-finite value is written as `0`
    pub fn number(self, value: f64) -> Self {
        if !value.is_finite() {
            log::warn!("non-finite value {} after `{}` written as 0", value, self.text);
            return self.push("0");
        }
        self.push(&format_number(value))
    }

    /// `TAG "value"`
    pub fn quoted_field(self, tag: &str, value: &str) -> Self {
        self.word(tag).quoted(value)
    }

    /// `TAG value`; the whole field is left out when the value is not finite
    pub fn number_field(self, tag: &str, value: f64) -> Self {
        if !value.is_finite() {
            log::warn!("non-finite {} value {} dropped from `{}`", tag, value, self.text);
            return self;
        }
        self.word(tag).number(value)
    }

    pub fn optional_quoted(self, tag: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.quoted_field(tag, value),
            None => self,
        }
    }

    pub fn optional_number(self, tag: &str, value: Option<f64>) -> Self {
        match value {
            Some(value) => self.number_field(tag, value),
            None => self,
        }
    }

    pub fn finish(self) -> String {
        self.text
    }
}

/// Accumulates the indented lines of one section body
#[derive(Debug, Default)]
pub struct SectionBody {
    lines: Vec<String>,
}

impl SectionBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: Record) {
        self.lines.push(format!("  {}", record.finish()));
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}

/// Serialize every category of a model into `(section, body)` pairs
///
/// Empty bodies are kept; the document assembler drops them.
pub fn serialize_sections(model: &StructuralModel) -> Vec<(&'static str, String)> {
    let properties = &model.properties;
    let topology = &model.topology;

    vec![
        (PROGRAM_INFORMATION, write_program_information(&model.metadata)),
        (CONTROLS, write_controls(&model.metadata)),
        (STORIES, write_stories(&model.layout)),
        (GRIDS, write_grids(&model.layout.grids)),
        (DIAPHRAGM_NAMES, write_diaphragms(&properties.diaphragms)),
        (MATERIAL_PROPERTIES, write_materials(&properties.materials)),
        (FRAME_SECTIONS, write_frame_sections(&properties.frame_properties)),
        (SLAB_PROPERTIES, write_slab_properties(&properties.floor_properties)),
        (DECK_PROPERTIES, write_deck_properties(&properties.floor_properties)),
        (WALL_PROPERTIES, write_wall_properties(&properties.wall_properties)),
        (POINT_COORDINATES, write_points(&topology.points)),
        (LINE_CONNECTIVITIES, write_line_connectivities(&topology.lines)),
        (AREA_CONNECTIVITIES, write_area_connectivities(&topology.areas)),
        (LINE_ASSIGNS, write_line_assigns(&topology.line_assignments)),
        (AREA_ASSIGNS, write_area_assigns(&topology.area_assignments)),
        (LOAD_PATTERNS, write_load_patterns(&model.loads.definitions)),
        (LOAD_COMBINATIONS, write_load_combinations(&model.loads.combinations)),
        (SHELL_UNIFORM_LOAD_SETS, write_shell_uniform_load_sets(&model.loads.surface_loads)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(144.0), "144");
        assert_eq!(format_number(-12.5), "-12.5");
        assert_eq!(format_number(0.0474), "0.0474");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_record_builder() {
        let line = Record::new("POINT")
            .quoted("1")
            .number(0.0)
            .number(240.0)
            .optional_number("Z", None)
            .optional_quoted("SECTION", Some("W14X30"))
            .finish();
        assert_eq!(line, r#"POINT  "1"  0  240  SECTION  "W14X30""#);
    }

    #[test]
    fn test_non_finite_numbers_stay_readable() {
        let line = Record::new("POINT")
            .quoted("1")
            .number(f64::NAN)
            .number(240.0)
            .number_field("Z", f64::INFINITY)
            .optional_number("ANG", Some(f64::NEG_INFINITY))
            .number_field("SF", 1.5)
            .finish();
        assert_eq!(line, r#"POINT  "1"  0  240  SF  1.5"#);
        assert!(crate::tokenizer::tokenize_line(&line).is_ok());
    }

    #[test]
    fn test_section_body_indents_lines() {
        let mut body = SectionBody::new();
        assert!(body.is_empty());
        body.push(Record::new("DIAPHRAGM").quoted("D1").word("TYPE").word("RIGID"));
        body.push(Record::new("DIAPHRAGM").quoted("D2").word("TYPE").word("SEMIRIGID"));
        assert_eq!(
            body.finish(),
            "  DIAPHRAGM  \"D1\"  TYPE  RIGID\n  DIAPHRAGM  \"D2\"  TYPE  SEMIRIGID"
        );
    }

    #[test]
    fn test_empty_model_serializes_empty_bodies() {
        let model = StructuralModel::new();
        let sections = serialize_sections(&model);
        assert_eq!(sections.len(), 18);
        assert!(sections.iter().all(|(_, body)| body.is_empty()));
    }
}
