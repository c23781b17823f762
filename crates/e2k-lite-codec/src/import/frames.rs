// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `$ FRAME SECTIONS`
//!
//! Section kind and sub-type come from ordered rule tables evaluated
//! first-match-wins. The tables are data so their priority is visible:
//! `WT` has to be tried before `W`, `MC` before `C`, and so on.

use crate::context::{data_lines, ParseContext};
use crate::sections::FRAME_SECTIONS;
use crate::tokenizer::{LineTokens, Token};
use e2k_lite_model::{
    ConcreteShape, FrameProperties, IdCategory, Material, MaterialKind, NameIndex, Result,
    ShapeType, SkipReason, SteelShape,
};
use indexmap::IndexMap;

/// Steel family by shape-name prefix, most specific prefix first
pub const STEEL_SHAPE_RULES: &[(&str, SteelShape)] = &[
    ("WT", SteelShape::WT),
    ("ST", SteelShape::ST),
    ("MC", SteelShape::MC),
    ("HP", SteelShape::HP),
    ("HSS", SteelShape::HSS),
    ("PIPE", SteelShape::Pipe),
    ("W", SteelShape::W),
    ("C", SteelShape::C),
    ("L", SteelShape::L),
];

/// A material-kind rule over the upper-cased shape and material names
#[derive(Clone, Copy, Debug)]
pub struct KindRule {
    pub name: &'static str,
    pub matches: fn(shape: &str, material: &str) -> bool,
    pub kind: MaterialKind,
}

/// Fallback kind rules for sections whose material is not in the table
pub const MATERIAL_KIND_RULES: &[KindRule] = &[
    KindRule {
        name: "steel shape prefix",
        matches: |shape, _| steel_prefix(shape).is_some(),
        kind: MaterialKind::Steel,
    },
    KindRule {
        name: "contains STEEL",
        matches: |shape, material| shape.contains("STEEL") || material.contains("STEEL"),
        kind: MaterialKind::Steel,
    },
    KindRule {
        name: "contains A992",
        matches: |shape, material| shape.contains("A992") || material.contains("A992"),
        kind: MaterialKind::Steel,
    },
];

/// Concrete family by substring of the shape description
pub const CONCRETE_SHAPE_RULES: &[(&[&str], ConcreteShape)] = &[
    (&["RECTANGULAR"], ConcreteShape::Rectangular),
    (&["CIRCULAR", "CIRCLE"], ConcreteShape::Circular),
    (&["TEE", "T-SHAPED"], ConcreteShape::Tee),
    (&["L-SECTION", "L-SHAPED"], ConcreteShape::LShaped),
];

/// Dimension tag -> semantic name
pub const DIMENSION_NAMES: &[(&str, &str)] = &[
    ("D", "depth"),
    ("B", "width"),
    ("TF", "flange_thickness"),
    ("TW", "web_thickness"),
    ("T", "thickness"),
    ("T1", "thickness1"),
    ("T2", "thickness2"),
    ("OD", "diameter"),
];

/// Steel family of a shape name, when a known prefix is followed by a digit
///
/// The digit requirement keeps descriptions such as `Concrete Rectangular`
/// from being read as a `C` channel.
fn steel_prefix(shape: &str) -> Option<SteelShape> {
    STEEL_SHAPE_RULES.iter().find_map(|(prefix, family)| {
        shape
            .strip_prefix(prefix)
            .and_then(|rest| rest.chars().next())
            .filter(char::is_ascii_digit)
            .map(|_| *family)
    })
}

/// Material kind from the shape and material names
pub fn classify_material_kind(shape: &str, material: &str) -> MaterialKind {
    let shape = shape.trim().to_ascii_uppercase();
    let material = material.trim().to_ascii_uppercase();
    MATERIAL_KIND_RULES
        .iter()
        .find(|rule| (rule.matches)(&shape, &material))
        .map(|rule| rule.kind)
        .unwrap_or(MaterialKind::Concrete)
}

/// Steel family of a shape name, `W` when nothing matches
pub fn classify_steel_shape(shape: &str) -> SteelShape {
    let shape = shape.trim().to_ascii_uppercase();
    steel_prefix(&shape)
        .or_else(|| {
            STEEL_SHAPE_RULES
                .iter()
                .find(|(prefix, _)| shape.starts_with(prefix))
                .map(|(_, family)| *family)
        })
        .unwrap_or(SteelShape::W)
}

/// Concrete family of a shape description, `Custom` when nothing matches
pub fn classify_concrete_shape(shape: &str) -> ConcreteShape {
    let shape = shape.to_ascii_uppercase();
    CONCRETE_SHAPE_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| shape.contains(needle)))
        .map(|(_, family)| *family)
        .unwrap_or(ConcreteShape::Custom)
}

/// Semantic name of a dimension tag; unknown tags are lower-cased
pub fn dimension_name(tag: &str) -> String {
    DIMENSION_NAMES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(tag))
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| tag.to_ascii_lowercase())
}

/// `TAG value` pairs after the shape field
fn dimensions(tokens: &LineTokens<'_>, from: usize) -> IndexMap<String, f64> {
    tokens
        .tokens()
        .get(from..)
        .unwrap_or_default()
        .windows(2)
        .filter_map(|pair| match pair {
            [Token::Word(tag), Token::Number(value)] => Some((dimension_name(tag), *value)),
            _ => None,
        })
        .collect()
}

/// Parse the frame section table
///
/// `materials` is the parsed material table: a section takes the kind of
/// its material when the name resolves, and falls back to the name rules
/// otherwise.
pub fn parse_frame_sections(
    body: &str,
    materials: &IndexMap<String, Material>,
    material_index: &NameIndex,
    ctx: &mut ParseContext,
) -> Result<IndexMap<String, FrameProperties>> {
    let mut sections = IndexMap::new();

    for (line_no, line) in data_lines(body) {
        let Some(tokens) = ctx.tokenize(FRAME_SECTIONS, line_no, line) else {
            continue;
        };
        let parsed = (
            tokens.starts_with("FRAMESECTION"),
            tokens.quoted(1),
            tokens.text_after("MATERIAL"),
            tokens.position("SHAPE").zip(tokens.text_after("SHAPE")),
        );
        let (true, Some(name), Some(material_name), Some((shape_pos, shape))) = parsed else {
            ctx.skip(FRAME_SECTIONS, line_no, line, SkipReason::Malformed);
            continue;
        };

        let material = ctx.resolve(material_index, FRAME_SECTIONS, name, "material", material_name);
        let kind = material
            .and_then(|id| materials.values().find(|m| m.id == id))
            .map(|m| m.kind)
            .unwrap_or_else(|| classify_material_kind(shape, material_name));

        let shape_type = match kind {
            MaterialKind::Steel => ShapeType::Steel(classify_steel_shape(shape)),
            MaterialKind::Concrete => ShapeType::Concrete(classify_concrete_shape(shape)),
        };

        let section = FrameProperties {
            id: ctx.next_id(IdCategory::FrameProperty)?,
            name: name.to_string(),
            material_name: material_name.to_string(),
            material,
            kind,
            shape: shape.to_string(),
            shape_type,
            dimensions: dimensions(&tokens, shape_pos + 2),
        };
        sections.insert(name.to_string(), section);
    }

    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::parse_materials;
    use approx::assert_relative_eq;

    const MATERIALS: &str = r#"MATERIAL "A992Fy50" TYPE "Steel" GRADE "Grade 50"
  MATERIAL "4000Psi" TYPE "Concrete" GRADE "f'c 4000""#;

    const FRAMES: &str = r#"FRAMESECTION  "W14X30"  MATERIAL "A992Fy50"  SHAPE "W14X30"
  FRAMESECTION  "C24X24"  MATERIAL "4000Psi"  SHAPE "Concrete Rectangular"  D 24  B 24
  FRAMESECTION  "CIRC18"  MATERIAL "4000Psi"  SHAPE "Concrete Circle"  OD 18
  FRAMESECTION  "HSS6X6"  MATERIAL "UNKNOWN"  SHAPE "HSS6X6X.25"  D 6  B 6  T 0.25  FILLETR 0.1
  FRAMESECTION  "GIRDER"  MATERIAL "UNKNOWN"  SHAPE "Custom Girder""#;

    fn parse(body: &str) -> (IndexMap<String, FrameProperties>, ParseContext) {
        let mut ctx = ParseContext::new(true);
        let materials = parse_materials(MATERIALS, &mut ctx).unwrap();
        let index = ctx.index(&materials, |m| m.id);
        let frames = parse_frame_sections(body, &materials, &index, &mut ctx).unwrap();
        (frames, ctx)
    }

    #[test]
    fn test_steel_shape_priority() {
        let cases = [
            ("W14X30", SteelShape::W),
            ("HSS6X6X.25", SteelShape::HSS),
            ("PIPE4STD", SteelShape::Pipe),
            ("C9X15", SteelShape::C),
            ("L4X4X.5", SteelShape::L),
            ("WT5X8.5", SteelShape::WT),
            ("MC12X10.6", SteelShape::MC),
            ("HP10X42", SteelShape::HP),
            ("ST6X15.9", SteelShape::ST),
        ];
        for (shape, expected) in cases {
            assert_eq!(classify_steel_shape(shape), expected, "{shape}");
        }
    }

    #[test]
    fn test_kind_rules() {
        assert_eq!(classify_material_kind("W14X30", "X"), MaterialKind::Steel);
        assert_eq!(classify_material_kind("Custom", "Steel Plate"), MaterialKind::Steel);
        assert_eq!(classify_material_kind("Custom", "A992Fy50"), MaterialKind::Steel);
        assert_eq!(classify_material_kind("Concrete Rectangular", "C30"), MaterialKind::Concrete);
    }

    #[test]
    fn test_steel_prefix_needs_digit() {
        for shape in ["HSSROUND", "Lshape", "Channel", "Concrete Rectangular"] {
            assert_eq!(classify_material_kind(shape, "X"), MaterialKind::Concrete, "{shape}");
        }
        // once a section is known to be steel, the family still follows the prefix
        assert_eq!(classify_steel_shape("HSSROUND"), SteelShape::HSS);
        assert_eq!(classify_steel_shape("Lshape"), SteelShape::L);
        assert_eq!(classify_steel_shape("Beam"), SteelShape::W);
    }

    #[test]
    fn test_concrete_shape_rules() {
        assert_eq!(classify_concrete_shape("Concrete Rectangular"), ConcreteShape::Rectangular);
        assert_eq!(classify_concrete_shape("Concrete Circle"), ConcreteShape::Circular);
        assert_eq!(classify_concrete_shape("Concrete Tee"), ConcreteShape::Tee);
        assert_eq!(classify_concrete_shape("Concrete L-Shaped"), ConcreteShape::LShaped);
        assert_eq!(classify_concrete_shape("Concrete Trapezoid"), ConcreteShape::Custom);
    }

    #[test]
    fn test_parse_frame_sections() {
        let (frames, ctx) = parse(FRAMES);
        assert_eq!(frames.len(), 5);

        let w = &frames["W14X30"];
        assert_eq!(w.kind, MaterialKind::Steel);
        assert_eq!(w.shape_type, ShapeType::Steel(SteelShape::W));
        assert!(w.material.is_some());
        assert!(w.dimensions.is_empty());

        let column = &frames["C24X24"];
        assert_eq!(column.kind, MaterialKind::Concrete);
        assert_eq!(column.shape_type, ShapeType::Concrete(ConcreteShape::Rectangular));
        assert_relative_eq!(column.dimensions["depth"], 24.0);
        assert_relative_eq!(column.dimensions["width"], 24.0);

        assert_relative_eq!(frames["CIRC18"].dimensions["diameter"], 18.0);

        let hss = &frames["HSS6X6"];
        assert_eq!(hss.kind, MaterialKind::Steel);
        assert_eq!(hss.material, None);
        assert_eq!(hss.shape_type, ShapeType::Steel(SteelShape::HSS));
        assert_relative_eq!(hss.dimensions["thickness"], 0.25);
        assert_relative_eq!(hss.dimensions["filletr"], 0.1);

        assert_eq!(frames["GIRDER"].shape_type, ShapeType::Concrete(ConcreteShape::Custom));
        assert_eq!(ctx.diagnostics.unresolved.len(), 2);
    }

    #[test]
    fn test_material_table_overrides_name_rules() {
        let (frames, _) = parse(r#"FRAMESECTION "PLATE" MATERIAL "4000Psi" SHAPE "W8X10""#);
        assert_eq!(frames["PLATE"].kind, MaterialKind::Concrete);
        assert_eq!(frames["PLATE"].shape_type, ShapeType::Concrete(ConcreteShape::Custom));
    }

    #[test]
    fn test_missing_shape_is_malformed() {
        let (frames, ctx) = parse(r#"FRAMESECTION "X" MATERIAL "A992Fy50""#);
        assert!(frames.is_empty());
        assert_eq!(ctx.diagnostics.skipped_count(SkipReason::Malformed), 1);
    }
}
