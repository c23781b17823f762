// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Materials, section properties and diaphragms

use super::{Record, SectionBody};
use crate::import::frames::DIMENSION_NAMES;
use e2k_lite_model::{
    Diaphragm, FloorProperties, FloorPropertyKind, FrameProperties, Material, MaterialStrength,
    WallProperties,
};
use indexmap::IndexMap;

/// Stiffness modifiers written for every wall property
pub const WALL_MODIFIER_LINE: [(&str, f64); 4] = [
    ("F11MOD", 0.5),
    ("F22MOD", 0.5),
    ("M11MOD", 0.01),
    ("M22MOD", 0.01),
];

/// Primary line, then elastic and strength lines when they carry values
pub fn write_materials(materials: &IndexMap<String, Material>) -> String {
    let mut body = SectionBody::new();
    for material in materials.values() {
        let grade = Some(material.grade.as_str()).filter(|g| !g.is_empty());
        body.push(
            Record::new("MATERIAL")
                .quoted(&material.name)
                .quoted_field("TYPE", material.kind.keyword())
                .optional_quoted("GRADE", grade)
                .optional_number("WEIGHTPERVOLUME", material.weight_per_volume),
        );

        let has_elastic = material.symmetry.is_some()
            || material.elastic_modulus.is_some()
            || material.poisson_ratio.is_some()
            || material.thermal_coefficient.is_some();
        if has_elastic {
            body.push(
                Record::new("MATERIAL")
                    .quoted(&material.name)
                    .optional_quoted("SYMTYPE", material.symmetry.map(|s| s.keyword()))
                    .optional_number("E", material.elastic_modulus)
                    .optional_number("U", material.poisson_ratio)
                    .optional_number("A", material.thermal_coefficient),
            );
        }

        let strength = Record::new("MATERIAL").quoted(&material.name);
        match material.strength {
            MaterialStrength::Steel { fy, fu } if fy.is_some() || fu.is_some() => {
                body.push(strength.optional_number("FY", fy).optional_number("FU", fu));
            }
            MaterialStrength::Concrete { fc: Some(fc) } => {
                body.push(strength.number_field("FC", fc));
            }
            _ => {}
        }
    }
    body.finish()
}

/// Format tag for a dimension name; unknown names are upper-cased
fn dimension_tag(name: &str) -> String {
    DIMENSION_NAMES
        .iter()
        .find(|(_, known)| *known == name)
        .map(|(tag, _)| tag.to_string())
        .unwrap_or_else(|| name.to_ascii_uppercase())
}

pub fn write_frame_sections(sections: &IndexMap<String, FrameProperties>) -> String {
    let mut body = SectionBody::new();
    for section in sections.values() {
        let record = Record::new("FRAMESECTION")
            .quoted(&section.name)
            .quoted_field("MATERIAL", &section.material_name)
            .quoted_field("SHAPE", &section.shape);
        let record = section
            .dimensions
            .iter()
            .fold(record, |record, (name, value)| record.number_field(&dimension_tag(name), *value));
        body.push(record);
    }
    body.finish()
}

pub fn write_slab_properties(floors: &IndexMap<String, FloorProperties>) -> String {
    let mut body = SectionBody::new();
    for floor in floors.values().filter(|f| !f.kind.is_deck()) {
        body.push(
            Record::new("SHELLPROP")
                .quoted(&floor.name)
                .quoted_field("PROPTYPE", "Slab")
                .optional_quoted("MATERIAL", floor.material_name.as_deref())
                .quoted_field("MODELINGTYPE", floor.modeling_type.keyword())
                .quoted_field("SLABTYPE", floor.slab_type.unwrap_or_default().keyword())
                .optional_number("SLABTHICKNESS", floor.thickness),
        );
    }
    body.finish()
}

pub fn write_deck_properties(floors: &IndexMap<String, FloorProperties>) -> String {
    let mut body = SectionBody::new();
    for floor in floors.values().filter(|f| f.kind.is_deck()) {
        let deck_type = match (&floor.deck_type, floor.kind) {
            (Some(deck_type), _) => deck_type.as_str(),
            (None, FloorPropertyKind::UnfilledDeck) => "Unfilled",
            (None, _) => "Filled",
        };
        let deck = floor.deck.unwrap_or_default();
        body.push(
            Record::new("SHELLPROP")
                .quoted(&floor.name)
                .quoted_field("DECKTYPE", deck_type)
                .optional_quoted("CONCMATERIAL", floor.material_name.as_deref())
                .quoted_field("MODELINGTYPE", floor.modeling_type.keyword())
                .optional_number("DECKSLABDEPTH", floor.thickness)
                .optional_number("DECKRIBDEPTH", deck.rib_depth)
                .optional_number("DECKRIBWIDTHTOP", deck.rib_width_top)
                .optional_number("DECKRIBWIDTHBOTTOM", deck.rib_width_bottom)
                .optional_number("DECKRIBSPACING", deck.rib_spacing)
                .optional_number("DECKSHEARTHICKNESS", deck.shear_thickness)
                .optional_number("SHEARSTUDDIAM", deck.stud_diameter)
                .optional_number("SHEARSTUDHEIGHT", deck.stud_height)
                .optional_number("SHEARSTUDFU", deck.stud_fu),
        );
    }
    body.finish()
}

pub fn write_wall_properties(walls: &IndexMap<String, WallProperties>) -> String {
    let mut body = SectionBody::new();
    for wall in walls.values() {
        body.push(
            Record::new("SHELLPROP")
                .quoted(&wall.name)
                .quoted_field("PROPTYPE", "Wall")
                .quoted_field("MATERIAL", &wall.material_name)
                .quoted_field("MODELINGTYPE", wall.modeling_type.keyword())
                .number_field("WALLTHICKNESS", wall.thickness),
        );
        let modifiers = WALL_MODIFIER_LINE
            .iter()
            .fold(Record::new("SHELLPROP").quoted(&wall.name), |record, (tag, value)| {
                record.number_field(tag, *value)
            });
        body.push(modifiers);
    }
    body.finish()
}

pub fn write_diaphragms(diaphragms: &IndexMap<String, Diaphragm>) -> String {
    let mut body = SectionBody::new();
    for diaphragm in diaphragms.values() {
        body.push(
            Record::new("DIAPHRAGM")
                .quoted(&diaphragm.name)
                .word("TYPE")
                .word(diaphragm.kind.keyword()),
        );
    }
    body.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ParseContext;
    use crate::import::{
        parse_deck_properties, parse_diaphragms, parse_frame_sections, parse_materials,
        parse_slab_properties, parse_wall_properties,
    };
    use e2k_lite_model::{DiaphragmKind, ModelingType, SlabType};

    const MATERIALS: &str = r#"MATERIAL  "A992Fy50"  TYPE "Steel"  GRADE "Grade 50"  WEIGHTPERVOLUME 0.000283
  MATERIAL  "A992Fy50"  SYMTYPE "Isotropic"  E 29000  U 0.3  A 0.0000065
  MATERIAL  "A992Fy50"  FY 50  FU 65
  MATERIAL  "4000Psi"  TYPE "Concrete"  GRADE "f'c 4000"
  MATERIAL  "4000Psi"  FC 4
  MATERIAL  "PLAIN"  TYPE "Concrete""#;

    #[test]
    fn test_materials_round_trip() {
        let mut ctx = ParseContext::new(true);
        let materials = parse_materials(MATERIALS, &mut ctx).unwrap();
        let text = write_materials(&materials);

        // PLAIN has neither elastic nor strength values
        assert_eq!(text.lines().count(), 6);
        let again = parse_materials(&text, &mut ctx).unwrap();
        for (name, material) in &materials {
            let copy = &again[name];
            assert_eq!(copy.kind, material.kind);
            assert_eq!(copy.grade, material.grade);
            assert_eq!(copy.weight_per_volume, material.weight_per_volume);
            assert_eq!(copy.symmetry, material.symmetry);
            assert_eq!(copy.elastic_modulus, material.elastic_modulus);
            assert_eq!(copy.thermal_coefficient, material.thermal_coefficient);
            assert_eq!(copy.strength, material.strength);
        }
        assert!(ctx.diagnostics.is_clean());
    }

    #[test]
    fn test_frame_sections_round_trip() {
        let mut ctx = ParseContext::new(true);
        let materials = parse_materials(MATERIALS, &mut ctx).unwrap();
        let index = ctx.index(&materials, |m| m.id);
        let body = r#"FRAMESECTION "C24X24" MATERIAL "4000Psi" SHAPE "Concrete Rectangular" D 24 B 24
  FRAMESECTION "HSS6X6" MATERIAL "A992Fy50" SHAPE "HSS6X6X.25" D 6 T 0.25 FILLETR 0.1"#;
        let frames = parse_frame_sections(body, &materials, &index, &mut ctx).unwrap();

        let text = write_frame_sections(&frames);
        assert!(text.contains("FILLETR  0.1"));
        let again = parse_frame_sections(&text, &materials, &index, &mut ctx).unwrap();
        for (name, frame) in &frames {
            assert_eq!(again[name].shape, frame.shape);
            assert_eq!(again[name].shape_type, frame.shape_type);
            assert_eq!(again[name].dimensions, frame.dimensions);
        }
    }

    #[test]
    fn test_floor_properties_round_trip() {
        let mut ctx = ParseContext::new(true);
        let materials = parse_materials(MATERIALS, &mut ctx).unwrap();
        let index = ctx.index(&materials, |m| m.id);

        let mut floors = IndexMap::new();
        parse_slab_properties(
            r#"SHELLPROP "MAT36" PROPTYPE "Slab" MATERIAL "4000Psi" MODELINGTYPE "ShellThick" SLABTYPE "Mat" SLABTHICKNESS 36"#,
            &index,
            &mut floors,
            &mut ctx,
        )
        .unwrap();
        parse_deck_properties(
            r#"SHELLPROP "DECK1" DECKTYPE "Filled" CONCMATERIAL "4000Psi" DECKSLABDEPTH 4.5 DECKRIBDEPTH 3 DECKRIBWIDTHTOP 7 DECKRIBWIDTHBOTTOM 5 DECKRIBSPACING 12"#,
            &index,
            &mut floors,
            &mut ctx,
        )
        .unwrap();

        let slabs = write_slab_properties(&floors);
        let decks = write_deck_properties(&floors);
        assert_eq!(slabs.lines().count(), 1);
        assert_eq!(decks.lines().count(), 1);
        assert!(!decks.contains("SHEARSTUDFU"));

        let mut again = IndexMap::new();
        parse_slab_properties(&slabs, &index, &mut again, &mut ctx).unwrap();
        parse_deck_properties(&decks, &index, &mut again, &mut ctx).unwrap();

        let mat = &again["MAT36"];
        assert_eq!(mat.slab_type, Some(SlabType::Mat));
        assert_eq!(mat.modeling_type, ModelingType::ShellThick);
        assert_eq!(mat.thickness, Some(36.0));

        let deck = &again["DECK1"];
        assert_eq!(deck.kind, FloorPropertyKind::FilledDeck);
        assert_eq!(deck.deck, floors["DECK1"].deck);
        assert_eq!(deck.deck_profile, floors["DECK1"].deck_profile);
    }

    #[test]
    fn test_wall_modifiers_are_fixed() {
        let mut ctx = ParseContext::new(true);
        let materials = parse_materials(MATERIALS, &mut ctx).unwrap();
        let index = ctx.index(&materials, |m| m.id);
        let body = r#"SHELLPROP "W12" PROPTYPE "Wall" MATERIAL "4000Psi" MODELINGTYPE "ShellThin" WALLTHICKNESS 12
  SHELLPROP "W12" F11MOD 0.35"#;
        let walls = parse_wall_properties(body, &index, &mut ctx).unwrap();

        let text = write_wall_properties(&walls);
        assert!(text.ends_with(r#"SHELLPROP  "W12"  F11MOD  0.5  F22MOD  0.5  M11MOD  0.01  M22MOD  0.01"#));

        let again = parse_wall_properties(&text, &index, &mut ctx).unwrap();
        assert_eq!(again["W12"].thickness, 12.0);
        assert_eq!(again["W12"].modifiers.f11, 0.5);
        assert_eq!(again["W12"].modifiers.m22, 0.01);
    }

    #[test]
    fn test_diaphragms_round_trip() {
        let mut ctx = ParseContext::new(true);
        let diaphragms =
            parse_diaphragms("DIAPHRAGM \"D1\" TYPE RIGID\n  DIAPHRAGM \"D2\" TYPE SEMIRIGID", &mut ctx).unwrap();

        let again = parse_diaphragms(&write_diaphragms(&diaphragms), &mut ctx).unwrap();
        assert_eq!(again["D1"].kind, DiaphragmKind::Rigid);
        assert_eq!(again["D2"].kind, DiaphragmKind::SemiRigid);
    }
}
