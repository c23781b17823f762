// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `$ LINE ASSIGNS` and `$ AREA ASSIGNS`
//!
//! An assignment is keyed by (object, story). Several lines may contribute
//! fields to the same record: it is created by the first line naming the
//! pair and updated in place afterwards.

use crate::context::{data_lines, ParseContext};
use crate::sections::{AREA_ASSIGNS, LINE_ASSIGNS};
use crate::tokenizer::{LineTokens, Token};
use e2k_lite_model::{
    AreaAssignment, AreaCategory, AreaConnectivity, EntityId, FrameModifiers, IdCategory,
    LineAssignment, NameIndex, NameResolver, Result, SkipReason,
};
use indexmap::IndexMap;

/// Lookup tables a line assignment resolves against
pub struct LineAssignRefs<'a> {
    pub lines: &'a NameIndex,
    pub stories: &'a NameIndex,
    pub frame_sections: &'a NameIndex,
}

/// Lookup tables an area assignment resolves against
pub struct AreaAssignRefs<'a> {
    pub areas: &'a IndexMap<String, AreaConnectivity>,
    pub area_index: &'a NameIndex,
    pub stories: &'a NameIndex,
    pub floor_properties: &'a NameIndex,
    pub wall_properties: &'a NameIndex,
    pub diaphragms: &'a NameIndex,
}

fn modifier_slot<'m>(modifiers: &'m mut FrameModifiers, tag: &str) -> &'m mut f64 {
    match tag {
        "PROPMODA" => &mut modifiers.area,
        "PROPMODA2" => &mut modifiers.shear2,
        "PROPMODA3" => &mut modifiers.shear3,
        "PROPMODT" => &mut modifiers.torsion,
        "PROPMODI22" => &mut modifiers.i22,
        "PROPMODI33" => &mut modifiers.i33,
        "PROPMODM" => &mut modifiers.mass,
        _ => &mut modifiers.weight,
    }
}

/// Frame modifier tags in output order
pub const FRAME_MODIFIER_TAGS: [&str; 8] = [
    "PROPMODA",
    "PROPMODA2",
    "PROPMODA3",
    "PROPMODT",
    "PROPMODI22",
    "PROPMODI33",
    "PROPMODM",
    "PROPMODW",
];

/// Parse line assignments
pub fn parse_line_assigns(
    body: &str,
    refs: &LineAssignRefs<'_>,
    ctx: &mut ParseContext,
) -> Result<Vec<LineAssignment>> {
    let mut assignments: IndexMap<(String, String), LineAssignment> = IndexMap::new();

    for (line_no, line) in data_lines(body) {
        let Some(tokens) = ctx.tokenize(LINE_ASSIGNS, line_no, line) else {
            continue;
        };
        let (true, Some(line_name), Some(story)) =
            (tokens.starts_with("LINEASSIGN"), tokens.quoted(1), tokens.quoted(2))
        else {
            ctx.skip(LINE_ASSIGNS, line_no, line, SkipReason::Malformed);
            continue;
        };

        let key = (line_name.to_string(), story.to_string());
        if !assignments.contains_key(&key) {
            let assignment = LineAssignment {
                id: ctx.next_id(IdCategory::LineAssignment)?,
                line: line_name.to_string(),
                story: story.to_string(),
                line_id: ctx.resolve(refs.lines, LINE_ASSIGNS, line_name, "line", line_name),
                story_id: ctx.resolve(refs.stories, LINE_ASSIGNS, line_name, "story", story),
                section: None,
                section_id: None,
                release: None,
                lateral: None,
                angle: None,
                modifiers: FrameModifiers::default(),
            };
            assignments.insert(key.clone(), assignment);
        }

        let section = tokens.text_after("SECTION");
        let section_id = ctx.resolve_opt(refs.frame_sections, LINE_ASSIGNS, line_name, "section", section);

        let Some(assignment) = assignments.get_mut(&key) else {
            continue;
        };
        if let Some(section) = section {
            assignment.section = Some(section.to_string());
            assignment.section_id = section_id;
        }
        if let Some(release) = tokens.text_after("RELEASE") {
            assignment.release = Some(release.to_string());
        }
        if let Some(lateral) = tokens.text_after("LATERAL").and_then(yes_no) {
            assignment.lateral = Some(lateral);
        }
        if let Some(angle) = tokens.number_after("ANG") {
            assignment.angle = Some(angle);
        }
        for tag in FRAME_MODIFIER_TAGS {
            if let Some(value) = tokens.number_after(tag) {
                *modifier_slot(&mut assignment.modifiers, tag) = value;
            }
        }
    }

    Ok(assignments.into_values().collect())
}

/// Parse area assignments
///
/// The section of a wall area is looked up among wall properties first,
/// every other area among floor properties first; the other table is the
/// fallback.
pub fn parse_area_assigns(
    body: &str,
    refs: &AreaAssignRefs<'_>,
    ctx: &mut ParseContext,
) -> Result<Vec<AreaAssignment>> {
    let mut assignments: IndexMap<(String, String), AreaAssignment> = IndexMap::new();

    for (line_no, line) in data_lines(body) {
        let Some(tokens) = ctx.tokenize(AREA_ASSIGNS, line_no, line) else {
            continue;
        };
        let (true, Some(area), Some(story)) =
            (tokens.starts_with("AREAASSIGN"), tokens.quoted(1), tokens.quoted(2))
        else {
            ctx.skip(AREA_ASSIGNS, line_no, line, SkipReason::Malformed);
            continue;
        };

        let key = (area.to_string(), story.to_string());
        if !assignments.contains_key(&key) {
            let assignment = AreaAssignment {
                id: ctx.next_id(IdCategory::AreaAssignment)?,
                area: area.to_string(),
                story: story.to_string(),
                area_id: ctx.resolve(refs.area_index, AREA_ASSIGNS, area, "area", area),
                story_id: ctx.resolve(refs.stories, AREA_ASSIGNS, area, "story", story),
                section: None,
                section_id: None,
                diaphragm: None,
                diaphragm_id: None,
                mesh_type: None,
                cardinal_point: None,
                load_set: None,
            };
            assignments.insert(key.clone(), assignment);
        }

        let section = tokens.text_after("SECTION");
        let section_id = section.and_then(|section| resolve_shell_section(refs, ctx, area, section));
        let diaphragm = tokens.text_after("DIAPH");
        let diaphragm_id = ctx.resolve_opt(refs.diaphragms, AREA_ASSIGNS, area, "diaphragm", diaphragm);

        let Some(assignment) = assignments.get_mut(&key) else {
            continue;
        };
        if let Some(section) = section {
            assignment.section = Some(section.to_string());
            assignment.section_id = section_id;
        }
        if let Some(diaphragm) = diaphragm {
            assignment.diaphragm = Some(diaphragm.to_string());
            assignment.diaphragm_id = diaphragm_id;
        }
        if let Some(mesh) = tokens.text_after("MESHTYPE").or_else(|| tokens.text_after("OBJMESHTYPE")) {
            assignment.mesh_type = Some(mesh.to_string());
        }
        if let Some(cardinal) = text_or_number_after(&tokens, "CARDINALPT") {
            assignment.cardinal_point = Some(cardinal);
        }
        if let Some(load_set) = tokens.text_after("SHELLUNIFORMLOADSET") {
            assignment.load_set = Some(load_set.to_string());
        }
    }

    Ok(assignments.into_values().collect())
}

fn resolve_shell_section(
    refs: &AreaAssignRefs<'_>,
    ctx: &mut ParseContext,
    area: &str,
    section: &str,
) -> Option<EntityId> {
    let is_wall = refs
        .areas
        .get(area)
        .is_some_and(|a| a.category == AreaCategory::Wall);
    let (first, second) = if is_wall {
        (refs.wall_properties, refs.floor_properties)
    } else {
        (refs.floor_properties, refs.wall_properties)
    };

    let id = first.resolve(section).or_else(|| second.resolve(section));
    if id.is_none() {
        ctx.diagnostics.unresolved_ref(AREA_ASSIGNS, area, "section", section);
    }
    id
}

fn yes_no(flag: &str) -> Option<bool> {
    match flag.to_ascii_uppercase().as_str() {
        "YES" => Some(true),
        "NO" => Some(false),
        _ => None,
    }
}

fn text_or_number_after(tokens: &LineTokens<'_>, key: &str) -> Option<String> {
    match tokens.after(key)? {
        Token::Number(n) => Some(n.to_string()),
        token => token.as_text().map(str::to_string),
    }
}
