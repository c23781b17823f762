// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `$ WALL PROPERTIES`

use crate::context::{data_lines, ParseContext};
use crate::sections::WALL_PROPERTIES;
use e2k_lite_model::{
    IdCategory, ModelingType, NameIndex, Result, SkipReason, WallModifiers, WallProperties,
};
use indexmap::IndexMap;

const MODIFIER_TAGS: [&str; 4] = ["F11MOD", "F22MOD", "M11MOD", "M22MOD"];

/// Parse the wall property table
///
/// A modifier line may give any subset of the four stiffness modifiers and
/// only applies to a wall an earlier primary line created.
pub fn parse_wall_properties(
    body: &str,
    material_index: &NameIndex,
    ctx: &mut ParseContext,
) -> Result<IndexMap<String, WallProperties>> {
    let mut walls: IndexMap<String, WallProperties> = IndexMap::new();

    for (line_no, line) in data_lines(body) {
        let Some(tokens) = ctx.tokenize(WALL_PROPERTIES, line_no, line) else {
            continue;
        };
        let name = match (tokens.starts_with("SHELLPROP"), tokens.quoted(1)) {
            (true, Some(name)) => name,
            _ => {
                ctx.skip(WALL_PROPERTIES, line_no, line, SkipReason::Malformed);
                continue;
            }
        };

        if let Some(thickness) = tokens.number_after("WALLTHICKNESS") {
            let material_name = tokens.text_after("MATERIAL");
            let material = ctx.resolve_opt(material_index, WALL_PROPERTIES, name, "material", material_name);
            let wall = WallProperties {
                id: ctx.next_id(IdCategory::WallProperty)?,
                name: name.to_string(),
                material_name: material_name.unwrap_or_default().to_string(),
                material,
                modeling_type: tokens
                    .text_after("MODELINGTYPE")
                    .map(ModelingType::parse)
                    .unwrap_or_default(),
                thickness,
                modifiers: WallModifiers::default(),
            };
            walls.insert(name.to_string(), wall);
            continue;
        }

        if !MODIFIER_TAGS.iter().any(|tag| tokens.has(tag)) {
            ctx.skip(WALL_PROPERTIES, line_no, line, SkipReason::Malformed);
            continue;
        }
        let Some(wall) = walls.get_mut(name) else {
            ctx.skip(WALL_PROPERTIES, line_no, line, SkipReason::Orphan);
            continue;
        };

        let modifiers = &mut wall.modifiers;
        for (tag, slot) in MODIFIER_TAGS.into_iter().zip([
            &mut modifiers.f11,
            &mut modifiers.f22,
            &mut modifiers.m11,
            &mut modifiers.m22,
        ]) {
            if let Some(value) = tokens.number_after(tag) {
                *slot = value;
            }
        }
    }

    Ok(walls)
}
