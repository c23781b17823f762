// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `$ SLAB PROPERTIES` and `$ DECK PROPERTIES`
//!
//! Both sections feed the same floor property table. Slabs and decks share
//! a namespace, so a deck named like an earlier slab replaces it.

use crate::context::{data_lines, ParseContext};
use crate::import::deck_catalogue::match_deck_profile;
use crate::sections::{DECK_PROPERTIES, SLAB_PROPERTIES};
use crate::tokenizer::LineTokens;
use e2k_lite_model::{
    DeckGeometry, FloorProperties, FloorPropertyKind, IdCategory, ModelingType, NameIndex, Result,
    SkipReason, SlabType,
};
use indexmap::IndexMap;

/// Modeling type assumed for a deck that does not declare one
pub const DEFAULT_DECK_MODELING_TYPE: ModelingType = ModelingType::Membrane;

/// Parse slab properties into `floors`
pub fn parse_slab_properties(
    body: &str,
    material_index: &NameIndex,
    floors: &mut IndexMap<String, FloorProperties>,
    ctx: &mut ParseContext,
) -> Result<()> {
    for (line_no, line) in data_lines(body) {
        let Some(tokens) = ctx.tokenize(SLAB_PROPERTIES, line_no, line) else {
            continue;
        };
        let Some(name) = shell_prop_name(&tokens) else {
            ctx.skip(SLAB_PROPERTIES, line_no, line, SkipReason::Malformed);
            continue;
        };

        let material_name = tokens.text_after("MATERIAL");
        let material = ctx.resolve_opt(material_index, SLAB_PROPERTIES, name, "material", material_name);

        let slab = FloorProperties {
            id: ctx.next_id(IdCategory::FloorProperty)?,
            name: name.to_string(),
            kind: FloorPropertyKind::Slab,
            material_name: material_name.map(str::to_string),
            material,
            thickness: tokens.number_after("SLABTHICKNESS"),
            modeling_type: tokens
                .text_after("MODELINGTYPE")
                .map(ModelingType::parse)
                .unwrap_or_default(),
            slab_type: Some(tokens.text_after("SLABTYPE").map(SlabType::parse).unwrap_or_default()),
            deck_type: None,
            deck: None,
            deck_profile: None,
        };
        floors.insert(name.to_string(), slab);
    }

    Ok(())
}

/// Parse deck properties into `floors`
pub fn parse_deck_properties(
    body: &str,
    material_index: &NameIndex,
    floors: &mut IndexMap<String, FloorProperties>,
    ctx: &mut ParseContext,
) -> Result<()> {
    for (line_no, line) in data_lines(body) {
        let Some(tokens) = ctx.tokenize(DECK_PROPERTIES, line_no, line) else {
            continue;
        };
        let (Some(name), Some(deck_type)) = (shell_prop_name(&tokens), tokens.text_after("DECKTYPE")) else {
            ctx.skip(DECK_PROPERTIES, line_no, line, SkipReason::Malformed);
            continue;
        };

        let kind = if deck_type.to_ascii_uppercase().contains("UNFILLED") {
            FloorPropertyKind::UnfilledDeck
        } else {
            FloorPropertyKind::FilledDeck
        };

        let material_name = tokens.text_after("CONCMATERIAL");
        let material = ctx.resolve_opt(material_index, DECK_PROPERTIES, name, "material", material_name);

        let geometry = deck_geometry(&tokens);
        let deck_profile = match_deck_profile(Some(deck_type), name, &geometry);
        if let Some(profile) = &deck_profile {
            log::trace!("deck {name} matched {} by {:?}", profile.profile, profile.method);
        }

        let deck = FloorProperties {
            id: ctx.next_id(IdCategory::FloorProperty)?,
            name: name.to_string(),
            kind,
            material_name: material_name.map(str::to_string),
            material,
            thickness: tokens.number_after("DECKSLABDEPTH"),
            modeling_type: tokens
                .text_after("MODELINGTYPE")
                .map(ModelingType::parse)
                .unwrap_or(DEFAULT_DECK_MODELING_TYPE),
            slab_type: None,
            deck_type: Some(deck_type.to_string()),
            deck: Some(geometry),
            deck_profile,
        };
        floors.insert(name.to_string(), deck);
    }

    Ok(())
}

fn shell_prop_name<'a>(tokens: &LineTokens<'a>) -> Option<&'a str> {
    if tokens.starts_with("SHELLPROP") {
        tokens.quoted(1)
    } else {
        None
    }
}

fn deck_geometry(tokens: &LineTokens<'_>) -> DeckGeometry {
    DeckGeometry {
        rib_depth: tokens.number_after("DECKRIBDEPTH"),
        rib_width_top: tokens.number_after("DECKRIBWIDTHTOP"),
        rib_width_bottom: tokens.number_after("DECKRIBWIDTHBOTTOM"),
        rib_spacing: tokens.number_after("DECKRIBSPACING"),
        shear_thickness: tokens.number_after("DECKSHEARTHICKNESS"),
        stud_diameter: tokens.number_after("SHEARSTUDDIAM"),
        stud_height: tokens.number_after("SHEARSTUDHEIGHT"),
        stud_fu: tokens.number_after("SHEARSTUDFU"),
    }
}
