// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `$ MATERIAL PROPERTIES`
//!
//! A primary `MATERIAL "n" TYPE "k" GRADE "g"` line creates a material.
//! Secondary lines for the same name attach elastic constants (`SYMTYPE`,
//! `E`, `U`, `A`) or strengths (`FY`/`FU` for steel, `FC` for concrete).

use crate::context::{data_lines, ParseContext};
use crate::sections::MATERIAL_PROPERTIES;
use crate::tokenizer::LineTokens;
use e2k_lite_model::{IdCategory, Material, MaterialKind, MaterialStrength, Result, SkipReason, SymmetryKind};
use indexmap::IndexMap;

const ELASTIC_TAGS: [&str; 4] = ["SYMTYPE", "E", "U", "A"];
const STRENGTH_TAGS: [&str; 3] = ["FY", "FU", "FC"];

/// Parse the material table
pub fn parse_materials(body: &str, ctx: &mut ParseContext) -> Result<IndexMap<String, Material>> {
    let mut materials: IndexMap<String, Material> = IndexMap::new();

    for (line_no, line) in data_lines(body) {
        let Some(tokens) = ctx.tokenize(MATERIAL_PROPERTIES, line_no, line) else {
            continue;
        };
        let name = match (tokens.starts_with("MATERIAL"), tokens.quoted(1)) {
            (true, Some(name)) => name,
            _ => {
                ctx.skip(MATERIAL_PROPERTIES, line_no, line, SkipReason::Malformed);
                continue;
            }
        };

        if tokens.has("TYPE") {
            let kind = tokens.text_after("TYPE").map(str::parse::<MaterialKind>);
            let Some(Ok(kind)) = kind else {
                ctx.skip(MATERIAL_PROPERTIES, line_no, line, SkipReason::Malformed);
                continue;
            };
            let grade = tokens.text_after("GRADE").unwrap_or_default();
            let mut material = Material::new(ctx.next_id(IdCategory::Material)?, name, kind, grade);
            material.weight_per_volume = tokens.number_after("WEIGHTPERVOLUME");
            materials.insert(name.to_string(), material);
            continue;
        }

        let is_elastic = ELASTIC_TAGS.iter().any(|tag| tokens.has(tag));
        let is_strength = STRENGTH_TAGS.iter().any(|tag| tokens.has(tag));
        if !is_elastic && !is_strength {
            ctx.skip(MATERIAL_PROPERTIES, line_no, line, SkipReason::Malformed);
            continue;
        }

        let Some(material) = materials.get_mut(name) else {
            ctx.skip(MATERIAL_PROPERTIES, line_no, line, SkipReason::Orphan);
            continue;
        };

        if is_elastic {
            apply_elastic(material, &tokens);
        }
        if is_strength && !apply_strength(material, &tokens) {
            ctx.skip(MATERIAL_PROPERTIES, line_no, line, SkipReason::Malformed);
        }
    }

    Ok(materials)
}

fn apply_elastic(material: &mut Material, tokens: &LineTokens<'_>) {
    if let Some(symmetry) = tokens.text_after("SYMTYPE").and_then(SymmetryKind::parse) {
        material.symmetry = Some(symmetry);
    }
    if let Some(e) = tokens.number_after("E") {
        material.elastic_modulus = Some(e);
    }
    if let Some(u) = tokens.number_after("U") {
        material.poisson_ratio = Some(u);
    }
    if let Some(a) = tokens.number_after("A") {
        material.thermal_coefficient = Some(a);
    }
}

/// Merge strength values; `false` when the line does not fit the kind
fn apply_strength(material: &mut Material, tokens: &LineTokens<'_>) -> bool {
    match &mut material.strength {
        MaterialStrength::Steel { fy, fu } => {
            if tokens.has("FC") {
                return false;
            }
            if let Some(value) = tokens.number_after("FY") {
                *fy = Some(value);
            }
            if let Some(value) = tokens.number_after("FU") {
                *fu = Some(value);
            }
            true
        }
        MaterialStrength::Concrete { fc } => {
            if tokens.has("FY") || tokens.has("FU") {
                return false;
            }
            if let Some(value) = tokens.number_after("FC") {
                *fc = Some(value);
            }
            true
        }
    }
}
