// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Load patterns, combinations and shell uniform load sets

use crate::context::{data_lines, ParseContext};
use crate::sections::{LOAD_COMBINATIONS, LOAD_PATTERNS, SHELL_UNIFORM_LOAD_SETS};
use e2k_lite_model::{
    AreaAssignment, CombinationTerm, IdCategory, Level, LoadCombination, LoadDefinition, LoadKind,
    NameIndex, NameResolver, Result, SkipReason, SurfaceLoad, SurfaceLoadComponent,
};
use indexmap::IndexMap;

/// Parse `LOADPATTERN "n" TYPE "t" [SELFWEIGHT sw]` lines
pub fn parse_load_patterns(body: &str, ctx: &mut ParseContext) -> Result<IndexMap<String, LoadDefinition>> {
    let mut patterns = IndexMap::new();

    for (line_no, line) in data_lines(body) {
        let Some(tokens) = ctx.tokenize(LOAD_PATTERNS, line_no, line) else {
            continue;
        };
        let (true, Some(name), Some(kind)) =
            (tokens.starts_with("LOADPATTERN"), tokens.quoted(1), tokens.text_after("TYPE"))
        else {
            ctx.skip(LOAD_PATTERNS, line_no, line, SkipReason::Malformed);
            continue;
        };

        let pattern = LoadDefinition {
            id: ctx.next_id(IdCategory::LoadDefinition)?,
            name: name.to_string(),
            kind: LoadKind::parse(kind),
            self_weight: tokens.number_after("SELFWEIGHT").unwrap_or(0.0),
        };
        patterns.insert(name.to_string(), pattern);
    }

    Ok(patterns)
}

/// Parse load combinations
///
/// `COMBO "n" TYPE "t"` creates a combination and `COMBO "n" LOADCASE "l"
/// SF f` appends a term to it. A term may name a load pattern or an
/// earlier combination; terms of an unknown combination are dropped.
pub fn parse_load_combinations(
    body: &str,
    pattern_index: &NameIndex,
    ctx: &mut ParseContext,
) -> Result<IndexMap<String, LoadCombination>> {
    let mut combinations: IndexMap<String, LoadCombination> = IndexMap::new();
    let mut combination_index = NameIndex::new(ctx.is_case_insensitive());

    for (line_no, line) in data_lines(body) {
        let Some(tokens) = ctx.tokenize(LOAD_COMBINATIONS, line_no, line) else {
            continue;
        };
        let name = match (tokens.starts_with("COMBO"), tokens.quoted(1)) {
            (true, Some(name)) => name,
            _ => {
                ctx.skip(LOAD_COMBINATIONS, line_no, line, SkipReason::Malformed);
                continue;
            }
        };

        if let Some(kind) = tokens.text_after("TYPE") {
            let combination = LoadCombination {
                id: ctx.next_id(IdCategory::LoadCombination)?,
                name: name.to_string(),
                kind: kind.to_string(),
                terms: Vec::new(),
            };
            combination_index.insert(name, combination.id);
            combinations.insert(name.to_string(), combination);
            continue;
        }

        let (Some(load), Some(factor)) = (tokens.text_after("LOADCASE"), tokens.number_after("SF")) else {
            ctx.skip(LOAD_COMBINATIONS, line_no, line, SkipReason::Malformed);
            continue;
        };
        if !combinations.contains_key(name) {
            ctx.skip(LOAD_COMBINATIONS, line_no, line, SkipReason::Orphan);
            continue;
        }

        let load_id = pattern_index
            .resolve(load)
            .or_else(|| combination_index.resolve(load));
        if load_id.is_none() {
            ctx.diagnostics.unresolved_ref(LOAD_COMBINATIONS, name, "load", load);
        }
        if let Some(combination) = combinations.get_mut(name) {
            combination.terms.push(CombinationTerm {
                load: load.to_string(),
                load_id,
                factor,
            });
        }
    }

    Ok(combinations)
}

/// Parse `SHELLUNIFORMLOADSET "n" LOADPAT "l" VALUE v` lines
///
/// Each line adds one component; the set is created by its first line.
pub fn parse_shell_uniform_load_sets(
    body: &str,
    pattern_index: &NameIndex,
    ctx: &mut ParseContext,
) -> Result<IndexMap<String, SurfaceLoad>> {
    let mut sets: IndexMap<String, SurfaceLoad> = IndexMap::new();

    for (line_no, line) in data_lines(body) {
        let Some(tokens) = ctx.tokenize(SHELL_UNIFORM_LOAD_SETS, line_no, line) else {
            continue;
        };
        let parsed = (
            tokens.starts_with("SHELLUNIFORMLOADSET"),
            tokens.quoted(1),
            tokens.text_after("LOADPAT"),
            tokens.number_after("VALUE"),
        );
        let (true, Some(name), Some(load), Some(value)) = parsed else {
            ctx.skip(SHELL_UNIFORM_LOAD_SETS, line_no, line, SkipReason::Malformed);
            continue;
        };

        let load_id = ctx.resolve(pattern_index, SHELL_UNIFORM_LOAD_SETS, name, "load", load);
        if !sets.contains_key(name) {
            let set = SurfaceLoad {
                id: ctx.next_id(IdCategory::SurfaceLoad)?,
                name: name.to_string(),
                components: Vec::new(),
                levels: Vec::new(),
                level_ids: Vec::new(),
                floor_type_ids: Vec::new(),
            };
            sets.insert(name.to_string(), set);
        }
        if let Some(set) = sets.get_mut(name) {
            set.components.push(SurfaceLoadComponent {
                load: load.to_string(),
                load_id,
                value,
            });
        }
    }

    Ok(sets)
}

/// Attach to every load set the stories and floor types that apply it
///
/// A set is applied by each area assignment naming it through
/// `SHELLUNIFORMLOADSET`. Names that match no set are left to the element
/// stage to report.
pub fn link_load_sets(
    sets: &mut IndexMap<String, SurfaceLoad>,
    assignments: &[AreaAssignment],
    levels: &IndexMap<String, Level>,
    ctx: &ParseContext,
) {
    let set_index = ctx.index(sets, |s| s.id);

    for assignment in assignments {
        let Some(set_id) = assignment.load_set.as_deref().and_then(|name| set_index.resolve(name)) else {
            continue;
        };
        let floor_type = assignment
            .story_id
            .and_then(|id| levels.values().find(|level| level.id == id))
            .and_then(|level| level.floor_type);

        if let Some(set) = sets.values_mut().find(|set| set.id == set_id) {
            set.add_level(&assignment.story, assignment.story_id, floor_type);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATTERNS: &str = r#"LOADPATTERN "DEAD"  TYPE  "Dead"  SELFWEIGHT  1
  LOADPATTERN "SDL"  TYPE  "Super Dead"  SELFWEIGHT  0
  LOADPATTERN "LIVE"  TYPE  "Live"
  LOADPATTERN "NOTIONAL"  TYPE  "Notional""#;

    const COMBOS: &str = r#"COMBO "GRAV"  TYPE "Linear Add"
  COMBO "GRAV"  LOADCASE "DEAD"  SF 1.2
  COMBO "GRAV"  LOADCASE "LIVE"  SF 1.6
  COMBO "ENV"  TYPE "Envelope"
  COMBO "ENV"  LOADCASE "GRAV"  SF 1
  COMBO "ENV"  LOADCASE "WIND"  SF 1
  COMBO "LOST"  LOADCASE "DEAD"  SF 1"#;

    const LOAD_SETS: &str = r#"SHELLUNIFORMLOADSET "OFFICE"  LOADPAT "SDL"  VALUE 0.015
  SHELLUNIFORMLOADSET "OFFICE"  LOADPAT "LIVE"  VALUE 0.05"#;

    fn patterns(ctx: &mut ParseContext) -> (IndexMap<String, LoadDefinition>, NameIndex) {
        let patterns = parse_load_patterns(PATTERNS, ctx).unwrap();
        let index = ctx.index(&patterns, |p| p.id);
        (patterns, index)
    }

    #[test]
    fn test_parse_load_patterns() {
        let mut ctx = ParseContext::new(true);
        let (patterns, _) = patterns(&mut ctx);

        assert_eq!(patterns.len(), 4);
        assert_eq!(patterns["DEAD"].kind, LoadKind::Dead);
        assert_eq!(patterns["DEAD"].self_weight, 1.0);
        assert_eq!(patterns["SDL"].kind, LoadKind::SuperDead);
        assert_eq!(patterns["LIVE"].self_weight, 0.0);
        assert_eq!(patterns["NOTIONAL"].kind, LoadKind::Other("Notional".into()));
    }

    #[test]
    fn test_parse_combinations() {
        let mut ctx = ParseContext::new(true);
        let (_, index) = patterns(&mut ctx);
        let combos = parse_load_combinations(COMBOS, &index, &mut ctx).unwrap();

        assert_eq!(combos.len(), 2);
        let grav = &combos["GRAV"];
        assert_eq!(grav.kind, "Linear Add");
        assert_eq!(grav.terms.len(), 2);
        assert_eq!(grav.terms[1].factor, 1.6);

        let env = &combos["ENV"];
        assert_eq!(env.terms[0].load_id, Some(grav.id));
        assert_eq!(env.terms[1].load_id, None);

        assert_eq!(ctx.diagnostics.skipped_count(SkipReason::Orphan), 1);
        assert_eq!(ctx.diagnostics.unresolved.len(), 1);
    }

    #[test]
    fn test_parse_load_sets() {
        let mut ctx = ParseContext::new(true);
        let (_, index) = patterns(&mut ctx);
        let sets = parse_shell_uniform_load_sets(LOAD_SETS, &index, &mut ctx).unwrap();

        let office = &sets["OFFICE"];
        assert_eq!(office.components.len(), 2);
        assert!((office.total() - 0.065).abs() < 1e-12);
        assert!(office.components.iter().all(|c| c.load_id.is_some()));
        assert!(office.levels.is_empty());
    }

    #[test]
    fn test_load_sets_follow_area_assignments() {
        use crate::import::{parse_area_assigns, parse_area_connectivities, parse_points, parse_stories, AreaAssignRefs};

        let mut ctx = ParseContext::new(true);
        let (_, index) = patterns(&mut ctx);
        let mut sets = parse_shell_uniform_load_sets(LOAD_SETS, &index, &mut ctx).unwrap();

        let stories = "STORY \"L3\"  HEIGHT 12  SIMILARTO \"L2\"\n\
                       STORY \"L2\"  HEIGHT 12  MASTERSTORY \"Yes\"\n\
                       STORY \"BASE\"  ELEV 0";
        let (levels, floor_types) = parse_stories(stories, &mut ctx).unwrap();
        let points = parse_points("POINT \"1\"  0  0\n  POINT \"2\"  10  0\n  POINT \"3\"  10  10", &mut ctx).unwrap();
        let point_index = ctx.index(&points, |p| p.id);
        let areas = parse_area_connectivities("AREA \"F1\"  FLOOR  3  \"1\"  \"2\"  \"3\"", &point_index, &mut ctx).unwrap();

        let (area_index, story_index) = (ctx.index(&areas, |a| a.id), ctx.index(&levels, |l| l.id));
        let empty = NameIndex::new(true);
        let refs = AreaAssignRefs {
            areas: &areas,
            area_index: &area_index,
            stories: &story_index,
            floor_properties: &empty,
            wall_properties: &empty,
            diaphragms: &empty,
        };
        let assigns = "AREAASSIGN \"F1\"  \"L3\"  SHELLUNIFORMLOADSET \"office\"\n\
                       AREAASSIGN \"F1\"  \"L2\"  SHELLUNIFORMLOADSET \"OFFICE\"\n\
                       AREAASSIGN \"F1\"  \"BASE\"  SHELLUNIFORMLOADSET \"RETAIL\"";
        let assignments = parse_area_assigns(assigns, &refs, &mut ctx).unwrap();

        link_load_sets(&mut sets, &assignments, &levels, &ctx);

        let office = &sets["OFFICE"];
        assert_eq!(office.levels, ["L3", "L2"]);
        assert_eq!(office.level_ids, [levels["L3"].id, levels["L2"].id]);
        // L3 copies L2, so both stories share one floor type
        assert_eq!(office.floor_type_ids, [floor_types["L2"].id]);
        assert_eq!(ctx.diagnostics.unresolved.len(), 0);
    }
}
