// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `$ STORIES - IN SEQUENCE FROM TOP` and `$ GRIDS`

use crate::context::{data_lines, ParseContext};
use crate::sections::{GRIDS, STORIES};
use e2k_lite_model::{
    FloorType, Grid, GridDirection, IdCategory, Level, NameResolver, Result, SkipReason,
};
use indexmap::IndexMap;

/// One story line before elevations are known
struct StoryLine<'a> {
    name: &'a str,
    height: f64,
    elevation: Option<f64>,
    master: bool,
    similar_to: Option<&'a str>,
}

/// Parse stories and derive their floor types
///
/// Stories are listed from the top down. Elevations accumulate from the
/// bottom: a story with `ELEV` restarts the running elevation, every other
/// story sits `HEIGHT` above the one below it. Each master story (declared
/// with `MASTERSTORY "Yes"`, or similar to nothing) owns a floor type named
/// after it, and similar stories share their master's floor type.
pub fn parse_stories(
    body: &str,
    ctx: &mut ParseContext,
) -> Result<(IndexMap<String, Level>, IndexMap<String, FloorType>)> {
    let mut lines = Vec::new();

    for (line_no, line) in data_lines(body) {
        let Some(tokens) = ctx.tokenize(STORIES, line_no, line) else {
            continue;
        };
        let name = match (tokens.starts_with("STORY"), tokens.quoted(1)) {
            (true, Some(name)) => name,
            _ => {
                ctx.skip(STORIES, line_no, line, SkipReason::Malformed);
                continue;
            }
        };
        let height = tokens.number_after("HEIGHT");
        let elevation = tokens.number_after("ELEV");
        if height.is_none() && elevation.is_none() {
            ctx.skip(STORIES, line_no, line, SkipReason::Malformed);
            continue;
        }

        lines.push(StoryLine {
            name,
            height: height.unwrap_or(0.0),
            elevation,
            master: tokens
                .text_after("MASTERSTORY")
                .is_some_and(|flag| flag.eq_ignore_ascii_case("YES")),
            similar_to: tokens.text_after("SIMILARTO"),
        });
    }

    let mut elevations = vec![0.0; lines.len()];
    let mut running = 0.0;
    for (i, story) in lines.iter().enumerate().rev() {
        running = match story.elevation {
            Some(elevation) => elevation,
            None => running + story.height,
        };
        elevations[i] = running;
    }

    let mut floor_types = IndexMap::new();
    for story in lines.iter().filter(|s| s.master || s.similar_to.is_none()) {
        let floor_type = FloorType {
            id: ctx.next_id(IdCategory::FloorType)?,
            name: story.name.to_string(),
        };
        floor_types.insert(story.name.to_string(), floor_type);
    }
    let floor_type_index = ctx.index(&floor_types, |f| f.id);

    let mut levels = IndexMap::new();
    for (story, elevation) in lines.iter().zip(elevations) {
        let floor_type = match story.similar_to {
            Some(master) if !story.master => {
                ctx.resolve(&floor_type_index, STORIES, story.name, "similar_to", master)
            }
            _ => floor_type_index.resolve(story.name),
        };

        let level = Level {
            id: ctx.next_id(IdCategory::Level)?,
            name: story.name.to_string(),
            height: story.height,
            elevation,
            master: story.master,
            similar_to: story.similar_to.map(str::to_string),
            floor_type,
        };
        levels.insert(story.name.to_string(), level);
    }

    Ok((levels, floor_types))
}

/// Parse Cartesian grid lines, keyed by label
///
/// `COORDSYSTEM` and `GRIDSYSTEM` lines describe the system rather than a
/// grid line and are passed over.
pub fn parse_grids(body: &str, ctx: &mut ParseContext) -> Result<IndexMap<String, Grid>> {
    let mut grids = IndexMap::new();

    for (line_no, line) in data_lines(body) {
        let Some(tokens) = ctx.tokenize(GRIDS, line_no, line) else {
            continue;
        };
        if tokens.starts_with("COORDSYSTEM") || tokens.starts_with("GRIDSYSTEM") {
            continue;
        }

        let parsed = (
            tokens.starts_with("GRID"),
            tokens.quoted(1),
            tokens.text_after("LABEL"),
            tokens.text_after("DIR").and_then(GridDirection::parse),
            tokens.number_after("COORD"),
        );
        let (true, Some(system), Some(label), Some(direction), Some(coordinate)) = parsed else {
            ctx.skip(GRIDS, line_no, line, SkipReason::Malformed);
            continue;
        };

        let grid = Grid {
            id: ctx.next_id(IdCategory::Grid)?,
            system: system.to_string(),
            label: label.to_string(),
            direction,
            coordinate,
        };
        grids.insert(label.to_string(), grid);
    }

    Ok(grids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const STORIES_BODY: &str = r#"STORY "ROOF"  HEIGHT 12  SIMILARTO "L2"
  STORY "L3"  HEIGHT 12  SIMILARTO "L2"
  STORY "L2"  HEIGHT 14  MASTERSTORY "Yes"
  STORY "BASE"  ELEV 0"#;

    const GRIDS_BODY: &str = r#"COORDSYSTEM "G1"  TYPE "CARTESIAN"  BUBBLESIZE 60
  GRID "G1"  LABEL "A"  DIR "X"  COORD 0  VISIBLE "Yes"
  GRID "G1"  LABEL "B"  DIR "X"  COORD 360
  GRID "G1"  LABEL "1"  DIR "Y"  COORD 0
  GRID "G1"  LABEL "Z"  DIR "Q"  COORD 0"#;

    #[test]
    fn test_story_elevations_accumulate_from_base() {
        let mut ctx = ParseContext::new(true);
        let (levels, _) = parse_stories(STORIES_BODY, &mut ctx).unwrap();

        let names: Vec<&str> = levels.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, ["ROOF", "L3", "L2", "BASE"]);
        assert_relative_eq!(levels["BASE"].elevation, 0.0);
        assert_relative_eq!(levels["L2"].elevation, 14.0);
        assert_relative_eq!(levels["L3"].elevation, 26.0);
        assert_relative_eq!(levels["ROOF"].elevation, 38.0);
        assert!(levels["BASE"].is_base());
    }

    #[test]
    fn test_floor_types_follow_masters() {
        let mut ctx = ParseContext::new(true);
        let (levels, floor_types) = parse_stories(STORIES_BODY, &mut ctx).unwrap();

        let names: Vec<&str> = floor_types.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, ["L2", "BASE"]);

        let l2 = floor_types["L2"].id;
        assert_eq!(levels["ROOF"].floor_type, Some(l2));
        assert_eq!(levels["L3"].floor_type, Some(l2));
        assert_eq!(levels["L2"].floor_type, Some(l2));
        assert_eq!(levels["BASE"].floor_type, Some(floor_types["BASE"].id));
        assert!(ctx.diagnostics.is_clean());
    }

    #[test]
    fn test_unknown_master_is_unresolved() {
        let mut ctx = ParseContext::new(true);
        let (levels, _) = parse_stories("STORY \"L1\" HEIGHT 10 SIMILARTO \"NOPE\"\n STORY \"B\" ELEV -5", &mut ctx).unwrap();
        assert_eq!(levels["L1"].floor_type, None);
        assert_relative_eq!(levels["L1"].elevation, 5.0);
        assert_eq!(ctx.diagnostics.unresolved.len(), 1);
    }

    #[test]
    fn test_parse_grids() {
        let mut ctx = ParseContext::new(true);
        let grids = parse_grids(GRIDS_BODY, &mut ctx).unwrap();

        assert_eq!(grids.len(), 3);
        assert_eq!(grids["B"].direction, GridDirection::X);
        assert_relative_eq!(grids["B"].coordinate, 360.0);
        assert_eq!(grids["1"].direction, GridDirection::Y);
        assert_eq!(grids["A"].system, "G1");
        assert_eq!(ctx.diagnostics.skipped_count(SkipReason::Malformed), 1);
    }
}
