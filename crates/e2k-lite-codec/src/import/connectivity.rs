// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `$ LINE CONNECTIVITIES` and `$ AREA CONNECTIVITIES`

use crate::context::{data_lines, ParseContext};
use crate::sections::{AREA_CONNECTIVITIES, LINE_CONNECTIVITIES};
use crate::tokenizer::Token;
use e2k_lite_model::{
    AreaCategory, AreaConnectivity, IdCategory, LineCategory, LineConnectivity, NameIndex, Result,
    SkipReason,
};
use indexmap::IndexMap;

/// Parse `LINE "n" BEAM|COLUMN|BRACE "p1" "p2" [angle]` lines
pub fn parse_line_connectivities(
    body: &str,
    point_index: &NameIndex,
    ctx: &mut ParseContext,
) -> Result<IndexMap<String, LineConnectivity>> {
    let mut lines = IndexMap::new();

    for (line_no, line) in data_lines(body) {
        let Some(tokens) = ctx.tokenize(LINE_CONNECTIVITIES, line_no, line) else {
            continue;
        };
        let parsed = (
            tokens.starts_with("LINE"),
            tokens.quoted(1),
            tokens.get(2).and_then(Token::as_text).and_then(LineCategory::parse),
            tokens.quoted(3),
            tokens.quoted(4),
        );
        let (true, Some(name), Some(category), Some(point1), Some(point2)) = parsed else {
            ctx.skip(LINE_CONNECTIVITIES, line_no, line, SkipReason::Malformed);
            continue;
        };

        let connectivity = LineConnectivity {
            id: ctx.next_id(IdCategory::Line)?,
            name: name.to_string(),
            category,
            point1: point1.to_string(),
            point2: point2.to_string(),
            point1_id: ctx.resolve(point_index, LINE_CONNECTIVITIES, name, "point1", point1),
            point2_id: ctx.resolve(point_index, LINE_CONNECTIVITIES, name, "point2", point2),
            angle: tokens.number(5).unwrap_or(0.0),
        };
        lines.insert(name.to_string(), connectivity);
    }

    Ok(lines)
}

/// Parse `AREA "n" FLOOR|PANEL|WALL count "p1" .. "pcount"` lines
///
/// Exactly `count` quoted point names are read; anything after them is
/// ignored.
pub fn parse_area_connectivities(
    body: &str,
    point_index: &NameIndex,
    ctx: &mut ParseContext,
) -> Result<IndexMap<String, AreaConnectivity>> {
    let mut areas = IndexMap::new();

    for (line_no, line) in data_lines(body) {
        let Some(tokens) = ctx.tokenize(AREA_CONNECTIVITIES, line_no, line) else {
            continue;
        };
        let parsed = (
            tokens.starts_with("AREA"),
            tokens.quoted(1),
            tokens.get(2).and_then(Token::as_text).and_then(AreaCategory::parse),
            tokens.number(3).filter(|n| n.fract() == 0.0 && *n >= 1.0),
        );
        let (true, Some(name), Some(category), Some(count)) = parsed else {
            ctx.skip(AREA_CONNECTIVITIES, line_no, line, SkipReason::Malformed);
            continue;
        };

        let count = count as usize;
        let points: Vec<&str> = tokens.quoted_run(4).take(count).collect();
        if points.len() < count {
            ctx.skip(AREA_CONNECTIVITIES, line_no, line, SkipReason::Malformed);
            continue;
        }

        let mut point_ids = Vec::with_capacity(count);
        for (i, point) in points.iter().enumerate() {
            let field = format!("point{}", i + 1);
            point_ids.push(ctx.resolve(point_index, AREA_CONNECTIVITIES, name, &field, point));
        }

        let connectivity = AreaConnectivity {
            id: ctx.next_id(IdCategory::Area)?,
            name: name.to_string(),
            category,
            points: points.iter().map(|p| p.to_string()).collect(),
            point_ids,
        };
        areas.insert(name.to_string(), connectivity);
    }

    Ok(areas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use e2k_lite_model::EntityId;

    fn points() -> NameIndex {
        NameIndex::from_pairs(
            (1..=4).map(|i| (["1", "2", "3", "4"][i - 1], EntityId::new(IdCategory::Point, i as u32))),
            true,
        )
    }

    #[test]
    fn test_parse_lines() {
        let body = r#"LINE  "B1"  BEAM  "1"  "2"  0
  LINE  "C1"  COLUMN  "1"  "1"  1
  LINE  "D1"  BRACE  "1"  "9"
  LINE  "X1"  TRUSS  "1"  "2""#;

        let mut ctx = ParseContext::new(true);
        let lines = parse_line_connectivities(body, &points(), &mut ctx).unwrap();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines["B1"].category, LineCategory::Beam);
        assert_eq!(lines["C1"].category, LineCategory::Column);
        assert_eq!(lines["C1"].angle, 1.0);
        assert_eq!(lines["D1"].point2_id, None);
        assert_eq!(lines["D1"].point2, "9");
        assert_eq!(ctx.diagnostics.unresolved.len(), 1);
        assert_eq!(ctx.diagnostics.skipped_count(SkipReason::Malformed), 1);
    }

    #[test]
    fn test_area_reads_exactly_count_points() {
        let body = r#"AREA  "F1"  FLOOR  4  "1"  "2"  "3"  "4"  0  0  0  0
  AREA  "W1"  PANEL  4  "1"  "2"  "2"  "1"  1  1  0  0
  AREA  "F2"  FLOOR  3  "1"  "2"  "3"  "4"
  AREA  "F3"  FLOOR  5  "1"  "2"  "3"  "4""#;

        let mut ctx = ParseContext::new(true);
        let areas = parse_area_connectivities(body, &points(), &mut ctx).unwrap();

        assert_eq!(areas.len(), 3);
        assert_eq!(areas["F1"].points, ["1", "2", "3", "4"]);
        assert_eq!(areas["W1"].category, AreaCategory::Wall);
        assert_eq!(areas["F2"].points, ["1", "2", "3"]);
        assert!(areas["F2"].point_ids.iter().all(Option::is_some));
        assert!(!areas.contains_key("F3"));
        assert_eq!(ctx.diagnostics.skipped_count(SkipReason::Malformed), 1);
    }
}
