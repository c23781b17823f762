// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Metadata, stories and grids

use super::{Record, SectionBody};
use e2k_lite_model::{Grid, Metadata, ModelLayout};
use indexmap::IndexMap;

pub fn write_program_information(metadata: &Metadata) -> String {
    let mut body = SectionBody::new();
    if let Some(program) = &metadata.program {
        body.push(
            Record::new("PROGRAM")
                .quoted(program)
                .optional_quoted("VERSION", metadata.version.as_deref()),
        );
    }
    body.finish()
}

pub fn write_controls(metadata: &Metadata) -> String {
    let mut body = SectionBody::new();
    if let Some(units) = &metadata.units {
        body.push(
            Record::new("UNITS")
                .quoted(&units.force)
                .quoted(&units.length)
                .quoted(&units.temperature),
        );
    }
    if let Some(title) = &metadata.title1 {
        body.push(Record::new("TITLE1").quoted(title));
    }
    if let Some(title) = &metadata.title2 {
        body.push(Record::new("TITLE2").quoted(title));
    }
    body.finish()
}

/// Stories from the top down; the base story carries its elevation
pub fn write_stories(layout: &ModelLayout) -> String {
    let mut body = SectionBody::new();
    for level in layout.levels_bottom_up().into_iter().rev() {
        let record = Record::new("STORY").quoted(&level.name);
        let record = if level.is_base() {
            record.number_field("ELEV", level.elevation)
        } else {
            let record = record.number_field("HEIGHT", level.height);
            let record = if level.master {
                record.quoted_field("MASTERSTORY", "Yes")
            } else {
                record
            };
            record.optional_quoted("SIMILARTO", level.similar_to.as_deref())
        };
        body.push(record);
    }
    body.finish()
}

pub fn write_grids(grids: &IndexMap<String, Grid>) -> String {
    let mut body = SectionBody::new();
    for grid in grids.values() {
        body.push(
            Record::new("GRID")
                .quoted(&grid.system)
                .quoted_field("LABEL", &grid.label)
                .quoted_field("DIR", grid.direction.keyword())
                .number_field("COORD", grid.coordinate),
        );
    }
    body.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ParseContext;
    use crate::import::{parse_grids, parse_metadata, parse_stories};

    const STORIES: &str = r#"STORY "ROOF"  HEIGHT 144  SIMILARTO "L2"
  STORY "L2"  HEIGHT 144  MASTERSTORY "Yes"
  STORY "L1"  HEIGHT 168
  STORY "BASE"  ELEV -12"#;

    #[test]
    fn test_stories_round_trip() {
        let mut ctx = ParseContext::new(true);
        let (levels, _) = parse_stories(STORIES, &mut ctx).unwrap();
        let layout = ModelLayout {
            levels,
            ..Default::default()
        };

        let text = write_stories(&layout);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], r#"  STORY  "ROOF"  HEIGHT  144  SIMILARTO  "L2""#);
        assert_eq!(lines[1], r#"  STORY  "L2"  HEIGHT  144  MASTERSTORY  "Yes""#);
        assert_eq!(lines[3], r#"  STORY  "BASE"  ELEV  -12"#);

        let (again, _) = parse_stories(&text, &mut ctx).unwrap();
        for (name, level) in &layout.levels {
            assert_eq!(again[name].elevation, level.elevation);
            assert_eq!(again[name].master, level.master);
            assert_eq!(again[name].similar_to, level.similar_to);
        }
    }

    #[test]
    fn test_metadata_round_trip() {
        let mut ctx = ParseContext::new(true);
        let metadata = parse_metadata(
            r#"PROGRAM "ETABS" VERSION "9.7.4""#,
            "UNITS \"KIP\" \"IN\" \"F\"\n  TITLE1 \"Tower\"",
            &mut ctx,
        )
        .unwrap();

        let program = write_program_information(&metadata);
        let controls = write_controls(&metadata);
        assert_eq!(controls.lines().count(), 2);
        assert_eq!(parse_metadata(&program, &controls, &mut ctx).unwrap(), metadata);
    }

    #[test]
    fn test_grids_round_trip() {
        let mut ctx = ParseContext::new(true);
        let grids = parse_grids(
            "GRID \"G1\" LABEL \"A\" DIR \"X\" COORD 0\n  GRID \"G1\" LABEL \"1\" DIR \"Y\" COORD 360.5",
            &mut ctx,
        )
        .unwrap();

        let again = parse_grids(&write_grids(&grids), &mut ctx).unwrap();
        assert_eq!(again.len(), 2);
        assert_eq!(again["1"].coordinate, 360.5);
        assert_eq!(again["1"].direction, grids["1"].direction);
        assert_eq!(again["A"].system, "G1");
    }
}
