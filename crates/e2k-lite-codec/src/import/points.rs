// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `$ POINT COORDINATES`

use crate::context::{data_lines, ParseContext};
use crate::sections::POINT_COORDINATES;
use e2k_lite_model::{IdCategory, Point, Result, SkipReason};
use indexmap::IndexMap;

/// Parse `POINT "n" x y [z]` lines
pub fn parse_points(body: &str, ctx: &mut ParseContext) -> Result<IndexMap<String, Point>> {
    let mut points = IndexMap::new();

    for (line_no, line) in data_lines(body) {
        let Some(tokens) = ctx.tokenize(POINT_COORDINATES, line_no, line) else {
            continue;
        };
        let parsed = (
            tokens.starts_with("POINT"),
            tokens.quoted(1),
            tokens.number(2),
            tokens.number(3),
        );
        let (true, Some(name), Some(x), Some(y)) = parsed else {
            ctx.skip(POINT_COORDINATES, line_no, line, SkipReason::Malformed);
            continue;
        };

        let point = Point {
            id: ctx.next_id(IdCategory::Point)?,
            name: name.to_string(),
            x,
            y,
            z: tokens.number(4).unwrap_or(0.0),
        };
        points.insert(name.to_string(), point);
    }

    Ok(points)
}
