// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Points, connectivity and per-story assignments

use super::{Record, SectionBody};
use crate::import::FRAME_MODIFIER_TAGS;
use e2k_lite_model::{AreaAssignment, AreaConnectivity, LineAssignment, LineConnectivity, Point};
use indexmap::IndexMap;

/// `POINT "n" x y [z]`; a zero offset is left out
pub fn write_points(points: &IndexMap<String, Point>) -> String {
    let mut body = SectionBody::new();
    for point in points.values() {
        let record = Record::new("POINT").quoted(&point.name).number(point.x).number(point.y);
        let record = if point.z != 0.0 { record.number(point.z) } else { record };
        body.push(record);
    }
    body.finish()
}

pub fn write_line_connectivities(lines: &IndexMap<String, LineConnectivity>) -> String {
    let mut body = SectionBody::new();
    for line in lines.values() {
        body.push(
            Record::new("LINE")
                .quoted(&line.name)
                .word(line.category.keyword())
                .quoted(&line.point1)
                .quoted(&line.point2)
                .number(line.angle),
        );
    }
    body.finish()
}

pub fn write_area_connectivities(areas: &IndexMap<String, AreaConnectivity>) -> String {
    let mut body = SectionBody::new();
    for area in areas.values() {
        let record = Record::new("AREA")
            .quoted(&area.name)
            .word(area.category.keyword())
            .number(area.points.len() as f64);
        body.push(area.points.iter().fold(record, |record, point| record.quoted(point)));
    }
    body.finish()
}

/// One line per (line, story) record; modifiers equal to 1 are left out
pub fn write_line_assigns(assignments: &[LineAssignment]) -> String {
    let mut body = SectionBody::new();
    for assignment in assignments {
        let lateral = assignment.lateral.map(|l| if l { "Yes" } else { "No" });
        let record = Record::new("LINEASSIGN")
            .quoted(&assignment.line)
            .quoted(&assignment.story)
            .optional_quoted("SECTION", assignment.section.as_deref())
            .optional_number("ANG", assignment.angle)
            .optional_quoted("RELEASE", assignment.release.as_deref())
            .optional_quoted("LATERAL", lateral);

        let m = &assignment.modifiers;
        let values = [m.area, m.shear2, m.shear3, m.torsion, m.i22, m.i33, m.mass, m.weight];
        let record = FRAME_MODIFIER_TAGS
            .iter()
            .zip(values)
            .filter(|(_, value)| *value != 1.0)
            .fold(record, |record, (tag, value)| record.number_field(tag, value));
        body.push(record);
    }
    body.finish()
}

pub fn write_area_assigns(assignments: &[AreaAssignment]) -> String {
    let mut body = SectionBody::new();
    for assignment in assignments {
        body.push(
            Record::new("AREAASSIGN")
                .quoted(&assignment.area)
                .quoted(&assignment.story)
                .optional_quoted("SECTION", assignment.section.as_deref())
                .optional_quoted("DIAPH", assignment.diaphragm.as_deref())
                .optional_quoted("MESHTYPE", assignment.mesh_type.as_deref())
                .optional_quoted("CARDINALPT", assignment.cardinal_point.as_deref())
                .optional_quoted("SHELLUNIFORMLOADSET", assignment.load_set.as_deref()),
        );
    }
    body.finish()
}
