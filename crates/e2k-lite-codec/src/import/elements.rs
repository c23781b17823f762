// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placed elements
//!
//! Joins connectivity, per-story assignments and point coordinates into
//! positioned geometry. Only resolved references are followed; an
//! assignment whose object, story or points did not resolve places
//! nothing.

use crate::context::ParseContext;
use crate::sections::AREA_ASSIGNS;
use e2k_lite_model::{
    AreaAssignment, AreaCategory, AreaConnectivity, Elements, EntityId, FloorElement,
    FloorProperties, FrameElement, IdCategory, Joint, Level, LineAssignment, LineCategory,
    LineConnectivity, Loads, ModelLayout, NameIndex, Point, Position, Properties, Result,
    Topology, WallElement,
};
use rustc_hash::FxHashMap;

/// Id-keyed views over the tables the join reads
struct Lookup<'a> {
    points: FxHashMap<EntityId, &'a Point>,
    levels: FxHashMap<EntityId, &'a Level>,
    lines: FxHashMap<EntityId, &'a LineConnectivity>,
    areas: FxHashMap<EntityId, &'a AreaConnectivity>,
    floors: FxHashMap<EntityId, &'a FloorProperties>,
}

impl<'a> Lookup<'a> {
    fn new(layout: &'a ModelLayout, properties: &'a Properties, topology: &'a Topology) -> Self {
        Self {
            points: topology.points.values().map(|p| (p.id, p)).collect(),
            levels: layout.levels.values().map(|l| (l.id, l)).collect(),
            lines: topology.lines.values().map(|l| (l.id, l)).collect(),
            areas: topology.areas.values().map(|a| (a.id, a)).collect(),
            floors: properties.floor_properties.values().map(|f| (f.id, f)).collect(),
        }
    }

    fn point(&self, id: Option<EntityId>) -> Option<&'a Point> {
        id.and_then(|id| self.points.get(&id).copied())
    }

    fn ring(&self, area: &AreaConnectivity) -> Option<Vec<&'a Point>> {
        area.point_ids.iter().map(|id| self.point(*id)).collect()
    }
}

fn at(point: &Point, elevation: f64) -> Position {
    [point.x, point.y, elevation + point.z]
}

/// Build placed elements from the parsed tables
pub fn build_elements(
    layout: &ModelLayout,
    properties: &Properties,
    topology: &Topology,
    loads: &Loads,
    ctx: &mut ParseContext,
) -> Result<Elements> {
    let lookup = Lookup::new(layout, properties, topology);
    let load_sets = ctx.index(&loads.surface_loads, |s| s.id);
    let mut elements = Elements::default();

    for assignment in &topology.line_assignments {
        let Some(frame) = place_frame(&lookup, assignment, ctx)? else {
            continue;
        };
        let category = assignment
            .line_id
            .and_then(|id| lookup.lines.get(&id))
            .map(|line| line.category);
        match category {
            Some(LineCategory::Beam) => elements.beams.push(frame),
            Some(LineCategory::Column) => elements.columns.push(frame),
            Some(LineCategory::Brace) => elements.braces.push(frame),
            None => {}
        }
    }

    for assignment in &topology.area_assignments {
        let Some(area) = assignment.area_id.and_then(|id| lookup.areas.get(&id).copied()) else {
            continue;
        };
        let Some(level) = assignment.story_id.and_then(|id| lookup.levels.get(&id).copied()) else {
            continue;
        };
        let Some(ring) = lookup.ring(area) else {
            continue;
        };

        match area.category {
            AreaCategory::Wall => {
                elements.walls.push(WallElement {
                    id: ctx.next_id(IdCategory::Element)?,
                    name: area.name.clone(),
                    story: Some(level.id),
                    section: assignment.section_id,
                    outline: wall_outline(&ring, level),
                });
            }
            AreaCategory::Floor => {
                let surface_load = surface_load(assignment, &load_sets, ctx);
                let floor = FloorElement {
                    id: ctx.next_id(IdCategory::Element)?,
                    name: area.name.clone(),
                    story: Some(level.id),
                    section: assignment.section_id,
                    diaphragm: assignment.diaphragm_id,
                    surface_load,
                    outline: ring.iter().map(|p| at(p, level.elevation)).collect(),
                };
                let is_foundation = assignment
                    .section_id
                    .and_then(|id| lookup.floors.get(&id))
                    .and_then(|f| f.slab_type)
                    .is_some_and(|t| t.is_foundation());
                if is_foundation {
                    elements.footings.push(floor);
                } else {
                    elements.floors.push(floor);
                }
            }
        }
    }

    for point in topology.points.values() {
        elements.joints.push(Joint {
            id: ctx.next_id(IdCategory::Element)?,
            name: point.name.clone(),
            position: [point.x, point.y, point.z],
        });
    }

    Ok(elements)
}

/// Beams sit at the story elevation; columns and braces rise from the
/// story below to the story
fn place_frame(
    lookup: &Lookup<'_>,
    assignment: &LineAssignment,
    ctx: &mut ParseContext,
) -> Result<Option<FrameElement>> {
    let Some(line) = assignment.line_id.and_then(|id| lookup.lines.get(&id).copied()) else {
        return Ok(None);
    };
    let Some(level) = assignment.story_id.and_then(|id| lookup.levels.get(&id).copied()) else {
        return Ok(None);
    };
    let (Some(p1), Some(p2)) = (lookup.point(line.point1_id), lookup.point(line.point2_id)) else {
        return Ok(None);
    };

    let bottom = match line.category {
        LineCategory::Beam => level.elevation,
        LineCategory::Column | LineCategory::Brace => level.base_elevation(),
    };

    Ok(Some(FrameElement {
        id: ctx.next_id(IdCategory::Element)?,
        name: line.name.clone(),
        story: Some(level.id),
        section: assignment.section_id,
        start: at(p1, bottom),
        end: at(p2, level.elevation),
        angle: assignment.angle.unwrap_or(line.angle),
        release: assignment.release.clone(),
        lateral: assignment.lateral.unwrap_or(false),
        modifiers: assignment.modifiers,
    }))
}

/// Distinct ring points at the story below, then the same points at the
/// story in reverse
fn wall_outline(ring: &[&Point], level: &Level) -> Vec<Position> {
    let mut base: Vec<&Point> = Vec::with_capacity(ring.len());
    for point in ring {
        if !base.iter().any(|p| p.id == point.id) {
            base.push(*point);
        }
    }

    let bottom = level.base_elevation();
    base.iter()
        .map(|p| at(p, bottom))
        .chain(base.iter().rev().map(|p| at(p, level.elevation)))
        .collect()
}

fn surface_load(
    assignment: &AreaAssignment,
    load_sets: &NameIndex,
    ctx: &mut ParseContext,
) -> Option<EntityId> {
    let name = assignment.load_set.as_deref()?;
    ctx.resolve(load_sets, AREA_ASSIGNS, &assignment.area, "load_set", name)
}
