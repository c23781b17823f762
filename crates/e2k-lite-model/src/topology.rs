// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Points, connectivity and per-story assignments
//!
//! Connectivity defines topology only (endpoints or a ring of points).
//! Assignments bind a connectivity to a story and carry the section and
//! modifier data that applies at that story.

use crate::EntityId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Plan point from `$ POINT COORDINATES`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: EntityId,
    pub name: String,
    pub x: f64,
    pub y: f64,
    /// Optional offset, zero when omitted
    pub z: f64,
}

/// Line object category
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum LineCategory {
    Beam,
    Column,
    Brace,
}

impl LineCategory {
    pub fn keyword(self) -> &'static str {
        match self {
            LineCategory::Beam => "BEAM",
            LineCategory::Column => "COLUMN",
            LineCategory::Brace => "BRACE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "BEAM" => Some(LineCategory::Beam),
            "COLUMN" => Some(LineCategory::Column),
            "BRACE" => Some(LineCategory::Brace),
            _ => None,
        }
    }
}

/// Line connectivity from `$ LINE CONNECTIVITIES`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineConnectivity {
    pub id: EntityId,
    pub name: String,
    pub category: LineCategory,
    pub point1: String,
    pub point2: String,
    pub point1_id: Option<EntityId>,
    pub point2_id: Option<EntityId>,
    pub angle: f64,
}

/// Area object category
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum AreaCategory {
    Floor,
    Wall,
}

impl AreaCategory {
    pub fn keyword(self) -> &'static str {
        match self {
            AreaCategory::Floor => "FLOOR",
            AreaCategory::Wall => "PANEL",
        }
    }

    /// `PANEL` is the native keyword for walls, `WALL` is accepted as well
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "FLOOR" => Some(AreaCategory::Floor),
            "PANEL" | "WALL" => Some(AreaCategory::Wall),
            _ => None,
        }
    }
}

/// Area connectivity from `$ AREA CONNECTIVITIES`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AreaConnectivity {
    pub id: EntityId,
    pub name: String,
    pub category: AreaCategory,
    /// Ordered ring of point names
    pub points: Vec<String>,
    /// Resolved ring, `None` entries for unknown points
    pub point_ids: Vec<Option<EntityId>>,
}

/// Frame property modifiers, each defaulting to 1.0
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct FrameModifiers {
    pub area: f64,
    pub shear2: f64,
    pub shear3: f64,
    pub torsion: f64,
    pub i22: f64,
    pub i33: f64,
    pub mass: f64,
    pub weight: f64,
}

impl Default for FrameModifiers {
    fn default() -> Self {
        Self {
            area: 1.0,
            shear2: 1.0,
            shear3: 1.0,
            torsion: 1.0,
            i22: 1.0,
            i33: 1.0,
            mass: 1.0,
            weight: 1.0,
        }
    }
}

/// Assignment of a line object at one story
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineAssignment {
    pub id: EntityId,
    pub line: String,
    pub story: String,
    pub line_id: Option<EntityId>,
    pub story_id: Option<EntityId>,
    pub section: Option<String>,
    pub section_id: Option<EntityId>,
    /// End release code, e.g. `M2I M3I M2J M3J`
    pub release: Option<String>,
    /// Whether the member is part of the lateral system
    pub lateral: Option<bool>,
    /// Local axis orientation angle in degrees
    pub angle: Option<f64>,
    pub modifiers: FrameModifiers,
}

/// Assignment of an area object at one story
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AreaAssignment {
    pub id: EntityId,
    pub area: String,
    pub story: String,
    pub area_id: Option<EntityId>,
    pub story_id: Option<EntityId>,
    pub section: Option<String>,
    pub section_id: Option<EntityId>,
    pub diaphragm: Option<String>,
    pub diaphragm_id: Option<EntityId>,
    pub mesh_type: Option<String>,
    pub cardinal_point: Option<String>,
    /// Shell uniform load set name
    pub load_set: Option<String>,
}

/// Points, connectivity and assignments of a model
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    pub points: IndexMap<String, Point>,
    pub lines: IndexMap<String, LineConnectivity>,
    pub areas: IndexMap<String, AreaConnectivity>,
    /// Line assignments in source order; a line may appear once per story
    pub line_assignments: Vec<LineAssignment>,
    pub area_assignments: Vec<AreaAssignment>,
}

impl Topology {
    /// All assignments of one line object
    pub fn assignments_for_line<'a>(&'a self, line: &'a str) -> impl Iterator<Item = &'a LineAssignment> + 'a {
        self.line_assignments.iter().filter(move |a| a.line == line)
    }

    /// All assignments of one area object
    pub fn assignments_for_area<'a>(&'a self, area: &'a str) -> impl Iterator<Item = &'a AreaAssignment> + 'a {
        self.area_assignments.iter().filter(move |a| a.area == area)
    }
}
