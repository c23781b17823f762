// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stories, floor types and grids

use crate::EntityId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A story (level) of the building
///
/// Stories are declared top-down in the interchange format; `elevation` is
/// the accumulated height above the base story.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub id: EntityId,
    pub name: String,
    /// Story height, zero for the base story
    pub height: f64,
    pub elevation: f64,
    /// Whether this story is a master story other stories may copy
    pub master: bool,
    /// Master story this story is similar to
    pub similar_to: Option<String>,
    pub floor_type: Option<EntityId>,
}

impl Level {
    /// Elevation of the story directly below
    pub fn base_elevation(&self) -> f64 {
        self.elevation - self.height
    }

    /// The base story carries an explicit elevation and no height
    pub fn is_base(&self) -> bool {
        self.height == 0.0
    }
}

/// A floor type shared by all stories similar to one master story
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloorType {
    pub id: EntityId,
    pub name: String,
}

/// Axis a grid line is measured along
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum GridDirection {
    X,
    Y,
}

impl GridDirection {
    pub fn keyword(self) -> &'static str {
        match self {
            GridDirection::X => "X",
            GridDirection::Y => "Y",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "X" => Some(GridDirection::X),
            "Y" => Some(GridDirection::Y),
            _ => None,
        }
    }
}

/// Cartesian grid line
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub id: EntityId,
    /// Coordinate system the grid belongs to
    pub system: String,
    pub label: String,
    pub direction: GridDirection,
    pub coordinate: f64,
}

/// Levels, floor types and grids
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelLayout {
    /// Levels in source order (top-down)
    pub levels: IndexMap<String, Level>,
    pub floor_types: IndexMap<String, FloorType>,
    /// Grids keyed by label
    pub grids: IndexMap<String, Grid>,
}

impl ModelLayout {
    /// Levels ordered from the lowest elevation upwards
    pub fn levels_bottom_up(&self) -> Vec<&Level> {
        let mut levels: Vec<&Level> = self.levels.values().collect();
        levels.sort_by(|a, b| a.elevation.total_cmp(&b.elevation));
        levels
    }
}
