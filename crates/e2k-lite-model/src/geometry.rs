// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placed structural elements
//!
//! Elements are the final stage of an import: connectivity joined with its
//! per-story assignment and the point coordinates, yielding positioned
//! geometry.

use crate::{EntityId, FrameModifiers};
use serde::{Deserialize, Serialize};

/// 3D position `[x, y, z]`
pub type Position = [f64; 3];

/// Beam, column or brace placed at one story
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameElement {
    pub id: EntityId,
    /// Line object name
    pub name: String,
    pub story: Option<EntityId>,
    pub section: Option<EntityId>,
    pub start: Position,
    pub end: Position,
    pub angle: f64,
    pub release: Option<String>,
    pub lateral: bool,
    pub modifiers: FrameModifiers,
}

impl FrameElement {
    pub fn length(&self) -> f64 {
        let [dx, dy, dz] = [0, 1, 2].map(|i| self.end[i] - self.start[i]);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Wall panel placed between a story and the story below
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WallElement {
    pub id: EntityId,
    pub name: String,
    pub story: Option<EntityId>,
    pub section: Option<EntityId>,
    /// Closed outline: base points, then top points in reverse
    pub outline: Vec<Position>,
}

/// Floor plate or footing placed at one story
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloorElement {
    pub id: EntityId,
    pub name: String,
    pub story: Option<EntityId>,
    pub section: Option<EntityId>,
    pub diaphragm: Option<EntityId>,
    pub surface_load: Option<EntityId>,
    pub outline: Vec<Position>,
}

impl FloorElement {
    /// Plan area of the outline (shoelace formula)
    pub fn plan_area(&self) -> f64 {
        let n = self.outline.len();
        if n < 3 {
            return 0.0;
        }
        let twice: f64 = (0..n)
            .map(|i| {
                let a = self.outline[i];
                let b = self.outline[(i + 1) % n];
                a[0] * b[1] - b[0] * a[1]
            })
            .sum();
        twice.abs() / 2.0
    }
}

/// Point joint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    pub id: EntityId,
    pub name: String,
    pub position: Position,
}

/// All placed elements of a model
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Elements {
    pub beams: Vec<FrameElement>,
    pub columns: Vec<FrameElement>,
    pub braces: Vec<FrameElement>,
    pub walls: Vec<WallElement>,
    pub floors: Vec<FloorElement>,
    pub footings: Vec<FloorElement>,
    pub joints: Vec<Joint>,
}

impl Elements {
    /// Total number of placed elements, joints excluded
    pub fn member_count(&self) -> usize {
        self.beams.len()
            + self.columns.len()
            + self.braces.len()
            + self.walls.len()
            + self.floors.len()
            + self.footings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.member_count() == 0 && self.joints.is_empty()
    }
}
