// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core identifier and shared enumeration types
//!
//! Identifiers are allocated per category while a document is imported.
//! They are unique within a process run but are regenerated every time a
//! document is parsed, so they must never be persisted as stable keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category an identifier was allocated for
///
/// Every category owns an independent counter, so `MAT1` and `FRM1` can
/// coexist in the same model.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum IdCategory {
    Material,
    FrameProperty,
    FloorProperty,
    WallProperty,
    Diaphragm,
    FloorType,
    Level,
    Grid,
    Point,
    Line,
    Area,
    LineAssignment,
    AreaAssignment,
    LoadDefinition,
    LoadCombination,
    SurfaceLoad,
    Element,
}

impl IdCategory {
    /// Number of categories
    pub const COUNT: usize = 17;

    /// All categories, in allocation-table order
    pub const ALL: [IdCategory; IdCategory::COUNT] = [
        IdCategory::Material,
        IdCategory::FrameProperty,
        IdCategory::FloorProperty,
        IdCategory::WallProperty,
        IdCategory::Diaphragm,
        IdCategory::FloorType,
        IdCategory::Level,
        IdCategory::Grid,
        IdCategory::Point,
        IdCategory::Line,
        IdCategory::Area,
        IdCategory::LineAssignment,
        IdCategory::AreaAssignment,
        IdCategory::LoadDefinition,
        IdCategory::LoadCombination,
        IdCategory::SurfaceLoad,
        IdCategory::Element,
    ];

    /// Position of this category in [`IdCategory::ALL`]
    pub fn slot(self) -> usize {
        self as usize
    }

    /// Short prefix used when displaying an identifier
    pub fn prefix(self) -> &'static str {
        match self {
            IdCategory::Material => "MAT",
            IdCategory::FrameProperty => "FRM",
            IdCategory::FloorProperty => "FLR",
            IdCategory::WallProperty => "WAL",
            IdCategory::Diaphragm => "DIA",
            IdCategory::FloorType => "FT",
            IdCategory::Level => "LVL",
            IdCategory::Grid => "GRD",
            IdCategory::Point => "PT",
            IdCategory::Line => "LN",
            IdCategory::Area => "AR",
            IdCategory::LineAssignment => "LA",
            IdCategory::AreaAssignment => "AA",
            IdCategory::LoadDefinition => "LD",
            IdCategory::LoadCombination => "LC",
            IdCategory::SurfaceLoad => "SL",
            IdCategory::Element => "EL",
        }
    }
}

impl fmt::Display for IdCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Type-safe entity identifier
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct EntityId {
    pub category: IdCategory,
    pub index: u32,
}

impl EntityId {
    pub fn new(category: IdCategory, index: u32) -> Self {
        Self { category, index }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.category.prefix(), self.index)
    }
}

/// Structural material family
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum MaterialKind {
    Steel,
    Concrete,
}

impl MaterialKind {
    /// Keyword used in the interchange format
    pub fn keyword(self) -> &'static str {
        match self {
            MaterialKind::Steel => "Steel",
            MaterialKind::Concrete => "Concrete",
        }
    }
}

impl FromStr for MaterialKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "STEEL" => Ok(MaterialKind::Steel),
            "CONCRETE" => Ok(MaterialKind::Concrete),
            other => Err(format!("unknown material type {other:?}")),
        }
    }
}

/// Shell modeling type shared by floor and wall properties
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum ModelingType {
    #[default]
    ShellThin,
    ShellThick,
    Membrane,
    Layered,
}

impl ModelingType {
    pub fn keyword(self) -> &'static str {
        match self {
            ModelingType::ShellThin => "ShellThin",
            ModelingType::ShellThick => "ShellThick",
            ModelingType::Membrane => "Membrane",
            ModelingType::Layered => "Layered",
        }
    }

    /// Parse a modeling type keyword, falling back to `ShellThin`
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "SHELLTHICK" => ModelingType::ShellThick,
            "MEMBRANE" => ModelingType::Membrane,
            "LAYERED" => ModelingType::Layered,
            _ => ModelingType::ShellThin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_display() {
        let id = EntityId::new(IdCategory::Material, 3);
        assert_eq!(id.to_string(), "MAT3");
        assert_eq!(EntityId::new(IdCategory::Point, 12).to_string(), "PT12");
    }

    #[test]
    fn test_category_slots_match_table() {
        for (i, category) in IdCategory::ALL.iter().enumerate() {
            assert_eq!(category.slot(), i);
        }
    }

    #[test]
    fn test_material_kind_parse() {
        assert_eq!("steel".parse::<MaterialKind>(), Ok(MaterialKind::Steel));
        assert_eq!("Concrete".parse::<MaterialKind>(), Ok(MaterialKind::Concrete));
        assert!("Aluminum".parse::<MaterialKind>().is_err());
    }

    #[test]
    fn test_modeling_type_fallback() {
        assert_eq!(ModelingType::parse("membrane"), ModelingType::Membrane);
        assert_eq!(ModelingType::parse("whatever"), ModelingType::ShellThin);
    }
}
