// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Load patterns, combinations and shell uniform load sets

use crate::EntityId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Load pattern type
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum LoadKind {
    Dead,
    SuperDead,
    Live,
    ReducibleLive,
    Roof,
    Snow,
    Wind,
    Seismic,
    Other(String),
}

impl LoadKind {
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "DEAD" => LoadKind::Dead,
            "SUPER DEAD" | "SUPERDEAD" => LoadKind::SuperDead,
            "LIVE" => LoadKind::Live,
            "REDUCIBLE LIVE" | "REDUCELIVE" => LoadKind::ReducibleLive,
            "ROOF LIVE" | "ROOFLIVE" => LoadKind::Roof,
            "SNOW" => LoadKind::Snow,
            "WIND" => LoadKind::Wind,
            "SEISMIC" | "QUAKE" => LoadKind::Seismic,
            _ => LoadKind::Other(s.to_string()),
        }
    }

    pub fn keyword(&self) -> &str {
        match self {
            LoadKind::Dead => "Dead",
            LoadKind::SuperDead => "Super Dead",
            LoadKind::Live => "Live",
            LoadKind::ReducibleLive => "Reducible Live",
            LoadKind::Roof => "Roof Live",
            LoadKind::Snow => "Snow",
            LoadKind::Wind => "Wind",
            LoadKind::Seismic => "Seismic",
            LoadKind::Other(s) => s,
        }
    }
}

/// Load pattern from `$ LOAD PATTERNS`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadDefinition {
    pub id: EntityId,
    pub name: String,
    pub kind: LoadKind,
    /// Self-weight multiplier
    pub self_weight: f64,
}

/// One factored term of a combination
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombinationTerm {
    pub load: String,
    pub load_id: Option<EntityId>,
    pub factor: f64,
}

/// Load combination from `$ LOAD COMBINATIONS`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadCombination {
    pub id: EntityId,
    pub name: String,
    /// Combination type, e.g. `Linear Add` or `Envelope`
    pub kind: String,
    pub terms: Vec<CombinationTerm>,
}

/// One load pattern value inside a load set
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceLoadComponent {
    pub load: String,
    pub load_id: Option<EntityId>,
    pub value: f64,
}

/// Shell uniform load set from `$ SHELL UNIFORM LOAD SETS`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceLoad {
    pub id: EntityId,
    pub name: String,
    pub components: Vec<SurfaceLoadComponent>,
    /// Stories whose area assignments apply this set, in first-use order
    #[serde(default)]
    pub levels: Vec<String>,
    #[serde(default)]
    pub level_ids: Vec<EntityId>,
    /// Floor types of those stories, without repeats
    #[serde(default)]
    pub floor_type_ids: Vec<EntityId>,
}

impl SurfaceLoad {
    /// Total value of all components
    pub fn total(&self) -> f64 {
        self.components.iter().map(|c| c.value).sum()
    }

    /// Record a story that applies this set, with its floor type
    pub fn add_level(&mut self, name: &str, id: Option<EntityId>, floor_type: Option<EntityId>) {
        if !self.levels.iter().any(|known| known == name) {
            self.levels.push(name.to_string());
        }
        if let Some(id) = id.filter(|id| !self.level_ids.contains(id)) {
            self.level_ids.push(id);
        }
        if let Some(floor_type) = floor_type.filter(|ft| !self.floor_type_ids.contains(ft)) {
            self.floor_type_ids.push(floor_type);
        }
    }
}

/// Load tables of a model
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Loads {
    pub definitions: IndexMap<String, LoadDefinition>,
    pub combinations: IndexMap<String, LoadCombination>,
    pub surface_loads: IndexMap<String, SurfaceLoad>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IdCategory;

    #[test]
    fn test_load_kind_keeps_unknown_names() {
        assert_eq!(LoadKind::parse("dead"), LoadKind::Dead);
        assert_eq!(LoadKind::parse("Super Dead"), LoadKind::SuperDead);
        let other = LoadKind::parse("Notional");
        assert_eq!(other.keyword(), "Notional");
    }

    #[test]
    fn test_add_level_skips_repeats() {
        let mut set = SurfaceLoad {
            id: EntityId::new(IdCategory::SurfaceLoad, 1),
            name: "OFFICE".into(),
            components: Vec::new(),
            levels: Vec::new(),
            level_ids: Vec::new(),
            floor_type_ids: Vec::new(),
        };
        let (l2, l3) = (EntityId::new(IdCategory::Level, 2), EntityId::new(IdCategory::Level, 3));
        let typical = EntityId::new(IdCategory::FloorType, 1);

        set.add_level("L2", Some(l2), Some(typical));
        set.add_level("L3", Some(l3), Some(typical));
        set.add_level("L2", Some(l2), Some(typical));
        set.add_level("L9", None, None);

        assert_eq!(set.levels, ["L2", "L3", "L9"]);
        assert_eq!(set.level_ids, [l2, l3]);
        assert_eq!(set.floor_type_ids, [typical]);
    }
}
