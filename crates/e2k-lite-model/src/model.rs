// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The assembled structural model graph

use crate::{Elements, Loads, ModelLayout, Properties, Topology};
use serde::{Deserialize, Serialize};

/// Unit system declared in `$ CONTROLS`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Units {
    pub force: String,
    pub length: String,
    pub temperature: String,
}

/// Project information from `$ PROGRAM INFORMATION` and `$ CONTROLS`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Originating program
    pub program: Option<String>,
    pub version: Option<String>,
    pub units: Option<Units>,
    pub title1: Option<String>,
    pub title2: Option<String>,
}

/// Complete structural building model
///
/// Produced by an import and consumed by an export. Optional fields that
/// are `None` were either absent from the source or failed to resolve; the
/// import diagnostics say which.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuralModel {
    pub metadata: Metadata,
    pub layout: ModelLayout,
    pub properties: Properties,
    pub topology: Topology,
    pub loads: Loads,
    pub elements: Elements,
}

impl StructuralModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the model holds no entities at all
    pub fn is_empty(&self) -> bool {
        self.layout.levels.is_empty()
            && self.layout.grids.is_empty()
            && self.properties.materials.is_empty()
            && self.properties.frame_properties.is_empty()
            && self.properties.floor_properties.is_empty()
            && self.properties.wall_properties.is_empty()
            && self.properties.diaphragms.is_empty()
            && self.topology.points.is_empty()
            && self.topology.lines.is_empty()
            && self.topology.areas.is_empty()
            && self.loads.definitions.is_empty()
            && self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_is_empty() {
        assert!(StructuralModel::new().is_empty());
    }

    #[test]
    fn test_model_serializes() {
        let mut model = StructuralModel::new();
        model.metadata.program = Some("ETABS".into());
        model.metadata.units = Some(Units {
            force: "KIP".into(),
            length: "IN".into(),
            temperature: "F".into(),
        });

        let json = serde_json::to_string(&model).unwrap();
        let back: StructuralModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, model);
    }
}
