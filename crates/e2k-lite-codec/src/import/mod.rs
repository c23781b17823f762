// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Section parsers
//!
//! Each parser is a free function over the body of its section. Names it
//! needs to resolve arrive as read-only [`NameIndex`](e2k_lite_model::NameIndex)
//! tables built from earlier stages. A repeated name replaces the earlier
//! entity in place.

pub mod assignments;
pub mod connectivity;
pub mod deck_catalogue;
pub mod diaphragms;
pub mod elements;
pub mod floors;
pub mod frames;
pub mod layout;
pub mod loads;
pub mod materials;
pub mod metadata;
pub mod points;
pub mod walls;

pub use assignments::{
    parse_area_assigns, parse_line_assigns, AreaAssignRefs, LineAssignRefs, FRAME_MODIFIER_TAGS,
};
pub use connectivity::{parse_area_connectivities, parse_line_connectivities};
pub use deck_catalogue::{match_deck_profile, DeckProfile, DECK_PROFILES};
pub use diaphragms::parse_diaphragms;
pub use elements::build_elements;
pub use floors::{parse_deck_properties, parse_slab_properties};
pub use frames::{
    classify_concrete_shape, classify_material_kind, classify_steel_shape, parse_frame_sections,
    CONCRETE_SHAPE_RULES, MATERIAL_KIND_RULES, STEEL_SHAPE_RULES,
};
pub use layout::{parse_grids, parse_stories};
pub use loads::{
    link_load_sets, parse_load_combinations, parse_load_patterns, parse_shell_uniform_load_sets,
};
pub use materials::parse_materials;
pub use metadata::parse_metadata;
pub use points::parse_points;
pub use walls::parse_wall_properties;
