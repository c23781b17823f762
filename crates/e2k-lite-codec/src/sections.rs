// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Canonical section names and ordering
//!
//! Documents are always emitted in the order of [`CATALOGUE`]. Sections the
//! catalogue does not know follow the known ones in encounter order, and
//! [`END_OF_MODEL_FILE`] closes every document.

pub const PROGRAM_INFORMATION: &str = "PROGRAM INFORMATION";
pub const CONTROLS: &str = "CONTROLS";
pub const STORIES: &str = "STORIES - IN SEQUENCE FROM TOP";
pub const GRIDS: &str = "GRIDS";
pub const DIAPHRAGM_NAMES: &str = "DIAPHRAGM NAMES";
pub const MATERIAL_PROPERTIES: &str = "MATERIAL PROPERTIES";
pub const FRAME_SECTIONS: &str = "FRAME SECTIONS";
pub const SLAB_PROPERTIES: &str = "SLAB PROPERTIES";
pub const DECK_PROPERTIES: &str = "DECK PROPERTIES";
pub const WALL_PROPERTIES: &str = "WALL PROPERTIES";
pub const POINT_COORDINATES: &str = "POINT COORDINATES";
pub const LINE_CONNECTIVITIES: &str = "LINE CONNECTIVITIES";
pub const AREA_CONNECTIVITIES: &str = "AREA CONNECTIVITIES";
pub const LINE_ASSIGNS: &str = "LINE ASSIGNS";
pub const AREA_ASSIGNS: &str = "AREA ASSIGNS";
pub const LOAD_PATTERNS: &str = "LOAD PATTERNS";
pub const LOAD_COMBINATIONS: &str = "LOAD COMBINATIONS";
pub const SHELL_UNIFORM_LOAD_SETS: &str = "SHELL UNIFORM LOAD SETS";
pub const END_OF_MODEL_FILE: &str = "END OF MODEL FILE";

/// Known section names in canonical document order
pub const CATALOGUE: &[&str] = &[
    PROGRAM_INFORMATION,
    CONTROLS,
    STORIES,
    GRIDS,
    DIAPHRAGM_NAMES,
    MATERIAL_PROPERTIES,
    FRAME_SECTIONS,
    "AUTO SELECT SECTION LISTS",
    "CONCRETE SECTIONS",
    "TENDON SECTIONS",
    SLAB_PROPERTIES,
    DECK_PROPERTIES,
    WALL_PROPERTIES,
    "LINK PROPERTIES",
    "FRICTION ISOLATOR PROPERTIES",
    "PANEL ZONES",
    "PIER/SPANDREL NAMES",
    POINT_COORDINATES,
    LINE_CONNECTIVITIES,
    AREA_CONNECTIVITIES,
    "GROUPS",
    "POINT ASSIGNS",
    LINE_ASSIGNS,
    AREA_ASSIGNS,
    LOAD_PATTERNS,
    "LOAD CASES",
    LOAD_COMBINATIONS,
    SHELL_UNIFORM_LOAD_SETS,
    "POINT OBJECT LOADS",
    "FRAME OBJECT LOADS",
    "SHELL OBJECT LOADS",
    "FUNCTIONS",
    "ANALYSIS OPTIONS",
    "MASS SOURCE",
    "DIMENSION LINES",
    "STEEL DESIGN PREFERENCES",
    "CONCRETE DESIGN PREFERENCES",
    "COMPOSITE DESIGN PREFERENCES",
    "WALL DESIGN PREFERENCES",
    "STEEL DESIGN OVERWRITES",
    "CONCRETE DESIGN OVERWRITES",
    "DEVELOPED ELEVATIONS",
    "PROJECT INFORMATION",
    "LOG",
];

/// Section ordering over [`CATALOGUE`]
#[derive(Clone, Copy, Debug, Default)]
pub struct SectionOrderTable;

impl SectionOrderTable {
    /// Sentinel index shared by all unknown section names
    pub const UNKNOWN: usize = CATALOGUE.len();

    /// Sort key of the terminal section
    const TERMINAL: usize = CATALOGUE.len() + 1;

    pub fn new() -> Self {
        SectionOrderTable
    }

    /// Catalogue position of a section name (case-insensitive exact match),
    /// or [`SectionOrderTable::UNKNOWN`]
    pub fn order_index(&self, name: &str) -> usize {
        let name = name.trim();
        CATALOGUE
            .iter()
            .position(|known| known.eq_ignore_ascii_case(name))
            .unwrap_or(Self::UNKNOWN)
    }

    fn sort_key(&self, name: &str) -> usize {
        if name.trim().eq_ignore_ascii_case(END_OF_MODEL_FILE) {
            Self::TERMINAL
        } else {
            self.order_index(name)
        }
    }

    /// Whether a name appears in the catalogue
    pub fn is_known(&self, name: &str) -> bool {
        self.order_index(name) != Self::UNKNOWN
    }

    /// Stable-sort items by the section name `key` returns
    ///
    /// Unknown names keep their relative order after all known ones; the
    /// terminal section goes last.
    pub fn sort_by_name<T, F>(&self, items: &mut [T], key: F)
    where
        F: Fn(&T) -> &str,
    {
        items.sort_by_key(|item| self.sort_key(key(item)));
    }

    /// Canonically ordered copy of a list of section names
    pub fn ordered<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
        let mut names: Vec<&str> = names.into_iter().collect();
        self.sort_by_name(&mut names, |name| *name);
        names
    }
}
