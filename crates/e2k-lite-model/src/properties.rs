// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Materials, section properties and diaphragms

use crate::{EntityId, MaterialKind, ModelingType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Material symmetry declared by `SYMTYPE`
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum SymmetryKind {
    Isotropic,
    Orthotropic,
    Anisotropic,
    Uniaxial,
}

impl SymmetryKind {
    pub fn keyword(self) -> &'static str {
        match self {
            SymmetryKind::Isotropic => "Isotropic",
            SymmetryKind::Orthotropic => "Orthotropic",
            SymmetryKind::Anisotropic => "Anisotropic",
            SymmetryKind::Uniaxial => "Uniaxial",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "ISOTROPIC" => Some(SymmetryKind::Isotropic),
            "ORTHOTROPIC" => Some(SymmetryKind::Orthotropic),
            "ANISOTROPIC" => Some(SymmetryKind::Anisotropic),
            "UNIAXIAL" => Some(SymmetryKind::Uniaxial),
            _ => None,
        }
    }
}

/// Kind-specific strength values
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub enum MaterialStrength {
    Steel { fy: Option<f64>, fu: Option<f64> },
    Concrete { fc: Option<f64> },
}

impl MaterialStrength {
    /// Empty strength record for a material kind
    pub fn empty(kind: MaterialKind) -> Self {
        match kind {
            MaterialKind::Steel => MaterialStrength::Steel { fy: None, fu: None },
            MaterialKind::Concrete => MaterialStrength::Concrete { fc: None },
        }
    }
}

/// Material definition from `$ MATERIAL PROPERTIES`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: EntityId,
    pub name: String,
    pub kind: MaterialKind,
    pub grade: String,
    pub weight_per_volume: Option<f64>,
    pub symmetry: Option<SymmetryKind>,
    /// Modulus of elasticity (`E`)
    pub elastic_modulus: Option<f64>,
    /// Poisson ratio (`U`)
    pub poisson_ratio: Option<f64>,
    /// Coefficient of thermal expansion (`A`)
    pub thermal_coefficient: Option<f64>,
    pub strength: MaterialStrength,
}

impl Material {
    /// Create a material carrying only its primary-line fields
    pub fn new(id: EntityId, name: impl Into<String>, kind: MaterialKind, grade: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            grade: grade.into(),
            weight_per_volume: None,
            symmetry: None,
            elastic_modulus: None,
            poisson_ratio: None,
            thermal_coefficient: None,
            strength: MaterialStrength::empty(kind),
        }
    }
}

/// Steel section family, derived from the shape name prefix
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum SteelShape {
    W,
    HSS,
    Pipe,
    C,
    L,
    WT,
    ST,
    MC,
    HP,
}

impl SteelShape {
    /// Shape-name prefix this family is recognised by
    pub fn prefix(self) -> &'static str {
        match self {
            SteelShape::W => "W",
            SteelShape::HSS => "HSS",
            SteelShape::Pipe => "PIPE",
            SteelShape::C => "C",
            SteelShape::L => "L",
            SteelShape::WT => "WT",
            SteelShape::ST => "ST",
            SteelShape::MC => "MC",
            SteelShape::HP => "HP",
        }
    }
}

/// Concrete section family, derived from the shape description
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ConcreteShape {
    Rectangular,
    Circular,
    Tee,
    LShaped,
    Custom,
}

/// Sub-type of a frame section
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ShapeType {
    Steel(SteelShape),
    Concrete(ConcreteShape),
}

/// Frame section from `$ FRAME SECTIONS`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameProperties {
    pub id: EntityId,
    pub name: String,
    /// Material name as written in the source
    pub material_name: String,
    /// Resolved material, `None` when the name is unknown
    pub material: Option<EntityId>,
    pub kind: MaterialKind,
    /// Shape description (`SHAPE`), e.g. `W14X30` or `Concrete Rectangular`
    pub shape: String,
    pub shape_type: ShapeType,
    /// Semantic dimension name -> value, e.g. `depth`, `width`
    pub dimensions: IndexMap<String, f64>,
}

/// Slab sub-type (`SLABTYPE`)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum SlabType {
    #[default]
    Slab,
    Drop,
    Stiff,
    Ribbed,
    Waffle,
    Mat,
    Footing,
}

impl SlabType {
    pub fn keyword(self) -> &'static str {
        match self {
            SlabType::Slab => "Slab",
            SlabType::Drop => "Drop",
            SlabType::Stiff => "Stiff",
            SlabType::Ribbed => "Ribbed",
            SlabType::Waffle => "Waffle",
            SlabType::Mat => "Mat",
            SlabType::Footing => "Footing",
        }
    }

    /// Parse a slab type keyword, falling back to `Slab`
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "DROP" => SlabType::Drop,
            "STIFF" => SlabType::Stiff,
            "RIBBED" => SlabType::Ribbed,
            "WAFFLE" => SlabType::Waffle,
            "MAT" => SlabType::Mat,
            "FOOTING" => SlabType::Footing,
            _ => SlabType::Slab,
        }
    }

    /// Whether areas using this slab type are foundations
    pub fn is_foundation(self) -> bool {
        matches!(self, SlabType::Mat | SlabType::Footing)
    }
}

/// Floor property family
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum FloorPropertyKind {
    Slab,
    FilledDeck,
    UnfilledDeck,
}

impl FloorPropertyKind {
    pub fn is_deck(self) -> bool {
        !matches!(self, FloorPropertyKind::Slab)
    }
}

/// Deck rib and shear-stud geometry
///
/// Every field is independently optional: a value missing from the source
/// stays `None` and is never coerced to zero.
#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct DeckGeometry {
    pub rib_depth: Option<f64>,
    pub rib_width_top: Option<f64>,
    pub rib_width_bottom: Option<f64>,
    pub rib_spacing: Option<f64>,
    pub shear_thickness: Option<f64>,
    pub stud_diameter: Option<f64>,
    pub stud_height: Option<f64>,
    pub stud_fu: Option<f64>,
}

/// How a deck was matched against the manufactured profile catalogue
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum DeckMatchMethod {
    /// Rib depth, widths and spacing all fit the profile
    Geometry,
    /// The declared type or property name names the profile
    TypeName,
    /// Only the rib depth agrees
    RibDepth,
}

/// Reference to a standard manufactured deck profile
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct DeckProfileMatch {
    pub profile: String,
    pub method: DeckMatchMethod,
}

/// Floor property from `$ SLAB PROPERTIES` or `$ DECK PROPERTIES`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloorProperties {
    pub id: EntityId,
    pub name: String,
    pub kind: FloorPropertyKind,
    pub material_name: Option<String>,
    pub material: Option<EntityId>,
    /// Slab thickness, or deck slab depth for decks
    pub thickness: Option<f64>,
    pub modeling_type: ModelingType,
    /// Only meaningful for slabs
    pub slab_type: Option<SlabType>,
    /// Deck type as declared (`DECKTYPE`)
    pub deck_type: Option<String>,
    pub deck: Option<DeckGeometry>,
    pub deck_profile: Option<DeckProfileMatch>,
}

/// Wall stiffness modifiers
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct WallModifiers {
    pub f11: f64,
    pub f22: f64,
    pub m11: f64,
    pub m22: f64,
}

impl Default for WallModifiers {
    fn default() -> Self {
        Self {
            f11: 1.0,
            f22: 1.0,
            m11: 1.0,
            m22: 1.0,
        }
    }
}

/// Wall property from `$ WALL PROPERTIES`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WallProperties {
    pub id: EntityId,
    pub name: String,
    pub material_name: String,
    pub material: Option<EntityId>,
    pub modeling_type: ModelingType,
    pub thickness: f64,
    pub modifiers: WallModifiers,
}

/// Diaphragm constraint behaviour
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum DiaphragmKind {
    #[default]
    Rigid,
    SemiRigid,
}

impl DiaphragmKind {
    pub fn keyword(self) -> &'static str {
        match self {
            DiaphragmKind::Rigid => "RIGID",
            DiaphragmKind::SemiRigid => "SEMIRIGID",
        }
    }
}

/// Diaphragm from `$ DIAPHRAGM NAMES`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Diaphragm {
    pub id: EntityId,
    pub name: String,
    pub kind: DiaphragmKind,
}

/// Property tables of a model, keyed by source name
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    pub materials: IndexMap<String, Material>,
    pub frame_properties: IndexMap<String, FrameProperties>,
    pub floor_properties: IndexMap<String, FloorProperties>,
    pub wall_properties: IndexMap<String, WallProperties>,
    pub diaphragms: IndexMap<String, Diaphragm>,
}
