// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Standard manufactured deck profiles
//!
//! A parsed deck is matched against the catalogue with an ordered fallback
//! chain. Full rib geometry is the strongest evidence, then a profile name
//! in the declared deck type or property name, then rib depth alone.

use e2k_lite_model::{DeckGeometry, DeckMatchMethod, DeckProfileMatch};

/// Largest per-dimension deviation accepted by the geometry and rib-depth
/// matches, in model length units
pub const GEOMETRY_TOLERANCE: f64 = 0.25;

/// Rib geometry of a manufactured deck profile
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeckProfile {
    pub name: &'static str,
    pub manufacturer: &'static str,
    pub rib_depth: f64,
    pub rib_width_top: f64,
    pub rib_width_bottom: f64,
    pub rib_spacing: f64,
}

impl DeckProfile {
    /// Summed absolute deviation of full rib geometry, `None` when a field
    /// is missing or any single field is out of tolerance
    fn deviation(&self, geometry: &DeckGeometry) -> Option<f64> {
        let pairs = [
            (geometry.rib_depth?, self.rib_depth),
            (geometry.rib_width_top?, self.rib_width_top),
            (geometry.rib_width_bottom?, self.rib_width_bottom),
            (geometry.rib_spacing?, self.rib_spacing),
        ];
        let deviations = pairs.map(|(parsed, profile)| (parsed - profile).abs());
        deviations
            .iter()
            .all(|d| *d <= GEOMETRY_TOLERANCE)
            .then(|| deviations.iter().sum())
    }
}

pub const DECK_PROFILES: &[DeckProfile] = &[
    DeckProfile {
        name: "1.5VL",
        manufacturer: "Vulcraft",
        rib_depth: 1.5,
        rib_width_top: 2.5,
        rib_width_bottom: 1.75,
        rib_spacing: 6.0,
    },
    DeckProfile {
        name: "2VLI",
        manufacturer: "Vulcraft",
        rib_depth: 2.0,
        rib_width_top: 7.0,
        rib_width_bottom: 5.0,
        rib_spacing: 12.0,
    },
    DeckProfile {
        name: "3VLI",
        manufacturer: "Vulcraft",
        rib_depth: 3.0,
        rib_width_top: 7.0,
        rib_width_bottom: 5.0,
        rib_spacing: 12.0,
    },
    DeckProfile {
        name: "W2 FORMLOK",
        manufacturer: "Verco",
        rib_depth: 2.0,
        rib_width_top: 7.0,
        rib_width_bottom: 4.5,
        rib_spacing: 12.0,
    },
    DeckProfile {
        name: "W3 FORMLOK",
        manufacturer: "Verco",
        rib_depth: 3.0,
        rib_width_top: 7.0,
        rib_width_bottom: 4.75,
        rib_spacing: 12.0,
    },
    DeckProfile {
        name: "P-3615",
        manufacturer: "Canam",
        rib_depth: 1.5,
        rib_width_top: 2.375,
        rib_width_bottom: 1.5,
        rib_spacing: 6.0,
    },
];

fn best_fit(geometry: &DeckGeometry) -> Option<&'static DeckProfile> {
    DECK_PROFILES
        .iter()
        .filter_map(|profile| profile.deviation(geometry).map(|d| (profile, d)))
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(profile, _)| profile)
}

/// Longest profile name contained in any of the given labels
fn by_name(labels: &[&str]) -> Option<&'static DeckProfile> {
    let labels: Vec<String> = labels.iter().map(|l| l.to_ascii_uppercase()).collect();
    DECK_PROFILES
        .iter()
        .filter(|profile| labels.iter().any(|label| label.contains(profile.name)))
        .max_by_key(|profile| profile.name.len())
}

fn by_rib_depth(geometry: &DeckGeometry) -> Option<&'static DeckProfile> {
    let depth = geometry.rib_depth?;
    DECK_PROFILES
        .iter()
        .find(|profile| (profile.rib_depth - depth).abs() <= GEOMETRY_TOLERANCE)
}

/// Match a deck against the catalogue
pub fn match_deck_profile(
    deck_type: Option<&str>,
    property_name: &str,
    geometry: &DeckGeometry,
) -> Option<DeckProfileMatch> {
    let labels: Vec<&str> = deck_type.into_iter().chain([property_name]).collect();

    let (profile, method) = best_fit(geometry)
        .map(|p| (p, DeckMatchMethod::Geometry))
        .or_else(|| by_name(&labels).map(|p| (p, DeckMatchMethod::TypeName)))
        .or_else(|| by_rib_depth(geometry).map(|p| (p, DeckMatchMethod::RibDepth)))?;

    Some(DeckProfileMatch {
        profile: profile.name.to_string(),
        method,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ribs(depth: f64, top: f64, bottom: f64, spacing: f64) -> DeckGeometry {
        DeckGeometry {
            rib_depth: Some(depth),
            rib_width_top: Some(top),
            rib_width_bottom: Some(bottom),
            rib_spacing: Some(spacing),
            ..DeckGeometry::default()
        }
    }

    #[test]
    fn test_geometry_wins_over_weaker_matches() {
        // Both labels name W3 and its ribs are in tolerance, but 3VLI fits exactly
        let m = match_deck_profile(Some("W3 Formlok"), "Deck W3", &ribs(3.0, 7.0, 5.0, 12.0)).unwrap();
        assert_eq!(m.profile, "3VLI");
        assert_eq!(m.method, DeckMatchMethod::Geometry);
    }

    #[test]
    fn test_best_fit_picks_least_deviation() {
        let m = match_deck_profile(None, "D1", &ribs(3.0, 7.0, 4.8, 12.0)).unwrap();
        assert_eq!(m.profile, "W3 FORMLOK");
        assert_eq!(m.method, DeckMatchMethod::Geometry);
    }

    #[test]
    fn test_type_name_fallback() {
        let geometry = DeckGeometry {
            rib_depth: Some(2.0),
            ..DeckGeometry::default()
        };
        let m = match_deck_profile(Some("Filled"), "2VLI20 composite", &geometry).unwrap();
        assert_eq!(m.profile, "2VLI");
        assert_eq!(m.method, DeckMatchMethod::TypeName);
    }

    #[test]
    fn test_rib_depth_fallback() {
        let geometry = DeckGeometry {
            rib_depth: Some(3.0),
            rib_spacing: Some(12.0),
            ..DeckGeometry::default()
        };
        let m = match_deck_profile(Some("Filled"), "Deck1", &geometry).unwrap();
        assert_eq!(m.profile, "3VLI");
        assert_eq!(m.method, DeckMatchMethod::RibDepth);
    }

    #[test]
    fn test_no_match() {
        assert!(match_deck_profile(Some("Filled"), "Deck1", &DeckGeometry::default()).is_none());
        assert!(match_deck_profile(None, "Deck1", &ribs(6.0, 9.0, 7.0, 24.0)).is_none());
    }
}
