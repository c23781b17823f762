// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{Record, SectionBody};
use e2k_lite_model::{LoadCombination, LoadDefinition, SurfaceLoad};
use indexmap::IndexMap;

pub fn write_load_patterns(patterns: &IndexMap<String, LoadDefinition>) -> String {
    let mut body = SectionBody::new();
    for pattern in patterns.values() {
        body.push(
            Record::new("LOADPATTERN")
                .quoted(&pattern.name)
                .quoted_field("TYPE", pattern.kind.keyword())
                .number_field("SELFWEIGHT", pattern.self_weight),
        );
    }
    body.finish()
}

/// A `TYPE` line per combination followed by one line per term
pub fn write_load_combinations(combinations: &IndexMap<String, LoadCombination>) -> String {
    let mut body = SectionBody::new();
    for combination in combinations.values() {
        body.push(
            Record::new("COMBO")
                .quoted(&combination.name)
                .quoted_field("TYPE", &combination.kind),
        );
        for term in &combination.terms {
            body.push(
                Record::new("COMBO")
                    .quoted(&combination.name)
                    .quoted_field("LOADCASE", &term.load)
                    .number_field("SF", term.factor),
            );
        }
    }
    body.finish()
}

pub fn write_shell_uniform_load_sets(sets: &IndexMap<String, SurfaceLoad>) -> String {
    let mut body = SectionBody::new();
    for set in sets.values() {
        for component in &set.components {
            body.push(
                Record::new("SHELLUNIFORMLOADSET")
                    .quoted(&set.name)
                    .quoted_field("LOADPAT", &component.load)
                    .number_field("VALUE", component.value),
            );
        }
    }
    body.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ParseContext;
    use crate::import::{parse_load_combinations, parse_load_patterns, parse_shell_uniform_load_sets};

    const PATTERNS: &str = r#"LOADPATTERN "DEAD"  TYPE  "Dead"  SELFWEIGHT  1
  LOADPATTERN "LIVE"  TYPE  "Reducible Live"
  LOADPATTERN "NOTIONAL"  TYPE  "Notional""#;

    #[test]
    fn test_loads_round_trip() {
        let mut ctx = ParseContext::new(true);
        let patterns = parse_load_patterns(PATTERNS, &mut ctx).unwrap();
        let index = ctx.index(&patterns, |p| p.id);
        let combos = parse_load_combinations(
            r#"COMBO "GRAV" TYPE "Linear Add"
  COMBO "GRAV" LOADCASE "DEAD" SF 1.2
  COMBO "GRAV" LOADCASE "LIVE" SF 1.6
  COMBO "ENV" TYPE "Envelope"
  COMBO "ENV" LOADCASE "GRAV" SF 1"#,
            &index,
            &mut ctx,
        )
        .unwrap();
        let sets = parse_shell_uniform_load_sets(
            "SHELLUNIFORMLOADSET \"OFFICE\" LOADPAT \"LIVE\" VALUE 0.05",
            &index,
            &mut ctx,
        )
        .unwrap();

        let patterns_again = parse_load_patterns(&write_load_patterns(&patterns), &mut ctx).unwrap();
        for (name, pattern) in &patterns {
            assert_eq!(patterns_again[name].kind, pattern.kind);
            assert_eq!(patterns_again[name].self_weight, pattern.self_weight);
        }

        let text = write_load_combinations(&combos);
        assert_eq!(text.lines().count(), 5);
        let combos_again = parse_load_combinations(&text, &index, &mut ctx).unwrap();
        assert_eq!(combos_again["GRAV"].kind, "Linear Add");
        assert_eq!(combos_again["GRAV"].terms.len(), 2);
        assert_eq!(combos_again["GRAV"].terms[1].factor, 1.6);
        assert_eq!(combos_again["ENV"].terms[0].load_id, Some(combos_again["GRAV"].id));

        let sets_again = parse_shell_uniform_load_sets(&write_shell_uniform_load_sets(&sets), &index, &mut ctx).unwrap();
        assert_eq!(sets_again["OFFICE"].components, sets["OFFICE"].components);
        assert!(ctx.diagnostics.is_clean());
    }
}
