// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Program information and controls

use crate::context::{data_lines, ParseContext};
use crate::sections::{CONTROLS, PROGRAM_INFORMATION};
use e2k_lite_model::{Metadata, Result, SkipReason, Units};

/// Parse `$ PROGRAM INFORMATION` and `$ CONTROLS`
///
/// Control lines other than `UNITS`, `TITLE1` and `TITLE2` carry analysis
/// preferences with no place in the model and are ignored.
pub fn parse_metadata(program_info: &str, controls: &str, ctx: &mut ParseContext) -> Result<Metadata> {
    let mut metadata = Metadata::default();

    for (line_no, line) in data_lines(program_info) {
        let Some(tokens) = ctx.tokenize(PROGRAM_INFORMATION, line_no, line) else {
            continue;
        };
        match (tokens.starts_with("PROGRAM"), tokens.quoted(1)) {
            (true, Some(program)) => {
                metadata.program = Some(program.to_string());
                metadata.version = tokens.quoted_after("VERSION").map(str::to_string);
            }
            _ => ctx.skip(PROGRAM_INFORMATION, line_no, line, SkipReason::Malformed),
        }
    }

    for (line_no, line) in data_lines(controls) {
        let Some(tokens) = ctx.tokenize(CONTROLS, line_no, line) else {
            continue;
        };
        let Some(keyword) = tokens.keyword() else {
            ctx.skip(CONTROLS, line_no, line, SkipReason::Malformed);
            continue;
        };

        match keyword.to_ascii_uppercase().as_str() {
            "UNITS" => match (tokens.quoted(1), tokens.quoted(2), tokens.quoted(3)) {
                (Some(force), Some(length), Some(temperature)) => {
                    metadata.units = Some(Units {
                        force: force.to_string(),
                        length: length.to_string(),
                        temperature: temperature.to_string(),
                    });
                }
                _ => ctx.skip(CONTROLS, line_no, line, SkipReason::Malformed),
            },
            "TITLE1" => metadata.title1 = tokens.quoted(1).map(str::to_string),
            "TITLE2" => metadata.title2 = tokens.quoted(1).map(str::to_string),
            _ => {}
        }
    }

    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROGRAM: &str = r#"PROGRAM  "ETABS"  VERSION "9.7.4""#;

    const CONTROLS_BODY: &str = r#"UNITS  "KIP"  "IN"  "F"
  TITLE1  "Office Tower"
  TITLE2  "Scheme B"
  PREFERENCE  MERGETOL 0.1"#;

    #[test]
    fn test_parse_metadata() {
        let mut ctx = ParseContext::new(true);
        let metadata = parse_metadata(PROGRAM, CONTROLS_BODY, &mut ctx).unwrap();

        assert_eq!(metadata.program.as_deref(), Some("ETABS"));
        assert_eq!(metadata.version.as_deref(), Some("9.7.4"));
        let units = metadata.units.unwrap();
        assert_eq!((units.force.as_str(), units.length.as_str(), units.temperature.as_str()), ("KIP", "IN", "F"));
        assert_eq!(metadata.title1.as_deref(), Some("Office Tower"));
        assert_eq!(metadata.title2.as_deref(), Some("Scheme B"));
        assert!(ctx.diagnostics.is_clean());
    }

    #[test]
    fn test_incomplete_units_are_malformed() {
        let mut ctx = ParseContext::new(true);
        let metadata = parse_metadata("", "UNITS \"KIP\" \"IN\"", &mut ctx).unwrap();
        assert!(metadata.units.is_none());
        assert_eq!(ctx.diagnostics.skipped_count(SkipReason::Malformed), 1);
    }
}
