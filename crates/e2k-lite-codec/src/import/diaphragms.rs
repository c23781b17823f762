// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `$ DIAPHRAGM NAMES`

use crate::context::{data_lines, ParseContext};
use crate::sections::DIAPHRAGM_NAMES;
use e2k_lite_model::{Diaphragm, DiaphragmKind, IdCategory, Result, SkipReason};
use indexmap::IndexMap;

/// Parse the diaphragm table; a missing `TYPE` means rigid
pub fn parse_diaphragms(body: &str, ctx: &mut ParseContext) -> Result<IndexMap<String, Diaphragm>> {
    let mut diaphragms = IndexMap::new();

    for (line_no, line) in data_lines(body) {
        let Some(tokens) = ctx.tokenize(DIAPHRAGM_NAMES, line_no, line) else {
            continue;
        };
        let name = match (tokens.starts_with("DIAPHRAGM"), tokens.quoted(1)) {
            (true, Some(name)) => name,
            _ => {
                ctx.skip(DIAPHRAGM_NAMES, line_no, line, SkipReason::Malformed);
                continue;
            }
        };

        let kind = match tokens.text_after("TYPE").map(str::to_ascii_uppercase).as_deref() {
            None | Some("RIGID") => DiaphragmKind::Rigid,
            Some("SEMIRIGID") | Some("SEMI-RIGID") => DiaphragmKind::SemiRigid,
            Some(_) => {
                ctx.skip(DIAPHRAGM_NAMES, line_no, line, SkipReason::Malformed);
                continue;
            }
        };

        let diaphragm = Diaphragm {
            id: ctx.next_id(IdCategory::Diaphragm)?,
            name: name.to_string(),
            kind,
        };
        diaphragms.insert(name.to_string(), diaphragm);
    }

    Ok(diaphragms)
}
