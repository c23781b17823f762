// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Section scanner using SIMD-accelerated byte searching
//!
//! Splits E2K text into named sections. A section starts at a line of the
//! form `$ NAME` where `NAME` is an upper-case token made of letters,
//! digits, spaces, `/`, `_` and `-`, and runs until the next header.

use indexmap::IndexMap;
use memchr::memchr;

/// Section name -> trimmed body, in document order
pub type SectionMap = IndexMap<String, String>;

/// A section header found by the scanner
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionHeader<'a> {
    pub name: &'a str,
    /// Byte offset of the `$`
    pub start: usize,
    /// Byte offset of the first byte after the header line
    pub body_start: usize,
}

/// Fast section header scanner
pub struct SectionScanner<'a> {
    content: &'a str,
    pos: usize,
}

impl<'a> SectionScanner<'a> {
    /// Create a new scanner for the given content
    pub fn new(content: &'a str) -> Self {
        Self { content, pos: 0 }
    }

    /// Scan to the next section header
    pub fn next_header(&mut self) -> Option<SectionHeader<'a>> {
        let bytes = self.content.as_bytes();

        while self.pos < bytes.len() {
            let line_start = self.pos;
            let line_end = memchr(b'\n', &bytes[line_start..])
                .map(|p| line_start + p)
                .unwrap_or(bytes.len());
            self.pos = (line_end + 1).min(bytes.len());

            if bytes[line_start] != b'$' {
                continue;
            }

            if let Some(name) = header_name(&self.content[line_start..line_end]) {
                return Some(SectionHeader {
                    name,
                    start: line_start,
                    body_start: self.pos,
                });
            }
        }

        None
    }

    /// Collect all headers
    pub fn headers(content: &'a str) -> Vec<SectionHeader<'a>> {
        let mut scanner = Self::new(content);
        let mut headers = Vec::new();
        while let Some(header) = scanner.next_header() {
            headers.push(header);
        }
        headers
    }
}

/// Extract the section name from a header line, if it is one
pub fn header_name(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("$ ")?;
    let name = rest.trim_end();

    let mut chars = name.chars();
    if !chars.next()?.is_ascii_uppercase() {
        return None;
    }
    chars
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, ' ' | '/' | '_' | '-'))
        .then_some(name)
}

/// Split a document into its sections
///
/// Text before the first header is dropped; use [`split_preamble`] to keep
/// it. A repeated section name keeps its first position and its last body.
pub fn split_sections(content: &str) -> SectionMap {
    split_preamble(content).1
}

/// Split a document into the verbatim text before the first header and its
/// sections
pub fn split_preamble(content: &str) -> (&str, SectionMap) {
    let (preamble, bodies) = split_raw(content);
    let sections = bodies
        .into_iter()
        .map(|(name, body)| (name.to_string(), body.trim().to_string()))
        .collect();
    (preamble, sections)
}

/// Like [`split_preamble`], but bodies keep their indentation and inner
/// whitespace. Only the line breaks before the next header are removed.
pub fn split_preamble_verbatim(content: &str) -> (&str, SectionMap) {
    let (preamble, bodies) = split_raw(content);
    let sections = bodies
        .into_iter()
        .map(|(name, body)| {
            let body = body.trim_end_matches(['\n', '\r']);
            (name.to_string(), body.to_string())
        })
        .collect();
    (preamble, sections)
}

fn split_raw(content: &str) -> (&str, IndexMap<&str, &str>) {
    let headers = SectionScanner::headers(content);
    let mut sections = IndexMap::new();

    let preamble = match headers.first() {
        Some(first) => &content[..first.start],
        None => content,
    };

    for (i, header) in headers.iter().enumerate() {
        let end = headers
            .get(i + 1)
            .map(|next| next.start)
            .unwrap_or(content.len());
        sections.insert(header.name, &content[header.body_start.min(end)..end]);
    }

    (preamble, sections)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_E2K: &str = r#"$ File C:\models\tower.e2k saved 2024-01-01 12:00:00

$ PROGRAM INFORMATION
  PROGRAM  "ETABS"  VERSION "9.7.4"

$ STORIES - IN SEQUENCE FROM TOP
  STORY "ROOF"  HEIGHT 12
  STORY "BASE"  ELEV 0

$ POINT COORDINATES
  POINT "1"  0  0
  POINT "2"  30  0
$ PIER/SPANDREL NAMES
"#;

    #[test]
    fn test_header_name() {
        assert_eq!(header_name("$ POINT COORDINATES"), Some("POINT COORDINATES"));
        assert_eq!(
            header_name("$ STORIES - IN SEQUENCE FROM TOP  \r"),
            Some("STORIES - IN SEQUENCE FROM TOP")
        );
        assert_eq!(header_name("$ PIER/SPANDREL NAMES"), Some("PIER/SPANDREL NAMES"));
        assert_eq!(header_name("$ File C:\\x.e2k saved"), None);
        assert_eq!(header_name("$POINTS"), None);
        assert_eq!(header_name("  $ POINTS"), None);
    }

    #[test]
    fn test_split_sections_in_order() {
        let sections = split_sections(TEST_E2K);
        let names: Vec<&str> = sections.keys().map(|k| k.as_str()).collect();
        assert_eq!(
            names,
            [
                "PROGRAM INFORMATION",
                "STORIES - IN SEQUENCE FROM TOP",
                "POINT COORDINATES",
                "PIER/SPANDREL NAMES",
            ]
        );
        assert_eq!(
            sections["POINT COORDINATES"],
            "POINT \"1\"  0  0\n  POINT \"2\"  30  0"
        );
        assert_eq!(sections["PIER/SPANDREL NAMES"], "");
    }

    #[test]
    fn test_preamble_is_verbatim() {
        let (preamble, sections) = split_preamble(TEST_E2K);
        assert_eq!(preamble, "$ File C:\\models\\tower.e2k saved 2024-01-01 12:00:00\n\n");
        assert_eq!(sections.len(), 4);
    }

    #[test]
    fn test_verbatim_bodies_keep_indentation() {
        let (preamble, sections) = split_preamble_verbatim(TEST_E2K);
        assert_eq!(preamble, "$ File C:\\models\\tower.e2k saved 2024-01-01 12:00:00\n\n");
        assert_eq!(
            sections["STORIES - IN SEQUENCE FROM TOP"],
            "  STORY \"ROOF\"  HEIGHT 12\n  STORY \"BASE\"  ELEV 0"
        );
        assert_eq!(
            sections["POINT COORDINATES"],
            "  POINT \"1\"  0  0\n  POINT \"2\"  30  0"
        );
        assert_eq!(sections["PIER/SPANDREL NAMES"], "");
    }

    #[test]
    fn test_empty_and_headerless_input() {
        assert!(split_sections("").is_empty());
        assert!(split_sections("POINT \"1\" 0 0\n").is_empty());
    }

    #[test]
    fn test_last_section_runs_to_end() {
        let sections = split_sections("$ GRIDS\n  GRID \"G\" LABEL \"A\" DIR \"X\" COORD 0");
        assert_eq!(sections["GRIDS"], "GRID \"G\" LABEL \"A\" DIR \"X\" COORD 0");
    }

    #[test]
    fn test_duplicate_section_keeps_first_position() {
        let sections = split_sections("$ A\none\n$ B\ntwo\n$ A\nthree\n");
        let names: Vec<&str> = sections.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(sections["A"], "three");
    }
}
