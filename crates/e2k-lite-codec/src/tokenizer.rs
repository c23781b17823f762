// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! E2K data line tokenizer using nom combinators
//!
//! A data line is a keyword followed by positional and keyword-tagged
//! fields. Fields are double-quoted strings, bare decimal numbers (optional
//! sign and exponent) or bare words.

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, digit0, digit1, one_of, space0},
    combinator::{all_consuming, eof, opt, recognize},
    multi::many0,
    sequence::{delimited, preceded, terminated},
    IResult, Parser,
};

/// Token of a data line
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token<'a> {
    /// Double-quoted value, quotes removed
    Quoted(&'a str),
    /// Bare decimal number
    Number(f64),
    /// Any other bare word (keywords and unquoted enumerations)
    Word(&'a str),
}

impl<'a> Token<'a> {
    /// Text of a quoted value or bare word
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            Token::Quoted(s) | Token::Word(s) => Some(s),
            Token::Number(_) => None,
        }
    }

    pub fn as_quoted(&self) -> Option<&'a str> {
        match self {
            Token::Quoted(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Token::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Whether this is the bare word `word` (case-insensitive)
    pub fn is_word(&self, word: &str) -> bool {
        matches!(self, Token::Word(w) if w.eq_ignore_ascii_case(word))
    }
}

// ============================================================================
// Parsing Primitives
// ============================================================================

/// Parse a quoted value ("text")
fn quoted(input: &str) -> IResult<&str, Token<'_>> {
    let (input, text) = delimited(char('"'), take_while(|c: char| c != '"'), char('"')).parse(input)?;
    Ok((input, Token::Quoted(text)))
}

/// Recognize a complete decimal number
fn number(input: &str) -> IResult<&str, &str> {
    recognize((
        opt(one_of("+-")),
        alt((
            recognize((digit1, opt((char('.'), digit0)))),
            recognize((char('.'), digit1)),
        )),
        opt((one_of("eE"), opt(one_of("+-")), digit1)),
    ))
    .parse(input)
}

/// Parse a bare token, classifying it as number or word
fn bare(input: &str) -> IResult<&str, Token<'_>> {
    let (input, text) = take_while1(|c: char| !c.is_whitespace() && c != '"').parse(input)?;

    let is_number = all_consuming(number).parse(text).is_ok();
    let token = if is_number {
        match lexical_core::parse::<f64>(text.as_bytes()) {
            Ok(value) => Token::Number(value),
            Err(_) => Token::Word(text),
        }
    } else {
        Token::Word(text)
    };

    Ok((input, token))
}

/// Parse any token
fn token(input: &str) -> IResult<&str, Token<'_>> {
    alt((quoted, bare)).parse(input)
}

/// Parse a whole line into tokens
fn tokens(input: &str) -> IResult<&str, Vec<Token<'_>>> {
    terminated(many0(preceded(space0, token)), (space0, eof)).parse(input)
}

// ============================================================================
// Line Access
// ============================================================================

/// Tokenize one data line
///
/// Fails on an unterminated quote.
pub fn tokenize_line(line: &str) -> Result<LineTokens<'_>, String> {
    let (_, tokens) = tokens(line.trim()).map_err(|e| format!("Failed to tokenize line: {:?}", e))?;
    Ok(LineTokens { tokens })
}

/// Tokenized data line with keyword lookup helpers
#[derive(Clone, Debug, PartialEq)]
pub struct LineTokens<'a> {
    tokens: Vec<Token<'a>>,
}

impl<'a> LineTokens<'a> {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token<'a>] {
        &self.tokens
    }

    /// Leading keyword of the line
    pub fn keyword(&self) -> Option<&'a str> {
        match self.tokens.first() {
            Some(Token::Word(w)) => Some(w),
            _ => None,
        }
    }

    /// Whether the line starts with `keyword` (case-insensitive)
    pub fn starts_with(&self, keyword: &str) -> bool {
        self.tokens.first().is_some_and(|t| t.is_word(keyword))
    }

    pub fn get(&self, index: usize) -> Option<&Token<'a>> {
        self.tokens.get(index)
    }

    /// Quoted value at a position
    pub fn quoted(&self, index: usize) -> Option<&'a str> {
        self.get(index).and_then(|t| t.as_quoted())
    }

    /// Number at a position
    pub fn number(&self, index: usize) -> Option<f64> {
        self.get(index).and_then(|t| t.as_number())
    }

    /// Index of the first bare word equal to `key`, keyword excluded
    pub fn position(&self, key: &str) -> Option<usize> {
        self.tokens
            .iter()
            .skip(1)
            .position(|t| t.is_word(key))
            .map(|p| p + 1)
    }

    /// Whether the tag `key` occurs on the line
    pub fn has(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Token following the tag `key`
    pub fn after(&self, key: &str) -> Option<&Token<'a>> {
        self.position(key).and_then(|p| self.get(p + 1))
    }

    /// Quoted value following `key`
    pub fn quoted_after(&self, key: &str) -> Option<&'a str> {
        self.after(key).and_then(|t| t.as_quoted())
    }

    /// Number following `key`
    pub fn number_after(&self, key: &str) -> Option<f64> {
        self.after(key).and_then(|t| t.as_number())
    }

    /// Quoted value or bare word following `key`
    pub fn text_after(&self, key: &str) -> Option<&'a str> {
        self.after(key).and_then(|t| t.as_text())
    }

    /// Quoted values from `start` on, stopping at the first other token
    pub fn quoted_run(&self, start: usize) -> impl Iterator<Item = &'a str> + '_ {
        self.tokens
            .iter()
            .skip(start)
            .map_while(|t| t.as_quoted())
    }
}

/// Quote a value for output
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value)
}

/// Whether a body line carries data (not blank, not a comment)
pub fn is_data_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.starts_with('$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quoted() {
        let (remaining, token) = quoted("\"Concrete Rectangular\" D").unwrap();
        assert_eq!(remaining, " D");
        assert_eq!(token, Token::Quoted("Concrete Rectangular"));
    }

    #[test]
    fn test_parse_number_forms() {
        for (text, value) in [("42", 42.0), ("-3.5", -3.5), ("6.5E-06", 6.5e-6), (".25", 0.25), ("+1e3", 1000.0)] {
            let (_, token) = bare(text).unwrap();
            assert_eq!(token, Token::Number(value), "{text}");
        }
    }

    #[test]
    fn test_number_like_words_stay_words() {
        let (_, token) = bare("1.5VL").unwrap();
        assert_eq!(token, Token::Word("1.5VL"));
        let (_, token) = bare("W14X30").unwrap();
        assert_eq!(token, Token::Word("W14X30"));
    }

    #[test]
    fn test_tokenize_line() {
        let line = tokenize_line("  MATERIAL  \"A992Fy50\"    SYMTYPE \"Isotropic\"  E 29000  U 0.3  A 6.5E-06 ").unwrap();
        assert_eq!(line.keyword(), Some("MATERIAL"));
        assert_eq!(line.quoted(1), Some("A992Fy50"));
        assert_eq!(line.quoted_after("SYMTYPE"), Some("Isotropic"));
        assert_eq!(line.number_after("E"), Some(29000.0));
        assert_eq!(line.number_after("U"), Some(0.3));
        assert_eq!(line.number_after("A"), Some(6.5e-6));
        assert_eq!(line.number_after("FY"), None);
    }

    #[test]
    fn test_tag_lookup_skips_keyword() {
        let line = tokenize_line("D \"x\" D 12").unwrap();
        assert_eq!(line.number_after("D"), Some(12.0));
    }

    #[test]
    fn test_quoted_run() {
        let line = tokenize_line("AREA \"F1\" FLOOR 4 \"1\" \"2\" \"3\" \"4\" 0 0 0 0").unwrap();
        let ring: Vec<&str> = line.quoted_run(4).collect();
        assert_eq!(ring, ["1", "2", "3", "4"]);
    }

    #[test]
    fn test_unterminated_quote_fails() {
        assert!(tokenize_line("POINT \"1  0 0").is_err());
    }

    #[test]
    fn test_is_data_line() {
        assert!(is_data_line("  POINT \"1\" 0 0"));
        assert!(!is_data_line("   "));
        assert!(!is_data_line("$ comment"));
    }
}
