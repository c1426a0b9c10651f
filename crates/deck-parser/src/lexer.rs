//! Lexer/tokenizer for Deck sources.

use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, is_not, tag, take_while, take_while1},
    character::complete::{char, digit1},
    combinator::{map, opt, recognize, value},
    sequence::{delimited, pair, tuple},
    IResult,
};

/// Parse an identifier (starts with letter/underscore, followed by alphanumeric/underscore/hyphen).
pub fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_alphabetic() || c == '_'),
        take_while(|c: char| c.is_alphanumeric() || c == '_' || c == '-'),
    ))(input)
}

/// Parse a keyword-like word: positions, animation names, property names.
pub fn word(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_')(input)
}

/// Parse the textual form of a number (integer or decimal, optionally negative).
pub fn number_literal(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        opt(char('-')),
        digit1,
        opt(pair(char('.'), digit1)),
    )))(input)
}

/// Parse a unit suffix.
pub fn unit(input: &str) -> IResult<&str, &str> {
    alt((
        tag("px"),
        tag("pt"),
        tag("rem"),
        tag("em"),
        tag("%"),
        tag("vh"),
        tag("vw"),
    ))(input)
}

/// Parse a double-quoted string literal, handling `\"`, `\\` and `\n` escapes.
pub fn quoted_string(input: &str) -> IResult<&str, String> {
    delimited(
        char('"'),
        map(
            opt(escaped_transform(
                is_not("\\\""),
                '\\',
                alt((
                    value("\\", tag("\\")),
                    value("\"", tag("\"")),
                    value("\n", tag("n")),
                )),
            )),
            Option::unwrap_or_default,
        ),
        char('"'),
    )(input)
}

/// Count leading spaces for indentation.
pub fn count_indent(line: &str) -> usize {
    line.chars().take_while(|&c| c == ' ').count()
}

/// A line of input with its indentation level.
#[derive(Debug, Clone)]
pub struct Line<'a> {
    pub indent: usize,
    pub content: &'a str,
    pub line_number: usize,
}

impl Line<'_> {
    /// Column (1-based) of `fragment` within the original line.
    ///
    /// `fragment` must be a subslice of `content`; falls back to the start of
    /// the content otherwise.
    pub fn column_of(&self, fragment: &str) -> u32 {
        let start = self.content.as_ptr() as usize;
        let at = fragment.as_ptr() as usize;
        let offset = if at >= start && at <= start + self.content.len() {
            at - start
        } else {
            0
        };
        (self.indent + offset + 1) as u32
    }
}

/// Split input into lines with indentation info.
pub fn split_lines(input: &str) -> Vec<Line<'_>> {
    input
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let trimmed = line.trim();
            // Skip empty lines and comment-only lines
            if trimmed.is_empty() || trimmed.starts_with("//") {
                None
            } else {
                Some(Line {
                    indent: count_indent(line),
                    content: trimmed,
                    line_number: i + 1,
                })
            }
        })
        .collect()
}
