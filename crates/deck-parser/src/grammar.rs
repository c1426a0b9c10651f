//! Grammar rules for parsing Deck presentations.
//!
//! The language is indentation based: top-level blocks start at column 1 and
//! their bodies are indented by two spaces. Lines are split and tagged with
//! their indent first, then each line is parsed on its own.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, space0, space1},
    combinator::{all_consuming, map, opt},
    sequence::{pair, preceded, terminated, tuple},
    IResult,
};

use deck_core::{
    ast::*,
    types::*,
    ParseError,
};

use crate::lexer::*;

/// Indentation step between a block header and its body.
const INDENT_STEP: usize = 2;

/// Parse a complete Deck presentation.
pub fn parse(input: &str) -> Result<Program, ParseError> {
    let lines = split_lines(input);
    let mut parser = Parser::new(&lines);
    parser.parse_program()
}

/// Stateful parser that tracks position in the line list.
struct Parser<'a> {
    lines: &'a [Line<'a>],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(lines: &'a [Line<'a>]) -> Self {
        Self { lines, pos: 0 }
    }

    /// Get current line, if any.
    fn current(&self) -> Option<&'a Line<'a>> {
        self.lines.get(self.pos)
    }

    /// Advance to next line.
    fn advance(&mut self) {
        self.pos += 1;
    }

    fn parse_program(&mut self) -> Result<Program, ParseError> {
        let header = self.current().ok_or(ParseError::MissingPresentation)?;
        if !header.content.starts_with("presentation") {
            return Err(ParseError::MissingPresentation);
        }
        if header.indent != 0 {
            return Err(bad_indent(header, 0));
        }
        let name = all_consuming(preceded(pair(tag("presentation"), space1), identifier))(
            header.content,
        )
        .map(|(_, name)| name)
        .map_err(|_| unexpected(header, header.content, "'presentation <name>'"))?;
        self.advance();

        let mut program = Program::new(name);
        program.span = Span::at_line(header.line_number);

        while let Some(line) = self.current() {
            if line.indent != 0 {
                return Err(bad_indent(line, 0));
            }
            let keyword = line.content.split_whitespace().next().unwrap_or_default();
            match keyword {
                "Slide" | "Textblock" | "Image" => {
                    let object = self.parse_object_definition()?;
                    program.objects.push(object);
                }
                "Structure" => {
                    let structure = self.parse_structure()?;
                    program.structures.push(structure);
                }
                "Animations:" => {
                    let animations = self.parse_animations()?;
                    program.animations.extend(animations);
                }
                _ => {
                    return Err(unexpected(
                        line,
                        line.content,
                        "object definition, structure or 'Animations:'",
                    ))
                }
            }
        }

        log::debug!(
            "Parsed presentation {}: {} objects, {} structures, {} animations",
            program.presentation,
            program.objects.len(),
            program.structures.len(),
            program.animations.len()
        );
        Ok(program)
    }

    /// Collect the lines of a block body: every following line indented
    /// deeper than `parent_indent`, all at exactly one step deeper.
    fn body_lines(&mut self, parent_indent: usize) -> Result<Vec<&'a Line<'a>>, ParseError> {
        let child_indent = parent_indent + INDENT_STEP;
        let mut body = Vec::new();
        while let Some(line) = self.current() {
            if line.indent <= parent_indent {
                break;
            }
            if line.indent != child_indent {
                return Err(bad_indent(line, child_indent));
            }
            body.push(line);
            self.advance();
        }
        Ok(body)
    }

    /// Parse `Slide|Textblock|Image <name>:` and its property lines.
    fn parse_object_definition(&mut self) -> Result<ObjectDefinition, ParseError> {
        let line = self.current().ok_or(ParseError::UnexpectedEof)?;
        let (keyword, name) = object_header(line.content)
            .map(|(_, header)| header)
            .map_err(|_| unexpected(line, line.content, "'<Kind> <name>:'"))?;
        let kind = ObjectKind::from_keyword(keyword)
            .ok_or_else(|| unexpected(line, keyword, "Slide, Textblock or Image"))?;
        self.advance();

        let properties = self
            .body_lines(line.indent)?
            .into_iter()
            .map(parse_property)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ObjectDefinition {
            kind,
            identifier: Identifier::from(name),
            properties,
            span: span_of(line, name),
        })
    }

    /// Parse `Structure <slide>:` and its directives.
    fn parse_structure(&mut self) -> Result<StructureDefinition, ParseError> {
        let line = self.current().ok_or(ParseError::UnexpectedEof)?;
        let name = block_header(line.content, "Structure")
            .ok_or_else(|| unexpected(line, line.content, "'Structure <slide>:'"))?;
        self.advance();

        let directives = self
            .body_lines(line.indent)?
            .into_iter()
            .map(parse_directive)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(StructureDefinition {
            identifier: Identifier::from(name),
            directives,
            span: span_of(line, name),
        })
    }

    /// Parse the `Animations:` block.
    fn parse_animations(&mut self) -> Result<Vec<AnimationDefinition>, ParseError> {
        let header = self.current().ok_or(ParseError::UnexpectedEof)?;
        let child_indent = header.indent + INDENT_STEP;
        self.advance();

        let mut animations = Vec::new();
        while let Some(line) = self.current() {
            if line.indent <= header.indent {
                break;
            }
            if line.indent != child_indent {
                return Err(bad_indent(line, child_indent));
            }
            if line.content.starts_with("Sequence") {
                animations.push(self.parse_sequence()?);
            } else {
                animations.push(parse_animation_line(line)?);
                self.advance();
            }
        }
        Ok(animations)
    }

    /// Parse `Sequence <slide> [repeat <n>]:` and its step lines.
    fn parse_sequence(&mut self) -> Result<AnimationDefinition, ParseError> {
        let line = self.current().ok_or(ParseError::UnexpectedEof)?;
        let (slide, repeat) = sequence_header(line.content)
            .map(|(_, header)| header)
            .map_err(|_| unexpected(line, line.content, "'Sequence <slide> [repeat <n>]:'"))?;
        let repeat = match repeat {
            Some(digits) => digits.parse::<u32>().map_err(|_| ParseError::InvalidNumber {
                value: digits.to_string(),
                span: span_of(line, digits),
            })?,
            None => 1,
        };
        self.advance();

        let steps = self
            .body_lines(line.indent)?
            .into_iter()
            .map(parse_step)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AnimationDefinition {
            kind: AnimationDefinitionKind::Sequence {
                slide: Identifier::from(slide),
                steps,
                repeat,
            },
            span: span_of(line, slide),
        })
    }
}

fn unexpected(line: &Line<'_>, found: &str, expected: &str) -> ParseError {
    ParseError::UnexpectedToken {
        found: found.to_string(),
        expected: expected.to_string(),
        line: line.line_number as u32,
        column: line.column_of(found),
    }
}

fn bad_indent(line: &Line<'_>, expected: usize) -> ParseError {
    ParseError::InvalidIndentation {
        line: line.line_number as u32,
        expected: expected as u32,
        found: line.indent as u32,
    }
}

fn span_of(line: &Line<'_>, fragment: &str) -> Span {
    Span {
        line: line.line_number as u32,
        column: line.column_of(fragment),
    }
}

/// Parse `<Keyword> <name>:` for a fixed keyword, returning the name.
fn block_header<'s>(content: &'s str, keyword: &str) -> Option<&'s str> {
    all_consuming(preceded(
        pair(tag(keyword), space1),
        terminated(identifier, pair(space0, char(':'))),
    ))(content)
    .ok()
    .map(|(_, name)| name)
}

fn object_header(input: &str) -> IResult<&str, (&str, &str)> {
    all_consuming(tuple((
        terminated(identifier, space1),
        terminated(identifier, pair(space0, char(':'))),
    )))(input)
}

fn sequence_header(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    all_consuming(tuple((
        preceded(pair(tag("Sequence"), space1), identifier),
        terminated(
            opt(preceded(tuple((space1, tag("repeat"), space1)), digit1)),
            pair(space0, char(':')),
        ),
    )))(input)
}

/// Parse a `name: value` property line.
fn parse_property(line: &Line<'_>) -> Result<Property, ParseError> {
    let expected = "property 'name: value'";
    let (rest, name) = terminated(word, tuple((space0, char(':'), space0)))(line.content)
        .map_err(|_| unexpected(line, line.content, expected))?;
    let raw = rest.trim_end();
    if raw.is_empty() {
        return Err(unexpected(line, line.content, expected));
    }

    Ok(Property {
        name: name.to_string(),
        value: parse_property_value(line, raw)?,
        span: span_of(line, name),
    })
}

/// Property values: quoted text, a number with an optional unit, or a bare word.
fn parse_property_value(line: &Line<'_>, raw: &str) -> Result<PropertyValue, ParseError> {
    if raw.starts_with('"') {
        return all_consuming(quoted_string)(raw)
            .map(|(_, text)| PropertyValue::Text(text))
            .map_err(|_| ParseError::UnterminatedString {
                line: line.line_number as u32,
            });
    }

    if let Ok((suffix, literal)) = number_literal(raw) {
        let parsed_unit = if suffix.is_empty() {
            Some(None)
        } else {
            all_consuming(unit)(suffix)
                .ok()
                .and_then(|(_, s)| CssUnit::from_suffix(s))
                .map(Some)
        };
        // Anything else after the digits (e.g. `3d`) is a plain word.
        if let Some(unit) = parsed_unit {
            let invalid = || ParseError::InvalidNumber {
                value: raw.to_string(),
                span: span_of(line, raw),
            };
            return if literal.contains('.') {
                let value = literal.parse::<f64>().map_err(|_| invalid())?;
                Ok(PropertyValue::Decimal { value, unit })
            } else {
                let value = literal.parse::<i64>().map_err(|_| invalid())?;
                Ok(PropertyValue::Integer { value, unit })
            };
        }
    }

    if raw.contains('"') {
        return Err(unexpected(line, raw, "a number, a word or a quoted string"));
    }
    Ok(PropertyValue::Identifier(raw.to_string()))
}

/// Structure directive before keyword validation.
enum RawDirective<'s> {
    Add(&'s str, Option<String>),
    Anchor(&'s str),
    Simple(&'s str, &'s str),
    Double(&'s str, &'s str, &'s str),
}

fn add_directive(input: &str) -> IResult<&str, RawDirective<'_>> {
    map(
        all_consuming(tuple((
            preceded(pair(tag("add"), space1), identifier),
            opt(preceded(tuple((space1, tag("with"), space1)), quoted_string)),
        ))),
        |(id, content)| RawDirective::Add(id, content),
    )(input)
}

fn anchor_directive(input: &str) -> IResult<&str, RawDirective<'_>> {
    map(
        all_consuming(preceded(pair(tag("anchor"), space1), word)),
        RawDirective::Anchor,
    )(input)
}

fn simple_directive(input: &str) -> IResult<&str, RawDirective<'_>> {
    map(
        all_consuming(tuple((
            identifier,
            preceded(tuple((space1, tag("at"), space1)), word),
        ))),
        |(id, position)| RawDirective::Simple(id, position),
    )(input)
}

fn double_directive(input: &str) -> IResult<&str, RawDirective<'_>> {
    map(
        all_consuming(tuple((
            identifier,
            preceded(space1, word),
            preceded(tuple((space1, tag("of"), space1)), identifier),
        ))),
        |(child, direction, parent)| RawDirective::Double(child, direction, parent),
    )(input)
}

/// Parse one line of a structure body.
fn parse_directive(line: &Line<'_>) -> Result<Directive, ParseError> {
    let raw = alt((add_directive, anchor_directive, simple_directive, double_directive))(
        line.content,
    )
    .map(|(_, raw)| raw)
    .map_err(|_| {
        if line.content.contains('"') && !line.content.ends_with('"') {
            ParseError::UnterminatedString {
                line: line.line_number as u32,
            }
        } else {
            unexpected(line, line.content, "structure directive")
        }
    })?;

    let kind = match raw {
        RawDirective::Add(id, content) => DirectiveKind::Add {
            identifier: Identifier::from(id),
            content,
        },
        RawDirective::Anchor(position) => DirectiveKind::Anchor {
            position: parse_position(line, position)?,
        },
        RawDirective::Simple(id, position) => DirectiveKind::SimpleRelative {
            identifier: Identifier::from(id),
            position: parse_position(line, position)?,
        },
        RawDirective::Double(child, direction, parent) => DirectiveKind::DoubleRelative {
            child: Identifier::from(child),
            parent: Identifier::from(parent),
            direction: parse_direction(line, direction)?,
        },
    };

    Ok(Directive {
        kind,
        span: Span::at_line(line.line_number),
    })
}

fn parse_position(line: &Line<'_>, word: &str) -> Result<Position, ParseError> {
    Position::from_keyword(word).ok_or_else(|| ParseError::UnknownPosition {
        value: word.to_string(),
        span: span_of(line, word),
    })
}

/// Only the eight compass positions can place an object next to another.
fn parse_direction(line: &Line<'_>, word: &str) -> Result<Direction, ParseError> {
    match Position::from_keyword(word) {
        Some(position) => position.direction().ok_or_else(|| ParseError::NotADirection {
            value: word.to_string(),
            span: span_of(line, word),
        }),
        None => Err(ParseError::UnknownPosition {
            value: word.to_string(),
            span: span_of(line, word),
        }),
    }
}

fn parse_animation_kind(line: &Line<'_>, word: &str) -> Result<AnimationKind, ParseError> {
    AnimationKind::from_keyword(word).ok_or_else(|| ParseError::UnknownAnimation {
        value: word.to_string(),
        span: span_of(line, word),
    })
}

/// `<a> <anim> <b>` (slide pair) or `<a> <anim>` (single object).
fn parse_animation_line(line: &Line<'_>) -> Result<AnimationDefinition, ParseError> {
    let pair_form = all_consuming(tuple((
        identifier,
        preceded(space1, word),
        preceded(space1, identifier),
    )))(line.content);

    let kind = match pair_form {
        Ok((_, (from, animation, to))) => AnimationDefinitionKind::Pair {
            from: Identifier::from(from),
            to: Identifier::from(to),
            animation: parse_animation_kind(line, animation)?,
        },
        Err(_) => {
            let (_, (identifier, animation)) =
                all_consuming(pair(identifier, preceded(space1, word)))(line.content)
                    .map_err(|_| unexpected(line, line.content, "animation"))?;
            AnimationDefinitionKind::Single {
                identifier: Identifier::from(identifier),
                animation: parse_animation_kind(line, animation)?,
            }
        }
    };

    Ok(AnimationDefinition {
        kind,
        span: Span::at_line(line.line_number),
    })
}

/// `[then] <object> <anim>`
fn parse_step(line: &Line<'_>) -> Result<AnimationStep, ParseError> {
    let (_, (identifier, animation)) = all_consuming(preceded(
        opt(pair(tag("then"), space1)),
        pair(identifier, preceded(space1, word)),
    ))(line.content)
    .map_err(|_| unexpected(line, line.content, "sequence step '[then] <object> <animation>'"))?;

    Ok(AnimationStep {
        identifier: Identifier::from(identifier),
        animation: parse_animation_kind(line, animation)?,
        span: span_of(line, identifier),
    })
}
