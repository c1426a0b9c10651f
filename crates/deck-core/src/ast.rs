//! Abstract Syntax Tree types for Deck presentations.
//!
//! All lists are kept in source declaration order.

use crate::types::{AnimationKind, Direction, Identifier, ObjectKind, Position, PropertyValue};

/// A complete presentation program.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Program {
    /// Name of the presentation (also the output file stem)
    pub presentation: Identifier,
    /// Slide, textblock and image definitions
    pub objects: Vec<ObjectDefinition>,
    /// Slide structures
    pub structures: Vec<StructureDefinition>,
    pub animations: Vec<AnimationDefinition>,
    pub span: Span,
}

impl Program {
    /// Create an empty program with the given presentation name.
    pub fn new(presentation: impl Into<Identifier>) -> Self {
        Self {
            presentation: presentation.into(),
            objects: Vec::new(),
            structures: Vec::new(),
            animations: Vec::new(),
            span: Span::default(),
        }
    }
}

/// Definition of a slide, textblock or image with its CSS properties.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectDefinition {
    pub kind: ObjectKind,
    pub identifier: Identifier,
    pub properties: Vec<Property>,
    pub span: Span,
}

/// A CSS-like property: `name: value`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Property {
    pub name: String,
    pub value: PropertyValue,
    pub span: Span,
}

/// The content of one slide.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StructureDefinition {
    /// The slide this structure describes
    pub identifier: Identifier,
    pub directives: Vec<Directive>,
    pub span: Span,
}

impl StructureDefinition {
    /// Identifiers of all `add` directives, in order.
    pub fn added(&self) -> impl Iterator<Item = &Identifier> {
        self.directives.iter().filter_map(|d| match &d.kind {
            DirectiveKind::Add { identifier, .. } => Some(identifier),
            _ => None,
        })
    }

    /// Literal content attached to the first `add` of `identifier`, if any.
    pub fn content_of(&self, identifier: &str) -> Option<&str> {
        self.directives.iter().find_map(|d| match &d.kind {
            DirectiveKind::Add { identifier: id, content } if id.as_str() == identifier => {
                content.as_deref()
            }
            _ => None,
        })
    }
}

/// A directive inside a structure definition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Directive {
    pub kind: DirectiveKind,
    pub span: Span,
}

impl Directive {
    pub fn new(kind: DirectiveKind) -> Self {
        Self { kind, span: Span::default() }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DirectiveKind {
    /// `add Title [with "text"]`
    Add {
        identifier: Identifier,
        content: Option<String>,
    },
    /// `anchor center`
    Anchor { position: Position },
    /// `Logo at top-right`
    SimpleRelative {
        identifier: Identifier,
        position: Position,
    },
    /// `Logo right of Title`: place `child` next to `parent`
    DoubleRelative {
        child: Identifier,
        parent: Identifier,
        direction: Direction,
    },
}

/// An entry of the animations section.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationDefinition {
    pub kind: AnimationDefinitionKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimationDefinitionKind {
    /// Animate a single object: `Title appear`
    Single {
        identifier: Identifier,
        animation: AnimationKind,
    },
    /// Ordered steps for one slide: `Sequence Intro repeat 2:`
    Sequence {
        slide: Identifier,
        steps: Vec<AnimationStep>,
        repeat: u32,
    },
    /// Transition between two slides: `Intro fade-into Outro`
    Pair {
        from: Identifier,
        to: Identifier,
        animation: AnimationKind,
    },
}

/// One step of an animation sequence: `then Title appear`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationStep {
    pub identifier: Identifier,
    pub animation: AnimationKind,
    pub span: Span,
}

/// Source span for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub fn at_line(line: usize) -> Self {
        Self { line: line as u32, column: 1 }
    }
}
