//! Core value types for the Deck language.

use std::fmt;

/// An identifier (object name, slide name, presentation name).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Identifier(pub String);

impl Identifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Identifier(s.to_string())
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Identifier(s)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The kind of a defined object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectKind {
    Slide,
    Textblock,
    Image,
}

impl ObjectKind {
    /// Parse the definition keyword (`Slide`, `Textblock`, `Image`).
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "Slide" => Some(Self::Slide),
            "Textblock" => Some(Self::Textblock),
            "Image" => Some(Self::Image),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Slide => "Slide",
            Self::Textblock => "Textblock",
            Self::Image => "Image",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Every position word the language knows.
///
/// Anchors and simple relative positions accept all of them; double relative
/// positions only accept the eight compass words (see [`Direction`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Position {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    CenterLeft,
    CenterRight,
    Center,
    CenterTop,
    CenterBottom,
    Top,
    Bottom,
    Left,
    Right,
}

impl Position {
    pub fn from_keyword(word: &str) -> Option<Self> {
        let position = match word {
            "top-left" => Self::TopLeft,
            "top-right" => Self::TopRight,
            "bottom-left" => Self::BottomLeft,
            "bottom-right" => Self::BottomRight,
            "center-left" => Self::CenterLeft,
            "center-right" => Self::CenterRight,
            "center" => Self::Center,
            "center-top" => Self::CenterTop,
            "center-bottom" => Self::CenterBottom,
            "top" => Self::Top,
            "bottom" => Self::Bottom,
            "left" => Self::Left,
            "right" => Self::Right,
            _ => return None,
        };
        Some(position)
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
            Self::CenterLeft => "center-left",
            Self::CenterRight => "center-right",
            Self::Center => "center",
            Self::CenterTop => "center-top",
            Self::CenterBottom => "center-bottom",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// The compass direction for this position, if it is one.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Self::Top => Some(Direction::Top),
            Self::Bottom => Some(Direction::Bottom),
            Self::Left => Some(Direction::Left),
            Self::Right => Some(Direction::Right),
            Self::TopLeft => Some(Direction::TopLeft),
            Self::TopRight => Some(Direction::TopRight),
            Self::BottomLeft => Some(Direction::BottomLeft),
            Self::BottomRight => Some(Direction::BottomRight),
            Self::CenterLeft
            | Self::CenterRight
            | Self::Center
            | Self::CenterTop
            | Self::CenterBottom => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One of the eight compass directions used to place an object next to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Direction {
    /// Unit offset as `(row delta, column delta)`. Rows grow downwards.
    pub const fn delta(&self) -> (i32, i32) {
        match self {
            Self::Top => (-1, 0),
            Self::Bottom => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
            Self::TopLeft => (-1, -1),
            Self::TopRight => (-1, 1),
            Self::BottomLeft => (1, -1),
            Self::BottomRight => (1, 1),
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        Position::from_keyword(word).and_then(|p| p.direction())
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Animation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimationKind {
    Appear,
    Disappear,
    Rotate,
    FadeInto,
    JumpInto,
}

impl AnimationKind {
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "appear" => Some(Self::Appear),
            "disappear" => Some(Self::Disappear),
            "rotate" => Some(Self::Rotate),
            "fade-into" => Some(Self::FadeInto),
            "jump-into" => Some(Self::JumpInto),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Appear => "appear",
            Self::Disappear => "disappear",
            Self::Rotate => "rotate",
            Self::FadeInto => "fade-into",
            Self::JumpInto => "jump-into",
        }
    }

    /// Whether this kind animates a single object (as opposed to a slide transition).
    pub fn is_element_animation(&self) -> bool {
        matches!(self, Self::Appear | Self::Disappear | Self::Rotate)
    }
}

impl fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// CSS length units accepted after numeric property values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CssUnit {
    Px,
    Pt,
    Em,
    Rem,
    Percent,
    Vh,
    Vw,
}

impl CssUnit {
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "px" => Some(Self::Px),
            "pt" => Some(Self::Pt),
            "em" => Some(Self::Em),
            "rem" => Some(Self::Rem),
            "%" => Some(Self::Percent),
            "vh" => Some(Self::Vh),
            "vw" => Some(Self::Vw),
            _ => None,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Pt => "pt",
            Self::Em => "em",
            Self::Rem => "rem",
            Self::Percent => "%",
            Self::Vh => "vh",
            Self::Vw => "vw",
        }
    }
}

/// A property value as written in an object definition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyValue {
    /// Bare word: keywords, color names, `#hex` colors
    Identifier(String),
    Integer { value: i64, unit: Option<CssUnit> },
    Decimal { value: f64, unit: Option<CssUnit> },
    /// Quoted string, e.g. a font family with spaces
    Text(String),
}

impl fmt::Display for PropertyValue {
    /// Formats the value the way it appears in generated CSS.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(word) => f.write_str(word),
            Self::Integer { value, unit } => {
                write!(f, "{}{}", value, unit.map(|u| u.suffix()).unwrap_or(""))
            }
            Self::Decimal { value, unit } => {
                write!(f, "{:.2}{}", value, unit.map(|u| u.suffix()).unwrap_or(""))
            }
            Self::Text(text) => write!(f, "\"{}\"", text),
        }
    }
}
