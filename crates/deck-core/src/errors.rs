//! Error types for the Deck compiler.

use crate::ast::Span;
use thiserror::Error;

/// Top-level error type for the Deck compiler.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Errors during parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unexpected token at line {line}, column {column}: expected {expected}, found {found:?}")]
    UnexpectedToken {
        found: String,
        expected: String,
        line: u32,
        column: u32,
    },

    #[error("Invalid indentation at line {line}: expected {expected} spaces, found {found}")]
    InvalidIndentation {
        line: u32,
        expected: u32,
        found: u32,
    },

    #[error("Unterminated string starting at line {line}")]
    UnterminatedString { line: u32 },

    #[error("Invalid number format: {value}")]
    InvalidNumber { value: String, span: Span },

    #[error("Unknown position '{value}' at line {}", .span.line)]
    UnknownPosition { value: String, span: Span },

    #[error("Position '{value}' cannot be used to place an object next to another (line {})", .span.line)]
    NotADirection { value: String, span: Span },

    #[error("Unknown animation '{value}' at line {}", .span.line)]
    UnknownAnimation { value: String, span: Span },

    #[error("Missing 'presentation <name>' header")]
    MissingPresentation,

    #[error("Unexpected end of input")]
    UnexpectedEof,
}

/// A single semantic error found while checking a parsed program.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SemanticError {
    #[error("Duplicate object with identifier '{name}' already exists")]
    DuplicateObject { name: String, span: Span },

    #[error("Object with identifier '{name}' does not exist")]
    UndefinedObject { name: String, span: Span },

    #[error("Object with identifier '{name}' is not a slide")]
    NotASlide { name: String, span: Span },

    #[error("Object with identifier '{name}' is a slide and cannot be used here")]
    UnexpectedSlide { name: String, span: Span },

    #[error("Repeated object '{name}' in slide '{slide}'")]
    RepeatedInSlide {
        name: String,
        slide: String,
        span: Span,
    },

    #[error("Object '{name}' is not part of slide '{slide}'")]
    NotInSlide {
        name: String,
        slide: String,
        span: Span,
    },
}

impl SemanticError {
    pub fn span(&self) -> Span {
        match self {
            Self::DuplicateObject { span, .. }
            | Self::UndefinedObject { span, .. }
            | Self::NotASlide { span, .. }
            | Self::UnexpectedSlide { span, .. }
            | Self::RepeatedInSlide { span, .. }
            | Self::NotInSlide { span, .. } => *span,
        }
    }
}

/// All semantic errors of one analysis run.
#[derive(Debug, Error)]
#[error("There are {} semantic errors in the program", .errors.len())]
pub struct AnalysisError {
    pub errors: Vec<SemanticError>,
}

/// Errors during layout computation.
///
/// None of these abort compilation: they are reported per slide and the
/// affected slide keeps its baseline layout.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("Positioning cycle in slide '{slide}': {}", .cycle.join(" -> "))]
    CycleDetected { slide: String, cycle: Vec<String> },

    #[error("Objects '{first}' and '{second}' would both occupy cell ({row}, {col}) in slide '{slide}'")]
    Overlap {
        slide: String,
        first: String,
        second: String,
        row: i32,
        col: i32,
    },

    #[error("Object '{name}' is already placed in slide '{slide}'")]
    DuplicateObject { slide: String, name: String },

    #[error("Cell ({row}, {col}) in slide '{slide}' is already occupied by '{occupant}'")]
    CellOccupied {
        slide: String,
        occupant: String,
        row: i32,
        col: i32,
    },
}

/// Errors during HTML generation and output.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Cannot write {}: {source}", .path.display())]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message_lists_path() {
        let err = LayoutError::CycleDetected {
            slide: "Intro".to_string(),
            cycle: vec!["A".to_string(), "B".to_string(), "A".to_string()],
        };
        assert_eq!(err.to_string(), "Positioning cycle in slide 'Intro': A -> B -> A");
    }

    #[test]
    fn test_analysis_error_counts() {
        let err = AnalysisError {
            errors: vec![
                SemanticError::UndefinedObject { name: "X".into(), span: Span::default() },
                SemanticError::NotASlide { name: "Y".into(), span: Span::default() },
            ],
        };
        assert_eq!(err.to_string(), "There are 2 semantic errors in the program");
    }
}
