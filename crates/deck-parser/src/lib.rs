//! Parser for Deck presentations.
//!
//! Source text is split into indented lines, each line is parsed with `nom`
//! combinators, and the resulting [`Program`] is checked against the symbol
//! table by [`analyze`].

mod grammar;
mod lexer;
mod semantics;

pub use grammar::parse;
pub use semantics::analyze;

use deck_core::{DeckError, Program, SymbolTable};

/// Parse and analyze a presentation in one step.
///
/// # Example
///
/// ```ignore
/// use deck_parser::compile_source;
///
/// let source = r#"
/// presentation Demo
///
/// Slide Intro:
/// Textblock Title:
///
/// Structure Intro:
///   add Title with "Hello"
/// "#;
///
/// let (program, symbols) = compile_source(source)?;
/// ```
pub fn compile_source(source: &str) -> Result<(Program, SymbolTable), DeckError> {
    let program = parse(source)?;
    let symbols = analyze(&program)?;
    Ok((program, symbols))
}
