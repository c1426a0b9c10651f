//! Parsing and analysis of the shared fixtures.

use deck_core::{AnimationDefinitionKind, DeckError, ObjectKind, SemanticError};
use deck_parser::{analyze, compile_source, parse};

const QUARTERLY: &str = include_str!("../../../tests/fixtures/quarterly.deck");

#[test]
fn test_quarterly_compiles() {
    let (program, symbols) = compile_source(QUARTERLY).unwrap();

    assert_eq!(program.presentation.as_str(), "Quarterly");
    let structures: Vec<&str> = program.structures.iter().map(|s| s.identifier.as_str()).collect();
    assert_eq!(structures, vec!["Intro", "Numbers", "Outro"]);

    assert_eq!(symbols.kind_of("Chart"), Some(ObjectKind::Image));
    assert!(symbols.appears_in("Logo", "Intro"));
    assert!(symbols.appears_in("Logo", "Outro"));
    assert!(!symbols.appears_in("Logo", "Numbers"));

    let sequences = program
        .animations
        .iter()
        .filter(|a| matches!(a.kind, AnimationDefinitionKind::Sequence { .. }))
        .count();
    assert_eq!(sequences, 2);
}

#[test]
fn test_every_semantic_error_is_collected() {
    let source = QUARTERLY.replace("add Costs with", "add Ghost with") + "  Sequence Title:\n";
    let program = parse(&source).unwrap();
    let errors = analyze(&program).unwrap_err().errors;

    // `Ghost` is undefined and `Title` is not a slide.
    assert_eq!(errors.len(), 2);
    assert!(matches!(&errors[0], SemanticError::UndefinedObject { name, span } if name == "Ghost" && span.line == 41));
    assert!(matches!(&errors[1], SemanticError::NotASlide { name, .. } if name == "Title"));
}

#[test]
fn test_compile_source_wraps_stage_errors() {
    assert!(matches!(compile_source("Slide S:\n"), Err(DeckError::Parse(_))));
    assert!(matches!(
        compile_source("presentation P\nStructure Nowhere:\n  add X\n"),
        Err(DeckError::Analysis(_))
    ));
}
