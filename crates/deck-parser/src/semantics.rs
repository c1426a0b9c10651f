//! Semantic analysis: builds the symbol table and checks object references.

use deck_core::{
    AnalysisError, AnimationDefinition, AnimationDefinitionKind, DirectiveKind, Identifier,
    ObjectDefinition, ObjectKind, Program, SemanticError, Span, StructureDefinition, SymbolTable,
};

/// Check a parsed program and build its symbol table.
///
/// Every error is collected; the program is rejected if there is at least one.
pub fn analyze(program: &Program) -> Result<SymbolTable, AnalysisError> {
    let mut checker = Checker::default();

    for object in &program.objects {
        checker.define(object);
    }
    for structure in &program.structures {
        checker.check_structure(structure);
    }
    // Structures first: sequence steps need every slide's content.
    for animation in &program.animations {
        checker.check_animation(animation);
    }

    if checker.errors.is_empty() {
        log::debug!("Semantic analysis passed: {} symbols", checker.symbols.len());
        Ok(checker.symbols)
    } else {
        for error in &checker.errors {
            log::debug!("line {}: {}", error.span().line, error);
        }
        Err(AnalysisError {
            errors: checker.errors,
        })
    }
}

#[derive(Default)]
struct Checker {
    symbols: SymbolTable,
    errors: Vec<SemanticError>,
}

impl Checker {
    fn define(&mut self, object: &ObjectDefinition) {
        let name = object.identifier.as_str();
        if !self.symbols.define(name, object.kind, object.properties.clone()) {
            self.errors.push(SemanticError::DuplicateObject {
                name: name.to_string(),
                span: object.span,
            });
        }
    }

    /// Report unless `identifier` names a slide.
    fn expect_slide(&mut self, identifier: &Identifier, span: Span) -> bool {
        let name = identifier.as_str();
        match self.symbols.kind_of(name) {
            Some(ObjectKind::Slide) => true,
            Some(_) => {
                self.errors.push(SemanticError::NotASlide {
                    name: name.to_string(),
                    span,
                });
                false
            }
            None => {
                self.errors.push(SemanticError::UndefinedObject {
                    name: name.to_string(),
                    span,
                });
                false
            }
        }
    }

    /// Report unless `identifier` names a textblock or an image.
    fn expect_element(&mut self, identifier: &Identifier, span: Span) -> bool {
        let name = identifier.as_str();
        match self.symbols.kind_of(name) {
            Some(ObjectKind::Slide) => {
                self.errors.push(SemanticError::UnexpectedSlide {
                    name: name.to_string(),
                    span,
                });
                false
            }
            Some(_) => true,
            None => {
                self.errors.push(SemanticError::UndefinedObject {
                    name: name.to_string(),
                    span,
                });
                false
            }
        }
    }

    fn check_structure(&mut self, structure: &StructureDefinition) {
        let slide = structure.identifier.as_str();
        self.expect_slide(&structure.identifier, structure.span);

        for directive in &structure.directives {
            let DirectiveKind::Add { identifier, .. } = &directive.kind else {
                continue;
            };
            if !self.expect_element(identifier, directive.span) {
                continue;
            }
            if !self.symbols.record_appearance(identifier.as_str(), slide) {
                self.errors.push(SemanticError::RepeatedInSlide {
                    name: identifier.to_string(),
                    slide: slide.to_string(),
                    span: directive.span,
                });
            }
        }
    }

    fn check_animation(&mut self, animation: &AnimationDefinition) {
        match &animation.kind {
            AnimationDefinitionKind::Single { identifier, .. } => {
                if !self.symbols.contains(identifier.as_str()) {
                    self.errors.push(SemanticError::UndefinedObject {
                        name: identifier.to_string(),
                        span: animation.span,
                    });
                }
            }
            AnimationDefinitionKind::Sequence { slide, steps, .. } => {
                if !self.expect_slide(slide, animation.span) {
                    return;
                }
                for step in steps {
                    if !self.expect_element(&step.identifier, step.span) {
                        continue;
                    }
                    if !self.symbols.appears_in(step.identifier.as_str(), slide.as_str()) {
                        self.errors.push(SemanticError::NotInSlide {
                            name: step.identifier.to_string(),
                            slide: slide.to_string(),
                            span: step.span,
                        });
                    }
                }
            }
            AnimationDefinitionKind::Pair { from, to, .. } => {
                self.expect_slide(from, animation.span);
                self.expect_slide(to, animation.span);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn errors_of(source: &str) -> Vec<SemanticError> {
        let program = parse(source).unwrap();
        analyze(&program).unwrap_err().errors
    }

    #[test]
    fn test_valid_program_builds_symbols() {
        let program = parse(
            "presentation P\n\
             Slide Intro:\n\
             Textblock Title:\n  color: red\n\
             Structure Intro:\n  add Title with \"Hi\"\n\
             Animations:\n  Sequence Intro:\n    Title appear\n",
        )
        .unwrap();
        let symbols = analyze(&program).unwrap();
        assert_eq!(symbols.len(), 2);
        assert!(symbols.appears_in("Title", "Intro"));
        assert_eq!(symbols.get("Title").unwrap().properties.len(), 1);
    }

    #[test]
    fn test_duplicate_object() {
        let errors = errors_of("presentation P\nTextblock A:\nImage A:\n");
        assert!(matches!(&errors[..], [SemanticError::DuplicateObject { name, .. }] if name == "A"));
    }

    #[test]
    fn test_structure_of_non_slide_and_undefined_add() {
        let errors = errors_of("presentation P\nTextblock A:\nStructure A:\n  add Ghost\n");
        assert_eq!(errors.len(), 2);
        assert!(matches!(&errors[0], SemanticError::NotASlide { name, .. } if name == "A"));
        assert!(matches!(&errors[1], SemanticError::UndefinedObject { name, .. } if name == "Ghost"));
    }

    #[test]
    fn test_add_slide_and_repeated_object() {
        let errors = errors_of(
            "presentation P\nSlide S:\nSlide T:\nImage I:\nStructure S:\n  add T\n  add I\n  add I\n",
        );
        assert_eq!(errors.len(), 2);
        assert!(matches!(&errors[0], SemanticError::UnexpectedSlide { name, .. } if name == "T"));
        assert!(matches!(
            &errors[1],
            SemanticError::RepeatedInSlide { name, slide, .. } if name == "I" && slide == "S"
        ));
    }

    #[test]
    fn test_sequence_step_not_in_slide() {
        let errors = errors_of(
            "presentation P\nSlide S:\nImage I:\nStructure S:\n\
             Animations:\n  Sequence S:\n    I appear\n",
        );
        assert!(matches!(
            &errors[..],
            [SemanticError::NotInSlide { name, slide, .. }] if name == "I" && slide == "S"
        ));
    }

    #[test]
    fn test_pair_and_single_references() {
        let errors = errors_of(
            "presentation P\nSlide S:\nImage I:\n\
             Animations:\n  S fade-into I\n  Nope appear\n  Missing jump-into S\n",
        );
        assert_eq!(errors.len(), 3);
        assert!(matches!(&errors[0], SemanticError::NotASlide { name, .. } if name == "I"));
        assert!(matches!(&errors[1], SemanticError::UndefinedObject { name, .. } if name == "Nope"));
        assert!(matches!(&errors[2], SemanticError::UndefinedObject { name, .. } if name == "Missing"));
    }

    #[test]
    fn test_relative_directives_are_not_checked() {
        let program = parse(
            "presentation P\nSlide S:\nImage I:\nStructure S:\n  add I\n  I left of Ghost\n",
        )
        .unwrap();
        assert!(analyze(&program).is_ok());
    }
}
