//! Baseline placement of a slide's objects.

use deck_core::{Diagnostic, Diagnostics, Directive, DirectiveKind, LayoutError};

use crate::grid::Slide;

/// Place every `add` directive on its own row, in declaration order, at column 0.
///
/// Other directives are left for the resolver. A repeated `add` keeps the
/// first placement, reports a warning and does not consume a row. Returns the
/// number of objects placed.
pub fn populate<D: Diagnostics>(slide: &mut Slide<'_>, directives: &[Directive], sink: &mut D) -> usize {
    let mut next_row = 0;
    for directive in directives {
        let DirectiveKind::Add { identifier, .. } = &directive.kind else {
            continue;
        };
        match slide.insert(identifier.as_str(), next_row, 0) {
            Ok(_) => next_row += 1,
            Err(err @ LayoutError::DuplicateObject { .. }) => {
                sink.report(
                    Diagnostic::warning(format!("{} (line {})", err, directive.span.line))
                        .in_slide(slide.identifier()),
                );
            }
            Err(err) => {
                sink.report(Diagnostic::error(err.to_string()).in_slide(slide.identifier()));
            }
        }
    }
    next_row as usize
}
