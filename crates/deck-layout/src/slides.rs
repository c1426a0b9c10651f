//! Slide list assembly.

use deck_core::{Diagnostic, Diagnostics, Program};

use crate::builder::populate;
use crate::grid::Slide;
use crate::resolver::{resolve_relative_positions, Placement};

/// All laid-out slides, in structure declaration order.
#[derive(Debug, Clone, Default)]
pub struct SlideList<'p> {
    slides: Vec<Slide<'p>>,
}

impl<'p> SlideList<'p> {
    pub fn new() -> Self {
        Self { slides: Vec::new() }
    }

    pub fn push(&mut self, slide: Slide<'p>) {
        self.slides.push(slide);
    }

    pub fn get(&self, index: usize) -> Option<&Slide<'p>> {
        self.slides.get(index)
    }

    /// Slide laid out from the structure named `identifier`.
    pub fn find(&self, identifier: &str) -> Option<&Slide<'p>> {
        self.slides.iter().find(|s| s.identifier() == identifier)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Slide<'p>> {
        self.slides.iter()
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

impl<'a, 'p> IntoIterator for &'a SlideList<'p> {
    type Item = &'a Slide<'p>;
    type IntoIter = std::slice::Iter<'a, Slide<'p>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slides.iter()
    }
}

/// Lay out every structure with content.
///
/// A slide whose relative placements fail keeps its baseline layout; the
/// failure has already been reported to `sink` and the other slides continue.
pub fn generate_slides<'p, D: Diagnostics>(program: &'p Program, sink: &mut D) -> SlideList<'p> {
    let mut list = SlideList::new();

    for structure in &program.structures {
        if structure.directives.is_empty() {
            sink.report(
                Diagnostic::debug("Structure has no content, no slide generated")
                    .in_slide(structure.identifier.as_str()),
            );
            continue;
        }

        let mut slide = Slide::new(structure.identifier.as_str(), list.len());
        populate(&mut slide, &structure.directives, sink);

        let placements: Vec<Placement<'p>> = structure
            .directives
            .iter()
            .filter_map(Placement::from_directive)
            .collect();
        // Errors are reported by the resolver.
        let _ = resolve_relative_positions(&mut slide, &placements, sink);

        list.push(slide);
    }

    log::debug!("Generated {} slides", list.len());
    list
}
