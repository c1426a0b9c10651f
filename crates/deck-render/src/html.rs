//! HTML generation for laid-out slides.

use smallvec::SmallVec;

use deck_core::{
    AnimationDefinitionKind, AnimationKind, AnimationStep, ObjectKind, Program, SymbolTable,
};
use deck_layout::{PositionedObject, Slide, SlideList};

use crate::css::stylesheet;
use crate::options::RenderOptions;

/// Render a whole presentation to an HTML document.
pub fn render_html(
    program: &Program,
    symbols: &SymbolTable,
    slides: &SlideList<'_>,
    options: &RenderOptions,
) -> String {
    let mut builder = HtmlBuilder {
        html: String::new(),
        program,
        symbols,
        options,
    };
    builder.prologue();
    for slide in slides {
        builder.slide(slide);
    }
    builder.epilogue();
    builder.html
}

struct HtmlBuilder<'a> {
    html: String,
    program: &'a Program,
    symbols: &'a SymbolTable,
    options: &'a RenderOptions,
}

impl<'a> HtmlBuilder<'a> {
    fn line(&mut self, text: &str) {
        self.html.push_str(text);
        self.html.push('\n');
    }

    fn prologue(&mut self) {
        let title = escape_html(self.program.presentation.as_str());
        let stylesheet_href = escape_html(&self.options.asset(&self.options.stylesheet));

        self.line("<!DOCTYPE html>");
        self.line("<html lang='en'>");
        self.line("<head>");
        self.line("<meta charset='UTF-8'>");
        self.line("<meta name='viewport' content='width=device-width, initial-scale=1.0'>");
        self.line(&format!("<title>{}</title>", title));
        self.line(&format!("<link rel='stylesheet' href='{}'>", stylesheet_href));
        self.line("<style>");
        self.html.push_str(&stylesheet(self.symbols));
        self.line("</style>");
        self.line("</head>");
        self.line("<body>");
        self.line("<div class='class-container'>");
    }

    fn epilogue(&mut self) {
        self.line("</div>");
        self.line("<div class='slide-number'></div>");
        let options = self.options;
        for script in &options.scripts {
            self.line(&format!("<script src='{}'></script>", escape_html(&options.asset(script))));
        }
        self.line("</body>");
        self.line("</html>");
    }

    fn slide(&mut self, slide: &Slide<'_>) {
        let identifier = slide.identifier();
        let sequence = find_sequence(self.program, identifier);

        let mut open = format!("<div class='slide {}", identifier);
        if slide.index() == 0 {
            open.push_str(" active");
        }
        open.push('\'');
        if let Some(transition) = find_transition(self.program, identifier) {
            open.push_str(&format!(" data-transition='{}'", transition));
        }
        let repeats = sequence.map(|(_, repeat)| repeat).unwrap_or(1);
        open.push_str(&format!(" data-repeats='{}'>", repeats));
        self.line(&open);

        let steps = sequence.map(|(steps, _)| steps).unwrap_or(&[]);
        for (index, row) in slide.rows() {
            log::debug!(
                "Slide {} row {}: columns {}..={}",
                identifier,
                index,
                row.min_col(),
                row.max_col()
            );
            self.line("<div class='row'>");
            for (_, id) in row.columns() {
                if let Some(object) = slide.object(id) {
                    self.object(identifier, object, steps);
                }
            }
            self.line("</div>");
        }
        self.line("</div>");
    }

    fn object(&mut self, slide: &str, object: &PositionedObject, steps: &[AnimationStep]) {
        let identifier = object.identifier.as_str();
        let Some(kind) = self.symbols.kind_of(identifier) else {
            log::warn!("Object '{}' on slide '{}' has no definition", identifier, slide);
            return;
        };
        let content = escape_html(find_content(self.program, slide, identifier).unwrap_or(""));
        let animation = ObjectAnimation::collect(identifier, steps)
            .map(|a| a.attributes())
            .unwrap_or_default();

        match kind {
            ObjectKind::Image => self.line(&format!(
                "<img src='{}' class='slide-image {}'{}>",
                content, identifier, animation
            )),
            ObjectKind::Textblock => self.line(&format!(
                "<div class='{}'{}>{}</div>",
                identifier, animation, content
            )),
            ObjectKind::Slide => {
                log::warn!("Slide '{}' placed inside slide '{}'", identifier, slide)
            }
        }
    }
}

/// Transition out of `slide`: the first slide pair starting at it decides.
fn find_transition(program: &Program, slide: &str) -> Option<&'static str> {
    let animation = program.animations.iter().find_map(|a| match &a.kind {
        AnimationDefinitionKind::Pair { from, animation, .. }
            if from.as_str().eq_ignore_ascii_case(slide) =>
        {
            Some(*animation)
        }
        _ => None,
    })?;

    match animation {
        AnimationKind::FadeInto => Some("fade"),
        AnimationKind::JumpInto => Some("jump"),
        _ => None,
    }
}

/// Steps and repeat count of the last sequence declared for `slide`.
fn find_sequence<'p>(program: &'p Program, slide: &str) -> Option<(&'p [AnimationStep], u32)> {
    program.animations.iter().rev().find_map(|a| match &a.kind {
        AnimationDefinitionKind::Sequence { slide: target, steps, repeat }
            if target.as_str().eq_ignore_ascii_case(slide) =>
        {
            Some((steps.as_slice(), *repeat))
        }
        _ => None,
    })
}

/// Text (or image source) given by the slide's `add ... with "..."`.
fn find_content<'p>(program: &'p Program, slide: &str, object: &str) -> Option<&'p str> {
    program
        .structures
        .iter()
        .filter(|s| s.identifier.as_str() == slide)
        .find_map(|s| s.content_of(object))
}

/// Element animations of one object within a sequence.
#[derive(Debug, Default, PartialEq)]
struct ObjectAnimation {
    kinds: SmallVec<[&'static str; 4]>,
    /// 1-based step numbers
    orders: SmallVec<[usize; 4]>,
}

impl ObjectAnimation {
    fn collect(object: &str, steps: &[AnimationStep]) -> Option<Self> {
        let mut animation = Self::default();
        for (index, step) in steps.iter().enumerate() {
            if !step.identifier.as_str().eq_ignore_ascii_case(object)
                || !step.animation.is_element_animation()
            {
                continue;
            }
            animation.kinds.push(step.animation.keyword());
            animation.orders.push(index + 1);
        }
        (!animation.kinds.is_empty()).then_some(animation)
    }

    fn attributes(&self) -> String {
        let orders: Vec<String> = self.orders.iter().map(|o| o.to_string()).collect();
        format!(
            " data-animation='{}' data-anim-order='{}'",
            self.kinds.join(" "),
            orders.join(", ")
        )
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::{Collector, Identifier, Span};
    use deck_layout::generate_slides;

    fn step(name: &str, animation: AnimationKind) -> AnimationStep {
        AnimationStep {
            identifier: Identifier::from(name),
            animation,
            span: Span::default(),
        }
    }

    #[test]
    fn test_object_animation_attributes() {
        let steps = vec![
            step("Title", AnimationKind::Appear),
            step("Logo", AnimationKind::Rotate),
            step("title", AnimationKind::Disappear),
            step("Title", AnimationKind::FadeInto),
        ];
        let animation = ObjectAnimation::collect("Title", &steps).unwrap();
        assert_eq!(
            animation.attributes(),
            " data-animation='appear disappear' data-anim-order='1, 3'"
        );
        assert!(ObjectAnimation::collect("Footer", &steps).is_none());
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & 'c'"), "a &lt; b &amp; &#39;c&#39;");
    }

    #[test]
    fn test_render_small_presentation() {
        let source = "presentation Demo\n\
                      Slide Intro:\n  background-color: navy\n\
                      Slide Outro:\n\
                      Textblock Title:\n\
                      Image Logo:\n\
                      Structure Intro:\n  add Title with \"Hi & bye\"\n  add Logo with \"logo.png\"\n  Logo right of Title\n\
                      Structure Outro:\n  add Title\n\
                      Animations:\n  Intro fade-into Outro\n  Sequence Intro repeat 3:\n    Logo rotate\n";
        let (program, symbols) = deck_parser::compile_source(source).unwrap();
        let slides = generate_slides(&program, &mut Collector::new());
        let html = render_html(&program, &symbols, &slides, &RenderOptions::default());

        assert!(html.starts_with("<!DOCTYPE html>\n<html lang='en'>\n"));
        assert!(html.contains("<title>Demo</title>"));
        assert!(html.contains(".Intro {\nbackground-color: navy;\n }\n"));
        assert!(html.contains(
            "<div class='slide Intro active' data-transition='fade' data-repeats='3'>\n\
             <div class='row'>\n\
             <div class='Title'>Hi &amp; bye</div>\n\
             <img src='logo.png' class='slide-image Logo' data-animation='rotate' data-anim-order='1'>\n\
             </div>\n</div>\n"
        ));
        assert!(html.contains("<div class='slide Outro' data-repeats='1'>\n<div class='row'>\n<div class='Title'></div>\n"));
        assert!(html.trim_end().ends_with("<script src='../src/main/web/js/main.js'></script>\n</body>\n</html>"));
    }
}
