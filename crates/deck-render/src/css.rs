//! CSS rules from object properties.

use deck_core::{ObjectKind, Property, SymbolTable};

const SLIDE_PROPERTIES: &[&str] = &["background-color", "font-family"];

const TEXTBLOCK_PROPERTIES: &[&str] = &["background-color", "font-family", "color", "font-size"];

const IMAGE_PROPERTIES: &[&str] = &[
    "border-radius",
    "border-width",
    "border-color",
    "max-width",
    "max-height",
    "border-style",
];

/// Property names that have an effect on objects of `kind`.
pub fn allowed_properties(kind: ObjectKind) -> &'static [&'static str] {
    match kind {
        ObjectKind::Slide => SLIDE_PROPERTIES,
        ObjectKind::Textblock => TEXTBLOCK_PROPERTIES,
        ObjectKind::Image => IMAGE_PROPERTIES,
    }
}

/// Declarations (`name: value;` lines) for the allowed subset of `properties`.
pub fn declarations(kind: ObjectKind, properties: &[Property]) -> String {
    let allowed = allowed_properties(kind);
    let mut out = String::new();
    for property in properties {
        if !allowed.contains(&property.name.as_str()) {
            log::debug!("Ignoring property '{}' on {}", property.name, kind);
            continue;
        }
        out.push_str(&format!("{}: {};\n", property.name, property.value));
    }
    out
}

/// One `.id { ... }` rule per object with at least one allowed property,
/// in definition order.
pub fn stylesheet(symbols: &SymbolTable) -> String {
    let mut css = String::new();
    for (identifier, symbol) in symbols.iter() {
        let body = declarations(symbol.kind, &symbol.properties);
        if body.is_empty() {
            continue;
        }
        css.push_str(&format!(".{} {{\n{} }}\n", identifier, body));
    }
    css
}
