//! Symbol table built during semantic analysis.

use indexmap::IndexMap;

use crate::ast::Property;
use crate::types::ObjectKind;

/// Everything known about a defined object.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Symbol {
    pub kind: ObjectKind,
    pub properties: Vec<Property>,
    /// Slides (by identifier) whose structure adds this object, in order
    pub appears_in: Vec<String>,
}

/// Identifier → symbol map. Iteration follows definition order.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolTable {
    symbols: IndexMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a symbol. Returns `false` (and keeps the first definition) if it exists.
    pub fn define(&mut self, identifier: &str, kind: ObjectKind, properties: Vec<Property>) -> bool {
        if self.symbols.contains_key(identifier) {
            log::debug!("Symbol {} already exists in the symbol table", identifier);
            return false;
        }
        log::debug!("Adding symbol: {} of type {}", identifier, kind);
        self.symbols.insert(
            identifier.to_string(),
            Symbol {
                kind,
                properties,
                appears_in: Vec::new(),
            },
        );
        true
    }

    pub fn get(&self, identifier: &str) -> Option<&Symbol> {
        self.symbols.get(identifier)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.symbols.contains_key(identifier)
    }

    pub fn kind_of(&self, identifier: &str) -> Option<ObjectKind> {
        self.symbols.get(identifier).map(|s| s.kind)
    }

    /// Record that `identifier` is added to `slide`.
    ///
    /// Returns `false` if the symbol is unknown or was already recorded for
    /// that slide.
    pub fn record_appearance(&mut self, identifier: &str, slide: &str) -> bool {
        let Some(symbol) = self.symbols.get_mut(identifier) else {
            return false;
        };
        if symbol.appears_in.iter().any(|s| s == slide) {
            return false;
        }
        symbol.appears_in.push(slide.to_string());
        true
    }

    pub fn appears_in(&self, identifier: &str, slide: &str) -> bool {
        self.symbols
            .get(identifier)
            .map(|s| s.appears_in.iter().any(|a| a == slide))
            .unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Symbol)> {
        self.symbols.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
