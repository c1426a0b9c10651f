//! Core types, AST definitions, and shared services for the Deck compiler.
//!
//! This crate provides the foundational types used across all other deck crates:
//! - AST node types for representing parsed presentations
//! - Value types (identifiers, positions, animation kinds, CSS values)
//! - The symbol table built during semantic analysis
//! - The diagnostics sink threaded through layout and rendering
//! - Error types

pub mod ast;
pub mod diagnostics;
pub mod errors;
pub mod symbols;
pub mod types;

pub use ast::*;
pub use diagnostics::*;
pub use errors::*;
pub use symbols::*;
pub use types::*;
