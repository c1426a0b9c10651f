//! Grid layout engine for Deck slides.
//!
//! Every slide is a sparse grid of cells, at most one object per cell.
//!
//! # Architecture
//!
//! 1. **Builder**: each `add` directive takes the next row at column 0
//! 2. **Resolver**: `<child> <direction> of <parent>` rules move children
//!    next to their parents; a cycle or a collision keeps the baseline
//! 3. **Slide list**: one slide per structure with content, in order
//!
//! Problems never abort layout; they go to a [`deck_core::Diagnostics`] sink.
//!
//! # Example
//!
//! ```ignore
//! use deck_core::LogSink;
//! use deck_layout::generate_slides;
//!
//! let program = deck_parser::parse(source)?;
//! let slides = generate_slides(&program, &mut LogSink);
//!
//! for slide in &slides {
//!     for object in slide.cells() {
//!         println!("{}: ({}, {})", object.identifier, object.row, object.col);
//!     }
//! }
//! ```

mod builder;
mod grid;
mod resolver;
mod slides;
mod snapshot;

pub use builder::populate;
pub use grid::{Bounds, MoveOutcome, ObjectId, PositionedObject, Row, Slide};
pub use resolver::{resolve_relative_positions, Placement};
pub use slides::{generate_slides, SlideList};
pub use snapshot::{LayoutSnapshot, ObjectSnapshot, SlideSnapshot};
