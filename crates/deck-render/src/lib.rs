//! HTML and CSS generation for Deck presentations.
//!
//! The output is a single HTML file per presentation. Object properties become
//! CSS classes in an inline `<style>` block; slides become `<div class='slide'>`
//! elements whose rows are emitted from the highest row index down and whose
//! objects are emitted left to right. The slide player's stylesheet and
//! scripts are referenced, not embedded (see [`RenderOptions`]).

mod css;
mod html;
mod options;

pub use css::{allowed_properties, declarations, stylesheet};
pub use html::render_html;
pub use options::{RenderOptions, DEFAULT_SCRIPTS};

use std::fs;
use std::path::{Path, PathBuf};

use deck_core::{Program, RenderError, SymbolTable};
use deck_layout::SlideList;

/// Render the presentation and write it to `<dir>/<presentation>.html`.
///
/// `dir` is created if needed; an existing file is overwritten. Returns the
/// path written.
pub fn write_presentation(
    dir: impl AsRef<Path>,
    program: &Program,
    symbols: &SymbolTable,
    slides: &SlideList<'_>,
    options: &RenderOptions,
) -> Result<PathBuf, RenderError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|source| RenderError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(format!("{}.html", program.presentation));
    let html = render_html(program, symbols, slides, options);
    fs::write(&path, html).map_err(|source| RenderError::Io {
        path: path.clone(),
        source,
    })?;

    log::info!("Wrote {} ({} slides)", path.display(), slides.len());
    Ok(path)
}
