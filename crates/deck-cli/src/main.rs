//! Command-line compiler for Deck presentations.
//!
//! Usage:
//!   deck `<input>` [--output-dir `<dir>`] [--assets `<path>`] [--dump-layout] [--verbose]
//!
//! Writes `<dir>/<presentation>.html`. Layout problems are logged as warnings
//! and errors but do not fail the build; parse, semantic and I/O errors do.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;

use deck_core::{Collector, DeckError, LogSink, Severity, Tee};
use deck_layout::{generate_slides, LayoutSnapshot};
use deck_render::{write_presentation, RenderOptions};

#[derive(Parser)]
#[command(name = "deck", version)]
#[command(about = "Compile a Deck presentation to HTML")]
struct Args {
    /// Path to the presentation source
    input: PathBuf,

    /// Directory the HTML file is written to
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Location of the player's css/ and js/ directories, as seen from the output file
    #[arg(long, value_name = "PATH")]
    assets: Option<String>,

    /// Print the resolved layout as JSON
    #[arg(long)]
    dump_layout: bool,

    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("Cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Compile(#[from] DeckError),

    #[error("Cannot serialize layout: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run(args: &Args) -> Result<(), CliError> {
    let source = fs::read_to_string(&args.input).map_err(|source| CliError::Read {
        path: args.input.clone(),
        source,
    })?;

    let (program, symbols) = deck_parser::compile_source(&source)?;

    let mut collector = Collector::new();
    let slides = generate_slides(&program, &mut Tee(LogSink, &mut collector));

    if args.dump_layout {
        let snapshot = LayoutSnapshot::from(&slides);
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }

    let options = args
        .assets
        .as_ref()
        .map(RenderOptions::with_asset_root)
        .unwrap_or_default();
    let path = write_presentation(&args.output_dir, &program, &symbols, &slides, &options)
        .map_err(DeckError::from)?;

    log::info!(
        "{}: {} slides, {} layout warnings, {} slides kept their baseline layout -> {}",
        program.presentation,
        slides.len(),
        collector.count(Severity::Warning),
        collector.count(Severity::Error),
        path.display()
    );
    Ok(())
}

fn report(err: &CliError) {
    match err {
        CliError::Compile(DeckError::Analysis(analysis)) => {
            for error in &analysis.errors {
                log::error!("line {}: {}", error.span().line, error);
            }
            log::error!("{}", analysis);
        }
        other => log::error!("{}", other),
    }
}
