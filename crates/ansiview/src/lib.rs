//! The `ansiview` command.
//!
//! - `ansiview render FILE` parses ANSI escape sequences in `FILE` and
//!   writes a sealed HTML page, to stdout or `--output`.
//! - `ansiview strip FILE` prints the text without escape sequences.
//! - `ansiview sample` prints a color and attribute test matrix.
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

pub mod cli;
pub mod sample;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ansiview_parser::{plain_text, AnsiParser};
use ansiview_render::config::{RenderConfig, SnapshotStore, YamlConfig};
use ansiview_render::{
    DocumentRenderer, DocumentSource, RenderTarget, Sink, TextDocument, WriteSink,
};
use anyhow::{Context, Result};

use cli::{Cli, Command, RenderArgs};

/// Installs the stderr log subscriber.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Runs a parsed command, writing its output to `stdout`.
pub fn run(cli: Cli, stdout: &mut dyn Write) -> Result<()> {
    match cli.command {
        Command::Render(args) => render(&args, stdout),
        Command::Strip { file } => {
            let document = load(&file)?;
            stdout.write_all(plain_text(document.as_str()).as_bytes())?;
            Ok(())
        }
        Command::Sample => {
            stdout.write_all(sample::sample_text().as_bytes())?;
            Ok(())
        }
    }
}

fn load(path: &Path) -> Result<TextDocument> {
    TextDocument::from_file(path).with_context(|| format!("failed to read {}", path.display()))
}

fn render(args: &RenderArgs, stdout: &mut dyn Write) -> Result<()> {
    let store = match &args.config {
        Some(path) => {
            let config = YamlConfig::from_file(path)?;
            SnapshotStore::new(&config)
                .with_context(|| format!("invalid style configuration in {}", path.display()))?
        }
        None => SnapshotStore::new(&RenderConfig::default_palette())?,
    };

    let target = match &args.state {
        Some(json) => RenderTarget::Live {
            state: serde_json::from_str(json).context("--state is not valid JSON")?,
        },
        None => RenderTarget::Static(args.theme.resolve()),
    };

    let document = load(&args.file)?;
    let renderer = DocumentRenderer::new(store.current()).target(target);
    let segments = AnsiParser::new(document.as_str());

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut sink = WriteSink::new(BufWriter::new(file));
            write_document(&renderer, &document, segments, &mut sink)?;
            sink.into_inner()?;
        }
        None => {
            let mut sink = WriteSink::new(stdout);
            write_document(&renderer, &document, segments, &mut sink)?;
            sink.into_inner()?;
        }
    }
    Ok(())
}

fn write_document(
    renderer: &DocumentRenderer,
    document: &TextDocument,
    segments: AnsiParser<'_>,
    sink: &mut dyn Sink,
) -> Result<()> {
    let outcome = renderer
        .render(document, segments, sink)
        .with_context(|| format!("failed to render {}", document.file_name().display()))?;
    tracing::debug!(segments = outcome.segments(), "document written");
    Ok(())
}
