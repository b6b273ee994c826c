//! CLI binary for doc2text.
//!
//! A thin shim over the library crate: read one document buffer (stdin by
//! default), run the extraction pipeline, and print exactly one line of
//! JSON to stdout. All diagnostics go to stderr so the caller can parse
//! stdout as structured data unconditionally.

use anyhow::{Context, Result};
use clap::Parser;
use doc2text::{extract, ExtractionConfig, ExtractionResult};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Extract from stdin (the default), e.g. piped from an upload handler
  cat scan.pdf | doc2text

  # Extract from a file
  doc2text receipt.jpg

  # German language model, higher rendering DPI
  doc2text --lang deu --dpi 300 rechnung.pdf

  # Quiet mode: stdout carries the JSON result, stderr stays silent
  doc2text -q document.pdf

OUTPUT:
  One JSON line on stdout: {"text": <string>, "error": <string>}.
  An empty input produces {"text": ""} with no error key.
  Exit code is always 0 unless the result could not be written.

ENVIRONMENT VARIABLES:
  DOC2TEXT_LANG       OCR language model (default: eng)
  DOC2TEXT_DPI        PDF rendering DPI (default: 200)
  TESSDATA_PREFIX     Tesseract language data directory
  PDFIUM_LIB_PATH     Path to an existing libpdfium
"#;

/// Extract plain text from a PDF or scanned image.
#[derive(Parser, Debug)]
#[command(
    name = "doc2text",
    version,
    about = "Extract plain text from a PDF or scanned image (OCR fallback)",
    long_about = "Extract plain text from a single document. PDFs with an embedded text layer \
are read directly; scanned PDFs and raster images are preprocessed and routed through \
Tesseract OCR. The result is one line of JSON on stdout.",
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input file, or '-' to read the document from stdin (default).
    #[arg(default_value = "-")]
    input: String,

    /// Tesseract language model.
    #[arg(long, env = "DOC2TEXT_LANG", default_value = "eng")]
    lang: String,

    /// PDF rendering DPI (72–400).
    #[arg(long, env = "DOC2TEXT_DPI", default_value_t = 200,
          value_parser = clap::value_parser!(u32).range(72..=400))]
    dpi: u32,

    /// Override the Tesseract data directory.
    #[arg(long, env = "DOC2TEXT_TESSDATA")]
    tessdata: Option<PathBuf>,

    /// Enable DEBUG-level tracing logs on stderr.
    #[arg(short, long, env = "DOC2TEXT_VERBOSE")]
    verbose: bool,

    /// Suppress all diagnostics except errors.
    #[arg(short, long, env = "DOC2TEXT_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // stdout is reserved for the JSON result; every log line goes to stderr.
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Read the input buffer ────────────────────────────────────────────
    // A read failure is reported on stderr and degrades to the empty-input
    // result: the host still receives parseable JSON.
    let buffer = match read_input(&cli.input) {
        Ok(buf) => buf,
        Err(e) => {
            tracing::error!("failed reading input: {e:#}");
            return emit(&ExtractionResult::empty_input());
        }
    };

    // ── Build config ─────────────────────────────────────────────────────
    let mut builder = ExtractionConfig::builder().lang(&cli.lang).dpi(cli.dpi);
    if let Some(ref dir) = cli.tessdata {
        builder = builder.tessdata_path(dir.to_string_lossy());
    }
    let config = match builder.build() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("invalid configuration: {e}");
            return emit(&ExtractionResult::failed(e.to_string()));
        }
    };

    // ── Run the pipeline and emit the result ─────────────────────────────
    emit(&extract(&buffer, &config))
}

/// Read the full document buffer before any processing begins.
fn read_input(input: &str) -> Result<Vec<u8>> {
    if input == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut buf)
            .context("reading stdin")?;
        Ok(buf)
    } else {
        std::fs::read(input).with_context(|| format!("reading '{input}'"))
    }
}

/// Write the result as a single JSON line on stdout.
fn emit(result: &ExtractionResult) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(result.to_json_line().as_bytes())
        .context("writing result to stdout")?;
    handle.write_all(b"\n").context("writing result to stdout")?;
    Ok(())
}
