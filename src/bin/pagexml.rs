//! CLI binary for pagexml-baseline.
//!
//! A thin shim over the library crate that maps CLI flags to `BuildConfig`,
//! runs the batch driver and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pagexml_baseline::{
    build_document, load_regions, process_images, BatchProgressCallback, BuildConfig,
    ImageDescriptor, ProgressCallback, Rectangle, RegionIdPolicy, SchemaVersion, SystemClock,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar for the batch plus a log line per image.
struct CliProgressCallback {
    bar: ProgressBar,
    errors: AtomicUsize,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.cyan} {prefix:.bold}  \
                 [{bar:42.green/238}] {pos:>4}/{len} images  ⏱ {elapsed_precise}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  "),
        );
        bar.set_prefix("Writing");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            errors: AtomicUsize::new(0),
        })
    }
}

impl BatchProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total: usize) {
        self.bar.set_length(total as u64);
    }

    fn on_image_start(&self, _index: usize, _total: usize, image: &Path) {
        self.bar.set_message(image.display().to_string());
    }

    fn on_image_complete(&self, index: usize, total: usize, output: &Path) {
        self.bar.println(format!(
            "  {} {:>4}/{:<4}  {}",
            green("✓"),
            index,
            total,
            dim(&output.display().to_string()),
        ));
        self.bar.inc(1);
    }

    fn on_image_error(&self, index: usize, total: usize, error: &str) {
        self.errors.fetch_add(1, Ordering::SeqCst);
        self.bar.println(format!(
            "  {} {:>4}/{:<4}  {}",
            red("✗"),
            index,
            total,
            red(error),
        ));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, total: usize, written: usize) {
        self.bar.finish_and_clear();
        let failed = total.saturating_sub(written);
        if failed == 0 {
            eprintln!(
                "{} {} documents written",
                green("✔"),
                bold(&written.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} documents written  ({} failed)",
                if written == 0 { red("✘") } else { cyan("⚠") },
                bold(&written.to_string()),
                total,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # One document per image, written to ./xml/
  pagexml scans/*.png -o xml

  # PAGE 2017 with two known figure areas
  pagexml --schema-version 2017-07-15 -r 120,340,800,600 -r 120,1000,800,400 page.tif

  # Rectangles from a JSON file: [{"x":..,"y":..,"width":..,"height":..}, ...]
  pagexml --regions-file figures.json page.png -o out

  # Print a single document instead of writing it
  pagexml --stdout --indent 2 page.png

SCHEMA VERSIONS:
  2010-03-19 (default)  polygons as <Point x=".." y=".."/> children
  2017-07-15            polygons as a points="x,y x,y ..." attribute
  Any other value falls back to 2010-03-19.

ENVIRONMENT VARIABLES:
  PAGEXML_OUTPUT_DIR       Default output directory
  PAGEXML_SCHEMA_VERSION   Default schema version
  PAGEXML_CREATOR          Metadata/Creator text
  RUST_LOG                 Override log filter (e.g. pagexml_baseline=debug)
"#;

/// Write baseline PAGE XML documents for scanned page images.
#[derive(Parser, Debug)]
#[command(
    name = "pagexml",
    version,
    about = "Write baseline PAGE XML documents for scanned page images",
    long_about = "Write a PAGE XML document for each input image containing one full-page \
paragraph region plus an image region per supplied rectangle. No layout analysis is performed.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Image files (PNG, JPEG, TIFF, BMP).
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// Directory receiving the XML files.
    #[arg(short, long, env = "PAGEXML_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// PAGE schema version: 2010-03-19 or 2017-07-15.
    #[arg(long, env = "PAGEXML_SCHEMA_VERSION", default_value = "2010-03-19")]
    schema_version: String,

    /// Image region as x,y,width,height (repeatable).
    #[arg(short, long = "region", value_name = "X,Y,W,H", allow_hyphen_values = true)]
    regions: Vec<Rectangle>,

    /// JSON file with an array of image-region rectangles.
    #[arg(long)]
    regions_file: Option<PathBuf>,

    /// Metadata/Creator text.
    #[arg(long, env = "PAGEXML_CREATOR", default_value = pagexml_baseline::DEFAULT_CREATOR)]
    creator: String,

    /// Leave ImageRegions without ids and overwrite the TextRegion id instead.
    #[arg(long)]
    legacy_ids: bool,

    /// Pretty-print with this many spaces per level.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=16))]
    indent: Option<u8>,

    /// Omit the <?xml ...?> declaration.
    #[arg(long)]
    no_declaration: bool,

    /// Print the document of a single image to stdout instead of writing a file.
    #[arg(long, conflicts_with = "json")]
    stdout: bool,

    /// Print the batch report as JSON.
    #[arg(long)]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "PAGEXML_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PAGEXML_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PAGEXML_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && !cli.stdout;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = build_config(&cli)?;
    let regions = collect_regions(&cli)?;

    // ── Single document to stdout ────────────────────────────────────────
    if cli.stdout {
        let [image] = cli.images.as_slice() else {
            anyhow::bail!("--stdout takes exactly one image (got {})", cli.images.len());
        };
        let descriptor = ImageDescriptor::from_path(image)
            .with_context(|| format!("Failed to read {}", image.display()))?;
        let name = image
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| image.display().to_string());
        let doc = build_document(descriptor, &name, &regions, &config, &SystemClock)
            .context("Failed to build document")?;

        let xml = doc.to_xml_string(&config.write_options());
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(xml.as_bytes())
            .context("Failed to write to stdout")?;
        if !xml.ends_with('\n') {
            handle.write_all(b"\n").ok();
        }
        return Ok(());
    }

    // ── Batch ────────────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as ProgressCallback)
    } else {
        None
    };

    let report = process_images(
        &cli.images,
        &regions,
        &cli.output_dir,
        &config,
        &SystemClock,
        progress_cb.as_ref(),
    )
    .context("Generation failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialise report")?;
        println!("{json}");
    } else if !cli.quiet && !show_progress {
        eprintln!(
            "Wrote {}/{} documents to {} in {}ms",
            report.stats.written,
            report.stats.total,
            cli.output_dir.display(),
            report.stats.duration_ms
        );
        for item in report.items.iter().filter(|it| it.error.is_some()) {
            if let Some(ref e) = item.error {
                eprintln!("  {} {}", red("✗"), e);
            }
        }
    }

    Ok(())
}

/// Map CLI args to `BuildConfig`.
fn build_config(cli: &Cli) -> Result<BuildConfig> {
    let version = pagexml_baseline::parse_version(&cli.schema_version);
    if version.as_str() != cli.schema_version && !cli.quiet {
        eprintln!(
            "{} unknown schema version '{}', using {}",
            cyan("⚠"),
            cli.schema_version,
            SchemaVersion::V2010
        );
    }

    let mut builder = BuildConfig::builder()
        .version(version)
        .creator(cli.creator.clone())
        .xml_declaration(!cli.no_declaration)
        .region_ids(if cli.legacy_ids {
            RegionIdPolicy::Legacy
        } else {
            RegionIdPolicy::Sequential
        });
    if let Some(n) = cli.indent {
        builder = builder.indent(usize::from(n));
    }

    builder.build().context("Invalid configuration")
}

/// `--region` values first, then those of `--regions-file`.
fn collect_regions(cli: &Cli) -> Result<Vec<Rectangle>> {
    let mut regions = cli.regions.clone();
    if let Some(ref path) = cli.regions_file {
        let from_file = load_regions(path)
            .with_context(|| format!("Failed to load regions from {}", path.display()))?;
        regions.extend(from_file);
    }
    Ok(regions)
}
