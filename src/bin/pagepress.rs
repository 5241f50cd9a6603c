//! CLI binary for pagepress.
//!
//! A thin shim over the library crate that maps CLI flags to `RenderConfig`
//! and prints results. Exit codes follow the classic contract: 0 on
//! success, 1 for usage errors, missing inputs, and runtime failures alike.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pagepress::{
    render_to_file, PaperSize, ProgressCallback, RenderConfig, RenderProgressCallback, RenderStage,
};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
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

/// Terminal progress callback: one spinner advancing through the five
/// pipeline stages, with a per-stage completion line.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(RenderStage::ALL.len() as u64);
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:30.green/238}] {pos}/{len}  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(style);
        bar.set_prefix("Rendering");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }
}

impl RenderProgressCallback for CliProgressCallback {
    fn on_stage_start(&self, stage: RenderStage) {
        self.bar.set_message(stage.label().to_string());
    }

    fn on_stage_complete(&self, stage: RenderStage, elapsed_ms: u64) {
        self.bar.println(format!(
            "  {} {:<16} {}",
            green("✓"),
            stage.label(),
            dim(&format!("{:.1}s", elapsed_ms as f64 / 1000.0)),
        ));
        self.bar.inc(1);
    }

    fn on_render_complete(&self, _pdf_bytes: usize, _total_ms: u64) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic conversion
  pagepress report.html report.pdf

  # Pin the browser binary
  pagepress report.html report.pdf /usr/bin/chromium

  # Letter paper with wider margins, no page numbers
  pagepress --paper letter --margin-ratio 0.15 --no-page-numbers doc.html doc.pdf

  # Print the render report as JSON (geometry, image wait, diagram decisions)
  pagepress --json report.html report.pdf

  # Validate input and show the geometry plan without launching a browser
  pagepress --dry-run report.html report.pdf

  # Inside a root container
  pagepress --no-sandbox report.html report.pdf

PAGE GEOMETRY:
  A4 portrait (8.27in x 11.69in) by default, with a uniform margin of 10%
  of each page dimension per side. At the default ratio that is ~21.0mm
  left/right and ~29.7mm top/bottom, leaving a printable area of
  635.1 x 897.8 CSS pixels at 96 DPI.

MARKUP CONTRACT:
  img.mermaid-diagram    diagram image; receives full-page layout
  img.mermaid-fullpage   explicit full-page marker
  .mermaid-wrap          wrapping container resized along with the diagram
  A resized wrapper additionally gains the mermaid-fullpage-wrap class.

EXIT CODES:
  0  PDF written successfully
  1  usage error, missing input file, no usable browser, or render failure

ENVIRONMENT VARIABLES:
  PAGEPRESS_BROWSER        Path to the Chrome/Chromium executable
  PAGEPRESS_TIMEOUT_SECS   Per-request DevTools timeout (default: 30)

SETUP:
  A Chromium-based browser is the only external requirement. If none is
  found automatically, pass its path as the third argument or set
  PAGEPRESS_BROWSER.
"#;

/// Render an HTML document to a paginated A4 PDF.
#[derive(Parser, Debug)]
#[command(
    name = "pagepress",
    version,
    about = "Render HTML documents to paginated PDFs via headless Chromium",
    long_about = "Render a local HTML document to a paginated PDF using a headless \
Chromium browser as the layout engine. Diagram-marked images are promoted to \
full-page layout; the exported PDF carries computed margins and a page-number footer.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the input HTML file.
    html: PathBuf,

    /// Path for the output PDF file.
    pdf: PathBuf,

    /// Optional path to the Chrome/Chromium executable.
    #[arg(env = "PAGEPRESS_BROWSER")]
    browser: Option<PathBuf>,

    /// Paper size.
    #[arg(long, value_enum, default_value = "a4")]
    paper: PaperArg,

    /// Margin as a fraction of each page dimension (0.0-0.45).
    #[arg(long, default_value_t = 0.1)]
    margin_ratio: f64,

    /// Per-request DevTools timeout in seconds.
    #[arg(long, env = "PAGEPRESS_TIMEOUT_SECS", default_value_t = 30)]
    timeout: u64,

    /// Do not print background colours and images.
    #[arg(long)]
    no_background: bool,

    /// Suppress the page-number footer.
    #[arg(long)]
    no_page_numbers: bool,

    /// Pass --no-sandbox to the browser (needed in root containers).
    #[arg(long)]
    no_sandbox: bool,

    /// Print the render report as JSON to stdout.
    #[arg(long)]
    json: bool,

    /// Validate the input and print the geometry plan without rendering.
    #[arg(long)]
    dry_run: bool,

    /// Disable the progress display.
    #[arg(long)]
    no_progress: bool,

    /// Increase log verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum PaperArg {
    A4,
    Letter,
    Legal,
}

impl From<PaperArg> for PaperSize {
    fn from(v: PaperArg) -> Self {
        match v {
            PaperArg::A4 => PaperSize::A4,
            PaperArg::Letter => PaperSize::Letter,
            PaperArg::Legal => PaperSize::Legal,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The contract pins usage errors to exit code 1; clap's default is 2.
    // --help/--version still exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            e.print().ok();
            std::process::exit(code);
        }
    };

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar provides all the feedback that matters to the user.
    let show_progress =
        !cli.quiet && !cli.no_progress && !cli.dry_run && io::stderr().is_terminal();
    let filter = if cli.verbose >= 2 {
        "trace"
    } else if cli.verbose == 1 {
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

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress && cli.verbose == 0 {
        Some(CliProgressCallback::new() as Arc<dyn RenderProgressCallback>)
    } else {
        None
    };

    let mut builder = RenderConfig::builder()
        .paper(cli.paper.into())
        .margin_ratio(cli.margin_ratio)
        .request_timeout_secs(cli.timeout)
        .print_background(!cli.no_background)
        .page_numbers(!cli.no_page_numbers)
        .no_sandbox(cli.no_sandbox);

    if let Some(ref browser) = cli.browser {
        builder = builder.browser_executable(browser);
    }
    if let Some(cb) = progress_cb {
        builder = builder.progress_callback(cb);
    }

    let config = builder.build().context("Invalid configuration")?;

    // ── Dry-run mode ─────────────────────────────────────────────────────
    if cli.dry_run {
        if !cli.html.is_file() {
            anyhow::bail!("HTML file not found: '{}'", cli.html.display());
        }
        let geometry = config.geometry();
        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&geometry).context("Failed to serialise geometry")?
            );
        } else {
            let (vw, vh) = geometry.viewport_px();
            println!("Input:       {}", cli.html.display());
            println!("Output:      {}", cli.pdf.display());
            println!(
                "Paper:       {:.2}in x {:.2}in",
                geometry.paper_width_in, geometry.paper_height_in
            );
            println!("Viewport:    {vw} x {vh} px");
            println!(
                "Printable:   {:.3} x {:.3} px",
                geometry.printable_width_px, geometry.printable_height_px
            );
            println!(
                "Margins:     {:.4}mm left/right, {:.4}mm top/bottom",
                geometry.margin_left_mm, geometry.margin_top_mm
            );
        }
        return Ok(());
    }

    // ── Run render ───────────────────────────────────────────────────────
    let report = render_to_file(&cli.html, &cli.pdf, &config)
        .await
        .context("Render failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialise report")?;
        println!("{json}");
    }

    if !cli.quiet {
        eprintln!(
            "{}  {}  {}",
            green("✔"),
            bold(&cli.pdf.display().to_string()),
            dim(&format!(
                "{} bytes, {}ms",
                report.stats.pdf_bytes, report.stats.total_ms
            )),
        );
        if !report.diagrams.is_empty() {
            eprintln!(
                "   {} {} diagram(s) promoted to full-page, {} image(s) awaited",
                cyan("◆"),
                report.diagrams.iter().filter(|d| d.promoted).count(),
                report.images.awaited,
            );
        }
    }

    Ok(())
}
