//! CLI binary for img2doc.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `CaptureConfig`, drives one pipeline and prints the summary.

use anyhow::{Context, Result};
use clap::Parser;
use img2doc::{
    convert, inspect, CaptureConfig, CaptureError, ConversionProgressCallback, OutputFormat,
    ProgressCallback,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
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

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress bar, one tick per placed page. Without a bar only the
/// stage announcements are printed.
struct CliProgressCallback {
    bar: Option<ProgressBar>,
}

impl CliProgressCallback {
    /// Plain stdout announcements, no bar.
    fn plain() -> Arc<Self> {
        Arc::new(Self { bar: None })
    }

    /// Spinner until `on_conversion_start` tells us the page count.
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Loading");
        bar.set_message("scanning folder…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar: Some(bar) })
    }

    fn activate_bar(&self, total: usize) {
        let Some(bar) = &self.bar else {
            return;
        };
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} pages  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_length(total as u64);
        bar.set_style(progress_style);
        bar.set_prefix("Placing");
        bar.reset_eta();
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, _format: OutputFormat, total_pages: usize) {
        self.activate_bar(total_pages);
    }

    fn on_page_start(&self, _page_num: usize, _total_pages: usize, file_name: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(file_name.to_string());
        }
    }

    fn on_page_complete(&self, _page_num: usize, _total_pages: usize) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    fn on_serialize_start(&self, format: OutputFormat, _output_path: &Path) {
        let line = format!("Creating {format}");
        match &self.bar {
            Some(bar) => {
                bar.set_prefix("Writing");
                bar.println(line);
            }
            None => println!("{line}"),
        }
    }

    fn on_conversion_complete(&self, _total_pages: usize) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Captures in ./captures, writes ./result.docx
  img2doc docx

  # PDF with "i / N" labels, custom folder and output
  img2doc pdf -i shots -o book.pdf

  # Show the page order without rendering anything
  img2doc pdf --inspect-only

  # Machine-readable summary
  img2doc docx --json > summary.json

NAMING:
  Captures must be named Page_<N>.<ext> (case-insensitive), where <N> is an
  integer and <ext> is png, jpg, jpeg, bmp or webp. Pages are ordered by <N>;
  files whose name has no number after "Page_" go last.

EXIT STATUS:
  0  document written
  1  capture folder missing, or no Page_X image in it
  2  any other failure (unreadable image, write error, ...)

ENVIRONMENT VARIABLES:
  RUST_LOG                Override the log filter (e.g. img2doc=debug)
"#;

#[derive(Parser, Debug)]
#[command(
    name = "img2doc",
    version,
    about = "Assemble numbered screen captures into a paginated DOCX or PDF",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Document to produce.
    #[arg(value_enum)]
    format: FormatArg,

    /// Folder holding the Page_X captures.
    #[arg(short, long, default_value = "captures")]
    input: PathBuf,

    /// Output file. Default: result.docx / result.pdf in the current directory.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the page order and exit without rendering.
    #[arg(long)]
    inspect_only: bool,

    /// Print the result as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Disable the progress bar.
    #[arg(long)]
    no_progress: bool,

    /// Debug logging.
    #[arg(short, long)]
    verbose: bool,

    /// Errors only.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Docx,
    Pdf,
}

impl From<FormatArg> for OutputFormat {
    fn from(v: FormatArg) -> Self {
        match v {
            FormatArg::Docx => OutputFormat::Docx,
            FormatArg::Pdf => OutputFormat::Pdf,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The bar replaces INFO logs while it is shown.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && !cli.inspect_only;
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

    match run(&cli, show_progress) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", red("Error:"), err);
            let code = err
                .downcast_ref::<CaptureError>()
                .map(CaptureError::exit_code)
                .unwrap_or(2);
            ExitCode::from(code)
        }
    }
}

fn run(cli: &Cli, show_progress: bool) -> Result<()> {
    let format = OutputFormat::from(cli.format);
    let chatty = !cli.quiet && !cli.json;

    if chatty {
        println!("\n=== Image to {} converter ===", format);
        println!("Loading images...");
    }

    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new_dynamic() as Arc<dyn ConversionProgressCallback>)
    } else if chatty {
        Some(CliProgressCallback::plain() as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };
    let config = build_config(cli, format, progress_cb)?;

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let sequence = inspect(&config).context("Failed to inspect capture folder")?;
        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&sequence).context("Failed to serialise page list")?
            );
        } else {
            for (i, entry) in sequence.entries().iter().enumerate() {
                let index = entry
                    .page_index
                    .as_ref()
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("{:>4}  {:<40} {}", i + 1, entry.file_name, dim(&format!("index {index}")));
            }
            println!("Total pages: {}", sequence.len());
        }
        return Ok(());
    }

    // ── Run conversion ───────────────────────────────────────────────────
    let summary = convert(format, &config).context("Conversion failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&summary).context("Failed to serialise summary")?;
        println!("{json}");
    } else if !cli.quiet {
        let name = summary
            .output_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| summary.output_path.display().to_string());
        println!("{} {} created: {}", green("✔"), format, bold(&name));
        println!("Total pages: {}", summary.page_count);
        if cli.verbose {
            eprintln!("{}", dim(&format!("{}ms", summary.duration_ms)));
        }
    }

    Ok(())
}

fn build_config(
    cli: &Cli,
    format: OutputFormat,
    progress: Option<ProgressCallback>,
) -> Result<CaptureConfig> {
    let mut builder = CaptureConfig::builder().input_dir(&cli.input);
    if let Some(ref output) = cli.output {
        builder = builder.output(format, output);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }
    builder.build().context("Invalid configuration")
}
