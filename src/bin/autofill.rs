//! CLI binary for pdf-autofill.
//!
//! A thin shim over the library crate: the PDF path plays the picked file,
//! a terminal spinner plays the busy indicator, notifications go to stderr
//! and the filled form goes to stdout.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf_autofill::{
    AutofillConfig, Controller, FileCandidate, FormField, HttpTransport, Intake, Notification,
    NotificationKind, Phase, SelectedFile, SubmissionObserver,
};
use std::io::{self, Write};
use std::path::PathBuf;
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

// ── Terminal observer ────────────────────────────────────────────────────────

/// Renders controller events: a spinner while `Processing`, coloured
/// notification lines, and per-field lines in verbose mode.
struct CliObserver {
    bar: Option<ProgressBar>,
    quiet: bool,
    show_fields: bool,
}

impl CliObserver {
    fn new(show_progress: bool, quiet: bool, show_fields: bool) -> Arc<Self> {
        let bar = show_progress.then(|| {
            let bar = ProgressBar::hidden();
            bar.set_style(
                ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  ⏱ {elapsed}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner())
                    .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
            );
            bar.set_prefix("Processing");
            bar
        });
        Arc::new(Self {
            bar,
            quiet,
            show_fields,
        })
    }

    fn println(&self, line: String) {
        match &self.bar {
            Some(bar) if !bar.is_hidden() && !bar.is_finished() => bar.println(line),
            _ => eprintln!("{line}"),
        }
    }
}

impl SubmissionObserver for CliObserver {
    fn on_phase_change(&self, phase: Phase) {
        let Some(bar) = &self.bar else { return };
        match phase {
            Phase::Processing => {
                bar.set_draw_target(indicatif::ProgressDrawTarget::stderr());
                bar.reset_elapsed();
                bar.enable_steady_tick(Duration::from_millis(80));
            }
            Phase::FileSelected | Phase::Idle => {
                bar.disable_steady_tick();
                bar.finish_and_clear();
            }
        }
    }

    fn on_file_selected(&self, file: &SelectedFile, _intake: Intake) {
        if let Some(bar) = &self.bar {
            bar.set_message(format!("{} ({} KiB)", file.name(), file.size() / 1024));
        }
    }

    fn on_field_updated(&self, field: FormField, value: &str) {
        if self.show_fields {
            self.println(format!("  {} {:<18} {}", dim("·"), field.id(), value));
        }
    }

    fn on_notification(&self, notification: &Notification) {
        if self.quiet && notification.kind == NotificationKind::Success {
            return;
        }
        let line = match notification.kind {
            NotificationKind::Success => format!("{} {}", green("✔"), bold(&notification.message)),
            NotificationKind::Error => format!("{} {}", red("✘"), red(&notification.message)),
        };
        self.println(line);
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Fill the form from a CV and print it
  autofill resume.pdf --endpoint https://example.com/prod/process-cv

  # JSON output keyed by form control id
  autofill resume.pdf --json > form.json

  # Shorter timeout, show every field as it is written
  autofill resume.pdf --timeout 10 -v

REQUEST SENT:
  POST <endpoint>
  Content-Type: application/json
  {"file": "<base64 PDF>"}

EXPECTED RESPONSE:
  {"personalInfo": {"fullname": "...", "email": "...", ...}}

ENVIRONMENT VARIABLES:
  AUTOFILL_ENDPOINT   Document-processing endpoint
  AUTOFILL_TIMEOUT    Request timeout in seconds
  AUTOFILL_MAX_SIZE   Largest accepted file in bytes
  RUST_LOG            Override log filter (e.g. pdf_autofill=debug)
"#;

/// Fill a personal-information form from a PDF via a document-processing endpoint.
#[derive(Parser, Debug)]
#[command(
    name = "autofill",
    version,
    about = "Fill a personal-information form from a PDF",
    long_about = "Validate a PDF (application/pdf, 5 MiB max), send it base64-encoded to a \
document-processing endpoint and print the personal-information form filled from the response.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// PDF file to submit.
    input: PathBuf,

    /// Document-processing endpoint URL.
    #[arg(long, env = "AUTOFILL_ENDPOINT", default_value = pdf_autofill::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Request timeout in seconds.
    #[arg(long, env = "AUTOFILL_TIMEOUT", default_value_t = 30,
          value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Largest accepted file in bytes.
    #[arg(long, env = "AUTOFILL_MAX_SIZE", default_value_t = pdf_autofill::DEFAULT_MAX_FILE_SIZE)]
    max_size: u64,

    /// Print the form as JSON keyed by control id.
    #[arg(long)]
    json: bool,

    /// Disable the spinner.
    #[arg(long)]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs and per-field output.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress everything except errors and the form itself.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
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

    // ── Build controller ─────────────────────────────────────────────────
    let config = build_config(&cli)?;
    let transport = HttpTransport::new(&config).context("Failed to set up HTTP transport")?;
    let observer = CliObserver::new(show_progress, cli.quiet, cli.verbose);
    let mut controller = Controller::with_observer(config, transport, observer);

    // ── Select, submit ───────────────────────────────────────────────────
    let candidate = FileCandidate::from_path(&cli.input)
        .with_context(|| format!("Failed to open {}", cli.input.display()))?;
    controller
        .select_file(Some(candidate), Intake::Picked)
        .with_context(|| format!("File rejected: {}", cli.input.display()))?;

    controller.submit().await.context("Submission failed")?;

    // ── Print the form ───────────────────────────────────────────────────
    let form = controller.form();
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(form).context("Failed to serialise form")?
        );
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        for (field, value) in form.iter() {
            writeln!(handle, "{:<18} {}", field.id(), value).context("Failed to write to stdout")?;
        }
    }

    Ok(())
}

/// Map CLI args to `AutofillConfig`.
fn build_config(cli: &Cli) -> Result<AutofillConfig> {
    AutofillConfig::builder()
        .endpoint(cli.endpoint.clone())
        .request_timeout(Duration::from_secs(cli.timeout))
        .max_file_size(cli.max_size)
        .build()
        .context("Invalid configuration")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_onto_config() {
        let cli = Cli::try_parse_from([
            "autofill",
            "cv.pdf",
            "--endpoint",
            "https://example.com/prod/process-cv",
            "--timeout",
            "7",
            "--max-size",
            "1000",
        ])
        .unwrap();
        let config = build_config(&cli).unwrap();

        assert_eq!(config.endpoint, "https://example.com/prod/process-cv");
        assert_eq!(config.request_timeout, Duration::from_secs(7));
        assert_eq!(config.max_file_size, 1000);
    }

    #[test]
    fn zero_timeout_is_refused_by_the_parser() {
        assert!(Cli::try_parse_from(["autofill", "cv.pdf", "--timeout", "0"]).is_err());
    }

    #[test]
    fn non_http_endpoint_is_refused_by_the_builder() {
        let cli = Cli::try_parse_from(["autofill", "cv.pdf", "--endpoint", "ftp://example.com"]).unwrap();
        assert!(build_config(&cli).is_err());
    }
}
