//! `custdesk` opens the customer registration form or one of the REST-backed
//! list views in the terminal.
//!
//! ```text
//! custdesk form --data customer.json --output saved.json
//! custdesk --base-url http://localhost:3000 posts
//! ```

use std::fmt::Write as FmtWrite;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Report, Result, WrapErr, eyre};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use custdesk::{
    CustomerForm, CustomersView, PostsView, UiOptions,
    api::{ApiClient, ApiConfig},
    domain::FormValues,
};

#[derive(Debug, Parser)]
#[command(
    name = "custdesk",
    version,
    about = "Customer registration form and REST-backed list views for the terminal"
)]
struct Cli {
    /// Base URL of the REST API (overrides CUSTDESK_API_BASE_URL)
    #[arg(long = "base-url", value_name = "URL", global = true)]
    base_url: Option<String>,

    /// Request timeout in milliseconds (overrides CUSTDESK_API_TIMEOUT)
    #[arg(long = "timeout-ms", value_name = "MS", global = true)]
    timeout_ms: Option<u64>,

    /// Retries after a network or server error (overrides CUSTDESK_API_RETRIES)
    #[arg(long = "retries", value_name = "N", global = true)]
    retries: Option<u32>,

    /// Append structured logs to this file; logging is off without it
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    log_file: Option<PathBuf>,

    /// Hide the key help line in the footer
    #[arg(long = "no-help", global = true)]
    no_help: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open the customer registration form
    Form(FormArgs),
    /// Browse customers fetched from the API
    Customers,
    /// Browse, create, edit and delete posts
    Posts,
}

#[derive(Debug, clap::Args)]
struct FormArgs {
    /// Initial data: file path, inline JSON, or "-" for stdin
    #[arg(short = 'd', long = "data", value_name = "SPEC")]
    data: Option<String>,

    /// Write the submitted values here ("-" writes to stdout)
    #[arg(short = 'o', long = "output", value_name = "DEST")]
    output: Option<String>,

    /// Overwrite the output file even if it already exists
    #[arg(short = 'f', long = "force", short_alias = 'y', alias = "yes")]
    force: bool,

    /// Leave without asking even when the form has unsaved changes
    #[arg(long = "no-confirm-exit")]
    no_confirm_exit: bool,
}

#[derive(Debug)]
enum InputSource {
    File(PathBuf),
    Stdin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum OutputDestination {
    Stdout,
    File(PathBuf),
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let options = UiOptions::default().with_help(!cli.no_help);
    match &cli.command {
        Command::Form(args) => run_form(args, options),
        Command::Customers => {
            let client = build_client(&cli)?;
            CustomersView::new(client)
                .with_options(options)
                .run()
                .map_err(Report::msg)
        }
        Command::Posts => {
            let client = build_client(&cli)?;
            PostsView::new(client)
                .with_options(options)
                .run()
                .map_err(Report::msg)
        }
    }
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("custdesk=info")))
        .init();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "custdesk starting");
    Ok(())
}

fn api_config(cli: &Cli) -> ApiConfig {
    let mut config = ApiConfig::from_env();
    if let Some(base_url) = cli.base_url.as_ref() {
        config = config.with_base_url(base_url.clone());
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout(Duration::from_millis(timeout_ms));
    }
    if let Some(retries) = cli.retries {
        config = config.with_max_retries(retries);
    }
    config
}

fn build_client(cli: &Cli) -> Result<ApiClient> {
    let config = api_config(cli);
    tracing::debug!(base_url = %config.base_url, "building api client");
    ApiClient::new(config).map_err(Report::msg)
}

fn run_form(args: &FormArgs, options: UiOptions) -> Result<()> {
    let mut diagnostics = DiagnosticCollector::default();

    let initial = match args.data.as_deref() {
        Some(spec) => match load_values(spec) {
            Ok(values) => Some(values),
            Err(err) => {
                diagnostics.push_input("data", format!("{err:#}"));
                None
            }
        },
        None => None,
    };
    let destination = args
        .output
        .as_deref()
        .and_then(|raw| parse_destination(raw, &mut diagnostics));
    if let Some(OutputDestination::File(path)) = destination.as_ref() {
        ensure_output_available(path, args.force, &mut diagnostics);
    }
    diagnostics.into_result()?;

    let mut form =
        CustomerForm::new().with_options(options.with_confirm_exit(!args.no_confirm_exit));
    if let Some(values) = initial {
        form = form.with_initial_data(values);
    }
    let Some(values) = form.run().map_err(Report::msg)? else {
        return Ok(());
    };

    match destination {
        Some(dest) => write_values(&values, &dest),
        None => Ok(()),
    }
}

fn load_values(spec: &str) -> Result<FormValues> {
    let contents = if spec == "-" {
        read_from_source(&InputSource::Stdin)?
    } else {
        let path = PathBuf::from(spec);
        match read_from_source(&InputSource::File(path.clone())) {
            Ok(contents) => contents,
            Err(err) if is_not_found(&err) => spec.to_string(),
            Err(err) => {
                return Err(err.wrap_err(format!("failed to load data from {}", path.display())));
            }
        }
    };
    parse_values(&contents)
}

fn parse_values(contents: &str) -> Result<FormValues> {
    serde_json::from_str(contents).wrap_err("failed to parse initial data as JSON")
}

fn read_from_source(source: &InputSource) -> Result<String> {
    match source {
        InputSource::Stdin => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .wrap_err("failed to read from stdin")?;
            Ok(buffer)
        }
        InputSource::File(path) => fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read file {}", path.display())),
    }
}

fn is_not_found(err: &Report) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|io_err| io_err.kind() == io::ErrorKind::NotFound)
}

fn parse_destination(raw: &str, diagnostics: &mut DiagnosticCollector) -> Option<OutputDestination> {
    if raw.trim().is_empty() {
        diagnostics.push_output("output destination cannot be empty");
        return None;
    }
    if raw == "-" {
        Some(OutputDestination::Stdout)
    } else {
        Some(OutputDestination::File(PathBuf::from(raw)))
    }
}

fn ensure_output_available(path: &Path, force: bool, diagnostics: &mut DiagnosticCollector) {
    if !force && path.exists() {
        diagnostics.push_output(format!(
            "file {} already exists; pass --force to overwrite",
            path.display()
        ));
    }
}

fn write_values(values: &FormValues, destination: &OutputDestination) -> Result<()> {
    let payload = serde_json::to_string_pretty(values).wrap_err("failed to serialize values")?;
    match destination {
        OutputDestination::Stdout => {
            println!("{payload}");
            Ok(())
        }
        OutputDestination::File(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)
                    .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
            }
            let mut file = File::create(path)
                .wrap_err_with(|| format!("failed to create {}", path.display()))?;
            io::Write::write_all(&mut file, payload.as_bytes())
                .wrap_err_with(|| format!("failed to write {}", path.display()))?;
            io::Write::write_all(&mut file, b"\n")
                .wrap_err_with(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "submitted values written");
            Ok(())
        }
    }
}

#[derive(Default)]
struct DiagnosticCollector {
    messages: Vec<String>,
}

impl DiagnosticCollector {
    fn push_input(&mut self, label: &str, message: impl Into<String>) {
        self.messages
            .push(format!("input ({label}): {}", message.into()));
    }

    fn push_output(&mut self, message: impl Into<String>) {
        self.messages.push(format!("output: {}", message.into()));
    }

    fn into_result(self) -> Result<()> {
        if self.messages.is_empty() {
            return Ok(());
        }
        let mut body = String::from("encountered input/output issues:\n");
        for (idx, msg) in self.messages.iter().enumerate() {
            let _ = writeln!(body, "  {}. {}", idx + 1, msg);
        }
        Err(eyre!(body))
    }
}
