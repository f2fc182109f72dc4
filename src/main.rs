//! CLI entry point for the airport explorer.
//!
//! Loads the airport table once, then renders the dashboard for the given
//! parameters, lists selector options, or runs an interactive session that
//! re-renders on every parameter change.

use airport_explorer::{
    config::Settings,
    dashboard::{BaseSet, DEFAULT_ROWS, TypeSelection, ViewParams, build_dashboard},
    output::{Format, print_pretty, render, write_regions},
    region::Region,
    session,
};
use anyhow::{Context, Result};
use clap::builder::TypedValueParser;
use clap::{Args, Parser, Subcommand};
use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "airport_explorer")]
#[command(about = "Explore New England airports by region, elevation, and type", long_about = None)]
struct Cli {
    /// Airport table: local path, .gz file, or http(s) URL [env: AIRPORTS_CSV]
    #[arg(short, long, global = true)]
    source: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the dashboard once for the given filters
    Show {
        #[command(flatten)]
        view: ViewArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Start from the given filters and change them line by line on stdin
    Interactive {
        #[command(flatten)]
        view: ViewArgs,

        /// Output format for each re-render
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// List the supported regions
    Regions,
    /// List the airport types offered by the type selector
    Types,
}

#[derive(Args)]
struct ViewArgs {
    /// Region display name or ISO code (e.g. "Maine" or "US-ME")
    #[arg(short, long, default_value_t = Region::default())]
    region: Region,

    /// Only airports with scheduled service
    #[arg(long, default_value_t = false)]
    scheduled_only: bool,

    /// Minimum elevation in feet
    #[arg(short, long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=5000))]
    min_elevation: u32,

    /// Comma-separated airport types to include (default: all)
    #[arg(short, long, value_delimiter = ',')]
    types: Option<Vec<String>>,

    /// Number of table rows to show
    #[arg(long, default_value_t = DEFAULT_ROWS, value_parser = clap::value_parser!(u16).range(1..=20).map(usize::from))]
    rows: usize,

    /// Case-insensitive search over airport names
    #[arg(long, default_value = "")]
    search: String,
}

impl ViewArgs {
    fn into_params(self) -> ViewParams {
        ViewParams {
            region: self.region,
            scheduled_only: self.scheduled_only,
            min_elevation: self.min_elevation,
            types: match self.types {
                Some(types) => TypeSelection::Only(types.into_iter().map(|t| t.trim().to_string()).collect()),
                None => TypeSelection::All,
            },
            rows: self.rows,
            search: self.search,
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let cli = Cli::parse();
    let settings = Settings::from_env().with_source(cli.source);

    // Logging setup: colored stderr + JSON rolling log file
    let log_dir = Path::new(&settings.log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&settings.log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("airport_explorer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let stdout = io::stdout();

    match cli.command {
        Commands::Regions => {
            write_regions(stdout.lock())?;
        }
        Commands::Types => {
            let base = load_base(&settings)?;
            let mut out = stdout.lock();
            for kind in base.type_options() {
                writeln!(out, "{kind}")?;
            }
        }
        Commands::Show { view, format } => {
            let base = load_base(&settings)?;
            let params = view.into_params();
            params.validate_for(&base)?;

            let dashboard = build_dashboard(&base, &params);
            print_pretty(&dashboard);
            render(stdout.lock(), &dashboard, format)?;
        }
        Commands::Interactive { view, format } => {
            let base = load_base(&settings)?;
            let params = view.into_params();
            params.validate_for(&base)?;

            info!("Interactive session started, type 'help' for commands");
            let last = session::run(&base, params, io::stdin().lock(), stdout.lock(), format)?;
            info!(region = %last.region, "Interactive session ended");
        }
    }

    Ok(())
}

/// Loads the base set once; a missing or malformed source ends the program.
fn load_base(settings: &Settings) -> Result<BaseSet> {
    let base = BaseSet::load(&settings.source)
        .with_context(|| format!("cannot start without the airport table at '{}'", settings.source))?;

    if let Some(err) = base.coercion_error() {
        warn!(error = %err, "Continuing with unconverted elevations");
    }
    info!(
        source = %settings.source,
        records = base.records().len(),
        types = base.all_types().len(),
        "Base set ready"
    );
    Ok(base)
}
