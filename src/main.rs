//! Gateway route tree viewer.
//!
//! # Architecture Overview
//!
//! ```text
//!   gateway.json ──▶ config::loader ──▶ routing::builder ──▶ routing::shadow
//!                                            │                     │
//!                                            ▼                     ▼
//!                                      RouteTree + colours ──▶ RouteSession
//!                                                                  │
//!                                              report::text ◀──────┴──────▶ report::json
//! ```
//!
//! # Exit Status
//! - 0: success
//! - 1: the file could not be loaded
//! - 2: `check` found shadowed routes

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use route_viewer::config::loader::{load_gateway_config, load_viewer_config};
use route_viewer::config::watcher::GatewayWatcher;
use route_viewer::config::ViewerConfig;
use route_viewer::observability::logging;
use route_viewer::report::{self, ReportOptions};
use route_viewer::RouteSession;

#[derive(Parser)]
#[command(name = "route-viewer")]
#[command(about = "Inspect gateway routes as a tree and find shadowed routes", long_about = None)]
struct Cli {
    /// Viewer settings file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured log level.
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the route tree
    Tree {
        file: PathBuf,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Only colour routes of these downstream hosts
        #[arg(long, value_delimiter = ',')]
        hosts: Vec<String>,

        /// Omit node colours
        #[arg(long)]
        no_colors: bool,
    },
    /// List routes shadowed by catch-all routes
    Check { file: PathBuf },
    /// List downstream hosts with their colours
    Hosts { file: PathBuf },
    /// Print the tree again whenever the file changes
    Watch { file: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => load_viewer_config(path)?,
        None => ViewerConfig::default(),
    };
    if let Some(level) = &cli.log_level {
        settings.logging.level = level.clone();
    }
    logging::init(&settings.logging);

    match cli.command {
        Commands::Tree {
            file,
            format,
            hosts,
            no_colors,
        } => {
            let mut session = load_session(&file, &settings)?;
            if !hosts.is_empty() {
                session.select_hosts(&hosts);
            }
            let options = ReportOptions {
                show_colors: !no_colors,
                ..ReportOptions::default()
            };
            match format {
                Format::Text => print!("{}", report::text::render(&session, &options)),
                Format::Json => println!("{}", report::json::render(&session)?),
            }
        }
        Commands::Check { file } => {
            let session = load_session(&file, &settings)?;
            print!("{}", report::text::render_conflicts(&session));
            if session.has_conflicts() {
                return Ok(ExitCode::from(2));
            }
        }
        Commands::Hosts { file } => {
            let session = load_session(&file, &settings)?;
            print!("{}", report::text::render_hosts(&session));
        }
        Commands::Watch { file } => watch(&file, &settings).await?,
    }

    Ok(ExitCode::SUCCESS)
}

fn load_session(path: &Path, settings: &ViewerConfig) -> Result<RouteSession, Box<dyn std::error::Error>> {
    let gateway = load_gateway_config(path)?;
    tracing::info!(path = ?path, routes = gateway.routes.len(), "Gateway file loaded");
    Ok(RouteSession::load(&gateway, &settings.display))
}

async fn watch(path: &Path, settings: &ViewerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let options = ReportOptions::default();
    let session = load_session(path, settings)?;
    print!("{}", report::text::render(&session, &options));

    let (watcher, mut updates) = GatewayWatcher::new(path);
    let _handle = watcher.run()?;

    loop {
        tokio::select! {
            update = updates.recv() => {
                let Some(gateway) = update else { break };
                let session = RouteSession::load(&gateway, &settings.display);
                println!();
                print!("{}", report::text::render(&session, &options));
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, stopping watcher");
                break;
            }
        }
    }

    Ok(())
}
