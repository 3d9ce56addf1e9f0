mod app;
mod commands;
mod config;
mod tui_log_layer;

use {
    anyhow::{Context, Result},
    app::{AppState, IpoSource},
    clap::{Parser, Subcommand},
    config::{FileConfig, Settings},
    crossterm::{
        event::{DisableMouseCapture, EnableMouseCapture},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
    ipo_api::{API_URL_ENV, IpoClient, LEGACY_API_URL_ENV},
    ratatui::{Terminal, backend::CrosstermBackend},
    std::{io, path::PathBuf, sync::Arc},
    tokio::sync::Mutex as TokioMutex,
    tracing::{info, warn},
    tracing_subscriber::prelude::*,
    tui_log_layer::{LogBuffer, TuiLogLayer},
};

#[derive(Parser, Debug)]
#[command(name = "ipo-tui", version, about = "Browse IPO details, subscription and GMP")]
struct Cli {
    /// Base URL of the IPO API
    #[arg(long, env = API_URL_ENV, global = true)]
    api_url: Option<String>,

    /// Number of IPOs listed in the selector
    #[arg(long, global = true)]
    limit: Option<usize>,

    /// Config file to read instead of ~/.config/ipo-tui/config.json
    #[arg(long, env = "IPO_TUI_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Open the interactive view (default)
    Tui,
    /// Print every IPO
    List {
        /// Print raw records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the details of one IPO
    Show {
        /// IPO name as listed
        name: String,
    },
    /// Ask the backend to re-scrape, then print the new count
    Refresh,
    /// Check that the API answers
    Status,
}

fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(FileConfig::config_path);
    // Logging is not set up yet, so keep the error until it is
    let (file_config, config_error) = match FileConfig::load_from(&config_path) {
        Ok(config) => (config, None),
        Err(e) => (None, Some(e)),
    };
    let settings = Settings::resolve(
        cli.api_url.clone(),
        cli.limit,
        std::env::var(LEGACY_API_URL_ENV).ok(),
        file_config.as_ref(),
    );

    let client = IpoClient::new(&settings.api_url)
        .with_context(|| format!("Invalid API URL '{}'", settings.api_url))?;
    let source: Arc<dyn IpoSource> = Arc::new(client);

    let command = match cli.command.unwrap_or(CliCommand::Tui) {
        CliCommand::Tui => return run_tui(settings, source, config_error).await,
        CliCommand::List { json } => commands::Command::List { json },
        CliCommand::Show { name } => commands::Command::Show { name },
        CliCommand::Refresh => commands::Command::Refresh,
        CliCommand::Status => commands::Command::Status,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .init();
    if let Some(e) = config_error {
        warn!("Ignoring config file: {:#}", e);
    }

    commands::run(command, settings, source.as_ref()).await
}

async fn run_tui(
    settings: Settings,
    source: Arc<dyn IpoSource>,
    config_error: Option<anyhow::Error>,
) -> Result<()> {
    let logs = LogBuffer::new();
    tracing_subscriber::registry()
        .with(env_filter())
        .with(TuiLogLayer::new(logs.clone()))
        .init();

    if let Some(e) = config_error {
        warn!("Ignoring config file: {:#}", e);
    }
    info!(
        "Using API {} ({})",
        settings.api_url,
        settings.url_source.label()
    );

    let app_state = Arc::new(TokioMutex::new(AppState::new(settings, logs)));

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = app::run_ipo_tui(terminal, app_state, source).await;

    // Restore the terminal even when the loop failed
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;

    result
}
