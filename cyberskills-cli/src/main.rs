//! CLI entry point for the Cyberskills assistant

mod repl;
mod terminal;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use cyberskills_agent::{ChatController, DisplaySink};
use cyberskills_client::HttpBackend;
use cyberskills_core::config::{Config, ConfigLoader};
use cyberskills_core::logging::init_logging;
use cyberskills_core::preferences::ThemePreference;
use cyberskills_core::safety::AdmissionPipeline;
use cyberskills_core::session::{HistoryEntry, SessionStore};
use cyberskills_core::storage::FileStore;
use dialoguer::Confirm;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::terminal::{Confirmer, TerminalDisplay};

#[derive(Parser)]
#[command(name = "cyberskills")]
#[command(about = "Terminal chat client for the Cyberskills cybersecurity assistant")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration directory
    #[arg(short, long, global = true)]
    config_dir: Option<PathBuf>,

    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    yes: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the assistant (default)
    Chat {
        /// Send one message, print the reply and exit
        #[arg(short, long)]
        message: Option<String>,
    },
    /// List saved conversations
    History,
    /// Print a saved conversation
    Show {
        /// Session id, as listed by `history`
        id: u64,
    },
    /// Show or toggle the light/dark theme
    Theme {
        /// Switch to the other theme
        #[arg(short, long)]
        toggle: bool,
    },
    /// Show the effective configuration
    Config {
        /// Write the default configuration file
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loader = match &cli.config_dir {
        Some(dir) => ConfigLoader::with_dir(dir),
        None => ConfigLoader::new(),
    };

    let config = loader.load().context("Failed to load configuration")?;
    let _log_guard = init_logging(&logging_config(&loader, &config));

    match cli.command.unwrap_or(Commands::Chat { message: None }) {
        Commands::Chat { message } => {
            info!("Starting chat against {}", config.backend.base_url);
            run_chat(&loader, &config, message, cli.yes).await?;
        }
        Commands::History => run_history(&loader, &config),
        Commands::Show { id } => run_show(&loader, &config, id)?,
        Commands::Theme { toggle } => run_theme(&loader, &config, toggle)?,
        Commands::Config { init } => run_config(&loader, &config, init, cli.yes)?,
    }

    Ok(())
}

/// Relative log directories live under the config directory
fn logging_config(
    loader: &ConfigLoader,
    config: &Config,
) -> cyberskills_core::config::LoggingConfig {
    let mut logging = config.logging.clone();
    let dir = PathBuf::from(&logging.dir);
    if dir.is_relative() {
        logging.dir = loader.config_dir().join(dir).to_string_lossy().into_owned();
    }
    logging
}

fn open_store(loader: &ConfigLoader, config: &Config) -> FileStore {
    FileStore::new(loader.storage_dir(config))
}

fn session_store(store: FileStore, config: &Config) -> SessionStore<FileStore> {
    SessionStore::with_key(store, config.storage.history_key.clone())
}

async fn run_chat(
    loader: &ConfigLoader,
    config: &Config,
    message: Option<String>,
    assume_yes: bool,
) -> Result<()> {
    let store = open_store(loader, config);
    let theme_pref = ThemePreference::new(config.storage.theme_key.clone());
    let display = Arc::new(TerminalDisplay::new(theme_pref.load(&store)));

    let pipeline = AdmissionPipeline::from_config(&config.admission)?;
    let backend = HttpBackend::new(config.backend.base_url.clone())?;

    let controller = ChatController::new(
        pipeline,
        session_store(store.clone(), config),
        backend,
        display.clone(),
        Confirmer::new(assume_yes),
    );

    match message {
        Some(text) => {
            controller.send_message(&text).await;
        }
        None => repl::run(&controller, &display, &store, &theme_pref).await?,
    }

    Ok(())
}

pub(crate) fn print_history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("No saved conversations.");
        return;
    }

    println!("{}", style("Saved conversations").bold().cyan());
    for entry in entries {
        println!("  {}  {}", style(entry.id).dim(), entry.title);
    }
}

fn run_history(loader: &ConfigLoader, config: &Config) {
    let sessions = session_store(open_store(loader, config), config);
    let entries = sessions.load_history_index();
    info!("Listing {} saved sessions", entries.len());
    print_history(&entries);
}

fn run_show(loader: &ConfigLoader, config: &Config, id: u64) -> Result<()> {
    let store = open_store(loader, config);
    let theme = ThemePreference::new(config.storage.theme_key.clone()).load(&store);
    let sessions = session_store(store, config);

    let record = sessions
        .load_history()
        .into_iter()
        .find(|record| record.id == id)
        .with_context(|| format!("No saved conversation with id {}", id))?;

    println!("{}", style(&record.title).bold());
    let display = TerminalDisplay::new(theme);
    for message in &record.messages {
        display.append(message.role(), message.content());
    }
    Ok(())
}

fn run_theme(loader: &ConfigLoader, config: &Config, toggle: bool) -> Result<()> {
    let store = open_store(loader, config);
    let pref = ThemePreference::new(config.storage.theme_key.clone());

    let theme = if toggle {
        pref.toggle(&store)?
    } else {
        pref.load(&store)
    };
    println!("Theme: {}", theme);
    Ok(())
}

fn run_config(loader: &ConfigLoader, config: &Config, init: bool, assume_yes: bool) -> Result<()> {
    if init {
        let path = loader.config_path();
        if path.exists() && !assume_yes {
            let overwrite = Confirm::new()
                .with_prompt("Configuration already exists. Overwrite?")
                .default(false)
                .interact()?;
            if !overwrite {
                println!("Init cancelled.");
                return Ok(());
            }
        }
        loader.save(&Config::default())?;
        println!("{} {}", style("Wrote").green(), path.display());
        return Ok(());
    }

    println!("{}", style("Configuration").bold().cyan());
    let source = if loader.config_path().exists() {
        loader.config_path().display().to_string()
    } else {
        warn!("No config file at {}", loader.config_path().display());
        "defaults".to_string()
    };
    println!("  Source: {}", source);
    println!("  Storage: {}", loader.storage_dir(config).display());
    println!();
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
