//! vport — serial card reader daemon and whitelist admin tool.
//!
//! `vport run` drives the reader loop against the configured serial port;
//! `vport card ...` manages the whitelist database the reader consults.

mod config;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::AppConfig;
use vport_core::CardId;
use vport_reader::{AlertPattern, Buzzer, CardReader, ReaderConfig, SerialPortLink};
use vport_storage::{CardRepository, Database, DatabaseConfig, SqliteCardRepository, StorageGate};

#[derive(Parser, Debug)]
#[command(name = "vport")]
#[command(version, about = "Door card reader and whitelist manager", long_about = None)]
struct Args {
    /// Path to the JSON configuration file
    #[arg(short, long, default_value = "vport.json")]
    config: String,

    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the card reader loop
    Run {
        /// Start with learn mode active, enrolling unknown cards
        #[arg(long)]
        learn: bool,
    },

    /// Manage the card whitelist
    Card {
        #[command(subcommand)]
        cmd: CardCommand,
    },
}

#[derive(Subcommand, Debug)]
enum CardCommand {
    /// Add a card, or update and re-enable an existing one
    Add {
        /// 8-character hexadecimal card uid
        uid: String,

        /// Holder label
        #[arg(long)]
        name: Option<String>,

        /// Access level
        #[arg(long, default_value = "user")]
        level: String,
    },

    /// Remove a card
    Remove {
        /// 8-character hexadecimal card uid
        uid: String,
    },

    /// List all cards
    List,

    /// Re-enable a disabled card
    Enable {
        /// 8-character hexadecimal card uid
        uid: String,
    },

    /// Disable a card without deleting it
    Disable {
        /// 8-character hexadecimal card uid
        uid: String,
    },
}

/// Buzzer that renders alert patterns as log lines with real timing.
///
/// Stands in for the GPIO buzzer on machines without one; the timing is
/// kept so operators hear the same cadence in the logs.
struct ConsoleBuzzer;

impl Buzzer for ConsoleBuzzer {
    async fn play(&self, pattern: AlertPattern) -> vport_core::Result<()> {
        for step in pattern.steps() {
            for _ in 0..step.repeats {
                info!(?pattern, duration_ms = step.duration_ms, "beep");
                tokio::time::sleep(Duration::from_millis(step.duration_ms)).await;
                if step.gap_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(step.gap_ms)).await;
                }
            }
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_missing = !Path::new(&args.config).exists();
    let config = AppConfig::load_or_default(&args.config)?;

    init_logging(&args, &config)?;

    if config_missing {
        warn!(path = %args.config, "config file not found, using defaults");
    }

    match args.command {
        Command::Run { learn } => run_reader(&config, learn).await,
        Command::Card { cmd } => run_card_command(&config, cmd).await,
    }
}

fn init_logging(args: &Args, config: &AppConfig) -> Result<()> {
    let fallback = if args.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

async fn open_repository(config: &AppConfig) -> Result<(Database, SqliteCardRepository)> {
    let db = Database::new(DatabaseConfig::new(&config.database.path))
        .await
        .with_context(|| format!("failed to open database {}", config.database.path))?;
    let repo = SqliteCardRepository::new(db.pool().clone());
    Ok((db, repo))
}

async fn run_reader(config: &AppConfig, learn: bool) -> Result<()> {
    info!(version = vport_core::VERSION, "vport starting");

    let (db, repo) = open_repository(config).await?;
    let gate = StorageGate::new(repo);

    let link = SerialPortLink::open(&config.serial.port, config.serial.baud_rate)
        .with_context(|| format!("failed to open serial port {}", config.serial.port))?;

    let reader_config = ReaderConfig {
        debounce_window: Duration::from_millis(config.reader.debounce_ms),
        poll_interval: Duration::from_millis(config.reader.poll_ms),
        learn_mode: learn || config.reader.learn_mode,
        learn_label: config.reader.learn_label.clone(),
    };

    if let Err(e) = ConsoleBuzzer.play(AlertPattern::Startup).await {
        warn!(error = %e, "startup chirp failed");
    }

    let reader = CardReader::new(link, gate, ConsoleBuzzer, reader_config);
    let handle = reader.start(Arc::new(|card| {
        // Lock actuation hangs off this event in the full installation.
        info!(card = %card, "door release requested");
    }));

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;
    info!("shutdown signal received");

    handle.stop().await;
    db.close().await;
    Ok(())
}

async fn run_card_command(config: &AppConfig, cmd: CardCommand) -> Result<()> {
    let (db, repo) = open_repository(config).await?;

    match cmd {
        CardCommand::Add { uid, name, level } => {
            let card = parse_uid(&uid)?;
            repo.upsert(card.as_str(), name.as_deref(), &level).await?;
            println!("added {}", card);
        }
        CardCommand::Remove { uid } => {
            let card = parse_uid(&uid)?;
            repo.delete(card.as_str()).await?;
            println!("removed {}", card);
        }
        CardCommand::List => {
            let cards = repo.list_all().await?;
            if cards.is_empty() {
                println!("no cards enrolled");
            } else {
                println!("{:<10} {:<6} {:<8} {}", "UID", "LEVEL", "ENABLED", "NAME");
                for card in cards {
                    println!(
                        "{:<10} {:<6} {:<8} {}",
                        card.uid,
                        card.level,
                        if card.enabled { "yes" } else { "no" },
                        card.name.as_deref().unwrap_or("-"),
                    );
                }
            }
        }
        CardCommand::Enable { uid } => {
            let card = parse_uid(&uid)?;
            repo.set_enabled(card.as_str(), true).await?;
            println!("enabled {}", card);
        }
        CardCommand::Disable { uid } => {
            let card = parse_uid(&uid)?;
            repo.set_enabled(card.as_str(), false).await?;
            println!("disabled {}", card);
        }
    }

    db.close().await;
    Ok(())
}

fn parse_uid(raw: &str) -> Result<CardId> {
    match CardId::parse(raw) {
        Ok(card) => Ok(card),
        Err(e) => bail!("invalid card uid {raw:?}: {e}"),
    }
}
