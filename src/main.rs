mod commands;
mod gateway;
mod i18n;

use clap::{Parser, Subcommand};
use crewbot_channels::telegram::TelegramChannel;
use crewbot_core::{
    config::{self, Config, StoreBackend},
    shellexpand,
    traits::Channel,
};
use crewbot_memory::{
    AppointmentIntake, AppointmentLog, MemoryAppointmentLog, SessionStore, SqliteAppointmentLog,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "crewbot",
    version,
    about = "Bilingual Telegram front desk for a building and repair business"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot.
    Start,
    /// Show configuration and store health.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;

    match cli.command {
        Commands::Start => {
            // Keep the guard alive so buffered log lines are flushed on exit.
            let _log_guard = init_tracing(&cfg)?;

            let mut channels: HashMap<String, Arc<dyn Channel>> = HashMap::new();

            if let Some(ref tg) = cfg.channel.telegram {
                if tg.enabled {
                    if tg.bot_token.trim().is_empty() {
                        anyhow::bail!(
                            "Telegram is enabled but bot_token is empty. \
                             Set it in config.toml or TELEGRAM_BOT_TOKEN env var."
                        );
                    }
                    let channel = TelegramChannel::new(tg.clone());
                    channels.insert("telegram".to_string(), Arc::new(channel));
                }
            }

            if channels.is_empty() {
                anyhow::bail!("No channels enabled. Enable at least one channel in config.toml.");
            }

            let log = build_appointment_log(&cfg).await?;
            let sessions = Arc::new(SessionStore::new());
            let intake = AppointmentIntake::new(sessions.clone(), log);
            let router = gateway::Router::new(sessions, intake);

            info!("{} starting", cfg.bot.name);
            let gw = Arc::new(gateway::Gateway::new(channels, router));
            gw.run().await?;
        }
        Commands::Status => {
            println!("crewbot status\n");
            println!("Config: {}", cli.config);
            println!("Bot name: {}", cfg.bot.name);
            println!("Data dir: {}", shellexpand(&cfg.bot.data_dir));
            println!();

            if let Some(ref tg) = cfg.channel.telegram {
                println!(
                    "  telegram: {}",
                    if tg.enabled && !tg.bot_token.trim().is_empty() {
                        "configured"
                    } else if tg.enabled {
                        "enabled but missing bot_token"
                    } else {
                        "disabled"
                    }
                );
            } else {
                println!("  telegram: not configured");
            }

            match cfg.store.backend {
                StoreBackend::Memory => println!("  store: memory (requests are not kept)"),
                StoreBackend::Sqlite => {
                    let store = SqliteAppointmentLog::new(&cfg.store.db_path).await?;
                    println!(
                        "  store: sqlite at {} ({} appointment request(s))",
                        shellexpand(&cfg.store.db_path),
                        store.count().await?
                    );
                }
            }
        }
    }

    Ok(())
}

/// Console logging, plus a daily rolling file under `{data_dir}/logs` when enabled.
///
/// `RUST_LOG` overrides the configured level.
fn init_tracing(cfg: &Config) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.bot.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = if cfg.bot.log_to_file {
        let dir = PathBuf::from(shellexpand(&cfg.bot.data_dir)).join("logs");
        std::fs::create_dir_all(&dir)?;
        let appender = tracing_appender::rolling::daily(dir, "crewbot.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        (
            Some(fmt::layer().with_writer(writer).with_ansi(false)),
            Some(guard),
        )
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Build the configured appointment log.
async fn build_appointment_log(cfg: &Config) -> anyhow::Result<Arc<dyn AppointmentLog>> {
    let log: Arc<dyn AppointmentLog> = match cfg.store.backend {
        StoreBackend::Memory => {
            info!("Appointment requests kept in memory only");
            Arc::new(MemoryAppointmentLog::new())
        }
        StoreBackend::Sqlite => Arc::new(SqliteAppointmentLog::new(&cfg.store.db_path).await?),
    };
    Ok(log)
}
