// podium - terminal viewer for presentation decks
//
// Architecture:
// - Deck: static document structure loaded from TOML (or the embedded demo)
// - Navigator: section state machine emitting UI commands and notifications
// - RevealAnimator: visibility-triggered one-shot reveal/counter animations
// - InteractionLog: in-memory record of user interactions
// - TUI (ratatui): renders the deck and wires input to the components above

mod cli;
mod config;
mod deck;
mod logging;
mod nav;
mod record;
mod reveal;
mod tui;
mod viewport;

use anyhow::Result;
use clap::Parser;
use config::Config;
use deck::Deck;
use logging::{LogBuffer, TuiLogLayer};
use record::InteractionLog;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tui::theme::ThemeKind;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Subcommands (config --show, --reset, --path) exit early
    if cli::handle_command(&cli) {
        return Ok(());
    }

    // Ensure the config template exists (helps users discover options)
    Config::ensure_config_exists();
    let config = Config::load();

    // Logs go to an in-memory buffer so they never garble the alternate
    // screen; file logging is opt-in on top of that.
    //
    // Precedence: RUST_LOG env var > config file > default "info"
    let log_buffer = LogBuffer::new();
    let default_filter = format!("podium={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // The guard must stay alive for the program's duration so logs flush
    let _file_guard: Option<tracing_appender::non_blocking::WorkerGuard> =
        if config.logging.file_enabled {
            match std::fs::create_dir_all(&config.logging.file_dir) {
                Ok(()) => {
                    let appender = tracing_appender::rolling::daily(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    );
                    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(TuiLogLayer::new(log_buffer.clone()))
                        .with(
                            tracing_subscriber::fmt::layer()
                                .with_writer(non_blocking)
                                .with_ansi(false),
                        )
                        .init();
                    Some(guard)
                }
                Err(e) => {
                    eprintln!(
                        "Warning: could not create log directory {}: {}",
                        config.logging.file_dir.display(),
                        e
                    );
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(TuiLogLayer::new(log_buffer.clone()))
                        .init();
                    None
                }
            }
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(TuiLogLayer::new(log_buffer.clone()))
                .init();
            None
        };

    let deck = match &cli.deck {
        Some(path) => Deck::load(path)?,
        None => Deck::embedded(),
    };
    tracing::info!(
        title = %deck.title,
        sections = deck.sections.len(),
        "deck loaded"
    );

    let theme = ThemeKind::from_name(cli.theme.as_deref().unwrap_or(&config.theme));
    let log = InteractionLog::new();

    tui::run_tui(
        deck,
        config,
        log.clone(),
        log_buffer,
        cli.section.clone(),
        theme,
    )
    .await?;

    // The log never leaves the process; surface a count so a session's
    // interactions aren't silently discarded
    println!("{} interactions recorded this session", log.len());

    Ok(())
}
