// CLI module - command-line argument parsing and handlers
//
// The main invocation takes an optional deck file plus a --section deep
// link. A config subcommand manages the config file: --show, --reset,
// --path.

use crate::config::{Config, VERSION};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// podium - terminal deck viewer
#[derive(Parser)]
#[command(name = "podium")]
#[command(version = VERSION)]
#[command(about = "Terminal viewer for presentation decks", long_about = None)]
pub struct Cli {
    /// Deck file to load (TOML); defaults to the embedded demo deck
    pub deck: Option<PathBuf>,

    /// Deep-link to a section id on startup; unknown ids are ignored
    #[arg(long)]
    pub section: Option<String>,

    /// Theme override: dark, light, nord
    #[arg(long)]
    pub theme: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to the commented template
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// Handle subcommands. Returns true if one was handled (exit after).
pub fn handle_command(cli: &Cli) -> bool {
    match &cli.command {
        Some(Commands::Config { show, reset, path }) => {
            if *path {
                handle_config_path();
            } else if *show {
                handle_config_show();
            } else if *reset {
                handle_config_reset();
            } else {
                println!("Usage: podium config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to the commented template");
                println!("  --path    Show config file path");
            }
            true
        }
        None => false,
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = Config::load();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    println!("theme = {:?}", config.theme);
    println!("tick_ms = {}", config.tick_ms);
    println!("counter_duration_ms = {}", config.counter_duration_ms);
    println!("reveal_lead_rows = {}", config.reveal_lead_rows);
    println!();
    println!("[logging]");
    println!("level = {:?}", config.logging.level);
    println!("file_enabled = {}", config.logging.file_enabled);
    println!("file_dir = {:?}", config.logging.file_dir.display().to_string());
    println!("file_prefix = {:?}", config.logging.file_prefix);
}

fn handle_config_reset() {
    match Config::reset_config_file() {
        Ok(path) => println!("Config reset: {}", path.display()),
        Err(e) => {
            eprintln!("Error: Could not reset config: {e}");
            std::process::exit(1);
        }
    }
}
