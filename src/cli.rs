// CLI module - command-line argument parsing and handlers
//
// Provides subcommands for configuration management and a version query:
// - config --show: Display effective configuration
// - config --path: Show config file path
// - config --reset: Regenerate config file with defaults
// - version: Print the version reported by the shell bridge

use crate::config::{Config, APP_NAME, VERSION};
use crate::shell::{DesktopShell, NativeShell};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// kftray-ui - terminal component kit for port-forward management
#[derive(Parser, Debug)]
#[command(name = APP_NAME)]
#[command(version = VERSION)]
#[command(about = "Component gallery for the kftray terminal UI", long_about = None)]
pub struct Cli {
    /// Preload port-forward configs from a JSON export
    #[arg(long, value_name = "FILE")]
    pub configs: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
    /// Print the application version
    Version,
}

/// Handle CLI commands. Returns the parsed arguments when the gallery
/// should run, `None` when a subcommand was handled (exit after).
pub async fn handle_cli() -> Option<Cli> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config { show, reset, path }) => {
            if path {
                handle_config_path();
            } else if show {
                handle_config_show();
            } else if reset {
                handle_config_reset();
            } else {
                // No flag provided, show help
                println!("Usage: {APP_NAME} config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --path    Show config file path");
            }
            None
        }
        Some(Commands::Version) => {
            handle_version().await;
            None
        }
        None => Some(cli), // No subcommand, run the gallery
    }
}

async fn handle_version() {
    // The version query never sends notifications
    let (tx, _rx) = mpsc::channel(1);
    let shell = NativeShell::new(tx);
    match shell.get_app_version().await {
        Ok(version) => println!("{APP_NAME} {version}"),
        Err(e) => {
            eprintln!("Error: Could not read version: {}", e);
            std::process::exit(1);
        }
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
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    // Show source info
    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        let _ = std::io::stderr().flush();

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err()
            || !input.trim().eq_ignore_ascii_case("y")
        {
            println!("Aborted.");
            return;
        }
    }

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }

    // Write the default config (using Config's single source of truth)
    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}
