// Command-line surface
//
// Running with no subcommand opens the simulated device screen. The only
// subcommand inspects or rewrites the config file and exits.

use crate::config::{Config, VERSION};
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

/// Simulated device log screen with tap and button gestures
#[derive(Parser)]
#[command(name = "termscreen", version = VERSION)]
#[command(
    about = "Simulated device log screen with tap and button gestures",
    after_help = "Env overrides: TERMSCREEN_HEIGHT, TERMSCREEN_CAPTURE_LOGS, TERMSCREEN_DEMO, RUST_LOG"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect or rewrite ~/.config/termscreen/config.toml
    #[command(group(ArgGroup::new("action").required(true)))]
    Config {
        /// Print the resolved settings, env overrides applied
        #[arg(long, group = "action")]
        show: bool,

        /// Overwrite the file with the stock template
        #[arg(long, group = "action")]
        reset: bool,

        /// Print where the file lives
        #[arg(long, group = "action")]
        path: bool,
    },
}

/// Run a subcommand if one was given; true means the process should exit
pub fn handle_cli() -> bool {
    let Some(Commands::Config { show, reset, path }) = Cli::parse().command else {
        return false;
    };

    let outcome = if path {
        config_file().map(|file| println!("{}", file.display()))
    } else if reset {
        reset_config()
    } else if show {
        show_config();
        Ok(())
    } else {
        Ok(())
    };

    if let Err(message) = outcome {
        eprintln!("termscreen: {message}");
        std::process::exit(1);
    }
    true
}

fn config_file() -> Result<PathBuf, String> {
    Config::config_path().ok_or_else(|| "no home directory to hold the config file".to_string())
}

fn show_config() {
    let config = Config::from_env();
    print!("{}", config.to_toml());
    println!();
    println!("# demo_mode = {} (TERMSCREEN_DEMO only)", config.demo_mode);
}

fn reset_config() -> Result<(), String> {
    let file = config_file()?;

    if let Some(dir) = file.parent() {
        std::fs::create_dir_all(dir).map_err(|e| format!("{}: {e}", dir.display()))?;
    }

    std::fs::write(&file, Config::default().to_toml())
        .map_err(|e| format!("{}: {e}", file.display()))?;
    println!("Wrote stock config to {}", file.display());
    Ok(())
}
