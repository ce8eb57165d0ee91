//! Configuration for the terminal screen
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/termscreen/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod gesture;
mod observability;
mod screen;
mod serialization;


// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (maintain public API)
// ─────────────────────────────────────────────────────────────────────────────

pub use gesture::{FileGesture, GestureConfig};
pub use observability::{FileLogging, LogRotation, LoggingConfig};
pub use screen::{BufferConfig, DisplayConfig, FileBuffer, FileDisplay};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Demo mode: stream mock scanner output into the screen
    pub demo_mode: bool,

    /// Device display geometry and status bar
    pub display: DisplayConfig,

    /// Text buffer limits
    pub buffer: BufferConfig,

    /// Gesture timing windows and thresholds
    pub gesture: GestureConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    /// Optional [display] section
    pub display: Option<FileDisplay>,

    /// Optional [buffer] section
    pub buffer: Option<FileBuffer>,

    /// Optional [gesture] section
    pub gesture: Option<FileGesture>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/termscreen/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("termscreen").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        // Config::default().to_toml() is the single source of truth
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    ///
    /// A config file that exists but cannot be read or parsed is reported
    /// and exits the process instead of falling back to defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match Self::parse_file_config(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n  CONFIG ERROR - Failed to parse configuration file\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  To reset, run `termscreen config --reset`.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n  CONFIG ERROR - Cannot read configuration file\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    pub(crate) fn parse_file_config(contents: &str) -> Result<FileConfig, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Resolve a parsed file config against defaults (no env lookups)
    pub(crate) fn from_file(file: FileConfig) -> Self {
        Self {
            demo_mode: false,
            display: DisplayConfig::from_file(file.display),
            buffer: BufferConfig::from_file(file.buffer),
            gesture: GestureConfig::from_file(file.gesture),
            logging: LoggingConfig::from_file(file.logging),
        }
    }

    /// Load configuration: file -> env vars -> defaults
    pub fn from_env() -> Self {
        let mut config = Self::from_file(Self::load_file_config());

        // Display height: env > file > default
        if let Some(height) = std::env::var("TERMSCREEN_HEIGHT")
            .ok()
            .and_then(|v| parse_height(&v))
        {
            config.display.height = height;
        }

        // Log capture: env > file > default (off)
        if let Ok(v) = std::env::var("TERMSCREEN_CAPTURE_LOGS") {
            config.logging.capture_to_screen = env_flag(&v);
        }

        // Demo mode: env only (runtime flag)
        config.demo_mode = std::env::var("TERMSCREEN_DEMO")
            .map(|v| env_flag(&v))
            .unwrap_or(false);

        config
    }
}

fn env_flag(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

/// Screen height from an env value; zero is rejected like in the file
pub(crate) fn parse_height(value: &str) -> Option<u32> {
    value.trim().parse().ok().filter(|h| *h > 0)
}
