//! Display and text buffer configuration

use serde::Deserialize;

// ─────────────────────────────────────────────────────────────────────────────
// Display
// ─────────────────────────────────────────────────────────────────────────────

/// Device display settings
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    /// Vertical resolution in pixels; touch zones are thirds of this
    pub height: u32,
    /// Label registered with the status bar on create
    pub status_label: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            height: 320,
            status_label: "Terminal".to_string(),
        }
    }
}

/// Display settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileDisplay {
    pub height: Option<u32>,
    pub status_label: Option<String>,
}

impl DisplayConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileDisplay>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            // A zero-height screen has no zones
            height: file.height.filter(|h| *h > 0).unwrap_or(defaults.height),
            status_label: file.status_label.unwrap_or(defaults.status_label),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Buffer
// ─────────────────────────────────────────────────────────────────────────────

/// Text buffer limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferConfig {
    /// Heartbeat markers clear the buffer once it is longer than this
    pub heartbeat_clear_threshold: usize,
    /// Hard cap on buffer length in bytes
    pub max_len: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            heartbeat_clear_threshold: 500,
            max_len: 4096,
        }
    }
}

/// Buffer settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileBuffer {
    pub heartbeat_clear_threshold: Option<usize>,
    pub max_len: Option<usize>,
}

impl BufferConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileBuffer>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        // The cap must hold at least a newline
        let max_len = file.max_len.filter(|m| *m > 1).unwrap_or(defaults.max_len);

        Self {
            heartbeat_clear_threshold: file
                .heartbeat_clear_threshold
                .unwrap_or(defaults.heartbeat_clear_threshold)
                .min(max_len),
            max_len,
        }
    }
}
