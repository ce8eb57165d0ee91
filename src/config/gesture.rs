//! Gesture timing configuration

use serde::Deserialize;

/// Timing windows and thresholds for touch/button gestures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureConfig {
    /// Touches closer together than this are hardware bounce and ignored
    pub debounce_ms: u64,
    /// Touches further apart than this start a new gesture
    pub reset_window_ms: u64,
    /// Middle-zone panic fires once the repeat count exceeds this
    pub panic_threshold: u32,
    /// Cursor lines moved per scroll activation
    pub scroll_batch: usize,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 150,
            reset_window_ms: 1500,
            panic_threshold: 5,
            scroll_batch: 5,
        }
    }
}

/// Gesture settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileGesture {
    pub debounce_ms: Option<u64>,
    pub reset_window_ms: Option<u64>,
    pub panic_threshold: Option<u32>,
    pub scroll_batch: Option<usize>,
}

impl GestureConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileGesture>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            debounce_ms: file.debounce_ms.unwrap_or(defaults.debounce_ms),
            reset_window_ms: file.reset_window_ms.unwrap_or(defaults.reset_window_ms),
            panic_threshold: file.panic_threshold.unwrap_or(defaults.panic_threshold),
            scroll_batch: file.scroll_batch.unwrap_or(defaults.scroll_batch),
        }
    }
}
